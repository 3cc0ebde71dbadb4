//! 词表行变换模块：模板替换、扩展名展开、注释剥离
pub mod comment;
pub mod extension;
pub mod locality;
pub mod template;

pub use self::comment::CommentStripper;
pub use self::extension::{ExtensionExpander, ExtensionPolicy, EXT2_MARKER, EXT_MARKER};
pub use self::locality::Locality;
pub use self::template::{TemplateExpander, TemplateToken, TemplateVariables};
