//! 工具模块：提供通用工具函数
pub mod dedup;
pub mod preview;

pub use self::dedup::Deduplicator;
pub use self::preview::preview_compact;
