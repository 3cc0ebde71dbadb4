//! rswordlist - Web 模糊测试词表输入源
//! 读取静态词表（文件或标准输入），完成模板替换、扩展名展开、注释剥离与去重，
//! 以关键字绑定的载荷序列供模糊测试引擎按游标顺序消费

pub mod config;
pub mod error;
pub mod expander;
pub mod input;
pub mod utils;

// 导出全局错误类型
pub use self::error::{RswordlistError, WlResult};

// 导出配置结构体与构建器
pub use crate::config::wordlist::{DEFAULT_KEYWORD, DEFAULT_MAX_LINE_BYTES};
pub use crate::config::{WordlistConfig, WordlistConfigBuilder};

// 导出行变换组件
pub use crate::expander::{
    CommentStripper, ExtensionExpander, ExtensionPolicy, Locality, TemplateExpander,
    TemplateToken, TemplateVariables, EXT2_MARKER, EXT_MARKER,
};

// 导出输入源核心接口
pub use crate::input::{BuildStats, InputProvider, SourcePath, WordlistInput, STDIN_SENTINEL};

// 导出通用工具
pub use crate::utils::Deduplicator;
