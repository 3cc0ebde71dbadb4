//! 全局配置管理,存储词表构造期所有可配置项
pub mod wordlist;

pub use self::wordlist::{WordlistConfig, WordlistConfigBuilder};
