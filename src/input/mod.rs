//! 输入模块：词表来源读取与游标约定
pub mod provider;
pub mod reader;
pub mod wordlist;

pub use self::provider::InputProvider;
pub use self::reader::{LineScanner, SourcePath, STDIN_SENTINEL};
pub use self::wordlist::{BuildStats, Payloads, WordlistInput};
