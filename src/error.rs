//! 全局错误类型定义
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RswordlistError {
    // 词表来源相关错误（构造期，致命）
    #[error("词表不存在：{0}")]
    SourceNotFound(String),
    #[error("词表[{path}]读取失败：{source}")]
    SourceUnreadable {
        path: String,
        #[source]
        source: IoError,
    },

    // 逐行扫描错误（部分数据直接丢弃）
    #[error("词表扫描失败：{0}")]
    ScanError(#[from] IoError),
    #[error("词表第{line}行超过{limit}字节上限")]
    LineTooLong { line: usize, limit: usize },

    // 输出相关错误
    #[error("载荷输出失败：{0}")]
    WriteError(#[source] IoError),

    // 配置相关错误
    #[error("无效配置：{0}")]
    InvalidConfig(String),
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    #[error("异步任务执行失败：{0}")]
    AsyncTaskError(String),
}

// 全局Result类型
pub type WlResult<T> = Result<T, RswordlistError>;
