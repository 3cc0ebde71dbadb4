//! 词表构造配置

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{RswordlistError, WlResult};

/// 默认载荷关键字（非兼容模式下只有该关键字会追加扩展名）
pub const DEFAULT_KEYWORD: &str = "FUZZ";
/// 单行最大字节数，与常见行扫描器的 64KiB 令牌上限一致
pub const DEFAULT_MAX_LINE_BYTES: usize = 64 * 1024;

/// 词表构造配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordlistConfig {
    /// dirsearch 兼容模式：按 %EXT% / %EXT2% 标记展开
    pub dirsearch_compat: bool,
    /// 主扩展名列表
    pub extensions: Vec<String>,
    /// 次扩展名列表（仅兼容模式下的 %EXT2% 使用）
    pub extensions2: Vec<String>,
    /// 是否忽略词表中的注释
    pub ignore_wordlist_comments: bool,
    /// 模糊测试目标 URL，用于解析 {SUB}/{HOST}/{TLD}
    pub url: String,
    /// 规范默认关键字
    pub default_keyword: String,
    /// 扫描单行的字节上限，超出视为扫描错误
    pub max_line_bytes: usize,
    /// 模板变量无法解析时丢弃整行（false 时保留为空载荷）
    pub drop_unresolved_templates: bool,
}

impl Default for WordlistConfig {
    fn default() -> Self {
        Self {
            dirsearch_compat: false,
            extensions: Vec::new(),
            extensions2: Vec::new(),
            ignore_wordlist_comments: false,
            url: String::new(),
            default_keyword: DEFAULT_KEYWORD.to_string(),
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            drop_unresolved_templates: true,
        }
    }
}

impl WordlistConfig {
    pub fn builder() -> WordlistConfigBuilder {
        WordlistConfigBuilder::new()
    }

    /// 从 JSON 字符串加载配置，缺省字段取默认值
    pub fn from_json_str(content: &str) -> WlResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载配置
    pub fn from_json_file(path: impl AsRef<Path>) -> WlResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| RswordlistError::SourceUnreadable {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json_str(&content)
    }

    /// 配置校验
    pub fn validate(&self) -> WlResult<()> {
        if self.default_keyword.is_empty() {
            return Err(RswordlistError::InvalidConfig(
                "default_keyword must not be empty".into(),
            ));
        }
        if self.max_line_bytes == 0 {
            return Err(RswordlistError::InvalidConfig(
                "max_line_bytes must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// 兼容模式是否生效（必须同时配置主扩展名）
    pub fn compat_active(&self) -> bool {
        self.dirsearch_compat && !self.extensions.is_empty()
    }
}

/// 配置构建器（链式 API）
#[derive(Debug, Clone, Default)]
pub struct WordlistConfigBuilder {
    config: WordlistConfig,
}

impl WordlistConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dirsearch_compat(mut self, enabled: bool) -> Self {
        self.config.dirsearch_compat = enabled;
        self
    }

    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn extensions2<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extensions2 = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn ignore_wordlist_comments(mut self, ignore: bool) -> Self {
        self.config.ignore_wordlist_comments = ignore;
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    pub fn default_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.config.default_keyword = keyword.into();
        self
    }

    pub fn max_line_bytes(mut self, limit: usize) -> Self {
        self.config.max_line_bytes = limit;
        self
    }

    pub fn drop_unresolved_templates(mut self, drop: bool) -> Self {
        self.config.drop_unresolved_templates = drop;
        self
    }

    pub fn build(self) -> WordlistConfig {
        self.config
    }
}
