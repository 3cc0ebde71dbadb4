//! 词表输入源
//! 构造期一次性完成：逐行模板替换 → 扩展名展开（含注释剥离）→ 去重，
//! 之后载荷序列不可变，仅游标可移动

use log::{debug, info};
use std::io::BufRead;
use std::slice;

use crate::config::WordlistConfig;
use crate::error::{RswordlistError, WlResult};
use crate::expander::{ExtensionExpander, TemplateExpander, TemplateVariables};
use crate::input::provider::InputProvider;
use crate::input::reader::{LineScanner, SourcePath};
use crate::utils::{preview_compact, Deduplicator};

/// 构造期统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// 读取的原始行数
    pub lines_read: usize,
    /// 因模板变量未解析而丢弃的行数
    pub template_dropped: usize,
    /// 展开后（去重前）的行数
    pub expanded: usize,
}

/// 绑定到单个关键字的词表
#[derive(Debug, Clone)]
pub struct WordlistInput {
    keyword: String,
    data: Vec<Box<[u8]>>,
    position: usize,
    templates: TemplateVariables,
    stats: BuildStats,
}

impl WordlistInput {
    /// 从路径（或 "-" 表示标准输入）构造
    pub fn new(keyword: impl Into<String>, value: &str, config: &WordlistConfig) -> WlResult<Self> {
        config.validate()?;
        let source = SourcePath::parse(value);
        source.validate()?;
        let reader = source.open()?;
        let templates = TemplateVariables::from_url(&config.url);
        let input = Self::with_variables(keyword, reader, config, templates)?;
        info!(
            "词表[{}]加载完成：关键字={}, 载荷数={}",
            source.describe(),
            input.keyword,
            input.total()
        );
        Ok(input)
    }

    /// 从任意带缓冲的读取器构造，模板变量按当前时间解析
    pub fn from_reader<R: BufRead>(
        keyword: impl Into<String>,
        reader: R,
        config: &WordlistConfig,
    ) -> WlResult<Self> {
        let templates = TemplateVariables::from_url(&config.url);
        Self::with_variables(keyword, reader, config, templates)
    }

    /// 使用预先解析的模板变量构造
    pub fn with_variables<R: BufRead>(
        keyword: impl Into<String>,
        reader: R,
        config: &WordlistConfig,
        templates: TemplateVariables,
    ) -> WlResult<Self> {
        let keyword = keyword.into();
        if keyword.is_empty() {
            return Err(RswordlistError::InvalidConfig("keyword must not be empty".into()));
        }
        config.validate()?;

        let template = TemplateExpander::new(templates, config.drop_unresolved_templates);
        let extension = ExtensionExpander::new(config, &keyword);
        debug!(
            "关键字[{}]展开策略：{:?}, 忽略注释={}",
            keyword, extension.policy(), config.ignore_wordlist_comments
        );

        let mut stats = BuildStats::default();
        let mut dedup = Deduplicator::new();
        let mut expanded = Vec::new();
        let mut scanner = LineScanner::new(reader, config.max_line_bytes);

        // 任何扫描错误都直接返回，已展开的部分随之丢弃
        for line in scanner.by_ref() {
            let line = line?;
            let Some(text) = template.expand(&line) else {
                stats.template_dropped += 1;
                continue;
            };
            extension.expand(&text, &mut expanded);
            stats.expanded += expanded.len();
            for word in expanded.drain(..) {
                dedup.push(word);
            }
        }
        stats.lines_read = scanner.lines_read();

        let data = dedup.into_values();
        debug!(
            "关键字[{}]构造完成：原始行={}, 模板丢弃={}, 展开={}, 去重后={}",
            keyword,
            stats.lines_read,
            stats.template_dropped,
            stats.expanded,
            data.len()
        );
        if let Some(first) = data.first() {
            debug!("关键字[{}]首个载荷：{}", keyword, preview_compact(first, 64));
        }

        Ok(Self {
            keyword,
            data,
            position: 0,
            templates: template.variables().clone(),
            stats,
        })
    }

    /// 在 tokio 阻塞线程池中构造，避免阻塞异步运行时
    #[cfg(feature = "async-io")]
    pub async fn load_async(
        keyword: impl Into<String>,
        value: impl Into<String>,
        config: WordlistConfig,
    ) -> WlResult<Self> {
        let keyword = keyword.into();
        let value = value.into();
        tokio::task::spawn_blocking(move || Self::new(keyword, &value, &config))
            .await
            .map_err(|e| RswordlistError::AsyncTaskError(e.to_string()))?
    }

    /// 全部载荷（只读视图）
    pub fn values(&self) -> &[Box<[u8]>] {
        &self.data
    }

    /// 独立于游标的遍历，每次都从头开始
    pub fn iter(&self) -> Payloads<'_> {
        Payloads {
            inner: self.data.iter(),
        }
    }

    pub fn template_variables(&self) -> &TemplateVariables {
        &self.templates
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }
}

impl InputProvider for WordlistInput {
    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn position(&self) -> usize {
        self.position
    }

    fn reset_position(&mut self) {
        self.position = 0;
    }

    fn increment_position(&mut self) {
        if self.position < self.data.len() {
            self.position += 1;
        }
    }

    fn value(&self) -> Option<&[u8]> {
        self.data.get(self.position).map(|v| &v[..])
    }

    fn total(&self) -> usize {
        self.data.len()
    }
}

/// 载荷迭代器
pub struct Payloads<'a> {
    inner: slice::Iter<'a, Box<[u8]>>,
}

impl<'a> Iterator for Payloads<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|v| &v[..])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Payloads<'_> {}

impl<'a> IntoIterator for &'a WordlistInput {
    type Item = &'a [u8];
    type IntoIter = Payloads<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
