//! 模板变量替换：{YYYY} {YY} {MM} {DD} {SUB} {HOST} {TLD}
//! 替换顺序固定，后一个令牌检查的是前一个令牌替换后的结果

use chrono::{DateTime, Local, TimeZone};
use log::debug;
use once_cell::sync::Lazy;
use regex::bytes::{NoExpand, Regex};
use std::borrow::Cow;
use std::fmt;

use crate::expander::locality::Locality;

/// 模板令牌（声明顺序即替换顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateToken {
    Year,
    ShortYear,
    Month,
    Day,
    Sub,
    Host,
    Tld,
}

impl TemplateToken {
    pub const ALL: [TemplateToken; 7] = [
        TemplateToken::Year,
        TemplateToken::ShortYear,
        TemplateToken::Month,
        TemplateToken::Day,
        TemplateToken::Sub,
        TemplateToken::Host,
        TemplateToken::Tld,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TemplateToken::Year => "YYYY",
            TemplateToken::ShortYear => "YY",
            TemplateToken::Month => "MM",
            TemplateToken::Day => "DD",
            TemplateToken::Sub => "SUB",
            TemplateToken::Host => "HOST",
            TemplateToken::Tld => "TLD",
        }
    }

    /// 词表中出现的占位符字面量
    pub fn placeholder(self) -> String {
        format!("{{{}}}", self.name())
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TemplateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// 占位符均为字面量，转义后编译不会失败
static TOKEN_PATTERNS: Lazy<Vec<(TemplateToken, Regex)>> = Lazy::new(|| {
    TemplateToken::ALL
        .iter()
        .map(|token| {
            let pattern = regex::escape(&token.placeholder());
            let re = Regex::new(&pattern).unwrap_or_else(|e| {
                panic!("模板占位符 {} 编译失败: {}", token.placeholder(), e)
            });
            (*token, re)
        })
        .collect()
});

/// 构造期解析出的模板变量表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVariables {
    values: [Option<String>; 7],
}

impl TemplateVariables {
    /// 以当前本地时间 + 目标 URL 解析变量表
    pub fn from_url(url: &str) -> Self {
        Self::resolve(&Local::now(), url)
    }

    /// 以指定时钟 + 目标 URL 解析变量表
    pub fn resolve<Tz>(now: &DateTime<Tz>, url: &str) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let mut vars = Self::default();
        vars.set(TemplateToken::Year, now.format("%Y").to_string());
        vars.set(TemplateToken::ShortYear, now.format("%y").to_string());
        vars.set(TemplateToken::Month, now.format("%m").to_string());
        vars.set(TemplateToken::Day, now.format("%d").to_string());

        match Locality::parse(url) {
            Some(locality) => {
                vars.set(TemplateToken::Sub, locality.subdomain);
                vars.set(TemplateToken::Host, locality.domain);
                vars.set(TemplateToken::Tld, locality.tld);
            }
            None => debug!("目标URL[{}]无法解析归属，SUB/HOST/TLD 保持未解析", url),
        }
        vars
    }

    pub fn set(&mut self, token: TemplateToken, value: impl Into<String>) {
        self.values[token.index()] = Some(value.into());
    }

    /// 已解析且非空的值；空值与未解析同等对待
    pub fn get(&self, token: TemplateToken) -> Option<&str> {
        self.values[token.index()]
            .as_deref()
            .filter(|value| !value.is_empty())
    }

    /// 按替换顺序遍历 (令牌, 值)
    pub fn iter(&self) -> impl Iterator<Item = (TemplateToken, Option<&str>)> + '_ {
        TemplateToken::ALL
            .into_iter()
            .map(move |token| (token, self.get(token)))
    }
}

/// 模板展开器
#[derive(Debug, Clone)]
pub struct TemplateExpander {
    variables: TemplateVariables,
    drop_unresolved: bool,
}

impl TemplateExpander {
    pub fn new(variables: TemplateVariables, drop_unresolved: bool) -> Self {
        Self {
            variables,
            drop_unresolved,
        }
    }

    pub fn variables(&self) -> &TemplateVariables {
        &self.variables
    }

    /// 展开一行。返回 None 表示该行应被丢弃
    pub fn expand<'a>(&self, line: &'a [u8]) -> Option<Cow<'a, [u8]>> {
        let mut text = Cow::Borrowed(line);
        for (token, re) in TOKEN_PATTERNS.iter() {
            if !re.is_match(&text) {
                continue;
            }
            match self.variables.get(*token) {
                Some(value) => {
                    let replaced = re.replace_all(&text, NoExpand(value.as_bytes())).into_owned();
                    text = Cow::Owned(replaced);
                }
                // 后续令牌不再检查
                None if self.drop_unresolved => return None,
                None => return Some(Cow::Borrowed(&b""[..])),
            }
        }
        Some(text)
    }
}
