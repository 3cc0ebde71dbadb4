//! 扩展名展开
//! 两种互斥策略：
//! - dirsearch 兼容模式：按 %EXT% / %EXT2% 标记逐个替换
//! - 默认模式：默认关键字的每一行追加每个扩展名

use once_cell::sync::Lazy;
use regex::bytes::{NoExpand, Regex};

use crate::config::WordlistConfig;
use crate::expander::comment::CommentStripper;

/// 主扩展名标记
pub const EXT_MARKER: &str = "%EXT%";
/// 次扩展名标记
pub const EXT2_MARKER: &str = "%EXT2%";

static EXT_RE: Lazy<Regex> = Lazy::new(|| marker_regex(EXT_MARKER));
static EXT2_RE: Lazy<Regex> = Lazy::new(|| marker_regex(EXT2_MARKER));

fn marker_regex(marker: &str) -> Regex {
    Regex::new(&regex::escape(marker))
        .unwrap_or_else(|e| panic!("扩展名标记 {} 编译失败: {}", marker, e))
}

/// 生效的扩展名策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionPolicy {
    /// 兼容模式（已配置主扩展名）
    DirsearchCompat,
    /// 默认模式；append 为 true 时追加扩展名
    Default { append: bool },
}

#[derive(Debug, Clone)]
pub struct ExtensionExpander {
    policy: ExtensionPolicy,
    extensions: Vec<Vec<u8>>,
    extensions2: Vec<Vec<u8>>,
    stripper: CommentStripper,
}

impl ExtensionExpander {
    pub fn new(config: &WordlistConfig, keyword: &str) -> Self {
        let policy = if config.dirsearch_compat {
            // 兼容模式未配置主扩展名时按默认模式处理，此时扩展名列表为空
            if config.compat_active() {
                ExtensionPolicy::DirsearchCompat
            } else {
                ExtensionPolicy::Default { append: false }
            }
        } else {
            ExtensionPolicy::Default {
                append: keyword == config.default_keyword && !config.extensions.is_empty(),
            }
        };

        Self {
            policy,
            extensions: to_bytes(&config.extensions),
            extensions2: to_bytes(&config.extensions2),
            stripper: CommentStripper::new(config.ignore_wordlist_comments),
        }
    }

    pub fn policy(&self) -> ExtensionPolicy {
        self.policy
    }

    /// 展开一行，结果追加到 out
    pub fn expand(&self, line: &[u8], out: &mut Vec<Vec<u8>>) {
        match self.policy {
            ExtensionPolicy::DirsearchCompat => self.expand_compat(line, out),
            ExtensionPolicy::Default { append } => self.expand_default(line, append, out),
        }
    }

    fn expand_compat(&self, line: &[u8], out: &mut Vec<Vec<u8>>) {
        // %EXT2% 的展开独立于 %EXT%，两者结果拼接
        if !self.extensions2.is_empty() && EXT2_RE.is_match(line) {
            fan_out(&EXT2_RE, line, &self.extensions2, out);
        }

        if EXT_RE.is_match(line) {
            fan_out(&EXT_RE, line, &self.extensions, out);
        } else if let Some(stripped) = self.stripper.strip(line) {
            out.push(stripped.to_vec());
        }
    }

    fn expand_default(&self, line: &[u8], append: bool, out: &mut Vec<Vec<u8>>) {
        let Some(stripped) = self.stripper.strip(line) else {
            return;
        };
        out.push(stripped.to_vec());

        if append {
            for ext in &self.extensions {
                let mut word = Vec::with_capacity(stripped.len() + ext.len());
                word.extend_from_slice(stripped);
                word.extend_from_slice(ext);
                out.push(word);
            }
        }
    }
}

fn fan_out(marker: &Regex, line: &[u8], extensions: &[Vec<u8>], out: &mut Vec<Vec<u8>>) {
    for ext in extensions {
        out.push(marker.replace_all(line, NoExpand(ext.as_slice())).into_owned());
    }
}

fn to_bytes(extensions: &[String]) -> Vec<Vec<u8>> {
    extensions.iter().map(|ext| ext.as_bytes().to_vec()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(expander: &ExtensionExpander, line: &[u8]) -> Vec<String> {
        let mut out = Vec::new();
        expander.expand(line, &mut out);
        out.into_iter()
            .map(|v| String::from_utf8(v).unwrap())
            .collect()
    }

    #[test]
    fn test_compat_primary_fan_out() {
        let config = WordlistConfig::builder()
            .dirsearch_compat(true)
            .extensions([".php", ".html"])
            .build();
        let expander = ExtensionExpander::new(&config, "FUZZ");
        assert_eq!(expander.policy(), ExtensionPolicy::DirsearchCompat);
        assert_eq!(run(&expander, b"admin%EXT%"), vec!["admin.php", "admin.html"]);
    }

    #[test]
    fn test_compat_replaces_every_marker() {
        let config = WordlistConfig::builder()
            .dirsearch_compat(true)
            .extensions([".php"])
            .build();
        let expander = ExtensionExpander::new(&config, "FUZZ");
        assert_eq!(run(&expander, b"%EXT%/index%EXT%"), vec![".php/index.php"]);
    }

    #[test]
    fn test_compat_secondary_and_verbatim() {
        let config = WordlistConfig::builder()
            .dirsearch_compat(true)
            .extensions([".php"])
            .extensions2([".bak"])
            .build();
        let expander = ExtensionExpander::new(&config, "FUZZ");
        // 次扩展名展开后，行本身不含 %EXT%，按原样输出
        assert_eq!(run(&expander, b"old%EXT2%"), vec!["old.bak", "old%EXT2%"]);
    }

    #[test]
    fn test_compat_both_markers() {
        let config = WordlistConfig::builder()
            .dirsearch_compat(true)
            .extensions([".php", ".asp"])
            .extensions2([".bak"])
            .build();
        let expander = ExtensionExpander::new(&config, "FUZZ");
        assert_eq!(
            run(&expander, b"a%EXT%%EXT2%"),
            vec!["a%EXT%.bak", "a.php%EXT2%", "a.asp%EXT2%"]
        );
    }

    #[test]
    fn test_compat_secondary_ignored_without_list() {
        let config = WordlistConfig::builder()
            .dirsearch_compat(true)
            .extensions([".php"])
            .build();
        let expander = ExtensionExpander::new(&config, "FUZZ");
        assert_eq!(run(&expander, b"old%EXT2%"), vec!["old%EXT2%"]);
    }

    #[test]
    fn test_compat_strips_comments_on_verbatim_only() {
        let config = WordlistConfig::builder()
            .dirsearch_compat(true)
            .extensions([".php"])
            .ignore_wordlist_comments(true)
            .build();
        let expander = ExtensionExpander::new(&config, "FUZZ");
        assert!(run(&expander, b"# header").is_empty());
        assert_eq!(run(&expander, b"login #old"), vec!["login"]);
        assert_eq!(run(&expander, b"a%EXT% #x"), vec!["a.php #x"]);
    }

    #[test]
    fn test_default_mode_appends_for_default_keyword() {
        let config = WordlistConfig::builder().extensions([".bak"]).build();
        let expander = ExtensionExpander::new(&config, "FUZZ");
        assert_eq!(
            expander.policy(),
            ExtensionPolicy::Default { append: true }
        );
        assert_eq!(run(&expander, b"config"), vec!["config", "config.bak"]);
    }

    #[test]
    fn test_default_mode_other_keyword() {
        let config = WordlistConfig::builder().extensions([".bak"]).build();
        let expander = ExtensionExpander::new(&config, "USER");
        assert_eq!(run(&expander, b"config"), vec!["config"]);
    }

    #[test]
    fn test_default_mode_marker_is_literal() {
        let config = WordlistConfig::builder().extensions([".php"]).build();
        let expander = ExtensionExpander::new(&config, "FUZZ");
        assert_eq!(run(&expander, b"a%EXT%"), vec!["a%EXT%", "a%EXT%.php"]);
    }

    #[test]
    fn test_default_mode_appends_to_stripped_line() {
        let config = WordlistConfig::builder()
            .extensions([".bak"])
            .ignore_wordlist_comments(true)
            .build();
        let expander = ExtensionExpander::new(&config, "FUZZ");
        assert_eq!(run(&expander, b"config #x"), vec!["config", "config.bak"]);
        assert!(run(&expander, b"#config").is_empty());
    }

    #[test]
    fn test_compat_without_extensions_never_appends() {
        let config = WordlistConfig::builder().dirsearch_compat(true).build();
        let expander = ExtensionExpander::new(&config, "FUZZ");
        assert_eq!(expander.policy(), ExtensionPolicy::Default { append: false });
        assert_eq!(run(&expander, b"a%EXT%"), vec!["a%EXT%"]);
    }
}
