//! rswordlist 命令行：构造词表输入源并逐行输出最终载荷
//!
//! 运行命令：
//! cargo run --features cli -- -w words.txt -u https://www.example.com/FUZZ -e .php,.bak

use clap::Parser;
use env_logger::{Builder, Env, Target};
use rswordlist::{InputProvider, RswordlistError, WlResult, WordlistConfig, WordlistInput, DEFAULT_KEYWORD};
use serde_json::json;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "rswordlist", version, about = "Expand a fuzzing wordlist into its final payload sequence")]
struct Cli {
    /// 词表路径，"-" 表示标准输入
    #[arg(short = 'w', long = "wordlist")]
    wordlist: String,

    /// 绑定的关键字
    #[arg(short = 'k', long = "keyword", default_value = DEFAULT_KEYWORD)]
    keyword: String,

    /// 目标 URL（用于 {SUB}/{HOST}/{TLD}）
    #[arg(short = 'u', long = "url")]
    url: Option<String>,

    /// 主扩展名，逗号分隔
    #[arg(short = 'e', long = "extensions", value_delimiter = ',')]
    extensions: Vec<String>,

    /// 次扩展名（%EXT2%），逗号分隔
    #[arg(long = "ext2", value_delimiter = ',')]
    extensions2: Vec<String>,

    /// dirsearch 兼容模式
    #[arg(short = 'D', long = "dirsearch-compat")]
    dirsearch_compat: bool,

    /// 忽略词表注释
    #[arg(long = "ic")]
    ignore_comments: bool,

    /// 模板变量未解析时保留空载荷
    #[arg(long = "keep-unresolved")]
    keep_unresolved: bool,

    /// JSON 配置文件，命令行参数优先
    #[arg(long = "config")]
    config: Option<String>,

    /// 以 JSON 输出
    #[arg(long = "json")]
    json: bool,
}

impl Cli {
    fn build_config(&self) -> WlResult<WordlistConfig> {
        let mut config = match &self.config {
            Some(path) => WordlistConfig::from_json_file(path)?,
            None => WordlistConfig::default(),
        };
        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if !self.extensions.is_empty() {
            config.extensions = self.extensions.clone();
        }
        if !self.extensions2.is_empty() {
            config.extensions2 = self.extensions2.clone();
        }
        config.dirsearch_compat |= self.dirsearch_compat;
        config.ignore_wordlist_comments |= self.ignore_comments;
        if self.keep_unresolved {
            config.drop_unresolved_templates = false;
        }
        Ok(config)
    }
}

fn run(cli: &Cli) -> WlResult<()> {
    let config = cli.build_config()?;
    let mut input = WordlistInput::new(cli.keyword.as_str(), &cli.wordlist, &config)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_payloads(&mut input, &mut out, cli.json).map_err(RswordlistError::WriteError)
}

/// 输出全部载荷：逐行原样输出，或输出 JSON 摘要
fn write_payloads<W: Write>(
    input: &mut WordlistInput,
    out: &mut W,
    as_json: bool,
) -> io::Result<()> {
    if as_json {
        let payloads: Vec<String> = input
            .iter()
            .map(|v| String::from_utf8_lossy(v).into_owned())
            .collect();
        let summary = json!({
            "keyword": input.keyword(),
            "total": input.total(),
            "payloads": payloads,
        });
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
    } else {
        input.reset_position();
        while input.next() {
            if let Some(value) = input.value() {
                out.write_all(value)?;
                out.write_all(b"\n")?;
            }
            input.increment_position();
        }
    }
    out.flush()
}

fn main() -> ExitCode {
    Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("执行失败：{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample() -> WordlistInput {
        let reader = Cursor::new(b"admin\nlogin\nadmin\n".to_vec());
        WordlistInput::from_reader("FUZZ", reader, &WordlistConfig::default()).unwrap()
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_plain_payloads() {
        let mut input = sample();
        let mut out = Vec::new();
        write_payloads(&mut input, &mut out, false).unwrap();
        assert_eq!(out, b"admin\nlogin\n");
    }

    #[test]
    fn test_write_json_summary() {
        let mut input = sample();
        let mut out = Vec::new();
        write_payloads(&mut input, &mut out, true).unwrap();
        let summary: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(summary["keyword"], "FUZZ");
        assert_eq!(summary["total"], 2);
        assert_eq!(summary["payloads"][1], "login");
    }

    #[test]
    fn test_output_failure_is_write_error() {
        let mut input = sample();
        let err = write_payloads(&mut input, &mut BrokenPipe, false)
            .map_err(RswordlistError::WriteError)
            .unwrap_err();
        assert!(matches!(err, RswordlistError::WriteError(_)));
        assert!(err.to_string().starts_with("载荷输出失败"));
    }
}
