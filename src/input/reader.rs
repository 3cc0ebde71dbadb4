//! 词表来源：文件路径或标准输入，按行扫描

use log::debug;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::{RswordlistError, WlResult};

/// 标准输入哨兵
pub const STDIN_SENTINEL: &str = "-";

/// 词表来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourcePath {
    Stdin,
    File(PathBuf),
}

impl SourcePath {
    pub fn parse(value: &str) -> Self {
        if value == STDIN_SENTINEL {
            SourcePath::Stdin
        } else {
            SourcePath::File(PathBuf::from(value))
        }
    }

    /// 校验文件存在且可打开；标准输入无需校验
    pub fn validate(&self) -> WlResult<()> {
        let SourcePath::File(path) = self else {
            return Ok(());
        };
        fs::metadata(path).map_err(|e| stat_error(path, e))?;
        File::open(path).map_err(|e| unreadable(path, e))?;
        Ok(())
    }

    /// 打开来源，返回带缓冲的读取器
    pub fn open(&self) -> WlResult<Box<dyn BufRead>> {
        match self {
            SourcePath::Stdin => {
                debug!("从标准输入读取词表");
                Ok(Box::new(BufReader::new(io::stdin())))
            }
            SourcePath::File(path) => {
                let file = File::open(path).map_err(|e| unreadable(path, e))?;
                debug!("从文件读取词表：{}", path.display());
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            SourcePath::Stdin => "<stdin>".to_string(),
            SourcePath::File(path) => path.display().to_string(),
        }
    }
}

fn stat_error(path: &Path, e: io::Error) -> RswordlistError {
    if e.kind() == io::ErrorKind::NotFound {
        RswordlistError::SourceNotFound(path.display().to_string())
    } else {
        unreadable(path, e)
    }
}

fn unreadable(path: &Path, e: io::Error) -> RswordlistError {
    RswordlistError::SourceUnreadable {
        path: path.display().to_string(),
        source: e,
    }
}

/// 行扫描器
/// - 按 \n 切分，去掉行尾一个 \r
/// - 末尾无换行的最后一行保留，结尾换行不产生空行
/// - 单行超过上限时报错并停止
pub struct LineScanner<R> {
    reader: R,
    limit: usize,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R, limit: usize) -> Self {
        Self {
            reader,
            limit,
            line_no: 0,
            done: false,
        }
    }

    /// 已读取的行数
    pub fn lines_read(&self) -> usize {
        self.line_no
    }

    fn read_line(&mut self) -> WlResult<Option<Vec<u8>>> {
        let mut buf = Vec::new();
        // 多读两个字节以容纳 \r\n
        let budget = self.limit as u64 + 2;
        let read = (&mut self.reader).take(budget).read_until(b'\n', &mut buf)?;
        if read == 0 {
            return Ok(None);
        }
        self.line_no += 1;

        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        if buf.len() > self.limit {
            return Err(RswordlistError::LineTooLong {
                line: self.line_no,
                limit: self.limit,
            });
        }
        Ok(Some(buf))
    }
}

impl<R: BufRead> Iterator for LineScanner<R> {
    type Item = WlResult<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scan(input: &[u8], limit: usize) -> Vec<WlResult<Vec<u8>>> {
        LineScanner::new(Cursor::new(input.to_vec()), limit).collect()
    }

    fn lines(input: &[u8]) -> Vec<Vec<u8>> {
        scan(input, 64)
            .into_iter()
            .map(|line| line.unwrap())
            .collect()
    }

    #[test]
    fn test_line_endings() {
        assert_eq!(lines(b"a\nb\r\nc"), vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
        assert_eq!(lines(b"a\n"), vec![b"a".to_vec()]);
        assert_eq!(lines(b"a\n\nb\n"), vec![b"a".to_vec(), Vec::new(), b"b".to_vec()]);
        assert!(lines(b"").is_empty());
    }

    #[test]
    fn test_binary_bytes_pass_through() {
        assert_eq!(lines(&[0xff, b'\n', 0x00, 0x01]), vec![vec![0xff], vec![0x00, 0x01]]);
    }

    #[test]
    fn test_line_at_limit() {
        let results = scan(b"abcd\r\nef", 4);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap(), b"abcd");
    }

    #[test]
    fn test_line_too_long_stops_scan() {
        let results = scan(b"ok\nabcdefgh\nnever", 4);
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(RswordlistError::LineTooLong { line: 2, limit: 4 })
        ));
    }

    #[test]
    fn test_missing_file() {
        let source = SourcePath::parse("/definitely/not/here/wordlist.txt");
        assert!(matches!(source.validate(), Err(RswordlistError::SourceNotFound(_))));
    }

    #[test]
    fn test_stdin_sentinel() {
        assert_eq!(SourcePath::parse("-"), SourcePath::Stdin);
        assert!(SourcePath::Stdin.validate().is_ok());
        assert_eq!(SourcePath::Stdin.describe(), "<stdin>");
    }
}
