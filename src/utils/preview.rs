use std::fmt::{self, Write};

// ======================== 日志预览 ========================
/// 字节行的日志预览：非 UTF-8 字节按替换字符显示，空白折叠，超长截断
/// 仅在 Display 时计算，不记录日志时无开销
#[inline(always)]
pub fn preview_compact(source: &[u8], max_len: usize) -> impl fmt::Display + '_ {
    struct CompactView<'a> {
        source: &'a [u8],
        max_length: usize,
    }

    impl fmt::Display for CompactView<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let text = String::from_utf8_lossy(self.source);
            let mut char_count = 0;
            let mut last_was_whitespace = false;

            for ch in text.chars() {
                if char_count >= self.max_length {
                    f.write_str("…")?;
                    break;
                }

                if ch.is_whitespace() {
                    if !last_was_whitespace {
                        f.write_str(" ")?;
                        char_count += 1;
                        last_was_whitespace = true;
                    }
                } else {
                    f.write_char(ch)?;
                    char_count += 1;
                    last_was_whitespace = false;
                }
            }
            Ok(())
        }
    }

    CompactView {
        source,
        max_length: max_len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_compacts_whitespace() {
        assert_eq!(preview_compact(b"a  \t b", 10).to_string(), "a b");
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview_compact(b"abcdef", 3).to_string(), "abc…");
        assert_eq!(preview_compact(b"abc", 3).to_string(), "abc");
    }

    #[test]
    fn test_preview_lossy() {
        assert_eq!(preview_compact(&[b'a', 0xff], 10).to_string(), "a\u{fffd}");
    }
}
