/// 词表注释剥离
/// 规则：
/// 1. 去掉左侧空格后以 # 开头：整行丢弃
/// 2. 否则出现 " #" 时从该位置截断
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentStripper {
    enabled: bool,
}

impl CommentStripper {
    const INLINE_MARKER: &'static [u8] = b" #";

    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// 返回 None 表示整行为注释
    #[inline]
    pub fn strip<'a>(&self, line: &'a [u8]) -> Option<&'a [u8]> {
        if !self.enabled {
            return Some(line);
        }

        let first = line.iter().position(|b| *b != b' ');
        if first.map(|idx| line[idx]) == Some(b'#') {
            return None;
        }

        let cut = line
            .windows(Self::INLINE_MARKER.len())
            .position(|window| window == Self::INLINE_MARKER);
        match cut {
            Some(idx) => Some(&line[..idx]),
            None => Some(line),
        }
    }
}
