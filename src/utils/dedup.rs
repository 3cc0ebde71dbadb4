use rustc_hash::FxHashSet;

/// 载荷去重器：已见集合 + 仅追加序列，输出保持首次出现顺序
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: FxHashSet<Box<[u8]>>,
    values: Vec<Box<[u8]>>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 首次出现返回 true
    pub fn push(&mut self, line: Vec<u8>) -> bool {
        if self.seen.contains(line.as_slice()) {
            return false;
        }
        let value = line.into_boxed_slice();
        self.seen.insert(value.clone());
        self.values.push(value);
        true
    }

    pub fn into_values(self) -> Vec<Box<[u8]>> {
        self.values
    }
}
