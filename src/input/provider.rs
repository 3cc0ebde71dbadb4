/// 载荷输入源的游标约定
///
/// 状态机：就绪（position = 0）→ 逐个读取/前进 → 耗尽（position == total），
/// `reset_position` 回到就绪状态而不重新读取来源。
/// 游标本身不做同步，多消费者需要在外层自行协调。
pub trait InputProvider {
    /// 请求模板中绑定的替换关键字
    fn keyword(&self) -> &str;

    /// 当前位置，始终满足 0 <= position <= total
    fn position(&self) -> usize;

    /// 回到起点，幂等
    fn reset_position(&mut self);

    /// 是否仍有载荷可读；不改变状态
    fn next(&self) -> bool {
        self.position() < self.total()
    }

    /// 前进一位；已耗尽时保持 position == total
    fn increment_position(&mut self);

    /// 当前位置的载荷；耗尽时返回 None
    fn value(&self) -> Option<&[u8]>;

    /// 构造完成后固定的载荷总数
    fn total(&self) -> usize;
}
