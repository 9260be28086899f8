/// In-game fault register.
///
/// The simulation never fails an update. An internal inconsistency is
/// recorded here and logged, and play continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCode {
    #[default]
    None,
    /// A single lock cleared a number of rows outside 1..=4.
    Assert,
}

impl ErrorCode {
    pub fn is_none(self) -> bool {
        self == ErrorCode::None
    }
}
