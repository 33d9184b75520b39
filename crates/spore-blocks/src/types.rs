pub type BlockId = u16;
pub type BlockState = u16;

/// A block id plus its packed property state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Block {
    pub id: BlockId,
    pub state: BlockState,
}

impl Block {
    /// The registry always assigns id 0 to `air`.
    pub const AIR: Block = Block { id: 0, state: 0 };

    #[inline]
    pub const fn new(id: BlockId, state: BlockState) -> Self {
        Self { id, state }
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self.id == Self::AIR.id
    }
}
