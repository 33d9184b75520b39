use spore_blocks::{Block, BlockRegistry};
use spore_geom::BlockPos;

/// What a feature may read from and write to while generating.
///
/// `set_block` is the mutation sink: fire-and-forget, callers never inspect a result.
pub trait WorldGenLevel {
    fn registry(&self) -> &BlockRegistry;

    fn block(&self, pos: BlockPos) -> Block;

    fn set_block(&mut self, pos: BlockPos, block: Block);

    /// Lowest buildable y; everything below reads as air.
    fn min_y(&self) -> i32;

    #[inline]
    fn is_empty_block(&self, pos: BlockPos) -> bool {
        self.block(pos).is_air()
    }

    /// Whether the block at `pos` can hold something standing on it.
    #[inline]
    fn is_face_sturdy_up(&self, pos: BlockPos) -> bool {
        self.registry().is_solid(self.block(pos))
    }

    #[inline]
    fn is_tagged(&self, pos: BlockPos, tag: &str) -> bool {
        self.registry().has_tag(self.block(pos), tag)
    }

    #[inline]
    fn is_water(&self, pos: BlockPos) -> bool {
        self.registry().is_water(self.block(pos))
    }
}
