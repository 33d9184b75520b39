use std::sync::Arc;

use hashbrown::HashMap;
use spore_blocks::{Block, BlockRegistry};
use spore_geom::BlockPos;

use crate::level::WorldGenLevel;

pub const CHUNK_SIZE: i32 = 16;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoxelWorldStats {
    pub chunk_entries: usize,
    pub block_edits: usize,
    pub writes: u64,
}

/// Sparse world: a layered base terrain plus per-chunk block overrides.
pub struct VoxelWorld {
    registry: Arc<BlockRegistry>,
    min_y: i32,
    height: i32,
    // Base column, bottom-up, starting at min_y. Anything above the layers is air.
    layers: Vec<Block>,
    // key=(cx,cy,cz) -> world coords -> Block
    chunks: HashMap<(i32, i32, i32), HashMap<BlockPos, Block>>,
    writes: u64,
}

impl VoxelWorld {
    pub fn new(registry: Arc<BlockRegistry>, min_y: i32, height: i32) -> Self {
        Self {
            registry,
            min_y,
            height: height.max(0),
            layers: Vec::new(),
            chunks: HashMap::new(),
            writes: 0,
        }
    }

    /// A flat world whose columns are `layers` stacked bottom-up from `min_y`,
    /// each `(block, thickness)`.
    pub fn flat(
        registry: Arc<BlockRegistry>,
        min_y: i32,
        height: i32,
        layers: &[(Block, u32)],
    ) -> Self {
        let mut world = Self::new(registry, min_y, height);
        for &(block, thickness) in layers {
            world
                .layers
                .extend(std::iter::repeat_n(block, thickness as usize));
        }
        world
    }

    /// One past the highest buildable y.
    pub fn max_y(&self) -> i32 {
        self.min_y.saturating_add(self.height)
    }

    /// First y above the base layers.
    pub fn surface_y(&self) -> i32 {
        self.min_y.saturating_add(self.layers.len() as i32)
    }

    #[inline]
    pub fn in_bounds(&self, pos: BlockPos) -> bool {
        pos.y >= self.min_y && pos.y < self.max_y()
    }

    #[inline]
    fn chunk_key(pos: BlockPos) -> (i32, i32, i32) {
        (
            pos.x.div_euclid(CHUNK_SIZE),
            pos.y.div_euclid(CHUNK_SIZE),
            pos.z.div_euclid(CHUNK_SIZE),
        )
    }

    fn base_block(&self, pos: BlockPos) -> Block {
        let i = pos.y - self.min_y;
        if i < 0 {
            return Block::AIR;
        }
        self.layers.get(i as usize).copied().unwrap_or(Block::AIR)
    }

    /// Every overridden position, bottom-up.
    pub fn edits(&self) -> Vec<(BlockPos, Block)> {
        let mut out: Vec<(BlockPos, Block)> = self
            .chunks
            .values()
            .flat_map(|m| m.iter().map(|(k, v)| (*k, *v)))
            .collect();
        out.sort_by_key(|(p, _)| p.y_major());
        out
    }

    pub fn stats(&self) -> VoxelWorldStats {
        VoxelWorldStats {
            chunk_entries: self.chunks.len(),
            block_edits: self.chunks.values().map(|m| m.len()).sum(),
            writes: self.writes,
        }
    }
}

impl WorldGenLevel for VoxelWorld {
    fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    fn block(&self, pos: BlockPos) -> Block {
        if !self.in_bounds(pos) {
            return Block::AIR;
        }
        self.chunks
            .get(&Self::chunk_key(pos))
            .and_then(|m| m.get(&pos).copied())
            .unwrap_or_else(|| self.base_block(pos))
    }

    fn set_block(&mut self, pos: BlockPos, block: Block) {
        // Writes outside the buildable range are dropped.
        if !self.in_bounds(pos) {
            return;
        }
        self.writes += 1;
        self.chunks
            .entry(Self::chunk_key(pos))
            .or_default()
            .insert(pos, block);
    }

    fn min_y(&self) -> i32 {
        self.min_y
    }
}
