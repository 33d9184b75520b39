use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use spore_blocks::{Block, BlockId};
use spore_geom::{BlockPos, Rotation, Vec3i};

/// One block of a template, in template-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StructureBlockInfo {
    pub pos: BlockPos,
    pub block: Block,
}

/// One layout variant of a template.
#[derive(Clone, Debug, Default)]
pub struct Palette {
    blocks: Vec<StructureBlockInfo>,
}

impl Palette {
    pub fn new(blocks: Vec<StructureBlockInfo>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[StructureBlockInfo] {
        &self.blocks
    }

    /// Blocks of the given type, in palette order.
    pub fn blocks_of(&self, id: BlockId) -> impl Iterator<Item = &StructureBlockInfo> + '_ {
        self.blocks.iter().filter(move |b| b.block.id == id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Immutable block layout with one or more palettes.
#[derive(Clone, Debug)]
pub struct StructureTemplate {
    size: Vec3i,
    palettes: Vec<Palette>,
}

impl StructureTemplate {
    pub fn new(size: Vec3i, palettes: Vec<Palette>) -> Self {
        Self { size, palettes }
    }

    /// Single-palette convenience constructor.
    pub fn from_blocks(size: Vec3i, blocks: Vec<StructureBlockInfo>) -> Self {
        Self::new(size, vec![Palette::new(blocks)])
    }

    pub fn size(&self) -> Vec3i {
        self.size
    }

    pub fn size_rotated(&self, rotation: Rotation) -> Vec3i {
        rotation.rotate_size(self.size)
    }

    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    /// Palette used for a placement at `origin`. With several palettes the choice is
    /// seeded from the position alone, so the same spot always gets the same variant.
    pub fn palette_for(&self, origin: BlockPos) -> Option<&Palette> {
        match self.palettes.len() {
            0 => None,
            1 => self.palettes.first(),
            n => {
                let mut rng = ChaCha8Rng::seed_from_u64(position_seed(origin) as u64);
                self.palettes.get(rng.random_range(0..n))
            }
        }
    }
}

/// Positional hash matching the host engine's per-block seed.
pub fn position_seed(pos: BlockPos) -> i64 {
    let mut l = (pos.x.wrapping_mul(3_129_871) as i64)
        ^ (pos.z as i64).wrapping_mul(116_129_781)
        ^ pos.y as i64;
    l = l
        .wrapping_mul(l)
        .wrapping_mul(42_317_861)
        .wrapping_add(l.wrapping_mul(11));
    l >> 16
}
