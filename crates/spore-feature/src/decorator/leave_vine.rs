use rand::Rng;
use spore_geom::{BlockPos, Direction};

use super::{DecoratorContext, TreeDecorator};
use crate::provider::BlockStateProvider;

// Blocks hung below the first one.
const HANG_LENGTH: u32 = 4;

/// Hangs columns off the sides of leaves.
#[derive(Debug)]
pub struct LeaveVineDecorator {
    probability: f32,
    block_provider: BlockStateProvider,
}

impl LeaveVineDecorator {
    pub fn new(probability: f32, block_provider: BlockStateProvider) -> Self {
        Self {
            probability,
            block_provider,
        }
    }

    fn hang(&self, ctx: &mut DecoratorContext<'_>, start: BlockPos) {
        let block = self.block_provider.get_state(ctx.random(), start);
        ctx.set_block(start, block);
        let mut pos = start.below();
        let mut left = HANG_LENGTH;
        while left > 0 && ctx.is_air(pos) {
            let block = self.block_provider.get_state(ctx.random(), pos);
            ctx.set_block(pos, block);
            pos = pos.below();
            left -= 1;
        }
    }
}

impl TreeDecorator for LeaveVineDecorator {
    fn place(&self, ctx: &mut DecoratorContext<'_>) {
        for &leaf in ctx.leaves() {
            for dir in [Direction::West, Direction::East, Direction::North, Direction::South] {
                if ctx.random().random::<f32>() < self.probability {
                    let side = leaf.relative(dir);
                    if ctx.is_air(side) {
                        self.hang(ctx, side);
                    }
                }
            }
        }
    }
}
