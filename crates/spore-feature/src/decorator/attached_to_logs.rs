use rand::Rng;
use rand::seq::SliceRandom;
use spore_geom::Direction;

use super::{DecoratorContext, TreeDecorator};
use crate::provider::BlockStateProvider;

/// Sticks blocks onto the sides of logs, e.g. moss or mushrooms.
#[derive(Debug)]
pub struct AttachedToLogsDecorator {
    probability: f32,
    block_provider: BlockStateProvider,
    directions: Vec<Direction>,
}

impl AttachedToLogsDecorator {
    pub fn new(probability: f32, block_provider: BlockStateProvider, directions: Vec<Direction>) -> Self {
        Self {
            probability,
            block_provider,
            directions,
        }
    }
}

impl TreeDecorator for AttachedToLogsDecorator {
    fn place(&self, ctx: &mut DecoratorContext<'_>) {
        if self.directions.is_empty() {
            return;
        }
        let mut logs = ctx.logs().to_vec();
        logs.shuffle(ctx.random());
        for pos in logs {
            let dir = self.directions[ctx.random().random_range(0..self.directions.len())];
            let target = pos.relative(dir);
            if ctx.random().random::<f32>() <= self.probability && ctx.is_air(target) {
                let block = self.block_provider.get_state(ctx.random(), target);
                ctx.set_block(target, block);
            }
        }
    }
}
