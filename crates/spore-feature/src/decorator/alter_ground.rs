use rand::Rng;
use spore_blocks::tags;
use spore_geom::BlockPos;

use super::{DecoratorContext, TreeDecorator};
use crate::provider::BlockStateProvider;

/// Repaints the dirt around the base of the trunk (podzol under spruces and the like).
#[derive(Debug)]
pub struct AlterGroundDecorator {
    provider: BlockStateProvider,
}

impl AlterGroundDecorator {
    pub fn new(provider: BlockStateProvider) -> Self {
        Self { provider }
    }

    fn place_circle(&self, ctx: &mut DecoratorContext<'_>, center: BlockPos) {
        for dx in -2..=2i32 {
            for dz in -2..=2i32 {
                if dx.abs() != 2 || dz.abs() != 2 {
                    self.place_block_at(ctx, center.offset(dx, 0, dz));
                }
            }
        }
    }

    // Scan from two above to three below, stopping at the first dirt or at solid ground.
    fn place_block_at(&self, ctx: &mut DecoratorContext<'_>, pos: BlockPos) {
        for dy in (-3..=2i32).rev() {
            let p = pos.offset(0, dy, 0);
            if ctx.level().is_tagged(p, tags::DIRT) {
                let block = self.provider.get_state(ctx.random(), pos);
                ctx.set_block(p, block);
                break;
            }
            if !ctx.is_air(p) && dy < 0 {
                break;
            }
        }
    }
}

impl TreeDecorator for AlterGroundDecorator {
    fn place(&self, ctx: &mut DecoratorContext<'_>) {
        let base = if ctx.roots().is_empty() {
            ctx.logs()
        } else {
            ctx.roots()
        };
        let Some(first) = base.first() else {
            return;
        };
        let lowest = first.y;
        for &p in base.iter().filter(|p| p.y == lowest) {
            self.place_circle(ctx, p.offset(-1, 0, -1));
            self.place_circle(ctx, p.offset(2, 0, -1));
            self.place_circle(ctx, p.offset(-1, 0, 2));
            self.place_circle(ctx, p.offset(2, 0, 2));
            for _ in 0..5 {
                let k = ctx.random().random_range(0..64i32);
                let (l, m) = (k % 8, k / 8);
                if l == 0 || l == 7 || m == 0 || m == 7 {
                    self.place_circle(ctx, p.offset(-3 + l, 0, -3 + m));
                }
            }
        }
    }
}
