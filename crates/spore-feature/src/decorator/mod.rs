//! Post-placement decorators that add blocks around a finished tree.

mod alter_ground;
mod attached_to_logs;
mod leave_vine;

use std::fmt;

use rand::RngCore;
use serde::Deserialize;
use spore_blocks::{Block, BlockRegistry};
use spore_geom::{BlockPos, Direction};
use spore_world::WorldGenLevel;

use crate::error::ConfigError;
use crate::provider::BlockStateProviderDef;

pub use alter_ground::AlterGroundDecorator;
pub use attached_to_logs::AttachedToLogsDecorator;
pub use leave_vine::LeaveVineDecorator;

/// A transformation run once per placed tree, in configuration order.
pub trait TreeDecorator: fmt::Debug + Send + Sync {
    fn place(&self, ctx: &mut DecoratorContext<'_>);
}

/// What a decorator sees: the placement snapshot and a sink into the world.
///
/// Position lists are sorted bottom-up and do not change while decorators run.
pub struct DecoratorContext<'a> {
    level: &'a mut dyn WorldGenLevel,
    random: &'a mut dyn RngCore,
    logs: &'a [BlockPos],
    leaves: &'a [BlockPos],
    roots: &'a [BlockPos],
}

impl<'a> DecoratorContext<'a> {
    pub fn new(
        level: &'a mut dyn WorldGenLevel,
        random: &'a mut dyn RngCore,
        logs: &'a [BlockPos],
        leaves: &'a [BlockPos],
        roots: &'a [BlockPos],
    ) -> Self {
        Self {
            level,
            random,
            logs,
            leaves,
            roots,
        }
    }

    pub fn logs(&self) -> &'a [BlockPos] {
        self.logs
    }

    pub fn leaves(&self) -> &'a [BlockPos] {
        self.leaves
    }

    pub fn roots(&self) -> &'a [BlockPos] {
        self.roots
    }

    pub fn random(&mut self) -> &mut dyn RngCore {
        &mut *self.random
    }

    pub fn level(&self) -> &dyn WorldGenLevel {
        &*self.level
    }

    pub fn is_air(&self, pos: BlockPos) -> bool {
        self.level.is_empty_block(pos)
    }

    pub fn set_block(&mut self, pos: BlockPos, block: Block) {
        self.level.set_block(pos, block);
    }
}

// [[decorators]]
// type = "attached_to_logs"
// probability = 0.1
// block_provider = { type = "simple_state_provider", state = "moss" }
// directions = ["north", "east"]
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeDecoratorDef {
    #[serde(alias = "minecraft:attached_to_logs")]
    AttachedToLogs {
        probability: f32,
        block_provider: BlockStateProviderDef,
        directions: Vec<String>,
    },
    #[serde(alias = "minecraft:leave_vine")]
    LeaveVine {
        probability: f32,
        block_provider: BlockStateProviderDef,
    },
    #[serde(alias = "minecraft:alter_ground")]
    AlterGround { provider: BlockStateProviderDef },
}

impl TreeDecoratorDef {
    pub fn compile(&self, reg: &BlockRegistry) -> Result<Box<dyn TreeDecorator>, ConfigError> {
        match self {
            Self::AttachedToLogs {
                probability,
                block_provider,
                directions,
            } => {
                let probability = check_probability(*probability)?;
                if directions.is_empty() {
                    return Err(ConfigError::Decorator(
                        "attached_to_logs needs at least one direction".into(),
                    ));
                }
                let directions = directions
                    .iter()
                    .map(|d| {
                        Direction::from_name(d)
                            .ok_or_else(|| ConfigError::Decorator(format!("unknown direction `{d}`")))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Box::new(AttachedToLogsDecorator::new(
                    probability,
                    block_provider.compile(reg)?,
                    directions,
                )))
            }
            Self::LeaveVine {
                probability,
                block_provider,
            } => Ok(Box::new(LeaveVineDecorator::new(
                check_probability(*probability)?,
                block_provider.compile(reg)?,
            ))),
            Self::AlterGround { provider } => {
                Ok(Box::new(AlterGroundDecorator::new(provider.compile(reg)?)))
            }
        }
    }
}

fn check_probability(p: f32) -> Result<f32, ConfigError> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(ConfigError::Decorator(format!(
            "probability {p} is outside [0, 1]"
        )))
    }
}
