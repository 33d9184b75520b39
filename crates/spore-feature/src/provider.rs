use rand::{Rng, RngCore};
use serde::Deserialize;
use spore_blocks::{Block, BlockRegistry};
use spore_geom::BlockPos;

use crate::error::ConfigError;

const AXES: [&str; 3] = ["x", "y", "z"];

// type = "simple_state_provider"
// state = "oak_log[axis=y]"
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockStateProviderDef {
    #[serde(alias = "minecraft:simple_state_provider")]
    SimpleStateProvider { state: String },
    #[serde(alias = "minecraft:weighted_state_provider")]
    WeightedStateProvider { entries: Vec<WeightedStateDef> },
    #[serde(alias = "minecraft:rotated_block_provider")]
    RotatedBlockProvider { state: String },
}

#[derive(Clone, Debug, Deserialize)]
pub struct WeightedStateDef {
    pub data: String,
    pub weight: u32,
}

impl BlockStateProviderDef {
    pub fn simple(state: impl Into<String>) -> Self {
        Self::SimpleStateProvider {
            state: state.into(),
        }
    }

    pub fn compile(&self, reg: &BlockRegistry) -> Result<BlockStateProvider, ConfigError> {
        match self {
            Self::SimpleStateProvider { state } => {
                Ok(BlockStateProvider::Simple(reg.parse_state(state)?))
            }
            Self::WeightedStateProvider { entries } => {
                let mut out = Vec::with_capacity(entries.len());
                for e in entries {
                    out.push((reg.parse_state(&e.data)?, e.weight));
                }
                BlockStateProvider::weighted(out)
            }
            Self::RotatedBlockProvider { state } => {
                let base = reg.parse_state(state)?;
                let Some(ty) = reg.get(base.id) else {
                    return Err(ConfigError::Provider(format!("unknown block `{state}`")));
                };
                if !ty.has_prop("axis") {
                    return Err(ConfigError::Provider(format!(
                        "`{}` has no axis property to rotate",
                        ty.name
                    )));
                }
                let mut variants = [base; 3];
                for (slot, axis) in variants.iter_mut().zip(AXES) {
                    slot.state = ty.with_prop(base.state, "axis", axis)?;
                }
                Ok(BlockStateProvider::Rotated(variants))
            }
        }
    }
}

/// Resolved provider: yields a block for each placed position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockStateProvider {
    Simple(Block),
    Weighted { entries: Vec<(Block, u32)>, total: u64 },
    /// One state per axis, in x, y, z order.
    Rotated([Block; 3]),
}

impl BlockStateProvider {
    pub fn weighted(entries: Vec<(Block, u32)>) -> Result<Self, ConfigError> {
        let total: u64 = entries.iter().map(|(_, w)| *w as u64).sum();
        if total == 0 {
            return Err(ConfigError::Provider(
                "weighted_state_provider needs a positive total weight".into(),
            ));
        }
        Ok(Self::Weighted { entries, total })
    }

    /// `pos` is where the state will land; the built-in providers only vary by `random`.
    pub fn get_state(&self, random: &mut dyn RngCore, _pos: BlockPos) -> Block {
        match self {
            Self::Simple(block) => *block,
            Self::Weighted { entries, total } => {
                let mut r = random.random_range(0..*total);
                for (block, weight) in entries {
                    let w = *weight as u64;
                    if r < w {
                        return *block;
                    }
                    r -= w;
                }
                // Unreachable with a positive total; keep the first entry.
                entries.first().map(|(b, _)| *b).unwrap_or(Block::AIR)
            }
            Self::Rotated(variants) => variants[random.random_range(0..variants.len())],
        }
    }
}
