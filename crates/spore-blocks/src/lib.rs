//! Block types, block states, tags, and the block registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod types;

pub use registry::{BlockRegistry, BlockType, RegistryError};
pub use types::{Block, BlockId, BlockState};

/// Tag names the tree feature and its decorators query.
pub mod tags {
    pub const LEAVES: &str = "leaves";
    pub const REPLACEABLE_BY_TREES: &str = "replaceable_by_trees";
    pub const DIRT: &str = "dirt";
}

/// Template placeholder meaning "a log goes here".
pub const LOG_MARKER: &str = "red_wool";
pub const AIR: &str = "air";
pub const WATER: &str = "water";
