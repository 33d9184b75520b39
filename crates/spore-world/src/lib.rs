//! World access for feature placement and an in-memory voxel world.
#![forbid(unsafe_code)]

pub mod level;
pub mod voxel;

pub use level::WorldGenLevel;
pub use voxel::{VoxelWorld, VoxelWorldStats};
