use std::path::PathBuf;

use clap::Parser;
use spore_blocks::{Block, BlockRegistry, RegistryError};
use thiserror::Error;

/// Place one configured tree into a flat demo world and report what changed.
#[derive(Parser, Debug)]
#[command(name = "spore", about = "Tag-driven tree placer")]
pub struct Args {
    /// Block registry (TOML)
    #[arg(long, default_value = "assets/blocks.toml")]
    pub blocks: PathBuf,

    /// Root directory of structure templates (`<ns>/<path>.toml`)
    #[arg(long, default_value = "assets/structures")]
    pub structures: PathBuf,

    /// Configured feature file
    #[arg(long, default_value = "assets/features/oak.toml")]
    pub feature: PathBuf,

    /// World seed for the placement random source
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Tree origin as `x,z` (placed on the surface) or `x,y,z`
    #[arg(long, default_value = "0,0")]
    pub origin: String,

    /// Ground layers bottom-up, e.g. `stone:60,dirt:3,grass_block:1`
    #[arg(long, default_value = "stone:60,dirt:3,grass_block:1")]
    pub ground: String,

    /// Lowest buildable y of the demo world
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub min_y: i32,

    /// Buildable height of the demo world
    #[arg(long, default_value_t = 256)]
    pub height: i32,

    /// Print every changed position, not only the per-block totals
    #[arg(long)]
    pub dump: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// `x,z` leaves y to the caller; `x,y,z` is taken as is.
pub fn parse_origin(s: &str) -> Result<(i32, Option<i32>, i32), String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("bad origin `{s}`: {e}"))?;
    match parts.as_slice() {
        [x, z] => Ok((*x, None, *z)),
        [x, y, z] => Ok((*x, Some(*y), *z)),
        _ => Err(format!("origin `{s}` must be `x,z` or `x,y,z`")),
    }
}

#[derive(Debug, Error)]
pub enum GroundError {
    #[error("bad ground layer `{0}`, expected `block:thickness`")]
    Syntax(String),
    #[error("ground layer: {0}")]
    Block(#[from] RegistryError),
}

/// Parses `name:thickness` pairs; states may carry properties, e.g. `oak_log[axis=x]:2`.
pub fn parse_ground(s: &str, reg: &BlockRegistry) -> Result<Vec<(Block, u32)>, GroundError> {
    let mut layers = Vec::new();
    for layer in s.split(',').map(str::trim).filter(|l| !l.is_empty()) {
        let (name, thickness) = layer
            .rsplit_once(':')
            .ok_or_else(|| GroundError::Syntax(layer.to_string()))?;
        let thickness: u32 = thickness
            .parse()
            .map_err(|_| GroundError::Syntax(layer.to_string()))?;
        let block = reg.parse_state(name)?;
        layers.push((block, thickness));
    }
    Ok(layers)
}
