#![forbid(unsafe_code)]

mod cli;

use std::collections::BTreeMap;
use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use spore_blocks::BlockRegistry;
use spore_feature::{FeaturePlaceContext, FeatureRegistry, LogDiagnostics};
use spore_geom::BlockPos;
use spore_structures::TemplateStore;
use spore_world::VoxelWorld;

fn main() -> Result<(), Box<dyn Error>> {
    let args = cli::Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    let blocks = Arc::new(BlockRegistry::load_from_path(&args.blocks)?);
    log::info!("{} block types from {}", blocks.blocks.len(), args.blocks.display());
    let templates = TemplateStore::load_dir(&args.structures, &blocks)?;
    let configured = FeatureRegistry::with_builtin()?.load_configured_path(&args.feature, &blocks)?;
    log::info!(
        "loaded {} feature from {}",
        configured.feature_type,
        args.feature.display()
    );

    let layers = cli::parse_ground(&args.ground, &blocks)?;
    let mut world = VoxelWorld::flat(blocks.clone(), args.min_y, args.height, &layers);
    let (x, y, z) = cli::parse_origin(&args.origin)?;
    let origin = BlockPos::new(x, y.unwrap_or_else(|| world.surface_y()), z);

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let placed = {
        let mut ctx = FeaturePlaceContext {
            level: &mut world,
            templates: &templates,
            random: &mut rng,
            origin,
            diagnostics: &LogDiagnostics,
        };
        configured.feature.place(&mut ctx)?
    };
    if !placed {
        log::warn!("nothing placed at {origin:?}: the block below cannot hold a tree");
        return Ok(());
    }

    let edits = world.edits();
    let mut totals: BTreeMap<String, usize> = BTreeMap::new();
    for (pos, block) in &edits {
        let name = blocks.describe(*block);
        if args.dump {
            println!("{:>6} {:>4} {:>6}  {name}", pos.x, pos.y, pos.z);
        }
        *totals.entry(name).or_default() += 1;
    }
    println!("placed at {},{},{} (seed {})", origin.x, origin.y, origin.z, args.seed);
    for (name, n) in &totals {
        println!("{n:>6}  {name}");
    }
    let stats = world.stats();
    log::debug!(
        "{} edits across {} chunks, {} writes",
        stats.block_edits,
        stats.chunk_entries,
        stats.writes
    );
    Ok(())
}
