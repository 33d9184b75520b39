#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use spore_blocks::{Block, BlockRegistry};
use spore_feature::{
    BlockStateProvider, DecoratorContext, TagTreeConfiguration, TreeDecorator, WeightedEntry,
    WeightedList,
};
use spore_geom::{BlockPos, Vec3i};
use spore_structures::{ResourceLocation, StructureBlockInfo, StructureTemplate, TemplateStore};
use spore_world::VoxelWorld;

pub const BLOCKS: &str = r#"
    [[blocks]]
    name = "stone"

    [[blocks]]
    name = "dirt"
    tags = ["dirt"]

    [[blocks]]
    name = "water"
    solid = false

    [[blocks]]
    name = "red_wool"

    [[blocks]]
    name = "oak_log"
    tags = ["logs"]
    state_schema = { axis = ["y", "x", "z"] }

    [[blocks]]
    name = "oak_leaves"
    solid = false
    tags = ["leaves"]

    [[blocks]]
    name = "short_grass"
    solid = false
    tags = ["replaceable_by_trees"]

    [[blocks]]
    name = "moss"

    [[blocks]]
    name = "vine"
    solid = false

    [[blocks]]
    name = "podzol"
    tags = ["dirt"]
"#;

pub fn registry() -> Arc<BlockRegistry> {
    Arc::new(BlockRegistry::from_toml_str(BLOCKS).expect("test registry"))
}

pub fn block(reg: &BlockRegistry, name: &str) -> Block {
    reg.parse_state(name).expect("known block")
}

pub fn loc(s: &str) -> ResourceLocation {
    ResourceLocation::parse(s).expect("valid location")
}

/// Stone from y=0 up to and including `ground_y`, air above.
pub fn stone_world(reg: &Arc<BlockRegistry>, ground_y: i32) -> VoxelWorld {
    let stone = block(reg, "stone");
    VoxelWorld::flat(reg.clone(), 0, 256, &[(stone, (ground_y + 1) as u32)])
}

pub fn marker(reg: &BlockRegistry, x: i32, y: i32, z: i32) -> StructureBlockInfo {
    StructureBlockInfo {
        pos: Vec3i::new(x, y, z),
        block: block(reg, "red_wool"),
    }
}

pub fn leaf(reg: &BlockRegistry, x: i32, y: i32, z: i32) -> StructureBlockInfo {
    StructureBlockInfo {
        pos: Vec3i::new(x, y, z),
        block: block(reg, "oak_leaves"),
    }
}

pub fn template(size: [i32; 3], blocks: Vec<StructureBlockInfo>) -> StructureTemplate {
    StructureTemplate::from_blocks(Vec3i::from(size), blocks)
}

pub fn list(entries: &[(&str, u32)]) -> WeightedList {
    WeightedList::new(
        entries
            .iter()
            .map(|(id, w)| WeightedEntry::new(loc(id), *w))
            .collect(),
    )
}

pub fn config(
    reg: &BlockRegistry,
    bodies: WeightedList,
    canopies: WeightedList,
    decorators: Vec<Box<dyn TreeDecorator>>,
) -> TagTreeConfiguration {
    let lists = BTreeMap::from([
        ("bodies".to_string(), bodies),
        ("canopies".to_string(), canopies),
    ]);
    TagTreeConfiguration::new(
        lists,
        BlockStateProvider::Simple(block(reg, "oak_log")),
        BlockStateProvider::Simple(block(reg, "oak_leaves")),
        decorators,
    )
}

pub fn store(entries: Vec<(&str, StructureTemplate)>) -> TemplateStore {
    let mut store = TemplateStore::new();
    for (id, t) in entries {
        store.insert(loc(id), t);
    }
    store
}

/// Snapshot of what one decorator run was handed.
#[derive(Clone, Debug, Default)]
pub struct Seen {
    pub logs: Vec<BlockPos>,
    pub leaves: Vec<BlockPos>,
    pub roots: Vec<BlockPos>,
}

/// Records its inputs and optionally writes one block, so ordering can be observed.
#[derive(Debug)]
pub struct RecordingDecorator {
    pub seen: Arc<Mutex<Vec<Seen>>>,
    pub write: Option<(BlockPos, Block)>,
}

impl RecordingDecorator {
    pub fn new(seen: Arc<Mutex<Vec<Seen>>>) -> Self {
        Self { seen, write: None }
    }
}

impl TreeDecorator for RecordingDecorator {
    fn place(&self, ctx: &mut DecoratorContext<'_>) {
        self.seen.lock().unwrap().push(Seen {
            logs: ctx.logs().to_vec(),
            leaves: ctx.leaves().to_vec(),
            roots: ctx.roots().to_vec(),
        });
        if let Some((pos, block)) = self.write {
            ctx.set_block(pos, block);
        }
    }
}
