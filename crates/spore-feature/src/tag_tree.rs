use hashbrown::HashSet;
use rand::RngCore;
use spore_blocks::{BlockId, LOG_MARKER, tags};
use spore_geom::{BlockPos, Rotation, Vec3i};
use spore_structures::{Palette, ResourceLocation, StructureTemplate, TemplateSource};
use spore_world::WorldGenLevel;

use crate::config::{CANOPIES, TagTreeConfiguration};
use crate::decorator::DecoratorContext;
use crate::diagnostics::Diagnostics;
use crate::error::FeatureError;
use crate::transform::{odd_footprint, random_rotation, to_world_position};

/// Everything one placement needs from its host. Lives for a single call.
pub struct FeaturePlaceContext<'a> {
    pub level: &'a mut dyn WorldGenLevel,
    pub templates: &'a dyn TemplateSource,
    pub random: &'a mut dyn RngCore,
    pub origin: BlockPos,
    pub diagnostics: &'a dyn Diagnostics,
}

/// Result of a successful placement. Positions are sorted bottom-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedTree {
    pub body: ResourceLocation,
    pub canopy: Option<ResourceLocation>,
    pub logs: Vec<BlockPos>,
    pub leaves: Vec<BlockPos>,
}

#[derive(Default)]
struct TreeBlocks {
    logs: HashSet<BlockPos>,
    leaves: HashSet<BlockPos>,
}

impl TreeBlocks {
    fn freeze(self, body: ResourceLocation, canopy: Option<ResourceLocation>) -> PlacedTree {
        PlacedTree {
            body,
            canopy,
            logs: sorted(self.logs),
            leaves: sorted(self.leaves),
        }
    }
}

fn sorted(set: HashSet<BlockPos>) -> Vec<BlockPos> {
    let mut v: Vec<BlockPos> = set.into_iter().collect();
    v.sort_by_key(|p| p.y_major());
    v
}

/// A template palette pinned to a rotation, footprint and world anchor.
struct Stamp<'t> {
    palette: &'t Palette,
    size: Vec3i,
    rotation: Rotation,
    anchor: BlockPos,
}

impl Stamp<'_> {
    #[inline]
    fn world_pos(&self, relative: BlockPos) -> BlockPos {
        to_world_position(self.size, self.rotation, relative, self.anchor)
    }
}

/// Places a tree assembled from a weighted body template and an optional canopy template.
#[derive(Debug)]
pub struct TagTreeFeature {
    config: TagTreeConfiguration,
}

impl TagTreeFeature {
    pub fn new(config: TagTreeConfiguration) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TagTreeConfiguration {
        &self.config
    }

    /// `Ok(false)` when the ground under `origin` cannot hold a tree; nothing is written then.
    pub fn place(&self, ctx: &mut FeaturePlaceContext<'_>) -> Result<bool, FeatureError> {
        Ok(self.place_tree(ctx)?.is_some())
    }

    /// Like [`place`](Self::place), but hands back what was placed.
    ///
    /// A missing template aborts with an error; blocks already written stay written.
    pub fn place_tree(
        &self,
        ctx: &mut FeaturePlaceContext<'_>,
    ) -> Result<Option<PlacedTree>, FeatureError> {
        if !can_support_tree(&*ctx.level, ctx.origin) {
            log::trace!("tag tree at {:?} rejected: no sturdy ground", ctx.origin);
            return Ok(None);
        }
        let bodies = match self.config.bodies() {
            Some(list) if !list.is_empty() => list,
            _ => {
                return Err(FeatureError::InvalidConfiguration(
                    "At least one tree body is required.".into(),
                ));
            }
        };
        let canopies = self.config.canopies().ok_or_else(|| {
            FeatureError::InvalidConfiguration(format!("weighted list `{CANOPIES}` is required"))
        })?;
        let marker = ctx.level.registry().id_by_name(LOG_MARKER);
        let origin = ctx.origin;
        let mut blocks = TreeBlocks::default();

        let (body_id, body) = bodies.resolve(ctx.templates, ctx.random, ctx.diagnostics)?;
        let rotation = random_rotation(ctx.random);
        let stamp = Stamp {
            palette: palette_of(&body, &body_id, origin)?,
            size: body.size_rotated(rotation),
            rotation,
            anchor: origin,
        };
        self.place_logs(ctx, &stamp, marker, true, &mut blocks);
        self.place_leaves(ctx, &stamp, &mut blocks);
        let canopy_anchor = stamp
            .world_pos(highest_log_marker(stamp.palette, marker))
            .above();

        let canopy_id = if canopies.is_empty() {
            None
        } else {
            let (id, canopy) = canopies.resolve(ctx.templates, ctx.random, ctx.diagnostics)?;
            let rotation = random_rotation(ctx.random);
            let stamp = Stamp {
                palette: palette_of(&canopy, &id, origin)?,
                size: odd_footprint(canopy.size_rotated(rotation)),
                rotation,
                anchor: canopy_anchor,
            };
            self.place_logs(ctx, &stamp, marker, false, &mut blocks);
            self.place_leaves(ctx, &stamp, &mut blocks);
            Some(id)
        };

        let tree = blocks.freeze(body_id, canopy_id);
        self.apply_decorators(ctx, &tree);
        log::debug!(
            "placed tag tree {} at {:?}: {} logs, {} leaves",
            tree.body,
            origin,
            tree.logs.len(),
            tree.leaves.len()
        );
        Ok(Some(tree))
    }

    fn place_logs(
        &self,
        ctx: &mut FeaturePlaceContext<'_>,
        stamp: &Stamp<'_>,
        marker: Option<BlockId>,
        extend_trunk: bool,
        blocks: &mut TreeBlocks,
    ) {
        let Some(marker) = marker else {
            return;
        };
        let provider = self.config.log();
        for info in stamp.palette.blocks_of(marker) {
            let pos = stamp.world_pos(info.pos);
            let state = provider.get_state(ctx.random, pos);
            ctx.level.set_block(pos, state);
            blocks.logs.insert(pos);

            if extend_trunk && info.pos.y < 1 {
                let min_y = ctx.level.min_y();
                let mut below = pos.below();
                while below.y >= min_y && can_log_replace(&*ctx.level, below) {
                    let state = provider.get_state(ctx.random, below);
                    ctx.level.set_block(below, state);
                    blocks.logs.insert(below);
                    below = below.below();
                }
            }
        }
    }

    fn place_leaves(
        &self,
        ctx: &mut FeaturePlaceContext<'_>,
        stamp: &Stamp<'_>,
        blocks: &mut TreeBlocks,
    ) {
        let provider = self.config.leaves();
        for info in stamp.palette.blocks() {
            if !ctx.level.registry().has_tag(info.block, tags::LEAVES) {
                continue;
            }
            let pos = stamp.world_pos(info.pos);
            if can_replace(&*ctx.level, pos) {
                let state = provider.get_state(ctx.random, pos);
                ctx.level.set_block(pos, state);
                blocks.leaves.insert(pos);
            }
        }
    }

    fn apply_decorators(&self, ctx: &mut FeaturePlaceContext<'_>, tree: &PlacedTree) {
        let decorators = self.config.decorators();
        if decorators.is_empty() {
            return;
        }
        let roots: [BlockPos; 0] = [];
        let mut dctx = DecoratorContext::new(
            &mut *ctx.level,
            &mut *ctx.random,
            &tree.logs,
            &tree.leaves,
            &roots,
        );
        for decorator in decorators {
            decorator.place(&mut dctx);
        }
    }
}

fn palette_of<'t>(
    template: &'t StructureTemplate,
    id: &ResourceLocation,
    origin: BlockPos,
) -> Result<&'t Palette, FeatureError> {
    template
        .palette_for(origin)
        .ok_or_else(|| FeatureError::NoPalettes(id.clone()))
}

/// Highest log marker by local y. Only strictly higher markers replace the local origin.
fn highest_log_marker(palette: &Palette, marker: Option<BlockId>) -> BlockPos {
    let mut best = BlockPos::ZERO;
    if let Some(marker) = marker {
        for info in palette.blocks_of(marker) {
            if info.pos.y > best.y {
                best = info.pos;
            }
        }
    }
    best
}

fn can_support_tree(level: &dyn WorldGenLevel, origin: BlockPos) -> bool {
    level.is_face_sturdy_up(origin.below())
}

fn can_replace(level: &dyn WorldGenLevel, pos: BlockPos) -> bool {
    level.is_empty_block(pos) || level.is_tagged(pos, tags::REPLACEABLE_BY_TREES)
}

fn can_log_replace(level: &dyn WorldGenLevel, pos: BlockPos) -> bool {
    level.is_empty_block(pos) || level.is_water(pos) || level.is_tagged(pos, tags::REPLACEABLE_BY_TREES)
}
