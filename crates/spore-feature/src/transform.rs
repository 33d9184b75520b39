use rand::{Rng, RngCore};
use spore_geom::{BlockPos, Rotation, Vec3i};

/// World position of a template-local block.
///
/// The template is centred horizontally on `anchor` (`size.x / 2`, `size.z / 2` are
/// subtracted first), kept at its local origin vertically, then rotated about that origin.
/// `size` is the footprint after rotation.
#[inline]
pub fn to_world_position(
    size: Vec3i,
    rotation: Rotation,
    relative: BlockPos,
    anchor: BlockPos,
) -> BlockPos {
    let centred = relative.offset(-(size.x / 2), 0, -(size.z / 2));
    rotation.rotate(centred) + anchor
}

/// Shrink even horizontal extents by one so centring lands on a single column.
#[inline]
pub fn odd_footprint(size: Vec3i) -> Vec3i {
    let mut out = size;
    if out.x % 2 == 0 {
        out.x -= 1;
    }
    if out.z % 2 == 0 {
        out.z -= 1;
    }
    out
}

/// One of the four horizontal rotations, uniformly.
#[inline]
pub fn random_rotation(random: &mut dyn RngCore) -> Rotation {
    Rotation::from_index(random.random_range(0..4u32))
}
