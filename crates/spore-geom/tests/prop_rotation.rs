use proptest::prelude::*;
use spore_geom::{Direction, Rotation, Vec3i};

fn arb_vec3i() -> impl Strategy<Value = Vec3i> {
    (-4096i32..4096, -512i32..512, -4096i32..4096).prop_map(|(x, y, z)| Vec3i::new(x, y, z))
}

fn arb_rotation() -> impl Strategy<Value = Rotation> {
    (0u32..4).prop_map(Rotation::from_index)
}

#[test]
fn quarter_turns_match_cardinal_axes() {
    let east = Vec3i::new(1, 0, 0);
    assert_eq!(Rotation::None.rotate(east), east);
    assert_eq!(Rotation::Clockwise90.rotate(east), Vec3i::new(0, 0, 1));
    assert_eq!(Rotation::Clockwise180.rotate(east), Vec3i::new(-1, 0, 0));
    assert_eq!(Rotation::Counterclockwise90.rotate(east), Vec3i::new(0, 0, -1));
}

#[test]
fn quarter_turns_swap_footprint() {
    let size = Vec3i::new(4, 7, 5);
    assert_eq!(Rotation::None.rotate_size(size), size);
    assert_eq!(Rotation::Clockwise180.rotate_size(size), size);
    assert_eq!(Rotation::Clockwise90.rotate_size(size), Vec3i::new(5, 7, 4));
    assert_eq!(Rotation::Counterclockwise90.rotate_size(size), Vec3i::new(5, 7, 4));
}

#[test]
fn direction_names_and_offsets() {
    let origin = Vec3i::new(10, 64, 10);
    assert_eq!(origin.relative(Direction::North), Vec3i::new(10, 64, 9));
    assert_eq!(origin.relative(Direction::Down), origin.below());
    assert_eq!(Direction::from_name("east"), Some(Direction::East));
    assert_eq!(Direction::from_name("sideways"), None);
}

proptest! {
    // Rotation never moves a block vertically.
    #[test]
    fn rotation_preserves_y(p in arb_vec3i(), r in arb_rotation()) {
        prop_assert_eq!(r.rotate(p).y, p.y);
    }

    // Four quarter turns are the identity.
    #[test]
    fn four_quarter_turns_identity(p in arb_vec3i()) {
        let mut q = p;
        for _ in 0..4 {
            q = Rotation::Clockwise90.rotate(q);
        }
        prop_assert_eq!(q, p);
    }

    #[test]
    fn inverse_undoes_rotation(p in arb_vec3i(), r in arb_rotation()) {
        prop_assert_eq!(r.inverse().rotate(r.rotate(p)), p);
    }

    // Rotation is linear over positions, so offsets commute with it.
    #[test]
    fn rotation_distributes_over_add(a in arb_vec3i(), b in arb_vec3i(), r in arb_rotation()) {
        prop_assert_eq!(r.rotate(a + b), r.rotate(a) + r.rotate(b));
    }

    #[test]
    fn y_major_orders_by_height_first(a in arb_vec3i(), b in arb_vec3i()) {
        if a.y < b.y {
            prop_assert!(a.y_major() < b.y_major());
        }
    }
}
