//! Integer voxel geometry for placement crates.
#![forbid(unsafe_code)]

use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Integer 3D vector. Used both for world block positions and template sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Vec3i {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

pub type BlockPos = Vec3i;

impl Vec3i {
    pub const ZERO: Vec3i = Vec3i { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    #[inline]
    pub const fn above(self) -> Self {
        self.offset(0, 1, 0)
    }

    #[inline]
    pub const fn below(self) -> Self {
        self.offset(0, -1, 0)
    }

    #[inline]
    pub fn relative(self, dir: Direction) -> Self {
        self + dir.normal()
    }

    /// Ordering key used when handing position sets to consumers: bottom-up, then x, then z.
    #[inline]
    pub fn y_major(self) -> (i32, i32, i32) {
        (self.y, self.x, self.z)
    }
}

impl From<[i32; 3]> for Vec3i {
    #[inline]
    fn from(v: [i32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl Add for Vec3i {
    type Output = Vec3i;
    #[inline]
    fn add(self, rhs: Vec3i) -> Vec3i {
        Vec3i::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3i {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3i) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3i {
    type Output = Vec3i;
    #[inline]
    fn sub(self, rhs: Vec3i) -> Vec3i {
        Vec3i::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3i {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec3i) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Neg for Vec3i {
    type Output = Vec3i;
    #[inline]
    fn neg(self) -> Vec3i {
        Vec3i::new(-self.x, -self.y, -self.z)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const HORIZONTAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    #[inline]
    pub const fn normal(self) -> Vec3i {
        match self {
            Direction::Down => Vec3i::new(0, -1, 0),
            Direction::Up => Vec3i::new(0, 1, 0),
            Direction::North => Vec3i::new(0, 0, -1),
            Direction::South => Vec3i::new(0, 0, 1),
            Direction::West => Vec3i::new(-1, 0, 0),
            Direction::East => Vec3i::new(1, 0, 0),
        }
    }

    pub fn from_name(s: &str) -> Option<Direction> {
        match s {
            "down" => Some(Direction::Down),
            "up" => Some(Direction::Up),
            "north" => Some(Direction::North),
            "south" => Some(Direction::South),
            "west" => Some(Direction::West),
            "east" => Some(Direction::East),
            _ => None,
        }
    }
}

/// Axis-aligned rotation about the Y axis, pivoting on the template origin.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    Counterclockwise90,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::None,
        Rotation::Clockwise90,
        Rotation::Clockwise180,
        Rotation::Counterclockwise90,
    ];

    /// Pick a rotation from a uniform index in `0..4`.
    #[inline]
    pub fn from_index(i: u32) -> Rotation {
        Self::ALL[(i % 4) as usize]
    }

    /// Rotate a position, preserving Y.
    #[inline]
    pub fn rotate(self, p: Vec3i) -> Vec3i {
        match self {
            Rotation::None => p,
            Rotation::Clockwise90 => Vec3i::new(-p.z, p.y, p.x),
            Rotation::Clockwise180 => Vec3i::new(-p.x, p.y, -p.z),
            Rotation::Counterclockwise90 => Vec3i::new(p.z, p.y, -p.x),
        }
    }

    /// Footprint of a box of `size` after this rotation: quarter turns swap X and Z.
    #[inline]
    pub fn rotate_size(self, size: Vec3i) -> Vec3i {
        match self {
            Rotation::Clockwise90 | Rotation::Counterclockwise90 => {
                Vec3i::new(size.z, size.y, size.x)
            }
            Rotation::None | Rotation::Clockwise180 => size,
        }
    }

    #[inline]
    pub fn inverse(self) -> Rotation {
        match self {
            Rotation::Clockwise90 => Rotation::Counterclockwise90,
            Rotation::Counterclockwise90 => Rotation::Clockwise90,
            r => r,
        }
    }
}
