use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::vector::Vector3;
use super::BlockVector3;

/// Bit flags selecting families of directions.
pub mod flag {
    pub const CARDINAL: u8 = 0x1;
    pub const ORDINAL: u8 = 0x2;
    pub const SECONDARY_ORDINAL: u8 = 0x4;
    pub const UPRIGHT: u8 = 0x8;
    pub const ALL: u8 = CARDINAL | ORDINAL | SECONDARY_ORDINAL | UPRIGHT;
}

/// Compass and vertical directions. North is -Z, east is +X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
    Up,
    Down,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    WestNorthWest,
    WestSouthWest,
    NorthNorthWest,
    NorthNorthEast,
    EastNorthEast,
    EastSouthEast,
    SouthSouthEast,
    SouthSouthWest,
}

const ROTATION_ORDER: [Direction; 16] = [
    Direction::South,
    Direction::SouthSouthWest,
    Direction::SouthWest,
    Direction::WestSouthWest,
    Direction::West,
    Direction::WestNorthWest,
    Direction::NorthWest,
    Direction::NorthNorthWest,
    Direction::North,
    Direction::NorthNorthEast,
    Direction::NorthEast,
    Direction::EastNorthEast,
    Direction::East,
    Direction::EastSouthEast,
    Direction::SouthEast,
    Direction::SouthSouthEast,
];

impl Direction {
    /// Declaration order; `find_closest` resolves ties towards the later entry.
    pub const ALL: [Direction; 18] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::Up,
        Direction::Down,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::WestNorthWest,
        Direction::WestSouthWest,
        Direction::NorthNorthWest,
        Direction::NorthNorthEast,
        Direction::EastNorthEast,
        Direction::EastSouthEast,
        Direction::SouthSouthEast,
        Direction::SouthSouthWest,
    ];

    pub fn flags(self) -> u8 {
        use Direction::*;
        match self {
            North | East | South | West => flag::CARDINAL,
            Up | Down => flag::UPRIGHT,
            NorthEast | NorthWest | SouthEast | SouthWest => flag::ORDINAL,
            _ => flag::SECONDARY_ORDINAL,
        }
    }

    fn raw_vector(self) -> Vector3 {
        use Direction::*;
        let (c, s) = ((PI / 8.0).cos(), (PI / 8.0).sin());
        match self {
            North => Vector3::new(0.0, 0.0, -1.0),
            East => Vector3::new(1.0, 0.0, 0.0),
            South => Vector3::new(0.0, 0.0, 1.0),
            West => Vector3::new(-1.0, 0.0, 0.0),
            Up => Vector3::new(0.0, 1.0, 0.0),
            Down => Vector3::new(0.0, -1.0, 0.0),
            NorthEast => Vector3::new(1.0, 0.0, -1.0),
            NorthWest => Vector3::new(-1.0, 0.0, -1.0),
            SouthEast => Vector3::new(1.0, 0.0, 1.0),
            SouthWest => Vector3::new(-1.0, 0.0, 1.0),
            WestNorthWest => Vector3::new(-c, 0.0, -s),
            WestSouthWest => Vector3::new(-c, 0.0, s),
            NorthNorthWest => Vector3::new(-s, 0.0, -c),
            NorthNorthEast => Vector3::new(s, 0.0, -c),
            EastNorthEast => Vector3::new(c, 0.0, -s),
            EastSouthEast => Vector3::new(c, 0.0, s),
            SouthSouthEast => Vector3::new(s, 0.0, c),
            SouthSouthWest => Vector3::new(-s, 0.0, c),
        }
    }

    pub fn is_cardinal(self) -> bool {
        self.flags() & flag::CARDINAL != 0
    }

    pub fn is_ordinal(self) -> bool {
        self.flags() & flag::ORDINAL != 0
    }

    pub fn is_secondary_ordinal(self) -> bool {
        self.flags() & flag::SECONDARY_ORDINAL != 0
    }

    pub fn is_upright(self) -> bool {
        self.flags() & flag::UPRIGHT != 0
    }

    /// Unit vector.
    pub fn to_vector(self) -> Vector3 {
        self.raw_vector().normalize()
    }

    pub fn to_block_vector(self) -> BlockVector3 {
        self.raw_vector().to_block_point()
    }

    /// Closest direction among those allowed by `flags`. Without
    /// [`flag::UPRIGHT`] the vertical component is ignored.
    pub fn find_closest(vector: Vector3, flags: u8) -> Option<Direction> {
        let vector = if flags & flag::UPRIGHT == 0 {
            Vector3::new(vector.x, 0.0, vector.z)
        } else {
            vector
        }
        .normalize();

        let mut closest = None;
        let mut closest_dot = -2.0;
        for direction in Self::ALL {
            if !flags & direction.flags() != 0 {
                continue;
            }
            let dot = direction.to_vector().dot(vector);
            if dot >= closest_dot {
                closest = Some(direction);
                closest_dot = dot;
            }
        }
        closest
    }

    pub fn values_of(flags: u8) -> Vec<Direction> {
        Self::ALL
            .into_iter()
            .filter(|d| !flags & d.flags() == 0)
            .collect()
    }

    /// Sixteen-step rotation index used by standing signs and banners.
    pub fn from_rotation_index(index: i32) -> Option<Direction> {
        usize::try_from(index).ok().and_then(|i| ROTATION_ORDER.get(i).copied())
    }

    pub fn to_rotation_index(self) -> Option<i32> {
        ROTATION_ORDER
            .iter()
            .position(|d| *d == self)
            .map(|i| i as i32)
    }

    /// Lowercase name as used in block state properties.
    pub fn name(self) -> &'static str {
        use Direction::*;
        match self {
            North => "north",
            East => "east",
            South => "south",
            West => "west",
            Up => "up",
            Down => "down",
            NorthEast => "northeast",
            NorthWest => "northwest",
            SouthEast => "southeast",
            SouthWest => "southwest",
            WestNorthWest => "west_northwest",
            WestSouthWest => "west_southwest",
            NorthNorthWest => "north_northwest",
            NorthNorthEast => "north_northeast",
            EastNorthEast => "east_northeast",
            EastSouthEast => "east_southeast",
            SouthSouthEast => "south_southeast",
            SouthSouthWest => "south_southwest",
        }
    }

    pub fn from_name(name: &str) -> Option<Direction> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_closest_cardinal() {
        let v = Vector3::new(0.9, 0.4, 0.1);
        assert_eq!(Direction::find_closest(v, flag::CARDINAL), Some(Direction::East));
        assert_eq!(
            Direction::find_closest(Vector3::new(0.0, -3.0, 0.0), flag::CARDINAL | flag::UPRIGHT),
            Some(Direction::Down)
        );
    }

    #[test]
    fn test_rotation_index_round_trip() {
        for i in 0..16 {
            let d = Direction::from_rotation_index(i).unwrap();
            assert_eq!(d.to_rotation_index(), Some(i));
        }
        assert_eq!(Direction::from_rotation_index(16), None);
        assert_eq!(Direction::Up.to_rotation_index(), None);
    }

    #[test]
    fn test_values_of() {
        assert_eq!(Direction::values_of(flag::CARDINAL).len(), 4);
        assert_eq!(Direction::values_of(flag::ALL).len(), 18);
    }
}
