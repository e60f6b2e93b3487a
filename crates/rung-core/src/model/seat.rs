use core::fmt;
use serde::{Deserialize, Serialize};

/// Fixed seating labels in counter-clockwise play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    South = 0,
    West = 1,
    North = 2,
    East = 3,
}

impl Seat {
    pub const LOOP: [Seat; 4] = [Seat::South, Seat::West, Seat::North, Seat::East];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::South),
            1 => Some(Seat::West),
            2 => Some(Seat::North),
            3 => Some(Seat::East),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Seat {
        match self {
            Seat::South => Seat::West,
            Seat::West => Seat::North,
            Seat::North => Seat::East,
            Seat::East => Seat::South,
        }
    }

    pub const fn previous(self) -> Seat {
        match self {
            Seat::South => Seat::East,
            Seat::West => Seat::South,
            Seat::North => Seat::West,
            Seat::East => Seat::North,
        }
    }

    pub const fn partner(self) -> Seat {
        match self {
            Seat::South => Seat::North,
            Seat::West => Seat::East,
            Seat::North => Seat::South,
            Seat::East => Seat::West,
        }
    }

    /// All four seats in play order starting at `leader`.
    pub fn order_from(leader: Seat) -> [Seat; 4] {
        let mut order = [leader; 4];
        let mut i = 1;
        while i < 4 {
            order[i] = order[i - 1].next();
            i += 1;
        }
        order
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Seat::South => "South",
            Seat::West => "West",
            Seat::North => "North",
            Seat::East => "East",
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
