use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum House {
    Spade = 0,
    Club = 1,
    Diamond = 2,
    Heart = 3,
}

impl House {
    pub const ALL: [House; 4] = [House::Spade, House::Club, House::Diamond, House::Heart];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(House::Spade),
            1 => Some(House::Club),
            2 => Some(House::Diamond),
            3 => Some(House::Heart),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            House::Spade => "Spade",
            House::Club => "Club",
            House::Diamond => "Diamond",
            House::Heart => "Heart",
        }
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            House::Spade => "S",
            House::Club => "C",
            House::Diamond => "D",
            House::Heart => "H",
        };
        f.write_str(symbol)
    }
}
