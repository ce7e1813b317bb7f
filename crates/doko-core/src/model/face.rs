use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Face {
    Nine = 0,
    Jack = 1,
    Queen = 2,
    King = 3,
    Ten = 4,
    Ace = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Nine,
        Face::Jack,
        Face::Queen,
        Face::King,
        Face::Ten,
        Face::Ace,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Face::Nine),
            1 => Some(Face::Jack),
            2 => Some(Face::Queen),
            3 => Some(Face::King),
            4 => Some(Face::Ten),
            5 => Some(Face::Ace),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Point value a card of this face contributes to a captured trick.
    pub const fn eyes(self) -> i32 {
        match self {
            Face::Nine => 0,
            Face::Jack => 2,
            Face::Queen => 3,
            Face::King => 4,
            Face::Ten => 10,
            Face::Ace => 11,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Face::Nine => "9",
            Face::Jack => "J",
            Face::Queen => "Q",
            Face::King => "K",
            Face::Ten => "10",
            Face::Ace => "A",
        };
        f.write_str(text)
    }
}
