use crate::model::player::Seat;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Party {
    Contra = 0,
    Re = 1,
}

impl Party {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opponent(self) -> Party {
        match self {
            Party::Contra => Party::Re,
            Party::Re => Party::Contra,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Contra => f.write_str("Contra"),
            Party::Re => f.write_str("Re"),
        }
    }
}

/// A bid signalling the announcer's party during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Announcement {
    pub party: Party,
    #[serde(rename = "player")]
    pub seat: Seat,
}

impl Announcement {
    pub const fn new(party: Party, seat: Seat) -> Self {
        Self { party, seat }
    }
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "announcement({})", self.party)
    }
}
