use crate::model::face::Face;
use crate::model::suit::Suit;
use core::fmt;

/// Number of distinct cards; each appears twice in the double deck.
pub const DISTINCT_CARDS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    suit: Suit,
    face: Face,
}

impl Card {
    pub const fn new(suit: Suit, face: Face) -> Self {
        Self { suit, face }
    }

    pub const fn suit(self) -> Suit {
        self.suit
    }

    pub const fn face(self) -> Face {
        self.face
    }

    pub const fn eyes(self) -> i32 {
        self.face.eyes()
    }

    /// Unique ID in `0..24`, indexing the trump tables and the
    /// per-card arrays of the deal sampler.
    pub const fn id(self) -> usize {
        self.suit.index() * 6 + self.face.index()
    }

    pub const fn from_id(id: usize) -> Option<Self> {
        if id >= DISTINCT_CARDS {
            return None;
        }
        let suit = match Suit::from_index(id / 6) {
            Some(suit) => suit,
            None => return None,
        };
        let face = match Face::from_index(id % 6) {
            Some(face) => face,
            None => return None,
        };
        Some(Card::new(suit, face))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.suit)
    }
}
