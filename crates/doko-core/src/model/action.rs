use crate::model::card::Card;
use crate::model::party::Announcement;
use crate::model::player::Seat;
use core::fmt;

/// A single move in a deal: a card played by a seat, or a bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Card { seat: Seat, card: Card },
    Announcement(Announcement),
}

impl Action {
    pub const fn play(seat: Seat, card: Card) -> Self {
        Action::Card { seat, card }
    }

    pub const fn bid(announcement: Announcement) -> Self {
        Action::Announcement(announcement)
    }

    pub const fn seat(&self) -> Seat {
        match self {
            Action::Card { seat, .. } => *seat,
            Action::Announcement(announcement) => announcement.seat,
        }
    }

    pub const fn as_card(&self) -> Option<Card> {
        match self {
            Action::Card { card, .. } => Some(*card),
            Action::Announcement(_) => None,
        }
    }

    pub const fn as_announcement(&self) -> Option<Announcement> {
        match self {
            Action::Card { .. } => None,
            Action::Announcement(announcement) => Some(*announcement),
        }
    }

    pub const fn is_card(&self) -> bool {
        matches!(self, Action::Card { .. })
    }

    pub const fn is_announcement(&self) -> bool {
        matches!(self, Action::Announcement(_))
    }
}

impl From<Announcement> for Action {
    fn from(announcement: Announcement) -> Self {
        Action::Announcement(announcement)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Card { seat, card } => write!(f, "{card} by {seat}"),
            Action::Announcement(announcement) => {
                write!(f, "{announcement} by {}", announcement.seat)
            }
        }
    }
}
