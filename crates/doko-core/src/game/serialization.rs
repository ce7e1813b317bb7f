//! Wire forms of the game entities exchanged with the lobby server.

use crate::model::action::Action;
use crate::model::card::Card;
use crate::model::face::Face;
use crate::model::hand::Hand;
use crate::model::party::Announcement;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A card as it travels on the wire; the owner is present on actions and
/// dealt hands, absent on unowned cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireCard {
    pub color: Suit,
    pub face: Face,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub player: Option<Seat>,
}

impl WireCard {
    pub fn owned(card: Card, seat: Seat) -> Self {
        Self {
            color: card.suit(),
            face: card.face(),
            player: Some(seat),
        }
    }

    pub fn card(&self) -> Card {
        Card::new(self.color, self.face)
    }
}

impl From<Card> for WireCard {
    fn from(card: Card) -> Self {
        Self {
            color: card.suit(),
            face: card.face(),
            player: None,
        }
    }
}

/// An action's wire shape matches either a card or an announcement.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireAction {
    Announcement(Announcement),
    Card(WireCard),
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Action::Card { seat, card } => WireCard::owned(*card, *seat).serialize(serializer),
            Action::Announcement(announcement) => announcement.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match WireAction::deserialize(deserializer)? {
            WireAction::Announcement(announcement) => Ok(Action::Announcement(announcement)),
            WireAction::Card(wire) => {
                let seat = wire
                    .player
                    .ok_or_else(|| D::Error::missing_field("player"))?;
                Ok(Action::Card {
                    seat,
                    card: wire.card(),
                })
            }
        }
    }
}

/// Parses the dealt hand array of the lobby's game state.
pub fn hand_from_wire(cards: &[WireCard]) -> Hand {
    Hand::with_cards(cards.iter().map(WireCard::card).collect())
}
