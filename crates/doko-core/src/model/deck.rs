use crate::model::card::{Card, DISTINCT_CARDS};
use crate::model::hand::Hand;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// The 48-card double deck: two copies of each distinct card.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn double() -> Self {
        let mut cards = Vec::with_capacity(DISTINCT_CARDS * 2);
        for _ in 0..2 {
            for id in 0..DISTINCT_CARDS {
                if let Some(card) = Card::from_id(id) {
                    cards.push(card);
                }
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::double();
        deck.cards.shuffle(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Splits the deck into four 12-card hands in deal order.
    pub fn deal(&self) -> [Hand; 4] {
        std::array::from_fn(|seat| {
            let start = seat * 12;
            Hand::with_cards(self.cards[start..start + 12].to_vec())
        })
    }
}
