use super::constraints::DealConstraints;
use crate::model::card::{Card, DISTINCT_CARDS};
use crate::model::face::Face;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use rand::Rng;
use std::fmt;

const CLUBS_QUEEN: Card = Card::new(Suit::Clubs, Face::Queen);

/// Fresh passes attempted before a dead-ended draw is reported.
const MAX_ATTEMPTS: usize = 32;

/// A complete assignment of the deal: four 12-card initial hands in which
/// every distinct card appears exactly twice.
#[derive(Debug, Clone)]
pub struct Determinization {
    hands: [Hand; 4],
}

impl Determinization {
    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn hands(&self) -> &[Hand; 4] {
        &self.hands
    }

    pub fn into_hands(self) -> [Hand; 4] {
        self.hands
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingError {
    /// A card copy remained with no seat allowed to take it.
    NoCandidate(Card),
}

impl fmt::Display for SamplingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingError::NoCandidate(card) => {
                write!(f, "no seat left that may hold {card}")
            }
        }
    }
}

impl std::error::Error for SamplingError {}

impl DealConstraints {
    /// Draws one deal assignment consistent with every observation.
    ///
    /// The constraint state is cloned per draw, so repeated calls yield
    /// independent determinizations. Random placement can occasionally run
    /// a card out of candidates; such draws are retried from scratch.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Determinization, SamplingError> {
        let mut attempt = 0;
        loop {
            match self.clone().sample_once(rng) {
                Ok(determinization) => return Ok(determinization),
                Err(error) => {
                    attempt += 1;
                    if attempt == MAX_ATTEMPTS {
                        return Err(error);
                    }
                }
            }
        }
    }

    fn sample_once<R: Rng + ?Sized>(mut self, rng: &mut R) -> Result<Determinization, SamplingError> {
        while !self.remaining.is_empty() {
            debug_assert_eq!(
                self.remaining.len(),
                Seat::LOOP
                    .iter()
                    .map(|&seat| self.remaining_slots(seat))
                    .sum::<usize>(),
                "copies left must match open hand slots"
            );
            if self.assign_unique_candidate()
                || self.assign_exhausted_seat()
                || self.assign_pending_clubs_queen()
            {
                continue;
            }
            let Some(&card) = self.remaining.last() else {
                break;
            };
            let mask = self.candidates[card.id()];
            if mask.is_empty() {
                return Err(SamplingError::NoCandidate(card));
            }
            let pick = rng.gen_range(0..mask.len());
            let seat = mask
                .seats()
                .nth(pick)
                .expect("pick is within the candidate set");
            self.assign(seat, card);
        }
        Ok(Determinization {
            hands: self.into_hands(),
        })
    }

    /// A card with a single candidate seat goes there.
    fn assign_unique_candidate(&mut self) -> bool {
        for id in 0..DISTINCT_CARDS {
            if self.candidates[id].len() == 1 {
                let card = Card::from_id(id).expect("card id in range");
                let seat = self.candidates[id]
                    .seats()
                    .next()
                    .expect("mask holds one seat");
                self.assign(seat, card);
                return true;
            }
        }
        false
    }

    /// A seat whose open slots equal its possible copies takes them all.
    fn assign_exhausted_seat(&mut self) -> bool {
        for seat in Seat::LOOP {
            let slots = self.remaining_slots(seat);
            if slots == 0 {
                continue;
            }
            let possible: Vec<Card> = self
                .remaining
                .iter()
                .copied()
                .filter(|copy| self.candidates[copy.id()].contains(seat))
                .collect();
            if possible.len() == slots {
                for card in possible {
                    self.assign(seat, card);
                }
                return true;
            }
        }
        false
    }

    /// A seat that announced Re without a placed clubs queen receives one.
    fn assign_pending_clubs_queen(&mut self) -> bool {
        let Some(&seat) = self.pending_clubs_queens.first() else {
            return false;
        };
        self.assign(seat, CLUBS_QUEEN);
        true
    }

    fn into_hands(self) -> [Hand; 4] {
        let mut hands: [Hand; 4] = std::array::from_fn(|_| Hand::new());
        for id in 0..DISTINCT_CARDS {
            let card = Card::from_id(id).expect("card id in range");
            for seat in Seat::LOOP {
                for _ in 0..self.held[id][seat.index()] {
                    hands[seat.index()].add(card);
                }
            }
        }
        debug_assert!(hands.iter().all(|hand| hand.len() == 12));
        hands
    }
}
