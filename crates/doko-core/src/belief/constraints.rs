use crate::game::contract::Contract;
use crate::model::action::Action;
use crate::model::card::{Card, DISTINCT_CARDS};
use crate::model::face::Face;
use crate::model::hand::Hand;
use crate::model::party::Party;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use crate::model::trick::Trick;

const CLUBS_QUEEN: Card = Card::new(Suit::Clubs, Face::Queen);

/// Bit-mask of seats still permitted to hold a copy of some card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeatMask(u8);

impl SeatMask {
    pub const EMPTY: Self = Self(0);
    pub const FULL: Self = Self(0b1111);

    pub fn contains(self, seat: Seat) -> bool {
        self.0 & (1 << seat.index()) != 0
    }

    #[must_use]
    pub fn with(self, seat: Seat) -> Self {
        Self(self.0 | (1 << seat.index()))
    }

    #[must_use]
    pub fn without(self, seat: Seat) -> Self {
        Self(self.0 & !(1 << seat.index()))
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn seats(self) -> impl Iterator<Item = Seat> {
        Seat::LOOP.into_iter().filter(move |seat| self.contains(*seat))
    }
}

/// Everything deducible about card ownership from one seat's point of view:
/// placed copies, per-card candidate seats, the unplaced remainder of the
/// deck, and seats whose Re announcement still owes them a clubs queen.
#[derive(Debug, Clone)]
pub struct DealConstraints {
    pub(crate) seat: Seat,
    pub(crate) held: [[u8; 4]; DISTINCT_CARDS],
    pub(crate) candidates: [SeatMask; DISTINCT_CARDS],
    pub(crate) remaining: Vec<Card>,
    pub(crate) pending_clubs_queens: Vec<Seat>,
}

impl DealConstraints {
    fn new(seat: Seat) -> Self {
        let mut remaining = Vec::with_capacity(DISTINCT_CARDS * 2);
        for _ in 0..2 {
            for id in 0..DISTINCT_CARDS {
                if let Some(card) = Card::from_id(id) {
                    remaining.push(card);
                }
            }
        }
        Self {
            seat,
            held: [[0; 4]; DISTINCT_CARDS],
            candidates: [SeatMask::FULL; DISTINCT_CARDS],
            remaining,
            pending_clubs_queens: Vec::new(),
        }
    }

    /// Streams a deal's public history over the agent's hand, then pins the
    /// unplayed remainder of that hand to the agent.
    pub fn from_observations(
        contract: &Contract,
        seat: Seat,
        hand: &Hand,
        history: &[Action],
    ) -> Self {
        let mut state = Self::new(seat);
        let mut residual = hand.clone();
        let mut trick = Trick::new();
        for action in history {
            state.observe(contract, action, &mut residual, &mut trick);
        }
        for &card in residual.cards() {
            state.assign(seat, card);
        }
        state
    }

    /// Records one observed action.
    ///
    /// A card play places a copy with its player and, mid-trick, marks the
    /// player void in trump (discarded under a trump lead) or in the led
    /// suit (failed to follow). A Re announcement obliges the announcer to
    /// receive a clubs queen; a Contra announcement rules one out.
    pub fn observe(
        &mut self,
        contract: &Contract,
        action: &Action,
        residual: &mut Hand,
        trick: &mut Trick,
    ) {
        match action {
            Action::Card { seat, card } => {
                self.assign(*seat, *card);
                if let Some(lead) = trick.lead() {
                    if contract.is_trump(lead) && !contract.is_trump(*card) {
                        for id in 0..DISTINCT_CARDS {
                            let candidate = Card::from_id(id).expect("card id in range");
                            if contract.is_trump(candidate) {
                                self.candidates[id] = self.candidates[id].without(*seat);
                            }
                        }
                    } else if !contract.is_trump(lead)
                        && (contract.is_trump(*card) || card.suit() != lead.suit())
                    {
                        for face in Face::ALL {
                            let candidate = Card::new(lead.suit(), face);
                            if !contract.is_trump(candidate) {
                                self.candidates[candidate.id()] =
                                    self.candidates[candidate.id()].without(*seat);
                            }
                        }
                    }
                }
                trick.push(*seat, *card);
                if trick.is_complete() {
                    *trick = Trick::new();
                }
                if *seat == self.seat {
                    residual.remove(*card);
                }
            }
            Action::Announcement(bid) => {
                let id = CLUBS_QUEEN.id();
                match bid.party {
                    Party::Re => {
                        if self.candidates[id].contains(bid.seat)
                            && self.held[id][bid.seat.index()] == 0
                            && !self.pending_clubs_queens.contains(&bid.seat)
                        {
                            self.pending_clubs_queens.push(bid.seat);
                        }
                    }
                    Party::Contra => {
                        self.candidates[id] = self.candidates[id].without(bid.seat);
                    }
                }
            }
        }
    }

    /// Candidate seats for a copy of `card`.
    pub fn candidates(&self, card: Card) -> SeatMask {
        self.candidates[card.id()]
    }

    pub fn remaining_copies(&self) -> usize {
        self.remaining.len()
    }

    pub fn pending_clubs_queens(&self) -> &[Seat] {
        &self.pending_clubs_queens
    }

    /// Unfilled hand slots of `seat`.
    pub(crate) fn remaining_slots(&self, seat: Seat) -> usize {
        let placed: usize = self
            .held
            .iter()
            .map(|copies| copies[seat.index()] as usize)
            .sum();
        12 - placed
    }

    /// Places one copy of `card` with `seat` and maintains every mask:
    /// a fully placed card loses all candidates, a full hand loses its bit
    /// on every card, and a placed clubs queen settles a pending Re bid.
    pub(crate) fn assign(&mut self, seat: Seat, card: Card) {
        let id = card.id();
        debug_assert!(
            self.candidates[id].contains(seat),
            "{seat} may not hold {card}"
        );
        debug_assert!(self.held[id].iter().sum::<u8>() < 2);
        if let Some(position) = self.remaining.iter().rposition(|&copy| copy == card) {
            self.remaining.swap_remove(position);
        } else {
            debug_assert!(false, "no copy of {card} left to place");
        }
        let slots_before = self.remaining_slots(seat);
        debug_assert!(slots_before > 0, "{seat}'s hand is already full");
        self.held[id][seat.index()] += 1;
        if self.held[id].iter().sum::<u8>() == 2 {
            self.candidates[id] = SeatMask::EMPTY;
        }
        if slots_before == 1 {
            for mask in &mut self.candidates {
                *mask = mask.without(seat);
            }
        }
        if card == CLUBS_QUEEN {
            if let Some(position) = self
                .pending_clubs_queens
                .iter()
                .position(|&pending| pending == seat)
            {
                self.pending_clubs_queens.swap_remove(position);
            }
        }
    }
}
