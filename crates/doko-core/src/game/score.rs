use crate::game::contract::Contract;
use crate::model::action::Action;
use crate::model::card::Card;
use crate::model::face::Face;
use crate::model::party::Party;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use crate::model::trick::Trick;

const DIAMONDS_ACE: Card = Card::new(Suit::Diamonds, Face::Ace);
const CLUBS_JACK: Card = Card::new(Suit::Clubs, Face::Jack);

/// Everything the final scoring needs, accumulated over a deal's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreState {
    pub seat_to_party: [Party; 4],
    /// Trick eyes captured per party, 240 total over a full deal.
    pub eyes: [i32; 2],
    pub bids: [i32; 2],
    pub bonus: [i32; 2],
    /// Eyes a party must reach to win; bids raise one's own and lower a
    /// silent opponent's.
    pub min_points: [i32; 2],
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            seat_to_party: [Party::Contra; 4],
            eyes: [0; 2],
            bids: [0; 2],
            bonus: [0; 2],
            min_points: [121; 2],
        }
    }
}

impl ScoreState {
    pub fn party_of(&self, seat: Seat) -> Party {
        self.seat_to_party[seat.index()]
    }

    /// The eyes captured by `seat`'s party.
    pub fn eyes_for(&self, seat: Seat) -> i32 {
        self.eyes[self.party_of(seat).index()]
    }

    /// Tournament score per seat.
    pub fn scores(&self) -> [i32; 4] {
        const CONTRA: usize = Party::Contra as usize;
        const RE: usize = Party::Re as usize;
        let mut scores = [0i32; 4];
        let mut points = 0;
        if self.min_points[CONTRA] <= self.eyes[CONTRA] {
            let diff = self.eyes[CONTRA] - self.min_points[CONTRA];
            points += 2 * (self.bids[CONTRA] - 1).max(0) + 2 + diff / 30;
            if self.bids[CONTRA] > 0 {
                points *= 2;
            }
            if self.bids[RE] > 0 {
                points *= 2;
            }
            for seat in Seat::LOOP {
                scores[seat.index()] = if self.party_of(seat) == Party::Contra {
                    points
                } else {
                    -points
                };
            }
        }
        if self.min_points[RE] <= self.eyes[RE] {
            let diff = self.eyes[RE] - self.min_points[RE];
            points += 2 * (self.bids[RE] - 1).max(0) + 1 + diff / 30;
            if self.bids[CONTRA] > 0 {
                points *= 2;
            }
            if self.bids[RE] > 0 {
                points *= 2;
            }
            for seat in Seat::LOOP {
                scores[seat.index()] = if self.party_of(seat) == Party::Re {
                    points
                } else {
                    -points
                };
            }
        }
        let bonus_diff = self.bonus[RE] - self.bonus[CONTRA];
        for seat in Seat::LOOP {
            scores[seat.index()] += if self.party_of(seat) == Party::Re {
                bonus_diff
            } else {
                -bonus_diff
            };
        }
        let re_seats = self
            .seat_to_party
            .iter()
            .filter(|&&party| party == Party::Re)
            .count();
        if re_seats == 1 {
            for seat in Seat::LOOP {
                if self.party_of(seat) == Party::Re {
                    scores[seat.index()] *= 3;
                }
            }
        }
        scores
    }
}

impl Contract {
    /// Walks a deal's history into a [`ScoreState`]: trick eyes per party,
    /// bonus points (normal and marriage games only), and the bid-driven
    /// minimum-point schedule.
    pub fn score_state(&self, history: &[Action]) -> ScoreState {
        let mut state = ScoreState::default();
        for seat in Seat::LOOP {
            state.seat_to_party[seat.index()] = self.observed_party(seat, history);
        }
        let with_bonuses = matches!(self, Contract::Normal | Contract::Marriage { .. });
        let party_of = |state: &ScoreState, seat: Seat| state.seat_to_party[seat.index()].index();

        let mut trick = Trick::new();
        let mut cards_played = 0usize;
        for action in history {
            if let Some(card) = action.as_card() {
                trick.push(action.seat(), card);
                cards_played += 1;
                if trick.is_complete() {
                    let winner = trick.plays()[self.find_winner(&trick, cards_played)].seat;
                    let winner_party = party_of(&state, winner);
                    let value = trick.eyes();
                    state.eyes[winner_party] += value;
                    if with_bonuses {
                        if value >= 40 {
                            state.bonus[winner_party] += 1;
                        }
                        if let Some(fox) =
                            trick.plays().iter().find(|play| play.card == DIAMONDS_ACE)
                        {
                            if party_of(&state, fox.seat) != winner_party {
                                state.bonus[winner_party] += 1;
                            }
                        }
                        if cards_played == 48 {
                            if let Some(charlie) =
                                trick.plays().iter().find(|play| play.card == CLUBS_JACK)
                            {
                                if party_of(&state, charlie.seat) != winner_party {
                                    state.bonus[winner_party] += 1;
                                }
                            }
                        }
                    }
                    trick = Trick::new();
                }
            }
            if let Some(bid) = action.as_announcement() {
                let party = bid.party.index();
                state.bids[party] += 1;
                let bids = state.bids[party];
                state.min_points[party] = 121 + 30 * (bids - 1);
                let opponent = bid.party.opponent().index();
                if state.bids[opponent] == 0 {
                    state.min_points[opponent] = 120 - 30 * (bids - 1);
                }
            }
        }
        state
    }
}
