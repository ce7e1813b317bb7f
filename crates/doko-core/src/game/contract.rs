use crate::model::action::Action;
use crate::model::card::Card;
use crate::model::face::Face;
use crate::model::hand::Hand;
use crate::model::party::{Announcement, Party};
use crate::model::player::Seat;
use crate::model::suit::Suit;
use crate::model::trick::Trick;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Trump ranking for the normal game: diamonds 9/K/10/A, the jacks,
/// the queens, and the hearts ten on top.
const fn normal_table() -> [u8; 24] {
    let mut table = [0u8; 24];
    let mut order = 1u8;
    let run = [Face::Nine, Face::King, Face::Ten, Face::Ace];
    let mut i = 0;
    while i < run.len() {
        table[Card::new(Suit::Diamonds, run[i]).id()] = order;
        order += 1;
        i += 1;
    }
    let mut s = 0;
    while s < 4 {
        table[Card::new(Suit::ALL[s], Face::Jack).id()] = order;
        order += 1;
        s += 1;
    }
    let mut s = 0;
    while s < 4 {
        table[Card::new(Suit::ALL[s], Face::Queen).id()] = order;
        order += 1;
        s += 1;
    }
    table[Card::new(Suit::Hearts, Face::Ten).id()] = order;
    table
}

/// Trump ranking for jack and queen solos: only that face, in cross-suit order.
const fn face_solo_table(face: Face) -> [u8; 24] {
    let mut table = [0u8; 24];
    let mut order = 1u8;
    let mut s = 0;
    while s < 4 {
        table[Card::new(Suit::ALL[s], face).id()] = order;
        order += 1;
        s += 1;
    }
    table
}

/// Trump ranking for a color solo: the color's 9/K/10/A, the jacks, the
/// queens, and the hearts ten on top. For a hearts solo the later hearts-ten
/// entry overwrites its slot in the color run.
const fn color_solo_table(color: Suit) -> [u8; 24] {
    let mut table = [0u8; 24];
    let mut order = 1u8;
    let run = [Face::Nine, Face::King, Face::Ten, Face::Ace];
    let mut i = 0;
    while i < run.len() {
        table[Card::new(color, run[i]).id()] = order;
        order += 1;
        i += 1;
    }
    let mut s = 0;
    while s < 4 {
        table[Card::new(Suit::ALL[s], Face::Jack).id()] = order;
        order += 1;
        s += 1;
    }
    let mut s = 0;
    while s < 4 {
        table[Card::new(Suit::ALL[s], Face::Queen).id()] = order;
        order += 1;
        s += 1;
    }
    table[Card::new(Suit::Hearts, Face::Ten).id()] = order;
    table
}

const NORMAL_TRUMP: [u8; 24] = normal_table();
const JACK_SOLO_TRUMP: [u8; 24] = face_solo_table(Face::Jack);
const QUEEN_SOLO_TRUMP: [u8; 24] = face_solo_table(Face::Queen);
const DIAMONDS_SOLO_TRUMP: [u8; 24] = color_solo_table(Suit::Diamonds);
const HEARTS_SOLO_TRUMP: [u8; 24] = color_solo_table(Suit::Hearts);
const SPADES_SOLO_TRUMP: [u8; 24] = color_solo_table(Suit::Spades);
const CLUBS_SOLO_TRUMP: [u8; 24] = color_solo_table(Suit::Clubs);

const CLUBS_QUEEN: Card = Card::new(Suit::Clubs, Face::Queen);
const HEARTS_TEN: Card = Card::new(Suit::Hearts, Face::Ten);

/// Maximum bids per party in one deal.
const MAX_BIDS: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoloKind {
    Jack,
    Queen,
    Diamonds,
    Hearts,
    Spades,
    Clubs,
}

impl SoloKind {
    pub const ALL: [SoloKind; 6] = [
        SoloKind::Jack,
        SoloKind::Queen,
        SoloKind::Diamonds,
        SoloKind::Hearts,
        SoloKind::Spades,
        SoloKind::Clubs,
    ];
}

impl fmt::Display for SoloKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SoloKind::Jack => "jack",
            SoloKind::Queen => "queen",
            SoloKind::Diamonds => "diamonds",
            SoloKind::Hearts => "hearts",
            SoloKind::Spades => "spades",
            SoloKind::Clubs => "clubs",
        };
        f.write_str(label)
    }
}

/// The contract a deal is played under. Every rule that differs between
/// contracts (trump membership, trick resolution, party assignment, legal
/// moves, scoring) dispatches on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum Contract {
    Normal,
    Marriage {
        bride: Seat,
    },
    Solo {
        #[serde(rename = "solo_player")]
        soloist: Seat,
        #[serde(rename = "solo_type")]
        kind: SoloKind,
    },
}

/// Moves available to the seat on turn. The bid option is kept apart from
/// the card options so rollouts can restrict themselves to cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalActions {
    pub announcement: Option<Announcement>,
    pub cards: Vec<Card>,
}

impl Contract {
    fn table(&self) -> &'static [u8; 24] {
        match self {
            Contract::Normal | Contract::Marriage { .. } => &NORMAL_TRUMP,
            Contract::Solo { kind, .. } => match kind {
                SoloKind::Jack => &JACK_SOLO_TRUMP,
                SoloKind::Queen => &QUEEN_SOLO_TRUMP,
                SoloKind::Diamonds => &DIAMONDS_SOLO_TRUMP,
                SoloKind::Hearts => &HEARTS_SOLO_TRUMP,
                SoloKind::Spades => &SPADES_SOLO_TRUMP,
                SoloKind::Clubs => &CLUBS_SOLO_TRUMP,
            },
        }
    }

    /// Rank within trump, `1..=24`; 0 for non-trump cards.
    pub fn trump_order(&self, card: Card) -> u8 {
        self.table()[card.id()]
    }

    pub fn is_trump(&self, card: Card) -> bool {
        self.trump_order(card) != 0
    }

    /// Ranking used to pick the contract when several players reserve:
    /// normal < marriage < jack solo < queen solo < color solos.
    pub fn ordinal(&self) -> u8 {
        match self {
            Contract::Normal => 0,
            Contract::Marriage { .. } => 1,
            Contract::Solo { kind, .. } => match kind {
                SoloKind::Jack => 2,
                SoloKind::Queen => 3,
                SoloKind::Diamonds => 4,
                SoloKind::Hearts => 5,
                SoloKind::Spades => 6,
                SoloKind::Clubs => 7,
            },
        }
    }

    /// Who leads the first trick: the soloist for a solo, the dealer otherwise.
    pub fn leader(&self, dealer: Seat) -> Seat {
        match self {
            Contract::Solo { soloist, .. } => *soloist,
            _ => dealer,
        }
    }

    /// Index of the winning play in a completed (or partial) trick.
    ///
    /// `cards_played` counts card actions of the whole deal through this
    /// trick; it gates the second-hearts-ten rule, which is off for the last
    /// three tricks and for solos.
    pub fn find_winner(&self, trick: &Trick, cards_played: usize) -> usize {
        let plays = trick.plays();
        debug_assert!(!plays.is_empty(), "cannot resolve an empty trick");
        let mut winner = 0;
        for (index, play) in plays.iter().enumerate().skip(1) {
            let best = plays[winner].card;
            let challenger = play.card;
            let beats = match (self.trump_order(best), self.trump_order(challenger)) {
                (0, 0) => challenger.suit() == best.suit() && challenger.eyes() > best.eyes(),
                (0, _) => true,
                (_, 0) => false,
                (best_order, challenger_order) => challenger_order > best_order,
            };
            if beats {
                winner = index;
            }
        }
        if self.second_hearts_ten_applies() && cards_played <= 36 && plays[winner].card == HEARTS_TEN
        {
            if let Some(later) = plays.iter().rposition(|play| play.card == HEARTS_TEN) {
                if later > winner {
                    winner = later;
                }
            }
        }
        winner
    }

    fn second_hearts_ten_applies(&self) -> bool {
        matches!(self, Contract::Normal | Contract::Marriage { .. })
    }

    /// Party of `seat` as deducible from the public history alone.
    pub fn observed_party(&self, seat: Seat, history: &[Action]) -> Party {
        match self {
            Contract::Normal => {
                for action in history {
                    if let Some(bid) = action.as_announcement() {
                        if bid.seat == seat {
                            return bid.party;
                        }
                    }
                    if action.seat() == seat && action.as_card() == Some(CLUBS_QUEEN) {
                        return Party::Re;
                    }
                }
                Party::Contra
            }
            Contract::Marriage { bride } => self.marriage_party(*bride, seat, history),
            Contract::Solo { soloist, .. } => {
                if seat == *soloist {
                    Party::Re
                } else {
                    Party::Contra
                }
            }
        }
    }

    /// The bride is Re. A non-bride seat joins Re by winning one of the
    /// first three tricks whose lead card is not trump; if no such trick
    /// appears the deal stays a silent solo.
    fn marriage_party(&self, bride: Seat, seat: Seat, history: &[Action]) -> Party {
        if seat == bride {
            return Party::Re;
        }
        let mut trick = Trick::new();
        let mut cards_played = 0;
        let mut tricks_resolved = 0;
        for action in history {
            let Some(card) = action.as_card() else {
                continue;
            };
            trick.push(action.seat(), card);
            cards_played += 1;
            if !trick.is_complete() {
                continue;
            }
            if tricks_resolved >= 3 {
                return Party::Contra;
            }
            let lead_is_trump = trick.lead().map(|lead| self.is_trump(lead)).unwrap_or(false);
            let winner = trick.plays()[self.find_winner(&trick, cards_played)].seat;
            if winner != bride && !lead_is_trump {
                return if winner == seat {
                    Party::Re
                } else {
                    Party::Contra
                };
            }
            tricks_resolved += 1;
            trick = Trick::new();
        }
        Party::Contra
    }

    /// Moves available to `seat` holding `hand` with `trick` on the table.
    ///
    /// A bid is offered while the seat's party has announced fewer than five
    /// times and the hand is still large enough; cards follow the lead when
    /// any conforming card exists, otherwise the whole hand is free.
    pub fn legal_actions(
        &self,
        seat: Seat,
        hand: &Hand,
        trick: &Trick,
        history: &[Action],
    ) -> LegalActions {
        let party = self.bidding_party(seat, hand, history);
        let bids = history
            .iter()
            .filter_map(Action::as_announcement)
            .filter(|bid| bid.party == party)
            .count() as i32;
        let announcement = if bids < MAX_BIDS && hand.len() as i32 > 10 - bids {
            Some(Announcement::new(party, seat))
        } else {
            None
        };

        let cards = match trick.lead() {
            None => hand.cards().to_vec(),
            Some(lead) => {
                let conforming: Vec<Card> = if self.is_trump(lead) {
                    hand.iter().copied().filter(|&c| self.is_trump(c)).collect()
                } else {
                    hand.iter()
                        .copied()
                        .filter(|&c| !self.is_trump(c) && c.suit() == lead.suit())
                        .collect()
                };
                if conforming.is_empty() {
                    hand.cards().to_vec()
                } else {
                    conforming
                }
            }
        };

        LegalActions {
            announcement,
            cards,
        }
    }

    /// Party a bid by `seat` would belong to. Normal and marriage games go
    /// by clubs-queen ownership of the reconstructed initial hand; solos go
    /// by the public party.
    fn bidding_party(&self, seat: Seat, hand: &Hand, history: &[Action]) -> Party {
        match self {
            Contract::Normal | Contract::Marriage { .. } => {
                let held_from_start = hand.contains(CLUBS_QUEEN)
                    || history
                        .iter()
                        .any(|a| a.seat() == seat && a.as_card() == Some(CLUBS_QUEEN));
                if held_from_start {
                    Party::Re
                } else {
                    Party::Contra
                }
            }
            Contract::Solo { .. } => self.observed_party(seat, history),
        }
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contract::Normal => f.write_str("normal"),
            Contract::Marriage { bride } => write!(f, "marriage({bride})"),
            Contract::Solo { soloist, kind } => write!(f, "{kind} solo({soloist})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Contract, LegalActions, SoloKind, CLUBS_QUEEN};
    use crate::model::action::Action;
    use crate::model::card::Card;
    use crate::model::face::Face;
    use crate::model::hand::Hand;
    use crate::model::party::{Announcement, Party};
    use crate::model::player::Seat;
    use crate::model::suit::Suit;
    use crate::model::trick::Trick;

    fn card(suit: Suit, face: Face) -> Card {
        Card::new(suit, face)
    }

    #[test]
    fn normal_trump_order_matches_the_fixed_list() {
        let contract = Contract::Normal;
        let expected = [
            card(Suit::Diamonds, Face::Nine),
            card(Suit::Diamonds, Face::King),
            card(Suit::Diamonds, Face::Ten),
            card(Suit::Diamonds, Face::Ace),
            card(Suit::Diamonds, Face::Jack),
            card(Suit::Hearts, Face::Jack),
            card(Suit::Spades, Face::Jack),
            card(Suit::Clubs, Face::Jack),
            card(Suit::Diamonds, Face::Queen),
            card(Suit::Hearts, Face::Queen),
            card(Suit::Spades, Face::Queen),
            card(Suit::Clubs, Face::Queen),
            card(Suit::Hearts, Face::Ten),
        ];
        for (i, c) in expected.iter().enumerate() {
            assert_eq!(contract.trump_order(*c), i as u8 + 1, "{c}");
        }
        assert!(!contract.is_trump(card(Suit::Spades, Face::Ace)));
        assert!(!contract.is_trump(card(Suit::Hearts, Face::Nine)));
    }

    #[test]
    fn queen_solo_has_exactly_four_trumps() {
        let contract = Contract::Solo {
            soloist: Seat::First,
            kind: SoloKind::Queen,
        };
        let trumps: Vec<Card> = (0..24)
            .filter_map(Card::from_id)
            .filter(|&c| contract.is_trump(c))
            .collect();
        assert_eq!(trumps.len(), 4);
        assert!(trumps.iter().all(|c| c.face() == Face::Queen));
        assert!(
            contract.trump_order(card(Suit::Clubs, Face::Queen))
                > contract.trump_order(card(Suit::Diamonds, Face::Queen))
        );
    }

    #[test]
    fn hearts_solo_keeps_hearts_ten_on_top() {
        let contract = Contract::Solo {
            soloist: Seat::First,
            kind: SoloKind::Hearts,
        };
        let ten = card(Suit::Hearts, Face::Ten);
        for id in 0..24 {
            let c = Card::from_id(id).expect("valid id");
            if contract.is_trump(c) && c != ten {
                assert!(contract.trump_order(c) < contract.trump_order(ten), "{c}");
            }
        }
        assert!(contract.is_trump(card(Suit::Clubs, Face::Jack)));
        assert!(!contract.is_trump(card(Suit::Spades, Face::Ace)));
    }

    #[test]
    fn led_suit_wins_by_eyes_when_no_trump_shows() {
        let contract = Contract::Normal;
        let mut trick = Trick::new();
        trick.push(Seat::First, card(Suit::Spades, Face::Ten));
        trick.push(Seat::Second, card(Suit::Spades, Face::Ace));
        trick.push(Seat::Third, card(Suit::Clubs, Face::Ace));
        trick.push(Seat::Fourth, card(Suit::Spades, Face::King));
        assert_eq!(contract.find_winner(&trick, 4), 1);
    }

    #[test]
    fn first_of_two_equal_cards_wins() {
        let contract = Contract::Normal;
        let mut trick = Trick::new();
        trick.push(Seat::First, card(Suit::Spades, Face::Ace));
        trick.push(Seat::Second, card(Suit::Spades, Face::Ace));
        trick.push(Seat::Third, card(Suit::Spades, Face::Nine));
        trick.push(Seat::Fourth, card(Suit::Spades, Face::King));
        assert_eq!(contract.find_winner(&trick, 4), 0);
    }

    #[test]
    fn trump_beats_the_led_suit() {
        let contract = Contract::Normal;
        let mut trick = Trick::new();
        trick.push(Seat::First, card(Suit::Clubs, Face::Ace));
        trick.push(Seat::Second, card(Suit::Diamonds, Face::Nine));
        trick.push(Seat::Third, card(Suit::Clubs, Face::Ten));
        trick.push(Seat::Fourth, card(Suit::Hearts, Face::Jack));
        assert_eq!(contract.find_winner(&trick, 4), 3);
    }

    #[test]
    fn second_hearts_ten_wins_early_in_the_deal() {
        let contract = Contract::Normal;
        let mut trick = Trick::new();
        trick.push(Seat::First, card(Suit::Hearts, Face::Ten));
        trick.push(Seat::Second, card(Suit::Diamonds, Face::Queen));
        trick.push(Seat::Third, card(Suit::Hearts, Face::Ten));
        trick.push(Seat::Fourth, card(Suit::Diamonds, Face::Nine));
        assert_eq!(contract.find_winner(&trick, 4), 2);
    }

    #[test]
    fn second_hearts_ten_loses_late_in_the_deal() {
        let contract = Contract::Normal;
        let mut trick = Trick::new();
        trick.push(Seat::First, card(Suit::Hearts, Face::Ten));
        trick.push(Seat::Second, card(Suit::Diamonds, Face::Queen));
        trick.push(Seat::Third, card(Suit::Hearts, Face::Ten));
        trick.push(Seat::Fourth, card(Suit::Diamonds, Face::Nine));
        assert_eq!(contract.find_winner(&trick, 40), 0);
    }

    #[test]
    fn solos_ignore_the_second_hearts_ten() {
        let contract = Contract::Solo {
            soloist: Seat::First,
            kind: SoloKind::Diamonds,
        };
        let mut trick = Trick::new();
        trick.push(Seat::First, card(Suit::Hearts, Face::Ten));
        trick.push(Seat::Second, card(Suit::Hearts, Face::Ten));
        trick.push(Seat::Third, card(Suit::Diamonds, Face::Nine));
        trick.push(Seat::Fourth, card(Suit::Hearts, Face::Nine));
        // Both tens are trump; the first one keeps the trick.
        assert_eq!(contract.find_winner(&trick, 4), 0);
    }

    #[test]
    fn clubs_queen_play_reveals_re() {
        let contract = Contract::Normal;
        let history = [
            Action::play(Seat::First, card(Suit::Spades, Face::Nine)),
            Action::play(Seat::Second, CLUBS_QUEEN),
        ];
        assert_eq!(contract.observed_party(Seat::Second, &history), Party::Re);
        assert_eq!(
            contract.observed_party(Seat::First, &history),
            Party::Contra
        );
    }

    #[test]
    fn announcement_reveals_party() {
        let contract = Contract::Normal;
        let history = [Action::from(Announcement::new(Party::Re, Seat::Fourth))];
        assert_eq!(contract.observed_party(Seat::Fourth, &history), Party::Re);
    }

    #[test]
    fn solo_parties_are_fixed() {
        let contract = Contract::Solo {
            soloist: Seat::Third,
            kind: SoloKind::Jack,
        };
        assert_eq!(contract.observed_party(Seat::Third, &[]), Party::Re);
        assert_eq!(contract.observed_party(Seat::First, &[]), Party::Contra);
    }

    #[test]
    fn marriage_partner_joins_by_winning_a_plain_trick() {
        let bride = Seat::First;
        let contract = Contract::Marriage { bride };
        // Spades lead, won by the third seat with the ace.
        let history = [
            Action::play(Seat::First, card(Suit::Spades, Face::Nine)),
            Action::play(Seat::Second, card(Suit::Spades, Face::King)),
            Action::play(Seat::Third, card(Suit::Spades, Face::Ace)),
            Action::play(Seat::Fourth, card(Suit::Spades, Face::Ten)),
        ];
        assert_eq!(contract.observed_party(Seat::Third, &history), Party::Re);
        assert_eq!(contract.observed_party(Seat::First, &history), Party::Re);
        assert_eq!(
            contract.observed_party(Seat::Second, &history),
            Party::Contra
        );
    }

    #[test]
    fn marriage_ignores_trump_led_tricks() {
        let bride = Seat::First;
        let contract = Contract::Marriage { bride };
        // Trump lead won by the second seat; no partner is determined.
        let history = [
            Action::play(Seat::First, card(Suit::Diamonds, Face::Nine)),
            Action::play(Seat::Second, card(Suit::Clubs, Face::Jack)),
            Action::play(Seat::Third, card(Suit::Diamonds, Face::King)),
            Action::play(Seat::Fourth, card(Suit::Diamonds, Face::Ten)),
        ];
        assert_eq!(
            contract.observed_party(Seat::Second, &history),
            Party::Contra
        );
    }

    #[test]
    fn follow_suit_restricts_cards() {
        let contract = Contract::Normal;
        let mut hand = Hand::new();
        hand.add(card(Suit::Spades, Face::King));
        hand.add(card(Suit::Clubs, Face::Ace));
        hand.add(card(Suit::Diamonds, Face::Jack));
        let mut trick = Trick::new();
        trick.push(Seat::First, card(Suit::Spades, Face::Nine));

        let legal = contract.legal_actions(Seat::Second, &hand, &trick, &[]);
        assert_eq!(legal.cards, vec![card(Suit::Spades, Face::King)]);
    }

    #[test]
    fn trump_lead_demands_trump() {
        let contract = Contract::Normal;
        let mut hand = Hand::new();
        hand.add(card(Suit::Spades, Face::King));
        hand.add(card(Suit::Hearts, Face::Queen));
        let mut trick = Trick::new();
        trick.push(Seat::First, card(Suit::Diamonds, Face::Ace));

        let legal = contract.legal_actions(Seat::Second, &hand, &trick, &[]);
        assert_eq!(legal.cards, vec![card(Suit::Hearts, Face::Queen)]);
    }

    #[test]
    fn hand_is_free_without_a_conforming_card() {
        let contract = Contract::Normal;
        let mut hand = Hand::new();
        hand.add(card(Suit::Clubs, Face::Nine));
        hand.add(card(Suit::Hearts, Face::King));
        let mut trick = Trick::new();
        trick.push(Seat::First, card(Suit::Spades, Face::Nine));

        let legal = contract.legal_actions(Seat::Second, &hand, &trick, &[]);
        assert_eq!(legal.cards.len(), 2);
    }

    #[test]
    fn empty_trick_frees_the_whole_hand() {
        let contract = Contract::Normal;
        let mut hand = Hand::new();
        hand.add(card(Suit::Clubs, Face::Nine));
        hand.add(card(Suit::Diamonds, Face::Queen));
        let legal = contract.legal_actions(Seat::First, &hand, &Trick::new(), &[]);
        assert_eq!(legal.cards.len(), 2);
    }

    #[test]
    fn announcement_requires_a_large_enough_hand() {
        let contract = Contract::Normal;
        let mut hand = Hand::new();
        for face in [Face::Nine, Face::King, Face::Ten, Face::Ace] {
            hand.add(card(Suit::Spades, face));
        }
        for face in [Face::Nine, Face::King, Face::Ten, Face::Ace] {
            hand.add(card(Suit::Hearts, face));
        }
        hand.add(card(Suit::Clubs, Face::Nine));
        hand.add(card(Suit::Clubs, Face::King));
        // Ten cards: no bid may be opened.
        let legal = contract.legal_actions(Seat::First, &hand, &Trick::new(), &[]);
        assert_eq!(legal.announcement, None);

        hand.add(card(Suit::Clubs, Face::Ten));
        let legal = contract.legal_actions(Seat::First, &hand, &Trick::new(), &[]);
        assert_eq!(
            legal.announcement,
            Some(Announcement::new(Party::Contra, Seat::First))
        );
    }

    #[test]
    fn each_prior_bid_buys_one_more_turn_to_raise() {
        let contract = Contract::Normal;
        let mut hand = Hand::new();
        for face in [Face::Nine, Face::King, Face::Ten, Face::Ace] {
            hand.add(card(Suit::Spades, face));
        }
        for face in [Face::Nine, Face::King, Face::Ten, Face::Ace] {
            hand.add(card(Suit::Clubs, face));
        }
        hand.add(card(Suit::Hearts, Face::Nine));
        hand.add(card(Suit::Hearts, Face::King));
        assert_eq!(hand.len(), 10);
        let history = [Action::from(Announcement::new(Party::Contra, Seat::First))];
        let legal = contract.legal_actions(Seat::First, &hand, &Trick::new(), &history);
        assert_eq!(
            legal.announcement,
            Some(Announcement::new(Party::Contra, Seat::First))
        );
    }

    #[test]
    fn bids_stop_at_five() {
        let contract = Contract::Normal;
        let mut hand = Hand::new();
        for id in 0..12 {
            hand.add(Card::from_id(id).expect("valid id"));
        }
        let history: Vec<Action> = (0..5)
            .map(|_| Action::from(Announcement::new(Party::Contra, Seat::First)))
            .collect();
        let legal: LegalActions =
            contract.legal_actions(Seat::First, &hand, &Trick::new(), &history);
        assert_eq!(legal.announcement, None);
    }

    #[test]
    fn specialization_ordinals_are_strictly_ordered() {
        let soloist = Seat::First;
        let contracts = [
            Contract::Normal,
            Contract::Marriage { bride: soloist },
            Contract::Solo { soloist, kind: SoloKind::Jack },
            Contract::Solo { soloist, kind: SoloKind::Queen },
            Contract::Solo { soloist, kind: SoloKind::Diamonds },
            Contract::Solo { soloist, kind: SoloKind::Hearts },
            Contract::Solo { soloist, kind: SoloKind::Spades },
            Contract::Solo { soloist, kind: SoloKind::Clubs },
        ];
        for pair in contracts.windows(2) {
            assert!(pair[0].ordinal() < pair[1].ordinal());
        }
    }
}
