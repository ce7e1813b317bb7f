use crate::game::contract::Contract;
use crate::model::action::Action;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::trick::Trick;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A player's opening choice: accept normal play or ask for a special
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Healthiness {
    Healthy,
    Reservation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredContract {
    #[serde(rename = "player")]
    pub seat: Seat,
    pub health: Healthiness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecializedContract {
    #[serde(rename = "player")]
    pub seat: Seat,
    pub rules: Contract,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineError {
    InvalidState(&'static str),
    NotNextPlayer(Seat),
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineError::InvalidState(operation) => {
                write!(f, "{operation} called in the wrong phase")
            }
            MachineError::NotNextPlayer(seat) => {
                write!(f, "{seat} is not the player to act")
            }
        }
    }
}

impl std::error::Error for MachineError {}

/// The concrete dealt position a deal starts from.
#[derive(Debug, Clone)]
pub struct InitialState {
    pub leader: Seat,
    pub hands: [Hand; 4],
}

impl InitialState {
    pub fn new(leader: Seat, hands: [Hand; 4]) -> Self {
        Self { leader, hands }
    }
}

/// Table state while cards are being played: whose turn it is, the
/// residual hands, and the open trick.
#[derive(Debug, Clone)]
pub struct RunningState {
    turn: Seat,
    hands: [Hand; 4],
    trick: Trick,
    cards_played: usize,
}

impl RunningState {
    pub fn new(leader: Seat, hands: [Hand; 4]) -> Self {
        Self {
            turn: leader,
            hands,
            trick: Trick::new(),
            cards_played: 0,
        }
    }

    /// Rebuilds the running state reached by applying `history` to the
    /// initial position.
    pub fn replay(contract: &Contract, initial: &InitialState, history: &[Action]) -> Self {
        let mut state = Self::new(initial.leader, initial.hands.clone());
        for action in history {
            state.apply(contract, action);
        }
        state
    }

    pub fn turn(&self) -> Seat {
        self.turn
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn trick(&self) -> &Trick {
        &self.trick
    }

    pub fn cards_played(&self) -> usize {
        self.cards_played
    }

    pub fn is_finished(&self) -> bool {
        self.hands.iter().all(Hand::is_empty)
    }

    /// Advances the table by one action. Cards leave the owner's hand and
    /// enter the trick; a completed trick passes the lead to its winner.
    /// Announcements leave the turn untouched.
    pub fn apply(&mut self, contract: &Contract, action: &Action) {
        let Some(card) = action.as_card() else {
            return;
        };
        let seat = action.seat();
        let removed = self.hands[seat.index()].remove(card);
        debug_assert!(removed, "{card} was not in {seat}'s hand");
        self.trick.push(seat, card);
        self.cards_played += 1;
        if self.trick.is_complete() {
            let winner_index = contract.find_winner(&self.trick, self.cards_played);
            self.turn = self.trick.plays()[winner_index].seat;
            self.trick = Trick::new();
        } else {
            self.turn = seat.next();
        }
    }
}

/// Seat to act after `history`, starting from `leader`, without tracking
/// any hand contents.
pub fn turn_after(contract: &Contract, leader: Seat, history: &[Action]) -> Seat {
    let mut turn = leader;
    let mut trick = Trick::new();
    let mut cards_played = 0usize;
    for action in history {
        let Some(card) = action.as_card() else {
            continue;
        };
        trick.push(action.seat(), card);
        cards_played += 1;
        if trick.is_complete() {
            turn = trick.plays()[contract.find_winner(&trick, cards_played)].seat;
            trick = Trick::new();
        } else {
            turn = action.seat().next();
        }
    }
    turn
}

/// Phase of a deal from contract declaration to the final score.
#[derive(Debug, Clone)]
pub enum Phase {
    Declaring(Declaring),
    Specializing(Specializing),
    Running(Running),
    Scored(Scored),
}

#[derive(Debug, Clone)]
pub struct Declaring {
    pub turn: Seat,
    pub hands: [Hand; 4],
    pub choices: [Option<Healthiness>; 4],
}

#[derive(Debug, Clone)]
pub struct Specializing {
    pub turn: Seat,
    pub hands: [Hand; 4],
    pub choices: [Option<Contract>; 4],
}

#[derive(Debug, Clone)]
pub struct Running {
    pub contract: Contract,
    pub state: RunningState,
    pub history: Vec<Action>,
}

#[derive(Debug, Clone)]
pub struct Scored {
    pub eyes: [i32; 4],
    pub scores: [i32; 4],
    pub history: Vec<Action>,
}

/// Drives one deal through declare, specialize, running, and score, and
/// rotates the dealer into the next deal.
#[derive(Debug, Clone)]
pub struct GameMachine {
    dealer: Seat,
    phase: Phase,
}

impl GameMachine {
    pub fn new(dealer: Seat, hands: [Hand; 4]) -> Self {
        Self {
            dealer,
            phase: Phase::Declaring(Declaring {
                turn: dealer,
                hands,
                choices: [None; 4],
            }),
        }
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Records a healthy/reservation choice. Once all four are in, an
    /// all-healthy table starts a normal game; otherwise the reservers
    /// pick concrete contracts next.
    pub fn declare(&mut self, declared: DeclaredContract) -> Result<(), MachineError> {
        let Phase::Declaring(declaring) = &mut self.phase else {
            return Err(MachineError::InvalidState("declare"));
        };
        if declaring.turn != declared.seat {
            return Err(MachineError::NotNextPlayer(declared.seat));
        }
        declaring.choices[declared.seat.index()] = Some(declared.health);
        declaring.turn = declared.seat.next();
        if declaring.choices[declaring.turn.index()].is_none() {
            return Ok(());
        }
        let leader = declaring.turn;
        let hands = declaring.hands.clone();
        let declared_choices = declaring.choices;
        let all_healthy = declared_choices
            .iter()
            .all(|choice| *choice == Some(Healthiness::Healthy));
        if all_healthy {
            self.phase = Phase::Running(Running {
                contract: Contract::Normal,
                state: RunningState::new(leader, hands),
                history: Vec::new(),
            });
        } else {
            let choices: [Option<Contract>; 4] = std::array::from_fn(|seat| {
                (declared_choices[seat] == Some(Healthiness::Healthy)).then_some(Contract::Normal)
            });
            let mut turn = leader;
            while choices[turn.index()].is_some() {
                turn = turn.next();
            }
            self.phase = Phase::Specializing(Specializing {
                turn,
                hands,
                choices,
            });
        }
        Ok(())
    }

    /// Records a reserver's concrete contract. Once every seat has one, the
    /// highest-ranked contract is played; the soloist leads a solo, the
    /// dealer leads anything else and the deal passes on.
    pub fn specialize(&mut self, specialized: SpecializedContract) -> Result<(), MachineError> {
        let Phase::Specializing(specializing) = &mut self.phase else {
            return Err(MachineError::InvalidState("specialize"));
        };
        let mut next = specializing.turn;
        while specializing.choices[next.index()].is_some() {
            next = next.next();
        }
        if next != specialized.seat {
            return Err(MachineError::NotNextPlayer(specialized.seat));
        }
        specializing.choices[next.index()] = Some(specialized.rules);
        if specializing.choices.iter().any(Option::is_none) {
            specializing.turn = next.next();
            return Ok(());
        }
        let mut winning = Contract::Normal;
        for choice in specializing.choices.iter().flatten() {
            if choice.ordinal() > winning.ordinal() {
                winning = *choice;
            }
        }
        let hands = specializing.hands.clone();
        let leader = winning.leader(self.dealer);
        if !matches!(winning, Contract::Solo { .. }) {
            self.dealer = self.dealer.next();
        }
        self.phase = Phase::Running(Running {
            contract: winning,
            state: RunningState::new(leader, hands),
            history: Vec::new(),
        });
        Ok(())
    }

    /// Applies one action of the running deal. When the last card falls the
    /// machine computes eyes and scores and enters the score phase.
    pub fn play(&mut self, action: Action) -> Result<(), MachineError> {
        let Phase::Running(running) = &mut self.phase else {
            return Err(MachineError::InvalidState("play"));
        };
        if action.is_card() && running.state.turn() != action.seat() {
            return Err(MachineError::NotNextPlayer(action.seat()));
        }
        running.state.apply(&running.contract, &action);
        running.history.push(action);
        if running.state.is_finished() {
            let score_state = running.contract.score_state(&running.history);
            let eyes = std::array::from_fn(|seat| {
                score_state.eyes_for(Seat::from_index(seat).expect("seat index in range"))
            });
            let scores = score_state.scores();
            let history = std::mem::take(&mut running.history);
            self.phase = Phase::Scored(Scored {
                eyes,
                scores,
                history,
            });
        }
        Ok(())
    }

    /// Leaves the score phase and deals the next hand.
    pub fn next_deal(&mut self, hands: [Hand; 4]) -> Result<(), MachineError> {
        let Phase::Scored(_) = &self.phase else {
            return Err(MachineError::InvalidState("next_deal"));
        };
        self.phase = Phase::Declaring(Declaring {
            turn: self.dealer,
            hands,
            choices: [None; 4],
        });
        Ok(())
    }
}
