//! Lobby session: keeps the merged server state, the observed action log,
//! and drives the two decision kernels when the server asks for a choice.

use crate::config::ClientOptions;
use crate::protocol::{self, Inbound};
use doko_bot::{ActionKernel, ContractKernel};
use doko_core::game::contract::Contract;
use doko_core::game::machine::SpecializedContract;
use doko_core::game::serialization::{hand_from_wire, WireCard};
use doko_core::model::action::Action;
use doko_core::model::hand::Hand;
use doko_core::model::player::Seat;
use serde_json::Value;
use std::sync::mpsc::Sender;

/// What the session loop reacts to: a frame from the server, a frame to
/// send (posted by kernel completions), or the end of input.
#[derive(Debug)]
pub enum Event {
    Inbound(String),
    Outbound(Value),
    Shutdown,
}

pub struct Session {
    options: ClientOptions,
    state: Value,
    observed: Vec<Action>,
    initial_hand: Option<Hand>,
    action_kernel: ActionKernel,
    contract_kernel: ContractKernel,
    pool: rayon::ThreadPool,
    events: Sender<Event>,
}

impl Session {
    pub fn new(options: ClientOptions, pool: rayon::ThreadPool, events: Sender<Event>) -> Self {
        let (action_kernel, contract_kernel) = match options.seed {
            Some(seed) => (
                ActionKernel::with_seed(options.action, seed),
                ContractKernel::with_seed(options.contract, seed ^ 0x5851_f42d_4c95_7f2d),
            ),
            None => (
                ActionKernel::new(options.action),
                ContractKernel::new(options.contract),
            ),
        };
        Self {
            options,
            state: Value::Null,
            observed: Vec::new(),
            initial_hand: None,
            action_kernel,
            contract_kernel,
            pool,
            events,
        }
    }

    /// Processes one event and returns the frames to write out, in order.
    pub fn handle(&mut self, event: Event) -> Vec<String> {
        match event {
            Event::Outbound(frame) => vec![frame.to_string()],
            Event::Shutdown => Vec::new(),
            Event::Inbound(raw) => {
                let inbound = match protocol::parse_inbound(&raw) {
                    Ok(inbound) => inbound,
                    Err(error) => {
                        // Drop the frame, keep the session.
                        tracing::warn!("ignoring inbound frame: {error}");
                        return Vec::new();
                    }
                };
                let mut out = Vec::new();
                match inbound {
                    Inbound::StatePatch(patch) => protocol::merge_patch(&mut self.state, patch),
                    Inbound::ServerError(frame) => {
                        tracing::warn!("server reported an error: {frame}");
                    }
                    Inbound::Observe(action) => {
                        tracing::info!("observed {action}");
                        self.observed.push(action);
                    }
                    Inbound::Declare => self.on_declare(),
                    Inbound::Specialize => out.extend(self.on_specialize()),
                    Inbound::Play => self.on_play(),
                }
                self.lobby_upkeep(&mut out);
                out.into_iter().map(|frame| frame.to_string()).collect()
            }
        }
    }

    /// Creates, joins, and takes a seat at the configured table as the
    /// lobby state allows.
    fn lobby_upkeep(&self, out: &mut Vec<Value>) {
        let Some(tables) = self.state.get("tables") else {
            return;
        };
        let joined = self.state.get("joined_table");
        if joined.is_none_or(Value::is_null) {
            let name = self.options.table_name.as_str();
            let exists = tables.as_array().is_some_and(|tables| {
                tables
                    .iter()
                    .any(|table| table.get("name").and_then(Value::as_str) == Some(name))
            });
            out.push(if exists {
                protocol::join_table(name)
            } else {
                protocol::create_table(name)
            });
        } else if joined
            .and_then(|table| table.get("player_id"))
            .is_none_or(Value::is_null)
        {
            let players = joined
                .and_then(|table| table.get("players"))
                .and_then(Value::as_array);
            match players.and_then(|players| players.iter().position(Value::is_null)) {
                Some(seat) => out.push(protocol::take_seat(seat)),
                None => tracing::warn!("no seat left to take"),
            }
        }
    }

    fn my_seat(&self) -> Option<Seat> {
        self.state
            .get("joined_table")
            .and_then(|table| table.get("player_id"))
            .and_then(Value::as_u64)
            .and_then(|index| Seat::from_index(index as usize))
    }

    /// A new deal starts: remember the dealt hand, reset the action log,
    /// and evaluate the candidate contracts.
    fn on_declare(&mut self) {
        let Some(seat) = self.my_seat() else {
            tracing::warn!("asked to declare without a seat");
            return;
        };
        let game = &self.state["joined_table"]["game"];
        let Some(leader) = game
            .get("initial_player")
            .and_then(Value::as_u64)
            .and_then(|index| Seat::from_index(index as usize))
        else {
            tracing::warn!("asked to declare without an initial player");
            return;
        };
        let hand = match serde_json::from_value::<Vec<WireCard>>(game["hand"].clone()) {
            Ok(cards) => hand_from_wire(&cards),
            Err(error) => {
                tracing::warn!("asked to declare without a readable hand: {error}");
                return;
            }
        };
        self.initial_hand = Some(hand.clone());
        self.observed.clear();
        let events = self.events.clone();
        let started = self
            .contract_kernel
            .async_rollout(&self.pool, leader, seat, hand, move |result| match result {
                Ok(declared) => {
                    let frame = protocol::choose_declared(&declared);
                    let _ = events.send(Event::Outbound(frame));
                }
                Err(error) => tracing::warn!("contract evaluation ended: {error}"),
            });
        if let Err(error) = started {
            tracing::warn!("contract kernel busy: {error}");
        }
    }

    /// The contract evaluation already ran at declare time; submit its
    /// published winner.
    fn on_specialize(&mut self) -> Option<Value> {
        let seat = self.my_seat()?;
        match self.contract_kernel.best_contract() {
            Some(rules) => Some(protocol::choose_specialized(&SpecializedContract {
                seat,
                rules,
            })),
            None => {
                tracing::warn!("asked to specialize without an evaluated contract");
                None
            }
        }
    }

    fn on_play(&mut self) {
        let Some(hand) = self.initial_hand.clone() else {
            tracing::warn!("asked to play without a dealt hand");
            return;
        };
        let contract = match serde_json::from_value::<Contract>(
            self.state["joined_table"]["game"]["rules"].clone(),
        ) {
            Ok(contract) => contract,
            Err(error) => {
                tracing::warn!("asked to play without readable rules: {error}");
                return;
            }
        };
        let leader = self
            .observed
            .iter()
            .find(|action| action.is_card())
            .map(Action::seat)
            .or_else(|| self.my_seat());
        let Some(leader) = leader else {
            tracing::warn!("asked to play without a seat");
            return;
        };
        let events = self.events.clone();
        let started = self.action_kernel.async_rollout(
            &self.pool,
            contract,
            leader,
            hand,
            self.observed.clone(),
            move |result| match result {
                Ok(stats) => match stats.best_action() {
                    Some(action) => {
                        let _ = events.send(Event::Outbound(protocol::play(&action)));
                    }
                    None => tracing::warn!("search produced no playable action"),
                },
                Err(error) => tracing::warn!("action search ended: {error}"),
            },
        );
        if let Err(error) = started {
            tracing::warn!("action kernel busy: {error}");
        }
    }
}
