use doko_core::game::contract::Contract;
use doko_core::game::machine::{InitialState, RunningState};
use doko_core::model::action::Action;
use doko_core::model::player::Seat;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UctConfig {
    /// UCB1 exploration constant.
    pub exploration: f64,
}

impl Default for UctConfig {
    fn default() -> Self {
        Self { exploration: 4.0 }
    }
}

/// Monte-Carlo search tree over one determinization of a deal.
///
/// Nodes live in a growable struct-of-arrays arena; node 0 is a synthetic
/// root carrying no action. Parent links point back up the tree, child
/// lists forward, so the selection path walks contiguous arrays.
#[derive(Debug)]
pub struct UctTree {
    config: UctConfig,
    initial: InitialState,
    past_actions: Vec<Action>,
    actions: Vec<Option<Action>>,
    parents: Vec<usize>,
    children: Vec<Vec<usize>>,
    visits: Vec<u64>,
    eyes: Vec<[f64; 4]>,
    scores: Vec<[f64; 4]>,
}

impl UctTree {
    pub fn new(initial: InitialState, past_actions: &[Action], config: UctConfig) -> Self {
        let mut tree = Self {
            config,
            initial,
            past_actions: past_actions.to_vec(),
            actions: Vec::new(),
            parents: Vec::new(),
            children: Vec::new(),
            visits: Vec::new(),
            eyes: Vec::new(),
            scores: Vec::new(),
        };
        tree.seed_root();
        tree
    }

    /// Empties the arena and re-roots the tree on a new determinization.
    pub fn reset(&mut self, initial: InitialState, past_actions: &[Action]) {
        self.initial = initial;
        self.past_actions.clear();
        self.past_actions.extend_from_slice(past_actions);
        self.actions.clear();
        self.parents.clear();
        self.children.clear();
        self.visits.clear();
        self.eyes.clear();
        self.scores.clear();
        self.seed_root();
    }

    fn seed_root(&mut self) {
        self.actions.push(None);
        self.parents.push(0);
        self.children.push(Vec::new());
        self.visits.push(0);
        self.eyes.push([0.0; 4]);
        self.scores.push([0.0; 4]);
    }

    pub fn node_count(&self) -> usize {
        self.actions.len()
    }

    pub fn action(&self, node: usize) -> Option<Action> {
        self.actions[node]
    }

    pub fn parent(&self, node: usize) -> usize {
        self.parents[node]
    }

    pub fn children(&self, node: usize) -> &[usize] {
        &self.children[node]
    }

    pub fn visits(&self, node: usize) -> u64 {
        self.visits[node]
    }

    pub fn eyes(&self, node: usize) -> &[f64; 4] {
        &self.eyes[node]
    }

    pub fn scores(&self, node: usize) -> &[f64; 4] {
        &self.scores[node]
    }

    pub fn expected_eyes(&self, node: usize, seat: Seat) -> f64 {
        self.eyes[node][seat.index()] / self.visits[node] as f64
    }

    pub fn expected_score(&self, node: usize, seat: Seat) -> f64 {
        self.scores[node][seat.index()] / self.visits[node] as f64
    }

    /// One select/expand/simulate/backpropagate pass.
    pub fn rollout_once<R: Rng + ?Sized>(&mut self, rng: &mut R, contract: &Contract) {
        let mut history = self.past_actions.clone();
        let mut state = RunningState::replay(contract, &self.initial, &history);

        // Select: descend by UCB1 until a leaf, replaying each chosen action.
        let mut selected = 0usize;
        while !self.children[selected].is_empty() {
            let parent_visits = self.visits[selected] as f64;
            let mut best = self.children[selected][0];
            let mut best_weight = f64::NEG_INFINITY;
            for &child in &self.children[selected] {
                let weight = if self.visits[child] == 0 {
                    f64::INFINITY
                } else {
                    let seat = self.actions[child]
                        .expect("child nodes carry actions")
                        .seat();
                    let exploit =
                        self.expected_eyes(child, seat) / 240.0 + self.expected_score(child, seat);
                    let explore = (parent_visits.ln() / self.visits[child] as f64).sqrt();
                    exploit + self.config.exploration * explore
                };
                if weight > best_weight {
                    best_weight = weight;
                    best = child;
                }
            }
            selected = best;
            let action = self.actions[selected].expect("child nodes carry actions");
            state.apply(contract, &action);
            history.push(action);
        }

        // Expand: one child per legal card action. Bids stay out of the
        // tree to keep the branching factor bounded.
        let turn = state.turn();
        if !state.hand(turn).is_empty() {
            let legal = contract.legal_actions(turn, state.hand(turn), state.trick(), &history);
            for card in legal.cards {
                let node = self.actions.len();
                self.actions.push(Some(Action::play(turn, card)));
                self.parents.push(selected);
                self.children.push(Vec::new());
                self.visits.push(0);
                self.eyes.push([0.0; 4]);
                self.scores.push([0.0; 4]);
                self.children[selected].push(node);
            }
        }

        // Simulate: uniformly random legal cards to the end of the deal.
        let mut playout = state;
        loop {
            let turn = playout.turn();
            if playout.hand(turn).is_empty() {
                break;
            }
            let legal = contract.legal_actions(turn, playout.hand(turn), playout.trick(), &history);
            let card = legal.cards[rng.gen_range(0..legal.cards.len())];
            let action = Action::play(turn, card);
            playout.apply(contract, &action);
            history.push(action);
        }

        // Backpropagate along the selected path, root included.
        let score_state = contract.score_state(&history);
        let scores = score_state.scores();
        let eyes: [i32; 4] =
            std::array::from_fn(|seat| score_state.eyes[score_state.seat_to_party[seat].index()]);
        let mut node = selected;
        loop {
            self.visits[node] += 1;
            for seat in 0..4 {
                self.scores[node][seat] += scores[seat] as f64;
                self.eyes[node][seat] += eyes[seat] as f64;
            }
            if node == 0 {
                break;
            }
            node = self.parents[node];
        }
    }
}
