use crate::search::UctTree;
use doko_core::model::action::Action;
use doko_core::model::player::Seat;

/// Root-child statistics merged over every determinization of a kernel
/// run, keyed by action.
#[derive(Debug, Clone, Default)]
pub struct AccumulatedStats {
    actions: Vec<Action>,
    visits: Vec<u64>,
    eyes: Vec<[f64; 4]>,
    scores: Vec<[f64; 4]>,
}

impl AccumulatedStats {
    /// Merges the root children of a finished tree into the accumulator.
    pub fn record(&mut self, tree: &UctTree) {
        for &child in tree.children(0) {
            let action = tree.action(child).expect("root children carry actions");
            let slot = match self.actions.iter().position(|&known| known == action) {
                Some(slot) => slot,
                None => {
                    self.actions.push(action);
                    self.visits.push(0);
                    self.eyes.push([0.0; 4]);
                    self.scores.push([0.0; 4]);
                    self.actions.len() - 1
                }
            };
            self.visits[slot] += tree.visits(child);
            for seat in 0..4 {
                self.eyes[slot][seat] += tree.eyes(child)[seat];
                self.scores[slot][seat] += tree.scores(child)[seat];
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn visits(&self) -> &[u64] {
        &self.visits
    }

    /// The most-visited action, the kernel's choice.
    pub fn best_action(&self) -> Option<Action> {
        let slot = self.best_slot()?;
        Some(self.actions[slot])
    }

    pub(crate) fn best_slot(&self) -> Option<usize> {
        (0..self.actions.len()).max_by_key(|&slot| self.visits[slot])
    }

    /// Mean score of `seat` at the action's node.
    pub fn expected_score(&self, slot: usize, seat: Seat) -> f64 {
        self.scores[slot][seat.index()] / self.visits[slot] as f64
    }

    /// Mean eyes of `seat` at the action's node.
    pub fn expected_eyes(&self, slot: usize, seat: Seat) -> f64 {
        self.eyes[slot][seat.index()] / self.visits[slot] as f64
    }

    /// Logs one line per candidate, best first marked with an arrow.
    pub(crate) fn log_summary(&self, seat: Seat) {
        let best = self.best_slot();
        for slot in 0..self.actions.len() {
            let marker = if Some(slot) == best { "=>" } else { "  " };
            tracing::debug!(
                "{marker} {}: visits={} eyes={:.1} score={:+.3}",
                self.actions[slot],
                self.visits[slot],
                self.expected_eyes(slot, seat),
                self.expected_score(slot, seat),
            );
        }
    }
}
