use super::stats::AccumulatedStats;
use super::{Executor, KernelError};
use crate::search::{UctConfig, UctTree};
use doko_core::belief::DealConstraints;
use doko_core::game::contract::{Contract, SoloKind};
use doko_core::game::machine::{DeclaredContract, Healthiness, InitialState};
use doko_core::model::card::Card;
use doko_core::model::face::Face;
use doko_core::model::hand::Hand;
use doko_core::model::player::Seat;
use doko_core::model::suit::Suit;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

const CLUBS_QUEEN: Card = Card::new(Suit::Clubs, Face::Queen);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContractKernelOptions {
    /// Determinizations per candidate contract.
    pub n_trees: usize,
    /// Rollouts per determinization.
    pub n_rollouts: usize,
    /// Rollouts between cancellation checks.
    pub batch_size: usize,
    pub uct: UctConfig,
}

impl Default for ContractKernelOptions {
    fn default() -> Self {
        Self {
            n_trees: 100,
            n_rollouts: 5_000,
            batch_size: 100,
            uct: UctConfig::default(),
        }
    }
}

/// Evaluates every contract the agent could declare on its dealt hand and
/// keeps the one with the highest expected tournament score.
pub struct ContractKernel {
    inner: Arc<Inner>,
}

struct Inner {
    options: ContractKernelOptions,
    running: AtomicBool,
    tree: Mutex<UctTree>,
    rng: Mutex<SmallRng>,
    best: Mutex<Option<Contract>>,
}

impl ContractKernel {
    pub fn new(options: ContractKernelOptions) -> Self {
        Self::with_rng(options, SmallRng::from_entropy())
    }

    /// A fixed seed reproduces the whole computation.
    pub fn with_seed(options: ContractKernelOptions, seed: u64) -> Self {
        Self::with_rng(options, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(options: ContractKernelOptions, rng: SmallRng) -> Self {
        let tree = UctTree::new(
            InitialState::new(Seat::First, std::array::from_fn(|_| Hand::new())),
            &[],
            options.uct,
        );
        Self {
            inner: Arc::new(Inner {
                options,
                running: AtomicBool::new(false),
                tree: Mutex::new(tree),
                rng: Mutex::new(rng),
                best: Mutex::new(None),
            }),
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::Acquire)
    }

    /// Signals the worker to stop between batches. Returns whether a
    /// computation was running.
    pub fn cancel(&self) -> bool {
        self.inner
            .running
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// The winning contract of the last completed evaluation. Unavailable
    /// while a computation is in flight.
    pub fn best_contract(&self) -> Option<Contract> {
        if self.is_running() {
            return None;
        }
        *self.inner.best.lock().expect("kernel best lock")
    }

    /// Posts one declaration computation over all candidate contracts for
    /// the agent at `seat` holding `hand`; `leader` leads non-solo deals.
    /// The delivered declaration is healthy iff the normal game won.
    pub fn async_rollout<E, F>(
        &self,
        executor: &E,
        leader: Seat,
        seat: Seat,
        hand: Hand,
        on_done: F,
    ) -> Result<(), KernelError>
    where
        E: Executor + ?Sized,
        F: FnOnce(Result<DeclaredContract, KernelError>) + Send + 'static,
    {
        if self
            .inner
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(KernelError::AlreadyRunning);
        }
        let inner = Arc::clone(&self.inner);
        executor.post(Box::new(move || {
            let result = inner.run(leader, seat, &hand);
            on_done(result);
            inner.running.store(false, Ordering::Release);
        }));
        Ok(())
    }
}

impl Inner {
    fn candidates(&self, seat: Seat, hand: &Hand) -> Vec<Contract> {
        let mut candidates = vec![Contract::Normal];
        if hand.count(CLUBS_QUEEN) == 2 {
            candidates.push(Contract::Marriage { bride: seat });
        }
        for kind in SoloKind::ALL {
            candidates.push(Contract::Solo {
                soloist: seat,
                kind,
            });
        }
        candidates
    }

    fn run(&self, leader: Seat, seat: Seat, hand: &Hand) -> Result<DeclaredContract, KernelError> {
        let mut rng = self.rng.lock().expect("kernel rng lock");
        let mut tree = self.tree.lock().expect("kernel tree lock");
        let mut best: Option<(Contract, f64)> = None;
        for contract in self.candidates(seat, hand) {
            let constraints = DealConstraints::from_observations(&contract, seat, hand, &[]);
            let mut stats = AccumulatedStats::default();
            for _ in 0..self.options.n_trees {
                let determinization = match constraints.sample(&mut *rng) {
                    Ok(determinization) => determinization,
                    Err(error) => {
                        tracing::error!("deal sampling failed: {error}");
                        return Err(KernelError::Aborted);
                    }
                };
                tree.reset(
                    InitialState::new(contract.leader(leader), determinization.into_hands()),
                    &[],
                );
                let mut iterations = 0;
                while iterations < self.options.n_rollouts {
                    if !self.running.load(Ordering::Acquire) {
                        return Err(KernelError::Aborted);
                    }
                    let batch = self
                        .options
                        .batch_size
                        .min(self.options.n_rollouts - iterations);
                    for _ in 0..batch {
                        tree.rollout_once(&mut *rng, &contract);
                    }
                    iterations += batch;
                }
                stats.record(&tree);
            }
            let Some(slot) = stats.best_slot() else {
                continue;
            };
            let expected = stats.expected_score(slot, seat);
            tracing::debug!("{contract}: expected score {expected:+.3}");
            if best.map(|(_, score)| expected > score).unwrap_or(true) {
                best = Some((contract, expected));
            }
        }
        let (contract, _) = best.expect("at least the normal game is evaluated");
        *self.best.lock().expect("kernel best lock") = Some(contract);
        let health = if contract == Contract::Normal {
            Healthiness::Healthy
        } else {
            Healthiness::Reservation
        };
        Ok(DeclaredContract { seat, health })
    }
}
