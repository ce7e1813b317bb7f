use super::stats::AccumulatedStats;
use super::{Executor, KernelError};
use crate::search::{UctConfig, UctTree};
use doko_core::belief::DealConstraints;
use doko_core::game::contract::Contract;
use doko_core::game::machine::{turn_after, InitialState};
use doko_core::model::action::Action;
use doko_core::model::hand::Hand;
use doko_core::model::player::Seat;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionKernelOptions {
    /// Determinizations per decision.
    pub n_trees: usize,
    /// Rollouts per determinization.
    pub n_rollouts: usize,
    /// Rollouts between cancellation checks.
    pub batch_size: usize,
    pub uct: UctConfig,
}

impl Default for ActionKernelOptions {
    fn default() -> Self {
        Self {
            n_trees: 100,
            n_rollouts: 10_000,
            batch_size: 100,
            uct: UctConfig::default(),
        }
    }
}

/// Picks the next action of a running deal by IS-MCTS: sample opponent
/// hands, search each sample, choose the most-visited root child.
///
/// At most one computation is outstanding per kernel; starts, finishes,
/// and cancellations hand the running flag around with compare-exchange.
pub struct ActionKernel {
    inner: Arc<Inner>,
}

struct Inner {
    options: ActionKernelOptions,
    running: AtomicBool,
    tree: Mutex<UctTree>,
    rng: Mutex<SmallRng>,
}

impl ActionKernel {
    pub fn new(options: ActionKernelOptions) -> Self {
        Self::with_rng(options, SmallRng::from_entropy())
    }

    /// A fixed seed reproduces the whole computation.
    pub fn with_seed(options: ActionKernelOptions, seed: u64) -> Self {
        Self::with_rng(options, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(options: ActionKernelOptions, rng: SmallRng) -> Self {
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

    /// Posts one decision computation: `n_trees` determinizations of
    /// `n_rollouts` rollouts each, statistics merged per root action.
    /// `hand` is the agent's dealt hand; `history` every action observed
    /// so far; `leader` the seat that led the deal.
    pub fn async_rollout<E, F>(
        &self,
        executor: &E,
        contract: Contract,
        leader: Seat,
        hand: Hand,
        history: Vec<Action>,
        on_done: F,
    ) -> Result<(), KernelError>
    where
        E: Executor + ?Sized,
        F: FnOnce(Result<AccumulatedStats, KernelError>) + Send + 'static,
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
            let result = inner.run(&contract, leader, &hand, &history);
            on_done(result);
            inner.running.store(false, Ordering::Release);
        }));
        Ok(())
    }
}

impl Inner {
    fn run(
        &self,
        contract: &Contract,
        leader: Seat,
        hand: &Hand,
        history: &[Action],
    ) -> Result<AccumulatedStats, KernelError> {
        let seat = turn_after(contract, leader, history);
        let constraints = DealConstraints::from_observations(contract, seat, hand, history);
        let mut rng = self.rng.lock().expect("kernel rng lock");
        let mut tree = self.tree.lock().expect("kernel tree lock");
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
                InitialState::new(leader, determinization.into_hands()),
                history,
            );
            let mut iterations = 0;
            while iterations < self.options.n_rollouts {
                if !self.running.load(Ordering::Acquire) {
                    return Err(KernelError::Aborted);
                }
                let batch = self.options.batch_size.min(self.options.n_rollouts - iterations);
                for _ in 0..batch {
                    tree.rollout_once(&mut *rng, contract);
                }
                iterations += batch;
            }
            stats.record(&tree);
        }
        tracing::debug!("action statistics for {seat}:");
        stats.log_summary(seat);
        Ok(stats)
    }
}
