mod action;
mod contract;
mod stats;

pub use action::{ActionKernel, ActionKernelOptions};
pub use contract::{ContractKernel, ContractKernelOptions};
pub use stats::AccumulatedStats;

use core::fmt;

/// Where kernel work is posted. The caller returns immediately; completion
/// arrives through the kernel's callback on the worker thread.
pub trait Executor {
    fn post(&self, task: Box<dyn FnOnce() + Send + 'static>);
}

impl Executor for rayon::ThreadPool {
    fn post(&self, task: Box<dyn FnOnce() + Send + 'static>) {
        self.spawn(move || task());
    }
}

/// Runs posted work on the calling thread; completion happens before
/// `post` returns. Useful for tests and synchronous embedding.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    fn post(&self, task: Box<dyn FnOnce() + Send + 'static>) {
        task();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// The kernel already has an outstanding computation.
    AlreadyRunning,
    /// The computation observed a cancellation between rollout batches.
    Aborted,
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::AlreadyRunning => f.write_str("computation already running"),
            KernelError::Aborted => f.write_str("computation aborted"),
        }
    }
}

impl std::error::Error for KernelError {}
