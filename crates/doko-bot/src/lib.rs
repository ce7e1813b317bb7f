#![deny(warnings)]
pub mod kernel;
pub mod search;

pub use kernel::{
    ActionKernel, ActionKernelOptions, AccumulatedStats, ContractKernel, ContractKernelOptions,
    Executor, InlineExecutor, KernelError,
};
pub use search::{UctConfig, UctTree};
