use clap::Parser;
use doko_bot::{ActionKernelOptions, ContractKernelOptions, UctConfig};
use thiserror::Error;

/// Doppelkopf lobby client: joins a table and plays with IS-MCTS kernels.
#[derive(Debug, Parser)]
#[command(name = "doko-client", version, about = "IS-MCTS Doppelkopf agent")]
pub struct Cli {
    /// Lobby table to create or join.
    #[arg(long, value_name = "NAME", default_value = "doko")]
    pub table_name: String,

    /// Determinizations per action decision.
    #[arg(long, value_name = "N", default_value_t = 100)]
    pub action_trees: usize,

    /// Rollouts per determinization of an action decision.
    #[arg(long, value_name = "N", default_value_t = 10_000)]
    pub action_rollouts: usize,

    /// Determinizations per candidate contract.
    #[arg(long, value_name = "N", default_value_t = 100)]
    pub contract_trees: usize,

    /// Rollouts per determinization of a contract evaluation.
    #[arg(long, value_name = "N", default_value_t = 5_000)]
    pub contract_rollouts: usize,

    /// Rollouts between cancellation checks.
    #[arg(long, value_name = "N", default_value_t = 100)]
    pub batch_size: usize,

    /// UCB1 exploration constant.
    #[arg(long, value_name = "C", default_value_t = 4.0)]
    pub uct_c: f64,

    /// Fix the kernel RNG for reproducible runs.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Worker threads for kernel computation.
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub workers: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("table name must not be empty")]
    EmptyTableName,
    #[error("{0} must be at least 1")]
    ZeroKnob(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientOptions {
    pub table_name: String,
    pub workers: usize,
    pub seed: Option<u64>,
    pub action: ActionKernelOptions,
    pub contract: ContractKernelOptions,
}

impl Cli {
    pub fn into_options(self) -> Result<ClientOptions, ConfigError> {
        if self.table_name.is_empty() {
            return Err(ConfigError::EmptyTableName);
        }
        for (name, value) in [
            ("--action-trees", self.action_trees),
            ("--action-rollouts", self.action_rollouts),
            ("--contract-trees", self.contract_trees),
            ("--contract-rollouts", self.contract_rollouts),
            ("--batch-size", self.batch_size),
            ("--workers", self.workers),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroKnob(name));
            }
        }
        let uct = UctConfig {
            exploration: self.uct_c,
        };
        Ok(ClientOptions {
            table_name: self.table_name,
            workers: self.workers,
            seed: self.seed,
            action: ActionKernelOptions {
                n_trees: self.action_trees,
                n_rollouts: self.action_rollouts,
                batch_size: self.batch_size,
                uct,
            },
            contract: ContractKernelOptions {
                n_trees: self.contract_trees,
                n_rollouts: self.contract_rollouts,
                batch_size: self.batch_size,
                uct,
            },
        })
    }
}
