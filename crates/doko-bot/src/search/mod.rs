mod tree;

pub use tree::{UctConfig, UctTree};
