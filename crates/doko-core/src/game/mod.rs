pub mod contract;
pub mod machine;
pub mod score;
pub mod serialization;
