//! Inference over hidden hands: which seats can still hold which cards,
//! and random completions of the deal consistent with every observation.

mod constraints;
mod sampler;

pub use constraints::{DealConstraints, SeatMask};
pub use sampler::{Determinization, SamplingError};
