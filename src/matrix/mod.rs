//! Matrix normalizer: pasted text in, validated [T,F] matrix out.

mod mode;
mod parse;

/// Ordered rows of numeric feature vectors, shape [T (time steps), F (features)].
pub type Matrix = Vec<Vec<f64>>;

pub use mode::{InputMode, ResolvedMode};
pub use parse::{normalize, parse_matrix, NormalizeError};
