//! Input-mode policy: how a parsed [T,F] matrix is reduced to the shape a
//! framework expects.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::Matrix;
use crate::api::Framework;

/// How the pasted matrix should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum InputMode {
    /// Pick per framework: last step for LightGBM, full sequence otherwise.
    Auto,
    /// Send the full time-ordered matrix [T,F].
    Sequence,
    /// Send only the most recent row [1,F].
    LastStep,
}

impl Default for InputMode {
    fn default() -> Self {
        InputMode::Auto
    }
}

impl InputMode {
    /// Resolve `Auto` against the target framework. Explicit modes pass
    /// through unchanged.
    pub fn resolve(self, framework: Framework) -> ResolvedMode {
        match self {
            InputMode::Sequence => ResolvedMode::Sequence,
            InputMode::LastStep => ResolvedMode::LastStep,
            InputMode::Auto => {
                if framework.uses_last_step() {
                    ResolvedMode::LastStep
                } else {
                    ResolvedMode::Sequence
                }
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Auto => "auto",
            InputMode::Sequence => "sequence",
            InputMode::LastStep => "last-step",
        }
    }
}

/// An input mode with `Auto` already resolved away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedMode {
    Sequence,
    LastStep,
}

impl ResolvedMode {
    /// Reduce a parsed matrix to the shape this mode sends on the wire.
    ///
    /// `LastStep` keeps only the final row. Empty input reduces to empty;
    /// shape validation upstream guarantees that never reaches a request.
    pub fn reduce(self, mut matrix: Matrix) -> Matrix {
        match self {
            ResolvedMode::Sequence => matrix,
            ResolvedMode::LastStep => match matrix.pop() {
                Some(last) => vec![last],
                None => Vec::new(),
            },
        }
    }
}
