use thiserror::Error;

/// Precondition violations raised by the helpers in this crate.
///
/// None of these are recoverable at runtime, they signal an integration error
/// in the calling training loop.
#[derive(Debug, Error)]
pub enum Error {
    #[error("a trajectory with {states} states needs {} rewards, got {rewards}", .states.saturating_sub(1))]
    TrajectoryLength { states: usize, rewards: usize },

    #[error("the critic returned {actual} values for a batch of {expected} states")]
    ValueCount { expected: usize, actual: usize },

    #[error("the window length should be at least 1. got {0}")]
    InvalidWindow(usize),

    #[error("stacking a rank {input} tensor produces rank {}, requested rank {output}", .input + 1)]
    RankMismatch { input: usize, output: usize },

    #[error("the soft update coefficient should be in the interval [0,1]. got {0}")]
    InvalidTau(f64),

    #[error("the huber clip value should be positive. got {0}")]
    InvalidClipValue(f64),

    #[error("model has {model} float parameters but target has {target} (or their shapes differ)")]
    ParameterMismatch { model: usize, target: usize },

    #[error("unable to read tensor data: {0}")]
    Data(String),
}

pub type Result<T> = std::result::Result<T, Error>;
