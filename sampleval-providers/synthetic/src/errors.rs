use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SyntheticError {
    #[error("a generated graph needs at least {min} vertices, got {got}")]
    TooFewNodes { min: usize, got: usize },
    #[error("edges per new vertex must lie in 1..{nodes}, got {got}")]
    InvalidAttachment { nodes: usize, got: usize },
    #[error("edge probability must lie in [0, 1], got {got}")]
    InvalidProbability { got: f64 },
}
