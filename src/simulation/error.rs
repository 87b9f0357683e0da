//! Error types for the neuroevolution engine.

use thiserror::Error;

/// Result alias used throughout the simulation modules.
pub type Result<T> = std::result::Result<T, EvoError>;

/// Errors surfaced by networks, agents, populations and configuration.
///
/// All of them describe a caller or configuration mistake. Validation runs
/// before any state is altered, so a failed call leaves its receiver untouched.
#[derive(Error, Debug)]
pub enum EvoError {
    /// Fewer than two layers, a zero-width layer, or inconsistent matrix shapes.
    #[error("Invalid network topology: {topology:?}")]
    InvalidTopology {
        /// The offending layer widths.
        topology: Vec<usize>,
    },

    /// Input vector length differs from the network's input width.
    #[error("Input dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Input width declared by the topology.
        expected: usize,
        /// Length of the vector that was supplied.
        actual: usize,
    },

    /// Survival fraction outside `(0, 1]` or one that keeps nobody alive.
    #[error("Invalid survival fraction {fraction} for population of {population_size}")]
    InvalidSurvivalFraction {
        /// Requested fraction.
        fraction: f64,
        /// Population size the fraction was applied to.
        population_size: usize,
    },

    /// A population must hold at least one agent.
    #[error("Population size must be at least 1")]
    InvalidPopulationSize,

    /// A configuration value is out of range.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the rejected value.
        reason: String,
    },

    /// Reading a configuration or writing a report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration or report (de)serialisation failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
