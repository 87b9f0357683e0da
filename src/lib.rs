//! # Flappy Evo - Neuroevolution for a Side-Scrolling Game
//!
//! Evolves a population of small feed-forward networks with a genetic
//! algorithm so that the agents they control learn to fly through the gaps
//! of scrolling pipes.
//!
//! ## Features
//!
//! - Fixed-topology MLP brains with logistic activation
//! - Asexual reproduction through Gaussian weight mutation (no crossover)
//! - Truncation selection keeping the fittest fraction of each generation
//! - Headless game world with parallel per-agent updates
//! - Injected random number generators for reproducible runs
//!
//! ## Core Modules
//!
//! - [`simulation::brain`] - Neural network implementation
//! - [`simulation::agent`] - Agent state and decision contract
//! - [`simulation::population`] - Selection and reproduction
//! - [`simulation::world`] - Game world driving the episodes
//! - [`simulation::evolution`] - Generational loop

/// Core simulation logic and data structures.
pub mod simulation {
    /// Agents wrapping a brain with per-episode state.
    pub mod agent;
    /// Neural network implementation for agent brains.
    pub mod brain;
    /// Error types shared by all simulation modules.
    pub mod error;
    /// Episode and evolution loop.
    pub mod evolution;
    /// Simulation parameters.
    pub mod params;
    /// Fixed-size population and its generational update.
    pub mod population;
    /// Per-generation fitness summaries.
    pub mod stats;
    /// Headless game world.
    pub mod world;
}
