//! Headless side-scrolling world that drives a population through an episode.
//!
//! A single pipe pair scrolls from right to left. Each step every active
//! agent senses the pipe, decides, moves and is checked for collisions.
//! Agents never read each other's state, so the per-agent update runs in
//! parallel with rayon.

use geo::{Contains, Coord, Rect};
use ndarray::{Array1, array};
use ndarray_rand::rand::Rng;
use rayon::prelude::*;

use super::agent::Agent;
use super::error::Result;
use super::params::Params;
use super::population::Population;

/// Fitness granted for every step an agent survives.
const SURVIVAL_REWARD: f32 = 1.0;

/// The scrolling obstacle: a column with an open gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    /// Left edge of the pipe column.
    pub x: f32,
    /// Top of the gap.
    pub gap_top: u32,
}

impl Pipe {
    /// The whole column, unbounded vertically.
    pub fn column(&self, width: u32) -> Rect<f32> {
        Rect::new(
            Coord { x: self.x, y: f32::MIN },
            Coord {
                x: self.x + width as f32,
                y: f32::MAX,
            },
        )
    }

    /// The opening agents have to fly through.
    pub fn gap(&self, width: u32, gap: u32) -> Rect<f32> {
        Rect::new(
            Coord {
                x: self.x,
                y: self.gap_top as f32,
            },
            Coord {
                x: self.x + width as f32,
                y: (self.gap_top + gap) as f32,
            },
        )
    }

    /// Vertical centre of the gap.
    pub fn gap_centre(&self, gap: u32) -> f32 {
        (self.gap_top + gap / 2) as f32
    }
}

/// Summary of a finished episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeOutcome {
    /// Steps simulated.
    pub steps: u64,
    /// Pipes that scrolled past the board.
    pub pipes_passed: u32,
}

/// Game state for one episode.
#[derive(Debug, Clone)]
pub struct World {
    params: Params,
    pipe: Pipe,
    pipes_passed: u32,
    steps: u64,
}

impl World {
    /// Creates a world with the first pipe at the right edge.
    pub fn new<R: Rng + ?Sized>(params: Params, rng: &mut R) -> Result<Self> {
        params.validate()?;

        let pipe = Pipe {
            x: params.width as f32,
            gap_top: random_gap_top(&params, rng),
        };

        Ok(Self {
            params,
            pipe,
            pipes_passed: 0,
            steps: 0,
        })
    }

    /// Parameters the world was built with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Current obstacle.
    pub fn pipe(&self) -> Pipe {
        self.pipe
    }

    /// Places the obstacle, mainly for scripted scenarios.
    pub fn set_pipe(&mut self, pipe: Pipe) {
        self.pipe = pipe;
    }

    /// Pipes passed in the current episode.
    pub fn pipes_passed(&self) -> u32 {
        self.pipes_passed
    }

    /// Steps simulated in the current episode.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Where every agent starts an episode.
    pub fn start_position(&self) -> Coord<f32> {
        Coord {
            x: self.params.start_x,
            y: self.params.start_y(),
        }
    }

    /// Starts a new episode: fresh pipe, zeroed counters, reset agents.
    pub fn reset<R: Rng + ?Sized>(&mut self, population: &mut Population, rng: &mut R) {
        self.pipe = Pipe {
            x: self.params.width as f32,
            gap_top: random_gap_top(&self.params, rng),
        };
        self.pipes_passed = 0;
        self.steps = 0;

        population.reset_all(self.start_position(), self.params.start_velocity);
    }

    /// Sensor vector for an agent: normalised velocity, horizontal distance
    /// to the pipe and signed vertical distance to the gap centre (negative
    /// while the agent is above it).
    pub fn sense(&self, agent: &Agent) -> Array1<f32> {
        sense(&self.params, &self.pipe, agent)
    }

    /// Whether a point hits the board edge or the pipe.
    pub fn collides(&self, pos: Coord<f32>) -> bool {
        collides(&self.params, &self.pipe, pos)
    }

    /// Advances the simulation by one step.
    pub fn step<R: Rng + ?Sized>(&mut self, population: &mut Population, rng: &mut R) -> Result<()> {
        let params = &self.params;
        let pipe = &self.pipe;

        population
            .members_mut()
            .par_iter_mut()
            .filter(|agent| agent.active)
            .try_for_each(|agent| -> Result<()> {
                let inputs = sense(params, pipe, agent);
                agent.decide(&inputs, params.gravity, params.jump_force)?;
                agent.clamp_velocity(params.max_velocity);
                agent.apply_motion();

                if collides(params, pipe, agent.pos) {
                    agent.deactivate();
                } else {
                    agent.reward(SURVIVAL_REWARD);
                }
                Ok(())
            })?;

        self.pipe.x -= self.params.pipe_speed;
        if self.pipe.x < -(self.params.pipe_width as f32) {
            self.pipe = Pipe {
                x: self.params.width as f32,
                gap_top: random_gap_top(&self.params, rng),
            };
            self.pipes_passed += 1;

            for agent in population.members_mut() {
                agent.pass_milestone();
            }
            log::debug!(
                "pipe {} passed with {} agents left",
                self.pipes_passed,
                population.active_count()
            );
        }

        self.steps += 1;
        Ok(())
    }

    /// Whether the episode has ended.
    pub fn is_over(&self, population: &Population) -> bool {
        population.all_inactive()
            || self.pipes_passed >= self.params.score_limit
            || self
                .params
                .max_steps
                .is_some_and(|max_steps| self.steps >= max_steps)
    }

    /// Resets the population and steps until the episode ends.
    pub fn run_episode<R: Rng + ?Sized>(
        &mut self,
        population: &mut Population,
        rng: &mut R,
    ) -> Result<EpisodeOutcome> {
        self.reset(population, rng);

        while !self.is_over(population) {
            self.step(population, rng)?;
        }

        Ok(EpisodeOutcome {
            steps: self.steps,
            pipes_passed: self.pipes_passed,
        })
    }
}

fn random_gap_top<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> u32 {
    rng.gen_range(params.min_pipe_height..=params.max_pipe_height())
}

fn sense(params: &Params, pipe: &Pipe, agent: &Agent) -> Array1<f32> {
    let half_height = (params.height / 2) as f32;
    let centre = pipe.gap_centre(params.pipe_gap);

    let velocity = agent.velocity / params.max_velocity;
    let horizontal = (pipe.x - agent.pos.x).abs() / params.width as f32;
    let vertical = (centre - agent.pos.y).abs() / half_height;
    let vertical = if agent.pos.y < centre {
        -vertical
    } else {
        vertical
    };

    array![velocity, horizontal, vertical]
}

fn collides(params: &Params, pipe: &Pipe, pos: Coord<f32>) -> bool {
    if pos.y < 0.0 || pos.y > params.height as f32 {
        return true;
    }

    pipe.column(params.pipe_width).contains(&pos)
        && !pipe.gap(params.pipe_width, params.pipe_gap).contains(&pos)
}
