//! Feed-forward neural network used as an agent's brain.
//!
//! A fixed-topology multi-layer perceptron with logistic activation on every
//! layer. Networks are created with standard-normal weights and zero biases,
//! reproduce by cloning, and evolve only through Gaussian mutation.

use ndarray::{Array1, Array2};
use ndarray_rand::rand::Rng;

use super::error::{EvoError, Result};

pub mod mlp;

pub use mlp::{Mlp, sigmoid};

/// A multi-layer perceptron with an immutable topology.
///
/// Layer `i` maps `topology[i]` inputs to `topology[i + 1]` outputs, so a
/// brain always holds exactly `topology.len() - 1` layers. `Clone` produces a
/// deep copy with independent storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Brain {
    topology: Vec<usize>,
    layers: Vec<Mlp>,
}

impl Brain {
    /// Creates a brain with standard-normal weights and zero biases.
    pub fn new<R: Rng + ?Sized>(topology: &[usize], rng: &mut R) -> Result<Self> {
        validate_topology(topology)?;

        let layers = topology
            .windows(2)
            .map(|pair| Mlp::new_random(pair[0], pair[1], rng))
            .collect();

        Ok(Self {
            topology: topology.to_vec(),
            layers,
        })
    }

    /// Creates a brain whose weights and biases are all zero.
    ///
    /// Every output of such a brain is exactly `sigmoid(0) = 0.5`.
    pub fn zeroed(topology: &[usize]) -> Result<Self> {
        validate_topology(topology)?;

        let layers = topology
            .windows(2)
            .map(|pair| Mlp::zeros(pair[0], pair[1]))
            .collect();

        Ok(Self {
            topology: topology.to_vec(),
            layers,
        })
    }

    /// Builds a brain from explicit per-layer weights and biases.
    ///
    /// The topology is derived from the matrix shapes. Fails with
    /// [`EvoError::InvalidTopology`] when consecutive layers do not chain or
    /// a bias vector disagrees with its weight matrix.
    pub fn from_parameters(weights: Vec<Array2<f32>>, biases: Vec<Array1<f32>>) -> Result<Self> {
        let mut topology: Vec<usize> = weights.first().map(|w| w.nrows()).into_iter().collect();
        topology.extend(weights.iter().map(|w| w.ncols()));

        let chained = weights.windows(2).all(|pair| pair[0].ncols() == pair[1].nrows());
        let biased = weights.len() == biases.len()
            && weights.iter().zip(&biases).all(|(w, b)| w.ncols() == b.len());

        if !chained || !biased {
            return Err(EvoError::InvalidTopology { topology });
        }
        validate_topology(&topology)?;

        let layers = weights
            .into_iter()
            .zip(biases)
            .map(|(w, b)| Mlp::from_parts(w, b))
            .collect();

        Ok(Self { topology, layers })
    }

    /// Layer widths, input first.
    pub fn topology(&self) -> &[usize] {
        &self.topology
    }

    /// Number of inputs the brain expects.
    pub fn input_size(&self) -> usize {
        self.topology[0]
    }

    /// Number of outputs the brain produces.
    pub fn output_size(&self) -> usize {
        self.topology[self.topology.len() - 1]
    }

    /// Ordered layers from input to output.
    pub fn layers(&self) -> &[Mlp] {
        &self.layers
    }

    /// Runs a forward pass through all layers.
    ///
    /// Every output element lies in `(0, 1)`.
    #[inline]
    pub fn think(&self, inputs: &Array1<f32>) -> Result<Array1<f32>> {
        self.check_input(inputs)?;

        let mut output = inputs.clone();
        for layer in &self.layers {
            output = layer.forward(&output);
        }

        Ok(output)
    }

    /// Runs a forward pass and returns every layer's activation.
    ///
    /// The first entry is the input itself, the last equals [`Brain::think`].
    pub fn activations(&self, inputs: &Array1<f32>) -> Result<Vec<Array1<f32>>> {
        self.check_input(inputs)?;

        let mut outputs = Vec::with_capacity(self.topology.len());
        outputs.push(inputs.clone());
        for layer in &self.layers {
            let next = layer.forward(&outputs[outputs.len() - 1]);
            outputs.push(next);
        }

        Ok(outputs)
    }

    /// Mutates all layers in place. Shapes never change.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f32, rng: &mut R) {
        for layer in &mut self.layers {
            layer.mutate(rate, rng);
        }
    }

    /// Total number of weights and biases.
    pub fn parameter_count(&self) -> usize {
        self.layers
            .iter()
            .map(|layer| layer.weights().len() + layer.biases().len())
            .sum()
    }

    /// Calculates the Euclidean distance between two brains.
    ///
    /// Brains with different topologies are infinitely far apart and yield
    /// `f32::MAX`.
    pub fn distance(brain1: &Brain, brain2: &Brain) -> f32 {
        if brain1.topology != brain2.topology {
            return f32::MAX;
        }

        let mut sum_sq = 0.0;
        for (layer1, layer2) in brain1.layers.iter().zip(&brain2.layers) {
            for (w1, w2) in layer1.weights().iter().zip(layer2.weights().iter()) {
                let diff = w1 - w2;
                sum_sq += diff * diff;
            }
            for (b1, b2) in layer1.biases().iter().zip(layer2.biases().iter()) {
                let diff = b1 - b2;
                sum_sq += diff * diff;
            }
        }

        sum_sq.sqrt()
    }

    /// Flattens all weights and biases into a single vector, layer by layer.
    pub fn to_flat_vector(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(self.parameter_count());

        for layer in &self.layers {
            flat.extend(layer.weights().iter().copied());
            flat.extend(layer.biases().iter().copied());
        }

        flat
    }

    fn check_input(&self, inputs: &Array1<f32>) -> Result<()> {
        if inputs.len() == self.input_size() {
            Ok(())
        } else {
            Err(EvoError::DimensionMismatch {
                expected: self.input_size(),
                actual: inputs.len(),
            })
        }
    }
}

/// Checks that a topology has at least two layers and no zero-width layer.
pub fn validate_topology(topology: &[usize]) -> Result<()> {
    if topology.len() < 2 || topology.contains(&0) {
        return Err(EvoError::InvalidTopology {
            topology: topology.to_vec(),
        });
    }
    Ok(())
}
