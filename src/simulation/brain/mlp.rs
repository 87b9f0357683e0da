//! Fully connected layer with logistic activation.

use ndarray::{Array1, Array2};
use ndarray_rand::RandomExt;
use ndarray_rand::rand::Rng;
use ndarray_rand::rand_distr::StandardNormal;

/// A single layer of a multi-layer perceptron.
#[derive(Debug, Clone, PartialEq)]
pub struct Mlp {
    /// Weight matrix (`input_size` × `output_size`).
    weights: Array2<f32>,
    /// Bias row vector (`output_size`).
    biases: Array1<f32>,
}

impl Mlp {
    /// Creates a layer with standard-normal weights and zero biases.
    pub fn new_random<R: Rng + ?Sized>(input_size: usize, output_size: usize, rng: &mut R) -> Self {
        Self {
            weights: Array2::random_using((input_size, output_size), StandardNormal, rng),
            biases: Array1::zeros(output_size),
        }
    }

    /// Creates a layer whose weights and biases are all zero.
    pub fn zeros(input_size: usize, output_size: usize) -> Self {
        Self {
            weights: Array2::zeros((input_size, output_size)),
            biases: Array1::zeros(output_size),
        }
    }

    /// Wraps already shape-checked parameters.
    pub(crate) fn from_parts(weights: Array2<f32>, biases: Array1<f32>) -> Self {
        debug_assert_eq!(weights.ncols(), biases.len());
        Self { weights, biases }
    }

    /// Width of the vector this layer consumes.
    pub fn input_size(&self) -> usize {
        self.weights.nrows()
    }

    /// Width of the vector this layer produces.
    pub fn output_size(&self) -> usize {
        self.weights.ncols()
    }

    /// Weight matrix, rows indexed by input and columns by output.
    pub fn weights(&self) -> &Array2<f32> {
        &self.weights
    }

    /// Bias vector added before activation.
    pub fn biases(&self) -> &Array1<f32> {
        &self.biases
    }

    /// Performs `sigmoid(inputs · W + b)`.
    ///
    /// The caller guarantees `inputs.len() == self.input_size()`.
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = inputs.dot(&self.weights);
        output += &self.biases;

        output.mapv_inplace(sigmoid);
        output
    }

    /// Adds standard-normal noise scaled by `rate` to every weight and bias.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f32, rng: &mut R) {
        let weight_noise: Array2<f32> =
            Array2::random_using(self.weights.dim(), StandardNormal, rng);
        let bias_noise: Array1<f32> = Array1::random_using(self.biases.len(), StandardNormal, rng);

        self.weights.scaled_add(rate, &weight_noise);
        self.biases.scaled_add(rate, &bias_noise);
    }
}

/// Logistic activation `1 / (1 + e^-x)`.
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
