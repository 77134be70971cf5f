use std::sync::Arc;

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::exec::executor::Executor;
use crate::math::matrix::Matrix;
use crate::network::config::NetworkConfig;
use crate::network::snapshot::NetworkSnapshot;

/// Multilayer feedforward network with per-layer weight/bias matrices.
///
/// Shape invariants, held for the lifetime of the object (training mutates
/// values, never shapes): `weights[0]` is `hidden × inputs`,
/// `weights[hidden_layers]` is `outputs × hidden`, interior weight matrices
/// are `hidden × hidden`, and `biases[i]` is a column vector with one row
/// per output of `weights[i]`.
///
/// Concurrency contract: `train` calls on one instance must be sequential —
/// nothing here synchronizes the in-place weight updates. Parallelism is
/// safe across `feed_forward`-only calls or across independent instances.
pub struct Network {
    inputs: usize,
    hidden_layers: usize,
    hidden: usize,
    outputs: usize,
    learning_rate: f64,
    activation: ActivationFunction,
    weights: Vec<Matrix>,
    biases: Vec<Matrix>,
    executor: Arc<Executor>,
}

impl Network {
    /// Builds a network with weights and biases randomized uniformly in
    /// `[-1, 1)`.
    ///
    /// Fails with a descriptive error if any dimension or the learning rate
    /// is not strictly positive, or if the activation name is unknown; no
    /// partially-constructed network is returned.
    pub fn new(config: &NetworkConfig, executor: Arc<Executor>) -> Result<Network> {
        validate_dimensions(config)?;
        let activation = config.activation.parse::<ActivationFunction>()?;

        let layer_count = config.hidden_layers + 1;
        let mut rng = rand::thread_rng();
        let mut weights = Vec::with_capacity(layer_count);
        let mut biases = Vec::with_capacity(layer_count);
        for i in 0..layer_count {
            let (rows, cols) = layer_shape(config, i);
            let mut weight = Matrix::zeros(rows, cols);
            weight.randomize(-1.0, 1.0, &mut rng);
            weights.push(weight);
            let mut bias = Matrix::zeros(rows, 1);
            bias.randomize(-1.0, 1.0, &mut rng);
            biases.push(bias);
        }

        Ok(Network {
            inputs: config.inputs,
            hidden_layers: config.hidden_layers,
            hidden: config.hidden,
            outputs: config.outputs,
            learning_rate: config.learning_rate,
            activation,
            weights,
            biases,
            executor,
        })
    }

    pub fn inputs(&self) -> usize {
        self.inputs
    }

    pub fn hidden_layers(&self) -> usize {
        self.hidden_layers
    }

    pub fn hidden(&self) -> usize {
        self.hidden
    }

    pub fn outputs(&self) -> usize {
        self.outputs
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    /// One layer step: `activation(weights[i] · input + biases[i])`.
    fn propagate(&self, layer: usize, input: &Matrix) -> Matrix {
        let mut out = self.weights[layer].multiply_on(input, &self.executor);
        out.add(&self.biases[layer]);
        self.activation.apply(&mut out);
        out
    }

    /// Propagates `input` through every layer and returns the output
    /// vector. Pure with respect to network state.
    pub fn feed_forward(&self, input: &[f64]) -> Vec<f64> {
        let mut layer = Matrix::from_array(input);
        for i in 0..self.weights.len() {
            layer = self.propagate(i, &layer);
        }
        layer.to_array()
    }

    /// One backpropagation step over a single example; updates every
    /// layer's weights and biases in place and returns the squared-error
    /// loss at the output layer, averaged by layer count.
    ///
    /// The backward rule propagates the raw error through the transposed
    /// (just-updated) weights without an extra activation-derivative
    /// factor at the layer boundary. This deliberately simplified rule is
    /// kept as-is for compatibility with models trained by earlier builds.
    ///
    /// Every shape-sensitive operation fires during the forward pass and
    /// the output-error subtraction, before the first in-place update, so
    /// a shape panic cannot leave the layers in a mixed update state.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> f64 {
        let layer_count = self.weights.len();

        // Forward pass, retaining every activation; index 0 is the input.
        let mut activations = Vec::with_capacity(layer_count + 1);
        activations.push(Matrix::from_array(input));
        for i in 0..layer_count {
            let next = self.propagate(i, &activations[i]);
            activations.push(next);
        }

        // Output-layer error: target - output.
        let mut error = Matrix::from_array(target);
        error.subtract(&activations[layer_count]);

        let mut squared = error.clone();
        squared.pow(2.0);
        let loss = squared.mean();

        for i in (0..layer_count).rev() {
            // gradient = derivative(layer output) ⊙ error, scaled by the
            // learning rate.
            let mut gradient = activations[i + 1].clone();
            self.activation.apply_derivative(&mut gradient);
            gradient.element_mult(&error).scale(self.learning_rate);

            // delta = gradient · previous outputᵀ, shaped like weights[i].
            let delta = gradient.multiply_on(&activations[i].transpose(), &self.executor);

            self.biases[i].add(&gradient);
            self.weights[i].add(&delta);

            if i > 0 {
                error = self.weights[i].transpose().multiply_on(&error, &self.executor);
            }
        }

        loss / layer_count as f64
    }

    /// Read-only copy of the network's dimensions, hyperparameters, and
    /// weight/bias matrices for persistence.
    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            inputs: self.inputs,
            hidden_layers: self.hidden_layers,
            hidden: self.hidden,
            outputs: self.outputs,
            learning_rate: self.learning_rate,
            activation: self.activation.name().to_string(),
            weights: self.weights.clone(),
            biases: self.biases.clone(),
        }
    }

    /// Rebuilds a network from a persisted snapshot, re-validating the
    /// config fields and rejecting any weight/bias whose shape violates
    /// the layer invariants.
    pub fn from_snapshot(snapshot: NetworkSnapshot, executor: Arc<Executor>) -> Result<Network> {
        let config = NetworkConfig {
            inputs: snapshot.inputs,
            hidden_layers: snapshot.hidden_layers,
            hidden: snapshot.hidden,
            outputs: snapshot.outputs,
            learning_rate: snapshot.learning_rate,
            activation: snapshot.activation.clone(),
        };
        validate_dimensions(&config)?;
        let activation = config.activation.parse::<ActivationFunction>()?;

        let layer_count = snapshot.hidden_layers + 1;
        if snapshot.weights.len() != layer_count || snapshot.biases.len() != layer_count {
            return Err(Error::Snapshot(format!(
                "expected {} weight/bias pairs, found {}/{}",
                layer_count,
                snapshot.weights.len(),
                snapshot.biases.len()
            )));
        }
        for i in 0..layer_count {
            let (rows, cols) = layer_shape(&config, i);
            check_shape(&snapshot.weights[i], rows, cols, &format!("weights[{i}]"))?;
            check_shape(&snapshot.biases[i], rows, 1, &format!("biases[{i}]"))?;
        }

        Ok(Network {
            inputs: snapshot.inputs,
            hidden_layers: snapshot.hidden_layers,
            hidden: snapshot.hidden,
            outputs: snapshot.outputs,
            learning_rate: snapshot.learning_rate,
            activation,
            weights: snapshot.weights,
            biases: snapshot.biases,
            executor,
        })
    }
}

fn validate_dimensions(config: &NetworkConfig) -> Result<()> {
    if config.inputs == 0 {
        return Err(Error::Config("inputs must be greater than 0".to_string()));
    }
    if config.hidden_layers == 0 {
        return Err(Error::Config(
            "hidden_layers must be greater than 0".to_string(),
        ));
    }
    if config.hidden == 0 {
        return Err(Error::Config("hidden must be greater than 0".to_string()));
    }
    if config.outputs == 0 {
        return Err(Error::Config("outputs must be greater than 0".to_string()));
    }
    if !(config.learning_rate > 0.0) {
        return Err(Error::Config(
            "learning_rate must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// Weight-matrix shape for layer `index`: the first layer maps the input
/// width to the hidden width, the last maps hidden to output, interior
/// layers are square.
fn layer_shape(config: &NetworkConfig, index: usize) -> (usize, usize) {
    if index == 0 {
        (config.hidden, config.inputs)
    } else if index == config.hidden_layers {
        (config.outputs, config.hidden)
    } else {
        (config.hidden, config.hidden)
    }
}

fn check_shape(matrix: &Matrix, rows: usize, cols: usize, what: &str) -> Result<()> {
    if matrix.rows != rows || matrix.cols != cols || matrix.data.len() != rows * cols {
        return Err(Error::Snapshot(format!(
            "{} is {}x{} ({} cells), expected {}x{}",
            what,
            matrix.rows,
            matrix.cols,
            matrix.data.len(),
            rows,
            cols
        )));
    }
    Ok(())
}
