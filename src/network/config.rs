use serde::{Deserialize, Serialize};

/// Construction parameters for a [`Network`](crate::network::network::Network).
///
/// Fields:
/// - `inputs`        — input vector length
/// - `hidden_layers` — number of hidden layers (at least 1)
/// - `hidden`        — neurons per hidden layer
/// - `outputs`       — output vector length
/// - `learning_rate` — scalar update factor, strictly positive
/// - `activation`    — activation name, resolved once at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub inputs: usize,
    pub hidden_layers: usize,
    pub hidden: usize,
    pub outputs: usize,
    pub learning_rate: f64,
    pub activation: String,
}

impl NetworkConfig {
    /// Creates a config with the default learning rate (0.001) and the
    /// sigmoid activation.
    pub fn new(inputs: usize, hidden_layers: usize, hidden: usize, outputs: usize) -> NetworkConfig {
        NetworkConfig {
            inputs,
            hidden_layers,
            hidden,
            outputs,
            learning_rate: 0.001,
            activation: "sigmoid".to_string(),
        }
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn activation(mut self, name: &str) -> Self {
        self.activation = name.to_string();
        self
    }
}
