use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::Result;
use crate::math::matrix::Matrix;

/// A fully serializable picture of a trained network: its dimensions,
/// hyperparameters, and every weight/bias matrix.
///
/// This is the persistence surface: obtain one with
/// [`Network::snapshot`](crate::network::network::Network::snapshot), store
/// it as JSON, and rebuild a network later with
/// [`Network::from_snapshot`](crate::network::network::Network::from_snapshot),
/// which re-validates all shapes before accepting the data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub inputs: usize,
    pub hidden_layers: usize,
    pub hidden: usize,
    pub outputs: usize,
    pub learning_rate: f64,
    pub activation: String,
    pub weights: Vec<Matrix>,
    pub biases: Vec<Matrix>,
}

impl NetworkSnapshot {
    /// Serializes the snapshot to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a snapshot from a JSON file previously written by
    /// `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<NetworkSnapshot> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
