use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::Result;

/// One training example: an input vector and its expected output vector.
///
/// Lengths are the caller's responsibility; a sample whose vectors do not
/// match a network's dimensions trips that network's matrix shape checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    pub inputs: Vec<f64>,
    pub outputs: Vec<f64>,
}

impl Sample {
    pub fn new(inputs: Vec<f64>, outputs: Vec<f64>) -> Sample {
        Sample { inputs, outputs }
    }
}

/// A training/test split of samples with JSON persistence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub training_set: Vec<Sample>,
    pub test_set: Vec<Sample>,
}

impl Dataset {
    pub fn new(training_set: Vec<Sample>, test_set: Vec<Sample>) -> Dataset {
        Dataset {
            training_set,
            test_set,
        }
    }

    /// Serializes the dataset to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a dataset from a JSON file previously written by
    /// `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Dataset> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Shuffles the training set and splits it into `batch_size` chunks
    /// (the last chunk may be shorter). Panics if `batch_size` is 0.
    pub fn random_batches(&self, batch_size: usize) -> Vec<Vec<&Sample>> {
        assert!(batch_size > 0, "batch_size must be at least 1");
        let mut shuffled: Vec<&Sample> = self.training_set.iter().collect();
        shuffled.shuffle(&mut rand::thread_rng());
        shuffled
            .chunks(batch_size)
            .map(|chunk| chunk.to_vec())
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn dataset(n: usize) -> Dataset {
        let samples = (0..n)
            .map(|i| Sample::new(vec![i as f64], vec![i as f64 * 2.0]))
            .collect();
        Dataset::new(samples, Vec::new())
    }

    #[test]
    fn batches_cover_the_training_set() {
        let data = dataset(10);
        let batches = data.random_batches(3);
        assert_eq!(batches.len(), 4);
        assert_eq!(batches.iter().map(|b| b.len()).sum::<usize>(), 10);
        assert!(batches[..3].iter().all(|b| b.len() == 3));
        assert_eq!(batches[3].len(), 1);

        let mut seen: Vec<f64> = batches
            .iter()
            .flatten()
            .map(|sample| sample.inputs[0])
            .collect();
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(seen, (0..10).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    #[should_panic(expected = "batch_size")]
    fn zero_batch_size_panics() {
        dataset(4).random_batches(0);
    }

    #[test]
    fn json_round_trip() {
        let data = dataset(3);
        let path = std::env::temp_dir().join(format!("lamina-dataset-{}.json", std::process::id()));
        data.save_json(&path).unwrap();
        let loaded = Dataset::load_json(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.training_set.len(), 3);
        assert_eq!(loaded.training_set[2].outputs, vec![4.0]);
    }
}
