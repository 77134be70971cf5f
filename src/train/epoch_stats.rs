use serde::{Deserialize, Serialize};

/// Per-epoch training statistics collected by `train_loop`.
///
/// One value is recorded at the end of every completed epoch; reporting
/// code uses these to drive charts and progress displays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean per-sample training loss over this epoch.
    pub avg_loss: f64,
    /// Mean squared error over the test set, if one was provided.
    pub test_loss: Option<f64>,
    /// Mean rounded-component accuracy over the test set, if one was
    /// provided; a fraction in [0, 1].
    pub test_accuracy: Option<f64>,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
