use std::path::PathBuf;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`         — total number of full passes over the training data
/// - `batch_size`     — samples per shuffled batch; use `1` for fully
///                      shuffled online training
/// - `chart_path`     — optional PNG path; when set, the running loss curve
///                      is re-rendered there during training
/// - `chart_interval` — epochs between chart renders (default 10)
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub chart_path: Option<PathBuf>,
    pub chart_interval: usize,
}

impl TrainConfig {
    /// Creates a minimal config with no chart output.
    pub fn new(epochs: usize, batch_size: usize) -> TrainConfig {
        TrainConfig {
            epochs,
            batch_size,
            chart_path: None,
            chart_interval: 10,
        }
    }

    pub fn chart<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.chart_path = Some(path.into());
        self
    }
}
