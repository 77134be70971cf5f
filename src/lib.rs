pub mod activation;
pub mod chart;
pub mod data;
pub mod error;
pub mod exec;
pub mod math;
pub mod metrics;
pub mod network;
pub mod train;

// Convenience re-exports
pub use activation::activation::ActivationFunction;
pub use chart::LossChart;
pub use data::dataset::{Dataset, Sample};
pub use error::{Error, Result};
pub use exec::executor::Executor;
pub use math::matrix::Matrix;
pub use metrics::{accuracy, mean_squared_error};
pub use network::config::NetworkConfig;
pub use network::network::Network;
pub use network::snapshot::NetworkSnapshot;
pub use train::trainer::train_loop;
pub use train::{EpochStats, TrainConfig};
