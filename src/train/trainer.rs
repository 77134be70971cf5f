use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

use crate::chart::LossChart;
use crate::data::dataset::Dataset;
use crate::metrics;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Trains `network` over `dataset.training_set` for `config.epochs` epochs
/// and returns one [`EpochStats`] per epoch.
///
/// Each epoch reshuffles the training set into `config.batch_size` chunks
/// and trains every sample **sequentially** — training calls on a single
/// network must not run concurrently, so batches here only control shuffle
/// granularity. The test set (if non-empty) is evaluated after every epoch
/// with `feed_forward` plus the metrics functions. A progress bar with an
/// ETA is drawn throughout, and when `config.chart_path` is set the loss
/// curve is re-rendered there every `config.chart_interval` epochs; a
/// failed chart render is reported and training continues.
///
/// # Panics
/// Panics if the training set is empty or `batch_size` is 0.
pub fn train_loop(network: &mut Network, dataset: &Dataset, config: &TrainConfig) -> Vec<EpochStats> {
    assert!(
        !dataset.training_set.is_empty(),
        "training set must not be empty"
    );
    assert!(config.batch_size > 0, "batch_size must be at least 1");

    let bar = ProgressBar::new(config.epochs as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} epochs ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut chart = LossChart::new();
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let start = Instant::now();
        let mut total_loss = 0.0;

        for batch in dataset.random_batches(config.batch_size) {
            for sample in batch {
                total_loss += network.train(&sample.inputs, &sample.outputs);
            }
        }
        let avg_loss = total_loss / dataset.training_set.len() as f64;

        let (test_loss, test_accuracy) = evaluate(network, dataset);

        if let Some(ref path) = config.chart_path {
            chart.push(epoch as f64, avg_loss);
            if epoch % config.chart_interval == 0 {
                if let Err(err) = chart.save(path) {
                    bar.println(format!("couldn't save chart: {err}"));
                }
            }
        }

        history.push(EpochStats {
            epoch,
            total_epochs: config.epochs,
            avg_loss,
            test_loss,
            test_accuracy,
            elapsed_ms: start.elapsed().as_millis() as u64,
        });
        bar.inc(1);
    }

    bar.finish();
    history
}

/// Mean test-set loss and accuracy, or `None` when there is no test set.
fn evaluate(network: &Network, dataset: &Dataset) -> (Option<f64>, Option<f64>) {
    if dataset.test_set.is_empty() {
        return (None, None);
    }
    let mut loss = 0.0;
    let mut accuracy = 0.0;
    for sample in &dataset.test_set {
        let output = network.feed_forward(&sample.inputs);
        loss += metrics::mean_squared_error(&output, &sample.outputs);
        accuracy += metrics::accuracy(&output, &sample.outputs);
    }
    let n = dataset.test_set.len() as f64;
    (Some(loss / n), Some(accuracy / n))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::data::dataset::Sample;
    use crate::exec::executor::Executor;
    use crate::network::config::NetworkConfig;
    use std::sync::Arc;

    fn xor_dataset() -> Dataset {
        let samples = vec![
            Sample::new(vec![0.0, 0.0], vec![0.0]),
            Sample::new(vec![0.0, 1.0], vec![1.0]),
            Sample::new(vec![1.0, 0.0], vec![1.0]),
            Sample::new(vec![1.0, 1.0], vec![0.0]),
        ];
        Dataset::new(samples.clone(), samples)
    }

    #[test]
    fn records_stats_for_every_epoch() {
        let executor = Arc::new(Executor::with_workers(1).unwrap());
        let config = NetworkConfig::new(2, 1, 4, 1).learning_rate(0.1);
        let mut network = Network::new(&config, executor).unwrap();
        let dataset = xor_dataset();

        let history = train_loop(&mut network, &dataset, &TrainConfig::new(25, 2));
        assert_eq!(history.len(), 25);
        assert_eq!(history[0].epoch, 1);
        assert_eq!(history[24].epoch, 25);
        assert!(history.iter().all(|s| s.avg_loss.is_finite()));
        assert!(history.iter().all(|s| s.test_loss.is_some()));
        let accuracy = history[24].test_accuracy.unwrap();
        assert!((0.0..=1.0).contains(&accuracy));
    }

    #[test]
    fn no_test_set_means_no_eval_metrics() {
        let executor = Arc::new(Executor::with_workers(1).unwrap());
        let config = NetworkConfig::new(2, 1, 4, 1).learning_rate(0.1);
        let mut network = Network::new(&config, executor).unwrap();
        let dataset = Dataset::new(xor_dataset().training_set, Vec::new());

        let history = train_loop(&mut network, &dataset, &TrainConfig::new(5, 4));
        assert!(history.iter().all(|s| s.test_loss.is_none()));
        assert!(history.iter().all(|s| s.test_accuracy.is_none()));
    }
}
