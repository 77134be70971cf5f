use std::sync::Arc;

use lamina_nn::{
    train_loop, Dataset, Executor, Network, NetworkConfig, NetworkSnapshot, Sample, TrainConfig,
};

fn main() -> lamina_nn::Result<()> {
    let samples = vec![
        Sample::new(vec![0.0, 0.0], vec![0.0]),
        Sample::new(vec![0.0, 1.0], vec![1.0]),
        Sample::new(vec![1.0, 0.0], vec![1.0]),
        Sample::new(vec![1.0, 1.0], vec![0.0]),
    ];
    let dataset = Dataset::new(samples.clone(), samples);
    dataset.save_json("dataset.json")?;

    let executor = Arc::new(Executor::new()?);
    let config = NetworkConfig::new(2, 1, 4, 1).learning_rate(0.1);
    let mut network = Network::new(&config, executor.clone())?;

    let train_config = TrainConfig::new(5_000, 2).chart("chart.png");
    let history = train_loop(&mut network, &dataset, &train_config);
    let last = history.last().expect("at least one epoch");
    println!(
        "epoch {}/{}: avg loss {:.6}, test loss {:?}, test accuracy {:?}",
        last.epoch, last.total_epochs, last.avg_loss, last.test_loss, last.test_accuracy
    );

    network.snapshot().save_json("model.json")?;
    let restored = Network::from_snapshot(NetworkSnapshot::load_json("model.json")?, executor)?;
    for sample in &dataset.test_set {
        println!(
            "Input: {:?} Target: {:?} Output: {:?}",
            sample.inputs,
            sample.outputs,
            restored.feed_forward(&sample.inputs)
        );
    }

    Ok(())
}
