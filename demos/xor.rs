use rand::seq::SliceRandom;
use std::sync::Arc;

use lamina_nn::{Executor, Network, NetworkConfig};

fn main() -> lamina_nn::Result<()> {
    let dataset: Vec<(Vec<f64>, Vec<f64>)> = vec![
        (vec![0.0, 0.0], vec![0.0]),
        (vec![0.0, 1.0], vec![1.0]),
        (vec![1.0, 0.0], vec![1.0]),
        (vec![1.0, 1.0], vec![0.0]),
    ];

    let executor = Arc::new(Executor::new()?);
    let config = NetworkConfig::new(2, 1, 4, 1).learning_rate(0.1);
    let mut network = Network::new(&config, executor)?;

    for (input, target) in &dataset {
        println!(
            "Input: {:?} Target: {:?} Output: {:?}",
            input,
            target,
            network.feed_forward(input)
        );
    }
    println!();

    let mut rng = rand::thread_rng();
    let mut order: Vec<usize> = (0..dataset.len()).collect();
    for _ in 0..100_000 {
        order.shuffle(&mut rng);
        for &i in &order {
            let (input, target) = &dataset[i];
            network.train(input, target);
        }
    }

    for (input, target) in &dataset {
        println!(
            "Input: {:?} Target: {:?} Output: {:?}",
            input,
            target,
            network.feed_forward(input)
        );
    }

    Ok(())
}
