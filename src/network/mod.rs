pub mod config;
pub mod network;
pub mod snapshot;

pub use config::NetworkConfig;
pub use network::Network;
pub use snapshot::NetworkSnapshot;
