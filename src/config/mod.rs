mod settings;

pub use settings::{Config, RpcSettings, StorageSettings, EXAMPLE_CONFIG};
