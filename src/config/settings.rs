use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::data::DEFAULT_BUSY_TIMEOUT;
use crate::rpc::Network;
use crate::util::paths::{config_path, database_path};
use crate::util::tools::SIMULATOR_PATH_ENV;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Root of all erst state (database, logs, config file)
    pub data_dir: PathBuf,
    /// Network used when none is given on the command line
    pub default_network: Network,
    pub rpc: RpcSettings,
    /// Explicit simulator binary; `None` means search `PATH`
    pub simulator_path: Option<PathBuf>,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RpcSettings {
    pub testnet: Option<String>,
    pub mainnet: Option<String>,
    pub futurenet: Option<String>,
    pub timeout: Duration,
}

impl RpcSettings {
    /// Endpoint for `network`; an explicit override wins over configured URLs
    pub fn url_for(&self, network: Network, override_url: Option<&str>) -> String {
        if let Some(url) = override_url.filter(|url| !url.is_empty()) {
            return url.to_string();
        }
        let configured = match network {
            Network::Testnet => self.testnet.as_deref(),
            Network::Mainnet => self.mainnet.as_deref(),
            Network::Futurenet => self.futurenet.as_deref(),
        };
        configured
            .unwrap_or_else(|| network.default_horizon_url())
            .to_string()
    }
}

impl Default for RpcSettings {
    fn default() -> Self {
        Self {
            testnet: None,
            mainnet: None,
            futurenet: None,
            timeout: DEFAULT_RPC_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageSettings {
    pub database: PathBuf,
    pub busy_timeout: Duration,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TomlNetworkConfig {
    default: Option<Network>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TomlRpcConfig {
    testnet: Option<String>,
    mainnet: Option<String>,
    futurenet: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TomlSimulatorConfig {
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TomlStorageConfig {
    database: Option<PathBuf>,
    busy_timeout_ms: Option<u64>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
struct TomlConfig {
    network: Option<TomlNetworkConfig>,
    rpc: Option<TomlRpcConfig>,
    simulator: Option<TomlSimulatorConfig>,
    storage: Option<TomlStorageConfig>,
}

impl Config {
    /// Built-in defaults rooted at `data_dir`
    pub fn defaults(data_dir: PathBuf) -> Self {
        Self {
            default_network: Network::default(),
            rpc: RpcSettings::default(),
            simulator_path: None,
            storage: StorageSettings {
                database: database_path(&data_dir),
                busy_timeout: DEFAULT_BUSY_TIMEOUT,
            },
            data_dir,
        }
    }

    /// Load configuration from `<data_dir>/config.toml`, merging with defaults
    ///
    /// A missing file is created from the bundled example. An unreadable or
    /// malformed file is logged and ignored.
    pub fn load(data_dir: PathBuf) -> Self {
        let config_file = config_path(&data_dir);
        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        let mut config = Self::defaults(data_dir);
        match fs::read_to_string(&config_file) {
            Ok(contents) => match toml::from_str::<TomlConfig>(&contents) {
                Ok(toml_config) => config.apply(toml_config),
                Err(e) => tracing::warn!(
                    path = %config_file.display(),
                    error = %e,
                    "Ignoring malformed config file"
                ),
            },
            Err(e) => tracing::debug!(
                path = %config_file.display(),
                error = %e,
                "No readable config file"
            ),
        }

        if config.simulator_path.is_none() {
            config.simulator_path = std::env::var_os(SIMULATOR_PATH_ENV)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from);
        }

        config
    }

    /// Parse a config document on top of the defaults
    pub fn from_toml_str(data_dir: PathBuf, contents: &str) -> Result<Self, toml::de::Error> {
        let toml_config = toml::from_str::<TomlConfig>(contents)?;
        let mut config = Self::defaults(data_dir);
        config.apply(toml_config);
        Ok(config)
    }

    fn apply(&mut self, toml_config: TomlConfig) {
        if let Some(default) = toml_config.network.and_then(|n| n.default) {
            self.default_network = default;
        }

        if let Some(rpc) = toml_config.rpc {
            self.rpc.testnet = rpc.testnet.or(self.rpc.testnet.take());
            self.rpc.mainnet = rpc.mainnet.or(self.rpc.mainnet.take());
            self.rpc.futurenet = rpc.futurenet.or(self.rpc.futurenet.take());
            if let Some(secs) = rpc.timeout_secs {
                self.rpc.timeout = Duration::from_secs(secs);
            }
        }

        if let Some(path) = toml_config.simulator.and_then(|s| s.path) {
            self.simulator_path = Some(expand_home(&path));
        }

        if let Some(storage) = toml_config.storage {
            if let Some(database) = storage.database {
                self.storage.database = expand_home(&database);
            }
            if let Some(ms) = storage.busy_timeout_ms {
                self.storage.busy_timeout = Duration::from_millis(ms);
            }
        }
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(error = %e, "Failed to create config directory");
                return;
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
