use std::path::PathBuf;

use serde::Deserialize;

/// Daemon configuration, loadable from a YAML file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the content server binds, all local addresses by default.
    pub listen_addr: String,
    /// Upper bound on simultaneously served connections. Excess connections
    /// wait in the OS accept queue.
    pub max_connections: usize,
    /// Listen backlog handed to the OS.
    pub accept_backlog: u32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding stored blobs, one file per content id.
    pub root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:4110".to_string(),
            max_connections: 32,
            accept_backlog: 20,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("rhizome-store"),
        }
    }
}

impl Config {
    /// Loads configuration from the file named by `RHIZOME_CONFIG`, falling
    /// back to defaults. `RHIZOME_LISTEN` and `RHIZOME_STORE` override the
    /// corresponding fields afterwards.
    pub fn load() -> Self {
        let mut cfg = match std::env::var("RHIZOME_CONFIG") {
            Ok(path) => match std::fs::read_to_string(&path) {
                Ok(text) => Self::from_yaml(&text).unwrap_or_else(|e| {
                    tracing::warn!("ignoring malformed config {}: {}", path, e);
                    Self::default()
                }),
                Err(e) => {
                    tracing::warn!("could not read config {}: {}", path, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var("RHIZOME_LISTEN") {
            cfg.server.listen_addr = addr;
        }
        if let Ok(root) = std::env::var("RHIZOME_STORE") {
            cfg.store.root = PathBuf::from(root);
        }

        cfg
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}
