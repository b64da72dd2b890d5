//! Server settings read from the environment.

use std::path::PathBuf;

use complaint_map_data::paths::{CLUSTER_DATA_ENV, COMMENT_DATA_ENV, DataPaths, project_root};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Everything `run_server` needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Frontend build served at `/` when the directory exists.
    pub static_dir: PathBuf,
    pub data: DataPaths,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            static_dir: project_root().join("app").join("dist"),
            data: DataPaths::default(),
        }
    }
}

impl ServerConfig {
    /// Reads `BIND_ADDR`, `PORT`, `STATIC_DIR`, `CLUSTER_DATA_PATH` and
    /// `COMMENT_DATA_PATH`, keeping defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a custom variable source.
    ///
    /// An unparseable `PORT` falls back to the default.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let port = lookup("PORT").map_or(defaults.port, |raw| {
            raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid PORT '{raw}', using {DEFAULT_PORT}");
                DEFAULT_PORT
            })
        });

        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port,
            static_dir: lookup("STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
            data: DataPaths {
                clusters: lookup(CLUSTER_DATA_ENV).map_or(defaults.data.clusters, PathBuf::from),
                comments: lookup(COMMENT_DATA_ENV).map_or(defaults.data.comments, PathBuf::from),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(ServerConfig::from_lookup(lookup(&[])), ServerConfig::default());
    }

    #[test]
    fn overrides_apply() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("BIND_ADDR", "0.0.0.0"),
            ("PORT", "9000"),
            ("CLUSTER_DATA_PATH", "/tmp/c.csv"),
        ]));
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.data.clusters, PathBuf::from("/tmp/c.csv"));
        assert_eq!(config.data.comments, DataPaths::default().comments);
    }

    #[test]
    fn bad_port_falls_back() {
        let config = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")]));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
