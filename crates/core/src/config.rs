//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

/// Metadata store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MetadataConfig {
    /// SQLite database file.
    Sqlite {
        /// Path to the database file. Parent directories are created.
        path: PathBuf,
    },
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from("./data/tasklist.db"),
        }
    }
}

/// Upload storage configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Local filesystem storage.
    Filesystem {
        /// Root directory for uploaded files.
        path: PathBuf,
    },
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::Filesystem {
            path: PathBuf::from("./data/uploads"),
        }
    }
}

/// Seeded default user configuration.
///
/// The application runs in single-user mode; the user record is created at
/// startup when missing. The identifier is resolved at bootstrap and threaded
/// through every service call, so nothing below the bootstrap layer assumes a
/// particular user id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserConfig {
    /// Display name for the seeded user.
    #[serde(default = "default_user_name")]
    pub name: String,
    /// Name of the task list seeded alongside the user.
    #[serde(default = "default_list_name")]
    pub default_list: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            name: default_user_name(),
            default_list: default_list_name(),
        }
    }
}

fn default_user_name() -> String {
    "Ali".to_string()
}

fn default_list_name() -> String {
    "My Tasks".to_string()
}

/// Top-level application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub user: UserConfig,
}

impl AppConfig {
    /// Create a test configuration rooted at a scratch directory.
    ///
    /// **For testing only.**
    pub fn for_testing(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            server: ServerConfig::default(),
            metadata: MetadataConfig::Sqlite {
                path: root.join("tasklist.db"),
            },
            storage: StorageConfig::Filesystem {
                path: root.join("uploads"),
            },
            user: UserConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_populated() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.user.name, "Ali");
        assert_eq!(config.user.default_list, "My Tasks");
    }

    #[test]
    fn deserializes_partial_config() {
        let config: AppConfig = serde_json::from_str(
            r#"{"server": {"bind": "0.0.0.0:9000"}, "metadata": {"type": "sqlite", "path": "/tmp/t.db"}}"#,
        )
        .unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        let MetadataConfig::Sqlite { path } = config.metadata;
        assert_eq!(path, PathBuf::from("/tmp/t.db"));
    }
}
