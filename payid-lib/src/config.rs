//! Store configuration.
//!
//! Configuration is resolved in layers: defaults, an optional JSON file,
//! then `PAYID_*` environment variables. Binaries may apply command-line
//! overrides on top through the `with_*` setters.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::store::{InMemoryStore, RecordStore, StoreResult};

/// Store backend selection.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local map; contents vanish on exit.
    Memory,
    /// One JSON document per record under the data directory.
    #[default]
    File,
}

impl StoreBackend {
    /// Get the backend name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File => "file",
        }
    }

    /// Parse a backend name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" | "in-memory" => Some(Self::Memory),
            "file" | "fs" | "disk" => Some(Self::File),
            _ => None,
        }
    }
}

/// Configuration for the record store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend to open.
    #[serde(default)]
    pub backend: StoreBackend,

    /// Root directory for file-backed tables.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Logical table name.
    #[serde(default = "default_table_name")]
    pub table_name: String,

    /// Deployment stage; tables of different stages never share storage.
    #[serde(default = "default_stage")]
    pub stage: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".payid")
}

fn default_table_name() -> String {
    "payid".to_string()
}

fn default_stage() -> String {
    "dev".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            data_dir: default_data_dir(),
            table_name: default_table_name(),
            stage: default_stage(),
        }
    }
}

impl StoreConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend.
    pub fn with_backend(mut self, backend: StoreBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the table name.
    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = name.into();
        self
    }

    /// Set the stage.
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = stage.into();
        self
    }

    /// Directory holding this table's documents: `data_dir/<table>-<stage>`.
    pub fn table_dir(&self) -> PathBuf {
        self.data_dir
            .join(format!("{}-{}", self.table_name, self.stage))
    }

    /// Load a configuration file (JSON). Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let data = std::fs::read(path.as_ref())?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Apply `PAYID_*` environment variables on top of `self`.
    ///
    /// Variables:
    /// - `PAYID_STORE_BACKEND` - `memory` or `file`
    /// - `PAYID_DATA_DIR` - root directory for file tables
    /// - `PAYID_TABLE_NAME` - logical table name
    /// - `PAYID_STAGE` - deployment stage
    ///
    /// Unparsable or empty values are ignored.
    ///
    /// # Example
    ///
    /// ```bash
    /// export PAYID_STORE_BACKEND=file
    /// export PAYID_DATA_DIR=/var/lib/payid
    /// export PAYID_STAGE=prod
    /// ```
    pub fn merge_env(self) -> Self {
        self.merge_vars(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with the environment.
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    fn merge_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| var(name).filter(|v| !v.trim().is_empty());

        if let Some(backend) = var("PAYID_STORE_BACKEND").and_then(|s| StoreBackend::parse(&s)) {
            self.backend = backend;
        }
        if let Some(dir) = var("PAYID_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(name) = var("PAYID_TABLE_NAME") {
            self.table_name = name;
        }
        if let Some(stage) = var("PAYID_STAGE") {
            self.stage = stage;
        }
        self
    }

    /// Open the configured store.
    pub fn open(&self) -> StoreResult<Arc<dyn RecordStore>> {
        match self.backend {
            StoreBackend::Memory => Ok(Arc::new(InMemoryStore::new())),
            #[cfg(feature = "file-storage")]
            StoreBackend::File => Ok(Arc::new(crate::store::FileStore::new(self.table_dir())?)),
            #[cfg(not(feature = "file-storage"))]
            StoreBackend::File => Err(crate::store::StoreError::Other(
                "file backend requires the `file-storage` feature".to_string(),
            )),
        }
    }
}
