// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Run-count calibration: storage port, filesystem store, and the parsed table.
//!
//! A calibration file is JSON of the form
//!
//! ```json
//! { "runs": { "fpmac_workload": 1000000 } }
//! ```
//!
//! Keys name workloads (canonical or short form). Workloads absent from the
//! file keep their built-in default.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ustress_kernels::Workload;

/// File name of the per-user calibration inside the platform config dir.
pub const USER_CALIBRATION_KEY: &str = "calibration.json";

/// Storage port for raw config blobs (keyed by logical name).
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// I/O error while reading.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Calibration names a workload that does not exist.
    #[error("unknown workload in calibration: {0}")]
    UnknownWorkload(String),
    /// Platform config directory could not be resolved.
    #[error("could not resolve config dir")]
    NoConfigDir,
}

/// Reads config files relative to a base directory.
pub struct FsConfigStore {
    base: PathBuf,
}

impl FsConfigStore {
    /// Create a store rooted at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Create a store rooted at the user config directory (e.g. `~/.config/ustress`).
    pub fn user() -> Result<Self, ConfigError> {
        let proj = ProjectDirs::from("dev", "flyingrobots", "ustress")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::new(proj.config_dir()))
    }

    /// Split a file path into a store on its directory plus the key naming it.
    pub fn for_file(path: &Path) -> (Self, String) {
        let base = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let key = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        (Self::new(base), key)
    }

    /// Base directory of this store.
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        if key.is_empty() {
            return Err(ConfigError::NotFound);
        }
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::NotFound),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }
}

/// Thin service that deserializes config values fetched from a `ConfigStore`.
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Create a new service using the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Load and deserialize `key`. Returns `Ok(None)` if missing or empty.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        match self.load_required(key) {
            Ok(value) => Ok(Some(value)),
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Load and deserialize `key`; a missing or empty blob is `NotFound`.
    pub fn load_required<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        let bytes = self.store.load_raw(key)?;
        if bytes.is_empty() {
            return Err(ConfigError::NotFound);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// On-disk shape of a calibration file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalibrationFile {
    /// Run count per workload name.
    #[serde(default)]
    pub runs: BTreeMap<String, u64>,
}

/// Validated run-count overrides.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Calibration {
    runs: BTreeMap<Workload, u64>,
}

impl Calibration {
    /// Resolve workload names in `file`. Unknown names are rejected.
    pub fn from_file(file: CalibrationFile) -> Result<Self, ConfigError> {
        let mut runs = BTreeMap::new();
        for (name, count) in file.runs {
            let workload = name
                .parse::<Workload>()
                .map_err(|_| ConfigError::UnknownWorkload(name))?;
            runs.insert(workload, count);
        }
        Ok(Self { runs })
    }

    /// Load `key` from `store`. A missing key yields `NotFound`.
    pub fn load<S: ConfigStore>(store: S, key: &str) -> Result<Self, ConfigError> {
        let file = ConfigService::new(store).load_required::<CalibrationFile>(key)?;
        Self::from_file(file)
    }

    /// Load `key` from `store`, treating a missing key as an empty calibration.
    pub fn load_or_default<S: ConfigStore>(store: S, key: &str) -> Result<Self, ConfigError> {
        ConfigService::new(store)
            .load::<CalibrationFile>(key)?
            .map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Override the run count for `workload`.
    pub fn set(&mut self, workload: Workload, runs: u64) {
        self.runs.insert(workload, runs);
    }

    /// Effective run count: the override if present, else the built-in default.
    pub fn runs_for(&self, workload: Workload) -> u64 {
        self.runs
            .get(&workload)
            .copied()
            .unwrap_or_else(|| workload.default_runs())
    }

    /// Whether no overrides are present.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
