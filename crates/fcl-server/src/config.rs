//! Service configuration.
//!
//! [`FclConfig`] is read from a TOML file. Every section and field is
//! optional; anything left out takes the default shown on the type. Command
//! line flags are applied on top by the binaries.

use fcl_algo::{SamplerConfig, SolverKind};
use fcl_core::{FclError, FclResult};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FclConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub solver: SolverConfig,
    pub sampling: SamplingConfig,
    pub map: MapConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
        }
    }
}

/// Location table source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// CSV file loaded once at start-up.
    pub locations: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            locations: PathBuf::from("Zip_codes.csv"),
        }
    }
}

/// Solver selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Backend name: `microlp`, `highs` or `cbc`.
    pub backend: SolverKind,

    /// Per-request deadline in seconds (0 = none).
    pub timeout_seconds: u64,
}

impl SolverConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }
}

/// Sampling parameters plus the optional value seed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Pins opening costs and demands; unset draws them from entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_seed: Option<u64>,

    #[serde(flatten)]
    pub params: SamplerConfig,
}

/// Map rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// When false, responses carry `map_base64: null`.
    pub enabled: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 1200,
            height: 800,
        }
    }
}

impl FclConfig {
    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> FclResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| FclError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> FclResult<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> FclResult<()> {
        self.sampling.params.validate()?;
        if self.map.width == 0 || self.map.height == 0 {
            return Err(FclError::Config(format!(
                "map size {}x{} must be non-zero",
                self.map.width, self.map.height
            )));
        }
        Ok(())
    }
}
