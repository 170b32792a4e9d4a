//! Run configuration
//!
//! Everything is optional in the TOML file; missing keys fall back to the
//! defaults below. Binaries layer their command-line flags on top.
//!
//! ```toml
//! [pipeline]
//! seed_min = 1
//! seed_max = 200
//! steps = 5000
//! parallel = true
//!
//! [rips]
//! max_epsilon = 25.0
//!
//! [walk]
//! seed = 871
//! steps = 10000
//!
//! [output]
//! summary_path = "summary.csv"
//! points_path = "points.csv"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Seed range and step bound of a summary run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    #[serde(default = "PipelineConfig::default_seed_min")]
    pub seed_min: u64,
    #[serde(default = "PipelineConfig::default_seed_max")]
    pub seed_max: u64,
    /// Maximum transitions per seed
    #[serde(default = "PipelineConfig::default_steps")]
    pub steps: usize,
    /// Fan seeds out over the rayon pool
    #[serde(default)]
    pub parallel: bool,
}

impl PipelineConfig {
    fn default_seed_min() -> u64 {
        1
    }
    fn default_seed_max() -> u64 {
        5000
    }
    fn default_steps() -> usize {
        5000
    }

    pub fn validate(&self) -> Result<()> {
        if self.seed_min == 0 || self.seed_min > self.seed_max {
            return Err(Error::InvalidRange {
                min: self.seed_min,
                max: self.seed_max,
            });
        }
        Ok(())
    }

    /// Number of seeds in the inclusive range
    pub fn n_seeds(&self) -> u64 {
        self.seed_max.saturating_sub(self.seed_min) + 1
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seed_min: Self::default_seed_min(),
            seed_max: Self::default_seed_max(),
            steps: Self::default_steps(),
            parallel: false,
        }
    }
}

/// Vietoris-Rips oracle settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RipsConfig {
    /// Largest edge length in the filtration; unset means unbounded
    #[serde(default)]
    pub max_epsilon: Option<f64>,
}

impl RipsConfig {
    pub fn validate(&self) -> Result<()> {
        match self.max_epsilon {
            Some(eps) if eps.is_nan() || eps < 0.0 => {
                Err(Error::config(format!("max_epsilon must be >= 0, got {eps}")))
            }
            _ => Ok(()),
        }
    }
}

/// Single-seed walk exported as the path artifact
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalkConfig {
    #[serde(default = "WalkConfig::default_seed")]
    pub seed: u64,
    #[serde(default = "WalkConfig::default_steps")]
    pub steps: usize,
}

impl WalkConfig {
    fn default_seed() -> u64 {
        871
    }
    fn default_steps() -> usize {
        10_000
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            seed: Self::default_seed(),
            steps: Self::default_steps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_summary_path")]
    pub summary_path: PathBuf,
    #[serde(default = "OutputConfig::default_points_path")]
    pub points_path: PathBuf,
}

impl OutputConfig {
    fn default_summary_path() -> PathBuf {
        PathBuf::from("summary.csv")
    }
    fn default_points_path() -> PathBuf {
        PathBuf::from("points.csv")
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            summary_path: Self::default_summary_path(),
            points_path: Self::default_points_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub rips: RipsConfig,
    #[serde(default)]
    pub walk: WalkConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Parse a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a config file that must exist
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|err| Error::config(format!("failed to read {}: {err}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<()> {
        self.pipeline.validate()?;
        self.rips.validate()?;
        if self.walk.seed == 0 {
            return Err(Error::InvalidSeed(0));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_path(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!(
            "collatz_ant_config_test_{}_{}",
            name,
            std::process::id()
        ));
        p
    }

    #[test]
    fn test_defaults_match_reference_run() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.pipeline.seed_min, 1);
        assert_eq!(cfg.pipeline.seed_max, 5000);
        assert_eq!(cfg.pipeline.steps, 5000);
        assert!(!cfg.pipeline.parallel);
        assert_eq!(cfg.rips.max_epsilon, None);
        assert_eq!(cfg.walk.seed, 871);
        assert_eq!(cfg.output.summary_path, PathBuf::from("summary.csv"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let cfg = AppConfig::from_toml_str(
            "[pipeline]\nseed_max = 200\nparallel = true\n\n[rips]\nmax_epsilon = 4.5\n",
        )
        .unwrap();
        assert_eq!(cfg.pipeline.seed_min, 1);
        assert_eq!(cfg.pipeline.seed_max, 200);
        assert!(cfg.pipeline.parallel);
        assert_eq!(cfg.rips.max_epsilon, Some(4.5));
        assert_eq!(cfg.walk, WalkConfig::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = AppConfig::from_toml_str("[pipeline]\nseed_min = 10\nseed_max = 3\n").unwrap_err();
        assert!(matches!(err, Error::InvalidRange { min: 10, max: 3 }));
    }

    #[test]
    fn test_negative_epsilon_rejected() {
        assert!(AppConfig::from_toml_str("[rips]\nmax_epsilon = -1.0\n").is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = AppConfig::from_toml_str("[pipeline\nseed_min = 1").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let path = unique_path("missing");
        assert!(matches!(AppConfig::load(&path), Err(Error::Config(_))));
        assert_eq!(AppConfig::load_or_default(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_from_disk() {
        let path = unique_path("disk");
        fs::write(&path, "[walk]\nseed = 27\nsteps = 500\n").unwrap();
        let cfg = AppConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(cfg.walk.seed, 27);
        assert_eq!(cfg.walk.steps, 500);
    }

    #[test]
    fn test_seed_count() {
        let cfg = PipelineConfig {
            seed_min: 5,
            seed_max: 9,
            ..PipelineConfig::default()
        };
        assert_eq!(cfg.n_seeds(), 5);
    }
}
