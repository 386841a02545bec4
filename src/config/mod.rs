//! Visualizer configuration with YAML schema and validation.
//!
//! Bounds mirror the interactive controls: array size 10..=100 and per-step
//! delay 10..=500 ms. Values that arrive from the UI are clamped with
//! [`VizConfig::normalize_size`] / [`VizConfig::normalize_delay`] before they
//! reach the trace generator or the player.

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::engine::rng::{SnapshotRng, DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE};
use crate::error::{SortError, SortResult};
use crate::trace::Algorithm;

/// Smallest array the controls allow.
pub const MIN_ARRAY_SIZE: usize = 10;
/// Largest array the controls allow.
pub const MAX_ARRAY_SIZE: usize = 100;
/// Fastest per-step delay.
pub const MIN_DELAY_MS: u64 = 10;
/// Slowest per-step delay.
pub const MAX_DELAY_MS: u64 = 500;

/// Top-level visualizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VizConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Algorithm selected at startup.
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Number of bars.
    #[validate(range(min = 10, max = 100))]
    #[serde(default = "default_array_size")]
    pub array_size: usize,

    /// Per-step playback delay in milliseconds.
    #[validate(range(min = 10, max = 500))]
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Seed for random snapshots.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Value range for random snapshots.
    #[validate(nested)]
    #[serde(default)]
    pub values: ValueRange,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

const fn default_array_size() -> usize {
    50
}

const fn default_delay_ms() -> u64 {
    50
}

const fn default_seed() -> u64 {
    42
}

impl VizConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SortResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SortResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> VizConfigBuilder {
        VizConfigBuilder::default()
    }

    fn validate_semantic(&self) -> SortResult<()> {
        if self.values.min >= self.values.max {
            return Err(SortError::config(format!(
                "value range is empty: min {} >= max {}",
                self.values.min, self.values.max
            )));
        }
        Ok(())
    }

    /// Clamp a requested array size into the allowed range.
    #[must_use]
    pub fn normalize_size(size: usize) -> usize {
        size.clamp(MIN_ARRAY_SIZE, MAX_ARRAY_SIZE)
    }

    /// Clamp a requested delay into the allowed range.
    #[must_use]
    pub fn normalize_delay(delay_ms: u64) -> u64 {
        delay_ms.clamp(MIN_DELAY_MS, MAX_DELAY_MS)
    }

    /// Snapshot generator seeded from this configuration.
    #[must_use]
    pub fn rng(&self) -> SnapshotRng {
        SnapshotRng::new(self.seed)
    }

    /// Draw a snapshot of `array_size` values from `rng`.
    #[must_use]
    pub fn snapshot(&self, rng: &mut SnapshotRng) -> Vec<u32> {
        rng.snapshot_in(self.array_size, self.values.min, self.values.max)
    }
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            algorithm: Algorithm::default(),
            array_size: default_array_size(),
            delay_ms: default_delay_ms(),
            seed: default_seed(),
            values: ValueRange::default(),
        }
    }
}

/// Bar height range for random snapshots, `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ValueRange {
    /// Lowest height.
    #[serde(default = "default_min_value")]
    pub min: u32,
    /// Upper bound (exclusive).
    #[validate(range(min = 1))]
    #[serde(default = "default_max_value")]
    pub max: u32,
}

const fn default_min_value() -> u32 {
    DEFAULT_MIN_VALUE
}

const fn default_max_value() -> u32 {
    DEFAULT_MAX_VALUE
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_VALUE,
            max: DEFAULT_MAX_VALUE,
        }
    }
}

/// Configuration builder for programmatic construction.
///
/// Sizes and delays are clamped into range rather than rejected.
#[derive(Debug, Default)]
pub struct VizConfigBuilder {
    algorithm: Option<Algorithm>,
    array_size: Option<usize>,
    delay_ms: Option<u64>,
    seed: Option<u64>,
}

impl VizConfigBuilder {
    /// Set the algorithm.
    #[must_use]
    pub const fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Set the array size.
    #[must_use]
    pub const fn array_size(mut self, size: usize) -> Self {
        self.array_size = Some(size);
        self
    }

    /// Set the per-step delay.
    #[must_use]
    pub const fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> VizConfig {
        let mut config = VizConfig::default();

        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(size) = self.array_size {
            config.array_size = VizConfig::normalize_size(size);
        }
        if let Some(delay) = self.delay_ms {
            config.delay_ms = VizConfig::normalize_delay(delay);
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        config
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = VizConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.array_size, 50);
        assert_eq!(config.delay_ms, 50);
        assert_eq!(config.algorithm, Algorithm::Bubble);
    }

    #[test]
    fn test_from_yaml_full() {
        let yaml = r"
schema_version: '1.0'
algorithm: insertion
array_size: 20
delay_ms: 100
seed: 7
values:
  min: 1
  max: 100
";
        let config = VizConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.algorithm, Algorithm::Insertion);
        assert_eq!(config.array_size, 20);
        assert_eq!(config.delay_ms, 100);
        assert_eq!(config.seed, 7);
        assert_eq!(config.values, ValueRange { min: 1, max: 100 });
    }

    #[test]
    fn test_from_yaml_defaults() {
        let config = VizConfig::from_yaml("algorithm: selection").unwrap();
        assert_eq!(config.algorithm, Algorithm::Selection);
        assert_eq!(config.array_size, 50);
        assert_eq!(config.values, ValueRange::default());
    }

    #[test]
    fn test_from_yaml_unknown_algorithm() {
        assert!(matches!(
            VizConfig::from_yaml("algorithm: bogo"),
            Err(SortError::YamlParse(_))
        ));
    }

    #[test]
    fn test_from_yaml_unknown_field() {
        assert!(VizConfig::from_yaml("speed: 3").is_err());
    }

    #[test]
    fn test_array_size_out_of_range() {
        assert!(matches!(
            VizConfig::from_yaml("array_size: 500"),
            Err(SortError::Validation(_))
        ));
    }

    #[test]
    fn test_delay_out_of_range() {
        assert!(matches!(
            VizConfig::from_yaml("delay_ms: 5"),
            Err(SortError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_value_range_rejected() {
        let yaml = "values:\n  min: 50\n  max: 50\n";
        assert!(matches!(
            VizConfig::from_yaml(yaml),
            Err(SortError::Config { .. })
        ));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = VizConfig::builder()
            .algorithm(Algorithm::Selection)
            .seed(9)
            .build();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert_eq!(VizConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_builder_clamps() {
        let config = VizConfig::builder().array_size(1_000).delay_ms(1).build();
        assert_eq!(config.array_size, MAX_ARRAY_SIZE);
        assert_eq!(config.delay_ms, MIN_DELAY_MS);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(VizConfig::normalize_size(3), MIN_ARRAY_SIZE);
        assert_eq!(VizConfig::normalize_size(64), 64);
        assert_eq!(VizConfig::normalize_delay(9_999), MAX_DELAY_MS);
    }

    #[test]
    fn test_snapshot_uses_config() {
        let config = VizConfig::builder().array_size(15).seed(3).build();
        let mut rng = config.rng();
        let values = config.snapshot(&mut rng);
        assert_eq!(values.len(), 15);
        assert!(values.iter().all(|v| (10..510).contains(v)));
        assert_eq!(values, config.snapshot(&mut config.rng()));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            VizConfig::load("/nonexistent/sortscope.yaml"),
            Err(SortError::Io(_))
        ));
    }
}
