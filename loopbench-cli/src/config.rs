//! Configuration loading from loopbench.toml
//!
//! Loopbench configuration can be specified in a `loopbench.toml` file in the
//! project root. The configuration is automatically discovered by walking up
//! from the current directory. Command line flags override file values.

use loopbench_core::RunSettings;
use loopbench_workloads::{Page, SliceParams, SuiteConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// File name searched for by [`LoopbenchConfig::discover`]
pub const CONFIG_FILE: &str = "loopbench.toml";

/// Loopbench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoopbenchConfig {
    /// Measurement configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Standard suite fixture configuration
    #[serde(default)]
    pub fixture: FixtureConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Measurement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Timed samples per variant
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Per-sample budget (e.g., "500ms", "2s"); reported, not enforced
    #[serde(default)]
    pub timeout: Option<String>,
    /// Run the equivalence check after measuring
    #[serde(default)]
    pub verify: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            timeout: None,
            verify: false,
        }
    }
}

fn default_samples() -> usize {
    loopbench_stats::DEFAULT_SAMPLE_COUNT
}

/// Fixture configuration for the standard suite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureConfig {
    /// Elements per fixture
    #[serde(default = "default_size")]
    pub size: usize,
    /// Seed for the random fixtures
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Elements skipped by `slice_skip_take`
    #[serde(default = "default_skip")]
    pub skip: i64,
    /// Elements kept by `slice_skip_take`
    #[serde(default = "default_take")]
    pub take: i64,
    /// Zero-based page for `slice_paginate`
    #[serde(default = "default_page")]
    pub page: i64,
    /// Page size for `slice_paginate`
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    /// Longest inner list in `flatten_nested`
    #[serde(default = "default_max_inner")]
    pub max_inner: usize,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            seed: default_seed(),
            skip: default_skip(),
            take: default_take(),
            page: default_page(),
            page_size: default_page_size(),
            max_inner: default_max_inner(),
        }
    }
}

fn default_size() -> usize {
    loopbench_workloads::DEFAULT_SIZE
}
fn default_seed() -> u64 {
    loopbench_workloads::DEFAULT_SEED
}
fn default_skip() -> i64 {
    SuiteConfig::default().slice.skip
}
fn default_take() -> i64 {
    SuiteConfig::default().slice.take
}
fn default_page() -> i64 {
    SuiteConfig::default().page.number
}
fn default_page_size() -> i64 {
    SuiteConfig::default().page.size
}
fn default_max_inner() -> usize {
    SuiteConfig::default().max_inner
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "markdown"
    #[serde(default = "default_format")]
    pub format: String,
    /// Write the report to this file instead of stdout
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            path: None,
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl LoopbenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => {
                        tracing::debug!(path = %config_path.display(), "loaded configuration");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %config_path.display(), error = %e, "ignoring invalid configuration");
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Measurement settings for the runner
    pub fn run_settings(&self) -> anyhow::Result<RunSettings> {
        let timeout = self
            .runner
            .timeout
            .as_deref()
            .map(Self::parse_duration)
            .transpose()?
            .map(Duration::from_nanos);
        Ok(RunSettings {
            samples: self.runner.samples.max(1),
            timeout,
        })
    }

    /// Parameters for the standard suite
    pub fn suite_config(&self) -> SuiteConfig {
        let f = &self.fixture;
        SuiteConfig {
            size: f.size,
            seed: f.seed,
            slice: SliceParams::new(f.skip, f.take),
            page: Page::new(f.page, f.page_size),
            max_inner: f.max_inner,
        }
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Loopbench Configuration

[runner]
# Timed samples per variant
samples = 10
# Per-sample budget; a slower sample is reported as timed out (uncomment to enable)
# timeout = "2s"
# Also check that every variant produces an equivalent output
verify = false

[fixture]
# Elements per fixture
size = 100000
# Seed for the random fixtures
seed = 42
# Window for slice_skip_take
skip = 1000
take = 10000
# Zero-based page for slice_paginate
page = 3
page_size = 250
# Longest inner list for flatten_nested
max_inner = 16

[output]
# Default output format: human, json, markdown
format = "human"
# Write the report to a file instead of stdout (uncomment to enable)
# path = "target/loopbench/report.json"
"#
        .to_string()
    }

    /// Parse duration string (e.g., "3s", "500ms", "2m") to nanoseconds
    pub fn parse_duration(s: &str) -> anyhow::Result<u64> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("Empty duration string"));
        }

        // Find where the number ends and unit begins
        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", num_part))?;
        if !value.is_finite() || value < 0.0 {
            return Err(anyhow::anyhow!("Invalid duration: {}", s));
        }

        let multiplier: u64 = match unit_part.to_lowercase().as_str() {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" | "" => 1_000_000_000,
            "m" | "min" => 60_000_000_000,
            _ => return Err(anyhow::anyhow!("Unknown duration unit: {}", unit_part)),
        };

        Ok((value * multiplier as f64) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoopbenchConfig::default();
        assert_eq!(config.runner.samples, 10);
        assert_eq!(config.runner.timeout, None);
        assert_eq!(config.fixture.size, 100_000);
        assert_eq!(config.output.format, "human");
        assert_eq!(config.suite_config(), SuiteConfig::default());
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(LoopbenchConfig::parse_duration("3s").unwrap(), 3_000_000_000);
        assert_eq!(LoopbenchConfig::parse_duration("500ms").unwrap(), 500_000_000);
        assert_eq!(LoopbenchConfig::parse_duration("100us").unwrap(), 100_000);
        assert_eq!(LoopbenchConfig::parse_duration("1000ns").unwrap(), 1000);
        assert_eq!(LoopbenchConfig::parse_duration("2m").unwrap(), 120_000_000_000);
        assert_eq!(LoopbenchConfig::parse_duration("1.5s").unwrap(), 1_500_000_000);
        assert_eq!(LoopbenchConfig::parse_duration("2").unwrap(), 2_000_000_000);
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(LoopbenchConfig::parse_duration("").is_err());
        assert!(LoopbenchConfig::parse_duration("fast").is_err());
        assert!(LoopbenchConfig::parse_duration("3h").is_err());
        assert!(LoopbenchConfig::parse_duration("-1s").is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [runner]
            samples = 3
            timeout = "250ms"

            [fixture]
            size = 64
        "#;

        let config: LoopbenchConfig = toml::from_str(toml_str).unwrap();
        let settings = config.run_settings().unwrap();
        assert_eq!(settings.samples, 3);
        assert_eq!(settings.timeout, Some(Duration::from_millis(250)));
        // Defaults should still apply
        assert_eq!(config.fixture.seed, 42);
        assert_eq!(config.output.format, "human");
        assert_eq!(config.suite_config().size, 64);
    }

    #[test]
    fn test_zero_samples_clamped() {
        let mut config = LoopbenchConfig::default();
        config.runner.samples = 0;
        assert_eq!(config.run_settings().unwrap().samples, 1);
    }

    #[test]
    fn test_default_toml_parses() {
        let default_toml = LoopbenchConfig::default_toml();
        let config: LoopbenchConfig = toml::from_str(&default_toml).unwrap();
        assert_eq!(config.runner.samples, 10);
        assert_eq!(config.suite_config(), SuiteConfig::default());
    }
}
