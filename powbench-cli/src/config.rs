//! Configuration loading from powbench.toml
//!
//! The file is optional. When present it is discovered by walking up from the
//! current directory; every field has a default, so partial tables are fine.
//! Command-line flags override file values.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration file name searched for during discovery
pub const CONFIG_FILE_NAME: &str = "powbench.toml";

/// powbench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PowConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Exponent schedule configuration
    #[serde(default)]
    pub schedule: ScheduleConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration for trial execution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    /// Timed calls per trial
    #[serde(default = "default_iterations")]
    pub iterations: u64,
    /// Skip linear-cost kernels for exponents above this value
    #[serde(default = "default_linear_limit")]
    pub linear_limit: u32,
    /// Pin the measuring thread to this CPU
    #[serde(default)]
    pub pin_cpu: Option<usize>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            linear_limit: default_linear_limit(),
            pin_cpu: None,
        }
    }
}

fn default_iterations() -> u64 {
    1_000_000
}
fn default_linear_limit() -> u32 {
    2_000
}

/// How generated exponents grow from one block to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Growth {
    /// 1, 10, 100, ...
    #[default]
    Decade,
    /// 1, 3, 10, 30, 100, ...
    Alternating,
}

impl std::str::FromStr for Growth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "decade" => Ok(Growth::Decade),
            "alternating" => Ok(Growth::Alternating),
            other => Err(format!("Unknown growth mode: {}", other)),
        }
    }
}

/// Exponent schedule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    /// Base shared by every trial
    #[serde(default = "default_base")]
    pub base: f64,
    /// First generated exponent
    #[serde(default = "default_start_exponent")]
    pub start_exponent: u32,
    /// Largest generated exponent
    #[serde(default = "default_max_exponent")]
    pub max_exponent: u32,
    /// Growth between generated exponents
    #[serde(default)]
    pub growth: Growth,
    /// Explicit exponent list; replaces the generated schedule when set
    #[serde(default)]
    pub exponents: Option<Vec<u32>>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            start_exponent: default_start_exponent(),
            max_exponent: default_max_exponent(),
            growth: Growth::default(),
            exponents: None,
        }
    }
}

fn default_base() -> f64 {
    1.000_000_001
}
fn default_start_exponent() -> u32 {
    1
}
fn default_max_exponent() -> u32 {
    1_000_000_000
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format: "human", "json", "csv"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl PowConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Discover and load configuration by walking up from the current directory.
    ///
    /// Returns `Ok(None)` when no file exists; a file that exists but does not
    /// parse is an error rather than a silent fallback to defaults.
    pub fn discover() -> anyhow::Result<Option<Self>> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        Self::discover_from(&cwd)
    }

    /// Discover and load configuration by walking up from `start`.
    pub fn discover_from(start: &Path) -> anyhow::Result<Option<Self>> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                tracing::debug!(path = %config_path.display(), "loading configuration");
                return Self::load(&config_path).map(Some);
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# powbench configuration

[runner]
# Timed calls per trial
iterations = 1000000
# Skip linear-cost kernels above this exponent
linear_limit = 2000
# Pin the measuring thread to a CPU (Linux only, uncomment to enable)
# pin_cpu = 2

[schedule]
# Base shared by every trial
base = 1.000000001
# Generated exponents run from start_exponent up to max_exponent
start_exponent = 1
max_exponent = 1000000000
# Growth: "decade" (1, 10, 100) or "alternating" (1, 3, 10, 30)
growth = "decade"
# Explicit exponent list, replaces the generated schedule (uncomment to enable)
# exponents = [0, 1, 7, 8, 64, 1000]

[output]
# Output format: human, json, csv
format = "human"
"#
        .to_string()
    }
}
