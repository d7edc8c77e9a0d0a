//! Configuration for the agent metrics report.

use anyhow::Context;
use crate::agent::NameTables;
use crate::error::ReportError;
use crate::sources::{
    CALL_CENTER_DATA, CONTACTS_DATA, DIALS_DATA, FIVE9_DATA, PAYLOCITY_DATA, REQUIRED_SOURCES,
};
use crate::transform::RoundingTiers;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Main configuration for a report run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input sources
    #[serde(default)]
    pub input: InputConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Agent alias and nickname tables
    #[serde(default)]
    pub names: NameTables,

    /// Quarter-hour rounding tiers for Five9 hours
    #[serde(default)]
    pub rounding: RoundingTiers,
}

/// Input file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Source name to CSV path. All five report sources must be present.
    #[serde(default = "default_sources")]
    pub sources: BTreeMap<String, PathBuf>,

    /// Grouping-only columns dropped from the dial log before summing
    #[serde(default = "default_grouping_columns")]
    pub grouping_columns: Vec<String>,
}

impl InputConfig {
    /// Fail with every missing source name when the set is incomplete.
    pub fn check_sources(&self) -> Result<(), ReportError> {
        let missing: Vec<String> = REQUIRED_SOURCES
            .iter()
            .filter(|name| !self.sources.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ReportError::MissingSources { missing })
        }
    }

    /// Path of a named source.
    pub fn source(&self, name: &str) -> Result<&Path, ReportError> {
        self.sources
            .get(name)
            .map(PathBuf::as_path)
            .ok_or_else(|| ReportError::MissingSources {
                missing: vec![name.to_string()],
            })
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            grouping_columns: default_grouping_columns(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the workbook is written to
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,

    /// Optional path to save run metrics JSON after the report is written
    #[serde(default)]
    pub metrics_path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            metrics_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML or JSON file.
    /// Format is auto-detected from file extension (.yaml, .yml, or .json).
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let config: Config = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&contents)?,
            "json" => serde_json::from_str(&contents)?,
            _ => {
                // Try YAML first (it's a superset of JSON)
                serde_yaml::from_str(&contents)?
            }
        };
        Ok(config)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load configuration from a JSON string.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.input.check_sources()?;
        self.rounding.validate()?;

        for (alias, canonical) in &self.names.agent_aliases {
            if alias != &alias.to_lowercase() {
                anyhow::bail!("Agent alias '{}' must be lower-case", alias);
            }
            if canonical.trim().is_empty() {
                anyhow::bail!("Agent alias '{}' maps to an empty username", alias);
            }
        }
        Ok(())
    }
}

// Default value functions for serde
fn default_sources() -> BTreeMap<String, PathBuf> {
    [
        (CALL_CENTER_DATA, "data/call_center_master_list.csv"),
        (DIALS_DATA, "data/total_warm_dials.csv"),
        (CONTACTS_DATA, "data/total_warm_contacts.csv"),
        (FIVE9_DATA, "data/agent_daily_summary.csv"),
        (PAYLOCITY_DATA, "data/master_timecard_summary.csv"),
    ]
    .into_iter()
    .map(|(name, path)| (name.to_string(), PathBuf::from(path)))
    .collect()
}
fn default_grouping_columns() -> Vec<String> {
    vec!["AGENT GROUP".to_string()]
}
fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}
