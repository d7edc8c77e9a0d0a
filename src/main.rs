//! Agent Call-Center Metrics CLI
//!
//! Builds the weekly agent metrics workbook for a date range.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use agent_metrics::{parse_report_date, run_report, Config, DateRange};

#[derive(Parser)]
#[command(name = "agent-metrics")]
#[command(about = "Build the weekly call-center agent metrics report", long_about = None)]
#[command(subcommand_negates_reqs = true)]
struct Cli {
    /// Path to configuration file (defaults are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the directory the workbook is written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// First day of the report window (YYYY-MM-DD)
    #[arg(required = true, value_parser = parse_date_arg)]
    start_date: Option<NaiveDate>,

    /// Last day of the report window, inclusive (YYYY-MM-DD)
    #[arg(required = true, value_parser = parse_date_arg)]
    end_date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration
    Validate,

    /// Generate a sample configuration file
    GenerateConfig {
        /// Output path for configuration file
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn parse_date_arg(value: &str) -> std::result::Result<NaiveDate, String> {
    parse_report_date(value).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => {
            let (Some(start), Some(end)) = (cli.start_date, cli.end_date) else {
                anyhow::bail!("START_DATE and END_DATE are required");
            };
            run_command(cli.config, cli.output_dir, start, end)?;
        }

        Some(Commands::Validate) => {
            validate_command(cli.config)?;
        }

        Some(Commands::GenerateConfig { output }) => {
            generate_config_command(output)?;
        }
    }

    Ok(())
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    match config_path {
        Some(path) => Config::from_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => {
            tracing::info!("No configuration file given, using defaults");
            Ok(Config::default())
        }
    }
}

fn run_command(
    config_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<()> {
    let mut config = load_config(config_path)?;

    // Apply overrides
    if let Some(dir) = output_dir {
        config.output.directory = dir;
    }

    let range = DateRange::new(start, end)?;
    let outcome = run_report(&config, range)?;

    println!("Report written to {}", outcome.path.display());
    Ok(())
}

fn validate_command(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    config.validate()?;
    println!("Configuration is valid");
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# Agent Call-Center Metrics Configuration

# === INPUT: The five CSV exports ===
input:
  # Every source name below is required
  sources:
    # Call-center master list (Date/Time, BCI Caller, WT/SA Bonus)
    call_center_data: "data/call_center_master_list.csv"

    # Warm dial totals per agent and category
    dials_data: "data/total_warm_dials.csv"

    # Warm contact totals per agent and category
    contacts_data: "data/total_warm_contacts.csv"

    # Five9 agent daily summary (On Call / Ready state times)
    five9_data: "data/agent_daily_summary.csv"

    # Paylocity timecard summary (no header row)
    paylocity_data: "data/master_timecard_summary.csv"

  # Columns in the dial log that group agents and are never summed
  grouping_columns: ["AGENT GROUP"]

# === OUTPUT: Where the workbook goes ===
output:
  # Directory for agent_call_center_metrics_<start>_<end>.xlsx
  directory: "."

  # Save run metrics as JSON after the report is written
  # metrics_path: "metrics.json"

# === NAMES: Agent identity tables ===
names:
  # Call-log callers counted as another agent (lower-case keys)
  agent_aliases:
    mperez: ysanchez
    mgarcia: ysanchez

  # Payroll first names replaced by the name used in the dial log
  nicknames:
    Ally: Allison
    Mike: Michael
    Matt: Matthew

# === ROUNDING: Quarter-hour tiers for Five9 hours ===
# The hundredths of the hours figure are read as minutes and snapped to the
# tier whose lower bound they reach.
rounding:
  tiers:
    - { min_minutes: 0, value: 0.0 }
    - { min_minutes: 15, value: 0.25 }
    - { min_minutes: 40, value: 0.5 }
    - { min_minutes: 65, value: 0.75 }
    - { min_minutes: 90, value: 1.0 }
"#;

fn generate_config_command(output: PathBuf) -> Result<()> {
    std::fs::write(&output, SAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Generated sample configuration at: {}", output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_dates() {
        let cli = Cli::try_parse_from(["agent-metrics", "2024-01-08", "2024-01-14"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.start_date, NaiveDate::from_ymd_opt(2024, 1, 8));
        assert_eq!(cli.end_date, NaiveDate::from_ymd_opt(2024, 1, 14));
    }

    #[test]
    fn test_cli_rejects_invalid_date() {
        let cli = Cli::try_parse_from(["agent-metrics", "2024-13-01", "2024-01-14"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_requires_both_dates() {
        let cli = Cli::try_parse_from(["agent-metrics", "2024-01-08"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_with_config_and_output_dir() {
        let cli = Cli::try_parse_from([
            "agent-metrics",
            "-c",
            "other.yaml",
            "--output-dir",
            "reports",
            "2024-01-08",
            "2024-01-14",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("other.yaml")));
        assert_eq!(cli.output_dir, Some(PathBuf::from("reports")));
    }

    #[test]
    fn test_cli_parse_validate() {
        let cli = Cli::try_parse_from(["agent-metrics", "validate", "-c", "test.json"]);
        assert!(matches!(cli.unwrap().command, Some(Commands::Validate)));
    }

    #[test]
    fn test_cli_parse_generate_config() {
        let cli = Cli::try_parse_from(["agent-metrics", "generate-config", "-o", "sample.yaml"])
            .unwrap();
        match cli.command {
            Some(Commands::GenerateConfig { output }) => {
                assert_eq!(output, PathBuf::from("sample.yaml"))
            }
            _ => panic!("expected generate-config"),
        }
    }

    #[test]
    fn test_sample_config_is_valid() {
        let config = Config::from_yaml(SAMPLE_CONFIG).unwrap();
        config.validate().unwrap();
        assert_eq!(config.input.sources.len(), 5);
        assert_eq!(config.rounding, Config::default().rounding);
    }
}
