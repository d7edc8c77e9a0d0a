//! End-to-end tests: CSV fixtures on disk through to the written workbook.
//!
//! Tests cover:
//! 1. A hand-computed report for one agent plus a payroll-only row
//! 2. Repeat runs over the same inputs
//! 3. Missing sources
//! 4. Workbook and metrics files on disk

use crate::config::Config;
use crate::date_range::DateRange;
use crate::error::ReportError;
use crate::pipeline::{run_report, Pipeline, RunMetrics};
use crate::sources::{CONTACTS_DATA, PAYLOCITY_DATA};
use chrono::NaiveDate;
use std::path::Path;
use tempfile::TempDir;

const CALLS: &str = "\
Date/Time,BCI Caller,WT/SA Bonus
2024-01-09 10:15:00,jdoe,$25.00
2024-01-10 11:00:00,JDOE,$25.00
2024-01-14 16:45:00,jdoe,$50.00
2024-01-11 09:00:00,jdoe,$0.00
2024-01-15 09:00:00,jdoe,$25.00
2024-01-09 09:00:00,asmith,$25.00
not-a-date,jdoe,$25.00
";

const CONTACTS: &str = "\
AGENT,AGENT FIRST NAME,AGENT LAST NAME,Inbound,Outbound
jdoe@example.com,John,Doe,4,6
";

const DIALS: &str = "\
AGENT GROUP,AGENT,AGENT FIRST NAME,AGENT LAST NAME,Calls
Sales,jdoe@example.com,John,Doe,60
";

const FIVE9: &str = "\
AGENT,On Call / AGENT STATE TIME,Ready / AGENT STATE TIME
jdoe@example.com,3:00:00,1:00:00
jdoe@example.com,2:30:00,1:06:00
bad@example.com,1:00,0:00:00
";

const PAYROLL: &str = "\
Timecard Summary,,,,
ID: 101,\"DOE, john\",,,
,,,Total Hours,40
ID: 102,\"SMITH, pat\",,,
,,,Total Hours,38.5
";

fn write_fixtures(dir: &Path) -> Config {
    let mut config = Config::default();
    for (name, file, contents) in [
        ("call_center_data", "calls.csv", CALLS),
        ("contacts_data", "contacts.csv", CONTACTS),
        ("dials_data", "dials.csv", DIALS),
        ("five9_data", "five9.csv", FIVE9),
        ("paylocity_data", "payroll.csv", PAYROLL),
    ] {
        let path = dir.join(file);
        std::fs::write(&path, contents).unwrap();
        config.input.sources.insert(name.to_string(), path);
    }
    config.output.directory = dir.join("out");
    config
}

fn week() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(),
    )
    .unwrap()
}

#[test]
fn test_single_agent_report() {
    let dir = TempDir::new().unwrap();
    let config = write_fixtures(dir.path());

    let mut metrics = RunMetrics::new();
    let pipeline = Pipeline::from_config(&config, &mut metrics).unwrap();
    let report = pipeline.run(&week(), &mut metrics).unwrap();

    assert_eq!(report.rows.len(), 2);

    let john = &report.rows[0];
    assert_eq!(john.display_name, "John D");
    assert_eq!(john.dials, Some(60.0));
    assert_eq!(john.contacts, Some(10.0));
    assert_eq!(john.sets, Some(3));
    assert_eq!(john.sets_per_dial, Some(5.0));
    assert_eq!(john.sets_per_contact, Some(0.3));
    assert_eq!(john.five9_hours, Some(7.6));
    assert_eq!(john.five9_hours_rounded, Some(7.5));
    assert_eq!(john.sets_per_five9_hour, Some(0.4));
    assert_eq!(john.paylocity_hours.as_deref(), Some("40.0"));
    assert_eq!(john.five9_paylocity_ratio.as_deref(), Some("19.00%"));

    let pat = &report.rows[1];
    assert_eq!(pat.display_name, "Pat S");
    assert_eq!(pat.agent, None);
    assert_eq!(pat.sets, None);
    assert_eq!(pat.paylocity_hours.as_deref(), Some("38.5"));
    assert_eq!(pat.five9_paylocity_ratio, None);

    assert_eq!(metrics.unreadable_timestamps, 1);
    assert_eq!(metrics.malformed_durations, 1);
    assert_eq!(metrics.completed_sets, 4);
    assert_eq!(metrics.dropped_rows.get("contacts"), Some(&1));
    assert_eq!(metrics.outer_join.matched, 1);
    assert_eq!(metrics.outer_join.payroll_only, 1);
    assert_eq!(metrics.output_rows, 2);
}

#[test]
fn test_repeat_runs_are_identical() {
    let dir = TempDir::new().unwrap();
    let config = write_fixtures(dir.path());

    let mut metrics = RunMetrics::new();
    let pipeline = Pipeline::from_config(&config, &mut metrics).unwrap();
    let first = pipeline.run(&week(), &mut RunMetrics::new()).unwrap();
    let second = pipeline.run(&week(), &mut RunMetrics::new()).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_vec(&first.rows).unwrap(),
        serde_json::to_vec(&second.rows).unwrap()
    );
}

#[test]
fn test_narrow_window_changes_sets_only() {
    let dir = TempDir::new().unwrap();
    let config = write_fixtures(dir.path());

    let mut metrics = RunMetrics::new();
    let pipeline = Pipeline::from_config(&config, &mut metrics).unwrap();
    let single_day = DateRange::new(
        NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
    )
    .unwrap();
    let report = pipeline.run(&single_day, &mut metrics).unwrap();

    let john = &report.rows[0];
    assert_eq!(john.sets, Some(1));
    assert_eq!(john.dials, Some(60.0));
    assert_eq!(john.five9_hours, Some(7.6));
}

#[test]
fn test_missing_sources_are_reported() {
    let dir = TempDir::new().unwrap();
    let mut config = write_fixtures(dir.path());
    config.input.sources.remove(CONTACTS_DATA);
    config.input.sources.remove(PAYLOCITY_DATA);

    let err = run_report(&config, week()).unwrap_err();
    match err.downcast_ref::<ReportError>() {
        Some(ReportError::MissingSources { missing }) => {
            assert_eq!(missing, &vec![CONTACTS_DATA.to_string(), PAYLOCITY_DATA.to_string()]);
        }
        other => panic!("expected missing sources, got {:?}", other),
    }
    assert!(!config.output.directory.exists());
}

#[test]
fn test_run_report_writes_workbook_and_metrics() {
    let dir = TempDir::new().unwrap();
    let mut config = write_fixtures(dir.path());
    let metrics_path = dir.path().join("metrics.json");
    config.output.metrics_path = Some(metrics_path.clone());

    let outcome = run_report(&config, week()).unwrap();

    assert_eq!(
        outcome.path,
        config
            .output
            .directory
            .join("agent_call_center_metrics_2024-01-08_2024-01-14.xlsx")
    );
    let bytes = std::fs::read(&outcome.path).unwrap();
    assert!(bytes.starts_with(b"PK"));

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&metrics_path).unwrap()).unwrap();
    assert_eq!(saved["output_rows"], 2);
    assert_eq!(saved["rows_loaded"]["call_center_data"], 7);
    assert_eq!(outcome.metrics.output_rows, 2);
}
