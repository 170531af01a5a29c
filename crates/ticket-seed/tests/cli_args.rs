use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{CommandFactory, Parser};
use ticket_seed::cli::{parse_date, resolve_range, resolve_seed, Args, Command};
use ticket_seed::config::GeneratorConfig;
use ticket_seed::output::sql::SqlSchema;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn sql_command_defaults() {
    let args = Args::parse_from(["ticket-seed", "sql"]);
    assert!(args.start.is_none());
    match args.command {
        Command::Sql {
            out,
            schema,
            no_manifest,
        } => {
            assert_eq!(out, PathBuf::from("test_data.sql"));
            assert_eq!(schema, SqlSchema::Calendar);
            assert!(!no_manifest);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn accepts_range_seed_and_schema() {
    let args = Args::parse_from([
        "ticket-seed",
        "--start",
        "2024-10-01",
        "--end",
        "2025-03-31",
        "--seed",
        "42",
        "sql",
        "--schema",
        "simple",
        "--out",
        "out/d1.sql",
    ]);
    assert_eq!(args.start, Some(date(2024, 10, 1)));
    assert_eq!(args.end, Some(date(2025, 3, 31)));
    assert_eq!(args.seed, Some(42));
    assert!(matches!(
        args.command,
        Command::Sql {
            schema: SqlSchema::Simple,
            ..
        }
    ));
}

#[test]
fn malformed_dates_are_rejected() {
    for value in ["2024/10/01", "2024-13-01", "yesterday", ""] {
        let err = parse_date(value).expect_err("date should be rejected");
        assert!(err.to_string().contains("YYYY-MM-DD"), "unexpected error: {err}");
    }
    assert!(Args::try_parse_from(["ticket-seed", "--start", "10/01/2024", "sql"]).is_err());
}

#[test]
fn default_range_is_the_year_before_today() {
    let today = date(2025, 3, 30);
    assert_eq!(
        resolve_range(None, None, today).expect("range"),
        (date(2024, 3, 30), today)
    );
    assert_eq!(
        resolve_range(Some(date(2025, 1, 1)), None, today).expect("range"),
        (date(2025, 1, 1), today)
    );
}

#[test]
fn seed_flag_overrides_config_seed() {
    let config = GeneratorConfig {
        seed: Some(7),
        ..GeneratorConfig::default()
    };
    assert_eq!(resolve_seed(Some(3), &config), 3);
    assert_eq!(resolve_seed(None, &config), 7);
}

#[test]
fn sqlite_help_explains_rerun_needs_replace() {
    let mut command = Args::command();
    let help = command
        .find_subcommand_mut("sqlite")
        .expect("sqlite subcommand")
        .render_long_help()
        .to_string();
    assert!(help.contains("duplicate ids"), "{help}");
    assert!(help.contains("--replace"), "{help}");
}
