//! Integration tests for command parsing and configuration
//!
//! Tests the command language as typed at the prompt and the CLI flags.

use std::path::PathBuf;

use kindred_foundation::{ErrorKind, MemberId};
use kindred_runtime::{Command, JsonView, RuntimeConfig};

// =============================================================================
// Commands
// =============================================================================

#[test]
fn quoted_names_stay_together() {
    let command = Command::parse(r#"add "Mary Ann Doe" 30 female"#).unwrap().unwrap();
    assert_eq!(
        command,
        Command::Add {
            name: "Mary Ann Doe".into(),
            age: "30".into(),
            gender: "female".into(),
        }
    );
}

#[test]
fn update_accepts_quoted_values() {
    let command = Command::parse(r#"update 2 name="Jane Smith" age=36"#).unwrap().unwrap();
    assert_eq!(
        command,
        Command::Update {
            id: MemberId::new(2),
            fields: vec![
                ("name".into(), "Jane Smith".into()),
                ("age".into(), "36".into()),
            ],
        }
    );
}

#[test]
fn json_defaults_to_the_display_tree() {
    assert_eq!(
        Command::parse("json").unwrap(),
        Some(Command::Json(JsonView::Tree))
    );
}

#[test]
fn parse_errors_are_command_errors() {
    for line in ["frobnicate", "marry 1", "show x", r#"add "open 1 male"#] {
        let err = Command::parse(line).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Command(_)), "{line:?}");
        assert_eq!(err.status_hint(), 400);
    }
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn batch_run_of_files_on_an_empty_family() {
    let config =
        RuntimeConfig::parse_args(["kindred", "--batch", "--empty", "a.kin"], None).unwrap();
    assert!(config.batch_mode);
    assert!(!config.seed_sample);
    assert_eq!(config.files, vec![PathBuf::from("a.kin")]);
}

#[test]
fn log_filter_precedence() {
    let default = RuntimeConfig::parse_args(["kindred"], None).unwrap();
    assert_eq!(default.log_filter, "warn");

    let env = RuntimeConfig::parse_args(["kindred"], Some("debug".into())).unwrap();
    assert_eq!(env.log_filter, "debug");

    let flag =
        RuntimeConfig::parse_args(["kindred", "--log", "trace"], Some("debug".into())).unwrap();
    assert_eq!(flag.log_filter, "trace");
}
