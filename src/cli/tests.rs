//! Tests for argument parsing and config resolution

use super::*;
use crate::types::FileId;
use clap::Parser;
use pretty_assertions::assert_eq;
use std::io::Write;

#[test]
fn test_parse_tasks_all() {
    let cli = Cli::try_parse_from([
        "cuckoo",
        "--base-url",
        "http://sandbox:8090",
        "tasks",
        "all",
        "--page-size",
        "50",
        "--max-tasks",
        "3",
    ])
    .unwrap();

    assert_eq!(cli.base_url.as_deref(), Some("http://sandbox:8090"));
    assert_eq!(cli.format, OutputFormat::Json);
    match cli.command {
        Commands::Tasks(TaskCommands::All {
            page_size,
            max_tasks,
        }) => {
            assert_eq!(page_size, Some(50));
            assert_eq!(max_tasks, Some(3));
        }
        other => panic!("Expected tasks all, got {other:?}"),
    }
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "cuckoo", "tasks", "view", "42", "--format", "pretty", "-v", "-k", "secret",
    ])
    .unwrap();

    assert!(cli.verbose);
    assert_eq!(cli.format, OutputFormat::Pretty);
    assert_eq!(cli.api_key.as_deref(), Some("secret"));
    assert!(matches!(
        cli.command,
        Commands::Tasks(TaskCommands::View { id: 42 })
    ));
}

#[test]
fn test_parse_reschedule_priority_is_optional() {
    let cli = Cli::try_parse_from(["cuckoo", "tasks", "reschedule", "7"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Tasks(TaskCommands::Reschedule {
            id: 7,
            priority: None
        })
    ));

    let cli =
        Cli::try_parse_from(["cuckoo", "tasks", "reschedule", "7", "--priority", "2"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Tasks(TaskCommands::Reschedule {
            priority: Some(2),
            ..
        })
    ));
}

#[test]
fn test_files_view_requires_exactly_one_key() {
    let cli = Cli::try_parse_from(["cuckoo", "files", "view", "--md5", "abc"]).unwrap();
    match cli.command {
        Commands::Files(FileCommands::View(lookup)) => {
            assert_eq!(lookup.file_id(), Some(FileId::Md5("abc".into())));
        }
        other => panic!("Expected files view, got {other:?}"),
    }

    assert!(Cli::try_parse_from(["cuckoo", "files", "view"]).is_err());
    assert!(
        Cli::try_parse_from(["cuckoo", "files", "view", "--id", "1", "--md5", "abc"]).is_err()
    );
}

#[test]
fn test_load_config_flags_override_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "base_url: http://from-file:8090\napi_key: file-key\npagination:\n  page_size: 20"
    )
    .unwrap();

    let config_path = file.path().to_str().unwrap();
    let cli = Cli::try_parse_from([
        "cuckoo",
        "--config",
        config_path,
        "--base-url",
        "http://from-flag:8090",
        "--api-key",
        "flag-key",
        "tasks",
        "all",
        "--page-size",
        "5",
    ])
    .unwrap();

    let config = Runner::new(cli).load_config().unwrap();
    assert_eq!(config.base_url, "http://from-flag:8090");
    assert_eq!(config.api_key, "flag-key");
    assert_eq!(config.pagination.page_size, 5);
}

#[test]
fn test_load_config_from_file_only() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "base_url: http://from-file:8090\napi_key: file-key\npagination:\n  page_size: 20"
    )
    .unwrap();

    let config_path = file.path().to_str().unwrap();
    let cli = Cli::try_parse_from([
        "cuckoo",
        "--config",
        config_path,
        "--base-url",
        "http://from-file:8090",
        "status",
    ])
    .unwrap();

    let config = Runner::new(cli).load_config().unwrap();
    assert_eq!(config.pagination.page_size, 20);
    assert_eq!(config.base_url, "http://from-file:8090");
}

#[test]
fn test_render_formats() {
    let value = serde_json::json!({"task_id": 7, "deleted": true});

    let cli = Cli::try_parse_from(["cuckoo", "--base-url", "http://x:1", "status"]).unwrap();
    assert_eq!(
        Runner::new(cli).render(&value).unwrap(),
        r#"{"deleted":true,"task_id":7}"#
    );

    let cli = Cli::try_parse_from(["cuckoo", "-f", "pretty", "--base-url", "http://x:1", "status"])
        .unwrap();
    assert!(Runner::new(cli).render(&value).unwrap().contains("\n  \"deleted\": true"));
}

#[test]
fn test_render_failure_is_a_json_error() {
    use std::collections::HashMap;

    // non-string map keys cannot be written as JSON
    let value: HashMap<(i32, i32), i32> = HashMap::from([((1, 2), 3)]);
    let cli = Cli::try_parse_from(["cuckoo", "--base-url", "http://x:1", "status"]).unwrap();

    let err = Runner::new(cli).render(&value).unwrap_err();
    assert!(matches!(err, crate::error::Error::Json(_)));
}
