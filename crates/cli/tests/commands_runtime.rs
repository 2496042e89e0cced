use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use serde_json::Value;
use staybot_cli::commands::scan::ScanOptions;
use staybot_cli::commands::{config, migrate, scan, seed};
use tempfile::TempDir;

#[test]
fn migrate_returns_success_with_valid_env() {
    let dir = TempDir::new().expect("tempdir");
    let url = database_url(&dir);

    with_env(&[("STAYBOT_DATABASE_URL", &url)], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 0, "expected successful migrate run: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "ok");
    });
}

#[test]
fn migrate_returns_config_failure_for_non_sqlite_url() {
    with_env(&[("STAYBOT_DATABASE_URL", "postgres://localhost/staybot")], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn seed_loads_once_then_skips() {
    let dir = TempDir::new().expect("tempdir");
    let url = database_url(&dir);

    with_env(&[("STAYBOT_DATABASE_URL", &url)], || {
        let first = seed::run();
        assert_eq!(first.exit_code, 0, "expected first seed success: {}", first.output);
        let first_payload = parse_payload(&first.output);
        assert_eq!(first_payload["message"], "loaded 3 sample bookings");

        let second = seed::run();
        assert_eq!(second.exit_code, 0, "expected second seed success");
        let second_payload = parse_payload(&second.output);
        assert_eq!(second_payload["status"], "ok");
        assert!(second_payload["message"].as_str().unwrap_or_default().contains("already has data"));
    });
}

#[test]
fn config_attributes_env_values_and_redacts_api_key() {
    with_env(
        &[
            ("STAYBOT_LLM_PROVIDER", "openai"),
            ("STAYBOT_LLM_API_KEY", "sk-live-secret"),
            ("OPENAI_MODEL", "gpt-4o-mini"),
        ],
        || {
            let result = config::run();
            assert_eq!(result.exit_code, 0, "expected config report: {}", result.output);
            assert!(!result.output.contains("sk-live-secret"));

            let payload = parse_payload(&result.output);
            let entries = payload["details"].as_array().cloned().unwrap_or_default();
            let entry = |key: &str| {
                entries.iter().find(|entry| entry["key"] == key).cloned().unwrap_or(Value::Null)
            };

            assert_eq!(entry("llm.api_key")["value"], "<redacted>");
            assert_eq!(entry("llm.api_key")["source"], "env (STAYBOT_LLM_API_KEY)");
            assert_eq!(entry("llm.model")["value"], "gpt-4o-mini");
            assert_eq!(entry("llm.model")["source"], "env (OPENAI_MODEL)");
            assert_eq!(entry("server.port")["source"], "default");
        },
    );
}

#[test]
fn scan_reads_file_and_ranks_against_catalog() {
    let dir = TempDir::new().expect("tempdir");
    let reply_path = dir.path().join("reply.txt");
    let catalog_path = dir.path().join("houses.json");
    fs::write(&reply_path, "Let me check.\n<HOUSE_LIST_DATA>\n{\"guests\": 4}\n</HOUSE_LIST_DATA>")
        .expect("write reply");
    fs::write(
        &catalog_path,
        r#"[{"id": 1, "name": "Pool Villa", "price_per_night": 150, "guests": 4},
            {"id": 2, "name": "Garden Bungalow", "price_per_night": 75, "guests": 2}]"#,
    )
    .expect("write catalog");

    let result = scan::run(ScanOptions { file: Some(reply_path), catalog: Some(catalog_path) });
    let payload = parse_payload(&result.output);

    assert_eq!(result.exit_code, 0);
    assert_eq!(payload["command"], "scan");
    assert_eq!(payload["details"]["options"].as_array().map(Vec::len), Some(1));
    assert_eq!(payload["details"]["options"][0]["name"], "Pool Villa");
}

#[test]
fn scan_reports_unreadable_input() {
    let dir = TempDir::new().expect("tempdir");

    let result = scan::run(ScanOptions {
        file: Some(dir.path().join("missing.txt")),
        catalog: None,
    });

    assert_eq!(result.exit_code, 3);
    assert_eq!(parse_payload(&result.output)["error_class"], "input_read");
}

fn database_url(dir: &TempDir) -> String {
    format!("sqlite://{}", dir.path().join("staybot.db").display())
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "STAYBOT_DATABASE_URL",
        "STAYBOT_DATABASE_MAX_CONNECTIONS",
        "STAYBOT_DATABASE_TIMEOUT_SECS",
        "STAYBOT_CATALOG_PATH",
        "STAYBOT_LLM_PROVIDER",
        "STAYBOT_LLM_API_KEY",
        "STAYBOT_LLM_BASE_URL",
        "STAYBOT_LLM_MODEL",
        "STAYBOT_LLM_TIMEOUT_SECS",
        "STAYBOT_LLM_TEMPERATURE",
        "STAYBOT_LLM_TOP_P",
        "STAYBOT_LLM_MAX_TOKENS",
        "STAYBOT_SERVER_BIND_ADDRESS",
        "STAYBOT_SERVER_PORT",
        "STAYBOT_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "STAYBOT_LOGGING_LEVEL",
        "STAYBOT_LOGGING_FORMAT",
        "STAYBOT_LOG_LEVEL",
        "STAYBOT_LOG_FORMAT",
        "OPENAI_API_KEY",
        "OPENAI_BASE_URL",
        "OPENAI_MODEL",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
