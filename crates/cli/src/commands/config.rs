use std::env;
use std::fs;
use std::path::Path;

use serde::Serialize;
use staybot_core::config::{env_key_for, resolve_config_path, AppConfig};
use toml::Value;

use crate::commands::{load_config, CommandResult};

/// Legacy variable names still honoured by the loader.
const ENV_ALIASES: &[(&str, &str)] = &[
    ("llm.api_key", "OPENAI_API_KEY"),
    ("llm.base_url", "OPENAI_BASE_URL"),
    ("llm.model", "OPENAI_MODEL"),
    ("logging.level", "STAYBOT_LOG_LEVEL"),
    ("logging.format", "STAYBOT_LOG_FORMAT"),
];

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: &'static str,
    pub value: String,
    pub source: String,
}

pub fn run() -> CommandResult {
    let config = match load_config("config") {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let entries = effective_entries(&config);
    let details = serde_json::to_value(&entries).ok();
    CommandResult::success_with_details(
        "config",
        "effective config (source precedence: override > env > file > default)",
        details,
    )
}

pub fn effective_entries(config: &AppConfig) -> Vec<ConfigEntry> {
    let file_path = resolve_config_path(None);
    let file_doc = file_path.as_deref().and_then(load_config_file_doc);
    let entry = |key: &'static str, value: String| ConfigEntry {
        key,
        value,
        source: field_source(key, file_doc.as_ref(), file_path.as_deref()),
    };

    let llm = &config.llm;
    vec![
        entry("database.url", config.database.url.clone()),
        entry("database.max_connections", config.database.max_connections.to_string()),
        entry("database.timeout_secs", config.database.timeout_secs.to_string()),
        entry("catalog.path", config.catalog.path.display().to_string()),
        entry("llm.provider", llm.provider.as_str().to_string()),
        entry("llm.model", llm.model.clone()),
        entry("llm.base_url", llm.base_url.clone().unwrap_or_else(|| "<unset>".to_string())),
        entry(
            "llm.api_key",
            if llm.api_key.is_some() { "<redacted>" } else { "<unset>" }.to_string(),
        ),
        entry("llm.timeout_secs", llm.timeout_secs.to_string()),
        entry("llm.temperature", llm.sampling.temperature.to_string()),
        entry("llm.top_p", llm.sampling.top_p.to_string()),
        entry("llm.max_tokens", llm.sampling.max_tokens.to_string()),
        entry("llm.presence_penalty", llm.sampling.presence_penalty.to_string()),
        entry("llm.frequency_penalty", llm.sampling.frequency_penalty.to_string()),
        entry("server.bind_address", config.server.bind_address.clone()),
        entry("server.port", config.server.port.to_string()),
        entry(
            "server.graceful_shutdown_secs",
            config.server.graceful_shutdown_secs.to_string(),
        ),
        entry("logging.level", config.logging.level.clone()),
        entry("logging.format", config.logging.format.as_str().to_string()),
    ]
}

fn load_config_file_doc(path: &Path) -> Option<Value> {
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(key_path: &str, file_doc: Option<&Value>, file_path: Option<&Path>) -> String {
    let env_key = env_key_for(key_path);
    if env::var_os(&env_key).is_some() {
        return format!("env ({env_key})");
    }
    for (aliased_key, alias) in ENV_ALIASES {
        if *aliased_key == key_path && env::var_os(alias).is_some() {
            return format!("env ({alias})");
        }
    }

    if let Some(doc) = file_doc {
        if contains_path(doc, key_path) {
            let file_path = file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}
