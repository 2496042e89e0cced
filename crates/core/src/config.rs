//! Layered runtime configuration.
//!
//! Precedence, lowest to highest: built-in defaults, the TOML file
//! (`staybot.toml` or `config/staybot.toml`), `STAYBOT_*` environment
//! variables, then explicit [`ConfigOverrides`].

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_PREFIX: &str = "STAYBOT_";
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["staybot.toml", "config/staybot.toml"];

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub catalog: CatalogConfig,
    pub llm: LlmConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub api_key: Option<SecretString>,
    pub base_url: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
    pub sampling: SamplingConfig,
}

/// Completion parameters sent with every request. `max_tokens == 0` means
/// the field is omitted and the provider default applies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub graceful_shutdown_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    #[serde(rename = "openai")]
    OpenAi,
    Ollama,
}

impl LlmProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Ollama => "ollama",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Ollama => "http://localhost:11434/v1",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub database_url: Option<String>,
    pub catalog_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub llm_provider: Option<LlmProvider>,
    pub llm_model: Option<String>,
    pub server_port: Option<u16>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            top_p: 0.3,
            max_tokens: 0,
            presence_penalty: 0.1,
            frequency_penalty: 0.3,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite://staybot.db".to_string(),
                max_connections: 5,
                timeout_secs: 30,
            },
            catalog: CatalogConfig { path: PathBuf::from("data/houses.json") },
            llm: LlmConfig {
                provider: LlmProvider::Ollama,
                api_key: None,
                base_url: Some(LlmProvider::Ollama.default_base_url().to_string()),
                model: "llama3.1".to_string(),
                timeout_secs: 60,
                sampling: SamplingConfig::default(),
            },
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8080,
                graceful_shutdown_secs: 15,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "ollama" => Ok(Self::Ollama),
            other => Err(ConfigError::Validation(format!(
                "unsupported llm provider `{other}` (expected openai|ollama)"
            ))),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = resolve_config_path(options.config_path.as_deref()) {
            config.apply_patch(read_patch(&path)?);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATHS[0]));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.align_base_url_with_provider();
        config.validate()?;

        Ok(config)
    }

    /// A provider switched away from ollama must not keep ollama's default URL.
    fn align_base_url_with_provider(&mut self) {
        let ollama_default = LlmProvider::Ollama.default_base_url();
        if self.llm.base_url.as_deref() == Some(ollama_default) {
            self.llm.base_url = Some(self.llm.provider.default_base_url().to_string());
        }
    }

    /// Address the HTTP listener binds to.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(database) = patch.database {
            set(&mut self.database.url, database.url);
            set(&mut self.database.max_connections, database.max_connections);
            set(&mut self.database.timeout_secs, database.timeout_secs);
        }

        if let Some(catalog) = patch.catalog {
            set(&mut self.catalog.path, catalog.path);
        }

        if let Some(llm) = patch.llm {
            set(&mut self.llm.provider, llm.provider);
            if let Some(api_key) = llm.api_key {
                self.llm.api_key = Some(SecretString::from(api_key));
            }
            if let Some(base_url) = llm.base_url {
                self.llm.base_url = Some(base_url);
            }
            set(&mut self.llm.model, llm.model);
            set(&mut self.llm.timeout_secs, llm.timeout_secs);
            set(&mut self.llm.sampling.temperature, llm.temperature);
            set(&mut self.llm.sampling.top_p, llm.top_p);
            set(&mut self.llm.sampling.max_tokens, llm.max_tokens);
            set(&mut self.llm.sampling.presence_penalty, llm.presence_penalty);
            set(&mut self.llm.sampling.frequency_penalty, llm.frequency_penalty);
        }

        if let Some(server) = patch.server {
            set(&mut self.server.bind_address, server.bind_address);
            set(&mut self.server.port, server.port);
            set(&mut self.server.graceful_shutdown_secs, server.graceful_shutdown_secs);
        }

        if let Some(logging) = patch.logging {
            set(&mut self.logging.level, logging.level);
            set(&mut self.logging.format, logging.format);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("STAYBOT_DATABASE_URL") {
            self.database.url = value;
        }
        if let Some(value) = read_env("STAYBOT_DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_env("STAYBOT_DATABASE_MAX_CONNECTIONS", &value)?;
        }
        if let Some(value) = read_env("STAYBOT_DATABASE_TIMEOUT_SECS") {
            self.database.timeout_secs = parse_env("STAYBOT_DATABASE_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("STAYBOT_CATALOG_PATH") {
            self.catalog.path = PathBuf::from(value);
        }

        if let Some(value) = read_env("STAYBOT_LLM_PROVIDER") {
            self.llm.provider = value.parse()?;
        }
        if let Some(value) = read_env_with_alias("STAYBOT_LLM_API_KEY", "OPENAI_API_KEY") {
            self.llm.api_key = Some(SecretString::from(value));
        }
        if let Some(value) = read_env_with_alias("STAYBOT_LLM_BASE_URL", "OPENAI_BASE_URL") {
            self.llm.base_url = Some(value);
        }
        if let Some(value) = read_env_with_alias("STAYBOT_LLM_MODEL", "OPENAI_MODEL") {
            self.llm.model = value;
        }
        if let Some(value) = read_env("STAYBOT_LLM_TIMEOUT_SECS") {
            self.llm.timeout_secs = parse_env("STAYBOT_LLM_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read_env("STAYBOT_LLM_TEMPERATURE") {
            self.llm.sampling.temperature = parse_env("STAYBOT_LLM_TEMPERATURE", &value)?;
        }
        if let Some(value) = read_env("STAYBOT_LLM_TOP_P") {
            self.llm.sampling.top_p = parse_env("STAYBOT_LLM_TOP_P", &value)?;
        }
        if let Some(value) = read_env("STAYBOT_LLM_MAX_TOKENS") {
            self.llm.sampling.max_tokens = parse_env("STAYBOT_LLM_MAX_TOKENS", &value)?;
        }

        if let Some(value) = read_env("STAYBOT_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("STAYBOT_SERVER_PORT") {
            self.server.port = parse_env("STAYBOT_SERVER_PORT", &value)?;
        }
        if let Some(value) = read_env("STAYBOT_SERVER_GRACEFUL_SHUTDOWN_SECS") {
            self.server.graceful_shutdown_secs =
                parse_env("STAYBOT_SERVER_GRACEFUL_SHUTDOWN_SECS", &value)?;
        }

        if let Some(value) = read_env_with_alias("STAYBOT_LOGGING_LEVEL", "STAYBOT_LOG_LEVEL") {
            self.logging.level = value;
        }
        if let Some(value) = read_env_with_alias("STAYBOT_LOGGING_FORMAT", "STAYBOT_LOG_FORMAT") {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        set(&mut self.database.url, overrides.database_url);
        set(&mut self.catalog.path, overrides.catalog_path);
        set(&mut self.logging.level, overrides.log_level);
        set(&mut self.llm.provider, overrides.llm_provider);
        set(&mut self.llm.model, overrides.llm_model);
        set(&mut self.server.port, overrides.server_port);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_database(&self.database)?;
        validate_catalog(&self.catalog)?;
        validate_llm(&self.llm)?;
        validate_server(&self.server)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

/// Environment variable that overrides the dotted `key_path`, e.g.
/// `llm.api_key` becomes `STAYBOT_LLM_API_KEY`.
pub fn env_key_for(key_path: &str) -> String {
    format!("{ENV_PREFIX}{}", key_path.replace('.', "_").to_ascii_uppercase())
}

/// The config file `load` would read, if any.
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    DEFAULT_CONFIG_PATHS.into_iter().map(PathBuf::from).find(|path| path.exists())
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find('}').ok_or(ConfigError::UnterminatedInterpolation)?;
        let key = &after[..end];
        let value = env::var(key)
            .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.to_string() })?;
        output.push_str(&value);
        rest = &after[end + 1..];
    }

    output.push_str(rest);
    Ok(output)
}

fn validate_database(database: &DatabaseConfig) -> Result<(), ConfigError> {
    let url = database.url.trim();
    let sqlite_url =
        url.starts_with("sqlite://") || url.starts_with("sqlite::") || url == ":memory:";
    if !sqlite_url {
        return Err(ConfigError::Validation(
            "database.url must be a sqlite URL (`sqlite://...`, `sqlite::...`, or `:memory:`)"
                .to_string(),
        ));
    }

    if database.max_connections == 0 {
        return Err(ConfigError::Validation(
            "database.max_connections must be greater than zero".to_string(),
        ));
    }

    if !(1..=300).contains(&database.timeout_secs) {
        return Err(ConfigError::Validation(
            "database.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    if catalog.path.as_os_str().is_empty() {
        return Err(ConfigError::Validation("catalog.path must not be empty".to_string()));
    }
    Ok(())
}

fn validate_llm(llm: &LlmConfig) -> Result<(), ConfigError> {
    if !(1..=300).contains(&llm.timeout_secs) {
        return Err(ConfigError::Validation(
            "llm.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    match llm.provider {
        LlmProvider::OpenAi => {
            let missing = llm
                .api_key
                .as_ref()
                .map(|value| value.expose_secret().trim().is_empty())
                .unwrap_or(true);
            if missing {
                return Err(ConfigError::Validation(
                    "llm.api_key is required for the openai provider (set STAYBOT_LLM_API_KEY or OPENAI_API_KEY)"
                        .to_string(),
                ));
            }
        }
        LlmProvider::Ollama => {
            let missing =
                llm.base_url.as_ref().map(|value| value.trim().is_empty()).unwrap_or(true);
            if missing {
                return Err(ConfigError::Validation(
                    "llm.base_url is required for the ollama provider".to_string(),
                ));
            }
        }
    }

    if let Some(base_url) = &llm.base_url {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Validation(
                "llm.base_url must start with http:// or https://".to_string(),
            ));
        }
    }

    let sampling = &llm.sampling;
    if !(0.0..=2.0).contains(&sampling.temperature) {
        return Err(ConfigError::Validation(
            "llm.temperature must be in range 0.0..=2.0".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&sampling.top_p) {
        return Err(ConfigError::Validation("llm.top_p must be in range 0.0..=1.0".to_string()));
    }
    for (key, penalty) in [
        ("llm.presence_penalty", sampling.presence_penalty),
        ("llm.frequency_penalty", sampling.frequency_penalty),
    ] {
        if !(-2.0..=2.0).contains(&penalty) {
            return Err(ConfigError::Validation(format!("{key} must be in range -2.0..=2.0")));
        }
    }

    Ok(())
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.port == 0 {
        return Err(ConfigError::Validation("server.port must be greater than zero".to_string()));
    }

    if server.graceful_shutdown_secs == 0 {
        return Err(ConfigError::Validation(
            "server.graceful_shutdown_secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn read_env_with_alias(key: &str, alias: &str) -> Option<String> {
    read_env(key).or_else(|| read_env(alias))
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    database: Option<DatabasePatch>,
    catalog: Option<CatalogPatch>,
    llm: Option<LlmPatch>,
    server: Option<ServerPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct DatabasePatch {
    url: Option<String>,
    max_connections: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct LlmPatch {
    provider: Option<LlmProvider>,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
    temperature: Option<f32>,
    top_p: Option<f32>,
    max_tokens: Option<u32>,
    presence_penalty: Option<f32>,
    frequency_penalty: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
    graceful_shutdown_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::{
        env_key_for, interpolate_env_vars, AppConfig, ConfigError, ConfigOverrides, LlmProvider,
        LoadOptions, LogFormat,
    };

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    fn write_config(dir: &TempDir, body: &str) -> Result<PathBuf, String> {
        let path = dir.path().join("staybot.toml");
        fs::write(&path, body).map_err(|err| err.to_string())?;
        Ok(path)
    }

    #[test]
    fn defaults_are_valid_and_match_documented_values() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let config = AppConfig::default();
        config.validate().map_err(|err| err.to_string())?;

        ensure(config.database.url == "sqlite://staybot.db", "default database url")?;
        ensure(config.catalog.path == PathBuf::from("data/houses.json"), "default catalog path")?;
        ensure(config.llm.provider == LlmProvider::Ollama, "default provider is ollama")?;
        ensure(config.llm.sampling.temperature == 0.1, "default temperature")?;
        ensure(config.llm.sampling.top_p == 0.3, "default top_p")?;
        ensure(config.llm.sampling.max_tokens == 0, "max_tokens unset by default")?;
        ensure(config.llm.sampling.frequency_penalty == 0.3, "default frequency penalty")?;
        ensure(config.listen_address() == "127.0.0.1:8080", "default listen address")
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_STAYBOT_API_KEY", "sk-from-env");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = write_config(
                &dir,
                r#"
[llm]
provider = "openai"
api_key = "${TEST_STAYBOT_API_KEY}"
base_url = "https://api.openai.com/v1"
model = "gpt-4o-mini"
"#,
            )?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.llm.provider == LlmProvider::OpenAi, "provider should come from file")?;
            ensure(
                config.llm.api_key.as_ref().map(|key| key.expose_secret() == "sk-from-env")
                    == Some(true),
                "api key should be interpolated from environment",
            )?;
            ensure(config.llm.model == "gpt-4o-mini", "model should come from file")
        })();

        clear_vars(&["TEST_STAYBOT_API_KEY"]);
        result
    }

    #[test]
    fn interpolation_reports_missing_and_unterminated_variables() {
        let missing = interpolate_env_vars("key = \"${STAYBOT_TEST_SURELY_UNSET_VAR}\"");
        assert!(matches!(
            missing,
            Err(ConfigError::MissingEnvInterpolation { ref var }) if var == "STAYBOT_TEST_SURELY_UNSET_VAR"
        ));

        let unterminated = interpolate_env_vars("key = \"${OOPS");
        assert!(matches!(unterminated, Err(ConfigError::UnterminatedInterpolation)));

        assert_eq!(interpolate_env_vars("plain $ text").ok().as_deref(), Some("plain $ text"));
    }

    #[test]
    fn openai_env_aliases_are_honoured() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("STAYBOT_LLM_PROVIDER", "openai");
        env::set_var("OPENAI_API_KEY", "sk-alias");
        env::set_var("OPENAI_BASE_URL", "https://llm.example.test/v1");
        env::set_var("OPENAI_MODEL", "gpt-alias");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.llm.base_url.as_deref() == Some("https://llm.example.test/v1"),
                "base url alias",
            )?;
            ensure(config.llm.model == "gpt-alias", "model alias")?;
            ensure(config.llm.api_key.is_some(), "api key alias")
        })();

        clear_vars(&["STAYBOT_LLM_PROVIDER", "OPENAI_API_KEY", "OPENAI_BASE_URL", "OPENAI_MODEL"]);
        result
    }

    #[test]
    fn openai_provider_gets_openai_base_url_by_default() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("STAYBOT_LLM_PROVIDER", "openai");
        env::set_var("STAYBOT_LLM_API_KEY", "sk-test");

        let result = AppConfig::load(LoadOptions::default())
            .map_err(|err| format!("config load failed: {err}"))
            .and_then(|config| {
                ensure(
                    config.llm.base_url.as_deref() == Some("https://api.openai.com/v1"),
                    "openai provider should not keep the ollama url",
                )
            });

        clear_vars(&["STAYBOT_LLM_PROVIDER", "STAYBOT_LLM_API_KEY"]);
        result
    }

    #[test]
    fn prefixed_env_wins_over_openai_alias() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("STAYBOT_LLM_MODEL", "llama3.2");
        env::set_var("OPENAI_MODEL", "gpt-alias");

        let result = AppConfig::load(LoadOptions::default())
            .map_err(|err| format!("config load failed: {err}"))
            .and_then(|config| ensure(config.llm.model == "llama3.2", "prefixed key should win"));

        clear_vars(&["STAYBOT_LLM_MODEL", "OPENAI_MODEL"]);
        result
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("STAYBOT_LOG_LEVEL", "warn");
        env::set_var("STAYBOT_LOG_FORMAT", "json");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Json),
                "json logging format should be set from env var",
            )
        })();

        clear_vars(&["STAYBOT_LOG_LEVEL", "STAYBOT_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("STAYBOT_DATABASE_URL", "sqlite://from-env.db");
        env::set_var("STAYBOT_CATALOG_PATH", "/srv/env-houses.json");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = write_config(
                &dir,
                r#"
[database]
url = "sqlite://from-file.db"
max_connections = 9

[catalog]
path = "/srv/file-houses.json"

[server]
port = 9090

[logging]
level = "warn"
"#,
            )?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    database_url: Some("sqlite://from-override.db".to_string()),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.database.url == "sqlite://from-override.db",
                "override database url should win",
            )?;
            ensure(config.database.max_connections == 9, "file value should beat default")?;
            ensure(
                config.catalog.path == PathBuf::from("/srv/env-houses.json"),
                "env catalog path should win over file",
            )?;
            ensure(config.server.port == 9090, "file port should apply")?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")
        })();

        clear_vars(&["STAYBOT_DATABASE_URL", "STAYBOT_CATALOG_PATH"]);
        result
    }

    #[test]
    fn openai_without_api_key_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        clear_vars(&["STAYBOT_LLM_API_KEY", "OPENAI_API_KEY"]);
        env::set_var("STAYBOT_LLM_PROVIDER", "openai");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("llm.api_key")
            );
            ensure(has_message, "validation failure should mention llm.api_key")
        })();

        clear_vars(&["STAYBOT_LLM_PROVIDER"]);
        result
    }

    #[test]
    fn malformed_numeric_env_override_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("STAYBOT_SERVER_PORT", "eighty");

        let result = match AppConfig::load(LoadOptions::default()) {
            Err(ConfigError::InvalidEnvOverride { key, .. }) => {
                ensure(key == "STAYBOT_SERVER_PORT", "error should name the variable")
            }
            other => Err(format!("expected invalid override, got {other:?}")),
        };

        clear_vars(&["STAYBOT_SERVER_PORT"]);
        result
    }

    #[test]
    fn required_file_that_is_missing_is_reported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("absent.toml");

        let result = AppConfig::load(LoadOptions {
            config_path: Some(path.clone()),
            require_file: true,
            ..LoadOptions::default()
        });

        match result {
            Err(ConfigError::MissingConfigFile(reported)) => {
                ensure(reported == path, "missing path should be reported")
            }
            other => Err(format!("expected missing config file, got {other:?}")),
        }
    }

    #[test]
    fn out_of_range_values_are_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let mut config = AppConfig::default();
        config.database.timeout_secs = 301;
        ensure(config.validate().is_err(), "timeout above 300 should fail")?;

        let mut config = AppConfig::default();
        config.database.url = "postgres://localhost/staybot".to_string();
        ensure(config.validate().is_err(), "non-sqlite url should fail")?;

        let mut config = AppConfig::default();
        config.llm.sampling.top_p = 1.5;
        ensure(config.validate().is_err(), "top_p above 1 should fail")?;

        let mut config = AppConfig::default();
        config.catalog.path = PathBuf::new();
        ensure(config.validate().is_err(), "empty catalog path should fail")?;

        let mut config = AppConfig::default();
        config.logging.level = "verbose".to_string();
        ensure(config.validate().is_err(), "unknown log level should fail")
    }

    #[test]
    fn secret_values_are_not_leaked_by_debug() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("STAYBOT_LLM_API_KEY", "sk-secret-value");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;
            let debug = format!("{config:?}");

            ensure(!debug.contains("sk-secret-value"), "debug output should not contain api key")?;
            ensure(
                matches!(config.logging.format, LogFormat::Compact),
                "default logging format should be compact",
            )
        })();

        clear_vars(&["STAYBOT_LLM_API_KEY"]);
        result
    }

    #[test]
    fn env_keys_follow_the_prefix_convention() {
        assert_eq!(env_key_for("llm.api_key"), "STAYBOT_LLM_API_KEY");
        assert_eq!(env_key_for("catalog.path"), "STAYBOT_CATALOG_PATH");
    }
}
