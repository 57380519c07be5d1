use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use thiserror::Error;
use url::Url;

use super::{
    Config,
    sources::{EnvConfig, FileConfig},
};

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("invalid database URL: {source}")]
    InvalidDatabaseUrl {
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported database URL scheme `{scheme}`; expected postgres:// or postgresql://")]
    UnsupportedDatabaseScheme { scheme: String },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

/// A loaded configuration plus non-fatal findings worth logging.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env: Option<EnvConfig>,
    skip_dotenv: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Use these values instead of reading the process environment. Also
    /// disables `.env` loading.
    pub fn with_env(mut self, env: EnvConfig) -> Self {
        self.env = Some(env);
        self.skip_dotenv = true;
        self
    }

    pub fn load(self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = !self.skip_dotenv && dotenvy::dotenv().is_ok();
        let env = self.env.unwrap_or_else(EnvConfig::gather);

        let config_path = self
            .config_path
            .or_else(|| env.config_path.as_ref().map(PathBuf::from));

        let file = match config_path.as_deref() {
            Some(path) => read_file_config(path)?,
            None => FileConfig::default(),
        };

        let mut config = merge(file, &env)?;
        config.metadata.config_path = config_path;
        config.metadata.env_file_loaded = env_file_loaded;

        let warnings = collect_warnings(&config);
        Ok(ConfigLoad { config, warnings })
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn merge(file: FileConfig, env: &EnvConfig) -> Result<Config, ConfigLoadError> {
    let mut config = Config::default();

    if let Some(host) = env.server_host.clone().or(file.server.host) {
        config.server.host = host;
    }
    if let Some(port) = parse_env("SERVER_PORT", env.server_port.as_deref())?.or(file.server.port) {
        config.server.port = port;
    }

    let database_url = env
        .database_url
        .clone()
        .or(file.database.url)
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty());
    if let Some(url) = database_url.as_deref() {
        validate_database_url(url)?;
    }
    config.database.url = database_url;
    if let Some(max) = parse_env("DB_MAX_CONNECTIONS", env.database_max_connections.as_deref())?
        .or(file.database.max_connections)
    {
        config.database.max_connections = max;
    }

    config.catalog.deletion_code = env
        .deletion_code
        .clone()
        .or(file.catalog.deletion_code)
        .filter(|code| !code.is_empty());

    if let Some(base_url) = env.rawg_base_url.clone().or(file.image_lookup.base_url) {
        config.image_lookup.base_url = base_url;
    }
    config.image_lookup.api_key = env
        .rawg_api_key
        .clone()
        .or(file.image_lookup.api_key)
        .filter(|key| !key.trim().is_empty());
    if let Some(secs) = parse_env::<u64>("RAWG_TIMEOUT_SECS", env.rawg_timeout_secs.as_deref())?
        .or(file.image_lookup.timeout_secs)
    {
        if secs == 0 {
            return Err(ConfigLoadError::InvalidValue {
                key: "RAWG_TIMEOUT_SECS",
                value: secs.to_string(),
            });
        }
        config.image_lookup.timeout = Duration::from_secs(secs);
    }

    Ok(config)
}

fn parse_env<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<&str>,
) -> Result<Option<T>, ConfigLoadError> {
    raw.map(|value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigLoadError::InvalidValue {
                key,
                value: value.to_string(),
            })
    })
    .transpose()
}

pub fn validate_database_url(raw: &str) -> Result<(), ConfigLoadError> {
    let url = Url::parse(raw).map_err(|source| ConfigLoadError::InvalidDatabaseUrl { source })?;
    match url.scheme() {
        "postgres" | "postgresql" => Ok(()),
        other => Err(ConfigLoadError::UnsupportedDatabaseScheme {
            scheme: other.to_string(),
        }),
    }
}

fn collect_warnings(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.catalog.deletion_code.is_none() {
        warnings.push(ConfigWarning {
            message: "no deletion code configured; delete endpoints accept any caller".into(),
            hint: Some("set DELETION_CODE or [catalog].deletion_code".into()),
        });
    }

    if config.image_lookup.api_key.is_none() {
        warnings.push(ConfigWarning {
            message: "no RAWG API key configured; /game-image requests will fail".into(),
            hint: Some("set RAWG_API_KEY or [image_lookup].api_key".into()),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> EnvConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_sources() {
        let ConfigLoad { config, warnings } = ConfigLoader::new().with_env(env(&[])).load().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.database.url.is_none());
        assert_eq!(config.image_lookup.timeout, Duration::from_secs(10));
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8080
host = "127.0.0.1"

[database]
url = "postgres://file@localhost/games"

[catalog]
deletion_code = "from-file"

[image_lookup]
api_key = "file-key"
timeout_secs = 3
"#
        )
        .unwrap();

        let ConfigLoad { config, warnings } = ConfigLoader::new()
            .with_config_path(Some(file.path().to_path_buf()))
            .with_env(env(&[("SERVER_PORT", "9090"), ("DELETION_CODE", "from-env")]))
            .load()
            .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.url.as_deref(), Some("postgres://file@localhost/games"));
        assert_eq!(config.catalog.deletion_code.as_deref(), Some("from-env"));
        assert_eq!(config.image_lookup.api_key.as_deref(), Some("file-key"));
        assert_eq!(config.image_lookup.timeout, Duration::from_secs(3));
        assert_eq!(config.metadata.config_path.as_deref(), Some(file.path()));
        assert!(warnings.is_empty());
    }

    #[test]
    fn invalid_port_is_reported() {
        let err = ConfigLoader::new()
            .with_env(env(&[("SERVER_PORT", "eighty")]))
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::InvalidValue { key: "SERVER_PORT", .. }));
    }

    #[test]
    fn non_postgres_database_urls_are_rejected() {
        let err = ConfigLoader::new()
            .with_env(env(&[("DATABASE_URL", "mongodb://localhost/games")]))
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::UnsupportedDatabaseScheme { .. }));
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nportt = 1").unwrap();

        let err = ConfigLoader::new()
            .with_config_path(Some(file.path().to_path_buf()))
            .with_env(env(&[]))
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse { .. }));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let ConfigLoad { config, .. } = ConfigLoader::new()
            .with_env(env(&[
                ("DELETION_CODE", "hunter2"),
                ("RAWG_API_KEY", "abc123"),
                ("DATABASE_URL", "postgres://user:pw@localhost/games"),
            ]))
            .load()
            .unwrap();

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("abc123"));
        assert!(!rendered.contains("pw@"));
    }
}
