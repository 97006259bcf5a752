use serde::Deserialize;

use std::{env, fmt, fs, path::Path};

/// Prefix of every environment variable the server reads.
pub const ENV_PREFIX: &str = "NOTES_";

/// Names a YAML file to read instead of the environment.
pub const CONFIG_PATH_VAR: &str = "NOTES_CONFIG";

#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Postgres connection string. Without one, notes live in memory.
    #[serde(default)]
    pub pg_dsn: Option<String>,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Yaml {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("invalid environment configuration: {0}")]
    Env(#[from] envy::Error),
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

impl Config {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    // Blank secrets count as unset.
    fn normalized(mut self) -> Self {
        self.user = self.user.filter(|user| !user.is_empty());
        self.password = self.password.filter(|password| !password.is_empty());
        self.pg_dsn = self.pg_dsn.filter(|dsn| !dsn.trim().is_empty());
        self
    }

    /// Reads `NOTES_*` variables from `vars`.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        Ok(config.normalized())
    }

    pub fn from_yaml(contents: &str, path: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(contents).map_err(|source| ConfigError::Yaml {
            path: path.to_string(),
            source,
        })?;
        Ok(config.normalized())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("pg_dsn", &self.pg_dsn.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

pub fn load_config() -> Result<Config, ConfigError> {
    // Try the file named by the env
    if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
        if Path::new(&config_path).exists() {
            let contents = fs::read_to_string(&config_path).map_err(|source| ConfigError::Io {
                path: config_path.clone(),
                source,
            })?;
            tracing::info!("Loading configuration from '{}'", config_path);
            return Config::from_yaml(&contents, &config_path);
        }

        tracing::warn!(
            "Config file '{}' not found, falling back to environment variables",
            config_path
        );
    }

    // Fallback to environment variables
    Config::from_vars(env::vars())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn reads_prefixed_variables() {
        let config = Config::from_vars(vars(&[
            ("NOTES_USER", "ada"),
            ("NOTES_PASSWORD", "s3cret"),
            ("NOTES_PG_DSN", "host=localhost user=notes"),
            ("NOTES_PORT", "9000"),
            ("USER", "root"),
        ]))
        .unwrap();

        assert_eq!(config.user.as_deref(), Some("ada"));
        assert_eq!(config.password.as_deref(), Some("s3cret"));
        assert_eq!(config.pg_dsn.as_deref(), Some("host=localhost user=notes"));
        assert_eq!(config.listen_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn everything_is_optional() {
        let config = Config::from_vars(Vec::new()).unwrap();

        assert_eq!(config.user, None);
        assert_eq!(config.password, None);
        assert_eq!(config.pg_dsn, None);
        assert_eq!(config.listen_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn blank_secrets_are_unset() {
        let config =
            Config::from_vars(vars(&[("NOTES_USER", ""), ("NOTES_PASSWORD", "")])).unwrap();

        assert_eq!(config.user, None);
        assert_eq!(config.password, None);
    }

    #[test]
    fn bad_port_is_an_error() {
        let result = Config::from_vars(vars(&[("NOTES_PORT", "eighty")]));

        assert!(matches!(result, Err(ConfigError::Env(_))));
    }

    #[test]
    fn parses_yaml_file_contents() {
        let config = Config::from_yaml(
            "user: ada\npassword: s3cret\nhost: 127.0.0.1\nport: 8080\n",
            "config.yaml",
        )
        .unwrap();

        assert_eq!(config.user.as_deref(), Some("ada"));
        assert_eq!(config.listen_addr(), "127.0.0.1:8080");
        assert_eq!(config.pg_dsn, None);
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = Config::from_vars(vars(&[("NOTES_PASSWORD", "s3cret")])).unwrap();

        assert!(!format!("{config:?}").contains("s3cret"));
    }
}
