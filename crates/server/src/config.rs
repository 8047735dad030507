use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_PATH: &str = "puzzles.db";
/// Large enough for a base64-encoded canvas
pub const DEFAULT_BODY_LIMIT: usize = 5 * 1024 * 1024;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    /// `None` keeps puzzles in memory only
    pub db_path: Option<PathBuf>,
    pub body_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            db_path: Some(PathBuf::from(DEFAULT_DB_PATH)),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source, starting from the defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(addr) = lookup("PUZZLE_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(port) = lookup("PUZZLE_PORT") {
            config.port = parse_number("PUZZLE_PORT", port)?;
        }
        if let Some(path) = lookup("PUZZLE_DB_PATH") {
            config.db_path = if path.is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }
        if let Some(limit) = lookup("PUZZLE_BODY_LIMIT_BYTES") {
            config.body_limit = parse_number("PUZZLE_BODY_LIMIT_BYTES", limit)?;
        }

        Ok(config)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.listen_addr(), "0.0.0.0:3000");
        assert_eq!(config.db_path, Some(PathBuf::from("puzzles.db")));
        assert_eq!(config.body_limit, 5 * 1024 * 1024);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PUZZLE_BIND_ADDR", "127.0.0.1"),
            ("PUZZLE_PORT", "8080"),
            ("PUZZLE_DB_PATH", "/var/lib/puzzles.db"),
            ("PUZZLE_BODY_LIMIT_BYTES", "1024"),
        ]))
        .unwrap();
        assert_eq!(config.listen_addr(), "127.0.0.1:8080");
        assert_eq!(config.db_path, Some(PathBuf::from("/var/lib/puzzles.db")));
        assert_eq!(config.body_limit, 1024);
    }

    #[test]
    fn test_empty_db_path_means_in_memory() {
        let config = Config::from_lookup(lookup(&[("PUZZLE_DB_PATH", "")])).unwrap();
        assert_eq!(config.db_path, None);
    }

    #[test]
    fn test_bad_port() {
        let err = Config::from_lookup(lookup(&[("PUZZLE_PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                name: "PUZZLE_PORT",
                value: "eighty".to_string()
            }
        );
        assert_eq!(err.to_string(), "PUZZLE_PORT must be a number, got 'eighty'");
    }
}
