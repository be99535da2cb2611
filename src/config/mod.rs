use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Context;
use serde::Deserialize;
use crate::account::{CheckingPolicy, Policies, SavingsPolicy};

const DEFAULT_DATABASE_FILE: &str = "bank.db";
const DEFAULT_HISTORY_FILE: &str = ".bankbook_history";

/// Settings read from `config.toml`. Every key is optional.
///
/// Decimal values are written as strings, e.g. `interest_rate = "0.029"`.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct Config {
    pub(crate) database: Option<PathBuf>,
    pub(crate) log_file: Option<PathBuf>,
    pub(crate) history_file: Option<PathBuf>,

    #[serde(default)]
    pub(crate) savings: SavingsPolicy,
    #[serde(default)]
    pub(crate) checking: CheckingPolicy,
}

impl Config {
    /// Default config location, e.g. `~/.config/bankbook/config.toml` on Linux.
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bankbook").join("config.toml"))
    }

    /// Load config from a toml file. A missing file gives the default config.
    pub(crate) fn load_from_file(file_path: &Path) -> anyhow::Result<Config> {
        if !file_path.is_file() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Unable to read config file {}", file_path.display()))?;
        Config::parse(&content)
            .with_context(|| format!("Invalid config file {}", file_path.display()))
    }

    fn parse(content: &str) -> anyhow::Result<Config> {
        Ok(toml::from_str::<Config>(content)?)
    }

    pub(crate) fn database(&self) -> PathBuf {
        self.database.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILE))
    }

    pub(crate) fn history_file(&self) -> PathBuf {
        self.history_file.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_FILE))
    }

    /// Parameters for accounts opened from now on
    pub(crate) fn policies(&self) -> Policies {
        Policies {
            savings: self.savings,
            checking: self.checking,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use rust_decimal_macros::dec;
    use crate::account::Policies;
    use crate::config::Config;

    #[test]
    fn test_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.database(), PathBuf::from("bank.db"));
        assert_eq!(config.history_file(), PathBuf::from(".bankbook_history"));
        assert!(config.log_file.is_none());
        assert_eq!(config.policies(), Policies::default());
    }

    #[test]
    fn test_full_config() {
        let config = Config::parse(r#"
            database = "/tmp/my.db"
            log_file = "bank.log"

            [savings]
            interest_rate = "0.05"
            daily_limit = 3

            [checking]
            low_balance_fee = "-2.50"
        "#).unwrap();

        assert_eq!(config.database(), PathBuf::from("/tmp/my.db"));
        assert_eq!(config.log_file, Some(PathBuf::from("bank.log")));
        assert_eq!(config.policies().savings.interest_rate, dec!(0.05));
        assert_eq!(config.policies().savings.daily_limit, 3);
        // Keys left out keep their defaults
        assert_eq!(config.policies().savings.monthly_limit, 5);
        assert_eq!(config.policies().checking.low_balance_fee, dec!(-2.50));
        assert_eq!(config.policies().checking.balance_threshold, dec!(100));
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::parse("[savings]\ndaily_limit = \"two\"").is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_file(&dir.path().join("config.toml")).unwrap();
        assert!(config.database.is_none());
    }
}
