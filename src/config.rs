use crate::cli::Cli;
use crate::services::HEALTH_CHECK_INTERVAL;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime settings. Read-only: nothing is ever written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefilled host on the connection screen
    pub host: String,
    /// Prefilled port on the connection screen
    pub port: u16,
    pub health_check_interval_ms: u64,
    pub request_timeout_secs: u64,
    /// Prefilled instruction threshold for new databases
    pub min_amount_instructions: u32,
    pub page_size: u32,
    pub export_dir: PathBuf,
    pub notice_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5000,
            health_check_interval_ms: HEALTH_CHECK_INTERVAL.as_millis() as u64,
            request_timeout_secs: 30,
            min_amount_instructions: 30,
            page_size: 100,
            export_dir: PathBuf::from("."),
            notice_timeout_ms: 6000,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".cheat-finder"))
    }

    fn default_config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Defaults, then the home config if present, then `--config`, then flags.
    /// Keys set in `--config` override the same keys from the home config.
    pub fn load(cli: &Cli) -> anyhow::Result<Config> {
        Self::load_layered(Self::default_config_path().as_deref(), cli)
    }

    fn load_layered(home_config: Option<&Path>, cli: &Cli) -> anyhow::Result<Config> {
        let mut merged = Value::Object(Default::default());
        if let Some(path) = home_config.filter(|p| p.exists()) {
            merge(&mut merged, read_json(path)?);
        }
        if let Some(path) = &cli.config {
            merge(&mut merged, read_json(path)?);
        }

        let mut config: Config =
            serde_json::from_value(merged).context("Invalid configuration")?;
        config.apply_cli(cli);
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(dir) = &cli.export_dir {
            self.export_dir = dir.clone();
        }
        if let Some(ms) = cli.health_interval_ms {
            self.health_check_interval_ms = ms;
        }
        if let Some(secs) = cli.timeout_secs {
            self.request_timeout_secs = secs;
        }
    }

    pub fn health_check_interval(&self) -> Duration {
        Duration::from_millis(self.health_check_interval_ms.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn notice_timeout(&self) -> Duration {
        Duration::from_millis(self.notice_timeout_ms)
    }
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Could not read config file {}", path.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    anyhow::ensure!(
        value.is_object(),
        "Invalid config file {}: expected a JSON object",
        path.display()
    );
    Ok(value)
}

/// Top-level keys of `overlay` replace those of `base`
fn merge(base: &mut Value, overlay: Value) {
    if let (Value::Object(base), Value::Object(overlay)) = (base, overlay) {
        base.extend(overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5000);
        assert_eq!(config.health_check_interval(), Duration::from_secs(1));
        assert_eq!(config.min_amount_instructions, 30);
        assert_eq!(config.page_size, 100);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{"host":"analysis.local","page_size":50}"#).unwrap();

        let cli = Cli {
            config: Some(path),
            ..Cli::default()
        };
        let config = Config::load_layered(None, &cli).unwrap();
        assert_eq!(config.host, "analysis.local");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let cli = Cli {
            config: Some(PathBuf::from("/definitely/not/here.json")),
            ..Cli::default()
        };
        assert!(Config::load_layered(None, &cli).is_err());
    }

    #[test]
    fn test_explicit_file_layers_over_home_file() {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().join("home.json");
        fs::write(&home, r#"{"host":"home-host","page_size":25,"port":6000}"#).unwrap();
        let explicit = tmp.path().join("explicit.json");
        fs::write(&explicit, r#"{"port":7000}"#).unwrap();

        let cli = Cli {
            config: Some(explicit),
            ..Cli::default()
        };
        let config = Config::load_layered(Some(&home), &cli).unwrap();
        assert_eq!(config.host, "home-host");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.port, 7000);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_missing_home_file_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let config =
            Config::load_layered(Some(&tmp.path().join("absent.json")), &Cli::default()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_cli_overrides_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{"host":"from-file","port":7000}"#).unwrap();

        let cli = Cli {
            config: Some(path),
            port: Some(8000),
            health_interval_ms: Some(250),
            ..Cli::default()
        };
        let config = Config::load_layered(None, &cli).unwrap();
        assert_eq!(config.host, "from-file");
        assert_eq!(config.port, 8000);
        assert_eq!(config.health_check_interval_ms, 250);
    }
}
