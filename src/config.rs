use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{env, time::Duration};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub driver: DriverConfig,
}

/// Settings for the terminal driver. Game rules are not configurable.
#[derive(Debug, Clone, Deserialize)]
pub struct DriverConfig {
    /// Milliseconds between timer ticks
    pub tick_interval_ms: u64,
    /// Fixed RNG seed for reproducible games
    pub seed: Option<u64>,
    /// Print a JSON snapshot after every event instead of text
    pub json_output: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let tick_interval_ms = var("TICK_INTERVAL_MS")
            .unwrap_or_else(|| "1000".to_string())
            .parse()
            .context("TICK_INTERVAL_MS must be a number")?;
        if tick_interval_ms == 0 {
            bail!("TICK_INTERVAL_MS must be greater than zero");
        }

        let seed = var("WORD_CHAIN_SEED")
            .map(|raw| raw.parse())
            .transpose()
            .context("WORD_CHAIN_SEED must be an unsigned integer")?;

        let json_output = var("JSON_OUTPUT")
            .map(|raw| matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Config {
            driver: DriverConfig {
                tick_interval_ms,
                seed,
                json_output,
            },
        })
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.driver.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.driver.seed, None);
        assert!(!config.driver.json_output);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TICK_INTERVAL_MS", "250"),
            ("WORD_CHAIN_SEED", "42"),
            ("JSON_OUTPUT", "TRUE"),
        ])
        .unwrap();
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        assert_eq!(config.driver.seed, Some(42));
        assert!(config.driver.json_output);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(config_from(&[("TICK_INTERVAL_MS", "soon")]).is_err());
        assert!(config_from(&[("TICK_INTERVAL_MS", "0")]).is_err());
        assert!(config_from(&[("WORD_CHAIN_SEED", "-3")]).is_err());
    }
}
