mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the process configuration: optional YAML file, then environment
/// overrides, then validation. Any error here is fatal for startup.
pub async fn load() -> Result<Config> {
    let explicit_path = env::var("CONFIG_PATH").ok();
    let mut config = load_file(explicit_path.as_deref()).await?;
    config.apply_env_with(|key| env::var(key).ok());
    config.validate()?;
    Ok(config)
}

/// Reads the YAML file. A missing default `config.yaml` yields defaults; a
/// missing file that was named explicitly is an error.
pub async fn load_file(path: Option<&str>) -> Result<Config> {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    debug!("Loading configuration from: {}", config_path);

    let config_str = match tokio::fs::read_to_string(config_path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && path.is_none() => {
            debug!("No {} found, using built-in defaults", config_path);
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };

    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }

    Ok(serde_yaml::from_str(&config_str)?)
}

impl Config {
    /// Overlays credentials and the talking toggle from an environment lookup.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("GOOGLE_API_KEY") {
            self.model.api_key = key;
        }
        if let Some(token) = lookup("CHANNEL_ACCESS_TOKEN") {
            self.line.channel_access_token = token;
        }
        if let Some(secret) = lookup("CHANNEL_SECRET") {
            self.line.channel_secret = secret;
        }
        // The misspelled name is what existing deployments set.
        if let Some(talking) = lookup("DEFAULT_TALKING").or_else(|| lookup("DEFALUT_TALKING")) {
            self.conversation.default_talking = talking.to_lowercase() == "true";
        }
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("GOOGLE_API_KEY", &self.model.api_key),
            ("CHANNEL_ACCESS_TOKEN", &self.line.channel_access_token),
            ("CHANNEL_SECRET", &self.line.channel_secret),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(Error::config(format!(
                "missing required environment values: {}",
                missing.join(", ")
            )));
        }

        Ok(())
    }
}
