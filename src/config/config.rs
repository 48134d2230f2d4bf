use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::server::{ProxyConfig, ServerConfig};
use crate::constants::CONFIG_FILE;
use crate::error::{JiraError, JiraResult};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub api_token: Option<String>,
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
}

impl Config {
    pub fn to_server_config(&self) -> JiraResult<ServerConfig> {
        let url = self
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| {
                JiraError::ConfigError(
                    "No Jira URL configured. Set JIRA_URL or run 'jira auth --url <URL>'."
                        .to_string(),
                )
            })?;

        Ok(ServerConfig {
            url: url.to_string(),
            proxy: self.proxy.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            api_token: self.api_token.clone(),
        })
    }
}

pub fn config_path() -> JiraResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| JiraError::ConfigError("Could not find home directory".to_string()))?;
    Ok(home_dir.join(CONFIG_FILE))
}

pub fn load_config() -> JiraResult<Config> {
    let config_path = config_path()?;

    let mut config = if config_path.exists() {
        let config_str = fs::read_to_string(&config_path)?;
        serde_json::from_str(&config_str).unwrap_or_default()
    } else {
        Config::default()
    };

    apply_env_overrides(&mut config, |name| env::var(name).ok());
    Ok(config)
}

pub fn save_config(config: &Config) -> JiraResult<()> {
    let config_path = config_path()?;
    let config_str = serde_json::to_string_pretty(config)?;
    fs::write(config_path, config_str)?;
    Ok(())
}

/// Environment variables win over values read from the config file.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(url) = read("JIRA_URL") {
        config.url = Some(url);
    }
    if let Some(username) = read("JIRA_USERNAME") {
        config.username = Some(username);
    }
    if let Some(password) = read("JIRA_PASSWORD") {
        config.password = Some(password);
    }
    if let Some(token) = read("JIRA_API_TOKEN") {
        config.api_token = Some(token);
    }
}
