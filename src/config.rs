use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::mapping::RawMappingRecord;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub toggl_api_token: Option<String>,
    pub invoice_ninja_token: Option<String>,
    pub invoice_ninja_url: Option<String>,
    #[serde(default)]
    pub projects: BTreeMap<String, RawMappingRecord>,
}

#[derive(Debug)]
pub struct Config {
    pub toggl_api_token: String,
    pub invoice_ninja_token: String,
    pub invoice_ninja_url: String,
    pub projects: BTreeMap<String, RawMappingRecord>,
}

#[derive(Debug)]
pub enum ConfigError {
    NotFound(PathBuf),
    Io(String),
    Parse(String),
    MissingValue(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            ConfigError::Io(message) => write!(f, "Config IO error: {message}"),
            ConfigError::Parse(message) => write!(f, "Config parse error: {message}"),
            ConfigError::MissingValue(name) => {
                write!(f, "Config is missing required value '{name}'")
            }
        }
    }
}

impl Error for ConfigError {}

pub fn load() -> Result<Config, ConfigError> {
    let path = config_path().ok_or_else(|| ConfigError::Io("Home directory not found".to_string()))?;
    if !path.exists() {
        return Err(ConfigError::NotFound(path));
    }
    let contents = fs::read_to_string(&path).map_err(|err| ConfigError::Io(err.to_string()))?;
    let file: ConfigFile =
        serde_json::from_str(&contents).map_err(|err| ConfigError::Parse(err.to_string()))?;
    resolve(file, env_value("TOGGL_API_TOKEN"), env_value("NINJA_API_TOKEN"))
}

fn resolve(
    file: ConfigFile,
    toggl_env: Option<String>,
    ninja_env: Option<String>,
) -> Result<Config, ConfigError> {
    let toggl_api_token = toggl_env
        .or(file.toggl_api_token)
        .ok_or(ConfigError::MissingValue("toggl_api_token"))?;
    let invoice_ninja_token = ninja_env
        .or(file.invoice_ninja_token)
        .ok_or(ConfigError::MissingValue("invoice_ninja_token"))?;
    let invoice_ninja_url = file
        .invoice_ninja_url
        .ok_or(ConfigError::MissingValue("invoice_ninja_url"))?;

    Ok(Config {
        toggl_api_token,
        invoice_ninja_token,
        invoice_ninja_url,
        projects: file.projects,
    })
}

fn env_value(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn config_path() -> Option<PathBuf> {
    let mut path = dirs::home_dir()?;
    path.push(".toggl2ninja.json");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_file() -> ConfigFile {
        serde_json::from_str(
            r#"{
                "toggl_api_token": "toggl-token",
                "invoice_ninja_token": "ninja-token",
                "invoice_ninja_url": "https://ninja.example.com",
                "projects": {"42": {"client_id": 5, "project_id": 9}}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn resolve_uses_file_values() {
        let config = resolve(full_file(), None, None).unwrap();
        assert_eq!(config.toggl_api_token, "toggl-token");
        assert_eq!(config.invoice_ninja_token, "ninja-token");
        assert_eq!(config.invoice_ninja_url, "https://ninja.example.com");
        assert_eq!(config.projects.len(), 1);
    }

    #[test]
    fn env_tokens_win_over_file_values() {
        let config = resolve(
            full_file(),
            Some("toggl-env".to_string()),
            Some("ninja-env".to_string()),
        )
        .unwrap();
        assert_eq!(config.toggl_api_token, "toggl-env");
        assert_eq!(config.invoice_ninja_token, "ninja-env");
    }

    #[test]
    fn missing_toggl_token_fails() {
        let mut file = full_file();
        file.toggl_api_token = None;
        let err = resolve(file, None, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingValue("toggl_api_token")));
    }

    #[test]
    fn missing_url_fails() {
        let mut file = full_file();
        file.invoice_ninja_url = None;
        let err = resolve(file, None, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingValue("invoice_ninja_url")));
    }

    #[test]
    fn projects_section_defaults_to_empty() {
        let file: ConfigFile = serde_json::from_str(r#"{"toggl_api_token": "t"}"#).unwrap();
        assert!(file.projects.is_empty());
    }
}
