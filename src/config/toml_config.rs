use crate::utils::error::{Result, StatError};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// File-based configuration, overriding the command-line defaults. Every
/// section and field is optional; only what the file names is applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: Option<SourceConfig>,
    pub load: Option<LoadConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
    pub station_kind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: Option<String>,
    pub filename: Option<String>,
}

impl TomlConfig {
    /// Reads and parses a configuration file, substituting `${ENV_VAR}`
    /// references from the process environment first. Unset variables are
    /// left as-is so the parse error points at them.
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let content = substitute_env_vars(&content);
        toml::from_str(&content).map_err(|e| StatError::Config {
            message: format!("failed to parse {}: {}", path, e),
        })
    }
}

fn substitute_env_vars(content: &str) -> String {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    re.replace_all(content, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    })
    .to_string()
}
