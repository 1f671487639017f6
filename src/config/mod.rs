pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use self::toml_config::TomlConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "loadstat")]
#[command(about = "Exports catchment nutrient-load model statistics to a delimited report")]
pub struct CliConfig {
    /// Base URL of the model store / simulation service
    #[arg(long, default_value = "http://localhost:8080/api")]
    pub api_endpoint: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Report filename; `{timestamp}` expands at write time
    #[arg(long, default_value = "models.csv")]
    pub output_filename: String,

    /// Station type whose models enter the report
    #[arg(long, default_value = "hydrochemical")]
    pub station_kind: String,

    /// TOML file overriding the options above
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Applies the optional TOML configuration file on top of the
    /// command-line values.
    pub fn resolve(mut self) -> Result<Self> {
        let Some(path) = self.config.clone() else {
            return Ok(self);
        };

        let file = TomlConfig::from_file(&path)?;
        if let Some(source) = file.source {
            if let Some(endpoint) = source.endpoint {
                self.api_endpoint = endpoint;
            }
            if let Some(kind) = source.station_kind {
                self.station_kind = kind;
            }
        }
        if let Some(load) = file.load {
            if let Some(output_path) = load.output_path {
                self.output_path = output_path;
            }
            if let Some(filename) = load.filename {
                self.output_filename = filename;
            }
        }
        Ok(self)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_path("output_path", &self.output_path)?;
        validate_non_empty_string("output_filename", &self.output_filename)?;
        validate_non_empty_string("station_kind", &self.station_kind)?;
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_filename(&self) -> &str {
        &self.output_filename
    }

    fn station_kind(&self) -> &str {
        &self.station_kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn base_config() -> CliConfig {
        CliConfig {
            api_endpoint: "http://localhost:8080/api".to_string(),
            output_path: "./output".to_string(),
            output_filename: "models.csv".to_string(),
            station_kind: "hydrochemical".to_string(),
            config: None,
            verbose: false,
        }
    }

    #[test]
    fn validates_the_defaults() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn rejects_a_broken_endpoint() {
        let mut config = base_config();
        config.api_endpoint = "not-a-url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_file_overrides_cli_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[source]\nendpoint = \"http://store.example/api\"\n\n[load]\nfilename = \"out.csv\""
        )
        .unwrap();

        let mut config = base_config();
        config.config = Some(file.path().to_str().unwrap().to_string());
        let resolved = config.resolve().unwrap();

        assert_eq!(resolved.api_endpoint, "http://store.example/api");
        assert_eq!(resolved.output_filename, "out.csv");
        // Untouched fields keep their CLI values.
        assert_eq!(resolved.station_kind, "hydrochemical");
    }
}
