use clap::Subcommand;

use crate::shared::config::{Config, generate_schema};

/// Configuration management commands.
#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration (file values plus NOVELHUB_* overrides)
    Show,

    /// Print JSON Schema for the configuration file
    Schema,
}

impl ConfigCommands {
    pub fn run(&self, config: &Config) -> anyhow::Result<()> {
        print!("{}", self.output(config)?);
        Ok(())
    }

    fn output(&self, config: &Config) -> anyhow::Result<String> {
        match self {
            Self::Show => Ok(serde_yaml::to_string(config)?),
            Self::Schema => {
                let json = serde_json::to_string_pretty(&generate_schema())?;
                Ok(format!("{json}\n"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_prints_yaml_that_parses_back() {
        let config = Config::default();
        let yaml = ConfigCommands::Show.output(&config).unwrap();

        assert!(yaml.contains("base_url: http://localhost:8080"));
        assert!(yaml.contains("refresh_trigger: unauthorized"));
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn schema_is_valid_json_object() {
        let out = ConfigCommands::Schema.output(&Config::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["title"], "Config");
        assert_eq!(value["type"], "object");
        let defs = value["$defs"].as_object().unwrap();
        let api_props = defs["ApiConfig"]["properties"].as_object().unwrap();
        assert!(api_props.contains_key("refresh_trigger"));
    }
}
