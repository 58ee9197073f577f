use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Error;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub quantum: u32,
    pub seed: Option<u64>,
    pub traffic_file: PathBuf,
    pub log_level: LevelFilter,
    pub show_status: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quantum: 5,
            seed: None,
            traffic_file: PathBuf::from("traffic.txt"),
            log_level: LevelFilter::Info,
            show_status: false,
        }
    }
}

impl Config {
    /// Read a config file. A missing file gives the default config.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(error) => return Err(error.into()),
        };

        Config::parse(&json)
    }

    pub fn parse(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|error| Error::Config(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let config = Config::parse(r#"{ "quantum": 3, "show_status": true }"#).unwrap();

        assert_eq!(config.quantum, 3);
        assert!(config.show_status);
        assert_eq!(config.traffic_file, PathBuf::from("traffic.txt"));
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn log_level_from_config() {
        let config = Config::parse(r#"{ "log_level": "DEBUG", "seed": 9 }"#).unwrap();

        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn malformed_config() {
        assert!(matches!(
            Config::parse(r#"{ "quantum": "five" }"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("schedsim-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "quantum": 2, "traffic_file": "workload.txt" }"#).unwrap();

        let config = Config::load(&path);
        fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.quantum, 2);
        assert_eq!(config.traffic_file, PathBuf::from("workload.txt"));
        assert!(!config.show_status);
    }

    #[test]
    fn missing_file_is_default() {
        let config = Config::load(Path::new("does/not/exist/config.json")).unwrap();
        assert_eq!(config, Config::default());
    }
}
