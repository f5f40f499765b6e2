// src/config/subsystems/normalizer.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Fixed running-header text printed on every page of the work,
    /// optionally flanked by page digits.
    pub running_header: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            running_header: "IL CORANO".to_string(),
        }
    }
}

impl FromIni for NormalizerConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "normalizer" {
            return None;
        }

        match key {
            "running_header" => {
                self.running_header = value.trim_matches('"').to_string();
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl NormalizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.running_header.trim().is_empty() {
            return Err(Error::Config(
                "running_header must not be empty".to_string()
            ));
        }
        Ok(())
    }
}
