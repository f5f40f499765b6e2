// src/config/subsystems/source.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// First page of the body text, 1-based inclusive. Front matter before
    /// this page never reaches the pipeline.
    pub start_page: usize,
    /// Last page of the body text, 1-based inclusive.
    pub end_page: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            // Page window of the printed edition the heuristics were tuned on
            start_page: 75,
            end_page: 492,
        }
    }
}

impl FromIni for SourceConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "source" {
            return None;
        }

        match key {
            "start_page" => {
                match value.parse() {
                    Ok(page) => {
                        self.start_page = page;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid start_page value (must be a positive integer): {}", value)
                    ))),
                }
            },
            "end_page" => {
                match value.parse() {
                    Ok(page) => {
                        self.end_page = page;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid end_page value (must be a positive integer): {}", value)
                    ))),
                }
            },
            _ => None,
        }
    }
}

impl SourceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.start_page == 0 {
            return Err(Error::Config(
                "start_page is 1-based and must be at least 1".to_string()
            ));
        }
        if self.end_page < self.start_page {
            return Err(Error::Config(
                format!("end_page ({}) must not precede start_page ({})",
                    self.end_page, self.start_page)
            ));
        }
        Ok(())
    }
}
