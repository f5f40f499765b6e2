// src/config/subsystems/segmenter.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Longest line still considered a surah header. Verse lines that happen
    /// to embed the header token run longer than this.
    pub max_header_len: usize,
    /// The fixed opening invocation, matched case-insensitively as a
    /// substring of the candidate line.
    pub invocation: String,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_header_len: 50,
            invocation: "Nel nome di Dio, il Clemente, il Compassionevole".to_string(),
        }
    }
}

impl FromIni for SegmenterConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "segmenter" {
            return None;
        }

        match key {
            "max_header_len" => {
                match value.parse() {
                    Ok(len) => {
                        self.max_header_len = len;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid max_header_len value (must be a positive integer): {}", value)
                    ))),
                }
            },
            "invocation" => {
                self.invocation = value.trim_matches('"').to_string();
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl SegmenterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_header_len == 0 {
            return Err(Error::Config(
                "max_header_len must be at least 1".to_string()
            ));
        }
        if self.invocation.trim().is_empty() {
            return Err(Error::Config(
                "invocation must not be empty".to_string()
            ));
        }
        Ok(())
    }

    /// Returns a description of the current segmentation configuration
    pub fn describe(&self) -> String {
        format!(
            "headers up to {} chars, invocation \"{}\"",
            self.max_header_len, self.invocation
        )
    }
}
