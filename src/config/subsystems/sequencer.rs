// src/config/subsystems/sequencer.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequencerConfig {
    /// Surah number assigned to the first verse in the stream.
    pub start_surah: u32,
    /// Largest forward jump over the expected verse number still treated as
    /// a verse boundary. Anything larger is a numeral inside the prose.
    /// Legitimate gaps in this genre are small; dates and counts are not.
    pub max_verse_jump: u32,
    /// Sentinel text written for verses the source skipped.
    pub missing_marker: String,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            start_surah: 1,
            max_verse_jump: 50,
            missing_marker: "[MISSING LINE]".to_string(),
        }
    }
}

impl FromIni for SequencerConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "sequencer" {
            return None;
        }

        match key {
            "start_surah" => {
                match value.parse() {
                    Ok(surah) => {
                        self.start_surah = surah;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid start_surah value (must be a positive integer): {}", value)
                    ))),
                }
            },
            "max_verse_jump" => {
                match value.parse() {
                    Ok(jump) => {
                        self.max_verse_jump = jump;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid max_verse_jump value (must be a non-negative integer): {}", value)
                    ))),
                }
            },
            "missing_marker" => {
                self.missing_marker = value.trim_matches('"').to_string();
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl SequencerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.start_surah == 0 {
            return Err(Error::Config(
                "start_surah must be at least 1".to_string()
            ));
        }
        if self.missing_marker.trim().is_empty() {
            return Err(Error::Config(
                "missing_marker must not be empty".to_string()
            ));
        }
        Ok(())
    }
}
