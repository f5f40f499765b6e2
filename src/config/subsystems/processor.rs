// src/config/subsystems/processor.rs

use serde::{Serialize, Deserialize};
use log::LevelFilter;
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// "sequential" or "parallel". Parallel mode fans independent source
    /// files out over a thread pool; each file's pipeline stays ordered.
    pub processing_mode: String,
    pub log_level: String,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            processing_mode: "sequential".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl FromIni for ProcessorConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "processor" {
            return None;
        }

        match key {
            "processing_mode" => {
                let mode = value.trim_matches('"').to_lowercase();
                if mode != "sequential" && mode != "parallel" {
                    return Some(Err(Error::Config(
                        format!("Invalid processing_mode (must be sequential or parallel): {}", value)
                    )));
                }
                self.processing_mode = mode;
                Some(Ok(()))
            },
            "log_level" => {
                self.log_level = value.trim_matches('"').to_string();
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl ProcessorConfig {
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }

    pub fn is_parallel(&self) -> bool {
        self.processing_mode == "parallel"
    }

    pub fn get_log_level(&self) -> LevelFilter {
        match self.log_level.trim().to_lowercase().as_str() {
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            "none" => LevelFilter::Off,
            _ => LevelFilter::Info, // Default to Info if invalid
        }
    }
}
