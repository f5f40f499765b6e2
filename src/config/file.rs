// src/config/file.rs

use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use crate::error::Result;
use super::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    /// Extracted source text (file, or a directory of files for batch runs).
    pub source_path: PathBuf,
    pub cleaned_dir: PathBuf,
    pub index_dir: PathBuf,
    pub report_dir: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from("data/source/corano.txt"),
            cleaned_dir: PathBuf::from("data/cleaned"),
            index_dir: PathBuf::from("data/index"),
            report_dir: PathBuf::from("data/reports"),
        }
    }
}

impl FromIni for FileConfig {
    fn from_ini_section(&mut self, _section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        match key {
            "source_path" => {
                self.source_path = PathBuf::from(value.trim_matches('"'));
                Some(Ok(()))
            },
            "cleaned_dir" => {
                self.cleaned_dir = PathBuf::from(value.trim_matches('"'));
                Some(Ok(()))
            },
            "index_dir" => {
                self.index_dir = PathBuf::from(value.trim_matches('"'));
                Some(Ok(()))
            },
            "report_dir" => {
                self.report_dir = PathBuf::from(value.trim_matches('"'));
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl FileConfig {
    pub fn validate(&self) -> Result<()> {
        // Only warn here; the page source reports the fatal error when the
        // path is actually opened, and binaries may override it after load
        if !self.source_path.exists() {
            log::warn!("Source path not found: {:?}", self.source_path);
        }

        // Create output directories if they don't exist
        std::fs::create_dir_all(&self.cleaned_dir)?;
        std::fs::create_dir_all(&self.index_dir)?;
        std::fs::create_dir_all(&self.report_dir)?;

        Ok(())
    }
}
