pub mod file;
pub mod subsystems;

use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use crate::error::Result;
use log::{warn, trace};

pub trait FromIni {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TartilConfig {
    // File paths
    pub files: file::FileConfig,

    // Subsystem configs
    pub source: subsystems::SourceConfig,
    pub normalizer: subsystems::NormalizerConfig,
    pub segmenter: subsystems::SegmenterConfig,
    pub sequencer: subsystems::SequencerConfig,
    pub processor: subsystems::ProcessorConfig,
}

impl TartilConfig {
    pub fn validate(&self) -> Result<()> {
        self.files.validate()?;
        self.source.validate()?;
        self.normalizer.validate()?;
        self.segmenter.validate()?;
        self.sequencer.validate()?;
        self.processor.validate()?;
        Ok(())
    }

    pub fn from_ini<P: AsRef<Path>>(path: P) -> Result<Self> {
        let absolute_path = std::fs::canonicalize(&path)
            .unwrap_or_else(|_| path.as_ref().to_path_buf());

        trace!("Loading configuration from: {:?}", absolute_path);

        let content = fs::read_to_string(&path)?;
        let mut config = Self::default();
        config.apply_ini(&content);
        config.validate()?;
        Ok(config)
    }

    fn apply_ini(&mut self, content: &str) {
        let mut current_section = String::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len()-1].to_string();
                trace!("  Line {}: Found section: [{}]", line_num + 1, current_section);
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                // Delegate to appropriate subsystem config
                if let Some(result) = match current_section.as_str() {
                    "file" => self.files.from_ini_section(&current_section, key, value),
                    "source" => self.source.from_ini_section(&current_section, key, value),
                    "normalizer" => self.normalizer.from_ini_section(&current_section, key, value),
                    "segmenter" => self.segmenter.from_ini_section(&current_section, key, value),
                    "sequencer" => self.sequencer.from_ini_section(&current_section, key, value),
                    "processor" => self.processor.from_ini_section(&current_section, key, value),
                    _ => None,
                } {
                    if let Err(e) = result {
                        warn!("Error processing config key {}={}: {}", key, value, e);
                    }
                } else {
                    warn!("Unrecognized config key: {}={} in section [{}]", key, value, current_section);
                }
            }
        }
    }
}

impl Default for TartilConfig {
    fn default() -> Self {
        Self {
            files: file::FileConfig::default(),
            source: subsystems::SourceConfig::default(),
            normalizer: subsystems::NormalizerConfig::default(),
            segmenter: subsystems::SegmenterConfig::default(),
            sequencer: subsystems::SequencerConfig::default(),
            processor: subsystems::ProcessorConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ini_overrides_reach_subsystems() {
        let mut config = TartilConfig::default();
        config.apply_ini(
            "# comment\n\
             [source]\n\
             start_page = 10\n\
             end_page = 20\n\
             [segmenter]\n\
             max_header_len = 40\n\
             [sequencer]\n\
             max_verse_jump = 25\n\
             missing_marker = [LOST]\n",
        );

        assert_eq!(config.source.start_page, 10);
        assert_eq!(config.source.end_page, 20);
        assert_eq!(config.segmenter.max_header_len, 40);
        assert_eq!(config.sequencer.max_verse_jump, 25);
        assert_eq!(config.sequencer.missing_marker, "[LOST]");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut config = TartilConfig::default();
        config.apply_ini("[sequencer]\nno_such_key = 5\n");
        assert_eq!(config.sequencer.max_verse_jump, 50);
    }
}
