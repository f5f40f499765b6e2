//! Persistence of the two pipeline artifacts: the cleaned body text (one
//! line per record, blank lines at surah starts) and the verse index
//! (`"<surah>:<verse> <text>"` per line), plus the Ayahref-keyed map
//! downstream enrichment reads the index back into.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use log::{info, warn};

use crate::error::Result;
use crate::types::{VerseKey, VerseRecord};

/// Stand-in text for an index line that carries a key but no content.
pub const EMPTY_TEXT_SENTINEL: &str = "[TEXT MISSING IN SOURCE]";

pub fn write_cleaned_text<P: AsRef<Path>>(path: P, lines: &[String]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    writer.write_all(lines.join("\n").as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    info!("Wrote {} cleaned lines to {:?}", lines.len(), path.as_ref());
    Ok(())
}

pub fn read_cleaned_text<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content.lines().map(str::to_string).collect())
}

pub fn write_verse_index<P: AsRef<Path>>(path: P, records: &[VerseRecord]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    for record in records {
        if record.text.is_empty() {
            writeln!(writer, "{}", record.key)?;
        } else {
            writeln!(writer, "{} {}", record.key, record.text)?;
        }
    }
    writer.flush()?;
    info!("Wrote {} verse records to {:?}", records.len(), path.as_ref());
    Ok(())
}

/// Ordered `VerseKey -> text` map, the pure mapping source the spreadsheet
/// collaborator consumes.
#[derive(Debug, Default)]
pub struct VerseIndex {
    map: BTreeMap<VerseKey, String>,
}

impl VerseIndex {
    pub fn from_records(records: &[VerseRecord]) -> Self {
        let mut map = BTreeMap::new();
        for record in records {
            map.insert(record.key, record.text.clone());
        }
        Self { map }
    }

    /// Read a persisted verse-index file. A line holding only a key maps to
    /// the empty-text sentinel; lines that do not start with a key are
    /// skipped.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let mut map = BTreeMap::new();
        let mut skipped = 0usize;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (key_part, text) = match line.split_once(' ') {
                Some((key_part, text)) => (key_part, text.trim().to_string()),
                None => (line, EMPTY_TEXT_SENTINEL.to_string()),
            };
            match VerseKey::parse_normalized(key_part) {
                Some(key) => {
                    map.insert(key, text);
                }
                None => {
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            warn!("Skipped {} index lines without a surah:verse key", skipped);
        }
        info!("Loaded {} verses from {:?}", map.len(), path.as_ref());
        Ok(Self { map })
    }

    pub fn get(&self, key: &VerseKey) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    /// Look a verse up by a raw sheet reference like `" 2 : 102 "`.
    pub fn lookup(&self, raw_ref: &str) -> Option<&str> {
        VerseKey::parse_normalized(raw_ref).and_then(|key| self.get(&key))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VerseKey, &String)> {
        self.map.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn verse_index_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.txt");

        let records = vec![
            VerseRecord::new(1, 1, "Alpha"),
            VerseRecord::new(1, 2, "[MISSING LINE]"),
            VerseRecord::new(2, 1, ""),
        ];
        write_verse_index(&path, &records).unwrap();

        let index = VerseIndex::load(&path).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.get(&VerseKey::new(1, 1)), Some("Alpha"));
        assert_eq!(index.get(&VerseKey::new(1, 2)), Some("[MISSING LINE]"));
        // Bare key line reads back as the sentinel
        assert_eq!(index.get(&VerseKey::new(2, 1)), Some(EMPTY_TEXT_SENTINEL));
    }

    #[test]
    fn lookup_normalizes_sheet_references() {
        let index = VerseIndex::from_records(&[VerseRecord::new(2, 102, "testo")]);
        assert_eq!(index.lookup(" 2 : 102 "), Some("testo"));
        assert_eq!(index.lookup("2:103"), None);
        assert_eq!(index.lookup("garbage"), None);
    }

    #[test]
    fn load_skips_unkeyed_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.txt");
        fs::write(&path, "1:1 Alpha\nnot a record\n\n1:2 Beta\n").unwrap();

        let index = VerseIndex::load(&path).unwrap();
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn cleaned_text_round_trip_keeps_blank_separators() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cleaned.txt");
        let lines = vec![
            "1 alfa".to_string(),
            String::new(),
            "1 beta".to_string(),
        ];
        write_cleaned_text(&path, &lines).unwrap();
        assert_eq!(read_cleaned_text(&path).unwrap(), lines);
    }

    #[test]
    fn iteration_is_key_ordered() {
        let index = VerseIndex::from_records(&[
            VerseRecord::new(2, 1, "c"),
            VerseRecord::new(1, 2, "b"),
            VerseRecord::new(1, 1, "a"),
        ]);
        let keys: Vec<String> = index.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["1:1", "1:2", "2:1"]);
    }
}
