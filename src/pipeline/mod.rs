//! One reconstruction run: page source -> normalizer -> segmenter ->
//! tokenizer -> sequencer, each stage consuming the whole output of the
//! previous one. Runs over different source files are independent; the
//! stages inside a run carry state and stay strictly ordered.

use std::path::{Path, PathBuf};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::info;
use serde::Serialize;

use crate::config::TartilConfig;
use crate::error::Result;
use crate::index;
use crate::normalizer::LineNormalizer;
use crate::segmenter::StructuralSegmenter;
use crate::sequencer::{SequenceOutcome, VerseSequencer};
use crate::source::{PageSource, TextPageSource};
use crate::tokenizer;
use crate::types::VerseKey;

/// What one run produced, serialized as the JSON run report.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub source: PathBuf,
    pub pages: usize,
    pub cleaned_lines: usize,
    pub records: usize,
    pub surahs: u32,
    pub missing: Vec<VerseKey>,
    pub intext_folds: usize,
    pub skipped_numerals: usize,
    pub cleaned_path: PathBuf,
    pub index_path: PathBuf,
}

pub struct ReconstructionPipeline {
    config: TartilConfig,
    normalizer: LineNormalizer,
    segmenter: StructuralSegmenter,
    sequencer: VerseSequencer,
}

impl ReconstructionPipeline {
    pub fn new(config: TartilConfig) -> Self {
        let normalizer = LineNormalizer::new(&config.normalizer);
        let segmenter = StructuralSegmenter::new(config.segmenter.clone());
        let sequencer = VerseSequencer::new(config.sequencer.clone());
        Self {
            config,
            normalizer,
            segmenter,
            sequencer,
        }
    }

    /// The in-memory pipeline over already-extracted page groups. Returns
    /// the cleaned line sequence (the persisted intermediate) and the
    /// sequencer outcome.
    pub fn process(&self, pages: &[Vec<String>]) -> (Vec<String>, SequenceOutcome) {
        let normalized = self.normalizer.normalize(pages);
        let cleaned = self.segmenter.segment(&normalized);
        let tokens = tokenizer::tokenize_lines(&cleaned);
        let outcome = self.sequencer.sequence(&tokens);
        (cleaned, outcome)
    }

    /// Full run over one source file: read the configured page window,
    /// reconstruct, persist the cleaned text and the verse index.
    pub fn run_file(&self, source_path: &Path, multi: Option<&MultiProgress>) -> Result<RunSummary> {
        let source = TextPageSource::open(source_path)?;
        let pages = source.read_pages(self.config.source.start_page, self.config.source.end_page)?;
        info!(
            "Scanning {:?}: pages {}-{} ({} in range)",
            source_path,
            self.config.source.start_page,
            self.config.source.end_page,
            pages.len()
        );

        let progress = multi.map(|m| {
            let bar = m.add(ProgressBar::new(pages.len() as u64));
            bar.set_style(ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap());
            bar.set_message(format!("{}", source_path.display()));
            bar
        });

        let mut normalized = Vec::new();
        for page in &pages {
            normalized.extend(self.normalizer.normalize_page(page));
            if let Some(bar) = &progress {
                bar.inc(1);
            }
        }
        if let Some(bar) = &progress {
            bar.finish_with_message("pages scanned");
        }

        let cleaned = self.segmenter.segment(&normalized);
        let stem = source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "source".to_string());

        let cleaned_path = self.config.files.cleaned_dir.join(format!("{}_cleaned.txt", stem));
        index::write_cleaned_text(&cleaned_path, &cleaned)?;

        let tokens = tokenizer::tokenize_lines(&cleaned);
        let outcome = self.sequencer.sequence(&tokens);

        let index_path = self.config.files.index_dir.join(format!("{}_verses.txt", stem));
        index::write_verse_index(&index_path, &outcome.records)?;

        Ok(RunSummary {
            source: source_path.to_path_buf(),
            pages: pages.len(),
            cleaned_lines: cleaned.len(),
            records: outcome.records.len(),
            surahs: outcome.final_surah,
            missing: outcome.gaps,
            intext_folds: outcome.intext_folds,
            skipped_numerals: outcome.skipped_numerals,
            cleaned_path,
            index_path,
        })
    }
}
