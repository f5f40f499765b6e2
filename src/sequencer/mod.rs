//! Verse sequencer: the continuity-repair engine. Consumes the numeral/span
//! token stream statefully, decides which numerals are verse boundaries,
//! which open a new surah and which are just numbers inside the prose, and
//! emits one record per (surah, verse) with explicit markers where the
//! source skipped a verse.

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::subsystems::SequencerConfig;
use crate::types::{Token, VerseKey, VerseRecord};

/// Counters threaded through the fold over the token stream. Invariant:
/// `expected_verse == previous_verse + 1` right after any commit;
/// `previous_verse == 0` means nothing committed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencerState {
    pub current_surah: u32,
    pub expected_verse: u32,
    pub previous_verse: u32,
}

impl SequencerState {
    pub fn new(start_surah: u32) -> Self {
        Self {
            current_surah: start_surah,
            expected_verse: 1,
            previous_verse: 0,
        }
    }
}

/// Records plus run diagnostics, serialized into the run report.
#[derive(Debug, Clone, Serialize)]
pub struct SequenceOutcome {
    pub records: Vec<VerseRecord>,
    /// Keys that were gap-filled with the missing-line sentinel.
    pub gaps: Vec<VerseKey>,
    /// Numerals judged to be prose content and folded into the preceding
    /// record (or dropped when none existed yet).
    pub intext_folds: usize,
    /// Numeral tokens that did not parse and were skipped.
    pub skipped_numerals: usize,
    pub final_surah: u32,
}

pub struct VerseSequencer {
    settings: SequencerConfig,
}

impl VerseSequencer {
    pub fn new(settings: SequencerConfig) -> Self {
        Self { settings }
    }

    pub fn new_with_defaults() -> Self {
        Self::new(SequencerConfig::default())
    }

    pub fn sequence(&self, tokens: &[Token]) -> SequenceOutcome {
        let mut state = SequencerState::new(self.settings.start_surah);
        let mut records: Vec<VerseRecord> = Vec::new();
        let mut gaps: Vec<VerseKey> = Vec::new();
        let mut intext_folds = 0usize;
        let mut skipped_numerals = 0usize;

        let mut i = 0;
        while i < tokens.len() {
            let (literal, value) = match &tokens[i] {
                Token::Numeral { literal, value } => (literal.as_str(), *value),
                Token::Text(_) => {
                    i += 1;
                    continue;
                }
            };
            let span = match tokens.get(i + 1) {
                Some(Token::Text(text)) => {
                    i += 2;
                    text.trim()
                }
                _ => {
                    i += 1;
                    ""
                }
            };

            // A digit run that does not fit the verse domain is an
            // extraction artifact, not a boundary candidate
            let found = match value {
                Some(found) => found,
                None => {
                    debug!("Skipping unparseable numeral token {:?}", literal);
                    skipped_numerals += 1;
                    continue;
                }
            };

            // Verse numbering rolled back: the only surviving signal of a
            // surah boundary, the header text is long gone
            if state.previous_verse > 0 && found < state.previous_verse {
                state.current_surah += 1;
                state.expected_verse = 1;
                info!(
                    "Verse numbering reset at {} -> surah {}",
                    found, state.current_surah
                );
            }

            // A jump far past the expected verse is a number inside the
            // prose (a date, a count), not verse numbering
            if i64::from(found) - i64::from(state.expected_verse)
                > i64::from(self.settings.max_verse_jump)
            {
                intext_folds += 1;
                match records.last_mut() {
                    Some(last) => {
                        debug!(
                            "Folding in-text numeral {} into {}",
                            literal, last.key
                        );
                        last.text.push(' ');
                        last.text.push_str(literal);
                        if !span.is_empty() {
                            last.text.push(' ');
                            last.text.push_str(span);
                        }
                    }
                    None => {
                        debug!("Dropping in-text numeral {} before any record", literal);
                    }
                }
                continue;
            }

            // Fill every skipped verse explicitly; the index must have no
            // silent holes
            while state.expected_verse < found {
                let key = VerseKey::new(state.current_surah, state.expected_verse);
                warn!("Missing verse detected: {}", key);
                records.push(VerseRecord::new(
                    key.surah,
                    key.verse,
                    self.settings.missing_marker.clone(),
                ));
                gaps.push(key);
                state.expected_verse += 1;
            }

            records.push(VerseRecord::new(state.current_surah, found, span));
            state.previous_verse = found;
            state.expected_verse = found + 1;
        }

        info!(
            "Sequenced {} records across {} surah(s), {} missing, {} in-text numerals",
            records.len(),
            state.current_surah,
            gaps.len(),
            intext_folds
        );

        SequenceOutcome {
            records,
            gaps,
            intext_folds,
            skipped_numerals,
            final_surah: state.current_surah,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer;

    fn run(stream: &str) -> SequenceOutcome {
        VerseSequencer::new_with_defaults().sequence(&tokenizer::tokenize(stream))
    }

    fn record(outcome: &SequenceOutcome, surah: u32, verse: u32) -> &VerseRecord {
        outcome
            .records
            .iter()
            .find(|r| r.key == VerseKey::new(surah, verse))
            .unwrap()
    }

    #[test]
    fn end_to_end_scenario_with_gap_and_new_surah() {
        let outcome = run("1 Alpha 2 Beta 4 Delta 1 Gamma");

        let keys: Vec<String> = outcome.records.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(keys, vec!["1:1", "1:2", "1:3", "1:4", "2:1"]);

        assert_eq!(record(&outcome, 1, 1).text, "Alpha");
        assert_eq!(record(&outcome, 1, 3).text, "[MISSING LINE]");
        assert_eq!(record(&outcome, 1, 4).text, "Delta");
        assert_eq!(record(&outcome, 2, 1).text, "Gamma");

        assert_eq!(outcome.gaps, vec![VerseKey::new(1, 3)]);
        assert_eq!(outcome.final_surah, 2);
    }

    #[test]
    fn jump_of_exactly_threshold_is_gap_filled() {
        // expected_verse is 2 after the commit; 52 - 2 == 50, the boundary
        let outcome = run("1 Alpha 52 Beta");
        assert_eq!(outcome.records.len(), 52);
        assert_eq!(outcome.gaps.len(), 50);
        assert_eq!(record(&outcome, 1, 2).text, "[MISSING LINE]");
        assert_eq!(record(&outcome, 1, 52).text, "Beta");
        assert_eq!(outcome.intext_folds, 0);
    }

    #[test]
    fn jump_past_threshold_folds_into_previous_record() {
        // 53 - 2 == 51 > 50: prose numeral
        let outcome = run("1 Alpha 53 Beta");
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(record(&outcome, 1, 1).text, "Alpha 53 Beta");
        assert_eq!(outcome.intext_folds, 1);
        assert!(outcome.gaps.is_empty());
    }

    #[test]
    fn prose_numeral_before_any_record_is_dropped() {
        let outcome = run("siamo nel 1492 in mare 1 Alpha");
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(record(&outcome, 1, 1).text, "Alpha");
        assert_eq!(outcome.intext_folds, 1);
    }

    #[test]
    fn unparseable_numeral_is_skipped_without_state_change() {
        let tokens = vec![
            Token::numeral("1"),
            Token::text(" Alpha "),
            Token::numeral("99999999999999999999"),
            Token::text(" rumore "),
            Token::numeral("2"),
            Token::text(" Beta"),
        ];
        let outcome = VerseSequencer::new_with_defaults().sequence(&tokens);
        let keys: Vec<String> = outcome.records.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(keys, vec!["1:1", "1:2"]);
        assert_eq!(outcome.skipped_numerals, 1);
    }

    #[test]
    fn surah_advances_by_one_per_rollback() {
        let outcome = run("1 a 2 b 1 c 2 d 3 e 1 f");
        assert_eq!(outcome.final_surah, 3);

        // Non-decreasing surah sequence, steps of exactly one
        let mut last = 0;
        for r in &outcome.records {
            assert!(r.key.surah == last || r.key.surah == last + 1);
            last = r.key.surah;
        }
    }

    #[test]
    fn no_silent_gaps_in_final_key_set() {
        let outcome = run("2 a 5 b 7 c 1 d 3 e");
        let mut by_surah: std::collections::BTreeMap<u32, Vec<u32>> = Default::default();
        for r in &outcome.records {
            by_surah.entry(r.key.surah).or_default().push(r.key.verse);
        }
        for verses in by_surah.values() {
            let max = *verses.iter().max().unwrap();
            for v in 1..=max {
                assert!(verses.contains(&v), "hole at verse {}", v);
            }
        }
    }

    #[test]
    fn duplicate_free_key_set() {
        let outcome = run("1 a 2 b 4 c 1 d 2 e");
        let mut seen = std::collections::HashSet::new();
        for r in &outcome.records {
            assert!(seen.insert(r.key), "duplicate key {}", r.key);
        }
    }

    #[test]
    fn trailing_numeral_commits_with_empty_text() {
        let outcome = run("1 Alpha 2");
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(record(&outcome, 1, 2).text, "");
    }

    #[test]
    fn custom_start_surah_and_marker() {
        let settings = SequencerConfig {
            start_surah: 3,
            max_verse_jump: 50,
            missing_marker: "[LACUNA]".to_string(),
        };
        let outcome =
            VerseSequencer::new(settings).sequence(&tokenizer::tokenize("2 solo"));
        assert_eq!(outcome.records[0].key, VerseKey::new(3, 1));
        assert_eq!(outcome.records[0].text, "[LACUNA]");
        assert_eq!(outcome.records[1].key, VerseKey::new(3, 2));
    }
}
