//! Structural segmenter: strips each surah's printed front matter (header
//! line, decorative title, invocation) from the normalized line stream and
//! marks verse-numbering restarts with blank separator lines. Only the very
//! first invocation of the work is kept.

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;

use crate::config::subsystems::SegmenterConfig;

lazy_static! {
    // "SURA 2", "S U R A 14", "Su¯ra 3" -- the extractor mangles the header
    // token freely, the anchor letters survive
    static ref HEADER_NUMBERED: Regex = Regex::new(r"(?i)S.*[uū].*R.*A.*\d+").unwrap();
    // "Sura I", "SURA XIV"
    static ref HEADER_ROMAN: Regex = Regex::new(r"(?i)S.*[uū].*R.*A.*[IVX]+$").unwrap();
    static ref STUCK_NUMERAL: Regex = Regex::new(r"(\d)([A-Za-zÀ-ÿ])").unwrap();
}

/// Re-insert the space the extractor lost between a verse numeral and the
/// word fused onto it ("1Nel" -> "1 Nel"). A no-op on already-spaced text.
pub fn space_stuck_numerals(line: &str) -> String {
    STUCK_NUMERAL.replace_all(line, "$1 $2").into_owned()
}

/// What to do with a header line and its two-line lookahead window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    /// First header of the work, invocation in slot 2: drop header and
    /// title, let the invocation re-enter the stream as body text.
    FirstWithInvocation,
    /// Later surah with its invocation: drop all three lines.
    WithInvocation,
    /// No invocation follows: drop the header only, title and the next line
    /// are body text.
    WithoutInvocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderDecision {
    pub kind: HeaderKind,
    /// How many lines the header block consumes from the stream.
    pub advance: usize,
}

pub struct StructuralSegmenter {
    settings: SegmenterConfig,
    invocation_lower: String,
}

impl StructuralSegmenter {
    pub fn new(settings: SegmenterConfig) -> Self {
        let invocation_lower = settings.invocation.to_lowercase();
        Self {
            settings,
            invocation_lower,
        }
    }

    pub fn new_with_defaults() -> Self {
        Self::new(SegmenterConfig::default())
    }

    /// Header test: short, comma-free, and carrying the surah token followed
    /// by an Arabic or Roman numeral. Narrative prose that embeds the token
    /// fails the length or comma filter.
    pub fn is_surah_header(&self, line: &str) -> bool {
        if line.chars().count() > self.settings.max_header_len {
            return false;
        }
        // Saves verse lines like "sopra di loro, 9..."
        if line.contains(',') {
            return false;
        }
        HEADER_NUMBERED.is_match(line) || HEADER_ROMAN.is_match(line)
    }

    pub fn is_invocation(&self, line: &str) -> bool {
        line.to_lowercase().contains(&self.invocation_lower)
    }

    /// Pure classification of a header line against its lookahead window.
    /// Returns `None` for body lines. `lookahead[0]` is the title slot; only
    /// slot 2 decides the branch, the title is discarded either way.
    pub fn classify(
        &self,
        line: &str,
        lookahead: [&str; 2],
        seen_first_header: bool,
    ) -> Option<HeaderDecision> {
        if !self.is_surah_header(line) {
            return None;
        }

        let invocation_in_slot2 = self.is_invocation(lookahead[1]);

        let decision = if !seen_first_header && invocation_in_slot2 {
            HeaderDecision {
                kind: HeaderKind::FirstWithInvocation,
                advance: 2,
            }
        } else if invocation_in_slot2 {
            HeaderDecision {
                kind: HeaderKind::WithInvocation,
                advance: 3,
            }
        } else {
            HeaderDecision {
                kind: HeaderKind::WithoutInvocation,
                advance: 1,
            }
        };
        Some(decision)
    }

    /// Run the header state machine over the normalized lines and emit the
    /// cleaned body stream with blank lines marking surah starts.
    pub fn segment(&self, lines: &[String]) -> Vec<String> {
        let mut output: Vec<String> = Vec::with_capacity(lines.len());
        let mut seen_first_header = false;
        let mut headers = 0usize;
        let mut i = 0;

        while i < lines.len() {
            let line = &lines[i];
            let slot1 = lines.get(i + 1).map(String::as_str).unwrap_or("");
            let slot2 = lines.get(i + 2).map(String::as_str).unwrap_or("");

            if let Some(decision) = self.classify(line, [slot1, slot2], seen_first_header) {
                if i + 2 >= lines.len() {
                    // Truncated lookahead at the end of the document falls
                    // through to the no-invocation branch
                    debug!("Header {:?} has incomplete lookahead, keeping following lines", line);
                }
                seen_first_header = true;
                headers += 1;
                debug!("Header {:?} classified as {:?}", line, decision.kind);
                i += decision.advance;
                continue;
            }

            let line = space_stuck_numerals(line);

            // Verse numbering restarted: new surah begins on this line
            if (line == "1" || line.starts_with("1 ")) && !output.is_empty() {
                output.push(String::new());
            }

            output.push(line);
            i += 1;
        }

        info!("Segmenter removed {} header blocks, emitted {} lines", headers, output.len());
        output
    }
}
