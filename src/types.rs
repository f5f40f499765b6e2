use std::fmt;
use serde::{Serialize, Deserialize};

/// Canonical `surah:verse` reference, the key shared with downstream
/// vocabulary sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VerseKey {
    pub surah: u32,
    pub verse: u32,
}

impl VerseKey {
    pub fn new(surah: u32, verse: u32) -> Self {
        Self { surah, verse }
    }

    /// Parse a reference as it appears in hand-maintained sheets, where
    /// " 2 : 102 " and "2:102" must resolve to the same key.
    pub fn parse_normalized(raw: &str) -> Option<Self> {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        let (surah, verse) = compact.split_once(':')?;
        Some(Self {
            surah: surah.parse().ok()?,
            verse: verse.parse().ok()?,
        })
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.surah, self.verse)
    }
}

/// One committed verse. A verse the source skipped is carried as a record
/// whose text is the configured missing-line sentinel, so the final key set
/// never has silent holes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub key: VerseKey,
    pub text: String,
}

impl VerseRecord {
    pub fn new(surah: u32, verse: u32, text: impl Into<String>) -> Self {
        Self {
            key: VerseKey::new(surah, verse),
            text: text.into(),
        }
    }
}

/// Output of the stream tokenizer: strictly alternating text spans and
/// numeral runs. `value` is `None` when the digit run does not fit a u32;
/// the sequencer treats such a pair as an extraction artifact and skips it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Numeral { literal: String, value: Option<u32> },
    Text(String),
}

impl Token {
    pub fn numeral(literal: impl Into<String>) -> Self {
        let literal = literal.into();
        let value = literal.parse().ok();
        Token::Numeral { literal, value }
    }

    pub fn text(span: impl Into<String>) -> Self {
        Token::Text(span.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalized_strips_interior_whitespace() {
        assert_eq!(
            VerseKey::parse_normalized(" 2 : 102 "),
            Some(VerseKey::new(2, 102))
        );
        assert_eq!(VerseKey::parse_normalized("2:102"), Some(VerseKey::new(2, 102)));
    }

    #[test]
    fn parse_normalized_rejects_malformed_refs() {
        assert_eq!(VerseKey::parse_normalized("2-102"), None);
        assert_eq!(VerseKey::parse_normalized("2:"), None);
        assert_eq!(VerseKey::parse_normalized("two:3"), None);
    }

    #[test]
    fn display_round_trips_through_parse() {
        let key = VerseKey::new(114, 6);
        assert_eq!(VerseKey::parse_normalized(&key.to_string()), Some(key));
    }

    #[test]
    fn oversized_numeral_has_no_value() {
        match Token::numeral("99999999999") {
            Token::Numeral { literal, value } => {
                assert_eq!(literal, "99999999999");
                assert_eq!(value, None);
            }
            _ => unreachable!(),
        }
    }
}
