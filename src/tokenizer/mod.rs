//! Stream tokenizer: collapses the cleaned line sequence into one text
//! stream, repairing words the typesetter broke across lines, then splits
//! the stream on digit runs into alternating text/numeral tokens for the
//! sequencer.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::types::Token;

lazy_static! {
    // Trailing hyphen glued back onto its continuation line
    static ref HYPHEN_BREAK: Regex = Regex::new(r"-\s*\n\s*").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref DIGIT_RUN: Regex = Regex::new(r"\d+").unwrap();
}

/// Collapse cleaned lines into a single space-normalized stream.
pub fn collapse(lines: &[String]) -> String {
    let content = lines.join("\n");
    let content = HYPHEN_BREAK.replace_all(&content, "");
    let content = content.replace('\n', " ");
    WHITESPACE.replace_all(&content, " ").trim().to_string()
}

/// Split the stream on maximal digit runs. Tokens strictly alternate
/// text/numeral; an empty leading text token is dropped, and a stream ending
/// in digits still gets an (empty) span so every numeral has one.
pub fn tokenize(stream: &str) -> Vec<Token> {
    if stream.is_empty() {
        return Vec::new();
    }

    let mut tokens = Vec::new();
    let mut last = 0;

    for run in DIGIT_RUN.find_iter(stream) {
        let span = &stream[last..run.start()];
        if !(tokens.is_empty() && span.is_empty()) {
            tokens.push(Token::text(span));
        }
        tokens.push(Token::numeral(run.as_str()));
        last = run.end();
    }
    tokens.push(Token::text(&stream[last..]));

    debug!("Tokenized stream of {} bytes into {} tokens", stream.len(), tokens.len());
    tokens
}

/// Convenience composition of the two steps.
pub fn tokenize_lines(lines: &[String]) -> Vec<Token> {
    tokenize(&collapse(lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rejoins_hyphenated_words() {
        let out = collapse(&lines(&["il miseri-", "cordioso giudice"]));
        assert_eq!(out, "il misericordioso giudice");
    }

    #[test]
    fn hyphen_repair_tolerates_surrounding_whitespace() {
        let out = collapse(&lines(&["incanta-  ", "   ta e disse"]));
        assert_eq!(out, "incantata e disse");
    }

    #[test]
    fn collapses_whitespace_runs_and_blank_separators() {
        let out = collapse(&lines(&["1 alfa", "", "1  beta   tre"]));
        assert_eq!(out, "1 alfa 1 beta tre");
    }

    #[test]
    fn tokens_alternate_starting_after_leading_digit() {
        let tokens = tokenize("1 Alpha 2 Beta");
        assert_eq!(
            tokens,
            vec![
                Token::numeral("1"),
                Token::text(" Alpha "),
                Token::numeral("2"),
                Token::text(" Beta"),
            ]
        );
    }

    #[test]
    fn leading_text_is_kept_when_present() {
        let tokens = tokenize("preambolo 1 Alpha");
        assert_eq!(tokens[0], Token::text("preambolo "));
        assert_eq!(tokens[1], Token::numeral("1"));
    }

    #[test]
    fn trailing_numeral_gets_empty_span() {
        let tokens = tokenize("1 Alpha 2");
        assert_eq!(tokens.last(), Some(&Token::text("")));
        assert_eq!(tokens[tokens.len() - 2], Token::numeral("2"));
    }

    #[test]
    fn stream_without_numerals_is_one_span() {
        assert_eq!(tokenize("solo testo"), vec![Token::text("solo testo")]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn maximal_digit_runs_stay_single_tokens() {
        let tokens = tokenize("anno 1492 circa");
        assert_eq!(tokens[1], Token::numeral("1492"));
    }
}
