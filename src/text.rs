//! Text statistics shared by the DOCX and PDF pipelines.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};

/// Count whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count Unicode scalar values.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `numerator / denominator` rounded to two decimals.
///
/// Fails with [`Error::EmptyContent`] when the denominator is zero.
pub fn average(numerator: usize, denominator: usize, what: &'static str) -> Result<f64> {
    if denominator == 0 {
        return Err(Error::EmptyContent(what));
    }
    Ok(round2(numerator as f64 / denominator as f64))
}

/// Case-insensitive literal matcher for a search term.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    regex: Regex,
}

impl TermMatcher {
    /// Build a matcher, or `None` when the term is empty.
    pub fn new(term: &str) -> Result<Option<Self>> {
        if term.is_empty() {
            return Ok(None);
        }
        let regex = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::InvalidParameter(format!("search term: {}", e)))?;
        Ok(Some(Self { regex }))
    }

    /// Count non-overlapping occurrences in `text`.
    pub fn count_in(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }

    /// Whether `text` contains the term.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Most frequent whitespace tokens, descending by count.
///
/// Tokens are compared literally (no case folding or punctuation stripping).
/// Equal counts keep the order in which the tokens first appeared.
pub fn word_frequency<'a, I>(texts: I, top_n: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(&'a str, usize)> = Vec::new();

    for text in texts {
        for token in text.split_whitespace() {
            match index.get(token) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(token, counts.len());
                    counts.push((token, 1));
                }
            }
        }
    }

    // sort_by is stable, so first-seen order survives among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(top_n)
        .map(|(word, count)| (word.to_string(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_and_char_count() {
        assert_eq!(word_count("Hello world"), 2);
        assert_eq!(word_count("  spaced\tout \n words "), 3);
        assert_eq!(word_count(""), 0);
        assert_eq!(char_count("héllo"), 5);
    }

    #[test]
    fn test_average_rounding() {
        assert_eq!(average(10, 3, "document").unwrap(), 3.33);
        assert_eq!(average(4, 2, "document").unwrap(), 2.0);
        assert!(matches!(
            average(4, 0, "document"),
            Err(Error::EmptyContent("document"))
        ));
    }

    #[test]
    fn test_matcher_case_insensitive() {
        let matcher = TermMatcher::new("hello").unwrap().unwrap();
        assert_eq!(matcher.count_in("Hello HELLO hello"), 3);
        assert!(matcher.is_match("say HeLLo"));
        assert!(!matcher.is_match("help"));
    }

    #[test]
    fn test_matcher_non_overlapping() {
        let matcher = TermMatcher::new("aa").unwrap().unwrap();
        assert_eq!(matcher.count_in("aaaa"), 2);
        assert_eq!(matcher.count_in("aaa"), 1);
    }

    #[test]
    fn test_matcher_literal_metacharacters() {
        let matcher = TermMatcher::new("a.b").unwrap().unwrap();
        assert_eq!(matcher.count_in("a.b axb"), 1);
    }

    #[test]
    fn test_matcher_empty_term() {
        assert!(TermMatcher::new("").unwrap().is_none());
    }

    #[test]
    fn test_word_frequency_order() {
        let texts = ["b a b", "c a b", "d"];
        let freq = word_frequency(texts.iter().copied(), 10);
        assert_eq!(
            freq,
            vec![
                ("b".to_string(), 3),
                ("a".to_string(), 2),
                ("c".to_string(), 1),
                ("d".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_word_frequency_literal_tokens() {
        let freq = word_frequency(["The the the,"].iter().copied(), 10);
        assert_eq!(freq.len(), 3);
        assert!(freq.iter().all(|(_, count)| *count == 1));
    }

    #[test]
    fn test_word_frequency_truncates() {
        let text = (0..20).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let freq = word_frequency([text.as_str()], 10);
        assert_eq!(freq.len(), 10);
        assert_eq!(freq[0].0, "0");
    }
}
