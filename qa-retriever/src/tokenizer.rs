//! Text analysis: lowercase word tokens, optional stop-word removal,
//! unigram + bigram term extraction.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Runs of two or more word characters (Unicode aware).
    static ref TOKEN_RE: Regex = Regex::new(r"\b\w\w+\b").expect("valid token regex");

    static ref STOP_WORDS: HashSet<&'static str> = ENGLISH_STOP_WORDS.iter().copied().collect();
}

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "either",
    "else", "etc", "ever", "every", "few", "for", "from", "further", "had", "has", "have",
    "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how", "however",
    "i", "if", "in", "into", "is", "it", "its", "itself", "just", "may", "me", "might", "more",
    "most", "much", "must", "my", "myself", "neither", "no", "nor", "not", "now", "of", "off",
    "often", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over",
    "own", "per", "rather", "same", "shall", "she", "should", "since", "so", "some", "such",
    "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these",
    "they", "this", "those", "though", "through", "thus", "to", "too", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "were", "what", "whatever", "when", "whenever",
    "where", "whereas", "wherever", "whether", "which", "while", "who", "whoever", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Turns raw text into the terms indexed by [`crate::index::LexicalIndex`].
///
/// Both indexed questions and incoming queries must go through the same
/// analyzer, otherwise their vectors live in different spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analyzer {
    stop_words: bool,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self { stop_words: true }
    }
}

impl Analyzer {
    pub fn new(stop_words: bool) -> Self {
        Self { stop_words }
    }

    pub fn filters_stop_words(&self) -> bool {
        self.stop_words
    }

    /// Lowercased word tokens, stop words removed unless that would leave
    /// nothing behind.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let tokens: Vec<String> = TOKEN_RE
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect();

        if !self.stop_words {
            return tokens;
        }

        let content: Vec<String> = tokens
            .iter()
            .filter(|t| !STOP_WORDS.contains(t.as_str()))
            .cloned()
            .collect();

        if content.is_empty() { tokens } else { content }
    }

    /// Unigrams followed by space-joined bigrams of adjacent tokens.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let tokens = self.tokens(text);
        let bigrams: Vec<String> = tokens
            .windows(2)
            .map(|w| format!("{} {}", w[0], w[1]))
            .collect();

        let mut terms = tokens;
        terms.extend(bigrams);
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_drops_single_chars() {
        let a = Analyzer::new(false);
        assert_eq!(a.tokens("A Quick, brown-FOX!"), vec!["quick", "brown", "fox"]);
    }

    #[test]
    fn unicode_words_are_tokens() {
        let a = Analyzer::new(false);
        assert_eq!(a.tokens("Größe über café"), vec!["größe", "über", "café"]);
    }

    #[test]
    fn removes_stop_words_then_builds_bigrams() {
        let a = Analyzer::default();
        assert_eq!(
            a.terms("What is your return policy"),
            vec!["return", "policy", "return policy"]
        );
    }

    #[test]
    fn keeps_all_tokens_when_everything_is_a_stop_word() {
        let a = Analyzer::default();
        assert_eq!(
            a.terms("who are you"),
            vec!["who", "are", "you", "who are", "are you"]
        );
    }

    #[test]
    fn stop_words_can_be_disabled() {
        let a = Analyzer::new(false);
        assert_eq!(a.terms("the fox"), vec!["the", "fox", "the fox"]);
    }

    #[test]
    fn empty_text_has_no_terms() {
        assert!(Analyzer::default().terms("  ?! a ").is_empty());
    }
}
