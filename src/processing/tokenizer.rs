//! Text normalization and tokenization

use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// A normalized lexical term with its byte span in the source text.
///
/// `text` is lower-cased; `start..end` always indexes the original input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

pub struct Tokenizer {
    compound_terms: HashSet<&'static str>,
    bullet_regex: Regex,
}

/// Punctuation trimmed from word edges. `+`, `#` and `.` stay so terms
/// like "c++", "f#" and ".net" survive intact.
const EDGE_PUNCT: &[char] = &[
    '(', ')', '[', ']', '{', '}', '"', '\'', ',', ';', ':', '!', '?', '<', '>', '`',
];

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        let bullet_regex = Regex::new(r"^\s*(?:[-*•·‣–—]+|\d{1,2}[.)])\s+").expect("Invalid bullet regex");

        Self {
            compound_terms: Self::compound_terms(),
            bullet_regex,
        }
    }

    /// Normalize text into an ordered token sequence.
    ///
    /// Lower-cases, splits on whitespace and punctuation, strips bullet
    /// markers at line starts, and keeps compound technical terms
    /// ("ci/cd", "react.js") as single tokens. Deterministic; empty input
    /// yields an empty sequence.
    pub fn normalize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut line_start = 0;

        for line in text.split_inclusive('\n') {
            let content = line.trim_end_matches(&['\n', '\r'][..]);
            let body_offset = self
                .bullet_regex
                .find(content)
                .map(|m| m.end())
                .unwrap_or(0);

            self.tokenize_line(&content[body_offset..], line_start + body_offset, &mut tokens);
            line_start += line.len();
        }

        tokens
    }

    /// Strip a leading bullet marker ("- ", "* ", "• ", "3. ") if present.
    pub fn strip_bullet<'a>(&self, line: &'a str) -> &'a str {
        match self.bullet_regex.find(line) {
            Some(m) => &line[m.end()..],
            None => line,
        }
    }

    fn tokenize_line(&self, line: &str, base: usize, out: &mut Vec<Token>) {
        for (word_start, word) in split_whitespace_indices(line) {
            self.push_word(word, base + word_start, out);
        }
    }

    fn push_word(&self, word: &str, start: usize, out: &mut Vec<Token>) {
        let (word, trimmed_front) = trim_edges(word);
        if word.is_empty() {
            return;
        }
        let start = start + trimmed_front;

        let lower = word.to_lowercase();
        if self.compound_terms.contains(lower.as_str()) {
            out.push(Token {
                text: lower,
                start,
                end: start + word.len(),
            });
            return;
        }

        // Retry the compound check without trailing sentence punctuation
        // ("uses CI/CD." keeps "ci/cd").
        let stripped = lower.trim_end_matches('.');
        if !stripped.is_empty() && self.compound_terms.contains(stripped) {
            out.push(Token {
                text: stripped.to_string(),
                start,
                end: start + stripped.len(),
            });
            return;
        }

        for (piece_start, piece) in word.unicode_word_indices() {
            out.push(Token {
                text: piece.to_lowercase(),
                start: start + piece_start,
                end: start + piece_start + piece.len(),
            });
        }
    }

    /// Compound terms that plain word segmentation would split apart.
    fn compound_terms() -> HashSet<&'static str> {
        [
            "ci/cd", "tcp/ip", "i/o", "ui/ux", "react.js", "node.js", "vue.js", "next.js",
            "express.js", "nest.js", "d3.js", "three.js", "asp.net", ".net", "c++", "c#", "f#",
            "objective-c", "a/b",
        ]
        .iter()
        .copied()
        .collect()
    }
}

/// Whitespace-separated runs with their byte offsets.
fn split_whitespace_indices(line: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, ch) in line.char_indices() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                words.push((s, &line[s..idx]));
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }
    if let Some(s) = start {
        words.push((s, &line[s..]));
    }

    words
}

/// Trim enclosing punctuation, returning the slice and the number of bytes
/// removed from the front.
fn trim_edges(word: &str) -> (&str, usize) {
    let trimmed_start = word.trim_start_matches(EDGE_PUNCT);
    let front = word.len() - trimmed_start.len();
    (trimmed_start.trim_end_matches(EDGE_PUNCT), front)
}
