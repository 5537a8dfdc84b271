//! Skill extraction: exact alias matching plus a fuzzy pass for typos

use crate::config::MatchingConfig;
use crate::error::{CvMatchError, Result};
use crate::processing::lexicon::Lexicon;
use crate::processing::tokenizer::{Token, Tokenizer};
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use strsim::levenshtein;

/// A skill recognized in a piece of text: the canonical term, every byte
/// span it was found at, and a confidence weight (1.0 exact, lower fuzzy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSkill {
    pub id: String,
    pub label: String,
    pub spans: Vec<(usize, usize)>,
    pub confidence: f32,
}

/// Matches lexicon aliases against a normalized token stream.
///
/// Exact pass: an Aho-Corasick automaton over all aliases, leftmost-longest
/// so that "react native" wins over the contained "react". Fuzzy pass:
/// Levenshtein distance on single tokens against single-word aliases, to
/// tolerate typos and pluralization.
pub struct SkillExtractor {
    automaton: AhoCorasick,
    pattern_terms: Vec<usize>,
    terms: Vec<(String, String)>,
    fuzzy_aliases: Vec<(String, usize)>,
    fuzzy_stop_words: HashSet<&'static str>,
    fuzzy_max_edits: usize,
    fuzzy_confidence: f32,
    fuzzy_min_token_len: usize,
}

struct Occurrence {
    term: usize,
    span: (usize, usize),
    exact: bool,
}

impl SkillExtractor {
    pub fn new(lexicon: &Lexicon, tokenizer: &Tokenizer, config: &MatchingConfig) -> Result<Self> {
        let mut patterns: Vec<String> = Vec::new();
        let mut pattern_terms: Vec<usize> = Vec::new();
        let mut fuzzy_aliases: Vec<(String, usize)> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (term_idx, term) in lexicon.terms().iter().enumerate() {
            for alias in &term.aliases {
                let normalized = normalize_alias(tokenizer, alias);
                if normalized.is_empty() {
                    return Err(CvMatchError::LexiconLoad(format!(
                        "alias '{}' of skill '{}' normalizes to nothing",
                        alias, term.id
                    )));
                }

                match seen.get(&normalized).copied() {
                    Some(existing) if existing != term_idx => {
                        return Err(CvMatchError::LexiconLoad(format!(
                            "alias '{}' is claimed by both '{}' and '{}'",
                            normalized,
                            lexicon.terms()[existing].id,
                            term.id
                        )));
                    }
                    Some(_) => continue,
                    None => {
                        seen.insert(normalized.clone(), term_idx);
                    }
                }

                if !normalized.contains(' ') && normalized.len() >= config.fuzzy_min_token_len {
                    fuzzy_aliases.push((normalized.clone(), term_idx));
                }
                patterns.push(normalized);
                pattern_terms.push(term_idx);
            }
        }

        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| CvMatchError::LexiconLoad(format!("failed to build alias automaton: {}", e)))?;

        let terms = lexicon
            .terms()
            .iter()
            .map(|t| (t.id.clone(), t.label.clone()))
            .collect();

        Ok(Self {
            automaton,
            pattern_terms,
            terms,
            fuzzy_aliases,
            fuzzy_stop_words: fuzzy_stop_words(),
            fuzzy_max_edits: config.fuzzy_max_edit_distance,
            fuzzy_confidence: config.fuzzy_confidence,
            fuzzy_min_token_len: config.fuzzy_min_token_len,
        })
    }

    /// Extract skills from a normalized token sequence. Returns skills in
    /// first-occurrence order; an empty result is a valid, common outcome.
    pub fn extract(&self, tokens: &[Token]) -> Vec<ExtractedSkill> {
        if tokens.is_empty() {
            return Vec::new();
        }

        let (haystack, starts, ends) = join_tokens(tokens);
        let mut occurrences = Vec::new();
        let mut covered = vec![false; tokens.len()];

        for mat in self.automaton.find_iter(haystack.as_str()) {
            // Only accept matches aligned on token boundaries, so "java"
            // never fires inside "javascript".
            let Ok(first) = starts.binary_search(&mat.start()) else {
                continue;
            };
            let Ok(last) = ends.binary_search(&mat.end()) else {
                continue;
            };

            for slot in covered.iter_mut().take(last + 1).skip(first) {
                *slot = true;
            }
            occurrences.push(Occurrence {
                term: self.pattern_terms[mat.pattern().as_usize()],
                span: (tokens[first].start, tokens[last].end),
                exact: true,
            });
        }

        self.fuzzy_pass(tokens, &covered, &mut occurrences);

        self.collect(occurrences)
    }

    fn fuzzy_pass(&self, tokens: &[Token], covered: &[bool], occurrences: &mut Vec<Occurrence>) {
        for (idx, token) in tokens.iter().enumerate() {
            if covered[idx]
                || token.text.len() < self.fuzzy_min_token_len
                || self.fuzzy_stop_words.contains(token.text.as_str())
            {
                continue;
            }

            let mut best: Option<(usize, usize)> = None;
            for (alias, term) in &self.fuzzy_aliases {
                if *alias == token.text {
                    continue;
                }
                let distance = levenshtein(alias, &token.text);
                if distance <= self.fuzzy_max_edits {
                    best = match best {
                        Some((d, _)) if d <= distance => best,
                        _ => Some((distance, *term)),
                    };
                }
            }

            if let Some((_, term)) = best {
                occurrences.push(Occurrence {
                    term,
                    span: (token.start, token.end),
                    exact: false,
                });
            }
        }
    }

    /// Fold occurrences into one entry per skill, ordered by first
    /// appearance in the text.
    fn collect(&self, mut occurrences: Vec<Occurrence>) -> Vec<ExtractedSkill> {
        occurrences.sort_by_key(|o| (o.span.0, o.span.1));

        let mut out: Vec<ExtractedSkill> = Vec::new();
        let mut index: HashMap<usize, usize> = HashMap::new();

        for occ in occurrences {
            let confidence = if occ.exact { 1.0 } else { self.fuzzy_confidence };
            match index.get(&occ.term) {
                Some(&i) => {
                    out[i].spans.push(occ.span);
                    if confidence > out[i].confidence {
                        out[i].confidence = confidence;
                    }
                }
                None => {
                    let (id, label) = &self.terms[occ.term];
                    index.insert(occ.term, out.len());
                    out.push(ExtractedSkill {
                        id: id.clone(),
                        label: label.clone(),
                        spans: vec![occ.span],
                        confidence,
                    });
                }
            }
        }

        out
    }
}

/// Normalize an alias through the same tokenizer the haystack goes through.
fn normalize_alias(tokenizer: &Tokenizer, alias: &str) -> String {
    tokenizer
        .normalize(alias)
        .into_iter()
        .map(|t| t.text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join token texts with single spaces, keeping the normalized offset of
/// every token start and end for boundary checks.
fn join_tokens(tokens: &[Token]) -> (String, Vec<usize>, Vec<usize>) {
    let mut haystack = String::new();
    let mut starts = Vec::with_capacity(tokens.len());
    let mut ends = Vec::with_capacity(tokens.len());

    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            haystack.push(' ');
        }
        starts.push(haystack.len());
        haystack.push_str(&token.text);
        ends.push(haystack.len());
    }

    (haystack, starts, ends)
}

/// Common words never considered by the fuzzy pass. One edit of distance
/// turns "must" into "rust" and "unit" into "junit"; these are far more
/// often ordinary prose than typos.
fn fuzzy_stop_words() -> HashSet<&'static str> {
    [
        "best", "case", "code", "core", "data", "each", "from", "have", "into", "just", "like",
        "line", "lines", "made", "make", "many", "mode", "more", "most", "must", "over", "pass",
        "rest", "same", "site", "sites", "some", "such", "team", "teams", "test", "tests", "that",
        "them", "then", "they", "this", "time", "unit", "units", "very", "want", "were", "what",
        "when", "will", "with", "work", "year", "years", "your", "scale", "scales", "than",
        "used", "uses", "user", "users", "well", "role", "part", "kind",
    ]
    .iter()
    .copied()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn extractor() -> (Tokenizer, SkillExtractor) {
        let config = Config::default();
        let lexicon = Lexicon::embedded().unwrap();
        let tokenizer = Tokenizer::new();
        let extractor = SkillExtractor::new(&lexicon, &tokenizer, &config.matching).unwrap();
        (tokenizer, extractor)
    }

    fn ids(skills: &[ExtractedSkill]) -> Vec<&str> {
        skills.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_exact_extraction() {
        let (tokenizer, extractor) = extractor();
        let tokens = tokenizer.normalize("Experience with Python, JavaScript and React development.");
        let skills = extractor.extract(&tokens);

        let found = ids(&skills);
        assert!(found.contains(&"python"));
        assert!(found.contains(&"javascript"));
        assert!(found.contains(&"react"));
        assert!(skills.iter().all(|s| s.confidence == 1.0));
    }

    #[test]
    fn test_longest_match_wins() {
        let (tokenizer, extractor) = extractor();
        let tokens = tokenizer.normalize("Shipped two React Native apps to production.");
        let skills = extractor.extract(&tokens);

        let found = ids(&skills);
        assert!(found.contains(&"react-native"));
        assert!(!found.contains(&"react"));
    }

    #[test]
    fn test_no_match_inside_longer_token() {
        let (tokenizer, extractor) = extractor();
        let tokens = tokenizer.normalize("Wrote a javascriptish prototype once.");
        let skills = extractor.extract(&tokens);

        assert!(!ids(&skills).contains(&"javascript"));
    }

    #[test]
    fn test_compound_alias() {
        let (tokenizer, extractor) = extractor();
        let tokens = tokenizer.normalize("Knowledge of CI/CD pipelines and version control.");
        let skills = extractor.extract(&tokens);

        let found = ids(&skills);
        assert!(found.contains(&"ci-cd"));
        assert!(found.contains(&"version-control"));
    }

    #[test]
    fn test_fuzzy_typo_match() {
        let (tokenizer, extractor) = extractor();
        let tokens = tokenizer.normalize("Solid grounding in Pythn scripting.");
        let skills = extractor.extract(&tokens);

        let python = skills.iter().find(|s| s.id == "python").unwrap();
        assert_eq!(python.confidence, 0.6);
    }

    #[test]
    fn test_exact_beats_fuzzy_confidence() {
        let (tokenizer, extractor) = extractor();
        let tokens = tokenizer.normalize("Python everywhere, even when spelled Pythn.");
        let skills = extractor.extract(&tokens);

        let python = skills.iter().find(|s| s.id == "python").unwrap();
        assert_eq!(python.confidence, 1.0);
        assert_eq!(python.spans.len(), 2);
    }

    #[test]
    fn test_stop_words_never_fuzzy_match() {
        let (tokenizer, extractor) = extractor();
        let tokens = tokenizer.normalize("You must work with the rest of the unit this year.");
        let skills = extractor.extract(&tokens);

        assert!(skills.is_empty());
    }

    #[test]
    fn test_first_occurrence_order() {
        let (tokenizer, extractor) = extractor();
        let tokens = tokenizer.normalize("Docker first, then Kubernetes, then Docker again.");
        let skills = extractor.extract(&tokens);

        assert_eq!(ids(&skills), vec!["docker", "kubernetes"]);
        assert_eq!(skills[0].spans.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let (tokenizer, extractor) = extractor();
        let tokens = tokenizer.normalize("");
        assert!(extractor.extract(&tokens).is_empty());
    }

    #[test]
    fn test_spans_point_at_source() {
        let (tokenizer, extractor) = extractor();
        let text = "Deep TypeScript experience";
        let tokens = tokenizer.normalize(text);
        let skills = extractor.extract(&tokens);

        let ts = skills.iter().find(|s| s.id == "typescript").unwrap();
        let (start, end) = ts.spans[0];
        assert_eq!(&text[start..end], "TypeScript");
    }
}
