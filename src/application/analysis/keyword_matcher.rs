//! Whole-token keyword matching over mixed CJK / Latin text.
//!
//! Boundary rule: a *token character* is `_` or any alphanumeric character
//! outside the CJK ideograph, kana and hangul blocks. An occurrence counts only
//! if neither neighbouring character is a token character. Han text is thus
//! transparent (`加快` matches inside `加快推进`) while Latin runs are whole
//! tokens (`GDP` does not match inside `GDPR`, `利率` does not match inside
//! `SHIBOR利率`).
//!
//! Within one group keywords behave like an ordered alternation: at the
//! leftmost position the first keyword (configuration order) that passes the
//! boundary check wins, and scanning resumes after it.

use crate::application::analysis::sentence_splitter;
use crate::domain::analysis::MatchResult;
use aho_corasick::AhoCorasick;
use std::collections::HashSet;
use tracing::warn;

/// One accepted keyword occurrence (byte offsets into the scanned text).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordHit {
    pub start: usize,
    pub end: usize,
    /// Index into [`KeywordMatcher::keywords`]
    pub keyword: usize,
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3005}'..='\u{3007}'
        | '\u{3040}'..='\u{30FF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{AC00}'..='\u{D7AF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2FFFF}')
}

pub fn is_token_char(c: char) -> bool {
    c == '_' || (c.is_alphanumeric() && !is_cjk(c))
}

fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_token_char) && !after.is_some_and(is_token_char)
}

/// Compiled matcher for one ordered keyword list.
pub struct KeywordMatcher {
    keywords: Vec<String>,
    automaton: AhoCorasick,
}

impl KeywordMatcher {
    /// Builds a matcher; `None` when no non-empty keyword is supplied.
    pub fn new<I, S>(keywords: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return None;
        }

        match AhoCorasick::new(&keywords) {
            Ok(automaton) => Some(Self { keywords, automaton }),
            Err(e) => {
                warn!("Failed to build keyword automaton ({} keywords): {}", keywords.len(), e);
                None
            }
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Non-overlapping occurrences in `text`, left to right.
    pub fn occurrences(&self, text: &str) -> Vec<KeywordHit> {
        let mut candidates: Vec<KeywordHit> = self
            .automaton
            .find_overlapping_iter(text)
            .filter(|m| is_bounded(text, m.start(), m.end()))
            .map(|m| KeywordHit {
                start: m.start(),
                end: m.end(),
                keyword: m.pattern().as_usize(),
            })
            .collect();
        candidates.sort_unstable_by_key(|h| (h.start, h.keyword));

        let mut accepted = Vec::with_capacity(candidates.len());
        let mut cursor = 0;
        for hit in candidates {
            if hit.start >= cursor {
                cursor = hit.end;
                accepted.push(hit);
            }
        }
        accepted
    }

    /// Distinct keywords occurring anywhere in `text`, configuration order.
    ///
    /// Each keyword is tested on its own, so a keyword shadowed by a longer
    /// one in [`occurrences`](Self::occurrences) still counts here.
    pub fn keywords_present(&self, text: &str) -> Vec<&str> {
        let present: HashSet<usize> = self
            .automaton
            .find_overlapping_iter(text)
            .filter(|m| is_bounded(text, m.start(), m.end()))
            .map(|m| m.pattern().as_usize())
            .collect();

        let mut seen = HashSet::new();
        self.keywords
            .iter()
            .enumerate()
            .filter(|(i, _)| present.contains(i))
            .map(|(_, k)| k.as_str())
            .filter(|k| seen.insert(*k))
            .collect()
    }

    /// Matches pre-split `sentences` of `text`.
    ///
    /// `hit_count` sums occurrences over every matching sentence (repeats
    /// included); `kw_count` is measured on the full text.
    pub fn find(&self, text: &str, sentences: &[&str]) -> MatchResult {
        let mut result = MatchResult::default();
        for sentence in sentences {
            let hits = self.occurrences(sentence).len();
            if hits == 0 {
                continue;
            }
            result.hit_count += hits;
            if !result.sentences.iter().any(|s| s == sentence) {
                result.sentences.push(sentence.to_string());
            }
        }
        result.kw_count = self.keywords_present(text).len();
        result
    }
}

/// One-shot match of `keywords` against `text`.
pub fn match_keywords<S: AsRef<str>>(text: &str, keywords: &[S]) -> MatchResult {
    match KeywordMatcher::new(keywords) {
        Some(matcher) => matcher.find(text, &sentence_splitter::split(text)),
        None => MatchResult::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isolated_cjk_keyword_matches() {
        let result = match_keywords("央行下调利率,加快推进光伏产业发展。", &["利率"]);
        assert_eq!(result.hit_count, 1);
        assert_eq!(result.kw_count, 1);
        assert_eq!(result.sentences, vec!["央行下调利率"]);
    }

    #[test]
    fn test_cjk_keyword_embedded_in_latin_token_is_rejected() {
        let result = match_keywords("SHIBOR利率小幅波动。", &["利率"]);
        assert!(result.is_empty());
        assert_eq!(result.kw_count, 0);
    }

    #[test]
    fn test_latin_keyword_requires_whole_token() {
        assert!(match_keywords("GDPR合规要求。", &["GDP"]).is_empty());
        assert_eq!(match_keywords("GDP增速加快。", &["GDP"]).hit_count, 1);
        assert_eq!(match_keywords("今年6G研发。", &["6G"]).hit_count, 1);
        assert!(match_keywords("推进56G试验。", &["6G"]).is_empty());
    }

    #[test]
    fn test_hit_count_counts_repeats_within_sentence() {
        let result = match_keywords("推进改革推进开放,支持创新。", &["推进", "支持"]);
        assert_eq!(result.hit_count, 3);
        assert_eq!(result.sentences, vec!["推进改革推进开放", "支持创新"]);
        assert_eq!(result.kw_count, 2);
    }

    #[test]
    fn test_sentence_matching_two_keywords_listed_once() {
        let result = match_keywords("推进并支持创新。", &["推进", "支持"]);
        assert_eq!(result.sentences.len(), 1);
        assert_eq!(result.hit_count, 2);
    }

    #[test]
    fn test_repeated_sentence_counted_each_time_but_listed_once() {
        let result = match_keywords("加快发展。加快发展。", &["加快"]);
        assert_eq!(result.hit_count, 2);
        assert_eq!(result.sentences, vec!["加快发展"]);
    }

    #[test]
    fn test_earlier_alternative_wins_at_same_position() {
        let matcher = KeywordMatcher::new(["新能源", "新能源汽车"]).unwrap();
        let hits = matcher.occurrences("新能源汽车销量");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].keyword, 0);
        // both still count as present on their own
        assert_eq!(matcher.keywords_present("新能源汽车销量"), vec!["新能源", "新能源汽车"]);
    }

    #[test]
    fn test_rejected_alternative_falls_back_to_later_one() {
        let matcher = KeywordMatcher::new(["AI", "AIGC"]).unwrap();
        let hits = matcher.occurrences("AIGC产业加速");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].keyword, 1);
        assert_eq!((hits[0].start, hits[0].end), (0, 4));

        assert!(matcher.occurrences("AIX").is_empty());
    }

    #[test]
    fn test_keyword_spanning_a_delimiter_counts_on_full_text() {
        let result = match_keywords("版本3.5发布", &["3.5"]);
        assert_eq!(result.hit_count, 0);
        assert!(result.sentences.is_empty());
        assert_eq!(result.kw_count, 1);
    }

    #[test]
    fn test_empty_inputs_yield_empty_result() {
        assert_eq!(match_keywords::<&str>("加快发展。", &[]), MatchResult::default());
        assert_eq!(match_keywords("", &["加快"]), MatchResult::default());
        assert!(KeywordMatcher::new(["", ""]).is_none());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(match_keywords("gdp数据。", &["GDP"]).is_empty());
    }

    #[test]
    fn test_token_char_classification() {
        assert!(is_token_char('a'));
        assert!(is_token_char('7'));
        assert!(is_token_char('_'));
        assert!(!is_token_char('利'));
        assert!(!is_token_char('カ'));
        assert!(!is_token_char(','));
        assert!(!is_token_char('。'));
    }
}
