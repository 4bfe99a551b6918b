//! Keyword highlighting for HTML output.

use crate::application::analysis::keyword_matcher::KeywordMatcher;
use crate::domain::analysis::AnalysisResult;
use crate::domain::keywords::KeywordGroup;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Colored keyword spans over escaped text.
///
/// Rules are applied in insertion order; a later rule never claims text
/// already highlighted by an earlier one, so spans never nest.
#[derive(Default)]
pub struct Highlighter {
    rules: Vec<(KeywordMatcher, String)>,
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_groups<'a>(groups: impl IntoIterator<Item = &'a KeywordGroup>) -> Self {
        let mut highlighter = Self::new();
        for group in groups {
            highlighter.add_rule(group.phrases(), &group.color);
        }
        highlighter
    }

    /// Rules from the keywords each group actually matched.
    pub fn from_analysis(analysis: &AnalysisResult) -> Self {
        let mut highlighter = Self::new();
        for group in analysis.taxonomies.iter().flat_map(|t| t.groups.iter()) {
            highlighter.add_rule(&group.keywords_found, &group.color);
        }
        highlighter
    }

    pub fn add_rule<I, S>(&mut self, keywords: I, color: &str)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(matcher) = KeywordMatcher::new(keywords) {
            self.rules.push((matcher, color.to_string()));
        }
    }

    pub fn highlight(&self, text: &str) -> String {
        // (start, end, rule)
        let mut spans: Vec<(usize, usize, usize)> = Vec::new();
        for (rule, (matcher, _)) in self.rules.iter().enumerate() {
            for hit in matcher.occurrences(text) {
                let overlaps = spans
                    .iter()
                    .any(|&(start, end, _)| hit.start < end && start < hit.end);
                if !overlaps {
                    spans.push((hit.start, hit.end, rule));
                }
            }
        }
        spans.sort_unstable_by_key(|&(start, _, _)| start);

        let mut out = String::with_capacity(text.len() * 2);
        let mut cursor = 0;
        for (start, end, rule) in spans {
            let color = encode_double_quoted_attribute(&self.rules[rule].1);
            out.push_str(&encode_text(&text[cursor..start]));
            out.push_str(&format!(
                "<span class=\"highlighted\" style=\"background-color:{color}20;color:{color}\">{}</span>",
                encode_text(&text[start..end])
            ));
            cursor = end;
        }
        out.push_str(&encode_text(&text[cursor..]));
        out
    }
}

/// One-shot highlight of `text` with the keywords of `groups`.
pub fn highlight(text: &str, groups: &[KeywordGroup]) -> String {
    Highlighter::from_groups(groups).highlight(text)
}
