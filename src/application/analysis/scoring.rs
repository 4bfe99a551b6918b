use crate::application::analysis::keyword_matcher::KeywordMatcher;
use crate::domain::keywords::{KeywordGroup, KeywordScoreTable};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to one decimal place, half away from zero.
pub fn round_strength(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Normalized group strength given the keywords already found in the text.
///
/// `(base + Σ weight(found)) / (1 + keywords in group)`, so broad groups are
/// not inflated purely by their size. A phrase listed twice is weighted twice.
pub fn group_strength(group: &KeywordGroup, found: &[&str], scores: &KeywordScoreTable) -> Decimal {
    let keyword_strength: i64 = group
        .phrases()
        .filter(|phrase| found.contains(phrase))
        .map(|phrase| i64::from(scores.weight(phrase)))
        .sum();
    let numerator = Decimal::from(i64::from(group.strength) + keyword_strength);
    let denominator = Decimal::from(1 + group.phrases().count());
    round_strength(numerator / denominator)
}

/// Scores `group` against raw `text`.
pub fn score(group: &KeywordGroup, text: &str, scores: &KeywordScoreTable) -> Decimal {
    let matcher = KeywordMatcher::new(group.phrases());
    let found = matcher
        .as_ref()
        .map(|m| m.keywords_present(text))
        .unwrap_or_default();
    group_strength(group, &found, scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_two_weighted_keywords_normalized_by_group_size() {
        let group = KeywordGroup::new("强力度", &["加快", "大力支持"], "#E53E3E", 9);
        let scores: KeywordScoreTable = [("加快", 8), ("大力支持", 8)].into_iter().collect();

        let strength = score(&group, "加快建设,大力支持创新。", &scores);
        assert_eq!(strength, dec!(8.3));
    }

    #[test]
    fn test_absent_keywords_do_not_contribute() {
        let group = KeywordGroup::new("强力度", &["加快", "试点"], "#E53E3E", 9);
        let scores: KeywordScoreTable = [("加快", 8), ("试点", 7)].into_iter().collect();

        // (9 + 8) / 3
        assert_eq!(score(&group, "加快发展。", &scores), dec!(5.7));
    }

    #[test]
    fn test_duplicated_keyword_weighted_per_entry() {
        let group = KeywordGroup::new("强力度", &["加快", "加快"], "#E53E3E", 9);
        let scores: KeywordScoreTable = [("加快", 8)].into_iter().collect();

        // (9 + 8 + 8) / 3
        assert_eq!(score(&group, "加快推进改革。", &scores), dec!(8.3));
        // absent duplicates still widen the denominator only
        assert_eq!(score(&group, "稳步推进改革。", &scores), dec!(3.0));
    }

    #[test]
    fn test_unweighted_keyword_counts_zero() {
        let group = KeywordGroup::new("新能源", &["储能"], "#38A169", 7);
        let scores = KeywordScoreTable::new();
        assert_eq!(score(&group, "储能项目落地。", &scores), dec!(3.5));
    }

    #[test]
    fn test_bearish_group_scores_negative() {
        let group = KeywordGroup::new("风险提示", &["监管", "整治"], "#805AD5", -7);
        let scores: KeywordScoreTable = [("监管", -6), ("整治", -7)].into_iter().collect();
        // (-7 - 6 - 7) / 3 = -6.666..
        assert_eq!(score(&group, "加强监管,开展整治。", &scores), dec!(-6.7));
    }

    #[test]
    fn test_midpoints_round_away_from_zero() {
        assert_eq!(round_strength(dec!(0.25)), dec!(0.3));
        assert_eq!(round_strength(dec!(-0.25)), dec!(-0.3));
        assert_eq!(round_strength(dec!(8.35)), dec!(8.4));
        assert_eq!(round_strength(dec!(23) / dec!(20)), dec!(1.2));
    }

    #[test]
    fn test_quarter_value_from_formula() {
        // base 1 over 1 + 3 keywords, none weighted
        let group = KeywordGroup::new("核心指标", &["GDP", "PMI", "CPI"], "#1E90FF", 1);
        assert_eq!(score(&group, "GDP稳步增长。", &KeywordScoreTable::new()), dec!(0.3));
    }
}
