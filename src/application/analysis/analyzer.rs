//! Analysis orchestrator
//!
//! Runs every keyword group of every taxonomy against one text, scores the
//! groups that hit, maps their keywords onto sectors and ranks the sectors.

use crate::application::analysis::keyword_matcher::KeywordMatcher;
use crate::application::analysis::scoring::group_strength;
use crate::application::analysis::sector_aggregator::SectorAccumulator;
use crate::application::analysis::sentence_splitter;
use crate::domain::analysis::{AnalysisResult, SubCategoryAnalysis, TaxonomyAnalysis};
use crate::domain::keywords::{KeywordConfig, KeywordScoreTable, KeywordUniverse, SectorMap};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

/// Matchers compiled per group, parallel to `universe.taxonomies[i].groups[j]`.
/// `None` marks a group with no keywords.
type CompiledGroups = Vec<Vec<Option<KeywordMatcher>>>;

fn compile(universe: &KeywordUniverse) -> CompiledGroups {
    universe
        .taxonomies
        .iter()
        .map(|t| t.groups.iter().map(|g| KeywordMatcher::new(g.phrases())).collect())
        .collect()
}

fn run(
    text: &str,
    universe: &KeywordUniverse,
    scores: &KeywordScoreTable,
    sectors: &SectorMap,
    compiled: &CompiledGroups,
) -> AnalysisResult {
    let sentences = sentence_splitter::split(text);
    let mut accumulator = SectorAccumulator::new();
    let mut taxonomies = Vec::with_capacity(universe.taxonomies.len());

    for (taxonomy, matchers) in universe.taxonomies.iter().zip(compiled) {
        let mut groups = Vec::new();

        for (group, matcher) in taxonomy.groups.iter().zip(matchers) {
            let Some(matcher) = matcher else {
                debug!("{}-{}: no keywords configured, skipped", taxonomy.name, group.name);
                continue;
            };

            let matched = matcher.find(text, &sentences);
            if matched.hit_count == 0 {
                continue;
            }

            let found = matcher.keywords_present(text);
            let strength = group_strength(group, &found, scores);

            // distinct sectors in discovery order, each with the keywords that led to it
            let mut related_sectors: Vec<String> = Vec::new();
            let mut sector_keywords: Vec<Vec<&str>> = Vec::new();
            for &keyword in &found {
                let sector = sectors.sector_for(keyword, &taxonomy.name);
                match related_sectors.iter().position(|s| *s == sector) {
                    Some(i) => sector_keywords[i].push(keyword),
                    None => {
                        related_sectors.push(sector);
                        sector_keywords.push(vec![keyword]);
                    }
                }
            }
            for (sector, keywords) in related_sectors.iter().zip(&sector_keywords) {
                accumulator.accumulate(sector, strength, keywords);
            }

            debug!(
                "{}-{}: strength {}, hits {}, sectors {:?}",
                taxonomy.name, group.name, strength, matched.hit_count, related_sectors
            );

            groups.push(SubCategoryAnalysis {
                name: group.name.clone(),
                related_sentences: matched.sentences,
                hit_count: matched.hit_count,
                kw_count: matched.kw_count,
                color: group.color.clone(),
                strength,
                related_sectors,
                keywords_found: found.iter().map(|k| k.to_string()).collect(),
                role: group.role,
            });
        }

        taxonomies.push(TaxonomyAnalysis {
            name: taxonomy.name.clone(),
            groups,
        });
    }

    AnalysisResult {
        taxonomies,
        sector_summary: accumulator.summarize(),
    }
}

/// Analyzes `text` against the given tables.
///
/// Never fails: text without any keyword yields an empty result.
pub fn analyze(
    text: &str,
    universe: &KeywordUniverse,
    scores: &KeywordScoreTable,
    sectors: &SectorMap,
) -> AnalysisResult {
    run(text, universe, scores, sectors, &compile(universe))
}

/// Reusable analyzer with keyword matchers compiled once.
///
/// Cheap to share across threads; every call owns its own accumulation state.
pub struct SectorAnalyzer {
    config: Arc<KeywordConfig>,
    compiled: CompiledGroups,
}

impl SectorAnalyzer {
    pub fn new(config: Arc<KeywordConfig>) -> Self {
        let compiled = compile(&config.universe);
        Self { config, compiled }
    }

    pub fn config(&self) -> &KeywordConfig {
        &self.config
    }

    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let result = run(
            text,
            &self.config.universe,
            &self.config.scores,
            &self.config.sectors,
            &self.compiled,
        );
        info!(
            "Analysis complete: {} groups hit, {} sectors ranked",
            result.group_count(),
            result.sector_summary.len()
        );
        result
    }

    /// Analyzes independent texts in parallel, preserving input order.
    pub fn analyze_batch<'a>(&self, inputs: &'a [(String, String)]) -> Vec<(&'a str, AnalysisResult)> {
        inputs
            .par_iter()
            .map(|(label, text)| (label.as_str(), self.analyze(text)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keywords::{KeywordGroup, KeywordTaxonomy};
    use rust_decimal_macros::dec;

    fn scenario_config() -> KeywordConfig {
        let universe = KeywordUniverse::new(vec![
            KeywordTaxonomy::new(
                "政策导向",
                vec![KeywordGroup::new("强力度", &["加快"], "#E53E3E", 9)],
            ),
            KeywordTaxonomy::new(
                "行业赛道",
                vec![KeywordGroup::new("新能源", &["光伏"], "#38A169", 7)],
            ),
        ]);
        let scores: KeywordScoreTable = [("加快", 8), ("光伏", 7)].into_iter().collect();
        let sectors: SectorMap = [("加快", "全市场普益"), ("光伏", "光伏板块")].into_iter().collect();
        KeywordConfig::new(universe, scores, sectors)
    }

    #[test]
    fn test_policy_and_industry_scenario() {
        let config = scenario_config();
        let result = analyze(
            "央行下调利率,加快推进光伏产业发展。",
            &config.universe,
            &config.scores,
            &config.sectors,
        );

        let policy = result.group("政策导向", "强力度").expect("policy group present");
        assert_eq!(policy.strength, dec!(8.5));
        assert_eq!(policy.related_sectors, vec!["全市场普益"]);
        assert_eq!(policy.keywords_found, vec!["加快"]);
        assert_eq!(policy.related_sentences, vec!["加快推进光伏产业发展"]);

        let industry = result.group("行业赛道", "新能源").expect("industry group present");
        assert_eq!(industry.strength, dec!(7.0));

        let ranking: Vec<_> = result
            .sector_summary
            .iter()
            .map(|s| (s.sector.as_str(), s.avg_strength))
            .collect();
        assert_eq!(ranking, vec![("全市场普益", dec!(8.5)), ("光伏板块", dec!(7.0))]);
    }

    #[test]
    fn test_group_without_keywords_is_skipped() {
        let mut config = scenario_config();
        config.universe.taxonomies[0]
            .groups
            .push(KeywordGroup::new("空组", &[], "#000000", 5));

        let analyzer = SectorAnalyzer::new(Arc::new(config));
        let result = analyzer.analyze("加快推进。");
        assert!(result.group("政策导向", "空组").is_none());
        assert!(result.group("政策导向", "强力度").is_some());
    }

    #[test]
    fn test_one_group_can_feed_several_sectors() {
        let universe = KeywordUniverse::new(vec![KeywordTaxonomy::new(
            "行业赛道",
            vec![KeywordGroup::new("新能源", &["光伏", "储能", "风电"], "#38A169", 7)],
        )]);
        let scores: KeywordScoreTable = [("光伏", 7), ("储能", 7)].into_iter().collect();
        let sectors: SectorMap = [("光伏", "光伏板块"), ("储能", "储能板块")].into_iter().collect();

        let result = analyze("光伏和储能齐发力,风电稳步推进。", &universe, &scores, &sectors);
        let group = result.group("行业赛道", "新能源").unwrap();
        // (7 + 7 + 7 + 0) / 4
        assert_eq!(group.strength, dec!(5.3));
        assert_eq!(
            group.related_sectors,
            vec!["光伏板块", "储能板块", "关联行业赛道板块"]
        );
        assert_eq!(result.sector_summary.len(), 3);
        assert!(result.sector_summary.iter().all(|s| s.mention_count == 1));
    }

    #[test]
    fn test_batch_preserves_input_order() {
        let analyzer = SectorAnalyzer::new(Arc::new(scenario_config()));
        let inputs = vec![
            ("2025-08-13".to_string(), "光伏装机创新高。".to_string()),
            ("2025-08-14".to_string(), "没有相关内容。".to_string()),
            ("2025-08-15".to_string(), "加快建设。".to_string()),
        ];

        let results = analyzer.analyze_batch(&inputs);
        let labels: Vec<_> = results.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["2025-08-13", "2025-08-14", "2025-08-15"]);
        assert_eq!(results[0].1.top_sector().unwrap().sector, "光伏板块");
        assert!(results[1].1.is_empty());
        assert_eq!(results[2].1.top_sector().unwrap().sector, "全市场普益");
    }
}
