//! Keyword taxonomy types.
//!
//! A [`KeywordUniverse`] is an ordered list of taxonomies (policy, industry, ...),
//! each holding ordered [`KeywordGroup`]s. Order is significant only for
//! iteration: it decides which sector is seen first when averages tie.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Marks a group for special treatment in the report summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupRole {
    /// Strong supportive policy language
    Highlight,
    /// Regulatory or tightening language (bearish)
    Risk,
}

/// A named sub-category of keyword phrases with a base strength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub name: String,
    /// Phrases in match priority order. A missing list is treated as empty.
    #[serde(default)]
    pub words: Vec<String>,
    /// Display color token, passed through to the report untouched.
    #[serde(default = "default_color")]
    pub color: String,
    /// Base strength, -10..=10 by convention (negative = bearish).
    #[serde(default)]
    pub strength: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<GroupRole>,
}

fn default_color() -> String {
    "#000000".to_string()
}

impl KeywordGroup {
    pub fn new(name: &str, words: &[&str], color: &str, strength: i32) -> Self {
        Self {
            name: name.to_string(),
            words: words.iter().map(|w| w.to_string()).collect(),
            color: color.to_string(),
            strength,
            role: None,
        }
    }

    pub fn with_role(mut self, role: GroupRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Keywords usable for matching (blank entries dropped).
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str).filter(|w| !w.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.phrases().next().is_none()
    }
}

/// A top-level classification axis holding ordered groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordTaxonomy {
    pub name: String,
    #[serde(default, rename = "group")]
    pub groups: Vec<KeywordGroup>,
}

impl KeywordTaxonomy {
    pub fn new(name: &str, groups: Vec<KeywordGroup>) -> Self {
        Self {
            name: name.to_string(),
            groups,
        }
    }

    pub fn group(&self, name: &str) -> Option<&KeywordGroup> {
        self.groups.iter().find(|g| g.name == name)
    }
}

/// All taxonomies, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordUniverse {
    pub taxonomies: Vec<KeywordTaxonomy>,
}

impl KeywordUniverse {
    pub fn new(taxonomies: Vec<KeywordTaxonomy>) -> Self {
        Self { taxonomies }
    }

    pub fn taxonomy(&self, name: &str) -> Option<&KeywordTaxonomy> {
        self.taxonomies.iter().find(|t| t.name == name)
    }

    /// Iterates `(taxonomy, group)` pairs in configuration order.
    pub fn groups(&self) -> impl Iterator<Item = (&KeywordTaxonomy, &KeywordGroup)> {
        self.taxonomies
            .iter()
            .flat_map(|t| t.groups.iter().map(move |g| (t, g)))
    }

    pub fn keyword_count(&self) -> usize {
        self.groups().map(|(_, g)| g.phrases().count()).sum()
    }
}

/// Per-keyword signed weights. Absent keywords weigh 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordScoreTable(HashMap<String, i32>);

impl KeywordScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weight(&self, keyword: &str) -> i32 {
        self.0.get(keyword).copied().unwrap_or(0)
    }

    pub fn insert(&mut self, keyword: &str, weight: i32) {
        self.0.insert(keyword.to_string(), weight);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, i32)> for KeywordScoreTable {
    fn from_iter<I: IntoIterator<Item = (K, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Keyword → market sector lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectorMap(HashMap<String, String>);

impl SectorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sector for `keyword`, falling back to `关联{taxonomy}板块`.
    pub fn sector_for(&self, keyword: &str, taxonomy: &str) -> String {
        match self.0.get(keyword) {
            Some(sector) => sector.clone(),
            None => format!("关联{}板块", taxonomy),
        }
    }

    pub fn insert(&mut self, keyword: &str, sector: &str) {
        self.0.insert(keyword.to_string(), sector.to_string());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SectorMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// The three immutable tables one analysis run reads.
///
/// Loaded once at start-up and shared read-only between concurrent runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordConfig {
    #[serde(default, rename = "taxonomy")]
    pub universe: KeywordUniverse,
    #[serde(default)]
    pub scores: KeywordScoreTable,
    #[serde(default)]
    pub sectors: SectorMap,
}

impl KeywordConfig {
    pub fn new(universe: KeywordUniverse, scores: KeywordScoreTable, sectors: SectorMap) -> Self {
        Self {
            universe,
            scores,
            sectors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_fallback_uses_taxonomy_name() {
        let map: SectorMap = [("光伏", "光伏板块")].into_iter().collect();
        assert_eq!(map.sector_for("光伏", "行业赛道"), "光伏板块");
        assert_eq!(map.sector_for("储能", "行业赛道"), "关联行业赛道板块");
    }

    #[test]
    fn test_score_table_defaults_to_zero() {
        let scores: KeywordScoreTable = [("加快", 8), ("监管", -6)].into_iter().collect();
        assert_eq!(scores.weight("加快"), 8);
        assert_eq!(scores.weight("监管"), -6);
        assert_eq!(scores.weight("未知"), 0);
    }

    #[test]
    fn test_group_phrases_skip_blank_entries() {
        let group = KeywordGroup::new("强力度", &["加快", "", "试点"], "#E53E3E", 9);
        assert_eq!(group.phrases().collect::<Vec<_>>(), vec!["加快", "试点"]);
        assert!(!group.is_empty());
        assert!(KeywordGroup::new("空", &[""], "#000", 1).is_empty());
    }

    #[test]
    fn test_universe_iterates_in_configuration_order() {
        let universe = KeywordUniverse::new(vec![
            KeywordTaxonomy::new(
                "政策导向",
                vec![
                    KeywordGroup::new("强力度", &["加快"], "#E53E3E", 9),
                    KeywordGroup::new("中力度", &["推进", "支持"], "#ED8936", 6),
                ],
            ),
            KeywordTaxonomy::new("行业赛道", vec![KeywordGroup::new("新能源", &["光伏"], "#38A169", 7)]),
        ]);

        let names: Vec<_> = universe.groups().map(|(t, g)| (t.name.as_str(), g.name.as_str())).collect();
        assert_eq!(
            names,
            vec![("政策导向", "强力度"), ("政策导向", "中力度"), ("行业赛道", "新能源")]
        );
        assert_eq!(universe.keyword_count(), 4);
        assert!(universe.taxonomy("行业赛道").and_then(|t| t.group("新能源")).is_some());
    }
}
