use crate::domain::keywords::GroupRole;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of matching one keyword group against a text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Distinct matching sentences, first-seen order
    pub sentences: Vec<String>,
    /// Keyword occurrences across matching sentences
    pub hit_count: usize,
    /// Distinct keywords present anywhere in the full text
    pub kw_count: usize,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.hit_count == 0
    }
}

/// Per-group analysis, present only when the group had at least one hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCategoryAnalysis {
    pub name: String,
    pub related_sentences: Vec<String>,
    pub hit_count: usize,
    pub kw_count: usize,
    pub color: String,
    /// Normalized strength, one decimal place.
    pub strength: Decimal,
    /// Distinct sectors, in the order their keywords were found.
    pub related_sectors: Vec<String>,
    pub keywords_found: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<GroupRole>,
}

/// Groups with hits for one taxonomy, in configuration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyAnalysis {
    pub name: String,
    pub groups: Vec<SubCategoryAnalysis>,
}

impl TaxonomyAnalysis {
    pub fn group(&self, name: &str) -> Option<&SubCategoryAnalysis> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Aggregated view of one market sector across all groups that referenced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorSummary {
    pub sector: String,
    pub total_strength: Decimal,
    pub mention_count: usize,
    pub avg_strength: Decimal,
    /// First five contributing keywords, insertion order
    pub keywords: Vec<String>,
}

/// Root result of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub taxonomies: Vec<TaxonomyAnalysis>,
    /// Sorted by `avg_strength` descending, ties in first-seen order.
    pub sector_summary: Vec<SectorSummary>,
}

impl AnalysisResult {
    pub fn taxonomy(&self, name: &str) -> Option<&TaxonomyAnalysis> {
        self.taxonomies.iter().find(|t| t.name == name)
    }

    pub fn group(&self, taxonomy: &str, group: &str) -> Option<&SubCategoryAnalysis> {
        self.taxonomy(taxonomy).and_then(|t| t.group(group))
    }

    pub fn top_sector(&self) -> Option<&SectorSummary> {
        self.sector_summary.first()
    }

    pub fn sector(&self, name: &str) -> Option<&SectorSummary> {
        self.sector_summary.iter().find(|s| s.sector == name)
    }

    /// True when no group in any taxonomy produced a hit.
    pub fn is_empty(&self) -> bool {
        self.taxonomies.iter().all(TaxonomyAnalysis::is_empty) && self.sector_summary.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.taxonomies.iter().map(|t| t.groups.len()).sum()
    }

    /// Groups carrying `role`, in configuration order.
    pub fn groups_with_role(&self, role: GroupRole) -> impl Iterator<Item = &SubCategoryAnalysis> {
        self.taxonomies
            .iter()
            .flat_map(|t| t.groups.iter())
            .filter(move |g| g.role == Some(role))
    }
}
