use crate::application::analysis::scoring::round_strength;
use crate::domain::analysis::SectorSummary;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Keywords shown per sector in the summary.
pub const DISPLAY_KEYWORD_LIMIT: usize = 5;

#[derive(Debug)]
struct SectorTally {
    sector: String,
    total: Decimal,
    count: usize,
    keywords: Vec<String>,
}

/// Per-call running totals, keyed by sector in first-seen order.
///
/// Owned by a single analysis run; never shared between runs.
#[derive(Debug, Default)]
pub struct SectorAccumulator {
    tallies: Vec<SectorTally>,
    index: HashMap<String, usize>,
}

impl SectorAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one mention of `sector` with `strength`, merging `keywords`.
    pub fn accumulate<I, S>(&mut self, sector: &str, strength: Decimal, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let slot = match self.index.get(sector) {
            Some(&i) => i,
            None => {
                self.tallies.push(SectorTally {
                    sector: sector.to_string(),
                    total: Decimal::ZERO,
                    count: 0,
                    keywords: Vec::new(),
                });
                self.index.insert(sector.to_string(), self.tallies.len() - 1);
                self.tallies.len() - 1
            }
        };

        let tally = &mut self.tallies[slot];
        tally.total += strength;
        tally.count += 1;
        for keyword in keywords {
            let keyword = keyword.as_ref();
            if !tally.keywords.iter().any(|k| k == keyword) {
                tally.keywords.push(keyword.to_string());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Averages and ranks sectors, highest average first.
    ///
    /// The sort is stable: equal averages keep first-accumulated order.
    pub fn summarize(self) -> Vec<SectorSummary> {
        let mut summary: Vec<SectorSummary> = self
            .tallies
            .into_iter()
            .filter(|t| t.count > 0)
            .map(|t| SectorSummary {
                avg_strength: round_strength(t.total / Decimal::from(t.count)),
                total_strength: t.total,
                mention_count: t.count,
                keywords: t.keywords.into_iter().take(DISPLAY_KEYWORD_LIMIT).collect(),
                sector: t.sector,
            })
            .collect();
        summary.sort_by(|a, b| b.avg_strength.cmp(&a.avg_strength));
        summary
    }
}
