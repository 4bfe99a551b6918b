//! Keyword-driven sector scoring.
//!
//! Pipeline: split sentences, match each keyword group, score the groups that
//! hit, then aggregate and rank sectors.

pub mod analyzer;
pub mod keyword_matcher;
pub mod scoring;
pub mod sector_aggregator;
pub mod sentence_splitter;

pub use analyzer::{SectorAnalyzer, analyze};
pub use keyword_matcher::{KeywordMatcher, match_keywords};
pub use sector_aggregator::SectorAccumulator;
