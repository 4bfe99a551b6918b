// Keyword matching, scoring and sector ranking
pub mod analysis;

// HTML report rendering
pub mod reporting;

// Daily task orchestration
pub mod briefing;
