// Keyword taxonomy and lookup tables
pub mod keywords;

// Analysis results
pub mod analysis;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
