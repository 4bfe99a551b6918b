// Shared HTTP plumbing
pub mod core;

// Transcript sources
pub mod news;

// Report delivery
pub mod mail;

pub mod report_archive;

pub use report_archive::ReportArchive;
