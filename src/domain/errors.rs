use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Keyword universe has no taxonomies")]
    EmptyUniverse,

    #[error("Keyword table '{table}' is empty")]
    EmptyTable { table: &'static str },

    #[error("Group in taxonomy '{taxonomy}' has no name")]
    UnnamedGroup { taxonomy: String },

    #[error("Failed to parse keyword file {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Mail configuration incomplete: missing {missing}")]
    IncompleteMail { missing: String },
}

/// Errors from the transcript fetch step
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {reason}")]
    Http { url: String, reason: String },

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("No transcript link found for {date}")]
    LinkNotFound { date: String },

    #[error("No transcript content extracted from {url}")]
    EmptyContent { url: String },
}

/// Errors from report delivery
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Invalid mail address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build message: {reason}")]
    Build { reason: String },

    #[error("SMTP transport failed: {reason}")]
    Transport { reason: String },
}
