//! Keyword taxonomy loading.
//!
//! The built-in taxonomy ships inside the binary; a user file with the same
//! TOML layout replaces it entirely (no merging).

use crate::domain::errors::ConfigurationError;
use crate::domain::keywords::KeywordConfig;
use std::path::Path;
use tracing::info;

const BUILTIN_KEYWORDS: &str = include_str!("keywords.toml");

impl KeywordConfig {
    /// Parses a keyword file body. `origin` is used in error messages only.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigurationError> {
        let config: KeywordConfig =
            toml::from_str(content).map_err(|e| ConfigurationError::Parse {
                path: origin.to_string(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// The bundled policy / industry / enterprise / macro / regional taxonomy.
    pub fn builtin() -> Result<Self, ConfigurationError> {
        Self::from_toml_str(BUILTIN_KEYWORDS, "<builtin>")
    }

    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigurationError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml_str(&content, &path.display().to_string())?;
        info!(
            "Loaded {} keywords in {} taxonomies from {}",
            config.universe.keyword_count(),
            config.universe.taxonomies.len(),
            path.display()
        );
        Ok(config)
    }

    /// User file when given, built-in taxonomy otherwise.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.universe.taxonomies.is_empty() {
            return Err(ConfigurationError::EmptyUniverse);
        }
        if self.scores.is_empty() {
            return Err(ConfigurationError::EmptyTable { table: "scores" });
        }
        if self.sectors.is_empty() {
            return Err(ConfigurationError::EmptyTable { table: "sectors" });
        }
        if let Some((taxonomy, _)) = self
            .universe
            .groups()
            .find(|(_, group)| group.name.trim().is_empty())
        {
            return Err(ConfigurationError::UnnamedGroup {
                taxonomy: taxonomy.name.clone(),
            });
        }
        Ok(())
    }
}
