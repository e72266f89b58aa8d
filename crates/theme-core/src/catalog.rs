//! Seed Theme Catalog
//!
//! Configuration listing known cross-sector theme definitions and the
//! classification thresholds. Structurally invalid catalogs are rejected
//! at load time, before any classification runs.

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

fn default_cross_sector_min_matches() -> usize {
    2
}

fn default_vertical_min_industries() -> usize {
    3
}

/// One seed cross-sector theme definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedThemeDefinition {
    /// Display name of the theme
    pub name: String,
    /// Industry names that count as matches for this theme
    pub keywords: Vec<String>,
    /// Proxy instrument tickers
    #[serde(default)]
    pub proxy_etfs: Vec<String>,
    /// Representative constituent tickers
    #[serde(default)]
    pub static_stocks: Vec<String>,
}

/// The full catalog: seed definitions plus classification thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeCatalog {
    pub themes: Vec<SeedThemeDefinition>,
    /// Minimum keyword hits for a seed theme to fire
    #[serde(default = "default_cross_sector_min_matches")]
    pub cross_sector_min_matches: usize,
    /// Minimum same-sector members for a vertical theme to fire
    #[serde(default = "default_vertical_min_industries")]
    pub vertical_min_industries: usize,
}

impl ThemeCatalog {
    /// Catalog with the given definitions and default thresholds.
    pub fn new(themes: Vec<SeedThemeDefinition>) -> Self {
        Self {
            themes,
            cross_sector_min_matches: default_cross_sector_min_matches(),
            vertical_min_industries: default_vertical_min_industries(),
        }
    }

    /// Load and validate a catalog from JSON.
    ///
    /// Missing `name`/`keywords` keys or wrong-typed list fields fail at
    /// parse; empty names/keyword lists and zero thresholds fail in
    /// `validate`. Nothing is coerced or skipped.
    pub fn from_json(raw: &str) -> Result<Self, ThemeError> {
        let catalog: ThemeCatalog = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Structural validation, run before the catalog is used.
    pub fn validate(&self) -> Result<(), ThemeError> {
        for (idx, def) in self.themes.iter().enumerate() {
            if def.name.trim().is_empty() {
                return Err(ThemeError::InvalidCatalog(format!(
                    "theme definition {} has an empty name",
                    idx
                )));
            }
            if def.keywords.is_empty() {
                return Err(ThemeError::InvalidCatalog(format!(
                    "theme '{}' has an empty keyword list",
                    def.name
                )));
            }
        }
        if self.cross_sector_min_matches == 0 {
            return Err(ThemeError::InvalidCatalog(
                "cross_sector_min_matches must be at least 1".to_string(),
            ));
        }
        if self.vertical_min_industries == 0 {
            return Err(ThemeError::InvalidCatalog(
                "vertical_min_industries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
