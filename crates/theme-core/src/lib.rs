//! Theme Core Module
//!
//! Shared data model for the theme detection & clustering pipeline:
//! industries, themes, theme scores, and the seed theme catalog.

pub mod catalog;
pub mod error;
pub mod types;

pub use catalog::{SeedThemeDefinition, ThemeCatalog};
pub use error::ThemeError;
pub use types::{
    ConfidenceTier, DataMode, Direction, HeatLabel, Industry, IndustryPerformance,
    LifecycleStage, NameConfidence, Theme, ThemeOrigin, ThemeScore,
};
