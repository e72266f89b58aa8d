//! Theme Scoring Module
//!
//! Scores each theme's current strength ("heat") and trend maturity
//! ("lifecycle"), then assembles the final theme record with a tiered
//! confidence label. Missing enrichment inputs score neutral; they never
//! fail the pipeline.

pub mod heat;
pub mod lifecycle;
pub mod models;
pub mod scorer;

pub use heat::{HeatCalculator, HeatInputs, HeatResult, HeatWeights};
pub use lifecycle::{LifecycleCalculator, LifecycleResult, LifecycleWeights};
pub use models::{SectorTrend, StockMetrics, ThemeEnrichment};
pub use scorer::{ConfirmationLayers, ThemeScorer};
