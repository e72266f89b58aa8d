//! Theme Engine Module
//!
//! Runs the full detection pipeline over one immutable snapshot of
//! industry performance: Ranker -> Classifier -> Discoverer -> {Heat,
//! Lifecycle} -> Scorer. The engine itself performs no I/O; data
//! acquisition and report rendering are external collaborators.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use industry_ranker::{IndustryRanker, RankerConfig};
use theme_classifier::{ClassifierConfig, ThemeClassifier};
use theme_core::{DataMode, IndustryPerformance, Theme, ThemeCatalog, ThemeError};
use theme_discoverer::{DiscovererConfig, ThemeDiscoverer};
use theme_scoring::{
    HeatCalculator, HeatInputs, HeatWeights, LifecycleCalculator, LifecycleWeights,
    ThemeEnrichment, ThemeScorer,
};

/// Configuration for every pipeline stage. Immutable per engine; two
/// engines with different configs never interfere.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub ranker: RankerConfig,
    pub classifier: ClassifierConfig,
    pub discoverer: DiscovererConfig,
    pub heat_weights: HeatWeights,
    pub lifecycle_weights: LifecycleWeights,
}

/// Per-run options.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Timestamp stamped onto the report. Passing the same value makes
    /// repeated runs byte-identical.
    pub as_of: DateTime<Utc>,
    /// Downgrades every theme's confidence one tier
    pub stale_data: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            as_of: Utc::now(),
            stale_data: false,
        }
    }
}

/// Scored themes plus run metadata, ready for rendering or export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeReport {
    /// Seed, vertical, then discovered themes, each with a score attached
    pub themes: Vec<Theme>,
    /// The "as of" timestamp for this run
    pub generated_at: DateTime<Utc>,
    /// Overall enrichment coverage across the run
    pub data_mode: DataMode,
}

/// The full theme detection & clustering pipeline.
pub struct ThemeEngine {
    ranker: IndustryRanker,
    classifier: ThemeClassifier,
    discoverer: ThemeDiscoverer,
    heat: HeatCalculator,
    lifecycle: LifecycleCalculator,
    scorer: ThemeScorer,
    config: EngineConfig,
}

impl ThemeEngine {
    /// Build an engine from a catalog and stage configuration.
    ///
    /// The catalog is re-validated here so an engine can never run with
    /// a structurally broken one, regardless of how it was constructed.
    pub fn new(catalog: ThemeCatalog, config: EngineConfig) -> Result<Self, ThemeError> {
        catalog.validate()?;
        Ok(Self {
            ranker: IndustryRanker::with_config(config.ranker.clone()),
            classifier: ThemeClassifier::with_config(catalog, config.classifier),
            discoverer: ThemeDiscoverer::with_config(config.discoverer),
            heat: HeatCalculator::with_weights(config.heat_weights),
            lifecycle: LifecycleCalculator::with_weights(config.lifecycle_weights),
            scorer: ThemeScorer::new(),
            config,
        })
    }

    /// Engine with default configuration for every stage.
    pub fn with_catalog(catalog: ThemeCatalog) -> Result<Self, ThemeError> {
        Self::new(catalog, EngineConfig::default())
    }

    /// Run the pipeline over one snapshot.
    ///
    /// `enrichment` is keyed by theme name; themes without an entry are
    /// scored on neutral defaults. Empty input produces an empty report,
    /// never an error.
    pub fn run(
        &self,
        records: &[IndustryPerformance],
        enrichment: &BTreeMap<String, ThemeEnrichment>,
        options: &RunOptions,
    ) -> ThemeReport {
        let ranked = self.ranker.rank(records);
        let classification = self.classifier.classify(&ranked);
        let discovered = self.discoverer.discover(
            &ranked,
            &classification.matched_names,
            &classification.themes,
        );

        tracing::info!(
            universe = ranked.len(),
            classified = classification.themes.len(),
            discovered = discovered.len(),
            "theme detection pass complete"
        );

        let mut themes = classification.themes;
        themes.extend(discovered);

        let default_enrichment = ThemeEnrichment::default();
        let mut modes = Vec::with_capacity(themes.len());
        for theme in &mut themes {
            let theme_enrichment = enrichment
                .get(&theme.theme_name)
                .unwrap_or(&default_enrichment);
            let mode = enrichment_mode(theme_enrichment);

            let inputs = HeatInputs::from_enrichment(
                theme,
                theme_enrichment,
                self.config.ranker.momentum_curve,
            );
            let heat = self.heat.calculate(&inputs);
            let lifecycle = self.lifecycle.calculate(theme, theme_enrichment);

            theme.score = Some(self.scorer.score(
                theme,
                &heat,
                &lifecycle,
                theme_enrichment.breadth_confirmed.unwrap_or(false),
                options.stale_data,
                mode,
            ));
            modes.push(mode);
        }

        ThemeReport {
            themes,
            generated_at: options.as_of,
            data_mode: overall_mode(&modes),
        }
    }
}

/// Enrichment coverage for one theme.
fn enrichment_mode(enrichment: &ThemeEnrichment) -> DataMode {
    if enrichment.is_empty() {
        DataMode::PerformanceOnly
    } else if enrichment.is_complete() {
        DataMode::Enriched
    } else {
        DataMode::PartialEnrichment
    }
}

/// Coverage across the whole run: uniform modes carry through, anything
/// mixed reports as partial.
fn overall_mode(modes: &[DataMode]) -> DataMode {
    let Some(first) = modes.first() else {
        return DataMode::PerformanceOnly;
    };
    if modes.iter().all(|m| m == first) {
        *first
    } else {
        DataMode::PartialEnrichment
    }
}
