//! Lifecycle Calculator
//!
//! Scores a theme's trend maturity (0-100) and assigns a lifecycle
//! stage. Sub-scores default to a neutral 50 when their data source is
//! unavailable; a result whose stock-level scores all fell back to
//! defaults is flagged so downstream consumers never present it as
//! measured.

use serde::{Deserialize, Serialize};

use theme_core::{LifecycleStage, Theme};

use crate::models::ThemeEnrichment;

/// Fixed market-average valuation multiple the median constituent
/// multiple is compared against.
const MARKET_AVERAGE_MULTIPLE: f64 = 20.0;

/// Minimum valid constituent multiples for a real valuation score.
const MIN_VALUATION_OBSERVATIONS: usize = 3;

/// Weights for the lifecycle sub-scores. Sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LifecycleWeights {
    pub duration: f64,
    pub extremity: f64,
    pub price_extreme: f64,
    pub valuation: f64,
    pub etf_proliferation: f64,
}

impl Default for LifecycleWeights {
    fn default() -> Self {
        Self {
            duration: 0.25,
            extremity: 0.20,
            price_extreme: 0.20,
            valuation: 0.20,
            etf_proliferation: 0.15,
        }
    }
}

/// Maturity score, stage band, and the data-quality guard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LifecycleResult {
    pub lifecycle_maturity: f64,
    pub lifecycle_stage: LifecycleStage,
    /// True when every stock-level sub-score (extremity, price extreme,
    /// valuation) fell back to its neutral default
    pub from_defaults: bool,
}

/// Weighted aggregation of the lifecycle sub-scores.
pub struct LifecycleCalculator {
    weights: LifecycleWeights,
}

impl Default for LifecycleCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleCalculator {
    /// Create a calculator with the default weight table
    pub fn new() -> Self {
        Self {
            weights: LifecycleWeights::default(),
        }
    }

    /// Create a calculator with a custom weight table
    pub fn with_weights(weights: LifecycleWeights) -> Self {
        Self { weights }
    }

    /// Score a theme's maturity from its members and enrichment data.
    pub fn calculate(&self, theme: &Theme, enrichment: &ThemeEnrichment) -> LifecycleResult {
        let duration = duration_score(theme);
        let extremity = extremity_score(enrichment);
        let price_extreme = price_extreme_score(enrichment);
        let valuation = valuation_score(enrichment);
        let etf = enrichment.etf_count.map(etf_proliferation_score);

        let from_defaults =
            extremity.is_none() && price_extreme.is_none() && valuation.is_none();

        let sub = |value: Option<f64>| value.unwrap_or(50.0);
        let lifecycle_maturity = (sub(duration) * self.weights.duration
            + sub(extremity) * self.weights.extremity
            + sub(price_extreme) * self.weights.price_extreme
            + sub(valuation) * self.weights.valuation
            + sub(etf) * self.weights.etf_proliferation)
            .clamp(0.0, 100.0);

        LifecycleResult {
            lifecycle_maturity,
            lifecycle_stage: LifecycleStage::from_maturity(lifecycle_maturity),
            from_defaults,
        }
    }
}

/// 25 points per performance horizon whose member-average return agrees
/// with the theme's direction. None when no member reported any horizon,
/// so a theme without performance observations defaults to neutral like
/// the other sub-scores.
fn duration_score(theme: &Theme) -> Option<f64> {
    let members = &theme.matching_industries;
    let any_observed = members.iter().any(|i| {
        i.perf_1w.is_some() || i.perf_1m.is_some() || i.perf_3m.is_some() || i.perf_6m.is_some()
    });
    if members.is_empty() || !any_observed {
        return None;
    }

    let mut trending = 0;
    for horizon in 0..4 {
        let avg: f64 = members
            .iter()
            .map(|i| i.horizon_returns()[horizon])
            .sum::<f64>()
            / members.len() as f64;
        if theme.direction.agrees_with(avg) {
            trending += 1;
        }
    }
    Some(trending as f64 * 25.0)
}

/// Fraction of constituents at an oscillator extreme, rescaled with a
/// cap. None when no constituent reported the metric.
fn extremity_score(enrichment: &ThemeEnrichment) -> Option<f64> {
    fraction_score(
        enrichment
            .stock_metrics
            .iter()
            .filter_map(|m| m.oscillator_extreme),
    )
}

/// Fraction of constituents near a 52-period extreme, rescaled with a
/// cap. None when no constituent reported the metric.
fn price_extreme_score(enrichment: &ThemeEnrichment) -> Option<f64> {
    fraction_score(
        enrichment
            .stock_metrics
            .iter()
            .filter_map(|m| m.price_extreme),
    )
}

fn fraction_score(observations: impl Iterator<Item = bool>) -> Option<f64> {
    let mut total = 0usize;
    let mut hits = 0usize;
    for at_extreme in observations {
        total += 1;
        if at_extreme {
            hits += 1;
        }
    }
    if total == 0 {
        return None;
    }
    Some((hits as f64 / total as f64 * 125.0).min(100.0))
}

/// Median constituent multiple relative to the market-average reference,
/// linear (reference maps to 50). Needs at least
/// `MIN_VALUATION_OBSERVATIONS` valid multiples.
fn valuation_score(enrichment: &ThemeEnrichment) -> Option<f64> {
    let mut multiples: Vec<f64> = enrichment
        .stock_metrics
        .iter()
        .filter_map(|m| m.valuation_multiple)
        .filter(|m| m.is_finite() && *m > 0.0)
        .collect();

    if multiples.len() < MIN_VALUATION_OBSERVATIONS {
        return None;
    }

    multiples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = multiples.len() / 2;
    let median = if multiples.len() % 2 == 0 {
        (multiples[mid - 1] + multiples[mid]) / 2.0
    } else {
        multiples[mid]
    };

    Some((median / MARKET_AVERAGE_MULTIPLE * 50.0).clamp(0.0, 100.0))
}

/// Step function over the count of dedicated tracking instruments.
fn etf_proliferation_score(count: usize) -> f64 {
    match count {
        0 => 0.0,
        1 => 20.0,
        2..=3 => 40.0,
        4..=6 => 60.0,
        7..=10 => 80.0,
        _ => 100.0,
    }
}
