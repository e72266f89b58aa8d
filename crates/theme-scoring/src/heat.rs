//! Heat Calculator
//!
//! Scores a theme's current strength (0-100) from momentum, volume,
//! trend, and breadth sub-signals. Missing sub-signals score a neutral
//! 50 rather than propagating absence.

use serde::{Deserialize, Serialize};

use industry_ranker::MomentumCurve;
use theme_core::{Direction, HeatLabel, Theme};

use crate::models::ThemeEnrichment;

/// Weights for the heat sub-signals. Sum to 1.0.
///
/// Two calibrations are in circulation; the table is part of the config
/// so either can be selected without touching the calculator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeatWeights {
    pub momentum: f64,
    pub volume: f64,
    pub uptrend: f64,
    pub breadth: f64,
}

impl HeatWeights {
    /// Calibration favoring momentum.
    pub fn momentum_heavy() -> Self {
        Self {
            momentum: 0.40,
            volume: 0.20,
            uptrend: 0.25,
            breadth: 0.15,
        }
    }

    /// Calibration with a flatter momentum/volume split.
    pub fn balanced() -> Self {
        Self {
            momentum: 0.35,
            volume: 0.25,
            uptrend: 0.25,
            breadth: 0.15,
        }
    }
}

impl Default for HeatWeights {
    fn default() -> Self {
        Self::momentum_heavy()
    }
}

/// Aggregated sub-signals for one theme. `None` means the underlying
/// data source was unavailable.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HeatInputs {
    /// Momentum transform of the theme-level |weighted return|
    pub momentum_strength: Option<f64>,
    /// 20d/60d volume ratio rescaled onto 0-100
    pub volume_intensity: Option<f64>,
    /// Sector-weighted 3-tier trend score, inverted for bearish themes
    pub uptrend_signal: Option<f64>,
    /// Fraction of constituents aligned with the theme direction, 0-100
    pub breadth_signal: Option<f64>,
}

impl HeatInputs {
    /// Derive the sub-signals from a theme and its enrichment data.
    pub fn from_enrichment(
        theme: &Theme,
        enrichment: &ThemeEnrichment,
        curve: MomentumCurve,
    ) -> Self {
        Self {
            momentum_strength: Some(curve.score(theme.mean_weighted_return().abs())),
            volume_intensity: enrichment
                .volume_ratio
                .map(|ratio| (ratio * 50.0).clamp(0.0, 100.0)),
            uptrend_signal: uptrend_signal(theme, enrichment),
            breadth_signal: enrichment
                .breadth_aligned
                .map(|fraction| (fraction.clamp(0.0, 1.0) * 120.0).min(100.0)),
        }
    }
}

/// Sector-weight-weighted average of the 3-tier per-sector trend score:
/// MA comparison and slope both positive scores 100, one of them 50,
/// neither 0. The average is inverted for bearish themes, so a broadly
/// falling tape reads as hot for a bearish theme.
fn uptrend_signal(theme: &Theme, enrichment: &ThemeEnrichment) -> Option<f64> {
    if enrichment.sector_trends.is_empty() {
        return None;
    }

    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for trend in &enrichment.sector_trends {
        let tier = match (trend.ma_positive, trend.slope_positive) {
            (true, true) => 100.0,
            (true, false) | (false, true) => 50.0,
            (false, false) => 0.0,
        };
        // Sectors the theme has no exposure to carry no weight. When the
        // theme has no sector data at all, fall back to an equal-weight
        // average over the supplied trends.
        let weight = if theme.sector_weights.is_empty() {
            1.0
        } else {
            *theme.sector_weights.get(&trend.sector).unwrap_or(&0.0)
        };
        weighted_sum += tier * weight;
        weight_total += weight;
    }

    if weight_total == 0.0 {
        return None;
    }

    let average = weighted_sum / weight_total;
    Some(match theme.direction {
        Direction::Bullish => average,
        Direction::Bearish => 100.0 - average,
    })
}

/// Heat score plus its band label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeatResult {
    pub theme_heat: f64,
    pub heat_label: HeatLabel,
}

/// Weighted aggregation of the heat sub-signals.
pub struct HeatCalculator {
    weights: HeatWeights,
}

impl Default for HeatCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl HeatCalculator {
    /// Create a calculator with the default weight table
    pub fn new() -> Self {
        Self {
            weights: HeatWeights::default(),
        }
    }

    /// Create a calculator with a custom weight table
    pub fn with_weights(weights: HeatWeights) -> Self {
        Self { weights }
    }

    /// Aggregate sub-signals into a clamped 0-100 heat score.
    pub fn calculate(&self, inputs: &HeatInputs) -> HeatResult {
        let sub = |value: Option<f64>| value.unwrap_or(50.0);

        let theme_heat = (sub(inputs.momentum_strength) * self.weights.momentum
            + sub(inputs.volume_intensity) * self.weights.volume
            + sub(inputs.uptrend_signal) * self.weights.uptrend
            + sub(inputs.breadth_signal) * self.weights.breadth)
            .clamp(0.0, 100.0);

        HeatResult {
            theme_heat,
            heat_label: HeatLabel::from_heat(theme_heat),
        }
    }
}
