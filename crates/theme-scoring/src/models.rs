//! Enrichment input model for heat and lifecycle scoring.

use serde::{Deserialize, Serialize};

/// Per-sector trend observation feeding the uptrend sub-signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorTrend {
    /// Sector name, matched against the theme's sector weights
    pub sector: String,
    /// Short moving average above the longer one
    pub ma_positive: bool,
    /// Recent price slope is positive
    pub slope_positive: bool,
}

/// Per-stock metrics feeding the lifecycle calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMetrics {
    pub symbol: String,
    /// Oscillator at an extreme reading
    #[serde(default)]
    pub oscillator_extreme: Option<bool>,
    /// Near a 52-period high/low
    #[serde(default)]
    pub price_extreme: Option<bool>,
    /// Valuation multiple (e.g. trailing P/E)
    #[serde(default)]
    pub valuation_multiple: Option<f64>,
}

/// Optional per-theme enrichment supplied by external collaborators.
///
/// Every field may be absent; the calculators substitute neutral scores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeEnrichment {
    /// 20-day over 60-day average volume ratio
    #[serde(default)]
    pub volume_ratio: Option<f64>,
    /// Trend observations for the theme's constituent sectors
    #[serde(default)]
    pub sector_trends: Vec<SectorTrend>,
    /// Fraction of constituents moving in the theme's direction (0-1)
    #[serde(default)]
    pub breadth_aligned: Option<f64>,
    /// Stock-level metrics for the theme's constituents
    #[serde(default)]
    pub stock_metrics: Vec<StockMetrics>,
    /// Count of dedicated tracking instruments for the theme
    #[serde(default)]
    pub etf_count: Option<usize>,
    /// Result of the upstream breadth/participation check, if it ran
    #[serde(default)]
    pub breadth_confirmed: Option<bool>,
}

impl ThemeEnrichment {
    /// True when no enrichment input was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.volume_ratio.is_none()
            && self.sector_trends.is_empty()
            && self.breadth_aligned.is_none()
            && self.stock_metrics.is_empty()
            && self.etf_count.is_none()
            && self.breadth_confirmed.is_none()
    }

    /// True when every input a full scoring pass uses was supplied.
    pub fn is_complete(&self) -> bool {
        self.volume_ratio.is_some()
            && !self.sector_trends.is_empty()
            && self.breadth_aligned.is_some()
            && !self.stock_metrics.is_empty()
            && self.etf_count.is_some()
    }
}
