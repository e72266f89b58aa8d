//! Core data types shared across all pipeline stages.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Bullish/bearish direction label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Bullish,
    Bearish,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Bullish => "bullish",
            Direction::Bearish => "bearish",
        }
    }

    /// Sign-based direction. Zero counts as bearish.
    pub fn from_weighted_return(weighted_return: f64) -> Self {
        if weighted_return > 0.0 {
            Direction::Bullish
        } else {
            Direction::Bearish
        }
    }

    /// Whether a percent return agrees with this direction.
    pub fn agrees_with(&self, value: f64) -> bool {
        match self {
            Direction::Bullish => value > 0.0,
            Direction::Bearish => value < 0.0,
        }
    }
}

/// Raw per-industry performance record as supplied by the market-data feed.
///
/// Absent horizons stay absent here; the ranker decides how to treat them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryPerformance {
    /// Industry name (unique key within a ranking run)
    pub name: String,
    /// Broader sector grouping, if known
    #[serde(default)]
    pub sector: Option<String>,
    /// 1-week percent return
    #[serde(default)]
    pub perf_1w: Option<f64>,
    /// 1-month percent return
    #[serde(default)]
    pub perf_1m: Option<f64>,
    /// 3-month percent return
    #[serde(default)]
    pub perf_3m: Option<f64>,
    /// 6-month percent return
    #[serde(default)]
    pub perf_6m: Option<f64>,
}

/// A ranked industry with derived momentum fields.
///
/// Created fresh each ranking run and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Industry {
    /// Industry name (unique key within a ranking run)
    pub name: String,
    /// Broader sector grouping, if known
    pub sector: Option<String>,
    /// 1-week percent return
    pub perf_1w: Option<f64>,
    /// 1-month percent return
    pub perf_1m: Option<f64>,
    /// 3-month percent return
    pub perf_3m: Option<f64>,
    /// 6-month percent return
    pub perf_6m: Option<f64>,
    /// Horizon-weighted blended return
    pub weighted_return: f64,
    /// Direction-neutral momentum score (0-100)
    pub momentum_score: f64,
    /// Sign-based direction of the weighted return
    pub direction: Direction,
    /// 1-based position in the momentum ranking
    pub rank: usize,
    /// Positional direction: bullish for the better-ranked half
    pub rank_direction: Direction,
}

impl Industry {
    /// Short-horizon performance vector used for similarity distance.
    /// Missing horizons contribute 0, matching the weighted-return rule.
    pub fn short_horizon_vector(&self) -> [f64; 3] {
        [
            self.perf_1w.unwrap_or(0.0),
            self.perf_1m.unwrap_or(0.0),
            self.perf_3m.unwrap_or(0.0),
        ]
    }

    /// All four horizon returns, missing horizons as 0.
    pub fn horizon_returns(&self) -> [f64; 4] {
        [
            self.perf_1w.unwrap_or(0.0),
            self.perf_1m.unwrap_or(0.0),
            self.perf_3m.unwrap_or(0.0),
            self.perf_6m.unwrap_or(0.0),
        ]
    }
}

/// Provenance of a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeOrigin {
    /// Matched against a catalog definition
    Seed,
    /// Single-sector concentration
    Vertical,
    /// Found by cluster discovery
    Discovered,
}

impl ThemeOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeOrigin::Seed => "seed",
            ThemeOrigin::Vertical => "vertical",
            ThemeOrigin::Discovered => "discovered",
        }
    }
}

/// How much to trust the theme's name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameConfidence {
    /// Catalog-defined or sector-derived name
    High,
    /// Auto-generated from member name tokens
    Medium,
}

/// A thematic grouping of co-moving industries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    /// Display name
    pub theme_name: String,
    /// Majority-vote direction over members
    pub direction: Direction,
    /// Member industries (never empty)
    pub matching_industries: Vec<Industry>,
    /// Sector -> proportion of members in that sector; sums to 1.0 over
    /// members that carry a sector, empty when none do
    pub sector_weights: BTreeMap<String, f64>,
    /// Proxy ETF tickers from the catalog (empty for discovered themes)
    pub proxy_etfs: Vec<String>,
    /// Representative constituent tickers (empty for discovered themes)
    pub static_stocks: Vec<String>,
    /// Provenance tag
    pub theme_origin: ThemeOrigin,
    /// Name trust level: high for seed/vertical, medium for discovered
    pub name_confidence: NameConfidence,
    /// Attached by the scorer; None until scoring runs
    #[serde(default)]
    pub score: Option<ThemeScore>,
}

impl Theme {
    /// Member industry names as a set, for overlap checks.
    pub fn member_names(&self) -> BTreeSet<String> {
        self.matching_industries
            .iter()
            .map(|i| i.name.clone())
            .collect()
    }

    /// Mean weighted return across members.
    pub fn mean_weighted_return(&self) -> f64 {
        if self.matching_industries.is_empty() {
            return 0.0;
        }
        let sum: f64 = self
            .matching_industries
            .iter()
            .map(|i| i.weighted_return)
            .sum();
        sum / self.matching_industries.len() as f64
    }

    /// Majority vote over member directions: bullish only when strictly
    /// more members are bullish than bearish.
    pub fn majority_direction(members: &[Industry]) -> Direction {
        let bullish = members
            .iter()
            .filter(|i| i.direction == Direction::Bullish)
            .count();
        let bearish = members.len() - bullish;
        if bullish > bearish {
            Direction::Bullish
        } else {
            Direction::Bearish
        }
    }

    /// Proportional sector weights over members that carry a sector.
    pub fn sector_weights_of(members: &[Industry]) -> BTreeMap<String, f64> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for industry in members {
            if let Some(sector) = &industry.sector {
                *counts.entry(sector.clone()).or_insert(0) += 1;
            }
        }
        let total: usize = counts.values().sum();
        if total == 0 {
            return BTreeMap::new();
        }
        counts
            .into_iter()
            .map(|(sector, count)| (sector, count as f64 / total as f64))
            .collect()
    }
}

/// Heat strength band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatLabel {
    Hot,
    Warm,
    Neutral,
    Cool,
    Cold,
}

impl HeatLabel {
    pub fn from_heat(heat: f64) -> Self {
        match heat {
            h if h >= 80.0 => HeatLabel::Hot,
            h if h >= 60.0 => HeatLabel::Warm,
            h if h >= 40.0 => HeatLabel::Neutral,
            h if h >= 20.0 => HeatLabel::Cool,
            _ => HeatLabel::Cold,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeatLabel::Hot => "Hot",
            HeatLabel::Warm => "Warm",
            HeatLabel::Neutral => "Neutral",
            HeatLabel::Cool => "Cool",
            HeatLabel::Cold => "Cold",
        }
    }
}

/// Trend maturity stage, 20-point bands over lifecycle maturity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleStage {
    Emerging,
    Accelerating,
    Trending,
    Mature,
    Exhausting,
}

impl LifecycleStage {
    pub fn from_maturity(maturity: f64) -> Self {
        match maturity {
            m if m < 20.0 => LifecycleStage::Emerging,
            m if m < 40.0 => LifecycleStage::Accelerating,
            m if m < 60.0 => LifecycleStage::Trending,
            m if m < 80.0 => LifecycleStage::Mature,
            _ => LifecycleStage::Exhausting,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleStage::Emerging => "Emerging",
            LifecycleStage::Accelerating => "Accelerating",
            LifecycleStage::Trending => "Trending",
            LifecycleStage::Mature => "Mature",
            LifecycleStage::Exhausting => "Exhausting",
        }
    }
}

/// Tiered confidence label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// Tier from the count of confirmed layers.
    pub fn from_confirmations(confirmed: usize) -> Self {
        match confirmed {
            3.. => ConfidenceTier::High,
            2 => ConfidenceTier::Medium,
            _ => ConfidenceTier::Low,
        }
    }

    /// One tier lower; Low stays Low.
    pub fn downgraded(&self) -> Self {
        match self {
            ConfidenceTier::High => ConfidenceTier::Medium,
            ConfidenceTier::Medium | ConfidenceTier::Low => ConfidenceTier::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "High",
            ConfidenceTier::Medium => "Medium",
            ConfidenceTier::Low => "Low",
        }
    }
}

/// Which external data sources were available for scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataMode {
    /// Volume and stock-level enrichment were supplied
    Enriched,
    /// Some enrichment inputs were supplied
    PartialEnrichment,
    /// Performance returns only; heat/lifecycle ran on neutral defaults
    PerformanceOnly,
}

impl DataMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataMode::Enriched => "enriched",
            DataMode::PartialEnrichment => "partial_enrichment",
            DataMode::PerformanceOnly => "performance_only",
        }
    }
}

/// Final scored record attached to a theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeScore {
    /// Current strength (0-100)
    pub theme_heat: f64,
    pub heat_label: HeatLabel,
    /// Trend maturity (0-100)
    pub lifecycle_maturity: f64,
    pub lifecycle_stage: LifecycleStage,
    pub direction: Direction,
    pub confidence: ConfidenceTier,
    pub data_mode: DataMode,
    /// True when maturity was computed from neutral defaults rather than
    /// real stock-level metrics
    pub maturity_from_defaults: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_industry(name: &str, sector: Option<&str>, weighted_return: f64) -> Industry {
        Industry {
            name: name.to_string(),
            sector: sector.map(|s| s.to_string()),
            perf_1w: Some(weighted_return / 4.0),
            perf_1m: Some(weighted_return / 2.0),
            perf_3m: Some(weighted_return),
            perf_6m: Some(weighted_return),
            weighted_return,
            momentum_score: 50.0,
            direction: Direction::from_weighted_return(weighted_return),
            rank: 1,
            rank_direction: Direction::Bullish,
        }
    }

    #[test]
    fn test_direction_zero_is_bearish() {
        assert_eq!(Direction::from_weighted_return(0.0), Direction::Bearish);
        assert_eq!(Direction::from_weighted_return(-0.1), Direction::Bearish);
        assert_eq!(Direction::from_weighted_return(0.1), Direction::Bullish);
    }

    #[test]
    fn test_majority_direction_tie_is_bearish() {
        let members = vec![
            create_test_industry("A", None, 5.0),
            create_test_industry("B", None, -5.0),
        ];
        assert_eq!(Theme::majority_direction(&members), Direction::Bearish);

        let members = vec![
            create_test_industry("A", None, 5.0),
            create_test_industry("B", None, 4.0),
            create_test_industry("C", None, -5.0),
        ];
        assert_eq!(Theme::majority_direction(&members), Direction::Bullish);
    }

    #[test]
    fn test_sector_weights_sum_to_one() {
        let members = vec![
            create_test_industry("A", Some("Technology"), 5.0),
            create_test_industry("B", Some("Technology"), 4.0),
            create_test_industry("C", Some("Energy"), 3.0),
            create_test_industry("D", None, 2.0),
        ];
        let weights = Theme::sector_weights_of(&members);

        assert_eq!(weights.len(), 2);
        assert!((weights["Technology"] - 2.0 / 3.0).abs() < 1e-9);
        assert!((weights["Energy"] - 1.0 / 3.0).abs() < 1e-9);
        let total: f64 = weights.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sector_weights_empty_without_sectors() {
        let members = vec![
            create_test_industry("A", None, 5.0),
            create_test_industry("B", None, 4.0),
        ];
        assert!(Theme::sector_weights_of(&members).is_empty());
    }

    #[test]
    fn test_heat_label_bands() {
        assert_eq!(HeatLabel::from_heat(85.0), HeatLabel::Hot);
        assert_eq!(HeatLabel::from_heat(80.0), HeatLabel::Hot);
        assert_eq!(HeatLabel::from_heat(60.0), HeatLabel::Warm);
        assert_eq!(HeatLabel::from_heat(50.0), HeatLabel::Neutral);
        assert_eq!(HeatLabel::from_heat(25.0), HeatLabel::Cool);
        assert_eq!(HeatLabel::from_heat(10.0), HeatLabel::Cold);
    }

    #[test]
    fn test_lifecycle_stage_bands() {
        assert_eq!(LifecycleStage::from_maturity(0.0), LifecycleStage::Emerging);
        assert_eq!(LifecycleStage::from_maturity(20.0), LifecycleStage::Accelerating);
        assert_eq!(LifecycleStage::from_maturity(45.0), LifecycleStage::Trending);
        assert_eq!(LifecycleStage::from_maturity(79.9), LifecycleStage::Mature);
        assert_eq!(LifecycleStage::from_maturity(80.0), LifecycleStage::Exhausting);
        assert_eq!(LifecycleStage::from_maturity(100.0), LifecycleStage::Exhausting);
    }

    #[test]
    fn test_confidence_tiers_and_downgrade() {
        assert_eq!(ConfidenceTier::from_confirmations(3), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_confirmations(2), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_confirmations(1), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_confirmations(0), ConfidenceTier::Low);

        assert_eq!(ConfidenceTier::High.downgraded(), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::Medium.downgraded(), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::Low.downgraded(), ConfidenceTier::Low);
    }
}
