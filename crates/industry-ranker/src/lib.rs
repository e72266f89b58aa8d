//! Industry Ranker Module
//!
//! Converts raw per-industry multi-horizon performance into a
//! direction-neutral momentum score and a rank ordering.

use serde::{Deserialize, Serialize};

use theme_core::{Direction, Industry, IndustryPerformance};

/// Fixed horizon weights for the blended return. Sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HorizonWeights {
    pub perf_1w: f64,
    pub perf_1m: f64,
    pub perf_3m: f64,
    pub perf_6m: f64,
}

impl Default for HorizonWeights {
    fn default() -> Self {
        Self {
            perf_1w: 0.10,
            perf_1m: 0.25,
            perf_3m: 0.35,
            perf_6m: 0.30,
        }
    }
}

/// Shape of the momentum transform.
///
/// Both shapes are monotonic on |weighted return|, map 0% near 30 and 5%
/// to the 50 midpoint. The fast shape saturates above 90 past ~20%; the
/// log-spread shape rises more slowly and spreads large returns out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumCurve {
    FastSigmoid,
    LogSpread,
}

impl MomentumCurve {
    /// Map an absolute weighted return (percent) onto 0-100.
    pub fn score(&self, abs_return: f64) -> f64 {
        let score = match self {
            // Logistic with midpoint at 5%. Steepness puts 0% near 30 and
            // 20% near 93.
            MomentumCurve::FastSigmoid => {
                100.0 / (1.0 + (-0.1694 * (abs_return - 5.0)).exp())
            }
            // Same anchors applied to ln(1 + x): slower saturation for
            // large returns.
            MomentumCurve::LogSpread => {
                let u = abs_return.max(0.0).ln_1p();
                let mid = 5.0_f64.ln_1p();
                100.0 / (1.0 + (-0.4729 * (u - mid)).exp())
            }
        };
        score.clamp(0.0, 100.0)
    }
}

impl Default for MomentumCurve {
    fn default() -> Self {
        MomentumCurve::FastSigmoid
    }
}

/// Ranker configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankerConfig {
    pub horizon_weights: HorizonWeights,
    pub momentum_curve: MomentumCurve,
}

/// Ranks industries by direction-neutral momentum.
pub struct IndustryRanker {
    config: RankerConfig,
}

impl Default for IndustryRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl IndustryRanker {
    /// Create a ranker with default weights and curve
    pub fn new() -> Self {
        Self {
            config: RankerConfig::default(),
        }
    }

    /// Create a ranker with custom configuration
    pub fn with_config(config: RankerConfig) -> Self {
        Self { config }
    }

    /// Rank a snapshot of industry performance records.
    ///
    /// Empty input yields empty output. Missing horizons contribute 0 to
    /// the weighted return; an industry with no usable data scores at the
    /// low end but is never dropped.
    pub fn rank(&self, records: &[IndustryPerformance]) -> Vec<Industry> {
        let mut industries: Vec<Industry> = records
            .iter()
            .map(|record| self.derive(record))
            .collect();

        // Momentum descending, name ascending on ties so equal scores
        // rank stably across runs.
        industries.sort_by(|a, b| {
            b.momentum_score
                .partial_cmp(&a.momentum_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });

        let total = industries.len();
        let bullish_half = total / 2;
        for (idx, industry) in industries.iter_mut().enumerate() {
            industry.rank = idx + 1;
            industry.rank_direction = if idx < bullish_half {
                Direction::Bullish
            } else {
                Direction::Bearish
            };
        }

        industries
    }

    fn derive(&self, record: &IndustryPerformance) -> Industry {
        let w = &self.config.horizon_weights;
        let weighted_return = record.perf_1w.unwrap_or(0.0) * w.perf_1w
            + record.perf_1m.unwrap_or(0.0) * w.perf_1m
            + record.perf_3m.unwrap_or(0.0) * w.perf_3m
            + record.perf_6m.unwrap_or(0.0) * w.perf_6m;

        Industry {
            name: record.name.clone(),
            sector: record.sector.clone(),
            perf_1w: record.perf_1w,
            perf_1m: record.perf_1m,
            perf_3m: record.perf_3m,
            perf_6m: record.perf_6m,
            weighted_return,
            momentum_score: self.config.momentum_curve.score(weighted_return.abs()),
            direction: Direction::from_weighted_return(weighted_return),
            // Placeholders, assigned after the sort
            rank: 0,
            rank_direction: Direction::Bearish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record(name: &str, perf: f64) -> IndustryPerformance {
        IndustryPerformance {
            name: name.to_string(),
            sector: None,
            perf_1w: Some(perf),
            perf_1m: Some(perf),
            perf_3m: Some(perf),
            perf_6m: Some(perf),
        }
    }

    #[test]
    fn test_empty_input_empty_output() {
        let ranker = IndustryRanker::new();
        assert!(ranker.rank(&[]).is_empty());
    }

    #[test]
    fn test_weighted_return_uses_horizon_weights() {
        let ranker = IndustryRanker::new();
        let record = IndustryPerformance {
            name: "Semiconductors".to_string(),
            sector: Some("Technology".to_string()),
            perf_1w: Some(2.0),
            perf_1m: Some(4.0),
            perf_3m: Some(8.0),
            perf_6m: Some(10.0),
        };

        let ranked = ranker.rank(&[record]);
        let expected = 2.0 * 0.10 + 4.0 * 0.25 + 8.0 * 0.35 + 10.0 * 0.30;
        assert!((ranked[0].weighted_return - expected).abs() < 1e-9);
    }

    #[test]
    fn test_missing_horizons_default_to_zero() {
        let ranker = IndustryRanker::new();
        let record = IndustryPerformance {
            name: "Gold".to_string(),
            sector: None,
            perf_1w: None,
            perf_1m: Some(4.0),
            perf_3m: None,
            perf_6m: None,
        };

        let ranked = ranker.rank(&[record]);
        assert!((ranked[0].weighted_return - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ranks_form_contiguous_permutation() {
        let ranker = IndustryRanker::new();
        let records: Vec<_> = (0..7)
            .map(|i| create_test_record(&format!("Industry {}", i), i as f64 - 3.0))
            .collect();

        let ranked = ranker.rank(&records);
        let mut ranks: Vec<usize> = ranked.iter().map(|i| i.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn test_rank_direction_positional_split() {
        let ranker = IndustryRanker::new();
        // All positive returns: the sign-based direction is bullish for
        // every industry, but only the top half is rank-bullish.
        let records: Vec<_> = (0..5)
            .map(|i| create_test_record(&format!("Industry {}", i), (i + 1) as f64))
            .collect();

        let ranked = ranker.rank(&records);
        let rank_bullish = ranked
            .iter()
            .filter(|i| i.rank_direction == Direction::Bullish)
            .count();
        assert_eq!(rank_bullish, 2); // floor(5 / 2)
        assert!(ranked[0].rank_direction == Direction::Bullish);
        assert!(ranked[4].rank_direction == Direction::Bearish);
        assert!(ranked.iter().all(|i| i.direction == Direction::Bullish));
    }

    #[test]
    fn test_momentum_score_in_range_for_extremes() {
        for curve in [MomentumCurve::FastSigmoid, MomentumCurve::LogSpread] {
            for x in [0.0, 0.5, 5.0, 20.0, 100.0, 1000.0] {
                let score = curve.score(x);
                assert!((0.0..=100.0).contains(&score), "{:?} at {}", curve, x);
            }
        }
    }

    #[test]
    fn test_momentum_curves_monotonic_with_midpoint() {
        for curve in [MomentumCurve::FastSigmoid, MomentumCurve::LogSpread] {
            let mut prev = -1.0;
            for i in 0..200 {
                let score = curve.score(i as f64 * 0.5);
                assert!(score > prev, "{:?} not monotonic at {}", curve, i);
                prev = score;
            }

            // 0% near the low end, 5% at the midpoint.
            let at_zero = curve.score(0.0);
            assert!((25.0..=35.0).contains(&at_zero), "{:?}: {}", curve, at_zero);
            assert!((curve.score(5.0) - 50.0).abs() < 1e-6);
        }

        // The fast shape saturates past ~20%.
        assert!(MomentumCurve::FastSigmoid.score(20.0) >= 90.0);
        assert!(MomentumCurve::FastSigmoid.score(30.0) >= 95.0);
    }

    #[test]
    fn test_descending_momentum_order() {
        let ranker = IndustryRanker::new();
        let records = vec![
            create_test_record("Weak", 1.0),
            create_test_record("Strong", 15.0),
            create_test_record("Falling", -10.0),
        ];

        let ranked = ranker.rank(&records);
        assert_eq!(ranked[0].name, "Strong");
        // Momentum is direction-neutral: a -10% slide outranks a +1% drift.
        assert_eq!(ranked[1].name, "Falling");
        assert_eq!(ranked[2].name, "Weak");
        assert_eq!(ranked[1].direction, Direction::Bearish);
    }
}
