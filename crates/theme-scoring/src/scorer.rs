//! Theme Scorer
//!
//! Assembles heat, maturity, direction, and a tiered confidence label
//! into the final theme record.

use serde::{Deserialize, Serialize};

use theme_core::{ConfidenceTier, DataMode, LifecycleStage, Theme, ThemeScore};

use crate::heat::HeatResult;
use crate::lifecycle::LifecycleResult;

/// The three independent confirmation layers behind the confidence tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConfirmationLayers {
    /// This engine's own heat/lifecycle signals agree with the direction
    pub quant_confirmed: bool,
    /// Breadth/participation check computed upstream
    pub breadth_confirmed: bool,
    /// Qualitative confirmation supplied by a later human/LLM step.
    /// Always false at this automated layer, which caps the tier at
    /// Medium until an external process confirms the narrative.
    pub narrative_confirmed: bool,
}

impl ConfirmationLayers {
    pub fn confirmed_count(&self) -> usize {
        [
            self.quant_confirmed,
            self.breadth_confirmed,
            self.narrative_confirmed,
        ]
        .iter()
        .filter(|&&c| c)
        .count()
    }
}

/// Builds the final `ThemeScore` for each theme.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeScorer;

impl ThemeScorer {
    pub fn new() -> Self {
        Self
    }

    /// Whether the engine's own signals back the theme's direction: the
    /// move still has heat and its trend is not already exhausting.
    pub fn quant_confirmed(heat: &HeatResult, lifecycle: &LifecycleResult) -> bool {
        heat.theme_heat >= 60.0 && lifecycle.lifecycle_stage != LifecycleStage::Exhausting
    }

    /// Assemble the score record for one theme.
    ///
    /// `breadth_confirmed` comes from an upstream participation check;
    /// `stale_data` downgrades the tier one step.
    pub fn score(
        &self,
        theme: &Theme,
        heat: &HeatResult,
        lifecycle: &LifecycleResult,
        breadth_confirmed: bool,
        stale_data: bool,
        data_mode: DataMode,
    ) -> ThemeScore {
        let layers = ConfirmationLayers {
            quant_confirmed: Self::quant_confirmed(heat, lifecycle),
            breadth_confirmed,
            narrative_confirmed: false,
        };

        let mut confidence = ConfidenceTier::from_confirmations(layers.confirmed_count());
        if stale_data {
            confidence = confidence.downgraded();
        }

        ThemeScore {
            theme_heat: heat.theme_heat,
            heat_label: heat.heat_label,
            lifecycle_maturity: lifecycle.lifecycle_maturity,
            lifecycle_stage: lifecycle.lifecycle_stage,
            direction: theme.direction,
            confidence,
            data_mode,
            maturity_from_defaults: lifecycle.from_defaults,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use theme_core::{Direction, HeatLabel, Industry, NameConfidence, ThemeOrigin};

    fn create_test_theme(direction: Direction) -> Theme {
        let members = vec![Industry {
            name: "Semiconductors".to_string(),
            sector: Some("Technology".to_string()),
            perf_1w: Some(2.0),
            perf_1m: Some(5.0),
            perf_3m: Some(10.0),
            perf_6m: Some(15.0),
            weighted_return: 9.35,
            momentum_score: 67.0,
            direction,
            rank: 1,
            rank_direction: direction,
        }];

        Theme {
            theme_name: "AI & Semiconductors".to_string(),
            direction,
            sector_weights: Theme::sector_weights_of(&members),
            matching_industries: members,
            proxy_etfs: vec!["SMH".to_string()],
            static_stocks: Vec::new(),
            theme_origin: ThemeOrigin::Seed,
            name_confidence: NameConfidence::High,
            score: None,
        }
    }

    fn heat(value: f64) -> HeatResult {
        HeatResult {
            theme_heat: value,
            heat_label: HeatLabel::from_heat(value),
        }
    }

    fn lifecycle(maturity: f64) -> LifecycleResult {
        LifecycleResult {
            lifecycle_maturity: maturity,
            lifecycle_stage: theme_core::LifecycleStage::from_maturity(maturity),
            from_defaults: false,
        }
    }

    #[test]
    fn test_confidence_capped_at_medium() {
        let scorer = ThemeScorer::new();
        let theme = create_test_theme(Direction::Bullish);

        // Both automated layers confirmed; narrative never is.
        let score = scorer.score(
            &theme,
            &heat(85.0),
            &lifecycle(45.0),
            true,
            false,
            DataMode::Enriched,
        );

        assert_eq!(score.confidence, ConfidenceTier::Medium);
        assert_ne!(score.confidence, ConfidenceTier::High);
    }

    #[test]
    fn test_single_confirmation_is_low() {
        let scorer = ThemeScorer::new();
        let theme = create_test_theme(Direction::Bullish);

        let score = scorer.score(
            &theme,
            &heat(85.0),
            &lifecycle(45.0),
            false,
            false,
            DataMode::Enriched,
        );

        assert_eq!(score.confidence, ConfidenceTier::Low);
    }

    #[test]
    fn test_stale_data_downgrades_one_tier() {
        let scorer = ThemeScorer::new();
        let theme = create_test_theme(Direction::Bullish);

        let fresh = scorer.score(
            &theme,
            &heat(85.0),
            &lifecycle(45.0),
            true,
            false,
            DataMode::Enriched,
        );
        let stale = scorer.score(
            &theme,
            &heat(85.0),
            &lifecycle(45.0),
            true,
            true,
            DataMode::Enriched,
        );

        assert_eq!(fresh.confidence, ConfidenceTier::Medium);
        assert_eq!(stale.confidence, ConfidenceTier::Low);
    }

    #[test]
    fn test_quant_confirmation_requires_heat_and_room_to_run() {
        assert!(ThemeScorer::quant_confirmed(&heat(70.0), &lifecycle(45.0)));
        // Not enough heat.
        assert!(!ThemeScorer::quant_confirmed(&heat(40.0), &lifecycle(45.0)));
        // Exhausting trend no longer confirms.
        assert!(!ThemeScorer::quant_confirmed(&heat(70.0), &lifecycle(90.0)));
    }

    #[test]
    fn test_score_carries_theme_fields() {
        let scorer = ThemeScorer::new();
        let theme = create_test_theme(Direction::Bearish);

        let mut lc = lifecycle(15.0);
        lc.from_defaults = true;

        let score = scorer.score(
            &theme,
            &heat(30.0),
            &lc,
            false,
            false,
            DataMode::PerformanceOnly,
        );

        assert_eq!(score.direction, Direction::Bearish);
        assert_eq!(score.heat_label, HeatLabel::Cool);
        assert_eq!(score.lifecycle_stage, theme_core::LifecycleStage::Emerging);
        assert!(score.maturity_from_defaults);
        assert_eq!(score.data_mode, DataMode::PerformanceOnly);
    }
}
