//! Theme Classifier Module
//!
//! Matches ranked industries against the seed theme catalog and detects
//! single-sector concentration ("vertical") themes. Classification only
//! looks at the extremes of the ranking, never the full universe.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use theme_core::{Industry, NameConfidence, Theme, ThemeCatalog, ThemeOrigin};

/// Classifier configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// How many industries from each end of the ranking to consider
    pub top_n: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { top_n: 30 }
    }
}

/// The slice of the ranking that classification operates on.
#[derive(Debug, Clone)]
pub struct ActiveWindow {
    /// Best-ranked `top_n` industries, in rank order
    pub top: Vec<Industry>,
    /// Worst-ranked `top_n` industries, in rank order
    pub bottom: Vec<Industry>,
}

impl ActiveWindow {
    /// Build the window from a ranked universe.
    pub fn from_ranked(ranked: &[Industry], top_n: usize) -> Self {
        let mut ordered: Vec<Industry> = ranked.to_vec();
        ordered.sort_by_key(|i| i.rank);

        let take = top_n.min(ordered.len());
        let top = ordered[..take].to_vec();
        let bottom = ordered[ordered.len() - take..].to_vec();
        Self { top, bottom }
    }

    /// Both slices merged, deduplicated by name. On a small universe the
    /// slices overlap; the top-slice copy wins.
    pub fn active_set(&self) -> Vec<&Industry> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut merged = Vec::new();
        for industry in self.top.iter().chain(self.bottom.iter()) {
            if seen.insert(industry.name.as_str()) {
                merged.push(industry);
            }
        }
        merged
    }

    /// Bottom-slice industries not also present in the top slice.
    pub fn bottom_excluding_top(&self) -> Vec<&Industry> {
        let top_names: BTreeSet<&str> = self.top.iter().map(|i| i.name.as_str()).collect();
        self.bottom
            .iter()
            .filter(|i| !top_names.contains(i.name.as_str()))
            .collect()
    }
}

/// Output of one classification pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Seed themes followed by vertical themes
    pub themes: Vec<Theme>,
    /// Every industry name claimed by any emitted theme. The discoverer
    /// must never reconsider these.
    pub matched_names: BTreeSet<String>,
}

/// Matches ranked industries against catalog themes and sector verticals.
pub struct ThemeClassifier {
    catalog: ThemeCatalog,
    config: ClassifierConfig,
}

impl ThemeClassifier {
    /// Create a classifier with the default window size
    pub fn new(catalog: ThemeCatalog) -> Self {
        Self {
            catalog,
            config: ClassifierConfig::default(),
        }
    }

    /// Create a classifier with a custom window size
    pub fn with_config(catalog: ThemeCatalog, config: ClassifierConfig) -> Self {
        Self { catalog, config }
    }

    /// Classify a ranked universe into seed and vertical themes.
    ///
    /// Seed and vertical themes may overlap in membership; no dedup is
    /// performed at this stage.
    pub fn classify(&self, ranked: &[Industry]) -> ClassificationResult {
        let window = ActiveWindow::from_ranked(ranked, self.config.top_n);

        let mut themes = self.match_seed_themes(&window);
        themes.extend(self.match_vertical_themes(&window));

        let matched_names: BTreeSet<String> = themes
            .iter()
            .flat_map(|t| t.matching_industries.iter().map(|i| i.name.clone()))
            .collect();

        tracing::debug!(
            themes = themes.len(),
            matched_industries = matched_names.len(),
            "classification pass complete"
        );

        ClassificationResult {
            themes,
            matched_names,
        }
    }

    /// Seed matching: a catalog theme fires when enough of its keywords
    /// appear as industry names in the active window.
    fn match_seed_themes(&self, window: &ActiveWindow) -> Vec<Theme> {
        let active = window.active_set();
        let mut themes = Vec::new();

        for def in &self.catalog.themes {
            let members: Vec<Industry> = active
                .iter()
                .filter(|i| def.keywords.iter().any(|k| k == &i.name))
                .map(|i| (*i).clone())
                .collect();

            if members.len() < self.catalog.cross_sector_min_matches {
                continue;
            }

            themes.push(Theme {
                theme_name: def.name.clone(),
                direction: Theme::majority_direction(&members),
                sector_weights: Theme::sector_weights_of(&members),
                matching_industries: members,
                proxy_etfs: def.proxy_etfs.clone(),
                static_stocks: def.static_stocks.clone(),
                theme_origin: ThemeOrigin::Seed,
                name_confidence: NameConfidence::High,
                score: None,
            });
        }

        themes
    }

    /// Vertical matching: sector concentration within the top slice, then
    /// within the bottom slice restricted to names not already counted in
    /// the top slice.
    fn match_vertical_themes(&self, window: &ActiveWindow) -> Vec<Theme> {
        let mut themes = self.verticals_in(window.top.iter().collect());
        themes.extend(self.verticals_in(window.bottom_excluding_top()));
        themes
    }

    fn verticals_in(&self, slice: Vec<&Industry>) -> Vec<Theme> {
        let mut by_sector: BTreeMap<&str, Vec<&Industry>> = BTreeMap::new();
        for industry in slice {
            if let Some(sector) = &industry.sector {
                by_sector.entry(sector.as_str()).or_default().push(industry);
            }
        }

        by_sector
            .into_iter()
            .filter(|(_, members)| members.len() >= self.catalog.vertical_min_industries)
            .map(|(sector, members)| {
                let members: Vec<Industry> = members.into_iter().cloned().collect();
                Theme {
                    theme_name: format!("{} Sector Concentration", sector),
                    direction: Theme::majority_direction(&members),
                    sector_weights: Theme::sector_weights_of(&members),
                    matching_industries: members,
                    proxy_etfs: Vec::new(),
                    static_stocks: Vec::new(),
                    theme_origin: ThemeOrigin::Vertical,
                    name_confidence: NameConfidence::High,
                    score: None,
                }
            })
            .collect()
    }
}
