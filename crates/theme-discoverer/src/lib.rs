//! Theme Discoverer Module
//!
//! Clusters industries not claimed by the classifier into new, unnamed
//! themes. Clustering is a single-linkage chain walk over the ranking:
//! only consecutive pairs in weighted-return order are compared, never
//! all pairs and never a centroid.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use theme_classifier::ActiveWindow;
use theme_core::{Direction, Industry, NameConfidence, Theme, ThemeOrigin};

/// Generic industry-taxonomy words that never name a cluster.
const STOP_WORDS: &[&str] = &[
    "industry",
    "industries",
    "sector",
    "sectors",
    "services",
    "service",
    "general",
    "specialty",
    "diversified",
    "misc",
    "miscellaneous",
    "other",
    "products",
    "equipment",
    "goods",
    "companies",
    "related",
];

/// Discoverer configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DiscovererConfig {
    /// Window size at each end of the ranking
    pub top_n: usize,
    /// Max weighted-return gap (percent) between consecutive members
    pub gap_threshold: f64,
    /// Max range-normalized distance between consecutive members
    pub vector_threshold: f64,
    /// Clusters smaller than this are dropped
    pub min_cluster_size: usize,
}

impl Default for DiscovererConfig {
    fn default() -> Self {
        Self {
            top_n: 30,
            gap_threshold: 3.0,
            vector_threshold: 0.5,
            min_cluster_size: 2,
        }
    }
}

/// Finds co-moving groups among industries no existing theme claimed.
pub struct ThemeDiscoverer {
    config: DiscovererConfig,
}

impl Default for ThemeDiscoverer {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeDiscoverer {
    /// Create a discoverer with default thresholds
    pub fn new() -> Self {
        Self {
            config: DiscovererConfig::default(),
        }
    }

    /// Create a discoverer with custom thresholds
    pub fn with_config(config: DiscovererConfig) -> Self {
        Self { config }
    }

    /// Discover new themes among unmatched industries.
    ///
    /// `matched_names` are industry names already claimed by the
    /// classifier; they are never reconsidered. Candidate clusters that
    /// near-duplicate an `existing_themes` entry with the same direction
    /// (Jaccard >= 0.5 over member names) are discarded.
    pub fn discover(
        &self,
        ranked: &[Industry],
        matched_names: &BTreeSet<String>,
        existing_themes: &[Theme],
    ) -> Vec<Theme> {
        let window = ActiveWindow::from_ranked(ranked, self.config.top_n);

        let bullish_pool: Vec<&Industry> = window
            .top
            .iter()
            .filter(|i| !matched_names.contains(&i.name) && i.direction == Direction::Bullish)
            .collect();
        let bearish_pool: Vec<&Industry> = window
            .bottom_excluding_top()
            .into_iter()
            .filter(|i| !matched_names.contains(&i.name) && i.direction == Direction::Bearish)
            .collect();

        tracing::debug!(
            bullish_pool = bullish_pool.len(),
            bearish_pool = bearish_pool.len(),
            "discovery candidate pools built"
        );

        let mut themes = self.discover_in_pool(bullish_pool, existing_themes);
        themes.extend(self.discover_in_pool(bearish_pool, existing_themes));
        themes
    }

    /// Cluster one direction-homogeneous pool and keep the survivors.
    fn discover_in_pool(&self, pool: Vec<&Industry>, existing_themes: &[Theme]) -> Vec<Theme> {
        self.chain_clusters(pool)
            .into_iter()
            .filter(|cluster| cluster.len() >= self.config.min_cluster_size)
            .filter(|cluster| !self.duplicates_existing(cluster, existing_themes))
            .map(|cluster| {
                let members: Vec<Industry> = cluster.into_iter().cloned().collect();
                Theme {
                    theme_name: name_cluster(&members),
                    direction: Theme::majority_direction(&members),
                    sector_weights: Theme::sector_weights_of(&members),
                    matching_industries: members,
                    proxy_etfs: Vec::new(),
                    static_stocks: Vec::new(),
                    theme_origin: ThemeOrigin::Discovered,
                    name_confidence: NameConfidence::Medium,
                    score: None,
                }
            })
            .collect()
    }

    /// Single-linkage chain clustering: walk the pool in weighted-return
    /// order; an industry joins the current cluster only if both the gap
    /// and the vector conditions hold against its immediate predecessor.
    /// Members two steps apart may be arbitrarily far from each other.
    fn chain_clusters<'a>(&self, mut pool: Vec<&'a Industry>) -> Vec<Vec<&'a Industry>> {
        if pool.is_empty() {
            return Vec::new();
        }

        pool.sort_by(|a, b| {
            b.weighted_return
                .partial_cmp(&a.weighted_return)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });

        let ranges = field_ranges(&pool);

        let mut clusters: Vec<Vec<&Industry>> = Vec::new();
        let mut current = vec![pool[0]];

        for pair in pool.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            let gap = (prev.weighted_return - next.weighted_return).abs();
            let distance = normalized_distance(prev, next, &ranges);

            if gap <= self.config.gap_threshold && distance <= self.config.vector_threshold {
                current.push(next);
            } else {
                clusters.push(std::mem::replace(&mut current, vec![next]));
            }
        }
        clusters.push(current);

        clusters
    }

    fn duplicates_existing(&self, cluster: &[&Industry], existing_themes: &[Theme]) -> bool {
        let names: BTreeSet<String> = cluster.iter().map(|i| i.name.clone()).collect();
        let direction = Theme::majority_direction(
            &cluster.iter().map(|i| (*i).clone()).collect::<Vec<_>>(),
        );

        existing_themes.iter().any(|theme| {
            theme.direction == direction && jaccard(&names, &theme.member_names()) >= 0.5
        })
    }
}

/// Per-field min-to-max spread of the short-horizon vectors over a pool.
fn field_ranges(pool: &[&Industry]) -> [f64; 3] {
    let mut ranges = [0.0_f64; 3];
    for field in 0..3 {
        let values = pool.iter().map(|i| i.short_horizon_vector()[field]);
        let min = values.clone().fold(f64::INFINITY, f64::min);
        let max = values.fold(f64::NEG_INFINITY, f64::max);
        ranges[field] = max - min;
    }
    ranges
}

/// Euclidean distance over the short-horizon vectors, each component
/// divided by that field's range across the pool (0 when the range is 0).
fn normalized_distance(a: &Industry, b: &Industry, ranges: &[f64; 3]) -> f64 {
    let va = a.short_horizon_vector();
    let vb = b.short_horizon_vector();
    let sum: f64 = (0..3)
        .map(|field| {
            if ranges[field] == 0.0 {
                0.0
            } else {
                ((va[field] - vb[field]) / ranges[field]).powi(2)
            }
        })
        .sum();
    sum.sqrt()
}

/// Set-similarity used for duplicate detection.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Name a cluster from the most frequent tokens in its member names.
/// Tokens are counted case-insensitively, matching the stop-word check;
/// the first-seen casing is kept for display.
fn name_cluster(members: &[Industry]) -> String {
    let mut counts: BTreeMap<String, (String, usize)> = BTreeMap::new();
    for industry in members {
        for raw in industry.name.split_whitespace() {
            let token = raw.trim_matches(|c: char| !c.is_alphanumeric());
            if token.is_empty() {
                continue;
            }
            let folded = token.to_lowercase();
            if STOP_WORDS.contains(&folded.as_str()) {
                continue;
            }
            let entry = counts
                .entry(folded)
                .or_insert_with(|| (token.to_string(), 0));
            entry.1 += 1;
        }
    }

    // Most frequent first, alphabetical on ties.
    let mut tokens: Vec<(String, usize)> = counts.into_values().collect();
    tokens.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    match tokens.len() {
        0 => "Unknown Cluster".to_string(),
        1 => format!("{} Related", tokens[0].0),
        _ => format!("{} & {} Related", tokens[0].0, tokens[1].0),
    }
}
