//! Planner configuration.

use crate::error::{Result, SyclopError};
use serde::Deserialize;
use std::path::Path;

/// Configuration for the [`Syclop`](crate::Syclop) planner.
///
/// All probabilities must lie in `[0, 1]` and all counts must be at least 1;
/// [`validate`](SyclopConfig::validate) is run during planner setup and
/// reports violations as fatal configuration errors.
#[derive(Clone, Debug, Deserialize)]
pub struct SyclopConfig {
    /// Probability of computing the lead with a shortest-path search instead
    /// of a randomized depth-first search (default: 0.95)
    #[serde(default = "default_prob_shortest_path")]
    pub prob_shortest_path: f64,

    /// Per-step continuation probability while walking the lead from the
    /// goal end when building the availability distribution (default: 0.95)
    #[serde(default = "default_prob_keep_adding_to_avail")]
    pub prob_keep_adding_to_avail: f64,

    /// Probability of abandoning the current lead early when a region
    /// expansion round yields no coverage or connection gain (default: 0.25)
    #[serde(default = "default_prob_abandon_lead_early")]
    pub prob_abandon_lead_early: f64,

    /// Number of region selections performed per lead (default: 100)
    #[serde(default = "default_num_region_expansions")]
    pub num_region_expansions: usize,

    /// Number of tree extensions performed per region selection (default: 50)
    #[serde(default = "default_num_tree_selections")]
    pub num_tree_selections: usize,

    /// Number of uniform state samples drawn for free-volume estimation
    /// (default: 100 000)
    #[serde(default = "default_num_free_vol_samples")]
    pub num_free_vol_samples: usize,

    /// Coverage-grid cells per projection dimension (default: 128)
    #[serde(default = "default_cov_grid_length")]
    pub cov_grid_length: usize,

    /// RNG seed; drawn from entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SyclopConfig {
    fn default() -> Self {
        Self {
            prob_shortest_path: default_prob_shortest_path(),
            prob_keep_adding_to_avail: default_prob_keep_adding_to_avail(),
            prob_abandon_lead_early: default_prob_abandon_lead_early(),
            num_region_expansions: default_num_region_expansions(),
            num_tree_selections: default_num_tree_selections(),
            num_free_vol_samples: default_num_free_vol_samples(),
            cov_grid_length: default_cov_grid_length(),
            seed: None,
        }
    }
}

// Default value functions
fn default_prob_shortest_path() -> f64 {
    0.95
}
fn default_prob_keep_adding_to_avail() -> f64 {
    0.95
}
fn default_prob_abandon_lead_early() -> f64 {
    0.25
}
fn default_num_region_expansions() -> usize {
    100
}
fn default_num_tree_selections() -> usize {
    50
}
fn default_num_free_vol_samples() -> usize {
    100_000
}
fn default_cov_grid_length() -> usize {
    128
}

impl SyclopConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SyclopError::Config(format!("Failed to read config file: {}", e)))?;
        let config: SyclopConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Builder-style setter for the shortest-path probability.
    pub fn with_prob_shortest_path(mut self, p: f64) -> Self {
        self.prob_shortest_path = p;
        self
    }

    /// Builder-style setter for the availability continuation probability.
    pub fn with_prob_keep_adding_to_avail(mut self, p: f64) -> Self {
        self.prob_keep_adding_to_avail = p;
        self
    }

    /// Builder-style setter for the early-abandon probability.
    pub fn with_prob_abandon_lead_early(mut self, p: f64) -> Self {
        self.prob_abandon_lead_early = p;
        self
    }

    /// Builder-style setter for region selections per lead.
    pub fn with_num_region_expansions(mut self, n: usize) -> Self {
        self.num_region_expansions = n;
        self
    }

    /// Builder-style setter for tree extensions per region selection.
    pub fn with_num_tree_selections(mut self, n: usize) -> Self {
        self.num_tree_selections = n;
        self
    }

    /// Builder-style setter for free-volume sample count.
    pub fn with_num_free_vol_samples(mut self, n: usize) -> Self {
        self.num_free_vol_samples = n;
        self
    }

    /// Builder-style setter for coverage-grid granularity.
    pub fn with_cov_grid_length(mut self, n: usize) -> Self {
        self.cov_grid_length = n;
        self
    }

    /// Builder-style setter for the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that all parameters are usable.
    pub fn validate(&self) -> Result<()> {
        for (name, p) in [
            ("prob_shortest_path", self.prob_shortest_path),
            ("prob_keep_adding_to_avail", self.prob_keep_adding_to_avail),
            ("prob_abandon_lead_early", self.prob_abandon_lead_early),
        ] {
            if !(0.0..=1.0).contains(&p) || !p.is_finite() {
                return Err(SyclopError::Config(format!(
                    "{} must lie in [0, 1], got {}",
                    name, p
                )));
            }
        }
        for (name, n) in [
            ("num_region_expansions", self.num_region_expansions),
            ("num_tree_selections", self.num_tree_selections),
            ("num_free_vol_samples", self.num_free_vol_samples),
            ("cov_grid_length", self.cov_grid_length),
        ] {
            if n == 0 {
                return Err(SyclopError::Config(format!(
                    "{} must be at least 1",
                    name
                )));
            }
        }
        Ok(())
    }
}
