//! Weighted and uniform sampling over region indices.

use rand::rngs::SmallRng;
use rand::Rng;

/// A mutable weighted distribution over region indices.
///
/// Sampling is proportional to weight via an inverse-CDF lookup on the
/// running prefix sums. Entries are only ever added or cleared wholesale;
/// the availability distribution is rebuilt each outer planning iteration,
/// so no removal or reweighting support is needed.
#[derive(Clone, Debug, Default)]
pub struct DiscreteDistribution {
    keys: Vec<usize>,
    cumulative: Vec<f64>,
    total: f64,
}

impl DiscreteDistribution {
    /// Create an empty distribution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key with a non-negative weight.
    pub fn add(&mut self, key: usize, weight: f64) {
        debug_assert!(weight >= 0.0);
        self.total += weight;
        self.keys.push(key);
        self.cumulative.push(self.total);
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.cumulative.clear();
        self.total = 0.0;
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check whether the distribution has no entries.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> &[usize] {
        &self.keys
    }

    /// Sample a key proportionally to weight, given `u` in `[0, 1)`.
    ///
    /// Sampling from an empty distribution is a caller bug; callers
    /// guarantee non-emptiness.
    pub fn sample(&self, u: f64) -> usize {
        debug_assert!(!self.is_empty());
        debug_assert!((0.0..1.0).contains(&u));
        let target = u * self.total;
        let idx = self.cumulative.partition_point(|&c| c <= target);
        self.keys[idx.min(self.keys.len() - 1)]
    }
}

/// A set of region indices supporting uniform sampling.
///
/// Used for the start and goal region sets, which are stable across a solve
/// and sampled with equal weight.
#[derive(Clone, Debug, Default)]
pub struct RegionSet {
    indices: Vec<usize>,
    members: std::collections::HashSet<usize>,
}

impl RegionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a region index, returning true if it was not yet present.
    pub fn insert(&mut self, region: usize) -> bool {
        if self.members.insert(region) {
            self.indices.push(region);
            true
        } else {
            false
        }
    }

    /// Check membership.
    pub fn contains(&self, region: usize) -> bool {
        self.members.contains(&region)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Members in insertion order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Remove all members.
    pub fn clear(&mut self) {
        self.indices.clear();
        self.members.clear();
    }

    /// Sample a member uniformly. The set must be non-empty.
    pub fn sample_uniform(&self, rng: &mut SmallRng) -> usize {
        debug_assert!(!self.is_empty());
        self.indices[rng.gen_range(0..self.indices.len())]
    }
}
