//! Decomposition graph: regions as vertices, adjacencies as directed edges.
//!
//! Built once per setup by asking the decomposition for every region's
//! neighbors. Each undirected adjacency is stored as two directed edges so
//! selection counts and coverage can differ per direction, and a dense
//! `(source, target)` index maps region pairs back to edges.

mod types;

pub use types::{Adjacency, EdgeContext, EdgeCostFactor, Region, FREE_VOLUME_EPSILON};

use crate::space::Decomposition;
use std::collections::HashMap;

/// Graph over the decomposition's regions.
#[derive(Debug, Default)]
pub struct DecompositionGraph {
    regions: Vec<Region>,
    adjacencies: Vec<Adjacency>,
    /// Outgoing edges per region: `(target region, edge index)`.
    neighbors: Vec<Vec<(usize, usize)>>,
    edge_index: HashMap<(usize, usize), usize>,
}

impl DecompositionGraph {
    /// Build the graph from a decomposition's regions and neighbor relation.
    pub fn build<S, D: Decomposition<S>>(decomp: &D) -> Self {
        let n = decomp.num_regions();
        let mut graph = Self {
            regions: (0..n).map(Region::new).collect(),
            adjacencies: Vec::new(),
            neighbors: vec![Vec::new(); n],
            edge_index: HashMap::new(),
        };

        let mut buf = Vec::new();
        for u in 0..n {
            decomp.neighbors(u, &mut buf);
            for &v in &buf {
                graph.add_edge(u, v);
            }
        }
        graph
    }

    fn add_edge(&mut self, source: usize, target: usize) {
        if source == target || self.edge_index.contains_key(&(source, target)) {
            return;
        }
        let edge = self.adjacencies.len();
        self.adjacencies.push(Adjacency::new(source, target));
        self.neighbors[source].push((target, edge));
        self.edge_index.insert((source, target), edge);
    }

    /// Number of regions.
    pub fn num_regions(&self) -> usize {
        self.regions.len()
    }

    /// Number of directed edges.
    pub fn num_edges(&self) -> usize {
        self.adjacencies.len()
    }

    /// Read a region.
    pub fn region(&self, index: usize) -> &Region {
        &self.regions[index]
    }

    /// Mutate a region.
    pub fn region_mut(&mut self, index: usize) -> &mut Region {
        &mut self.regions[index]
    }

    /// All regions.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Read an edge.
    pub fn adjacency(&self, edge: usize) -> &Adjacency {
        &self.adjacencies[edge]
    }

    /// Mutate an edge.
    pub fn adjacency_mut(&mut self, edge: usize) -> &mut Adjacency {
        &mut self.adjacencies[edge]
    }

    /// All edges.
    pub fn adjacencies(&self) -> &[Adjacency] {
        &self.adjacencies
    }

    /// Edge index for a directed region pair, if the regions are adjacent.
    pub fn edge_between(&self, source: usize, target: usize) -> Option<usize> {
        self.edge_index.get(&(source, target)).copied()
    }

    /// Outgoing `(target region, edge index)` pairs of a region.
    pub fn neighbors_of(&self, region: usize) -> &[(usize, usize)] {
        &self.neighbors[region]
    }

    /// Recompute one edge's cost as the product of the given factors,
    /// clamped strictly positive.
    pub fn update_edge_cost(&mut self, edge: usize, factors: &[EdgeCostFactor]) {
        let cost = {
            let adj = &self.adjacencies[edge];
            let ctx = EdgeContext {
                source: &self.regions[adj.source],
                target: &self.regions[adj.target],
                adjacency: adj,
            };
            factors.iter().map(|f| f(&ctx)).product::<f64>()
        };
        self.adjacencies[edge].cost = cost.max(f64::MIN_POSITIVE);
    }

    /// Reset all edges to their initial empty state and compute their costs
    /// from the given factors.
    pub fn setup_edge_estimates(&mut self, factors: &[EdgeCostFactor]) {
        for edge in 0..self.adjacencies.len() {
            self.adjacencies[edge].clear();
            self.update_edge_cost(edge, factors);
        }
    }

    /// Reset all tree-derived region and edge state. Volume estimates are
    /// recomputed by the next estimation pass.
    pub fn clear_details(&mut self) {
        for region in &mut self.regions {
            region.clear();
        }
        for adjacency in &mut self.adjacencies {
            adjacency.clear();
        }
    }
}
