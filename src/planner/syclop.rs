//! The SYCLOP planner loop.

use crate::availability::compute_available_regions;
use crate::config::SyclopConfig;
use crate::core::{MotionId, MotionPath, PathStep};
use crate::coverage::CoverageGrid;
use crate::error::{Result, SyclopError};
use crate::estimates::{default_edge_cost, setup_region_estimates};
use crate::graph::{DecompositionGraph, EdgeCostFactor};
use crate::lead::build_lead;
use crate::sampling::{DiscreteDistribution, RegionSet};
use crate::space::{Decomposition, Goal, StateSpace, TreeExtender};
use log::{debug, error, info, trace, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::types::{ProblemDefinition, SolveFailure, SolveResult, SolveStatus};

/// Decomposition-guided meta-planner.
///
/// SYCLOP interleaves two layers: a discrete layer that repeatedly computes
/// a lead (a corridor of adjacent regions from the start region to the goal
/// region) over the decomposition graph, and a continuous layer that grows a
/// control tree through the extender, focused on regions along the lead.
/// Coverage and connection feedback from the tree reshapes the edge costs
/// that the next lead is computed from.
///
/// The planner is single-threaded; the caller-supplied termination predicate
/// is polled between region expansions, tree selections, and produced
/// motions, so cancellation takes effect within one tree-selection quantum.
pub struct Syclop<SP, D, E>
where
    SP: StateSpace,
    D: Decomposition<SP::State>,
    E: TreeExtender<State = SP::State>,
{
    space: SP,
    decomp: D,
    extender: E,
    config: SyclopConfig,
    graph: DecompositionGraph,
    cov_grid: CoverageGrid,
    edge_cost_factors: Vec<EdgeCostFactor>,
    lead: Vec<usize>,
    avail: DiscreteDistribution,
    start_regions: RegionSet,
    goal_regions: RegionSet,
    rng: SmallRng,
    seed: u64,
    is_setup: bool,
    graph_ready: bool,
    starts_consumed: usize,
    num_motions: usize,
    coords: Vec<f64>,
}

impl<SP, D, E> Syclop<SP, D, E>
where
    SP: StateSpace,
    D: Decomposition<SP::State>,
    E: TreeExtender<State = SP::State>,
{
    /// Create a planner. The default edge cost factor is installed; call
    /// [`setup`](Self::setup) (or let the first solve do it) before solving.
    pub fn new(space: SP, decomp: D, extender: E, config: SyclopConfig) -> Self {
        let seed = config
            .seed
            .unwrap_or_else(|| SmallRng::from_entropy().gen());
        let cov_grid = CoverageGrid::new(decomp.project_bounds(), config.cov_grid_length);
        Self {
            space,
            decomp,
            extender,
            config,
            graph: DecompositionGraph::default(),
            cov_grid,
            edge_cost_factors: vec![Box::new(default_edge_cost)],
            lead: Vec::new(),
            avail: DiscreteDistribution::new(),
            start_regions: RegionSet::new(),
            goal_regions: RegionSet::new(),
            rng: SmallRng::seed_from_u64(seed),
            seed,
            is_setup: false,
            graph_ready: false,
            starts_consumed: 0,
            num_motions: 0,
            coords: Vec::new(),
        }
    }

    /// Validate the configuration and build the decomposition graph.
    pub fn setup(&mut self) -> Result<()> {
        self.config.validate()?;
        if self.decomp.num_regions() == 0 {
            return Err(SyclopError::Decomposition(
                "decomposition has no regions".into(),
            ));
        }
        self.graph = DecompositionGraph::build(&self.decomp);
        self.graph_ready = false;
        self.is_setup = true;
        debug!(
            "[Syclop] graph built: {} regions, {} directed edges",
            self.graph.num_regions(),
            self.graph.num_edges()
        );
        Ok(())
    }

    /// Reset all tree-derived state: motions, leads, availability, region
    /// and edge estimates, and the start/goal region sets. The RNG is
    /// re-seeded, so a cleared planner replays like a fresh one.
    pub fn clear(&mut self) {
        self.lead.clear();
        self.avail.clear();
        self.start_regions.clear();
        self.goal_regions.clear();
        self.graph.clear_details();
        self.graph_ready = false;
        self.starts_consumed = 0;
        self.num_motions = 0;
        self.extender.clear();
        self.rng = SmallRng::seed_from_u64(self.seed);
    }

    /// Register an additional edge cost factor. The edge cost is the product
    /// of all registered factors; each factor must return a strictly
    /// positive value. Takes effect when edges are next updated.
    pub fn add_edge_cost_factor(&mut self, factor: EdgeCostFactor) {
        self.edge_cost_factors.push(factor);
    }

    /// Remove all user-registered cost factors, restoring the default factor
    /// alone.
    pub fn clear_edge_cost_factors(&mut self) {
        self.edge_cost_factors = vec![Box::new(default_edge_cost)];
    }

    /// Run the planning loop until the termination predicate returns true or
    /// a motion satisfies the goal.
    ///
    /// Missing or invalid inputs (no valid start states, no samplable goal
    /// state) are reported through [`SolveStatus::Failed`], not as errors;
    /// the caller may add states and solve again. Repeated solves continue
    /// from prior estimates unless [`clear`](Self::clear) is called.
    pub fn solve<G: Goal<SP::State>>(
        &mut self,
        problem: &mut ProblemDefinition<SP::State, G>,
        mut terminate: impl FnMut() -> bool,
    ) -> Result<SolveResult<SP::State, E::Control>> {
        if !self.is_setup {
            self.setup()?;
        }

        if !self.graph_ready {
            self.num_motions = 0;
            setup_region_estimates(
                &mut self.graph,
                &self.space,
                &self.decomp,
                self.config.num_free_vol_samples,
                &mut self.rng,
            );
            self.graph.setup_edge_estimates(&self.edge_cost_factors);
            self.graph_ready = true;
        }

        let motions_at_start = self.num_motions;

        // Seed roots from start states not consumed by earlier solves.
        while self.starts_consumed < problem.starts.len() {
            let state = problem.starts[self.starts_consumed].clone();
            self.starts_consumed += 1;
            if !self.space.is_valid(&state) {
                warn!("[Syclop] skipping invalid start state");
                continue;
            }
            let region = self.decomp.locate_region(&state);
            let cell = self.cov_cell(&state);
            self.start_regions.insert(region);
            let id = self.extender.add_root(state);
            let r = self.graph.region_mut(region);
            r.motions.push(id);
            r.insert_cov_cell(cell);
            self.num_motions += 1;
        }
        if self.start_regions.is_empty() {
            error!("[Syclop] there are no valid start states");
            return Ok(SolveResult::failed(SolveFailure::NoValidStartStates));
        }

        // At least one goal sample is needed to identify a goal region.
        if self.goal_regions.is_empty() {
            match problem.goal.sample_goal() {
                Some(g) => {
                    let region = self.decomp.locate_region(&g);
                    self.goal_regions.insert(region);
                }
                None => {
                    error!("[Syclop] unable to sample a valid goal state");
                    let mut result = SolveResult::failed(SolveFailure::NoGoalStates);
                    result.motions_created = self.num_motions - motions_at_start;
                    return Ok(result);
                }
            }
        }

        info!("[Syclop] starting with {} motions", self.num_motions);

        let mut new_motions: Vec<MotionId> = Vec::new();
        let mut solution: Option<MotionId> = None;
        let mut goal_dist = f64::INFINITY;
        let mut solved = false;
        let mut leads_built = 0usize;

        while !terminate() && !solved {
            let start_region = self.start_regions.sample_uniform(&mut self.rng);
            let goal_region = match problem.goal.sample_goal() {
                Some(g) => {
                    debug!("[Syclop] sampling another goal state");
                    let region = self.decomp.locate_region(&g);
                    self.goal_regions.insert(region);
                    region
                }
                None => self.goal_regions.sample_uniform(&mut self.rng),
            };

            {
                let decomp = &self.decomp;
                build_lead(
                    &mut self.graph,
                    &self.edge_cost_factors,
                    self.config.prob_shortest_path,
                    &mut self.rng,
                    start_region,
                    goal_region,
                    |r| decomp.heuristic(r, goal_region),
                    &mut self.lead,
                );
            }
            if !self.lead.is_empty() {
                leads_built += 1;
            }

            compute_available_regions(
                &self.graph,
                &self.lead,
                self.config.prob_keep_adding_to_avail,
                &mut self.rng,
                &mut self.avail,
            );
            if self.avail.is_empty() {
                // No lead, or no motions along it; try another lead.
                continue;
            }

            for _ in 0..self.config.num_region_expansions {
                if solved || terminate() {
                    break;
                }
                let region_index = self.select_region();
                let mut improved = false;

                for _ in 0..self.config.num_tree_selections {
                    if solved || terminate() {
                        break;
                    }
                    new_motions.clear();
                    self.extender.select_and_extend(
                        self.graph.region(region_index),
                        &mut self.rng,
                        &mut new_motions,
                    );

                    for &motion_id in new_motions.iter() {
                        let state = self.extender.motion(motion_id).state.clone();
                        let (satisfied, distance) = problem.goal.is_satisfied(&state);
                        if satisfied {
                            goal_dist = distance;
                            solution = Some(motion_id);
                            solved = true;
                        } else if distance < goal_dist {
                            goal_dist = distance;
                            solution = Some(motion_id);
                        }

                        let new_region = self.decomp.locate_region(&state);
                        let cell = self.cov_cell(&state);
                        {
                            let r = self.graph.region_mut(new_region);
                            r.motions.push(motion_id);
                            improved |= r.insert_cov_cell(cell);
                        }
                        self.num_motions += 1;

                        if new_region != region_index {
                            // First motion to enter a region makes it
                            // available for selection under the current lead.
                            if self.graph.region(new_region).motions.len() == 1 {
                                let weight = self.graph.region(new_region).weight;
                                self.avail.add(new_region, weight);
                            }
                            // Connection estimates are kept for neighboring
                            // regions only; the lead computation never
                            // reasons about non-adjacent transitions.
                            if let Some(edge) =
                                self.graph.edge_between(region_index, new_region)
                            {
                                let adj = self.graph.adjacency_mut(edge);
                                adj.empty = false;
                                adj.num_selections += 1;
                                if adj.insert_cov_cell(cell) {
                                    self.graph
                                        .update_edge_cost(edge, &self.edge_cost_factors);
                                    improved = true;
                                }
                            }
                        }

                        if solved || terminate() {
                            break;
                        }
                    }
                }

                if !improved && self.rng.gen::<f64>() < self.config.prob_abandon_lead_early {
                    trace!("[Syclop] abandoning lead early");
                    break;
                }
            }
        }

        let motions_created = self.num_motions - motions_at_start;
        let Some(leaf) = solution else {
            return Ok(SolveResult {
                status: SolveStatus::Failed(SolveFailure::Terminated),
                path: None,
                goal_distance: goal_dist,
                motions_created,
                leads_built,
            });
        };

        // Walk back to the root, then emit the path root-to-leaf.
        let mut chain = vec![leaf];
        let mut current = leaf;
        while let Some(parent) = self.extender.motion(current).parent {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        let steps = chain
            .iter()
            .map(|&id| {
                let m = self.extender.motion(id);
                PathStep {
                    state: m.state.clone(),
                    control: m.control.clone(),
                    steps: m.steps,
                }
            })
            .collect();

        debug!(
            "[Syclop] {} solution, goal distance {:.4}, {} motions",
            if solved { "exact" } else { "approximate" },
            goal_dist,
            motions_created
        );

        Ok(SolveResult {
            status: if solved {
                SolveStatus::Exact
            } else {
                SolveStatus::Approximate
            },
            path: Some(MotionPath { steps }),
            goal_distance: goal_dist,
            motions_created,
            leads_built,
        })
    }

    /// Sample a region from the availability distribution and count the
    /// selection.
    fn select_region(&mut self) -> usize {
        let u = self.rng.gen::<f64>();
        let index = self.avail.sample(u);
        let region = self.graph.region_mut(index);
        region.num_selections += 1;
        region.update_weights();
        index
    }

    /// Coverage cell of a state's projection.
    fn cov_cell(&mut self, state: &SP::State) -> u64 {
        self.decomp.project(state, &mut self.coords);
        self.cov_grid.cell_of(&self.coords)
    }

    /// The planner configuration.
    pub fn config(&self) -> &SyclopConfig {
        &self.config
    }

    /// The decomposition graph with its current estimates.
    pub fn graph(&self) -> &DecompositionGraph {
        &self.graph
    }

    /// The most recently computed lead.
    pub fn lead(&self) -> &[usize] {
        &self.lead
    }

    /// The availability distribution of the current lead.
    pub fn availability(&self) -> &DiscreteDistribution {
        &self.avail
    }

    /// Regions containing start states.
    pub fn start_regions(&self) -> &RegionSet {
        &self.start_regions
    }

    /// Regions containing goal states.
    pub fn goal_regions(&self) -> &RegionSet {
        &self.goal_regions
    }

    /// The tree extender.
    pub fn extender(&self) -> &E {
        &self.extender
    }

    /// Motions recorded in regions so far.
    pub fn num_motions(&self) -> usize {
        self.num_motions
    }

    /// The resolved RNG seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
