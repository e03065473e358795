// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # GRASP Construction
//!
//! `GraspConstructive` builds a feasible solution in three steps.
//!
//! ## 1. Demand merging
//!
//! Terminal pairs that share an endpoint describe one connectivity demand.
//! The endpoints of all pairs are united in a throwaway DSU and grouped by
//! their root; groups of a single node need no edge and are dropped.
//!
//! ## 2. Pair generation
//!
//! Each group is turned into a spanning set of pairs: a random pivot is
//! removed from the group and paired with a random remaining node, until at
//! most one node is left.
//!
//! ## 3. Restricted candidate list
//!
//! Every round, the shortest-path cost of each open pair is measured on a
//! private working copy of the graph and the pairs are sorted by it. The next
//! pair is drawn uniformly from the cheapest `max(1, floor(|CL| * alpha))`
//! entries, so `alpha = 0` is greedy and `alpha = 1` is uniformly random.
//! The chosen path is added to the solution with the original edge weights,
//! and its edges are set to weight zero on the working graph so that later
//! pairs are drawn towards the infrastructure already built.

use crate::heuristic::ConstructiveHeuristic;
use rand::Rng;
use std::cmp::Ordering;
use steiner_core::{
    dsu::DisjointSetUnion, num::SteinerWeight, shortest_path::ShortestPathEngine,
    utils::index::NodeIndex,
};
use steiner_model::{
    moves::Move,
    problem::{Problem, TerminalPair},
    solution::Solution,
};

/// The greediness parameter was outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidAlpha(pub f64);

impl std::fmt::Display for InvalidAlpha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "alpha must be in [0, 1], got {}", self.0)
    }
}

impl std::error::Error for InvalidAlpha {}

/// Randomized greedy construction with a restricted candidate list.
///
/// # Examples
///
/// ```rust
/// # use steiner_grasp::{constructive::GraspConstructive, heuristic::ConstructiveHeuristic};
/// # use steiner_model::problem::ProblemBuilder;
/// # use steiner_core::{dsu::DisjointSetUnion, utils::index::NodeIndex};
/// # use rand::SeedableRng;
/// let mut builder = ProblemBuilder::<f64>::new(3);
/// builder
///     .add_edge(NodeIndex::new(0), NodeIndex::new(1), 2.0)
///     .add_edge(NodeIndex::new(1), NodeIndex::new(2), 3.0)
///     .add_edge(NodeIndex::new(0), NodeIndex::new(2), 9.0)
///     .add_terminal_pair(NodeIndex::new(0), NodeIndex::new(2));
/// let problem = builder.build().unwrap();
///
/// let mut grasp = GraspConstructive::new(0.0, rand_chacha::ChaCha8Rng::seed_from_u64(7));
/// let solution = grasp.construct(&problem);
///
/// assert_eq!(solution.objective_value(), 5.0);
/// assert!(solution.is_feasible(&mut DisjointSetUnion::new(3)));
/// ```
#[derive(Debug, Clone)]
pub struct GraspConstructive<R> {
    alpha: f64,
    rng: R,
    name: String,
}

impl<R> GraspConstructive<R>
where
    R: Rng,
{
    /// Creates a construction with greediness `alpha` drawing from `rng`.
    ///
    /// # Panics
    ///
    /// Panics if `alpha` is not in `[0, 1]`.
    pub fn new(alpha: f64, rng: R) -> Self {
        match Self::try_new(alpha, rng) {
            Ok(constructive) => constructive,
            Err(err) => panic!("called `GraspConstructive::new` with invalid alpha: {}", err),
        }
    }

    /// Creates a construction with greediness `alpha` drawing from `rng`.
    ///
    /// Returns `Err(InvalidAlpha)` if `alpha` is not in `[0, 1]`.
    pub fn try_new(alpha: f64, rng: R) -> Result<Self, InvalidAlpha> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(InvalidAlpha(alpha));
        }

        Ok(Self {
            alpha,
            rng,
            name: format!("GRASP Constructive (alpha={})", alpha),
        })
    }

    /// Returns the greediness parameter.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Merges terminal pairs sharing an endpoint and pairs up each group at
    /// random.
    fn demand_pairs<W>(&mut self, problem: &Problem<W>) -> Vec<TerminalPair>
    where
        W: SteinerWeight,
    {
        let num_nodes = problem.num_nodes();
        let mut dsu = DisjointSetUnion::new(num_nodes);
        for pair in problem.terminals() {
            dsu.unite(pair.source().get(), pair.target().get());
        }

        let mut group_of_root = vec![usize::MAX; num_nodes];
        let mut groups: Vec<Vec<NodeIndex>> = Vec::new();
        for v in 0..num_nodes {
            if !problem.is_terminal(NodeIndex::new(v)) {
                continue;
            }
            let root = dsu.find(v);
            if group_of_root[root] == usize::MAX {
                group_of_root[root] = groups.len();
                groups.push(Vec::new());
            }
            groups[group_of_root[root]].push(NodeIndex::new(v));
        }

        let mut pairs = Vec::with_capacity(problem.num_terminal_pairs());
        for mut group in groups {
            while group.len() > 1 {
                let pivot = group.swap_remove(self.rng.random_range(0..group.len()));
                let destination = group[self.rng.random_range(0..group.len())];
                pairs.push(TerminalPair::new(pivot, destination));
            }
        }
        pairs
    }
}

impl<W, R> ConstructiveHeuristic<W> for GraspConstructive<R>
where
    W: SteinerWeight,
    R: Rng,
{
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(level = "debug", skip_all, fields(alpha = self.alpha))]
    fn construct<'p>(&mut self, problem: &'p Problem<W>) -> Solution<'p, W> {
        let mut candidates = self.demand_pairs(problem);
        tracing::debug!(pairs = candidates.len(), "generated demand pairs");

        let original = problem.graph();
        let mut working = original.clone();
        let mut engine = ShortestPathEngine::new(problem.num_nodes());
        let mut solution = problem.empty_solution();
        let mut scored: Vec<(TerminalPair, W)> = Vec::with_capacity(candidates.len());

        while !candidates.is_empty() {
            scored.clear();
            for pair in candidates.drain(..) {
                match engine.distance(&working, pair.source(), pair.target()) {
                    Some(cost) => scored.push((pair, cost)),
                    None => tracing::warn!(%pair, "demand pair is unreachable, dropping it"),
                }
            }
            if scored.is_empty() {
                break;
            }

            scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
            let rcl_size = ((scored.len() as f64 * self.alpha).floor() as usize).max(1);
            let (chosen, cost) = scored.swap_remove(self.rng.random_range(0..rcl_size));
            candidates.extend(scored.iter().map(|&(pair, _)| pair));

            tracing::trace!(pair = %chosen, %cost, rcl_size, "selected pair");

            let Some(path) = engine.shortest_path(&working, chosen.source(), chosen.target())
            else {
                continue;
            };

            for &e in path.edges() {
                if !solution.is_edge_active(e) {
                    Move::add(e, original.edge_weight(e)).apply(&mut solution);
                }
                working.set_edge_weight(e, W::zero());
            }
        }

        tracing::debug!(objective = %solution.objective_value(), "construction finished");
        solution
    }
}
