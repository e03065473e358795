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

//! # Destroy-and-Repair Local Search
//!
//! `DestroyRepairLocalSearch` improves a feasible solution one edge at a time.
//! For every active edge it tries the following trial move:
//!
//! 1. Penalize the edge with an infinite weight on a working graph, so that
//!    shortest paths avoid it.
//! 2. Rebuild connectivity from all *other* active edges to find the terminal
//!    pairs its removal would sever.
//! 3. Reconnect each severed pair along a shortest path on the working graph.
//!    Repaired paths are merged into the connectivity structure, so pairs that
//!    share a repair are routed only once.
//!
//! If the repaired candidate is strictly cheaper it replaces the solution and
//! the sweep restarts; otherwise the next edge is tried. A pair that cannot be
//! reconnected abandons only that trial. The search ends when a full sweep
//! accepts nothing.
//!
//! ## Pruning
//!
//! After every accepted move, leaves that are not terminals are removed
//! repeatedly, since they cannot help to connect any pair.

use crate::heuristic::ImprovementHeuristic;
use steiner_core::{
    dsu::DisjointSetUnion, graph::Graph, num::SteinerWeight, shortest_path::ShortestPathEngine,
    utils::index::{EdgeIndex, NodeIndex},
};
use steiner_model::{
    moves::Move,
    neighborhood::{Neighborhood, RemoveNeighborhood},
    solution::Solution,
};

/// Edge-removal local search with shortest-path repair.
///
/// The search owns its scratch memory (shortest-path engine, DSU, degree
/// buffers) and reuses it across calls, growing it when a larger problem is
/// passed in.
#[derive(Debug, Clone)]
pub struct DestroyRepairLocalSearch<W> {
    engine: ShortestPathEngine<W>,
    dsu: DisjointSetUnion,
    degree: Vec<usize>,
    leaves: Vec<NodeIndex>,
}

impl<W> Default for DestroyRepairLocalSearch<W>
where
    W: SteinerWeight,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> DestroyRepairLocalSearch<W>
where
    W: SteinerWeight,
{
    /// Creates a local search with empty scratch memory.
    pub fn new() -> Self {
        Self::preallocated(0)
    }

    /// Creates a local search with scratch memory for `num_nodes` nodes.
    pub fn preallocated(num_nodes: usize) -> Self {
        Self {
            engine: ShortestPathEngine::new(num_nodes),
            dsu: DisjointSetUnion::new(num_nodes),
            degree: Vec::with_capacity(num_nodes),
            leaves: Vec::with_capacity(num_nodes),
        }
    }

    /// Resets the DSU to `num_nodes` singletons.
    fn reset_dsu(&mut self, num_nodes: usize) {
        if self.dsu.len() == num_nodes {
            self.dsu.reset();
        } else {
            self.dsu.reset_with_len(num_nodes);
        }
    }

    /// Returns the active edge incident to `node` in `solution`, if any.
    fn incident_active_edge(
        solution: &Solution<'_, W>,
        graph: &Graph<W>,
        node: NodeIndex,
    ) -> Option<EdgeIndex> {
        graph
            .outgoing_edges(node)
            .map(|(e, _)| e)
            .find(|&e| solution.is_edge_active(e))
            .or_else(|| {
                // Directed graphs keep some incident edges only in the
                // adjacency of the other endpoint.
                solution
                    .active_canonical_edges()
                    .find(|&e| graph.edge(e).target() == node)
            })
    }

    /// Applies `removal` to a copy of `solution` and reconnects every terminal
    /// pair it severs along shortest paths on `working`.
    ///
    /// Returns `None` if some severed pair cannot be reconnected.
    fn repair<'p>(
        &mut self,
        working: &Graph<W>,
        solution: &Solution<'p, W>,
        removal: Move<W>,
    ) -> Option<Solution<'p, W>> {
        let problem = solution.problem();
        self.reset_dsu(problem.num_nodes());

        for e in solution.active_canonical_edges() {
            if e != removal.edge() {
                let edge = working.edge(e);
                self.dsu.unite(edge.source().get(), edge.target().get());
            }
        }

        let mut candidate = solution.clone();
        removal.apply(&mut candidate);

        for pair in problem.terminals() {
            let (s, t) = (pair.source(), pair.target());
            if self.dsu.is_connected(s.get(), t.get()) {
                continue;
            }

            let Some(path) = self.engine.shortest_path(working, s, t) else {
                tracing::trace!(%pair, edge = %removal.edge(), "pair cannot be reconnected");
                return None;
            };

            for &e in path.edges() {
                if !candidate.is_edge_active(e) {
                    Move::add(e, working.edge_weight(e)).apply(&mut candidate);
                }
                let edge = working.edge(e);
                self.dsu.unite(edge.source().get(), edge.target().get());
            }
        }

        Some(candidate)
    }

    /// Runs one sweep over all active edges and commits the first improving
    /// trial. Returns `true` if a trial was committed.
    fn sweep(&mut self, working: &mut Graph<W>, solution: &mut Solution<'_, W>) -> bool {
        for removal in RemoveNeighborhood.moves(&*solution) {
            let e = removal.edge();
            let weight = working.edge_weight(e);
            working.set_edge_weight(e, W::infinity());
            let candidate = self.repair(working, solution, removal);
            working.set_edge_weight(e, weight);

            if let Some(candidate) = candidate {
                if candidate.is_better_than(solution) {
                    tracing::trace!(
                        edge = %e,
                        from = %solution.objective_value(),
                        to = %candidate.objective_value(),
                        "accepted removal"
                    );
                    *solution = candidate;
                    return true;
                }
            }
        }
        false
    }
}

impl<W> ImprovementHeuristic<W> for DestroyRepairLocalSearch<W>
where
    W: SteinerWeight,
{
    fn name(&self) -> &str {
        "GRASP Local Search"
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn optimize(&mut self, solution: &mut Solution<'_, W>) -> bool {
        let initial = solution.objective_value();
        self.prune(solution);

        let mut working = solution.problem().graph().clone();
        let mut accepted = 0u64;
        while self.sweep(&mut working, solution) {
            accepted += 1;
            self.prune(solution);
        }

        tracing::debug!(
            accepted,
            from = %initial,
            to = %solution.objective_value(),
            "local search finished"
        );
        accepted > 0
    }

    fn prune(&mut self, solution: &mut Solution<'_, W>) -> bool {
        let problem = solution.problem();
        let graph = problem.graph();
        let num_nodes = graph.num_nodes();

        self.degree.clear();
        self.degree.resize(num_nodes, 0);
        for e in solution.active_canonical_edges() {
            let edge = graph.edge(e);
            self.degree[edge.source().get()] += 1;
            self.degree[edge.target().get()] += 1;
        }

        self.leaves.clear();
        for v in 0..num_nodes {
            if self.degree[v] == 1 && !problem.is_terminal(NodeIndex::new(v)) {
                self.leaves.push(NodeIndex::new(v));
            }
        }

        let mut changed = false;
        while let Some(leaf) = self.leaves.pop() {
            if self.degree[leaf.get()] != 1 {
                continue;
            }
            let Some(e) = Self::incident_active_edge(solution, graph, leaf) else {
                continue;
            };

            let edge = graph.edge(e);
            let other = if edge.source() == leaf {
                edge.target()
            } else {
                edge.source()
            };

            Move::remove(e, graph.edge_weight(e)).apply(solution);
            self.degree[leaf.get()] -= 1;
            self.degree[other.get()] -= 1;
            changed = true;

            if self.degree[other.get()] == 1 && !problem.is_terminal(other) {
                self.leaves.push(other);
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constructive::GraspConstructive, heuristic::ConstructiveHeuristic};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use steiner_model::problem::{Problem, ProblemBuilder};

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn edge(problem: &Problem<f64>, u: usize, v: usize) -> EdgeIndex {
        problem.graph().find_edge(n(u), n(v)).unwrap()
    }

    fn with_edges<'p>(problem: &'p Problem<f64>, edges: &[(usize, usize)]) -> Solution<'p, f64> {
        let mut solution = problem.empty_solution();
        for &(u, v) in edges {
            let e = edge(problem, u, v);
            Move::add(e, problem.graph().edge_weight(e)).apply(&mut solution);
        }
        solution
    }

    fn triangle() -> Problem<f64> {
        let mut b = ProblemBuilder::new(3);
        b.add_edge(n(0), n(1), 100.0)
            .add_edge(n(0), n(2), 10.0)
            .add_edge(n(2), n(1), 10.0)
            .add_terminal_pair(n(0), n(1));
        b.build().unwrap()
    }

    #[test]
    fn test_triangle_detour_replaces_expensive_edge() {
        let problem = triangle();
        let mut solution = with_edges(&problem, &[(0, 1)]);
        assert_eq!(solution.objective_value(), 100.0);

        let mut ls = DestroyRepairLocalSearch::new();
        assert!(ls.optimize(&mut solution));

        assert_eq!(solution.objective_value(), 20.0);
        assert!(!solution.is_edge_active(edge(&problem, 0, 1)));
        assert!(solution.is_edge_active(edge(&problem, 0, 2)));
        assert!(solution.is_edge_active(edge(&problem, 2, 1)));
        assert!(solution.is_feasible(&mut DisjointSetUnion::new(3)));
    }

    #[test]
    fn test_optimize_is_idempotent() {
        let problem = triangle();
        let mut solution = with_edges(&problem, &[(0, 1)]);
        let mut ls = DestroyRepairLocalSearch::new();
        ls.optimize(&mut solution);

        let before = solution.clone();
        assert!(!ls.optimize(&mut solution));
        assert_eq!(solution, before);
    }

    #[test]
    fn test_pruning_alone_is_not_an_accepted_move() {
        let mut b = ProblemBuilder::new(3);
        b.add_edge(n(0), n(1), 1.0)
            .add_edge(n(1), n(2), 5.0)
            .add_terminal_pair(n(0), n(1));
        let problem = b.build().unwrap();
        let mut solution = with_edges(&problem, &[(0, 1), (1, 2)]);

        let mut ls = DestroyRepairLocalSearch::new();
        assert!(!ls.optimize(&mut solution));
        assert_eq!(solution.objective_value(), 1.0);
        assert!(!solution.is_edge_active(edge(&problem, 1, 2)));
    }

    #[test]
    fn test_prune_cascades_and_is_idempotent() {
        // Path 0-1-2-3-4 with only (0,1) demanded: 1-2, 2-3, 3-4 dangle.
        let mut b = ProblemBuilder::new(5);
        b.add_edge(n(0), n(1), 1.0)
            .add_edge(n(1), n(2), 2.0)
            .add_edge(n(2), n(3), 3.0)
            .add_edge(n(3), n(4), 4.0)
            .add_terminal_pair(n(0), n(1));
        let problem = b.build().unwrap();
        let mut solution = with_edges(&problem, &[(0, 1), (1, 2), (2, 3), (3, 4)]);

        let mut ls = DestroyRepairLocalSearch::new();
        assert!(ls.prune(&mut solution));
        assert_eq!(solution.objective_value(), 1.0);
        assert_eq!(solution.active_canonical_edges().count(), 1);

        let before = solution.clone();
        assert!(!ls.prune(&mut solution));
        assert_eq!(solution, before);
    }

    #[test]
    fn test_prune_keeps_steiner_nodes_on_paths() {
        // Node 1 is not a terminal, but has degree 2 on the path 0-1-2.
        let mut b = ProblemBuilder::new(4);
        b.add_edge(n(0), n(1), 1.0)
            .add_edge(n(1), n(2), 1.0)
            .add_edge(n(1), n(3), 1.0)
            .add_terminal_pair(n(0), n(2));
        let problem = b.build().unwrap();
        let mut solution = with_edges(&problem, &[(0, 1), (1, 2), (1, 3)]);

        let mut ls = DestroyRepairLocalSearch::new();
        assert!(ls.prune(&mut solution));
        assert_eq!(solution.objective_value(), 2.0);
        assert!(!solution.is_edge_active(edge(&problem, 1, 3)));
        assert!(solution.is_feasible(&mut DisjointSetUnion::new(4)));
    }

    #[test]
    fn test_unreachable_repair_abandons_only_that_edge() {
        // Bridge 1-2 cannot be bypassed; the expensive 2-3 edge can.
        let mut b = ProblemBuilder::new(5);
        b.add_edge(n(0), n(1), 1.0)
            .add_edge(n(1), n(2), 1.0)
            .add_edge(n(2), n(3), 50.0)
            .add_edge(n(2), n(4), 5.0)
            .add_edge(n(4), n(3), 5.0)
            .add_terminal_pair(n(0), n(3));
        let problem = b.build().unwrap();
        let mut solution = with_edges(&problem, &[(0, 1), (1, 2), (2, 3)]);

        let mut ls = DestroyRepairLocalSearch::new();
        assert!(ls.optimize(&mut solution));
        assert_eq!(solution.objective_value(), 12.0);
        assert!(solution.is_edge_active(edge(&problem, 1, 2)));
        assert!(solution.is_feasible(&mut DisjointSetUnion::new(5)));
    }

    #[test]
    fn test_shared_repair_is_routed_once() {
        // Removing the expensive hub edge 0-1 severs both pairs; the repair
        // of the first pair reconnects the second as well.
        let mut b = ProblemBuilder::new(4);
        b.add_edge(n(0), n(1), 30.0)
            .add_edge(n(0), n(2), 1.0)
            .add_edge(n(2), n(1), 1.0)
            .add_edge(n(1), n(3), 1.0)
            .add_terminal_pair(n(0), n(1))
            .add_terminal_pair(n(0), n(3));
        let problem = b.build().unwrap();
        let mut solution = with_edges(&problem, &[(0, 1), (1, 3)]);

        let mut ls = DestroyRepairLocalSearch::new();
        ls.optimize(&mut solution);
        assert_eq!(solution.objective_value(), 3.0);
    }

    #[test]
    fn test_local_search_never_worsens_constructed_solutions() {
        let mut b = ProblemBuilder::new(6);
        b.add_edge(n(0), n(1), 4.0)
            .add_edge(n(1), n(2), 4.0)
            .add_edge(n(0), n(3), 1.0)
            .add_edge(n(3), n(4), 1.0)
            .add_edge(n(4), n(2), 1.0)
            .add_edge(n(4), n(5), 2.0)
            .add_edge(n(2), n(5), 6.0)
            .add_terminal_pair(n(0), n(2))
            .add_terminal_pair(n(1), n(5));
        let problem = b.build().unwrap();
        let mut dsu = DisjointSetUnion::new(problem.num_nodes());
        let mut ls = DestroyRepairLocalSearch::preallocated(problem.num_nodes());

        for seed in 0..20 {
            let mut grasp = GraspConstructive::new(1.0, ChaCha8Rng::seed_from_u64(seed));
            let mut solution = grasp.construct(&problem);
            let constructed = solution.objective_value();

            ls.optimize(&mut solution);
            assert!(solution.objective_value() <= constructed);
            assert!(solution.is_feasible(&mut dsu));
        }
    }

    #[test]
    fn test_scratch_adapts_to_problem_size() {
        let small = triangle();
        let mut ls = DestroyRepairLocalSearch::preallocated(1);

        let mut solution = with_edges(&small, &[(0, 1)]);
        ls.optimize(&mut solution);
        assert_eq!(solution.objective_value(), 20.0);
    }

    #[test]
    fn test_name() {
        let ls: Box<dyn ImprovementHeuristic<f64>> = Box::new(DestroyRepairLocalSearch::new());
        assert_eq!(ls.name(), "GRASP Local Search");
    }
}
