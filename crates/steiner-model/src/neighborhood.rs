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

//! Single-edge neighbourhoods of a solution.
//!
//! A neighbourhood lists every move of one kind that is applicable to a
//! solution. Only canonical edges are considered, so each logical edge yields
//! at most one move. Moves carry the original weight of the problem graph.

use crate::{moves::Move, solution::Solution};
use steiner_core::{num::SteinerWeight, utils::index::EdgeIndex};

/// A generator of applicable moves.
pub trait Neighborhood<W>
where
    W: SteinerWeight,
{
    /// Returns the name of the neighbourhood.
    fn name(&self) -> &str;

    /// Returns every move of this neighbourhood applicable to `solution`.
    fn moves(&self, solution: &Solution<'_, W>) -> Vec<Move<W>>;
}

impl<W> std::fmt::Debug for dyn Neighborhood<W>
where
    W: SteinerWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Neighborhood({})", self.name())
    }
}

impl<W> std::fmt::Display for dyn Neighborhood<W>
where
    W: SteinerWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Neighborhood({})", self.name())
    }
}

/// All moves that activate a currently inactive edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddNeighborhood;

impl<W> Neighborhood<W> for AddNeighborhood
where
    W: SteinerWeight,
{
    fn name(&self) -> &str {
        "AddNeighborhood"
    }

    fn moves(&self, solution: &Solution<'_, W>) -> Vec<Move<W>> {
        let graph = solution.problem().graph();
        let mut moves = Vec::with_capacity(graph.num_edges() / 4);
        for (i, edge) in graph.edges().iter().enumerate() {
            let e = EdgeIndex::new(i);
            if !solution.is_edge_active(e) && graph.is_canonical(e) {
                moves.push(Move::add(e, edge.weight()));
            }
        }
        moves
    }
}

/// All moves that deactivate a currently active edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveNeighborhood;

impl<W> Neighborhood<W> for RemoveNeighborhood
where
    W: SteinerWeight,
{
    fn name(&self) -> &str {
        "RemoveNeighborhood"
    }

    fn moves(&self, solution: &Solution<'_, W>) -> Vec<Move<W>> {
        let graph = solution.problem().graph();
        solution
            .active_canonical_edges()
            .map(|e| Move::remove(e, graph.edge_weight(e)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{moves::MoveKind, problem::ProblemBuilder};
    use steiner_core::utils::index::NodeIndex;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    #[test]
    fn test_neighborhoods_partition_canonical_edges() {
        let mut b = ProblemBuilder::<f64>::new(4);
        b.add_edge(n(0), n(1), 1.0)
            .add_edge(n(1), n(2), 2.0)
            .add_edge(n(2), n(3), 3.0)
            .add_terminal_pair(n(0), n(3));
        let problem = b.build().unwrap();
        let mut solution = problem.empty_solution();

        let adds = AddNeighborhood.moves(&solution);
        assert_eq!(adds.len(), 3);
        assert!(adds.iter().all(|m| m.kind() == MoveKind::Add));
        assert!(Neighborhood::<f64>::moves(&RemoveNeighborhood, &solution).is_empty());

        adds[1].apply(&mut solution);
        let adds = AddNeighborhood.moves(&solution);
        let removes = RemoveNeighborhood.moves(&solution);
        assert_eq!(adds.len(), 2);
        assert_eq!(removes.len(), 1);
        assert_eq!(removes[0].cost_delta(), 2.0);

        removes[0].apply(&mut solution);
        assert!(solution.is_empty());
        assert_eq!(solution.objective_value(), 0.0);
    }

    #[test]
    fn test_trait_object_display() {
        let nb: Box<dyn Neighborhood<f64>> = Box::new(RemoveNeighborhood);
        assert_eq!(nb.to_string(), "Neighborhood(RemoveNeighborhood)");
    }
}
