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

//! Reversible single-edge edits of a `Solution`.
//!
//! A `Move` activates (`Add`) or deactivates (`Remove`) one logical edge and
//! shifts the objective value by a cost delta that is fixed when the move is
//! created. Heuristics that perturb weights on working graphs must therefore
//! build their moves from the original weights of the problem graph; the
//! delta is never re-read from any graph afterwards.

use crate::solution::Solution;
use steiner_core::{num::SteinerWeight, utils::index::EdgeIndex};

/// The direction of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Activates an edge.
    Add,
    /// Deactivates an edge.
    Remove,
}

impl std::fmt::Display for MoveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveKind::Add => write!(f, "Add"),
            MoveKind::Remove => write!(f, "Remove"),
        }
    }
}

/// A reversible edit of a single logical edge.
///
/// # Examples
///
/// ```rust
/// # use steiner_model::{moves::Move, problem::ProblemBuilder};
/// # use steiner_core::utils::index::NodeIndex;
/// let mut builder = ProblemBuilder::<f64>::new(2);
/// builder
///     .add_edge(NodeIndex::new(0), NodeIndex::new(1), 7.0)
///     .add_terminal_pair(NodeIndex::new(0), NodeIndex::new(1));
/// let problem = builder.build().unwrap();
/// let edge = problem.graph().find_edge(NodeIndex::new(0), NodeIndex::new(1)).unwrap();
///
/// let mut solution = problem.empty_solution();
/// let mv = Move::add(edge, 7.0);
/// mv.apply(&mut solution);
/// assert_eq!(solution.objective_value(), 7.0);
///
/// mv.undo(&mut solution);
/// assert_eq!(solution.objective_value(), 0.0);
/// assert!(!solution.is_edge_active(edge));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move<W> {
    kind: MoveKind,
    edge: EdgeIndex,
    cost_delta: W,
}

impl<W> Move<W>
where
    W: SteinerWeight,
{
    /// Creates a new move.
    #[inline]
    pub const fn new(kind: MoveKind, edge: EdgeIndex, cost_delta: W) -> Self {
        Self {
            kind,
            edge,
            cost_delta,
        }
    }

    /// Creates a move that activates `edge`, whose original weight is `weight`.
    #[inline]
    pub const fn add(edge: EdgeIndex, weight: W) -> Self {
        Self::new(MoveKind::Add, edge, weight)
    }

    /// Creates a move that deactivates `edge`, whose original weight is `weight`.
    #[inline]
    pub const fn remove(edge: EdgeIndex, weight: W) -> Self {
        Self::new(MoveKind::Remove, edge, weight)
    }

    /// Returns the direction of the move.
    #[inline]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Returns the edge this move touches.
    #[inline]
    pub fn edge(&self) -> EdgeIndex {
        self.edge
    }

    /// Returns the (unsigned) weight this move adds or removes.
    #[inline]
    pub fn cost_delta(&self) -> W {
        self.cost_delta
    }

    /// Returns the change of the objective value caused by `apply`.
    #[inline]
    pub fn signed_delta(&self) -> W {
        match self.kind {
            MoveKind::Add => self.cost_delta,
            MoveKind::Remove => -self.cost_delta,
        }
    }

    /// Returns the move that reverts this one.
    #[inline]
    pub fn inverse(&self) -> Self {
        let kind = match self.kind {
            MoveKind::Add => MoveKind::Remove,
            MoveKind::Remove => MoveKind::Add,
        };
        Self::new(kind, self.edge, self.cost_delta)
    }

    /// Applies the move to `solution`, flipping the edge and its mirror.
    pub fn apply(&self, solution: &mut Solution<'_, W>) {
        debug_assert_eq!(
            solution.is_edge_active(self.edge),
            self.kind == MoveKind::Remove,
            "called `Move::apply` for {} on an edge whose status it does not change",
            self
        );

        solution.set_edge_active(self.edge, self.kind == MoveKind::Add);
        solution.shift_objective(self.signed_delta());
    }

    /// Reverts a previous `apply` of this move.
    #[inline]
    pub fn undo(&self, solution: &mut Solution<'_, W>) {
        self.inverse().apply(solution);
    }
}

impl<W> std::fmt::Display for Move<W>
where
    W: SteinerWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}, {})", self.kind, self.edge, self.signed_delta())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Problem, ProblemBuilder};
    use steiner_core::utils::index::NodeIndex;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
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
    fn test_apply_and_undo_are_inverse() {
        let problem = triangle();
        let mut solution = problem.empty_solution();
        let e = problem.graph().find_edge(n(0), n(2)).unwrap();

        let add = Move::add(e, 10.0);
        add.apply(&mut solution);
        let after_add = solution.clone();

        let remove = Move::remove(e, 10.0);
        remove.apply(&mut solution);
        assert_eq!(solution, problem.empty_solution());

        remove.undo(&mut solution);
        assert_eq!(solution, after_add);

        add.undo(&mut solution);
        assert_eq!(solution.objective_value(), 0.0);
        assert!(solution.is_empty());
    }

    #[test]
    fn test_delta_is_fixed_at_creation() {
        let problem = triangle();
        let mut working = problem.graph().clone();
        let e = problem.graph().find_edge(n(0), n(1)).unwrap();

        let mv = Move::add(e, problem.graph().edge_weight(e));
        working.set_edge_weight(e, 0.0);

        let mut solution = problem.empty_solution();
        mv.apply(&mut solution);
        assert_eq!(solution.objective_value(), 100.0);
    }

    #[test]
    fn test_signed_delta_and_inverse() {
        let e = EdgeIndex::new(3);
        let add = Move::add(e, 4.0);
        assert_eq!(add.signed_delta(), 4.0);
        assert_eq!(add.inverse().kind(), MoveKind::Remove);
        assert_eq!(add.inverse().signed_delta(), -4.0);
        assert_eq!(add.inverse().inverse(), add);
    }

    #[test]
    fn test_display() {
        let mv = Move::remove(EdgeIndex::new(2), 1.5);
        assert_eq!(mv.to_string(), "Remove(EdgeIndex(2), -1.5)");
    }
}
