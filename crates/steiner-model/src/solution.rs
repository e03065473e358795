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

use crate::problem::Problem;
use fixedbitset::FixedBitSet;
use steiner_core::{dsu::DisjointSetUnion, num::SteinerWeight, utils::index::EdgeIndex};

/// A candidate answer to a Steiner Forest instance.
///
/// The solution is a bitset over the physical edges of the problem graph
/// plus the cached sum of the weights of its active logical edges. Both
/// directions of an undirected edge are always set together.
///
/// The only way to change a solution is through a `Move`, which keeps the
/// objective value in sync without recomputing it.
#[derive(Debug, Clone)]
pub struct Solution<'p, W> {
    /// The problem this solution belongs to.
    problem: &'p Problem<W>,

    /// `active_edges[e]` is set if physical edge `e` is part of the solution.
    active_edges: FixedBitSet,

    /// The total weight of the active logical edges.
    objective_value: W,
}

impl<'p, W> Solution<'p, W>
where
    W: SteinerWeight,
{
    /// Creates an empty solution for `problem`.
    pub fn new(problem: &'p Problem<W>) -> Self {
        Self {
            problem,
            active_edges: FixedBitSet::with_capacity(problem.num_edges()),
            objective_value: W::zero(),
        }
    }

    /// Returns the problem this solution belongs to.
    #[inline]
    pub fn problem(&self) -> &'p Problem<W> {
        self.problem
    }

    /// Returns the total weight of the active logical edges.
    #[inline]
    pub fn objective_value(&self) -> W {
        self.objective_value
    }

    /// Returns `true` if physical edge `edge` is active.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is out of bounds.
    #[inline]
    pub fn is_edge_active(&self, edge: EdgeIndex) -> bool {
        let index = edge.get();
        assert!(
            index < self.active_edges.len(),
            "called `Solution::is_edge_active` with edge index out of bounds: the len is {} but the index is {}",
            self.active_edges.len(),
            index
        );
        self.active_edges.contains(index)
    }

    /// Returns the number of active physical edges.
    #[inline]
    pub fn num_active_edges(&self) -> usize {
        self.active_edges.count_ones(..)
    }

    /// Returns `true` if no edge is active.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active_edges.is_clear()
    }

    /// Iterates over all active physical edges in index order.
    #[inline]
    pub fn active_edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.active_edges.ones().map(EdgeIndex::new)
    }

    /// Iterates over the canonical representative of every active logical edge.
    #[inline]
    pub fn active_canonical_edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        let graph = self.problem.graph();
        self.active_edges().filter(move |&e| graph.is_canonical(e))
    }

    /// Returns `true` if this solution has a strictly lower objective value.
    #[inline]
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.objective_value < other.objective_value
    }

    /// Recomputes connectivity over all active edges and checks that every
    /// terminal pair ends up in the same component.
    ///
    /// `dsu` is scratch memory; it is reset (and resized if needed) first.
    pub fn is_feasible(&self, dsu: &mut DisjointSetUnion) -> bool {
        let graph = self.problem.graph();
        if dsu.len() == graph.num_nodes() {
            dsu.reset();
        } else {
            dsu.reset_with_len(graph.num_nodes());
        }

        for e in self.active_canonical_edges() {
            let edge = graph.edge(e);
            dsu.unite(edge.source().get(), edge.target().get());
        }

        self.problem
            .terminals()
            .iter()
            .all(|pair| dsu.is_connected(pair.source().get(), pair.target().get()))
    }

    /// Flips `edge` and its mirror. Only moves call this.
    pub(crate) fn set_edge_active(&mut self, edge: EdgeIndex, active: bool) {
        let index = edge.get();
        assert!(
            index < self.active_edges.len(),
            "called `Solution::set_edge_active` with edge index out of bounds: the len is {} but the index is {}",
            self.active_edges.len(),
            index
        );

        self.active_edges.set(index, active);
        if let Some(rev) = self.problem.graph().reverse_edge(edge) {
            self.active_edges.set(rev.get(), active);
        }
    }

    /// Adjusts the cached objective value. Only moves call this.
    #[inline]
    pub(crate) fn shift_objective(&mut self, delta: W) {
        self.objective_value = self.objective_value + delta;
    }
}

impl<W> PartialEq for Solution<'_, W>
where
    W: SteinerWeight,
{
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.problem, other.problem)
            && self.active_edges == other.active_edges
            && self.objective_value == other.objective_value
    }
}

impl<W> std::fmt::Display for Solution<'_, W>
where
    W: SteinerWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution Summary")?;
        writeln!(f, "   Objective Value: {}", self.objective_value)?;
        write!(f, "   Active Edges:   ")?;

        let graph = self.problem.graph();
        let mut any = false;
        for e in self.active_canonical_edges() {
            let edge = graph.edge(e);
            write!(f, " ({}->{})", edge.source().get(), edge.target().get())?;
            any = true;
        }
        if !any {
            write!(f, " None")?;
        }
        writeln!(f)
    }
}
