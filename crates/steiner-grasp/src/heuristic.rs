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

//! Strategy traits of the GRASP framework.
//!
//! The orchestrator only talks to these traits, so constructions and
//! improvements can be swapped (or stubbed in tests) without touching the
//! search loop. All traits are object safe.

use crate::result::GraspOutcome;
use steiner_core::num::SteinerWeight;
use steiner_model::{problem::Problem, solution::Solution};

/// Builds a feasible solution from scratch.
pub trait ConstructiveHeuristic<W>
where
    W: SteinerWeight,
{
    /// Returns the name of the heuristic.
    fn name(&self) -> &str;

    /// Constructs a solution for `problem`.
    ///
    /// Every terminal pair that is connected in the problem graph is
    /// connected in the returned solution.
    fn construct<'p>(&mut self, problem: &'p Problem<W>) -> Solution<'p, W>;
}

impl<W> std::fmt::Debug for dyn ConstructiveHeuristic<W>
where
    W: SteinerWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConstructiveHeuristic({})", self.name())
    }
}

impl<W> std::fmt::Display for dyn ConstructiveHeuristic<W>
where
    W: SteinerWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConstructiveHeuristic({})", self.name())
    }
}

/// Improves an existing solution in place.
pub trait ImprovementHeuristic<W>
where
    W: SteinerWeight,
{
    /// Returns the name of the heuristic.
    fn name(&self) -> &str;

    /// Improves `solution` until no further improvement is found.
    ///
    /// Returns `true` if an improving move was accepted. Cleanup that only
    /// drops redundant edges does not count. Feasibility of the solution is
    /// preserved.
    fn optimize(&mut self, solution: &mut Solution<'_, W>) -> bool;

    /// Removes edges that do not contribute to connecting any terminal pair.
    ///
    /// Returns `true` if any edge was removed.
    fn prune(&mut self, solution: &mut Solution<'_, W>) -> bool;
}

impl<W> std::fmt::Debug for dyn ImprovementHeuristic<W>
where
    W: SteinerWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ImprovementHeuristic({})", self.name())
    }
}

impl<W> std::fmt::Display for dyn ImprovementHeuristic<W>
where
    W: SteinerWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ImprovementHeuristic({})", self.name())
    }
}

/// Solves a whole instance.
pub trait Solver<W>
where
    W: SteinerWeight,
{
    /// Returns the name of the solver.
    fn name(&self) -> &str;

    /// Solves `problem` and returns the best solution found.
    fn solve<'p>(&mut self, problem: &'p Problem<W>) -> GraspOutcome<'p, W>;
}

impl<W> std::fmt::Debug for dyn Solver<W>
where
    W: SteinerWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Solver({})", self.name())
    }
}

impl<W> std::fmt::Display for dyn Solver<W>
where
    W: SteinerWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Solver({})", self.name())
    }
}
