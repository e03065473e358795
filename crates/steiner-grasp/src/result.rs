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

use crate::stats::GraspStatistics;
use steiner_core::num::SteinerWeight;
use steiner_model::solution::Solution;

/// Why a GRASP run stopped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// The configured number of iterations was completed.
    IterationLimit,

    /// A monitor requested termination (time limit, external stop, etc.).
    /// The string describes the reason.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::IterationLimit => write!(f, "Iteration Limit Reached"),
            TerminationReason::Aborted(msg) => write!(f, "Aborted: {}", msg),
        }
    }
}

/// The result of a GRASP run: the incumbent, statistics and why it stopped.
#[derive(Debug, Clone)]
pub struct GraspOutcome<'p, W> {
    termination_reason: TerminationReason,
    solution: Solution<'p, W>,
    statistics: GraspStatistics<W>,
}

impl<'p, W> GraspOutcome<'p, W>
where
    W: SteinerWeight,
{
    /// Creates an outcome for a run that completed all of its iterations.
    #[inline]
    pub fn iteration_limit(solution: Solution<'p, W>, statistics: GraspStatistics<W>) -> Self {
        Self {
            termination_reason: TerminationReason::IterationLimit,
            solution,
            statistics,
        }
    }

    /// Creates an outcome for a run stopped early by a monitor.
    #[inline]
    pub fn aborted<R>(solution: Solution<'p, W>, reason: R, statistics: GraspStatistics<W>) -> Self
    where
        R: Into<String>,
    {
        Self {
            termination_reason: TerminationReason::Aborted(reason.into()),
            solution,
            statistics,
        }
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the best solution found.
    #[inline]
    pub fn solution(&self) -> &Solution<'p, W> {
        &self.solution
    }

    /// Returns the statistics of the run.
    #[inline]
    pub fn statistics(&self) -> &GraspStatistics<W> {
        &self.statistics
    }

    /// Consumes the outcome and returns the best solution found.
    #[inline]
    pub fn into_solution(self) -> Solution<'p, W> {
        self.solution
    }
}

impl<W> PartialEq for GraspOutcome<'_, W>
where
    W: SteinerWeight,
{
    fn eq(&self, other: &Self) -> bool {
        self.termination_reason == other.termination_reason
            && self.solution == other.solution
            && self.statistics == other.statistics
    }
}

impl<W> std::fmt::Display for GraspOutcome<'_, W>
where
    W: SteinerWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Termination: {}", self.termination_reason)?;
        write!(f, "{}", self.statistics)?;
        write!(f, "{}", self.solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use steiner_core::utils::index::NodeIndex;
    use steiner_model::problem::ProblemBuilder;

    #[test]
    fn test_constructors_and_display() {
        let mut b = ProblemBuilder::<f64>::new(2);
        b.add_edge(NodeIndex::new(0), NodeIndex::new(1), 1.0)
            .add_terminal_pair(NodeIndex::new(0), NodeIndex::new(1));
        let problem = b.build().unwrap();

        let done = GraspOutcome::iteration_limit(problem.empty_solution(), Default::default());
        assert_eq!(done.termination_reason(), &TerminationReason::IterationLimit);

        let aborted =
            GraspOutcome::aborted(problem.empty_solution(), "time limit exceeded", Default::default());
        assert_eq!(
            aborted.termination_reason(),
            &TerminationReason::Aborted("time limit exceeded".to_string())
        );
        assert!(aborted.to_string().starts_with("Termination: Aborted: time limit exceeded"));
        assert!(aborted.into_solution().is_empty());
    }

    #[test]
    fn test_equality_compares_reason_solution_and_statistics() {
        let mut b = ProblemBuilder::<f64>::new(2);
        b.add_edge(NodeIndex::new(0), NodeIndex::new(1), 1.0)
            .add_terminal_pair(NodeIndex::new(0), NodeIndex::new(1));
        let problem = b.build().unwrap();

        let done = GraspOutcome::iteration_limit(problem.empty_solution(), Default::default());
        assert_eq!(done.clone(), done);

        let aborted = GraspOutcome::aborted(problem.empty_solution(), "stop", Default::default());
        assert_ne!(done, aborted);

        let mut statistics = GraspStatistics::default();
        statistics.on_iteration();
        let counted = GraspOutcome::iteration_limit(problem.empty_solution(), statistics);
        assert_ne!(done, counted);
    }
}
