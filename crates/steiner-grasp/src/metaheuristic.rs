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

//! # GRASP Orchestration
//!
//! `GraspMetaheuristic` repeats *construct, then improve* and keeps the best
//! solution seen. Both phases are injected as trait objects; stopping
//! criteria beyond the iteration budget are expressed as monitors.
//!
//! The first iteration always runs. After each completed iteration the
//! iteration budget is checked first, then the monitors, so every outcome
//! carries a constructed and improved solution.

use crate::{
    heuristic::{ConstructiveHeuristic, ImprovementHeuristic, Solver},
    monitor::{
        composite::CompositeGraspMonitor,
        grasp_monitor::{GraspMonitor, SearchCommand},
        time::TimeLimitMonitor,
    },
    result::{GraspOutcome, TerminationReason},
    stats::GraspStatistics,
};
use std::time::{Duration, Instant};
use steiner_core::num::SteinerWeight;
use steiner_model::{problem::Problem, solution::Solution};

/// Greedy Randomized Adaptive Search Procedure.
///
/// # Examples
///
/// ```rust
/// # use steiner_grasp::{
/// #     constructive::GraspConstructive, heuristic::Solver,
/// #     local_search::DestroyRepairLocalSearch, metaheuristic::GraspMetaheuristicBuilder,
/// # };
/// # use steiner_model::problem::ProblemBuilder;
/// # use steiner_core::utils::index::NodeIndex;
/// # use rand::SeedableRng;
/// let mut builder = ProblemBuilder::<f64>::new(3);
/// builder
///     .add_edge(NodeIndex::new(0), NodeIndex::new(1), 100.0)
///     .add_edge(NodeIndex::new(0), NodeIndex::new(2), 10.0)
///     .add_edge(NodeIndex::new(2), NodeIndex::new(1), 10.0)
///     .add_terminal_pair(NodeIndex::new(0), NodeIndex::new(1));
/// let problem = builder.build().unwrap();
///
/// let rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
/// let mut grasp = GraspMetaheuristicBuilder::new(
///     GraspConstructive::new(1.0, rng),
///     DestroyRepairLocalSearch::new(),
/// );
/// grasp.with_max_iterations(5);
/// let mut solver = grasp.build();
///
/// let outcome = solver.solve(&problem);
/// assert_eq!(outcome.solution().objective_value(), 20.0);
/// assert_eq!(outcome.statistics().iterations, 5);
/// ```
pub struct GraspMetaheuristic<'a, W>
where
    W: SteinerWeight,
{
    constructive: Box<dyn ConstructiveHeuristic<W> + 'a>,
    local_search: Box<dyn ImprovementHeuristic<W> + 'a>,
    monitor: CompositeGraspMonitor<'a, W>,
    max_iterations: u64,
    name: String,
}

impl<'a, W> GraspMetaheuristic<'a, W>
where
    W: SteinerWeight,
{
    /// Returns the maximum number of iterations.
    #[inline]
    pub fn max_iterations(&self) -> u64 {
        self.max_iterations
    }

    /// Runs one construct-then-improve iteration.
    fn iterate<'p>(
        &mut self,
        problem: &'p Problem<W>,
        stats: &mut GraspStatistics<W>,
    ) -> Solution<'p, W> {
        let mut solution = self.constructive.construct(problem);
        stats.on_constructed_solution();

        let constructed = solution.objective_value();
        if self.local_search.optimize(&mut solution) {
            stats.on_improving_local_search();
        }
        stats.on_iteration();

        tracing::debug!(
            iteration = stats.iterations,
            constructed = %constructed,
            improved = %solution.objective_value(),
            "iteration completed"
        );
        solution
    }
}

impl<W> std::fmt::Debug for GraspMetaheuristic<'_, W>
where
    W: SteinerWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraspMetaheuristic")
            .field("constructive", &self.constructive.name())
            .field("local_search", &self.local_search.name())
            .field("monitor", &self.monitor)
            .field("max_iterations", &self.max_iterations)
            .finish()
    }
}

impl<W> Solver<W> for GraspMetaheuristic<'_, W>
where
    W: SteinerWeight,
{
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(level = "debug", skip_all, fields(instance = problem.name()))]
    fn solve<'p>(&mut self, problem: &'p Problem<W>) -> GraspOutcome<'p, W> {
        let start_time = Instant::now();
        let mut stats = GraspStatistics::default();

        self.monitor.on_start(problem);

        let mut best = self.iterate(problem, &mut stats);
        stats.on_incumbent_update(best.objective_value());
        self.monitor.on_iteration(&best, &stats);
        self.monitor.on_new_incumbent(&best, &stats);

        let termination_reason = loop {
            if stats.iterations >= self.max_iterations {
                break TerminationReason::IterationLimit;
            }
            if let SearchCommand::Terminate(reason) = self.monitor.search_command(&stats) {
                break TerminationReason::Aborted(reason);
            }

            let solution = self.iterate(problem, &mut stats);
            self.monitor.on_iteration(&solution, &stats);

            if solution.is_better_than(&best) {
                stats.on_incumbent_update(solution.objective_value());
                self.monitor.on_new_incumbent(&solution, &stats);
                best = solution;
            }
        };

        stats.set_total_time(start_time.elapsed());
        self.monitor.on_end(&best, &stats);

        debug_assert_eq!(
            stats.best_objective,
            Some(best.objective_value()),
            "called `GraspMetaheuristic::solve` with inconsistent incumbent bookkeeping"
        );

        match termination_reason {
            TerminationReason::IterationLimit => GraspOutcome::iteration_limit(best, stats),
            TerminationReason::Aborted(reason) => GraspOutcome::aborted(best, reason, stats),
        }
    }
}

/// Configuration for a `GraspMetaheuristic`.
pub struct GraspMetaheuristicBuilder<'a, W>
where
    W: SteinerWeight,
{
    constructive: Box<dyn ConstructiveHeuristic<W> + 'a>,
    local_search: Box<dyn ImprovementHeuristic<W> + 'a>,
    monitor: CompositeGraspMonitor<'a, W>,
    max_iterations: u64,
}

impl<'a, W> GraspMetaheuristicBuilder<'a, W>
where
    W: SteinerWeight,
{
    /// Default number of iterations.
    pub const DEFAULT_MAX_ITERATIONS: u64 = 1;

    /// Creates a builder from the two phases of the search.
    pub fn new<C, L>(constructive: C, local_search: L) -> Self
    where
        C: ConstructiveHeuristic<W> + 'a,
        L: ImprovementHeuristic<W> + 'a,
    {
        Self::from_boxed(Box::new(constructive), Box::new(local_search))
    }

    /// Creates a builder from already boxed phases.
    pub fn from_boxed(
        constructive: Box<dyn ConstructiveHeuristic<W> + 'a>,
        local_search: Box<dyn ImprovementHeuristic<W> + 'a>,
    ) -> Self {
        Self {
            constructive,
            local_search,
            monitor: CompositeGraspMonitor::new(),
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Sets the number of iterations.
    ///
    /// # Panics
    ///
    /// Panics if `max_iterations` is zero.
    pub fn with_max_iterations(&mut self, max_iterations: u64) -> &mut Self {
        assert!(
            max_iterations > 0,
            "called `GraspMetaheuristicBuilder::with_max_iterations` with zero iterations"
        );
        self.max_iterations = max_iterations;
        self
    }

    /// Stops the search between iterations once `time_limit` has elapsed.
    pub fn with_time_limit(&mut self, time_limit: Duration) -> &mut Self {
        self.monitor.add_monitor(TimeLimitMonitor::new(time_limit));
        self
    }

    /// Adds a monitor. Monitors are consulted in insertion order.
    pub fn with_monitor<M>(&mut self, monitor: M) -> &mut Self
    where
        M: GraspMonitor<W> + 'a,
    {
        self.monitor.add_monitor(monitor);
        self
    }

    /// Builds the metaheuristic.
    pub fn build(self) -> GraspMetaheuristic<'a, W> {
        GraspMetaheuristic {
            constructive: self.constructive,
            local_search: self.local_search,
            monitor: self.monitor,
            max_iterations: self.max_iterations,
            name: format!("GRASP Metaheuristic ({} iters)", self.max_iterations),
        }
    }
}
