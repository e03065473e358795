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

use crate::{monitor::grasp_monitor::GraspMonitor, stats::GraspStatistics};
use std::time::Instant;
use steiner_core::num::SteinerWeight;
use steiner_model::{problem::Problem, solution::Solution};

/// Reports the progress of a run through `tracing`.
///
/// Incumbent improvements are logged at `info`, every iteration at `debug`.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
}

impl LogMonitor {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LogMonitor")
    }
}

impl<W> GraspMonitor<W> for LogMonitor
where
    W: SteinerWeight,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_start(&mut self, problem: &Problem<W>) {
        self.start_time = Instant::now();
        tracing::info!(
            instance = problem.name(),
            nodes = problem.num_nodes(),
            edges = problem.num_edges(),
            terminal_pairs = problem.num_terminal_pairs(),
            "GRASP search started"
        );
    }

    fn on_iteration(&mut self, solution: &Solution<'_, W>, statistics: &GraspStatistics<W>) {
        tracing::debug!(
            iteration = statistics.iterations,
            objective = %solution.objective_value(),
            elapsed_ms = self.start_time.elapsed().as_millis() as u64,
            "iteration finished"
        );
    }

    fn on_new_incumbent(&mut self, solution: &Solution<'_, W>, statistics: &GraspStatistics<W>) {
        tracing::info!(
            iteration = statistics.iterations,
            objective = %solution.objective_value(),
            elapsed_ms = self.start_time.elapsed().as_millis() as u64,
            "new incumbent"
        );
    }

    fn on_end(&mut self, best_solution: &Solution<'_, W>, statistics: &GraspStatistics<W>) {
        tracing::info!(
            iterations = statistics.iterations,
            incumbent_updates = statistics.incumbent_updates,
            objective = %best_solution.objective_value(),
            elapsed_ms = self.start_time.elapsed().as_millis() as u64,
            "GRASP search finished"
        );
    }
}
