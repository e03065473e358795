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

use crate::{
    monitor::grasp_monitor::{GraspMonitor, SearchCommand},
    stats::GraspStatistics,
};
use steiner_core::num::SteinerWeight;
use steiner_model::{problem::Problem, solution::Solution};

/// Stops the run once a number of iterations has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationLimitMonitor {
    limit: u64,
}

impl IterationLimitMonitor {
    /// Creates a monitor that stops after `limit` completed iterations.
    #[inline]
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    #[inline]
    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl<W> GraspMonitor<W> for IterationLimitMonitor
where
    W: SteinerWeight,
{
    fn name(&self) -> &str {
        "IterationLimitMonitor"
    }

    fn on_start(&mut self, _problem: &Problem<W>) {}

    fn on_iteration(&mut self, _solution: &Solution<'_, W>, _statistics: &GraspStatistics<W>) {}

    fn on_new_incumbent(&mut self, _solution: &Solution<'_, W>, _statistics: &GraspStatistics<W>) {}

    fn on_end(&mut self, _best_solution: &Solution<'_, W>, _statistics: &GraspStatistics<W>) {}

    fn search_command(&mut self, statistics: &GraspStatistics<W>) -> SearchCommand {
        if statistics.iterations >= self.limit {
            return SearchCommand::Terminate("iteration limit reached".to_string());
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminates_at_limit() {
        let mut monitor = IterationLimitMonitor::new(2);
        let mut stats = GraspStatistics::<f64>::default();

        stats.on_iteration();
        assert_eq!(monitor.search_command(&stats), SearchCommand::Continue);

        stats.on_iteration();
        assert_eq!(
            monitor.search_command(&stats),
            SearchCommand::Terminate("iteration limit reached".to_string())
        );
    }
}
