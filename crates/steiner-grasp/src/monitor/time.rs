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
use std::time::{Duration, Instant};
use steiner_core::num::SteinerWeight;
use steiner_model::{problem::Problem, solution::Solution};

/// Stops the run once a wall-clock budget is spent.
///
/// The budget is checked between iterations, so a run can overshoot it by
/// at most one iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor {
    start_time: Instant,
    time_limit: Duration,
    clock_check_mask: u64,
}

impl TimeLimitMonitor {
    /// Default mask for clock checks.
    /// GRASP iterations are expensive, so the clock is read after every one.
    const DEFAULT_ITERATION_CLOCK_CHECK_MASK: u64 = 0x0000;

    /// Creates a new `TimeLimitMonitor` with the specified time limit.
    pub fn new(time_limit: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            time_limit,
            clock_check_mask: Self::DEFAULT_ITERATION_CLOCK_CHECK_MASK,
        }
    }

    /// Creates a new `TimeLimitMonitor` with a custom iteration clock check mask.
    /// Lower mask values check more often; higher values check less often.
    pub fn with_mask(time_limit: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            time_limit,
            clock_check_mask,
        }
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl<W> GraspMonitor<W> for TimeLimitMonitor
where
    W: SteinerWeight,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_start(&mut self, _problem: &Problem<W>) {
        self.start_time = Instant::now();
    }

    fn on_iteration(&mut self, _solution: &Solution<'_, W>, _statistics: &GraspStatistics<W>) {}

    fn on_new_incumbent(&mut self, _solution: &Solution<'_, W>, _statistics: &GraspStatistics<W>) {}

    fn on_end(&mut self, _best_solution: &Solution<'_, W>, _statistics: &GraspStatistics<W>) {}

    fn search_command(&mut self, statistics: &GraspStatistics<W>) -> SearchCommand {
        if (statistics.iterations & self.clock_check_mask) == 0
            && self.start_time.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate("time limit exceeded".to_string());
        }
        SearchCommand::Continue
    }
}
