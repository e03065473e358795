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

/// Fans every hook out to a list of monitors.
///
/// `search_command` returns the first termination request in insertion
/// order. An empty composite never stops the search.
#[derive(Default)]
pub struct CompositeGraspMonitor<'a, W>
where
    W: SteinerWeight,
{
    monitors: Vec<Box<dyn GraspMonitor<W> + 'a>>,
}

impl<'a, W> CompositeGraspMonitor<'a, W>
where
    W: SteinerWeight,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: GraspMonitor<W> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline]
    pub fn add_boxed_monitor(&mut self, monitor: Box<dyn GraspMonitor<W> + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline]
    pub fn monitors(&self) -> &[Box<dyn GraspMonitor<W> + 'a>] {
        &self.monitors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<W> std::fmt::Debug for CompositeGraspMonitor<'_, W>
where
    W: SteinerWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.monitors.iter().map(|m| m.name()).collect();
        f.debug_struct("CompositeGraspMonitor")
            .field("monitors", &names)
            .finish()
    }
}

impl<W> GraspMonitor<W> for CompositeGraspMonitor<'_, W>
where
    W: SteinerWeight,
{
    fn name(&self) -> &str {
        "CompositeGraspMonitor"
    }

    fn on_start(&mut self, problem: &Problem<W>) {
        for m in &mut self.monitors {
            m.on_start(problem);
        }
    }

    fn on_iteration(&mut self, solution: &Solution<'_, W>, statistics: &GraspStatistics<W>) {
        for m in &mut self.monitors {
            m.on_iteration(solution, statistics);
        }
    }

    fn on_new_incumbent(&mut self, solution: &Solution<'_, W>, statistics: &GraspStatistics<W>) {
        for m in &mut self.monitors {
            m.on_new_incumbent(solution, statistics);
        }
    }

    fn on_end(&mut self, best_solution: &Solution<'_, W>, statistics: &GraspStatistics<W>) {
        for m in &mut self.monitors {
            m.on_end(best_solution, statistics);
        }
    }

    fn search_command(&mut self, statistics: &GraspStatistics<W>) -> SearchCommand {
        for m in &mut self.monitors {
            if let SearchCommand::Terminate(msg) = m.search_command(statistics) {
                return SearchCommand::Terminate(msg);
            }
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::iteration::IterationLimitMonitor;

    struct Stopper(&'static str);

    impl GraspMonitor<f64> for Stopper {
        fn name(&self) -> &str {
            "Stopper"
        }
        fn on_start(&mut self, _problem: &Problem<f64>) {}
        fn on_iteration(&mut self, _s: &Solution<'_, f64>, _st: &GraspStatistics<f64>) {}
        fn on_new_incumbent(&mut self, _s: &Solution<'_, f64>, _st: &GraspStatistics<f64>) {}
        fn on_end(&mut self, _s: &Solution<'_, f64>, _st: &GraspStatistics<f64>) {}
        fn search_command(&mut self, _st: &GraspStatistics<f64>) -> SearchCommand {
            SearchCommand::Terminate(self.0.to_string())
        }
    }

    #[test]
    fn test_empty_composite_continues() {
        let mut composite = CompositeGraspMonitor::<f64>::new();
        assert!(composite.is_empty());
        assert_eq!(
            composite.search_command(&GraspStatistics::default()),
            SearchCommand::Continue
        );
    }

    #[test]
    fn test_first_terminate_wins() {
        let mut composite = CompositeGraspMonitor::<f64>::with_capacity(3);
        composite.add_monitor(IterationLimitMonitor::new(100));
        composite.add_monitor(Stopper("first"));
        composite.add_boxed_monitor(Box::new(Stopper("second")));
        assert_eq!(composite.len(), 3);

        assert_eq!(
            composite.search_command(&GraspStatistics::default()),
            SearchCommand::Terminate("first".to_string())
        );
    }
}
