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

use std::time::Duration;
use steiner_core::num::SteinerWeight;

/// Counters collected while a `GraspMetaheuristic` runs.
#[derive(Debug, Clone, PartialEq)]
pub struct GraspStatistics<W> {
    /// Number of completed GRASP iterations.
    pub iterations: u64,

    /// Number of solutions produced by the construction phase.
    pub constructed_solutions: u64,

    /// Number of local-search runs that lowered the objective value.
    pub improving_local_searches: u64,

    /// Number of times the incumbent was replaced.
    pub incumbent_updates: u64,

    /// Objective value of the incumbent, if any iteration completed.
    pub best_objective: Option<W>,

    /// Total wall-clock time of the run.
    pub time_total: Duration,
}

impl<W> Default for GraspStatistics<W> {
    fn default() -> Self {
        Self {
            iterations: 0,
            constructed_solutions: 0,
            improving_local_searches: 0,
            incumbent_updates: 0,
            best_objective: None,
            time_total: Duration::ZERO,
        }
    }
}

impl<W> GraspStatistics<W>
where
    W: SteinerWeight,
{
    /// Called after each completed iteration.
    #[inline]
    pub fn on_iteration(&mut self) {
        self.iterations = self.iterations.saturating_add(1);
    }

    /// Called when the construction phase returns a solution.
    #[inline]
    pub fn on_constructed_solution(&mut self) {
        self.constructed_solutions = self.constructed_solutions.saturating_add(1);
    }

    /// Called when a local-search run improved its starting solution.
    #[inline]
    pub fn on_improving_local_search(&mut self) {
        self.improving_local_searches = self.improving_local_searches.saturating_add(1);
    }

    /// Called when a new incumbent with objective value `objective` is stored.
    #[inline]
    pub fn on_incumbent_update(&mut self, objective: W) {
        self.incumbent_updates = self.incumbent_updates.saturating_add(1);
        self.best_objective = Some(objective);
    }

    /// Sets the total time of the run.
    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl<W> std::fmt::Display for GraspStatistics<W>
where
    W: SteinerWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Steiner-GRASP Statistics:")?;
        writeln!(f, "   Iterations:                {}", self.iterations)?;
        writeln!(f, "   Constructed Solutions:     {}", self.constructed_solutions)?;
        writeln!(f, "   Improving Local Searches:  {}", self.improving_local_searches)?;
        writeln!(f, "   Incumbent Updates:         {}", self.incumbent_updates)?;
        match self.best_objective {
            Some(best) => writeln!(f, "   Best Objective:            {}", best)?,
            None => writeln!(f, "   Best Objective:            None")?,
        }
        writeln!(f, "   Total Time:               {:?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = GraspStatistics::<f64>::default();
        assert_eq!(stats.best_objective, None);

        stats.on_iteration();
        stats.on_iteration();
        stats.on_constructed_solution();
        stats.on_improving_local_search();
        stats.on_incumbent_update(12.5);
        stats.on_incumbent_update(10.0);

        assert_eq!(stats.iterations, 2);
        assert_eq!(stats.constructed_solutions, 1);
        assert_eq!(stats.improving_local_searches, 1);
        assert_eq!(stats.incumbent_updates, 2);
        assert_eq!(stats.best_objective, Some(10.0));
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = GraspStatistics::<f64> {
            iterations: u64::MAX,
            ..Default::default()
        };
        stats.on_iteration();
        assert_eq!(stats.iterations, u64::MAX);
    }

    #[test]
    fn test_display() {
        let mut stats = GraspStatistics::<f64>::default();
        let text = stats.to_string();
        assert!(text.contains("Best Objective:            None"));

        stats.on_incumbent_update(42.0);
        stats.set_total_time(Duration::from_millis(5));
        let text = stats.to_string();
        assert!(text.contains("Best Objective:            42"));
        assert!(text.contains("5ms"));
    }
}
