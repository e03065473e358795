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

//! Hooks into the GRASP loop.
//!
//! A `GraspMonitor` observes the run (start, every completed iteration, every
//! new incumbent, end) and may stop it through `search_command`. Monitors are
//! consulted after each completed iteration, so they never interrupt a
//! construction or a local search midway.

use crate::stats::GraspStatistics;
use steiner_core::num::SteinerWeight;
use steiner_model::{problem::Problem, solution::Solution};

/// The verdict of a monitor on whether the search may continue.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

pub trait GraspMonitor<W>
where
    W: SteinerWeight,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called before the first iteration.
    fn on_start(&mut self, problem: &Problem<W>);

    /// Called after every completed iteration with the locally optimal
    /// solution of that iteration.
    fn on_iteration(&mut self, solution: &Solution<'_, W>, statistics: &GraspStatistics<W>);

    /// Called when `solution` becomes the new incumbent.
    fn on_new_incumbent(&mut self, solution: &Solution<'_, W>, statistics: &GraspStatistics<W>);

    /// Called once the run has finished.
    fn on_end(&mut self, best_solution: &Solution<'_, W>, statistics: &GraspStatistics<W>);

    /// Determines whether the run continues with another iteration.
    fn search_command(&mut self, _statistics: &GraspStatistics<W>) -> SearchCommand {
        SearchCommand::Continue
    }
}

impl<W> std::fmt::Debug for dyn GraspMonitor<W>
where
    W: SteinerWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GraspMonitor {{ name: {} }}", self.name())
    }
}

impl<W> std::fmt::Display for dyn GraspMonitor<W>
where
    W: SteinerWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GraspMonitor: {}", self.name())
    }
}
