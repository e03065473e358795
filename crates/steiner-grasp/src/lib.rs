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

//! # Steiner GRASP
//!
//! **Greedy Randomized Adaptive Search for the Steiner Forest Problem.**
//!
//! Each GRASP iteration builds a feasible solution with a randomized greedy
//! construction and then improves it to a local optimum. The best solution
//! over all iterations is returned.
//!
//! ## Architecture
//!
//! * **`heuristic`**: the object-safe strategy traits `ConstructiveHeuristic`,
//!   `ImprovementHeuristic` and `Solver`.
//! * **`constructive`**: `GraspConstructive`, which merges demands sharing an
//!   endpoint, pairs them up at random and routes them through a restricted
//!   candidate list on a private working graph.
//! * **`local_search`**: `DestroyRepairLocalSearch`, which removes one edge at a
//!   time, reroutes the severed pairs around it and prunes dangling leaves.
//! * **`metaheuristic`**: `GraspMetaheuristic`, the construct-then-improve loop
//!   with injected strategies.
//! * **`monitor`**: hooks and stopping criteria for the loop (time limit,
//!   iteration limit, tracing log, composition).
//! * **`stats`** / **`result`**: run statistics and the final outcome.
//!
//! ## Reproducibility
//!
//! Every randomized component owns its random source. Seeding those sources
//! (for example with `rand_chacha::ChaCha8Rng::seed_from_u64`) makes a whole run
//! deterministic.

pub mod constructive;
pub mod heuristic;
pub mod local_search;
pub mod metaheuristic;
pub mod monitor;
pub mod result;
pub mod stats;
