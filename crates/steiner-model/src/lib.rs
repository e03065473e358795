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

//! # Steiner Model
//!
//! **The domain model of the Steiner Forest Problem (SFP).**
//!
//! Given a weighted, undirected graph and a list of terminal pairs, the SFP
//! asks for a minimum-weight set of edges such that every pair lies in one
//! connected component. This crate defines how an instance and a candidate
//! answer are represented, independent of any particular heuristic.
//!
//! ## Architecture
//!
//! * **`problem`**: `Problem` (immutable graph plus terminal pairs, validated
//!   on construction) and `ProblemBuilder`.
//! * **`solution`**: `Solution`, a bitset of active edges with a cached
//!   objective value that borrows the `Problem` it belongs to.
//! * **`moves`**: `Move`, the only way to change a `Solution`. A move carries
//!   its cost delta and can be undone exactly.
//! * **`neighborhood`**: enumerations of all single-edge Add and Remove moves.
//! * **`loading`**: `ProblemLoader`, which reads the sectioned text format.
//!
//! ## Design Philosophy
//!
//! 1.  **Borrowed back-references**: a `Solution<'p, W>` borrows its `Problem`,
//!     so the problem provably outlives every solution built against it.
//! 2.  **Incremental bookkeeping**: the objective value is never recomputed;
//!     every move adjusts it by a delta fixed when the move is created.
//! 3.  **Fail-Fast**: invalid instances are rejected with a `ProblemError`
//!     before any heuristic sees them.

pub mod loading;
pub mod moves;
pub mod neighborhood;
pub mod problem;
pub mod solution;
