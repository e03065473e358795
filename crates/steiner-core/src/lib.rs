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

//! # Steiner Core
//!
//! Foundational data structures for the Steiner forest heuristics. This crate
//! holds everything that is independent of the optimization model itself:
//! the compressed graph layout, union-find connectivity tracking, the
//! reusable shortest-path engine, and the strongly typed indices that keep
//! nodes and edges from being mixed up.
//!
//! ## Modules
//!
//! - `graph`: Compressed Sparse Row (CSR) graph with mirror-edge links,
//!   a per-edge active flag and an incrementally maintained total weight.
//! - `dsu`: Disjoint set union with path compression and union by rank,
//!   reusable across many trials through `reset`.
//! - `shortest_path`: Dijkstra engine that reuses its scratch memory between
//!   queries via a generation token instead of clearing arrays.
//! - `num`: The `SteinerWeight` numeric trait alias used for edge weights.
//! - `utils`: Phantom-tagged indices (`TypedIndex<T>`, `NodeIndex`, `EdgeIndex`).
//!
//! ## Purpose
//!
//! The heuristics issue thousands of connectivity and path queries per run.
//! Every structure here is sized once and reused, so the hot loops of the
//! construction and local-search phases stay free of per-query allocation.

pub mod dsu;
pub mod graph;
pub mod num;
pub mod shortest_path;
pub mod utils;
