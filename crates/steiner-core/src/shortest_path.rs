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

//! # Reusable Shortest-Path Engine
//!
//! `ShortestPathEngine` answers single-source, single-target queries with
//! Dijkstra's algorithm over the active edges of a `Graph`. The construction
//! and local-search phases issue thousands of such queries against graphs
//! whose weights change between calls, so the engine owns its scratch state
//! (distances, predecessors, heap, path buffer) and reuses it.
//!
//! ## Token-based lazy reset
//!
//! Instead of clearing the distance array before each query, every query bumps
//! a generation token. A node's distance and predecessor are meaningful only if
//! its recorded token equals the current one; any other node is treated as
//! unseen with distance `+inf`. A query therefore costs only what it touches.
//!
//! ## Unreachable targets
//!
//! Queries return `None` when the target cannot be reached over active edges
//! with finite weight. Edges carrying an infinite weight are never relaxed,
//! which lets callers penalize an edge to remove it from consideration.
//!
//! The engine reads the graph anew on every call and caches nothing about it.
//! One engine must not be shared between concurrent queries.

use crate::{
    graph::Graph,
    num::SteinerWeight,
    utils::index::{EdgeIndex, NodeIndex},
};
use std::collections::BinaryHeap;

/// A found path, borrowed from the engine's path buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShortestPath<'a, W> {
    cost: W,
    edges: &'a [EdgeIndex],
}

impl<'a, W> ShortestPath<'a, W>
where
    W: Copy,
{
    /// Returns the total weight of the path.
    #[inline]
    pub fn cost(&self) -> W {
        self.cost
    }

    /// Returns the edges of the path, ordered from source to target.
    #[inline]
    pub fn edges(&self) -> &'a [EdgeIndex] {
        self.edges
    }

    /// Returns `true` if source and target coincide.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct HeapEntry<W> {
    distance: W,
    node: usize,
}

impl<W: PartialOrd> PartialEq for HeapEntry<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl<W: PartialOrd> Eq for HeapEntry<W> {}

impl<W: PartialOrd> PartialOrd for HeapEntry<W> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: PartialOrd> Ord for HeapEntry<W> {
    // Reversed so that `BinaryHeap` pops the smallest distance first.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Dijkstra engine with reusable, lazily reset scratch memory.
///
/// # Examples
///
/// ```rust
/// # use steiner_core::graph::GraphBuilder;
/// # use steiner_core::shortest_path::ShortestPathEngine;
/// # use steiner_core::utils::index::NodeIndex;
/// let mut builder = GraphBuilder::<f64>::new(3);
/// builder
///     .add_edge(NodeIndex::new(0), NodeIndex::new(1), 10.0)
///     .add_edge(NodeIndex::new(1), NodeIndex::new(2), 10.0)
///     .add_edge(NodeIndex::new(0), NodeIndex::new(2), 5.0);
/// let graph = builder.build().unwrap();
///
/// let mut engine = ShortestPathEngine::new(graph.num_nodes());
/// let path = engine
///     .shortest_path(&graph, NodeIndex::new(0), NodeIndex::new(2))
///     .unwrap();
/// assert_eq!(path.cost(), 5.0);
/// assert_eq!(path.edges().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ShortestPathEngine<W> {
    distance: Vec<W>,
    predecessor: Vec<(NodeIndex, EdgeIndex)>,
    visited_token: Vec<u32>,
    current_token: u32,
    heap: BinaryHeap<HeapEntry<W>>,
    path: Vec<EdgeIndex>,
}

impl<W> ShortestPathEngine<W>
where
    W: SteinerWeight,
{
    /// Creates an engine sized for graphs with `num_nodes` nodes.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            distance: vec![W::infinity(); num_nodes],
            predecessor: vec![(NodeIndex::new(0), EdgeIndex::new(0)); num_nodes],
            visited_token: vec![0; num_nodes],
            current_token: 0,
            heap: BinaryHeap::with_capacity(num_nodes),
            path: Vec::new(),
        }
    }

    /// Returns the number of nodes the scratch memory currently covers.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.visited_token.len()
    }

    fn begin(&mut self, num_nodes: usize) -> u32 {
        if self.visited_token.len() < num_nodes {
            self.distance.resize(num_nodes, W::infinity());
            self.predecessor
                .resize(num_nodes, (NodeIndex::new(0), EdgeIndex::new(0)));
            self.visited_token.resize(num_nodes, 0);
        }

        self.current_token = self.current_token.wrapping_add(1);
        if self.current_token == 0 {
            self.visited_token.fill(0);
            self.current_token = 1;
        }
        self.heap.clear();
        self.current_token
    }

    #[inline]
    fn tentative(&self, node: usize, token: u32) -> W {
        if self.visited_token[node] == token {
            self.distance[node]
        } else {
            W::infinity()
        }
    }

    /// Runs Dijkstra from `source` until `target` is settled.
    /// Returns the token of the query if the target was reached.
    fn search(&mut self, graph: &Graph<W>, source: NodeIndex, target: NodeIndex) -> Option<u32> {
        let n = graph.num_nodes();
        assert!(
            source.get() < n,
            "called `ShortestPathEngine::search` with source out of bounds: the len is {} but the index is {}",
            n,
            source.get()
        );
        assert!(
            target.get() < n,
            "called `ShortestPathEngine::search` with target out of bounds: the len is {} but the index is {}",
            n,
            target.get()
        );

        let token = self.begin(n);
        let s = source.get();
        self.visited_token[s] = token;
        self.distance[s] = W::zero();
        self.heap.push(HeapEntry {
            distance: W::zero(),
            node: s,
        });

        let offsets = graph.offsets();
        let edges = graph.edges();

        while let Some(HeapEntry { distance, node: u }) = self.heap.pop() {
            if distance > self.distance[u] {
                continue;
            }
            if u == target.get() {
                return Some(token);
            }

            for (k, edge) in edges[offsets[u]..offsets[u + 1]].iter().enumerate() {
                if !edge.is_active() {
                    continue;
                }

                let v = edge.target().get();
                let candidate = distance + edge.weight();
                if candidate < self.tentative(v, token) {
                    self.visited_token[v] = token;
                    self.distance[v] = candidate;
                    self.predecessor[v] = (NodeIndex::new(u), EdgeIndex::new(offsets[u] + k));
                    self.heap.push(HeapEntry {
                        distance: candidate,
                        node: v,
                    });
                }
            }
        }

        None
    }

    /// Returns the cost of a shortest `source -> target` path over active
    /// edges, or `None` if the target is unreachable.
    ///
    /// # Panics
    ///
    /// Panics if either node is not in `0..graph.num_nodes()`.
    pub fn distance(&mut self, graph: &Graph<W>, source: NodeIndex, target: NodeIndex) -> Option<W> {
        self.search(graph, source, target)
            .map(|_| self.distance[target.get()])
    }

    /// Returns a shortest `source -> target` path over active edges, or
    /// `None` if the target is unreachable.
    ///
    /// The returned edges are ordered from `source` to `target`. The slice
    /// borrows the engine's path buffer and is overwritten by the next query.
    ///
    /// # Panics
    ///
    /// Panics if either node is not in `0..graph.num_nodes()`.
    pub fn shortest_path(
        &mut self,
        graph: &Graph<W>,
        source: NodeIndex,
        target: NodeIndex,
    ) -> Option<ShortestPath<'_, W>> {
        self.search(graph, source, target)?;

        self.path.clear();
        let mut current = target;
        while current != source {
            let (previous, edge) = self.predecessor[current.get()];
            self.path.push(edge);
            current = previous;
        }
        self.path.reverse();

        Some(ShortestPath {
            cost: self.distance[target.get()],
            edges: &self.path,
        })
    }
}
