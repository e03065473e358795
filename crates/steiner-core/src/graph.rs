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

//! # Compressed Sparse Row Graph
//!
//! `Graph<W>` stores all physical (directed) edges in one contiguous array,
//! grouped by source node, together with an offset array that marks where the
//! outgoing edges of each node start. An undirected logical edge is stored as
//! two physical edges that point at each other through their `reverse` link.
//!
//! ## Mutability
//!
//! The topology (node count, edge count, adjacency) is fixed once the graph is
//! built. Only two things may change afterwards, and only through the setters
//! on `Graph`:
//!
//! - the **active** flag of an edge (`set_edge_status`), used as a soft delete;
//! - the **weight** of an edge (`set_edge_weight`), used by the heuristics to
//!   penalize or discount edges on private working copies.
//!
//! Both setters update the mirror edge as well and keep `total_weight` in sync,
//! so the two directions of a logical edge can never disagree.
//!
//! ## Reachability
//!
//! `is_reachable` runs a breadth-first search over active edges. The search
//! reuses a `ReachabilityScratch` (visited tokens and a flat queue). The
//! convenience method keeps one scratch per thread; callers that want full
//! control pass their own scratch to `is_reachable_with`.

use crate::{
    num::SteinerWeight,
    utils::index::{EdgeIndex, NodeIndex},
};
use std::cell::RefCell;

/// A physical, directed edge of the CSR layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<W> {
    source: NodeIndex,
    target: NodeIndex,
    weight: W,
    active: bool,
    reverse: Option<EdgeIndex>,
}

impl<W> Edge<W>
where
    W: Copy,
{
    /// Returns the node this edge leaves from.
    #[inline]
    pub fn source(&self) -> NodeIndex {
        self.source
    }

    /// Returns the node this edge points to.
    #[inline]
    pub fn target(&self) -> NodeIndex {
        self.target
    }

    /// Returns the current weight of this edge.
    #[inline]
    pub fn weight(&self) -> W {
        self.weight
    }

    /// Returns `true` if the edge is active.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the mirror edge, if the edge has one.
    #[inline]
    pub fn reverse(&self) -> Option<EdgeIndex> {
        self.reverse
    }
}

/// Errors raised while building a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The graph must contain at least one node.
    NoNodes,
    /// The graph must contain at least one edge.
    NoEdges,
    /// An edge references a node outside `0..num_nodes`.
    NodeOutOfBounds {
        source: usize,
        target: usize,
        num_nodes: usize,
    },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::NoNodes => write!(f, "the number of nodes must be positive"),
            GraphError::NoEdges => write!(f, "the edge list cannot be empty"),
            GraphError::NodeOutOfBounds {
                source,
                target,
                num_nodes,
            } => write!(
                f,
                "edge ({} -> {}) references a node out of bounds: the graph has {} nodes",
                source, target, num_nodes
            ),
        }
    }
}

impl std::error::Error for GraphError {}

/// Collects edge triples and turns them into a CSR `Graph`.
///
/// # Examples
///
/// ```rust
/// # use steiner_core::graph::GraphBuilder;
/// # use steiner_core::utils::index::NodeIndex;
/// let mut builder = GraphBuilder::<f64>::new(3);
/// builder
///     .add_edge(NodeIndex::new(0), NodeIndex::new(1), 10.0)
///     .add_edge(NodeIndex::new(1), NodeIndex::new(2), 5.0);
/// let graph = builder.build().unwrap();
///
/// assert_eq!(graph.num_nodes(), 3);
/// assert_eq!(graph.num_edges(), 4);
/// assert_eq!(graph.total_weight(), 15.0);
/// ```
#[derive(Debug, Clone)]
pub struct GraphBuilder<W> {
    num_nodes: usize,
    triples: Vec<(NodeIndex, NodeIndex, W)>,
    bidirectional: bool,
}

impl<W> GraphBuilder<W>
where
    W: SteinerWeight,
{
    /// Creates a builder for a bidirectional graph with `num_nodes` nodes.
    #[inline]
    pub fn new(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            triples: Vec::new(),
            bidirectional: true,
        }
    }

    /// Creates a builder with room for `num_edges` logical edges.
    #[inline]
    pub fn preallocated(num_nodes: usize, num_edges: usize) -> Self {
        Self {
            num_nodes,
            triples: Vec::with_capacity(num_edges),
            bidirectional: true,
        }
    }

    /// Sets whether every edge gets a mirror edge in the opposite direction.
    #[inline]
    pub fn set_bidirectional(&mut self, bidirectional: bool) -> &mut Self {
        self.bidirectional = bidirectional;
        self
    }

    /// Adds a logical edge. Bounds are validated in `build`.
    #[inline]
    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex, weight: W) -> &mut Self {
        self.triples.push((source, target, weight));
        self
    }

    /// Adds several logical edges.
    #[inline]
    pub fn add_edges<I>(&mut self, edges: I) -> &mut Self
    where
        I: IntoIterator<Item = (NodeIndex, NodeIndex, W)>,
    {
        self.triples.extend(edges);
        self
    }

    /// Returns the number of nodes the graph will have.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns the number of logical edges added so far.
    #[inline]
    pub fn num_logical_edges(&self) -> usize {
        self.triples.len()
    }

    /// Builds the graph.
    ///
    /// Triples are grouped by source (and by target too when bidirectional)
    /// into temporary adjacency lists, flattened into CSR order and finally
    /// linked to their mirrors. When parallel edges exist, each edge is bound
    /// to the first unmatched candidate in CSR order.
    pub fn build(self) -> Result<Graph<W>, GraphError> {
        let n = self.num_nodes;
        if n == 0 {
            return Err(GraphError::NoNodes);
        }
        if self.triples.is_empty() {
            return Err(GraphError::NoEdges);
        }

        let mut adjacency: Vec<Vec<(NodeIndex, W)>> = vec![Vec::new(); n];
        for &(source, target, weight) in &self.triples {
            if source.get() >= n || target.get() >= n {
                return Err(GraphError::NodeOutOfBounds {
                    source: source.get(),
                    target: target.get(),
                    num_nodes: n,
                });
            }
            adjacency[source.get()].push((target, weight));
            if self.bidirectional {
                adjacency[target.get()].push((source, weight));
            }
        }

        let num_edges = self.triples.len() * if self.bidirectional { 2 } else { 1 };
        let mut offsets = Vec::with_capacity(n + 1);
        let mut edges = Vec::with_capacity(num_edges);

        offsets.push(0);
        for (source, list) in adjacency.into_iter().enumerate() {
            for (target, weight) in list {
                edges.push(Edge {
                    source: NodeIndex::new(source),
                    target,
                    weight,
                    active: true,
                    reverse: None,
                });
            }
            offsets.push(edges.len());
        }

        let mut graph = Graph {
            num_nodes: n,
            offsets,
            edges,
            bidirectional: self.bidirectional,
            finite_weight: W::zero(),
            infinite_active: 0,
        };

        for &(_, _, weight) in &self.triples {
            graph.add_to_total(weight);
        }

        if graph.bidirectional {
            graph.link_mirrors();
        }

        Ok(graph)
    }
}

/// A graph in Compressed Sparse Row layout with mutable weights and
/// active flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<W> {
    num_nodes: usize,
    offsets: Vec<usize>,
    edges: Vec<Edge<W>>,
    bidirectional: bool,
    finite_weight: W,
    infinite_active: usize,
}

impl<W> Graph<W>
where
    W: SteinerWeight,
{
    fn link_mirrors(&mut self) {
        for i in 0..self.edges.len() {
            if self.edges[i].reverse.is_some() {
                continue;
            }

            let source = self.edges[i].source;
            let target = self.edges[i].target;
            let start = self.offsets[target.get()];
            let end = self.offsets[target.get() + 1];
            let candidate = (start..end).find(|&j| {
                j != i && self.edges[j].target == source && self.edges[j].reverse.is_none()
            });

            if let Some(j) = candidate {
                self.edges[i].reverse = Some(EdgeIndex::new(j));
                self.edges[j].reverse = Some(EdgeIndex::new(i));
            }
        }
    }

    #[inline]
    fn add_to_total(&mut self, weight: W) {
        if weight.is_infinite() {
            self.infinite_active += 1;
        } else {
            self.finite_weight = self.finite_weight + weight;
        }
    }

    #[inline]
    fn sub_from_total(&mut self, weight: W) {
        if weight.is_infinite() {
            self.infinite_active = self.infinite_active.saturating_sub(1);
        } else {
            self.finite_weight = self.finite_weight - weight;
        }
    }

    #[inline]
    fn check_node(&self, node: NodeIndex, method: &str) {
        assert!(
            node.get() < self.num_nodes,
            "called `Graph::{}` with node index out of bounds: the len is {} but the index is {}",
            method,
            self.num_nodes,
            node.get()
        );
    }

    #[inline]
    fn check_edge(&self, edge: EdgeIndex, method: &str) {
        assert!(
            edge.get() < self.edges.len(),
            "called `Graph::{}` with edge index out of bounds: the len is {} but the index is {}",
            method,
            self.edges.len(),
            edge.get()
        );
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns the number of physical (directed) edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if every edge was created with a mirror.
    #[inline]
    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }

    /// Returns the sum of the weights of all active logical edges.
    /// A mirrored pair counts once. Returns `+inf` while any active edge
    /// carries an infinite weight.
    #[inline]
    pub fn total_weight(&self) -> W {
        if self.infinite_active > 0 {
            W::infinity()
        } else {
            self.finite_weight
        }
    }

    /// Returns the CSR offsets; `offsets()[n]` is the number of edges.
    #[inline]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Returns the contiguous edge array.
    #[inline]
    pub fn edges(&self) -> &[Edge<W>] {
        &self.edges
    }

    /// Returns the edge at `edge`.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is not in `0..num_edges()`.
    #[inline]
    pub fn edge(&self, edge: EdgeIndex) -> &Edge<W> {
        self.check_edge(edge, "edge");
        &self.edges[edge.get()]
    }

    /// Returns the current weight of `edge`.
    #[inline]
    pub fn edge_weight(&self, edge: EdgeIndex) -> W {
        self.edge(edge).weight
    }

    /// Returns `true` if `edge` is active.
    #[inline]
    pub fn is_edge_active(&self, edge: EdgeIndex) -> bool {
        self.edge(edge).active
    }

    /// Returns the mirror of `edge`, if any.
    #[inline]
    pub fn reverse_edge(&self, edge: EdgeIndex) -> Option<EdgeIndex> {
        self.edge(edge).reverse
    }

    /// Returns `true` if `edge` is the representative of its logical edge:
    /// either `source < target`, or the edge has no mirror at all.
    #[inline]
    pub fn is_canonical(&self, edge: EdgeIndex) -> bool {
        let e = self.edge(edge);
        e.reverse.is_none() || e.source < e.target
    }

    /// Returns the number of outgoing physical edges of `node`.
    #[inline]
    pub fn degree(&self, node: NodeIndex) -> usize {
        self.check_node(node, "degree");
        self.offsets[node.get() + 1] - self.offsets[node.get()]
    }

    /// Iterates over the outgoing edges of `node` in CSR order.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not in `0..num_nodes()`.
    #[inline]
    pub fn outgoing_edges(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (EdgeIndex, &Edge<W>)> + '_ {
        self.check_node(node, "outgoing_edges");
        let start = self.offsets[node.get()];
        let end = self.offsets[node.get() + 1];
        self.edges[start..end]
            .iter()
            .enumerate()
            .map(move |(k, e)| (EdgeIndex::new(start + k), e))
    }

    /// Returns the first edge `source -> target` in CSR order, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use steiner_core::graph::GraphBuilder;
    /// # use steiner_core::utils::index::NodeIndex;
    /// let mut builder = GraphBuilder::<f64>::new(3);
    /// builder.add_edge(NodeIndex::new(0), NodeIndex::new(1), 1.0);
    /// let graph = builder.build().unwrap();
    ///
    /// let forward = graph.find_edge(NodeIndex::new(0), NodeIndex::new(1)).unwrap();
    /// let backward = graph.find_edge(NodeIndex::new(1), NodeIndex::new(0)).unwrap();
    /// assert_eq!(graph.reverse_edge(forward), Some(backward));
    /// assert!(graph.find_edge(NodeIndex::new(0), NodeIndex::new(2)).is_none());
    /// ```
    pub fn find_edge(&self, source: NodeIndex, target: NodeIndex) -> Option<EdgeIndex> {
        self.check_node(target, "find_edge");
        self.outgoing_edges(source)
            .find(|(_, e)| e.target == target)
            .map(|(i, _)| i)
    }

    /// Activates or deactivates `edge` and its mirror.
    ///
    /// The total weight changes by the edge's current weight. Setting the
    /// status an edge already has is a no-op.
    pub fn set_edge_status(&mut self, edge: EdgeIndex, active: bool) {
        self.check_edge(edge, "set_edge_status");

        let i = edge.get();
        if self.edges[i].active == active {
            return;
        }

        self.edges[i].active = active;
        let weight = self.edges[i].weight;
        if active {
            self.add_to_total(weight);
        } else {
            self.sub_from_total(weight);
        }

        if let Some(rev) = self.edges[i].reverse {
            self.edges[rev.get()].active = active;
        }
    }

    /// Activates or deactivates every edge.
    pub fn set_all_edges_status(&mut self, active: bool) {
        self.finite_weight = W::zero();
        self.infinite_active = 0;

        for i in 0..self.edges.len() {
            self.edges[i].active = active;
            let counted = match self.edges[i].reverse {
                Some(rev) => i < rev.get(),
                None => true,
            };
            if active && counted {
                let weight = self.edges[i].weight;
                self.add_to_total(weight);
            }
        }
    }

    /// Sets the weight of `edge` and its mirror.
    ///
    /// If the edge is active, the total weight is adjusted accordingly.
    pub fn set_edge_weight(&mut self, edge: EdgeIndex, weight: W) {
        self.check_edge(edge, "set_edge_weight");

        let i = edge.get();
        let old = self.edges[i].weight;
        if self.edges[i].active {
            self.sub_from_total(old);
            self.add_to_total(weight);
        }

        self.edges[i].weight = weight;
        if let Some(rev) = self.edges[i].reverse {
            self.edges[rev.get()].weight = weight;
        }
    }

    /// Returns `true` if any active edge has a negative (or NaN) weight.
    pub fn has_negative_weights(&self) -> bool {
        self.edges
            .iter()
            .any(|e| e.active && (e.weight < W::zero() || e.weight.is_nan()))
    }

    /// Returns `true` if every node can be reached from node `0` over
    /// active edges.
    pub fn is_connected(&self) -> bool {
        let mut visited = vec![false; self.num_nodes];
        let mut queue = Vec::with_capacity(self.num_nodes);
        visited[0] = true;
        queue.push(0usize);

        let mut head = 0;
        while head < queue.len() {
            let u = queue[head];
            head += 1;
            for e in &self.edges[self.offsets[u]..self.offsets[u + 1]] {
                let v = e.target.get();
                if e.active && !visited[v] {
                    visited[v] = true;
                    queue.push(v);
                }
            }
        }

        queue.len() == self.num_nodes
    }

    /// Returns `true` if `target` can be reached from `source` over active
    /// edges, using a scratch buffer owned by the current thread.
    ///
    /// # Panics
    ///
    /// Panics if either node is out of bounds.
    pub fn is_reachable(&self, source: NodeIndex, target: NodeIndex) -> bool {
        thread_local! {
            static SCRATCH: RefCell<ReachabilityScratch> = RefCell::new(ReachabilityScratch::new());
        }

        SCRATCH.with(|scratch| self.is_reachable_with(&mut scratch.borrow_mut(), source, target))
    }

    /// Returns `true` if `target` can be reached from `source` over active
    /// edges, using the caller-owned `scratch`.
    pub fn is_reachable_with(
        &self,
        scratch: &mut ReachabilityScratch,
        source: NodeIndex,
        target: NodeIndex,
    ) -> bool {
        self.check_node(source, "is_reachable");
        self.check_node(target, "is_reachable");

        if source == target {
            return true;
        }

        let token = scratch.begin(self.num_nodes);
        scratch.visited_token[source.get()] = token;
        scratch.queue.push(source.get());

        let mut head = 0;
        while head < scratch.queue.len() {
            let u = scratch.queue[head];
            head += 1;
            if u == target.get() {
                return true;
            }

            for e in &self.edges[self.offsets[u]..self.offsets[u + 1]] {
                let v = e.target.get();
                if e.active && scratch.visited_token[v] != token {
                    scratch.visited_token[v] = token;
                    scratch.queue.push(v);
                }
            }
        }

        false
    }
}

impl<W> std::fmt::Display for Graph<W>
where
    W: SteinerWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Graph (CSR)")?;
        writeln!(f, "   Total Weight:     {}", self.total_weight())?;
        writeln!(
            f,
            "   Bidirectional:    {}",
            if self.bidirectional { "True" } else { "False" }
        )?;
        for node in 0..self.num_nodes {
            write!(f, "   Node {} ->", node)?;
            for e in &self.edges[self.offsets[node]..self.offsets[node + 1]] {
                if e.active {
                    write!(f, " {{Target {}, Weight {}}}", e.target.get(), e.weight)?;
                }
            }
            writeln!(f, ";")?;
        }
        Ok(())
    }
}

/// Reusable scratch memory for breadth-first reachability queries.
///
/// A node counts as visited only if its token equals the token of the
/// current query, so consecutive queries never clear the array.
#[derive(Debug, Clone, Default)]
pub struct ReachabilityScratch {
    visited_token: Vec<u32>,
    queue: Vec<usize>,
    token: u32,
}

impl ReachabilityScratch {
    /// Creates an empty scratch; it grows on first use.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scratch sized for graphs with `num_nodes` nodes.
    #[inline]
    pub fn preallocated(num_nodes: usize) -> Self {
        Self {
            visited_token: vec![0; num_nodes],
            queue: Vec::with_capacity(num_nodes),
            token: 0,
        }
    }

    /// Prepares a new query over `num_nodes` nodes and returns its token.
    fn begin(&mut self, num_nodes: usize) -> u32 {
        if self.visited_token.len() < num_nodes {
            self.visited_token.resize(num_nodes, 0);
        }
        self.queue.clear();

        self.token = self.token.wrapping_add(1);
        if self.token == 0 {
            self.visited_token.fill(0);
            self.token = 1;
        }
        self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn build(num_nodes: usize, triples: &[(usize, usize, f64)]) -> Graph<f64> {
        let mut builder = GraphBuilder::new(num_nodes);
        builder.add_edges(triples.iter().map(|&(u, v, w)| (n(u), n(v), w)));
        builder.build().expect("valid graph")
    }

    #[test]
    fn test_csr_layout_groups_edges_by_source() {
        let g = build(3, &[(0, 1, 1.0), (1, 2, 2.0), (0, 2, 3.0)]);
        assert_eq!(g.num_edges(), 6);
        assert_eq!(g.offsets().len(), 4);
        assert_eq!(g.offsets()[3], g.num_edges());

        for node in 0..3 {
            for (_, e) in g.outgoing_edges(n(node)) {
                assert_eq!(e.source(), n(node));
            }
        }
        assert_eq!(g.degree(n(0)), 2);
        assert_eq!(g.degree(n(1)), 2);
        assert_eq!(g.degree(n(2)), 2);
    }

    #[test]
    fn test_mirrors_point_at_each_other() {
        let g = build(4, &[(0, 1, 1.0), (1, 2, 2.0), (2, 3, 3.0), (3, 0, 4.0)]);
        for (i, e) in g.edges().iter().enumerate() {
            let rev = e.reverse().expect("bidirectional edge has a mirror");
            let mirror = g.edge(rev);
            assert_eq!(mirror.reverse(), Some(EdgeIndex::new(i)));
            assert_eq!(mirror.target(), e.source());
            assert_eq!(mirror.source(), e.target());
            assert_eq!(mirror.weight(), e.weight());
        }
    }

    #[test]
    fn test_parallel_edges_bind_in_order() {
        let g = build(2, &[(0, 1, 1.0), (0, 1, 7.0)]);
        for e in g.edges() {
            let mirror = g.edge(e.reverse().unwrap());
            assert_eq!(mirror.weight(), e.weight());
        }
        assert_eq!(g.total_weight(), 8.0);
    }

    #[test]
    fn test_directed_graph_has_no_mirrors() {
        let mut builder = GraphBuilder::<f64>::new(3);
        builder
            .set_bidirectional(false)
            .add_edge(n(0), n(1), 1.0)
            .add_edge(n(1), n(0), 1.0);
        let g = builder.build().unwrap();

        assert_eq!(g.num_edges(), 2);
        assert!(g.edges().iter().all(|e| e.reverse().is_none()));
        assert!(g.is_canonical(EdgeIndex::new(1)));
    }

    #[test]
    fn test_build_errors() {
        assert_eq!(GraphBuilder::<f64>::new(0).build(), Err(GraphError::NoNodes));
        assert_eq!(GraphBuilder::<f64>::new(2).build(), Err(GraphError::NoEdges));

        let mut builder = GraphBuilder::<f64>::new(2);
        builder.add_edge(n(0), n(2), 1.0);
        assert_eq!(
            builder.build(),
            Err(GraphError::NodeOutOfBounds {
                source: 0,
                target: 2,
                num_nodes: 2
            })
        );
    }

    #[test]
    fn test_set_edge_status_keeps_mirror_and_total_in_sync() {
        let mut g = build(3, &[(0, 1, 10.0), (1, 2, 5.0)]);
        let e = g.find_edge(n(0), n(1)).unwrap();
        let rev = g.reverse_edge(e).unwrap();

        g.set_edge_status(e, false);
        assert!(!g.is_edge_active(e));
        assert!(!g.is_edge_active(rev));
        assert_eq!(g.total_weight(), 5.0);

        g.set_edge_status(rev, false);
        assert_eq!(g.total_weight(), 5.0);

        g.set_edge_status(rev, true);
        assert!(g.is_edge_active(e));
        assert_eq!(g.total_weight(), 15.0);
    }

    #[test]
    fn test_set_all_edges_status() {
        let mut g = build(3, &[(0, 1, 10.0), (1, 2, 5.0)]);
        g.set_all_edges_status(false);
        assert_eq!(g.total_weight(), 0.0);
        assert!(g.edges().iter().all(|e| !e.is_active()));

        g.set_all_edges_status(true);
        assert_eq!(g.total_weight(), 15.0);
    }

    #[test]
    fn test_infinite_weight_does_not_poison_total() {
        let mut g = build(3, &[(0, 1, 10.0), (1, 2, 5.0)]);
        let e = g.find_edge(n(1), n(2)).unwrap();

        g.set_edge_weight(e, f64::INFINITY);
        assert!(g.total_weight().is_infinite());
        assert!(g.edge_weight(g.reverse_edge(e).unwrap()).is_infinite());

        g.set_edge_weight(e, 5.0);
        assert_eq!(g.total_weight(), 15.0);
    }

    #[test]
    fn test_reachability_follows_active_edges() {
        let mut g = build(4, &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)]);
        assert!(g.is_reachable(n(0), n(3)));
        assert!(g.is_reachable(n(2), n(2)));

        let e = g.find_edge(n(1), n(2)).unwrap();
        g.set_edge_status(e, false);
        assert!(!g.is_reachable(n(0), n(3)));
        assert!(g.is_reachable(n(0), n(1)));

        let mut scratch = ReachabilityScratch::preallocated(4);
        for _ in 0..3 {
            assert!(!g.is_reachable_with(&mut scratch, n(3), n(0)));
            assert!(g.is_reachable_with(&mut scratch, n(3), n(2)));
        }
    }

    #[test]
    fn test_connectivity_and_negative_weights() {
        let g = build(4, &[(0, 1, 1.0), (2, 3, 1.0)]);
        assert!(!g.is_connected());
        assert!(!g.has_negative_weights());

        let g = build(3, &[(0, 1, 1.0), (1, 2, -1.0)]);
        assert!(g.is_connected());
        assert!(g.has_negative_weights());
    }

    #[test]
    fn test_canonical_edges() {
        let g = build(2, &[(1, 0, 3.0)]);
        let forward = g.find_edge(n(0), n(1)).unwrap();
        let backward = g.find_edge(n(1), n(0)).unwrap();
        assert!(g.is_canonical(forward));
        assert!(!g.is_canonical(backward));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_edge_out_of_bounds_panics() {
        let mut g = build(2, &[(0, 1, 1.0)]);
        g.set_edge_status(EdgeIndex::new(2), false);
    }

    #[test]
    fn test_display_lists_active_adjacency() {
        let g = build(2, &[(0, 1, 2.5)]);
        let text = g.to_string();
        assert!(text.contains("Total Weight:     2.5"));
        assert!(text.contains("Node 0 -> {Target 1, Weight 2.5};"));
    }

    #[test]
    fn test_reachability_token_wraparound_clears_stale_marks() {
        let mut g = build(4, &[(0, 1, 1.0), (1, 2, 1.0)]);
        let mut scratch = ReachabilityScratch::new();

        // Marks nodes 0, 1 and 2 with token 1.
        assert!(g.is_reachable_with(&mut scratch, n(0), n(2)));
        assert_eq!(scratch.token, 1);

        let link = g.find_edge(n(0), n(1)).unwrap();
        g.set_edge_status(link, false);
        scratch.token = u32::MAX - 1;
        assert!(!g.is_reachable_with(&mut scratch, n(0), n(3)));
        assert_eq!(scratch.token, u32::MAX);

        // Node 1 still carries token 1 and must not read as visited.
        g.set_edge_status(link, true);
        assert!(g.is_reachable_with(&mut scratch, n(0), n(2)));
        assert_eq!(scratch.token, 1);
        assert!(!g.is_reachable_with(&mut scratch, n(0), n(3)));
        assert_eq!(scratch.token, 2);
    }
}
