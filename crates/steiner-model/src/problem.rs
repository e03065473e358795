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

//! Problem instances of the Steiner Forest Problem.
//!
//! A `Problem` pairs a `Graph` with an ordered list of terminal pairs. It is
//! immutable after construction. Construction rejects graphs with negative
//! weights, terminal pairs that reference unknown nodes and, unless disabled
//! on the builder, graphs that are not connected.

use crate::{moves::Move, solution::Solution};
use fixedbitset::FixedBitSet;
use rand::seq::SliceRandom;
use steiner_core::{
    dsu::DisjointSetUnion,
    graph::{Graph, GraphBuilder, GraphError},
    num::SteinerWeight,
    shortest_path::ShortestPathEngine,
    utils::index::{EdgeIndex, NodeIndex},
};

/// A pair of nodes that must end up in the same connected component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminalPair {
    source: NodeIndex,
    target: NodeIndex,
}

impl TerminalPair {
    /// Creates a new terminal pair.
    #[inline]
    pub const fn new(source: NodeIndex, target: NodeIndex) -> Self {
        Self { source, target }
    }

    /// Returns the first endpoint.
    #[inline]
    pub const fn source(&self) -> NodeIndex {
        self.source
    }

    /// Returns the second endpoint.
    #[inline]
    pub const fn target(&self) -> NodeIndex {
        self.target
    }
}

impl std::fmt::Display for TerminalPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.source.get(), self.target.get())
    }
}

/// Errors raised while constructing a `Problem`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    /// The underlying graph could not be built.
    Graph(GraphError),
    /// An edge carries a negative (or NaN) weight.
    NegativeWeight { edge: EdgeIndex },
    /// Not every node is reachable from node `0`.
    Disconnected,
    /// A terminal pair references a node outside the graph.
    TerminalOutOfBounds {
        source: usize,
        target: usize,
        num_nodes: usize,
    },
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Graph(e) => write!(f, "Invalid graph: {}", e),
            Self::NegativeWeight { edge } => write!(f, "Graph has a negative weight on {}", edge),
            Self::Disconnected => write!(f, "Graph is not connected"),
            Self::TerminalOutOfBounds {
                source,
                target,
                num_nodes,
            } => write!(
                f,
                "Terminal pair ({}, {}) references a node out of bounds: the graph has {} nodes",
                source, target, num_nodes
            ),
        }
    }
}

impl std::error::Error for ProblemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Graph(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GraphError> for ProblemError {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}

/// A validated Steiner Forest instance.
#[derive(Debug, Clone)]
pub struct Problem<W> {
    name: String,
    graph: Graph<W>,
    terminals: Vec<TerminalPair>,
    terminal_nodes: FixedBitSet,
}

impl<W> Problem<W>
where
    W: SteinerWeight,
{
    /// The name given to instances that were not loaded from a file.
    pub const DEFAULT_NAME: &'static str = "Manual";

    /// Creates a new problem and validates it, including connectivity.
    pub fn new(graph: Graph<W>, terminals: Vec<TerminalPair>) -> Result<Self, ProblemError> {
        Self::validated(Self::DEFAULT_NAME.to_string(), graph, terminals, true)
    }

    fn validated(
        name: String,
        graph: Graph<W>,
        terminals: Vec<TerminalPair>,
        check_connectivity: bool,
    ) -> Result<Self, ProblemError> {
        let num_nodes = graph.num_nodes();
        for pair in &terminals {
            if pair.source.get() >= num_nodes || pair.target.get() >= num_nodes {
                return Err(ProblemError::TerminalOutOfBounds {
                    source: pair.source.get(),
                    target: pair.target.get(),
                    num_nodes,
                });
            }
        }

        if let Some(i) = graph
            .edges()
            .iter()
            .position(|e| e.is_active() && (e.weight() < W::zero() || e.weight().is_nan()))
        {
            return Err(ProblemError::NegativeWeight {
                edge: EdgeIndex::new(i),
            });
        }

        if check_connectivity && !graph.is_connected() {
            return Err(ProblemError::Disconnected);
        }

        let mut terminal_nodes = FixedBitSet::with_capacity(num_nodes);
        for pair in &terminals {
            terminal_nodes.insert(pair.source.get());
            terminal_nodes.insert(pair.target.get());
        }

        Ok(Self {
            name,
            graph,
            terminals,
            terminal_nodes,
        })
    }

    /// Returns the instance name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the graph of the instance.
    #[inline]
    pub fn graph(&self) -> &Graph<W> {
        &self.graph
    }

    /// Returns the terminal pairs in their original order.
    #[inline]
    pub fn terminals(&self) -> &[TerminalPair] {
        &self.terminals
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.graph.num_nodes()
    }

    /// Returns the number of physical edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.graph.num_edges()
    }

    /// Returns the number of terminal pairs.
    #[inline]
    pub fn num_terminal_pairs(&self) -> usize {
        self.terminals.len()
    }

    /// Returns `true` if `node` is an endpoint of any terminal pair.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not in `0..num_nodes()`.
    #[inline]
    pub fn is_terminal(&self, node: NodeIndex) -> bool {
        assert!(
            node.get() < self.num_nodes(),
            "called `Problem::is_terminal` with node index out of bounds: the len is {} but the index is {}",
            self.num_nodes(),
            node.get()
        );
        self.terminal_nodes.contains(node.get())
    }

    /// Returns a solution without any active edge.
    #[inline]
    pub fn empty_solution(&self) -> Solution<'_, W> {
        Solution::new(self)
    }

    /// Builds a feasible solution by connecting the terminal pairs in random
    /// order, each along a shortest path on the problem graph. Pairs that are
    /// already connected by earlier paths are skipped.
    pub fn random_solution<R>(&self, rng: &mut R) -> Solution<'_, W>
    where
        R: rand::Rng + ?Sized,
    {
        let mut solution = Solution::new(self);
        let mut dsu = DisjointSetUnion::new(self.num_nodes());
        let mut engine = ShortestPathEngine::new(self.num_nodes());

        let mut order = self.terminals.clone();
        order.shuffle(rng);

        for pair in order {
            if dsu.is_connected(pair.source.get(), pair.target.get()) {
                continue;
            }

            let Some(path) = engine.shortest_path(&self.graph, pair.source, pair.target) else {
                tracing::warn!(%pair, "terminal pair is unreachable, leaving it unconnected");
                continue;
            };

            for &edge in path.edges() {
                let e = self.graph.edge(edge);
                if !solution.is_edge_active(edge) {
                    Move::add(edge, e.weight()).apply(&mut solution);
                }
                dsu.unite(e.source().get(), e.target().get());
            }
        }

        tracing::debug!(
            objective = %solution.objective_value(),
            "built random solution"
        );
        solution
    }
}

impl<W> std::fmt::Display for Problem<W>
where
    W: SteinerWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SFP Instance: {}", self.name)?;
        writeln!(f, "   Terminal Pairs:   {}", self.terminals.len())?;
        write!(f, "{}", self.graph)
    }
}

/// Mutable configuration for a `Problem`.
///
/// # Examples
///
/// ```rust
/// # use steiner_model::problem::ProblemBuilder;
/// # use steiner_core::utils::index::NodeIndex;
/// let mut builder = ProblemBuilder::<f64>::new(3);
/// builder
///     .add_edge(NodeIndex::new(0), NodeIndex::new(1), 4.0)
///     .add_edge(NodeIndex::new(1), NodeIndex::new(2), 6.0)
///     .add_terminal_pair(NodeIndex::new(0), NodeIndex::new(2));
/// let problem = builder.build().unwrap();
///
/// assert_eq!(problem.num_terminal_pairs(), 1);
/// assert_eq!(problem.graph().total_weight(), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemBuilder<W> {
    name: Option<String>,
    graph: GraphBuilder<W>,
    terminals: Vec<TerminalPair>,
    check_connectivity: bool,
}

impl<W> ProblemBuilder<W>
where
    W: SteinerWeight,
{
    /// Creates a builder for an instance with `num_nodes` nodes.
    #[inline]
    pub fn new(num_nodes: usize) -> Self {
        Self {
            name: None,
            graph: GraphBuilder::new(num_nodes),
            terminals: Vec::new(),
            check_connectivity: true,
        }
    }

    /// Creates a builder with room for the given numbers of edges and pairs.
    #[inline]
    pub fn preallocated(num_nodes: usize, num_edges: usize, num_terminals: usize) -> Self {
        Self {
            name: None,
            graph: GraphBuilder::preallocated(num_nodes, num_edges),
            terminals: Vec::with_capacity(num_terminals),
            check_connectivity: true,
        }
    }

    /// Sets the instance name.
    #[inline]
    pub fn with_name<S>(&mut self, name: S) -> &mut Self
    where
        S: Into<String>,
    {
        self.name = Some(name.into());
        self
    }

    /// Adds an undirected edge.
    #[inline]
    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex, weight: W) -> &mut Self {
        self.graph.add_edge(source, target, weight);
        self
    }

    /// Adds a terminal pair.
    #[inline]
    pub fn add_terminal_pair(&mut self, source: NodeIndex, target: NodeIndex) -> &mut Self {
        self.terminals.push(TerminalPair::new(source, target));
        self
    }

    /// Configures whether a disconnected graph is rejected. Defaults to `true`.
    #[inline]
    pub fn check_connectivity(&mut self, yes: bool) -> &mut Self {
        self.check_connectivity = yes;
        self
    }

    /// Returns the number of terminal pairs added so far.
    #[inline]
    pub fn num_terminal_pairs(&self) -> usize {
        self.terminals.len()
    }

    /// Builds and validates the problem.
    pub fn build(self) -> Result<Problem<W>, ProblemError> {
        let graph = self.graph.build()?;
        let name = self
            .name
            .unwrap_or_else(|| Problem::<W>::DEFAULT_NAME.to_string());
        Problem::validated(name, graph, self.terminals, self.check_connectivity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn builder(num_nodes: usize, edges: &[(usize, usize, f64)]) -> ProblemBuilder<f64> {
        let mut b = ProblemBuilder::new(num_nodes);
        for &(u, v, w) in edges {
            b.add_edge(n(u), n(v), w);
        }
        b
    }

    #[test]
    fn test_builds_valid_problem() {
        let mut b = builder(4, &[(0, 1, 1.0), (1, 2, 2.0), (2, 3, 3.0)]);
        b.add_terminal_pair(n(0), n(3)).with_name("chain");
        let problem = b.build().expect("valid problem");

        assert_eq!(problem.name(), "chain");
        assert_eq!(problem.num_nodes(), 4);
        assert_eq!(problem.num_edges(), 6);
        assert!(problem.is_terminal(n(0)));
        assert!(problem.is_terminal(n(3)));
        assert!(!problem.is_terminal(n(1)));
    }

    #[test]
    fn test_rejects_negative_weight() {
        let mut b = builder(2, &[(0, 1, -1.0)]);
        b.add_terminal_pair(n(0), n(1));
        assert!(matches!(b.build(), Err(ProblemError::NegativeWeight { .. })));
    }

    #[test]
    fn test_rejects_disconnected_graph_unless_disabled() {
        let mut b = builder(4, &[(0, 1, 1.0), (2, 3, 1.0)]);
        b.add_terminal_pair(n(0), n(1));
        assert_eq!(b.clone().build().err(), Some(ProblemError::Disconnected));

        b.check_connectivity(false);
        assert!(b.build().is_ok());
    }

    #[test]
    fn test_rejects_empty_graph() {
        let b = ProblemBuilder::<f64>::new(3);
        assert_eq!(b.build().err(), Some(ProblemError::Graph(GraphError::NoEdges)));

        let b = ProblemBuilder::<f64>::new(0);
        assert_eq!(b.build().err(), Some(ProblemError::Graph(GraphError::NoNodes)));
    }

    #[test]
    fn test_rejects_terminal_out_of_bounds() {
        let mut b = builder(2, &[(0, 1, 1.0)]);
        b.add_terminal_pair(n(0), n(5));
        assert_eq!(
            b.build().err(),
            Some(ProblemError::TerminalOutOfBounds {
                source: 0,
                target: 5,
                num_nodes: 2
            })
        );
    }

    #[test]
    fn test_new_defaults_to_manual_name() {
        let mut g = GraphBuilder::<f64>::new(2);
        g.add_edge(n(0), n(1), 1.0);
        let problem = Problem::new(g.build().unwrap(), vec![TerminalPair::new(n(0), n(1))]).unwrap();
        assert_eq!(problem.name(), Problem::<f64>::DEFAULT_NAME);
    }

    #[test]
    fn test_random_solution_is_feasible() {
        let mut b = builder(
            6,
            &[
                (0, 1, 3.0),
                (1, 2, 4.0),
                (2, 3, 1.0),
                (3, 4, 2.0),
                (4, 5, 7.0),
                (0, 5, 9.0),
                (1, 4, 5.0),
            ],
        );
        b.add_terminal_pair(n(0), n(3))
            .add_terminal_pair(n(2), n(5))
            .add_terminal_pair(n(1), n(4));
        let problem = b.build().unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut dsu = DisjointSetUnion::new(problem.num_nodes());
        for _ in 0..10 {
            let solution = problem.random_solution(&mut rng);
            assert!(solution.is_feasible(&mut dsu));

            let recomputed: f64 = solution
                .active_canonical_edges()
                .map(|e| problem.graph().edge_weight(e))
                .sum();
            assert!((solution.objective_value() - recomputed).abs() < 1e-9);
        }
    }

    #[test]
    fn test_display_mentions_name_and_pairs() {
        let mut b = builder(2, &[(0, 1, 1.0)]);
        b.add_terminal_pair(n(0), n(1));
        let text = b.build().unwrap().to_string();
        assert!(text.contains("SFP Instance: Manual"));
        assert!(text.contains("Terminal Pairs:   1"));
    }
}
