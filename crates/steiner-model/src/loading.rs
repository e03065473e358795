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

//! Problem instance loader for the Steiner Forest domain.
//!
//! This module turns sectioned text streams into a validated `Problem`. An
//! instance consists of a `Graph` section listing the node count and the
//! weighted edges, followed by a `Terminals` section listing the terminal
//! pairs. Node indices in the file are 1-based and are converted to the
//! 0-based `NodeIndex` space on the fly.
//!
//! Tokens outside of known sections, unknown keywords, and everything after a
//! `#` on a line are ignored, so headers and comments of related formats do
//! not get in the way. Validation (non-negative weights, connectivity,
//! terminal bounds) is delegated to `ProblemBuilder`, and its failures are
//! reported as `ProblemLoaderError::Problem`.

use crate::problem::{Problem, ProblemBuilder, ProblemError};
use std::{
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};
use steiner_core::{num::SteinerWeight, utils::index::NodeIndex};

/// The error type for the problem loading process.
#[derive(Debug)]
pub enum ProblemLoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input stream ended in the middle of a record.
    UnexpectedEof,
    /// A token could not be parsed into the expected type.
    Parse(ParseTokenError),
    /// The input did not declare any nodes or edges.
    MissingGraph,
    /// A node index of `0` was found; indices in the file are 1-based.
    InvalidNodeIndex { index: usize },
    /// The declared node count exceeds what the loader accepts.
    TooManyNodes { declared: usize, limit: usize },
    /// The instance was read but is not a valid problem.
    Problem(ProblemError),
}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "f64").
    pub type_name: &'static str,
}

impl std::fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not parse token '{}' as type {}",
            self.token, self.type_name
        )
    }
}

impl std::error::Error for ParseTokenError {}

impl Display for ProblemLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof => write!(f, "Unexpected end of file while parsing instance"),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::MissingGraph => write!(f, "Instance does not define any nodes or edges"),
            Self::InvalidNodeIndex { index } => {
                write!(f, "Node index {} is invalid: indices are 1-based", index)
            }
            Self::TooManyNodes { declared, limit } => write!(
                f,
                "Instance declares {} nodes but at most {} are supported",
                declared, limit
            ),
            Self::Problem(e) => write!(f, "Invalid instance: {}", e),
        }
    }
}

impl std::error::Error for ProblemLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Problem(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ProblemLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseTokenError> for ProblemLoaderError {
    fn from(e: ParseTokenError) -> Self {
        Self::Parse(e)
    }
}

impl From<ProblemError> for ProblemLoaderError {
    fn from(e: ProblemError) -> Self {
        Self::Problem(e)
    }
}

/// Largest node count an instance may declare.
pub const MAX_NODES: usize = 1 << 26;

/// Upper bound for reservations taken from declared record counts.
const MAX_RESERVATION: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Graph,
    Terminals,
}

/// A configurable loader for SFP problem instances.
///
/// The format this parser expects is as follows (whitespace-separated tokens):
///
/// ```raw
/// SECTION Graph
/// Nodes <n>
/// Edges <m>
/// E <u> <v> <weight>
/// ...
/// END
///
/// SECTION Terminals
/// Terminals <k>
/// TP <u> <v>
/// ...
/// END
/// ```
///
/// # Configuration
/// * `check_connectivity`: If true (the default), a disconnected graph is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemLoader<W> {
    check_connectivity: bool,
    _marker: std::marker::PhantomData<W>,
}

impl<W> Default for ProblemLoader<W> {
    fn default() -> Self {
        Self {
            check_connectivity: true,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<W> ProblemLoader<W>
where
    W: SteinerWeight + FromStr,
{
    /// Creates a new `ProblemLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether a disconnected graph is rejected.
    #[inline]
    pub fn check_connectivity(mut self, yes: bool) -> Self {
        self.check_connectivity = yes;
        self
    }

    /// Loads a problem from a type implementing `BufRead`.
    #[inline]
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Problem<W>, ProblemLoaderError> {
        self.load(rdr, None)
    }

    /// Loads a problem from a file path. The instance is named after the
    /// file stem.
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Problem<W>, ProblemLoaderError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());
        self.load(BufReader::new(file), name)
    }

    /// Loads a problem from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Problem<W>, ProblemLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads a problem from a string slice.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(&self, s: &str) -> Result<Problem<W>, ProblemLoaderError> {
        self.from_reader(s.as_bytes())
    }

    fn load<R: BufRead>(
        &self,
        rdr: R,
        name: Option<String>,
    ) -> Result<Problem<W>, ProblemLoaderError> {
        let mut sc = Scanner::new(rdr);
        let mut section = Section::None;

        let mut num_nodes: usize = 0;
        let mut declared_edges: Option<usize> = None;
        let mut declared_terminals: Option<usize> = None;
        let mut edges: Vec<(NodeIndex, NodeIndex, W)> = Vec::new();
        let mut terminals: Vec<(NodeIndex, NodeIndex)> = Vec::new();

        while let Some(token) = sc.next_token()? {
            match (section, token.as_str()) {
                (_, "SECTION") => {
                    let section_name: String = sc.next()?;
                    section = if section_name.contains("Graph") {
                        Section::Graph
                    } else if section_name.contains("Terminals") {
                        Section::Terminals
                    } else {
                        Section::None
                    };
                }
                (_, "END") => section = Section::None,
                (Section::Graph, "Nodes") => {
                    num_nodes = sc.next()?;
                    if num_nodes > MAX_NODES {
                        return Err(ProblemLoaderError::TooManyNodes {
                            declared: num_nodes,
                            limit: MAX_NODES,
                        });
                    }
                }
                (Section::Graph, "Edges") => {
                    let m: usize = sc.next()?;
                    edges.reserve(m.min(MAX_RESERVATION));
                    declared_edges = Some(m);
                }
                (Section::Graph, "E") => {
                    let u = node_index(sc.next()?)?;
                    let v = node_index(sc.next()?)?;
                    let w: W = sc.next()?;
                    edges.push((u, v, w));
                }
                (Section::Terminals, "Terminals") => {
                    let k: usize = sc.next()?;
                    terminals.reserve(k.min(MAX_RESERVATION));
                    declared_terminals = Some(k);
                }
                (Section::Terminals, "TP") => {
                    let u = node_index(sc.next()?)?;
                    let v = node_index(sc.next()?)?;
                    terminals.push((u, v));
                }
                _ => {}
            }
        }

        if num_nodes == 0 || edges.is_empty() {
            return Err(ProblemLoaderError::MissingGraph);
        }

        if declared_edges.is_some_and(|m| m != edges.len()) {
            tracing::warn!(
                declared = ?declared_edges,
                found = edges.len(),
                "edge count does not match the declared count"
            );
        }
        if declared_terminals.is_some_and(|k| k != terminals.len()) {
            tracing::warn!(
                declared = ?declared_terminals,
                found = terminals.len(),
                "terminal pair count does not match the declared count"
            );
        }

        let mut builder = ProblemBuilder::preallocated(num_nodes, edges.len(), terminals.len());
        builder.check_connectivity(self.check_connectivity);
        if let Some(name) = name {
            builder.with_name(name);
        }
        for (u, v, w) in edges {
            builder.add_edge(u, v, w);
        }
        for (u, v) in terminals {
            builder.add_terminal_pair(u, v);
        }

        let problem = builder.build()?;
        tracing::debug!(
            name = problem.name(),
            nodes = problem.num_nodes(),
            edges = problem.num_edges(),
            terminal_pairs = problem.num_terminal_pairs(),
            "loaded problem instance"
        );
        Ok(problem)
    }
}

/// Converts a 1-based node index from the file.
#[inline]
fn node_index(one_based: usize) -> Result<NodeIndex, ProblemLoaderError> {
    one_based
        .checked_sub(1)
        .map(NodeIndex::new)
        .ok_or(ProblemLoaderError::InvalidNodeIndex { index: one_based })
}

/// A helper to read whitespace-delimited tokens from a generic reader.
struct Scanner<R> {
    rdr: R,
    buf: String,
    pos: usize,
}

impl<R: BufRead> Scanner<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            pos: 0,
        }
    }

    /// Refills the internal line buffer. Returns `Ok(false)` on EOF.
    #[inline]
    fn fill_line(&mut self) -> Result<bool, ProblemLoaderError> {
        self.buf.clear();
        self.pos = 0;
        let n = self.rdr.read_line(&mut self.buf)?;
        Ok(n > 0)
    }

    /// Returns the next token, or `None` at the end of the input.
    /// Skips whitespace and comments starting with '#'.
    fn next_token(&mut self) -> Result<Option<String>, ProblemLoaderError> {
        loop {
            if self.pos >= self.buf.len() && !self.fill_line()? {
                return Ok(None);
            }

            let rest = &self.buf[self.pos..];
            let trimmed = rest.trim_start();
            let start = self.pos + (rest.len() - trimmed.len());

            if trimmed.is_empty() || trimmed.starts_with('#') {
                self.pos = self.buf.len();
                continue;
            }

            let len = trimmed
                .find(|c: char| c.is_whitespace() || c == '#')
                .unwrap_or(trimmed.len());
            self.pos = start + len;
            return Ok(Some(self.buf[start..start + len].to_owned()));
        }
    }

    /// Reads the next token and parses it into `T`.
    fn next<T>(&mut self) -> Result<T, ProblemLoaderError>
    where
        T: FromStr,
    {
        let token = self
            .next_token()?
            .ok_or(ProblemLoaderError::UnexpectedEof)?;

        token.parse::<T>().map_err(|_| {
            ProblemLoaderError::Parse(ParseTokenError {
                token,
                type_name: std::any::type_name::<T>(),
            })
        })
    }
}
