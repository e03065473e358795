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

//! Markdown report of solved instances.

use std::collections::BTreeMap;
use std::path::Path;

/// Measurements of one solved instance.
#[derive(Debug, Clone, PartialEq)]
pub struct FileStats {
    pub filename: String,
    pub num_nodes: usize,
    pub num_edges: usize,
    pub num_terminals: usize,
    pub original_cost: f64,
    pub solution_cost: f64,
    pub time_ms: f64,
    pub alpha: f64,
}

impl FileStats {
    /// Returns `solution_cost / original_cost`, or `0` for a weightless graph.
    pub fn ratio(&self) -> f64 {
        if self.original_cost > 0.0 {
            self.solution_cost / self.original_cost
        } else {
            0.0
        }
    }

    /// Returns `true` if `self` beats `other` in an alpha sweep: a lower
    /// cost, or the same cost in less time.
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.solution_cost < other.solution_cost
            || (self.solution_cost == other.solution_cost && self.time_ms < other.time_ms)
    }
}

pub fn markdown_header() -> String {
    [
        "| File | Nodes | Terms | Ratio | Time (ms) | Best Alpha |",
        "| :--- | :---: | :---: | :---: | :---: | :---: |",
    ]
    .join("\n")
}

pub fn file_row(stats: &FileStats) -> String {
    format!(
        "| {:<20} | {:>5} | {:>5} | {:>7.4} | {:>9.2} |{:>10.1} |",
        stats.filename,
        stats.num_nodes,
        stats.num_terminals,
        stats.ratio(),
        stats.time_ms,
        stats.alpha
    )
}

/// Renders the summary table of a batch, or `None` if the batch is empty.
///
/// The most frequent alpha is the one that won the most instances; ties go
/// to the smaller alpha. Zero ratios (weightless graphs) do not count
/// towards the minimum ratio.
pub fn summary(source: &Path, stats: &[FileStats]) -> Option<String> {
    let first = stats.first()?;

    let mut min_nodes = first.num_nodes;
    let mut max_nodes = first.num_nodes;
    let mut max_ratio = 0.0f64;
    let mut min_ratio: Option<f64> = None;
    let mut alpha_wins: BTreeMap<i64, usize> = BTreeMap::new();

    for s in stats {
        min_nodes = min_nodes.min(s.num_nodes);
        max_nodes = max_nodes.max(s.num_nodes);

        let ratio = s.ratio();
        max_ratio = max_ratio.max(ratio);
        if ratio > 0.0 {
            min_ratio = Some(min_ratio.map_or(ratio, |m| m.min(ratio)));
        }

        *alpha_wins.entry((s.alpha * 10.0).round() as i64).or_default() += 1;
    }

    let (best_key, wins) = alpha_wins
        .iter()
        .fold((0i64, 0usize), |best, (&key, &count)| {
            if count > best.1 {
                (key, count)
            } else {
                best
            }
        });

    let source_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());

    Some(format!(
        "\n\n### Summary Report\n\
         | Source | Count | Nodes | Max Ratio | Min Ratio | Most Freq Alpha |\n\
         | :--- | :---: | :---: | :---: | :---: | :---: |\n\
         | {} | {} | {}-{} | {:.4} | {:.4} | {:.1} ({} wins) |",
        source_name,
        stats.len(),
        min_nodes,
        max_nodes,
        max_ratio,
        min_ratio.unwrap_or(0.0),
        best_key as f64 / 10.0,
        wins
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(filename: &str, nodes: usize, cost: f64, alpha: f64) -> FileStats {
        FileStats {
            filename: filename.to_string(),
            num_nodes: nodes,
            num_edges: 2 * nodes,
            num_terminals: 2,
            original_cost: 100.0,
            solution_cost: cost,
            time_ms: 1.5,
            alpha,
        }
    }

    #[test]
    fn test_ratio() {
        assert_eq!(stats("a.stp", 5, 25.0, 1.0).ratio(), 0.25);

        let mut weightless = stats("b.stp", 5, 0.0, 1.0);
        weightless.original_cost = 0.0;
        assert_eq!(weightless.ratio(), 0.0);
    }

    #[test]
    fn test_sweep_comparison_breaks_ties_by_time() {
        let a = stats("a.stp", 5, 25.0, 0.0);
        let mut b = stats("a.stp", 5, 25.0, 0.1);
        assert!(!a.is_better_than(&b));

        b.time_ms = 0.5;
        assert!(b.is_better_than(&a));

        let c = stats("a.stp", 5, 20.0, 0.2);
        assert!(c.is_better_than(&b));
    }

    #[test]
    fn test_header_and_row() {
        let header = markdown_header();
        assert!(header.starts_with("| File | Nodes | Terms | Ratio | Time (ms) | Best Alpha |"));
        assert_eq!(header.lines().count(), 2);

        let row = file_row(&stats("c01.stp", 500, 50.0, 0.3));
        assert_eq!(
            row,
            "| c01.stp              |   500 |     2 |  0.5000 |      1.50 |       0.3 |"
        );
    }

    #[test]
    fn test_summary() {
        assert!(summary(Path::new("set"), &[]).is_none());

        let batch = [
            stats("a.stp", 10, 50.0, 0.3),
            stats("b.stp", 40, 20.0, 0.7),
            stats("c.stp", 25, 80.0, 0.3),
        ];
        let text = summary(Path::new("instances/setB"), &batch).unwrap();
        let row = text.lines().last().unwrap();
        assert_eq!(row, "| setB | 3 | 10-40 | 0.8000 | 0.2000 | 0.3 (2 wins) |");
        assert!(text.contains("### Summary Report"));
    }

    #[test]
    fn test_summary_alpha_ties_go_to_smaller_alpha() {
        let batch = [stats("a.stp", 10, 50.0, 0.9), stats("b.stp", 10, 50.0, 0.2)];
        let text = summary(Path::new("set"), &batch).unwrap();
        assert!(text.ends_with("| 0.2 (1 wins) |"));
    }
}
