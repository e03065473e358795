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

//! `steiner` binary: solves Steiner Forest instances with GRASP and prints a
//! Markdown report.
//!
//! # Usage
//!
//! ```bash
//! steiner --file instances/b01.stp --alpha 0.3 --iterations 20
//! steiner --directory instances --variation
//! RUST_LOG=debug steiner -f instances/b01.stp
//! ```

mod report;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use report::FileStats;
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    time::{Duration, Instant},
};
use steiner_core::dsu::DisjointSetUnion;
use steiner_grasp::{
    constructive::GraspConstructive, heuristic::Solver, local_search::DestroyRepairLocalSearch,
    metaheuristic::GraspMetaheuristicBuilder, monitor::log::LogMonitor,
};
use steiner_model::loading::{ProblemLoader, ProblemLoaderError};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

const INSTANCE_EXTENSION: &str = "stp";

/// Command-line arguments of the solver.
#[derive(Parser, Debug)]
#[command(
    name = "steiner",
    version,
    about = "Steiner Forest Problem solver (GRASP)",
    long_about = None
)]
struct Args {
    /// Path to a single `.stp` file to solve.
    #[arg(short, long, value_name = "FILE", conflicts_with = "directory")]
    file: Option<PathBuf>,

    /// Directory that is searched recursively for `.stp` files.
    #[arg(short, long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Greediness of the construction: 0 is greedy, 1 is random.
    #[arg(short, long, default_value_t = 1.0, value_parser = parse_alpha)]
    alpha: f64,

    /// Try the alphas 0.0, 0.1, ..., 1.0 and keep the best.
    #[arg(short, long, default_value_t = false)]
    variation: bool,

    /// Number of GRASP iterations per run.
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    iterations: u64,

    /// Seed of the random number generator.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Wall-clock budget of a single run in milliseconds.
    #[arg(long, value_name = "MS")]
    time_limit_ms: Option<u64>,
}

fn parse_alpha(s: &str) -> Result<f64, String> {
    let alpha: f64 = s.parse().map_err(|e| format!("`{}` is not a number: {}", s, e))?;
    if !(0.0..=1.0).contains(&alpha) {
        return Err(format!("{} is not in [0, 1]", alpha));
    }
    Ok(alpha)
}

fn enable_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn has_instance_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(INSTANCE_EXTENSION))
}

/// Collects every instance file below `dir`, sorted by path.
///
/// Symbolic links are not followed.
fn find_instances(dir: &Path) -> walkdir::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if entry.file_type().is_file() && has_instance_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Loads and solves one instance with a fixed alpha.
fn solve_file(path: &Path, alpha: f64, args: &Args) -> Result<FileStats, ProblemLoaderError> {
    let problem = ProblemLoader::<f64>::new().from_path(path)?;

    let mut builder = GraspMetaheuristicBuilder::new(
        GraspConstructive::new(alpha, ChaCha8Rng::seed_from_u64(args.seed)),
        DestroyRepairLocalSearch::preallocated(problem.num_nodes()),
    );
    builder
        .with_max_iterations(args.iterations)
        .with_monitor(LogMonitor::new());
    if let Some(ms) = args.time_limit_ms {
        builder.with_time_limit(Duration::from_millis(ms));
    }
    let mut solver = builder.build();

    let start = Instant::now();
    let outcome = solver.solve(&problem);
    let time_ms = start.elapsed().as_secs_f64() * 1000.0;

    let solution = outcome.solution();
    if !solution.is_feasible(&mut DisjointSetUnion::new(problem.num_nodes())) {
        tracing::warn!(file = %path.display(), "solution leaves terminal pairs disconnected");
    }
    tracing::debug!(file = %path.display(), reason = %outcome.termination_reason(), "solved");

    Ok(FileStats {
        filename: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        num_nodes: problem.num_nodes(),
        num_edges: problem.num_edges(),
        num_terminals: problem.num_terminal_pairs(),
        original_cost: problem.graph().total_weight(),
        solution_cost: solution.objective_value(),
        time_ms,
        alpha,
    })
}

/// Solves one instance with every alpha in `0.0, 0.1, ..., 1.0` and keeps
/// the cheapest run, preferring the faster one on ties.
fn find_best_alpha(path: &Path, args: &Args) -> Result<FileStats, ProblemLoaderError> {
    let mut best = solve_file(path, 0.0, args)?;
    for step in 1..=10 {
        let current = solve_file(path, step as f64 / 10.0, args)?;
        if current.is_better_than(&best) {
            best = current;
        }
    }
    Ok(best)
}

fn process(path: &Path, args: &Args) -> Option<FileStats> {
    let result = if args.variation {
        find_best_alpha(path, args)
    } else {
        solve_file(path, args.alpha, args)
    };

    match result {
        Ok(stats) => {
            tracing::debug!(
                file = %path.display(),
                edges = stats.num_edges,
                alpha = stats.alpha,
                cost = stats.solution_cost,
                "instance solved"
            );
            Some(stats)
        }
        Err(err) => {
            tracing::error!(file = %path.display(), error = %err, "failed to solve instance");
            None
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    enable_tracing();

    if let Some(file) = &args.file {
        if !has_instance_extension(file) {
            tracing::error!(file = %file.display(), "input file is not a `.stp` file");
            return ExitCode::FAILURE;
        }
        println!("{}", report::markdown_header());
        if let Some(stats) = process(file, &args) {
            println!("{}", report::file_row(&stats));
        }
        return ExitCode::SUCCESS;
    }

    if let Some(dir) = &args.directory {
        let files = match find_instances(dir) {
            Ok(files) => files,
            Err(err) => {
                tracing::error!(dir = %dir.display(), error = %err, "cannot read directory");
                return ExitCode::FAILURE;
            }
        };
        if files.is_empty() {
            tracing::info!(dir = %dir.display(), "no instance files found");
            return ExitCode::SUCCESS;
        }

        println!("{}", report::markdown_header());
        let mut results = Vec::with_capacity(files.len());
        for path in &files {
            if let Some(stats) = process(path, &args) {
                println!("{}", report::file_row(&stats));
                results.push(stats);
            }
        }
        if let Some(summary) = report::summary(dir, &results) {
            println!("{}", summary);
        }
        return ExitCode::SUCCESS;
    }

    tracing::error!("no input provided, use --help to see the options");
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const INSTANCE: &str = "\
SECTION Graph
Nodes 3
Edges 3
E 1 2 100
E 1 3 10
E 3 2 10
END

SECTION Terminals
Terminals 1
TP 1 2
END
";

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["steiner"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("steiner-cli-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("nested")).unwrap();
        dir
    }

    #[test]
    fn test_argument_defaults_and_validation() {
        let parsed = args(&["-f", "x.stp"]);
        assert_eq!(parsed.alpha, 1.0);
        assert_eq!(parsed.iterations, 1);
        assert_eq!(parsed.seed, 42);
        assert!(!parsed.variation);
        assert!(parsed.time_limit_ms.is_none());

        assert!(Args::try_parse_from(["steiner", "-a", "1.5"]).is_err());
        assert!(Args::try_parse_from(["steiner", "-i", "0"]).is_err());
        assert!(Args::try_parse_from(["steiner", "-f", "a.stp", "-d", "dir"]).is_err());
        assert_eq!(args(&["-a", "0.25", "-v"]).alpha, 0.25);
    }

    #[test]
    fn test_instance_extension() {
        assert!(has_instance_extension(Path::new("a/b01.stp")));
        assert!(has_instance_extension(Path::new("B01.STP")));
        assert!(!has_instance_extension(Path::new("b01.txt")));
        assert!(!has_instance_extension(Path::new("stp")));
    }

    #[test]
    fn test_find_instances_is_recursive_and_sorted() {
        let dir = scratch_dir("find");
        fs::write(dir.join("b.stp"), INSTANCE).unwrap();
        fs::write(dir.join("nested").join("a.stp"), INSTANCE).unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let files = find_instances(&dir).unwrap();
        assert_eq!(files, vec![dir.join("b.stp"), dir.join("nested").join("a.stp")]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_find_instances_ignores_symlink_cycles() {
        let dir = scratch_dir("cycle");
        fs::write(dir.join("a.stp"), INSTANCE).unwrap();
        std::os::unix::fs::symlink(&dir, dir.join("nested").join("loop")).unwrap();

        let files = find_instances(&dir).unwrap();
        assert_eq!(files, vec![dir.join("a.stp")]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        assert!(find_instances(Path::new("/definitely/not/here")).is_err());
    }

    #[test]
    fn test_solve_and_sweep() {
        let dir = scratch_dir("solve");
        let path = dir.join("triangle.stp");
        fs::write(&path, INSTANCE).unwrap();

        let cli = args(&["-i", "3"]);
        let stats = solve_file(&path, 0.5, &cli).unwrap();
        assert_eq!(stats.filename, "triangle.stp");
        assert_eq!(stats.num_nodes, 3);
        assert_eq!(stats.num_terminals, 1);
        assert_eq!(stats.original_cost, 120.0);
        assert_eq!(stats.solution_cost, 20.0);

        let best = find_best_alpha(&path, &cli).unwrap();
        assert_eq!(best.solution_cost, 20.0);
        assert!((0.0..=1.0).contains(&best.alpha));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_reported() {
        let cli = args(&[]);
        assert!(process(Path::new("/definitely/not/here.stp"), &cli).is_none());
    }
}
