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

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;
use steiner_core::utils::index::NodeIndex;
use steiner_grasp::{
    constructive::GraspConstructive,
    heuristic::{ConstructiveHeuristic, ImprovementHeuristic},
    local_search::DestroyRepairLocalSearch,
};
use steiner_model::problem::{Problem, ProblemBuilder};

fn ni(i: usize) -> NodeIndex {
    NodeIndex::new(i)
}

/// Builds a `side x side` grid instance with pairs between opposite borders.
fn grid_problem(side: usize) -> Problem<f64> {
    let num_nodes = side * side;
    let mut builder = ProblemBuilder::preallocated(num_nodes, 2 * num_nodes, side);
    for row in 0..side {
        for col in 0..side {
            let u = row * side + col;
            if col + 1 < side {
                builder.add_edge(ni(u), ni(u + 1), 1.0 + ((u * 7) % 13) as f64);
            }
            if row + 1 < side {
                builder.add_edge(ni(u), ni(u + side), 1.0 + ((u * 11) % 17) as f64);
            }
        }
    }
    for i in (0..side).step_by(2) {
        builder.add_terminal_pair(ni(i), ni(num_nodes - 1 - i));
        builder.add_terminal_pair(ni(i * side), ni(i * side + side - 1));
    }
    builder.build().expect("grid is a valid instance")
}

fn bench_grasp_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("grasp_benchmark");
    group.sample_size(20);

    for side in [8usize, 16, 24] {
        let problem = grid_problem(side);

        for alpha in [0.0, 0.5, 1.0] {
            let mut constructive = GraspConstructive::new(alpha, ChaCha8Rng::seed_from_u64(42));
            let id = BenchmarkId::new(format!("construct_alpha_{}", alpha), side);
            group.bench_with_input(id, &side, |b, _| {
                b.iter(|| black_box(constructive.construct(black_box(&problem)).objective_value()))
            });
        }

        let mut constructive = GraspConstructive::new(1.0, ChaCha8Rng::seed_from_u64(42));
        let mut local_search = DestroyRepairLocalSearch::preallocated(problem.num_nodes());
        group.bench_with_input(BenchmarkId::new("iteration", side), &side, |b, _| {
            b.iter(|| {
                let mut solution = constructive.construct(black_box(&problem));
                local_search.optimize(&mut solution);
                black_box(solution.objective_value())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_grasp_iteration);
criterion_main!(benches);
