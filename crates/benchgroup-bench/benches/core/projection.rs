// Benchgroup - Benchmark result filtering and grouping
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Filtering and projection benchmarks.
//!
//! Measures per-record filter evaluation and projection into interned
//! configs, including schemas that grow as new keys appear.

use benchgroup_bench::{filter_cases, generate_records, projection_cases, sizes};
use benchgroup_core::{Filter, ProjectionParser};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

// ============================================================================
// Filter Evaluation Benchmarks
// ============================================================================

fn bench_filter_eval(c: &mut Criterion) {
    let records = generate_records(sizes::MEDIUM);
    let mut group = c.benchmark_group("filter_eval");
    group.throughput(Throughput::Elements(records.len() as u64));
    for (name, query) in filter_cases() {
        let filter = Filter::new(query).expect("benchmark filter parses");
        group.bench_function(name, |b| {
            b.iter(|| records.iter().filter(|r| filter.matches(black_box(r)).any()).count())
        });
    }
    group.finish();
}

// ============================================================================
// Projection Benchmarks
// ============================================================================

fn bench_project(c: &mut Criterion) {
    let mut group = c.benchmark_group("project");
    for size in [sizes::SMALL, sizes::MEDIUM, sizes::LARGE] {
        let records = generate_records(size);
        group.throughput(Throughput::Elements(size as u64));
        for (name, proj) in projection_cases() {
            group.bench_with_input(BenchmarkId::new(name, size), &records, |b, records| {
                b.iter(|| {
                    let mut filter = Filter::match_all();
                    let mut schema = ProjectionParser::new()
                        .parse(proj, &mut filter)
                        .expect("benchmark projection parses");
                    for rec in records {
                        black_box(schema.project(rec));
                    }
                })
            });
        }
    }
    group.finish();
}

fn bench_project_values(c: &mut Criterion) {
    let records = generate_records(sizes::MEDIUM);
    let mut group = c.benchmark_group("project_values");
    group.throughput(Throughput::Elements(records.len() as u64));
    group.bench_function("name_size_unit", |b| {
        b.iter(|| {
            let mut filter = Filter::match_all();
            let mut schema = ProjectionParser::new()
                .parse(".name,/size@num", &mut filter)
                .expect("benchmark projection parses");
            schema.add_values();
            for rec in &records {
                black_box(schema.project_values(rec));
            }
        })
    });
    group.finish();
}

// Repeated projection of already-seen tuples exercises the intern lookup
// path only.
fn bench_intern_hit(c: &mut Criterion) {
    let records = generate_records(sizes::MEDIUM);
    let mut filter = Filter::match_all();
    let mut schema = ProjectionParser::new()
        .parse(".name,/size,goos", &mut filter)
        .expect("benchmark projection parses");
    for rec in &records {
        schema.project(rec);
    }
    c.bench_function("intern_hit", |b| {
        b.iter(|| {
            for rec in &records {
                black_box(schema.project(rec));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_filter_eval,
    bench_project,
    bench_project_values,
    bench_intern_hit
);
criterion_main!(benches);
