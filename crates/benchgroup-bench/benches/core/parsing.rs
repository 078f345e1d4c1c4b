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

//! Expression parsing benchmarks.
//!
//! Measures tokenization and parsing of filter and projection expressions,
//! including filter compilation.

use benchgroup_bench::{filter_cases, projection_cases};
use benchgroup_core::parse::{parse_filter, parse_projection};
use benchgroup_core::Filter;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

// ============================================================================
// Filter Parsing Benchmarks
// ============================================================================

fn bench_parse_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_filter");
    for (name, query) in filter_cases() {
        group.throughput(Throughput::Bytes(query.len() as u64));
        group.bench_function(name, |b| b.iter(|| parse_filter(black_box(query))));
    }
    group.finish();
}

fn bench_compile_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_filter");
    for (name, query) in filter_cases() {
        group.bench_function(name, |b| b.iter(|| Filter::new(black_box(query))));
    }
    group.finish();
}

// ============================================================================
// Projection Parsing Benchmarks
// ============================================================================

fn bench_parse_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_projection");
    for (name, proj) in projection_cases() {
        group.throughput(Throughput::Bytes(proj.len() as u64));
        group.bench_function(name, |b| b.iter(|| parse_projection(black_box(proj))));
    }
    group.finish();
}

fn bench_long_expression(c: &mut Criterion) {
    let values: Vec<String> = (0..1_000).map(|i| format!("v{}", i)).collect();
    let query = format!("key:({})", values.join(" "));
    let mut group = c.benchmark_group("long_expression");
    group.throughput(Throughput::Bytes(query.len() as u64));
    group.bench_function("multi_match_1000", |b| b.iter(|| parse_filter(black_box(&query))));
    group.finish();
}

criterion_group!(
    benches,
    bench_parse_filter,
    bench_compile_filter,
    bench_parse_projection,
    bench_long_expression
);
criterion_main!(benches);
