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

//! Ordering and header benchmarks.
//!
//! Measures config sorting under each ordering policy, fuzzy number
//! parsing, and header compaction.

use std::collections::HashSet;

use benchgroup_bench::{generate_records, sizes};
use benchgroup_core::{parse_num, Config, ConfigHeader, Filter, ProjectionParser, Schema};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn projected(proj: &str) -> (Schema, Vec<Config>) {
    let mut filter = Filter::match_all();
    let mut schema = ProjectionParser::new()
        .parse(proj, &mut filter)
        .expect("benchmark projection parses");
    let mut configs: Vec<Config> = generate_records(sizes::LARGE)
        .iter()
        .map(|rec| schema.project(rec))
        .collect();
    let mut seen = HashSet::new();
    configs.retain(|c| seen.insert(c.clone()));
    (schema, configs)
}

// ============================================================================
// Sorting Benchmarks
// ============================================================================

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_configs");
    let cases = [
        ("first", ".name,/size,/align"),
        ("alpha", ".name@alpha,/size@alpha"),
        ("num", "/size@num,/align@num,/gomaxprocs@num"),
        ("fixed", "goos@(windows darwin linux),.name"),
    ];
    for (name, proj) in cases {
        let (schema, configs) = projected(proj);
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut sorted = configs.clone();
                schema.sort_configs(&mut sorted);
                sorted
            })
        });
    }
    group.finish();
}

fn bench_parse_num(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_num");
    for input in ["1024", "4k", "16Mi", "size=2GiB", "none"] {
        group.bench_function(input, |b| b.iter(|| parse_num(black_box(input))));
    }
    group.finish();
}

// ============================================================================
// Header Benchmarks
// ============================================================================

fn bench_header(c: &mut Criterion) {
    let (schema, mut configs) = projected(".name,/size@num,/align@num,goos");
    schema.sort_configs(&mut configs);
    c.bench_function("config_header", |b| {
        b.iter(|| ConfigHeader::build(&schema, black_box(&configs)))
    });
    c.bench_function("non_singular_fields", |b| {
        b.iter(|| schema.non_singular_fields(black_box(&configs)))
    });
}

criterion_group!(benches, bench_sort, bench_parse_num, bench_header);
criterion_main!(benches);
