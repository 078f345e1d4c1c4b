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

//! Benchgroup Benchmark Framework
//!
//! Synthetic benchmark records for measuring filtering, projection, and
//! ordering performance.
//!
//! ## Usage
//!
//! Run all benchmarks:
//! ```bash
//! cargo bench --package benchgroup-bench
//! ```
//!
//! Run specific benchmark:
//! ```bash
//! cargo bench --package benchgroup-bench --bench projection
//! ```

use benchgroup_core::{Record, Value};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Standard record counts for benchmarks
pub mod sizes {
    /// Small run: a single package
    pub const SMALL: usize = 100;
    /// Medium run: a handful of packages and configurations
    pub const MEDIUM: usize = 1_000;
    /// Large run: a full CI sweep
    pub const LARGE: usize = 10_000;
}

const BENCHMARKS: &[&str] = &["Copy", "Fill", "Hash", "Sort", "Encode", "Decode"];
const SIZES: &[&str] = &["64", "1k", "4k", "64k", "1M", "16Mi"];
const GOOS: &[&str] = &["linux", "darwin", "windows"];
const GOARCH: &[&str] = &["amd64", "arm64"];
const PROCS: &[u32] = &[1, 4, 8, 16];

/// Generate `count` records with realistic names and configuration.
///
/// Names look like `Copy/size=4k/align=8-16`; each record carries `goos`,
/// `goarch`, `commit`, and occasionally `cpu` file config, and measures
/// `sec/op`, `B/op`, and `allocs/op`. Output is deterministic.
pub fn generate_records(count: usize) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(12345);
    (0..count)
        .map(|i| {
            let name = format!(
                "{}/size={}/align={}-{}",
                pick(&mut rng, BENCHMARKS),
                pick(&mut rng, SIZES),
                1u32 << rng.gen_range(0..4u32),
                PROCS[rng.gen_range(0..PROCS.len())],
            );
            let mut rec = Record::new(name)
                .with_file_config("goos", pick(&mut rng, GOOS))
                .with_file_config("goarch", pick(&mut rng, GOARCH))
                .with_file_config("commit", format!("{:07x}", i % 13 * 0x1f3d5));
            if rng.gen_bool(0.2) {
                rec.set_file_config("cpu", "Intel(R) Xeon(R) CPU @ 2.20GHz");
            }
            let ns = rng.gen_range(10.0..10_000.0);
            rec.values
                .push(Value::new(ns / 1e9, "sec/op").with_original(ns, "ns/op"));
            rec.with_value(rng.gen_range(0..4096) as f64, "B/op")
                .with_value(rng.gen_range(0..16) as f64, "allocs/op")
        })
        .collect()
}

fn pick<'a>(rng: &mut StdRng, choices: &[&'a str]) -> &'a str {
    choices[rng.gen_range(0..choices.len())]
}

/// Filter expressions of increasing complexity.
pub fn filter_cases() -> Vec<(&'static str, &'static str)> {
    vec![
        ("match_all", "*"),
        ("single_key", "goos:linux"),
        ("multi_value", "goos:(linux darwin) goarch:amd64"),
        ("regexp", ".name:/^(Copy|Fill)$/ -/size:/^1/"),
        ("unit_mask", ".unit:(sec/op B/op) OR commit:0000000"),
    ]
}

/// Projection expressions of increasing complexity.
pub fn projection_cases() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", ".name"),
        ("sub_keys", ".name,/size@num,/align@num"),
        ("config_group", ".config"),
        ("fullname", ".fullname,goos@(linux darwin windows)"),
    ]
}
