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

//! Per-field value orderings.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use regex::Regex;

/// How a field's values are ordered.
#[derive(Debug, Clone)]
pub(crate) enum Order {
    /// Order of first observation.
    First(FirstSeen),
    /// Byte-wise.
    Alpha,
    /// Fuzzy numeric, see [`parse_num`].
    Num,
    /// Position in an explicit value list.
    Fixed(Arc<HashMap<String, usize>>),
}

/// Observation indexes of the values a field has produced.
#[derive(Debug, Clone, Default)]
pub(crate) struct FirstSeen {
    index: HashMap<Arc<str>, usize>,
}

impl Order {
    /// Look up a named order. `first` is not a named order; the parser
    /// maps it to the default.
    pub(crate) fn builtin(name: &str) -> Option<Order> {
        match name {
            "alpha" => Some(Order::Alpha),
            "num" => Some(Order::Num),
            _ => None,
        }
    }

    pub(crate) fn fixed(values: &[String]) -> Order {
        let mut pos = HashMap::with_capacity(values.len());
        // A repeated value takes its last position.
        for (i, v) in values.iter().enumerate() {
            pos.insert(v.clone(), i);
        }
        Order::Fixed(Arc::new(pos))
    }

    /// The same policy with no observation history, for a new field that
    /// inherits its order from a group.
    pub(crate) fn fresh(&self) -> Order {
        match self {
            Order::First(_) => Order::First(FirstSeen::default()),
            other => other.clone(),
        }
    }

    /// Record `value` as observed. Only the first-seen policy keeps
    /// history.
    pub(crate) fn observe(&mut self, value: &Arc<str>) {
        if let Order::First(seen) = self {
            if !seen.index.contains_key(value.as_ref()) {
                let next = seen.index.len();
                seen.index.insert(Arc::clone(value), next);
            }
        }
    }

    pub(crate) fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            Order::First(seen) => {
                let pos = |v: &str| seen.index.get(v).copied().unwrap_or(0);
                pos(a).cmp(&pos(b))
            }
            Order::Alpha => a.cmp(b),
            Order::Num => compare_num(a, b),
            Order::Fixed(pos) => {
                let pos = |v: &str| pos.get(v).copied().unwrap_or(0);
                pos(a).cmp(&pos(b))
            }
        }
    }
}

impl Default for Order {
    fn default() -> Self {
        Order::First(FirstSeen::default())
    }
}

/// Numbers before non-numbers; NaN after every other number.
fn compare_num(a: &str, b: &str) -> Ordering {
    match (parse_num(a), parse_num(b)) {
        (Some(x), Some(y)) => {
            if x < y || (!x.is_nan() && y.is_nan()) {
                Ordering::Less
            } else if x > y || (x.is_nan() && !y.is_nan()) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

const NUM_PREFIXES: &str = "KMGTPEZY";

fn num_re() -> &'static Regex {
    static NUM_RE: OnceLock<Regex> = OnceLock::new();
    NUM_RE.get_or_init(|| {
        Regex::new(r"([0-9.]+)([kKMGTPEZY]i?)?[bB]?").unwrap_or_else(|e| panic!("invalid number pattern: {}", e))
    })
}

/// Parse a number the way people write them in benchmark names.
///
/// Plain floats (including `inf` and `NaN`) parse directly. Otherwise the
/// first run of digits in `x` is taken, scaled by an optional SI prefix
/// (`k`, `K`, `M`, ... `Y`) or, with an `i` suffix, the binary prefix
/// (`Ki`, `Mi`, ...). A trailing `b`/`B` is ignored.
///
/// # Examples
///
/// ```
/// use benchgroup_core::parse_num;
///
/// assert_eq!(parse_num("1.5"), Some(1.5));
/// assert_eq!(parse_num("4k"), Some(4000.0));
/// assert_eq!(parse_num("size=2MiB"), Some(2.0 * 1024.0 * 1024.0));
/// assert_eq!(parse_num("none"), None);
/// ```
pub fn parse_num(x: &str) -> Option<f64> {
    if let Ok(v) = x.parse::<f64>() {
        return Some(v);
    }

    let caps = num_re().captures(x)?;
    let v: f64 = caps.get(1)?.as_str().parse().ok()?;
    let suffix = caps.get(2).map_or("", |m| m.as_str());
    let rank = match suffix.as_bytes().first() {
        Some(b'k') => 1,
        Some(&pre) => 1 + NUM_PREFIXES.bytes().position(|p| p == pre).unwrap_or(0),
        None => 0,
    };
    let base: f64 = if suffix.ends_with('i') { 1024.0 } else { 1000.0 };
    Some(v * base.powi(rank as i32))
}
