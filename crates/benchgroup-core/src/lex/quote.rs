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

//! Quoting and unquoting of words.
//!
//! Quoted words use Go string literal syntax: backslash escapes `\a \b \f
//! \n \r \t \v \\ \"`, octal `\NNN`, hex `\xHH`, and Unicode `\uXXXX` /
//! `\UXXXXXXXX`. Byte escapes must denote ASCII so the result stays valid
//! UTF-8.

use std::fmt::Write;
use std::str::Chars;

/// Decode a double-quoted string, including its surrounding quotes.
///
/// Returns `None` for malformed input: missing quotes, an unescaped quote
/// or newline inside the string, or a bad escape sequence.
pub fn unquote(s: &str) -> Option<String> {
    let inner = s.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' | '\n' => return None,
            '\\' => out.push(unescape(&mut chars)?),
            c => out.push(c),
        }
    }
    Some(out)
}

fn unescape(chars: &mut Chars<'_>) -> Option<char> {
    let c = match chars.next()? {
        'a' => '\x07',
        'b' => '\x08',
        'f' => '\x0c',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\x0b',
        '\\' => '\\',
        '"' => '"',
        'x' => ascii(read_digits(chars, 2, 16)?)?,
        'u' => char::from_u32(read_digits(chars, 4, 16)?)?,
        'U' => char::from_u32(read_digits(chars, 8, 16)?)?,
        d @ '0'..='7' => {
            let rest = read_digits(chars, 2, 8)?;
            let v = (d as u32 - '0' as u32) * 64 + rest;
            ascii(v)?
        }
        _ => return None,
    };
    Some(c)
}

fn read_digits(chars: &mut Chars<'_>, n: usize, radix: u32) -> Option<u32> {
    let mut v = 0u32;
    for _ in 0..n {
        v = v * radix + chars.next()?.to_digit(radix)?;
    }
    Some(v)
}

fn ascii(v: u32) -> Option<char> {
    if v < 0x80 {
        char::from_u32(v)
    } else {
        None
    }
}

/// Quote `s` as a double-quoted string.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0b' => out.push_str("\\v"),
            c if (c as u32) < 0x80 && c.is_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if c.is_control() && (c as u32) < 0x10000 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\U{:08x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Quote `s` only if it cannot be written as a bare word in key position.
pub fn quote_word(s: &str) -> String {
    if needs_quote(s) {
        quote(s)
    } else {
        s.to_string()
    }
}

/// Quote `s` only if it cannot be written as a bare word in value
/// position, where a leading `/` would start a regexp.
pub fn quote_value(s: &str) -> String {
    if s.starts_with('/') || needs_quote(s) {
        quote(s)
    } else {
        s.to_string()
    }
}

fn needs_quote(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return true;
    };
    if s == "AND" || s == "OR" || matches!(first, '-' | '*' | '"') {
        return true;
    }
    s.chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '(' | ')' | ':' | '@' | ',' | '"'))
}
