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

//! Lexical analysis for filter and projection expressions.
//!
//! # Module Structure
//!
//! - [`token`] - Token kinds and offset-tagged tokens
//! - [`tokenizer`] - The cursor-style tokenizer used by both parsers
//! - [`quote`] - Go-syntax quoting and unquoting of words
//!
//! # Common Syntax
//!
//! ```text
//! word     = bareWord | double-quoted Go string
//! bareWord = [^-*"():@,][^ ():@,]*
//! regexp   = "/" pattern "/"      (value positions only)
//! ```
//!
//! `AND` and `OR` are operators when written as bare words; quote them to
//! use them as keys or values.
//!
//! # Examples
//!
//! ```
//! use benchgroup_core::lex::{TokenKind, Tokenizer};
//!
//! let toks = Tokenizer::new(".name:Copy");
//! let (tok, toks) = toks.key().unwrap();
//! assert_eq!(tok.kind, TokenKind::Word);
//! assert_eq!(tok.text, ".name");
//! let (tok, _) = toks.key().unwrap();
//! assert_eq!(tok.kind, TokenKind::Colon);
//! assert_eq!(tok.offset, 5);
//! ```

pub mod quote;
pub mod token;
pub mod tokenizer;

pub use quote::{quote, quote_value, quote_word, unquote};
pub use token::{Token, TokenKind};
pub use tokenizer::Tokenizer;
