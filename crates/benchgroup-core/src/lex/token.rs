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

//! Token types produced by the expression tokenizer.

use regex::Regex;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A bare word, such as `.name` or `goos`.
    Word,
    /// A double-quoted string. The token text is the decoded string.
    Quoted,
    /// A `/regexp/` literal. Only produced where a value is expected.
    Regexp,
    /// The `AND` operator.
    And,
    /// The `OR` operator.
    Or,
    LParen,
    RParen,
    Colon,
    At,
    Comma,
    Minus,
    Star,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// The operator kind for a punctuation character, if any.
    ///
    /// `-` and `*` are only operators at the start of a token; inside a
    /// bare word they are ordinary characters.
    pub(crate) fn punctuation(ch: char) -> Option<TokenKind> {
        Some(match ch {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ':' => TokenKind::Colon,
            '@' => TokenKind::At,
            ',' => TokenKind::Comma,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            _ => return None,
        })
    }
}

/// A token with its source offset.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// Token text. For quoted strings this is the decoded value; for
    /// regexps it is the pattern source between the slashes.
    pub text: String,
    /// Byte offset of the token's first character.
    pub offset: usize,
    /// Compiled pattern for [`TokenKind::Regexp`] tokens.
    pub regex: Option<Regex>,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
            regex: None,
        }
    }

    /// Whether this token is a bare or quoted word.
    #[inline]
    pub fn is_word(&self) -> bool {
        matches!(self.kind, TokenKind::Word | TokenKind::Quoted)
    }
}
