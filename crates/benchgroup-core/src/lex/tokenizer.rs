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

//! Tokenizer shared by the filter and projection parsers.
//!
//! A [`Tokenizer`] is an immutable cursor into the expression text. Reading
//! a token returns the token together with a new cursor positioned after
//! it, so a parser can peek at the next token simply by not adopting the
//! returned cursor.

use regex::Regex;

use super::quote::{quote, unquote};
use super::token::{Token, TokenKind};
use crate::error::{ParseResult, SyntaxError};

/// A cursor over expression text.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// The full expression text.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.src
    }

    /// Byte offset of the next token, after any whitespace.
    pub fn offset(&self) -> usize {
        self.skip_space()
    }

    /// Build a syntax error located at the next token.
    pub fn error(&self, message: impl Into<String>) -> SyntaxError {
        self.error_at(self.offset(), message)
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(self.src, offset, message)
    }

    /// Read the next key or operator token. Keys are bare or quoted words.
    pub fn key(&self) -> ParseResult<(Token, Tokenizer<'a>)> {
        self.next(false)
    }

    /// Read the next value or operator token. Values are bare or quoted
    /// words, or `/regexp/` literals.
    pub fn value(&self) -> ParseResult<(Token, Tokenizer<'a>)> {
        self.next(true)
    }

    /// Check that no tokens remain.
    pub fn end(&self) -> ParseResult<()> {
        let (tok, _) = self.key()?;
        if tok.kind != TokenKind::Eof {
            return Err(self.error_at(tok.offset, format!("unexpected {}", quote(&tok.text))));
        }
        Ok(())
    }

    fn skip_space(&self) -> usize {
        let rest = &self.src[self.pos..];
        let trimmed = rest.trim_start();
        self.pos + (rest.len() - trimmed.len())
    }

    fn advance(&self, pos: usize) -> Tokenizer<'a> {
        Tokenizer { src: self.src, pos }
    }

    fn next(&self, allow_regexp: bool) -> ParseResult<(Token, Tokenizer<'a>)> {
        let start = self.skip_space();
        let rest = &self.src[start..];
        let Some(ch) = rest.chars().next() else {
            return Ok((Token::new(TokenKind::Eof, "", start), self.advance(start)));
        };

        if let Some(kind) = TokenKind::punctuation(ch) {
            let end = start + ch.len_utf8();
            return Ok((Token::new(kind, ch.to_string(), start), self.advance(end)));
        }
        if ch == '"' {
            return self.quoted(start);
        }
        if allow_regexp && ch == '/' {
            return self.regexp(start);
        }

        // Bare word. Only operators that can't appear mid-word end it.
        let len = rest
            .find(|c: char| c.is_whitespace() || is_op(c))
            .unwrap_or(rest.len());
        let word = &rest[..len];
        let kind = match word {
            "AND" => TokenKind::And,
            "OR" => TokenKind::Or,
            _ => TokenKind::Word,
        };
        Ok((Token::new(kind, word, start), self.advance(start + len)))
    }

    fn quoted(&self, start: usize) -> ParseResult<(Token, Tokenizer<'a>)> {
        let body = &self.src[start + 1..];
        let mut escaped = false;
        let mut close = None;
        for (i, c) in body.char_indices() {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                close = Some(start + 1 + i);
                break;
            }
        }
        let Some(close) = close else {
            return Err(self.error_at(start, "missing end quote"));
        };
        let text = unquote(&self.src[start..=close])
            .ok_or_else(|| self.error_at(start, "bad escape sequence"))?;
        Ok((Token::new(TokenKind::Quoted, text, start), self.advance(close + 1)))
    }

    /// Lex a `/regexp/` literal starting at `start`.
    ///
    /// The pattern ends at the first unescaped `/` for which the text so
    /// far compiles, so slashes inside groups and classes such as `[/]`
    /// need no escaping. `\/` stands for a literal slash.
    ///
    /// Only slashes outside any open group or class are tried, at most
    /// [`MAX_REGEXP_ATTEMPTS`] of them plus the final slash, so a
    /// malformed literal costs a bounded number of compiles.
    fn regexp(&self, start: usize) -> ParseResult<(Token, Tokenizer<'a>)> {
        let body_start = start + 1;
        let scan = scan_regexp(&self.src[body_start..]);
        let mut last_err = None;
        for &(i, len) in &scan.ends {
            match Regex::new(&scan.pattern[..len]) {
                Ok(re) => {
                    let end = body_start + i + 1;
                    let follows_ok = self.src[end..]
                        .chars()
                        .next()
                        .map_or(true, |n| n.is_whitespace() || is_op(n));
                    if !follows_ok {
                        return Err(self.error_at(
                            end,
                            "regexp must be followed by space or an operator (unescaped \"/\"?)",
                        ));
                    }
                    let mut tok = Token::new(
                        TokenKind::Regexp,
                        &self.src[body_start..body_start + i],
                        start,
                    );
                    tok.regex = Some(re);
                    return Ok((tok, self.advance(end)));
                }
                Err(err) => last_err = Some(err),
            }
        }
        match last_err {
            Some(err) => Err(self.error_at(start, err.to_string())),
            None => Err(self.error_at(start, "missing close \"/\"")),
        }
    }
}

/// Compile attempts at top-level slashes per regexp literal.
const MAX_REGEXP_ATTEMPTS: usize = 16;

/// A regexp body with escapes resolved and the slashes worth compiling at.
#[derive(Debug)]
struct RegexpScan {
    pattern: String,
    /// `(offset of the slash in the body, pattern length before it)`.
    ends: Vec<(usize, usize)>,
}

fn scan_regexp(body: &str) -> RegexpScan {
    let mut pattern = String::with_capacity(body.len());
    let mut ends = Vec::new();
    let mut last_slash = None;
    let mut escaped = false;
    let mut class = 0usize;
    // Just after `[` or `[^`, where `]` is a literal.
    let mut class_open = false;
    let mut group = 0isize;
    for (i, c) in body.char_indices() {
        if escaped {
            escaped = false;
            class_open = false;
            if c != '/' {
                pattern.push('\\');
            }
            pattern.push(c);
            continue;
        }
        match c {
            '\\' => {
                escaped = true;
                continue;
            }
            '/' => {
                let end = (i, pattern.len());
                if class == 0 && group == 0 && ends.len() < MAX_REGEXP_ATTEMPTS {
                    ends.push(end);
                }
                last_slash = Some(end);
            }
            '[' => {
                class += 1;
                class_open = true;
                pattern.push(c);
                continue;
            }
            '^' if class_open => {
                pattern.push(c);
                continue;
            }
            ']' if class > 0 && !class_open => class -= 1,
            '(' if class == 0 => group += 1,
            ')' if class == 0 => group -= 1,
            _ => {}
        }
        class_open = false;
        pattern.push(c);
    }
    // The last slash always gets a chance, however the nesting looked.
    if let Some(end) = last_slash {
        if ends.last() != Some(&end) {
            ends.push(end);
        }
    }
    RegexpScan { pattern, ends }
}

/// Operators that terminate a bare word.
fn is_op(c: char) -> bool {
    matches!(c, '(' | ')' | ':' | '@' | ',')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str, values: bool) -> Vec<(TokenKind, String, usize)> {
        let mut toks = Tokenizer::new(src);
        let mut out = Vec::new();
        loop {
            let (tok, rest) = if values { toks.value() } else { toks.key() }.unwrap();
            if tok.kind == TokenKind::Eof {
                return out;
            }
            out.push((tok.kind, tok.text, tok.offset));
            toks = rest;
        }
    }

    #[test]
    fn test_words_and_operators() {
        use TokenKind::*;
        assert_eq!(
            kinds("-a:b AND (c-d*:e)", false),
            vec![
                (Minus, "-".into(), 0),
                (Word, "a".into(), 1),
                (Colon, ":".into(), 2),
                (Word, "b".into(), 3),
                (And, "AND".into(), 5),
                (LParen, "(".into(), 9),
                (Word, "c-d*".into(), 10),
                (Colon, ":".into(), 14),
                (Word, "e".into(), 15),
                (RParen, ")".into(), 16),
            ]
        );
    }

    #[test]
    fn test_key_mode_treats_slash_as_word() {
        assert_eq!(
            kinds("/size@num,.name", false),
            vec![
                (TokenKind::Word, "/size".into(), 0),
                (TokenKind::At, "@".into(), 5),
                (TokenKind::Word, "num".into(), 6),
                (TokenKind::Comma, ",".into(), 9),
                (TokenKind::Word, ".name".into(), 10),
            ]
        );
    }

    #[test]
    fn test_quoted_word() {
        let (tok, rest) = Tokenizer::new(r#"  "a b\"" x"#).key().unwrap();
        assert_eq!(tok.kind, TokenKind::Quoted);
        assert_eq!(tok.text, "a b\"");
        assert_eq!(tok.offset, 2);
        assert_eq!(rest.offset(), 10);
    }

    #[test]
    fn test_quoted_errors() {
        let err = Tokenizer::new(r#"a "b"#).key().unwrap().1.key().unwrap_err();
        assert_eq!((err.message.as_str(), err.offset), ("missing end quote", 2));

        let err = Tokenizer::new(r#""a\z""#).key().unwrap_err();
        assert_eq!((err.message.as_str(), err.offset), ("bad escape sequence", 0));
    }

    #[test]
    fn test_regexp_token() {
        let (tok, rest) = Tokenizer::new(r"/b[/](/)\/c/ x").value().unwrap();
        assert_eq!(tok.kind, TokenKind::Regexp);
        assert_eq!(tok.text, r"b[/](/)\/c");
        assert!(tok.regex.as_ref().unwrap().is_match("b///c"));
        assert_eq!(rest.offset(), 13);
    }

    #[test]
    fn test_regexp_followed_by_operator() {
        let (tok, rest) = Tokenizer::new("/x/)").value().unwrap();
        assert_eq!(tok.text, "x");
        assert_eq!(rest.key().unwrap().0.kind, TokenKind::RParen);
    }

    #[test]
    fn test_regexp_errors() {
        let err = Tokenizer::new("/b").value().unwrap_err();
        assert_eq!((err.message.as_str(), err.offset), ("missing close \"/\"", 0));

        let err = Tokenizer::new("/b/c").value().unwrap_err();
        assert_eq!(err.offset, 3);
        assert_eq!(
            err.message,
            "regexp must be followed by space or an operator (unescaped \"/\"?)"
        );

        let err = Tokenizer::new("/(b/").value().unwrap_err();
        assert_eq!(err.offset, 0);
        assert_eq!(err.message, Regex::new("(b").unwrap_err().to_string());
    }

    #[test]
    fn test_regexp_scan_skips_nested_slashes() {
        let scan = scan_regexp(r"b[/](/)[]/][^]/]\/c/ x");
        assert_eq!(scan.pattern, "b[/](/)[]/][^]/]/c/ x");
        assert_eq!(scan.ends, vec![(19, 18)]);
    }

    #[test]
    fn test_regexp_scan_bounds_attempts() {
        // An open group hides every slash but the last.
        let body = format!("({}", "/".repeat(20_000));
        assert_eq!(scan_regexp(&body).ends, vec![(20_000, 20_000)]);

        // A literal that never compiles gets a bounded number of tries.
        for head in ["*", ")", "a{"] {
            let body = format!("{}{}", head, "/".repeat(20_000));
            let scan = scan_regexp(&body);
            assert!(scan.ends.len() <= MAX_REGEXP_ATTEMPTS + 1, "{}", head);
            assert_eq!(scan.ends.last().map(|e| e.0), Some(body.len() - 1));
        }
    }

    #[test]
    fn test_long_malformed_regexp_reports_error() {
        let src = format!("/({}", "/".repeat(20_000));
        let err = Tokenizer::new(&src).value().unwrap_err();
        assert_eq!(err.offset, 0);
        assert_eq!(
            err.message,
            Regex::new(&format!("({}", "/".repeat(19_999))).unwrap_err().to_string()
        );
    }

    #[test]
    fn test_end() {
        assert!(Tokenizer::new("   ").end().is_ok());
        let err = Tokenizer::new(" )").end().unwrap_err();
        assert_eq!((err.message.as_str(), err.offset), ("unexpected \")\"", 1));
    }
}
