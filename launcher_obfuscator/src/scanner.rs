//! Span scanner for launcher source.
//!
//! Splits text into code, comment and literal spans so that rewrites can
//! substitute by position instead of by repeated whole-text replacement.
//! The grammar is deliberately small:
//!
//! * `"…"` and `'…'` end at the first unescaped delimiter on the same line;
//!   an unterminated quote is plain code.
//! * `` `…` `` is raw and may span lines.
//! * `//` runs to end of line, `/* */` to its terminator (or end of input).
//!
//! Every delimiter is ASCII, so byte scanning never splits a UTF-8 sequence.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Code,
    Comment,
    Literal { delimiter: char },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, TokenKind::Literal { .. })
    }
}

/// Tokenizes `source` into contiguous spans covering all of it.
pub fn scan(source: &str) -> Vec<Token> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut code_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let found = match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                let end = find_from(bytes, i + 2, b'\n').unwrap_or(bytes.len());
                Some((TokenKind::Comment, end))
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let end = find_block_end(bytes, i + 2).unwrap_or(bytes.len());
                Some((TokenKind::Comment, end))
            }
            b'`' => find_from(bytes, i + 1, b'`').map(|close| {
                (TokenKind::Literal { delimiter: '`' }, close + 1)
            }),
            q @ (b'"' | b'\'') => find_quoted_end(bytes, i + 1, q).map(|close| {
                (TokenKind::Literal { delimiter: q as char }, close + 1)
            }),
            _ => None,
        };

        match found {
            Some((kind, end)) => {
                if code_start < i {
                    tokens.push(Token {
                        kind: TokenKind::Code,
                        span: code_start..i,
                    });
                }
                tokens.push(Token { kind, span: i..end });
                i = end;
                code_start = end;
            }
            None => i += 1,
        }
    }

    if code_start < bytes.len() {
        tokens.push(Token {
            kind: TokenKind::Code,
            span: code_start..bytes.len(),
        });
    }
    tokens
}

/// Literal tokens only, in source order.
pub fn literals(source: &str) -> impl Iterator<Item = Token> {
    scan(source).into_iter().filter(Token::is_literal)
}

fn find_from(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|p| from + p)
}

fn find_block_end(bytes: &[u8], from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(2)
        .position(|w| w == b"*/")
        .map(|p| from + p + 2)
}

fn find_quoted_end(bytes: &[u8], from: usize, quote: u8) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return None,
            b if b == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}
