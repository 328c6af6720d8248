use once_cell::sync::Lazy;
use regex::Regex;

use crate::registry::strip_delimiters;
use crate::scanner::{scan, TokenKind};

static LEXEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+|[^\s\w]").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    TopLevel,
    PackageName,
    Decl,
    Block,
}

/// The leading package clause and import declarations: where they end and
/// the paths they name. Comments are skipped; the walk stops at the first
/// top-level word that is neither `package` nor `import`.
fn import_section(source: &str) -> (usize, Vec<&str>) {
    let mut end = 0;
    let mut paths = Vec::new();
    let mut state = State::TopLevel;

    'tokens: for token in scan(source) {
        match token.kind {
            TokenKind::Comment => {}
            TokenKind::Literal { .. } => match state {
                State::Decl => {
                    paths.push(strip_delimiters(token.text(source)));
                    end = token.span.end;
                    state = State::TopLevel;
                }
                State::Block => paths.push(strip_delimiters(token.text(source))),
                _ => break,
            },
            TokenKind::Code => {
                for lexeme in LEXEME.find_iter(token.text(source)) {
                    state = match (state, lexeme.as_str()) {
                        (State::TopLevel, "package") => State::PackageName,
                        (State::TopLevel, "import") => State::Decl,
                        (State::TopLevel, ";") => State::TopLevel,
                        (State::TopLevel, _) => break 'tokens,
                        (State::PackageName, _) => State::TopLevel,
                        (State::Decl, "(") => State::Block,
                        (State::Block, ")") => {
                            end = token.span.start + lexeme.end();
                            State::TopLevel
                        }
                        // aliases, `_`, `.` and separators
                        (state, _) => state,
                    };
                }
            }
        }
    }
    (end, paths)
}

/// Byte offset where the import section ends. Everything before it is the
/// header that literal obfuscation leaves alone; 0 when nothing is imported.
pub fn header_end(source: &str) -> usize {
    import_section(source).0
}

/// Splits `source` into `(header, body)` at [`header_end`].
pub fn split_header(source: &str) -> (&str, &str) {
    source.split_at(header_end(source))
}

/// Every imported path, followed by its `/`-separated segments, deduplicated
/// in order of first appearance. Aliases are ignored.
pub fn list_imports(source: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |token: &str| {
        if !token.is_empty() && !out.iter().any(|t| t == token) {
            out.push(token.to_string());
        }
    };

    for path in import_section(source).1 {
        push(path);
        for segment in path.split('/') {
            push(segment);
        }
    }
    out
}
