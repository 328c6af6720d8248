use std::collections::HashSet;

use tracing::debug;

use crate::encoding::accessor_function;
use crate::imports::split_header;
use crate::naming::NameGenerator;
use crate::registry::{strip_delimiters, SecretsRegistry};
use crate::scanner::{scan, TokenKind};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LiteralStats {
    /// Literals added to the registry by this pass.
    pub registered: usize,
    /// Distinct literals left alone because of escapes or empty content.
    pub skipped: usize,
    /// Call sites rewritten to an accessor call.
    pub call_sites: usize,
    /// Call sites of leave entries, inlined verbatim.
    pub inlined: usize,
}

/// Whether a literal can be turned into an accessor without touching escape
/// semantics.
pub fn is_encodable(raw_token: &str) -> bool {
    !raw_token.contains('\\') && !strip_delimiters(raw_token).is_empty()
}

pub fn obfuscate_strings(
    source: &str,
    registry: &mut SecretsRegistry,
    names: &NameGenerator,
) -> (String, LiteralStats) {
    let mut stats = LiteralStats::default();
    let (header, body) = split_header(source);
    let tokens = scan(body);

    let mut seen = HashSet::new();
    for token in tokens.iter().filter(|t| t.is_literal()) {
        let raw = token.text(body);
        if !seen.insert(raw) || registry.contains(raw) {
            continue;
        }
        if is_encodable(raw) {
            registry.register(raw, names);
            stats.registered += 1;
        } else {
            debug!(literal = raw, "skipping literal with escapes or no content");
            stats.skipped += 1;
        }
    }

    let mut out = String::with_capacity(source.len() * 2);
    out.push_str(header);
    for token in &tokens {
        let text = token.text(body);
        let entry = match token.kind {
            TokenKind::Literal { .. } => registry.get(text),
            _ => None,
        };
        match entry {
            Some(entry) if entry.is_leave() => {
                out.push_str(&entry.plaintext);
                stats.inlined += 1;
            }
            Some(entry) => {
                out.push_str(&entry.accessor_name);
                out.push_str("()");
                stats.call_sites += 1;
            }
            None => out.push_str(text),
        }
    }

    out.push('\n');
    let mut rng = rand::rng();
    for entry in registry.iter().filter(|e| !e.is_leave()) {
        out.push_str(&accessor_function(&entry.accessor_name, &entry.plaintext, &mut rng));
        out.push('\n');
    }

    (out, stats)
}
