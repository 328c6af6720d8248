use std::path::Path;

use aho_corasick::{AhoCorasick, MatchKind};
use serde::Serialize;
use tracing::info;

use super::BinaryScrubber;
use crate::errors::Result;
use crate::imports::list_imports;
use crate::naming::NameGenerator;
use crate::tool::run_checked;

pub const STRIP_FLAGS: &str = "-sxX";

/// Sections dropped by the strip tool.
pub const REMOVED_SECTIONS: &[&str] = &[
    ".bss",
    ".comment",
    ".eh_frame",
    ".eh_frame_hdr",
    ".fini",
    ".fini_array",
    ".gnu.build.attributes",
    ".gnu.hash",
    ".gnu.version",
    ".gosymtab",
    ".got",
    ".note.ABI-tag",
    ".note.gnu.build-id",
    ".note.go.buildid",
    ".shstrtab",
    ".typelink",
];

/// Section names, Go runtime words and probe traces scrubbed from the text
/// of every binary.
pub const INTERNAL_TOKENS: &[&str] = &[
    // section headers
    ".gopclntab", ".go.buildinfo", ".noptrdata", ".noptrbss", ".data", ".rodata",
    ".text", ".itablink", ".shstrtab", ".dynamic", ".dynstr", ".dynsym",
    ".gnu.version_r", ".got.plt", ".init_array", ".interp", ".rela.dyn",
    ".rela.plt", ".tbss", ".plt", ".init",
    // runtime
    "name", "runtime", "command", "cmd", "ptr", "process", "unicode", "main",
    "path", "get", "reflect", "context", "debug", "fmt", "sync", "sort", "size",
    "heap", "fatal", "call", "fixed", "slice", "bit", "file", "read", "write",
    "buffer", "encrypt", "decrypt", "hash", "state", "external", "internal",
    "float",
    // probes
    "env", "trace", "pid",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StripReport {
    pub sections_removed: usize,
    pub removal_set: usize,
    pub tokens_replaced: usize,
    pub final_size: usize,
}

pub fn strip_args(binary_path: &Path) -> Vec<String> {
    std::iter::once(STRIP_FLAGS.to_string())
        .chain(
            REMOVED_SECTIONS
                .iter()
                .map(|s| format!("--remove-section={s}")),
        )
        .chain(std::iter::once(binary_path.to_string_lossy().into_owned()))
        .collect()
}

/// Internal tokens, then the launcher's imports, then its path and file
/// name; deduplicated keeping first occurrence, empties dropped.
pub fn removal_set(launcher_source: &str, launcher_path: &Path) -> Vec<String> {
    let launcher = launcher_path.to_string_lossy().into_owned();
    let file_name = launcher_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());

    let mut set: Vec<String> = Vec::new();
    let candidates = INTERNAL_TOKENS
        .iter()
        .map(|t| t.to_string())
        .chain(list_imports(launcher_source))
        .chain(std::iter::once(launcher))
        .chain(file_name);
    for token in candidates {
        if !token.is_empty() && !set.contains(&token) {
            set.push(token);
        }
    }
    set
}

/// Upper-cases the first alphabetic character: `main` → `Main`,
/// `.text` → `.Text`.
pub fn capitalize_first(token: &str) -> String {
    match token.char_indices().find(|(_, c)| c.is_alphabetic()) {
        Some((i, c)) => {
            let rest = &token[i + c.len_utf8()..];
            format!("{}{}{}", &token[..i], c.to_uppercase(), rest)
        }
        None => token.to_string(),
    }
}

/// Replaces every occurrence of each token, and of its capitalized variant,
/// with one random filler per token. A single leftmost-longest pass is used
/// so overlapping tokens cannot leave a survivor behind.
pub fn scrub_tokens(
    content: &[u8],
    tokens: &[String],
    names: &NameGenerator,
) -> Result<(Vec<u8>, usize)> {
    let mut patterns: Vec<String> = Vec::new();
    let mut owner: Vec<usize> = Vec::new();
    let mut fillers: Vec<String> = Vec::new();

    for token in tokens.iter().filter(|t| !t.is_empty()) {
        let idx = fillers.len();
        fillers.push(names.filler(token.chars().count()));
        for variant in [token.clone(), capitalize_first(token)] {
            if !patterns.contains(&variant) {
                patterns.push(variant);
                owner.push(idx);
            }
        }
    }
    if patterns.is_empty() {
        return Ok((content.to_vec(), 0));
    }

    let matcher = AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(&patterns)?;

    let mut replaced = 0;
    let mut out = Vec::with_capacity(content.len());
    matcher.replace_all_with_bytes(content, &mut out, |mat, _, dst| {
        dst.extend_from_slice(fillers[owner[mat.pattern().as_usize()]].as_bytes());
        replaced += 1;
        true
    });
    Ok((out, replaced))
}

impl BinaryScrubber {
    /// Strips sections from `binary_path`, then scrubs the removal set built
    /// from the pre-obfuscation launcher source at `launcher_path`.
    pub async fn strip_binary(&self, binary_path: &Path, launcher_path: &Path) -> Result<StripReport> {
        run_checked(
            self.runner.as_ref(),
            &self.strip_tool,
            &strip_args(binary_path),
            self.retries,
        )
        .await?;

        let launcher_source = tokio::fs::read_to_string(launcher_path).await?;
        let tokens = removal_set(&launcher_source, launcher_path);

        let content = tokio::fs::read(binary_path).await?;
        let (scrubbed, replaced) = scrub_tokens(&content, &tokens, &self.names)?;
        tokio::fs::write(binary_path, &scrubbed).await?;

        let report = StripReport {
            sections_removed: REMOVED_SECTIONS.len(),
            removal_set: tokens.len(),
            tokens_replaced: replaced,
            final_size: scrubbed.len(),
        };
        info!(
            binary = %binary_path.display(),
            tokens = report.removal_set,
            replaced = report.tokens_replaced,
            "binary stripped"
        );
        Ok(report)
    }
}
