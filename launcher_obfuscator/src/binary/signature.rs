use std::fmt::Write as _;
use std::path::Path;

use rand::rngs::OsRng;
use rand::TryRngCore;
use tracing::{debug, info};

use super::BinaryScrubber;
use crate::errors::{ObfuscationError, Result};
use crate::tool::run_checked;

/// UPX copyright and header banner, in the fragments the packer leaves in a
/// compressed binary.
pub const UPX_SIGNATURE: &[&[u8]] = &[
    b"Info: This",
    b" file is p",
    b"acked with",
    b" the UPX e",
    b"xecutable ",
    b"packer htt",
    b"p://upx.sf",
    b".net $\n\0$I",
    b"d: UPX 3.9",
    b"6 Copyrigh",
    b"t (C) 1996",
    b"-2020 the ",
    b"UPX Team. ",
    b"All Rights",
    b" Reserved.",
    b"UPX!",
];

/// `\xHH` escape of every byte, understood by the stream editor on both sides
/// of a substitution.
pub fn sed_escape(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 4);
    for b in bytes {
        let _ = write!(out, "\\x{b:02x}");
    }
    out
}

/// Loop that joins every record into the pattern space before the
/// substitution runs, so fragments spanning `\n` or `\0` still match.
pub const SED_SLURP: &str = ":a;$!N;$!ba;";

pub fn sed_expression(pattern: &[u8], replacement: &[u8]) -> String {
    format!("s/{}/{}/g", sed_escape(pattern), sed_escape(replacement))
}

/// Arguments for one whole-file, in-place substitution.
pub fn sed_args(pattern: &[u8], replacement: &[u8], target: &str) -> Vec<String> {
    vec![
        "-z".to_string(),
        "-i".to_string(),
        "-e".to_string(),
        format!("{SED_SLURP}{}", sed_expression(pattern, replacement)),
        target.to_string(),
    ]
}

/// `len` bytes from the OS randomness source, drawn one at a time.
pub fn random_replacement(len: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(len);
    let mut byte = [0u8; 1];
    while out.len() < len {
        OsRng
            .try_fill_bytes(&mut byte)
            .map_err(|e| ObfuscationError::RandomSource(e.to_string()))?;
        out.push(byte[0]);
    }
    Ok(out)
}

impl BinaryScrubber {
    /// Overwrites every signature fragment with random bytes of the same
    /// length. The first failed substitution aborts the scrub.
    pub async fn scrub_signature(&self, binary_path: &Path) -> Result<usize> {
        let target = binary_path.to_string_lossy().into_owned();

        for fragment in UPX_SIGNATURE {
            let replacement = random_replacement(fragment.len())?;
            let args = sed_args(fragment, &replacement, &target);
            debug!(fragment_len = fragment.len(), "scrubbing signature fragment");
            run_checked(self.runner.as_ref(), &self.sed_tool, &args, self.retries).await?;
        }

        info!(binary = %target, fragments = UPX_SIGNATURE.len(), "signature scrubbed");
        Ok(UPX_SIGNATURE.len())
    }
}
