#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use launcher_obfuscator::binary::SED_SLURP;
use launcher_obfuscator::errors::{ObfuscationError, Result};
use launcher_obfuscator::tool::{ToolOutput, ToolRunner};

pub fn ok_output() -> ToolOutput {
    ToolOutput {
        status: Some(0),
        stdout: String::new(),
        stderr: String::new(),
    }
}

/// Records every call and answers from a queue, falling back to success.
#[derive(Default)]
pub struct FakeRunner {
    pub calls: Mutex<Vec<(String, Vec<String>)>>,
    pub responses: Mutex<Vec<Result<ToolOutput>>>,
}

impl FakeRunner {
    pub fn with_responses(responses: Vec<Result<ToolOutput>>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(responses),
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolRunner for FakeRunner {
    async fn run(&self, tool: &str, args: &[String]) -> Result<ToolOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((tool.to_string(), args.to_vec()));
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(ok_output())
        } else {
            responses.remove(0)
        }
    }
}

/// Applies `sed [-z] -i -e SCRIPT <file>` in process. SCRIPT is one
/// `s/<\xHH..>/<\xHH..>/g`, optionally behind the slurp loop. Without the
/// loop the substitution sees one record at a time, as sed does.
#[derive(Default)]
pub struct SedRunner {
    pub fail_on_call: Option<usize>,
    pub calls: Mutex<usize>,
}

#[async_trait]
impl ToolRunner for SedRunner {
    async fn run(&self, tool: &str, args: &[String]) -> Result<ToolOutput> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        if self.fail_on_call == Some(call) {
            return Ok(ToolOutput {
                status: Some(4),
                stdout: String::new(),
                stderr: format!("{tool}: simulated failure"),
            });
        }

        assert!(args.iter().any(|a| a == "-i"));
        let delimiter = if args.iter().any(|a| a == "-z") { 0u8 } else { b'\n' };
        let script_at = args.iter().position(|a| a == "-e").expect("missing -e") + 1;
        let script = args[script_at].as_str();
        let (slurp, script) = match script.strip_prefix(SED_SLURP) {
            Some(rest) => (true, rest),
            None => (false, script),
        };
        let parts: Vec<&str> = script.split('/').collect();
        assert_eq!(parts.len(), 4, "unexpected expression {script}");
        let pattern = unescape(parts[1]);
        let replacement = unescape(parts[2]);
        assert_eq!(pattern.len(), replacement.len());

        let path = args.last().expect("missing file");
        let content = std::fs::read(path).map_err(ObfuscationError::from)?;
        let out = if slurp {
            replace_all(&content, &pattern, &replacement)
        } else {
            content
                .split(|&b| b == delimiter)
                .map(|record| replace_all(record, &pattern, &replacement))
                .collect::<Vec<_>>()
                .join(&[delimiter][..])
        };
        std::fs::write(path, out).map_err(ObfuscationError::from)?;
        Ok(ok_output())
    }
}

/// The script of an `-e` sed invocation with the slurp loop removed.
pub fn sed_substitution(args: &[String]) -> &str {
    let script_at = args.iter().position(|a| a == "-e").expect("missing -e") + 1;
    let script = args[script_at].as_str();
    script.strip_prefix(SED_SLURP).unwrap_or(script)
}

pub fn unescape(escaped: &str) -> Vec<u8> {
    escaped
        .split("\\x")
        .filter(|h| !h.is_empty())
        .map(|h| u8::from_str_radix(h, 16).unwrap())
        .collect()
}

pub fn replace_all(haystack: &[u8], needle: &[u8], with: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(haystack.len());
    let mut i = 0;
    while i < haystack.len() {
        if haystack[i..].starts_with(needle) {
            out.extend_from_slice(with);
            i += needle.len();
        } else {
            out.push(haystack[i]);
            i += 1;
        }
    }
    out
}

pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

/// Lets a test keep a handle on a runner after boxing it.
pub struct SharedRunner<R>(pub Arc<R>);

#[async_trait]
impl<R: ToolRunner> ToolRunner for SharedRunner<R> {
    async fn run(&self, tool: &str, args: &[String]) -> Result<ToolOutput> {
        self.0.run(tool, args).await
    }
}
