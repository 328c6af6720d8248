use std::collections::HashMap;
use std::ops::Range;

use regex::Regex;

use crate::errors::Result;
use crate::naming::NameGenerator;
use crate::scanner::scan;

pub struct SymbolObfuscator {
    pattern: Regex,
}

impl SymbolObfuscator {
    pub fn new(tag_prefix: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(r"\b{}[a-zA-Z0-9_]+", regex::escape(tag_prefix)))?;
        Ok(Self { pattern })
    }

    /// Tagged words in code and comments. String literals are never touched.
    fn tagged_spans(&self, source: &str) -> Vec<Range<usize>> {
        scan(source)
            .into_iter()
            .filter(|token| !token.is_literal())
            .flat_map(|token| {
                let offset = token.span.start;
                self.pattern
                    .find_iter(token.text(source))
                    .map(move |m| offset + m.start()..offset + m.end())
            })
            .collect()
    }

    /// Distinct tagged tokens in order of first appearance.
    pub fn discover<'a>(&self, source: &'a str) -> Vec<&'a str> {
        let mut words: Vec<&str> = Vec::new();
        for span in self.tagged_spans(source) {
            let word = &source[span];
            if !words.contains(&word) {
                words.push(word);
            }
        }
        words
    }

    /// Returns the rewritten text and the number of distinct tokens renamed.
    pub fn obfuscate_symbols(&self, source: &str, names: &NameGenerator) -> (String, usize) {
        // later discoveries are usually the longer, more specific names
        let renames: HashMap<&str, String> = self
            .discover(source)
            .into_iter()
            .rev()
            .map(|word| (word, names.generate()))
            .collect();

        let mut out = String::with_capacity(source.len() + renames.len() * names.length() * 2);
        let mut last = 0;
        for span in self.tagged_spans(source) {
            out.push_str(&source[last..span.start]);
            let word = &source[span.clone()];
            match renames.get(word) {
                Some(name) => out.push_str(name),
                None => out.push_str(word),
            }
            last = span.end;
        }
        out.push_str(&source[last..]);
        (out, renames.len())
    }
}
