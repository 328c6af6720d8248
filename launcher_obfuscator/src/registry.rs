use std::collections::HashMap;

use crate::naming::NameGenerator;

/// Sentinel carried by accessor names of literals that must stay verbatim.
pub const LEAVE_MARKER: &str = "leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretEntry {
    /// Literal exactly as found, delimiters included.
    pub raw_token: String,
    /// Literal content without delimiters.
    pub plaintext: String,
    pub accessor_name: String,
}

impl SecretEntry {
    pub fn is_leave(&self) -> bool {
        self.accessor_name.contains(LEAVE_MARKER)
    }
}

/// Append-only table. Iteration follows insertion order.
#[derive(Debug, Default)]
pub struct SecretsRegistry {
    entries: Vec<SecretEntry>,
    index: HashMap<String, usize>,
}

impl SecretsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, raw_token: &str) -> Option<&SecretEntry> {
        self.index.get(raw_token).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, raw_token: &str) -> bool {
        self.index.contains_key(raw_token)
    }

    /// Registers `raw_token` with a fresh accessor name, or returns the
    /// existing entry untouched.
    pub fn register(&mut self, raw_token: &str, names: &NameGenerator) -> &SecretEntry {
        if let Some(&i) = self.index.get(raw_token) {
            return &self.entries[i];
        }
        self.insert(raw_token, names.generate())
    }

    /// Registers `raw_token` as a leave entry: call sites get the plaintext
    /// inlined and no accessor is emitted. Existing entries are kept.
    pub fn preserve(&mut self, raw_token: &str) -> &SecretEntry {
        if let Some(&i) = self.index.get(raw_token) {
            return &self.entries[i];
        }
        self.insert(raw_token, format!("{LEAVE_MARKER}{}", self.entries.len()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SecretEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, raw_token: &str, accessor_name: String) -> &SecretEntry {
        let idx = self.entries.len();
        self.entries.push(SecretEntry {
            raw_token: raw_token.to_string(),
            plaintext: strip_delimiters(raw_token).to_string(),
            accessor_name,
        });
        self.index.insert(raw_token.to_string(), idx);
        &self.entries[idx]
    }
}

/// Content between the first and last character. Tokens shorter than two
/// characters have no content.
pub fn strip_delimiters(raw_token: &str) -> &str {
    let mut chars = raw_token.char_indices();
    let start = match chars.next() {
        Some((_, c)) => c.len_utf8(),
        None => return "",
    };
    match chars.next_back() {
        Some((end, _)) => &raw_token[start..end],
        None => "",
    }
}
