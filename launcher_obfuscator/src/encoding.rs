//! Reversible per-byte bit-shift encoding.
//!
//! A byte `b` is split with a random mask `k` into `(b ^ k) ^ k`; each half is
//! written as an OR of `EAX<<s` terms, where `EAX` evaluates to 1 at runtime.
//! The generated program therefore never holds the plaintext contiguously.

use rand::seq::SliceRandom;
use rand::Rng;

/// Runtime register every encoded byte is expressed in. Always 1.
pub const REGISTER: &str = "EAX";

/// Statement binding [`REGISTER`] inside an accessor; `obUnsafe` is the
/// launcher's alias for the unsafe package and is renamed with the rest.
pub const REGISTER_INIT: &str = "EAX := uint8(obUnsafe.Sizeof(true))";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedByte {
    left: Vec<u8>,
    right: Vec<u8>,
}

impl EncodedByte {
    pub fn encode<R: Rng + ?Sized>(byte: u8, rng: &mut R) -> Self {
        let mask: u8 = rng.random();
        let mut left = set_bits(byte ^ mask);
        let mut right = set_bits(mask);
        left.shuffle(rng);
        right.shuffle(rng);
        Self { left, right }
    }

    /// Evaluates the expression with the register holding `eax`.
    pub fn value(&self, eax: u8) -> u8 {
        or_terms(&self.left, eax) ^ or_terms(&self.right, eax)
    }

    pub fn decode(&self) -> u8 {
        self.value(1)
    }

    /// Launcher-language expression, e.g. `(EAX<<6|EAX<<0)^(EAX^EAX)`.
    pub fn render(&self) -> String {
        format!("({})^({})", render_terms(&self.left), render_terms(&self.right))
    }
}

pub fn encode_bytes<R: Rng + ?Sized>(plaintext: &[u8], rng: &mut R) -> Vec<EncodedByte> {
    plaintext
        .iter()
        .map(|&b| EncodedByte::encode(b, rng))
        .collect()
}

pub fn decode_bytes(encoded: &[EncodedByte]) -> Vec<u8> {
    encoded.iter().map(EncodedByte::decode).collect()
}

/// Accessor function returning `plaintext` rebuilt byte by byte.
pub fn accessor_function<R: Rng + ?Sized>(name: &str, plaintext: &str, rng: &mut R) -> String {
    let lines: Vec<String> = encode_bytes(plaintext.as_bytes(), rng)
        .iter()
        .map(EncodedByte::render)
        .collect();

    format!(
        "func {}() string {{ {};return string(\n[]byte{{\n{},\n}},\n)}}",
        name,
        REGISTER_INIT,
        lines.join(",\n")
    )
}

fn set_bits(value: u8) -> Vec<u8> {
    (0..8u8).filter(|s| value & (1 << s) != 0).collect()
}

fn or_terms(shifts: &[u8], eax: u8) -> u8 {
    shifts
        .iter()
        .fold(0u8, |acc, &s| acc | eax.wrapping_shl(u32::from(s)))
}

fn render_terms(shifts: &[u8]) -> String {
    if shifts.is_empty() {
        return format!("{REGISTER}^{REGISTER}");
    }
    shifts
        .iter()
        .map(|s| format!("{REGISTER}<<{s}"))
        .collect::<Vec<_>>()
        .join("|")
}
