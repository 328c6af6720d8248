use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::encoding::REGISTER;

static ACCESSOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"func\s+(?P<name>[^\s(]+)\(\)\s*string\s*\{[^\[\}]*\[\]byte\{(?P<body>[^}]*)\}").unwrap()
});

static BYTE_EXPR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\((?P<left>[^()]*)\)\^\((?P<right>[^()]*)\)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedAccessor {
    pub name: String,
    pub plaintext: String,
}

/// Every well-formed accessor in `source`, in order of appearance.
pub fn decode_accessors(source: &str) -> Vec<DecodedAccessor> {
    ACCESSOR
        .captures_iter(source)
        .filter_map(|caps| {
            let bytes = decode_body(&caps["body"])?;
            Some(DecodedAccessor {
                name: caps["name"].to_string(),
                plaintext: String::from_utf8(bytes).ok()?,
            })
        })
        .collect()
}

/// Plaintext of the accessor called `name`, if present.
pub fn reveal(source: &str, name: &str) -> Option<String> {
    decode_accessors(source)
        .into_iter()
        .find(|a| a.name == name)
        .map(|a| a.plaintext)
}

fn decode_body(body: &str) -> Option<Vec<u8>> {
    body.split(',')
        .map(str::trim)
        .filter(|expr| !expr.is_empty())
        .map(decode_expr)
        .collect()
}

/// Evaluates `(side)^(side)` with the register equal to 1.
pub fn decode_expr(expr: &str) -> Option<u8> {
    let caps = BYTE_EXPR.captures(expr)?;
    Some(eval_side(&caps["left"])? ^ eval_side(&caps["right"])?)
}

fn eval_side(side: &str) -> Option<u8> {
    if side == format!("{REGISTER}^{REGISTER}") {
        return Some(0);
    }
    side.split('|').try_fold(0u8, |acc, term| {
        let shift: u32 = term.trim().strip_prefix(REGISTER)?.strip_prefix("<<")?.parse().ok()?;
        (shift < 8).then(|| acc | (1u8 << shift))
    })
}
