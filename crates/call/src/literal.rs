//! The argument-literal language: a parenthesized, comma-separated list
//! of hand-typed values.
//!
//! Each element is matched against a fixed, order-significant set of
//! literal grammars. The order is a contract, not an implementation
//! detail: later rules are syntactic supersets of earlier ones (the
//! nat8-suffixed vector must be tried before the generic nat vector,
//! `opt principal` before any generic opt handling would see it).

use crate::error::CallError;
use num_bigint::BigUint;

/// Element suffixes accepted on generic nat vectors and bare integers.
const NAT_SUFFIXES: &[&str] = &["nat", "nat64", "nat32", "nat16"];

/// One user-typed argument, recognized by the closed literal grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgLiteral {
    Null,
    Bool(bool),
    Text(String),
    /// Arbitrary-precision non-negative integer
    Nat(BigUint),
    Principal(String),
    /// `opt principal "x"`, or `opt null` for the empty optional
    OptPrincipal(Option<String>),
    VecNat(Vec<BigUint>),
    VecNat8(Vec<u8>),
    VecPrincipal(Vec<String>),
}

impl ArgLiteral {
    /// Short kind tag for display and test assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            ArgLiteral::Null => "null",
            ArgLiteral::Bool(_) => "bool",
            ArgLiteral::Text(_) => "text",
            ArgLiteral::Nat(_) => "nat",
            ArgLiteral::Principal(_) => "principal",
            ArgLiteral::OptPrincipal(_) => "opt_principal",
            ArgLiteral::VecNat(_) => "vec_nat",
            ArgLiteral::VecNat8(_) => "vec_nat8",
            ArgLiteral::VecPrincipal(_) => "vec_principal",
        }
    }
}

/// Parse a full argument string: `()` or `(e1, e2, ...)`.
pub fn parse_args(text: &str) -> Result<Vec<ArgLiteral>, CallError> {
    let inner = strip_outer_parens(text)?;
    split_top_level(inner)
        .iter()
        .map(|element| parse_element(element))
        .collect()
}

fn strip_outer_parens(text: &str) -> Result<&str, CallError> {
    let trimmed = text.trim();
    trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| CallError::UnsupportedLiteral {
            text: text.to_owned(),
        })
}

/// Split on top-level commas. A comma inside a brace-delimited group or
/// inside a quoted string is not a separator; quote state toggles on an
/// unescaped '"'.
fn split_top_level(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut in_quote = false;
    let mut escaped = false;

    for c in s.chars() {
        if in_quote {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_quote = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_quote = true;
                current.push(c);
            }
            '{' => {
                depth += 1;
                current.push(c);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                parts.push(current.trim().to_owned());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    let last = current.trim();
    if !last.is_empty() {
        parts.push(last.to_owned());
    }
    parts
}

/// Match one element against the literal grammars, in priority order.
fn parse_element(text: &str) -> Result<ArgLiteral, CallError> {
    if text == "null" {
        return Ok(ArgLiteral::Null);
    }
    if text == "true" {
        return Ok(ArgLiteral::Bool(true));
    }
    if text == "false" {
        return Ok(ArgLiteral::Bool(false));
    }
    if let Some(s) = match_quoted(text) {
        return Ok(ArgLiteral::Text(s));
    }
    if let Some(id) = match_principal(text) {
        return Ok(ArgLiteral::Principal(id));
    }
    if let Some(lit) = match_opt_principal(text) {
        return Ok(lit);
    }
    if let Some(result) = match_vec_nat8(text) {
        return result;
    }
    if let Some(result) = match_vec_principal(text) {
        return result;
    }
    if let Some(result) = match_vec_nat(text) {
        return result;
    }
    if let Some(n) = match_nat(text) {
        return Ok(ArgLiteral::Nat(n));
    }
    Err(CallError::UnsupportedLiteral {
        text: text.to_owned(),
    })
}

/// A fully double-quoted string spanning the whole element; the closing
/// quote must end the text. Backslash escapes whichever character follows.
fn match_quoted(text: &str) -> Option<String> {
    let rest = text.strip_prefix('"')?;
    let mut out = String::new();
    let mut chars = rest.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push(chars.next()?),
            '"' => {
                return if chars.next().is_none() { Some(out) } else { None };
            }
            other => out.push(other),
        }
    }
    None
}

/// `principal "ID"`
fn match_principal(text: &str) -> Option<String> {
    let rest = text.strip_prefix("principal")?.trim_start();
    match_quoted(rest)
}

/// `opt principal "ID"` or the bare `opt null`.
fn match_opt_principal(text: &str) -> Option<ArgLiteral> {
    let rest = text.strip_prefix("opt")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    if rest == "null" {
        return Some(ArgLiteral::OptPrincipal(None));
    }
    match_principal(rest).map(|id| ArgLiteral::OptPrincipal(Some(id)))
}

/// `vec { e1; e2; ... } : nat8` -- every element a bare decimal in
/// [0, 255], optionally carrying its own `: nat8` suffix.
fn match_vec_nat8(text: &str) -> Option<Result<ArgLiteral, CallError>> {
    let (body, suffix) = match_vec_parts(text)?;
    if suffix != Some("nat8") {
        return None;
    }
    let mut bytes = Vec::new();
    for element in split_semis(body) {
        let Some(n) = element_nat(&element, &["nat8"]) else {
            return Some(Err(CallError::UnsupportedLiteral { text: element }));
        };
        let Ok(byte) = u8::try_from(&n) else {
            // Out of byte range.
            return Some(Err(CallError::UnsupportedLiteral { text: element }));
        };
        bytes.push(byte);
    }
    Some(Ok(ArgLiteral::VecNat8(bytes)))
}

/// `vec { principal "a"; principal "b"; ... }` -- detected by the
/// presence of `principal "` anywhere in the body.
fn match_vec_principal(text: &str) -> Option<Result<ArgLiteral, CallError>> {
    let (body, suffix) = match_vec_parts(text)?;
    if suffix.is_some() || !body.contains("principal \"") {
        return None;
    }
    let mut ids = Vec::new();
    for element in split_semis(body) {
        match match_principal(&element) {
            Some(id) => ids.push(id),
            None => return Some(Err(CallError::UnsupportedLiteral { text: element })),
        }
    }
    Some(Ok(ArgLiteral::VecPrincipal(ids)))
}

/// `vec { n1; n2; ... }` with an optional `nat|nat64|nat32|nat16`
/// suffix; element suffixes must match the vector's.
fn match_vec_nat(text: &str) -> Option<Result<ArgLiteral, CallError>> {
    let (body, suffix) = match_vec_parts(text)?;
    let allowed: Vec<&str> = match suffix {
        None => NAT_SUFFIXES.to_vec(),
        Some(s) if NAT_SUFFIXES.contains(&s) => vec![s],
        Some(_) => return None,
    };
    let mut items = Vec::new();
    for element in split_semis(body) {
        match element_nat(&element, &allowed) {
            Some(n) => items.push(n),
            None => return Some(Err(CallError::UnsupportedLiteral { text: element })),
        }
    }
    Some(Ok(ArgLiteral::VecNat(items)))
}

/// Bare decimal integer with an optional size suffix.
fn match_nat(text: &str) -> Option<BigUint> {
    element_nat(text, &["nat", "nat64", "nat32", "nat16", "nat8"])
}

/// `vec { body } [: suffix]` -- returns the brace body and the optional
/// trailing suffix keyword.
fn match_vec_parts(text: &str) -> Option<(&str, Option<&str>)> {
    let rest = text.strip_prefix("vec")?.trim_start();
    let rest = rest.strip_prefix('{')?;
    let close = rest.rfind('}')?;
    let body = &rest[..close];
    let after = rest[close + 1..].trim();
    if after.is_empty() {
        return Some((body, None));
    }
    let suffix = after.strip_prefix(':')?.trim();
    Some((body, Some(suffix)))
}

/// Semicolon-separated vector elements, trimmed, empties dropped.
fn split_semis(body: &str) -> Vec<String> {
    body.split(';')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_owned)
        .collect()
}

/// A bare decimal digit run, optionally followed by `: suffix` where the
/// suffix is one of `allowed`.
fn element_nat(element: &str, allowed: &[&str]) -> Option<BigUint> {
    let (digits, suffix) = match element.split_once(':') {
        Some((d, s)) => (d.trim(), Some(s.trim())),
        None => (element.trim(), None),
    };
    if let Some(s) = suffix {
        if !allowed.contains(&s) {
            return None;
        }
    }
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::parse_bytes(digits.as_bytes(), 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nat(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn empty_parens_yield_no_literals() {
        assert_eq!(parse_args("()").unwrap(), vec![]);
    }

    #[test]
    fn bare_integers() {
        assert_eq!(
            parse_args("(0, 50)").unwrap(),
            vec![ArgLiteral::Nat(nat(0)), ArgLiteral::Nat(nat(50))]
        );
    }

    #[test]
    fn integer_with_size_suffix() {
        assert_eq!(
            parse_args("(7 : nat64)").unwrap(),
            vec![ArgLiteral::Nat(nat(7))]
        );
    }

    #[test]
    fn integer_larger_than_u64() {
        let huge = "340282366920938463463374607431768211455";
        let parsed = parse_args(&format!("({})", huge)).unwrap();
        assert_eq!(
            parsed,
            vec![ArgLiteral::Nat(
                BigUint::parse_bytes(huge.as_bytes(), 10).unwrap()
            )]
        );
    }

    #[test]
    fn null_true_false() {
        assert_eq!(
            parse_args("(null, true, false)").unwrap(),
            vec![
                ArgLiteral::Null,
                ArgLiteral::Bool(true),
                ArgLiteral::Bool(false)
            ]
        );
    }

    #[test]
    fn quoted_text_with_comma_inside() {
        assert_eq!(
            parse_args(r#"("hello, world")"#).unwrap(),
            vec![ArgLiteral::Text("hello, world".into())]
        );
    }

    #[test]
    fn quoted_text_with_escaped_quote() {
        assert_eq!(
            parse_args(r#"("say \"hi\"")"#).unwrap(),
            vec![ArgLiteral::Text(r#"say "hi""#.into())]
        );
    }

    #[test]
    fn principal_and_integer() {
        assert_eq!(
            parse_args(r#"(principal "aaaaa-aa", 10)"#).unwrap(),
            vec![
                ArgLiteral::Principal("aaaaa-aa".into()),
                ArgLiteral::Nat(nat(10))
            ]
        );
    }

    #[test]
    fn opt_principal_some() {
        assert_eq!(
            parse_args(r#"(opt principal "aaaaa-aa")"#).unwrap(),
            vec![ArgLiteral::OptPrincipal(Some("aaaaa-aa".into()))]
        );
    }

    #[test]
    fn opt_null_is_the_empty_optional() {
        assert_eq!(
            parse_args("(opt null)").unwrap(),
            vec![ArgLiteral::OptPrincipal(None)]
        );
    }

    #[test]
    fn nat8_vector() {
        assert_eq!(
            parse_args("(vec { 1; 2; 255 } : nat8)").unwrap(),
            vec![ArgLiteral::VecNat8(vec![1, 2, 255])]
        );
    }

    #[test]
    fn nat8_vector_element_suffixes_accepted() {
        assert_eq!(
            parse_args("(vec { 1 : nat8; 2 : nat8 } : nat8)").unwrap(),
            vec![ArgLiteral::VecNat8(vec![1, 2])]
        );
    }

    #[test]
    fn nat8_vector_out_of_range_fails() {
        let err = parse_args("(vec { 1; 2; 256 } : nat8)").unwrap_err();
        assert_eq!(
            err,
            CallError::UnsupportedLiteral { text: "256".into() }
        );
    }

    #[test]
    fn principal_vector() {
        assert_eq!(
            parse_args(r#"(vec { principal "aaaaa-aa"; principal "aaaaa-aa" })"#).unwrap(),
            vec![ArgLiteral::VecPrincipal(vec![
                "aaaaa-aa".into(),
                "aaaaa-aa".into()
            ])]
        );
    }

    #[test]
    fn generic_nat_vector() {
        assert_eq!(
            parse_args("(vec { 1; 2; 3 })").unwrap(),
            vec![ArgLiteral::VecNat(vec![nat(1), nat(2), nat(3)])]
        );
    }

    #[test]
    fn suffixed_nat_vector_requires_matching_element_suffixes() {
        assert_eq!(
            parse_args("(vec { 1 : nat64; 2 : nat64 } : nat64)").unwrap(),
            vec![ArgLiteral::VecNat(vec![nat(1), nat(2)])]
        );
        let err = parse_args("(vec { 1 : nat32; 2 } : nat64)").unwrap_err();
        assert_eq!(
            err,
            CallError::UnsupportedLiteral {
                text: "1 : nat32".into()
            }
        );
    }

    #[test]
    fn vector_empty_entries_are_dropped() {
        assert_eq!(
            parse_args("(vec { 1; ; 2; })").unwrap(),
            vec![ArgLiteral::VecNat(vec![nat(1), nat(2)])]
        );
    }

    #[test]
    fn semicolons_inside_vec_do_not_split_top_level() {
        assert_eq!(
            parse_args("(vec { 1; 2 }, 3)").unwrap(),
            vec![
                ArgLiteral::VecNat(vec![nat(1), nat(2)]),
                ArgLiteral::Nat(nat(3))
            ]
        );
    }

    #[test]
    fn unmatched_element_names_the_offending_text() {
        let err = parse_args("(wibble)").unwrap_err();
        assert_eq!(
            err,
            CallError::UnsupportedLiteral {
                text: "wibble".into()
            }
        );
    }

    #[test]
    fn missing_outer_parens_is_unsupported() {
        let err = parse_args("42").unwrap_err();
        assert!(matches!(err, CallError::UnsupportedLiteral { .. }));
    }

    #[test]
    fn negative_integer_is_unsupported() {
        let err = parse_args("(-5)").unwrap_err();
        assert_eq!(err, CallError::UnsupportedLiteral { text: "-5".into() });
    }
}
