//! Thin orchestrator: interface text -> sorted, resolved method signatures.

use crate::ast::MethodKind;
use crate::error::IdlError;
use crate::resolve::{resolve_type, ResolvedType};
use crate::{lexer, parser};
use serde::Serialize;

/// A method signature with concrete types, ready for the call mapper.
///
/// This is the only artifact the caller sees: type syntax trees and the
/// alias table stay internal to the parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSignature {
    pub name: String,
    pub kind: MethodKind,
    #[serde(skip)]
    pub args: Vec<ResolvedType>,
    #[serde(skip)]
    pub rets: Vec<ResolvedType>,
    /// Canonical signature text, suitable for direct display
    pub canonical: String,
}

/// Lex, parse, and resolve interface text into its method signatures,
/// sorted lexicographically by name regardless of declaration order.
pub fn load_interface(src: &str) -> Result<Vec<MethodSignature>, IdlError> {
    let tokens = lexer::lex(src)?;
    let interface = parser::parse(&tokens)?;

    let mut signatures: Vec<MethodSignature> = interface
        .methods
        .iter()
        .map(|m| MethodSignature {
            name: m.name.clone(),
            kind: m.kind,
            args: m
                .args
                .iter()
                .map(|t| resolve_type(t, &interface.aliases))
                .collect(),
            rets: m
                .rets
                .iter()
                .map(|t| resolve_type(t, &interface.aliases))
                .collect(),
            canonical: m.canonical(),
        })
        .collect();
    signatures.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(signatures)
}
