//! Alias substitution: [`TypeNode`] -> [`ResolvedType`].
//!
//! Resolution is total. Cyclic alias chains and undefined names degrade
//! to [`ResolvedType::Reserved`] instead of failing -- the console must
//! stay usable against interfaces it only partially understands. The
//! cycle guard is an explicit in-progress set threaded through the
//! recursion, never call-stack depth.

use crate::ast::{Prim, TypeNode};
use crate::parser::AliasTable;
use std::collections::{BTreeMap, HashSet};

/// The concrete runtime type representation consumed by the binary codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    Nat,
    Nat8,
    Nat16,
    Nat32,
    Nat64,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Bool,
    Text,
    Principal,
    Null,
    /// Opaque placeholder: accepts any value without structural
    /// interpretation. The safe fallback for cyclic or undefined aliases.
    Reserved,
    Opt(Box<ResolvedType>),
    Vector(Box<ResolvedType>),
    /// Field name -> type. Positional fields are keyed "0", "1", ...
    Record(BTreeMap<String, ResolvedType>),
    /// Alternative name -> payload type. Bare alternatives map to `Null`.
    Variant(BTreeMap<String, ResolvedType>),
}

/// Resolve a type syntax node against an alias table.
pub fn resolve_type(node: &TypeNode, aliases: &AliasTable) -> ResolvedType {
    let mut in_progress = HashSet::new();
    resolve(node, aliases, &mut in_progress)
}

fn resolve(
    node: &TypeNode,
    aliases: &AliasTable,
    in_progress: &mut HashSet<String>,
) -> ResolvedType {
    match node {
        TypeNode::Prim(p) => resolve_prim(*p),
        TypeNode::Ref(name) => {
            if in_progress.contains(name) {
                // Resolution of this alias is already underway higher in
                // the call stack: break the cycle here.
                return ResolvedType::Reserved;
            }
            match aliases.get(name) {
                None => ResolvedType::Reserved,
                Some(definition) => {
                    in_progress.insert(name.clone());
                    let resolved = resolve(definition, aliases, in_progress);
                    in_progress.remove(name);
                    resolved
                }
            }
        }
        TypeNode::Opt(inner) => ResolvedType::Opt(Box::new(resolve(inner, aliases, in_progress))),
        TypeNode::Vec(inner) => {
            ResolvedType::Vector(Box::new(resolve(inner, aliases, in_progress)))
        }
        TypeNode::Record(fields) => {
            let mut map = BTreeMap::new();
            for field in fields {
                map.insert(field.name.clone(), resolve(&field.ty, aliases, in_progress));
            }
            ResolvedType::Record(map)
        }
        TypeNode::Variant(alts) => {
            let mut map = BTreeMap::new();
            for alt in alts {
                let ty = match &alt.ty {
                    Some(t) => resolve(t, aliases, in_progress),
                    None => ResolvedType::Null,
                };
                map.insert(alt.name.clone(), ty);
            }
            ResolvedType::Variant(map)
        }
    }
}

fn resolve_prim(p: Prim) -> ResolvedType {
    match p {
        Prim::Nat => ResolvedType::Nat,
        Prim::Nat8 => ResolvedType::Nat8,
        Prim::Nat16 => ResolvedType::Nat16,
        Prim::Nat32 => ResolvedType::Nat32,
        Prim::Nat64 => ResolvedType::Nat64,
        Prim::Int => ResolvedType::Int,
        Prim::Int8 => ResolvedType::Int8,
        Prim::Int16 => ResolvedType::Int16,
        Prim::Int32 => ResolvedType::Int32,
        Prim::Int64 => ResolvedType::Int64,
        Prim::Bool => ResolvedType::Bool,
        Prim::Text => ResolvedType::Text,
        Prim::Principal => ResolvedType::Principal,
        Prim::Null => ResolvedType::Null,
        Prim::Blob => ResolvedType::Vector(Box::new(ResolvedType::Nat8)),
        Prim::Reserved => ResolvedType::Reserved,
    }
}
