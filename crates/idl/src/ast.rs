//! Syntax-tree types shared by the parser and resolver.
//!
//! These are the pre-resolution shapes: alias references are still
//! symbolic (`TypeNode::Ref`) and integers in field positions are still
//! strings. The `Display` impls reconstruct the grammar's surface syntax
//! and are the source of every canonical signature string -- re-parsing a
//! canonical string yields an identical structure.

use serde::Serialize;
use std::fmt;

/// The fixed primitive keyword set of the interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prim {
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
    Blob,
    Reserved,
}

impl Prim {
    pub fn from_keyword(word: &str) -> Option<Prim> {
        Some(match word {
            "nat" => Prim::Nat,
            "nat8" => Prim::Nat8,
            "nat16" => Prim::Nat16,
            "nat32" => Prim::Nat32,
            "nat64" => Prim::Nat64,
            "int" => Prim::Int,
            "int8" => Prim::Int8,
            "int16" => Prim::Int16,
            "int32" => Prim::Int32,
            "int64" => Prim::Int64,
            "bool" => Prim::Bool,
            "text" => Prim::Text,
            "principal" => Prim::Principal,
            "null" => Prim::Null,
            "blob" => Prim::Blob,
            "reserved" => Prim::Reserved,
            _ => return None,
        })
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Prim::Nat => "nat",
            Prim::Nat8 => "nat8",
            Prim::Nat16 => "nat16",
            Prim::Nat32 => "nat32",
            Prim::Nat64 => "nat64",
            Prim::Int => "int",
            Prim::Int8 => "int8",
            Prim::Int16 => "int16",
            Prim::Int32 => "int32",
            Prim::Int64 => "int64",
            Prim::Bool => "bool",
            Prim::Text => "text",
            Prim::Principal => "principal",
            Prim::Null => "null",
            Prim::Blob => "blob",
            Prim::Reserved => "reserved",
        }
    }
}

/// A parsed type expression, before alias resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    Prim(Prim),
    /// Unresolved alias or forward reference -- resolved by table lookup later
    Ref(String),
    Opt(Box<TypeNode>),
    Vec(Box<TypeNode>),
    Record(Vec<RecordField>),
    Variant(Vec<VariantAlt>),
}

/// One record field. Positional (tuple-style) fields carry their
/// stringified declaration index as `name` and `named: false`; a record
/// may mix named and positional fields, each keeping its own form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordField {
    pub name: String,
    pub named: bool,
    pub ty: TypeNode,
}

/// One variant alternative. `ty: None` means a null payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantAlt {
    pub name: String,
    pub ty: Option<TypeNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Query,
    Update,
}

/// A method signature as parsed: types are still syntax trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMethod {
    pub name: String,
    pub kind: MethodKind,
    pub args: Vec<TypeNode>,
    pub rets: Vec<TypeNode>,
}

impl RawMethod {
    /// Canonical signature text, reconstructed from the parsed pieces:
    /// `name : (T1, T2) -> (R1) query;`
    pub fn canonical(&self) -> String {
        let args: Vec<String> = self.args.iter().map(TypeNode::to_string).collect();
        let rets: Vec<String> = self.rets.iter().map(TypeNode::to_string).collect();
        let suffix = match self.kind {
            MethodKind::Query => " query",
            MethodKind::Update => "",
        };
        format!(
            "{} : ({}) -> ({}){};",
            self.name,
            args.join(", "),
            rets.join(", "),
            suffix
        )
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Prim(p) => f.write_str(p.keyword()),
            TypeNode::Ref(name) => f.write_str(name),
            TypeNode::Opt(inner) => write!(f, "opt {}", inner),
            TypeNode::Vec(inner) => write!(f, "vec {}", inner),
            TypeNode::Record(fields) => {
                f.write_str("record {")?;
                for field in fields {
                    if field.named {
                        write!(f, " {} : {};", field.name, field.ty)?;
                    } else {
                        write!(f, " {};", field.ty)?;
                    }
                }
                f.write_str(" }")
            }
            TypeNode::Variant(alts) => {
                f.write_str("variant {")?;
                for alt in alts {
                    match &alt.ty {
                        Some(ty) => write!(f, " {} : {};", alt.name, ty)?,
                        None => write!(f, " {};", alt.name)?,
                    }
                }
                f.write_str(" }")
            }
        }
    }
}
