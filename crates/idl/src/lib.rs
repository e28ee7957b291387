//! herald-idl: interface-description parsing and type resolution.
//!
//! Turns the textual, statically typed contract a remote service
//! publishes (type aliases + one service block of method signatures)
//! into resolved, display-ready method signatures:
//!
//! - [`load_interface()`] -- lex + parse + resolve in one call
//! - [`MethodSignature`] -- the resolved signature handed to callers
//! - [`ResolvedType`] -- the concrete runtime type the binary codec consumes
//! - [`IdlError`] -- lex/parse failure, distinguishable by kind
//!
//! Everything here is a synchronous pure function of its input: each call
//! allocates its own token stream, alias table, and cycle-guard set, so
//! independent invocations need no coordination.

pub mod ast;
pub mod error;
pub mod interface;
pub mod lexer;
pub mod parser;
pub mod resolve;

pub use ast::{MethodKind, Prim, RawMethod, RecordField, TypeNode, VariantAlt};
pub use error::IdlError;
pub use interface::{load_interface, MethodSignature};
pub use parser::{AliasTable, Interface};
pub use resolve::{resolve_type, ResolvedType};
