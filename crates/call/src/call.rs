//! Outbound argument mapping and inbound reply presentation.

use crate::codec::WireCodec;
use crate::error::CallError;
use crate::literal::ArgLiteral;
use crate::value::{to_json, WireValue};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use herald_idl::{MethodSignature, ResolvedType};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Diagnostic presentation of reply bytes that were not decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawDump {
    pub len: usize,
    pub hex: String,
    pub base64: String,
}

/// A presented reply: decoded against the return types, or the raw
/// fallback when no return types are available. Tagged so callers can
/// render the two cases differently.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ReplyView {
    Decoded(Value),
    Raw(RawDump),
}

/// A transport-level rejection (reject code + message), carried through
/// without interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub code: u32,
    pub message: String,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "call rejected (code {}): {}", self.code, self.message)
    }
}

/// Validate the literal count against the signature and convert each
/// literal into its encode-ready value. On a count mismatch nothing else
/// is attempted.
pub fn build_call_values(
    sig: &MethodSignature,
    literals: &[ArgLiteral],
) -> Result<Vec<WireValue>, CallError> {
    if literals.len() != sig.args.len() {
        return Err(CallError::ArgCountMismatch {
            expected: sig.args.len(),
            actual: literals.len(),
        });
    }
    Ok(to_wire_values(literals))
}

/// Convert literals without validating against a signature.
pub fn to_wire_values(literals: &[ArgLiteral]) -> Vec<WireValue> {
    literals.iter().map(wire_value).collect()
}

fn wire_value(literal: &ArgLiteral) -> WireValue {
    match literal {
        ArgLiteral::Null => WireValue::Null,
        ArgLiteral::Bool(b) => WireValue::Bool(*b),
        ArgLiteral::Text(s) => WireValue::Text(s.clone()),
        ArgLiteral::Nat(n) => WireValue::Nat(n.clone()),
        ArgLiteral::Principal(id) => WireValue::Principal(id.clone()),
        ArgLiteral::OptPrincipal(Some(id)) => {
            WireValue::Opt(Some(Box::new(WireValue::Principal(id.clone()))))
        }
        ArgLiteral::OptPrincipal(None) => WireValue::Opt(None),
        ArgLiteral::VecNat(items) => {
            WireValue::Vector(items.iter().cloned().map(WireValue::Nat).collect())
        }
        ArgLiteral::VecNat8(bytes) => WireValue::Blob(bytes.clone()),
        ArgLiteral::VecPrincipal(ids) => {
            WireValue::Vector(ids.iter().cloned().map(WireValue::Principal).collect())
        }
    }
}

/// Convert literals and drive the codec to produce the bytes to send.
pub fn encode_call(
    codec: &dyn WireCodec,
    sig: &MethodSignature,
    literals: &[ArgLiteral],
) -> Result<Vec<u8>, CallError> {
    let values = build_call_values(sig, literals)?;
    codec.encode(&sig.args, &values).map_err(CallError::Encode)
}

/// Present reply bytes.
///
/// With a non-empty return-type list the bytes are decoded: exactly one
/// value presents unwrapped, several present as the ordered tuple. With
/// an empty list this never fails -- the bytes come back as a raw dump.
pub fn decode_reply(
    codec: &dyn WireCodec,
    rets: &[ResolvedType],
    bytes: &[u8],
) -> Result<ReplyView, CallError> {
    if rets.is_empty() {
        return Ok(ReplyView::Raw(raw_dump(bytes)));
    }
    let values = codec.decode(rets, bytes).map_err(CallError::Decode)?;
    let rendered = if values.len() == 1 {
        to_json(&values[0])
    } else {
        Value::Array(values.iter().map(to_json).collect())
    };
    Ok(ReplyView::Decoded(rendered))
}

/// Byte length plus hex and base64 renditions of the same bytes.
pub fn raw_dump(bytes: &[u8]) -> RawDump {
    let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    RawDump {
        len: bytes.len(),
        hex,
        base64: BASE64.encode(bytes),
    }
}
