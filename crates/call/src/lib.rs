//! herald-call: argument-literal parsing and call value mapping.
//!
//! The call-time half of the console core: parses the small literal
//! language an operator types for arguments, validates it against a
//! resolved [`MethodSignature`], shapes encode-ready values for the
//! binary codec, and presents reply bytes as decoded output (or a raw
//! hex/base64 dump when the return types are unknown).
//!
//! - [`parse_args()`] -- argument text -> [`ArgLiteral`] list
//! - [`build_call_values()`] / [`encode_call()`] -- outbound mapping
//! - [`decode_reply()`] -- inbound presentation, [`ReplyView`] tagged
//! - [`WireCodec`] -- the seam to the external binary codec
//! - [`CallError`] -- failures, distinguishable by kind
//!
//! Like herald-idl, everything is a synchronous pure function of its
//! inputs; transport, polling, and retries belong to collaborators.

pub mod call;
pub mod codec;
pub mod error;
pub mod literal;
pub mod value;

pub use call::{
    build_call_values, decode_reply, encode_call, raw_dump, to_wire_values, RawDump, Rejection,
    ReplyView,
};
pub use codec::WireCodec;
pub use error::CallError;
pub use literal::{parse_args, ArgLiteral};
pub use value::{to_json, WireValue};
