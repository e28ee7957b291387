//! Crate-level tests for the call value mapper, driven through a fake
//! codec that records what it was handed.

use herald_call::{
    build_call_values, decode_reply, encode_call, parse_args, raw_dump, CallError, ReplyView,
    WireCodec, WireValue,
};
use herald_idl::{load_interface, MethodSignature, ResolvedType};
use num_bigint::BigUint;
use serde_json::json;
use std::cell::RefCell;

/// Codec double: echoes canned bytes/values and records its inputs.
struct FakeCodec {
    encoded: Vec<u8>,
    decoded: Vec<WireValue>,
    fail_with: Option<String>,
    seen_values: RefCell<Vec<WireValue>>,
    seen_types: RefCell<Vec<ResolvedType>>,
}

impl FakeCodec {
    fn new() -> Self {
        FakeCodec {
            encoded: vec![0xDE, 0xAD],
            decoded: vec![],
            fail_with: None,
            seen_values: RefCell::new(vec![]),
            seen_types: RefCell::new(vec![]),
        }
    }

    fn decoding(values: Vec<WireValue>) -> Self {
        FakeCodec {
            decoded: values,
            ..FakeCodec::new()
        }
    }

    fn failing(message: &str) -> Self {
        FakeCodec {
            fail_with: Some(message.to_owned()),
            ..FakeCodec::new()
        }
    }
}

impl WireCodec for FakeCodec {
    fn encode(&self, types: &[ResolvedType], values: &[WireValue]) -> Result<Vec<u8>, String> {
        if let Some(msg) = &self.fail_with {
            return Err(msg.clone());
        }
        *self.seen_types.borrow_mut() = types.to_vec();
        *self.seen_values.borrow_mut() = values.to_vec();
        Ok(self.encoded.clone())
    }

    fn decode(&self, types: &[ResolvedType], _bytes: &[u8]) -> Result<Vec<WireValue>, String> {
        if let Some(msg) = &self.fail_with {
            return Err(msg.clone());
        }
        *self.seen_types.borrow_mut() = types.to_vec();
        Ok(self.decoded.clone())
    }
}

fn signature(src: &str, name: &str) -> MethodSignature {
    load_interface(src)
        .unwrap()
        .into_iter()
        .find(|s| s.name == name)
        .expect("method not found")
}

#[test]
fn arg_count_mismatch_fails_before_encoding() {
    let sig = signature("service : { f : (nat, text) -> (); }", "f");
    let literals = parse_args("(1)").unwrap();
    let err = build_call_values(&sig, &literals).unwrap_err();
    assert_eq!(
        err,
        CallError::ArgCountMismatch {
            expected: 2,
            actual: 1
        }
    );

    // Through encode_call the codec must never be reached.
    let codec = FakeCodec::failing("codec should not run");
    let err = encode_call(&codec, &sig, &literals).unwrap_err();
    assert!(matches!(err, CallError::ArgCountMismatch { .. }));
}

#[test]
fn literals_convert_to_encode_ready_values() {
    let sig = signature(
        "service : { f : (principal, opt principal, opt principal, vec nat8, vec principal, nat) -> (); }",
        "f",
    );
    let literals = parse_args(
        r#"(principal "aaaaa-aa", opt principal "bbbbb-bb", opt null, vec { 1; 2 } : nat8, vec { principal "aaaaa-aa" }, 42)"#,
    )
    .unwrap();
    let values = build_call_values(&sig, &literals).unwrap();
    assert_eq!(
        values,
        vec![
            WireValue::Principal("aaaaa-aa".into()),
            WireValue::Opt(Some(Box::new(WireValue::Principal("bbbbb-bb".into())))),
            WireValue::Opt(None),
            WireValue::Blob(vec![1, 2]),
            WireValue::Vector(vec![WireValue::Principal("aaaaa-aa".into())]),
            WireValue::Nat(BigUint::from(42u32)),
        ]
    );
}

#[test]
fn encode_call_hands_types_and_values_to_the_codec() {
    let sig = signature("service : { f : (nat, bool) -> (); }", "f");
    let literals = parse_args("(7, true)").unwrap();
    let codec = FakeCodec::new();
    let bytes = encode_call(&codec, &sig, &literals).unwrap();
    assert_eq!(bytes, vec![0xDE, 0xAD]);
    assert_eq!(
        *codec.seen_types.borrow(),
        vec![ResolvedType::Nat, ResolvedType::Bool]
    );
    assert_eq!(
        *codec.seen_values.borrow(),
        vec![WireValue::Nat(BigUint::from(7u32)), WireValue::Bool(true)]
    );
}

#[test]
fn codec_encode_failure_surfaces_verbatim() {
    let sig = signature("service : { f : (nat) -> (); }", "f");
    let literals = parse_args("(1)").unwrap();
    let codec = FakeCodec::failing("value out of range for nat8");
    let err = encode_call(&codec, &sig, &literals).unwrap_err();
    assert_eq!(err, CallError::Encode("value out of range for nat8".into()));
}

#[test]
fn single_decoded_value_presents_unwrapped() {
    let codec = FakeCodec::decoding(vec![WireValue::Text("pong".into())]);
    let view = decode_reply(&codec, &[ResolvedType::Text], &[1, 2, 3]).unwrap();
    assert_eq!(view, ReplyView::Decoded(json!("pong")));
}

#[test]
fn multiple_decoded_values_present_as_tuple() {
    let codec = FakeCodec::decoding(vec![
        WireValue::Nat(BigUint::from(5u32)),
        WireValue::Bool(false),
    ]);
    let view = decode_reply(
        &codec,
        &[ResolvedType::Nat, ResolvedType::Bool],
        &[1, 2, 3],
    )
    .unwrap();
    assert_eq!(view, ReplyView::Decoded(json!(["5", false])));
}

#[test]
fn codec_decode_failure_surfaces_verbatim() {
    let codec = FakeCodec::failing("truncated buffer");
    let err = decode_reply(&codec, &[ResolvedType::Nat], &[]).unwrap_err();
    assert_eq!(err, CallError::Decode("truncated buffer".into()));
}

#[test]
fn empty_return_types_never_fail() {
    // Even a codec primed to fail is never consulted.
    let codec = FakeCodec::failing("must not run");
    let bytes = [0x44u8, 0x49, 0x44, 0x4C];
    let view = decode_reply(&codec, &[], &bytes).unwrap();
    let ReplyView::Raw(dump) = view else {
        panic!("expected raw fallback");
    };
    assert_eq!(dump.len, bytes.len());
    assert_eq!(dump.hex, "4449444c");
    assert_eq!(dump.base64, "RElETA==");
}

#[test]
fn raw_dump_encodings_are_mutually_consistent() {
    let bytes: Vec<u8> = (0u8..=16).collect();
    let dump = raw_dump(&bytes);
    assert_eq!(dump.len, bytes.len());
    assert_eq!(dump.hex.len(), bytes.len() * 2);
    let hex_bytes: Vec<u8> = dump
        .hex
        .as_bytes()
        .chunks(2)
        .map(|pair| u8::from_str_radix(std::str::from_utf8(pair).unwrap(), 16).unwrap())
        .collect();
    assert_eq!(hex_bytes, bytes);
    use base64::Engine as _;
    let b64_bytes = base64::engine::general_purpose::STANDARD
        .decode(dump.base64.as_bytes())
        .unwrap();
    assert_eq!(b64_bytes, bytes);
}

#[test]
fn reply_view_serializes_tagged() {
    let view = ReplyView::Raw(raw_dump(&[0xFF]));
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["kind"], "raw");
    assert_eq!(json["value"]["hex"], "ff");
}
