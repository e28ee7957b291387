//! Encode-ready and decoded runtime values, plus their JSON rendering.

use num_bigint::BigUint;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A value shaped for the binary codec.
///
/// The outbound path produces the scalar/optional/vector shapes from
/// argument literals; the record and variant shapes only appear on the
/// decode path, when a codec hands back structured reply values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireValue {
    Null,
    Bool(bool),
    Text(String),
    Nat(BigUint),
    Principal(String),
    /// Optional container: empty or holding exactly one value
    Opt(Option<Box<WireValue>>),
    Vector(Vec<WireValue>),
    /// Byte buffer, kept separate from `Vector` so codecs can encode it
    /// as a contiguous blob
    Blob(Vec<u8>),
    Record(BTreeMap<String, WireValue>),
    Variant {
        tag: String,
        payload: Box<WireValue>,
    },
}

/// Render a value for textual/JSON-style display.
///
/// `Nat` renders as a decimal string so arbitrary precision survives
/// JSON's number range. The empty optional renders as `null`, a present
/// optional as a one-element array.
pub fn to_json(value: &WireValue) -> Value {
    match value {
        WireValue::Null => Value::Null,
        WireValue::Bool(b) => Value::Bool(*b),
        WireValue::Text(s) => Value::String(s.clone()),
        WireValue::Nat(n) => Value::String(n.to_string()),
        WireValue::Principal(id) => Value::String(id.clone()),
        WireValue::Opt(None) => Value::Null,
        WireValue::Opt(Some(inner)) => Value::Array(vec![to_json(inner)]),
        WireValue::Vector(items) => Value::Array(items.iter().map(to_json).collect()),
        WireValue::Blob(bytes) => {
            Value::Array(bytes.iter().map(|b| Value::from(*b)).collect())
        }
        WireValue::Record(fields) => {
            let mut map = Map::new();
            for (name, field) in fields {
                map.insert(name.clone(), to_json(field));
            }
            Value::Object(map)
        }
        WireValue::Variant { tag, payload } => {
            let mut map = Map::new();
            map.insert(tag.clone(), to_json(payload));
            Value::Object(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nat_renders_as_decimal_string() {
        let huge = BigUint::parse_bytes(b"99999999999999999999999999", 10).unwrap();
        assert_eq!(to_json(&WireValue::Nat(huge)), json!("99999999999999999999999999"));
    }

    #[test]
    fn optionals_render_as_null_or_singleton_array() {
        assert_eq!(to_json(&WireValue::Opt(None)), json!(null));
        assert_eq!(
            to_json(&WireValue::Opt(Some(Box::new(WireValue::Bool(true))))),
            json!([true])
        );
    }

    #[test]
    fn blob_renders_byte_values() {
        assert_eq!(to_json(&WireValue::Blob(vec![0, 127, 255])), json!([0, 127, 255]));
    }

    #[test]
    fn variant_renders_as_single_key_object() {
        let v = WireValue::Variant {
            tag: "err".into(),
            payload: Box::new(WireValue::Text("boom".into())),
        };
        assert_eq!(to_json(&v), json!({ "err": "boom" }));
    }
}
