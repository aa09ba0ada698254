use chrono::NaiveDate;
use tagpack::{decode, encode, encoded_len, Error, Value, ValueType};

fn roundtrip(value: &Value) -> Value {
    let encoded = encode(value).unwrap();
    decode(&encoded).unwrap()
}

fn tag_of(value: &Value) -> ValueType {
    let encoded = encode(value).unwrap();
    ValueType::from_byte(encoded[0]).unwrap()
}

/// Tests the end-to-end encode/decode of a nested document.
#[test]
fn test_nested_document_roundtrip() {
    let value = Value::map([
        (Value::from("a"), Value::from(1u8)),
        (
            Value::from("b"),
            Value::Array(vec![Value::from(1u8), Value::from(2u8), Value::from(3u8)]),
        ),
    ]);
    assert_eq!(roundtrip(&value), value);
}

#[test]
fn test_mixed_value_roundtrip() {
    let when = NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_opt(12, 30, 15)
        .unwrap();
    let value = Value::Array(vec![
        Value::None,
        Value::Bool(true),
        Value::Bool(false),
        Value::Int64(i64::MIN),
        Value::UInt64(u64::MAX),
        Value::Int32(-70_000),
        Value::Float32(0.25),
        Value::from("héllo wörld"),
        Value::binary(vec![0u8, 1, 2, 255]),
        Value::DateTime(when),
        Value::map([(Value::UInt8(1), Value::Array(vec![]))]),
        Value::Map(vec![]),
    ]);
    assert_eq!(roundtrip(&value), value);
}

#[test]
fn test_integer_width_boundaries() {
    assert_eq!(tag_of(&Value::from(255u32)), ValueType::UInt8);
    assert_eq!(tag_of(&Value::from(256u32)), ValueType::UInt16);
    assert_eq!(tag_of(&Value::from(-128i32)), ValueType::Int8);
    assert_eq!(tag_of(&Value::from(-129i32)), ValueType::Int16);
    assert_eq!(tag_of(&Value::from(4294967295u64)), ValueType::UInt32);
    assert_eq!(tag_of(&Value::from(4294967296u64)), ValueType::UInt64);
    assert_eq!(tag_of(&Value::from(-2147483648i64)), ValueType::Int32);
    assert_eq!(tag_of(&Value::from(-2147483649i64)), ValueType::Int64);

    for n in [255i64, 256, -128, -129, 65535, 65536, -32768, -32769] {
        assert_eq!(roundtrip(&Value::Int64(n)).as_i64(), Some(n));
    }
}

#[test]
fn test_length_prefix_boundaries() {
    assert_eq!(tag_of(&Value::from("a".repeat(255))), ValueType::String8);
    assert_eq!(tag_of(&Value::from("a".repeat(256))), ValueType::String16);
    assert_eq!(tag_of(&Value::binary(vec![7u8; 65536])), ValueType::Binary32);

    let array16 = Value::Array(vec![Value::None; 65535]);
    assert_eq!(tag_of(&array16), ValueType::Array16);
    let array32 = Value::Array(vec![Value::None; 65536]);
    assert_eq!(tag_of(&array32), ValueType::Array32);
    assert_eq!(roundtrip(&array32), array32);
}

#[test]
fn test_wide_strings_and_binaries_roundtrip() {
    let string16 = Value::from("é".repeat(200));
    assert_eq!(tag_of(&string16), ValueType::String16);
    assert_eq!(roundtrip(&string16), string16);

    let string32 = Value::from("s".repeat(65536));
    assert_eq!(tag_of(&string32), ValueType::String32);
    assert_eq!(roundtrip(&string32), string32);

    let binary16 = Value::binary((0..=255u8).collect::<Vec<u8>>());
    assert_eq!(tag_of(&binary16), ValueType::Binary16);
    assert_eq!(roundtrip(&binary16), binary16);

    let binary32 = Value::binary(vec![7u8; 65536]);
    let encoded = encode(&binary32).unwrap();
    assert_eq!(&encoded[..5], &[0x35, 0x00, 0x01, 0x00, 0x00]);
    assert_eq!(decode(&encoded).unwrap(), binary32);
}

#[test]
fn test_wide_maps_roundtrip() {
    let map16 = Value::Map((0..256u32).map(|i| (Value::from(i), Value::None)).collect());
    let encoded = encode(&map16).unwrap();
    assert_eq!(&encoded[..3], &[0x61, 0x01, 0x00]);
    assert_eq!(decode(&encoded).unwrap(), map16);

    let map32 = Value::Map(
        (0..65536u32)
            .map(|i| (Value::from(i), Value::Bool(i % 2 == 0)))
            .collect(),
    );
    let encoded = encode(&map32).unwrap();
    assert_eq!(&encoded[..5], &[0x62, 0x00, 0x01, 0x00, 0x00]);
    let decoded = decode(&encoded).unwrap();
    assert_eq!(decoded, map32);
    assert_eq!(decoded.get(&Value::from(65535u32)), Some(&Value::Bool(false)));
}

#[test]
fn test_truncated_string32_payload() {
    let result = decode(&[0x32, 0x00, 0x00, 0x00, 0x05, b'a']);
    assert_eq!(result, Err(Error::TruncatedInput { needed: 5, remaining: 1 }));

    // Prefix itself cut short.
    let result = decode(&[0x32, 0x00, 0x00]);
    assert!(matches!(result, Err(Error::TruncatedInput { .. })));
}

#[test]
fn test_none_and_bools_are_single_bytes() {
    assert_eq!(encode(&Value::None).unwrap().as_ref(), &[0x01]);
    assert_eq!(encode(&Value::Bool(true)).unwrap().as_ref(), &[0x02]);
    assert_eq!(encode(&Value::Bool(false)).unwrap().as_ref(), &[0x03]);
    assert_eq!(decode(&[0x01]).unwrap(), Value::None);
}

#[test]
fn test_float64_is_narrowed_to_float32() {
    let original = 3.14159265358979_f64;
    let decoded = roundtrip(&Value::Float64(original));
    assert_eq!(decoded, Value::Float32(original as f32));
    assert_ne!(decoded.as_f64(), Some(original));
}

#[test]
fn test_infinity_is_clamped() {
    let decoded = roundtrip(&Value::Float64(f64::INFINITY));
    assert_eq!(decoded, Value::Float32(3.402_823_47e38));
    assert!(decoded.as_f64().unwrap().is_finite());

    let decoded = roundtrip(&Value::Float32(f32::NEG_INFINITY));
    assert_eq!(decoded, Value::Float32(-3.402_823_47e38));
}

#[test]
fn test_map_preserves_insertion_order() {
    let value = Value::map([("c", 3u8), ("a", 1u8), ("b", 2u8)]);
    let decoded = roundtrip(&value);
    let keys: Vec<&str> = decoded
        .as_map()
        .unwrap()
        .iter()
        .map(|(k, _)| k.as_str().unwrap())
        .collect();
    assert_eq!(keys, ["c", "a", "b"]);
}

#[test]
fn test_declared_length_past_end_is_truncated() {
    // String8 claiming 10 bytes with only 3 present.
    let result = decode(&[0x30, 0x0a, b'a', b'b', b'c']);
    assert!(matches!(result, Err(Error::TruncatedInput { .. })));

    // Every strict prefix of a valid encoding is rejected.
    let encoded = encode(&Value::map([("key", vec![Value::from(1000u16)])])).unwrap();
    for end in 0..encoded.len() {
        assert!(
            matches!(decode(&encoded[..end]), Err(Error::TruncatedInput { .. })),
            "prefix of length {} decoded",
            end
        );
    }
}

#[test]
fn test_unknown_tag_is_distinct_from_none() {
    assert_eq!(decode(&[0xff]), Err(Error::UnknownTag(0xff)));
    assert_eq!(decode(&[0x01]), Ok(Value::None));
}

#[test]
fn test_float64_tag_is_decoded() {
    let mut data = vec![0x21];
    data.extend_from_slice(&1.1f64.to_be_bytes());
    assert_eq!(decode(&data).unwrap(), Value::Float64(1.1));
}

#[test]
fn test_datetime_before_epoch() {
    let when = NaiveDate::from_ymd_opt(1960, 6, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    assert_eq!(roundtrip(&Value::DateTime(when)), Value::DateTime(when));
}

#[test]
fn test_datetime_sub_second_is_floored() {
    let when = NaiveDate::from_ymd_opt(1969, 12, 31)
        .unwrap()
        .and_hms_milli_opt(23, 59, 58, 250)
        .unwrap();
    let expected = NaiveDate::from_ymd_opt(1969, 12, 31)
        .unwrap()
        .and_hms_opt(23, 59, 58)
        .unwrap();
    assert_eq!(roundtrip(&Value::DateTime(when)), Value::DateTime(expected));
}

#[test]
fn test_encoded_len_for_large_containers() {
    let value = Value::Array(vec![Value::from("x".repeat(70_000)), Value::Array(vec![Value::None; 300])]);
    assert_eq!(encoded_len(&value).unwrap(), encode(&value).unwrap().len());
}

#[test]
fn test_hex_fixture() {
    let data = hex::decode("60023001611101300162500210ff130100").unwrap();
    let value = decode(&data).unwrap();
    let expected = Value::map([
        (Value::from("a"), Value::from(1u8)),
        (
            Value::from("b"),
            Value::Array(vec![Value::from(-1i8), Value::from(256u16)]),
        ),
    ]);
    assert_eq!(value, expected);
    assert_eq!(hex::encode(encode(&expected).unwrap()), "60023001611101300162500210ff130100");
}
