use crate::{
    MAX_TUPLE_BYTES,
    codec::{CborCodec, CodecError, TupleCodec},
    key_def::KeyPart,
    serialize::SerializeError,
    value::Value,
};
use std::cmp::Ordering;

fn part(field_index: u32, ty: &str) -> KeyPart {
    KeyPart::new(field_index, ty)
}

fn with_path(field_index: u32, ty: &str, path: &str) -> KeyPart {
    KeyPart {
        path: Some(path.to_string()),
        ..part(field_index, ty)
    }
}

fn nullable(field_index: u32, ty: &str) -> KeyPart {
    KeyPart {
        nullable: true,
        ..part(field_index, ty)
    }
}

// ---- construction ------------------------------------------------------

#[test]
fn unknown_type_is_rejected() {
    let err = CborCodec::new()
        .key_def_new(&[part(0, "decimal128")])
        .expect_err("unknown type");

    assert_eq!(
        err,
        CodecError::UnknownFieldType {
            tag: "decimal128".to_string()
        }
    );
}

#[test]
fn collation_must_exist_and_apply() {
    let codec = CborCodec::new();

    let unknown = KeyPart {
        collation: Some("klingon".to_string()),
        ..part(0, "string")
    };
    assert!(matches!(
        codec.key_def_new(&[unknown]),
        Err(CodecError::UnknownCollation { .. })
    ));

    let misplaced = KeyPart {
        collation: Some("unicode".to_string()),
        ..part(0, "unsigned")
    };
    assert!(matches!(
        codec.key_def_new(&[misplaced]),
        Err(CodecError::CollationNotApplicable { .. })
    ));
}

#[test]
fn path_grammar_is_enforced() {
    let codec = CborCodec::new();

    assert!(matches!(
        codec.key_def_new(&[with_path(0, "unsigned", "[1")]),
        Err(CodecError::InvalidPath(_))
    ));
    assert!(matches!(
        codec.key_def_new(&[with_path(0, "unsigned", "a[*]")]),
        Err(CodecError::MultikeyPath { .. })
    ));
    assert_eq!(
        codec.key_def_new(&[]).expect_err("empty"),
        CodecError::EmptyKeyDef
    );
}

#[test]
fn dump_uses_canonical_type_labels() {
    let codec = CborCodec::new();
    let def = codec
        .key_def_new(&[with_path(2, "UNSIGNED", "[1]"), part(0, "*")])
        .expect("def");

    let dumped = codec.key_def_dump_parts(&def).expect("dump");

    assert_eq!(dumped[0].declared_type, "unsigned");
    assert_eq!(dumped[0].path.as_deref(), Some("[1]"));
    assert_eq!(dumped[1].declared_type, "any");
}

#[test]
fn legacy_codec_drops_paths() {
    let codec = CborCodec::legacy();
    let def = codec
        .key_def_new(&[with_path(0, "unsigned", "[1]")])
        .expect("def");

    let dumped = codec.key_def_dump_parts(&def).expect("dump");

    assert_eq!(dumped[0].path, None);
}

#[test]
fn part_identity_is_field_and_path() {
    let codec = CborCodec::new();

    assert!(codec.same_part(&part(1, "unsigned"), &part(1, "string")));
    assert!(!codec.same_part(&part(1, "unsigned"), &part(2, "unsigned")));
    assert!(!codec.same_part(&part(1, "map"), &with_path(1, "unsigned", "a")));
}

// ---- validation --------------------------------------------------------

#[test]
fn tuple_validation_reports_missing_and_mistyped_fields() {
    let codec = CborCodec::new();
    let def = codec
        .key_def_new(&[part(0, "unsigned"), part(1, "string")])
        .expect("def");

    let missing = codec
        .validate_tuple(&def, &[Value::Uint(1)])
        .expect_err("missing");
    assert_eq!(
        missing.to_string(),
        "tuple field 2 required by key definition is missing"
    );

    let mistyped = codec
        .validate_tuple(&def, &[Value::Str("x".into()), Value::Str("y".into())])
        .expect_err("mistyped");
    assert_eq!(
        mistyped.to_string(),
        "tuple field 1 type does not match one required by key definition: expected unsigned, got string"
    );
}

#[test]
fn nil_is_admissible_only_for_nullable_parts() {
    let codec = CborCodec::new();
    let strict = codec.key_def_new(&[part(0, "unsigned")]).expect("def");
    let lenient = codec.key_def_new(&[nullable(0, "unsigned")]).expect("def");

    assert!(codec.validate_tuple(&strict, &[Value::Nil]).is_err());
    assert!(codec.validate_tuple(&lenient, &[Value::Nil]).is_ok());
    assert!(codec.validate_tuple(&lenient, &[]).is_ok());
}

#[test]
fn nested_location_appears_in_errors() {
    let codec = CborCodec::new();
    let def = codec
        .key_def_new(&[with_path(1, "string", "[2]")])
        .expect("def");
    let fields = [Value::Nil, Value::Array(vec![Value::Uint(1)])];

    let err = codec.validate_tuple(&def, &fields).expect_err("missing");

    assert_eq!(
        err,
        CodecError::FieldMissing {
            field: "2[2]".to_string()
        }
    );
}

#[test]
fn top_field_index_is_located_without_overflow() {
    let codec = CborCodec::new();
    let def = codec.key_def_new(&[part(u32::MAX, "unsigned")]).expect("def");

    let err = codec
        .validate_tuple(&def, &[Value::Uint(1)])
        .expect_err("missing");

    assert_eq!(
        err,
        CodecError::FieldMissing {
            field: "4294967296".to_string()
        }
    );
}

#[test]
fn key_shape_errors() {
    let codec = CborCodec::new();
    let def = codec
        .key_def_new(&[part(0, "unsigned"), part(1, "string")])
        .expect("def");

    let too_long = [Value::Uint(1), Value::Str("a".into()), Value::Uint(3)];
    let err = codec.validate_key(&def, &too_long).expect_err("count");
    assert_eq!(
        err.to_string(),
        "invalid key part count (expected [0..2], got 3)"
    );
    assert!(err.is_key_shape());

    let err = codec
        .validate_key(&def, &[Value::Uint(1), Value::Uint(2)])
        .expect_err("type");
    assert_eq!(
        err,
        CodecError::KeyPartType {
            part: 2,
            expected: "string"
        }
    );

    assert!(codec.validate_key(&def, &[]).is_ok());
}

// ---- ordering ----------------------------------------------------------

#[test]
fn absent_and_nil_sort_first_and_tie() {
    let codec = CborCodec::new();
    let def = codec.key_def_new(&[nullable(0, "integer")]).expect("def");
    let low = Value::Int(-100);

    assert_eq!(
        codec.compare_field(&def, 0, None, Some(&Value::Nil)),
        Ordering::Equal
    );
    assert_eq!(
        codec.compare_field(&def, 0, Some(&Value::Nil), Some(&low)),
        Ordering::Less
    );
    assert_eq!(
        codec.compare_field(&def, 0, Some(&low), None),
        Ordering::Greater
    );
}

#[test]
fn collation_drives_string_order() {
    let codec = CborCodec::new();
    let ci = codec
        .key_def_new(&[KeyPart {
            collation: Some("unicode_ci".to_string()),
            ..part(0, "string")
        }])
        .expect("def");
    let binary = codec.key_def_new(&[part(0, "string")]).expect("def");

    let upper = Value::Str("ABC".into());
    let lower = Value::Str("abc".into());

    assert_eq!(
        codec.compare_field(&ci, 0, Some(&upper), Some(&lower)),
        Ordering::Equal
    );
    assert_eq!(
        codec.compare_field(&binary, 0, Some(&upper), Some(&lower)),
        Ordering::Less
    );
}

#[test]
fn decode_rejects_garbage() {
    let codec = CborCodec::new();

    assert!(matches!(
        codec.decode(&[0xff, 0x00]),
        Err(CodecError::Serialize(_))
    ));
}

#[test]
fn decode_rejects_oversized_tuple() {
    let codec = CborCodec::new();
    let bytes = vec![0x80; MAX_TUPLE_BYTES + 1];

    assert_eq!(
        codec.decode(&bytes).expect_err("too large"),
        CodecError::Serialize(SerializeError::Deserialize(
            "tuple exceeds maximum allowed size".to_string()
        ))
    );
}
