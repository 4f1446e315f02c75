use crate::{
    error::ErrorClass,
    key_def::PartDescriptor,
    region::Region,
    test_support::{build, region, runtime, tuple},
    value::Value,
};
use std::cmp::Ordering;

#[test]
fn key_fields_come_out_in_part_order() {
    let rt = runtime();
    let def = build(
        &rt,
        &[
            PartDescriptor::new(3, "string"),
            PartDescriptor::new(1, "unsigned"),
        ],
    );
    let mut region = region();
    let t = tuple(
        &rt,
        &[Value::Uint(7), Value::Bool(true), Value::Str("x".into())],
    );

    let key = rt.extract_key(&def, &t, &mut region).expect("extract");

    assert_eq!(
        rt.decode_tuple(&key).expect("decode"),
        vec![Value::Str("x".into()), Value::Uint(7)]
    );
    assert_eq!(region.used(), 0);
}

#[test]
fn nested_and_absent_nullable_fields() {
    let rt = runtime();
    let def = build(
        &rt,
        &[
            PartDescriptor::new(1, "unsigned").with_path("[2]"),
            PartDescriptor::new(2, "string").nullable(),
        ],
    );
    let mut region = region();
    let fields = vec![Value::Array(vec![Value::Uint(1), Value::Uint(2)])];

    let key = rt.extract_key(&def, &fields, &mut region).expect("extract");

    assert_eq!(
        rt.decode_tuple(&key).expect("decode"),
        vec![Value::Uint(2), Value::Nil]
    );
}

#[test]
fn extracted_key_outlives_region() {
    let rt = runtime();
    let def = build(&rt, &[PartDescriptor::new(1, "unsigned")]);

    let key = {
        let mut region = region();
        rt.extract_key(&def, &vec![Value::Uint(11)], &mut region)
            .expect("extract")
    };

    assert_eq!(
        rt.decode_tuple(&key).expect("decode"),
        vec![Value::Uint(11)]
    );
}

#[test]
fn extracted_key_matches_its_tuple() {
    let rt = runtime();
    let def = build(
        &rt,
        &[
            PartDescriptor::new(2, "integer"),
            PartDescriptor::new(1, "string").with_collation("unicode"),
        ],
    );
    let mut region = region();
    let t = tuple(&rt, &[Value::Str("Abc".into()), Value::Int(-3)]);

    let key = rt.extract_key(&def, &t, &mut region).expect("extract");

    assert_eq!(
        rt.compare_with_key(&def, &t, &key, &mut region)
            .expect("compare"),
        Ordering::Equal
    );
}

#[test]
fn invalid_tuple_is_rejected() {
    let rt = runtime();
    let def = build(&rt, &[PartDescriptor::new(2, "unsigned")]);
    let mut region = region();

    let err = rt
        .extract_key(&def, &vec![Value::Uint(1)], &mut region)
        .expect_err("missing key field");

    assert_eq!(err.class, ErrorClass::Codec);
    assert_eq!(
        err.message,
        "tuple field 2 required by key definition is missing"
    );
}

#[test]
fn region_exhaustion_is_a_memory_issue() {
    let rt = runtime();
    let def = build(&rt, &[PartDescriptor::new(1, "string")]);
    let mut region = Region::new(4);
    let t = tuple(&rt, &[Value::Str("far too long for four bytes".into())]);

    let err = rt
        .extract_key(&def, &t, &mut region)
        .expect_err("region too small");

    assert_eq!(err.class, ErrorClass::MemoryIssue);
    assert_eq!(region.used(), 0);
}
