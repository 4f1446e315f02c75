use crate::{
    codec::{CborCodec, CodecError, TupleCodec},
    error::ErrorClass,
    key_def::{KeyPart, PartDescriptor, json_path_is_supported},
    obs::{metrics_report, metrics_reset_all},
    runtime::{KeyDefRuntime, global},
    test_support::{assert_class, build_err, legacy_runtime, runtime},
    value::Value,
};
use std::{cmp::Ordering, io};

///
/// BrokenCodec
/// Codec whose key definitions cannot be built.
///

struct BrokenCodec;

impl TupleCodec for BrokenCodec {
    type KeyDef = ();

    fn key_def_new(&self, _parts: &[KeyPart]) -> Result<(), CodecError> {
        Err(CodecError::EmptyKeyDef)
    }

    fn key_def_dump_parts(&self, _def: &()) -> Result<Vec<KeyPart>, CodecError> {
        Ok(Vec::new())
    }

    fn same_part(&self, _left: &KeyPart, _right: &KeyPart) -> bool {
        false
    }

    fn encode(&self, _fields: &[Value], _out: &mut dyn io::Write) -> Result<(), CodecError> {
        Ok(())
    }

    fn decode(&self, _bytes: &[u8]) -> Result<Vec<Value>, CodecError> {
        Ok(Vec::new())
    }

    fn validate_tuple(&self, _def: &(), _fields: &[Value]) -> Result<(), CodecError> {
        Ok(())
    }

    fn validate_key(&self, _def: &(), _key: &[Value]) -> Result<(), CodecError> {
        Ok(())
    }

    fn tuple_field<'t>(&self, _def: &(), _part_no: usize, _fields: &'t [Value]) -> Option<&'t Value> {
        None
    }

    fn compare_field(
        &self,
        _def: &(),
        _part_no: usize,
        _left: Option<&Value>,
        _right: Option<&Value>,
    ) -> Ordering {
        Ordering::Equal
    }
}

#[test]
fn path_capable_codec_is_detected() {
    assert!(json_path_is_supported(&CborCodec::new(), "[1]"));
    assert!(runtime().json_path_supported());
    assert!(global().json_path_supported());
}

#[test]
fn legacy_codec_is_detected() {
    assert!(!json_path_is_supported(&CborCodec::legacy(), "[1]"));
    assert!(!legacy_runtime().json_path_supported());
}

#[test]
fn probe_fails_closed() {
    assert!(!json_path_is_supported(&BrokenCodec, "[1]"));
    assert!(!KeyDefRuntime::new(BrokenCodec).json_path_supported());
}

#[test]
fn invalid_probe_path_fails_closed() {
    assert!(!json_path_is_supported(&CborCodec::new(), "[0]"));
}

#[test]
fn paths_are_unsupported_without_capability() {
    let err = build_err(
        &legacy_runtime(),
        &[PartDescriptor::new(1, "unsigned").with_path("[1]")],
    );

    assert_class(
        &err,
        ErrorClass::Unsupported,
        "JSON path is not supported on given version",
    );
    assert!(err.is_illegal_params());
}

#[test]
fn capability_check_precedes_multikey_check() {
    let err = build_err(
        &legacy_runtime(),
        &[PartDescriptor::new(1, "unsigned").with_path("[1][*]")],
    );

    assert_eq!(err.class, ErrorClass::Unsupported);
}

#[test]
fn global_runtime_is_shared() {
    assert!(std::ptr::eq(global(), global()));
}

#[test]
fn each_runtime_checks_its_codec_once() {
    metrics_reset_all();
    let rt = runtime();
    let _legacy = legacy_runtime();

    let mut region = rt.region();
    let def = rt
        .build(&[PartDescriptor::new(1, "unsigned").with_path("[1]")], &mut region)
        .expect("build");
    let _described = rt.to_descriptor_list(&def, &mut region).expect("describe");

    let ops = metrics_report().ops;
    assert_eq!(ops.probes, 2);
    assert_eq!(ops.probes_supported, 1);
}
