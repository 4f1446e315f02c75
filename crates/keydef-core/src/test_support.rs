use crate::{
    codec::{CborCodec, TupleCodec},
    error::{ErrorClass, InternalError},
    key_def::{KeyDefinition, PartDescriptor},
    region::Region,
    runtime::KeyDefRuntime,
    tuple::Tuple,
    value::Value,
};

/// Runtime over the path-capable codec.
pub(crate) fn runtime() -> KeyDefRuntime<CborCodec> {
    KeyDefRuntime::new(CborCodec::new())
}

/// Runtime over the codec that drops paths.
pub(crate) fn legacy_runtime() -> KeyDefRuntime<CborCodec> {
    KeyDefRuntime::new(CborCodec::legacy())
}

pub(crate) fn build<C: TupleCodec>(
    runtime: &KeyDefRuntime<C>,
    descriptors: &[PartDescriptor],
) -> KeyDefinition<C> {
    let mut region = runtime.region();
    runtime
        .build(descriptors, &mut region)
        .expect("key definition should build")
}

pub(crate) fn build_err<C: TupleCodec>(
    runtime: &KeyDefRuntime<C>,
    descriptors: &[PartDescriptor],
) -> InternalError {
    let mut region = runtime.region();
    let err = runtime
        .build(descriptors, &mut region)
        .expect_err("key definition should be rejected");
    assert_eq!(region.used(), 0, "rejected build must release scratch");

    err
}

pub(crate) fn tuple<C: TupleCodec>(runtime: &KeyDefRuntime<C>, fields: &[Value]) -> Tuple {
    runtime.new_tuple(fields).expect("tuple should encode")
}

pub(crate) fn region() -> Region {
    Region::default()
}

pub(crate) fn assert_class(err: &InternalError, class: ErrorClass, message: &str) {
    assert_eq!(err.class, class, "unexpected class for '{}'", err.message);
    assert_eq!(err.message, message);
}
