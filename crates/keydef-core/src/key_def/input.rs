use crate::{
    codec::TupleCodec,
    error::{ErrorOrigin, InternalError},
    key_def::KeyDefinition,
    region::{Region, RegionSpan},
    tuple::{KeyInput, TupleInput},
    value::Value,
};

/// Encode `values` through the codec into region scratch.
///
/// The caller owns the enclosing scope; the returned span lives until that
/// scope is truncated.
pub(super) fn encode_scratch<C: TupleCodec>(
    codec: &C,
    values: &[Value],
    region: &mut Region,
    object: &str,
    origin: ErrorOrigin,
) -> Result<RegionSpan, InternalError> {
    let mut writer = region.writer();
    let encoded = codec.encode(values, &mut writer);
    if let Some(size) = writer.overflow() {
        return Err(InternalError::memory_issue(size, "region", object));
    }
    encoded.map_err(|err| InternalError::codec(origin, err))?;

    Ok(writer.finish())
}

/// Decode a tuple argument and check it against every part of `def`.
///
/// Plain values are first encoded as a tuple, exactly like a caller-built
/// tuple would be.
pub(super) fn load_tuple<C: TupleCodec>(
    codec: &C,
    def: &KeyDefinition<C>,
    input: TupleInput<'_>,
    region: &mut Region,
    origin: ErrorOrigin,
) -> Result<Vec<Value>, InternalError> {
    let fields = match input {
        TupleInput::Encoded(tuple) => codec.decode(tuple.as_bytes()),
        TupleInput::Values(values) => {
            let mut scope = region.scope();
            let span = encode_scratch(codec, values, &mut scope, "tuple", origin)?;
            codec.decode(scope.bytes(span))
        }
    }
    .map_err(|err| InternalError::codec(origin, err))?;

    codec
        .validate_tuple(def.inner(), &fields)
        .map_err(|err| InternalError::codec(origin, err))?;

    Ok(fields)
}

/// Decode a key argument and check its shape against `def`.
///
/// Undecodable keys and shape mismatches are reported as invalid keys.
pub(super) fn load_key<C: TupleCodec>(
    codec: &C,
    def: &KeyDefinition<C>,
    input: KeyInput<'_>,
    region: &mut Region,
    origin: ErrorOrigin,
) -> Result<Vec<Value>, InternalError> {
    let key = match input {
        KeyInput::Encoded(bytes) => codec.decode(bytes),
        KeyInput::Values(values) => {
            let mut scope = region.scope();
            let span = encode_scratch(codec, values, &mut scope, "key", origin)?;
            codec.decode(scope.bytes(span))
        }
    }
    .map_err(|err| {
        InternalError::codec(
            origin,
            crate::codec::CodecError::MalformedKey {
                reason: err.to_string(),
            },
        )
    })?;

    codec
        .validate_key(def.inner(), &key)
        .map_err(|err| InternalError::codec(origin, err))?;

    Ok(key)
}
