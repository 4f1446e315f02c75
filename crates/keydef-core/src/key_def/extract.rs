use crate::{
    codec::TupleCodec,
    error::{ErrorOrigin, InternalError},
    key_def::{
        KeyDefinition,
        input::{encode_scratch, load_tuple},
    },
    obs::sink::{MetricsEvent, record},
    region::Region,
    tuple::{Tuple, TupleInput},
    value::Value,
};

/// Project a tuple down to its key fields, in part order, as a new tuple.
///
/// The tuple is validated against `def` before any field is resolved;
/// nullable parts that resolve to nothing contribute a nil. The key is
/// encoded in region scratch and copied out into an independently owned
/// tuple.
pub(crate) fn extract_key<C: TupleCodec>(
    codec: &C,
    def: &KeyDefinition<C>,
    tuple: TupleInput<'_>,
    region: &mut Region,
) -> Result<Tuple, InternalError> {
    let mut scope = region.scope();
    let fields = load_tuple(codec, def, tuple, &mut scope, ErrorOrigin::Extract)?;

    let key = (0..def.part_count())
        .map(|part_no| {
            codec
                .tuple_field(def.inner(), part_no, &fields)
                .cloned()
                .unwrap_or(Value::Nil)
        })
        .collect::<Vec<_>>();

    let span = encode_scratch(codec, &key, &mut scope, "key", ErrorOrigin::Extract)?;
    let extracted = Tuple::from_bytes(scope.bytes(span));
    record(MetricsEvent::Extract {
        parts: def.part_count(),
    });

    Ok(extracted)
}
