use crate::{
    codec::TupleCodec,
    error::{ErrorOrigin, InternalError},
    key_def::{
        KeyDefinition,
        input::{load_key, load_tuple},
    },
    obs::sink::{MetricsEvent, record},
    region::Region,
    tuple::{KeyInput, TupleInput},
    value::Value,
};
use std::cmp::Ordering;

/// Compare the key fields of two tuples.
///
/// Lexicographic over the parts of `def` in declaration order: the first
/// part that differs decides. Both tuples are validated first.
pub(crate) fn compare<C: TupleCodec>(
    codec: &C,
    def: &KeyDefinition<C>,
    tuple_a: TupleInput<'_>,
    tuple_b: TupleInput<'_>,
    region: &mut Region,
) -> Result<Ordering, InternalError> {
    let mut scope = region.scope();
    let left = load_tuple(codec, def, tuple_a, &mut scope, ErrorOrigin::Compare)?;
    let right = load_tuple(codec, def, tuple_b, &mut scope, ErrorOrigin::Compare)?;

    let ordering = compare_parts(codec, def, def.part_count(), &left, |part_no| {
        codec.tuple_field(def.inner(), part_no, &right)
    });
    record(MetricsEvent::Compare {
        parts: def.part_count(),
    });

    Ok(ordering)
}

/// Compare a tuple's key fields against a (possibly partial) key.
///
/// Only the parts the key supplies take part in the comparison, so a
/// shorter key matches every tuple sharing its prefix. Key shape errors are
/// reported as invalid keys, never as an ordering.
pub(crate) fn compare_with_key<C: TupleCodec>(
    codec: &C,
    def: &KeyDefinition<C>,
    tuple: TupleInput<'_>,
    key: KeyInput<'_>,
    region: &mut Region,
) -> Result<Ordering, InternalError> {
    let mut scope = region.scope();
    let fields = load_tuple(codec, def, tuple, &mut scope, ErrorOrigin::Compare)?;
    let key = load_key(codec, def, key, &mut scope, ErrorOrigin::Compare)?;

    let ordering = compare_parts(codec, def, key.len(), &fields, |part_no| key.get(part_no));
    record(MetricsEvent::CompareWithKey {
        key_parts: key.len(),
    });

    Ok(ordering)
}

fn compare_parts<'r, C, F>(
    codec: &C,
    def: &KeyDefinition<C>,
    part_count: usize,
    left: &[Value],
    right_field: F,
) -> Ordering
where
    C: TupleCodec,
    F: Fn(usize) -> Option<&'r Value>,
{
    for part_no in 0..part_count {
        let left_field = codec.tuple_field(def.inner(), part_no, left);
        let ordering =
            codec.compare_field(def.inner(), part_no, left_field, right_field(part_no));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}
