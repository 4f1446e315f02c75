use crate::{
    codec::TupleCodec,
    error::{ErrorOrigin, InternalError},
    key_def::KeyDefinition,
    obs::sink::{MetricsEvent, record},
};
use tracing::debug;

/// Union of two definitions: every part of `first` in its original order,
/// followed by the parts of `second` the codec does not consider already
/// present. Neither input is modified.
pub(crate) fn merge<C: TupleCodec>(
    codec: &C,
    first: &KeyDefinition<C>,
    second: &KeyDefinition<C>,
) -> Result<KeyDefinition<C>, InternalError> {
    let mut parts = first.parts().to_vec();
    for part in second.parts() {
        if !first.parts().iter().any(|seen| codec.same_part(seen, part)) {
            parts.push(part.clone());
        }
    }

    let inner = codec
        .key_def_new(&parts)
        .map_err(|err| InternalError::codec(ErrorOrigin::Merge, err))?;
    let merged = KeyDefinition::new(parts, inner);

    debug!(
        first = first.part_count(),
        second = second.part_count(),
        merged = merged.part_count(),
        "key definitions merged"
    );
    record(MetricsEvent::Merge {
        parts: merged.part_count(),
    });

    Ok(merged)
}
