use crate::{
    codec::TupleCodec,
    error::{ErrorOrigin, InternalError},
    key_def::{
        KeyDefinition, KeyPart,
        part::{PartDescriptor, validate_part},
    },
    obs::sink::{MetricsEvent, record},
    region::Region,
};
use std::mem::size_of;
use tracing::debug;

///
/// BuildOptions
/// Inputs the builder takes from its runtime.
///

#[derive(Clone, Copy, Debug)]
pub(crate) struct BuildOptions {
    pub json_path_supported: bool,
    pub max_parts: u32,
}

/// Validate descriptors in order and construct a key definition.
///
/// Fails fast on the first invalid descriptor; no partial definition is
/// returned. The part array itself lives on the heap: `region` is only
/// charged its size as capacity accounting, and the charge is released on
/// every exit path.
pub(crate) fn build_key_def<C: TupleCodec>(
    codec: &C,
    descriptors: &[PartDescriptor],
    options: BuildOptions,
    region: &mut Region,
) -> Result<KeyDefinition<C>, InternalError> {
    let result = build_inner(codec, descriptors, options, region);

    match &result {
        Ok(def) => {
            debug!(parts = def.part_count(), key_def = %def, "key definition built");
            record(MetricsEvent::Build {
                parts: def.part_count(),
            });
        }
        Err(err) => {
            debug!(error = %err.display_with_class(), "key definition rejected");
            record(MetricsEvent::BuildRejected);
        }
    }

    result
}

fn build_inner<C: TupleCodec>(
    codec: &C,
    descriptors: &[PartDescriptor],
    options: BuildOptions,
    region: &mut Region,
) -> Result<KeyDefinition<C>, InternalError> {
    if descriptors.is_empty() {
        return Err(InternalError::illegal_params(
            ErrorOrigin::Build,
            "at least one key part is required",
        ));
    }
    let limit = usize::try_from(options.max_parts).unwrap_or(usize::MAX);
    if descriptors.len() > limit {
        return Err(InternalError::illegal_params(
            ErrorOrigin::Build,
            format!(
                "too many key parts: {} (limit {})",
                descriptors.len(),
                options.max_parts
            ),
        ));
    }

    let mut scope = region.scope();
    // accounting only, the parts are collected into a Vec below
    scope.alloc(size_of::<KeyPart>() * descriptors.len(), "parts")?;

    let parts = descriptors
        .iter()
        .map(|desc| validate_part(desc, options.json_path_supported))
        .collect::<Result<Vec<_>, _>>()?;

    let inner = codec
        .key_def_new(&parts)
        .map_err(|err| InternalError::codec(ErrorOrigin::Build, err))?;

    Ok(KeyDefinition::new(parts, inner))
}
