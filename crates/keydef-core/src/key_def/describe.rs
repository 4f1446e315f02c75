use crate::{
    codec::TupleCodec,
    error::{ErrorOrigin, InternalError},
    key_def::{KeyDefinition, KeyPart, PartDescriptor},
    region::Region,
};
use std::mem::size_of;

/// Render a definition back into descriptor form, as dumped by the codec.
///
/// Field numbers are one-based; `is_nullable` appears only when set,
/// `collation` only when non-empty, and `path` only when present.
///
/// The dumped part array is charged to `region` for capacity accounting
/// only; the parts themselves are heap allocated.
pub(crate) fn to_descriptor_list<C: TupleCodec>(
    codec: &C,
    def: &KeyDefinition<C>,
    region: &mut Region,
) -> Result<Vec<PartDescriptor>, InternalError> {
    let mut scope = region.scope();
    scope.alloc(size_of::<KeyPart>() * def.part_count(), "dumped parts")?;

    let parts = codec
        .key_def_dump_parts(def.inner())
        .map_err(|err| InternalError::codec(ErrorOrigin::Describe, err))?;

    Ok(parts.iter().map(part_to_descriptor).collect())
}

fn part_to_descriptor(part: &KeyPart) -> PartDescriptor {
    PartDescriptor {
        fieldno: i64::try_from(part.fieldno()).ok(),
        field: None,
        field_type: Some(part.declared_type.clone()),
        is_nullable: part.nullable.then_some(true),
        collation: part.collation.clone().filter(|c| !c.is_empty()),
        path: part.path.clone(),
    }
}
