use crate::{
    TUPLE_INDEX_BASE,
    codec::{CodecError, TupleCodec},
    key_def::KeyPart,
    path::FieldPath,
    serialize::{deserialize, serialize, serialize_into},
    tuple::Tuple,
    types::{Collation, FieldType, typed_cmp},
    value::Value,
};
use std::{cmp::Ordering, io};

///
/// CborCodec
///
/// Tuples are CBOR arrays of native CBOR items.
///
/// `legacy()` models an older runtime whose part record has no path slot:
/// paths are accepted but silently dropped, so the key is built on the
/// top-level field and dumped parts come back without a path.
///

#[derive(Clone, Copy, Debug)]
pub struct CborCodec {
    json_path: bool,
}

impl CborCodec {
    #[must_use]
    pub const fn new() -> Self {
        Self { json_path: true }
    }

    #[must_use]
    pub const fn legacy() -> Self {
        Self { json_path: false }
    }

    fn compile_part(&self, part: &KeyPart) -> Result<CompiledPart, CodecError> {
        let field_type =
            FieldType::parse(&part.declared_type).ok_or_else(|| CodecError::UnknownFieldType {
                tag: part.declared_type.clone(),
            })?;

        let collation = match &part.collation {
            None => None,
            Some(name) => {
                let collation =
                    Collation::parse(name).ok_or_else(|| CodecError::UnknownCollation {
                        name: name.clone(),
                    })?;
                if !field_type.supports_collation() {
                    return Err(CodecError::CollationNotApplicable {
                        collation: name.clone(),
                        field_type: field_type.label(),
                    });
                }
                Some(collation)
            }
        };

        let path = match &part.path {
            Some(raw) if self.json_path => {
                let parsed = FieldPath::parse(raw)?;
                if parsed.is_multikey() {
                    return Err(CodecError::MultikeyPath { path: raw.clone() });
                }
                Some((raw.clone(), parsed))
            }
            _ => None,
        };

        Ok(CompiledPart {
            field_index: part.field_index,
            field_type,
            nullable: part.nullable,
            collation,
            path,
        })
    }
}

impl Default for CborCodec {
    fn default() -> Self {
        Self::new()
    }
}

///
/// CborKeyDef
///

#[derive(Debug)]
pub struct CborKeyDef {
    parts: Vec<CompiledPart>,
}

impl CborKeyDef {
    #[must_use]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }
}

///
/// CompiledPart
///

#[derive(Debug)]
struct CompiledPart {
    field_index: u32,
    field_type: FieldType,
    nullable: bool,
    collation: Option<Collation>,
    path: Option<(String, FieldPath)>,
}

impl CompiledPart {
    fn resolve<'t>(&self, fields: &'t [Value]) -> Option<&'t Value> {
        let field = fields.get(usize::try_from(self.field_index).ok()?)?;
        match &self.path {
            Some((_, path)) => path.resolve(field),
            None => Some(field),
        }
    }

    // One-based field location for diagnostics, e.g. `2` or `2[1]`.
    fn location(&self) -> String {
        let fieldno = u64::from(self.field_index) + u64::from(TUPLE_INDEX_BASE);
        match &self.path {
            Some((raw, _)) if raw.starts_with('[') => format!("{fieldno}{raw}"),
            Some((raw, _)) => format!("{fieldno}.{raw}"),
            None => fieldno.to_string(),
        }
    }

    fn dump(&self) -> KeyPart {
        KeyPart {
            field_index: self.field_index,
            declared_type: self.field_type.label().to_string(),
            nullable: self.nullable,
            collation: self.collation.map(|c| c.name().to_string()),
            path: self.path.as_ref().map(|(raw, _)| raw.clone()),
        }
    }
}

impl TupleCodec for CborCodec {
    type KeyDef = CborKeyDef;

    fn key_def_new(&self, parts: &[KeyPart]) -> Result<CborKeyDef, CodecError> {
        if parts.is_empty() {
            return Err(CodecError::EmptyKeyDef);
        }

        let parts = parts
            .iter()
            .map(|part| self.compile_part(part))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CborKeyDef { parts })
    }

    fn key_def_dump_parts(&self, def: &CborKeyDef) -> Result<Vec<KeyPart>, CodecError> {
        Ok(def.parts.iter().map(CompiledPart::dump).collect())
    }

    fn same_part(&self, left: &KeyPart, right: &KeyPart) -> bool {
        left.field_index == right.field_index && left.path == right.path
    }

    fn encode(&self, fields: &[Value], out: &mut dyn io::Write) -> Result<(), CodecError> {
        serialize_into(out, &fields).map_err(CodecError::from)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Value>, CodecError> {
        deserialize(bytes).map_err(CodecError::from)
    }

    fn validate_tuple(&self, def: &CborKeyDef, fields: &[Value]) -> Result<(), CodecError> {
        for part in &def.parts {
            match part.resolve(fields) {
                None | Some(Value::Nil) if part.nullable => {}
                None => {
                    return Err(CodecError::FieldMissing {
                        field: part.location(),
                    });
                }
                Some(value) if value.is_nil() || !part.field_type.accepts(value) => {
                    return Err(CodecError::FieldType {
                        field: part.location(),
                        expected: part.field_type.label(),
                        actual: value.tag().label(),
                    });
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    fn validate_key(&self, def: &CborKeyDef, key: &[Value]) -> Result<(), CodecError> {
        if key.len() > def.parts.len() {
            return Err(CodecError::KeyPartCount {
                expected: def.parts.len(),
                got: key.len(),
            });
        }

        for (part_no, (part, value)) in def.parts.iter().zip(key).enumerate() {
            let admissible = if value.is_nil() {
                part.nullable
            } else {
                part.field_type.accepts(value)
            };
            if !admissible {
                return Err(CodecError::KeyPartType {
                    part: part_no + 1,
                    expected: part.field_type.label(),
                });
            }
        }

        Ok(())
    }

    fn tuple_field<'t>(
        &self,
        def: &CborKeyDef,
        part_no: usize,
        fields: &'t [Value],
    ) -> Option<&'t Value> {
        def.parts.get(part_no)?.resolve(fields)
    }

    // Absent and nil fields are equal to each other and sort first.
    fn compare_field(
        &self,
        def: &CborKeyDef,
        part_no: usize,
        left: Option<&Value>,
        right: Option<&Value>,
    ) -> Ordering {
        let left = left.filter(|v| !v.is_nil());
        let right = right.filter(|v| !v.is_nil());

        match (left, right) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(left), Some(right)) => match def.parts.get(part_no) {
                Some(part) => typed_cmp(part.field_type, part.collation, left, right),
                None => crate::value::canonical_cmp(left, right),
            },
        }
    }

    fn new_tuple(&self, fields: &[Value]) -> Result<Tuple, CodecError> {
        let bytes = serialize(&fields)?;

        Ok(Tuple::from(bytes))
    }
}
