//! Tuple codec boundary.
//!
//! The key-definition core never interprets encoded bytes or field values
//! on its own. Everything below this trait (the encoding, the field type
//! rules, path grammar, null ordering, collations, part identity) is owned
//! by the codec.

mod cbor;

#[cfg(test)]
mod tests;

use crate::{
    key_def::KeyPart, path::PathError, serialize::SerializeError, tuple::Tuple, value::Value,
};
use std::{cmp::Ordering, io};
use thiserror::Error as ThisError;

// re-exports
pub use cbor::{CborCodec, CborKeyDef};

///
/// TupleCodec
///
/// Collaborator consumed by the core. The codec-side key definition is
/// released by dropping it.
///

pub trait TupleCodec: Send + Sync {
    /// Codec-side compiled key definition.
    type KeyDef: Send + Sync;

    /// Construct a key definition from validated parts.
    fn key_def_new(&self, parts: &[KeyPart]) -> Result<Self::KeyDef, CodecError>;

    /// Dump a key definition's parts back into part form.
    fn key_def_dump_parts(&self, def: &Self::KeyDef) -> Result<Vec<KeyPart>, CodecError>;

    /// Part identity used when merging definitions.
    fn same_part(&self, left: &KeyPart, right: &KeyPart) -> bool;

    /// Encode a list of field values as one tuple.
    fn encode(&self, fields: &[Value], out: &mut dyn io::Write) -> Result<(), CodecError>;

    /// Decode an encoded tuple or key into its top-level fields.
    fn decode(&self, bytes: &[u8]) -> Result<Vec<Value>, CodecError>;

    /// Check that a decoded tuple satisfies every part of `def`.
    fn validate_tuple(&self, def: &Self::KeyDef, fields: &[Value]) -> Result<(), CodecError>;

    /// Check a (possibly partial) key against the leading parts of `def`.
    fn validate_key(&self, def: &Self::KeyDef, key: &[Value]) -> Result<(), CodecError>;

    /// Resolve the field selected by part `part_no` (index and path).
    fn tuple_field<'t>(
        &self,
        def: &Self::KeyDef,
        part_no: usize,
        fields: &'t [Value],
    ) -> Option<&'t Value>;

    /// Compare two resolved values under part `part_no`. `None` is absent.
    fn compare_field(
        &self,
        def: &Self::KeyDef,
        part_no: usize,
        left: Option<&Value>,
        right: Option<&Value>,
    ) -> Ordering;

    /// Encode a standalone tuple.
    fn new_tuple(&self, fields: &[Value]) -> Result<Tuple, CodecError> {
        let mut bytes = Vec::new();
        self.encode(fields, &mut bytes)?;

        Ok(Tuple::from(bytes))
    }
}

///
/// CodecError
///
/// Rejections reported by the codec. Passed through to callers unchanged.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CodecError {
    #[error("key definition must have at least one part")]
    EmptyKeyDef,

    #[error("unknown field type '{tag}'")]
    UnknownFieldType { tag: String },

    #[error("unknown collation '{name}'")]
    UnknownCollation { name: String },

    #[error("collation '{collation}' is not applicable to field type '{field_type}'")]
    CollationNotApplicable {
        collation: String,
        field_type: &'static str,
    },

    #[error("{0}")]
    InvalidPath(PathError),

    #[error("multikey path '{path}' cannot be used in a single-value key")]
    MultikeyPath { path: String },

    #[error("tuple field {field} required by key definition is missing")]
    FieldMissing { field: String },

    #[error(
        "tuple field {field} type does not match one required by key definition: expected {expected}, got {actual}"
    )]
    FieldType {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("invalid key part count (expected [0..{expected}], got {got})")]
    KeyPartCount { expected: usize, got: usize },

    #[error(
        "supplied key type of part {part} does not match key definition part type: expected {expected}"
    )]
    KeyPartType { part: usize, expected: &'static str },

    #[error("malformed key: {reason}")]
    MalformedKey { reason: String },

    #[error("{0}")]
    Serialize(SerializeError),
}

impl CodecError {
    /// Whether the error describes the shape of a caller-supplied key.
    #[must_use]
    pub const fn is_key_shape(&self) -> bool {
        matches!(
            self,
            Self::KeyPartCount { .. } | Self::KeyPartType { .. } | Self::MalformedKey { .. }
        )
    }
}

impl From<SerializeError> for CodecError {
    fn from(err: SerializeError) -> Self {
        Self::Serialize(err)
    }
}

impl From<PathError> for CodecError {
    fn from(err: PathError) -> Self {
        Self::InvalidPath(err)
    }
}
