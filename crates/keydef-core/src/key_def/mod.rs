//! Key definitions: validated, ordered key parts over encoded tuples.
//!
//! The modules below own validation policy and drive the codec per part;
//! they never decode or compare field values themselves.

pub(crate) mod build;
pub(crate) mod compare;
pub(crate) mod describe;
pub(crate) mod extract;
mod input;
pub(crate) mod merge;
pub(crate) mod part;
pub(crate) mod policy;
pub(crate) mod probe;

#[cfg(test)]
mod tests;

use crate::{TUPLE_INDEX_BASE, codec::TupleCodec};
use std::fmt;

// re-exports
pub use part::PartDescriptor;
pub use policy::field_type_is_supported;
pub use probe::json_path_is_supported;

///
/// KeyPart
///
/// One validated selector. `field_index` is zero-based.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyPart {
    pub field_index: u32,
    pub declared_type: String,
    pub nullable: bool,
    pub collation: Option<String>,
    pub path: Option<String>,
}

impl KeyPart {
    /// Part over a top-level field, non-nullable, no collation.
    #[must_use]
    pub fn new(field_index: u32, declared_type: impl Into<String>) -> Self {
        Self {
            field_index,
            declared_type: declared_type.into(),
            nullable: false,
            collation: None,
            path: None,
        }
    }

    /// One-based field number as presented externally.
    #[must_use]
    pub fn fieldno(&self) -> u64 {
        u64::from(self.field_index) + u64::from(TUPLE_INDEX_BASE)
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.fieldno(), self.declared_type)?;
        if self.nullable {
            f.write_str(" nullable")?;
        }
        if let Some(collation) = &self.collation {
            write!(f, " collation={collation}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " path={path}")?;
        }

        Ok(())
    }
}

///
/// KeyDefinition
///
/// Ordered, non-empty, immutable set of key parts plus the codec-side
/// definition built from them.
///
/// Not `Clone`: identity is by instance. Ownership moves; the codec-side
/// definition is released exactly once, by `release` or on drop. Wrap in
/// `Arc` for shared ownership.
///

pub struct KeyDefinition<C: TupleCodec> {
    parts: Vec<KeyPart>,
    inner: C::KeyDef,
}

impl<C: TupleCodec> KeyDefinition<C> {
    pub(crate) const fn new(parts: Vec<KeyPart>, inner: C::KeyDef) -> Self {
        Self { parts, inner }
    }

    #[must_use]
    pub fn parts(&self) -> &[KeyPart] {
        &self.parts
    }

    #[must_use]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Codec-side definition.
    #[must_use]
    pub const fn inner(&self) -> &C::KeyDef {
        &self.inner
    }

    /// Release the definition. Infallible.
    pub fn release(self) {
        drop(self);
    }
}

impl<C: TupleCodec> fmt::Debug for KeyDefinition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyDefinition")
            .field("parts", &self.parts)
            .finish_non_exhaustive()
    }
}

impl<C: TupleCodec> fmt::Display for KeyDefinition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{part}")?;
        }
        f.write_str("]")
    }
}
