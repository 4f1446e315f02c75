use crate::value::{Value, ValueTag, numeric_cmp};
use std::{cmp::Ordering, fmt};

///
/// FieldType
///
/// Field types understood by the bundled codec.
/// Tags parse case-insensitively; `*` is an alias for `any`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldType {
    Any,
    Unsigned,
    Integer,
    Number,
    Double,
    String,
    Boolean,
    Varbinary,
    Scalar,
    Array,
    Map,
}

impl FieldType {
    /// Parse a type tag, returning `None` for tags the codec does not know.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        const TAGS: [(&str, FieldType); 12] = [
            ("any", FieldType::Any),
            ("*", FieldType::Any),
            ("unsigned", FieldType::Unsigned),
            ("integer", FieldType::Integer),
            ("number", FieldType::Number),
            ("double", FieldType::Double),
            ("string", FieldType::String),
            ("boolean", FieldType::Boolean),
            ("varbinary", FieldType::Varbinary),
            ("scalar", FieldType::Scalar),
            ("array", FieldType::Array),
            ("map", FieldType::Map),
        ];

        TAGS.iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(tag))
            .map(|(_, ty)| *ty)
    }

    /// Canonical lower-case tag.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Unsigned => "unsigned",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Double => "double",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Varbinary => "varbinary",
            Self::Scalar => "scalar",
            Self::Array => "array",
            Self::Map => "map",
        }
    }

    /// Whether a non-null value is admissible for this type.
    #[must_use]
    pub const fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Unsigned => matches!(value, Value::Uint(_)),
            Self::Integer => value.is_integer(),
            Self::Number => value.is_number(),
            Self::Double => matches!(value, Value::Double(_)),
            Self::String => matches!(value, Value::Str(_)),
            Self::Boolean => matches!(value, Value::Bool(_)),
            Self::Varbinary => matches!(value, Value::Bin(_)),
            Self::Scalar => value.is_scalar(),
            Self::Array => matches!(value, Value::Array(_)),
            Self::Map => matches!(value, Value::Map(_)),
        }
    }

    /// Collations only apply to string-like types.
    #[must_use]
    pub const fn supports_collation(self) -> bool {
        matches!(self, Self::String | Self::Scalar | Self::Any)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// Collation
///
/// String collations known to the bundled codec.
///
/// Binary     → raw byte order.
/// Unicode    → case-folded order, lower case first on ties.
/// UnicodeCi  → case-folded order, case differences compare equal.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Collation {
    Binary,
    Unicode,
    UnicodeCi,
}

impl Collation {
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "binary" => Some(Self::Binary),
            "unicode" => Some(Self::Unicode),
            "unicode_ci" => Some(Self::UnicodeCi),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Unicode => "unicode",
            Self::UnicodeCi => "unicode_ci",
        }
    }

    #[must_use]
    pub fn compare(self, left: &str, right: &str) -> Ordering {
        match self {
            Self::Binary => left.cmp(right),
            Self::Unicode => {
                // Uppercase ASCII sorts below lowercase in byte order, so the
                // reversed tie-break puts lower case first.
                folded_cmp(left, right).then_with(|| left.cmp(right).reverse())
            }
            Self::UnicodeCi => folded_cmp(left, right),
        }
    }
}

fn folded_cmp(left: &str, right: &str) -> Ordering {
    left.chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase))
}

/// Compare two non-null values under a declared type and optional collation.
///
/// Values that do not match the declared type fall back to the canonical
/// cross-kind order, so the result is always total.
#[must_use]
pub fn typed_cmp(
    field_type: FieldType,
    collation: Option<Collation>,
    left: &Value,
    right: &Value,
) -> Ordering {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) if field_type.supports_collation() => {
            collation.unwrap_or(Collation::Binary).compare(a, b)
        }
        _ if left.tag() == ValueTag::Number && right.tag() == ValueTag::Number => {
            numeric_cmp(left, right).unwrap_or(Ordering::Equal)
        }
        _ => crate::value::canonical_cmp(left, right),
    }
}
