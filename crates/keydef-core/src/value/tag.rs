use crate::value::Value;

///
/// ValueTag
///
/// Stable value-variant tag used for cross-variant ordering and diagnostics.
///
/// IMPORTANT:
/// Discriminants define the cross-class sort order of `scalar` and `any`
/// parts and must not be reordered.
///
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum ValueTag {
    Nil = 1,
    Bool = 2,
    Number = 3,
    Str = 4,
    Bin = 5,
    Array = 6,
    Map = 7,
}

impl ValueTag {
    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::Str => "string",
            Self::Bin => "varbinary",
            Self::Array => "array",
            Self::Map => "map",
        }
    }
}

/// Numbers share one tag so mixed integer/double values interleave.
#[must_use]
pub(super) const fn canonical_tag(value: &Value) -> ValueTag {
    match value {
        Value::Nil => ValueTag::Nil,
        Value::Bool(_) => ValueTag::Bool,
        Value::Uint(_) | Value::Int(_) | Value::Double(_) => ValueTag::Number,
        Value::Str(_) => ValueTag::Str,
        Value::Bin(_) => ValueTag::Bin,
        Value::Array(_) => ValueTag::Array,
        Value::Map(_) => ValueTag::Map,
    }
}
