use crate::{
    TUPLE_INDEX_BASE,
    error::{ErrorOrigin, InternalError},
    key_def::{KeyPart, policy::field_type_is_supported},
    path::is_multikey,
};
use serde::{Deserialize, Deserializer, Serialize};

///
/// PartDescriptor
///
/// External form of one key part:
/// `{fieldno | field, type, is_nullable?, collation?, path?}`.
///
/// `fieldno` and `field` are redundant spellings of the one-based field
/// number; exactly one of them must be present. Every option is kept as
/// supplied so validation can report what is wrong with it.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PartDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fieldno: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<i64>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "truthy",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_nullable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl PartDescriptor {
    #[must_use]
    pub fn new(fieldno: i64, field_type: &str) -> Self {
        Self {
            fieldno: Some(fieldno),
            field_type: Some(field_type.to_string()),
            ..Self::default()
        }
    }

    /// Descriptor using the `field` alias for the field number.
    #[must_use]
    pub fn by_field(field: i64, field_type: &str) -> Self {
        Self {
            field: Some(field),
            field_type: Some(field_type.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.is_nullable = Some(true);
        self
    }

    #[must_use]
    pub fn with_collation(mut self, collation: &str) -> Self {
        self.collation = Some(collation.to_string());
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    /// Parse a JSON array of descriptor objects.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, InternalError> {
        serde_json::from_str(json).map_err(|err| {
            InternalError::illegal_params(
                ErrorOrigin::Validate,
                format!("invalid key part descriptors: {err}"),
            )
        })
    }

    /// Render a descriptor list as a JSON array.
    #[must_use]
    pub fn list_to_json(list: &[Self]) -> serde_json::Value {
        serde_json::Value::Array(
            list.iter()
                .filter_map(|desc| serde_json::to_value(desc).ok())
                .collect(),
        )
    }
}

// Any value other than null and false sets the flag.
fn truthy<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;

    Ok(match raw {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(flag) => Some(flag),
        _ => Some(true),
    })
}

/// Validate one descriptor into a key part.
///
/// Checks run in a fixed order and the first violation is reported:
/// field selector, type, nullability, collation, path.
pub(crate) fn validate_part(
    desc: &PartDescriptor,
    json_path_supported: bool,
) -> Result<KeyPart, InternalError> {
    let selector = match (desc.fieldno, desc.field) {
        (Some(_), Some(_)) => return Err(illegal("conflicting options: fieldno and field")),
        (None, None) => return Err(illegal("fieldno or field must not be nil")),
        (Some(n), None) | (None, Some(n)) => n,
    };
    let field_index = selector
        .checked_sub(i64::from(TUPLE_INDEX_BASE))
        .and_then(|index| u32::try_from(index).ok())
        .ok_or_else(|| illegal(format!("fieldno must be a positive integer, got {selector}")))?;
    // the one-based number must itself fit in a u32
    if field_index == u32::MAX {
        return Err(illegal(format!(
            "fieldno must not exceed {}, got {selector}",
            u32::MAX
        )));
    }

    let declared_type = desc
        .field_type
        .as_deref()
        .ok_or_else(|| illegal("type must not be nil"))?;
    if !field_type_is_supported(declared_type) {
        return Err(illegal(format!("unsupported field type: {declared_type}")));
    }

    let nullable = desc.is_nullable.unwrap_or(false);

    let collation = desc.collation.clone();

    // Path grammar is left to the codec; only the environment and the
    // fan-out marker are checked here.
    let path = match desc.path.as_deref() {
        None => None,
        Some(_) if !json_path_supported => {
            return Err(InternalError::unsupported(
                ErrorOrigin::Validate,
                "JSON path is not supported on given version",
            ));
        }
        Some(path) if is_multikey(path) => {
            return Err(illegal("multikey path is not supported"));
        }
        Some(path) => Some(path.to_string()),
    };

    Ok(KeyPart {
        field_index,
        declared_type: declared_type.to_string(),
        nullable,
        collation,
        path,
    })
}

fn illegal(message: impl Into<String>) -> InternalError {
    InternalError::illegal_params(ErrorOrigin::Validate, message)
}
