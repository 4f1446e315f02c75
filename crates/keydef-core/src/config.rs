use crate::{
    error::{ErrorOrigin, InternalError},
    region::DEFAULT_REGION_CAPACITY,
};
use serde::Deserialize;

///
/// KeyDefConfig
///
/// Runtime settings. Every field is optional in serialized form and falls
/// back to its default.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct KeyDefConfig {
    /// Capacity of regions handed out by the runtime, in bytes.
    pub region_capacity: usize,

    /// Path used by the capability probe.
    pub probe_path: String,

    /// Upper bound on parts per definition.
    pub max_parts: u32,
}

impl KeyDefConfig {
    pub const DEFAULT_PROBE_PATH: &'static str = "[1]";
    pub const DEFAULT_MAX_PARTS: u32 = 255;

    pub fn from_json(json: &str) -> Result<Self, InternalError> {
        serde_json::from_str(json).map_err(|err| {
            InternalError::illegal_params(ErrorOrigin::Config, format!("invalid config: {err}"))
        })
    }
}

impl Default for KeyDefConfig {
    fn default() -> Self {
        Self {
            region_capacity: DEFAULT_REGION_CAPACITY,
            probe_path: Self::DEFAULT_PROBE_PATH.to_string(),
            max_parts: Self::DEFAULT_MAX_PARTS,
        }
    }
}
