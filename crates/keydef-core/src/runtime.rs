use crate::{
    codec::{CborCodec, TupleCodec},
    config::KeyDefConfig,
    error::{ErrorOrigin, InternalError},
    key_def::{
        KeyDefinition, PartDescriptor,
        build::{BuildOptions, build_key_def},
        compare, describe, extract, json_path_is_supported, merge,
    },
    region::Region,
    tuple::{KeyInput, Tuple, TupleInput},
    value::Value,
};
use std::{cmp::Ordering, sync::OnceLock};
use tracing::debug;

///
/// KeyDefRuntime
///
/// Entry point for key-definition operations over one codec.
///
/// The path capability probe runs once per runtime, when it is created,
/// and its answer is never invalidated. Each runtime probes its own codec;
/// `global()` is the process-wide instance and probes once per process.
/// Operations are synchronous and add no locking of their own; sharing a
/// runtime across threads is as safe as the codec is.
///

#[derive(Debug)]
pub struct KeyDefRuntime<C: TupleCodec> {
    codec: C,
    config: KeyDefConfig,
    json_path_supported: bool,
}

impl<C: TupleCodec> KeyDefRuntime<C> {
    pub fn new(codec: C) -> Self {
        Self::with_config(codec, KeyDefConfig::default())
    }

    pub fn with_config(codec: C, config: KeyDefConfig) -> Self {
        let json_path_supported = json_path_is_supported(&codec, &config.probe_path);
        debug!(json_path_supported, "key definition runtime initialised");

        Self {
            codec,
            config,
            json_path_supported,
        }
    }

    #[must_use]
    pub const fn codec(&self) -> &C {
        &self.codec
    }

    #[must_use]
    pub const fn config(&self) -> &KeyDefConfig {
        &self.config
    }

    /// Cached result of the path capability probe.
    #[must_use]
    pub const fn json_path_supported(&self) -> bool {
        self.json_path_supported
    }

    /// Fresh scratch region sized from config.
    #[must_use]
    pub const fn region(&self) -> Region {
        Region::new(self.config.region_capacity)
    }

    /// Validate descriptors and construct a definition.
    pub fn build(
        &self,
        descriptors: &[PartDescriptor],
        region: &mut Region,
    ) -> Result<KeyDefinition<C>, InternalError> {
        let options = BuildOptions {
            json_path_supported: self.json_path_supported,
            max_parts: self.config.max_parts,
        };

        build_key_def(&self.codec, descriptors, options, region)
    }

    /// Build from a JSON array of descriptor objects.
    pub fn build_from_json(
        &self,
        json: &str,
        region: &mut Region,
    ) -> Result<KeyDefinition<C>, InternalError> {
        let descriptors = PartDescriptor::list_from_json(json)?;

        self.build(&descriptors, region)
    }

    pub fn compare<'a>(
        &self,
        def: &KeyDefinition<C>,
        tuple_a: impl Into<TupleInput<'a>>,
        tuple_b: impl Into<TupleInput<'a>>,
        region: &mut Region,
    ) -> Result<Ordering, InternalError> {
        compare::compare(&self.codec, def, tuple_a.into(), tuple_b.into(), region)
    }

    pub fn compare_with_key<'a>(
        &self,
        def: &KeyDefinition<C>,
        tuple: impl Into<TupleInput<'a>>,
        key: impl Into<KeyInput<'a>>,
        region: &mut Region,
    ) -> Result<Ordering, InternalError> {
        compare::compare_with_key(&self.codec, def, tuple.into(), key.into(), region)
    }

    pub fn extract_key<'a>(
        &self,
        def: &KeyDefinition<C>,
        tuple: impl Into<TupleInput<'a>>,
        region: &mut Region,
    ) -> Result<Tuple, InternalError> {
        extract::extract_key(&self.codec, def, tuple.into(), region)
    }

    pub fn merge(
        &self,
        first: &KeyDefinition<C>,
        second: &KeyDefinition<C>,
    ) -> Result<KeyDefinition<C>, InternalError> {
        merge::merge(&self.codec, first, second)
    }

    pub fn to_descriptor_list(
        &self,
        def: &KeyDefinition<C>,
        region: &mut Region,
    ) -> Result<Vec<PartDescriptor>, InternalError> {
        describe::to_descriptor_list(&self.codec, def, region)
    }

    /// Encode field values as a standalone tuple.
    pub fn new_tuple(&self, fields: &[Value]) -> Result<Tuple, InternalError> {
        self.codec
            .new_tuple(fields)
            .map_err(|err| InternalError::codec(ErrorOrigin::Codec, err))
    }

    /// Decode a tuple into its top-level fields.
    pub fn decode_tuple(&self, tuple: &Tuple) -> Result<Vec<Value>, InternalError> {
        self.codec
            .decode(tuple.as_bytes())
            .map_err(|err| InternalError::codec(ErrorOrigin::Codec, err))
    }
}

/// Process-wide runtime over the bundled codec, created on first use.
pub fn global() -> &'static KeyDefRuntime<CborCodec> {
    static RUNTIME: OnceLock<KeyDefRuntime<CborCodec>> = OnceLock::new();

    RUNTIME.get_or_init(|| KeyDefRuntime::new(CborCodec::new()))
}
