//! Core runtime for composite key definitions: part validation, tuple
//! ordering, key extraction, merging, and the codec boundary they drive.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod codec;
pub mod config;
pub mod error;
pub mod key_def;
pub mod obs;
pub mod path;
pub mod region;
pub mod runtime;
pub mod serialize;
pub mod tuple;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// One-based field numbering used by descriptors.
pub const TUPLE_INDEX_BASE: u32 = 1;

/// Upper bound on an encoded tuple accepted by the bundled codec.
pub const MAX_TUPLE_BYTES: usize = 1024 * 1024;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, codecs, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        key_def::{KeyDefinition, KeyPart, PartDescriptor},
        region::Region,
        runtime::KeyDefRuntime,
        tuple::{KeyInput, RawKey, Tuple, TupleInput},
        value::Value,
    };
}
