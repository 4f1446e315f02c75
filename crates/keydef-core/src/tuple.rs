use crate::value::Value;
use derive_more::Deref;
use std::sync::Arc;

///
/// Tuple
///
/// Encoded, immutable record. Cloning shares the underlying bytes, which
/// plays the role of a tuple reference count.
///

#[derive(Clone, Debug, Deref, Eq, Hash, PartialEq)]
#[deref(forward)]
pub struct Tuple(Arc<[u8]>);

impl Tuple {
    /// Wrap already-encoded bytes. The bytes are copied into a new allocation.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(Arc::from(bytes))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Tuple {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Arc::from(bytes))
    }
}

///
/// RawKey
///
/// Encoded full or partial key supplied by the caller for range-style
/// comparisons. Opaque to the core; interpreted by the codec.
///

#[derive(Clone, Debug, Deref, Eq, Hash, PartialEq)]
#[deref(forward)]
pub struct RawKey(Vec<u8>);

impl RawKey {
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for RawKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&Tuple> for RawKey {
    fn from(tuple: &Tuple) -> Self {
        Self::from_bytes(tuple.as_bytes())
    }
}

///
/// TupleInput
///
/// Either an encoded tuple or plain field values that are encoded through
/// the codec before use.
///

#[derive(Clone, Copy, Debug)]
pub enum TupleInput<'a> {
    Encoded(&'a Tuple),
    Values(&'a [Value]),
}

impl<'a> From<&'a Tuple> for TupleInput<'a> {
    fn from(tuple: &'a Tuple) -> Self {
        Self::Encoded(tuple)
    }
}

impl<'a> From<&'a [Value]> for TupleInput<'a> {
    fn from(values: &'a [Value]) -> Self {
        Self::Values(values)
    }
}

impl<'a> From<&'a Vec<Value>> for TupleInput<'a> {
    fn from(values: &'a Vec<Value>) -> Self {
        Self::Values(values)
    }
}

///
/// KeyInput
///
/// Either an encoded raw key or plain key field values.
///

#[derive(Clone, Copy, Debug)]
pub enum KeyInput<'a> {
    Encoded(&'a [u8]),
    Values(&'a [Value]),
}

impl<'a> From<&'a RawKey> for KeyInput<'a> {
    fn from(key: &'a RawKey) -> Self {
        Self::Encoded(key.as_bytes())
    }
}

impl<'a> From<&'a Tuple> for KeyInput<'a> {
    fn from(tuple: &'a Tuple) -> Self {
        Self::Encoded(tuple.as_bytes())
    }
}

impl<'a> From<&'a [Value]> for KeyInput<'a> {
    fn from(values: &'a [Value]) -> Self {
        Self::Values(values)
    }
}

impl<'a> From<&'a Vec<Value>> for KeyInput<'a> {
    fn from(values: &'a Vec<Value>) -> Self {
        Self::Values(values)
    }
}
