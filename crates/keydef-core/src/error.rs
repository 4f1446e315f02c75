use crate::codec::CodecError;
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable classification.
/// Every failure is reported synchronously to the immediate caller; nothing
/// is retried or suppressed.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    /// Construct an InternalError without structured detail.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct a malformed-or-contradictory-input error.
    pub(crate) fn illegal_params(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::IllegalParams, origin, message)
    }

    /// Construct an environment-dependent feature rejection.
    pub(crate) fn unsupported(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unsupported, origin, message)
    }

    /// Construct a scratch or definition allocation failure.
    pub(crate) fn memory_issue(size: usize, allocator: &str, object: &str) -> Self {
        Self::new(
            ErrorClass::MemoryIssue,
            ErrorOrigin::Region,
            format!("failed to allocate {size} bytes in {allocator} for {object}"),
        )
    }

    /// Wrap a codec rejection without reinterpreting it.
    ///
    /// Raw-key shape failures are classified as `InvalidKey` so callers can
    /// tell them apart from comparison outcomes.
    pub(crate) fn codec(origin: ErrorOrigin, err: CodecError) -> Self {
        let class = if err.is_key_shape() {
            ErrorClass::InvalidKey
        } else {
            ErrorClass::Codec
        };

        Self {
            class,
            origin,
            message: err.to_string(),
            detail: Some(ErrorDetail::Codec(err)),
        }
    }

    /// Whether this error belongs to the illegal-parameters family.
    #[must_use]
    pub const fn is_illegal_params(&self) -> bool {
        matches!(
            self.class,
            ErrorClass::IllegalParams | ErrorClass::Unsupported | ErrorClass::InvalidKey
        )
    }

    #[must_use]
    pub const fn codec_error(&self) -> Option<&CodecError> {
        match &self.detail {
            Some(ErrorDetail::Codec(err)) => Some(err),
            None => None,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Codec(CodecError),
}

///
/// ErrorClass
/// Error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    IllegalParams,
    Unsupported,
    InvalidKey,
    MemoryIssue,
    Codec,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::IllegalParams => "illegal_params",
            Self::Unsupported => "unsupported",
            Self::InvalidKey => "invalid_key",
            Self::MemoryIssue => "memory_issue",
            Self::Codec => "codec",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Operation that detected the failure.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Validate,
    Build,
    Compare,
    Extract,
    Merge,
    Describe,
    Region,
    Codec,
    Config,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Validate => "validate",
            Self::Build => "build",
            Self::Compare => "compare",
            Self::Extract => "extract",
            Self::Merge => "merge",
            Self::Describe => "describe",
            Self::Region => "region",
            Self::Codec => "codec",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}
