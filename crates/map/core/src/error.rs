//! Common error infrastructure for map-core.
//!
//! Geometry never fails: missing context yields empty regions and out-of-range
//! parameters are clamped. The only fallible surface is decoding persisted
//! templates, whose errors are classified here so callers can log and skip.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Skippable input; the caller can continue with the remaining records.
    Recoverable,

    /// Invalid input that should be rejected without retry.
    Validation,

    /// Unexpected state inconsistency; indicates a bug.
    Internal,

    /// Unrecoverable.
    Fatal,
}

impl ErrorSeverity {
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for errors raised across the map crates.
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for the error variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Failure to turn a [`TemplateDto`](crate::template::TemplateDto) back into a template.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DtoError {
    #[error("unknown template kind `{kind}`")]
    UnknownKind { kind: String },

    #[error("unsupported template record version {version} (newest known: {supported})")]
    UnsupportedVersion { version: u32, supported: u32 },

    #[error("invalid value `{value}` for field `{field}`")]
    InvalidField { field: &'static str, value: String },
}

impl EngineError for DtoError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownKind { .. } | Self::UnsupportedVersion { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::InvalidField { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownKind { .. } => "DTO_UNKNOWN_KIND",
            Self::UnsupportedVersion { .. } => "DTO_UNSUPPORTED_VERSION",
            Self::InvalidField { .. } => "DTO_INVALID_FIELD",
        }
    }
}
