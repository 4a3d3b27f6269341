//! Errors surfaced by the render session.

use map_core::{DtoError, EngineError, ErrorSeverity, TemplateId, ZoneId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{zone} is not registered")]
    UnknownZone { zone: ZoneId },

    #[error("{zone} is already registered")]
    DuplicateZone { zone: ZoneId },

    #[error("{zone} has an unusable cell size of {cell_size}")]
    UnusableGrid { zone: ZoneId, cell_size: i32 },

    #[error("{template} does not exist")]
    UnknownTemplate { template: TemplateId },

    #[error(transparent)]
    Template(#[from] DtoError),
}

impl EngineError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownZone { .. }
            | Self::UnknownTemplate { .. }
            | Self::UnusableGrid { .. } => ErrorSeverity::Validation,
            Self::DuplicateZone { .. } => ErrorSeverity::Internal,
            Self::Template(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownZone { .. } => "SESSION_UNKNOWN_ZONE",
            Self::DuplicateZone { .. } => "SESSION_DUPLICATE_ZONE",
            Self::UnusableGrid { .. } => "SESSION_UNUSABLE_GRID",
            Self::UnknownTemplate { .. } => "SESSION_UNKNOWN_TEMPLATE",
            Self::Template(err) => err.error_code(),
        }
    }
}
