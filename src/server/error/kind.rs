//! Coarse error classification for callers.

use super::{lookup::LookupError, Error};

/// Caller-facing classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Authoritative absence; render as "nothing here".
    NotFound,
    /// The player exists but no profile survived the fan-out.
    NoProfilesFound,
    /// Transport, throttling or timeout against an upstream service; transient.
    UpstreamUnavailable,
    /// Configuration problems, database failures and bugs.
    Internal,
}

impl Error {
    /// Classify the error for callers deciding how to present it
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LookupError(LookupError::NoProfilesFound(_)) => ErrorKind::NoProfilesFound,

            // Invalid names short-circuit to the not-found family so callers
            // cannot tell a malformed name from an unknown one
            Self::LookupError(_) => ErrorKind::NotFound,

            Self::UpstreamError(_) => ErrorKind::UpstreamUnavailable,

            // Database errors - the persistent tier is a cache, a failed read is
            // handled as a miss before it gets here, so anything left is a bug or outage
            Self::DbErr(_) => ErrorKind::Internal,

            Self::ConfigError(_) => ErrorKind::Internal,
            Self::ParseError(_) => ErrorKind::Internal,
            Self::InternalError(_) => ErrorKind::Internal,
        }
    }
}
