// Error types for the uflat runtime. These never cross the boundary: entry
// points collapse them to null/false/default or to a `FlatErrorCode`.

use std::fmt;

use uflat_ffi::{FlatErrorCode, Kind};

use crate::dispatch::Family;

/// Rich error type for uflat operations.
#[derive(Debug)]
pub enum FlatError {
    /// No engine is bound to the calling thread.
    NoEngine,
    ObjectDestroyed,
    InvalidCast,
    /// Raw kind tag outside the kind table.
    UnknownKind(i32),
    /// Known tag, but not a member of the requested family.
    KindNotInFamily { kind: Kind, family: Family },
    ClassNotFound(String),
    NotFound(String),
    NullArgument,
    BufferTooSmall,
    InvalidOperation(String),
    Config(String),
    Internal(String),
}

impl fmt::Display for FlatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlatError::NoEngine => write!(f, "no engine bound to this thread"),
            FlatError::ObjectDestroyed => write!(f, "object has been destroyed"),
            FlatError::InvalidCast => write!(f, "invalid cast"),
            FlatError::UnknownKind(raw) => write!(f, "unknown kind tag: {raw}"),
            FlatError::KindNotInFamily { kind, family } => {
                write!(f, "kind {} is not {family:?}", kind.name())
            }
            FlatError::ClassNotFound(name) => write!(f, "class not found: {name}"),
            FlatError::NotFound(what) => write!(f, "not found: {what}"),
            FlatError::NullArgument => write!(f, "null argument"),
            FlatError::BufferTooSmall => write!(f, "buffer too small"),
            FlatError::InvalidOperation(msg) => write!(f, "invalid operation: {msg}"),
            FlatError::Config(msg) => write!(f, "config error: {msg}"),
            FlatError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for FlatError {}

/// Convenience alias used throughout the runtime and the entry points.
pub type FlatResult<T> = Result<T, FlatError>;

impl FlatError {
    /// Boundary code for this error.
    pub fn code(&self) -> FlatErrorCode {
        match self {
            FlatError::NoEngine => FlatErrorCode::NoEngine,
            FlatError::ObjectDestroyed => FlatErrorCode::ObjectDestroyed,
            FlatError::InvalidCast => FlatErrorCode::InvalidCast,
            FlatError::UnknownKind(_) | FlatError::KindNotInFamily { .. } => FlatErrorCode::UnknownKind,
            FlatError::ClassNotFound(_) | FlatError::NotFound(_) => FlatErrorCode::NotFound,
            FlatError::NullArgument => FlatErrorCode::NullArgument,
            FlatError::BufferTooSmall => FlatErrorCode::BufferTooSmall,
            FlatError::InvalidOperation(_) | FlatError::Config(_) => FlatErrorCode::InvalidOperation,
            FlatError::Internal(_) => FlatErrorCode::InternalError,
        }
    }
}

/// Collapse a result into its boundary code.
pub fn to_code(result: FlatResult<()>) -> FlatErrorCode {
    match result {
        Ok(()) => FlatErrorCode::Ok,
        Err(e) => e.code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_maps_to_ok_code() {
        assert_eq!(to_code(Ok(())), FlatErrorCode::Ok);
    }

    #[test]
    fn errors_map_to_codes() {
        let cases = [
            (FlatError::NoEngine, FlatErrorCode::NoEngine),
            (FlatError::ObjectDestroyed, FlatErrorCode::ObjectDestroyed),
            (FlatError::InvalidCast, FlatErrorCode::InvalidCast),
            (FlatError::UnknownKind(99), FlatErrorCode::UnknownKind),
            (FlatError::NotFound("actor".into()), FlatErrorCode::NotFound),
            (FlatError::BufferTooSmall, FlatErrorCode::BufferTooSmall),
            (FlatError::Internal(String::new()), FlatErrorCode::InternalError),
        ];
        for (err, expected) in cases {
            assert_eq!(to_code(Err(err)), expected);
        }
    }

    #[test]
    fn display_formats_are_human_readable() {
        let err = FlatError::KindNotInFamily { kind: Kind::Pawn, family: Family::Attachable };
        assert_eq!(err.to_string(), "kind Pawn is not Attachable");
        assert_eq!(FlatError::UnknownKind(7).to_string(), "unknown kind tag: 7");
    }
}
