/// Result codes for entry points that report more than null/false.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlatErrorCode {
    Ok = 0,
    ObjectDestroyed = 1,
    InvalidCast = 2,
    UnknownKind = 3,
    NotFound = 4,
    NullArgument = 5,
    InvalidOperation = 6,
    InternalError = 7,
    BufferTooSmall = 8,
    NoEngine = 9,
}
