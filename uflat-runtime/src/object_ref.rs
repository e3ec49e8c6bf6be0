// Handle liveness. A handle is a non-owning alias; the engine may schedule
// or complete its teardown at any time between calls.

use uflat_ffi::ObjectHandle;

use crate::engine::Engine;
use crate::error::{FlatError, FlatResult};

/// The three states a handle can be observed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Liveness {
    /// Valid and not scheduled for teardown.
    Alive,
    /// Valid this frame, will disappear.
    PendingDestruction,
    /// Does not resolve to a live object. Never dereference.
    Dangling,
}

impl Liveness {
    pub fn of(engine: &dyn Engine, handle: ObjectHandle) -> Liveness {
        if handle.is_null() || !engine.is_valid(handle) {
            Liveness::Dangling
        } else if engine.is_pending_kill(handle) {
            Liveness::PendingDestruction
        } else {
            Liveness::Alive
        }
    }

    #[inline]
    pub fn is_usable(self) -> bool {
        self != Liveness::Dangling
    }
}

/// Validate a handle before a narrowing check dereferences it.
///
/// Pending-destruction objects still pass: they are usable this frame.
pub fn checked(engine: &dyn Engine, handle: ObjectHandle) -> FlatResult<ObjectHandle> {
    if handle.is_null() {
        return Err(FlatError::NullArgument);
    }
    if Liveness::of(engine, handle).is_usable() {
        Ok(handle)
    } else {
        Err(FlatError::ObjectDestroyed)
    }
}
