// Process-wide runtime status. Written by the bootstrap entry points only;
// the callback bridge reads it before re-entering the external caller.

use std::sync::atomic::{AtomicU8, Ordering};

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuntimeStatus {
    Uninitialized = 0,
    Running = 1,
    ShuttingDown = 2,
    Terminated = 3,
}

impl RuntimeStatus {
    fn from_u8(raw: u8) -> RuntimeStatus {
        match raw {
            1 => RuntimeStatus::Running,
            2 => RuntimeStatus::ShuttingDown,
            3 => RuntimeStatus::Terminated,
            _ => RuntimeStatus::Uninitialized,
        }
    }

    /// Legal lifecycle edges. Terminated may go back to Running (hot reload).
    pub fn can_transition_to(self, next: RuntimeStatus) -> bool {
        use RuntimeStatus::*;
        matches!(
            (self, next),
            (Uninitialized, Running)
                | (Running, ShuttingDown)
                | (ShuttingDown, Terminated)
                | (Terminated, Running)
        )
    }
}

/// Atomic holder for a [`RuntimeStatus`].
pub struct RuntimeStatusCell(AtomicU8);

impl RuntimeStatusCell {
    pub const fn new() -> Self {
        RuntimeStatusCell(AtomicU8::new(RuntimeStatus::Uninitialized as u8))
    }

    #[inline]
    pub fn get(&self) -> RuntimeStatus {
        RuntimeStatus::from_u8(self.0.load(Ordering::Acquire))
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.get() == RuntimeStatus::Running
    }

    /// Move to `next` if the edge is legal. Returns the status before the call
    /// on success, or the unchanged current status on failure.
    pub fn transition(&self, next: RuntimeStatus) -> Result<RuntimeStatus, RuntimeStatus> {
        let mut current = self.get();
        loop {
            if !current.can_transition_to(next) {
                return Err(current);
            }
            match self.0.compare_exchange(
                current as u8,
                next as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(current),
                Err(actual) => current = RuntimeStatus::from_u8(actual),
            }
        }
    }
}

impl Default for RuntimeStatusCell {
    fn default() -> Self {
        RuntimeStatusCell::new()
    }
}

static STATUS: RuntimeStatusCell = RuntimeStatusCell::new();

/// The process-wide status cell.
#[inline]
pub fn runtime_status() -> &'static RuntimeStatusCell {
    &STATUS
}
