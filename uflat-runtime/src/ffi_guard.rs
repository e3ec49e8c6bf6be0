// FFI boundary guard: wraps entry point bodies to catch panics before they
// cross the boundary (which is undefined behavior).

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::api::{engine, is_engine_installed};
use crate::engine::{Engine, LogVerbosity};

/// Execute `f` and catch any panic, returning `default` on failure.
///
/// Every `extern "C"` function wraps its body in this guard. If an engine is
/// bound, the panic message is logged at Error.
pub fn ffi_boundary<F, R>(default: R, f: F) -> R
where
    F: FnOnce() -> R,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(payload) => {
            if is_engine_installed() {
                crate::logging::log_message(LogVerbosity::Error, &panic_message(&payload));
            }
            default
        }
    }
}

/// [`ffi_boundary`] plus engine lookup: `default` when no engine is bound.
pub fn guarded<R, F>(default: R, f: F) -> R
where
    R: Copy,
    F: FnOnce(&dyn Engine) -> R,
{
    ffi_boundary(default, || match engine() {
        Ok(engine) => f(&*engine),
        Err(_) => default,
    })
}

/// Extract a human-readable message from a panic payload.
fn panic_message(payload: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("[uflat] Rust panic: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("[uflat] Rust panic: {s}")
    } else {
        "[uflat] Rust panic (unknown payload)".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::install_engine;
    use crate::headless::HeadlessEngine;

    #[test]
    fn ffi_boundary_returns_value_on_success() {
        let result = ffi_boundary(0i32, || 42);
        assert_eq!(result, 42);
    }

    #[test]
    fn ffi_boundary_returns_default_on_panic() {
        let result = ffi_boundary(-1i32, || {
            panic!("test panic");
        });
        assert_eq!(result, -1);
    }

    #[test]
    fn guarded_without_engine_returns_default() {
        let result = std::thread::spawn(|| guarded(false, |_| true)).join().unwrap();
        assert!(!result);
    }

    #[test]
    fn panic_is_logged_when_engine_bound() {
        std::thread::spawn(|| {
            let engine = HeadlessEngine::new_rc();
            install_engine(engine.clone());
            let result = guarded(0u32, |_| -> u32 { panic!("{}", "formatted panic") });
            assert_eq!(result, 0);
            let records = engine.log_records();
            let (level, message) = records.last().unwrap();
            assert_eq!(*level, LogVerbosity::Error);
            assert_eq!(message, "[uflat] Rust panic: formatted panic");
        })
        .join()
        .unwrap();
    }
}
