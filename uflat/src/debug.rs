// Debug output routed to the engine log.

use std::ffi::c_char;

use uflat_runtime::{guarded, rules, LOG_ERROR};

use crate::text;

/// Log `message` at `level`. Unknown levels and null messages are dropped.
///
/// # Safety
/// `message` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_debug_log(level: i32, message: *const c_char) {
    let message = unsafe { text(message) };
    guarded((), |engine| {
        if let (Some(level), Some(message)) = (rules::log_level(level), &message) {
            engine.log(level, message);
        }
    })
}

/// Report an exception raised on the caller's side. Logged at Error.
///
/// # Safety
/// `message` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_debug_handle_exception(message: *const c_char) {
    let message = unsafe { text(message) };
    guarded((), |engine| {
        if let Some(message) = &message {
            engine.log(LOG_ERROR, &format!("[uflat] caller exception: {message}"));
        }
    })
}
