// Application and command line.

use std::ffi::c_char;

use uflat_ffi::FlatErrorCode;
use uflat_runtime::guarded;

use crate::{text, text_out};

/// # Safety
/// `buf` must be null or valid for `buf_len` bytes; `out_len` null or valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_application_get_project_name(
    buf: *mut c_char,
    buf_len: usize,
    out_len: *mut usize,
) -> FlatErrorCode {
    unsafe { text_out(buf, buf_len, out_len, |engine| Ok(engine.project_name())) }
}

/// # Safety
/// `name` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_application_set_project_name(name: *const c_char) {
    let name = unsafe { text(name) };
    guarded((), |engine| {
        if let Some(name) = &name {
            engine.set_project_name(name);
        }
    })
}

/// # Safety
/// `buf` must be null or valid for `buf_len` bytes; `out_len` null or valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_application_get_project_directory(
    buf: *mut c_char,
    buf_len: usize,
    out_len: *mut usize,
) -> FlatErrorCode {
    unsafe { text_out(buf, buf_len, out_len, |engine| Ok(engine.project_dir())) }
}

/// # Safety
/// `buf` must be null or valid for `buf_len` bytes; `out_len` null or valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_application_get_default_language(
    buf: *mut c_char,
    buf_len: usize,
    out_len: *mut usize,
) -> FlatErrorCode {
    unsafe { text_out(buf, buf_len, out_len, |engine| Ok(engine.default_language())) }
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_application_get_volume_multiplier() -> f32 {
    guarded(0.0, |engine| engine.volume_multiplier())
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_application_set_volume_multiplier(value: f32) {
    guarded((), |engine| engine.set_volume_multiplier(value))
}

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// # Safety
/// `buf` must be null or valid for `buf_len` bytes; `out_len` null or valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_command_line_get(buf: *mut c_char, buf_len: usize, out_len: *mut usize) -> FlatErrorCode {
    unsafe { text_out(buf, buf_len, out_len, |engine| Ok(engine.command_line())) }
}

/// Replace the command line. Null clears it.
///
/// # Safety
/// `arguments` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_command_line_set(arguments: *const c_char) {
    let arguments = unsafe { text(arguments) }.unwrap_or_default();
    guarded((), |engine| engine.set_command_line(&arguments))
}

/// # Safety
/// `arguments` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_command_line_append(arguments: *const c_char) {
    let arguments = unsafe { text(arguments) };
    guarded((), |engine| {
        if let Some(arguments) = &arguments {
            engine.append_command_line(arguments);
        }
    })
}
