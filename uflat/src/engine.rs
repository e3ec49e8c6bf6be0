// Engine: version, frame pacing, viewport, input mappings, GC and exit.

use std::ffi::c_char;

use uflat_ffi::{FlatErrorCode, Vector2};
use uflat_runtime::engine::{ActionKeyMapping, AxisKeyMapping};
use uflat_runtime::marshal::write_out;
use uflat_runtime::guarded;

use crate::{text, text_out};

/// # Safety
/// `buf` must be null or valid for `buf_len` bytes; `out_len` null or valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_engine_get_version(buf: *mut c_char, buf_len: usize, out_len: *mut usize) -> FlatErrorCode {
    unsafe { text_out(buf, buf_len, out_len, |engine| Ok(engine.engine_version())) }
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_engine_get_max_fps() -> f32 {
    guarded(0.0, |engine| engine.max_fps())
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_engine_set_max_fps(value: f32) {
    guarded((), |engine| engine.set_max_fps(value))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_engine_get_frame_number() -> u32 {
    guarded(0, |engine| engine.frame_number())
}

/// # Safety
/// `value` must be null or valid for one write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_engine_get_viewport_size(value: *mut Vector2) {
    guarded((), |engine| unsafe { write_out(value, engine.viewport_size()) })
}

/// Add an engine-defined action key mapping. Null action or key is ignored.
///
/// # Safety
/// `action` and `key` must be null or valid NUL-terminated strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_engine_add_action_mapping(
    action: *const c_char,
    key: *const c_char,
    shift: bool,
    ctrl: bool,
    alt: bool,
    cmd: bool,
) {
    let (action, key) = unsafe { (text(action), text(key)) };
    guarded((), |engine| {
        if let (Some(action), Some(key)) = (action, key) {
            engine.add_action_mapping(ActionKeyMapping { action, key, shift, ctrl, alt, cmd });
        }
    })
}

/// # Safety
/// `axis` and `key` must be null or valid NUL-terminated strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_engine_add_axis_mapping(axis: *const c_char, key: *const c_char, scale: f32) {
    let (axis, key) = unsafe { (text(axis), text(key)) };
    guarded((), |engine| {
        if let (Some(axis), Some(key)) = (axis, key) {
            engine.add_axis_mapping(AxisKeyMapping { axis, key, scale });
        }
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_engine_force_garbage_collection(full_purge: bool) {
    guarded((), |engine| engine.force_garbage_collection(full_purge))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_engine_request_exit(force: bool) {
    guarded((), |engine| engine.request_exit(force))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_engine_is_exit_requested() -> bool {
    guarded(false, |engine| engine.is_exit_requested())
}
