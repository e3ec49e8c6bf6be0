// Object: validity, naming, asset loading and kind casts for any handle.

use std::ffi::c_char;

use uflat_ffi::{FlatErrorCode, ObjectHandle};
use uflat_runtime::object_ref::{checked, Liveness};
use uflat_runtime::{assets, dispatch, guarded};

use crate::{or_null, text, text_out};

/// True while the object is scheduled for destruction but still addressable.
#[unsafe(no_mangle)]
pub extern "C" fn uflat_object_is_pending_kill(object: ObjectHandle) -> bool {
    guarded(false, |engine| Liveness::of(engine, object) == Liveness::PendingDestruction)
}

/// True when the handle still resolves to an object, pending-kill included.
#[unsafe(no_mangle)]
pub extern "C" fn uflat_object_is_valid(object: ObjectHandle) -> bool {
    guarded(false, |engine| Liveness::of(engine, object) != Liveness::Dangling)
}

/// Load an asset of `object_type` from `path`. Null on unknown type, null
/// path or a missing asset.
///
/// # Safety
/// `path` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_object_load(object_type: i32, path: *const c_char) -> ObjectHandle {
    let path = unsafe { text(path) };
    guarded(ObjectHandle::null(), |engine| match &path {
        Some(path) => or_null(assets::load_asset(engine, object_type, path)),
        None => ObjectHandle::null(),
    })
}

/// # Safety
/// `name` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_object_rename(object: ObjectHandle, name: *const c_char) -> bool {
    let name = unsafe { text(name) };
    guarded(false, |engine| match &name {
        Some(name) => engine.rename(object, name),
        None => false,
    })
}

/// Write the object's name into `buf`. See `marshal::write_text` for the
/// truncation and size-query rules.
///
/// # Safety
/// `buf` must be null or valid for `buf_len` bytes; `out_len` null or valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_object_get_name(
    object: ObjectHandle,
    buf: *mut c_char,
    buf_len: usize,
    out_len: *mut usize,
) -> FlatErrorCode {
    unsafe { text_out(buf, buf_len, out_len, |engine| Ok(engine.object_name(checked(engine, object)?))) }
}

/// `object` when its dynamic class is the kind's class or a subclass of it,
/// null otherwise (including unknown kinds).
#[unsafe(no_mangle)]
pub extern "C" fn uflat_object_cast(object: ObjectHandle, kind: i32) -> ObjectHandle {
    guarded(ObjectHandle::null(), |engine| {
        or_null(dispatch::kind_from_raw(kind).and_then(|kind| dispatch::kind_check(engine, object, kind)))
    })
}
