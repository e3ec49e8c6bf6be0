// uflat: the flat extern "C" call surface. Entry points are grouped by the
// receiver kind they act on; each adapts raw boundary arguments and forwards
// into uflat-runtime.
//
// Every body runs inside `ffi_boundary` / `guarded`, so a panic or a missing
// engine degrades to the entry point's default (null, false, zero).

use std::ffi::c_char;
use std::path::Path;
use std::rc::Rc;

pub use uflat_ffi as ffi;
pub use uflat_runtime as runtime;

use runtime::status::{runtime_status, RuntimeStatus};
use runtime::{
    ffi_boundary, ulog, Engine, FlatErrorCode, FlatResult, HeadlessConfig, HeadlessEngine, ObjectHandle, LOG_DISPLAY,
    LOG_ERROR,
};

pub mod object;
pub mod application;
pub mod engine;
pub mod debug;
pub mod world;
pub mod actor;
pub mod controller;
pub mod console;
pub mod input;
pub mod component;
pub mod primitive;

#[cfg(test)]
mod test_integration;

// ---------------------------------------------------------------------------
// Shared adapters
// ---------------------------------------------------------------------------

/// Collapse a handle result to the boundary's null-on-failure convention.
pub(crate) fn or_null(result: FlatResult<ObjectHandle>) -> ObjectHandle {
    result.unwrap_or(ObjectHandle::null())
}

/// Read a nullable boundary string into an owned value.
///
/// # Safety
/// `ptr` must be null or a valid NUL-terminated string.
pub(crate) unsafe fn text(ptr: *const c_char) -> Option<String> {
    unsafe { runtime::marshal::read_str(ptr) }.map(|s| s.into_owned())
}

/// Run a text-producing query and write its result into a caller buffer.
/// Failures are reported as codes; the buffer is left untouched then.
///
/// # Safety
/// `buf` must be null or valid for `buf_len` byte writes; `out_len` must be
/// null or valid for one write.
pub(crate) unsafe fn text_out<F>(buf: *mut c_char, buf_len: usize, out_len: *mut usize, f: F) -> FlatErrorCode
where
    F: FnOnce(&dyn Engine) -> FlatResult<String>,
{
    ffi_boundary(FlatErrorCode::InternalError, || {
        let result = runtime::engine().and_then(|engine| f(&*engine));
        match result {
            Ok(value) => unsafe { runtime::marshal::write_text(&value, buf, buf_len, out_len) },
            Err(e) => e.code(),
        }
    })
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

/// Mark the runtime as running. Callbacks registered through the console
/// surface are delivered only while it is. Returns false when the runtime is
/// already running or mid-shutdown.
#[unsafe(no_mangle)]
pub extern "C" fn uflat_initialize() -> bool {
    ffi_boundary(false, || match runtime_status().transition(RuntimeStatus::Running) {
        Ok(previous) => {
            ulog!(LOG_DISPLAY, "[uflat] runtime running (was {previous:?})");
            true
        }
        Err(_) => false,
    })
}

/// Stop callback delivery and unbind this thread's engine.
#[unsafe(no_mangle)]
pub extern "C" fn uflat_shutdown() {
    ffi_boundary((), || {
        if runtime_status().transition(RuntimeStatus::ShuttingDown).is_err() {
            return;
        }
        ulog!(LOG_DISPLAY, "[uflat] runtime shutting down");
        runtime::uninstall_engine();
        let _ = runtime_status().transition(RuntimeStatus::Terminated);
    })
}

/// Current lifecycle state: 0 uninitialized, 1 running, 2 shutting down,
/// 3 terminated.
#[unsafe(no_mangle)]
pub extern "C" fn uflat_runtime_status() -> u8 {
    runtime_status().get() as u8
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_kind_table_version() -> u32 {
    ffi::KIND_TABLE_VERSION
}

/// Bind a headless engine to the calling thread. A null path uses the
/// default configuration; otherwise the TOML file at `config_path` is loaded.
/// On failure nothing is installed and the error goes to the engine already
/// bound to this thread, if any.
///
/// # Safety
/// `config_path` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_install_headless(config_path: *const c_char) -> bool {
    let path = unsafe { text(config_path) };
    ffi_boundary(false, || match build_headless(path.as_deref()) {
        Ok(engine) => {
            runtime::install_engine(Rc::new(engine));
            true
        }
        Err(e) => {
            ulog!(LOG_ERROR, "[uflat] headless engine not installed: {e}");
            false
        }
    })
}

fn build_headless(path: Option<&str>) -> FlatResult<HeadlessEngine> {
    let config = match path {
        Some(path) => HeadlessConfig::load(Path::new(path))?,
        None => HeadlessConfig::default(),
    };
    HeadlessEngine::from_config(&config)
}
