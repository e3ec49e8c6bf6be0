// Console manager, console objects and console variables.
//
// Variables keep the type they were registered with; typed setters convert
// the value to it (bool/int/float/string, native conversion rules).

use std::ffi::{c_char, c_void};

use uflat_ffi::{ConsoleCommandCallback, ConsoleObjectHandle, ConsoleVariableCallback, FlatErrorCode};
use uflat_runtime::callback_bridge::{self, BoundaryCallback};
use uflat_runtime::console_value::{ConsoleValue, ConsoleValueType};
use uflat_runtime::error::FlatError;
use uflat_runtime::status::runtime_status;
use uflat_runtime::{guarded, Engine};

use crate::{text, text_out};

// ---------------------------------------------------------------------------
// Console manager
// ---------------------------------------------------------------------------

/// # Safety
/// `name` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_console_manager_is_registered_variable(name: *const c_char) -> bool {
    let name = unsafe { text(name) };
    guarded(false, |engine| name.as_deref().is_some_and(|name| engine.is_console_name_registered(name)))
}

/// # Safety
/// `name` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_console_manager_find_variable(name: *const c_char) -> ConsoleObjectHandle {
    let name = unsafe { text(name) };
    guarded(ConsoleObjectHandle::null(), |engine| match &name {
        Some(name) => engine.find_console_variable(name),
        None => ConsoleObjectHandle::null(),
    })
}

/// Shared body of the typed registration entry points. A null name or a
/// name already taken yields the null handle.
unsafe fn register_variable(
    name: *const c_char,
    help: *const c_char,
    default: ConsoleValue,
    read_only: bool,
) -> ConsoleObjectHandle {
    let (name, help) = unsafe { (text(name), text(help).unwrap_or_default()) };
    guarded(ConsoleObjectHandle::null(), |engine| match &name {
        Some(name) => engine.register_console_variable(name, &help, default, read_only),
        None => ConsoleObjectHandle::null(),
    })
}

/// # Safety
/// `name` and `help` must be null or valid NUL-terminated strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_console_manager_register_variable_bool(
    name: *const c_char,
    help: *const c_char,
    default_value: bool,
    read_only: bool,
) -> ConsoleObjectHandle {
    unsafe { register_variable(name, help, ConsoleValue::Bool(default_value), read_only) }
}

/// # Safety
/// `name` and `help` must be null or valid NUL-terminated strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_console_manager_register_variable_int(
    name: *const c_char,
    help: *const c_char,
    default_value: i32,
    read_only: bool,
) -> ConsoleObjectHandle {
    unsafe { register_variable(name, help, ConsoleValue::Int(default_value), read_only) }
}

/// # Safety
/// `name` and `help` must be null or valid NUL-terminated strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_console_manager_register_variable_float(
    name: *const c_char,
    help: *const c_char,
    default_value: f32,
    read_only: bool,
) -> ConsoleObjectHandle {
    unsafe { register_variable(name, help, ConsoleValue::Float(default_value), read_only) }
}

/// A null default registers the empty string.
///
/// # Safety
/// `name`, `help` and `default_value` must be null or valid NUL-terminated
/// strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_console_manager_register_variable_string(
    name: *const c_char,
    help: *const c_char,
    default_value: *const c_char,
    read_only: bool,
) -> ConsoleObjectHandle {
    let default_value = unsafe { text(default_value) }.unwrap_or_default();
    unsafe { register_variable(name, help, ConsoleValue::String(default_value), read_only) }
}

/// Register a console command. When run, `function` receives `context` and
/// the first argument as a float, but only while the runtime is running.
/// Returns the null handle when the name is taken or `function` is null.
///
/// # Safety
/// `name` and `help` must be null or valid NUL-terminated strings; `context`
/// must stay valid until the command is unregistered.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_console_manager_register_command(
    name: *const c_char,
    help: *const c_char,
    function: Option<ConsoleCommandCallback>,
    context: *mut c_void,
    read_only: bool,
) -> ConsoleObjectHandle {
    let (name, help) = unsafe { (text(name), text(help).unwrap_or_default()) };
    let callback = BoundaryCallback::new(function, context);
    guarded(ConsoleObjectHandle::null(), |engine| {
        name.ok_or(FlatError::NullArgument)
            .and_then(|name| {
                callback_bridge::register_command(engine, &name, &help, read_only, callback, runtime_status())
            })
            .unwrap_or(ConsoleObjectHandle::null())
    })
}

/// # Safety
/// `name` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_console_manager_unregister_object(name: *const c_char) {
    let name = unsafe { text(name) };
    guarded((), |engine| {
        if let Some(name) = &name {
            engine.unregister_console_object(name);
        }
    })
}

// ---------------------------------------------------------------------------
// Console object type predicates
// ---------------------------------------------------------------------------

fn is_type(engine: &dyn Engine, object: ConsoleObjectHandle, ty: ConsoleValueType) -> bool {
    engine.console_variable_value(object).is_some_and(|value| value.value_type() == ty)
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_console_object_is_bool(object: ConsoleObjectHandle) -> bool {
    guarded(false, |engine| is_type(engine, object, ConsoleValueType::Bool))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_console_object_is_int(object: ConsoleObjectHandle) -> bool {
    guarded(false, |engine| is_type(engine, object, ConsoleValueType::Int))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_console_object_is_float(object: ConsoleObjectHandle) -> bool {
    guarded(false, |engine| is_type(engine, object, ConsoleValueType::Float))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_console_object_is_string(object: ConsoleObjectHandle) -> bool {
    guarded(false, |engine| is_type(engine, object, ConsoleValueType::String))
}

// ---------------------------------------------------------------------------
// Console variable
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "C" fn uflat_console_variable_get_bool(variable: ConsoleObjectHandle) -> bool {
    guarded(false, |engine| engine.console_variable_value(variable).is_some_and(|v| v.as_bool()))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_console_variable_get_int(variable: ConsoleObjectHandle) -> i32 {
    guarded(0, |engine| engine.console_variable_value(variable).map_or(0, |v| v.as_int()))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_console_variable_get_float(variable: ConsoleObjectHandle) -> f32 {
    guarded(0.0, |engine| engine.console_variable_value(variable).map_or(0.0, |v| v.as_float()))
}

/// # Safety
/// `buf` must be null or valid for `buf_len` bytes; `out_len` null or valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_console_variable_get_string(
    variable: ConsoleObjectHandle,
    buf: *mut c_char,
    buf_len: usize,
    out_len: *mut usize,
) -> FlatErrorCode {
    unsafe {
        text_out(buf, buf_len, out_len, |engine| {
            engine
                .console_variable_value(variable)
                .map(|value| value.to_string())
                .ok_or_else(|| FlatError::NotFound("console variable".into()))
        })
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_console_variable_set_bool(variable: ConsoleObjectHandle, value: bool) {
    guarded((), |engine| engine.set_console_variable(variable, ConsoleValue::Bool(value)))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_console_variable_set_int(variable: ConsoleObjectHandle, value: i32) {
    guarded((), |engine| engine.set_console_variable(variable, ConsoleValue::Int(value)))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_console_variable_set_float(variable: ConsoleObjectHandle, value: f32) {
    guarded((), |engine| engine.set_console_variable(variable, ConsoleValue::Float(value)))
}

/// # Safety
/// `value` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_console_variable_set_string(variable: ConsoleObjectHandle, value: *const c_char) {
    let value = unsafe { text(value) };
    guarded((), |engine| {
        if let Some(value) = value {
            engine.set_console_variable(variable, ConsoleValue::String(value));
        }
    })
}

/// Replace the variable's on-changed callback. A null `function` clears it.
///
/// # Safety
/// `context` must stay valid while the callback is installed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_console_variable_set_on_changed_callback(
    variable: ConsoleObjectHandle,
    function: Option<ConsoleVariableCallback>,
    context: *mut c_void,
) {
    let callback = BoundaryCallback::new(function, context);
    guarded((), |engine| callback_bridge::set_variable_callback(engine, variable, callback))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_console_variable_clear_on_changed_callback(variable: ConsoleObjectHandle) {
    guarded((), |engine| callback_bridge::set_variable_callback(engine, variable, BoundaryCallback::Unbound))
}
