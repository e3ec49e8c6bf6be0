// Input component: action and axis bindings, priority and input blocking.

use std::ffi::{c_char, c_void};

use uflat_ffi::{InputActionCallback, InputAxisCallback, ObjectHandle};
use uflat_runtime::callback_bridge::{self, BoundaryCallback};
use uflat_runtime::{guarded, rules};

use crate::text;

#[unsafe(no_mangle)]
pub extern "C" fn uflat_input_component_has_bindings(input: ObjectHandle) -> bool {
    guarded(false, |engine| engine.has_bindings(input))
}

/// Action bindings held by the component, superseded ones included.
#[unsafe(no_mangle)]
pub extern "C" fn uflat_input_component_get_action_bindings_number(input: ObjectHandle) -> i32 {
    guarded(0, |engine| engine.action_binding_count(input))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_input_component_clear_action_bindings(input: ObjectHandle) {
    guarded((), |engine| engine.clear_action_bindings(input))
}

/// Bind `function` to `action` for `event`. Returns false and binds nothing
/// for a null action, a null function or an unknown event.
///
/// # Safety
/// `action` must be null or a valid NUL-terminated string; `context` must
/// stay valid while the binding exists.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_input_component_bind_action(
    input: ObjectHandle,
    action: *const c_char,
    event: i32,
    execute_when_paused: bool,
    function: Option<InputActionCallback>,
    context: *mut c_void,
) -> bool {
    let action = unsafe { text(action) };
    let callback = BoundaryCallback::new(function, context);
    guarded(false, |engine| match &action {
        Some(action) => callback_bridge::bind_action(engine, input, action, event, execute_when_paused, callback).is_ok(),
        None => false,
    })
}

/// Bind `function` to `axis`; it receives the axis value each time the
/// axis is fed.
///
/// # Safety
/// `axis` must be null or a valid NUL-terminated string; `context` must stay
/// valid while the binding exists.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_input_component_bind_axis(
    input: ObjectHandle,
    axis: *const c_char,
    execute_when_paused: bool,
    function: Option<InputAxisCallback>,
    context: *mut c_void,
) -> bool {
    let axis = unsafe { text(axis) };
    let callback = BoundaryCallback::new(function, context);
    guarded(false, |engine| match &axis {
        Some(axis) => callback_bridge::bind_axis(engine, input, axis, execute_when_paused, callback).is_ok(),
        None => false,
    })
}

/// Remove every binding of `action` for `event`.
///
/// # Safety
/// `action` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_input_component_remove_action_binding(input: ObjectHandle, action: *const c_char, event: i32) {
    let action = unsafe { text(action) };
    guarded((), |engine| {
        if let (Some(action), Some(event)) = (&action, rules::input_event(event)) {
            engine.remove_action_binding(input, action, event);
        }
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_input_component_get_block_input(input: ObjectHandle) -> bool {
    guarded(false, |engine| engine.input_blocks(input))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_input_component_set_block_input(input: ObjectHandle, value: bool) {
    guarded((), |engine| engine.set_input_blocks(input, value))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_input_component_get_priority(input: ObjectHandle) -> i32 {
    guarded(0, |engine| engine.input_priority(input))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_input_component_set_priority(input: ObjectHandle, value: i32) {
    guarded((), |engine| engine.set_input_priority(input, value))
}
