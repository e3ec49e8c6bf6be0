use std::ffi::c_void;

// Boundary function references. Each carries the caller's opaque `context`
// pointer back on every invocation; the bridge never dereferences it.
//
// Entry points accept these as `Option<...>` so a null function pointer is a
// representable "no callback" value rather than undefined behavior.

/// Input action fired (pressed, released, ...).
pub type InputActionCallback = unsafe extern "C" fn(context: *mut c_void);

/// Input axis sampled. `value` is the axis scalar for this frame.
pub type InputAxisCallback = unsafe extern "C" fn(context: *mut c_void, value: f32);

/// Console variable changed.
pub type ConsoleVariableCallback = unsafe extern "C" fn(context: *mut c_void);

/// Console command executed. `value` is the first argument parsed as a float
/// (0.0 when absent or unparsable).
pub type ConsoleCommandCallback = unsafe extern "C" fn(context: *mut c_void, value: f32);
