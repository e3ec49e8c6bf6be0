// Callback bridge: boundary function references become native delegates
// registered with the engine's input, console-variable and command systems.
//
// Delegates call the boundary function synchronously on the thread the
// engine invokes them from. Ordering among bindings is the engine's.

use std::ffi::c_void;

use uflat_ffi::{
    ConsoleCommandCallback, ConsoleObjectHandle, ConsoleVariableCallback, InputActionCallback, InputAxisCallback,
    ObjectHandle,
};

use crate::engine::{ActionBinding, AxisBinding, AxisDelegate, CommandDelegate, Engine, NativeDelegate};
use crate::error::{FlatError, FlatResult};
use crate::rules;
use crate::status::RuntimeStatusCell;

/// A boundary callback slot: either nothing, or a function plus the opaque
/// caller context it is invoked with.
#[derive(Clone, Copy, Debug)]
pub enum BoundaryCallback<F> {
    Unbound,
    Bound { function: F, context: *mut c_void },
}

impl<F: Copy> BoundaryCallback<F> {
    /// A null function pointer is `Unbound`.
    pub fn new(function: Option<F>, context: *mut c_void) -> Self {
        match function {
            Some(function) => BoundaryCallback::Bound { function, context },
            None => BoundaryCallback::Unbound,
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, BoundaryCallback::Bound { .. })
    }

    fn into_parts(self) -> FlatResult<(F, *mut c_void)> {
        match self {
            BoundaryCallback::Bound { function, context } => Ok((function, context)),
            BoundaryCallback::Unbound => Err(FlatError::NullArgument),
        }
    }
}

// ---------------------------------------------------------------------------
// Delegate construction
// ---------------------------------------------------------------------------

pub fn action_delegate(function: InputActionCallback, context: *mut c_void) -> NativeDelegate {
    // SAFETY: the caller keeps `context` valid while the binding exists.
    Box::new(move || unsafe { function(context) })
}

pub fn axis_delegate(function: InputAxisCallback, context: *mut c_void) -> AxisDelegate {
    Box::new(move |value| unsafe { function(context, value) })
}

pub fn variable_delegate(function: ConsoleVariableCallback, context: *mut c_void) -> NativeDelegate {
    Box::new(move || unsafe { function(context) })
}

/// Command delegate: forwards the first argument as a float, but only while
/// `status` reads Running. Otherwise the call is dropped.
pub fn command_delegate(
    function: ConsoleCommandCallback,
    context: *mut c_void,
    status: &'static RuntimeStatusCell,
) -> CommandDelegate {
    Box::new(move |args: &[String]| {
        if status.is_running() {
            let value = parse_command_argument(args);
            unsafe { function(context, value) }
        }
    })
}

/// First argument as a finite float; 0.0 when absent or unparsable.
pub fn parse_command_argument(args: &[String]) -> f32 {
    args.first()
        .and_then(|arg| arg.trim().parse::<f32>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Bind an input action. An unknown event value creates no binding.
pub fn bind_action(
    engine: &dyn Engine,
    input: ObjectHandle,
    action: &str,
    raw_event: i32,
    execute_when_paused: bool,
    callback: BoundaryCallback<InputActionCallback>,
) -> FlatResult<()> {
    let event = rules::input_event(raw_event)
        .ok_or_else(|| FlatError::InvalidOperation(format!("unknown input event {raw_event}")))?;
    let (function, context) = callback.into_parts()?;
    engine.add_action_binding(
        input,
        ActionBinding {
            action: action.to_string(),
            event,
            execute_when_paused,
            delegate: action_delegate(function, context),
        },
    );
    Ok(())
}

pub fn bind_axis(
    engine: &dyn Engine,
    input: ObjectHandle,
    axis: &str,
    execute_when_paused: bool,
    callback: BoundaryCallback<InputAxisCallback>,
) -> FlatResult<()> {
    let (function, context) = callback.into_parts()?;
    engine.add_axis_binding(
        input,
        AxisBinding {
            axis: axis.to_string(),
            execute_when_paused,
            delegate: axis_delegate(function, context),
        },
    );
    Ok(())
}

/// Replace the variable's on-changed callback. `Unbound` clears it.
pub fn set_variable_callback(
    engine: &dyn Engine,
    variable: ConsoleObjectHandle,
    callback: BoundaryCallback<ConsoleVariableCallback>,
) {
    let delegate = match callback {
        BoundaryCallback::Bound { function, context } => Some(variable_delegate(function, context)),
        BoundaryCallback::Unbound => None,
    };
    engine.set_console_variable_delegate(variable, delegate);
}

pub fn register_command(
    engine: &dyn Engine,
    name: &str,
    help: &str,
    read_only: bool,
    callback: BoundaryCallback<ConsoleCommandCallback>,
    status: &'static RuntimeStatusCell,
) -> FlatResult<ConsoleObjectHandle> {
    let (function, context) = callback.into_parts()?;
    let handle = engine.register_console_command(name, help, command_delegate(function, context, status), read_only);
    if handle.is_null() {
        Err(FlatError::InvalidOperation(format!("console command {name} not registered")))
    } else {
        Ok(handle)
    }
}
