// uflat-runtime: safe core behind the flat call surface.
// Dispatch, marshaling, rule translation and the callback bridge live here;
// the `uflat` crate only adapts raw boundary arguments to these functions.

pub mod api;
pub mod engine;
pub mod error;
pub mod classes;
pub mod console_value;
pub mod object_ref;
pub mod dispatch;
pub mod query;
pub mod marshal;
pub mod rules;
pub mod callback_bridge;
pub mod assets;
pub mod status;
pub mod logging;
pub mod ffi_guard;
pub mod config;
pub mod ue_math;
pub mod headless;

// Re-export the primary public API surface.
pub use api::{engine, install_engine, is_engine_installed, uninstall_engine, with_engine};
pub use engine::Engine;
pub use error::{to_code, FlatError, FlatResult};
pub use classes::NativeClass;
pub use console_value::{ConsoleValue, ConsoleValueType};
pub use object_ref::Liveness;
pub use dispatch::Family;
pub use query::Filter;
pub use callback_bridge::BoundaryCallback;
pub use status::{runtime_status, RuntimeStatus, RuntimeStatusCell};
pub use logging::{LOG_DISPLAY, LOG_ERROR, LOG_FATAL, LOG_WARNING};
pub use ffi_guard::{ffi_boundary, guarded};
pub use config::HeadlessConfig;
pub use headless::HeadlessEngine;
pub use ue_math::{Color, LinearColor, Transform};

pub use uflat_ffi::{ClassHandle, ConsoleObjectHandle, FlatErrorCode, Kind, ObjectHandle};
