// uflat-ffi: #[repr(C)] types, handle types, boundary enums and callbacks.
// Zero external dependencies. This crate defines the complete contract with
// the external caller.

pub mod handles;
pub mod values;
pub mod enums;
pub mod kinds;
pub mod error;
pub mod callbacks;

pub use handles::*;
pub use values::*;
pub use enums::*;
pub use kinds::*;
pub use error::*;
pub use callbacks::*;
