use std::ffi::c_void;

/// Opaque handle to a native object (actor, component, asset, controller).
/// The native side owns the object; the caller only holds a non-owning alias.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ObjectHandle(pub *mut c_void);

/// Opaque handle to a native class descriptor.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ClassHandle(pub *mut c_void);

/// Opaque handle to a console object (variable or command).
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ConsoleObjectHandle(pub *mut c_void);

macro_rules! impl_handle {
    ($($name:ident),+ $(,)?) => {$(
        impl $name {
            #[inline]
            pub const fn null() -> Self {
                $name(std::ptr::null_mut())
            }

            #[inline]
            pub fn is_null(&self) -> bool {
                self.0.is_null()
            }

            /// Build a handle from a raw address. Address 0 is the null handle.
            #[inline]
            pub fn from_addr(addr: usize) -> Self {
                $name(std::ptr::without_provenance_mut(addr))
            }

            #[inline]
            pub fn to_addr(&self) -> usize {
                self.0.addr()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::null()
            }
        }

        // Handles are raw identifiers. They can be sent across threads
        // (but must only be *used* on the engine thread).
        unsafe impl Send for $name {}
        unsafe impl Sync for $name {}
    )+};
}

impl_handle!(ObjectHandle, ClassHandle, ConsoleObjectHandle);
