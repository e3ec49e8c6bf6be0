// Value marshaling between boundary plain data and native representations.
//
// Text comes in as nullable NUL-terminated bytes and goes out into caller
// buffers with an explicit capacity. Geometric values are field-order copies.

use std::borrow::Cow;
use std::ffi::{c_char, CStr};

use glam::{Quat, Vec2, Vec3};
use uflat_ffi as ffi;
use uflat_ffi::FlatErrorCode;

use crate::ue_math::{Color, LinearColor, Transform};

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Read a nullable C string. Null is `None`; invalid UTF-8 is replaced.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated byte sequence that stays
/// valid for `'a`.
pub unsafe fn read_str<'a>(ptr: *const c_char) -> Option<Cow<'a, str>> {
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy())
    }
}

/// Longest prefix of `text` that fits in `max` bytes without splitting a
/// character.
pub fn truncate_at_char_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Write `text` into a caller buffer of `buf_len` bytes.
///
/// At most `buf_len - 1` bytes are copied, cut at a character boundary, and
/// the buffer is always NUL-terminated when `buf_len > 0`. The full length
/// (without terminator) is stored through `out_len` when it is non-null.
/// Returns `BufferTooSmall` when the text was truncated or the buffer is null
/// or empty (a size query).
///
/// # Safety
/// `buf` must be null or valid for `buf_len` byte writes; `out_len` must be
/// null or valid for one write.
pub unsafe fn write_text(text: &str, buf: *mut c_char, buf_len: usize, out_len: *mut usize) -> FlatErrorCode {
    if !out_len.is_null() {
        unsafe { *out_len = text.len() };
    }
    // Size query: no room even for the terminator.
    if buf.is_null() || buf_len == 0 {
        return FlatErrorCode::BufferTooSmall;
    }

    let fitted = truncate_at_char_boundary(text, buf_len - 1);
    // SAFETY: fitted.len() + 1 <= buf_len, and the caller guarantees buf_len writable bytes.
    unsafe {
        std::ptr::copy_nonoverlapping(fitted.as_ptr(), buf.cast::<u8>(), fitted.len());
        *buf.add(fitted.len()) = 0;
    }
    if fitted.len() == text.len() {
        FlatErrorCode::Ok
    } else {
        FlatErrorCode::BufferTooSmall
    }
}

// ---------------------------------------------------------------------------
// Geometric values
// ---------------------------------------------------------------------------

/// A boundary value type with a native counterpart.
pub trait BoundaryValue: Copy {
    type Native;

    fn to_native(self) -> Self::Native;
    fn from_native(native: Self::Native) -> Self;
}

impl BoundaryValue for ffi::Vector2 {
    type Native = Vec2;

    fn to_native(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    fn from_native(v: Vec2) -> Self {
        ffi::Vector2 { x: v.x, y: v.y }
    }
}

impl BoundaryValue for ffi::Vector3 {
    type Native = Vec3;

    fn to_native(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    fn from_native(v: Vec3) -> Self {
        ffi::Vector3 { x: v.x, y: v.y, z: v.z }
    }
}

impl BoundaryValue for ffi::Quaternion {
    type Native = Quat;

    fn to_native(self) -> Quat {
        Quat::from_xyzw(self.x, self.y, self.z, self.w)
    }

    fn from_native(q: Quat) -> Self {
        ffi::Quaternion { x: q.x, y: q.y, z: q.z, w: q.w }
    }
}

impl BoundaryValue for ffi::Transform {
    type Native = Transform;

    fn to_native(self) -> Transform {
        Transform::new(self.rotation.to_native(), self.location.to_native(), self.scale.to_native())
    }

    fn from_native(t: Transform) -> Self {
        ffi::Transform {
            location: ffi::Vector3::from_native(t.translation),
            rotation: ffi::Quaternion::from_native(t.rotation),
            scale: ffi::Vector3::from_native(t.scale),
        }
    }
}

impl BoundaryValue for ffi::Color {
    type Native = Color;

    fn to_native(self) -> Color {
        Color::new(self.r, self.g, self.b, self.a)
    }

    fn from_native(c: Color) -> Self {
        ffi::Color { b: c.b, g: c.g, r: c.r, a: c.a }
    }
}

impl BoundaryValue for ffi::LinearColor {
    type Native = LinearColor;

    fn to_native(self) -> LinearColor {
        LinearColor::new(self.r, self.g, self.b, self.a)
    }

    fn from_native(c: LinearColor) -> Self {
        ffi::LinearColor { r: c.r, g: c.g, b: c.b, a: c.a }
    }
}

/// Read a nullable in-parameter.
///
/// # Safety
/// `ptr` must be null or valid for one read of `T`.
pub unsafe fn read_in<T: BoundaryValue>(ptr: *const T) -> Option<T::Native> {
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { *ptr }.to_native())
    }
}

/// Write a nullable out-parameter. A null pointer skips the write.
///
/// # Safety
/// `ptr` must be null or valid for one write of `T`.
pub unsafe fn write_out<T: BoundaryValue>(ptr: *mut T, value: T::Native) {
    if !ptr.is_null() {
        unsafe { *ptr = T::from_native(value) };
    }
}

/// Write a plain scalar out-parameter. A null pointer skips the write.
///
/// # Safety
/// `ptr` must be null or valid for one write of `T`.
pub unsafe fn write_scalar<T: Copy>(ptr: *mut T, value: T) {
    if !ptr.is_null() {
        unsafe { *ptr = value };
    }
}
