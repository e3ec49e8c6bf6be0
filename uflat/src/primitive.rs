// Primitive, shape and box components.

use std::ffi::c_char;

use uflat_ffi::{Color, ObjectHandle, Vector3};
use uflat_runtime::marshal::{read_in, write_out};
use uflat_runtime::{guarded, rules};

use crate::text;

/// Apply a force, optionally to a single bone. A null force does nothing.
///
/// # Safety
/// `force` must be null or valid for one read; `bone` must be null or a
/// valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_primitive_component_add_force(
    component: ObjectHandle,
    force: *const Vector3,
    bone: *const c_char,
    acceleration_change: bool,
) {
    let (force, bone) = unsafe { (read_in(force), text(bone)) };
    guarded((), |engine| {
        if let Some(force) = force {
            engine.add_force(component, force, bone.as_deref(), acceleration_change);
        }
    })
}

/// Unknown falloff values are constant.
///
/// # Safety
/// `origin` must be null or valid for one read.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_primitive_component_add_radial_force(
    component: ObjectHandle,
    origin: *const Vector3,
    radius: f32,
    strength: f32,
    falloff: i32,
    acceleration_change: bool,
) {
    let origin = unsafe { read_in(origin) };
    guarded((), |engine| {
        if let Some(origin) = origin {
            engine.add_radial_force(component, origin, radius, strength, rules::falloff(falloff), acceleration_change);
        }
    })
}

/// # Safety
/// `origin` must be null or valid for one read.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_primitive_component_add_radial_impulse(
    component: ObjectHandle,
    origin: *const Vector3,
    radius: f32,
    strength: f32,
    falloff: i32,
    velocity_change: bool,
) {
    let origin = unsafe { read_in(origin) };
    guarded((), |engine| {
        if let Some(origin) = origin {
            engine.add_radial_impulse(component, origin, radius, strength, rules::falloff(falloff), velocity_change);
        }
    })
}

// ---------------------------------------------------------------------------
// Shape
// ---------------------------------------------------------------------------

/// Shape color packed as `0xAARRGGBB`.
#[unsafe(no_mangle)]
pub extern "C" fn uflat_shape_component_get_shape_color(component: ObjectHandle) -> i32 {
    guarded(0, |engine| engine.shape_color(component).to_packed_argb())
}

/// # Safety
/// `value` must be null or valid for one read.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_shape_component_set_shape_color(component: ObjectHandle, value: *const Color) {
    let color = unsafe { read_in(value) };
    guarded((), |engine| {
        if let Some(color) = color {
            engine.set_shape_color(component, color);
        }
    })
}

// ---------------------------------------------------------------------------
// Box
// ---------------------------------------------------------------------------

/// Box extent multiplied by the component's world scale.
///
/// # Safety
/// `value` must be null or valid for one write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_box_component_get_scaled_box_extent(component: ObjectHandle, value: *mut Vector3) {
    guarded((), |engine| unsafe { write_out(value, engine.box_extent(component, true)) })
}

/// # Safety
/// `value` must be null or valid for one write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_box_component_get_unscaled_box_extent(component: ObjectHandle, value: *mut Vector3) {
    guarded((), |engine| unsafe { write_out(value, engine.box_extent(component, false)) })
}

/// # Safety
/// `extent` must be null or valid for one read.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_box_component_set_box_extent(
    component: ObjectHandle,
    extent: *const Vector3,
    update_overlaps: bool,
) {
    let extent = unsafe { read_in(extent) };
    guarded((), |engine| {
        if let Some(extent) = extent {
            engine.set_box_extent(component, extent, update_overlaps);
        }
    })
}
