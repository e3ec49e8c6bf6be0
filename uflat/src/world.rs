// World: actor lookup and world settings.

use std::ffi::c_char;

use uflat_ffi::{ObjectHandle, Vector3};
use uflat_runtime::dispatch::kind_from_raw;
use uflat_runtime::marshal::{read_in, write_out};
use uflat_runtime::query::{find_actor, Filter};
use uflat_runtime::guarded;

use crate::{or_null, text};

#[unsafe(no_mangle)]
pub extern "C" fn uflat_world_get_simulate_physics() -> bool {
    guarded(false, |engine| engine.simulate_physics())
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_world_set_simulate_physics(value: bool) {
    guarded((), |engine| engine.set_simulate_physics(value))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_world_set_gravity(gravity_z: f32) {
    guarded((), |engine| engine.set_gravity(gravity_z))
}

/// Live actors in the world.
#[unsafe(no_mangle)]
pub extern "C" fn uflat_world_get_actor_count() -> i32 {
    guarded(0, |engine| engine.actor_count())
}

/// # Safety
/// `value` must be null or valid for one write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_world_get_world_origin(value: *mut Vector3) {
    guarded((), |engine| unsafe { write_out(value, engine.world_origin()) })
}

/// # Safety
/// `value` must be null or valid for one read.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_world_set_world_origin(value: *const Vector3) {
    let origin = unsafe { read_in(value) };
    guarded((), |engine| {
        if let Some(origin) = origin {
            engine.set_world_origin(origin);
        }
    })
}

/// First live actor of `kind` named `name`. A null name matches by kind
/// alone.
///
/// # Safety
/// `name` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_world_get_actor(name: *const c_char, kind: i32) -> ObjectHandle {
    let name = unsafe { text(name) };
    guarded(ObjectHandle::null(), |engine| {
        or_null(kind_from_raw(kind).and_then(|kind| find_actor(engine, kind, Filter::by_name(name.as_deref()))))
    })
}

/// First live actor of `kind` carrying `tag`. A null tag finds nothing.
///
/// # Safety
/// `tag` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_world_get_actor_by_tag(tag: *const c_char, kind: i32) -> ObjectHandle {
    let tag = unsafe { text(tag) };
    guarded(ObjectHandle::null(), |engine| match &tag {
        Some(tag) => or_null(kind_from_raw(kind).and_then(|kind| find_actor(engine, kind, Filter::Tag(tag)))),
        None => ObjectHandle::null(),
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_world_get_first_player_controller() -> ObjectHandle {
    guarded(ObjectHandle::null(), |engine| engine.first_player_controller())
}
