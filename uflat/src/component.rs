// Actor components and scene components.

use std::ffi::c_char;

use uflat_ffi::{ComponentMobility, ObjectHandle, Quaternion, Transform as BoundaryTransform, Vector3};
use uflat_runtime::dispatch::{self, kind_from_raw};
use uflat_runtime::engine::{Engine, Space};
use uflat_runtime::marshal::{read_in, write_out};
use uflat_runtime::query;
use uflat_runtime::ue_math::Transform;
use uflat_runtime::{assets, guarded, rules};

use crate::{or_null, text};

// ---------------------------------------------------------------------------
// Actor component
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "C" fn uflat_actor_component_get_owner(component: ObjectHandle) -> ObjectHandle {
    guarded(ObjectHandle::null(), |engine| engine.component_owner(component))
}

/// Destroy the component. With `promote_children`, its attached children
/// move up to its parent instead of going with it.
#[unsafe(no_mangle)]
pub extern "C" fn uflat_actor_component_destroy(component: ObjectHandle, promote_children: bool) {
    guarded((), |engine| engine.destroy_component(component, promote_children))
}

/// # Safety
/// `tag` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_actor_component_add_tag(component: ObjectHandle, tag: *const c_char) {
    let tag = unsafe { text(tag) };
    guarded((), |engine| {
        if let Some(tag) = &tag {
            engine.add_component_tag(component, tag);
        }
    })
}

/// # Safety
/// `tag` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_actor_component_remove_tag(component: ObjectHandle, tag: *const c_char) {
    let tag = unsafe { text(tag) };
    guarded((), |engine| {
        if let Some(tag) = &tag {
            engine.remove_component_tag(component, tag);
        }
    })
}

/// # Safety
/// `tag` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_actor_component_has_tag(component: ObjectHandle, tag: *const c_char) -> bool {
    let tag = unsafe { text(tag) };
    guarded(false, |engine| tag.as_deref().is_some_and(|tag| engine.component_has_tag(component, tag)))
}

// ---------------------------------------------------------------------------
// Scene component: creation and attachment
// ---------------------------------------------------------------------------

/// Create a scene component of an attachable `kind` on `actor`.
///
/// It becomes the root when the actor has none or `set_as_root` is set, and
/// is otherwise attached to the current root keeping its relative
/// transform. `blueprint` is an optional class override.
///
/// # Safety
/// `name` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_scene_component_create(
    actor: ObjectHandle,
    kind: i32,
    name: *const c_char,
    set_as_root: bool,
    blueprint: ObjectHandle,
) -> ObjectHandle {
    let name = unsafe { text(name) };
    guarded(ObjectHandle::null(), |engine| {
        or_null(kind_from_raw(kind).and_then(|kind| {
            let class_override = assets::override_class(engine, blueprint)?;
            dispatch::create_scene_component(engine, actor, kind, class_override, set_as_root, name.as_deref())
        }))
    })
}

/// # Safety
/// `socket` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_scene_component_attach_to_component(
    component: ObjectHandle,
    parent: ObjectHandle,
    attachment_rule: i32,
    socket: *const c_char,
) -> bool {
    let socket = unsafe { text(socket) };
    guarded(false, |engine| {
        engine.attach_component(component, parent, rules::attachment_rules(attachment_rule), socket.as_deref())
    })
}

/// Is `other` an ancestor of `component` in the attachment hierarchy?
#[unsafe(no_mangle)]
pub extern "C" fn uflat_scene_component_is_attached_to_component(component: ObjectHandle, other: ObjectHandle) -> bool {
    guarded(false, |engine| {
        if other.is_null() {
            return false;
        }
        let mut current = engine.attach_parent(component);
        while !current.is_null() {
            if current == other {
                return true;
            }
            current = engine.attach_parent(current);
        }
        false
    })
}

/// Does `component`, or any component it is attached under, belong to
/// `actor`?
#[unsafe(no_mangle)]
pub extern "C" fn uflat_scene_component_is_attached_to_actor(component: ObjectHandle, actor: ObjectHandle) -> bool {
    guarded(false, |engine| {
        let mut current = component;
        while !current.is_null() {
            if engine.component_owner(current) == actor {
                return true;
            }
            current = engine.attach_parent(current);
        }
        false
    })
}

/// First owner of `kind` found walking up from the component's parent.
#[unsafe(no_mangle)]
pub extern "C" fn uflat_scene_component_get_attached_actor(component: ObjectHandle, kind: i32) -> ObjectHandle {
    guarded(ObjectHandle::null(), |engine| {
        or_null(kind_from_raw(kind).and_then(|kind| query::attached_actor_of_kind(engine, component, kind)))
    })
}

/// Recompute the world transform. Unknown teleport types do not teleport.
#[unsafe(no_mangle)]
pub extern "C" fn uflat_scene_component_update_to_world(component: ObjectHandle, teleport_type: i32) {
    guarded((), |engine| engine.update_component_to_world(component, rules::teleport(teleport_type)))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_scene_component_get_mobility(component: ObjectHandle) -> i32 {
    guarded(ComponentMobility::Movable.raw(), |engine| rules::mobility_to_raw(engine.mobility(component)))
}

/// Unknown mobility values are movable.
#[unsafe(no_mangle)]
pub extern "C" fn uflat_scene_component_set_mobility(component: ObjectHandle, mobility: i32) {
    guarded((), |engine| engine.set_mobility(component, rules::mobility(mobility)))
}

// ---------------------------------------------------------------------------
// Scene component: transforms
// ---------------------------------------------------------------------------

fn modify(engine: &dyn Engine, component: ObjectHandle, space: Space, f: impl FnOnce(&mut Transform)) {
    let mut transform = engine.component_transform(component, space);
    f(&mut transform);
    engine.set_component_transform(component, space, transform);
}

macro_rules! transform_accessors {
    ($($space:ident => $get_location:ident, $set_location:ident, $get_rotation:ident, $set_rotation:ident, $get_transform:ident, $set_transform:ident;)+) => {$(
        /// # Safety
        /// `value` must be null or valid for one write.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $get_location(component: ObjectHandle, value: *mut Vector3) {
            guarded((), |engine| unsafe {
                write_out(value, engine.component_transform(component, Space::$space).translation)
            })
        }

        /// # Safety
        /// `value` must be null or valid for one read.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $set_location(component: ObjectHandle, value: *const Vector3) {
            let location = unsafe { read_in(value) };
            guarded((), |engine| {
                if let Some(location) = location {
                    modify(engine, component, Space::$space, |t| t.translation = location);
                }
            })
        }

        /// # Safety
        /// `value` must be null or valid for one write.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $get_rotation(component: ObjectHandle, value: *mut Quaternion) {
            guarded((), |engine| unsafe {
                write_out(value, engine.component_transform(component, Space::$space).rotation)
            })
        }

        /// # Safety
        /// `value` must be null or valid for one read.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $set_rotation(component: ObjectHandle, value: *const Quaternion) {
            let rotation = unsafe { read_in(value) };
            guarded((), |engine| {
                if let Some(rotation) = rotation {
                    modify(engine, component, Space::$space, |t| t.rotation = rotation);
                }
            })
        }

        /// # Safety
        /// `value` must be null or valid for one write.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $get_transform(component: ObjectHandle, value: *mut BoundaryTransform) {
            guarded((), |engine| unsafe {
                write_out(value, engine.component_transform(component, Space::$space))
            })
        }

        /// # Safety
        /// `value` must be null or valid for one read.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $set_transform(component: ObjectHandle, value: *const BoundaryTransform) {
            let transform = unsafe { read_in(value) };
            guarded((), |engine| {
                if let Some(transform) = transform {
                    engine.set_component_transform(component, Space::$space, transform);
                }
            })
        }
    )+};
}

transform_accessors! {
    World =>
        uflat_scene_component_get_world_location, uflat_scene_component_set_world_location,
        uflat_scene_component_get_world_rotation, uflat_scene_component_set_world_rotation,
        uflat_scene_component_get_world_transform, uflat_scene_component_set_world_transform;
    Relative =>
        uflat_scene_component_get_relative_location, uflat_scene_component_set_relative_location,
        uflat_scene_component_get_relative_rotation, uflat_scene_component_set_relative_rotation,
        uflat_scene_component_get_relative_transform, uflat_scene_component_set_relative_transform;
}
