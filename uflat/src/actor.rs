// Actor: spawning, destruction, attachment, component lookup and tags.

use std::ffi::c_char;

use uflat_ffi::ObjectHandle;
use uflat_runtime::dispatch::{self, kind_from_raw};
use uflat_runtime::query::{self, Filter};
use uflat_runtime::{assets, guarded, rules};

use crate::{or_null, text};

#[unsafe(no_mangle)]
pub extern "C" fn uflat_actor_is_pending_kill(actor: ObjectHandle) -> bool {
    guarded(false, |engine| engine.is_pending_kill(actor))
}

/// Spawn an actor of `kind`. `blueprint` is an optional class override (a
/// loaded blueprint class); it must derive from the kind's class or nothing
/// is spawned. A null `name` keeps the engine-assigned name.
///
/// # Safety
/// `name` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_actor_spawn(name: *const c_char, kind: i32, blueprint: ObjectHandle) -> ObjectHandle {
    let name = unsafe { text(name) };
    guarded(ObjectHandle::null(), |engine| {
        or_null(
            kind_from_raw(kind)
                .and_then(|kind| Ok((kind, assets::override_class(engine, blueprint)?)))
                .and_then(|(kind, class_override)| dispatch::spawn(engine, kind, class_override, name.as_deref())),
        )
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_actor_destroy(actor: ObjectHandle) -> bool {
    guarded(false, |engine| engine.destroy_actor(actor))
}

/// # Safety
/// `name` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_actor_rename(actor: ObjectHandle, name: *const c_char) {
    let name = unsafe { text(name) };
    guarded((), |engine| {
        if let Some(name) = &name {
            engine.rename(actor, name);
        }
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_actor_hide(actor: ObjectHandle, value: bool) {
    guarded((), |engine| engine.set_actor_hidden(actor, value))
}

/// Attach the actor's root to the parent's root. Unknown rules keep the
/// relative transform; a null socket attaches to the parent itself.
///
/// # Safety
/// `socket` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_actor_attach_to_actor(
    actor: ObjectHandle,
    parent: ObjectHandle,
    attachment_rule: i32,
    socket: *const c_char,
) {
    let socket = unsafe { text(socket) };
    guarded((), |engine| {
        engine.attach_actor(actor, parent, rules::attachment_rules(attachment_rule), socket.as_deref())
    })
}

/// First component of `kind` named `name`, in component order. A null name
/// matches by kind alone. Non-attachable kinds (input, plain actor
/// components) are accepted here.
///
/// # Safety
/// `name` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_actor_get_component(actor: ObjectHandle, name: *const c_char, kind: i32) -> ObjectHandle {
    let name = unsafe { text(name) };
    guarded(ObjectHandle::null(), |engine| {
        or_null(
            kind_from_raw(kind).and_then(|kind| query::find_component(engine, actor, kind, Filter::by_name(name.as_deref()))),
        )
    })
}

/// The root component when it is-a `kind` (an attachable kind), else null.
#[unsafe(no_mangle)]
pub extern "C" fn uflat_actor_get_root_component(actor: ObjectHandle, kind: i32) -> ObjectHandle {
    guarded(ObjectHandle::null(), |engine| {
        or_null(kind_from_raw(kind).and_then(|kind| query::root_component_of_kind(engine, actor, kind)))
    })
}

/// Detach `component` from its parent and make it the actor's root.
#[unsafe(no_mangle)]
pub extern "C" fn uflat_actor_set_root_component(actor: ObjectHandle, component: ObjectHandle) -> bool {
    guarded(false, |engine| dispatch::set_root_component(engine, actor, component))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_actor_get_input_component(actor: ObjectHandle) -> ObjectHandle {
    guarded(ObjectHandle::null(), |engine| engine.input_component(actor))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_actor_set_input_component(actor: ObjectHandle, input: ObjectHandle) {
    guarded((), |engine| engine.set_input_component(actor, input))
}

/// # Safety
/// `tag` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_actor_add_tag(actor: ObjectHandle, tag: *const c_char) {
    let tag = unsafe { text(tag) };
    guarded((), |engine| {
        if let Some(tag) = &tag {
            engine.add_actor_tag(actor, tag);
        }
    })
}

/// # Safety
/// `tag` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_actor_remove_tag(actor: ObjectHandle, tag: *const c_char) {
    let tag = unsafe { text(tag) };
    guarded((), |engine| {
        if let Some(tag) = &tag {
            engine.remove_actor_tag(actor, tag);
        }
    })
}

/// # Safety
/// `tag` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_actor_has_tag(actor: ObjectHandle, tag: *const c_char) -> bool {
    let tag = unsafe { text(tag) };
    guarded(false, |engine| tag.as_deref().is_some_and(|tag| engine.actor_has_tag(actor, tag)))
}
