// Controller and player controller.

use std::ffi::c_char;

use uflat_ffi::ObjectHandle;
use uflat_runtime::{guarded, rules};

use crate::text;

#[unsafe(no_mangle)]
pub extern "C" fn uflat_controller_get_pawn(controller: ObjectHandle) -> ObjectHandle {
    guarded(ObjectHandle::null(), |engine| engine.controlled_pawn(controller))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_player_controller_is_paused(player: ObjectHandle) -> bool {
    guarded(false, |engine| engine.is_paused(player))
}

#[unsafe(no_mangle)]
pub extern "C" fn uflat_player_controller_set_pause(player: ObjectHandle, value: bool) -> bool {
    guarded(false, |engine| engine.set_pause(player, value))
}

/// Run a console line as `player`. Returns whether a console object
/// handled it.
///
/// # Safety
/// `command` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn uflat_player_controller_console_command(
    player: ObjectHandle,
    command: *const c_char,
    write_to_log: bool,
) -> bool {
    let command = unsafe { text(command) };
    guarded(false, |engine| match &command {
        Some(command) => engine.console_command(player, command, write_to_log),
        None => false,
    })
}

/// Blend the view to `target` over `time` seconds. Unknown blend types are
/// linear.
#[unsafe(no_mangle)]
pub extern "C" fn uflat_player_controller_set_view_target_with_blend(
    player: ObjectHandle,
    target: ObjectHandle,
    time: f32,
    exponent: f32,
    blend_type: i32,
    lock_outgoing: bool,
) {
    guarded((), |engine| {
        engine.set_view_target_with_blend(player, target, time, rules::blend(blend_type), exponent, lock_outgoing)
    })
}
