// Native engine collaborator. The engine itself (simulation, rendering,
// physics, streaming) is out of scope; this is the narrow surface the call
// layer consumes, grouped the way a host API table groups its sub-tables.
//
// All methods take `&self`. Implementations must tolerate re-entrant calls:
// a delegate invoked by the engine may call straight back into it.

use glam::{Vec2, Vec3};
use uflat_ffi::{ClassHandle, ConsoleObjectHandle, ObjectHandle};

use crate::console_value::ConsoleValue;
use crate::ue_math::{Color, Transform};

// ---------------------------------------------------------------------------
// Native enumerations
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogVerbosity {
    Display,
    Warning,
    Error,
    Fatal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachmentRule {
    KeepRelative,
    KeepWorld,
    SnapToTarget,
}

/// Per-channel attachment rules (FAttachmentTransformRules).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttachmentTransformRules {
    pub location: AttachmentRule,
    pub rotation: AttachmentRule,
    pub scale: AttachmentRule,
    pub weld_simulated_bodies: bool,
}

impl AttachmentTransformRules {
    pub const KEEP_RELATIVE: Self = Self::uniform(AttachmentRule::KeepRelative);
    pub const KEEP_WORLD: Self = Self::uniform(AttachmentRule::KeepWorld);
    pub const SNAP_TO_TARGET_INCLUDING_SCALE: Self = Self::uniform(AttachmentRule::SnapToTarget);
    pub const SNAP_TO_TARGET_NOT_INCLUDING_SCALE: Self = Self {
        location: AttachmentRule::SnapToTarget,
        rotation: AttachmentRule::SnapToTarget,
        scale: AttachmentRule::KeepWorld,
        weld_simulated_bodies: false,
    };

    const fn uniform(rule: AttachmentRule) -> Self {
        Self { location: rule, rotation: rule, scale: rule, weld_simulated_bodies: false }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetachmentRule {
    KeepRelative,
    KeepWorld,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mobility {
    Static,
    Stationary,
    Movable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeleportMode {
    None,
    TeleportPhysics,
    ResetPhysics,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewTargetBlend {
    Linear,
    Cubic,
    EaseIn,
    EaseOut,
    EaseInOut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadialFalloff {
    Constant,
    Linear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputTrigger {
    Pressed,
    Released,
    Repeat,
    DoubleClick,
    Axis,
}

/// Which space a component transform is read or written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Space {
    World,
    Relative,
}

// ---------------------------------------------------------------------------
// Delegates and bindings
// ---------------------------------------------------------------------------

pub type NativeDelegate = Box<dyn FnMut()>;
pub type AxisDelegate = Box<dyn FnMut(f32)>;
pub type CommandDelegate = Box<dyn FnMut(&[String])>;

pub struct ActionBinding {
    pub action: String,
    pub event: InputTrigger,
    pub execute_when_paused: bool,
    pub delegate: NativeDelegate,
}

pub struct AxisBinding {
    pub axis: String,
    pub execute_when_paused: bool,
    pub delegate: AxisDelegate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActionKeyMapping {
    pub action: String,
    pub key: String,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub cmd: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisKeyMapping {
    pub axis: String,
    pub key: String,
    pub scale: f32,
}

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// Object identity, class reflection, assets and the log sink.
pub trait CoreApi {
    /// Handle still resolves to a live, addressable object.
    fn is_valid(&self, obj: ObjectHandle) -> bool;
    /// Teardown has been scheduled but not completed.
    fn is_pending_kill(&self, obj: ObjectHandle) -> bool;

    /// Find a class by native name. Null if unknown.
    fn find_class(&self, name: &str) -> ClassHandle;
    fn class_of(&self, obj: ObjectHandle) -> ClassHandle;
    fn is_child_of(&self, class: ClassHandle, base: ClassHandle) -> bool;

    fn is_a(&self, obj: ObjectHandle, class: ClassHandle) -> bool {
        let own = self.class_of(obj);
        !own.is_null() && self.is_child_of(own, class)
    }

    fn object_name(&self, obj: ObjectHandle) -> String;
    fn rename(&self, obj: ObjectHandle, name: &str) -> bool;

    /// Load (or find an already loaded) object of `class` at `path`.
    fn load_object(&self, class: ClassHandle, path: &str) -> ObjectHandle;
    /// The class an object stands for, if it is a class object. Null otherwise.
    fn class_from_object(&self, obj: ObjectHandle) -> ClassHandle;

    fn log(&self, level: LogVerbosity, message: &str);
}

/// Application and engine-wide state.
pub trait AppApi {
    fn project_name(&self) -> String;
    fn set_project_name(&self, name: &str);
    fn project_dir(&self) -> String;
    fn default_language(&self) -> String;
    fn volume_multiplier(&self) -> f32;
    fn set_volume_multiplier(&self, value: f32);

    fn command_line(&self) -> String;
    fn set_command_line(&self, args: &str);
    fn append_command_line(&self, args: &str);

    fn engine_version(&self) -> String;
    fn max_fps(&self) -> f32;
    fn set_max_fps(&self, value: f32);
    fn frame_number(&self) -> u32;
    fn viewport_size(&self) -> Vec2;

    fn add_action_mapping(&self, mapping: ActionKeyMapping);
    fn add_axis_mapping(&self, mapping: AxisKeyMapping);

    fn force_garbage_collection(&self, full_purge: bool);
    fn request_exit(&self, force: bool);
    fn is_exit_requested(&self) -> bool;
}

/// The current world: actor lifetime, iteration and world settings.
pub trait WorldApi {
    fn spawn_actor(&self, class: ClassHandle) -> ObjectHandle;
    fn destroy_actor(&self, actor: ObjectHandle) -> bool;
    /// Live actors that are-a `class`, in native iteration order.
    fn actors_of_class(&self, class: ClassHandle) -> Vec<ObjectHandle>;
    fn actor_count(&self) -> i32;
    fn first_player_controller(&self) -> ObjectHandle;

    fn simulate_physics(&self) -> bool;
    fn set_simulate_physics(&self, value: bool);
    fn set_gravity(&self, gravity_z: f32);
    fn world_origin(&self) -> Vec3;
    fn set_world_origin(&self, origin: Vec3);
}

pub trait ActorApi {
    fn actor_has_tag(&self, actor: ObjectHandle, tag: &str) -> bool;
    fn add_actor_tag(&self, actor: ObjectHandle, tag: &str);
    fn remove_actor_tag(&self, actor: ObjectHandle, tag: &str);

    fn root_component(&self, actor: ObjectHandle) -> ObjectHandle;
    fn set_root_component(&self, actor: ObjectHandle, component: ObjectHandle) -> bool;
    /// Owned components in native order.
    fn components(&self, actor: ObjectHandle) -> Vec<ObjectHandle>;
    fn new_component(&self, owner: ObjectHandle, class: ClassHandle) -> ObjectHandle;
    /// Add as an instance component, run creation hooks and register it.
    fn register_component(&self, owner: ObjectHandle, component: ObjectHandle);

    fn attach_actor(
        &self,
        actor: ObjectHandle,
        parent: ObjectHandle,
        rules: AttachmentTransformRules,
        socket: Option<&str>,
    );
    fn input_component(&self, actor: ObjectHandle) -> ObjectHandle;
    fn set_input_component(&self, actor: ObjectHandle, input: ObjectHandle);
    fn set_actor_hidden(&self, actor: ObjectHandle, hidden: bool);
}

pub trait ComponentApi {
    fn component_owner(&self, component: ObjectHandle) -> ObjectHandle;
    fn destroy_component(&self, component: ObjectHandle, promote_children: bool);
    fn component_has_tag(&self, component: ObjectHandle, tag: &str) -> bool;
    fn add_component_tag(&self, component: ObjectHandle, tag: &str);
    fn remove_component_tag(&self, component: ObjectHandle, tag: &str);

    fn attach_parent(&self, component: ObjectHandle) -> ObjectHandle;
    fn attach_component(
        &self,
        component: ObjectHandle,
        parent: ObjectHandle,
        rules: AttachmentTransformRules,
        socket: Option<&str>,
    ) -> bool;
    fn detach_component(&self, component: ObjectHandle, rule: DetachmentRule);

    fn component_transform(&self, component: ObjectHandle, space: Space) -> Transform;
    fn set_component_transform(&self, component: ObjectHandle, space: Space, transform: Transform);
    fn mobility(&self, component: ObjectHandle) -> Mobility;
    fn set_mobility(&self, component: ObjectHandle, mobility: Mobility);
    fn update_component_to_world(&self, component: ObjectHandle, teleport: TeleportMode);

    fn add_force(&self, component: ObjectHandle, force: Vec3, bone: Option<&str>, accel_change: bool);
    #[allow(clippy::too_many_arguments)]
    fn add_radial_force(
        &self,
        component: ObjectHandle,
        origin: Vec3,
        radius: f32,
        strength: f32,
        falloff: RadialFalloff,
        accel_change: bool,
    );
    #[allow(clippy::too_many_arguments)]
    fn add_radial_impulse(
        &self,
        component: ObjectHandle,
        origin: Vec3,
        radius: f32,
        strength: f32,
        falloff: RadialFalloff,
        velocity_change: bool,
    );

    fn shape_color(&self, component: ObjectHandle) -> Color;
    fn set_shape_color(&self, component: ObjectHandle, color: Color);
    fn box_extent(&self, component: ObjectHandle, scaled: bool) -> Vec3;
    fn set_box_extent(&self, component: ObjectHandle, extent: Vec3, update_overlaps: bool);
}

pub trait ControllerApi {
    fn controlled_pawn(&self, controller: ObjectHandle) -> ObjectHandle;
    #[allow(clippy::too_many_arguments)]
    fn set_view_target_with_blend(
        &self,
        player: ObjectHandle,
        target: ObjectHandle,
        time: f32,
        blend: ViewTargetBlend,
        exponent: f32,
        lock_outgoing: bool,
    );
    /// Run a console line on behalf of a player. Returns whether it was handled.
    fn console_command(&self, player: ObjectHandle, command: &str, write_to_log: bool) -> bool;
    fn set_pause(&self, player: ObjectHandle, paused: bool) -> bool;
    fn is_paused(&self, player: ObjectHandle) -> bool;
}

pub trait ConsoleApi {
    fn is_console_name_registered(&self, name: &str) -> bool;
    fn find_console_variable(&self, name: &str) -> ConsoleObjectHandle;
    fn register_console_variable(
        &self,
        name: &str,
        help: &str,
        default: ConsoleValue,
        read_only: bool,
    ) -> ConsoleObjectHandle;
    fn console_variable_value(&self, variable: ConsoleObjectHandle) -> Option<ConsoleValue>;
    /// Set a variable; the value is coerced to the variable's own type and
    /// the on-changed delegate (if any) fires.
    fn set_console_variable(&self, variable: ConsoleObjectHandle, value: ConsoleValue);
    /// Replace the single on-changed delegate slot. `None` clears it.
    fn set_console_variable_delegate(&self, variable: ConsoleObjectHandle, delegate: Option<NativeDelegate>);
    fn register_console_command(
        &self,
        name: &str,
        help: &str,
        delegate: CommandDelegate,
        read_only: bool,
    ) -> ConsoleObjectHandle;
    fn unregister_console_object(&self, name: &str);
}

pub trait InputApi {
    fn add_action_binding(&self, input: ObjectHandle, binding: ActionBinding);
    fn add_axis_binding(&self, input: ObjectHandle, binding: AxisBinding);
    fn remove_action_binding(&self, input: ObjectHandle, action: &str, event: InputTrigger);
    fn clear_action_bindings(&self, input: ObjectHandle);
    fn action_binding_count(&self, input: ObjectHandle) -> i32;
    fn has_bindings(&self, input: ObjectHandle) -> bool;
    fn input_priority(&self, input: ObjectHandle) -> i32;
    fn set_input_priority(&self, input: ObjectHandle, priority: i32);
    fn input_blocks(&self, input: ObjectHandle) -> bool;
    fn set_input_blocks(&self, input: ObjectHandle, block: bool);
}

/// The full collaborator surface.
pub trait Engine:
    CoreApi + AppApi + WorldApi + ActorApi + ComponentApi + ControllerApi + ConsoleApi + InputApi
{
}

impl<T> Engine for T where
    T: CoreApi + AppApi + WorldApi + ActorApi + ComponentApi + ControllerApi + ConsoleApi + InputApi
{
}
