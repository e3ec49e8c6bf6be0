// Headless engine: an in-process implementation of every collaborator trait.
//
// Each trait method borrows its state only for the duration of the call.
// Drivers that fire delegates (`exec`, `dispatch_action`, `dispatch_axis`,
// console-variable changes) take the delegate out, release every borrow,
// run it, then put it back, so delegates may call into the engine freely.

mod console;
mod input;
mod objects;

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Vec2, Vec3};
use uflat_ffi::{ClassHandle, ConsoleObjectHandle, ObjectHandle, ObjectType};

use crate::assets::{asset_class, blueprint_class_path};
use crate::classes::NativeClass;
use crate::config::HeadlessConfig;
use crate::console_value::ConsoleValue;
use crate::dispatch::native_class;
use crate::engine::*;
use crate::error::FlatResult;
use crate::ue_math::{Color, Transform};

use console::{split_line, ConsoleEntryKind, ConsoleRegistry};
use input::InputRegistry;
use objects::{ClassRegistry, ObjectData, ObjectWorld};

pub use objects::PhysicsRecord;

struct AppState {
    project_name: String,
    project_dir: String,
    default_language: String,
    volume_multiplier: f32,
    command_line: String,
    engine_version: String,
    max_fps: f32,
    frame_number: u32,
    viewport: Vec2,
    action_mappings: Vec<ActionKeyMapping>,
    axis_mappings: Vec<AxisKeyMapping>,
    exit_requested: bool,
}

impl AppState {
    fn from_config(config: &HeadlessConfig) -> Self {
        AppState {
            project_name: config.application.project_name.clone(),
            project_dir: config.application.project_dir.clone(),
            default_language: config.application.default_language.clone(),
            volume_multiplier: config.application.volume_multiplier,
            command_line: config.application.command_line.clone(),
            engine_version: config.engine.version.clone(),
            max_fps: config.engine.max_fps,
            frame_number: 0,
            viewport: Vec2::from_array(config.engine.viewport),
            action_mappings: Vec::new(),
            axis_mappings: Vec::new(),
            exit_requested: false,
        }
    }
}

pub struct HeadlessEngine {
    world: RefCell<ObjectWorld>,
    console: RefCell<ConsoleRegistry>,
    input: RefCell<InputRegistry>,
    app: RefCell<AppState>,
    log: RefCell<Vec<(LogVerbosity, String)>>,
    echo: bool,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::empty(&HeadlessConfig::default())
    }

    pub fn new_rc() -> Rc<Self> {
        Rc::new(Self::new())
    }

    fn empty(config: &HeadlessConfig) -> Self {
        let mut world = ObjectWorld::new();
        world.gravity_z = config.engine.gravity_z;
        HeadlessEngine {
            world: RefCell::new(world),
            console: RefCell::new(ConsoleRegistry::default()),
            input: RefCell::new(InputRegistry::default()),
            app: RefCell::new(AppState::from_config(config)),
            log: RefCell::new(Vec::new()),
            echo: config.log.echo,
        }
    }

    /// Build an engine with the configured assets and starting actors.
    pub fn from_config(config: &HeadlessConfig) -> FlatResult<Self> {
        config.validate()?;
        let engine = Self::empty(config);
        {
            let mut world = engine.world.borrow_mut();
            for asset in &config.assets {
                match asset.object_type()? {
                    ObjectType::Blueprint => {
                        world.add_generated_class(&blueprint_class_path(&asset.path), asset.parent_class()?);
                    }
                    ty => {
                        world.add_asset(asset_class(ty), &asset.path);
                    }
                }
            }
            for entry in &config.actors {
                let class = world.classes.native_index(native_class(entry.spawn_kind()?));
                let actor = world.spawn_actor(class);
                if let Some(name) = &entry.name {
                    if let Some(record) = world.record_mut(actor) {
                        record.name = name.clone();
                    }
                }
                if let Some(data) = world.actor_mut(actor) {
                    data.tags = entry.tags.clone();
                }
            }
        }
        Ok(engine)
    }

    // -- inspection -----------------------------------------------------------

    pub fn log_records(&self) -> Vec<(LogVerbosity, String)> {
        self.log.borrow().clone()
    }

    /// Objects in the table, pending-kill included.
    pub fn object_count(&self) -> usize {
        self.world.borrow().len()
    }

    pub fn gravity_z(&self) -> f32 {
        self.world.borrow().gravity_z
    }

    pub fn is_hidden(&self, actor: ObjectHandle) -> bool {
        self.world.borrow().actor(actor).is_some_and(|a| a.hidden)
    }

    pub fn is_registered(&self, component: ObjectHandle) -> bool {
        self.world.borrow().component(component).is_some_and(|c| c.registered)
    }

    pub fn view_target(&self, player: ObjectHandle) -> (ObjectHandle, Option<ViewTargetBlend>) {
        self.world
            .borrow()
            .actor(player)
            .map_or((ObjectHandle::null(), None), |a| (a.view_target, a.view_blend))
    }

    pub fn physics_records(&self, component: ObjectHandle) -> Vec<PhysicsRecord> {
        self.world
            .borrow()
            .component(component)
            .map(|c| c.physics.clone())
            .unwrap_or_default()
    }

    pub fn last_teleport(&self, component: ObjectHandle) -> Option<TeleportMode> {
        self.world.borrow().component(component).and_then(|c| c.last_teleport)
    }

    pub fn socket_of(&self, component: ObjectHandle) -> Option<String> {
        self.world.borrow().component(component).and_then(|c| c.socket.clone())
    }

    pub fn action_mappings(&self) -> Vec<ActionKeyMapping> {
        self.app.borrow().action_mappings.clone()
    }

    pub fn axis_mappings(&self) -> Vec<AxisKeyMapping> {
        self.app.borrow().axis_mappings.clone()
    }

    // -- drivers --------------------------------------------------------------

    pub fn tick(&self) {
        let mut app = self.app.borrow_mut();
        app.frame_number = app.frame_number.wrapping_add(1);
    }

    /// Give `controller` a pawn to control.
    pub fn possess(&self, controller: ObjectHandle, pawn: ObjectHandle) -> bool {
        let mut world = self.world.borrow_mut();
        if !world.is_a(controller, NativeClass::Controller) || !world.is_a(pawn, NativeClass::Pawn) {
            return false;
        }
        world.actor_mut(controller).map(|c| c.pawn = pawn).is_some()
    }

    /// The actor's input component, created on first use.
    pub fn ensure_input_component(&self, actor: ObjectHandle) -> ObjectHandle {
        let mut world = self.world.borrow_mut();
        let existing = match world.actor(actor) {
            Some(data) => data.input_component,
            None => return ObjectHandle::null(),
        };
        if !existing.is_null() {
            return existing;
        }
        let class = world.classes.native_index(NativeClass::InputComponent);
        let input = world.new_component(actor, class);
        if let Some(data) = world.component_mut(input) {
            data.registered = true;
        }
        if let Some(data) = world.actor_mut(actor) {
            data.input_component = input;
        }
        input
    }

    /// Run a console line. Returns whether a console object handled it.
    pub fn exec(&self, line: &str) -> bool {
        let Some((name, args)) = split_line(line) else {
            return false;
        };
        let (index, is_command, read_only) = {
            let console = self.console.borrow();
            let Some(index) = console.find(name) else {
                return false;
            };
            let entry = console.entry(ConsoleRegistry::handle(index));
            (
                index,
                matches!(entry.map(|e| &e.kind), Some(ConsoleEntryKind::Command { .. })),
                entry.is_some_and(|e| e.read_only),
            )
        };

        if is_command {
            let taken = self.console.borrow_mut().take_command(index);
            if let Some((mut handler, epoch)) = taken {
                handler(&args);
                self.console.borrow_mut().restore_command(index, epoch, handler);
            }
        } else {
            let handle = ConsoleRegistry::handle(index);
            if args.is_empty() {
                if let Some(value) = self.console_variable_value(handle) {
                    self.log(LogVerbosity::Display, &format!("{name} = \"{value}\""));
                }
            } else if read_only {
                // Console lines cannot change read-only variables; code-side setters still can.
                self.log(LogVerbosity::Warning, &format!("{name} is read only"));
            } else {
                self.set_console_variable(handle, ConsoleValue::String(args.join(" ")));
            }
        }
        true
    }

    fn live_input_components(&self) -> (Vec<ObjectHandle>, bool) {
        let world = self.world.borrow();
        let live = world
            .live()
            .filter(|(h, _)| world.is_a(*h, NativeClass::InputComponent))
            .map(|(h, _)| h)
            .collect();
        (live, world.paused)
    }

    /// Fire an input action. Returns how many bindings ran.
    pub fn dispatch_action(&self, action: &str, event: InputTrigger) -> usize {
        let (live, paused) = self.live_input_components();
        let targets = self.input.borrow().action_targets(&live, action, event, paused);
        let mut fired = 0;
        for (input, id) in targets {
            let taken = self.input.borrow_mut().take_action(input, id);
            if let Some(mut delegate) = taken {
                delegate();
                fired += 1;
                self.input.borrow_mut().restore_action(input, id, delegate);
            }
        }
        fired
    }

    /// Feed an axis value. Returns how many bindings ran.
    pub fn dispatch_axis(&self, axis: &str, value: f32) -> usize {
        let (live, paused) = self.live_input_components();
        let targets = self.input.borrow().axis_targets(&live, axis, paused);
        let mut fired = 0;
        for (input, id) in targets {
            let taken = self.input.borrow_mut().take_axis(input, id);
            if let Some(mut delegate) = taken {
                delegate(value);
                fired += 1;
                self.input.borrow_mut().restore_axis(input, id, delegate);
            }
        }
        fired
    }

    /// Remove pending-kill objects. Their input bindings go with them.
    pub fn collect_garbage(&self) -> usize {
        let removed = self.world.borrow_mut().collect_garbage();
        let mut input = self.input.borrow_mut();
        for handle in &removed {
            input.forget(*handle);
        }
        removed.len()
    }

    fn is_live_input(&self, input: ObjectHandle) -> bool {
        let world = self.world.borrow();
        world.record(input).is_some_and(|r| !r.pending_kill) && world.is_a(input, NativeClass::InputComponent)
    }
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        HeadlessEngine::new()
    }
}

// ---------------------------------------------------------------------------
// CoreApi
// ---------------------------------------------------------------------------

impl CoreApi for HeadlessEngine {
    fn is_valid(&self, obj: ObjectHandle) -> bool {
        self.world.borrow().record(obj).is_some()
    }

    fn is_pending_kill(&self, obj: ObjectHandle) -> bool {
        self.world.borrow().record(obj).is_some_and(|r| r.pending_kill)
    }

    fn find_class(&self, name: &str) -> ClassHandle {
        self.world
            .borrow()
            .classes
            .find(name)
            .map_or(ClassHandle::null(), ClassRegistry::handle)
    }

    fn class_of(&self, obj: ObjectHandle) -> ClassHandle {
        self.world
            .borrow()
            .record(obj)
            .map_or(ClassHandle::null(), |r| ClassRegistry::handle(r.class))
    }

    fn is_child_of(&self, class: ClassHandle, base: ClassHandle) -> bool {
        let world = self.world.borrow();
        match (world.classes.index(class), world.classes.index(base)) {
            (Some(class), Some(base)) => world.classes.is_child_of(class, base),
            _ => false,
        }
    }

    fn object_name(&self, obj: ObjectHandle) -> String {
        self.world
            .borrow()
            .record(obj)
            .map(|r| r.name.clone())
            .unwrap_or_default()
    }

    fn rename(&self, obj: ObjectHandle, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        match self.world.borrow_mut().record_mut(obj) {
            Some(record) => {
                record.name = name.to_string();
                true
            }
            None => false,
        }
    }

    fn load_object(&self, class: ClassHandle, path: &str) -> ObjectHandle {
        let world = self.world.borrow();
        match world.classes.index(class) {
            Some(class) => world.find_by_path(class, path),
            None => ObjectHandle::null(),
        }
    }

    fn class_from_object(&self, obj: ObjectHandle) -> ClassHandle {
        match self.world.borrow().record(obj).map(|r| &r.data) {
            Some(ObjectData::ClassObject { class, .. }) => ClassRegistry::handle(*class),
            _ => ClassHandle::null(),
        }
    }

    fn log(&self, level: LogVerbosity, message: &str) {
        if self.echo {
            eprintln!("[{level:?}] {message}");
        }
        self.log.borrow_mut().push((level, message.to_string()));
    }
}

// ---------------------------------------------------------------------------
// AppApi
// ---------------------------------------------------------------------------

impl AppApi for HeadlessEngine {
    fn project_name(&self) -> String {
        self.app.borrow().project_name.clone()
    }

    fn set_project_name(&self, name: &str) {
        self.app.borrow_mut().project_name = name.to_string();
    }

    fn project_dir(&self) -> String {
        self.app.borrow().project_dir.clone()
    }

    fn default_language(&self) -> String {
        self.app.borrow().default_language.clone()
    }

    fn volume_multiplier(&self) -> f32 {
        self.app.borrow().volume_multiplier
    }

    fn set_volume_multiplier(&self, value: f32) {
        self.app.borrow_mut().volume_multiplier = value;
    }

    fn command_line(&self) -> String {
        self.app.borrow().command_line.clone()
    }

    fn set_command_line(&self, args: &str) {
        self.app.borrow_mut().command_line = args.to_string();
    }

    fn append_command_line(&self, args: &str) {
        let mut app = self.app.borrow_mut();
        if !app.command_line.is_empty() && !args.is_empty() {
            app.command_line.push(' ');
        }
        app.command_line.push_str(args);
    }

    fn engine_version(&self) -> String {
        self.app.borrow().engine_version.clone()
    }

    fn max_fps(&self) -> f32 {
        self.app.borrow().max_fps
    }

    fn set_max_fps(&self, value: f32) {
        self.app.borrow_mut().max_fps = value;
    }

    fn frame_number(&self) -> u32 {
        self.app.borrow().frame_number
    }

    fn viewport_size(&self) -> Vec2 {
        self.app.borrow().viewport
    }

    fn add_action_mapping(&self, mapping: ActionKeyMapping) {
        let mut app = self.app.borrow_mut();
        if !app.action_mappings.contains(&mapping) {
            app.action_mappings.push(mapping);
        }
    }

    fn add_axis_mapping(&self, mapping: AxisKeyMapping) {
        let mut app = self.app.borrow_mut();
        if !app.axis_mappings.contains(&mapping) {
            app.axis_mappings.push(mapping);
        }
    }

    fn force_garbage_collection(&self, _full_purge: bool) {
        self.collect_garbage();
    }

    fn request_exit(&self, _force: bool) {
        self.app.borrow_mut().exit_requested = true;
    }

    fn is_exit_requested(&self) -> bool {
        self.app.borrow().exit_requested
    }
}

// ---------------------------------------------------------------------------
// WorldApi
// ---------------------------------------------------------------------------

impl WorldApi for HeadlessEngine {
    fn spawn_actor(&self, class: ClassHandle) -> ObjectHandle {
        let mut world = self.world.borrow_mut();
        match world.classes.index(class) {
            Some(class) => world.spawn_actor(class),
            None => ObjectHandle::null(),
        }
    }

    fn destroy_actor(&self, actor: ObjectHandle) -> bool {
        self.world.borrow_mut().destroy_actor(actor)
    }

    fn actors_of_class(&self, class: ClassHandle) -> Vec<ObjectHandle> {
        let world = self.world.borrow();
        let Some(class) = world.classes.index(class) else {
            return Vec::new();
        };
        world
            .live()
            .filter(|(_, r)| matches!(r.data, ObjectData::Actor(_)) && world.classes.is_child_of(r.class, class))
            .map(|(h, _)| h)
            .collect()
    }

    fn actor_count(&self) -> i32 {
        let world = self.world.borrow();
        world.live().filter(|(_, r)| matches!(r.data, ObjectData::Actor(_))).count() as i32
    }

    fn first_player_controller(&self) -> ObjectHandle {
        let world = self.world.borrow();
        world
            .live()
            .find(|(h, _)| world.is_a(*h, NativeClass::PlayerController))
            .map_or(ObjectHandle::null(), |(h, _)| h)
    }

    fn simulate_physics(&self) -> bool {
        self.world.borrow().simulate_physics
    }

    fn set_simulate_physics(&self, value: bool) {
        self.world.borrow_mut().simulate_physics = value;
    }

    fn set_gravity(&self, gravity_z: f32) {
        self.world.borrow_mut().gravity_z = gravity_z;
    }

    fn world_origin(&self) -> Vec3 {
        self.world.borrow().origin
    }

    fn set_world_origin(&self, origin: Vec3) {
        self.world.borrow_mut().origin = origin;
    }
}

// ---------------------------------------------------------------------------
// ActorApi
// ---------------------------------------------------------------------------

impl ActorApi for HeadlessEngine {
    fn actor_has_tag(&self, actor: ObjectHandle, tag: &str) -> bool {
        self.world
            .borrow()
            .actor(actor)
            .is_some_and(|a| a.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
    }

    fn add_actor_tag(&self, actor: ObjectHandle, tag: &str) {
        if let Some(data) = self.world.borrow_mut().actor_mut(actor) {
            if !data.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                data.tags.push(tag.to_string());
            }
        }
    }

    fn remove_actor_tag(&self, actor: ObjectHandle, tag: &str) {
        if let Some(data) = self.world.borrow_mut().actor_mut(actor) {
            data.tags.retain(|t| !t.eq_ignore_ascii_case(tag));
        }
    }

    fn root_component(&self, actor: ObjectHandle) -> ObjectHandle {
        self.world.borrow().actor(actor).map_or(ObjectHandle::null(), |a| a.root)
    }

    fn set_root_component(&self, actor: ObjectHandle, component: ObjectHandle) -> bool {
        self.world.borrow_mut().set_root(actor, component)
    }

    fn components(&self, actor: ObjectHandle) -> Vec<ObjectHandle> {
        let world = self.world.borrow();
        world
            .actor(actor)
            .map(|a| {
                a.components
                    .iter()
                    .copied()
                    .filter(|c| world.record(*c).is_some_and(|r| !r.pending_kill))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn new_component(&self, owner: ObjectHandle, class: ClassHandle) -> ObjectHandle {
        let mut world = self.world.borrow_mut();
        match world.classes.index(class) {
            Some(class) => world.new_component(owner, class),
            None => ObjectHandle::null(),
        }
    }

    fn register_component(&self, owner: ObjectHandle, component: ObjectHandle) {
        let mut world = self.world.borrow_mut();
        match world.component_mut(component) {
            Some(data) if data.owner == owner => data.registered = true,
            _ => return,
        }
        if let Some(actor) = world.actor_mut(owner) {
            if !actor.components.contains(&component) {
                actor.components.push(component);
            }
        }
    }

    fn attach_actor(
        &self,
        actor: ObjectHandle,
        parent: ObjectHandle,
        rules: AttachmentTransformRules,
        socket: Option<&str>,
    ) {
        let mut world = self.world.borrow_mut();
        let child_root = world.actor(actor).map_or(ObjectHandle::null(), |a| a.root);
        let parent_root = world.actor(parent).map_or(ObjectHandle::null(), |a| a.root);
        if !child_root.is_null() && !parent_root.is_null() {
            world.attach(child_root, parent_root, rules, socket);
        }
    }

    fn input_component(&self, actor: ObjectHandle) -> ObjectHandle {
        self.world.borrow().actor(actor).map_or(ObjectHandle::null(), |a| a.input_component)
    }

    fn set_input_component(&self, actor: ObjectHandle, input: ObjectHandle) {
        if let Some(data) = self.world.borrow_mut().actor_mut(actor) {
            data.input_component = input;
        }
    }

    fn set_actor_hidden(&self, actor: ObjectHandle, hidden: bool) {
        if let Some(data) = self.world.borrow_mut().actor_mut(actor) {
            data.hidden = hidden;
        }
    }
}

// ---------------------------------------------------------------------------
// ComponentApi
// ---------------------------------------------------------------------------

impl ComponentApi for HeadlessEngine {
    fn component_owner(&self, component: ObjectHandle) -> ObjectHandle {
        self.world.borrow().component(component).map_or(ObjectHandle::null(), |c| c.owner)
    }

    fn destroy_component(&self, component: ObjectHandle, promote_children: bool) {
        self.world.borrow_mut().destroy_component(component, promote_children);
    }

    fn component_has_tag(&self, component: ObjectHandle, tag: &str) -> bool {
        self.world
            .borrow()
            .component(component)
            .is_some_and(|c| c.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
    }

    fn add_component_tag(&self, component: ObjectHandle, tag: &str) {
        if let Some(data) = self.world.borrow_mut().component_mut(component) {
            if !data.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                data.tags.push(tag.to_string());
            }
        }
    }

    fn remove_component_tag(&self, component: ObjectHandle, tag: &str) {
        if let Some(data) = self.world.borrow_mut().component_mut(component) {
            data.tags.retain(|t| !t.eq_ignore_ascii_case(tag));
        }
    }

    fn attach_parent(&self, component: ObjectHandle) -> ObjectHandle {
        self.world
            .borrow()
            .component(component)
            .map_or(ObjectHandle::null(), |c| c.attach_parent)
    }

    fn attach_component(
        &self,
        component: ObjectHandle,
        parent: ObjectHandle,
        rules: AttachmentTransformRules,
        socket: Option<&str>,
    ) -> bool {
        self.world.borrow_mut().attach(component, parent, rules, socket)
    }

    fn detach_component(&self, component: ObjectHandle, rule: DetachmentRule) {
        self.world.borrow_mut().detach(component, rule);
    }

    fn component_transform(&self, component: ObjectHandle, space: Space) -> Transform {
        let world = self.world.borrow();
        match space {
            Space::World => world.world_transform(component),
            Space::Relative => world.component(component).map_or(Transform::IDENTITY, |c| c.relative),
        }
    }

    fn set_component_transform(&self, component: ObjectHandle, space: Space, transform: Transform) {
        let mut world = self.world.borrow_mut();
        match space {
            Space::World => world.set_world_transform(component, transform),
            Space::Relative => {
                if let Some(data) = world.component_mut(component) {
                    data.relative = transform;
                }
            }
        }
    }

    fn mobility(&self, component: ObjectHandle) -> Mobility {
        self.world.borrow().component(component).map_or(Mobility::Movable, |c| c.mobility)
    }

    fn set_mobility(&self, component: ObjectHandle, mobility: Mobility) {
        if let Some(data) = self.world.borrow_mut().component_mut(component) {
            data.mobility = mobility;
        }
    }

    fn update_component_to_world(&self, component: ObjectHandle, teleport: TeleportMode) {
        if let Some(data) = self.world.borrow_mut().component_mut(component) {
            data.last_teleport = Some(teleport);
        }
    }

    fn add_force(&self, component: ObjectHandle, force: Vec3, bone: Option<&str>, accel_change: bool) {
        self.push_physics(
            component,
            PhysicsRecord::Force { force, bone: bone.map(str::to_string), accel_change },
        );
    }

    fn add_radial_force(
        &self,
        component: ObjectHandle,
        origin: Vec3,
        radius: f32,
        strength: f32,
        falloff: RadialFalloff,
        accel_change: bool,
    ) {
        self.push_physics(
            component,
            PhysicsRecord::RadialForce { origin, radius, strength, falloff, accel_change },
        );
    }

    fn add_radial_impulse(
        &self,
        component: ObjectHandle,
        origin: Vec3,
        radius: f32,
        strength: f32,
        falloff: RadialFalloff,
        velocity_change: bool,
    ) {
        self.push_physics(
            component,
            PhysicsRecord::RadialImpulse { origin, radius, strength, falloff, velocity_change },
        );
    }

    fn shape_color(&self, component: ObjectHandle) -> Color {
        self.world.borrow().component(component).map_or(Color::BLACK, |c| c.shape_color)
    }

    fn set_shape_color(&self, component: ObjectHandle, color: Color) {
        if let Some(data) = self.world.borrow_mut().component_mut(component) {
            data.shape_color = color;
        }
    }

    fn box_extent(&self, component: ObjectHandle, scaled: bool) -> Vec3 {
        let world = self.world.borrow();
        let Some(data) = world.component(component) else {
            return Vec3::ZERO;
        };
        if scaled {
            data.box_extent * world.world_transform(component).scale
        } else {
            data.box_extent
        }
    }

    fn set_box_extent(&self, component: ObjectHandle, extent: Vec3, _update_overlaps: bool) {
        if let Some(data) = self.world.borrow_mut().component_mut(component) {
            data.box_extent = extent;
        }
    }
}

impl HeadlessEngine {
    fn push_physics(&self, component: ObjectHandle, record: PhysicsRecord) {
        let mut world = self.world.borrow_mut();
        if !world.is_a(component, NativeClass::PrimitiveComponent) {
            return;
        }
        if let Some(data) = world.component_mut(component) {
            data.physics.push(record);
        }
    }
}

// ---------------------------------------------------------------------------
// ControllerApi
// ---------------------------------------------------------------------------

impl ControllerApi for HeadlessEngine {
    fn controlled_pawn(&self, controller: ObjectHandle) -> ObjectHandle {
        self.world.borrow().actor(controller).map_or(ObjectHandle::null(), |a| a.pawn)
    }

    fn set_view_target_with_blend(
        &self,
        player: ObjectHandle,
        target: ObjectHandle,
        _time: f32,
        blend: ViewTargetBlend,
        _exponent: f32,
        _lock_outgoing: bool,
    ) {
        let mut world = self.world.borrow_mut();
        if !world.is_a(player, NativeClass::PlayerController) {
            return;
        }
        if let Some(data) = world.actor_mut(player) {
            data.view_target = target;
            data.view_blend = Some(blend);
        }
    }

    fn console_command(&self, player: ObjectHandle, command: &str, write_to_log: bool) -> bool {
        if !self.world.borrow().is_a(player, NativeClass::PlayerController) {
            return false;
        }
        if write_to_log {
            self.log(LogVerbosity::Display, &format!("Cmd: {command}"));
        }
        self.exec(command)
    }

    fn set_pause(&self, player: ObjectHandle, paused: bool) -> bool {
        let mut world = self.world.borrow_mut();
        if !world.is_a(player, NativeClass::PlayerController) {
            return false;
        }
        world.paused = paused;
        true
    }

    fn is_paused(&self, _player: ObjectHandle) -> bool {
        self.world.borrow().paused
    }
}

// ---------------------------------------------------------------------------
// ConsoleApi
// ---------------------------------------------------------------------------

impl ConsoleApi for HeadlessEngine {
    fn is_console_name_registered(&self, name: &str) -> bool {
        self.console.borrow().find(name).is_some()
    }

    fn find_console_variable(&self, name: &str) -> ConsoleObjectHandle {
        let console = self.console.borrow();
        console
            .find(name)
            .map(ConsoleRegistry::handle)
            .filter(|h| matches!(console.entry(*h).map(|e| &e.kind), Some(ConsoleEntryKind::Variable { .. })))
            .unwrap_or(ConsoleObjectHandle::null())
    }

    fn register_console_variable(
        &self,
        name: &str,
        help: &str,
        default: ConsoleValue,
        read_only: bool,
    ) -> ConsoleObjectHandle {
        let kind = ConsoleEntryKind::Variable { value: default, on_changed: None };
        self.console.borrow_mut().register(name, help, read_only, kind)
    }

    fn console_variable_value(&self, variable: ConsoleObjectHandle) -> Option<ConsoleValue> {
        match &self.console.borrow().entry(variable)?.kind {
            ConsoleEntryKind::Variable { value, .. } => Some(value.clone()),
            ConsoleEntryKind::Command { .. } => None,
        }
    }

    fn set_console_variable(&self, variable: ConsoleObjectHandle, value: ConsoleValue) {
        let taken = self.console.borrow_mut().set_value(variable, value);
        if let Some((Some(mut delegate), epoch)) = taken {
            delegate();
            self.console.borrow_mut().restore_variable_delegate(variable, epoch, delegate);
        }
    }

    fn set_console_variable_delegate(&self, variable: ConsoleObjectHandle, delegate: Option<NativeDelegate>) {
        self.console.borrow_mut().replace_variable_delegate(variable, delegate);
    }

    fn register_console_command(
        &self,
        name: &str,
        help: &str,
        delegate: CommandDelegate,
        read_only: bool,
    ) -> ConsoleObjectHandle {
        let kind = ConsoleEntryKind::Command { handler: Some(delegate) };
        self.console.borrow_mut().register(name, help, read_only, kind)
    }

    fn unregister_console_object(&self, name: &str) {
        self.console.borrow_mut().unregister(name);
    }
}

// ---------------------------------------------------------------------------
// InputApi
// ---------------------------------------------------------------------------

impl InputApi for HeadlessEngine {
    fn add_action_binding(&self, input: ObjectHandle, binding: ActionBinding) {
        if self.is_live_input(input) {
            self.input.borrow_mut().add_action(input, binding);
        } else {
            self.log(LogVerbosity::Warning, &format!("action {} bound to a non-input object", binding.action));
        }
    }

    fn add_axis_binding(&self, input: ObjectHandle, binding: AxisBinding) {
        if self.is_live_input(input) {
            self.input.borrow_mut().add_axis(input, binding);
        } else {
            self.log(LogVerbosity::Warning, &format!("axis {} bound to a non-input object", binding.axis));
        }
    }

    fn remove_action_binding(&self, input: ObjectHandle, action: &str, event: InputTrigger) {
        self.input.borrow_mut().remove_action(input, action, event);
    }

    fn clear_action_bindings(&self, input: ObjectHandle) {
        self.input.borrow_mut().clear_actions(input);
    }

    fn action_binding_count(&self, input: ObjectHandle) -> i32 {
        self.input.borrow().state(input).map_or(0, |s| s.action_count() as i32)
    }

    fn has_bindings(&self, input: ObjectHandle) -> bool {
        self.input.borrow().state(input).is_some_and(|s| s.has_bindings())
    }

    fn input_priority(&self, input: ObjectHandle) -> i32 {
        self.input.borrow().state(input).map_or(0, |s| s.priority)
    }

    fn set_input_priority(&self, input: ObjectHandle, priority: i32) {
        if self.is_live_input(input) {
            self.input.borrow_mut().state_mut(input).priority = priority;
        }
    }

    fn input_blocks(&self, input: ObjectHandle) -> bool {
        self.input.borrow().state(input).is_some_and(|s| s.block_input)
    }

    fn set_input_blocks(&self, input: ObjectHandle, block: bool) {
        if self.is_live_input(input) {
            self.input.borrow_mut().state_mut(input).block_input = block;
        }
    }
}
