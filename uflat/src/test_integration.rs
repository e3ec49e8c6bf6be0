// Integration tests: drive the extern "C" surface against a headless engine
// bound to the test thread.

use std::cell::{Cell, RefCell};
use std::ffi::{c_char, c_void, CStr};
use std::ptr;
use std::rc::Rc;
use std::sync::{Mutex, MutexGuard, PoisonError};

use uflat_ffi::{
    AttachmentTransformRule, BlendType, Color, ComponentMobility, FalloffMode, FlatErrorCode, InputEvent, Kind,
    ObjectHandle, ObjectType, Quaternion, Transform, Vector3,
};
use uflat_runtime::engine::{InputTrigger, RadialFalloff, TeleportMode, ViewTargetBlend};
use uflat_runtime::headless::PhysicsRecord;
use uflat_runtime::status::{runtime_status, RuntimeStatus};
use uflat_runtime::{install_engine, HeadlessConfig, HeadlessEngine};

use crate::actor::*;
use crate::application::*;
use crate::component::*;
use crate::console::*;
use crate::controller::*;
use crate::debug::*;
use crate::engine::*;
use crate::input::*;
use crate::object::*;
use crate::primitive::*;
use crate::world::*;
use crate::*;

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// Serializes tests that read or move the process-wide runtime status.
static LIFECYCLE: Mutex<()> = Mutex::new(());

fn lifecycle() -> MutexGuard<'static, ()> {
    LIFECYCLE.lock().unwrap_or_else(PoisonError::into_inner)
}

fn ensure_running() {
    if runtime_status().get() != RuntimeStatus::Running {
        assert!(uflat_initialize());
    }
}

fn headless() -> Rc<HeadlessEngine> {
    let engine = HeadlessEngine::new_rc();
    install_engine(engine.clone());
    engine
}

fn headless_with(config: &str) -> Rc<HeadlessEngine> {
    let config = HeadlessConfig::from_toml_str(config).unwrap();
    let engine = Rc::new(HeadlessEngine::from_config(&config).unwrap());
    install_engine(engine.clone());
    engine
}

fn spawn(kind: Kind) -> ObjectHandle {
    unsafe { uflat_actor_spawn(ptr::null(), kind.raw(), ObjectHandle::null()) }
}

fn create(actor: ObjectHandle, kind: Kind, set_as_root: bool) -> ObjectHandle {
    unsafe { uflat_scene_component_create(actor, kind.raw(), ptr::null(), set_as_root, ObjectHandle::null()) }
}

fn read_name(object: ObjectHandle) -> String {
    let mut buf = [0 as c_char; 64];
    let code = unsafe { uflat_object_get_name(object, buf.as_mut_ptr(), buf.len(), ptr::null_mut()) };
    assert_eq!(code, FlatErrorCode::Ok);
    unsafe { CStr::from_ptr(buf.as_ptr()) }.to_string_lossy().into_owned()
}

fn ctx<T>(value: &T) -> *mut c_void {
    (value as *const T).cast_mut().cast()
}

unsafe extern "C" fn count(context: *mut c_void) {
    let counter = unsafe { &*context.cast::<Cell<u32>>() };
    counter.set(counter.get() + 1);
}

unsafe extern "C" fn record(context: *mut c_void, value: f32) {
    let seen = unsafe { &*context.cast::<RefCell<Vec<f32>>>() };
    seen.borrow_mut().push(value);
}

// ---------------------------------------------------------------------------
// Type-tag dispatch
// ---------------------------------------------------------------------------

#[test]
fn spawned_point_light_narrows_to_its_own_kind_only() {
    let _engine = headless();
    let light = spawn(Kind::PointLight);
    assert!(!light.is_null());
    assert_eq!(uflat_object_cast(light, Kind::PointLight.raw()), light);
    assert!(uflat_object_cast(light, Kind::DirectionalLight.raw()).is_null());
    assert_eq!(uflat_object_cast(light, Kind::Actor.raw()), light);
    assert!(uflat_object_cast(light, 999).is_null());
}

#[test]
fn component_kinds_cannot_be_spawned_as_actors() {
    let _engine = headless();
    assert!(spawn(Kind::BoxComponent).is_null());
    assert!(unsafe { uflat_actor_spawn(ptr::null(), -3, ObjectHandle::null()) }.is_null());
    assert_eq!(uflat_world_get_actor_count(), 0);
}

#[test]
fn spawn_applies_the_requested_name() {
    let _engine = headless();
    let camera = unsafe { uflat_actor_spawn(c"MainCamera".as_ptr(), Kind::CameraActor.raw(), ObjectHandle::null()) };
    assert_eq!(read_name(camera), "MainCamera");
    let found = unsafe { uflat_world_get_actor(c"MainCamera".as_ptr(), Kind::CameraActor.raw()) };
    assert_eq!(found, camera);
    assert!(unsafe { uflat_world_get_actor(c"MainCamera".as_ptr(), Kind::Pawn.raw()) }.is_null());
}

#[test]
fn null_name_matches_by_kind_alone() {
    let _engine = headless();
    let _pawn = spawn(Kind::Pawn);
    let character = spawn(Kind::Character);
    let found = unsafe { uflat_world_get_actor(ptr::null(), Kind::Character.raw()) };
    assert_eq!(found, character);
}

#[test]
fn actor_by_tag() {
    let _engine = headless();
    let actor = spawn(Kind::Actor);
    assert!(unsafe { uflat_world_get_actor_by_tag(c"Enemy".as_ptr(), Kind::Actor.raw()) }.is_null());

    unsafe { uflat_actor_add_tag(actor, c"Enemy".as_ptr()) };
    assert!(unsafe { uflat_actor_has_tag(actor, c"Enemy".as_ptr()) });
    assert_eq!(unsafe { uflat_world_get_actor_by_tag(c"Enemy".as_ptr(), Kind::Actor.raw()) }, actor);
    assert!(unsafe { uflat_world_get_actor_by_tag(ptr::null(), Kind::Actor.raw()) }.is_null());

    unsafe { uflat_actor_remove_tag(actor, c"Enemy".as_ptr()) };
    assert!(unsafe { uflat_world_get_actor_by_tag(c"Enemy".as_ptr(), Kind::Actor.raw()) }.is_null());
}

#[test]
fn blueprint_override_must_derive_from_the_kind() {
    let _engine = headless_with(
        r#"
        [[assets]]
        kind = "Blueprint"
        path = "/Game/Blueprints/Hero"
        parent = "Character"
        "#,
    );
    let blueprint = unsafe { uflat_object_load(ObjectType::Blueprint.raw(), c"/Game/Blueprints/Hero".as_ptr()) };
    assert!(!blueprint.is_null());

    let hero = unsafe { uflat_actor_spawn(c"Hero".as_ptr(), Kind::Pawn.raw(), blueprint) };
    assert!(!hero.is_null());
    assert_eq!(uflat_object_cast(hero, Kind::Character.raw()), hero);

    let refused = unsafe { uflat_actor_spawn(ptr::null(), Kind::PointLight.raw(), blueprint) };
    assert!(refused.is_null());
}

#[test]
fn missing_assets_load_as_null() {
    let _engine = headless();
    assert!(unsafe { uflat_object_load(ObjectType::StaticMesh.raw(), c"/Game/Missing".as_ptr()) }.is_null());
    assert!(unsafe { uflat_object_load(ObjectType::StaticMesh.raw(), ptr::null()) }.is_null());
    assert!(unsafe { uflat_object_load(42, c"/Game/Missing".as_ptr()) }.is_null());
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

#[test]
fn first_component_becomes_root_even_without_the_flag() {
    let _engine = headless();
    let actor = spawn(Kind::Actor);
    let root = create(actor, Kind::BoxComponent, false);
    assert!(!root.is_null());
    assert_eq!(uflat_actor_get_root_component(actor, Kind::BoxComponent.raw()), root);
    assert!(uflat_actor_get_root_component(actor, Kind::SphereComponent.raw()).is_null());

    let child = create(actor, Kind::SphereComponent, false);
    assert_eq!(uflat_actor_get_root_component(actor, Kind::BoxComponent.raw()), root);
    assert!(uflat_scene_component_is_attached_to_component(child, root));
    assert!(uflat_scene_component_is_attached_to_actor(child, actor));
    assert_eq!(uflat_actor_component_get_owner(child), actor);
}

#[test]
fn set_as_root_replaces_the_root() {
    let _engine = headless();
    let actor = spawn(Kind::Actor);
    let first = create(actor, Kind::SceneComponent, false);
    let second = create(actor, Kind::CameraComponent, true);
    assert_eq!(uflat_actor_get_root_component(actor, Kind::SceneComponent.raw()), second);
    assert!(uflat_actor_set_root_component(actor, first));
    assert!(uflat_object_cast(uflat_actor_get_root_component(actor, Kind::SceneComponent.raw()), Kind::CameraComponent.raw()).is_null());
}

#[test]
fn non_attachable_kinds_are_rejected_for_creation_but_found_by_lookup() {
    let engine = headless();
    let actor = spawn(Kind::PlayerController);
    assert!(create(actor, Kind::InputComponent, false).is_null());

    let input = engine.ensure_input_component(actor);
    let found = unsafe { uflat_actor_get_component(actor, ptr::null(), Kind::InputComponent.raw()) };
    assert_eq!(found, input);
    assert_eq!(uflat_actor_get_input_component(actor), input);
}

#[test]
fn component_lookup_by_name() {
    let _engine = headless();
    let actor = spawn(Kind::Actor);
    let mesh = unsafe {
        uflat_scene_component_create(actor, Kind::StaticMeshComponent.raw(), c"Body".as_ptr(), false, ObjectHandle::null())
    };
    let _other = create(actor, Kind::StaticMeshComponent, false);
    let found = unsafe { uflat_actor_get_component(actor, c"Body".as_ptr(), Kind::StaticMeshComponent.raw()) };
    assert_eq!(found, mesh);
    let wrong_kind = unsafe { uflat_actor_get_component(actor, c"Body".as_ptr(), Kind::BoxComponent.raw()) };
    assert!(wrong_kind.is_null());
}

#[test]
fn attached_actor_walks_up_the_hierarchy() {
    let _engine = headless();
    let vehicle = spawn(Kind::Pawn);
    let vehicle_root = create(vehicle, Kind::SceneComponent, false);
    let rider = spawn(Kind::Character);
    let rider_root = create(rider, Kind::CapsuleComponent, false);

    let rule = AttachmentTransformRule::KeepWorldTransform.raw();
    assert!(unsafe { uflat_scene_component_attach_to_component(rider_root, vehicle_root, rule, c"Seat".as_ptr()) });
    assert_eq!(uflat_scene_component_get_attached_actor(rider_root, Kind::Pawn.raw()), vehicle);
    assert!(uflat_scene_component_get_attached_actor(rider_root, Kind::PointLight.raw()).is_null());
    assert!(uflat_scene_component_is_attached_to_actor(rider_root, vehicle));
}

#[test]
fn actor_attachment_uses_roots() {
    let engine = headless();
    let parent = spawn(Kind::Actor);
    let parent_root = create(parent, Kind::SceneComponent, false);
    let child = spawn(Kind::Actor);
    let child_root = create(child, Kind::SceneComponent, false);

    unsafe { uflat_actor_attach_to_actor(child, parent, 77, c"Hand".as_ptr()) };
    assert!(uflat_scene_component_is_attached_to_component(child_root, parent_root));
    assert_eq!(engine.socket_of(child_root).as_deref(), Some("Hand"));
}

#[test]
fn component_tags_and_destruction() {
    let engine = headless();
    let actor = spawn(Kind::Actor);
    let root = create(actor, Kind::SceneComponent, false);
    let child = create(actor, Kind::AudioComponent, false);

    unsafe { uflat_actor_component_add_tag(child, c"Music".as_ptr()) };
    assert!(unsafe { uflat_actor_component_has_tag(child, c"Music".as_ptr()) });
    unsafe { uflat_actor_component_remove_tag(child, c"Music".as_ptr()) };
    assert!(!unsafe { uflat_actor_component_has_tag(child, c"Music".as_ptr()) });

    uflat_actor_component_destroy(root, true);
    assert!(uflat_object_is_pending_kill(root));
    assert!(!uflat_object_is_pending_kill(child));
    assert!(engine.is_registered(child));
}

// ---------------------------------------------------------------------------
// Value marshaling
// ---------------------------------------------------------------------------

#[test]
fn transforms_round_trip_bit_identical() {
    let _engine = headless();
    let actor = spawn(Kind::Actor);
    let root = create(actor, Kind::SceneComponent, false);

    let vectors = [
        Vector3::default(),
        Vector3 { x: 1.0, y: 0.0, z: 0.0 },
        Vector3 { x: 0.0, y: 1.0, z: 0.0 },
        Vector3 { x: 0.0, y: 0.0, z: 1.0 },
    ];
    for v in vectors {
        let mut out = Vector3 { x: f32::NAN, y: f32::NAN, z: f32::NAN };
        unsafe {
            uflat_scene_component_set_world_location(root, &v);
            uflat_scene_component_get_world_location(root, &mut out);
        }
        assert_eq!(out.x.to_bits(), v.x.to_bits());
        assert_eq!(out.y.to_bits(), v.y.to_bits());
        assert_eq!(out.z.to_bits(), v.z.to_bits());
    }

    let transform = Transform {
        location: Vector3 { x: 12.5, y: -3.25, z: 100.0 },
        rotation: Quaternion { x: 0.0, y: 0.0, z: 0.707_106_8, w: 0.707_106_8 },
        scale: Vector3 { x: 1.0, y: 2.0, z: 0.5 },
    };
    let mut out = Transform::default();
    unsafe {
        uflat_scene_component_set_relative_transform(root, &transform);
        uflat_scene_component_get_relative_transform(root, &mut out);
    }
    assert_eq!(out, transform);
}

#[test]
fn null_value_pointers_are_skipped() {
    let _engine = headless();
    let actor = spawn(Kind::Actor);
    let root = create(actor, Kind::SceneComponent, false);
    unsafe {
        uflat_scene_component_set_world_location(root, ptr::null());
        uflat_scene_component_get_world_location(root, ptr::null_mut());
        uflat_world_get_world_origin(ptr::null_mut());
        uflat_engine_get_viewport_size(ptr::null_mut());
    }
    let mut out = Vector3 { x: 9.0, y: 9.0, z: 9.0 };
    unsafe { uflat_scene_component_get_world_location(root, &mut out) };
    assert_eq!(out, Vector3::default());
}

#[test]
fn shape_color_channel_extremes() {
    let _engine = headless();
    let actor = spawn(Kind::Actor);
    let shape = create(actor, Kind::BoxComponent, false);

    for (color, packed) in [
        (Color { b: 0, g: 0, r: 0, a: 0 }, 0x0000_0000u32),
        (Color { b: 255, g: 0, r: 0, a: 0 }, 0x0000_00FF),
        (Color { b: 0, g: 255, r: 0, a: 0 }, 0x0000_FF00),
        (Color { b: 0, g: 0, r: 255, a: 0 }, 0x00FF_0000),
        (Color { b: 0, g: 0, r: 0, a: 255 }, 0xFF00_0000),
    ] {
        unsafe { uflat_shape_component_set_shape_color(shape, &color) };
        assert_eq!(uflat_shape_component_get_shape_color(shape) as u32, packed);
    }
}

#[test]
fn box_extent_scales_with_world_scale() {
    let _engine = headless();
    let actor = spawn(Kind::Actor);
    let shape = create(actor, Kind::BoxComponent, false);
    let extent = Vector3 { x: 10.0, y: 20.0, z: 30.0 };
    let scaled = Transform { scale: Vector3 { x: 2.0, y: 1.0, z: 0.5 }, ..Transform::default() };

    let (mut unscaled_out, mut scaled_out) = (Vector3::default(), Vector3::default());
    unsafe {
        uflat_box_component_set_box_extent(shape, &extent, false);
        uflat_scene_component_set_world_transform(shape, &scaled);
        uflat_box_component_get_unscaled_box_extent(shape, &mut unscaled_out);
        uflat_box_component_get_scaled_box_extent(shape, &mut scaled_out);
    }
    assert_eq!(unscaled_out, extent);
    assert_eq!(scaled_out, Vector3 { x: 20.0, y: 20.0, z: 15.0 });
}

#[test]
fn names_round_trip_and_truncate() {
    let _engine = headless();
    let actor = spawn(Kind::Actor);
    assert!(unsafe { uflat_object_rename(actor, c"Crate_07".as_ptr()) });
    assert_eq!(read_name(actor), "Crate_07");

    let mut needed = 0usize;
    let code = unsafe { uflat_object_get_name(actor, ptr::null_mut(), 0, &mut needed) };
    assert_eq!(code, FlatErrorCode::BufferTooSmall);
    assert_eq!(needed, 8);

    let mut small = [0x7f as c_char; 4];
    let code = unsafe { uflat_object_get_name(actor, small.as_mut_ptr(), small.len(), &mut needed) };
    assert_eq!(code, FlatErrorCode::BufferTooSmall);
    assert_eq!(unsafe { CStr::from_ptr(small.as_ptr()) }.to_bytes(), b"Cra");

    let code = unsafe { uflat_object_get_name(ObjectHandle::null(), small.as_mut_ptr(), small.len(), ptr::null_mut()) };
    assert_eq!(code, FlatErrorCode::NullArgument);
}

#[test]
fn application_text_surface() {
    let _engine = headless();
    unsafe {
        uflat_application_set_project_name(c"Arena".as_ptr());
        uflat_command_line_set(c"-log".as_ptr());
        uflat_command_line_append(c"-windowed".as_ptr());
    }
    let mut buf = [0 as c_char; 32];
    let code = unsafe { uflat_application_get_project_name(buf.as_mut_ptr(), buf.len(), ptr::null_mut()) };
    assert_eq!(code, FlatErrorCode::Ok);
    assert_eq!(unsafe { CStr::from_ptr(buf.as_ptr()) }.to_bytes(), b"Arena");

    let code = unsafe { uflat_command_line_get(buf.as_mut_ptr(), buf.len(), ptr::null_mut()) };
    assert_eq!(code, FlatErrorCode::Ok);
    assert_eq!(unsafe { CStr::from_ptr(buf.as_ptr()) }.to_bytes(), b"-log -windowed");

    uflat_application_set_volume_multiplier(0.25);
    assert_eq!(uflat_application_get_volume_multiplier(), 0.25);
}

// ---------------------------------------------------------------------------
// Rule translation
// ---------------------------------------------------------------------------

#[test]
fn unknown_enum_values_take_defaults() {
    let engine = headless();
    let actor = spawn(Kind::Actor);
    let root = create(actor, Kind::StaticMeshComponent, false);

    uflat_scene_component_set_mobility(root, ComponentMobility::Static.raw());
    assert_eq!(uflat_scene_component_get_mobility(root), ComponentMobility::Static.raw());
    uflat_scene_component_set_mobility(root, 41);
    assert_eq!(uflat_scene_component_get_mobility(root), ComponentMobility::Movable.raw());

    uflat_scene_component_update_to_world(root, -1);
    assert_eq!(engine.last_teleport(root), Some(TeleportMode::None));

    let origin = Vector3::default();
    unsafe { uflat_primitive_component_add_radial_force(root, &origin, 100.0, 5.0, 9, false) };
    unsafe { uflat_primitive_component_add_radial_impulse(root, &origin, 100.0, 5.0, FalloffMode::Linear.raw(), true) };
    let records = engine.physics_records(root);
    assert!(matches!(records[0], PhysicsRecord::RadialForce { falloff: RadialFalloff::Constant, .. }));
    assert!(matches!(records[1], PhysicsRecord::RadialImpulse { falloff: RadialFalloff::Linear, velocity_change: true, .. }));
}

#[test]
fn forces_carry_the_bone_name() {
    let engine = headless();
    let actor = spawn(Kind::Character);
    let mesh = create(actor, Kind::SkeletalMeshComponent, false);
    let force = Vector3 { x: 0.0, y: 0.0, z: 500.0 };
    unsafe {
        uflat_primitive_component_add_force(mesh, &force, c"spine_01".as_ptr(), true);
        uflat_primitive_component_add_force(mesh, ptr::null(), ptr::null(), true);
    }
    let records = engine.physics_records(mesh);
    assert_eq!(records.len(), 1);
    match &records[0] {
        PhysicsRecord::Force { bone, accel_change, .. } => {
            assert_eq!(bone.as_deref(), Some("spine_01"));
            assert!(*accel_change);
        }
        other => panic!("unexpected record {other:?}"),
    }
}

#[test]
fn view_target_blend_defaults_to_linear() {
    let engine = headless();
    let player = spawn(Kind::PlayerController);
    let camera = spawn(Kind::CameraActor);
    uflat_player_controller_set_view_target_with_blend(player, camera, 0.5, 2.0, 99, false);
    assert_eq!(engine.view_target(player), (camera, Some(ViewTargetBlend::Linear)));
    uflat_player_controller_set_view_target_with_blend(player, camera, 0.5, 2.0, BlendType::EaseOut.raw(), false);
    assert_eq!(engine.view_target(player).1, Some(ViewTargetBlend::EaseOut));
}

// ---------------------------------------------------------------------------
// Callback bridge
// ---------------------------------------------------------------------------

#[test]
fn variable_callback_replacement_and_clearing() {
    let engine = headless();
    let variable = unsafe { uflat_console_manager_register_variable_int(c"t.Lives".as_ptr(), ptr::null(), 3, false) };
    assert!(!variable.is_null());
    assert!(uflat_console_object_is_int(variable));

    let (a, b) = (Cell::new(0u32), Cell::new(0u32));
    unsafe {
        uflat_console_variable_set_on_changed_callback(variable, Some(count), ctx(&a));
        uflat_console_variable_set_on_changed_callback(variable, Some(count), ctx(&b));
    }
    uflat_console_variable_set_int(variable, 4);
    assert_eq!((a.get(), b.get()), (0, 1));

    uflat_console_variable_clear_on_changed_callback(variable);
    uflat_console_variable_set_int(variable, 5);
    assert_eq!((a.get(), b.get()), (0, 1));

    unsafe { uflat_console_variable_set_on_changed_callback(variable, Some(count), ctx(&a)) };
    assert!(engine.exec("t.Lives 9"));
    assert_eq!(a.get(), 1);
    assert_eq!(uflat_console_variable_get_int(variable), 9);
}

#[test]
fn variables_keep_their_registered_type() {
    let _engine = headless();
    let variable = unsafe {
        uflat_console_manager_register_variable_string(c"t.Map".as_ptr(), c"Start map".as_ptr(), c"Lobby".as_ptr(), false)
    };
    assert!(uflat_console_object_is_string(variable));
    assert_eq!(unsafe { uflat_console_manager_find_variable(c"T.MAP".as_ptr()) }, variable);
    assert!(unsafe { uflat_console_manager_is_registered_variable(c"t.map".as_ptr()) });

    uflat_console_variable_set_float(variable, 1.5);
    let mut buf = [0 as c_char; 16];
    let code = unsafe { uflat_console_variable_get_string(variable, buf.as_mut_ptr(), buf.len(), ptr::null_mut()) };
    assert_eq!(code, FlatErrorCode::Ok);
    assert_eq!(unsafe { CStr::from_ptr(buf.as_ptr()) }.to_bytes(), b"1.5");

    let flag = unsafe { uflat_console_manager_register_variable_bool(c"t.God".as_ptr(), ptr::null(), false, false) };
    unsafe { uflat_console_variable_set_string(flag, c"1".as_ptr()) };
    assert!(uflat_console_variable_get_bool(flag));
    assert!(!uflat_console_object_is_float(flag));

    unsafe { uflat_console_manager_unregister_object(c"t.God".as_ptr()) };
    assert!(!unsafe { uflat_console_manager_is_registered_variable(c"t.God".as_ptr()) });
}

#[test]
fn commands_fire_only_while_running() {
    let _guard = lifecycle();
    ensure_running();
    let engine = headless();
    let player = spawn(Kind::PlayerController);
    let seen = RefCell::new(Vec::<f32>::new());
    let command = unsafe {
        uflat_console_manager_register_command(c"Speed".as_ptr(), c"Set speed".as_ptr(), Some(record), ctx(&seen), false)
    };
    assert!(!command.is_null());

    assert!(unsafe { uflat_player_controller_console_command(player, c"Speed 2.5 ignored".as_ptr(), true) });
    assert!(unsafe { uflat_player_controller_console_command(player, c"Speed fast".as_ptr(), false) });
    assert_eq!(*seen.borrow(), vec![2.5, 0.0]);

    uflat_shutdown();
    assert_eq!(runtime_status().get(), RuntimeStatus::Terminated);
    assert!(engine.exec("Speed 7"));
    assert_eq!(seen.borrow().len(), 2);

    assert!(uflat_initialize());
    assert!(engine.exec("Speed 7"));
    assert_eq!(*seen.borrow(), vec![2.5, 0.0, 7.0]);
}

#[test]
fn duplicate_or_null_commands_are_not_registered() {
    let _engine = headless();
    let seen = RefCell::new(Vec::<f32>::new());
    let first =
        unsafe { uflat_console_manager_register_command(c"Jump".as_ptr(), ptr::null(), Some(record), ctx(&seen), false) };
    let second =
        unsafe { uflat_console_manager_register_command(c"jump".as_ptr(), ptr::null(), Some(record), ctx(&seen), false) };
    let unbound = unsafe { uflat_console_manager_register_command(c"Crouch".as_ptr(), ptr::null(), None, ptr::null_mut(), false) };
    assert!(!first.is_null());
    assert!(second.is_null());
    assert!(unbound.is_null());
}

#[test]
fn action_bindings_fire_through_the_input_component() {
    let engine = headless();
    let player = spawn(Kind::PlayerController);
    let input = engine.ensure_input_component(player);
    let (first, second) = (Cell::new(0u32), Cell::new(0u32));

    let pressed = InputEvent::Pressed.raw();
    assert!(unsafe { uflat_input_component_bind_action(input, c"Fire".as_ptr(), pressed, false, Some(count), ctx(&first)) });
    assert!(unsafe { uflat_input_component_bind_action(input, c"Fire".as_ptr(), pressed, false, Some(count), ctx(&second)) });
    assert!(!unsafe { uflat_input_component_bind_action(input, c"Fire".as_ptr(), 12, false, Some(count), ctx(&first)) });
    assert!(!unsafe { uflat_input_component_bind_action(input, c"Fire".as_ptr(), pressed, false, None, ptr::null_mut()) });
    assert_eq!(uflat_input_component_get_action_bindings_number(input), 2);
    assert!(uflat_input_component_has_bindings(input));

    assert_eq!(engine.dispatch_action("Fire", InputTrigger::Pressed), 1);
    assert_eq!((first.get(), second.get()), (0, 1));

    unsafe { uflat_input_component_remove_action_binding(input, c"Fire".as_ptr(), pressed) };
    assert_eq!(uflat_input_component_get_action_bindings_number(input), 0);
    assert_eq!(engine.dispatch_action("Fire", InputTrigger::Pressed), 0);
}

#[test]
fn paused_games_only_reach_paused_bindings() {
    let engine = headless();
    let player = spawn(Kind::PlayerController);
    let input = engine.ensure_input_component(player);
    let (menu, fire) = (Cell::new(0u32), Cell::new(0u32));
    let pressed = InputEvent::Pressed.raw();
    unsafe {
        uflat_input_component_bind_action(input, c"Menu".as_ptr(), pressed, true, Some(count), ctx(&menu));
        uflat_input_component_bind_action(input, c"Fire".as_ptr(), pressed, false, Some(count), ctx(&fire));
    }

    assert!(uflat_player_controller_set_pause(player, true));
    assert!(uflat_player_controller_is_paused(player));
    engine.dispatch_action("Menu", InputTrigger::Pressed);
    engine.dispatch_action("Fire", InputTrigger::Pressed);
    assert_eq!((menu.get(), fire.get()), (1, 0));

    uflat_input_component_clear_action_bindings(input);
    assert!(!uflat_input_component_has_bindings(input));
}

#[test]
fn axis_bindings_receive_the_value() {
    let engine = headless();
    let pawn = spawn(Kind::Pawn);
    let input = engine.ensure_input_component(pawn);
    let seen = RefCell::new(Vec::<f32>::new());
    assert!(unsafe { uflat_input_component_bind_axis(input, c"MoveForward".as_ptr(), false, Some(record), ctx(&seen)) });

    uflat_input_component_set_priority(input, 3);
    uflat_input_component_set_block_input(input, true);
    assert_eq!(uflat_input_component_get_priority(input), 3);
    assert!(uflat_input_component_get_block_input(input));

    engine.dispatch_axis("MoveForward", -0.5);
    engine.dispatch_axis("MoveRight", 1.0);
    assert_eq!(*seen.borrow(), vec![-0.5]);
}

// ---------------------------------------------------------------------------
// Handles and world
// ---------------------------------------------------------------------------

#[test]
fn destroyed_actors_stay_valid_until_collected() {
    let _engine = headless();
    let actor = spawn(Kind::Brush);
    assert!(uflat_object_is_valid(actor));
    assert!(!uflat_actor_is_pending_kill(actor));

    assert!(uflat_actor_destroy(actor));
    assert!(uflat_object_is_valid(actor));
    assert!(uflat_actor_is_pending_kill(actor));
    assert_eq!(uflat_world_get_actor_count(), 0);

    uflat_engine_force_garbage_collection(true);
    assert!(!uflat_object_is_valid(actor));
    assert!(!uflat_object_is_pending_kill(actor));
    assert!(uflat_object_cast(actor, Kind::Brush.raw()).is_null());
}

#[test]
fn world_settings_and_controllers() {
    let engine = headless();
    assert!(uflat_world_get_first_player_controller().is_null());
    let player = spawn(Kind::PlayerController);
    let pawn = spawn(Kind::Character);
    assert_eq!(uflat_world_get_first_player_controller(), player);
    assert!(engine.possess(player, pawn));
    assert_eq!(uflat_controller_get_pawn(player), pawn);

    uflat_world_set_simulate_physics(true);
    assert!(uflat_world_get_simulate_physics());
    uflat_world_set_gravity(-490.0);
    assert_eq!(engine.gravity_z(), -490.0);

    let origin = Vector3 { x: 1000.0, y: 0.0, z: -50.0 };
    let mut out = Vector3::default();
    unsafe {
        uflat_world_set_world_origin(&origin);
        uflat_world_get_world_origin(&mut out);
    }
    assert_eq!(out, origin);
}

#[test]
fn engine_surface() {
    let engine = headless();
    uflat_engine_set_max_fps(60.0);
    assert_eq!(uflat_engine_get_max_fps(), 60.0);
    engine.tick();
    assert_eq!(uflat_engine_get_frame_number(), 1);

    unsafe {
        uflat_engine_add_action_mapping(c"Jump".as_ptr(), c"SpaceBar".as_ptr(), false, false, false, false);
        uflat_engine_add_axis_mapping(c"MoveForward".as_ptr(), c"W".as_ptr(), 1.0);
        uflat_engine_add_axis_mapping(ptr::null(), c"S".as_ptr(), -1.0);
    }
    assert_eq!(engine.action_mappings().len(), 1);
    assert_eq!(engine.axis_mappings().len(), 1);

    assert!(!uflat_engine_is_exit_requested());
    uflat_engine_request_exit(false);
    assert!(uflat_engine_is_exit_requested());

    let mut needed = 0usize;
    let code = unsafe { uflat_engine_get_version(ptr::null_mut(), 0, &mut needed) };
    assert_eq!(code, FlatErrorCode::BufferTooSmall);
    assert!(needed > 0);
}

#[test]
fn debug_log_drops_unknown_levels() {
    let engine = headless();
    unsafe {
        uflat_debug_log(1, c"low ammo".as_ptr());
        uflat_debug_log(8, c"lost".as_ptr());
        uflat_debug_log(0, ptr::null());
        uflat_debug_handle_exception(c"NullReference".as_ptr());
    }
    let messages: Vec<String> = engine.log_records().into_iter().map(|(_, m)| m).collect();
    assert_eq!(messages, vec!["low ammo".to_string(), "[uflat] caller exception: NullReference".to_string()]);
}

#[test]
fn no_engine_means_default_results() {
    std::thread::spawn(|| {
        assert_eq!(uflat_world_get_actor_count(), 0);
        assert!(spawn(Kind::Actor).is_null());
        assert!(!uflat_object_is_valid(ObjectHandle::from_addr(1)));
        let mut buf = [0 as c_char; 8];
        let code = unsafe { uflat_object_get_name(ObjectHandle::from_addr(1), buf.as_mut_ptr(), buf.len(), ptr::null_mut()) };
        assert_eq!(code, FlatErrorCode::NoEngine);
    })
    .join()
    .unwrap();
}

#[test]
fn headless_install_from_missing_file_fails() {
    std::thread::spawn(|| {
        assert!(!unsafe { uflat_install_headless(c"/nonexistent/uflat.toml".as_ptr()) });
        assert!(!uflat_runtime::is_engine_installed());
        assert!(unsafe { uflat_install_headless(ptr::null()) });
        assert!(uflat_runtime::is_engine_installed());
        assert_eq!(uflat_kind_table_version(), uflat_ffi::KIND_TABLE_VERSION);
    })
    .join()
    .unwrap();
}

#[test]
fn failed_headless_install_is_logged_to_the_bound_engine() {
    let engine = headless();
    assert!(!unsafe { uflat_install_headless(c"/nonexistent/uflat.toml".as_ptr()) });
    assert!(uflat_runtime::is_engine_installed());
    let (level, message) = engine.log_records().last().cloned().unwrap();
    assert_eq!(level, uflat_runtime::engine::LogVerbosity::Error);
    assert!(message.starts_with("[uflat] headless engine not installed: "));
}

#[test]
fn console_commands_cannot_change_read_only_variables() {
    let _engine = headless();
    let player = spawn(Kind::PlayerController);
    let locked = unsafe { uflat_console_manager_register_variable_int(c"r.Locked".as_ptr(), ptr::null(), 1, true) };
    assert!(unsafe { uflat_player_controller_console_command(player, c"r.Locked 99".as_ptr(), false) });
    assert_eq!(uflat_console_variable_get_int(locked), 1);

    uflat_console_variable_set_int(locked, 2);
    assert_eq!(uflat_console_variable_get_int(locked), 2);
}

#[test]
fn lookups_ignore_name_and_tag_case() {
    let _engine = headless();
    let hero = unsafe { uflat_actor_spawn(c"Hero".as_ptr(), Kind::Pawn.raw(), ObjectHandle::null()) };
    unsafe { uflat_actor_add_tag(hero, c"Enemy".as_ptr()) };
    assert_eq!(unsafe { uflat_world_get_actor(c"hero".as_ptr(), Kind::Pawn.raw()) }, hero);
    assert_eq!(unsafe { uflat_world_get_actor_by_tag(c"ENEMY".as_ptr(), Kind::Pawn.raw()) }, hero);
    assert!(unsafe { uflat_actor_has_tag(hero, c"enemy".as_ptr()) });

    let body = unsafe {
        uflat_scene_component_create(hero, Kind::BoxComponent.raw(), c"Body".as_ptr(), false, ObjectHandle::null())
    };
    assert_eq!(unsafe { uflat_actor_get_component(hero, c"body".as_ptr(), Kind::BoxComponent.raw()) }, body);
}
