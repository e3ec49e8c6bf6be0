// Type-tag dispatch: closed kind tags to native classes, for construction,
// narrowing lookup and kind checks on existing handles.

use uflat_ffi::{ClassHandle, Kind, ObjectHandle};

use crate::classes::NativeClass;
use crate::engine::{AttachmentTransformRules, DetachmentRule, Engine};
use crate::error::{FlatError, FlatResult};
use crate::logging::LOG_WARNING;
use crate::object_ref::checked;
use crate::ulog;

/// Which call shape a kind is being resolved for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    /// Actor kinds: spawnable into the world.
    Spawnable,
    /// Scene-component kinds: constructible and attachable.
    Attachable,
    /// Every component kind. Lookup only.
    Component,
}

impl Family {
    /// Root class every member of the family derives from.
    pub const fn base(self) -> NativeClass {
        match self {
            Family::Spawnable => NativeClass::Actor,
            Family::Attachable => NativeClass::SceneComponent,
            Family::Component => NativeClass::ActorComponent,
        }
    }
}

macro_rules! kind_table {
    ($($kind:ident => $class:ident [$($family:ident),+]),+ $(,)?) => {
        /// The concrete native class a kind tag stands for.
        pub const fn native_class(kind: Kind) -> NativeClass {
            match kind {
                $(Kind::$kind => NativeClass::$class,)+
            }
        }

        pub const fn in_family(kind: Kind, family: Family) -> bool {
            match kind {
                $(Kind::$kind => matches!(family, $(Family::$family)|+),)+
            }
        }
    };
}

kind_table! {
    Actor => Actor [Spawnable],
    CameraActor => CameraActor [Spawnable],
    Pawn => Pawn [Spawnable],
    Character => Character [Spawnable],
    AiController => AiController [Spawnable],
    PlayerController => PlayerController [Spawnable],
    Brush => Brush [Spawnable],
    AmbientSound => AmbientSound [Spawnable],
    DirectionalLight => DirectionalLight [Spawnable],
    PointLight => PointLight [Spawnable],
    RectLight => RectLight [Spawnable],
    SpotLight => SpotLight [Spawnable],

    ActorComponent => ActorComponent [Component],
    InputComponent => InputComponent [Component],
    SceneComponent => SceneComponent [Attachable, Component],
    AudioComponent => AudioComponent [Attachable, Component],
    CameraComponent => CameraComponent [Attachable, Component],
    MotionControllerComponent => MotionControllerComponent [Attachable, Component],
    StaticMeshComponent => StaticMeshComponent [Attachable, Component],
    InstancedStaticMeshComponent => InstancedStaticMeshComponent [Attachable, Component],
    BoxComponent => BoxComponent [Attachable, Component],
    SphereComponent => SphereComponent [Attachable, Component],
    CapsuleComponent => CapsuleComponent [Attachable, Component],
    SkeletalMeshComponent => SkeletalMeshComponent [Attachable, Component],
}

/// Map a raw boundary tag onto the kind table.
pub fn kind_from_raw(raw: i32) -> FlatResult<Kind> {
    Kind::from_raw(raw).ok_or(FlatError::UnknownKind(raw))
}

/// Resolve a native class to the engine's class descriptor.
pub fn class_handle(engine: &dyn Engine, class: NativeClass) -> FlatResult<ClassHandle> {
    let handle = engine.find_class(class.name());
    if handle.is_null() {
        Err(FlatError::ClassNotFound(class.name().to_string()))
    } else {
        Ok(handle)
    }
}

/// `Resolve(tag, family)`: the class descriptor for `kind`, or an error when
/// the tag is outside `family`.
pub fn resolve(engine: &dyn Engine, kind: Kind, family: Family) -> FlatResult<ClassHandle> {
    if !in_family(kind, family) {
        return Err(FlatError::KindNotInFamily { kind, family });
    }
    class_handle(engine, native_class(kind))
}

pub fn resolve_raw(engine: &dyn Engine, raw: i32, family: Family) -> FlatResult<ClassHandle> {
    resolve(engine, kind_from_raw(raw)?, family)
}

/// Pick the class to construct: the tag's class, or the override when it
/// derives from it. Mismatched overrides are rejected.
pub fn construction_class(
    engine: &dyn Engine,
    kind: Kind,
    family: Family,
    class_override: Option<ClassHandle>,
) -> FlatResult<ClassHandle> {
    let class = resolve(engine, kind, family)?;
    match class_override {
        None => Ok(class),
        Some(custom) if !custom.is_null() && engine.is_child_of(custom, class) => Ok(custom),
        Some(_) => {
            ulog!(LOG_WARNING, "class override is not a {}; construction refused", kind.name());
            Err(FlatError::InvalidCast)
        }
    }
}

/// Construct-by-tag for actors. Renames the new actor when `name` is given.
pub fn spawn(
    engine: &dyn Engine,
    kind: Kind,
    class_override: Option<ClassHandle>,
    name: Option<&str>,
) -> FlatResult<ObjectHandle> {
    let class = construction_class(engine, kind, Family::Spawnable, class_override)?;
    let actor = engine.spawn_actor(class);
    if actor.is_null() {
        return Err(FlatError::Internal(format!("spawn of {} failed", kind.name())));
    }
    if let Some(name) = name {
        engine.rename(actor, name);
    }
    Ok(actor)
}

/// Construct-by-tag for scene components.
///
/// The new component becomes the root when the actor has none or when
/// `set_as_root` is set; otherwise it is attached to the existing root,
/// keeping its relative transform. It is then registered with the actor.
pub fn create_scene_component(
    engine: &dyn Engine,
    actor: ObjectHandle,
    kind: Kind,
    class_override: Option<ClassHandle>,
    set_as_root: bool,
    name: Option<&str>,
) -> FlatResult<ObjectHandle> {
    let actor = checked(engine, actor)?;
    let class = construction_class(engine, kind, Family::Attachable, class_override)?;
    let component = engine.new_component(actor, class);
    if component.is_null() {
        return Err(FlatError::Internal(format!("construction of {} failed", kind.name())));
    }

    let root = engine.root_component(actor);
    if root.is_null() || set_as_root {
        engine.set_root_component(actor, component);
    } else {
        engine.attach_component(component, root, AttachmentTransformRules::KEEP_RELATIVE, None);
    }
    engine.register_component(actor, component);

    if let Some(name) = name {
        engine.rename(component, name);
    }
    Ok(component)
}

/// Make `component` the actor's root, detaching it from any parent first.
pub fn set_root_component(engine: &dyn Engine, actor: ObjectHandle, component: ObjectHandle) -> bool {
    engine.detach_component(component, DetachmentRule::KeepRelative);
    engine.set_root_component(actor, component)
}

/// Kind-check on retrieval: `obj` itself when its dynamic class is-a the
/// kind's class, `InvalidCast` otherwise. Never reinterprets blindly.
pub fn kind_check(engine: &dyn Engine, obj: ObjectHandle, kind: Kind) -> FlatResult<ObjectHandle> {
    let obj = checked(engine, obj)?;
    let class = class_handle(engine, native_class(kind))?;
    if engine.is_a(obj, class) {
        Ok(obj)
    } else {
        Err(FlatError::InvalidCast)
    }
}

/// Is `obj` an instance of the native class `class` (or a subclass)?
pub fn is_instance(engine: &dyn Engine, obj: ObjectHandle, class: NativeClass) -> bool {
    match class_handle(engine, class) {
        Ok(class) => engine.is_a(obj, class),
        Err(_) => false,
    }
}
