// The native classes this layer knows by name, with their single-inheritance
// parents. Engines resolve a class to a `ClassHandle` by its native name.

macro_rules! native_classes {
    ($($variant:ident => $name:literal : $parent:ident),+ $(,)?) => {
        /// A native class the bridge can name. `Object` is the root.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum NativeClass {
            Object,
            $($variant),+
        }

        impl NativeClass {
            pub const ALL: &'static [NativeClass] = &[NativeClass::Object, $(NativeClass::$variant),+];

            /// Native class name, as registered with the engine's reflection.
            pub const fn name(self) -> &'static str {
                match self {
                    NativeClass::Object => "Object",
                    $(NativeClass::$variant => $name,)+
                }
            }

            pub const fn parent(self) -> Option<NativeClass> {
                match self {
                    NativeClass::Object => None,
                    $(NativeClass::$variant => Some(NativeClass::$parent),)+
                }
            }
        }
    };
}

native_classes! {
    Actor => "Actor" : Object,
    CameraActor => "CameraActor" : Actor,
    Pawn => "Pawn" : Actor,
    Character => "Character" : Pawn,
    Controller => "Controller" : Actor,
    AiController => "AIController" : Controller,
    PlayerController => "PlayerController" : Controller,
    Brush => "Brush" : Actor,
    Volume => "Volume" : Brush,
    AmbientSound => "AmbientSound" : Actor,
    Light => "Light" : Actor,
    DirectionalLight => "DirectionalLight" : Light,
    PointLight => "PointLight" : Light,
    RectLight => "RectLight" : Light,
    SpotLight => "SpotLight" : Light,

    ActorComponent => "ActorComponent" : Object,
    InputComponent => "InputComponent" : ActorComponent,
    SceneComponent => "SceneComponent" : ActorComponent,
    AudioComponent => "AudioComponent" : SceneComponent,
    CameraComponent => "CameraComponent" : SceneComponent,
    PrimitiveComponent => "PrimitiveComponent" : SceneComponent,
    MotionControllerComponent => "MotionControllerComponent" : PrimitiveComponent,
    MeshComponent => "MeshComponent" : PrimitiveComponent,
    StaticMeshComponent => "StaticMeshComponent" : MeshComponent,
    InstancedStaticMeshComponent => "InstancedStaticMeshComponent" : StaticMeshComponent,
    SkinnedMeshComponent => "SkinnedMeshComponent" : MeshComponent,
    SkeletalMeshComponent => "SkeletalMeshComponent" : SkinnedMeshComponent,
    ShapeComponent => "ShapeComponent" : PrimitiveComponent,
    BoxComponent => "BoxComponent" : ShapeComponent,
    SphereComponent => "SphereComponent" : ShapeComponent,
    CapsuleComponent => "CapsuleComponent" : ShapeComponent,

    Class => "Class" : Object,
    Blueprint => "Blueprint" : Object,
    SoundBase => "SoundBase" : Object,
    SoundWave => "SoundWave" : SoundBase,
    AnimationAsset => "AnimationAsset" : Object,
    AnimSequence => "AnimSequence" : AnimationAsset,
    AnimMontage => "AnimMontage" : AnimationAsset,
    StaticMesh => "StaticMesh" : Object,
    SkeletalMesh => "SkeletalMesh" : Object,
    MaterialInterface => "MaterialInterface" : Object,
    Material => "Material" : MaterialInterface,
}

impl NativeClass {
    /// Walk the parent chain: is `self` the same class as, or derived from, `base`?
    pub fn is_child_of(self, base: NativeClass) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class == base {
                return true;
            }
            current = class.parent();
        }
        false
    }

    pub fn from_name(name: &str) -> Option<NativeClass> {
        NativeClass::ALL.iter().copied().find(|c| c.name() == name)
    }
}
