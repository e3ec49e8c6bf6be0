// Asset loading by (kind, path), and class overrides built from loaded assets.

use uflat_ffi::{ClassHandle, ObjectHandle, ObjectType};

use crate::classes::NativeClass;
use crate::dispatch::class_handle;
use crate::engine::Engine;
use crate::error::{FlatError, FlatResult};

/// Native class an asset kind is loaded as. Blueprints load as their
/// generated class.
pub const fn asset_class(ty: ObjectType) -> NativeClass {
    match ty {
        ObjectType::Blueprint => NativeClass::Class,
        ObjectType::SoundWave => NativeClass::SoundWave,
        ObjectType::AnimationSequence => NativeClass::AnimSequence,
        ObjectType::AnimationMontage => NativeClass::AnimMontage,
        ObjectType::StaticMesh => NativeClass::StaticMesh,
        ObjectType::SkeletalMesh => NativeClass::SkeletalMesh,
        ObjectType::Material => NativeClass::Material,
    }
}

/// `/Game/Dir/Name` becomes `/Game/Dir/Name.Name_C`. A path without a
/// directory just gets the suffix.
pub fn blueprint_class_path(path: &str) -> String {
    match path.rfind('/') {
        Some(index) => format!("{path}.{}_C", &path[index + 1..]),
        None => format!("{path}_C"),
    }
}

pub fn load_asset(engine: &dyn Engine, raw_type: i32, path: &str) -> FlatResult<ObjectHandle> {
    let ty = ObjectType::from_raw(raw_type)
        .ok_or_else(|| FlatError::InvalidOperation(format!("unknown asset type {raw_type}")))?;
    let class = class_handle(engine, asset_class(ty))?;
    let resolved = match ty {
        ObjectType::Blueprint => blueprint_class_path(path),
        _ => path.to_string(),
    };
    let object = engine.load_object(class, &resolved);
    if object.is_null() {
        Err(FlatError::NotFound(resolved))
    } else {
        Ok(object)
    }
}

/// The class a caller-supplied override object stands for. A null handle
/// means no override.
pub fn override_class(engine: &dyn Engine, object: ObjectHandle) -> FlatResult<Option<ClassHandle>> {
    if object.is_null() {
        return Ok(None);
    }
    let class = engine.class_from_object(object);
    if class.is_null() {
        Err(FlatError::InvalidCast)
    } else {
        Ok(Some(class))
    }
}
