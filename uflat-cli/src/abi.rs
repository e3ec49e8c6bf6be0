// ABI manifest: everything an external binding generator needs to mirror the
// boundary (kind tags and families, enum values, value-type layouts, error
// codes) in one serializable document.

use std::mem::{align_of, size_of};

use serde::Serialize;

use uflat_ffi::{
    AttachmentTransformRule, BlendType, ClassHandle, Color, ComponentMobility, ConsoleObjectHandle, FalloffMode,
    FlatErrorCode, InputEvent, Kind, LinearColor, LogLevel, ObjectHandle, ObjectType, Quaternion, TeleportType,
    Transform, Vector2, Vector3, KIND_TABLE_VERSION,
};
use uflat_runtime::dispatch::{in_family, Family};

#[derive(Serialize, Debug)]
pub struct Manifest {
    pub kind_table_version: u32,
    pub kinds: Vec<KindEntry>,
    pub enums: Vec<EnumEntry>,
    pub layouts: Vec<LayoutEntry>,
    pub error_codes: Vec<Variant>,
}

#[derive(Serialize, Debug)]
pub struct KindEntry {
    pub name: &'static str,
    pub tag: i32,
    pub spawnable: bool,
    pub attachable: bool,
    pub component: bool,
}

#[derive(Serialize, Debug)]
pub struct EnumEntry {
    pub name: &'static str,
    pub variants: Vec<Variant>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Variant {
    pub name: &'static str,
    pub value: i64,
}

#[derive(Serialize, Debug)]
pub struct LayoutEntry {
    pub name: &'static str,
    pub size: usize,
    pub align: usize,
    /// Scalar fields in memory order.
    pub fields: &'static [&'static str],
}

const ERROR_CODES: &[FlatErrorCode] = &[
    FlatErrorCode::Ok,
    FlatErrorCode::ObjectDestroyed,
    FlatErrorCode::InvalidCast,
    FlatErrorCode::UnknownKind,
    FlatErrorCode::NotFound,
    FlatErrorCode::NullArgument,
    FlatErrorCode::InvalidOperation,
    FlatErrorCode::InternalError,
    FlatErrorCode::BufferTooSmall,
    FlatErrorCode::NoEngine,
];

macro_rules! enum_entry {
    ($ty:ident) => {
        EnumEntry {
            name: stringify!($ty),
            variants: $ty::ALL.iter().map(|v| Variant { name: v.name(), value: v.raw() as i64 }).collect(),
        }
    };
}

macro_rules! layout {
    ($ty:ty, [$($field:literal),*]) => {
        LayoutEntry {
            name: stringify!($ty),
            size: size_of::<$ty>(),
            align: align_of::<$ty>(),
            fields: &[$($field),*],
        }
    };
}

pub fn manifest() -> Manifest {
    let kinds = Kind::ALL
        .iter()
        .map(|&kind| KindEntry {
            name: kind.name(),
            tag: kind.raw(),
            spawnable: in_family(kind, Family::Spawnable),
            attachable: in_family(kind, Family::Attachable),
            component: in_family(kind, Family::Component),
        })
        .collect();

    let enums = vec![
        enum_entry!(AttachmentTransformRule),
        enum_entry!(ComponentMobility),
        enum_entry!(TeleportType),
        enum_entry!(BlendType),
        enum_entry!(FalloffMode),
        enum_entry!(LogLevel),
        enum_entry!(InputEvent),
        enum_entry!(ObjectType),
    ];

    let layouts = vec![
        layout!(ObjectHandle, ["ptr"]),
        layout!(ClassHandle, ["ptr"]),
        layout!(ConsoleObjectHandle, ["ptr"]),
        layout!(Vector2, ["x", "y"]),
        layout!(Vector3, ["x", "y", "z"]),
        layout!(Quaternion, ["x", "y", "z", "w"]),
        layout!(Transform, ["location.x", "location.y", "location.z", "rotation.x", "rotation.y", "rotation.z", "rotation.w", "scale.x", "scale.y", "scale.z"]),
        layout!(Color, ["b", "g", "r", "a"]),
        layout!(LinearColor, ["r", "g", "b", "a"]),
    ];

    let error_codes = ERROR_CODES
        .iter()
        .map(|&code| Variant { name: error_name(code), value: code as u32 as i64 })
        .collect();

    Manifest { kind_table_version: KIND_TABLE_VERSION, kinds, enums, layouts, error_codes }
}

fn error_name(code: FlatErrorCode) -> &'static str {
    match code {
        FlatErrorCode::Ok => "Ok",
        FlatErrorCode::ObjectDestroyed => "ObjectDestroyed",
        FlatErrorCode::InvalidCast => "InvalidCast",
        FlatErrorCode::UnknownKind => "UnknownKind",
        FlatErrorCode::NotFound => "NotFound",
        FlatErrorCode::NullArgument => "NullArgument",
        FlatErrorCode::InvalidOperation => "InvalidOperation",
        FlatErrorCode::InternalError => "InternalError",
        FlatErrorCode::BufferTooSmall => "BufferTooSmall",
        FlatErrorCode::NoEngine => "NoEngine",
    }
}

/// Plain-text rendering, one section per table.
pub fn render_text(manifest: &Manifest) -> String {
    let mut out = String::new();
    out.push_str(&format!("kind table v{}\n", manifest.kind_table_version));
    for kind in &manifest.kinds {
        let mut families = Vec::new();
        if kind.spawnable {
            families.push("spawnable");
        }
        if kind.attachable {
            families.push("attachable");
        }
        if kind.component {
            families.push("component");
        }
        out.push_str(&format!("  {:>3}  {:<30} {}\n", kind.tag, kind.name, families.join(", ")));
    }

    for entry in &manifest.enums {
        out.push_str(&format!("\nenum {}\n", entry.name));
        for v in &entry.variants {
            out.push_str(&format!("  {:>3}  {}\n", v.value, v.name));
        }
    }

    out.push_str("\nlayouts\n");
    for layout in &manifest.layouts {
        out.push_str(&format!(
            "  {:<20} size {:>2} align {}  [{}]\n",
            layout.name,
            layout.size,
            layout.align,
            layout.fields.join(", ")
        ));
    }

    out.push_str("\nerror codes\n");
    for code in &manifest.error_codes {
        out.push_str(&format!("  {:>3}  {}\n", code.value, code.name));
    }
    out
}
