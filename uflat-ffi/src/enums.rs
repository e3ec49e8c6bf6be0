// Boundary enumerations. These cross the boundary as plain `i32` values;
// entry points never transmute a raw value into one of these enums, they go
// through `from_raw`, which rejects anything outside the declared set.

/// Declares a closed boundary enumeration with explicit discriminants.
///
/// Generates `from_raw`, `raw`, `name` and an `ALL` table in declaration order.
#[macro_export]
macro_rules! boundary_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i32)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Map a raw boundary value. Unknown values yield `None`.
            pub const fn from_raw(raw: i32) -> Option<Self> {
                match raw {
                    $(v if v == $value => Some($name::$variant),)+
                    _ => None,
                }
            }

            #[inline]
            pub const fn raw(self) -> i32 {
                self as i32
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)+
                }
            }
        }
    };
}

boundary_enum! {
    /// How a child keeps or adopts its transform when attached.
    pub enum AttachmentTransformRule {
        KeepRelativeTransform = 0,
        KeepWorldTransform = 1,
        SnapToTargetIncludingScale = 2,
        SnapToTargetNotIncludingScale = 3,
    }
}

boundary_enum! {
    pub enum ComponentMobility {
        Static = 0,
        Stationary = 1,
        Movable = 2,
    }
}

boundary_enum! {
    pub enum TeleportType {
        None = 0,
        TeleportPhysics = 1,
        ResetPhysics = 2,
    }
}

boundary_enum! {
    /// View-target blend curve.
    pub enum BlendType {
        Linear = 0,
        Cubic = 1,
        EaseIn = 2,
        EaseOut = 3,
        EaseInOut = 4,
    }
}

boundary_enum! {
    /// Radial force/impulse falloff.
    pub enum FalloffMode {
        Constant = 0,
        Linear = 1,
    }
}

boundary_enum! {
    pub enum LogLevel {
        Display = 0,
        Warning = 1,
        Error = 2,
        Fatal = 3,
    }
}

boundary_enum! {
    /// Trigger event for an input action binding.
    pub enum InputEvent {
        Pressed = 0,
        Released = 1,
        Repeat = 2,
        DoubleClick = 3,
        Axis = 4,
    }
}

boundary_enum! {
    /// Asset kinds accepted by the asset loader.
    pub enum ObjectType {
        Blueprint = 0,
        SoundWave = 1,
        AnimationSequence = 2,
        AnimationMontage = 3,
        StaticMesh = 4,
        SkeletalMesh = 5,
        Material = 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_accepts_declared_values_only() {
        assert_eq!(BlendType::from_raw(2), Some(BlendType::EaseIn));
        assert_eq!(BlendType::from_raw(5), None);
        assert_eq!(BlendType::from_raw(-1), None);
    }

    #[test]
    fn all_is_in_declaration_order() {
        let raws: Vec<i32> = ComponentMobility::ALL.iter().map(|m| m.raw()).collect();
        assert_eq!(raws, vec![0, 1, 2]);
    }

    #[test]
    fn names_match_variants() {
        assert_eq!(ObjectType::AnimationMontage.name(), "AnimationMontage");
        assert_eq!(TeleportType::from_raw(0).map(TeleportType::name), Some("None"));
    }
}
