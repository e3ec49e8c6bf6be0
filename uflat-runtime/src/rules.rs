// Rule translation: raw boundary enum values to native enums.
//
// Every translator is total. Unrecognized values take the documented default
// (relative-preserving attachment, movable, no teleport, linear blend,
// constant falloff) without any signal.

use uflat_ffi::{
    AttachmentTransformRule, BlendType, ComponentMobility, FalloffMode, InputEvent, LogLevel, TeleportType,
};

use crate::engine::{
    AttachmentTransformRules, InputTrigger, LogVerbosity, Mobility, RadialFalloff, TeleportMode, ViewTargetBlend,
};

pub fn attachment_rules(raw: i32) -> AttachmentTransformRules {
    match AttachmentTransformRule::from_raw(raw) {
        Some(AttachmentTransformRule::KeepWorldTransform) => AttachmentTransformRules::KEEP_WORLD,
        Some(AttachmentTransformRule::SnapToTargetIncludingScale) => {
            AttachmentTransformRules::SNAP_TO_TARGET_INCLUDING_SCALE
        }
        Some(AttachmentTransformRule::SnapToTargetNotIncludingScale) => {
            AttachmentTransformRules::SNAP_TO_TARGET_NOT_INCLUDING_SCALE
        }
        Some(AttachmentTransformRule::KeepRelativeTransform) | None => AttachmentTransformRules::KEEP_RELATIVE,
    }
}

pub fn mobility(raw: i32) -> Mobility {
    match ComponentMobility::from_raw(raw) {
        Some(ComponentMobility::Static) => Mobility::Static,
        Some(ComponentMobility::Stationary) => Mobility::Stationary,
        Some(ComponentMobility::Movable) | None => Mobility::Movable,
    }
}

/// Native to boundary, for getters.
pub fn mobility_to_raw(mobility: Mobility) -> i32 {
    match mobility {
        Mobility::Static => ComponentMobility::Static.raw(),
        Mobility::Stationary => ComponentMobility::Stationary.raw(),
        Mobility::Movable => ComponentMobility::Movable.raw(),
    }
}

pub fn teleport(raw: i32) -> TeleportMode {
    match TeleportType::from_raw(raw) {
        Some(TeleportType::TeleportPhysics) => TeleportMode::TeleportPhysics,
        Some(TeleportType::ResetPhysics) => TeleportMode::ResetPhysics,
        Some(TeleportType::None) | None => TeleportMode::None,
    }
}

pub fn blend(raw: i32) -> ViewTargetBlend {
    match BlendType::from_raw(raw) {
        Some(BlendType::Cubic) => ViewTargetBlend::Cubic,
        Some(BlendType::EaseIn) => ViewTargetBlend::EaseIn,
        Some(BlendType::EaseOut) => ViewTargetBlend::EaseOut,
        Some(BlendType::EaseInOut) => ViewTargetBlend::EaseInOut,
        Some(BlendType::Linear) | None => ViewTargetBlend::Linear,
    }
}

pub fn falloff(raw: i32) -> RadialFalloff {
    match FalloffMode::from_raw(raw) {
        Some(FalloffMode::Linear) => RadialFalloff::Linear,
        Some(FalloffMode::Constant) | None => RadialFalloff::Constant,
    }
}

/// Log severity. Unknown values have no safe default and yield `None`; the
/// message is dropped.
pub fn log_level(raw: i32) -> Option<LogVerbosity> {
    LogLevel::from_raw(raw).map(|level| match level {
        LogLevel::Display => LogVerbosity::Display,
        LogLevel::Warning => LogVerbosity::Warning,
        LogLevel::Error => LogVerbosity::Error,
        LogLevel::Fatal => LogVerbosity::Fatal,
    })
}

/// Input trigger. Unknown values yield `None`; no binding is created.
pub fn input_event(raw: i32) -> Option<InputTrigger> {
    InputEvent::from_raw(raw).map(|event| match event {
        InputEvent::Pressed => InputTrigger::Pressed,
        InputEvent::Released => InputTrigger::Released,
        InputEvent::Repeat => InputTrigger::Repeat,
        InputEvent::DoubleClick => InputTrigger::DoubleClick,
        InputEvent::Axis => InputTrigger::Axis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUT_OF_RANGE: [i32; 6] = [-1, 5, 17, 255, i32::MIN, i32::MAX];

    #[test]
    fn declared_values_map_one_to_one() {
        assert_eq!(attachment_rules(1), AttachmentTransformRules::KEEP_WORLD);
        assert_eq!(attachment_rules(2), AttachmentTransformRules::SNAP_TO_TARGET_INCLUDING_SCALE);
        assert_eq!(attachment_rules(3), AttachmentTransformRules::SNAP_TO_TARGET_NOT_INCLUDING_SCALE);
        assert_eq!(mobility(0), Mobility::Static);
        assert_eq!(mobility(1), Mobility::Stationary);
        assert_eq!(teleport(1), TeleportMode::TeleportPhysics);
        assert_eq!(blend(4), ViewTargetBlend::EaseInOut);
        assert_eq!(falloff(1), RadialFalloff::Linear);
    }

    #[test]
    fn unknown_values_take_defaults() {
        for raw in OUT_OF_RANGE {
            assert_eq!(attachment_rules(raw), AttachmentTransformRules::KEEP_RELATIVE);
            assert_eq!(mobility(raw), Mobility::Movable);
            assert_eq!(teleport(raw), TeleportMode::None);
            assert_eq!(blend(raw), ViewTargetBlend::Linear);
            assert_eq!(falloff(raw), RadialFalloff::Constant);
        }
    }

    #[test]
    fn mobility_roundtrips_through_raw() {
        for m in [Mobility::Static, Mobility::Stationary, Mobility::Movable] {
            assert_eq!(mobility(mobility_to_raw(m)), m);
        }
    }

    #[test]
    fn log_and_input_reject_unknown_values() {
        assert_eq!(log_level(3), Some(LogVerbosity::Fatal));
        assert_eq!(input_event(3), Some(InputTrigger::DoubleClick));
        for raw in OUT_OF_RANGE {
            assert_eq!(log_level(raw), None);
            assert_eq!(input_event(raw), None);
        }
    }
}
