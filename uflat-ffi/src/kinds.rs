// Kind tags: the closed, versioned set of object kinds the caller can name.
//
// Spawnable kinds occupy 0..32, component kinds 32..64. Which family a tag
// belongs to, and which native class it stands for, is decided by the
// dispatcher in uflat-runtime; this crate only fixes the numbering.

/// Bumped whenever a tag is added, removed or renumbered.
pub const KIND_TABLE_VERSION: u32 = 1;

crate::boundary_enum! {
    pub enum Kind {
        Actor = 0,
        CameraActor = 1,
        Pawn = 2,
        Character = 3,
        AiController = 4,
        PlayerController = 5,
        Brush = 6,
        AmbientSound = 7,
        DirectionalLight = 8,
        PointLight = 9,
        RectLight = 10,
        SpotLight = 11,

        ActorComponent = 32,
        InputComponent = 33,
        SceneComponent = 34,
        AudioComponent = 35,
        CameraComponent = 36,
        MotionControllerComponent = 37,
        StaticMeshComponent = 38,
        InstancedStaticMeshComponent = 39,
        BoxComponent = 40,
        SphereComponent = 41,
        CapsuleComponent = 42,
        SkeletalMeshComponent = 43,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_unique() {
        let mut raws: Vec<i32> = Kind::ALL.iter().map(|k| k.raw()).collect();
        raws.sort_unstable();
        raws.dedup();
        assert_eq!(raws.len(), Kind::ALL.len());
    }

    #[test]
    fn gap_between_families_is_not_a_tag() {
        assert_eq!(Kind::from_raw(12), None);
        assert_eq!(Kind::from_raw(31), None);
        assert_eq!(Kind::from_raw(32), Some(Kind::ActorComponent));
    }
}
