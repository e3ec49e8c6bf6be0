// Native-side math types without direct glam equivalents.
// Vectors and quaternions are plain glam types; these wrap the composites.

use glam::{Mat4, Quat, Vec3, Vec4};

// ---------------------------------------------------------------------------
// Transform (FTransform equivalent)
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub rotation: Quat,
    pub translation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn new(rotation: Quat, translation: Vec3, scale: Vec3) -> Self {
        Transform { rotation, translation, scale }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Transform { translation, ..Self::IDENTITY }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Transform { rotation, ..Self::IDENTITY }
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    pub fn from_matrix(m: Mat4) -> Self {
        let (scale, rotation, translation) = m.to_scale_rotation_translation();
        Transform { rotation, translation, scale }
    }

    /// `self` expressed in `parent`'s space, composed into world space.
    pub fn compose(&self, parent: &Transform) -> Transform {
        Transform::from_matrix(parent.to_matrix() * self.to_matrix())
    }

    /// Inverse of [`compose`](Self::compose): the transform that, composed
    /// with `parent`, yields `self`.
    pub fn relative_to(&self, parent: &Transform) -> Transform {
        Transform::from_matrix(parent.to_matrix().inverse() * self.to_matrix())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}

// ---------------------------------------------------------------------------
// Color types
// ---------------------------------------------------------------------------

/// Linear color (float RGBA, 0.0–1.0 range). Maps to FLinearColor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LinearColor {
    pub const BLACK: LinearColor = LinearColor { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: LinearColor = LinearColor { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        LinearColor { r, g, b, a }
    }
}

impl From<LinearColor> for Vec4 {
    fn from(c: LinearColor) -> Vec4 {
        Vec4::new(c.r, c.g, c.b, c.a)
    }
}

impl From<Vec4> for LinearColor {
    fn from(v: Vec4) -> LinearColor {
        LinearColor { r: v.x, g: v.y, b: v.z, a: v.w }
    }
}

/// 8-bit RGBA color. Maps to FColor (the boundary stores BGRA,
/// conversions handle the reorder).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };

    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Packed `0xAARRGGBB`, as returned by the shape-color getter.
    pub fn to_packed_argb(self) -> i32 {
        ((self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_near(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "expected {b:?}, got {a:?}");
    }

    #[test]
    fn compose_then_relative_is_identity_roundtrip() {
        let parent = Transform::new(
            Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            Vec3::new(100.0, 0.0, 0.0),
            Vec3::ONE,
        );
        let child = Transform::from_translation(Vec3::new(10.0, 0.0, 0.0));
        let world = child.compose(&parent);
        assert_vec_near(world.translation, Vec3::new(100.0, 10.0, 0.0));
        let back = world.relative_to(&parent);
        assert_vec_near(back.translation, child.translation);
    }

    #[test]
    fn packed_argb_orders_channels() {
        let c = Color::new(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.to_packed_argb(), 0x4411_2233);
        assert_eq!(Color::WHITE.to_packed_argb(), -1);
    }

    #[test]
    fn linear_color_vec4_roundtrip() {
        let c = LinearColor::new(0.5, 0.3, 0.8, 1.0);
        let v: Vec4 = c.into();
        let c2: LinearColor = v.into();
        assert_eq!(c, c2);
    }
}
