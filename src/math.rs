//! Types, aliases and helper operations for doing math with `ultraviolet`.
use std::f32::consts::PI;
pub use ultraviolet as uv;

/// Positions, offsets and sizes are all plain 2D vectors.
pub type Vec2 = uv::Vec2;

/// An angle in either degrees or radians.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum Angle {
    Rad(f32),
    Deg(f32),
}
impl Angle {
    /// Get the angle as degrees.
    #[inline]
    pub fn deg(&self) -> f32 {
        match self {
            Angle::Rad(rad) => rad * 180.0 / PI,
            Angle::Deg(deg) => *deg,
        }
    }

    /// Get the angle as radians.
    #[inline]
    pub fn rad(&self) -> f32 {
        match self {
            Angle::Rad(rad) => *rad,
            Angle::Deg(deg) => deg * PI / 180.0,
        }
    }
}
impl Default for Angle {
    fn default() -> Self {
        Angle::Rad(0.0)
    }
}

/// A wrapper type to indicate a vector should always be normalized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Unit<T>(T);

impl Unit<Vec2> {
    pub fn new_normalize(v: Vec2) -> Self {
        Unit(v.normalized())
    }

    /// The direction pointing from `from` to `to`.
    ///
    /// The result is NaN if the points are equal; callers that can hit that case
    /// check for it first.
    pub fn between(from: Vec2, to: Vec2) -> Self {
        Unit::new_normalize(to - from)
    }

    pub fn up() -> Self {
        Unit(Vec2::new(0.0, 1.0))
    }

    pub fn down() -> Self {
        Unit(Vec2::new(0.0, -1.0))
    }

    pub fn left() -> Self {
        Unit(Vec2::new(-1.0, 0.0))
    }

    pub fn right() -> Self {
        Unit(Vec2::new(1.0, 0.0))
    }

    pub fn is_finite(&self) -> bool {
        is_finite(self.0)
    }
}

impl<T> std::ops::Deref for Unit<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> std::ops::Neg for Unit<T>
where
    T: std::ops::Neg,
{
    type Output = Unit<<T as std::ops::Neg>::Output>;

    fn neg(self) -> Self::Output {
        Unit(-self.0)
    }
}

/// Position, rotation and non-uniform scaling of a game object.
///
/// Colliders are axis-aligned and only read `position` and `scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: Angle,
    pub scale: Vec2,
}

impl Transform {
    pub fn new(position: Vec2, rotation: Angle, scale: Vec2) -> Self {
        Transform {
            position,
            rotation,
            scale,
        }
    }

    /// A transform that only moves things.
    pub fn from_position(position: Vec2) -> Self {
        Transform {
            position,
            ..Default::default()
        }
    }

    pub fn is_finite(&self) -> bool {
        is_finite(self.position) && is_finite(self.scale) && self.rotation.rad().is_finite()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            position: Vec2::zero(),
            rotation: Angle::default(),
            scale: Vec2::one(),
        }
    }
}

/// A builder to create [`Transform`][self::Transform]s, mainly from data files.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransformBuilder {
    position: [f32; 2],
    rotation: Angle,
    scale: [f32; 2],
}
impl TransformBuilder {
    pub fn new() -> Self {
        TransformBuilder {
            position: [0.0, 0.0],
            rotation: Angle::default(),
            scale: [1.0, 1.0],
        }
    }
    #[inline]
    pub fn with_position(mut self, pos: impl Into<[f32; 2]>) -> Self {
        self.position = pos.into();
        self
    }
    #[inline]
    pub fn with_rotation(mut self, angle: Angle) -> Self {
        self.rotation = angle;
        self
    }
    #[inline]
    pub fn with_scale(mut self, scale: impl Into<[f32; 2]>) -> Self {
        self.scale = scale.into();
        self
    }
    #[inline]
    pub fn build(self) -> Transform {
        Transform {
            position: Vec2::new(self.position[0], self.position[1]),
            rotation: self.rotation,
            scale: Vec2::new(self.scale[0], self.scale[1]),
        }
    }
}
impl Default for TransformBuilder {
    fn default() -> Self {
        Self::new()
    }
}
impl From<TransformBuilder> for Transform {
    fn from(builder: TransformBuilder) -> Transform {
        builder.build()
    }
}
impl From<Transform> for TransformBuilder {
    fn from(tr: Transform) -> Self {
        TransformBuilder::new()
            .with_position(tr.position)
            .with_rotation(tr.rotation)
            .with_scale(tr.scale)
    }
}

/// Module to (de)serialize `Transform`s in `TransformBuilder` format without manually converting,
/// using the serde attribute `#[serde(with = "serde_transform")]`.
pub mod serde_transform {
    use super::*;

    pub fn serialize<S>(tr: &Transform, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::Serialize;
        TransformBuilder::from(*tr).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Transform, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::Deserialize;
        TransformBuilder::deserialize(deserializer).map(|b| b.build())
    }
}

/// A half-line with a starting point and a direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub start: Vec2,
    pub dir: Unit<Vec2>,
}

impl Ray {
    /// Create a ray, normalizing the direction.
    pub fn new(start: Vec2, dir: Vec2) -> Self {
        Ray {
            start,
            dir: Unit::new_normalize(dir),
        }
    }

    #[inline]
    pub fn point_at_t(&self, t: f32) -> Vec2 {
        moved_toward(self.start, t, self.dir)
    }

    /// Scale the ray into the space where an ellipse with the given radius is a unit circle.
    pub(crate) fn moved_inside_ellipsoid_space(&self, radius: Vec2) -> Self {
        Ray {
            start: self.start / radius,
            dir: Unit::new_normalize(*self.dir / radius),
        }
    }
}

// Vec2 utils

#[inline]
pub fn is_finite(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

/// `point` translated `distance` units along `dir`.
#[inline]
pub fn moved_toward(point: Vec2, distance: f32, dir: Unit<Vec2>) -> Vec2 {
    point + *dir * distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_conversions() {
        assert!((Angle::Deg(180.0).rad() - PI).abs() < 1e-6);
        assert!((Angle::Rad(PI / 2.0).deg() - 90.0).abs() < 1e-4);
    }

    #[test]
    fn transform_builder_defaults_to_identity() {
        let tr: Transform = ron::from_str::<TransformBuilder>("(position: (3.0, -1.0))")
            .unwrap()
            .into();
        assert_eq!(tr.position, Vec2::new(3.0, -1.0));
        assert_eq!(tr.scale, Vec2::one());
        assert_eq!(tr.rotation, Angle::default());
    }

    #[test]
    fn ray_in_ellipsoid_space() {
        let ray = Ray::new(Vec2::new(4.0, 2.0), Vec2::new(2.0, 1.0));
        let moved = ray.moved_inside_ellipsoid_space(Vec2::new(2.0, 1.0));
        assert_eq!(moved.start, Vec2::new(2.0, 2.0));
        assert!((moved.dir.x - moved.dir.y).abs() < 1e-6);
        assert!((moved.dir.mag() - 1.0).abs() < 1e-6);
    }
}
