//! Bounding shapes and the narrow-phase queries between them.
//!
//! Every shape tracks an external [`Transform`][crate::math::Transform] through
//! [`Collider2D::update`] and answers geometric questions in world space.
//! Pairwise tests go through the closed [`Collider`] enum, so every pairing
//! of shapes is handled by an exhaustive match.
//!
//! The ellipsoid queries scale the world so that the ellipsoid becomes a unit circle
//! and reuse circle math there. This is an approximation: closest points, normals and
//! penetration results involving ellipsoids are not exact ellipse geometry.

mod aabb;
pub use aabb::AABB;

mod circle;
pub use circle::BoundingCircle;

mod ellipsoid;
pub use ellipsoid::BoundingEllipsoid;

mod contact;
pub use contact::{ContactIterator, ContactPoints, Interpenetration, SurfaceImpact, SurfaceType};

mod pose;
pub use pose::{PoseCache, ShapePose, ShapeRadius};

pub mod desc;
pub use desc::ColliderDesc;

pub mod query;
pub use query::RayHit;

use crate::math::{Ray, Transform, Unit, Vec2};

/// The set of things every collider shape can do.
pub trait Collider2D {
    /// World-space origin of the owning object, set from a transform's position.
    fn center(&self) -> Vec2;

    /// Translation from the owning object's centroid to the geometry's centroid.
    fn offset(&self) -> Vec2;

    /// The effective world-space origin of the shape.
    #[inline]
    fn position(&self) -> Vec2 {
        self.center() + self.offset()
    }

    /// Move and scale the collider to follow a transform.
    fn update(&mut self, tr: &Transform);

    /// Like [`update`][Self::update], but leaves the center where it is.
    fn update_size_and_offset(&mut self, tr: &Transform);

    /// The nearest point on the boundary of the shape.
    /// Points inside the shape are projected out to the boundary too.
    fn closest_surface_point(&self, point: Vec2) -> Vec2;

    /// Test for overlap with another collider.
    /// The direction of the result points from `self` toward `other`.
    fn interpenetration(&self, other: &Collider) -> Option<Interpenetration>;

    /// The first point where the ray enters the shape, if it's in front of the ray.
    fn surface_point(&self, ray: &Ray) -> Option<Vec2>;

    /// Outward normal of the surface at or near the given point.
    fn surface_normal(&self, point: Vec2) -> Unit<Vec2>;

    fn surface_impact(&self, ray: &Ray) -> Option<SurfaceImpact> {
        let position = self.surface_point(ray)?;
        Some(SurfaceImpact {
            normal: self.surface_normal(position),
            position,
        })
    }

    /// Whether a point is inside the shape grown by `threshold`.
    fn contains(&self, point: Vec2, threshold: f32) -> bool;

    fn volume(&self) -> f32;

    fn bounding_box(&self) -> AABB;
}

/// One collider of any supported shape.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Collider {
    AABB(AABB),
    Circle(BoundingCircle),
    Ellipsoid(BoundingEllipsoid),
}

impl From<AABB> for Collider {
    fn from(aabb: AABB) -> Self {
        Collider::AABB(aabb)
    }
}
impl From<BoundingCircle> for Collider {
    fn from(circle: BoundingCircle) -> Self {
        Collider::Circle(circle)
    }
}
impl From<BoundingEllipsoid> for Collider {
    fn from(ellipsoid: BoundingEllipsoid) -> Self {
        Collider::Ellipsoid(ellipsoid)
    }
}

macro_rules! each_shape {
    ($coll:expr, $shape:ident => $body:expr) => {
        match $coll {
            Collider::AABB($shape) => $body,
            Collider::Circle($shape) => $body,
            Collider::Ellipsoid($shape) => $body,
        }
    };
}

impl Collider2D for Collider {
    fn center(&self) -> Vec2 {
        each_shape!(self, s => s.center())
    }

    fn offset(&self) -> Vec2 {
        each_shape!(self, s => s.offset())
    }

    fn update(&mut self, tr: &Transform) {
        each_shape!(self, s => s.update(tr))
    }

    fn update_size_and_offset(&mut self, tr: &Transform) {
        each_shape!(self, s => s.update_size_and_offset(tr))
    }

    fn closest_surface_point(&self, point: Vec2) -> Vec2 {
        each_shape!(self, s => s.closest_surface_point(point))
    }

    fn interpenetration(&self, other: &Collider) -> Option<Interpenetration> {
        each_shape!(self, s => s.interpenetration(other))
    }

    fn surface_point(&self, ray: &Ray) -> Option<Vec2> {
        each_shape!(self, s => s.surface_point(ray))
    }

    fn surface_normal(&self, point: Vec2) -> Unit<Vec2> {
        each_shape!(self, s => s.surface_normal(point))
    }

    fn contains(&self, point: Vec2, threshold: f32) -> bool {
        each_shape!(self, s => s.contains(point, threshold))
    }

    fn volume(&self) -> f32 {
        each_shape!(self, s => s.volume())
    }

    fn bounding_box(&self) -> AABB {
        each_shape!(self, s => s.bounding_box())
    }
}

/// Scaling into ellipsoid space divides by the radius, so both components must be nonzero.
#[inline]
pub(crate) fn assert_ellipsoid_radius(radius: Vec2) {
    assert!(
        radius.x != 0.0 && radius.y != 0.0,
        "Ellipsoid space needs a nonzero radius on both axes, got {:?}",
        radius
    );
}

/// The result reported when two shapes sit at exactly the same position.
/// There is no direction between them, so push up by a fixed amount.
#[inline]
pub(crate) fn coincident(depth: f32, point: Vec2) -> Interpenetration {
    Interpenetration::new(depth, Unit::up(), ContactPoints::One(point))
}

/// Implement serde for a shape in terms of its flat float representation.
macro_rules! impl_flat_serde {
    ($shape:ty) => {
        impl serde::Serialize for $shape {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_seq(self.to_array())
            }
        }

        impl<'de> serde::Deserialize<'de> for $shape {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let values = <Vec<f32> as serde::Deserialize>::deserialize(deserializer)?;
                <$shape>::from_slice(&values).map_err(serde::de::Error::custom)
            }
        }
    };
}
pub(crate) use impl_flat_serde;
