use super::{
    assert_ellipsoid_radius, coincident, impl_flat_serde, query, BoundingCircle, Collider,
    Collider2D, Interpenetration, PoseCache, ShapePose, AABB,
};
use crate::error::{check_flat, ColliderError};
use crate::math::{Ray, Transform, Unit, Vec2};

/// An axis-aligned ellipse, handled as a circle stretched by its radius.
///
/// Queries scale the world by `1 / radius` so that the ellipse becomes a unit circle,
/// do circle math there and scale the result back. Closest points and normals found
/// this way are radial projections, not true nearest points on the ellipse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingEllipsoid {
    center: Vec2,
    pose: PoseCache<Vec2>,
}

impl BoundingEllipsoid {
    pub fn new(center: Vec2, offset: Vec2, radius: Vec2) -> Self {
        debug_assert!(
            radius.x >= 0.0 && radius.y >= 0.0,
            "negative radius {:?}",
            radius
        );
        BoundingEllipsoid {
            center,
            pose: PoseCache::at_rest(ShapePose { offset, radius }),
        }
    }

    /// The ellipse inscribed in a box.
    pub fn from_aabb(aabb: &AABB) -> Self {
        BoundingEllipsoid::new(aabb.center(), aabb.rest_offset(), aabb.rest_radius())
    }

    #[inline]
    pub fn radius(&self) -> Vec2 {
        self.pose.current.radius
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.radius() * 2.0
    }

    #[inline]
    pub fn rest_radius(&self) -> Vec2 {
        self.pose.rest.radius
    }

    #[inline]
    pub fn rest_offset(&self) -> Vec2 {
        self.pose.rest.offset
    }

    /// This ellipse in its own unit space.
    pub(crate) fn unit_circle(&self) -> BoundingCircle {
        let r = self.radius();
        BoundingCircle::new(self.center / r, self.offset() / r, 1.0)
    }

    /// This ellipse in the unit space of another, approximated by a circle
    /// whose radius is the mean of the scaled half-extents.
    pub(crate) fn moved_inside_ellipsoid_space(&self, e_radius: Vec2) -> BoundingCircle {
        assert_ellipsoid_radius(e_radius);
        let r = self.radius() / e_radius;
        BoundingCircle::new(
            self.center / e_radius,
            self.offset() / e_radius,
            (r.x + r.y) / 2.0,
        )
    }

    /// Depth and direction are measured in `other`'s unit space,
    /// contact points are scaled back out onto this ellipse.
    pub fn interpenetration_with_ellipsoid(
        &self,
        other: &BoundingEllipsoid,
    ) -> Option<Interpenetration> {
        if self.position() == other.position() {
            return Some(coincident(-f32::EPSILON, self.center));
        }

        let e_radius = other.radius();
        let unit_space_hit = self
            .moved_inside_ellipsoid_space(e_radius)
            .interpenetration_with_circle(&other.unit_circle())?;
        let ip = Interpenetration {
            points: unit_space_hit
                .points
                .map(|p| self.closest_surface_point(p * e_radius)),
            ..unit_space_hit
        };
        debug_assert!(ip.is_valid(), "{:?}", ip);
        Some(ip)
    }

    /// `[center.x, center.y, offset.x, offset.y, radius.x, radius.y]` of the rest pose.
    pub fn to_array(&self) -> [f32; 6] {
        let rest = self.pose.rest();
        [
            self.center.x,
            self.center.y,
            rest.offset.x,
            rest.offset.y,
            rest.radius.x,
            rest.radius.y,
        ]
    }

    /// Inverse of [`to_array`][Self::to_array]. The ellipsoid comes back at rest.
    pub fn from_slice(values: &[f32]) -> Result<Self, ColliderError> {
        check_flat("ellipsoid", 6, values)?;
        if values[4] < 0.0 || values[5] < 0.0 {
            return Err(ColliderError::InvalidRadius);
        }
        Ok(BoundingEllipsoid::new(
            Vec2::new(values[0], values[1]),
            Vec2::new(values[2], values[3]),
            Vec2::new(values[4], values[5]),
        ))
    }
}

impl_flat_serde!(BoundingEllipsoid);

impl Collider2D for BoundingEllipsoid {
    #[inline]
    fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    fn offset(&self) -> Vec2 {
        self.pose.current.offset
    }

    fn update(&mut self, tr: &Transform) {
        self.center = tr.position;
        self.pose.recompute(tr.scale);
    }

    fn update_size_and_offset(&mut self, tr: &Transform) {
        self.pose.recompute(tr.scale);
    }

    fn closest_surface_point(&self, point: Vec2) -> Vec2 {
        let r = self.radius();
        let unit_center = self.position() / r;
        let unit_point = point / r;
        let dir = if unit_point == unit_center {
            *Unit::up()
        } else {
            (unit_point - unit_center).normalized()
        };
        (unit_center + dir) * r
    }

    fn interpenetration(&self, other: &Collider) -> Option<Interpenetration> {
        match other {
            Collider::Ellipsoid(ellipsoid) => self.interpenetration_with_ellipsoid(ellipsoid),
            Collider::Circle(circle) => circle
                .interpenetration_with_ellipsoid(self)
                .map(Interpenetration::flipped),
            Collider::AABB(aabb) => aabb
                .interpenetration_with_ellipsoid(self)
                .map(Interpenetration::flipped),
        }
    }

    fn surface_point(&self, ray: &Ray) -> Option<Vec2> {
        let r = self.radius();
        let unit_ray = ray.moved_inside_ellipsoid_space(r);
        let t = query::ray_circle(&unit_ray, self.position() / r, 1.0)?;
        Some(unit_ray.point_at_t(t) * r)
    }

    fn surface_normal(&self, point: Vec2) -> Unit<Vec2> {
        let pos = self.position();
        if point == pos {
            return Unit::up();
        }
        let r = self.radius();
        Unit::new_normalize(*Unit::between(pos / r, point / r) * r)
    }

    fn contains(&self, point: Vec2, threshold: f32) -> bool {
        let r = self.radius();
        (point / r - self.position() / r).mag() < 1.0 + threshold
    }

    fn volume(&self) -> f32 {
        let r = self.radius();
        (4.0 * std::f32::consts::PI * r.x * r.y) / 3.0
    }

    fn bounding_box(&self) -> AABB {
        AABB::new(self.center, self.offset(), self.radius())
    }
}
