use super::{
    assert_ellipsoid_radius, coincident, impl_flat_serde, query, BoundingCircle,
    BoundingEllipsoid, Collider, Collider2D, ContactPoints, Interpenetration, PoseCache,
    ShapePose,
};
use crate::error::{check_flat, ColliderError};
use crate::math::{moved_toward, Ray, Transform, Unit, Vec2};

/// An axis-aligned bounding box.
///
/// The box stores its side lengths halved (`radius`) because this makes
/// intersection tests easier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AABB {
    center: Vec2,
    pose: PoseCache<Vec2>,
}

impl Default for AABB {
    fn default() -> Self {
        AABB::new(Vec2::zero(), Vec2::zero(), Vec2::one())
    }
}

impl AABB {
    pub fn new(center: Vec2, offset: Vec2, radius: Vec2) -> Self {
        debug_assert!(radius.x >= 0.0 && radius.y >= 0.0, "negative radius {:?}", radius);
        AABB {
            center,
            pose: PoseCache::at_rest(ShapePose { offset, radius }),
        }
    }

    /// The smallest box containing every given point.
    ///
    /// The box is placed with its offset, so the center is zero until the box is updated.
    /// An empty slice gives a zero-sized box at the origin.
    pub fn from_points(points: &[Vec2]) -> Self {
        let (first, rest) = match points.split_first() {
            Some(split) => split,
            None => {
                log::warn!("Building an AABB from zero points, using an empty box");
                return AABB::new(Vec2::zero(), Vec2::zero(), Vec2::zero());
            }
        };
        let (min, max) = rest.iter().fold((*first, *first), |(min, max), p| {
            (min.min_by_component(*p), max.max_by_component(*p))
        });
        AABB::new(Vec2::zero(), (min + max) / 2.0, (max - min) / 2.0)
    }

    /// Half of the width and height after the latest transform.
    #[inline]
    pub fn radius(&self) -> Vec2 {
        self.pose.current.radius
    }

    #[inline]
    pub fn rest_radius(&self) -> Vec2 {
        self.pose.rest.radius
    }

    #[inline]
    pub fn rest_offset(&self) -> Vec2 {
        self.pose.rest.offset
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.radius() * 2.0
    }

    #[inline]
    pub fn rest_size(&self) -> Vec2 {
        self.rest_radius() * 2.0
    }

    #[inline]
    pub fn min_position(&self) -> Vec2 {
        self.position() - self.radius()
    }

    #[inline]
    pub fn max_position(&self) -> Vec2 {
        self.position() + self.radius()
    }

    /// The four corners, counter-clockwise from the bottom left,
    /// each pulled toward the middle by `inset`.
    pub fn corners(&self, inset: Vec2) -> [Vec2; 4] {
        let pos = self.position();
        let r = self.radius();
        [
            Vec2::new(pos.x - r.x + inset.x, pos.y - r.y + inset.y),
            Vec2::new(pos.x + r.x - inset.x, pos.y - r.y + inset.y),
            Vec2::new(pos.x + r.x - inset.x, pos.y + r.y - inset.y),
            Vec2::new(pos.x - r.x + inset.x, pos.y + r.y - inset.y),
        ]
    }

    /// The smallest box containing both this and another box.
    /// Like [`from_points`][Self::from_points], the result has a zero center.
    pub fn expanded_to_enclose(&self, other: &AABB) -> AABB {
        let min = self.min_position().min_by_component(other.min_position());
        let max = self.max_position().max_by_component(other.max_position());
        AABB::new(Vec2::zero(), (min + max) / 2.0, (max - min) / 2.0)
    }

    /// Separating axis test. Touching boxes count as overlapping.
    pub fn is_coliding(&self, other: &AABB) -> bool {
        let p1 = self.position();
        let p2 = other.position();
        // same position is always a collision no matter the radius
        if p1 == p2 {
            return true;
        }
        let (r1, r2) = (self.radius(), other.radius());
        (p1.x - p2.x).abs() <= r1.x + r2.x && (p1.y - p2.y).abs() <= r1.y + r2.y
    }

    /// True if `other` is entirely inside `self` grown by `threshold`.
    pub fn contains_aabb(&self, other: &AABB, threshold: f32) -> bool {
        let min = other.min_position();
        let max = min + other.size();
        self.contains(min, threshold) && self.contains(max, threshold)
    }

    pub fn interpenetration_with_aabb(&self, other: &AABB) -> Option<Interpenetration> {
        if !self.is_coliding(other) {
            return None;
        }
        let p1 = self.position();
        let p2 = other.position();
        if p1 == p2 {
            return Some(coincident(-self.radius().y, self.center));
        }

        let point1 = other.closest_surface_point(p1);
        if !self.contains(point1, 0.0) {
            return None;
        }
        let point2 = self.closest_surface_point(p2);
        Some(self.penetration_between(point1, point2, point2))
    }

    pub fn interpenetration_with_circle(
        &self,
        other: &BoundingCircle,
    ) -> Option<Interpenetration> {
        let p1 = self.position();
        let p2 = other.position();
        if p1 == p2 {
            return Some(self.coincident_push());
        }

        let point1 = other.closest_surface_point(p1);
        if !self.contains(point1, 0.0) {
            return None;
        }
        let point2 = self.closest_surface_point(p2);
        Some(self.penetration_between(point1, point2, point2))
    }

    /// Box against ellipse, computed in the space where the ellipse is a unit circle.
    ///
    /// When the ellipse's center is inside the box the result is only a rough push
    /// outward by half the ellipse's radius, with no contact points.
    pub fn interpenetration_with_ellipsoid(
        &self,
        other: &BoundingEllipsoid,
    ) -> Option<Interpenetration> {
        let p1 = self.position();
        let p2 = other.position();
        if p1 == p2 {
            return Some(self.coincident_push());
        }

        if self.contains(p2, 0.0) {
            let ip = Interpenetration::new(
                -(other.radius().mag() / 2.0),
                self.surface_normal(p2),
                ContactPoints::Zero,
            );
            debug_assert!(ip.is_valid(), "{:?}", ip);
            return Some(ip);
        }

        let e_radius = other.radius();
        let unit_center = p2 / e_radius;
        let p = self
            .moved_inside_ellipsoid_space(e_radius)
            .closest_surface_point(unit_center);
        let v = p - unit_center;
        if v.dot(v) > 1.0 {
            return None;
        }

        let on_circle = if v == Vec2::zero() {
            unit_center
        } else {
            unit_center + v.normalized()
        };
        let point1 = p * e_radius;
        let point2 = on_circle * e_radius;
        Some(self.penetration_between(point1, point2, point1))
    }

    /// Depth is the distance between the two contact points,
    /// direction is the normal of this box at `facing`.
    fn penetration_between(&self, point1: Vec2, point2: Vec2, facing: Vec2) -> Interpenetration {
        let ip = Interpenetration::new(
            -(point1 - point2).mag(),
            self.surface_normal(facing),
            ContactPoints::from_pair(point1, point2),
        );
        debug_assert!(ip.is_valid(), "{:?}", ip);
        ip
    }

    fn coincident_push(&self) -> Interpenetration {
        let r = self.radius().y;
        coincident(-r, moved_toward(self.center, r, Unit::up()))
    }

    pub(crate) fn moved_inside_ellipsoid_space(&self, e_radius: Vec2) -> AABB {
        assert_ellipsoid_radius(e_radius);
        AABB::new(
            self.center / e_radius,
            self.offset() / e_radius,
            self.radius() / e_radius,
        )
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

    /// Inverse of [`to_array`][Self::to_array]. The box comes back at rest,
    /// with its current pose equal to the rest pose.
    pub fn from_slice(values: &[f32]) -> Result<Self, ColliderError> {
        check_flat("AABB", 6, values)?;
        if values[4] < 0.0 || values[5] < 0.0 {
            return Err(ColliderError::InvalidRadius);
        }
        Ok(AABB::new(
            Vec2::new(values[0], values[1]),
            Vec2::new(values[2], values[3]),
            Vec2::new(values[4], values[5]),
        ))
    }
}

impl_flat_serde!(AABB);

impl Collider2D for AABB {
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

    /// Clamps each axis independently.
    fn closest_surface_point(&self, point: Vec2) -> Vec2 {
        let min = self.min_position();
        let max = self.max_position();
        Vec2::new(point.x.max(min.x).min(max.x), point.y.max(min.y).min(max.y))
    }

    fn interpenetration(&self, other: &Collider) -> Option<Interpenetration> {
        match other {
            Collider::AABB(aabb) => self.interpenetration_with_aabb(aabb),
            Collider::Circle(circle) => self.interpenetration_with_circle(circle),
            Collider::Ellipsoid(ellipsoid) => self.interpenetration_with_ellipsoid(ellipsoid),
        }
    }

    fn surface_point(&self, ray: &Ray) -> Option<Vec2> {
        let t = query::ray_aabb(ray, self.min_position(), self.max_position())?;
        Some(ray.point_at_t(t))
    }

    /// The normal of whichever face the point is closest to.
    /// If the point is equally close to a vertical and a horizontal face, the y axis wins,
    /// so corners count as floor or ceiling. The comparison is deliberately `<=`;
    /// a strict `<` would hand ties to x instead.
    fn surface_normal(&self, point: Vec2) -> Unit<Vec2> {
        let rel = point - self.position();
        let r = self.radius();
        let x_dist = (r.x - rel.x.abs()).abs();
        let y_dist = (r.y - rel.y.abs()).abs();
        if y_dist <= x_dist {
            if rel.y > 0.0 {
                Unit::up()
            } else {
                Unit::down()
            }
        } else if rel.x > 0.0 {
            Unit::right()
        } else {
            Unit::left()
        }
    }

    /// Inclusive of the boundary.
    fn contains(&self, point: Vec2, threshold: f32) -> bool {
        let min = self.min_position() - Vec2::new(threshold, threshold);
        let max = self.max_position() + Vec2::new(threshold, threshold);
        point.x >= min.x && point.y >= min.y && point.x <= max.x && point.y <= max.y
    }

    fn volume(&self) -> f32 {
        let r = self.radius();
        r.x * r.y
    }

    fn bounding_box(&self) -> AABB {
        *self
    }
}
