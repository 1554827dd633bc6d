use super::{
    assert_ellipsoid_radius, coincident, impl_flat_serde, query, BoundingEllipsoid, Collider,
    Collider2D, ContactPoints, Interpenetration, PoseCache, ShapePose, AABB,
};
use crate::error::{check_flat, ColliderError};
use crate::math::{Ray, Transform, Unit, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingCircle {
    center: Vec2,
    pose: PoseCache<f32>,
}

impl BoundingCircle {
    pub fn new(center: Vec2, offset: Vec2, radius: f32) -> Self {
        debug_assert!(radius >= 0.0, "negative radius {}", radius);
        BoundingCircle {
            center,
            pose: PoseCache::at_rest(ShapePose { offset, radius }),
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.pose.current.radius
    }

    #[inline]
    pub fn rest_radius(&self) -> f32 {
        self.pose.rest.radius
    }

    #[inline]
    pub fn rest_offset(&self) -> Vec2 {
        self.pose.rest.offset
    }

    /// Overlap test on squared distances between centers.
    ///
    /// Unlike [`interpenetration_with_circle`][Self::interpenetration_with_circle],
    /// this ignores offsets and counts touching circles as colliding.
    /// The two are kept separate because they disagree at the boundary.
    pub fn is_colliding(&self, other: &BoundingCircle) -> bool {
        let dist = self.center - other.center;
        let r_sum = self.radius() + other.radius();
        dist.mag_sq() <= r_sum * r_sum
    }

    pub fn interpenetration_with_circle(
        &self,
        other: &BoundingCircle,
    ) -> Option<Interpenetration> {
        let p1 = self.position();
        let p2 = other.position();
        if p1 == p2 {
            return Some(coincident(-f32::EPSILON, self.center));
        }
        let r_sum = self.radius() + other.radius();
        let dist = (p2 - p1).mag();
        if !(dist < r_sum) {
            return None;
        }

        let ip = Interpenetration::new(
            -dist,
            Unit::between(p1, p2),
            ContactPoints::One(self.closest_surface_point(p2)),
        );
        debug_assert!(ip.is_valid(), "{:?}", ip);
        Some(ip)
    }

    /// Circle against ellipse, decided in the space where the ellipse is a unit circle.
    ///
    /// Depth and direction are the ones found in that space. Only the contact point is
    /// scaled back out and projected onto this circle.
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

    /// This circle as seen in the space where an ellipse with the given radius is a unit circle.
    ///
    /// The circle stays a circle, with its radius divided by half the length
    /// of the ellipse's radius vector.
    pub(crate) fn moved_inside_ellipsoid_space(&self, e_radius: Vec2) -> BoundingCircle {
        assert_ellipsoid_radius(e_radius);
        BoundingCircle::new(
            self.center / e_radius,
            self.offset() / e_radius,
            self.radius() / (e_radius.mag() / 2.0),
        )
    }

    /// `[center.x, center.y, offset.x, offset.y, radius]` of the rest pose.
    pub fn to_array(&self) -> [f32; 5] {
        let rest = self.pose.rest();
        [
            self.center.x,
            self.center.y,
            rest.offset.x,
            rest.offset.y,
            rest.radius,
        ]
    }

    /// Inverse of [`to_array`][Self::to_array]. The circle comes back at rest.
    pub fn from_slice(values: &[f32]) -> Result<Self, ColliderError> {
        check_flat("circle", 5, values)?;
        if values[4] < 0.0 {
            return Err(ColliderError::InvalidRadius);
        }
        Ok(BoundingCircle::new(
            Vec2::new(values[0], values[1]),
            Vec2::new(values[2], values[3]),
            values[4],
        ))
    }
}

impl_flat_serde!(BoundingCircle);

impl Collider2D for BoundingCircle {
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
        let pos = self.position();
        pos + *self.surface_normal(point) * self.radius()
    }

    fn interpenetration(&self, other: &Collider) -> Option<Interpenetration> {
        match other {
            Collider::Circle(circle) => self.interpenetration_with_circle(circle),
            Collider::Ellipsoid(ellipsoid) => self.interpenetration_with_ellipsoid(ellipsoid),
            Collider::AABB(aabb) => aabb
                .interpenetration_with_circle(self)
                .map(Interpenetration::flipped),
        }
    }

    fn surface_point(&self, ray: &Ray) -> Option<Vec2> {
        let t = query::ray_circle(ray, self.position(), self.radius())?;
        Some(ray.point_at_t(t))
    }

    /// Points straight up if the point is at the center.
    fn surface_normal(&self, point: Vec2) -> Unit<Vec2> {
        let pos = self.position();
        if point == pos {
            return Unit::up();
        }
        Unit::between(pos, point)
    }

    fn contains(&self, point: Vec2, threshold: f32) -> bool {
        (point - self.position()).mag() < self.radius() + threshold
    }

    fn volume(&self) -> f32 {
        let r = self.radius();
        (4.0 * std::f32::consts::PI * r * r * r) / 3.0
    }

    fn bounding_box(&self) -> AABB {
        let r = self.radius();
        AABB::new(self.center, self.offset(), Vec2::new(r, r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle_at(x: f32, y: f32, r: f32) -> BoundingCircle {
        BoundingCircle::new(Vec2::new(x, y), Vec2::zero(), r)
    }

    #[test]
    fn overlap_threshold_is_strict() {
        let a = circle_at(0.0, 0.0, 2.0);
        let cases = [(4.9, true), (5.0, false), (5.1, false), (1.0, true)];
        for &(d, hits) in cases.iter() {
            let b = circle_at(d, 0.0, 3.0);
            let ip = a.interpenetration_with_circle(&b);
            assert_eq!(ip.is_some(), hits, "distance {}", d);
            if let Some(ip) = ip {
                assert!((ip.depth + d).abs() < 1e-5);
                assert_eq!(ip.direction, Unit::right());
                assert_eq!(ip.points, ContactPoints::One(Vec2::new(2.0, 0.0)));
            }
        }
    }

    #[test]
    fn squared_distance_variant_includes_touching() {
        let a = circle_at(0.0, 0.0, 2.0);
        let touching = circle_at(5.0, 0.0, 3.0);
        assert!(a.is_colliding(&touching));
        assert!(a.interpenetration_with_circle(&touching).is_none());
        assert!(!a.is_colliding(&circle_at(5.5, 0.0, 3.0)));
    }

    #[test]
    fn coincident_circles() {
        let a = circle_at(1.0, 1.0, 2.0);
        let ip = a.interpenetration_with_circle(&circle_at(1.0, 1.0, 0.5)).unwrap();
        assert_eq!(ip.depth, -f32::EPSILON);
        assert_eq!(ip.direction, Unit::up());
        assert_eq!(ip.points, ContactPoints::One(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn closest_point_projects_onto_circle() {
        let a = circle_at(1.0, 0.0, 2.0);
        assert_eq!(a.closest_surface_point(Vec2::new(6.0, 0.0)), Vec2::new(3.0, 0.0));
        // inside points go out to the boundary too
        assert_eq!(a.closest_surface_point(Vec2::new(1.0, -0.5)), Vec2::new(1.0, -2.0));
        assert_eq!(a.closest_surface_point(Vec2::new(1.0, 0.0)), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn ray_hits() {
        let a = circle_at(0.0, 0.0, 1.0);
        let hit = Ray::new(Vec2::new(-5.0, 0.0), Vec2::new(1.0, 0.0));
        let p = a.surface_point(&hit).unwrap();
        assert!((p - Vec2::new(-1.0, 0.0)).mag() < 1e-5);
        let away = Ray::new(Vec2::new(-5.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!(a.surface_point(&away).is_none());
        let past = Ray::new(Vec2::new(-5.0, 1.5), Vec2::new(1.0, 0.0));
        assert!(a.surface_point(&past).is_none());

        let impact = a.surface_impact(&hit).unwrap();
        assert!((*impact.normal - Vec2::new(-1.0, 0.0)).mag() < 1e-5);
    }

    #[test]
    fn normals() {
        let a = circle_at(0.0, 0.0, 1.0);
        assert_eq!(a.surface_normal(Vec2::new(0.0, -3.0)), Unit::down());
        assert_eq!(a.surface_normal(Vec2::zero()), Unit::up());
    }

    #[test]
    fn update_tracks_scale_magnitude() {
        let mut a = BoundingCircle::new(Vec2::zero(), Vec2::new(1.0, 1.0), 2.0);
        let tr = Transform::new(Vec2::new(3.0, 0.0), Default::default(), Vec2::new(3.0, 4.0));
        a.update(&tr);
        assert_eq!(a.center(), Vec2::new(3.0, 0.0));
        assert_eq!(a.offset(), Vec2::new(3.0, 4.0));
        assert!((a.radius() - 5.0).abs() < 1e-6);
        assert_eq!(a.rest_radius(), 2.0);

        let mut b = BoundingCircle::new(Vec2::new(7.0, 7.0), Vec2::zero(), 2.0);
        b.update_size_and_offset(&tr);
        assert_eq!(b.center(), Vec2::new(7.0, 7.0));
        assert!((b.radius() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn contains_and_bounds() {
        let a = BoundingCircle::new(Vec2::new(1.0, 0.0), Vec2::new(1.0, 0.0), 1.0);
        assert!(a.contains(Vec2::new(2.5, 0.0), 0.0));
        assert!(!a.contains(Vec2::new(3.0, 0.0), 0.0));
        assert!(a.contains(Vec2::new(3.0, 0.0), 0.1));
        let bounds = a.bounding_box();
        assert_eq!(bounds.min_position(), Vec2::new(1.0, -1.0));
        assert_eq!(bounds.max_position(), Vec2::new(3.0, 1.0));
        assert!((a.volume() - 4.0 * std::f32::consts::PI / 3.0).abs() < 1e-5);
    }

    #[test]
    fn circle_ellipsoid_matches_circle_circle_for_round_ellipsoids() {
        let a = circle_at(0.0, 0.0, 1.0);
        let round = BoundingEllipsoid::new(Vec2::new(1.5, 0.0), Vec2::zero(), Vec2::new(1.0, 1.0));
        // a round ellipsoid of radius 1 scales the circle by 1 / (sqrt(2) / 2)
        let ip = a.interpenetration_with_ellipsoid(&round).unwrap();
        assert!((ip.depth + 1.5).abs() < 1e-5);
        assert_eq!(ip.direction, Unit::right());
        let p = ip.points.first().unwrap();
        assert!((p - Vec2::new(1.0, 0.0)).mag() < 1e-5);

        let far = BoundingEllipsoid::new(Vec2::new(5.0, 0.0), Vec2::zero(), Vec2::new(1.0, 1.0));
        assert!(a.interpenetration_with_ellipsoid(&far).is_none());
    }

    #[test]
    fn stretched_ellipsoid_reaches_further() {
        let a = circle_at(0.0, 0.0, 1.0);
        let wide = BoundingEllipsoid::new(Vec2::new(4.0, 0.0), Vec2::zero(), Vec2::new(4.0, 1.0));
        // the ellipse's unit space puts it one unit away, and that distance is the depth
        let ip = a.interpenetration_with_ellipsoid(&wide).unwrap();
        assert!((ip.depth + 1.0).abs() < 1e-5);
        assert_eq!(ip.direction, Unit::right());
        let p = ip.points.first().unwrap();
        assert!((p - Vec2::new(1.0, 0.0)).mag() < 1e-5);
        let tall = BoundingEllipsoid::new(Vec2::new(4.0, 0.0), Vec2::zero(), Vec2::new(1.0, 4.0));
        assert!(a.interpenetration_with_ellipsoid(&tall).is_none());
    }

    #[test]
    #[should_panic]
    fn zero_ellipsoid_radius_is_a_precondition_failure() {
        circle_at(0.0, 0.0, 1.0).moved_inside_ellipsoid_space(Vec2::new(2.0, 0.0));
    }

    #[test]
    fn flat_array_round_trip() {
        let a = BoundingCircle::new(Vec2::new(1.0, 2.0), Vec2::new(0.5, 0.0), 3.0);
        assert_eq!(a.to_array(), [1.0, 2.0, 0.5, 0.0, 3.0]);
        assert_eq!(BoundingCircle::from_slice(&a.to_array()), Ok(a));
        assert_eq!(
            BoundingCircle::from_slice(&[0.0; 6]),
            Err(ColliderError::WrongLength {
                shape: "circle",
                expected: 5,
                found: 6
            })
        );
    }
}
