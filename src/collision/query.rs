//! Intersection queries for points, rays, etc. vs. colliders.

use super::{Collider, Collider2D, Interpenetration, SurfaceImpact};
use crate::math::{Ray, Vec2};

/// Check whether or not a point intersects with a collider.
pub fn point_collider_bool(point: Vec2, coll: &Collider) -> bool {
    coll.contains(point, 0.0)
}

/// Distance along the ray to where it enters the box spanned by `min` and `max`.
///
/// Slab method. Rays starting inside the box or pointing away from it give `None`.
/// A ray parallel to an axis hits as long as it starts within that axis' slab,
/// including exactly on one of its faces.
pub fn ray_aabb(ray: &Ray, min: Vec2, max: Vec2) -> Option<f32> {
    let (x_near, x_far) = slab_interval(ray.start.x, ray.dir.x, min.x, max.x)?;
    let (y_near, y_far) = slab_interval(ray.start.y, ray.dir.y, min.y, max.y)?;

    let t_min = x_near.max(y_near);
    let t_max = x_far.min(y_far);
    if t_min > t_max || t_min <= 0.0 {
        return None;
    }
    Some(t_min)
}

/// The range of `t` where the ray is between `min` and `max` on one axis.
fn slab_interval(start: f32, dir: f32, min: f32, max: f32) -> Option<(f32, f32)> {
    if dir == 0.0 {
        return if start < min || start > max {
            None
        } else {
            Some((f32::NEG_INFINITY, f32::INFINITY))
        };
    }
    let t1 = (min - start) / dir;
    let t2 = (max - start) / dir;
    Some((t1.min(t2), t1.max(t2)))
}

/// Distance along the ray to its first intersection with a circle.
///
/// If the ray starts inside the circle the exit point is returned,
/// unless the ray points away from the center.
pub fn ray_circle(ray: &Ray, center: Vec2, radius: f32) -> Option<f32> {
    let to_center = center - ray.start;
    let tca = to_center.dot(*ray.dir);
    if tca < 0.0 {
        return None;
    }
    let d2 = to_center.mag_sq() - tca * tca;
    let r2 = radius * radius;
    if d2 > r2 {
        return None;
    }

    let thc = (r2 - d2).sqrt();
    let t0 = tca - thc;
    let t1 = tca + thc;
    if t0 >= 0.0 {
        Some(t0)
    } else if t1 >= 0.0 {
        Some(t1)
    } else {
        None
    }
}

/// The nearest collider hit by a raycast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Index of the collider in the slice that was searched.
    pub index: usize,
    pub impact: SurfaceImpact,
    /// Distance from the ray's start to the impact.
    pub distance: f32,
}

/// Cast a ray against every collider in a slice and return the closest hit.
pub fn raycast(colliders: &[Collider], ray: &Ray) -> Option<RayHit> {
    let mut best: Option<RayHit> = None;
    for (index, coll) in colliders.iter().enumerate() {
        let impact = match coll.surface_impact(ray) {
            Some(impact) => impact,
            None => continue,
        };
        let distance = (impact.position - ray.start).mag();
        match &best {
            Some(hit) if hit.distance <= distance => {}
            _ => {
                best = Some(RayHit {
                    index,
                    impact,
                    distance,
                })
            }
        }
    }
    best
}

/// Every collider in `others` that `coll` is actually penetrating, with its index.
///
/// Results that only touch, or that contain non-finite values, are skipped.
pub fn interpenetrations<'a>(
    coll: &'a Collider,
    others: &'a [Collider],
) -> impl Iterator<Item = (usize, Interpenetration)> + 'a {
    others
        .iter()
        .enumerate()
        .filter_map(move |(idx, other)| {
            coll.interpenetration(other)
                .filter(Interpenetration::is_colliding)
                .map(|ip| (idx, ip))
        })
}
