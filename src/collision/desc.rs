//! Serializable descriptions of colliders, for building them from data files.

use super::{BoundingCircle, BoundingEllipsoid, Collider, Collider2D, AABB};
use crate::error::ColliderError;
use crate::math::{serde_transform, Transform, Vec2};

/// Plain-data description of a collider.
///
/// Positions come from `transform`, written in `TransformBuilder` form;
/// `offset` is relative to it.
/// ```ron
/// [
///     Circle(radius: 0.5, transform: (position: (1.0, 2.0))),
///     Aabb(offset: (0.0, 1.0), radius: (2.0, 1.0)),
///     AabbFromPoints(points: [(0.0, 0.0), (4.0, 2.0)]),
/// ]
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ColliderDesc {
    Aabb {
        #[serde(default)]
        offset: [f32; 2],
        radius: [f32; 2],
        #[serde(default, with = "serde_transform")]
        transform: Transform,
    },
    AabbFromPoints {
        points: Vec<[f32; 2]>,
        #[serde(default, with = "serde_transform")]
        transform: Transform,
    },
    Circle {
        #[serde(default)]
        offset: [f32; 2],
        radius: f32,
        #[serde(default, with = "serde_transform")]
        transform: Transform,
    },
    Ellipsoid {
        #[serde(default)]
        offset: [f32; 2],
        radius: [f32; 2],
        #[serde(default, with = "serde_transform")]
        transform: Transform,
    },
}

impl ColliderDesc {
    pub fn transform(&self) -> Transform {
        match self {
            ColliderDesc::Aabb { transform, .. }
            | ColliderDesc::AabbFromPoints { transform, .. }
            | ColliderDesc::Circle { transform, .. }
            | ColliderDesc::Ellipsoid { transform, .. } => *transform,
        }
    }

    /// Validate the description and create the collider it describes,
    /// already updated to its transform.
    pub fn build(&self) -> Result<Collider, ColliderError> {
        let tr = self.transform();
        if !tr.is_finite() {
            return Err(ColliderError::NonFinite);
        }

        let mut coll: Collider = match self {
            ColliderDesc::Aabb { offset, radius, .. } => {
                AABB::new(Vec2::zero(), check_offset(*offset)?, check_radius(*radius)?).into()
            }
            ColliderDesc::AabbFromPoints { points, .. } => {
                if points.is_empty() {
                    return Err(ColliderError::NoPoints);
                }
                let points: Vec<Vec2> = points.iter().map(|&p| Vec2::from(p)).collect();
                if !points.iter().all(|p| crate::math::is_finite(*p)) {
                    return Err(ColliderError::NonFinite);
                }
                AABB::from_points(&points).into()
            }
            ColliderDesc::Circle { offset, radius, .. } => {
                let r = check_radius([*radius, *radius])?.x;
                BoundingCircle::new(Vec2::zero(), check_offset(*offset)?, r).into()
            }
            ColliderDesc::Ellipsoid { offset, radius, .. } => BoundingEllipsoid::new(
                Vec2::zero(),
                check_offset(*offset)?,
                check_radius(*radius)?,
            )
            .into(),
        };
        coll.update(&tr);

        log::debug!("Built collider {:?} at {:?}", coll, coll.position());
        Ok(coll)
    }
}

fn check_offset(offset: [f32; 2]) -> Result<Vec2, ColliderError> {
    if offset.iter().all(|v| v.is_finite()) {
        Ok(offset.into())
    } else {
        Err(ColliderError::NonFinite)
    }
}

fn check_radius(radius: [f32; 2]) -> Result<Vec2, ColliderError> {
    if radius.iter().all(|r| r.is_finite() && *r >= 0.0) {
        Ok(radius.into())
    } else {
        Err(ColliderError::InvalidRadius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_from_ron() {
        let descs: Vec<ColliderDesc> = ron::from_str(
            "[
                Circle(radius: 0.5, transform: (position: (1.0, 2.0))),
                Aabb(offset: (0.0, 1.0), radius: (2.0, 1.0)),
                AabbFromPoints(points: [(0.0, 0.0), (4.0, 2.0)]),
                Ellipsoid(radius: (1.0, 3.0), transform: (scale: (2.0, 1.0))),
            ]",
        )
        .unwrap();
        let colls: Vec<Collider> = descs.iter().map(|d| d.build().unwrap()).collect();

        match colls[0] {
            Collider::Circle(c) => {
                assert_eq!(c.center(), Vec2::new(1.0, 2.0));
                assert_eq!(c.radius(), 0.5 * (2f32.sqrt() / 2.0));
            }
            other => panic!("expected a circle, got {:?}", other),
        }
        assert_eq!(colls[1].position(), Vec2::new(0.0, 1.0));
        assert_eq!(colls[2].bounding_box().max_position(), Vec2::new(4.0, 2.0));
        match colls[3] {
            Collider::Ellipsoid(e) => assert_eq!(e.radius(), Vec2::new(2.0, 3.0)),
            other => panic!("expected an ellipsoid, got {:?}", other),
        }
    }

    #[test]
    fn rejects_bad_input() {
        let negative = ColliderDesc::Circle {
            offset: [0.0; 2],
            radius: -1.0,
            transform: Transform::default(),
        };
        assert_eq!(negative.build(), Err(ColliderError::InvalidRadius));

        let no_points = ColliderDesc::AabbFromPoints {
            points: Vec::new(),
            transform: Transform::default(),
        };
        assert_eq!(no_points.build(), Err(ColliderError::NoPoints));

        let nan = ColliderDesc::Aabb {
            offset: [f32::NAN, 0.0],
            radius: [1.0, 1.0],
            transform: Transform::default(),
        };
        assert_eq!(nan.build(), Err(ColliderError::NonFinite));

        let err = ron::from_str::<ColliderDesc>("Ellipsoid(offset: (0.0, 0.0))");
        assert!(err.is_err());
    }

    #[test]
    fn transform_round_trips_in_builder_form() {
        let desc = ColliderDesc::Ellipsoid {
            offset: [0.5, 0.0],
            radius: [2.0, 1.0],
            transform: Transform::from_position(Vec2::new(-3.0, 4.0)),
        };
        let text = ron::to_string(&desc).unwrap();
        assert!(text.contains("position:"), "unexpected format: {}", text);
        let back: ColliderDesc = ron::from_str(&text).unwrap();
        assert_eq!(back, desc);
        assert_eq!(back.build().unwrap().position(), Vec2::new(-2.5, 4.0));
    }
}
