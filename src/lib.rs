pub mod math;
pub use math::{serde_transform, uv, Angle, Ray, Transform, TransformBuilder, Unit, Vec2};

pub mod error;
pub use error::ColliderError;

pub mod collision;
pub use collision::{
    query::{self, RayHit},
    BoundingCircle, BoundingEllipsoid, Collider, Collider2D, ColliderDesc, ContactPoints,
    Interpenetration, SurfaceImpact, SurfaceType, AABB,
};
