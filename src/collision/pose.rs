use crate::math::Vec2;

/// Offset and extent of a shape relative to the object it's attached to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapePose<R> {
    /// Translation from the owning object's centroid to the geometry's centroid.
    pub offset: Vec2,
    pub radius: R,
}

/// A shape radius that can be stretched by a transform's scale.
pub trait ShapeRadius: Copy {
    fn scaled(self, scale: Vec2) -> Self;
}

/// Independent half-extents on each axis.
impl ShapeRadius for Vec2 {
    #[inline]
    fn scaled(self, scale: Vec2) -> Self {
        self * scale
    }
}

/// A single radius follows the magnitude of the scale vector,
/// so a non-uniform scale still produces a circle.
impl ShapeRadius for f32 {
    #[inline]
    fn scaled(self, scale: Vec2) -> Self {
        self * (scale.mag() / 2.0)
    }
}

/// The pose a shape was created with, and the pose after the most recent transform.
///
/// `rest` never changes after construction. `current` starts out equal to `rest`,
/// so reading a collider before its first update gives the untransformed shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseCache<R> {
    pub(crate) rest: ShapePose<R>,
    pub(crate) current: ShapePose<R>,
}

impl<R: ShapeRadius> PoseCache<R> {
    pub fn at_rest(rest: ShapePose<R>) -> Self {
        PoseCache {
            rest,
            current: rest,
        }
    }

    pub fn rest(&self) -> &ShapePose<R> {
        &self.rest
    }

    pub fn current(&self) -> &ShapePose<R> {
        &self.current
    }

    /// Derive the current pose from the rest pose and a scale.
    pub fn recompute(&mut self, scale: Vec2) {
        self.current = ShapePose {
            offset: self.rest.offset * scale,
            radius: self.rest.radius.scaled(scale),
        };
    }
}
