use crate::math::{is_finite, Unit, Vec2};

/// 0-2 points of contact can occur between two 2D objects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContactPoints {
    Zero,
    One(Vec2),
    Two(Vec2, Vec2),
}

impl ContactPoints {
    /// Two points, collapsed into one if they are equal.
    pub fn from_pair(p1: Vec2, p2: Vec2) -> Self {
        if p1 == p2 {
            ContactPoints::One(p1)
        } else {
            ContactPoints::Two(p1, p2)
        }
    }

    pub fn iter(&self) -> ContactIterator<'_> {
        ContactIterator { cp: self, idx: 0 }
    }

    pub fn first(&self) -> Option<Vec2> {
        self.iter().next().copied()
    }

    pub fn len(&self) -> usize {
        match self {
            ContactPoints::Zero => 0,
            ContactPoints::One(_) => 1,
            ContactPoints::Two(_, _) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ContactPoints::Zero)
    }

    /// Execute a function on every point in the set.
    pub fn map(self, f: impl Fn(Vec2) -> Vec2) -> Self {
        match self {
            ContactPoints::Zero => ContactPoints::Zero,
            ContactPoints::One(p) => ContactPoints::One(f(p)),
            ContactPoints::Two(p1, p2) => ContactPoints::from_pair(f(p1), f(p2)),
        }
    }
}

/// An iterator over the points in a ContactPoints.
pub struct ContactIterator<'a> {
    cp: &'a ContactPoints,
    idx: u8,
}
impl<'a> Iterator for ContactIterator<'a> {
    type Item = &'a Vec2;

    fn next(&mut self) -> Option<Self::Item> {
        self.idx += 1;
        use ContactPoints::*;
        match (self.cp, self.idx - 1) {
            (Zero, _) => None,
            (One(p), 0) => Some(p),
            (One(_), _) => None,
            (Two(p1, _), 0) => Some(p1),
            (Two(_, p2), 1) => Some(p2),
            (Two(_, _), _) => None,
        }
    }
}

/// The overlap between two colliders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interpenetration {
    /// How far the colliders are penetrating.
    /// Negative values are inside, positive values are outside.
    pub depth: f32,
    /// The direction to move the compared collider in to resolve the penetration.
    /// This is typically a surface normal of the collider that ran the test.
    pub direction: Unit<Vec2>,
    /// Points of intersection between the compared colliders, in world space.
    pub points: ContactPoints,
}

impl Interpenetration {
    pub fn new(depth: f32, direction: Unit<Vec2>, points: ContactPoints) -> Self {
        Interpenetration {
            depth,
            direction,
            points,
        }
    }

    /// True if the result describes an actual penetration that should be resolved.
    #[inline]
    pub fn is_colliding(&self) -> bool {
        self.depth < -0.0001 && self.direction.is_finite() && self.depth.is_finite()
    }

    /// True if every number in the result is finite.
    /// A result without contact points is still valid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.depth.is_finite()
            && self.direction.is_finite()
            && self.points.iter().all(|p| is_finite(*p))
    }

    /// The same overlap seen from the other collider.
    pub fn flipped(self) -> Self {
        Interpenetration {
            direction: -self.direction,
            ..self
        }
    }

    /// Displacement that moves the compared collider out along `direction`.
    pub fn resolution(&self) -> Vec2 {
        *self.direction * -self.depth
    }
}

/// Where and how a ray hit a collider's surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceImpact {
    pub normal: Unit<Vec2>,
    pub position: Vec2,
}

/// Rough classification of a surface by the direction of its normal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceType {
    Wall,
    Ceiling,
    Ramp,
    Floor,
}

impl SurfaceType {
    /// True if an object can rest on this surface type.
    pub fn is_walkable(self) -> bool {
        match self {
            SurfaceType::Floor | SurfaceType::Ramp => true,
            SurfaceType::Wall | SurfaceType::Ceiling => false,
        }
    }
}

const FLOOR_MAX_ANGLE: f32 = 0.523599;
const RAMP_MAX_ANGLE: f32 = 0.959_931_5;
const CEILING_MIN_ANGLE: f32 = 2.70526;

impl SurfaceImpact {
    pub fn surface_type(&self) -> SurfaceType {
        // angle between the normal and up
        let angle = self.normal.y.clamp(-1.0, 1.0).acos();
        if angle < FLOOR_MAX_ANGLE {
            SurfaceType::Floor
        } else if angle <= RAMP_MAX_ANGLE {
            SurfaceType::Ramp
        } else if angle >= CEILING_MIN_ANGLE {
            SurfaceType::Ceiling
        } else {
            SurfaceType::Wall
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_iter() {
        let a = Vec2::new(1.0, 0.0);
        let b = Vec2::new(0.0, 1.0);
        itertools::assert_equal(ContactPoints::Zero.iter(), std::iter::empty::<&Vec2>());
        itertools::assert_equal(ContactPoints::One(a).iter(), [a].iter());
        itertools::assert_equal(ContactPoints::Two(a, b).iter(), [a, b].iter());
        assert_eq!(ContactPoints::from_pair(a, a), ContactPoints::One(a));
        assert_eq!(ContactPoints::from_pair(a, b).len(), 2);
    }

    #[test]
    fn flipping_reverses_direction_only() {
        let ip = Interpenetration::new(
            -0.5,
            Unit::right(),
            ContactPoints::One(Vec2::new(1.0, 0.0)),
        );
        let flipped = ip.flipped();
        assert_eq!(*flipped.direction, Vec2::new(-1.0, 0.0));
        assert_eq!(flipped.depth, ip.depth);
        assert_eq!(flipped.points, ip.points);
        assert_eq!(ip.resolution(), Vec2::new(0.5, 0.0));
    }

    #[test]
    fn validity() {
        let empty = Interpenetration::new(-1.0, Unit::up(), ContactPoints::Zero);
        assert!(empty.is_valid());
        assert!(empty.is_colliding());
        let nan = Interpenetration::new(
            -1.0,
            Unit::up(),
            ContactPoints::One(Vec2::new(f32::NAN, 0.0)),
        );
        assert!(!nan.is_valid());
        let touching = Interpenetration::new(0.0, Unit::up(), ContactPoints::Zero);
        assert!(!touching.is_colliding());
    }

    #[test]
    fn surface_types() {
        let impact = |normal: Vec2| SurfaceImpact {
            normal: Unit::new_normalize(normal),
            position: Vec2::zero(),
        };
        assert_eq!(impact(Vec2::new(0.0, 1.0)).surface_type(), SurfaceType::Floor);
        assert_eq!(impact(Vec2::new(1.0, 1.0)).surface_type(), SurfaceType::Ramp);
        assert_eq!(impact(Vec2::new(1.0, 0.0)).surface_type(), SurfaceType::Wall);
        assert_eq!(impact(Vec2::new(0.0, -1.0)).surface_type(), SurfaceType::Ceiling);
        assert!(SurfaceType::Ramp.is_walkable());
        assert!(!SurfaceType::Wall.is_walkable());
    }
}
