use glam::Vec2;

/// Overlap tolerance. Boxes that merely touch (or overlap by float noise after
/// a resolve) do not count as overlapping.
const OVERLAP_EPSILON: f32 = 1e-3;

/// Axis-aligned box stored as centre + half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    /// Box spanning `min..max`.
    pub fn from_corners(min: Vec2, max: Vec2) -> Self {
        Self {
            center: (min + max) * 0.5,
            half: (max - min) * 0.5,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        let gap = (self.center - other.center).abs();
        let reach = self.half + other.half;
        gap.x < reach.x - OVERLAP_EPSILON && gap.y < reach.y - OVERLAP_EPSILON
    }

    pub fn translated(&self, offset: Vec2) -> Aabb {
        Aabb::new(self.center + offset, self.half)
    }
}

/// Horizontal facing. The discriminant doubles as the x sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left = -1,
    Right = 1,
}

impl Facing {
    pub fn sign(self) -> f32 {
        self as i32 as f32
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Facing for a non-zero x component; `None` when `x` is zero.
    pub fn from_x(x: f32) -> Option<Self> {
        if x < 0.0 {
            Some(Self::Left)
        } else if x > 0.0 {
            Some(Self::Right)
        } else {
            None
        }
    }
}

/// Kinematic character body. World space, y up.
///
/// Contact flags are refreshed by every `move_and_slide` and describe the
/// body's surroundings *after* that move.
#[derive(Debug, Clone)]
pub struct Body {
    pub position: Vec2,
    pub half_size: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    pub on_floor: bool,
    pub on_wall: bool,
    pub on_ceiling: bool,
    /// x component of the touched wall's normal: +1.0 for a wall on the left,
    /// -1.0 for a wall on the right, 0.0 when not touching one.
    pub wall_normal: f32,
}

impl Body {
    pub fn new(position: Vec2, half_size: Vec2) -> Self {
        Self {
            position,
            half_size,
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            on_floor: false,
            on_wall: false,
            on_ceiling: false,
            wall_normal: 0.0,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.half_size)
    }

    /// Bottom-centre point (feet).
    pub fn feet(&self) -> Vec2 {
        self.position - Vec2::new(0.0, self.half_size.y)
    }
}
