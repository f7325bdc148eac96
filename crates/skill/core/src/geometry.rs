//! Planar geometry used to place and steer effects.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// 2D vector in world units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `degrees` (counter-clockwise from +x).
    pub fn from_angle_degrees(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self { x: cos, y: sin }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Position plus facing of an effect.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Vec2,
    /// Facing angle in degrees, counter-clockwise from +x.
    pub angle_degrees: f32,
}

impl Transform {
    pub const fn new(position: Vec2, angle_degrees: f32) -> Self {
        Self {
            position,
            angle_degrees,
        }
    }

    /// Places a transform at `origin`, facing `toward`.
    pub fn looking_at(origin: Vec2, toward: Vec2) -> Self {
        Self::new(origin, facing_angle_degrees(origin, toward))
    }

    /// Unit vector along the facing ("right" axis of a 2D sprite).
    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle_degrees(self.angle_degrees)
    }

    /// Moves along the facing by `distance`.
    pub fn advance(&mut self, distance: f32) {
        self.position += self.forward() * distance;
    }
}

/// Angle in degrees of the vector from `from` to `to`.
///
/// Coincident points yield `0.0` (`atan2(0, 0)`).
pub fn facing_angle_degrees(from: Vec2, to: Vec2) -> f32 {
    let direction = to - from;
    direction.y.atan2(direction.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn diagonal_target_faces_forty_five_degrees() {
        let angle = facing_angle_degrees(Vec2::ZERO, Vec2::new(1.0, 1.0));
        assert!(approx(angle, 45.0), "got {angle}");
    }

    #[test]
    fn facing_covers_all_quadrants() {
        assert!(approx(facing_angle_degrees(Vec2::ZERO, Vec2::new(0.0, 2.0)), 90.0));
        assert!(approx(facing_angle_degrees(Vec2::ZERO, Vec2::new(-3.0, 0.0)), 180.0));
        assert!(approx(facing_angle_degrees(Vec2::ZERO, Vec2::new(0.0, -1.0)), -90.0));
        assert!(approx(
            facing_angle_degrees(Vec2::new(2.0, 2.0), Vec2::new(1.0, 1.0)),
            -135.0
        ));
    }

    #[test]
    fn coincident_points_face_zero() {
        let p = Vec2::new(3.0, -2.0);
        assert_eq!(facing_angle_degrees(p, p), 0.0);
    }

    #[test]
    fn advance_moves_along_facing() {
        let mut transform = Transform::looking_at(Vec2::ZERO, Vec2::new(0.0, 5.0));
        transform.advance(2.0);
        assert!(approx(transform.position.x, 0.0));
        assert!(approx(transform.position.y, 2.0));
    }
}
