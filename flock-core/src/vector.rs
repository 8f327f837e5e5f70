use crate::math;

/// A 2D vector used for position, velocity, acceleration and steering forces
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Unit vector pointing at `angle` radians from the positive x-axis
    pub fn from_angle(angle: f32) -> Self {
        let (sin, cos) = math::sin_cos(angle);
        Self { x: cos, y: sin }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn dot(&self, other: &Vector2D) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// z component of the 3D cross product
    pub fn cross(&self, other: &Vector2D) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn magnitude(&self) -> f32 {
        math::sqrt(self.magnitude_squared())
    }

    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self {
                x: self.x / mag,
                y: self.y / mag,
            }
        } else {
            Self::zero()
        }
    }

    /// Rescales to exactly `magnitude`, keeping direction. The zero vector has
    /// no direction and stays zero.
    pub fn set_magnitude(&self, magnitude: f32) -> Self {
        self.normalize() * magnitude
    }

    pub fn limit(&self, max: f32) -> Self {
        let mag_sq = self.magnitude_squared();
        if mag_sq > max * max {
            self.set_magnitude(max)
        } else {
            *self
        }
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        (*self - *other).magnitude()
    }

    /// Angle from the positive x-axis, in radians. Zero for the zero vector.
    pub fn heading(&self) -> f32 {
        if self.is_zero() {
            0.0
        } else {
            math::atan2(self.y, self.x)
        }
    }

    /// Signed angle in `[-π, π]` that rotates `self` onto `other`.
    ///
    /// Returns `0.0` when either vector is zero, since the angle is undefined.
    pub fn angle_between(&self, other: &Vector2D) -> f32 {
        if self.is_zero() || other.is_zero() {
            return 0.0;
        }
        math::atan2(self.cross(other), self.dot(other))
    }

    /// Rotates counter-clockwise by `angle` radians
    pub fn rotate(&self, angle: f32) -> Self {
        let (sin, cos) = math::sin_cos(angle);
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl core::ops::SubAssign for Vector2D {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl core::iter::Sum for Vector2D {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, v| acc + v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::{FRAC_PI_2, PI};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_vector2d_new() {
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.x, 3.0);
        assert_eq!(v.y, 4.0);
    }

    #[test]
    fn test_vector2d_magnitude() {
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.magnitude(), 5.0);
        assert_eq!(v.magnitude_squared(), 25.0);
    }

    #[test]
    fn test_vector2d_normalize() {
        let v = Vector2D::new(3.0, 4.0);
        let normalized = v.normalize();
        assert!((normalized.magnitude() - 1.0).abs() < 0.0001);
        assert_eq!(Vector2D::zero().normalize(), Vector2D::zero());
    }

    #[test]
    fn test_vector2d_operations() {
        let v1 = Vector2D::new(1.0, 2.0);
        let v2 = Vector2D::new(3.0, 4.0);

        let sum = v1 + v2;
        assert_eq!(sum, Vector2D::new(4.0, 6.0));

        let diff = v2 - v1;
        assert_eq!(diff, Vector2D::new(2.0, 2.0));

        let scaled = v1 * 2.0;
        assert_eq!(scaled, Vector2D::new(2.0, 4.0));

        let halved = v2 / 2.0;
        assert_eq!(halved, Vector2D::new(1.5, 2.0));

        let mut acc = v1;
        acc += v2;
        acc -= v1;
        assert_eq!(acc, v2);
        assert_eq!(-v1, Vector2D::new(-1.0, -2.0));
    }

    #[test]
    fn test_set_magnitude_keeps_direction() {
        let v = Vector2D::new(3.0, 4.0).set_magnitude(10.0);
        assert!(approx(v.x, 6.0));
        assert!(approx(v.y, 8.0));
    }

    #[test]
    fn test_set_magnitude_of_zero_stays_zero() {
        let v = Vector2D::zero().set_magnitude(2.0);
        assert_eq!(v, Vector2D::zero());
        assert!(v.is_finite());
    }

    #[test]
    fn test_limit() {
        let long = Vector2D::new(30.0, 40.0).limit(5.0);
        assert!(approx(long.magnitude(), 5.0));

        let short = Vector2D::new(1.0, 1.0);
        assert_eq!(short.limit(5.0), short);
    }

    #[test]
    fn test_distance() {
        let a = Vector2D::new(0.0, 0.0);
        let b = Vector2D::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_heading() {
        assert!(approx(Vector2D::new(1.0, 0.0).heading(), 0.0));
        assert!(approx(Vector2D::new(0.0, 1.0).heading(), FRAC_PI_2));
        assert!(approx(Vector2D::new(-1.0, 0.0).heading(), PI));
        assert_eq!(Vector2D::zero().heading(), 0.0);
    }

    #[test]
    fn test_angle_between_is_signed() {
        let right = Vector2D::new(1.0, 0.0);
        assert!(approx(right.angle_between(&Vector2D::new(0.0, 1.0)), FRAC_PI_2));
        assert!(approx(right.angle_between(&Vector2D::new(0.0, -1.0)), -FRAC_PI_2));
        assert!(approx(right.angle_between(&Vector2D::new(-1.0, 0.0)).abs(), PI));
    }

    #[test]
    fn test_angle_between_zero_vector_is_sentinel() {
        let v = Vector2D::new(1.0, 1.0);
        assert_eq!(v.angle_between(&Vector2D::zero()), 0.0);
        assert_eq!(Vector2D::zero().angle_between(&v), 0.0);
    }

    #[test]
    fn test_from_angle_and_rotate() {
        let v = Vector2D::from_angle(FRAC_PI_2);
        assert!(approx(v.x, 0.0));
        assert!(approx(v.y, 1.0));

        let r = Vector2D::new(1.0, 0.0).rotate(PI);
        assert!(approx(r.x, -1.0));
        assert!(approx(r.y, 0.0));
    }

    #[test]
    fn test_sum() {
        let total: Vector2D = [Vector2D::new(1.0, 2.0), Vector2D::new(3.0, 4.0)]
            .into_iter()
            .sum();
        assert_eq!(total, Vector2D::new(4.0, 6.0));
    }
}
