use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::errors::SimulationError;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }

    pub const fn zero() -> Self {
        Vector3::new(0.0, 0.0, 0.0)
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Unit vector in the direction of `self`.
    ///
    /// `quantity` names the vector in the error raised when it has no
    /// direction (zero or non-finite length).
    pub fn normalize(&self, quantity: &'static str) -> Result<Self, SimulationError> {
        let mag = self.magnitude();
        if mag == 0.0 || !mag.is_finite() {
            return Err(SimulationError::DegenerateVector { quantity });
        }
        Ok(*self / mag)
    }

    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Sum for Vector3 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Vector3::zero(), |a, b| a + b)
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Vector3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Vector3::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, vector: Vector3) -> Vector3 {
        Vector3::new(self * vector.x, self * vector.y, self * vector.z)
    }
}

impl Div<f64> for Vector3 {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Vector3::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_magnitude() {
        let v = Vector3::new(2.0, 3.0, 6.0);
        assert_abs_diff_eq!(v.magnitude(), 7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.magnitude_squared(), 49.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize() {
        let v = Vector3::new(0.0, -4.0, 3.0).normalize("test").unwrap();
        assert_abs_diff_eq!(v.magnitude(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.y, -0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(v.z, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_zero_vector_names_quantity() {
        let err = Vector3::zero().normalize("position").unwrap_err();
        match err {
            SimulationError::DegenerateVector { quantity } => assert_eq!(quantity, "position"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_normalize_rejects_nan() {
        assert!(Vector3::new(f64::NAN, 1.0, 0.0).normalize("velocity").is_err());
    }

    #[test]
    fn test_normalize_overflowing_magnitude() {
        let huge = Vector3::new(0.0, -1e160, 0.0);
        assert!(huge.is_finite());
        let err = huge.normalize("velocity").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Degenerate geometry: velocity vector has zero or non-finite length"
        );
    }

    #[test]
    fn test_arithmetic() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(-1.0, 0.5, 2.0);
        assert_eq!(a + b, Vector3::new(0.0, 2.5, 5.0));
        assert_eq!(a - b, Vector3::new(2.0, 1.5, 1.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(a / 2.0, Vector3::new(0.5, 1.0, 1.5));
        assert_eq!(vec![a, b].into_iter().sum::<Vector3>(), a + b);
    }

    #[test]
    fn test_dot_and_cross() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(x.dot(&y), 0.0);
        assert_eq!(x.cross(&y), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(&x), Vector3::new(0.0, 0.0, -1.0));
    }
}
