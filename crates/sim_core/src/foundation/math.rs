//! Math utilities and types
//!
//! Provides the 2D math types used by the simulation. Vectors are value
//! types: every helper here returns a new vector. The integrator is the only
//! place that mutates position, speed and acceleration fields in place.

pub use nalgebra::{Matrix3, Rotation2, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f64>;

/// 3x3 matrix type, used as a 2D homogeneous transform
pub type Mat3 = Matrix3<f64>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f64>;

/// Extension trait for [`Vec2`] with the operations the simulation relies on
pub trait Vec2Ext {
    /// Unit vector in the same direction, or the zero vector for a zero-length input
    fn normalize_or_zero(&self) -> Vec2;

    /// Shrink the vector so its magnitude does not exceed `max`.
    ///
    /// Direction is preserved and vectors already within the limit are
    /// returned unchanged. A non-positive or NaN limit yields the zero vector.
    fn clamp_magnitude(&self, max: f64) -> Vec2;

    /// Euclidean distance to another vector
    fn distance_to(&self, other: &Vec2) -> f64;

    /// Sum of this vector and every vector yielded by `others`
    fn add_all<'a, I>(&self, others: I) -> Vec2
    where
        I: IntoIterator<Item = &'a Vec2>;
}

impl Vec2Ext for Vec2 {
    fn normalize_or_zero(&self) -> Vec2 {
        let magnitude = self.magnitude();
        if magnitude > f64::EPSILON && magnitude.is_finite() {
            self / magnitude
        } else {
            Vec2::zeros()
        }
    }

    fn clamp_magnitude(&self, max: f64) -> Vec2 {
        if max.is_nan() || max <= 0.0 {
            return Vec2::zeros();
        }
        let magnitude = self.magnitude();
        if magnitude > max {
            self * (max / magnitude)
        } else {
            *self
        }
    }

    fn distance_to(&self, other: &Vec2) -> f64 {
        (self - other).magnitude()
    }

    fn add_all<'a, I>(&self, others: I) -> Vec2
    where
        I: IntoIterator<Item = &'a Vec2>,
    {
        others.into_iter().fold(*self, |acc, v| acc + v)
    }
}

/// Homogeneous 2D transform helpers
pub mod transform {
    use super::{Mat3, Rotation2, Vec2};

    /// Translation by `offset`
    pub fn translation(offset: Vec2) -> Mat3 {
        Mat3::new_translation(&offset)
    }

    /// Rotation by `angle` radians about `(cx, cy)`
    pub fn rotation_about(angle: f64, cx: f64, cy: f64) -> Mat3 {
        let pivot = Vec2::new(cx, cy);
        translation(pivot) * Rotation2::new(angle).to_homogeneous() * translation(-pivot)
    }

    /// Apply a homogeneous transform to a point given as a vector
    pub fn apply(matrix: &Mat3, point: Vec2) -> Vec2 {
        let p = matrix.transform_point(&super::Point2::from(point));
        Vec2::new(p.x, p.y)
    }
}
