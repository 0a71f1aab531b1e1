//! Bounding shapes used for influence-zone overlap queries

use crate::entity::ShapeKind;
use crate::foundation::math::Vec2;

/// Axis-aligned rectangle or the ellipse inscribed in it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    /// Axis-aligned rectangle
    Rect {
        /// Top-left corner
        origin: Vec2,
        /// Width and height
        size: Vec2,
    },
    /// Ellipse inscribed in the rectangle `origin`/`size`
    Ellipse {
        /// Top-left corner of the enclosing rectangle
        origin: Vec2,
        /// Width and height of the enclosing rectangle
        size: Vec2,
    },
}

impl Bounds {
    /// Bounding shape for an entity of the given shape kind
    pub fn for_shape(shape: ShapeKind, origin: Vec2, size: Vec2) -> Self {
        match shape {
            ShapeKind::Circle => Self::Ellipse { origin, size },
            ShapeKind::Rectangle | ShapeKind::Image => Self::Rect { origin, size },
        }
    }

    /// Top-left corner of the enclosing rectangle
    pub fn origin(&self) -> Vec2 {
        match self {
            Self::Rect { origin, .. } | Self::Ellipse { origin, .. } => *origin,
        }
    }

    /// Extents of the enclosing rectangle
    pub fn size(&self) -> Vec2 {
        match self {
            Self::Rect { size, .. } | Self::Ellipse { size, .. } => *size,
        }
    }

    /// Minimum corner
    pub fn min(&self) -> Vec2 {
        self.origin()
    }

    /// Maximum corner
    pub fn max(&self) -> Vec2 {
        self.origin() + self.size()
    }

    /// Center of the enclosing rectangle
    pub fn center(&self) -> Vec2 {
        self.origin() + self.size() * 0.5
    }

    /// Whether this shape has a strictly positive area
    pub fn is_empty(&self) -> bool {
        let size = self.size();
        size.x <= 0.0 || size.y <= 0.0
    }

    /// Test overlap with another bounding shape.
    ///
    /// Overlap requires a shared interior: shapes that only touch along an
    /// edge do not intersect. An ellipse is tested against the other shape's
    /// enclosing rectangle.
    pub fn intersects(&self, other: &Bounds) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        match (self, other) {
            (Self::Ellipse { .. }, _) => self.ellipse_overlaps_rect(other.min(), other.max()),
            (_, Self::Ellipse { .. }) => other.ellipse_overlaps_rect(self.min(), self.max()),
            _ => rects_overlap(self.min(), self.max(), other.min(), other.max()),
        }
    }

    /// Whether the point lies strictly inside the shape
    pub fn contains_point(&self, point: Vec2) -> bool {
        if self.is_empty() {
            return false;
        }
        match self {
            Self::Rect { .. } => {
                let (min, max) = (self.min(), self.max());
                point.x > min.x && point.x < max.x && point.y > min.y && point.y < max.y
            }
            Self::Ellipse { .. } => self.normalized_distance_sq(point) < 1.0,
        }
    }

    fn ellipse_overlaps_rect(&self, min: Vec2, max: Vec2) -> bool {
        let center = self.center();
        let closest = Vec2::new(center.x.clamp(min.x, max.x), center.y.clamp(min.y, max.y));
        rects_overlap(self.min(), self.max(), min, max) && self.normalized_distance_sq(closest) < 1.0
    }

    /// Squared distance from the center in units of the semi-axes
    fn normalized_distance_sq(&self, point: Vec2) -> f64 {
        let radii = self.size() * 0.5;
        let d = point - self.center();
        (d.x / radii.x).powi(2) + (d.y / radii.y).powi(2)
    }
}

fn rects_overlap(a_min: Vec2, a_max: Vec2, b_min: Vec2, b_max: Vec2) -> bool {
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}
