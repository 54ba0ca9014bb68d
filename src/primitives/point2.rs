//! Polygon vertex type.

use super::Vec2;
use num_traits::Float;
use std::ops::{Add, Sub};

/// A polygon vertex, generic over `f32` and `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Point2<F> {
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// Squared distance to `other`; every tolerance comparison in the crate
    /// squares `eps` instead of taking a root here.
    #[inline]
    pub fn distance_squared(self, other: Self) -> F {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// The point halfway to `other`.
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        let two = F::one() + F::one();
        Self::new((self.x + other.x) / two, (self.y + other.y) / two)
    }

    /// Returns `true` if the two vertices are within `eps` of each other.
    #[inline]
    pub fn approx_eq(self, other: Self, eps: F) -> bool {
        self.distance_squared(other) <= eps * eps
    }

    /// Returns `true` if neither coordinate is NaN or infinite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl<F: Float> Sub for Point2<F> {
    type Output = Vec2<F>;

    #[inline]
    fn sub(self, other: Self) -> Vec2<F> {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl<F: Float> Add<Vec2<F>> for Point2<F> {
    type Output = Self;

    #[inline]
    fn add(self, offset: Vec2<F>) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y)
    }
}
