//! Edge vectors.

use num_traits::Float;
use std::ops::Mul;

/// The offset between two vertices, usually an edge `end - start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y
    }

    /// The z component of the 3D cross product.
    ///
    /// Positive when `other` turns counter-clockwise from `self`. Walk
    /// entrances and exits, and every orientation test, read this sign.
    #[inline]
    pub fn cross(self, other: Self) -> F {
        self.x * other.y - self.y * other.x
    }

    /// The vector rotated a quarter turn counter-clockwise, pointing to the
    /// left of an edge.
    #[inline]
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    #[inline]
    pub fn magnitude(self) -> F {
        self.dot(self).sqrt()
    }
}

impl<F: Float> Mul<F> for Vec2<F> {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: F) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}
