
//! Simple math utilities.

use std::convert::TryFrom;
use crate::error::{Result, Error};

/// Simple two-dimensional vector of any numerical type.
/// Used for image sizes (width, height) and pixel positions (x, y).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vec2<T> (pub T, pub T);

impl<T> Vec2<T> {

    /// Try to convert all components of this vector to a new type,
    /// yielding either a vector of that new type, or an error.
    pub fn try_from<S>(value: Vec2<S>) -> std::result::Result<Self, T::Error> where T: TryFrom<S> {
        let x = T::try_from(value.0)?;
        let y = T::try_from(value.1)?;
        Ok(Vec2(x, y))
    }

    /// Seeing this vector as a dimension or size (width and height),
    /// this returns the area that this dimensions contains (`width * height`).
    pub fn area(self) -> T where T: std::ops::Mul<T, Output = T> {
        self.0 * self.1
    }

    /// The first component of this 2D vector.
    #[inline] pub fn x(self) -> T { self.0 }

    /// The second component of this 2D vector.
    #[inline] pub fn y(self) -> T { self.1 }

    /// The first component of this 2D vector.
    #[inline] pub fn width(self) -> T { self.0 }

    /// The second component of this 2D vector.
    #[inline] pub fn height(self) -> T { self.1 }
}


impl Vec2<usize> {

    /// Like `area`, but returns an error instead of overflowing.
    pub fn checked_area(self) -> Result<usize> {
        self.0.checked_mul(self.1).ok_or_else(|| Error::unsupported("image size too large for this platform"))
    }

    /// Seeing `self` as a pixel position inside an image of the specified size,
    /// return the row-major index of that pixel.
    #[inline]
    pub fn flat_index_for_size(self, resolution: Vec2<usize>) -> usize {
        debug_assert!(
            self.x() < resolution.width() && self.y() < resolution.height(),
            "pixel position {:?} is out of bounds for size {:?}", self, resolution
        );

        self.y() * resolution.width() + self.x()
    }

    /// The inverse of `flat_index_for_size`.
    #[inline]
    pub fn from_flat_index(index: usize, resolution: Vec2<usize>) -> Self {
        Vec2(index % resolution.width(), index / resolution.width())
    }

    /// Iterate all positions inside an image of this size,
    /// row by row, from left to right, top to bottom.
    pub fn positions_row_major(self) -> impl Iterator<Item = Vec2<usize>> {
        let Vec2(width, height) = self;
        (0 .. height).flat_map(move |y| (0 .. width).map(move |x| Vec2(x, y)))
    }
}


impl<T> From<(T, T)> for Vec2<T> {
    fn from((x, y): (T, T)) -> Self { Vec2(x, y) }
}

impl<T> From<Vec2<T>> for (T, T) {
    fn from(vec2: Vec2<T>) -> Self { (vec2.0, vec2.1) }
}
