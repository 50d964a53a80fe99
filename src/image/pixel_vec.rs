
//! Provides a predefined pixel storage.
//! Currently contains a simple flattened vector storage.

use super::*;
use crate::error::Error;

/// Store all pixels of an image in a single vector.
///
/// The vector contains all rows one after another, from top to bottom.
/// Use `Image::pixel_index(position)` to compute the flat index of a specific pixel.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {

    /// Width and height of the image.
    pub size: Vec2<usize>,

    /// The vector contains all rows one after another.
    pub pixels: Vec<Pixel>,
}

impl Image {

    /// Number of pixels reserved by `SetPixel::create`, at most.
    const INITIAL_CAPACITY: usize = 1 << 20;

    /// Create a new image, checking the length of the provided pixels vector.
    /// Returns `Error::Invalid` if the vector does not contain exactly `width * height` pixels.
    pub fn new(size: impl Into<Vec2<usize>>, pixels: Vec<Pixel>) -> Result<Self> {
        let size = size.into();

        if size.checked_area()? != pixels.len() {
            return Err(Error::invalid(format!(
                "expected {} pixels, but vector length is {}", size.area(), pixels.len()
            )));
        }

        Ok(Image { size, pixels })
    }

    /// Create an image where all pixels have the same value.
    pub fn filled(size: impl Into<Vec2<usize>>, pixel: Pixel) -> Self {
        let size = size.into();
        Image { size, pixels: vec![ pixel; size.area() ] }
    }

    /// Create an image by computing the pixel at each position.
    pub fn from_fn(size: impl Into<Vec2<usize>>, pixel_at: impl Fn(Vec2<usize>) -> Pixel) -> Self {
        let size = size.into();
        Image { size, pixels: size.positions_row_major().map(pixel_at).collect() }
    }

    /// Compute the flat index of a specific pixel.
    /// Panics for positions outside of the image.
    #[inline]
    pub fn pixel_index(&self, position: Vec2<usize>) -> usize {
        position.flat_index_for_size(self.size)
    }

    /// Examine a pixel. Panics for positions outside of the image.
    #[inline]
    pub fn pixel(&self, position: impl Into<Vec2<usize>>) -> Pixel {
        self.pixels[self.pixel_index(position.into())]
    }
}

impl GetPixel for Image {
    fn size(&self) -> Vec2<usize> { self.size }

    #[inline]
    fn get_pixel(&self, position: Vec2<usize>) -> Pixel {
        self.pixel(position)
    }
}

impl SetPixel for Image {

    /// Starts with an empty vector that grows as decoded pixels arrive,
    /// so that a header alone never allocates the whole image.
    fn create(header: &Header) -> Result<Self> {
        let size = header.size()?;
        let pixel_count = size.checked_area()?;
        Ok(Image { size, pixels: Vec::with_capacity(pixel_count.min(Self::INITIAL_CAPACITY)) })
    }

    #[inline]
    fn set_pixel(&mut self, position: Vec2<usize>, pixel: Pixel) {
        let index = self.pixel_index(position);

        if index < self.pixels.len() {
            self.pixels[index] = pixel;
        }
        else {
            self.pixels.resize(index, Pixel::default());
            self.pixels.push(pixel);
        }
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "Image {{ size: {:?}, pixels: [Pixel; {}] }}", self.size, self.pixels.len())
    }
}
