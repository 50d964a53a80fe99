
//! The pixel type of this crate, and the table of recently seen pixels
//! that the encoder and the decoder must maintain identically.

/// A pixel with 8-bit red, green, blue and alpha samples.
/// Arithmetic on the samples wraps around modulo 256.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {

    /// The red sample.
    pub red: u8,

    /// The green sample.
    pub green: u8,

    /// The blue sample.
    pub blue: u8,

    /// The alpha sample, where 255 is opaque.
    pub alpha: u8,
}

impl Pixel {

    /// The value of the pixel register before the first pixel of a stream.
    pub const OPAQUE_BLACK: Pixel = Pixel::rgba(0, 0, 0, 255);

    /// The value of every cache slot before the first pixel of a stream.
    pub const TRANSPARENT_BLACK: Pixel = Pixel::rgba(0, 0, 0, 0);

    /// Create a pixel from four samples.
    #[inline]
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Pixel { red, green, blue, alpha }
    }

    /// Create an opaque pixel.
    #[inline]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Pixel::rgba(red, green, blue, 255)
    }

    /// The slot of this pixel in a `PixelCache`,
    /// computed as `(r ^ g ^ b ^ a) % 64`.
    #[inline]
    pub fn cache_position(self) -> u8 {
        (self.red ^ self.green ^ self.blue ^ self.alpha) % PixelCache::SIZE as u8
    }

    /// Add a signed difference to each sample, wrapping around at 0 and 255.
    #[inline]
    pub fn wrapping_add(self, difference: Difference) -> Self {
        Pixel {
            red: self.red.wrapping_add(difference.red as u8),
            green: self.green.wrapping_add(difference.green as u8),
            blue: self.blue.wrapping_add(difference.blue as u8),
            alpha: self.alpha.wrapping_add(difference.alpha as u8),
        }
    }
}

impl From<[u8; 4]> for Pixel {
    fn from([red, green, blue, alpha]: [u8; 4]) -> Self { Pixel { red, green, blue, alpha } }
}

impl From<Pixel> for [u8; 4] {
    fn from(pixel: Pixel) -> Self { [pixel.red, pixel.green, pixel.blue, pixel.alpha] }
}

impl From<(u8, u8, u8, u8)> for Pixel {
    fn from((red, green, blue, alpha): (u8, u8, u8, u8)) -> Self { Pixel { red, green, blue, alpha } }
}

impl From<[u8; 3]> for Pixel {
    fn from([red, green, blue]: [u8; 3]) -> Self { Pixel::rgb(red, green, blue) }
}


/// The plain signed difference between two pixels, per sample.
/// Unlike pixel arithmetic, computing it does not wrap around,
/// so the difference between 255 and 0 is -255 and not 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Difference {

    /// Difference of the red samples.
    pub red: i16,

    /// Difference of the green samples.
    pub green: i16,

    /// Difference of the blue samples.
    pub blue: i16,

    /// Difference of the alpha samples.
    pub alpha: i16,
}

impl Difference {

    /// Computes `next - previous` for each sample.
    #[inline]
    pub fn between(previous: Pixel, next: Pixel) -> Self {
        Difference {
            red: i16::from(next.red) - i16::from(previous.red),
            green: i16::from(next.green) - i16::from(previous.green),
            blue: i16::from(next.blue) - i16::from(previous.blue),
            alpha: i16::from(next.alpha) - i16::from(previous.alpha),
        }
    }

    /// Create a difference that leaves alpha unchanged.
    #[inline]
    pub const fn rgb(red: i16, green: i16, blue: i16) -> Self {
        Difference { red, green, blue, alpha: 0 }
    }
}


/// Remembers the last pixel seen for each of the 64 cache positions.
/// Encoder and decoder apply the same updates in the same order,
/// so a cache position in the stream always refers to the same pixel on both sides.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PixelCache {
    slots: [Pixel; PixelCache::SIZE],
}

impl PixelCache {

    /// Number of slots.
    pub const SIZE: usize = 64;

    /// A cache where every slot contains `Pixel::TRANSPARENT_BLACK`.
    pub fn new() -> Self {
        PixelCache { slots: [Pixel::TRANSPARENT_BLACK; PixelCache::SIZE] }
    }

    /// The pixel in the slot. Positions are taken modulo 64.
    #[inline]
    pub fn lookup(&self, position: u8) -> Pixel {
        self.slots[usize::from(position) % PixelCache::SIZE]
    }

    /// Overwrite the slot of this pixel, evicting whatever pixel was there before.
    #[inline]
    pub fn store(&mut self, pixel: Pixel) {
        self.slots[usize::from(pixel.cache_position())] = pixel;
    }

    /// Whether the slot of this pixel currently contains exactly this pixel.
    /// Returns the position of that slot if it does.
    #[inline]
    pub fn find(&self, pixel: Pixel) -> Option<u8> {
        let position = pixel.cache_position();
        if self.lookup(position) == pixel { Some(position) } else { None }
    }
}

impl Default for PixelCache {
    fn default() -> Self { Self::new() }
}

impl std::fmt::Debug for PixelCache {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let occupied = self.slots.iter().filter(|&&slot| slot != Pixel::TRANSPARENT_BLACK).count();
        write!(formatter, "PixelCache {{ occupied: {}/{} }}", occupied, PixelCache::SIZE)
    }
}
