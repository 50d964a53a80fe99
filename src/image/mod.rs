
//! Read and write whole images.
//!
//! Use `decode_image` and `encode_image` with the `Image` pixel storage of this crate,
//! or implement `GetPixel` and `SetPixel` for your own pixel storage
//! and use `decode_image_with` and `encode_image_with`.

pub mod pixel_vec;

#[cfg(feature = "image")]
pub mod interop;

pub use self::pixel_vec::Image;

use std::fs::File;
use std::path::Path;

use crate::io::*;
use crate::math::Vec2;
use crate::meta::{Header, Channels, padding};
use crate::pixel::Pixel;
use crate::stream::{Encoder, Decoder};
use crate::error::{Result, UnitResult};


/// Options for decoding an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadOptions {

    /// Images with more pixels are rejected with `Error::NotSupported`
    /// before any pixel storage is allocated. `None` disables the check.
    pub max_pixel_count: Option<usize>,
}

/// Options for encoding an image.
/// The values are stored in the header only, and do not change the pixel stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteOptions {

    /// Whether the image is declared to have an alpha channel.
    pub channels: Channels,

    /// The colorspace byte. Not interpreted by this crate.
    pub colorspace: u8,
}

impl ReadOptions {

    /// The default pixel limit, 400 million pixels.
    pub const DEFAULT_MAX_PIXEL_COUNT: usize = 400_000_000;

    /// Accept images of any size, as long as they fit in memory.
    pub fn unlimited() -> Self {
        ReadOptions { max_pixel_count: None }
    }

    /// Reject images with more pixels than specified.
    pub fn with_max_pixel_count(self, max_pixel_count: usize) -> Self {
        ReadOptions { max_pixel_count: Some(max_pixel_count) }
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions { max_pixel_count: Some(Self::DEFAULT_MAX_PIXEL_COUNT) }
    }
}

impl WriteOptions {

    /// Declare three channels in the header.
    pub fn rgb() -> Self {
        WriteOptions { channels: Channels::Rgb, ..Self::default() }
    }

    /// Set the colorspace byte.
    pub fn with_colorspace(self, colorspace: u8) -> Self {
        WriteOptions { colorspace, ..self }
    }
}


/// Pixel storage that can be encoded.
pub trait GetPixel {

    /// Width and height of the image.
    fn size(&self) -> Vec2<usize>;

    /// The pixel at this position. Will only be called for positions inside `size`.
    fn get_pixel(&self, position: Vec2<usize>) -> Pixel;
}

/// Pixel storage that can be decoded into.
pub trait SetPixel: Sized {

    /// Prepare storage for the image described by the header.
    /// The header has not been checked against the pixel stream yet.
    fn create(header: &Header) -> Result<Self>;

    /// Store a decoded pixel. Will be called exactly once for each position, in row-major order.
    fn set_pixel(&mut self, position: Vec2<usize>, pixel: Pixel);
}


/// Read only the header, which contains the dimensions of the image.
/// Consumes the 14 header bytes of the reader.
pub fn decode_header(mut read: impl Read) -> Result<Header> {
    Header::read(&mut read)
}

/// Buffer the reader and decode the image into an `Image`, using the default options.
pub fn decode_image(read: impl Read) -> Result<Image> {
    decode_image_with(BufReader::new(read), ReadOptions::default())
}

/// Decode the image into any pixel storage.
/// The reader should be buffered, or be an in-memory slice.
pub fn decode_image_with<Pixels: SetPixel>(read: impl Read, options: ReadOptions) -> Result<Pixels> {
    let mut decoder = Decoder::read_header(read)?;
    let header = *decoder.header();
    header.validate(options.max_pixel_count)?;

    let mut pixels = Pixels::create(&header)?;
    for (position, pixel) in header.size()?.positions_row_major().zip(&mut decoder) {
        pixels.set_pixel(position, pixel?);
    }

    Ok(pixels)
}

/// Buffer the writer and encode the image, using the default options.
pub fn encode_image(write: impl Write, image: &impl GetPixel) -> UnitResult {
    encode_image_with(BufWriter::new(write), WriteOptions::default(), image)
}

/// Encode an image from any pixel storage.
/// Writes the header, the pixels in row-major order, and the padding.
/// The writer should be buffered, or be an in-memory vector.
pub fn encode_image_with(mut write: impl Write, options: WriteOptions, image: &impl GetPixel) -> UnitResult {
    let size = image.size();

    let header = Header::new(size)?
        .with_channels(options.channels)
        .with_colorspace(options.colorspace);

    header.write(&mut write)?;

    let mut encoder = Encoder::new(write);
    for position in size.positions_row_major() {
        encoder.push(image.get_pixel(position))?;
    }

    let mut write = encoder.finish()?;
    padding::write(&mut write)?;
    write.flush()?;
    Ok(())
}

/// Read a qoif file into an `Image`.
pub fn read_image_from_file(path: impl AsRef<Path>) -> Result<Image> {
    decode_image(File::open(path)?)
}

/// Create or overwrite a qoif file.
pub fn write_image_to_file(path: impl AsRef<Path>, image: &impl GetPixel) -> UnitResult {
    encode_image(File::create(path)?, image)
}
