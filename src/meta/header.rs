
//! The fixed 14-byte header of a qoif stream.

use crate::meta::magic_number;
use crate::io::*;
use crate::math::Vec2;
use crate::error::{Result, UnitResult, Error, u32_to_usize, usize_to_u32};


/// Describes the dimensions of an image,
/// and how many channels the producer of the stream intended to store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Header {

    /// Number of pixels in each row.
    pub width: u32,

    /// Number of rows.
    pub height: u32,

    /// Informational only. Decoding always produces rgba pixels.
    pub channels: Channels,

    /// Stored and passed through, but never interpreted.
    pub colorspace: u8,
}

/// The channel count stored in the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channels {

    /// Three channels, the alpha of every pixel is opaque.
    Rgb,

    /// Four channels.
    Rgba,
}


impl Channels {

    /// Parse the channel count byte.
    /// Returns `Error::Channels` for anything other than 3 or 4.
    pub fn from_count(count: u8) -> Result<Self> {
        match count {
            3 => Ok(Channels::Rgb),
            4 => Ok(Channels::Rgba),
            _ => Err(Error::Channels(count)),
        }
    }

    /// The channel count byte.
    pub fn count(self) -> u8 {
        match self {
            Channels::Rgb => 3,
            Channels::Rgba => 4,
        }
    }
}

impl Default for Channels {
    fn default() -> Self { Channels::Rgba }
}


impl Header {

    /// Number of bytes of the header, including the magic bytes.
    pub const BYTE_SIZE: usize = 14;

    /// A four-channel header with colorspace zero.
    /// Returns `Error::NotSupported` if a dimension does not fit into 32 bits.
    pub fn new(size: impl Into<Vec2<usize>>) -> Result<Self> {
        let Vec2(width, height) = size.into();

        Ok(Header {
            width: usize_to_u32(width, "image width larger than u32::MAX")?,
            height: usize_to_u32(height, "image height larger than u32::MAX")?,
            channels: Channels::Rgba,
            colorspace: 0,
        })
    }

    /// Set the informational channel count.
    pub fn with_channels(self, channels: Channels) -> Self {
        Header { channels, ..self }
    }

    /// Set the uninterpreted colorspace byte.
    pub fn with_colorspace(self, colorspace: u8) -> Self {
        Header { colorspace, ..self }
    }

    /// The image dimensions, for indexing pixels in memory.
    pub fn size(&self) -> Result<Vec2<usize>> {
        Ok(Vec2(
            u32_to_usize(self.width, "image width too large for this platform")?,
            u32_to_usize(self.height, "image height too large for this platform")?,
        ))
    }

    /// The exact number of pixels in the stream.
    pub fn pixel_count(&self) -> Result<usize> {
        self.size()?.checked_area()
    }

    /// Check that the pixels described by this header fit in memory
    /// and do not exceed the specified maximum.
    pub fn validate(&self, max_pixel_count: Option<usize>) -> UnitResult {
        let pixel_count = self.pixel_count()?;

        match max_pixel_count {
            Some(max) if pixel_count > max => Err(Error::unsupported(format!(
                "image with {} pixels exceeds the limit of {} pixels", pixel_count, max
            ))),

            _ => Ok(()),
        }
    }

    /// Read the magic bytes and the header, without checking the image size.
    /// Returns `Error::Format` for streams that are not qoif,
    /// and `Error::Channels` for an unknown channel count.
    pub fn read(read: &mut impl Read) -> Result<Self> {
        magic_number::validate_qoif(read)?;

        let width = u32::read(read)?;
        let height = u32::read(read)?;
        let channels = Channels::from_count(u8::read(read)?)?;
        let colorspace = u8::read(read)?;

        tracing::debug!(width, height, channels = channels.count(), colorspace, "read qoif header");
        Ok(Header { width, height, channels, colorspace })
    }

    /// Without validation, write the magic bytes and this header to the byte stream.
    pub fn write(&self, write: &mut impl Write) -> UnitResult {
        magic_number::write(write)?;

        self.width.write(write)?;
        self.height.write(write)?;
        self.channels.count().write(write)?;
        self.colorspace.write(write)?;

        tracing::debug!(width = self.width, height = self.height, channels = self.channels.count(), "wrote qoif header");
        Ok(())
    }
}
