
//! Pull pixels out of a qoif stream.

use crate::io::*;
use crate::error::Result;
use crate::meta::Header;
use crate::pixel::{Pixel, PixelCache};
use crate::stream::opcode::Op;
use crate::stream::run::RunLength;


/// Decodes one pixel per call to `next`, in row-major order.
///
/// Yields exactly as many pixels as the header declares.
/// If the stream ends early or cannot be read, yields a single error and then stops.
/// The padding after the last instruction is never read.
#[derive(Debug)]
pub struct Decoder<R> {
    read: Tracking<R>,
    header: Header,

    current: Pixel,
    cache: PixelCache,
    run: RunLength,

    remaining: usize,
    failed: bool,
}

impl<R: Read> Decoder<R> {

    /// Read and validate the header, then prepare decoding the pixels that follow it.
    /// The reader should be buffered, as instructions are read byte by byte.
    pub fn read_header(mut read: R) -> Result<Self> {
        let header = Header::read(&mut read)?;
        Self::new(header, read)
    }

    /// Prepare decoding the opcode stream that follows an already parsed header.
    pub fn new(header: Header, read: R) -> Result<Self> {
        Ok(Decoder {
            read: Tracking::new(read),
            remaining: header.pixel_count()?,
            header,

            current: Pixel::OPAQUE_BLACK,
            cache: PixelCache::new(),
            run: RunLength::new(),

            failed: false,
        })
    }

    /// The header that describes the decoded pixels.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The number of pixels not decoded yet.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Number of bytes consumed from the opcode stream so far.
    pub fn byte_count(&self) -> usize {
        self.read.byte_position()
    }

    /// Stop decoding and return the reader.
    pub fn into_inner(self) -> R {
        self.read.into_inner()
    }

    fn decode_pixel(&mut self) -> Result<Pixel> {
        if self.run.repeat() {
            return Ok(self.current);
        }

        let op = Op::read(&mut self.read)?;
        self.current = op.apply(self.current, &self.cache);

        match op {
            Op::Run8 { .. } | Op::Run16 { .. } => self.run.start(op.pixel_count() as u16),
            Op::Diff8(_) | Op::Diff16(_) | Op::Diff24(_) | Op::Color(_) => self.cache.store(self.current),
            Op::Index { .. } => {},
        }

        Ok(self.current)
    }
}

impl<R: Read> Iterator for Decoder<R> {
    type Item = Result<Pixel>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining == 0 {
            return None;
        }

        match self.decode_pixel() {
            Ok(pixel) => {
                self.remaining -= 1;

                if self.remaining == 0 {
                    tracing::debug!(bytes = self.read.byte_position(), "decoded all pixels");
                }

                Some(Ok(pixel))
            },

            Err(error) => {
                self.failed = true;
                tracing::debug!(%error, remaining = self.remaining, bytes = self.read.byte_position(), "decoding failed");
                Some(Err(error))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed { (0, Some(0)) }
        else { (0, Some(self.remaining)) }
    }
}

impl<R: Read> std::iter::FusedIterator for Decoder<R> {}
