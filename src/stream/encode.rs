
//! Push pixels into a qoif opcode stream.

use crate::io::*;
use crate::error::{Result, UnitResult};
use crate::pixel::{Pixel, PixelCache};
use crate::stream::opcode::Op;
use crate::stream::run::RunLength;


/// Encodes pixels one at a time, in row-major order.
/// Writes only the opcode stream, not the header or the padding.
///
/// Call `finish` after the last pixel, or the pending run is lost.
#[derive(Debug)]
pub struct Encoder<W> {
    write: Tracking<W>,
    previous: Pixel,
    cache: PixelCache,
    run: RunLength,
    pixel_count: usize,
}

impl<W: Write> Encoder<W> {

    /// Start a new opcode stream.
    /// The writer should be buffered, as instructions are written byte by byte.
    pub fn new(write: W) -> Self {
        Encoder {
            write: Tracking::new(write),
            previous: Pixel::OPAQUE_BLACK,
            cache: PixelCache::new(),
            run: RunLength::new(),
            pixel_count: 0,
        }
    }

    /// Encode the next pixel.
    pub fn push(&mut self, pixel: impl Into<Pixel>) -> UnitResult {
        let pixel = pixel.into();
        let repeated = pixel == self.previous;
        self.pixel_count += 1;

        if repeated {
            self.run.extend();
        }

        // a flushed run always repeats the previous pixel, never this one
        if !repeated || self.run.is_full() {
            self.flush_run()?;
        }

        if repeated {
            return Ok(());
        }

        let op = match self.cache.find(pixel) {
            Some(position) => Op::Index { position },

            None => {
                self.cache.store(pixel);
                Op::for_transition(self.previous, pixel)
            }
        };

        self.previous = pixel;
        op.write(&mut self.write)
    }

    /// Encode all pixels of the iterator.
    pub fn push_all(&mut self, pixels: impl IntoIterator<Item = impl Into<Pixel>>) -> UnitResult {
        for pixel in pixels {
            self.push(pixel)?;
        }

        Ok(())
    }

    fn flush_run(&mut self) -> UnitResult {
        if let Some(op) = self.run.take() {
            tracing::trace!(length = op.pixel_count(), "flushed run");
            op.write(&mut self.write)?;
        }

        Ok(())
    }

    /// Number of pixels pushed so far.
    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    /// Number of bytes written so far, excluding the pending run.
    pub fn byte_count(&self) -> usize {
        self.write.byte_position()
    }

    /// Write the pending run and flush the writer.
    /// Returns the writer, so that the padding can be appended.
    pub fn finish(mut self) -> Result<W> {
        self.flush_run()?;
        self.write.flush()?;

        tracing::debug!(pixels = self.pixel_count, bytes = self.write.byte_position(), "finished opcode stream");
        Ok(self.write.into_inner())
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::stream::opcode::{Tag, Replacement};
    use crate::pixel::Difference;

    fn encode(pixels: &[Pixel]) -> Vec<u8> {
        let mut encoder = Encoder::new(Vec::new());
        encoder.push_all(pixels.iter().copied()).unwrap();
        encoder.finish().unwrap()
    }

    fn ops(mut bytes: &[u8]) -> Vec<Op> {
        let mut ops = Vec::new();
        while !bytes.is_empty() { ops.push(Op::read(&mut bytes).unwrap()); }
        ops
    }

    #[test]
    fn empty(){
        assert!(encode(&[]).is_empty());
    }

    #[test]
    fn leading_opaque_black_is_a_run(){
        let bytes = encode(&[Pixel::OPAQUE_BLACK; 3]);
        assert_eq!(ops(&bytes), vec![ Op::Run8 { length: 3 } ]);
    }

    #[test]
    fn leading_transparent_black_is_in_cache(){
        let bytes = encode(&[Pixel::TRANSPARENT_BLACK]);
        assert_eq!(ops(&bytes), vec![ Op::Index { position: 0 } ]);
    }

    #[test]
    fn run_belongs_to_previous_pixel(){
        let red = Pixel::rgb(200, 0, 0);
        let blue = Pixel::rgb(0, 0, 200);
        let bytes = encode(&[red, red, red, blue]);

        assert_eq!(ops(&bytes), vec![
            Op::Color(Replacement { red: Some(200), .. Replacement::default() }),
            Op::Run8 { length: 2 },
            Op::Color(Replacement { red: Some(0), blue: Some(200), .. Replacement::default() }),
        ]);
    }

    #[test]
    fn run_is_flushed_when_full(){
        let pixels = vec![ Pixel::OPAQUE_BLACK; usize::from(RunLength::MAX) + 1 ];
        let bytes = encode(&pixels);

        assert_eq!(ops(&bytes), vec![ Op::Run16 { length: RunLength::MAX }, Op::Run8 { length: 1 } ]);
    }

    #[test]
    fn repeated_pixels_do_not_touch_cache(){
        let mut encoder = Encoder::new(Vec::new());
        encoder.push_all(vec![ Pixel::OPAQUE_BLACK; 4 ]).unwrap();

        assert_eq!(encoder.cache, PixelCache::new());
        assert_eq!(encoder.pixel_count(), 4);
    }

    #[test]
    fn indexed_pixels_are_not_stored_again(){
        let a = Pixel::rgb(1, 2, 3);
        let b = Pixel::rgb(90, 80, 70);

        let mut encoder = Encoder::new(Vec::new());
        encoder.push_all([a, b]).unwrap();
        let cache_before = encoder.cache;

        encoder.push(a).unwrap();
        assert_eq!(encoder.cache, cache_before);

        let bytes = encoder.finish().unwrap();
        assert_eq!(ops(&bytes)[2], Op::Index { position: a.cache_position() });
    }

    #[test]
    fn small_steps_use_small_instructions(){
        let bytes = encode(&[
            Pixel::rgb(1, 0, 0),
            Pixel::rgb(0, 0, 0),
            Pixel::rgb(0, 10, 0),
        ]);

        let ops = ops(&bytes);
        assert_eq!(ops[0], Op::Diff8(Difference::rgb(1, 0, 0)));
        assert_eq!(ops[1], Op::Diff8(Difference::rgb(-1, 0, 0)));
        assert_eq!(ops[2].tag(), Tag::Diff24);
        assert_eq!(bytes.len(), 1 + 1 + 3);
    }

    #[test]
    fn accepts_sample_arrays(){
        let mut encoder = Encoder::new(Vec::new());
        encoder.push([0_u8, 0, 0, 255]).unwrap();
        encoder.push((0_u8, 0, 0, 255)).unwrap();
        assert_eq!(encoder.finish().unwrap(), vec![ 0x41 ]);
    }
}
