
//! Specialized binary input and output.
//! Uses the error handling for this crate.
//! All multi-byte values in a qoif stream are big-endian.

pub use ::std::io::{Read, Write, BufReader, BufWriter};
use lebe::prelude::*;
use crate::error::{Result, UnitResult};


/// Keep track of how many bytes were read or written.
/// Used to report stream sizes after encoding or decoding an image.
#[derive(Debug)]
pub struct Tracking<T> {

    /// Do not expose to prevent reading or writing without updating the position.
    inner: T,

    position: usize,
}

impl<T: Read> Read for Tracking<T> {
    fn read(&mut self, buffer: &mut [u8]) -> std::io::Result<usize> {
        let count = self.inner.read(buffer)?;
        self.position += count;
        Ok(count)
    }
}

impl<T: Write> Write for Tracking<T> {
    fn write(&mut self, buffer: &[u8]) -> std::io::Result<usize> {
        let count = self.inner.write(buffer)?;
        self.position += count;
        Ok(count)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl<T> Tracking<T> {

    /// Start counting at zero.
    pub fn new(inner: T) -> Self {
        Tracking { inner, position: 0 }
    }

    /// Current number of bytes written or read.
    pub fn byte_position(&self) -> usize {
        self.position
    }

    /// Stop counting and return the wrapped reader or writer.
    pub fn into_inner(self) -> T {
        self.inner
    }
}


/// Generic trait that defines common binary operations such as reading and writing for this type.
pub trait Data: Sized + Default + Clone {

    /// Number of bytes this value occupies in a stream.
    const BYTE_SIZE: usize = ::std::mem::size_of::<Self>();

    /// Read a value of type `Self`.
    /// Returns `Error::Stream` with `UnexpectedEof` if the reader is exhausted.
    fn read(read: &mut impl Read) -> Result<Self>;

    /// Read as many values of type `Self` as fit into the specified slice.
    fn read_slice(read: &mut impl Read, slice: &mut [Self]) -> UnitResult;

    /// Write this value to the writer.
    fn write(self, write: &mut impl Write) -> UnitResult;

    /// Write all values of that slice to the writer.
    fn write_slice(write: &mut impl Write, slice: &[Self]) -> UnitResult;
}


macro_rules! implement_data_for_primitive {
    ($kind: ident) => {
        impl Data for $kind {
            #[inline]
            fn read(read: &mut impl Read) -> Result<Self> {
                Ok(read.read_from_big_endian()?)
            }

            #[inline]
            fn write(self, write: &mut impl Write) -> Result<()> {
                write.write_as_big_endian(&self)?;
                Ok(())
            }

            #[inline]
            fn read_slice(read: &mut impl Read, slice: &mut [Self]) -> Result<()> {
                read.read_from_big_endian_into(slice)?;
                Ok(())
            }

            #[inline]
            fn write_slice(write: &mut impl Write, slice: &[Self]) -> Result<()> {
                write.write_as_big_endian(slice)?;
                Ok(())
            }
        }
    };
}

implement_data_for_primitive!(u8);
implement_data_for_primitive!(u16);
implement_data_for_primitive!(u32);
