
//! Describes the qoif image descriptor,
//! the fixed-size block of bytes in front of the pixel stream.

pub mod header;

pub use self::header::{Header, Channels};

use crate::io::*;
use crate::error::{Result, UnitResult, Error};


/// The first four bytes of each qoif stream.
/// Used to abort reading streams that are not qoif.
pub mod magic_number {
    use super::*;

    /// The first four bytes of each qoif stream.
    pub const BYTES: [u8; 4] = *b"qoif";

    /// Without validation, write this instance to the byte stream.
    pub fn write(write: &mut impl Write) -> UnitResult {
        u8::write_slice(write, &self::BYTES)
    }

    /// Consumes four bytes from the reader and returns whether the stream may be a qoif stream.
    pub fn is_qoif(read: &mut impl Read) -> Result<bool> {
        let mut magic_num = [0; 4];
        u8::read_slice(read, &mut magic_num)?;
        Ok(magic_num == self::BYTES)
    }

    /// Validate this stream. If it starts with the magic bytes, return `Ok(())`.
    pub fn validate_qoif(read: &mut impl Read) -> UnitResult {
        if self::is_qoif(read)? { Ok(()) }
        else { Err(Error::Format) }
    }
}


/// Four zero bytes after the last opcode.
/// The decoder stops after the declared number of pixels, so it never reads them.
pub mod padding {
    use super::*;

    /// The padding bytes.
    pub const BYTES: [u8; 4] = [0; 4];

    /// Without validation, write this instance to the byte stream.
    pub fn write(write: &mut impl Write) -> UnitResult {
        u8::write_slice(write, &self::BYTES)
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn magic(){
        let mut bytes = Vec::new();
        magic_number::write(&mut bytes).unwrap();
        assert_eq!(bytes, b"qoif");
        assert!(magic_number::validate_qoif(&mut bytes.as_slice()).is_ok());

        let png: &[u8] = &[0x89, b'P', b'N', b'G'];
        assert!(matches!(magic_number::validate_qoif(&mut &png[..]), Err(Error::Format)));

        let short: &[u8] = b"qo";
        assert!(matches!(magic_number::validate_qoif(&mut &short[..]), Err(Error::Stream(_))));
    }

    #[test]
    fn padding(){
        let mut bytes = vec![ 1 ];
        padding::write(&mut bytes).unwrap();
        assert_eq!(bytes, [1, 0, 0, 0, 0]);
    }
}
