
//! Error type definitions.

use std::borrow::Cow;
use std::convert::TryFrom;
use std::error;
use std::fmt;

pub use std::io::Error as IoError;


/// A result that may contain a qoif error.
pub type Result<T> = std::result::Result<T, Error>;

/// A result that, if ok, contains nothing, and otherwise contains a qoif error.
pub type UnitResult = Result<()>;


/// An error that may happen while reading or writing a qoif stream.
/// Every error is terminal for the image that is being processed.
#[derive(Debug)]
pub enum Error {

    /// The stream does not start with the `qoif` magic bytes.
    Format,

    /// The header declares a channel count other than 3 or 4.
    /// Contains the declared count.
    Channels(u8),

    /// Reading or writing the underlying byte stream failed.
    /// Also returned when the stream ends before all pixels have been decoded,
    /// in which case the io error kind is `UnexpectedEof`.
    Stream(IoError),

    /// The image is too large for this platform or for the configured limit.
    NotSupported(Cow<'static, str>),

    /// A pixel buffer does not match its declared size.
    Invalid(Cow<'static, str>),
}


impl Error {

    /// Create an error of the variant `NotSupported`.
    pub(crate) fn unsupported(message: impl Into<Cow<'static, str>>) -> Self {
        Error::NotSupported(message.into())
    }

    /// Create an error of the variant `Invalid`.
    pub(crate) fn invalid(message: impl Into<Cow<'static, str>>) -> Self {
        Error::Invalid(message.into())
    }

    /// Whether this error was caused by a stream that ended too early.
    pub fn is_unexpected_end(&self) -> bool {
        match self {
            Error::Stream(io) => io.kind() == std::io::ErrorKind::UnexpectedEof,
            _ => false,
        }
    }
}


/// Enable using the `?` operator on `std::io::Result`.
impl From<IoError> for Error {
    fn from(error: IoError) -> Self {
        Error::Stream(error)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Format => formatter.write_str("bad magic value"),
            Error::Channels(count) => write!(formatter, "bad channels: {}", count),
            Error::Stream(err) => write!(formatter, "stream error: {}", err),
            Error::NotSupported(message) => write!(formatter, "not supported: {}", message),
            Error::Invalid(message) => write!(formatter, "invalid pixel buffer: {}", message),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Stream(err) => Some(err),
            _ => None,
        }
    }
}


/// Widen a header dimension for indexing. Fails only on 16-bit platforms.
#[inline]
pub(crate) fn u32_to_usize(value: u32, error_message: &'static str) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::unsupported(error_message))
}

/// Narrow an in-memory dimension to the header field width.
#[inline]
pub(crate) fn usize_to_u32(value: usize, error_message: &'static str) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::unsupported(error_message))
}


#[cfg(test)]
mod test {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn end_of_stream_is_a_stream_error(){
        let error = Error::from(IoError::new(ErrorKind::UnexpectedEof, "eof"));
        assert!(matches!(error, Error::Stream(_)));
        assert!(error.is_unexpected_end());
        assert!(error::Error::source(&error).is_some());

        assert!(!Error::Format.is_unexpected_end());
        assert!(!Error::from(IoError::new(ErrorKind::BrokenPipe, "pipe")).is_unexpected_end());
    }

    #[test]
    fn display(){
        assert_eq!(Error::Format.to_string(), "bad magic value");
        assert_eq!(Error::Channels(5).to_string(), "bad channels: 5");
        assert_eq!(Error::unsupported("width").to_string(), "not supported: width");
    }

    #[test]
    fn dimension_conversion(){
        assert_eq!(usize_to_u32(7, "width").unwrap(), 7);
        assert_eq!(u32_to_usize(u32::MAX, "width").unwrap(), u32::MAX as usize);

        #[cfg(target_pointer_width = "64")]
        assert!(matches!(usize_to_u32(usize::MAX, "width"), Err(Error::NotSupported(_))));
    }
}
