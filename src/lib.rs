
//! Read and write lossless qoif images.
//!
//! A qoif stream consists of a 14-byte header, a stream of instructions
//! that each produce one or more pixels, and four bytes of padding.
//! Each instruction describes a pixel relative to the previous pixel,
//! as a run of repetitions, a small difference, a reference into a table
//! of recently seen pixels, or literal sample values.
//!
//! ```
//! use qoif::prelude::*;
//!
//! let image = Image::from_fn((16, 16), |Vec2(x, y)| Pixel::rgb(x as u8 * 16, y as u8 * 16, 128));
//!
//! let mut bytes = Vec::new();
//! encode_image(&mut bytes, &image)?;
//!
//! let header = decode_header(bytes.as_slice())?;
//! assert_eq!((header.width, header.height), (16, 16));
//! assert_eq!(decode_image(bytes.as_slice())?, image);
//! # Ok::<(), qoif::error::Error>(())
//! ```

#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused_extern_crates,
    unused,

    missing_copy_implementations,
    missing_debug_implementations,

    clippy::all,
)]

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod io;
pub mod math;
pub mod error;
pub mod meta;
pub mod pixel;
pub mod stream;
pub mod image;

#[macro_use]
extern crate smallvec;

#[cfg(feature = "image")]
extern crate image as piston_image;


/// Export the most important items from `qoif`.
/// _Note: This includes a type called `Result`, possibly overwriting the default `std::Result` type usage._
pub mod prelude {

    pub use crate::image::{
        decode_header, decode_image, decode_image_with,
        encode_image, encode_image_with,
        read_image_from_file, write_image_to_file,
        Image, GetPixel, SetPixel, ReadOptions, WriteOptions,
    };

    pub use crate::meta::{Header, Channels};
    pub use crate::pixel::Pixel;
    pub use crate::stream::{Encoder, Decoder};
    pub use crate::math::Vec2;
    pub use crate::error::{Result, Error};
}
