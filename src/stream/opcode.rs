
//! The seven instructions of a qoif pixel stream.
//!
//! The leading bits of the first byte of an instruction form a prefix code:
//!
//! | Tag      | Leading bits | Bytes   |
//! |----------|--------------|---------|
//! | `Index`  | `00`         | 1       |
//! | `Run8`   | `010`        | 1       |
//! | `Run16`  | `011`        | 2       |
//! | `Diff8`  | `10`         | 1       |
//! | `Diff16` | `110`        | 2       |
//! | `Diff24` | `1110`       | 3       |
//! | `Color`  | `1111`       | 1 to 5  |

use std::ops::RangeInclusive;
use bit_field::BitField;
use smallvec::SmallVec;

use crate::io::*;
use crate::error::{Result, UnitResult};
use crate::pixel::{Pixel, Difference, PixelCache};
use crate::stream::run::RunLength;


/// Identifies an instruction by the leading bits of its first byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {

    /// `00xxxxxx`: a cache position.
    Index,

    /// `010xxxxx`: a run of 1 to 32 pixels.
    Run8,

    /// `011xxxxx xxxxxxxx`: a run of 33 to 8224 pixels.
    Run16,

    /// `10rrggbb`: small rgb difference.
    Diff8,

    /// `110rrrrr ggggbbbb`: medium rgb difference.
    Diff16,

    /// `1110rrrr rgggggbb bbbaaaaa`: rgba difference.
    Diff24,

    /// `1111rgba`: followed by one literal byte per set flag.
    Color,
}

impl Tag {

    /// All tags, in order of their leading bits.
    pub const ALL: [Tag; 7] = [Tag::Index, Tag::Run8, Tag::Run16, Tag::Diff8, Tag::Diff16, Tag::Diff24, Tag::Color];

    /// Classify the first byte of an instruction. Every byte belongs to exactly one tag.
    #[inline]
    pub fn of(first_byte: u8) -> Self {
        match first_byte {
            0x00 ..= 0x3f => Tag::Index,
            0x40 ..= 0x5f => Tag::Run8,
            0x60 ..= 0x7f => Tag::Run16,
            0x80 ..= 0xbf => Tag::Diff8,
            0xc0 ..= 0xdf => Tag::Diff16,
            0xe0 ..= 0xef => Tag::Diff24,
            0xf0 ..= 0xff => Tag::Color,
        }
    }

    /// The first byte of the instruction with all payload bits zero.
    pub fn prefix(self) -> u8 {
        match self {
            Tag::Index => 0x00,
            Tag::Run8 => 0x40,
            Tag::Run16 => 0x60,
            Tag::Diff8 => 0x80,
            Tag::Diff16 => 0xc0,
            Tag::Diff24 => 0xe0,
            Tag::Color => 0xf0,
        }
    }

    /// How many leading bits of the first byte identify this tag.
    pub fn prefix_bit_count(self) -> u32 {
        match self {
            Tag::Index | Tag::Diff8 => 2,
            Tag::Run8 | Tag::Run16 | Tag::Diff16 => 3,
            Tag::Diff24 | Tag::Color => 4,
        }
    }

    /// The leading bits that identify this tag, as a mask for the first byte.
    pub fn prefix_mask(self) -> u8 {
        !(0xff_u8 >> self.prefix_bit_count())
    }
}


/// The differences each diff instruction can represent, before biasing.
pub mod range {
    use super::*;

    /// Red, green and blue differences of `Diff8`.
    pub const DIFF_8: RangeInclusive<i16> = -2 ..= 1;

    /// Red difference of `Diff16`.
    pub const DIFF_16_RED: RangeInclusive<i16> = -16 ..= 15;

    /// Green and blue differences of `Diff16`.
    pub const DIFF_16_GREEN_BLUE: RangeInclusive<i16> = -8 ..= 7;

    /// All four differences of `Diff24`.
    pub const DIFF_24: RangeInclusive<i16> = -16 ..= 15;
}


/// Replaces some samples of the previous pixel with literal values.
/// Samples that are `None` keep their previous value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Replacement {

    /// New red sample.
    pub red: Option<u8>,

    /// New green sample.
    pub green: Option<u8>,

    /// New blue sample.
    pub blue: Option<u8>,

    /// New alpha sample.
    pub alpha: Option<u8>,
}

impl Replacement {

    /// Replace exactly the samples that differ between the two pixels.
    pub fn changed(previous: Pixel, next: Pixel) -> Self {
        let if_changed = |before: u8, after: u8| if before != after { Some(after) } else { None };

        Replacement {
            red: if_changed(previous.red, next.red),
            green: if_changed(previous.green, next.green),
            blue: if_changed(previous.blue, next.blue),
            alpha: if_changed(previous.alpha, next.alpha),
        }
    }

    /// Apply the replacement to a pixel.
    pub fn apply(self, pixel: Pixel) -> Pixel {
        Pixel {
            red: self.red.unwrap_or(pixel.red),
            green: self.green.unwrap_or(pixel.green),
            blue: self.blue.unwrap_or(pixel.blue),
            alpha: self.alpha.unwrap_or(pixel.alpha),
        }
    }

    /// The literal values, in the order they appear in the stream.
    fn literals(self) -> impl Iterator<Item = u8> {
        [self.red, self.green, self.blue, self.alpha].into_iter().flatten()
    }
}


/// A single instruction of the pixel stream.
///
/// Constructing a variant with a field outside of the range
/// documented on that variant will panic when the instruction is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {

    /// The pixel is the content of a cache slot.
    Index {

        /// The slot, in `0 .. 64`.
        position: u8
    },

    /// Repeat the previous pixel a few times.
    Run8 {

        /// Number of repetitions, in `1 ..= 32`.
        length: u8
    },

    /// Repeat the previous pixel many times.
    Run16 {

        /// Number of repetitions, in `33 ..= 8224`.
        length: u16
    },

    /// Add a difference in `range::DIFF_8` to red, green and blue. Alpha difference must be zero.
    Diff8(Difference),

    /// Add a difference in `range::DIFF_16_RED` and `range::DIFF_16_GREEN_BLUE`.
    /// Alpha difference must be zero.
    Diff16(Difference),

    /// Add a difference in `range::DIFF_24` to each sample.
    Diff24(Difference),

    /// Replace samples with literal values.
    Color(Replacement),
}


impl Op {

    /// The shortest run instruction for this number of repetitions.
    /// The length must be in `1 ..= RunLength::MAX`.
    pub fn run(length: u16) -> Self {
        debug_assert!(length >= 1 && length <= RunLength::MAX, "run length {} out of range", length);

        if length <= RunLength::SHORT_MAX { Op::Run8 { length: length as u8 } }
        else { Op::Run16 { length } }
    }

    /// The smallest difference or color instruction that turns `previous` into `next`.
    /// Tries `Diff8`, `Diff16` and `Diff24` in that order, and falls back to `Color`.
    pub fn for_transition(previous: Pixel, next: Pixel) -> Self {
        let difference = Difference::between(previous, next);
        let Difference { red, green, blue, alpha } = difference;

        let all_in = |range: &RangeInclusive<i16>, values: &[i16]| values.iter().all(|value| range.contains(value));

        if !all_in(&range::DIFF_24, &[red, green, blue, alpha]) {
            Op::Color(Replacement::changed(previous, next))
        }
        else if alpha == 0 && all_in(&range::DIFF_8, &[red, green, blue]) {
            Op::Diff8(difference)
        }
        else if alpha == 0 && range::DIFF_16_RED.contains(&red) && all_in(&range::DIFF_16_GREEN_BLUE, &[green, blue]) {
            Op::Diff16(difference)
        }
        else {
            Op::Diff24(difference)
        }
    }

    /// The tag of this instruction.
    pub fn tag(&self) -> Tag {
        match self {
            Op::Index { .. } => Tag::Index,
            Op::Run8 { .. } => Tag::Run8,
            Op::Run16 { .. } => Tag::Run16,
            Op::Diff8(_) => Tag::Diff8,
            Op::Diff16(_) => Tag::Diff16,
            Op::Diff24(_) => Tag::Diff24,
            Op::Color(_) => Tag::Color,
        }
    }

    /// The number of pixels this instruction produces.
    pub fn pixel_count(&self) -> usize {
        match *self {
            Op::Run8 { length } => usize::from(length),
            Op::Run16 { length } => usize::from(length),
            _ => 1,
        }
    }

    /// Encode this instruction.
    pub fn to_bytes(self) -> SmallVec<[u8; 5]> {
        let mut first = self.tag().prefix();

        match self {
            Op::Index { position } => {
                first.set_bits(0..6, position);
                smallvec![ first ]
            },

            Op::Run8 { length } => {
                first.set_bits(0..5, length - 1);
                smallvec![ first ]
            },

            Op::Run16 { length } => {
                let mut word = u16::from(first) << 8;
                word.set_bits(0..13, length - (RunLength::SHORT_MAX + 1));
                SmallVec::from_slice(&word.to_be_bytes())
            },

            Op::Diff8(difference) => {
                first.set_bits(4..6, biased(difference.red, 2));
                first.set_bits(2..4, biased(difference.green, 2));
                first.set_bits(0..2, biased(difference.blue, 2));
                smallvec![ first ]
            },

            Op::Diff16(difference) => {
                let mut word = u16::from(first) << 8;
                word.set_bits(8..13, biased(difference.red, 16).into());
                word.set_bits(4..8, biased(difference.green, 8).into());
                word.set_bits(0..4, biased(difference.blue, 8).into());
                SmallVec::from_slice(&word.to_be_bytes())
            },

            Op::Diff24(difference) => {
                let mut word = u32::from(first) << 16;
                word.set_bits(15..20, biased(difference.red, 16).into());
                word.set_bits(10..15, biased(difference.green, 16).into());
                word.set_bits(5..10, biased(difference.blue, 16).into());
                word.set_bits(0..5, biased(difference.alpha, 16).into());
                SmallVec::from_slice(&word.to_be_bytes()[1..])
            },

            Op::Color(replacement) => {
                first.set_bit(3, replacement.red.is_some());
                first.set_bit(2, replacement.green.is_some());
                first.set_bit(1, replacement.blue.is_some());
                first.set_bit(0, replacement.alpha.is_some());

                let mut bytes: SmallVec<[u8; 5]> = smallvec![ first ];
                bytes.extend(replacement.literals());
                bytes
            },
        }
    }

    /// Number of bytes of the encoded instruction.
    pub fn byte_size(&self) -> usize {
        match self {
            Op::Index { .. } | Op::Run8 { .. } | Op::Diff8(_) => 1,
            Op::Run16 { .. } | Op::Diff16(_) => 2,
            Op::Diff24(_) => 3,
            Op::Color(replacement) => 1 + replacement.literals().count(),
        }
    }

    /// Write the encoded instruction.
    #[inline]
    pub fn write(self, write: &mut impl Write) -> UnitResult {
        u8::write_slice(write, &self.to_bytes())
    }

    /// Read exactly one instruction.
    /// Returns `Error::Stream` if the reader ends inside the instruction.
    pub fn read(read: &mut impl Read) -> Result<Self> {
        let first = u8::read(read)?;

        Ok(match Tag::of(first) {
            Tag::Index => Op::Index { position: first.get_bits(0..6) },

            Tag::Run8 => Op::Run8 { length: first.get_bits(0..5) + 1 },

            Tag::Run16 => {
                let word = u16::from_be_bytes([first, u8::read(read)?]);
                Op::Run16 { length: word.get_bits(0..13) + RunLength::SHORT_MAX + 1 }
            },

            Tag::Diff8 => Op::Diff8(Difference::rgb(
                unbiased(first.get_bits(4..6).into(), 2),
                unbiased(first.get_bits(2..4).into(), 2),
                unbiased(first.get_bits(0..2).into(), 2),
            )),

            Tag::Diff16 => {
                let word = u16::from_be_bytes([first, u8::read(read)?]);

                Op::Diff16(Difference::rgb(
                    unbiased(word.get_bits(8..13).into(), 16),
                    unbiased(word.get_bits(4..8).into(), 8),
                    unbiased(word.get_bits(0..4).into(), 8),
                ))
            },

            Tag::Diff24 => {
                let mut rest = [0_u8; 2];
                u8::read_slice(read, &mut rest)?;
                let word = u32::from_be_bytes([0, first, rest[0], rest[1]]);
                let field = |bits: std::ops::Range<usize>| unbiased(word.get_bits(bits), 16);

                Op::Diff24(Difference {
                    red: field(15..20),
                    green: field(10..15),
                    blue: field(5..10),
                    alpha: field(0..5),
                })
            },

            Tag::Color => {
                let mut literal_if = |flag: bool| -> Result<Option<u8>> {
                    if flag { Ok(Some(u8::read(read)?)) } else { Ok(None) }
                };

                Op::Color(Replacement {
                    red: literal_if(first.get_bit(3))?,
                    green: literal_if(first.get_bit(2))?,
                    blue: literal_if(first.get_bit(1))?,
                    alpha: literal_if(first.get_bit(0))?,
                })
            },
        })
    }

    /// Given the current pixel and the cache of the decoder, compute the pixel this instruction produces.
    /// Run instructions produce the current pixel.
    /// Does not update the cache.
    pub fn apply(self, current: Pixel, cache: &PixelCache) -> Pixel {
        match self {
            Op::Index { position } => cache.lookup(position),
            Op::Run8 { .. } | Op::Run16 { .. } => current,
            Op::Diff8(difference) | Op::Diff16(difference) | Op::Diff24(difference) => current.wrapping_add(difference),
            Op::Color(replacement) => replacement.apply(current),
        }
    }
}


/// Shift a signed difference into an unsigned bit field.
#[inline]
fn biased(difference: i16, bias: i16) -> u8 {
    debug_assert!(difference + bias >= 0, "difference {} below bias {}", difference, bias);
    (difference + bias) as u8
}

/// Reverse `biased`.
#[inline]
fn unbiased(field: u32, bias: i16) -> i16 {
    field as i16 - bias
}
