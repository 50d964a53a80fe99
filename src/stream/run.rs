
//! Counts repetitions of the previous pixel.

use crate::stream::opcode::Op;


/// Number of repetitions of the previous pixel.
/// The encoder counts pending repetitions up to `MAX` before emitting a run instruction.
/// The decoder counts the repetitions of the last run instruction that it has not yet produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunLength {
    count: u16,
}

impl RunLength {

    /// The longest run that fits into a `Run8` instruction.
    pub const SHORT_MAX: u16 = 32;

    /// The longest run that fits into a single instruction.
    pub const MAX: u16 = Self::SHORT_MAX + 1 + 0x1fff;

    /// No repetitions.
    pub fn new() -> Self { Self::default() }

    /// The number of counted repetitions.
    pub fn len(self) -> u16 { self.count }

    /// Whether no repetition is counted.
    pub fn is_empty(self) -> bool { self.count == 0 }

    /// Whether the run must be flushed before it can be extended again.
    pub fn is_full(self) -> bool { self.count >= Self::MAX }

    /// Count one more repetition of the previous pixel.
    pub fn extend(&mut self) {
        debug_assert!(!self.is_full(), "run must be flushed before extending it");
        self.count += 1;
    }

    /// End the pending run. Returns the instruction for it, if any repetition was counted.
    pub fn take(&mut self) -> Option<Op> {
        match std::mem::take(&mut self.count) {
            0 => None,
            length => Some(Op::run(length)),
        }
    }

    /// A run instruction of this length was decoded, and its first pixel produced.
    /// Count the remaining repetitions.
    pub fn start(&mut self, length: u16) {
        self.count = length.saturating_sub(1);
    }

    /// Consume one remaining repetition.
    /// Returns false if there is none left.
    pub fn repeat(&mut self) -> bool {
        if self.count == 0 { false }
        else {
            self.count -= 1;
            true
        }
    }
}
