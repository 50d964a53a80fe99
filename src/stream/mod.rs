
//! The opcode stream between the header and the padding:
//! instructions, run lengths, and the encoder and decoder state machines.

pub mod opcode;
pub mod run;
pub mod encode;
pub mod decode;

pub use self::encode::Encoder;
pub use self::decode::Decoder;
