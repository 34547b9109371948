//!
//! Packing and unpacking of bit fields within 32-bit machine words. This is
//! the low-level half of an instruction encoder or decoder: a [`BitField`]
//! names a contiguous range of bits inside a word, and knows how to pull that
//! range out (unsigned or sign-extended) and how to merge a value back into
//! it. [`sign_extend`] is also exposed on its own, for callers that assemble
//! a field's bits by hand before widening them.
//!
//! The crate deliberately stops there. It doesn't define any instruction
//! format or opcode table, doesn't handle words other than 32 bits wide, and
//! doesn't check that the fields of an encoding avoid overlapping each other.
//! All of that is the business of whatever assembler or emulator builds on
//! top of it.
//!

pub mod error;
pub mod field;

pub use error::FieldError;
pub use field::{field_mask, sign_extend, BitField, WORD_SIZE};
