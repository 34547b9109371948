use thiserror::Error;

/// A rejected bit range, as reported by the fallible `BitField` constructor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Bit index {0} is out of range for a 32-bit word")]
    BitOutOfRange(u32),

    #[error("Bit range is inverted: from_bit {from_bit} is above to_bit {to_bit}")]
    InvertedRange { from_bit: u32, to_bit: u32 },
}
