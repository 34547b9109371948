use crate::error::FieldError;
use log::trace;

/// Width in bits of the words this crate operates on.
pub const WORD_SIZE: u32 = 32;

/// Mask with bits `from_bit..=to_bit` set and every other bit clear.
///
/// The run of ones is built in 64 bits so that a field covering the whole
/// word doesn't overflow the shift, then truncated back down to a real
/// 32-bit register value.
pub const fn field_mask(from_bit: u32, to_bit: u32) -> u32 {
    let width = to_bit - from_bit + 1;
    (((1u64 << width) - 1) << from_bit) as u32
}

/// Handles insertion and extraction of one field within a 32-bit word.
///
/// A field covers bits `from_bit..=to_bit`, where bit 0 is the low-order bit
/// (value 2^0) and bit 31 the high-order bit (value 2^31). The low four bits
/// of a word, for example, are `BitField::new(0, 3)`.
///
/// The descriptor holds no word of its own; words are passed to each
/// operation and never retained, so a single `BitField` can be shared freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
    from_bit: u32,
    to_bit: u32,
    mask: u32,
}

impl BitField {
    /// Builds the field covering bits `from_bit..=to_bit`.
    ///
    /// # Panics
    ///
    /// Panics if `from_bit` is not a valid bit index or the range is
    /// inverted. Use [`BitField::try_new`] when the range comes from input
    /// you don't control.
    pub fn new(from_bit: u32, to_bit: u32) -> Self {
        match Self::try_new(from_bit, to_bit) {
            Ok(field) => field,
            Err(e) => panic!("{e}"),
        }
    }

    /// Fallible version of [`BitField::new`], for fields built out of parsed
    /// or otherwise untrusted ranges.
    pub fn try_new(from_bit: u32, to_bit: u32) -> Result<Self, FieldError> {
        if from_bit >= WORD_SIZE {
            return Err(FieldError::BitOutOfRange(from_bit));
        }
        if to_bit > WORD_SIZE {
            return Err(FieldError::BitOutOfRange(to_bit));
        }
        if from_bit > to_bit {
            return Err(FieldError::InvertedRange { from_bit, to_bit });
        }

        let mask = field_mask(from_bit, to_bit);
        trace!("bits {from_bit}..={to_bit} get mask {mask:#010x}");

        Ok(BitField {
            from_bit,
            to_bit,
            mask,
        })
    }

    /// Low bit index of the field.
    pub fn from_bit(self) -> u32 {
        self.from_bit
    }

    /// High bit index of the field, inclusive.
    pub fn to_bit(self) -> u32 {
        self.to_bit
    }

    /// Mask with ones in exactly the field's positions.
    pub fn mask(self) -> u32 {
        self.mask
    }

    /// Number of bits the field covers.
    pub fn width(self) -> u32 {
        self.to_bit - self.from_bit + 1
    }

    /// Extracts the field and returns it in the low-order bits. For a field
    /// covering bits 3..=5 the result is a value between 0 and 0b111.
    pub fn extract(self, word: u32) -> u32 {
        (self.mask & word) >> self.from_bit
    }

    /// Extracts the field as a two's-complement signed value.
    ///
    /// # Panics
    ///
    /// Panics if the field's width falls outside what [`sign_extend`]
    /// accepts: a single bit has no room for a sign, and a field built with
    /// the one-past-the-top range is wider than the word.
    pub fn extract_signed(self, word: u32) -> i32 {
        sign_extend(self.extract(word), self.width())
    }

    /// Inserts `value`, which should sit in the low-order bits and be no
    /// wider than the field, into the field's range of `word`, which should
    /// be zero there beforehand. Returns the combined word:
    /// `BitField::new(3, 5).insert(0b101, 0b110)` is `0b101110`.
    ///
    /// Neither expectation is checked. An oversized `value` is truncated by
    /// the field mask, and bits already set in the target range are OR-ed
    /// together with the new ones.
    pub fn insert(self, value: u32, word: u32) -> u32 {
        word | ((value << self.from_bit) & self.mask)
    }
}

/// Interprets `field` as a signed integer `width` bits wide.
///
/// If the sign bit is clear the value comes back unchanged. If it is set,
/// the low `width - 1` bits are kept as magnitude and `2^(width - 1)` is
/// subtracted, yielding a negative `i32` whose ordinary arithmetic
/// (negation, comparison, addition) behaves exactly as a `width`-bit
/// two's-complement register would.
///
/// # Panics
///
/// Panics if `width` is outside `2..=32` or `field` doesn't fit in the
/// field width.
pub fn sign_extend(field: u32, width: u32) -> i32 {
    trace!("sign extending {field} ({field:#b}) in a field of {width} bits");
    assert!(width > 1, "field of {width} bits has no room for a sign");
    assert!(width <= WORD_SIZE, "field of {width} bits exceeds the word");
    assert!(
        (field as u64) < 1u64 << (width + 1),
        "{field} doesn't fit in {width} bits"
    );

    let sign_bit = 1u32 << (width - 1);
    if field & sign_bit != 0 {
        trace!("negative, complementing by subtracting 2^{}", width - 1);
        // i64 keeps the width == 32 subtraction from overflowing
        ((field & (sign_bit - 1)) as i64 - sign_bit as i64) as i32
    } else {
        field as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(BitField::new(0, 3).mask(), 0b1111);
        assert_eq!(BitField::new(3, 5).mask(), 0b111000);
        assert_eq!(BitField::new(31, 31).mask(), 1 << 31);
        assert_eq!(BitField::new(0, 31).mask(), u32::MAX);
        assert_eq!(field_mask(12, 14), 0x7000);
    }

    #[test]
    fn test_extract() {
        assert_eq!(BitField::new(0, 3).extract(0b1011_0101), 0b0101);
        assert_eq!(BitField::new(3, 5).extract(0b101_110), 0b101);
        assert_eq!(BitField::new(31, 31).extract(0x8000_0000), 1);
        assert_eq!(BitField::new(20, 31).extract(0xffc0_8113), 0xffc);
    }

    #[test]
    fn test_insert() {
        assert_eq!(BitField::new(3, 5).insert(0b101, 0b110), 0b101110);
        assert_eq!(BitField::new(3, 5).insert(0b101, 0b110), 46);
        assert_eq!(BitField::new(0, 6).insert(0x13, 0), 0x13);
    }

    #[test]
    fn test_insert_truncates_oversized_values() {
        // only the low three bits of the value survive
        assert_eq!(BitField::new(0, 2).insert(0b11_101, 0), 0b101);
        assert_eq!(
            BitField::new(4, 6).insert(u32::MAX, 0),
            BitField::new(4, 6).mask()
        );
    }

    #[test]
    fn test_insert_ors_into_dirty_words() {
        // bits already set in the range are merged, not replaced
        assert_eq!(BitField::new(0, 3).insert(0b0101, 0b1010), 0b1111);
    }

    #[test]
    fn test_extract_signed() {
        assert_eq!(BitField::new(0, 7).extract_signed(0b1111_1111), -1);
        assert_eq!(BitField::new(0, 7).extract_signed(0x7f), 127);
        assert_eq!(BitField::new(0, 7).extract_signed(0x80), -128);
        assert_eq!(BitField::new(0, 31).extract_signed(u32::MAX), -1);
        assert_eq!(BitField::new(20, 31).extract_signed(0xffc0_8113), -4);
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0b111, 3), -1);
        assert_eq!(sign_extend(0b011, 3), 3);
        assert_eq!(sign_extend(0b100, 3), -4);
        assert_eq!(sign_extend(0, 12), 0);
        assert_eq!(sign_extend(u32::MAX, 32), -1);
        assert_eq!(sign_extend(0x8000_0000, 32), i32::MIN);
    }

    #[test]
    #[should_panic]
    fn test_inverted_range_panics() {
        BitField::new(5, 3);
    }

    #[test]
    #[should_panic]
    fn test_sign_extend_rejects_width_one() {
        sign_extend(1, 1);
    }

    #[test]
    fn test_try_new() {
        assert_eq!(
            BitField::try_new(32, 35),
            Err(FieldError::BitOutOfRange(32))
        );
        assert_eq!(
            BitField::try_new(0, 33),
            Err(FieldError::BitOutOfRange(33))
        );
        assert_eq!(
            BitField::try_new(5, 3),
            Err(FieldError::InvertedRange {
                from_bit: 5,
                to_bit: 3
            })
        );
        assert!(BitField::try_new(0, 31).is_ok());
        // to_bit == 32 is one past the top bit but still accepted; the mask
        // truncates to the word
        assert_eq!(BitField::try_new(4, 32).unwrap().mask(), 0xffff_fff0);
        assert_eq!(BitField::try_new(0, 32).unwrap().mask(), u32::MAX);
    }
}
