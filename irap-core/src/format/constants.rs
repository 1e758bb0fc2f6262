//! Format constants for Irap ASCII and binary surfaces

/// First value of every Irap file, ASCII and binary
pub const IRAP_MAGIC: i32 = -996;

/// On-disk marker for an undefined cell; NaN in memory
pub const UNDEF_VALUE: f32 = 9_999_900.0;

/// Downstream readers reject ASCII lines holding more values than this
pub const MAX_VALUES_PER_LINE: usize = 9;

/// Fixed decimals written for ASCII data values and header floats
pub const ASCII_DECIMALS: usize = 6;

/// Number of tokens on the fourth ASCII header line
pub const RESERVED_TOKENS: usize = 7;

/// Line four of an exported ASCII header
pub const RESERVED_LINE: &str = "0  0  0  0  0  0  0";

/// Values written per binary data record
pub const VALUES_PER_BINARY_RECORD: usize = 8;

/// Width of a record length prefix or suffix
pub const RECORD_MARKER_SIZE: usize = 4;

/// Width of every binary field (i32 or f32)
pub const BINARY_FIELD_SIZE: usize = 4;

/// Three framed header records: 3 * 8 bytes of markers + 76 bytes of payload
pub const BINARY_HEADER_SIZE: usize = 100;

/// Map on-disk values at or above the sentinel to NaN
#[inline]
pub fn decode_undefined(value: f32) -> f32 {
    if value >= UNDEF_VALUE {
        f32::NAN
    } else {
        value
    }
}

/// Map NaN to the on-disk sentinel
#[inline]
pub fn encode_undefined(value: f32) -> f32 {
    if value.is_nan() {
        UNDEF_VALUE
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_roundtrip() {
        assert!(decode_undefined(UNDEF_VALUE).is_nan());
        assert!(decode_undefined(1.0e30).is_nan());
        assert_eq!(decode_undefined(9_999_899.0), 9_999_899.0);
        assert_eq!(encode_undefined(f32::NAN), UNDEF_VALUE);
        assert_eq!(encode_undefined(-1.5), -1.5);
    }

    #[test]
    fn test_header_size_matches_record_table() {
        let payload = 32 + 16 + 28;
        assert_eq!(BINARY_HEADER_SIZE, payload + 3 * 2 * RECORD_MARKER_SIZE);
    }
}
