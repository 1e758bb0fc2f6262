//! Fortran sequential record framing
//!
//! Every record is `[len: i32] payload [len: i32]`, big-endian, and the two
//! length markers must agree. All framing checks live here.

use irap_core::constants::{BINARY_FIELD_SIZE, RECORD_MARKER_SIZE};
use irap_core::validation::validate_record_length;
use irap_core::{BinaryRecord, IrapError, Result, SurfaceFormat};

/// Sequential reader over framed records
#[derive(Debug, Clone)]
pub struct RecordReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> RecordReader<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Byte offset of the next unread byte
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the current position
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, len: usize, record: BinaryRecord) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| IrapError::EndOfInput {
                offset: self.pos,
                detail: format!(
                    "{record} record needs {len} more bytes, {} available",
                    self.remaining()
                ),
            })?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn read_marker(&mut self, record: BinaryRecord) -> Result<i32> {
        let bytes = self.take(RECORD_MARKER_SIZE, record)?;
        Ok(be_i32(bytes, 0))
    }

    /// Read one record and return its payload
    pub fn read_record(&mut self, record: BinaryRecord) -> Result<&'a [u8]> {
        self.read_record_within(record, usize::MAX)
    }

    /// Read one record whose payload may not exceed `max_payload` bytes
    ///
    /// Header records must have their fixed length. Data records may have
    /// any positive length that is a whole number of fields.
    pub fn read_record_within(
        &mut self,
        record: BinaryRecord,
        max_payload: usize,
    ) -> Result<&'a [u8]> {
        let start = self.pos;
        let prefix = self.read_marker(record)?;

        let len = match record.payload_size() {
            Some(expected) => {
                if usize::try_from(prefix).ok() != Some(expected) {
                    return Err(IrapError::MalformedFraming {
                        offset: start,
                        detail: format!(
                            "Incorrect chunk size. Expected {expected}, got {prefix} in {record} record"
                        ),
                    });
                }
                expected
            }
            None => validate_record_length(prefix)
                .filter(|&len| len <= max_payload)
                .ok_or_else(|| IrapError::InvalidValue {
                    format: SurfaceFormat::Binary,
                    offset: start,
                    detail: format!(
                        "{record} record length {prefix} must be a positive multiple of \
                         {BINARY_FIELD_SIZE} no larger than {max_payload}"
                    ),
                })?,
        };

        let payload = self.take(len, record)?;
        let suffix_at = self.pos;
        let suffix = self.read_marker(record)?;
        if suffix != prefix {
            return Err(IrapError::MalformedFraming {
                offset: suffix_at,
                detail: format!(
                    "Block size mismatch in {record} record: prefix {prefix}, suffix {suffix}"
                ),
            });
        }
        Ok(payload)
    }
}

/// Append one framed record whose payload is produced by `fill`
///
/// Both markers are derived from the bytes `fill` appends.
pub fn write_record<F>(out: &mut Vec<u8>, fill: F)
where
    F: FnOnce(&mut Vec<u8>),
{
    let prefix_at = out.len();
    out.extend_from_slice(&[0; RECORD_MARKER_SIZE]);
    fill(out);
    // Records hold a handful of fields
    let len = (out.len() - prefix_at - RECORD_MARKER_SIZE) as i32;
    let marker = len.to_be_bytes();
    out[prefix_at..prefix_at + RECORD_MARKER_SIZE].copy_from_slice(&marker);
    out.extend_from_slice(&marker);
}

/// Big-endian i32 at field `index` of a validated payload
#[inline]
pub fn be_i32(payload: &[u8], index: usize) -> i32 {
    let at = index * BINARY_FIELD_SIZE;
    i32::from_be_bytes([payload[at], payload[at + 1], payload[at + 2], payload[at + 3]])
}

/// Big-endian f32 at field `index` of a validated payload
#[inline]
pub fn be_f32(payload: &[u8], index: usize) -> f32 {
    f32::from_bits(be_i32(payload, index) as u32)
}

#[inline]
pub fn put_i32(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_be_bytes());
}

#[inline]
pub fn put_f32(out: &mut Vec<u8>, value: f32) {
    out.extend_from_slice(&value.to_be_bytes());
}
