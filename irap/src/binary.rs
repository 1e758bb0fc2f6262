//! Irap binary codec
//!
//! A binary surface is a sequence of big-endian Fortran records: three
//! fixed-size header records (100 bytes in total) followed by data records
//! of at most eight values each, column index fastest.

pub mod record;

pub use record::{write_record, RecordReader};

use irap_core::constants::{
    decode_undefined, encode_undefined, BINARY_FIELD_SIZE, BINARY_HEADER_SIZE, IRAP_MAGIC,
    RECORD_MARKER_SIZE, VALUES_PER_BINARY_RECORD,
};
use irap_core::validation::{validate_grid_shape, validate_magic, validate_value_capacity};
use irap_core::{
    BinaryRecord, GridBuilder, GridView, IrapHeader, MemoryOrder, Result, SurfaceFormat,
    ValueGrid,
};
use tracing::{debug, trace};

use record::{be_f32, be_i32, put_f32, put_i32};

/// Exact size of an exported binary surface holding `count` values
pub fn encoded_len(count: usize) -> usize {
    let records = count.div_ceil(VALUES_PER_BINARY_RECORD);
    BINARY_HEADER_SIZE + count * BINARY_FIELD_SIZE + records * 2 * RECORD_MARKER_SIZE
}

/// Read the three header records
pub fn read_header(reader: &mut RecordReader<'_>) -> Result<IrapHeader> {
    let geometry = reader.read_record(BinaryRecord::Geometry)?;
    validate_magic(be_i32(geometry, 0), SurfaceFormat::Binary)?;
    let rotation = reader.read_record(BinaryRecord::Rotation)?;
    reader.read_record(BinaryRecord::Reserved)?;

    let mut header = IrapHeader {
        ncol: be_i32(rotation, 0),
        nrow: be_i32(geometry, 1),
        xori: f64::from(be_f32(geometry, 2)),
        xmax: f64::from(be_f32(geometry, 3)),
        yori: f64::from(be_f32(geometry, 4)),
        ymax: f64::from(be_f32(geometry, 5)),
        xinc: f64::from(be_f32(geometry, 6)),
        yinc: f64::from(be_f32(geometry, 7)),
        rot: f64::from(be_f32(rotation, 1)),
        xrot: f64::from(be_f32(rotation, 2)),
        yrot: f64::from(be_f32(rotation, 3)),
    };
    header.dimensions()?;
    header.normalize_rotation();
    Ok(header)
}

/// Read data records until the grid is full
pub fn read_values(
    reader: &mut RecordReader<'_>,
    header: &IrapHeader,
    order: MemoryOrder,
) -> Result<ValueGrid> {
    let (ncol, nrow) = header.dimensions()?;
    validate_value_capacity(
        ncol * nrow,
        BINARY_FIELD_SIZE,
        reader.remaining(),
        reader.position(),
    )?;
    let mut builder = GridBuilder::new(ncol, nrow, order);
    let mut records = 0usize;

    while !builder.is_full() {
        let max_payload = builder.remaining().saturating_mul(BINARY_FIELD_SIZE);
        let payload = reader.read_record_within(BinaryRecord::Values, max_payload)?;
        for field in payload.chunks_exact(BINARY_FIELD_SIZE) {
            let value = f32::from_be_bytes([field[0], field[1], field[2], field[3]]);
            builder.push(decode_undefined(value));
        }
        records += 1;
    }

    trace!(records, "read irap binary data records");
    Ok(builder.finish())
}

/// Import a binary surface from raw bytes
///
/// Bytes after the last data record are ignored.
pub fn from_bytes(bytes: &[u8]) -> Result<(IrapHeader, ValueGrid)> {
    let mut reader = RecordReader::new(bytes);
    let header = read_header(&mut reader)?;
    let values = read_values(&mut reader, &header, MemoryOrder::RowMajor)?;
    debug!(
        ncol = header.ncol,
        nrow = header.nrow,
        bytes = bytes.len(),
        "imported irap binary surface"
    );
    Ok((header, values))
}

/// Append the 100-byte header; floats are narrowed to `f32`
pub fn write_header(out: &mut Vec<u8>, header: &IrapHeader) {
    write_record(out, |out| {
        put_i32(out, IRAP_MAGIC);
        put_i32(out, header.nrow);
        for value in [
            header.xori,
            header.xmax,
            header.yori,
            header.ymax,
            header.xinc,
            header.yinc,
        ] {
            put_f32(out, value as f32);
        }
    });
    write_record(out, |out| {
        put_i32(out, header.ncol);
        for value in [header.rot, header.xrot, header.yrot] {
            put_f32(out, value as f32);
        }
    });
    write_record(out, |out| {
        put_f32(out, 0.0);
        put_f32(out, 0.0);
        for _ in 0..5 {
            put_i32(out, 0);
        }
    });
}

/// Append data records in column-major order, eight values per record
pub fn write_values(out: &mut Vec<u8>, values: &GridView<'_>) {
    let mut iter = values.column_major();
    let mut records = 0usize;
    while iter.len() > 0 {
        let count = iter.len().min(VALUES_PER_BINARY_RECORD);
        write_record(out, |out| {
            for value in iter.by_ref().take(count) {
                put_f32(out, encode_undefined(value));
            }
        });
        records += 1;
    }
    trace!(records, "wrote irap binary data records");
}

/// Export a surface as binary bytes
///
/// The grid may use any layout; values are always written column-major.
pub fn to_bytes(header: &IrapHeader, values: &GridView<'_>) -> Result<Vec<u8>> {
    let (ncol, nrow) = validate_grid_shape(header, values)?;
    let mut out = Vec::with_capacity(encoded_len(ncol * nrow));
    write_header(&mut out, header);
    write_values(&mut out, values);
    debug!(ncol, nrow, bytes = out.len(), "exported irap binary surface");
    Ok(out)
}
