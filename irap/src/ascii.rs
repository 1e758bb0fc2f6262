//! Irap ASCII codec
//!
//! Layout of an ASCII surface:
//!
//! ```text
//! -996 nrow xinc yinc
//! xori xmax yori ymax
//! ncol rot xrot yrot
//! 0  0  0  0  0  0  0
//! v0 v1 v2 ... (ncol * nrow values, column index fastest)
//! ```
//!
//! Line breaks carry no meaning on import; tokens are whitespace separated.

use std::fmt::Write;
use std::str::FromStr;

use irap_core::constants::{
    decode_undefined, encode_undefined, ASCII_DECIMALS, IRAP_MAGIC, MAX_VALUES_PER_LINE,
    RESERVED_LINE, RESERVED_TOKENS,
};
use irap_core::validation::{validate_grid_shape, validate_magic, validate_value_capacity};
use irap_core::{
    GridBuilder, GridView, IrapError, IrapHeader, MemoryOrder, Result, ScanError, Scanner,
    SurfaceFormat, ValueGrid,
};
use tracing::debug;

/// Rough bytes per exported value, used to pre-size the output
const BYTES_PER_VALUE: usize = 16;
const HEADER_CAPACITY: usize = 256;

fn header_field<T: FromStr>(scanner: &mut Scanner<'_>, field: &str) -> Result<T> {
    scanner
        .next_number()
        .map_err(|err| IrapError::MalformedHeader(format!("could not read {field}: {err}")))
}

/// Read the four header lines
///
/// Rotation is normalized and dimensions are validated before returning.
pub fn read_header(scanner: &mut Scanner<'_>) -> Result<IrapHeader> {
    let magic: i32 = header_field(scanner, "format marker")?;
    validate_magic(magic, SurfaceFormat::Ascii)?;

    let nrow = header_field(scanner, "nrow")?;
    let xinc = header_field(scanner, "xinc")?;
    let yinc = header_field(scanner, "yinc")?;
    let xori = header_field(scanner, "xori")?;
    let xmax = header_field(scanner, "xmax")?;
    let yori = header_field(scanner, "yori")?;
    let ymax = header_field(scanner, "ymax")?;
    let ncol = header_field(scanner, "ncol")?;
    let rot = header_field(scanner, "rot")?;
    let xrot = header_field(scanner, "xrot")?;
    let yrot = header_field(scanner, "yrot")?;

    let mut header = IrapHeader {
        ncol,
        nrow,
        xori,
        yori,
        xmax,
        ymax,
        xinc,
        yinc,
        rot,
        xrot,
        yrot,
    };
    header.dimensions()?;

    for index in 0..RESERVED_TOKENS {
        scanner.next_token().map_err(|err| {
            IrapError::MalformedHeader(format!("could not read reserved token {index}: {err}"))
        })?;
    }

    header.normalize_rotation();
    Ok(header)
}

/// Read `ncol * nrow` values following the header
pub fn read_values(
    scanner: &mut Scanner<'_>,
    header: &IrapHeader,
    order: MemoryOrder,
) -> Result<ValueGrid> {
    let (ncol, nrow) = header.dimensions()?;
    let expected = ncol * nrow;
    // Each value needs at least one digit and the separator before it
    validate_value_capacity(expected, 2, scanner.remaining(), scanner.position())?;
    let mut builder = GridBuilder::new(ncol, nrow, order);

    while !builder.is_full() {
        match scanner.next_f32() {
            Ok(value) => builder.push(decode_undefined(value)),
            Err(ScanError::EndOfInput { offset }) => {
                return Err(IrapError::EndOfInput {
                    offset,
                    detail: format!("expected {expected} values, got {}", builder.filled()),
                });
            }
            Err(ScanError::NotANumber { offset, token }) => {
                return Err(IrapError::InvalidValue {
                    format: SurfaceFormat::Ascii,
                    offset,
                    detail: format!("value {} is not a number: {token:?}", builder.filled()),
                });
            }
        }
    }

    Ok(builder.finish())
}

/// Import an ASCII surface from raw bytes
///
/// Trailing tokens after the last value are ignored.
pub fn from_bytes(bytes: &[u8]) -> Result<(IrapHeader, ValueGrid)> {
    let mut scanner = Scanner::new(bytes);
    let header = read_header(&mut scanner)?;
    let values = read_values(&mut scanner, &header, MemoryOrder::RowMajor)?;
    debug!(
        ncol = header.ncol,
        nrow = header.nrow,
        bytes = bytes.len(),
        "imported irap ASCII surface"
    );
    Ok((header, values))
}

fn write_header_float<W: Write>(out: &mut W, value: f64) -> core::fmt::Result {
    let fixed = format!("{value:.prec$}", prec = ASCII_DECIMALS);
    if fixed.parse::<f64>().is_ok_and(|parsed| parsed == value) {
        out.write_str(&fixed)
    } else {
        // Shortest text that parses back to the same value
        write!(out, "{value:e}")
    }
}

fn write_float_line<W: Write>(out: &mut W, values: &[f64]) -> core::fmt::Result {
    for &value in values {
        out.write_char(' ')?;
        write_header_float(out, value)?;
    }
    out.write_char('\n')
}

/// Write the four header lines
///
/// Floats use six decimals unless that would lose precision.
pub fn write_header<W: Write>(out: &mut W, header: &IrapHeader) -> core::fmt::Result {
    write!(out, "{IRAP_MAGIC} {}", header.nrow)?;
    write_float_line(out, &[header.xinc, header.yinc])?;

    write_header_float(out, header.xori)?;
    write_float_line(out, &[header.xmax, header.yori, header.ymax])?;

    write!(out, "{}", header.ncol)?;
    write_float_line(out, &[header.rot, header.xrot, header.yrot])?;

    out.write_str(RESERVED_LINE)?;
    out.write_char('\n')
}

/// Write every value in column-major order, nine per line
///
/// Values use six decimals, so an undefined node is `9999900.000000`, and
/// every line, including the last, ends in a newline with no trailing space.
/// Writers that use four decimals and leave a space after each value produce
/// different text for the same surface; both forms import identically.
pub fn write_values<W: Write>(out: &mut W, values: &GridView<'_>) -> core::fmt::Result {
    let mut on_line = 0;
    for value in values.column_major() {
        if on_line > 0 {
            out.write_char(' ')?;
        }
        write!(out, "{:.prec$}", encode_undefined(value), prec = ASCII_DECIMALS)?;
        on_line += 1;
        if on_line == MAX_VALUES_PER_LINE {
            out.write_char('\n')?;
            on_line = 0;
        }
    }
    if on_line > 0 {
        out.write_char('\n')?;
    }
    Ok(())
}

/// Export a surface as ASCII text
///
/// The grid may use any layout; values are always written column-major.
pub fn to_string(header: &IrapHeader, values: &GridView<'_>) -> Result<String> {
    let (ncol, nrow) = validate_grid_shape(header, values)?;
    let mut out = String::with_capacity(HEADER_CAPACITY + ncol * nrow * BYTES_PER_VALUE);
    write_header(&mut out, header)?;
    write_values(&mut out, values)?;
    debug!(
        ncol,
        nrow,
        bytes = out.len(),
        "exported irap ASCII surface"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<(IrapHeader, ValueGrid)> {
        from_bytes(text.as_bytes())
    }

    #[test]
    fn test_import_single_value() {
        let text = "-996 1 2.0 3.0\n0.0 4.0 0.0 5.0\n1 0.0 0.0 0.0\n0 0 0 0 0 0 0\n1.000000\n";
        let (header, values) = parse(text).unwrap();

        let mut expected = IrapHeader::new(1, 1);
        expected.xinc = 2.0;
        expected.yinc = 3.0;
        expected.xmax = 4.0;
        expected.ymax = 5.0;
        assert_eq!(header, expected);
        assert_eq!(values.to_columns(), vec![vec![1.0]]);
    }

    #[test]
    fn test_import_column_index_fastest() {
        let text = "-996 2 1 1\n0 2 0 1\n3 0 0 0\n0 0 0 0 0 0 0\n1 2 3\n4 5 6\n";
        let (header, values) = parse(text).unwrap();
        assert_eq!((header.ncol, header.nrow), (3, 2));
        assert_eq!(
            values.to_columns(),
            vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]
        );
        assert_eq!(values.order(), MemoryOrder::RowMajor);
        assert_eq!(values.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_import_undefined_and_leading_dot() {
        let text = "-996 1 1 1 0 1 0 1 3 0 0 0 0 0 0 0 0 0 0\n9999900.0 .5 1e9\n";
        let (_, values) = parse(text).unwrap();
        assert!(values.get(0, 0).unwrap().is_nan());
        assert_eq!(values.get(1, 0), Some(0.5));
        assert!(values.get(2, 0).unwrap().is_nan());
    }

    #[test]
    fn test_import_normalizes_rotation() {
        let text = "-996 1 1 1\n0 1 0 1\n1 -30 0 0\n0 0 0 0 0 0 0\n7\n";
        let (header, _) = parse(text).unwrap();
        assert_eq!(header.rot, 330.0);
    }

    #[test]
    fn test_import_ignores_trailing_tokens() {
        let text = "-996 1 1 1\n0 1 0 1\n1 0 0 0\n0 0 0 0 0 0 0\n7 8 9\n";
        let (_, values) = parse(text).unwrap();
        assert_eq!(values.to_columns(), vec![vec![7.0]]);
    }

    #[test]
    fn test_import_short_header() {
        let err = parse("-996 1").unwrap_err();
        assert!(matches!(err, IrapError::MalformedHeader(_)));
        assert!(err.to_string().starts_with("Failed to read irap headers"));
    }

    #[test]
    fn test_import_missing_reserved_tokens() {
        let err = parse("-996 1 1 1\n0 1 0 1\n1 0 0 0\n0 0 0\n").unwrap_err();
        assert!(matches!(err, IrapError::MalformedHeader(_)));
    }

    #[test]
    fn test_import_non_numeric_header() {
        let err = parse("-996 x 1 1\n0 1 0 1\n1 0 0 0\n0 0 0 0 0 0 0\n1\n").unwrap_err();
        assert!(matches!(err, IrapError::MalformedHeader(_)));
    }

    #[test]
    fn test_import_wrong_marker() {
        let err = parse("-995 1 1 1\n0 1 0 1\n1 0 0 0\n0 0 0 0 0 0 0\n1\n").unwrap_err();
        assert!(matches!(err, IrapError::MalformedHeader(_)));
        assert!(err.to_string().contains("got: -995"));
    }

    #[test]
    fn test_import_negative_dimensions() {
        let err = parse("-996 -1 1 1\n0 1 0 1\n1 0 0 0\n0 0 0 0 0 0 0\n1\n").unwrap_err();
        assert!(matches!(
            err,
            IrapError::InvalidDimensions { ncol: 1, nrow: -1 }
        ));
    }

    #[test]
    fn test_import_too_few_values() {
        let err = parse("-996 2 1 1\n0 1 0 1\n2 0 0 0\n0 0 0 0 0 0 0\n1 2 3\n").unwrap_err();
        match err {
            IrapError::EndOfInput { detail, .. } => {
                assert_eq!(detail, "expected 4 values, got at most 3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_import_values_missing_after_enough_bytes() {
        // Long enough to pass the size check, one value short
        let err = parse("-996 2 1 1\n0 1 0 1\n2 0 0 0\n0 0 0 0 0 0 0\n1 2 3      \n").unwrap_err();
        match err {
            IrapError::EndOfInput { detail, .. } => {
                assert_eq!(detail, "expected 4 values, got 3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_import_huge_dimensions_short_input() {
        let err = parse("-996 2147483647 1 1\n0 1 0 1\n2147483647 0 0 0\n0 0 0 0 0 0 0\n1\n")
            .unwrap_err();
        assert!(matches!(err, IrapError::EndOfInput { .. }));
    }

    #[test]
    fn test_import_non_numeric_value() {
        let err = parse("-996 1 1 1\n0 1 0 1\n2 0 0 0\n0 0 0 0 0 0 0\n1 abc\n").unwrap_err();
        assert!(matches!(
            err,
            IrapError::InvalidValue {
                format: SurfaceFormat::Ascii,
                ..
            }
        ));
        assert!(err.to_string().contains("Irap ASCII import"));
    }

    #[test]
    fn test_export_header_and_values() {
        let mut header = IrapHeader::new(2, 1);
        header.xinc = 2.5;
        header.xmax = 2.5;
        let data = [1.0, f32::NAN];
        let view = GridView::with_order(&data, 2, 1, MemoryOrder::RowMajor).unwrap();

        let text = to_string(&header, &view).unwrap();
        let expected = "-996 1 2.500000 1.000000\n\
                        0.000000 2.500000 0.000000 0.000000\n\
                        2 0.000000 0.000000 0.000000\n\
                        0  0  0  0  0  0  0\n\
                        1.000000 9999900.000000\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_export_undefined_only() {
        let data = [f32::NAN];
        let view = GridView::with_order(&data, 1, 1, MemoryOrder::RowMajor).unwrap();
        let text = to_string(&IrapHeader::new(1, 1), &view).unwrap();
        assert!(text.ends_with("\n9999900.000000\n"));
        assert!(!text.contains(" \n"));
    }

    #[test]
    fn test_export_line_length_bound() {
        let data: Vec<f32> = (0..20).map(|v| v as f32).collect();
        let view = GridView::with_order(&data, 4, 5, MemoryOrder::RowMajor).unwrap();
        let text = to_string(&IrapHeader::new(4, 5), &view).unwrap();

        let value_lines: Vec<&str> = text.lines().skip(4).collect();
        assert_eq!(value_lines.len(), 3);
        assert!(value_lines
            .iter()
            .all(|line| line.split(' ').count() <= MAX_VALUES_PER_LINE));
        assert_eq!(value_lines[2].split(' ').count(), 2);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_export_high_precision_header() {
        let mut header = IrapHeader::new(1, 1);
        header.yrot = 2.610356564800451e-73;
        header.xori = 1234567.25;
        let data = [0.0];
        let view = GridView::with_order(&data, 1, 1, MemoryOrder::RowMajor).unwrap();

        let text = to_string(&header, &view).unwrap();
        assert!(text.contains("2.610356564800451e-73"));
        assert!(text.contains("1234567.250000"));

        let (read_back, _) = parse(&text).unwrap();
        assert_eq!(read_back, header);
    }

    #[test]
    fn test_export_roundtrip_preserves_values() {
        let mut header = IrapHeader::new(3, 2);
        header.rot = 30.0;
        header.xori = -12.5;
        let data = [1.5, f32::NAN, -3.25, 4.0, 5.125, 6.0];
        let view = GridView::with_order(&data, 3, 2, MemoryOrder::ColumnMajor).unwrap();

        let text = to_string(&header, &view).unwrap();
        let (read_header, values) = parse(&text).unwrap();
        assert_eq!(read_header, header);
        assert_eq!(values, view.to_grid(MemoryOrder::RowMajor));
    }

    #[test]
    fn test_export_shape_mismatch() {
        let data = [0.0; 6];
        let view = GridView::with_order(&data, 3, 2, MemoryOrder::RowMajor).unwrap();
        let err = to_string(&IrapHeader::new(2, 3), &view).unwrap_err();
        assert!(matches!(err, IrapError::ShapeMismatch { .. }));
    }
}
