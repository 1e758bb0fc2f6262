//! Numeric scanner for Irap ASCII text
//!
//! A cursor over bytes that yields whitespace-delimited integers and floats.
//! It knows nothing about headers or data; the ASCII codec maps its two
//! failure signals onto header or value errors depending on context.

use core::str::FromStr;

use thiserror::Error;

/// Failure signals of the [`Scanner`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// Only whitespace remained where a token was required
    #[error("end of input at byte offset {offset}")]
    EndOfInput { offset: usize },
    /// A token was present but is not a number of the requested type
    #[error("token {token:?} at byte offset {offset} is not a number")]
    NotANumber { offset: usize, token: String },
}

/// Whitespace as classified by the C locale
#[inline]
pub const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Cursor-based tokenizer over a byte buffer
///
/// Every consuming method advances the cursor only when it succeeds.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Start scanning at the beginning of `input`
    pub const fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Current byte offset of the cursor
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the cursor
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    /// Advance past any whitespace
    pub fn skip_whitespace(&mut self) {
        self.pos = self.token_start();
    }

    /// True when nothing but whitespace is left
    pub fn is_exhausted(&self) -> bool {
        self.token_start() == self.input.len()
    }

    fn token_start(&self) -> usize {
        self.input[self.pos..]
            .iter()
            .position(|&b| !is_space(b))
            .map_or(self.input.len(), |skip| self.pos + skip)
    }

    fn token_bounds(&self) -> Result<(usize, usize), ScanError> {
        let start = self.token_start();
        if start == self.input.len() {
            return Err(ScanError::EndOfInput { offset: start });
        }
        let end = self.input[start..]
            .iter()
            .position(|&b| is_space(b))
            .map_or(self.input.len(), |len| start + len);
        Ok((start, end))
    }

    /// Consume the next whitespace-delimited token
    pub fn next_token(&mut self) -> Result<&'a [u8], ScanError> {
        let (start, end) = self.token_bounds()?;
        self.pos = end;
        Ok(&self.input[start..end])
    }

    /// Consume the next token as a number of type `T`
    ///
    /// The whole token must parse; `1.5abc` is rejected rather than split.
    pub fn next_number<T: FromStr>(&mut self) -> Result<T, ScanError> {
        let (start, end) = self.token_bounds()?;
        let token = &self.input[start..end];
        let value = core::str::from_utf8(token)
            .ok()
            .and_then(|text| text.parse::<T>().ok())
            .ok_or_else(|| ScanError::NotANumber {
                offset: start,
                token: String::from_utf8_lossy(token).into_owned(),
            })?;
        self.pos = end;
        Ok(value)
    }

    /// Consume the next token as an `i32`
    pub fn next_i32(&mut self) -> Result<i32, ScanError> {
        self.next_number()
    }

    /// Consume the next token as an `f64`
    pub fn next_f64(&mut self) -> Result<f64, ScanError> {
        self.next_number()
    }

    /// Consume the next token as an `f32`
    pub fn next_f32(&mut self) -> Result<f32, ScanError> {
        self.next_number()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_mixed_tokens() {
        let mut scanner = Scanner::new(b"  -996 5\t2.5\n\r\n.5 1e3 +7");
        assert_eq!(scanner.next_i32(), Ok(-996));
        assert_eq!(scanner.next_i32(), Ok(5));
        assert_eq!(scanner.next_f64(), Ok(2.5));
        assert_eq!(scanner.next_f32(), Ok(0.5));
        assert_eq!(scanner.next_f32(), Ok(1000.0));
        assert_eq!(scanner.next_i32(), Ok(7));
        assert!(scanner.is_exhausted());
        assert_eq!(
            scanner.next_f32(),
            Err(ScanError::EndOfInput { offset: 24 })
        );
    }

    #[test]
    fn test_cursor_does_not_move_on_failure() {
        let mut scanner = Scanner::new(b"1 not_a_number 3");
        assert_eq!(scanner.next_i32(), Ok(1));
        let before = scanner.position();
        assert_eq!(
            scanner.next_f32(),
            Err(ScanError::NotANumber {
                offset: 2,
                token: "not_a_number".to_string()
            })
        );
        assert_eq!(scanner.position(), before);
        assert_eq!(scanner.next_token(), Ok(&b"not_a_number"[..]));
        assert_eq!(scanner.next_f32(), Ok(3.0));
    }

    #[test]
    fn test_integer_rejects_float_token() {
        let mut scanner = Scanner::new(b"1.5");
        assert!(matches!(
            scanner.next_i32(),
            Err(ScanError::NotANumber { offset: 0, .. })
        ));
    }

    #[test]
    fn test_whole_token_must_parse() {
        let mut scanner = Scanner::new(b"1.5abc");
        assert!(matches!(
            scanner.next_f32(),
            Err(ScanError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_vertical_tab_and_form_feed_are_whitespace() {
        let mut scanner = Scanner::new(b"\x0b1\x0c2");
        assert_eq!(scanner.next_i32(), Ok(1));
        assert_eq!(scanner.next_i32(), Ok(2));
    }

    #[test]
    fn test_empty_input() {
        let mut scanner = Scanner::new(b"");
        assert!(scanner.is_exhausted());
        assert_eq!(
            scanner.next_token(),
            Err(ScanError::EndOfInput { offset: 0 })
        );
        scanner.skip_whitespace();
        assert_eq!(scanner.position(), 0);
    }

    #[test]
    fn test_double_precision_is_kept() {
        let mut scanner = Scanner::new(b"2.610356564800451e-73");
        assert_eq!(scanner.next_f64(), Ok(2.610356564800451e-73));
    }
}
