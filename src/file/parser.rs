//! Cursor-based byte stream parser for r-code block decoding.
//!
//! The [`Parser`] type provides bounds-checked reads of primitive values, null-terminated
//! strings and ASCII-hex numbers from a buffered r-code block. The byte order detected
//! from the magic number and the charset used for string decoding are fixed at
//! construction and applied to every read.
//!
//! # Example
//!
//! ```rust
//! use ablscope::{ByteOrder, Parser};
//! let data = [0x01, 0x02, 0x03, 0x04];
//! let mut parser = Parser::new(&data, ByteOrder::BigEndian);
//! let value = parser.read_u16()?;
//! assert_eq!(value, 0x0102);
//! # Ok::<(), ablscope::Error>(())
//! ```

use crate::{
    file::io::{read_at, read_word_at, ByteOrder, RcIO},
    Error::OutOfBounds,
    Result,
};

/// Charset used to decode null-terminated strings found in r-code blocks.
///
/// The compiler stores names in the session codepage. UTF-8 covers modern
/// installations and is the default; ISO 8859-1 covers the classic western
/// codepages. Decoding is lossy: undecodable byte sequences are replaced, never
/// reported as errors, matching how downstream analysis treats foreign names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// UTF-8 with replacement of invalid sequences.
    #[default]
    Utf8,
    /// ISO 8859-1 (latin-1), every byte maps to its code point.
    Iso88591,
}

impl Charset {
    /// Decode a raw byte run into an owned string under this charset.
    #[must_use]
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Charset::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Charset::Iso88591 => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }
}

/// A bounds-checked cursor over one buffered r-code block.
///
/// `Parser` maintains an internal position and refuses any read that would cross
/// the end of the block. All multi-byte reads honor the [`ByteOrder`] the parser
/// was created with; string reads honor its [`Charset`].
pub struct Parser<'a> {
    data: &'a [u8],
    position: usize,
    order: ByteOrder,
    charset: Charset,
}

impl<'a> Parser<'a> {
    /// Create a new `Parser` over a block, decoding strings as UTF-8.
    ///
    /// ## Arguments
    /// * 'data'  - The byte slice to read from
    /// * 'order' - The byte order detected from the magic number
    #[must_use]
    pub fn new(data: &'a [u8], order: ByteOrder) -> Self {
        Parser {
            data,
            position: 0,
            order,
            charset: Charset::Utf8,
        }
    }

    /// Create a new `Parser` with an explicit string charset.
    #[must_use]
    pub fn with_charset(data: &'a [u8], order: ByteOrder, charset: Charset) -> Self {
        Parser {
            data,
            position: 0,
            order,
            charset,
        }
    }

    /// Returns the length of the underlying block
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the block is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the current position of the parser
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes left between the cursor and the end of the block
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// The byte order this parser reads under
    #[must_use]
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Move current position to N. Seeking to the end of the block is allowed.
    ///
    /// ## Arguments
    /// * 'pos' - The position to move the cursor to
    ///
    /// # Errors
    /// Returns [`OutOfBounds`] if position is beyond the block length
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(OutOfBounds);
        }

        self.position = pos;
        Ok(())
    }

    /// Move the position forward by N. Advancing to the end of the block is allowed.
    ///
    /// ## Arguments
    /// * 'step' - Amount of bytes to skip
    ///
    /// # Errors
    /// Returns [`OutOfBounds`] if advancing by step would exceed the block length
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        match self.position.checked_add(step) {
            Some(pos) if pos <= self.data.len() => {
                self.position = pos;
                Ok(())
            }
            _ => Err(OutOfBounds),
        }
    }

    /// Read a type T from the current position under the parser's byte order,
    /// and advance accordingly
    ///
    /// # Errors
    /// Returns [`OutOfBounds`] if reading would exceed the block length
    pub fn read<T: RcIO>(&mut self) -> Result<T> {
        read_at::<T>(self.data, &mut self.position, self.order)
    }

    /// Read an unsigned 8-bit value
    ///
    /// # Errors
    /// Returns [`OutOfBounds`] if reading would exceed the block length
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read::<u8>()
    }

    /// Read an unsigned 16-bit value under the parser's byte order
    ///
    /// # Errors
    /// Returns [`OutOfBounds`] if reading would exceed the block length
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read::<u16>()
    }

    /// Read an unsigned 32-bit value under the parser's byte order
    ///
    /// # Errors
    /// Returns [`OutOfBounds`] if reading would exceed the block length
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read::<u32>()
    }

    /// Read a signed 32-bit value under the parser's byte order
    ///
    /// # Errors
    /// Returns [`OutOfBounds`] if reading would exceed the block length
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read::<i32>()
    }

    /// Read an unsigned 64-bit value under the parser's byte order
    ///
    /// # Errors
    /// Returns [`OutOfBounds`] if reading would exceed the block length
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read::<u64>()
    }

    /// Read a pointer-sized "word": 8 bytes when `wide`, else 4 bytes widened to u64.
    ///
    /// R-code stores runtime pointer slots whose width follows the compilation
    /// target, not the file format version.
    ///
    /// # Errors
    /// Returns [`OutOfBounds`] if reading would exceed the block length
    pub fn read_word(&mut self, wide: bool) -> Result<u64> {
        read_word_at(self.data, &mut self.position, self.order, wide)
    }

    /// Read a null-terminated string from the current position under the parser's
    /// charset, and advance past the terminator.
    ///
    /// The scan stops at the first `0x00` byte or at the end of the block; a string
    /// running to the end of the block is returned without error, matching the
    /// tolerant decoding the compiler's own tooling applies.
    pub fn read_cstring(&mut self) -> String {
        let start = self.position;
        let mut end = start;

        while end < self.data.len() && self.data[end] != 0 {
            end += 1;
        }

        let decoded = self.charset.decode(&self.data[start..end]);

        // Advance past the terminator unless the scan hit the end of the block.
        self.position = if end < self.data.len() { end + 1 } else { end };

        decoded
    }

    /// Read `length` ASCII characters from the current position and interpret them
    /// as a base-16 number.
    ///
    /// The signature block preamble stores sizes this way.
    ///
    /// # Errors
    /// Returns [`OutOfBounds`] if reading would exceed the block length, or
    /// [`crate::Error::Malformed`] if any character is not a hex digit
    pub fn read_ascii_hex(&mut self, length: usize) -> Result<u32> {
        match self.position.checked_add(length) {
            Some(end) if end <= self.data.len() => {
                let text = &self.data[self.position..end];
                let text = std::str::from_utf8(text)
                    .map_err(|_| malformed_error!("Non-ASCII hex field - {:?}", text))?;
                let value = u32::from_str_radix(text.trim(), 16)
                    .map_err(|_| malformed_error!("Invalid hex field - '{}'", text))?;

                self.position = end;
                Ok(value)
            }
            _ => Err(OutOfBounds),
        }
    }
}
