//! String pool access for the type block.
//!
//! The tail of every type block is a packed sequence of null-terminated strings.
//! Records anywhere in the block reference them by absolute offset from the start
//! of the type block; several records may share one entry. Offset zero is the
//! conventional encoding of the empty string and never dereferenced.

use crate::{file::Charset, Result};

/// Read-only view of the type block's string pool.
///
/// The pool spans the whole type block so that record-held offsets can be used
/// directly. Every lookup copies the string out under the configured charset,
/// keeping the decoded type information independent of the raw block's lifetime.
pub(crate) struct StringPool<'a> {
    data: &'a [u8],
    charset: Charset,
}

impl<'a> StringPool<'a> {
    /// Create a pool view over a complete type block.
    pub(crate) fn new(data: &'a [u8], charset: Charset) -> Self {
        StringPool { data, charset }
    }

    /// Resolve a string reference into an owned string.
    ///
    /// Offset zero yields the empty string. The scan stops at the first NUL byte
    /// or at the end of the block.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the offset points past the end of
    /// the type block.
    pub(crate) fn get(&self, offset: u32) -> Result<String> {
        if offset == 0 {
            return Ok(String::new());
        }

        let start = offset as usize;
        if start >= self.data.len() {
            return Err(malformed_error!(
                "String reference {} outside type block of {} bytes",
                offset,
                self.data.len()
            ));
        }

        let mut end = start;
        while end < self.data.len() && self.data[end] != 0 {
            end += 1;
        }

        Ok(self.charset.decode(&self.data[start..end]))
    }
}
