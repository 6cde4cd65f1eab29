//! Segment table decoding and body slicing.
//!
//! The segment table is a fixed block locating four variable-length segments inside
//! the r-code body: initial values, actions, ecode and debug information. Offsets
//! are signed; a negative offset marks the segment as absent. Three additional u16
//! fields carry the sizes of the IPACS, frame and text sub-tables.

use crate::{
    file::{io::ByteOrder, Parser},
    Result,
};

/// Minimum size of a decodable segment table, in bytes.
pub const SEGMENT_TABLE_MIN_SIZE: usize = 38;

/// Decoded segment table of an r-code file.
///
/// Offset/size pairs address slices of the r-code body. An offset below zero means
/// the segment was not emitted by the compiler; sizes are unsigned. The
/// `offset + size <= body length` invariant is only enforced when a segment is
/// actually sliced, see [`SegmentTable::bounded`].
#[derive(Debug, Clone, Default)]
pub struct SegmentTable {
    /// Offset of the initial-value segment within the body, negative when absent.
    pub initial_value_offset: i32,
    /// Size of the initial-value segment.
    pub initial_value_size: u32,
    /// Offset of the action segment within the body, negative when absent.
    pub action_offset: i32,
    /// Size of the action segment.
    pub action_size: u32,
    /// Offset of the ecode segment within the body, negative when absent.
    pub ecode_offset: i32,
    /// Size of the ecode segment.
    pub ecode_size: u32,
    /// Offset of the debug segment within the body, non-positive when absent.
    pub debug_offset: i32,
    /// Size of the debug segment.
    pub debug_size: u32,
    /// Size of the IPACS sub-table.
    pub ipacs_table_size: u16,
    /// Size of the frame segment sub-table.
    pub frame_table_size: u16,
    /// Size of the text segment sub-table.
    pub text_table_size: u16,
}

impl SegmentTable {
    /// Decode a segment table block.
    ///
    /// Layout: four u32 offsets at 0/4/8/12 (initial-value, action, ecode, debug),
    /// four u32 sizes at 16/20/24/28 in the same order, then the three u16
    /// sub-table sizes at 32/34/36.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the block is smaller than the fixed
    /// layout requires.
    pub fn read(data: &[u8], order: ByteOrder) -> Result<SegmentTable> {
        if data.len() < SEGMENT_TABLE_MIN_SIZE {
            return Err(malformed_error!(
                "Segment table block too small - {} bytes",
                data.len()
            ));
        }

        let mut parser = Parser::new(data, order);

        let initial_value_offset = parser.read_i32()?;
        let action_offset = parser.read_i32()?;
        let ecode_offset = parser.read_i32()?;
        let debug_offset = parser.read_i32()?;
        let initial_value_size = parser.read_u32()?;
        let action_size = parser.read_u32()?;
        let ecode_size = parser.read_u32()?;
        let debug_size = parser.read_u32()?;

        Ok(SegmentTable {
            initial_value_offset,
            initial_value_size,
            action_offset,
            action_size,
            ecode_offset,
            ecode_size,
            debug_offset,
            debug_size,
            ipacs_table_size: parser.read_u16()?,
            frame_table_size: parser.read_u16()?,
            text_table_size: parser.read_u16()?,
        })
    }

    /// Slice a segment out of the r-code body, validating its bounds.
    ///
    /// ## Arguments
    /// * 'body'   - The complete r-code body
    /// * 'offset' - Segment offset from the table; the caller has already checked
    ///   it is non-negative
    /// * 'size'   - Segment size from the table
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the addressed range crosses the end
    /// of the body.
    pub fn bounded<'a>(body: &'a [u8], offset: i32, size: u32) -> Result<&'a [u8]> {
        let start = usize::try_from(offset)
            .map_err(|_| malformed_error!("Negative segment offset - {}", offset))?;
        let end = start
            .checked_add(size as usize)
            .filter(|end| *end <= body.len())
            .ok_or_else(|| {
                malformed_error!(
                    "Segment {}+{} crosses end of rcode block ({} bytes)",
                    offset,
                    size,
                    body.len()
                )
            })?;

        Ok(&body[start..end])
    }
}
