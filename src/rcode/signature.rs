//! Signature block traversal.
//!
//! The signature block opens with an ASCII-hex preamble giving its own size and the
//! number of records, followed by null-terminated signature records for the unit's
//! procedures, functions, temp-tables and datasets. The records are consumed but
//! kept opaque at this layer; only their well-formedness matters for locating the
//! blocks that follow in the stream.

use crate::{
    file::{io::ByteOrder, Charset, Parser},
    Result,
};

/// Walk a complete signature block, consuming every declared record.
///
/// Preamble layout: ASCII-hex preamble size at 0..4, ASCII-hex element count at
/// 4..8. The four bytes at 8 carry the block version and the null-terminated
/// string at 12 the encoding name; both are informational and skipped here.
/// Records start at the preamble size; `DSET` and `TTAB` records (datasets and
/// temp-tables) are recognized and skipped like everything else.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] on a non-hex preamble or when the declared
/// record count runs past the end of the block.
pub(crate) fn consume(data: &[u8], order: ByteOrder, charset: Charset) -> Result<()> {
    let mut parser = Parser::with_charset(data, order, charset);

    let preamble_size = parser.read_ascii_hex(4)? as usize;
    let num_elements = parser.read_ascii_hex(4)?;

    parser.seek(preamble_size).map_err(|_| {
        malformed_error!(
            "Signature preamble size {} exceeds block size {}",
            preamble_size,
            data.len()
        )
    })?;

    for element in 0..num_elements {
        if parser.remaining() == 0 {
            return Err(malformed_error!(
                "Signature block ends after {} of {} records",
                element,
                num_elements
            ));
        }

        let record = parser.read_cstring();

        // Datasets and temp-tables not read for now
        if record.starts_with("DSET") || record.starts_with("TTAB") {
            continue;
        }
    }

    Ok(())
}
