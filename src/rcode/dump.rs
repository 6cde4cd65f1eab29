//! Hex-dump diagnostics.
//!
//! When a diagnostics sink is attached to the decoder, every block is echoed to it
//! as a classic hex dump (offset column, sixteen bytes, printable gutter) before it
//! is parsed, followed by a summary of the parsed header fields. The output format
//! is a debug aid only and not a stable interface.

use std::io::{self, Write};

use crate::rcode::header::Header;

/// Write a titled hex dump of one block.
pub(crate) fn block(out: &mut dyn Write, title: &str, data: &[u8]) -> io::Result<()> {
    let banner: String = "*".repeat(title.len());
    writeln!(out, "\n{banner}\n{title}\n{banner}")?;

    let mut gutter = String::new();
    let mut pos = 0;
    while pos < data.len() {
        if pos % 16 == 0 {
            write!(out, "{pos:010X} | ")?;
        }
        write!(out, "{:02X} ", data[pos])?;
        gutter.push(printable(data[pos]));
        if (pos + 1) % 16 == 0 {
            writeln!(out, " | {gutter}")?;
            gutter.clear();
        }
        pos += 1;
    }
    if pos % 16 != 0 {
        let padding = "   ".repeat(16 - (pos % 16));
        writeln!(out, "{padding} | {gutter}")?;
    }

    Ok(())
}

/// Write the parsed size fields of a header, after its raw dump.
pub(crate) fn header_summary(out: &mut dyn Write, header: &Header) -> io::Result<()> {
    writeln!(
        out,
        "\nSig Sz: {:08X} -- SegTbl Sz: {:08X} -- TypeBlock Sz: {:08X} -- RCode Sz: {:08X}",
        header.signature_size, header.segment_table_size, header.type_block_size, header.rcode_size
    )
}

fn printable(byte: u8) -> char {
    if byte.is_ascii_graphic() || byte == b' ' {
        char::from(byte)
    } else {
        '.'
    }
}
