//! Primary r-code header parsing.
//!
//! The first 68 bytes of every r-code file form a fixed header carrying the magic
//! number, compiler version, timestamp and the sizes of all variable-length blocks
//! that follow. OE12 r-code appends an extra 16-byte tail directly after it and
//! relocates the body size and digest offset. This module detects the byte order,
//! splits the version word and reads the correct layout for both families.

use crate::{
    error::Section,
    file::io::{read_at, ByteOrder},
    Error, Result,
};

/// Size of the fixed primary header, in bytes.
pub const HEADER_SIZE: usize = 68;
/// Size of the extra header tail present in OE12 r-code, in bytes.
pub const V12_TAIL_SIZE: usize = 16;

/// Magic number of big-endian r-code.
pub const MAGIC_BE: u32 = 0x56CE_D309;
/// Magic number of little-endian r-code (the same value written byte-swapped).
pub const MAGIC_LE: u32 = 0x09D3_CE56;

// Field placement within the primary header. The digest offset moves in OE12;
// the body size moves into the tail.
const OFFSET_TIMESTAMP: usize = 4;
const OFFSET_DIGEST: usize = 10;
const OFFSET_VERSION: usize = 14;
const OFFSET_DIGEST_V12: usize = 22;
const OFFSET_SEGMENT_TABLE_SIZE: usize = 0x1E;
const OFFSET_SIGNATURE_SIZE: usize = 56;
const OFFSET_TYPEBLOCK_SIZE: usize = 60;
const OFFSET_RCODE_SIZE: usize = 64;
const TAIL_OFFSET_RCODE_SIZE: usize = 0xC;

/// Low 14 bits of the version word carry the major version.
const VERSION_MASK: u16 = 0x3FFF;
/// Bit 14 of the version word flags a 64-bit compilation target.
const VERSION_64BIT_BIT: u16 = 0x4000;

/// Decoded primary header of an r-code file.
///
/// Carries the detected byte order, the split version word and the sizes of every
/// block that follows the header in the stream. All sizes are validated to be
/// representable; the body size must be positive for the file to be decodable.
#[derive(Debug, Clone)]
pub struct Header {
    /// Byte order detected from the magic number.
    pub order: ByteOrder,
    /// Raw version word (major version plus target flag).
    pub version: u16,
    /// Major format version: 11xx or 12xx.
    pub version_major: u16,
    /// True when the artifact targets a 64-bit runtime.
    pub is_64_bit: bool,
    /// Compilation timestamp, raw seconds as written by the compiler.
    pub timestamp: i64,
    /// Offset of the digest within the header area.
    pub digest_offset: u16,
    /// Size of the segment table block.
    pub segment_table_size: u16,
    /// Size of the signature block.
    pub signature_size: u32,
    /// Size of the trailing type block; zero for procedures.
    pub type_block_size: u32,
    /// Size of the r-code body.
    pub rcode_size: u32,
}

impl Header {
    /// Detect the byte order and read the raw version word from a primary header.
    ///
    /// This is the minimal probe the decode pipeline needs before it can tell
    /// whether an OE12 tail has to be consumed from the stream.
    ///
    /// # Errors
    /// Returns [`Error::ShortRead`] if fewer than 68 bytes are available and
    /// [`Error::Malformed`] if the magic number matches neither byte order.
    pub fn probe(data: &[u8]) -> Result<(ByteOrder, u16)> {
        if data.len() < HEADER_SIZE {
            return Err(Error::ShortRead(Section::Header));
        }

        // The magic is defined as a big-endian constant; a little-endian file
        // carries the byte-swapped value.
        let magic = read_at::<u32>(data, &mut 0, ByteOrder::BigEndian)?;
        let order = match magic {
            MAGIC_BE => ByteOrder::BigEndian,
            MAGIC_LE => ByteOrder::LittleEndian,
            _ => return Err(malformed_error!("Can't find magic number - {:08X}", magic)),
        };

        let version = read_at::<u16>(data, &mut { OFFSET_VERSION }, order)?;
        Ok((order, version))
    }

    /// Returns true when the given raw version word requires the 16-byte OE12 tail.
    #[must_use]
    pub fn wants_tail(version: u16) -> bool {
        (version & VERSION_MASK) >= 1200
    }

    /// Decode a primary header, plus the OE12 tail when the version requires one.
    ///
    /// ## Arguments
    /// * 'data' - The 68-byte primary header
    /// * 'tail' - The 16-byte OE12 tail, or `None` for 11xx artifacts
    ///
    /// # Errors
    /// Returns [`Error::ShortRead`] on truncated input, [`Error::Malformed`] on a
    /// bad magic number or empty body, and [`Error::UnsupportedVersion`] for
    /// artifacts older than OpenEdge 11.
    pub fn read(data: &[u8], tail: Option<&[u8]>) -> Result<Header> {
        let (order, version) = Header::probe(data)?;

        let version_major = version & VERSION_MASK;
        let is_64_bit = (version & VERSION_64BIT_BIT) != 0;

        let (digest_offset, rcode_size) = if version_major >= 1200 {
            let tail = tail.ok_or(Error::ShortRead(Section::V12Tail))?;
            if tail.len() < V12_TAIL_SIZE {
                return Err(Error::ShortRead(Section::V12Tail));
            }

            (
                read_at::<u16>(data, &mut { OFFSET_DIGEST_V12 }, order)?,
                read_at::<u32>(tail, &mut { TAIL_OFFSET_RCODE_SIZE }, order)?,
            )
        } else if version_major >= 1100 {
            (
                read_at::<u16>(data, &mut { OFFSET_DIGEST }, order)?,
                read_at::<u32>(data, &mut { OFFSET_RCODE_SIZE }, order)?,
            )
        } else {
            return Err(Error::UnsupportedVersion(version_major));
        };

        if rcode_size == 0 {
            return Err(malformed_error!("Empty rcode block"));
        }

        Ok(Header {
            order,
            version,
            version_major,
            is_64_bit,
            timestamp: i64::from(read_at::<u32>(data, &mut { OFFSET_TIMESTAMP }, order)?),
            digest_offset,
            segment_table_size: read_at::<u16>(data, &mut { OFFSET_SEGMENT_TABLE_SIZE }, order)?,
            signature_size: read_at::<u32>(data, &mut { OFFSET_SIGNATURE_SIZE }, order)?,
            type_block_size: read_at::<u32>(data, &mut { OFFSET_TYPEBLOCK_SIZE }, order)?,
            rcode_size,
        })
    }
}
