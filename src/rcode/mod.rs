//! The r-code decode pipeline and its public façade.
//!
//! [`RCodeInfo`] is the entry point for decoding a compiled OpenEdge artifact.
//! The stream is consumed strictly forward, section by section:
//!
//! ```text
//! [ 68-byte primary header ]
//! [ 16-byte OE12 tail      ]   -- iff version_major >= 1200
//! [ signature block        ]
//! [ segment table block    ]
//! [ rcode body             ]
//! [ type block             ]   -- iff the artifact is a class
//! ```
//!
//! The decoder never seeks; after a successful decode the stream is positioned
//! immediately behind the last consumed byte. [`Decoder`] offers the
//! configurable form: decode options, an optional [`SegmentVisitor`] receiving
//! the body segments, and an optional diagnostics sink receiving hex dumps of
//! every block.

mod dump;
pub mod header;
pub mod segments;
mod signature;

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::{
    error::Section,
    file::Charset,
    typeinfo::{decode_type_block, TypeInfo},
    Error, Result,
};

use header::{Header, HEADER_SIZE, V12_TAIL_SIZE};
use segments::SegmentTable;

/// Tunable limits and charset for one decode run.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Charset applied to every null-terminated string in the artifact.
    pub charset: Charset,
    /// Upper bound accepted for any single block size declared in the header.
    ///
    /// Header fields are attacker-controlled in the sense that a corrupt file
    /// can declare absurd sizes; blocks larger than this limit are rejected
    /// before allocation.
    pub max_block_size: u32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            charset: Charset::Utf8,
            max_block_size: 64 * 1024 * 1024,
        }
    }
}

/// Callbacks over the four r-code body segments.
///
/// The core decoder only locates and bounds the segments; their contents are
/// handed to this trait. Every callback defaults to a no-op, so an
/// implementation only overrides the segments it cares about. Returning an
/// error aborts the decode.
pub trait SegmentVisitor {
    /// Called with the initial-value segment, when present.
    fn initial_value(&mut self, segment: &[u8]) -> Result<()> {
        let _ = segment;
        Ok(())
    }

    /// Called with the action segment, when present.
    fn action(&mut self, segment: &[u8]) -> Result<()> {
        let _ = segment;
        Ok(())
    }

    /// Called with the ecode segment, when present.
    fn ecode(&mut self, segment: &[u8]) -> Result<()> {
        let _ = segment;
        Ok(())
    }

    /// Called with the debug segment, when present.
    fn debug(&mut self, segment: &[u8]) -> Result<()> {
        let _ = segment;
        Ok(())
    }
}

/// Configurable r-code decoder.
///
/// # Examples
///
/// ```rust,no_run
/// use ablscope::{DecodeOptions, Decoder};
/// use std::fs::File;
///
/// let mut input = File::open("build/MyClass.r")?;
/// let mut dump = Vec::new();
/// let rcode = Decoder::with_options(DecodeOptions::default())
///     .diagnostics(&mut dump)
///     .decode(&mut input)?;
/// assert!(rcode.is_class());
/// # Ok::<(), ablscope::Error>(())
/// ```
#[derive(Default)]
pub struct Decoder<'a> {
    options: DecodeOptions,
    visitor: Option<&'a mut dyn SegmentVisitor>,
    diagnostics: Option<&'a mut dyn io::Write>,
}

impl<'a> Decoder<'a> {
    /// Create a decoder with default options.
    #[must_use]
    pub fn new() -> Self {
        Decoder::default()
    }

    /// Create a decoder with explicit options.
    #[must_use]
    pub fn with_options(options: DecodeOptions) -> Self {
        Decoder {
            options,
            ..Decoder::default()
        }
    }

    /// Attach a visitor receiving the body segments.
    #[must_use]
    pub fn visitor(mut self, visitor: &'a mut dyn SegmentVisitor) -> Self {
        self.visitor = Some(visitor);
        self
    }

    /// Attach a diagnostics sink receiving hex dumps of every block.
    #[must_use]
    pub fn diagnostics(mut self, out: &'a mut dyn io::Write) -> Self {
        self.diagnostics = Some(out);
        self
    }

    /// Run the decode pipeline over a stream.
    ///
    /// The stream is read strictly forward and left positioned immediately
    /// after the last byte of the artifact. The caller owns the stream.
    ///
    /// # Errors
    /// Any section that cannot be fully read yields [`Error::ShortRead`];
    /// structural damage yields [`Error::Malformed`]; artifacts older than
    /// OpenEdge 11 yield [`Error::UnsupportedVersion`].
    pub fn decode<R: Read + ?Sized>(mut self, input: &mut R) -> Result<RCodeInfo> {
        let mut header_buf = [0u8; HEADER_SIZE];
        fill(input, &mut header_buf, Section::Header)?;
        self.dump("HEADER", &header_buf)?;

        let (_, version) = Header::probe(&header_buf)?;

        let mut tail_buf = [0u8; V12_TAIL_SIZE];
        let tail = if Header::wants_tail(version) {
            fill(input, &mut tail_buf, Section::V12Tail)?;
            Some(&tail_buf[..])
        } else {
            None
        };

        let header = Header::read(&header_buf, tail)?;
        if let Some(out) = self.diagnostics.as_deref_mut() {
            dump::header_summary(out, &header)?;
        }

        let signature_size = self.checked_size(header.signature_size, Section::Signature)?;
        let signature_buf = read_section(input, signature_size, Section::Signature)?;
        self.dump("SIGNATURE", &signature_buf)?;
        signature::consume(&signature_buf, header.order, self.options.charset)?;

        let table_size =
            self.checked_size(u32::from(header.segment_table_size), Section::SegmentTable)?;
        let table_buf = read_section(input, table_size, Section::SegmentTable)?;
        self.dump("SEGMENTS TABLE", &table_buf)?;
        let segments = SegmentTable::read(&table_buf, header.order)?;

        let body_size = self.checked_size(header.rcode_size, Section::Body)?;
        let body = read_section(input, body_size, Section::Body)?;
        self.visit_segments(&segments, &body)?;

        let type_info = if header.type_block_size > 0 {
            let block_size = self.checked_size(header.type_block_size, Section::TypeBlock)?;
            let block_buf = read_section(input, block_size, Section::TypeBlock)?;
            self.dump("TYPE BLOCK", &block_buf)?;

            Some(decode_type_block(
                &block_buf,
                header.order,
                header.version_major,
                header.is_64_bit,
                self.options.charset,
            )?)
        } else {
            None
        };

        Ok(RCodeInfo {
            header,
            segments,
            type_info,
        })
    }

    /// Run the decode pipeline over an in-memory artifact.
    ///
    /// # Errors
    /// See [`Decoder::decode`].
    pub fn decode_slice(self, data: &[u8]) -> Result<RCodeInfo> {
        self.decode(&mut io::Cursor::new(data))
    }

    /// Locate each present segment in the body, enforce its bounds and hand it
    /// to the visitor. The debug segment additionally treats offset zero as
    /// absent.
    fn visit_segments(&mut self, segments: &SegmentTable, body: &[u8]) -> Result<()> {
        if segments.initial_value_offset >= 0 && segments.initial_value_size > 0 {
            let slice = SegmentTable::bounded(
                body,
                segments.initial_value_offset,
                segments.initial_value_size,
            )?;
            if let Some(visitor) = self.visitor.as_mut() {
                visitor.initial_value(slice)?;
            }
        }
        if segments.action_offset >= 0 && segments.action_size > 0 {
            let slice = SegmentTable::bounded(body, segments.action_offset, segments.action_size)?;
            if let Some(visitor) = self.visitor.as_mut() {
                visitor.action(slice)?;
            }
        }
        if segments.ecode_offset >= 0 && segments.ecode_size > 0 {
            let slice = SegmentTable::bounded(body, segments.ecode_offset, segments.ecode_size)?;
            if let Some(visitor) = self.visitor.as_mut() {
                visitor.ecode(slice)?;
            }
        }
        if segments.debug_offset > 0 && segments.debug_size > 0 {
            let slice = SegmentTable::bounded(body, segments.debug_offset, segments.debug_size)?;
            if let Some(visitor) = self.visitor.as_mut() {
                visitor.debug(slice)?;
            }
        }

        Ok(())
    }

    fn checked_size(&self, size: u32, section: Section) -> Result<usize> {
        if size > self.options.max_block_size {
            return Err(malformed_error!(
                "Oversize {} - {} bytes exceeds the {} byte limit",
                section,
                size,
                self.options.max_block_size
            ));
        }
        Ok(size as usize)
    }

    fn dump(&mut self, title: &str, data: &[u8]) -> Result<()> {
        if let Some(out) = self.diagnostics.as_deref_mut() {
            dump::block(out, title, data)?;
        }
        Ok(())
    }
}

/// Decoded r-code artifact.
///
/// Construction consumes and validates the whole stream; a value of this type
/// always represents a fully decoded artifact.
///
/// # Examples
///
/// ```rust,no_run
/// use ablscope::RCodeInfo;
///
/// let rcode = RCodeInfo::from_path("build/MyClass.r")?;
/// if let Some(type_info) = rcode.type_info() {
///     for method in type_info.methods() {
///         println!("{} ({} parameters)", method.name, method.parameters.len());
///     }
/// }
/// # Ok::<(), ablscope::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RCodeInfo {
    header: Header,
    segments: SegmentTable,
    type_info: Option<TypeInfo>,
}

impl RCodeInfo {
    /// Decode an artifact from a stream with default options.
    ///
    /// The stream has to be closed by the caller.
    ///
    /// # Errors
    /// See [`Decoder::decode`].
    pub fn parse<R: Read + ?Sized>(input: &mut R) -> Result<RCodeInfo> {
        Decoder::new().decode(input)
    }

    /// Decode an in-memory artifact with default options.
    ///
    /// # Errors
    /// See [`Decoder::decode`].
    pub fn from_slice(data: &[u8]) -> Result<RCodeInfo> {
        Decoder::new().decode_slice(data)
    }

    /// Open and decode an r-code file with default options.
    ///
    /// # Errors
    /// See [`Decoder::decode`]; additionally any [`Error::Io`] from opening
    /// the file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<RCodeInfo> {
        let mut reader = BufReader::new(File::open(path)?);
        Decoder::new().decode(&mut reader)
    }

    /// Type information of class artifacts, `None` for procedures.
    #[must_use]
    pub fn type_info(&self) -> Option<&TypeInfo> {
        self.type_info.as_ref()
    }

    /// Raw compiler version word, including the 64-bit target flag.
    #[must_use]
    pub fn version(&self) -> u16 {
        self.header.version
    }

    /// Major format version: 1100, 1107, 1200, ...
    #[must_use]
    pub fn version_major(&self) -> u16 {
        self.header.version_major
    }

    /// Compilation timestamp, raw seconds as written by the compiler.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.header.timestamp
    }

    /// True when the artifact targets a 64-bit runtime.
    #[must_use]
    pub fn is_64_bit(&self) -> bool {
        self.header.is_64_bit
    }

    /// True when the artifact is a class (a non-empty type block was decoded).
    #[must_use]
    pub fn is_class(&self) -> bool {
        self.type_info.is_some()
    }

    /// Offset of the digest within the header area.
    #[must_use]
    pub fn digest_offset(&self) -> u16 {
        self.header.digest_offset
    }

    /// The decoded primary header.
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The decoded segment table.
    #[must_use]
    pub fn segment_table(&self) -> &SegmentTable {
        &self.segments
    }
}

/// Read exactly `buf.len()` bytes, reporting a truncated stream as a short read
/// of `section`.
fn fill<R: Read + ?Sized>(input: &mut R, buf: &mut [u8], section: Section) -> Result<()> {
    input.read_exact(buf).map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::ShortRead(section)
        } else {
            Error::Io(err)
        }
    })
}

fn read_section<R: Read + ?Sized>(
    input: &mut R,
    size: usize,
    section: Section,
) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; size];
    fill(input, &mut buf, section)?;
    Ok(buf)
}
