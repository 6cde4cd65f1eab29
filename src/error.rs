use std::fmt;

use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The sections of an r-code file, in the order they occur in the stream.
///
/// Used by [`Error::ShortRead`] to report which part of the file ended
/// prematurely. The display strings match the section names used in
/// diagnostics output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// The fixed 68-byte primary header.
    Header,
    /// The extra 16-byte header tail present in OE12 r-code.
    V12Tail,
    /// The signature block.
    Signature,
    /// The segment table block.
    SegmentTable,
    /// The r-code body holding the initial-value, action, ecode and debug segments.
    Body,
    /// The trailing type block of class artifacts.
    TypeBlock,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Header => "header",
            Section::V12Tail => "OE12 header",
            Section::Signature => "signature block",
            Section::SegmentTable => "segment table block",
            Section::Body => "rcode block",
            Section::TypeBlock => "type block",
        };
        f.write_str(name)
    }
}

/// The generic Error type, which provides coverage for all errors this library can
/// potentially return.
///
/// Decoding aborts on the first error; no partially decoded [`crate::RCodeInfo`]
/// is ever handed out. None of these errors are retryable - a failing artifact
/// should be reported and skipped.
///
/// # Error Categories
///
/// ## Stream Errors
/// - [`Error::ShortRead`] - The stream ended before a section completed
/// - [`Error::Io`] - I/O failure while filling a section buffer
///
/// ## Format Errors
/// - [`Error::Malformed`] - Magic mismatch, non-hex ASCII, bad string-pool offset,
///   oversize block and similar structural damage
/// - [`Error::OutOfBounds`] - A bounds-checked read inside an already-buffered
///   block would have crossed the end of the block
/// - [`Error::UnsupportedVersion`] - The artifact predates OpenEdge 11
///
/// # Examples
///
/// ```rust,no_run
/// use ablscope::{Error, RCodeInfo};
/// use std::path::Path;
///
/// match RCodeInfo::from_path(Path::new("build/MyClass.r")) {
///     Ok(rcode) => println!("decoded r-code v{}", rcode.version_major()),
///     Err(Error::ShortRead(section)) => eprintln!("truncated in {}", section),
///     Err(Error::UnsupportedVersion(v)) => eprintln!("r-code v{} not supported", v),
///     Err(e) => eprintln!("not analyzable: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The stream ended before the given section was complete.
    ///
    /// Raised whenever fewer bytes than a section's declared size could be
    /// read from the input stream.
    #[error("Not enough bytes in {0}")]
    ShortRead(Section),

    /// The file is damaged and could not be parsed.
    ///
    /// This error indicates that the file structure does not conform to the
    /// r-code format: wrong magic number, non-hexadecimal text where the
    /// signature preamble requires it, string-pool references outside the
    /// type block, or block sizes beyond the configured maximum. The error
    /// includes the source location where the malformation was detected for
    /// debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The r-code was produced by a compiler older than OpenEdge 11.
    ///
    /// Only the 11xx and 12xx format families are supported. The associated
    /// value is the major version found in the header.
    #[error("Only v11 and v12 rcode is supported, got version {0}")]
    UnsupportedVersion(u16),

    /// An out of bound access was attempted while parsing a buffered block.
    ///
    /// This is the low-level reader's safety check; higher layers usually
    /// translate it into [`Error::ShortRead`] or [`Error::Malformed`] with
    /// more context.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while reading the input
    /// stream or writing to a diagnostics sink.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
