//! Byte-level reading layer.
//!
//! Everything above this module works on buffered blocks: the façade reads each
//! r-code section into an owned buffer, and the decoders here provide endian-aware,
//! bounds-checked access to it. See [`io`] for the primitive readers and [`parser`]
//! for the cursor type.

pub mod io;
pub mod parser;

pub use io::ByteOrder;
pub use parser::{Charset, Parser};
