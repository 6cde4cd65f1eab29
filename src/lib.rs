// Copyright 2025-2026 The ablscope contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![deny(missing_docs)]

//! # ablscope
//!
//! A decoder for r-code, the compiled binary artifact format of the
//! OpenEdge/Progress ABL compiler. `ablscope` reads `.r` files produced for
//! procedures and classes, walks their header, signature, segment-table and
//! body sections, and - for class artifacts - reconstructs the full declared
//! surface of the class: parent, interfaces, methods with parameters and
//! return types, properties, variables, events and temp-tables.
//!
//! # Architecture
//!
//! The decoder is a strictly sequential pipeline over a byte stream:
//!
//! - **File layer** ([`crate::file`]): endian-aware, bounds-checked primitive
//!   reads and a cursor type. The byte order detected from the magic number is
//!   a value threaded through every read; there is no ambient endianness.
//! - **Container layer** ([`crate::rcode`]): the fixed header (two format
//!   families, 11xx and 12xx), the signature block, the segment table and the
//!   body segments, orchestrated by [`crate::RCodeInfo`].
//! - **Type layer** ([`crate::typeinfo`]): the trailing type block of class
//!   artifacts, decoded by one of two version-specific decoders into the
//!   single immutable [`crate::TypeInfo`] model backed by the block's string
//!   pool.
//!
//! Decoding performs no I/O beyond reading the caller's stream, allocates only
//! the declared (and limit-checked) block sizes, and either returns a fully
//! decoded artifact or a single [`crate::Error`] - never a partial object.
//!
//! # Usage Examples
//!
//! ## Inspecting a class artifact
//!
//! ```rust,no_run
//! use ablscope::RCodeInfo;
//!
//! let rcode = RCodeInfo::from_path("build/rssw/MyClass.r")?;
//! assert!(rcode.is_class());
//!
//! let type_info = rcode.type_info().unwrap();
//! println!("class {} inherits {}", type_info.name(), type_info.parent_name());
//! for method in type_info.methods() {
//!     println!("  method {} -> {}", method.name, method.return_type);
//! }
//! # Ok::<(), ablscope::Error>(())
//! ```
//!
//! ## Decoding from memory with custom options
//!
//! ```rust,no_run
//! use ablscope::{Charset, DecodeOptions, Decoder};
//!
//! let bytes: Vec<u8> = std::fs::read("build/hello.r")?;
//! let rcode = Decoder::with_options(DecodeOptions {
//!     charset: Charset::Iso88591,
//!     ..DecodeOptions::default()
//! })
//! .decode_slice(&bytes)?;
//! assert!(!rcode.is_class());
//! # Ok::<(), ablscope::Error>(())
//! ```
//!
//! # Thread safety
//!
//! A decode run is single-threaded and owns all of its buffers; any number of
//! decoders may run in parallel on disjoint streams. A decoded
//! [`crate::TypeInfo`] is immutable and freely shareable across threads.

#[macro_use]
pub(crate) mod error;

pub mod file;
pub mod prelude;
pub mod rcode;
pub mod typeinfo;

/// The main error type for all decoding operations.
pub use error::{Error, Section};

/// Low-level byte access: detected byte order, string charset and the block
/// cursor used by every section decoder.
pub use file::{ByteOrder, Charset, Parser};

/// The decode pipeline: entry points, options and the segment visitor seam.
pub use rcode::{DecodeOptions, Decoder, RCodeInfo, SegmentVisitor};

/// Header and segment-table records, plus the format's magic numbers.
pub use rcode::header::{Header, HEADER_SIZE, MAGIC_BE, MAGIC_LE, V12_TAIL_SIZE};
pub use rcode::segments::SegmentTable;

/// Class type information and its member element records.
pub use typeinfo::elements::{
    EventElement, MethodElement, Parameter, PropertyAccessor, PropertyElement, TableElement,
    TableField, TableIndex, VariableElement,
};
pub use typeinfo::{
    datatype::{DataType, PrimitiveDataType, EXTENT_INDETERMINATE, NOT_COMPUTED},
    flags::{AccessFlags, FieldFlags, IndexFlags, ParameterMode, TableFlags, TypeFlags},
    TypeInfo,
};

/// The result type used throughout ablscope.
pub type Result<T> = std::result::Result<T, Error>;
