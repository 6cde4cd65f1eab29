//! # ablscope Prelude
//!
//! Convenient re-exports of the most commonly used types. Import this module
//! to get quick access to the essentials for r-code analysis.

/// The main error type for all ablscope operations
pub use crate::{Error, Section};

/// The result type used throughout ablscope
pub use crate::Result;

/// Main entry points for r-code decoding
pub use crate::{DecodeOptions, Decoder, RCodeInfo, SegmentVisitor};

/// Low-level parsing utilities
pub use crate::{ByteOrder, Charset, Parser};

/// Header and segment-table records, plus the format's magic numbers
pub use crate::{Header, SegmentTable, HEADER_SIZE, MAGIC_BE, MAGIC_LE, V12_TAIL_SIZE};

/// Class type information and its member element records
pub use crate::{
    AccessFlags, DataType, EventElement, FieldFlags, IndexFlags, MethodElement, Parameter,
    ParameterMode, PrimitiveDataType, PropertyAccessor, PropertyElement, TableElement, TableField,
    TableFlags, TableIndex, TypeFlags, TypeInfo, VariableElement,
};

/// Data-type sentinels: open-array extent and the "unresolved" placeholder
pub use crate::{EXTENT_INDETERMINATE, NOT_COMPUTED};
