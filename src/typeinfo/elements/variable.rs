//! Instance and static variable records.

use crate::typeinfo::{datatype::DataType, flags::AccessFlags};

/// A data member declared by the class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableElement {
    /// Variable name.
    pub name: String,
    /// Visibility and modifier bits.
    pub flags: AccessFlags,
    /// Declared data type.
    pub data_type: DataType,
    /// Array arity: 0 scalar, > 0 fixed, [`crate::EXTENT_INDETERMINATE`] open.
    pub extent: i32,
    /// Zero-based declaration index among the class's variables.
    pub position: u32,
    /// Source line of the declaration (OE12 only; zero in 11xx artifacts).
    pub source_line: u32,
}
