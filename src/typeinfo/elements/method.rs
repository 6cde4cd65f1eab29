//! Method records and their parameters.

use crate::typeinfo::{datatype::DataType, flags::AccessFlags, flags::ParameterMode};

/// One parameter of a method, constructor or event signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Passing mode.
    pub mode: ParameterMode,
    /// Declared data type.
    pub data_type: DataType,
    /// Array arity: 0 scalar, > 0 fixed, [`crate::EXTENT_INDETERMINATE`] open.
    pub extent: i32,
    /// Raw attribute bits (OE12 only; zero in 11xx artifacts).
    pub flags: u32,
}

/// A method declared by the class, including constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodElement {
    /// Method name.
    pub name: String,
    /// Visibility and modifier bits.
    pub flags: AccessFlags,
    /// Declared return type; `VOID` for procedures-style methods.
    pub return_type: DataType,
    /// Parameters in declaration order.
    pub parameters: Vec<Parameter>,
    /// Zero-based declaration index among the class's methods.
    pub position: u32,
    /// Source line of the declaration (OE12 only; zero in 11xx artifacts).
    pub source_line: u32,
    /// Signature hash (OE12 only; zero in 11xx artifacts).
    pub signature_hash: u32,
}

impl MethodElement {
    /// True when the record describes a constructor.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.flags.contains(AccessFlags::CONSTRUCTOR)
    }

    /// True when the method is declared STATIC.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags.contains(AccessFlags::STATIC)
    }
}
