//! Flag sets and parameter modes used by type-block records.
//!
//! All flag sets are decoded with `from_bits_retain`: bits this crate does not
//! know about are preserved verbatim so that artifacts from newer compilers can
//! round-trip their attributes through analysis code without loss.

use bitflags::bitflags;

bitflags! {
    /// Visibility and modifier bits shared by methods, properties, variables,
    /// events and property accessors.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AccessFlags: u32 {
        /// PUBLIC visibility
        const PUBLIC = 0x0001;
        /// PROTECTED visibility
        const PROTECTED = 0x0002;
        /// PRIVATE visibility
        const PRIVATE = 0x0004;
        /// PACKAGE-PROTECTED visibility (OE12)
        const PACKAGE_PROTECTED = 0x0008;
        /// PACKAGE-PRIVATE visibility (OE12)
        const PACKAGE_PRIVATE = 0x0010;
        /// STATIC member
        const STATIC = 0x0020;
        /// ABSTRACT member
        const ABSTRACT = 0x0040;
        /// OVERRIDE member
        const OVERRIDE = 0x0080;
        /// FINAL member
        const FINAL = 0x0100;
        /// The method is a constructor
        const CONSTRUCTOR = 0x0200;
        /// The property declares a getter body
        const HAS_GETTER = 0x0400;
        /// The property declares a setter body
        const HAS_SETTER = 0x0800;
    }
}

bitflags! {
    /// Class-level attribute bits from the type block's leading record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TypeFlags: u32 {
        /// ABSTRACT class
        const ABSTRACT = 0x0001;
        /// FINAL class
        const FINAL = 0x0002;
        /// The artifact is an interface definition
        const INTERFACE = 0x0004;
        /// SERIALIZABLE class
        const SERIALIZABLE = 0x0008;
        /// USE-WIDGET-POOL was declared
        const USE_WIDGET_POOL = 0x0010;
        /// The artifact is an enum definition (OE12)
        const ENUM = 0x0020;
    }
}

bitflags! {
    /// Temp-table / buffer attribute bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TableFlags: u32 {
        /// NO-UNDO temp-table
        const NO_UNDO = 0x0001;
        /// The table is a buffer over another table
        const BUFFER = 0x0002;
    }
}

bitflags! {
    /// Temp-table field attribute bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FieldFlags: u32 {
        /// MANDATORY field
        const MANDATORY = 0x0001;
        /// CASE-SENSITIVE character field
        const CASE_SENSITIVE = 0x0002;
    }
}

bitflags! {
    /// Temp-table index attribute bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IndexFlags: u32 {
        /// PRIMARY index
        const PRIMARY = 0x0001;
        /// UNIQUE index
        const UNIQUE = 0x0002;
        /// WORD-INDEX
        const WORD_INDEX = 0x0004;
        /// The compiler-generated default index
        const DEFAULT = 0x0008;
    }
}

/// Passing mode of a method, constructor or event parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterMode {
    /// INPUT parameter
    Input,
    /// OUTPUT parameter
    Output,
    /// INPUT-OUTPUT parameter
    InputOutput,
    /// BUFFER parameter
    Buffer,
    /// The synthetic RETURN parameter slot
    Return,
}

impl ParameterMode {
    /// Map a raw mode code to a parameter mode, `None` for unknown codes.
    #[must_use]
    pub fn from_code(code: u16) -> Option<ParameterMode> {
        match code {
            1 => Some(ParameterMode::Input),
            2 => Some(ParameterMode::Output),
            3 => Some(ParameterMode::InputOutput),
            4 => Some(ParameterMode::Buffer),
            5 => Some(ParameterMode::Return),
            _ => None,
        }
    }

    /// The raw mode code.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            ParameterMode::Input => 1,
            ParameterMode::Output => 2,
            ParameterMode::InputOutput => 3,
            ParameterMode::Buffer => 4,
            ParameterMode::Return => 5,
        }
    }
}

impl std::fmt::Display for ParameterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keyword = match self {
            ParameterMode::Input => "INPUT",
            ParameterMode::Output => "OUTPUT",
            ParameterMode::InputOutput => "INPUT-OUTPUT",
            ParameterMode::Buffer => "BUFFER",
            ParameterMode::Return => "RETURN",
        };
        f.write_str(keyword)
    }
}
