//! Property records.

use crate::typeinfo::{datatype::DataType, flags::AccessFlags};

/// Getter or setter body of a property.
///
/// Accessors may tighten visibility relative to the property itself, which is why
/// they carry their own access flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAccessor {
    /// Visibility and modifier bits of the accessor body.
    pub flags: AccessFlags,
}

/// A property declared by the class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyElement {
    /// Property name.
    pub name: String,
    /// Visibility and modifier bits.
    pub flags: AccessFlags,
    /// Declared data type.
    pub data_type: DataType,
    /// Array arity: 0 scalar, > 0 fixed, [`crate::EXTENT_INDETERMINATE`] open.
    pub extent: i32,
    /// Getter body, when `HAS_GETTER` is set on the property flags.
    pub getter: Option<PropertyAccessor>,
    /// Setter body, when `HAS_SETTER` is set on the property flags.
    pub setter: Option<PropertyAccessor>,
    /// Zero-based declaration index among the class's properties.
    pub position: u32,
    /// Source line of the declaration (OE12 only; zero in 11xx artifacts).
    pub source_line: u32,
}
