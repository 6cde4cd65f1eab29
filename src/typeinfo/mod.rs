//! Class type information decoded from the trailing type block.
//!
//! Class artifacts append a type block describing the declared surface of the
//! class: its name, parent, interfaces and every method, property, variable,
//! event and temp-table, down to parameter lists and index components. Two
//! on-disk layouts exist - the 11xx and 12xx families - decoded by
//! [`v11`] and [`v12`] into the single public [`TypeInfo`] model.
//!
//! A [`TypeInfo`] is immutable after decoding, owns all of its strings and can
//! be shared freely across threads.

pub mod datatype;
pub mod elements;
pub mod flags;
mod records;
mod strings;
mod v11;
mod v12;

use crate::{
    file::{io::ByteOrder, Charset},
    Result,
};

use elements::{EventElement, MethodElement, PropertyElement, TableElement, VariableElement};
use flags::TypeFlags;

/// Declared surface of one ABL class, decoded from its type block.
///
/// Member collections preserve declaration order; each element additionally
/// carries its zero-based position within its kind. Construction happens once
/// inside the decoder - there is no way to mutate a `TypeInfo` afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub(crate) type_name: String,
    pub(crate) parent_type_name: String,
    pub(crate) package_name: String,
    pub(crate) interfaces: Vec<String>,
    pub(crate) flags: TypeFlags,
    pub(crate) methods: Vec<MethodElement>,
    pub(crate) properties: Vec<PropertyElement>,
    pub(crate) variables: Vec<VariableElement>,
    pub(crate) events: Vec<EventElement>,
    pub(crate) tables: Vec<TableElement>,
    pub(crate) digest: Option<[u8; 16]>,
}

impl TypeInfo {
    /// Fully qualified name of the class.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.type_name
    }

    /// Fully qualified name of the parent class, empty when the class only
    /// derives from `Progress.Lang.Object` implicitly.
    #[must_use]
    pub fn parent_name(&self) -> &str {
        &self.parent_type_name
    }

    /// Package prefix of the class, empty for unpackaged classes.
    #[must_use]
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Implemented interfaces, in declaration order.
    #[must_use]
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// Class attribute bits.
    #[must_use]
    pub fn flags(&self) -> TypeFlags {
        self.flags
    }

    /// True when every bit of `flag` is set on the class.
    #[must_use]
    pub fn has_flag(&self, flag: TypeFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Declared methods, in declaration order.
    #[must_use]
    pub fn methods(&self) -> &[MethodElement] {
        &self.methods
    }

    /// Declared properties, in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyElement] {
        &self.properties
    }

    /// Declared variables, in declaration order.
    #[must_use]
    pub fn variables(&self) -> &[VariableElement] {
        &self.variables
    }

    /// Declared events, in declaration order.
    #[must_use]
    pub fn events(&self) -> &[EventElement] {
        &self.events
    }

    /// Declared temp-tables and buffers, in declaration order.
    #[must_use]
    pub fn tables(&self) -> &[TableElement] {
        &self.tables
    }

    /// The digest from the leading record; only present in 12xx artifacts.
    #[must_use]
    pub fn digest(&self) -> Option<&[u8; 16]> {
        self.digest.as_ref()
    }
}

/// Decode a complete type block, dispatching on the artifact's major version.
pub(crate) fn decode_type_block(
    data: &[u8],
    order: ByteOrder,
    version_major: u16,
    is_64_bit: bool,
    charset: Charset,
) -> Result<TypeInfo> {
    if version_major >= 1200 {
        v12::decode(data, order, is_64_bit, charset)
    } else {
        v11::decode(data, order, is_64_bit, charset)
    }
}
