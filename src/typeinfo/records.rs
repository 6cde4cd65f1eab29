//! Sub-record readers shared by the v11 and v12 type-block decoders.
//!
//! The variable-stride section of a type block is built from a handful of record
//! shapes that are stable across format versions: signature parameters (OE12 adds
//! a trailing attribute word), property accessor bodies, temp-table fields and
//! temp-table indexes. The version decoders own the fixed-stride layouts and call
//! into this module for everything below them.

use crate::{
    file::Parser,
    typeinfo::{
        datatype::DataType,
        elements::{Parameter, PropertyAccessor, TableField, TableIndex},
        flags::{AccessFlags, FieldFlags, IndexFlags, ParameterMode},
        strings::StringPool,
    },
    Result,
};

/// Read `count` signature parameters.
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 4    | name (string ref) |
/// | 4      | 2    | mode code |
/// | 6      | 2    | data type code |
/// | 8      | 4    | class name (string ref) |
/// | 12     | 4    | extent (i32) |
/// | 16     | 4    | attribute bits - OE12 only (`with_flags`) |
pub(crate) fn read_parameters(
    parser: &mut Parser<'_>,
    pool: &StringPool<'_>,
    count: u16,
    with_flags: bool,
) -> Result<Vec<Parameter>> {
    let mut parameters = Vec::with_capacity(usize::from(count));

    for _ in 0..count {
        let name = pool.get(parser.read_u32()?)?;
        let mode_code = parser.read_u16()?;
        let type_code = parser.read_u16()?;
        let class_name = pool.get(parser.read_u32()?)?;
        let extent = parser.read_i32()?;
        let flags = if with_flags { parser.read_u32()? } else { 0 };

        let mode = ParameterMode::from_code(mode_code)
            .ok_or_else(|| malformed_error!("Invalid parameter mode - {}", mode_code))?;

        parameters.push(Parameter {
            name,
            mode,
            data_type: DataType::from_raw(type_code, class_name),
            extent,
            flags,
        });
    }

    Ok(parameters)
}

/// Read one property accessor body: u16 access flags, u16 reserved.
pub(crate) fn read_accessor(parser: &mut Parser<'_>) -> Result<PropertyAccessor> {
    let flags = AccessFlags::from_bits_retain(u32::from(parser.read_u16()?));
    let _reserved = parser.read_u16()?;

    Ok(PropertyAccessor { flags })
}

/// Read `count` temp-table fields.
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 4    | name (string ref) |
/// | 4      | 2    | attribute bits |
/// | 6      | 2    | data type code |
/// | 8      | 4    | extent (i32) |
/// | 12     | 4    | label (string ref) |
/// | 16     | 4    | initial value (string ref) |
pub(crate) fn read_fields(
    parser: &mut Parser<'_>,
    pool: &StringPool<'_>,
    count: u16,
) -> Result<Vec<TableField>> {
    let mut fields = Vec::with_capacity(usize::from(count));

    for position in 0..count {
        let name = pool.get(parser.read_u32()?)?;
        let flags = FieldFlags::from_bits_retain(u32::from(parser.read_u16()?));
        let type_code = parser.read_u16()?;
        let extent = parser.read_i32()?;
        let label = pool.get(parser.read_u32()?)?;
        let initial_value = pool.get(parser.read_u32()?)?;

        fields.push(TableField {
            name,
            flags,
            data_type: DataType::from_raw(type_code, String::new()),
            extent,
            label,
            initial_value,
            position: u32::from(position),
        });
    }

    Ok(fields)
}

/// Read `count` temp-table indexes, each a fixed 8-byte head followed by its
/// u16 field-position components.
pub(crate) fn read_indexes(
    parser: &mut Parser<'_>,
    pool: &StringPool<'_>,
    count: u16,
) -> Result<Vec<TableIndex>> {
    let mut indexes = Vec::with_capacity(usize::from(count));

    for _ in 0..count {
        let name = pool.get(parser.read_u32()?)?;
        let flags = IndexFlags::from_bits_retain(u32::from(parser.read_u16()?));
        let component_count = parser.read_u16()?;

        let mut components = Vec::with_capacity(usize::from(component_count));
        for _ in 0..component_count {
            components.push(parser.read_u16()?);
        }

        indexes.push(TableIndex {
            name,
            flags,
            components,
        });
    }

    Ok(indexes)
}
