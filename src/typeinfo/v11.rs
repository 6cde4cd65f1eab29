//! Type-block decoder for the 11xx r-code family.
//!
//! Block layout, all integers in the detected byte order, string references as
//! absolute offsets into the block's trailing string pool, `word` = 4 bytes
//! (8 on 64-bit targets):
//!
//! Leading record:
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0      | 2    | method count |
//! | 2      | 2    | property count |
//! | 4      | 2    | variable count |
//! | 6      | 2    | event count |
//! | 8      | 2    | table count |
//! | 10     | 2    | interface count |
//! | 12     | 4    | class attribute bits |
//! | 16     | 4    | type name (string ref) |
//! | 20     | 4    | parent type name (string ref) |
//! | 24     | 4    | package name (string ref) |
//! | 28     | word | runtime slot |
//!
//! Followed by `interface count` u32 string refs, then the fixed-stride member
//! records grouped by kind in the order **methods, properties, variables,
//! events, tables**, then the variable-stride blocks (parameters, accessor
//! bodies, fields, indexes) in the same kind order, then the string pool.

use crate::{
    file::{io::ByteOrder, Charset, Parser},
    typeinfo::{
        datatype::DataType,
        elements::{EventElement, MethodElement, PropertyElement, TableElement, VariableElement},
        flags::{AccessFlags, TableFlags, TypeFlags},
        records,
        strings::StringPool,
        TypeInfo,
    },
    Result,
};

/// Decode an 11xx type block into a [`TypeInfo`].
pub(crate) fn decode(
    data: &[u8],
    order: ByteOrder,
    is_64_bit: bool,
    charset: Charset,
) -> Result<TypeInfo> {
    let pool = StringPool::new(data, charset);
    let mut parser = Parser::with_charset(data, order, charset);

    let method_count = parser.read_u16()?;
    let property_count = parser.read_u16()?;
    let variable_count = parser.read_u16()?;
    let event_count = parser.read_u16()?;
    let table_count = parser.read_u16()?;
    let interface_count = parser.read_u16()?;
    let flags = TypeFlags::from_bits_retain(parser.read_u32()?);
    let type_name = pool.get(parser.read_u32()?)?;
    let parent_type_name = pool.get(parser.read_u32()?)?;
    let package_name = pool.get(parser.read_u32()?)?;
    let _runtime_slot = parser.read_word(is_64_bit)?;

    let mut interfaces = Vec::with_capacity(usize::from(interface_count));
    for _ in 0..interface_count {
        interfaces.push(pool.get(parser.read_u32()?)?);
    }

    // Fixed-stride member records. Per-record sub-element counts are collected
    // here and consumed against the variable-stride section below.

    // Method record: name, flags(2), return type(2), return class, param
    // count(2), reserved(2), code slot(word).
    let mut methods = Vec::with_capacity(usize::from(method_count));
    let mut method_param_counts = Vec::with_capacity(usize::from(method_count));
    for position in 0..method_count {
        let name = pool.get(parser.read_u32()?)?;
        let flags = AccessFlags::from_bits_retain(u32::from(parser.read_u16()?));
        let return_code = parser.read_u16()?;
        let return_class = pool.get(parser.read_u32()?)?;
        let param_count = parser.read_u16()?;
        let _reserved = parser.read_u16()?;
        let _code_slot = parser.read_word(is_64_bit)?;

        method_param_counts.push(param_count);
        methods.push(MethodElement {
            name,
            flags,
            return_type: DataType::from_raw(return_code, return_class),
            parameters: Vec::new(),
            position: u32::from(position),
            source_line: 0,
            signature_hash: 0,
        });
    }

    // Property record: name, flags(2), data type(2), class, extent(4), backing
    // slot(word).
    let mut properties = Vec::with_capacity(usize::from(property_count));
    for position in 0..property_count {
        let name = pool.get(parser.read_u32()?)?;
        let flags = AccessFlags::from_bits_retain(u32::from(parser.read_u16()?));
        let type_code = parser.read_u16()?;
        let class_name = pool.get(parser.read_u32()?)?;
        let extent = parser.read_i32()?;
        let _backing_slot = parser.read_word(is_64_bit)?;

        properties.push(PropertyElement {
            name,
            flags,
            data_type: DataType::from_raw(type_code, class_name),
            extent,
            getter: None,
            setter: None,
            position: u32::from(position),
            source_line: 0,
        });
    }

    // Variable record: same shape as a property record.
    let mut variables = Vec::with_capacity(usize::from(variable_count));
    for position in 0..variable_count {
        let name = pool.get(parser.read_u32()?)?;
        let flags = AccessFlags::from_bits_retain(u32::from(parser.read_u16()?));
        let type_code = parser.read_u16()?;
        let class_name = pool.get(parser.read_u32()?)?;
        let extent = parser.read_i32()?;
        let _storage_slot = parser.read_word(is_64_bit)?;

        variables.push(VariableElement {
            name,
            flags,
            data_type: DataType::from_raw(type_code, class_name),
            extent,
            position: u32::from(position),
            source_line: 0,
        });
    }

    // Event record: name, flags(2), param count(2), delegate name, handler
    // slot(word).
    let mut events = Vec::with_capacity(usize::from(event_count));
    let mut event_param_counts = Vec::with_capacity(usize::from(event_count));
    for position in 0..event_count {
        let name = pool.get(parser.read_u32()?)?;
        let flags = AccessFlags::from_bits_retain(u32::from(parser.read_u16()?));
        let param_count = parser.read_u16()?;
        let delegate_name = pool.get(parser.read_u32()?)?;
        let _handler_slot = parser.read_word(is_64_bit)?;

        event_param_counts.push(param_count);
        events.push(EventElement {
            name,
            flags,
            delegate_name,
            parameters: Vec::new(),
            position: u32::from(position),
            source_line: 0,
        });
    }

    // Table record: name, flags(2), field count(2), index count(2),
    // reserved(2), buffer name, schema slot(word).
    let mut tables = Vec::with_capacity(usize::from(table_count));
    let mut table_shapes = Vec::with_capacity(usize::from(table_count));
    for position in 0..table_count {
        let name = pool.get(parser.read_u32()?)?;
        let flags = TableFlags::from_bits_retain(u32::from(parser.read_u16()?));
        let field_count = parser.read_u16()?;
        let index_count = parser.read_u16()?;
        let _reserved = parser.read_u16()?;
        let buffer_name = pool.get(parser.read_u32()?)?;
        let _schema_slot = parser.read_word(is_64_bit)?;

        table_shapes.push((field_count, index_count));
        tables.push(TableElement {
            name,
            flags,
            buffer_name,
            fields: Vec::new(),
            indexes: Vec::new(),
            position: u32::from(position),
        });
    }

    // Variable-stride section, in the same kind order as the fixed records.
    for (method, param_count) in methods.iter_mut().zip(method_param_counts) {
        method.parameters = records::read_parameters(&mut parser, &pool, param_count, false)?;
    }

    for property in &mut properties {
        if property.flags.contains(AccessFlags::HAS_GETTER) {
            property.getter = Some(records::read_accessor(&mut parser)?);
        }
        if property.flags.contains(AccessFlags::HAS_SETTER) {
            property.setter = Some(records::read_accessor(&mut parser)?);
        }
    }

    for (event, param_count) in events.iter_mut().zip(event_param_counts) {
        event.parameters = records::read_parameters(&mut parser, &pool, param_count, false)?;
    }

    for (table, (field_count, index_count)) in tables.iter_mut().zip(table_shapes) {
        table.fields = records::read_fields(&mut parser, &pool, field_count)?;
        table.indexes = records::read_indexes(&mut parser, &pool, index_count)?;
    }

    Ok(TypeInfo {
        type_name,
        parent_type_name,
        package_name,
        interfaces,
        flags,
        methods,
        properties,
        variables,
        events,
        tables,
        digest: None,
    })
}
