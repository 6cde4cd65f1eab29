//! Type-block decoder for the 12xx r-code family.
//!
//! The 12xx layout extends the 11xx one (see [`super::v11`]) in four ways:
//!
//! - the leading record opens with a 16-byte digest, shifting every header
//!   field by 16 bytes;
//! - method, property, variable and event records carry a u32 source line
//!   (methods additionally a u32 signature hash) ahead of their runtime slot;
//! - signature parameter records carry a trailing u32 attribute word;
//! - the member kinds are laid out in the order **methods, properties,
//!   events, variables, tables** - events moved ahead of variables.
//!
//! Table, field, index and accessor sub-records are unchanged. Both decoders
//! produce the same [`TypeInfo`] shape.

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
    Error::OutOfBounds,
    Result,
};

/// Size of the digest opening the 12xx leading record.
const DIGEST_SIZE: usize = 16;

/// Decode a 12xx type block into a [`TypeInfo`].
pub(crate) fn decode(
    data: &[u8],
    order: ByteOrder,
    is_64_bit: bool,
    charset: Charset,
) -> Result<TypeInfo> {
    let pool = StringPool::new(data, charset);
    let mut parser = Parser::with_charset(data, order, charset);

    let digest: [u8; DIGEST_SIZE] = data
        .get(..DIGEST_SIZE)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(OutOfBounds)?;
    parser.advance_by(DIGEST_SIZE)?;

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

    // Method record: name, flags(2), return type(2), return class, param
    // count(2), reserved(2), source line(4), signature hash(4), code
    // slot(word).
    let mut methods = Vec::with_capacity(usize::from(method_count));
    let mut method_param_counts = Vec::with_capacity(usize::from(method_count));
    for position in 0..method_count {
        let name = pool.get(parser.read_u32()?)?;
        let flags = AccessFlags::from_bits_retain(u32::from(parser.read_u16()?));
        let return_code = parser.read_u16()?;
        let return_class = pool.get(parser.read_u32()?)?;
        let param_count = parser.read_u16()?;
        let _reserved = parser.read_u16()?;
        let source_line = parser.read_u32()?;
        let signature_hash = parser.read_u32()?;
        let _code_slot = parser.read_word(is_64_bit)?;

        method_param_counts.push(param_count);
        methods.push(MethodElement {
            name,
            flags,
            return_type: DataType::from_raw(return_code, return_class),
            parameters: Vec::new(),
            position: u32::from(position),
            source_line,
            signature_hash,
        });
    }

    // Property record: the 11xx shape plus source line(4) ahead of the
    // backing slot.
    let mut properties = Vec::with_capacity(usize::from(property_count));
    for position in 0..property_count {
        let name = pool.get(parser.read_u32()?)?;
        let flags = AccessFlags::from_bits_retain(u32::from(parser.read_u16()?));
        let type_code = parser.read_u16()?;
        let class_name = pool.get(parser.read_u32()?)?;
        let extent = parser.read_i32()?;
        let source_line = parser.read_u32()?;
        let _backing_slot = parser.read_word(is_64_bit)?;

        properties.push(PropertyElement {
            name,
            flags,
            data_type: DataType::from_raw(type_code, class_name),
            extent,
            getter: None,
            setter: None,
            position: u32::from(position),
            source_line,
        });
    }

    // Event record: the 11xx shape plus source line(4) ahead of the handler
    // slot. Events precede variables in 12xx blocks.
    let mut events = Vec::with_capacity(usize::from(event_count));
    let mut event_param_counts = Vec::with_capacity(usize::from(event_count));
    for position in 0..event_count {
        let name = pool.get(parser.read_u32()?)?;
        let flags = AccessFlags::from_bits_retain(u32::from(parser.read_u16()?));
        let param_count = parser.read_u16()?;
        let delegate_name = pool.get(parser.read_u32()?)?;
        let source_line = parser.read_u32()?;
        let _handler_slot = parser.read_word(is_64_bit)?;

        event_param_counts.push(param_count);
        events.push(EventElement {
            name,
            flags,
            delegate_name,
            parameters: Vec::new(),
            position: u32::from(position),
            source_line,
        });
    }

    // Variable record: the 11xx shape plus source line(4) ahead of the
    // storage slot.
    let mut variables = Vec::with_capacity(usize::from(variable_count));
    for position in 0..variable_count {
        let name = pool.get(parser.read_u32()?)?;
        let flags = AccessFlags::from_bits_retain(u32::from(parser.read_u16()?));
        let type_code = parser.read_u16()?;
        let class_name = pool.get(parser.read_u32()?)?;
        let extent = parser.read_i32()?;
        let source_line = parser.read_u32()?;
        let _storage_slot = parser.read_word(is_64_bit)?;

        variables.push(VariableElement {
            name,
            flags,
            data_type: DataType::from_raw(type_code, class_name),
            extent,
            position: u32::from(position),
            source_line,
        });
    }

    // Table record: unchanged from 11xx.
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

    // Variable-stride section, in the 12xx kind order.
    for (method, param_count) in methods.iter_mut().zip(method_param_counts) {
        method.parameters = records::read_parameters(&mut parser, &pool, param_count, true)?;
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
        event.parameters = records::read_parameters(&mut parser, &pool, param_count, true)?;
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
        digest: Some(digest),
    })
}
