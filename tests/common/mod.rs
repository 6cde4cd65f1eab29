//! Synthetic r-code builder shared by the integration tests.
//!
//! Encodes complete artifacts - header, optional OE12 tail, signature block,
//! segment table, body and type block - in either byte order, mirroring the
//! layouts the decoder documents. Tests describe a class through the `*Spec`
//! structs and get back raw bytes to feed the decoder.

#![allow(dead_code)]

use std::collections::HashMap;

use ablscope::{AccessFlags, ByteOrder, HEADER_SIZE, MAGIC_BE, V12_TAIL_SIZE};

/// Raw version words used across the tests.
pub const V11: u16 = 0x044C; // 1100
pub const V12: u16 = 0x04B0; // 1200
pub const FLAG_64BIT: u16 = 0x4000;

pub fn is_v12(version: u16) -> bool {
    (version & 0x3FFF) >= 1200
}

pub fn is_wide(version: u16) -> bool {
    (version & FLAG_64BIT) != 0
}

fn word_size(version: u16) -> usize {
    if is_wide(version) {
        8
    } else {
        4
    }
}

// ---------------------------------------------------------------------------
// Endian-aware emit helpers
// ---------------------------------------------------------------------------

pub fn u16_bytes(value: u16, order: ByteOrder) -> [u8; 2] {
    match order {
        ByteOrder::BigEndian => value.to_be_bytes(),
        ByteOrder::LittleEndian => value.to_le_bytes(),
    }
}

pub fn u32_bytes(value: u32, order: ByteOrder) -> [u8; 4] {
    match order {
        ByteOrder::BigEndian => value.to_be_bytes(),
        ByteOrder::LittleEndian => value.to_le_bytes(),
    }
}

pub fn push_u16(buf: &mut Vec<u8>, value: u16, order: ByteOrder) {
    buf.extend_from_slice(&u16_bytes(value, order));
}

pub fn push_u32(buf: &mut Vec<u8>, value: u32, order: ByteOrder) {
    buf.extend_from_slice(&u32_bytes(value, order));
}

pub fn push_i32(buf: &mut Vec<u8>, value: i32, order: ByteOrder) {
    push_u32(buf, value as u32, order);
}

fn push_word(buf: &mut Vec<u8>, value: u64, order: ByteOrder, wide: bool) {
    if wide {
        let bytes = match order {
            ByteOrder::BigEndian => value.to_be_bytes(),
            ByteOrder::LittleEndian => value.to_le_bytes(),
        };
        buf.extend_from_slice(&bytes);
    } else {
        push_u32(buf, value as u32, order);
    }
}

fn put_u16(buf: &mut [u8], offset: usize, value: u16, order: ByteOrder) {
    buf[offset..offset + 2].copy_from_slice(&u16_bytes(value, order));
}

fn put_u32(buf: &mut [u8], offset: usize, value: u32, order: ByteOrder) {
    buf[offset..offset + 4].copy_from_slice(&u32_bytes(value, order));
}

// ---------------------------------------------------------------------------
// Signature block and segment table
// ---------------------------------------------------------------------------

/// Encode a signature block: 16-byte ASCII-hex preamble followed by
/// null-terminated records.
pub fn sig_block(records: &[&str]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"0010");
    data.extend_from_slice(format!("{:04X}", records.len()).as_bytes());
    data.extend_from_slice(b"0001");
    data.extend_from_slice(b"UTF");
    data.push(0);
    for record in records {
        data.extend_from_slice(record.as_bytes());
        data.push(0);
    }
    data
}

/// One offset/size pair of the segment table.
#[derive(Clone, Copy)]
pub struct Seg {
    pub offset: i32,
    pub size: u32,
}

impl Seg {
    pub fn absent() -> Seg {
        Seg {
            offset: -1,
            size: 0,
        }
    }

    pub fn at(offset: i32, size: u32) -> Seg {
        Seg { offset, size }
    }
}

/// Encode a 38-byte segment table.
pub fn segment_table(
    order: ByteOrder,
    initial_value: Seg,
    action: Seg,
    ecode: Seg,
    debug: Seg,
) -> Vec<u8> {
    let mut data = Vec::with_capacity(38);
    push_i32(&mut data, initial_value.offset, order);
    push_i32(&mut data, action.offset, order);
    push_i32(&mut data, ecode.offset, order);
    push_i32(&mut data, debug.offset, order);
    push_u32(&mut data, initial_value.size, order);
    push_u32(&mut data, action.size, order);
    push_u32(&mut data, ecode.size, order);
    push_u32(&mut data, debug.size, order);
    push_u16(&mut data, 0, order); // IPACS
    push_u16(&mut data, 0, order); // frame
    push_u16(&mut data, 0, order); // text
    data
}

pub fn empty_segment_table(order: ByteOrder) -> Vec<u8> {
    segment_table(
        order,
        Seg::absent(),
        Seg::absent(),
        Seg::absent(),
        Seg::absent(),
    )
}

// ---------------------------------------------------------------------------
// Type block builder
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct ParamSpec {
    pub name: String,
    pub mode: u16,
    pub data_type: u16,
    pub class_name: String,
    pub extent: i32,
    pub flags: u32,
}

impl ParamSpec {
    pub fn input(name: &str, data_type: u16) -> ParamSpec {
        ParamSpec {
            name: name.to_string(),
            mode: 1,
            data_type,
            ..ParamSpec::default()
        }
    }
}

#[derive(Clone, Default)]
pub struct MethodSpec {
    pub name: String,
    pub flags: u32,
    pub return_type: u16,
    pub return_class: String,
    pub params: Vec<ParamSpec>,
    pub source_line: u32,
    pub signature_hash: u32,
}

#[derive(Clone, Default)]
pub struct PropertySpec {
    pub name: String,
    pub flags: u32,
    pub data_type: u16,
    pub class_name: String,
    pub extent: i32,
    pub getter_flags: u32,
    pub setter_flags: u32,
    pub source_line: u32,
}

#[derive(Clone, Default)]
pub struct VariableSpec {
    pub name: String,
    pub flags: u32,
    pub data_type: u16,
    pub class_name: String,
    pub extent: i32,
    pub source_line: u32,
}

#[derive(Clone, Default)]
pub struct EventSpec {
    pub name: String,
    pub flags: u32,
    pub delegate: String,
    pub params: Vec<ParamSpec>,
    pub source_line: u32,
}

#[derive(Clone, Default)]
pub struct FieldSpec {
    pub name: String,
    pub flags: u16,
    pub data_type: u16,
    pub extent: i32,
    pub label: String,
    pub initial: String,
}

#[derive(Clone, Default)]
pub struct IndexSpec {
    pub name: String,
    pub flags: u16,
    pub components: Vec<u16>,
}

#[derive(Clone, Default)]
pub struct TableSpec {
    pub name: String,
    pub flags: u16,
    pub buffer: String,
    pub fields: Vec<FieldSpec>,
    pub indexes: Vec<IndexSpec>,
}

#[derive(Clone, Default)]
pub struct ClassSpec {
    pub name: String,
    pub parent: String,
    pub package: String,
    pub flags: u32,
    pub digest: [u8; 16],
    pub interfaces: Vec<String>,
    pub methods: Vec<MethodSpec>,
    pub properties: Vec<PropertySpec>,
    pub variables: Vec<VariableSpec>,
    pub events: Vec<EventSpec>,
    pub tables: Vec<TableSpec>,
}

impl ClassSpec {
    pub fn named(name: &str, parent: &str) -> ClassSpec {
        ClassSpec {
            name: name.to_string(),
            parent: parent.to_string(),
            ..ClassSpec::default()
        }
    }
}

/// Interning string pool; offsets are absolute within the final block.
struct Pool {
    base: usize,
    data: Vec<u8>,
    seen: HashMap<String, u32>,
}

impl Pool {
    fn new(base: usize) -> Pool {
        Pool {
            base,
            data: Vec::new(),
            seen: HashMap::new(),
        }
    }

    fn strref(&mut self, text: &str) -> u32 {
        if text.is_empty() {
            return 0;
        }
        if let Some(&offset) = self.seen.get(text) {
            return offset;
        }
        let offset = (self.base + self.data.len()) as u32;
        self.data.extend_from_slice(text.as_bytes());
        self.data.push(0);
        self.seen.insert(text.to_string(), offset);
        offset
    }
}

fn fixed_section_size(spec: &ClassSpec, version: u16) -> usize {
    let word = word_size(version);
    let v12 = is_v12(version);

    let header = if v12 { 44 + word } else { 28 + word };
    let method_stride = if v12 { 24 + word } else { 16 + word };
    let prop_stride = if v12 { 20 + word } else { 16 + word };
    let var_stride = if v12 { 20 + word } else { 16 + word };
    let event_stride = if v12 { 16 + word } else { 12 + word };
    let table_stride = 16 + word;
    let param_size = if v12 { 20 } else { 16 };

    let mut size = header + 4 * spec.interfaces.len();
    size += spec.methods.len() * method_stride;
    size += spec.properties.len() * prop_stride;
    size += spec.variables.len() * var_stride;
    size += spec.events.len() * event_stride;
    size += spec.tables.len() * table_stride;

    for method in &spec.methods {
        size += method.params.len() * param_size;
    }
    for property in &spec.properties {
        let flags = AccessFlags::from_bits_retain(property.flags);
        if flags.contains(AccessFlags::HAS_GETTER) {
            size += 4;
        }
        if flags.contains(AccessFlags::HAS_SETTER) {
            size += 4;
        }
    }
    for event in &spec.events {
        size += event.params.len() * param_size;
    }
    for table in &spec.tables {
        size += table.fields.len() * 20;
        for index in &table.indexes {
            size += 8 + 2 * index.components.len();
        }
    }

    size
}

fn push_param(buf: &mut Vec<u8>, pool: &mut Pool, param: &ParamSpec, order: ByteOrder, v12: bool) {
    let name = pool.strref(&param.name);
    let class = pool.strref(&param.class_name);
    push_u32(buf, name, order);
    push_u16(buf, param.mode, order);
    push_u16(buf, param.data_type, order);
    push_u32(buf, class, order);
    push_i32(buf, param.extent, order);
    if v12 {
        push_u32(buf, param.flags, order);
    }
}

/// Encode a complete type block for the given class under the given version
/// word and byte order.
pub fn build_type_block(spec: &ClassSpec, order: ByteOrder, version: u16) -> Vec<u8> {
    let v12 = is_v12(version);
    let wide = is_wide(version);
    let fixed = fixed_section_size(spec, version);

    let mut pool = Pool::new(fixed);
    let mut buf = Vec::with_capacity(fixed);

    // Leading record.
    if v12 {
        buf.extend_from_slice(&spec.digest);
    }
    push_u16(&mut buf, spec.methods.len() as u16, order);
    push_u16(&mut buf, spec.properties.len() as u16, order);
    push_u16(&mut buf, spec.variables.len() as u16, order);
    push_u16(&mut buf, spec.events.len() as u16, order);
    push_u16(&mut buf, spec.tables.len() as u16, order);
    push_u16(&mut buf, spec.interfaces.len() as u16, order);
    push_u32(&mut buf, spec.flags, order);
    let name = pool.strref(&spec.name);
    let parent = pool.strref(&spec.parent);
    let package = pool.strref(&spec.package);
    push_u32(&mut buf, name, order);
    push_u32(&mut buf, parent, order);
    push_u32(&mut buf, package, order);
    push_word(&mut buf, 0, order, wide);

    for interface in &spec.interfaces {
        let iface = pool.strref(interface);
        push_u32(&mut buf, iface, order);
    }

    // Fixed-stride member records. OE12 moves events ahead of variables.
    let emit_methods = |buf: &mut Vec<u8>, pool: &mut Pool| {
        for method in &spec.methods {
            let name = pool.strref(&method.name);
            let class = pool.strref(&method.return_class);
            push_u32(buf, name, order);
            push_u16(buf, method.flags as u16, order);
            push_u16(buf, method.return_type, order);
            push_u32(buf, class, order);
            push_u16(buf, method.params.len() as u16, order);
            push_u16(buf, 0, order);
            if v12 {
                push_u32(buf, method.source_line, order);
                push_u32(buf, method.signature_hash, order);
            }
            push_word(buf, 0, order, wide);
        }
    };
    let emit_properties = |buf: &mut Vec<u8>, pool: &mut Pool| {
        for property in &spec.properties {
            let name = pool.strref(&property.name);
            let class = pool.strref(&property.class_name);
            push_u32(buf, name, order);
            push_u16(buf, property.flags as u16, order);
            push_u16(buf, property.data_type, order);
            push_u32(buf, class, order);
            push_i32(buf, property.extent, order);
            if v12 {
                push_u32(buf, property.source_line, order);
            }
            push_word(buf, 0, order, wide);
        }
    };
    let emit_variables = |buf: &mut Vec<u8>, pool: &mut Pool| {
        for variable in &spec.variables {
            let name = pool.strref(&variable.name);
            let class = pool.strref(&variable.class_name);
            push_u32(buf, name, order);
            push_u16(buf, variable.flags as u16, order);
            push_u16(buf, variable.data_type, order);
            push_u32(buf, class, order);
            push_i32(buf, variable.extent, order);
            if v12 {
                push_u32(buf, variable.source_line, order);
            }
            push_word(buf, 0, order, wide);
        }
    };
    let emit_events = |buf: &mut Vec<u8>, pool: &mut Pool| {
        for event in &spec.events {
            let name = pool.strref(&event.name);
            let delegate = pool.strref(&event.delegate);
            push_u32(buf, name, order);
            push_u16(buf, event.flags as u16, order);
            push_u16(buf, event.params.len() as u16, order);
            push_u32(buf, delegate, order);
            if v12 {
                push_u32(buf, event.source_line, order);
            }
            push_word(buf, 0, order, wide);
        }
    };
    let emit_tables = |buf: &mut Vec<u8>, pool: &mut Pool| {
        for table in &spec.tables {
            let name = pool.strref(&table.name);
            let buffer = pool.strref(&table.buffer);
            push_u32(buf, name, order);
            push_u16(buf, table.flags, order);
            push_u16(buf, table.fields.len() as u16, order);
            push_u16(buf, table.indexes.len() as u16, order);
            push_u16(buf, 0, order);
            push_u32(buf, buffer, order);
            push_word(buf, 0, order, wide);
        }
    };

    emit_methods(&mut buf, &mut pool);
    emit_properties(&mut buf, &mut pool);
    if v12 {
        emit_events(&mut buf, &mut pool);
        emit_variables(&mut buf, &mut pool);
    } else {
        emit_variables(&mut buf, &mut pool);
        emit_events(&mut buf, &mut pool);
    }
    emit_tables(&mut buf, &mut pool);

    // Variable-stride section: method parameters, property accessors, event
    // parameters, then table fields and indexes.
    for method in &spec.methods {
        for param in &method.params {
            push_param(&mut buf, &mut pool, param, order, v12);
        }
    }
    for property in &spec.properties {
        let flags = AccessFlags::from_bits_retain(property.flags);
        if flags.contains(AccessFlags::HAS_GETTER) {
            push_u16(&mut buf, property.getter_flags as u16, order);
            push_u16(&mut buf, 0, order);
        }
        if flags.contains(AccessFlags::HAS_SETTER) {
            push_u16(&mut buf, property.setter_flags as u16, order);
            push_u16(&mut buf, 0, order);
        }
    }
    for event in &spec.events {
        for param in &event.params {
            push_param(&mut buf, &mut pool, param, order, v12);
        }
    }
    for table in &spec.tables {
        for field in &table.fields {
            let name = pool.strref(&field.name);
            let label = pool.strref(&field.label);
            let initial = pool.strref(&field.initial);
            push_u32(&mut buf, name, order);
            push_u16(&mut buf, field.flags, order);
            push_u16(&mut buf, field.data_type, order);
            push_i32(&mut buf, field.extent, order);
            push_u32(&mut buf, label, order);
            push_u32(&mut buf, initial, order);
        }
        for index in &table.indexes {
            let name = pool.strref(&index.name);
            push_u32(&mut buf, name, order);
            push_u16(&mut buf, index.flags, order);
            push_u16(&mut buf, index.components.len() as u16, order);
            for component in &index.components {
                push_u16(&mut buf, *component, order);
            }
        }
    }

    assert_eq!(buf.len(), fixed, "fixed-section size mismatch in builder");
    buf.extend_from_slice(&pool.data);
    buf
}

// ---------------------------------------------------------------------------
// Whole-file builder
// ---------------------------------------------------------------------------

pub struct Fixture {
    pub order: ByteOrder,
    pub version: u16,
    pub timestamp: u32,
    pub digest_offset: u16,
    pub signature: Vec<u8>,
    pub segment_table: Vec<u8>,
    pub body: Vec<u8>,
    pub type_block: Vec<u8>,
}

impl Fixture {
    /// A minimal well-formed procedure artifact.
    pub fn procedure(order: ByteOrder, version: u16) -> Fixture {
        Fixture {
            order,
            version,
            timestamp: 1_600_000_000,
            digest_offset: 0x20,
            signature: sig_block(&["MAIN main.p 0"]),
            segment_table: empty_segment_table(order),
            body: vec![0u8; 64],
            type_block: Vec::new(),
        }
    }

    /// A class artifact carrying the given type block.
    pub fn class(order: ByteOrder, version: u16, spec: &ClassSpec) -> Fixture {
        let mut fixture = Fixture::procedure(order, version);
        fixture.type_block = build_type_block(spec, order, version);
        fixture
    }

    pub fn encode(&self) -> Vec<u8> {
        let order = self.order;
        let mut header = [0u8; HEADER_SIZE];

        let magic_bytes = match order {
            ByteOrder::BigEndian => MAGIC_BE.to_be_bytes(),
            ByteOrder::LittleEndian => MAGIC_BE.to_le_bytes(),
        };
        header[0..4].copy_from_slice(&magic_bytes);

        put_u32(&mut header, 4, self.timestamp, order);
        put_u16(&mut header, 14, self.version, order);
        put_u16(&mut header, 0x1E, self.segment_table.len() as u16, order);
        put_u32(&mut header, 56, self.signature.len() as u32, order);
        put_u32(&mut header, 60, self.type_block.len() as u32, order);

        let mut data = Vec::new();
        if is_v12(self.version) {
            put_u16(&mut header, 22, self.digest_offset, order);
            data.extend_from_slice(&header);

            let mut tail = [0u8; V12_TAIL_SIZE];
            put_u32(&mut tail, 0xC, self.body.len() as u32, order);
            data.extend_from_slice(&tail);
        } else {
            put_u16(&mut header, 10, self.digest_offset, order);
            put_u32(&mut header, 64, self.body.len() as u32, order);
            data.extend_from_slice(&header);
        }

        data.extend_from_slice(&self.signature);
        data.extend_from_slice(&self.segment_table);
        data.extend_from_slice(&self.body);
        data.extend_from_slice(&self.type_block);
        data
    }
}
