//! Text rendering of decoded descriptor trees.
//!
//! Output is a debugging aid: one element per line, nested bodies indented
//! below their headers, items in decode order. Rendering the same tree
//! always yields the same bytes, so the output can back golden files.

mod writer;

use std::fmt;

use crate::descriptor::{Descriptor, Entity, ReferenceItem, Value};

pub use writer::TextWriter;

/// Render `descriptor` with its header at indentation level `indent`.
///
/// # Examples
/// ```
/// use psdesc_core::{Descriptor, Entity, OsType, Value, render_descriptor};
///
/// let descriptor = Descriptor {
///     name: String::new(),
///     class_id: "null".to_string(),
///     items: vec![Entity::new("Opct", OsType::Integer, Value::Integer(100)).unwrap()],
/// };
/// assert_eq!(
///     render_descriptor(&descriptor, 0),
///     "Descriptor [1]: null\n{\n  [long] Opct: 100\n}\n"
/// );
/// ```
pub fn render_descriptor(descriptor: &Descriptor, indent: usize) -> String {
    let mut writer = TextWriter::new();
    write_descriptor(&mut writer, descriptor, indent);
    writer.finish()
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_descriptor(self, 0))
    }
}

fn write_descriptor(writer: &mut TextWriter, descriptor: &Descriptor, indent: usize) {
    writer.line(
        indent,
        format_args!("Descriptor [{}]: {}", descriptor.len(), descriptor.class_id),
    );
    writer.line(indent, format_args!("{{"));
    for item in descriptor.iter() {
        write_entity(writer, item, indent + 1);
    }
    writer.line(indent, format_args!("}}"));
}

fn write_entity(writer: &mut TextWriter, entity: &Entity, level: usize) {
    let tag = entity.tag();
    let key = entity.key();
    match entity.value() {
        Value::List(items) => {
            writer.line(level, format_args!("[{tag}] {key}:"));
            writer.line(level + 1, format_args!("List [{}]", items.len()));
            writer.line(level + 1, format_args!("{{"));
            for item in items {
                write_entity(writer, item, level + 2);
            }
            writer.line(level + 1, format_args!("}}"));
        }
        Value::Reference(items) => {
            writer.line(level, format_args!("[{tag}] {key}:"));
            writer.line(level + 1, format_args!("Reference [{}]", items.len()));
            writer.line(level + 1, format_args!("{{"));
            for item in items {
                writer.line(
                    level + 2,
                    format_args!("[{}] {}", item.tag_str(), ReferenceSummary(item)),
                );
            }
            writer.line(level + 1, format_args!("}}"));
        }
        Value::Descriptor(inner) => {
            writer.line(level, format_args!("[{tag}] {key}:"));
            write_descriptor(writer, inner, level + 1);
        }
        Value::Double(value) => writer.line(level, format_args!("[{tag}] {key}: {value}")),
        Value::Integer(value) => writer.line(level, format_args!("[{tag}] {key}: {value}")),
        Value::Boolean(value) => writer.line(level, format_args!("[{tag}] {key}: {value}")),
        Value::Text(text) => writer.line(level, format_args!("[{tag}] {key}: {text}")),
        Value::UnitFloat { unit, value } => writer.line(
            level,
            format_args!("[{tag}] {key}: [Unit: {unit}, Value: {value}]"),
        ),
        Value::Enum { type_id, enum_id } => writer.line(
            level,
            format_args!("[{tag}] {key}: [Type: {type_id}, Enum: {enum_id}]"),
        ),
        Value::Class { name, class_id } => writer.line(
            level,
            format_args!("[{tag}] {key}: [Name: {name}, Class: {class_id}]"),
        ),
        Value::Opaque(bytes) => {
            writer.line(level, format_args!("[{tag}] {key}: <{} bytes>", bytes.len()))
        }
    }
}

struct ReferenceSummary<'a>(&'a ReferenceItem);

impl fmt::Display for ReferenceSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ReferenceItem::Property {
                name,
                class_id,
                key,
            } => write!(f, "[Name: {name}, Class: {class_id}, Key: {key}]"),
            ReferenceItem::Class { name, class_id } => {
                write!(f, "[Name: {name}, Class: {class_id}]")
            }
            ReferenceItem::EnumRef {
                name,
                class_id,
                type_id,
                enum_id,
            } => write!(
                f,
                "[Name: {name}, Class: {class_id}, Type: {type_id}, Enum: {enum_id}]"
            ),
            ReferenceItem::Offset {
                name,
                class_id,
                value,
            } => write!(f, "[Name: {name}, Class: {class_id}, Value: {value}]"),
            ReferenceItem::Identifier { value } => write!(f, "[Identifier: {value}]"),
            ReferenceItem::Index { value } => write!(f, "[Index: {value}]"),
            ReferenceItem::Name {
                name,
                class_id,
                value,
            } => write!(f, "[Name: {name}, Class: {class_id}, Value: {value}]"),
        }
    }
}
