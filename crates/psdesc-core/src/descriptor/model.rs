//! Typed descriptor tree.
//!
//! A decoded [`Descriptor`] is immutable: it is built once by the parser and
//! only read afterwards. Item order is the stream order.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::layout;

/// A raw four-byte OSType tag, kept exactly as read.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCc(pub [u8; layout::TAG_LEN]);

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{:02x}", byte)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCc(\"{}\")", self)
    }
}

/// Closed vocabulary of entity type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsType {
    #[serde(rename = "obj ")]
    Reference,
    #[serde(rename = "Objc")]
    Descriptor,
    #[serde(rename = "GlbO")]
    GlobalObject,
    #[serde(rename = "VlLs")]
    List,
    #[serde(rename = "doub")]
    Double,
    #[serde(rename = "UntF")]
    UnitFloat,
    #[serde(rename = "TEXT")]
    Text,
    #[serde(rename = "enum")]
    Enumerated,
    #[serde(rename = "long")]
    Integer,
    #[serde(rename = "bool")]
    Boolean,
    #[serde(rename = "type")]
    Class,
    #[serde(rename = "GlbC")]
    GlobalClass,
    #[serde(rename = "alis")]
    Alias,
    #[serde(rename = "tdta")]
    RawData,
}

impl OsType {
    pub const ALL: [OsType; 14] = [
        OsType::Reference,
        OsType::Descriptor,
        OsType::GlobalObject,
        OsType::List,
        OsType::Double,
        OsType::UnitFloat,
        OsType::Text,
        OsType::Enumerated,
        OsType::Integer,
        OsType::Boolean,
        OsType::Class,
        OsType::GlobalClass,
        OsType::Alias,
        OsType::RawData,
    ];

    pub fn from_tag(tag: &[u8; layout::TAG_LEN]) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.tag() == tag)
    }

    pub fn tag(self) -> &'static [u8; layout::TAG_LEN] {
        match self {
            OsType::Reference => layout::TAG_REFERENCE,
            OsType::Descriptor => layout::TAG_DESCRIPTOR,
            OsType::GlobalObject => layout::TAG_GLOBAL_OBJECT,
            OsType::List => layout::TAG_LIST,
            OsType::Double => layout::TAG_DOUBLE,
            OsType::UnitFloat => layout::TAG_UNIT_FLOAT,
            OsType::Text => layout::TAG_TEXT,
            OsType::Enumerated => layout::TAG_ENUMERATED,
            OsType::Integer => layout::TAG_INTEGER,
            OsType::Boolean => layout::TAG_BOOLEAN,
            OsType::Class => layout::TAG_CLASS,
            OsType::GlobalClass => layout::TAG_GLOBAL_CLASS,
            OsType::Alias => layout::TAG_ALIAS,
            OsType::RawData => layout::TAG_RAW_DATA,
        }
    }

    pub fn as_str(self) -> &'static str {
        // Every tag in the vocabulary is printable ASCII.
        std::str::from_utf8(self.tag()).unwrap_or("????")
    }

    /// Whether `value` has the shape this tag decodes to.
    pub fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (OsType::Reference, Value::Reference(_))
                | (OsType::Descriptor | OsType::GlobalObject, Value::Descriptor(_))
                | (OsType::List, Value::List(_))
                | (OsType::Double, Value::Double(_))
                | (OsType::UnitFloat, Value::UnitFloat { .. })
                | (OsType::Text, Value::Text(_))
                | (OsType::Enumerated, Value::Enum { .. })
                | (OsType::Integer, Value::Integer(_))
                | (OsType::Boolean, Value::Boolean(_))
                | (OsType::Class | OsType::GlobalClass, Value::Class { .. })
                | (OsType::Alias | OsType::RawData, Value::Opaque(_))
        )
    }
}

impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named, classed, ordered collection of entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    pub name: String,
    pub class_id: String,
    pub items: Vec<Entity>,
}

impl Descriptor {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First item stored under `key`, in stream order.
    pub fn get(&self, key: &str) -> Option<&Entity> {
        self.items.iter().find(|item| item.key() == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.items.iter()
    }

    /// Total number of entities and reference items in the tree.
    pub fn entity_count(&self) -> usize {
        count_entities(&self.items)
    }

    /// Deepest nesting level; a flat descriptor has depth 1.
    pub fn depth(&self) -> usize {
        1 + entities_depth(&self.items)
    }
}

fn count_entities(items: &[Entity]) -> usize {
    items
        .iter()
        .map(|item| {
            1 + match item.value() {
                Value::Descriptor(inner) => inner.entity_count(),
                Value::List(list) => count_entities(list),
                Value::Reference(refs) => refs.len(),
                _ => 0,
            }
        })
        .sum()
}

fn entities_depth(items: &[Entity]) -> usize {
    items
        .iter()
        .map(|item| match item.value() {
            Value::Descriptor(inner) => inner.depth(),
            Value::List(list) => 1 + entities_depth(list),
            Value::Reference(_) => 1,
            _ => 0,
        })
        .max()
        .unwrap_or(0)
}

/// A keyed value whose tag always agrees with the value's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EntityRepr")]
pub struct Entity {
    key: String,
    #[serde(rename = "type")]
    tag: OsType,
    value: Value,
}

impl Entity {
    /// Build an entity, or `None` when `tag` cannot carry `value`.
    ///
    /// # Examples
    /// ```
    /// use psdesc_core::{Entity, OsType, Value};
    ///
    /// assert!(Entity::new("Opct", OsType::Integer, Value::Integer(100)).is_some());
    /// assert!(Entity::new("Opct", OsType::Text, Value::Integer(100)).is_none());
    /// ```
    pub fn new(key: impl Into<String>, tag: OsType, value: Value) -> Option<Self> {
        if !tag.accepts(&value) {
            return None;
        }
        Some(Self {
            key: key.into(),
            tag,
            value,
        })
    }

    pub(crate) fn decoded(key: String, tag: OsType, value: Value) -> Self {
        debug_assert!(tag.accepts(&value), "decoder produced {tag} with wrong shape");
        Self { key, tag, value }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn tag(&self) -> OsType {
        self.tag
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

#[derive(Deserialize)]
struct EntityRepr {
    key: String,
    #[serde(rename = "type")]
    tag: OsType,
    value: Value,
}

#[derive(Debug, Error)]
#[error("entity type '{tag}' does not match its value")]
pub struct TagMismatch {
    tag: OsType,
}

impl TryFrom<EntityRepr> for Entity {
    type Error = TagMismatch;

    fn try_from(repr: EntityRepr) -> Result<Self, Self::Error> {
        let tag = repr.tag;
        Entity::new(repr.key, repr.tag, repr.value).ok_or(TagMismatch { tag })
    }
}

/// Decoded entity payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    Reference(Vec<ReferenceItem>),
    Descriptor(Box<Descriptor>),
    List(Vec<Entity>),
    Double(f64),
    UnitFloat { unit: String, value: f64 },
    Text(String),
    Enum { type_id: String, enum_id: String },
    Integer(i32),
    Boolean(bool),
    Class { name: String, class_id: String },
    /// Alias or raw-data payload, kept uninterpreted.
    Opaque(Vec<u8>),
}

/// One step of an indirect object reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferenceItem {
    Property {
        name: String,
        class_id: String,
        key: String,
    },
    Class {
        name: String,
        class_id: String,
    },
    EnumRef {
        name: String,
        class_id: String,
        type_id: String,
        enum_id: String,
    },
    Offset {
        name: String,
        class_id: String,
        value: i32,
    },
    Identifier {
        value: i32,
    },
    Index {
        value: i32,
    },
    Name {
        name: String,
        class_id: String,
        value: String,
    },
}

impl ReferenceItem {
    pub fn tag(&self) -> &'static [u8; layout::TAG_LEN] {
        match self {
            ReferenceItem::Property { .. } => layout::REF_PROPERTY,
            ReferenceItem::Class { .. } => layout::REF_CLASS,
            ReferenceItem::EnumRef { .. } => layout::REF_ENUM,
            ReferenceItem::Offset { .. } => layout::REF_OFFSET,
            ReferenceItem::Identifier { .. } => layout::REF_IDENTIFIER,
            ReferenceItem::Index { .. } => layout::REF_INDEX,
            ReferenceItem::Name { .. } => layout::REF_NAME,
        }
    }

    pub fn tag_str(&self) -> &'static str {
        std::str::from_utf8(self.tag()).unwrap_or("????")
    }
}
