use log::{debug, trace, warn};

use super::error::DescriptorError;
use super::layout;
use super::model::{Descriptor, Entity, FourCc, OsType, ReferenceItem, Value};
use super::options::{DecodeOptions, ListLayout};
use super::reader::ByteCursor;

/// Decode a descriptor at the start of `data` with default options.
///
/// Trailing bytes after the descriptor are ignored.
///
/// # Examples
/// ```
/// use psdesc_core::decode_descriptor;
///
/// // empty name, class id given as the 4-byte tag "null", no items
/// let mut bytes = vec![0, 0, 0, 0, 0, 0, 0, 0];
/// bytes.extend_from_slice(b"null");
/// bytes.extend_from_slice(&[0, 0, 0, 0]);
///
/// let descriptor = decode_descriptor(&bytes)?;
/// assert_eq!(descriptor.class_id, "null");
/// assert!(descriptor.is_empty());
/// # Ok::<(), psdesc_core::DescriptorError>(())
/// ```
///
/// # Errors
/// Returns `DescriptorError` when the stream is truncated or malformed.
pub fn decode_descriptor(data: &[u8]) -> Result<Descriptor, DescriptorError> {
    decode_descriptor_with(data, &DecodeOptions::default())
}

pub fn decode_descriptor_with(
    data: &[u8],
    options: &DecodeOptions,
) -> Result<Descriptor, DescriptorError> {
    let mut cursor = ByteCursor::new(data).with_limit(options.max_bytes);
    read_descriptor(&mut cursor, options)
}

/// Decode a descriptor preceded by its 32-bit version word (must be 16).
pub fn decode_versioned_descriptor(
    data: &[u8],
    options: &DecodeOptions,
) -> Result<Descriptor, DescriptorError> {
    let mut cursor = ByteCursor::new(data).with_limit(options.max_bytes);
    read_versioned_descriptor(&mut cursor, options)
}

pub fn read_versioned_descriptor(
    cursor: &mut ByteCursor<'_>,
    options: &DecodeOptions,
) -> Result<Descriptor, DescriptorError> {
    let version = cursor.read_u32()?;
    if version != layout::DESCRIPTOR_VERSION {
        return Err(DescriptorError::UnsupportedVersion { version });
    }
    read_descriptor(cursor, options)
}

/// Decode one descriptor from the cursor's current position.
///
/// On error the cursor position is unspecified; callers should discard it.
pub fn read_descriptor(
    cursor: &mut ByteCursor<'_>,
    options: &DecodeOptions,
) -> Result<Descriptor, DescriptorError> {
    let start = cursor.position();
    debug!("decoding descriptor at offset {start}");
    let mut decoder = Decoder { cursor, options };
    match decoder.descriptor(1) {
        Ok(descriptor) => {
            debug!(
                "decoded descriptor '{}' with {} items ({} bytes)",
                descriptor.class_id,
                descriptor.len(),
                decoder.cursor.position() - start
            );
            Ok(descriptor)
        }
        Err(err) => {
            warn!("descriptor decode failed: {err}");
            Err(err)
        }
    }
}

struct Decoder<'c, 'a> {
    cursor: &'c mut ByteCursor<'a>,
    options: &'c DecodeOptions,
}

impl Decoder<'_, '_> {
    fn enter(&self, depth: usize) -> Result<(), DescriptorError> {
        if depth > self.options.max_depth {
            return Err(DescriptorError::RecursionLimitExceeded {
                depth,
                limit: self.options.max_depth,
                offset: self.cursor.position(),
            });
        }
        Ok(())
    }

    // Counts are untrusted: never reserve more elements than the remaining
    // bytes could encode, nor more than a fixed ceiling.
    fn capacity_for(&self, count: usize, min_len: usize) -> usize {
        count
            .min(self.cursor.remaining() / min_len)
            .min(layout::MAX_PREALLOCATED_ITEMS)
    }

    fn descriptor(&mut self, depth: usize) -> Result<Descriptor, DescriptorError> {
        self.enter(depth)?;
        let name = self.cursor.read_unicode_string()?;
        let class_id = self.cursor.read_dynamic_string()?;
        trace!("descriptor '{class_id}' at depth {depth}");
        let items = self.entity_list(depth, ListLayout::Keyed)?;
        Ok(Descriptor {
            name,
            class_id,
            items,
        })
    }

    fn entity_list(
        &mut self,
        depth: usize,
        list_layout: ListLayout,
    ) -> Result<Vec<Entity>, DescriptorError> {
        let count = self.cursor.read_u32()? as usize;
        let min_len = match list_layout {
            ListLayout::Keyed => layout::MIN_KEYED_ENTITY_LEN,
            ListLayout::Unkeyed => layout::MIN_UNKEYED_ENTITY_LEN,
        };
        let mut items = Vec::with_capacity(self.capacity_for(count, min_len));
        for _ in 0..count {
            let key = match list_layout {
                ListLayout::Keyed => self.cursor.read_dynamic_string()?,
                ListLayout::Unkeyed => String::new(),
            };
            let offset = self.cursor.position();
            let raw = self.cursor.read_tag()?;
            let tag = OsType::from_tag(&raw).ok_or_else(|| DescriptorError::UnknownTypeTag {
                tag: FourCc(raw),
                key: key.clone(),
                offset,
            })?;
            let value = self.value(&key, tag, depth)?;
            items.push(Entity::decoded(key, tag, value));
        }
        Ok(items)
    }

    fn value(&mut self, key: &str, tag: OsType, depth: usize) -> Result<Value, DescriptorError> {
        let value = match tag {
            OsType::Reference => {
                self.enter(depth + 1)?;
                trace!("reference '{key}' at depth {}", depth + 1);
                Value::Reference(self.reference(key)?)
            }
            OsType::Descriptor | OsType::GlobalObject => {
                Value::Descriptor(Box::new(self.descriptor(depth + 1)?))
            }
            OsType::List => {
                self.enter(depth + 1)?;
                trace!("list '{key}' at depth {}", depth + 1);
                Value::List(self.entity_list(depth + 1, self.options.list_layout)?)
            }
            OsType::Double => Value::Double(self.cursor.read_f64()?),
            OsType::UnitFloat => self.unit_float()?,
            OsType::Text => Value::Text(self.cursor.read_unicode_string()?),
            OsType::Enumerated => self.enumerated()?,
            OsType::Integer => Value::Integer(self.cursor.read_i32()?),
            OsType::Boolean => Value::Boolean(self.cursor.read_u8()? == 1),
            OsType::Class | OsType::GlobalClass => self.class()?,
            OsType::Alias | OsType::RawData => {
                let len = self.cursor.read_u32()? as usize;
                Value::Opaque(self.cursor.read_bytes(len)?.to_vec())
            }
        };
        Ok(value)
    }

    fn reference(&mut self, key: &str) -> Result<Vec<ReferenceItem>, DescriptorError> {
        let count = self.cursor.read_u32()? as usize;
        let mut items =
            Vec::with_capacity(self.capacity_for(count, layout::MIN_REFERENCE_ITEM_LEN));
        for _ in 0..count {
            let offset = self.cursor.position();
            let raw = self.cursor.read_tag()?;
            let item = match &raw {
                layout::REF_PROPERTY => self.property()?,
                layout::REF_CLASS => {
                    let name = self.cursor.read_unicode_string()?;
                    let class_id = self.cursor.read_dynamic_string()?;
                    ReferenceItem::Class { name, class_id }
                }
                layout::REF_ENUM => self.enum_ref()?,
                layout::REF_OFFSET => self.offset()?,
                layout::REF_IDENTIFIER => ReferenceItem::Identifier {
                    value: self.cursor.read_i32()?,
                },
                layout::REF_INDEX => ReferenceItem::Index {
                    value: self.cursor.read_i32()?,
                },
                layout::REF_NAME => self.name_ref()?,
                _ => {
                    return Err(DescriptorError::UnknownTypeTag {
                        tag: FourCc(raw),
                        key: key.to_string(),
                        offset,
                    });
                }
            };
            items.push(item);
        }
        Ok(items)
    }

    fn unit_float(&mut self) -> Result<Value, DescriptorError> {
        let unit = self.cursor.read_string(layout::TAG_LEN)?;
        let value = self.cursor.read_f64()?;
        Ok(Value::UnitFloat { unit, value })
    }

    fn class(&mut self) -> Result<Value, DescriptorError> {
        let name = self.cursor.read_unicode_string()?;
        let class_id = self.cursor.read_dynamic_string()?;
        Ok(Value::Class { name, class_id })
    }

    fn enumerated(&mut self) -> Result<Value, DescriptorError> {
        let type_id = self.cursor.read_dynamic_string()?;
        let enum_id = self.cursor.read_dynamic_string()?;
        Ok(Value::Enum { type_id, enum_id })
    }

    fn property(&mut self) -> Result<ReferenceItem, DescriptorError> {
        let name = self.cursor.read_unicode_string()?;
        let class_id = self.cursor.read_dynamic_string()?;
        let key = self.cursor.read_dynamic_string()?;
        Ok(ReferenceItem::Property {
            name,
            class_id,
            key,
        })
    }

    fn enum_ref(&mut self) -> Result<ReferenceItem, DescriptorError> {
        let name = self.cursor.read_unicode_string()?;
        let class_id = self.cursor.read_dynamic_string()?;
        let type_id = self.cursor.read_dynamic_string()?;
        let enum_id = self.cursor.read_dynamic_string()?;
        Ok(ReferenceItem::EnumRef {
            name,
            class_id,
            type_id,
            enum_id,
        })
    }

    fn offset(&mut self) -> Result<ReferenceItem, DescriptorError> {
        let name = self.cursor.read_unicode_string()?;
        let class_id = self.cursor.read_dynamic_string()?;
        let value = self.cursor.read_i32()?;
        Ok(ReferenceItem::Offset {
            name,
            class_id,
            value,
        })
    }

    fn name_ref(&mut self) -> Result<ReferenceItem, DescriptorError> {
        let name = self.cursor.read_unicode_string()?;
        let class_id = self.cursor.read_dynamic_string()?;
        let value = self.cursor.read_unicode_string()?;
        Ok(ReferenceItem::Name {
            name,
            class_id,
            value,
        })
    }
}
