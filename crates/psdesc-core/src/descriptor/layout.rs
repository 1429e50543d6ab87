pub const TAG_LEN: usize = 4;

pub const TAG_REFERENCE: &[u8; TAG_LEN] = b"obj ";
pub const TAG_DESCRIPTOR: &[u8; TAG_LEN] = b"Objc";
pub const TAG_GLOBAL_OBJECT: &[u8; TAG_LEN] = b"GlbO";
pub const TAG_LIST: &[u8; TAG_LEN] = b"VlLs";
pub const TAG_DOUBLE: &[u8; TAG_LEN] = b"doub";
pub const TAG_UNIT_FLOAT: &[u8; TAG_LEN] = b"UntF";
pub const TAG_TEXT: &[u8; TAG_LEN] = b"TEXT";
pub const TAG_ENUMERATED: &[u8; TAG_LEN] = b"enum";
pub const TAG_INTEGER: &[u8; TAG_LEN] = b"long";
pub const TAG_BOOLEAN: &[u8; TAG_LEN] = b"bool";
pub const TAG_CLASS: &[u8; TAG_LEN] = b"type";
pub const TAG_GLOBAL_CLASS: &[u8; TAG_LEN] = b"GlbC";
pub const TAG_ALIAS: &[u8; TAG_LEN] = b"alis";
pub const TAG_RAW_DATA: &[u8; TAG_LEN] = b"tdta";

pub const REF_PROPERTY: &[u8; TAG_LEN] = b"prop";
pub const REF_CLASS: &[u8; TAG_LEN] = b"Clss";
pub const REF_ENUM: &[u8; TAG_LEN] = b"Enmr";
pub const REF_OFFSET: &[u8; TAG_LEN] = b"rele";
pub const REF_IDENTIFIER: &[u8; TAG_LEN] = b"Idnt";
pub const REF_INDEX: &[u8; TAG_LEN] = b"indx";
pub const REF_NAME: &[u8; TAG_LEN] = b"name";

/// Version word written in front of descriptors embedded in image resources.
pub const DESCRIPTOR_VERSION: u32 = 16;

pub const DEFAULT_MAX_DEPTH: usize = 64;

// Smallest encodings of one list element: key length word, tag, 1-byte bool.
pub const MIN_KEYED_ENTITY_LEN: usize = 9;
pub const MIN_UNKEYED_ENTITY_LEN: usize = 5;
// Tag plus the 4-byte payload of `Idnt`/`indx`.
pub const MIN_REFERENCE_ITEM_LEN: usize = 8;

/// Upper bound on slots reserved up front for a counted sequence; longer
/// sequences grow as elements actually decode.
pub const MAX_PREALLOCATED_ITEMS: usize = 256;

/// A dynamic string with this length prefix is followed by a 4-byte tag.
pub const DYNAMIC_STRING_TAG_MARKER: u32 = 0;

pub const RECTANGLE_LEN: usize = 16;
