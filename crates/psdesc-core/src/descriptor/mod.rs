//! Descriptor decoding.
//!
//! Descriptors are recursive key/value containers tagged with four-byte
//! OSType codes. Decoding dispatches on the tag of each entity and recurses
//! into nested descriptors, value lists and references.
//!
//! Layering follows the other binary decoders in this workspace:
//! - `layout`: tag vocabulary and constants
//! - `reader`: bounds-checked big-endian cursor
//! - `parser`: the recursive decoder (no direct byte indexing)
//! - `model`: the typed tree produced by the parser
//! - `error`: typed, position-carrying failures
//!
//! Unknown tags, truncated input and exceeded limits all abort the whole
//! decode; no partial tree is ever returned.

pub mod error;
pub mod layout;
pub mod model;
pub mod options;
pub mod parser;
pub mod reader;

pub use error::DescriptorError;
pub use model::{Descriptor, Entity, FourCc, OsType, ReferenceItem, TagMismatch, Value};
pub use options::{DecodeOptions, ListLayout};
pub use parser::{
    decode_descriptor, decode_descriptor_with, decode_versioned_descriptor, read_descriptor,
    read_versioned_descriptor,
};
pub use reader::ByteCursor;
