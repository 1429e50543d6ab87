//! psdesc core library for decoding Photoshop-style descriptor structures.
//!
//! Descriptors are the self-describing key/value containers image formats
//! use to embed structured metadata (layer effects, adjustment settings,
//! channel attributes). This crate decodes them into a typed tree and
//! renders that tree as indented text for inspection.
//!
//! Data flows one way: bytes -> `descriptor` (reader/parser) -> tree ->
//! `render` -> text. File access lives in `inspect`; the decoder itself is
//! pure and never panics on malformed input.
//!
//! Invariants:
//! - Item order in the tree is stream order; rendering preserves it.
//! - An entity's type tag always agrees with the shape of its value.
//! - Any truncated read, unknown tag or exceeded limit aborts the decode.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use psdesc_core::{InspectOptions, inspect_file, render_descriptor};
//!
//! let inspection = inspect_file(Path::new("effects.bin"), &InspectOptions::default())?;
//! print!("{}", render_descriptor(&inspection.descriptor, 0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod descriptor;
mod inspect;
mod rect;
mod render;

pub use descriptor::{
    ByteCursor, DecodeOptions, Descriptor, DescriptorError, Entity, FourCc, ListLayout, OsType,
    ReferenceItem, TagMismatch, Value, decode_descriptor, decode_descriptor_with,
    decode_versioned_descriptor, read_descriptor, read_versioned_descriptor,
};
pub use inspect::{InspectError, InspectOptions, inspect_bytes, inspect_file};
pub use rect::Rectangle;
pub use render::{TextWriter, render_descriptor};

/// Current inspection report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Decoded descriptor together with input metadata and summary figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inspection {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    pub input: InputInfo,
    pub summary: DescriptorSummary,
    /// The full decoded tree.
    pub descriptor: Descriptor,
}

/// Tool metadata embedded in reports.
///
/// # Examples
/// ```
/// use psdesc_core::ToolInfo;
///
/// let tool = ToolInfo {
///     name: "psdesc".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(tool.name, "psdesc");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the inspector.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
    /// Offset the descriptor was read from.
    pub offset: u64,
    /// Whether a version word preceded the descriptor.
    pub versioned: bool,
    /// RFC3339 modification time of the input file, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

/// Headline figures for a decoded descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptorSummary {
    pub name: String,
    pub class_id: String,
    /// Top-level item count.
    pub items: usize,
    /// Entities and reference items across the whole tree.
    pub entities_total: usize,
    /// Deepest nesting level (the root is level 1).
    pub depth: usize,
    /// Bytes consumed by the descriptor, including any version word.
    pub bytes_consumed: u64,
}

/// Wrap a decoded descriptor in a report with summary fields filled.
///
/// # Examples
/// ```
/// use psdesc_core::{Descriptor, make_inspection};
///
/// let descriptor = Descriptor {
///     name: String::new(),
///     class_id: "null".to_string(),
///     items: Vec::new(),
/// };
/// let inspection = make_inspection("effects.bin", 16, descriptor);
/// assert_eq!(inspection.report_version, psdesc_core::REPORT_VERSION);
/// assert_eq!(inspection.summary.depth, 1);
/// ```
pub fn make_inspection(input_path: &str, input_bytes: u64, descriptor: Descriptor) -> Inspection {
    Inspection {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "psdesc".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
            offset: 0,
            versioned: false,
            modified: None,
        },
        summary: DescriptorSummary {
            name: descriptor.name.clone(),
            class_id: descriptor.class_id.clone(),
            items: descriptor.len(),
            entities_total: descriptor.entity_count(),
            depth: descriptor.depth(),
            bytes_consumed: 0,
        },
        descriptor,
    }
}
