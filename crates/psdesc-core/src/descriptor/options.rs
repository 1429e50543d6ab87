use serde::{Deserialize, Serialize};

use super::layout;

/// How `VlLs` elements are laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListLayout {
    /// Elements carry a key, a tag and a value, like descriptor items.
    #[default]
    Keyed,
    /// Elements carry only a tag and a value; keys decode as empty strings.
    Unkeyed,
}

/// Limits and layout choices applied to a single decode call.
///
/// # Examples
/// ```
/// use psdesc_core::{DecodeOptions, ListLayout};
///
/// let options = DecodeOptions {
///     max_depth: 8,
///     max_bytes: Some(4096),
///     ..DecodeOptions::default()
/// };
/// assert_eq!(options.list_layout, ListLayout::Keyed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Maximum nesting of descriptors, lists and references; the root is level 1.
    pub max_depth: usize,
    /// Maximum number of bytes the decoder may consume.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_bytes: Option<usize>,
    #[serde(default)]
    pub list_layout: ListLayout,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: layout::DEFAULT_MAX_DEPTH,
            max_bytes: None,
            list_layout: ListLayout::Keyed,
        }
    }
}
