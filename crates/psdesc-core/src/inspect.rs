use std::fs;
use std::path::Path;
use std::time::SystemTime;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::descriptor::{
    ByteCursor, DecodeOptions, DescriptorError, read_descriptor, read_versioned_descriptor,
};
use crate::{Inspection, make_inspection};

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),
    #[error("offset {offset} is beyond the end of the input ({len} bytes)")]
    OffsetOutOfRange { offset: u64, len: u64 },
}

/// Where the descriptor starts and how to decode it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectOptions {
    /// Byte offset of the descriptor (or its version word) in the input.
    pub offset: u64,
    /// Expect a 32-bit version word (16) before the descriptor.
    pub versioned: bool,
    pub decode: DecodeOptions,
}

pub fn inspect_file(path: &Path, options: &InspectOptions) -> Result<Inspection, InspectError> {
    let data = fs::read(path)?;
    let mut inspection = inspect_bytes(&path.display().to_string(), &data, options)?;
    inspection.input.modified = fs::metadata(path)?
        .modified()
        .ok()
        .and_then(system_time_to_rfc3339);
    Ok(inspection)
}

/// Decode the descriptor found in `data` and wrap it in a report.
///
/// Error offsets are absolute positions in `data`. The byte limit in
/// `options.decode` counts from `options.offset`.
pub fn inspect_bytes(
    label: &str,
    data: &[u8],
    options: &InspectOptions,
) -> Result<Inspection, InspectError> {
    let len = data.len() as u64;
    let offset = usize::try_from(options.offset)
        .ok()
        .filter(|offset| *offset <= data.len())
        .ok_or(InspectError::OffsetOutOfRange {
            offset: options.offset,
            len,
        })?;

    let limit = options
        .decode
        .max_bytes
        .map(|max| offset.saturating_add(max));
    let mut cursor = ByteCursor::new(data).with_limit(limit);
    cursor.skip(offset)?;

    debug!("inspecting {label} ({len} bytes) from offset {offset}");
    let descriptor = if options.versioned {
        read_versioned_descriptor(&mut cursor, &options.decode)?
    } else {
        read_descriptor(&mut cursor, &options.decode)?
    };
    let consumed = (cursor.position() - offset) as u64;

    let mut inspection = make_inspection(label, len, descriptor);
    inspection.input.offset = options.offset;
    inspection.input.versioned = options.versioned;
    inspection.summary.bytes_consumed = consumed;
    Ok(inspection)
}

fn system_time_to_rfc3339(time: SystemTime) -> Option<String> {
    OffsetDateTime::from(time).format(&Rfc3339).ok()
}
