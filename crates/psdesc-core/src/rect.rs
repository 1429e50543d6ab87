use serde::{Deserialize, Serialize};

use crate::descriptor::{ByteCursor, DescriptorError};

/// Bounds stored as top, left, bottom, right (32-bit big-endian each).
///
/// # Examples
/// ```
/// use psdesc_core::{ByteCursor, Rectangle};
///
/// let mut bytes = Vec::new();
/// for value in [10i32, 20, 110, 220] {
///     bytes.extend_from_slice(&value.to_be_bytes());
/// }
/// let rect = Rectangle::decode(&mut ByteCursor::new(&bytes))?;
/// assert_eq!((rect.x(), rect.y()), (20, 10));
/// assert_eq!((rect.width(), rect.height()), (200, 100));
/// # Ok::<(), psdesc_core::DescriptorError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Rectangle {
    pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, DescriptorError> {
        let top = cursor.read_i32()?;
        let left = cursor.read_i32()?;
        let bottom = cursor.read_i32()?;
        let right = cursor.read_i32()?;
        Ok(Self {
            top,
            left,
            bottom,
            right,
        })
    }

    pub fn x(&self) -> i32 {
        self.left
    }

    pub fn y(&self) -> i32 {
        self.top
    }

    pub fn width(&self) -> i32 {
        self.right.wrapping_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.wrapping_sub(self.top)
    }
}
