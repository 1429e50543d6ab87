use super::error::DescriptorError;
use super::layout;

/// Forward-only big-endian cursor over a descriptor byte stream.
///
/// Every read either consumes exactly the bytes it needs or fails without
/// moving the cursor. An optional byte limit caps how far the cursor may
/// advance, independently of how many bytes the buffer holds.
///
/// # Examples
/// ```
/// use psdesc_core::ByteCursor;
///
/// let bytes = [0x00, 0x00, 0x00, 0x2a, 0x01];
/// let mut cursor = ByteCursor::new(&bytes);
/// assert_eq!(cursor.read_i32().unwrap(), 42);
/// assert_eq!(cursor.read_u8().unwrap(), 1);
/// assert!(cursor.read_u8().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
    limit: Option<usize>,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            limit: None,
        }
    }

    /// Cap the total number of bytes this cursor may consume.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], DescriptorError> {
        let end = self
            .pos
            .checked_add(needed)
            .ok_or_else(|| self.truncated(needed))?;
        if let Some(limit) = self.limit {
            if end > limit {
                return Err(DescriptorError::ByteLimitExceeded {
                    offset: self.pos,
                    needed,
                    limit,
                });
            }
        }
        let data = self.data;
        let bytes = data
            .get(self.pos..end)
            .ok_or_else(|| self.truncated(needed))?;
        self.pos = end;
        Ok(bytes)
    }

    fn truncated(&self, needed: usize) -> DescriptorError {
        DescriptorError::StreamTruncated {
            offset: self.pos,
            needed,
            remaining: self.remaining(),
        }
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DescriptorError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, DescriptorError> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, DescriptorError> {
        Ok(u32::from_be_bytes(self.take_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, DescriptorError> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, DescriptorError> {
        Ok(f64::from_be_bytes(self.take_array()?))
    }

    pub fn read_tag(&mut self) -> Result<[u8; layout::TAG_LEN], DescriptorError> {
        self.take_array()
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DescriptorError> {
        self.take(len)
    }

    /// Read `len` raw bytes as text; invalid UTF-8 is replaced.
    pub fn read_string(&mut self, len: usize) -> Result<String, DescriptorError> {
        let bytes = self.take(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Read a code-unit count followed by that many UTF-16BE code units.
    ///
    /// Trailing NUL terminators are dropped.
    pub fn read_unicode_string(&mut self) -> Result<String, DescriptorError> {
        let start = self.pos;
        let units = self.read_u32()? as usize;
        let byte_len = match units.checked_mul(2) {
            Some(len) => len,
            None => {
                self.pos = start;
                return Err(self.truncated(usize::MAX));
            }
        };
        let bytes = match self.take(byte_len) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.pos = start;
                return Err(err);
            }
        };
        let code_units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        let text = String::from_utf16_lossy(&code_units);
        Ok(text.trim_end_matches('\0').to_string())
    }

    /// Read a length-prefixed ASCII string, or a 4-byte tag when the length is zero.
    pub fn read_dynamic_string(&mut self) -> Result<String, DescriptorError> {
        let start = self.pos;
        let len = self.read_u32()?;
        let len = if len == layout::DYNAMIC_STRING_TAG_MARKER {
            layout::TAG_LEN
        } else {
            len as usize
        };
        self.read_string(len).inspect_err(|_| self.pos = start)
    }

    pub fn skip(&mut self, len: usize) -> Result<(), DescriptorError> {
        self.take(len).map(|_| ())
    }
}
