// Big-endian writer for descriptor streams, shared by tests and the fixture
// generator. Only produces the subset of layouts the fixtures need.

#![allow(dead_code)]

#[derive(Debug, Default, Clone)]
pub struct StreamBuilder {
    bytes: Vec<u8>,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(mut self, value: u8) -> Self {
        self.bytes.push(value);
        self
    }

    pub fn u32(mut self, value: u32) -> Self {
        self.bytes.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn i32(mut self, value: i32) -> Self {
        self.bytes.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn f64(mut self, value: f64) -> Self {
        self.bytes.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// Code-unit count followed by UTF-16BE code units.
    pub fn unicode(self, text: &str) -> Self {
        let units: Vec<u16> = text.encode_utf16().collect();
        let mut out = self.u32(units.len() as u32);
        for unit in units {
            out.bytes.extend_from_slice(&unit.to_be_bytes());
        }
        out
    }

    /// Four-character ids use the zero-length tag form, others are length-prefixed.
    pub fn id(self, text: &str) -> Self {
        if text.len() == 4 {
            self.u32(0).raw(text.as_bytes())
        } else {
            self.u32(text.len() as u32).raw(text.as_bytes())
        }
    }

    pub fn header(self, name: &str, class_id: &str, items: u32) -> Self {
        self.unicode(name).id(class_id).u32(items)
    }

    /// Key and type tag of a keyed entity.
    pub fn key(self, key: &str, tag: &[u8; 4]) -> Self {
        self.id(key).raw(tag)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

/// One entity of every value kind, including nested descriptors and lists.
pub fn all_kinds() -> Vec<u8> {
    StreamBuilder::new()
        .header("Effects", "null", 14)
        .key("Scl ", b"UntF")
        .raw(b"#Prc")
        .f64(100.0)
        .key("Opct", b"long")
        .i32(75)
        .key("Hrzn", b"doub")
        .f64(1.5)
        .key("Nm  ", b"TEXT")
        .unicode("Drop Shadow")
        .key("Md  ", b"enum")
        .id("BlnM")
        .id("Mltp")
        .key("enab", b"bool")
        .u8(1)
        .key("Clr ", b"Objc")
        .header("", "RGBC", 3)
        .key("Rd  ", b"doub")
        .f64(255.0)
        .key("Grn ", b"doub")
        .f64(128.5)
        .key("Bl  ", b"doub")
        .f64(0.0)
        .key("klas", b"type")
        .unicode("Layer")
        .id("Lyr ")
        .key("glob", b"GlbC")
        .unicode("")
        .id("Grdn")
        .key("Pts ", b"VlLs")
        .u32(2)
        .key("Hrzn", b"UntF")
        .raw(b"#Pxl")
        .f64(10.0)
        .key("Vrtc", b"UntF")
        .raw(b"#Pxl")
        .f64(20.0)
        .key("null", b"obj ")
        .u32(2)
        .raw(b"prop")
        .unicode("")
        .id("Lyr ")
        .id("Opct")
        .raw(b"Enmr")
        .unicode("")
        .id("Lyr ")
        .id("Ordn")
        .id("Trgt")
        .key("alis", b"alis")
        .u32(4)
        .raw(&[0xde, 0xad, 0xbe, 0xef])
        .key("data", b"tdta")
        .u32(6)
        .raw(b"rawbin")
        .key("grad", b"GlbO")
        .header("Gradient", "Grdn", 1)
        .key("Nm  ", b"TEXT")
        .unicode("Custom")
        .finish()
}

/// A list holding a list holding the integer 42.
pub fn nested_list() -> Vec<u8> {
    StreamBuilder::new()
        .header("", "null", 1)
        .key("outr", b"VlLs")
        .u32(1)
        .key("innr", b"VlLs")
        .u32(1)
        .key("valu", b"long")
        .i32(42)
        .finish()
}

/// A select-style descriptor whose reference uses every reference kind.
pub fn references() -> Vec<u8> {
    StreamBuilder::new()
        .header("", "slct", 2)
        .key("null", b"obj ")
        .u32(7)
        .raw(b"prop")
        .unicode("Layer")
        .id("Lyr ")
        .id("Nm  ")
        .raw(b"Clss")
        .unicode("")
        .id("Chnl")
        .raw(b"Enmr")
        .unicode("")
        .id("Lyr ")
        .id("Ordn")
        .id("Trgt")
        .raw(b"rele")
        .unicode("")
        .id("Lyr ")
        .i32(-2)
        .raw(b"Idnt")
        .i32(17)
        .raw(b"indx")
        .i32(3)
        .raw(b"name")
        .unicode("")
        .id("Lyr ")
        .unicode("Background")
        .key("MkVs", b"bool")
        .u8(0)
        .finish()
}
