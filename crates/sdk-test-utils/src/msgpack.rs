//! Chainable MessagePack writer for building host buffers in tests.

use rmp::encode;

const VEC_WRITE: &str = "writing to a Vec cannot fail";

/// Builds MessagePack bytes the way a host serializer lays them out.
#[derive(Debug, Default, Clone)]
pub struct MsgPackWriter {
    buf: Vec<u8>,
}

impl MsgPackWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn array(&mut self, len: u32) -> &mut Self {
        encode::write_array_len(&mut self.buf, len).expect(VEC_WRITE);
        self
    }

    pub fn map(&mut self, len: u32) -> &mut Self {
        encode::write_map_len(&mut self.buf, len).expect(VEC_WRITE);
        self
    }

    pub fn uint(&mut self, value: u64) -> &mut Self {
        encode::write_uint(&mut self.buf, value).expect(VEC_WRITE);
        self
    }

    pub fn sint(&mut self, value: i64) -> &mut Self {
        encode::write_sint(&mut self.buf, value).expect(VEC_WRITE);
        self
    }

    pub fn f64(&mut self, value: f64) -> &mut Self {
        encode::write_f64(&mut self.buf, value).expect(VEC_WRITE);
        self
    }

    pub fn bool(&mut self, value: bool) -> &mut Self {
        encode::write_bool(&mut self.buf, value).expect(VEC_WRITE);
        self
    }

    pub fn nil(&mut self) -> &mut Self {
        encode::write_nil(&mut self.buf).expect(VEC_WRITE);
        self
    }

    pub fn str(&mut self, value: &str) -> &mut Self {
        encode::write_str(&mut self.buf, value).expect(VEC_WRITE);
        self
    }

    /// A string, or nil for `None`.
    pub fn opt_str(&mut self, value: Option<&str>) -> &mut Self {
        match value {
            Some(value) => self.str(value),
            None => self.nil(),
        }
    }

    /// Raw `bin` form.
    pub fn bin(&mut self, value: &[u8]) -> &mut Self {
        encode::write_bin(&mut self.buf, value).expect(VEC_WRITE);
        self
    }

    /// Array-of-integers form, one integer per byte.
    pub fn byte_list(&mut self, value: &[u8]) -> &mut Self {
        self.array(value.len() as u32);
        for byte in value {
            self.uint(*byte as u64);
        }
        self
    }

    /// Opens a `{tag: ...}` value envelope. The payload is written next.
    pub fn tag(&mut self, tag: &str) -> &mut Self {
        self.map(1).str(tag)
    }

    /// Append pre-encoded bytes.
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }
}

/// Encode a collection: an outer array of per-record field arrays.
///
/// `fields` is the number of fields each record writes.
pub fn collection<T>(
    records: &[T],
    fields: u32,
    mut write: impl FnMut(&mut MsgPackWriter, &T),
) -> Vec<u8> {
    let mut writer = MsgPackWriter::new();
    writer.array(records.len() as u32);
    for record in records {
        writer.array(fields);
        write(&mut writer, record);
    }
    writer.into_bytes()
}
