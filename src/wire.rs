//! Wire format: length-prefixed header entries and the cursor used to encode
//! and repeatedly re-decode them.
//!
//! Layout per entry (multi-byte fields are big-endian):
//!
//! | Key kind | Bytes                                                    |
//! |----------|----------------------------------------------------------|
//! | string   | u8 key length, key bytes, u32 value length, value bytes  |
//! | integer  | i32 key, u32 value length, value bytes                   |
//!
//! Entries are packed back-to-back with no separators, count prefix, or
//! trailing padding. All buffers are produced by the corpus builder and
//! trusted: decode never validates a length field against the remaining
//! capacity, so a truncated or malformed buffer panics out of the cursor
//! bounds checks rather than returning an error.

use crate::table::{HeaderTable, KeyInterner};

/// Fixed-capacity byte buffer with `position`/`limit` cursors.
///
/// Corpus slots are encoded once and then re-decoded millions of times; the
/// cursor must be [`rewind`](ByteCursor::rewind)ed to the full span before
/// each reuse, since reads advance `position`.
pub struct ByteCursor {
    buf: Vec<u8>,
    position: usize,
    limit: usize,
}

impl ByteCursor {
    /// Zero-filled buffer of exactly `capacity` bytes, positioned at 0.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity],
            position: 0,
            limit: capacity,
        }
    }

    /// Wrap existing bytes, positioned at 0 with the limit at the end.
    pub fn from_vec(buf: Vec<u8>) -> Self {
        let limit = buf.len();
        Self {
            buf,
            position: 0,
            limit,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    pub fn has_remaining(&self) -> bool {
        self.position < self.limit
    }

    /// Reset the read/write window to the full span: position 0, limit at
    /// capacity. Required before every reuse of a shared corpus slot.
    pub fn rewind(&mut self) {
        self.position = 0;
        self.limit = self.buf.len();
    }

    /// Entire backing buffer, independent of the current cursor window.
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    fn check(&self, needed: usize) {
        assert!(
            needed <= self.remaining(),
            "cursor overrun at position {}: need {} bytes, {} remaining",
            self.position,
            needed,
            self.remaining()
        );
    }

    pub fn put_u8(&mut self, v: u8) {
        self.check(1);
        self.buf[self.position] = v;
        self.position += 1;
    }

    pub fn put_i32(&mut self, v: i32) {
        self.put_slice(&v.to_be_bytes());
    }

    pub fn put_u32(&mut self, v: u32) {
        self.put_slice(&v.to_be_bytes());
    }

    pub fn put_slice(&mut self, src: &[u8]) {
        self.check(src.len());
        self.buf[self.position..self.position + src.len()].copy_from_slice(src);
        self.position += src.len();
    }

    pub fn get_u8(&mut self) -> u8 {
        self.check(1);
        let v = self.buf[self.position];
        self.position += 1;
        v
    }

    pub fn get_i32(&mut self) -> i32 {
        self.check(4);
        let p = self.position;
        let v = i32::from_be_bytes([self.buf[p], self.buf[p + 1], self.buf[p + 2], self.buf[p + 3]]);
        self.position += 4;
        v
    }

    pub fn get_u32(&mut self) -> u32 {
        self.check(4);
        let p = self.position;
        let v = u32::from_be_bytes([self.buf[p], self.buf[p + 1], self.buf[p + 2], self.buf[p + 3]]);
        self.position += 4;
        v
    }

    pub fn get_slice(&mut self, len: usize) -> &[u8] {
        self.check(len);
        let slice = &self.buf[self.position..self.position + len];
        self.position += len;
        slice
    }
}

/// Encoded size of one string-keyed entry.
pub fn string_entry_len(key: &str, value: &[u8]) -> usize {
    1 + key.len() + 4 + value.len()
}

/// Encoded size of one integer-keyed entry.
pub fn int_entry_len(value: &[u8]) -> usize {
    4 + 4 + value.len()
}

/// Append one string-keyed entry at the cursor's write position.
///
/// The key must be at most 255 bytes; the caller pre-sizes the buffer, so
/// writing past capacity is a setup bug and panics.
pub fn encode_string_entry(cursor: &mut ByteCursor, key: &str, value: &[u8]) {
    assert!(
        key.len() <= u8::MAX as usize,
        "header key is {} bytes, max is 255",
        key.len()
    );
    cursor.put_u8(key.len() as u8);
    cursor.put_slice(key.as_bytes());
    cursor.put_u32(value.len() as u32);
    cursor.put_slice(value);
}

/// Append one integer-keyed entry at the cursor's write position.
pub fn encode_int_entry(cursor: &mut ByteCursor, key: i32, value: &[u8]) {
    cursor.put_i32(key);
    cursor.put_u32(value.len() as u32);
    cursor.put_slice(value);
}

/// Decode string-keyed entries into `table` until the buffer is exhausted or
/// `max_entries` have been parsed. Returns the number of entries parsed.
///
/// `interner` is the canonicalization knob: `Some` forwards every decoded
/// key through the collaborator, `None` is a pure pass-through. Duplicate
/// keys are not rejected; the container's `put` decides what a repeat means.
pub fn decode_string_headers<T: HeaderTable<String>>(
    cursor: &mut ByteCursor,
    table: &mut T,
    max_entries: usize,
    interner: Option<&dyn KeyInterner>,
) -> usize {
    let mut parsed = 0;
    while cursor.has_remaining() && parsed < max_entries {
        let key_len = cursor.get_u8() as usize;
        let key_bytes = cursor.get_slice(key_len);
        let key = String::from_utf8_lossy(key_bytes).into_owned();
        let key = match interner {
            Some(interner) => interner.intern(key),
            None => key,
        };
        let value_len = cursor.get_u32() as usize;
        let value = cursor.get_slice(value_len).to_vec();
        table.put(key, value);
        parsed += 1;
    }
    parsed
}

/// Decode integer-keyed entries into `table` until the buffer is exhausted
/// or `max_entries` have been parsed. Returns the number of entries parsed.
pub fn decode_int_headers<T: HeaderTable<i32>>(
    cursor: &mut ByteCursor,
    table: &mut T,
    max_entries: usize,
) -> usize {
    let mut parsed = 0;
    while cursor.has_remaining() && parsed < max_entries {
        let key = cursor.get_i32();
        let value_len = cursor.get_u32() as usize;
        let value = cursor.get_slice(value_len).to_vec();
        table.put(key, value);
        parsed += 1;
    }
    parsed
}
