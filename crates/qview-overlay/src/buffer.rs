//! The single-line edit buffer behind the jump and command prompts.
//!
//! Content is kept as raw bytes in fixed-capacity storage. Every mutation
//! keeps `bytes[..size]` valid UTF-8 and the cursor on a code point boundary.
//! Navigation and deletion work on bytes: continuation bytes are skipped, so
//! multi-byte characters always move as a unit.
use std::str;

/// Default buffer capacity in bytes.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Smallest capacity that can hold at least one byte of content.
const MIN_CAPACITY: usize = 3;

/// Is this a UTF-8 continuation byte?
fn is_continuation(b: u8) -> bool {
    (0x80..=0xbf).contains(&b)
}

/// Word bytes for word-wise deletion. Any byte with the high bit set counts,
/// which makes a multi-byte character part of the surrounding word.
fn is_word(b: u8) -> bool {
    (b | 0x20).is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b >= 0x80
}

/// Fixed-capacity single-line text buffer with a byte cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    /// Backing storage; only `bytes[..size]` is meaningful.
    bytes: Box<[u8]>,
    /// Number of content bytes.
    size: usize,
    /// Byte offset of the edit point.
    cursor: usize,
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EditBuffer {
    /// Create an empty buffer. Capacities below 3 are raised to 3.
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity.max(MIN_CAPACITY)].into_boxed_slice(),
            size: 0,
            cursor: 0,
        }
    }

    /// Total capacity of the backing storage.
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Number of content bytes.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Is the buffer empty?
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Byte offset of the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Is the cursor at the end of the content?
    pub fn at_end(&self) -> bool {
        self.cursor == self.size
    }

    /// The content bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.size]
    }

    /// The content as a string slice.
    pub fn as_str(&self) -> &str {
        match str::from_utf8(self.as_bytes()) {
            Ok(s) => s,
            Err(e) => {
                debug_assert!(false, "edit buffer holds invalid UTF-8: {e}");
                ""
            }
        }
    }

    /// Insert a code point at the cursor. Returns false, leaving the buffer
    /// untouched, when the encoded character does not fit or is NUL.
    pub fn insert_codepoint(&mut self, cp: char) -> bool {
        let mut enc = [0u8; 4];
        let encoded = cp.encode_utf8(&mut enc).as_bytes();
        let n = encoded.len();
        if n == 0 || cp == '\0' || self.size + n >= self.capacity() - 1 {
            return false;
        }
        self.shift_right(self.cursor, n);
        self.bytes[self.cursor..self.cursor + n].copy_from_slice(encoded);
        self.cursor += n;
        true
    }

    /// Delete the character before the cursor.
    pub fn delete_backward_char(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.char_start_before(self.cursor);
        self.remove(start, self.cursor)
    }

    /// Delete the character at the cursor.
    pub fn delete_forward_char(&mut self) -> bool {
        if self.cursor >= self.size {
            return false;
        }
        let end = self.char_end_after(self.cursor);
        self.remove(self.cursor, end)
    }

    /// Delete any non-word bytes before the cursor, then the word before them.
    pub fn delete_backward_word(&mut self) -> bool {
        let b = &self.bytes;
        let mut start = self.cursor;
        while start > 0 && !is_word(b[start - 1]) {
            start -= 1;
        }
        while start > 0 && is_word(b[start - 1]) {
            start -= 1;
        }
        self.remove(start, self.cursor)
    }

    /// Delete any non-word bytes after the cursor, then the word after them.
    pub fn delete_forward_word(&mut self) -> bool {
        let b = &self.bytes;
        let mut end = self.cursor;
        while end < self.size && !is_word(b[end]) {
            end += 1;
        }
        while end < self.size && is_word(b[end]) {
            end += 1;
        }
        self.remove(self.cursor, end)
    }

    /// Move the cursor one character left.
    pub fn move_backward_char(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor = self.char_start_before(self.cursor);
        true
    }

    /// Move the cursor one character right.
    pub fn move_forward_char(&mut self) -> bool {
        if self.cursor >= self.size {
            return false;
        }
        self.cursor = self.char_end_after(self.cursor);
        true
    }

    /// Move the cursor to the start of the line.
    pub fn move_home(&mut self) -> bool {
        let moved = self.cursor != 0;
        self.cursor = 0;
        moved
    }

    /// Move the cursor to the end of the line.
    pub fn move_end(&mut self) -> bool {
        let moved = self.cursor != self.size;
        self.cursor = self.size;
        moved
    }

    /// Place the cursor at `pos`, if it is a character boundary within the
    /// content.
    pub fn set_cursor(&mut self, pos: usize) -> bool {
        if pos > self.size || !self.as_str().is_char_boundary(pos) {
            return false;
        }
        let moved = self.cursor != pos;
        self.cursor = pos;
        moved
    }

    /// Empty the buffer.
    pub fn clear(&mut self) -> bool {
        let changed = self.size != 0 || self.cursor != 0;
        self.size = 0;
        self.cursor = 0;
        changed
    }

    /// Replace the content with `text`, cursor at the end. Text is cut at the
    /// first NUL and truncated on a character boundary to `capacity - 1`
    /// bytes.
    pub fn set_text(&mut self, text: &str) -> bool {
        let text = text.split('\0').next().unwrap_or_default();
        let mut n = text.len().min(self.capacity() - 1);
        while !text.is_char_boundary(n) {
            n -= 1;
        }
        let changed = self.as_bytes() != &text.as_bytes()[..n] || self.cursor != n;
        self.bytes[..n].copy_from_slice(&text.as_bytes()[..n]);
        self.size = n;
        self.cursor = n;
        changed
    }

    /// Start of the character ending at `pos`: step back over continuation
    /// bytes, then over one lead byte. Terminates on malformed input too.
    fn char_start_before(&self, pos: usize) -> usize {
        let mut i = pos - 1;
        while i > 0 && is_continuation(self.bytes[i]) {
            i -= 1;
        }
        i
    }

    /// End of the character starting at `pos`.
    fn char_end_after(&self, pos: usize) -> usize {
        let mut i = pos + 1;
        while i < self.size && is_continuation(self.bytes[i]) {
            i += 1;
        }
        i
    }

    /// Remove `[start, end)`, leaving the cursor at `start`.
    fn remove(&mut self, start: usize, end: usize) -> bool {
        if start >= end {
            return false;
        }
        self.shift_left(start, end - start);
        self.cursor = start;
        true
    }

    /// Open a gap of `n` bytes at `at` by moving the tail right.
    fn shift_right(&mut self, at: usize, n: usize) {
        self.bytes.copy_within(at..self.size, at + n);
        self.size += n;
    }

    /// Close `n` bytes at `at` by moving the tail left.
    fn shift_left(&mut self, at: usize, n: usize) {
        self.bytes.copy_within(at + n..self.size, at);
        self.size -= n;
    }
}
