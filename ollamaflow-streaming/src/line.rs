//! Line reassembly across chunk boundaries.

use crate::error::{StreamError, StreamResult};

const MAX_BUFFER_SIZE: usize = 10 * 1024 * 1024;

/// Reassembles newline-terminated lines from raw byte chunks.
///
/// Chunks arrive at arbitrary boundaries: a record may be split across two
/// deliveries, or one delivery may carry many records. `feed` appends the
/// chunk to the carried fragment and emits every complete line in arrival
/// order; the trailing segment (possibly empty) becomes the new fragment.
/// After every `feed` the buffer holds at most one incomplete fragment,
/// never a complete line.
///
/// The carry buffer is bytes, not text: splitting happens on the `\n` byte
/// before UTF-8 conversion, so a multi-byte character straddling a chunk
/// boundary is never mangled. Whitespace-only lines are filtered out here so
/// downstream decoding only ever sees candidate records, and a trailing `\r`
/// is stripped to accept `\r\n` delimited payloads.
#[derive(Debug, Default)]
pub struct LineReassembler {
    buffer: Vec<u8>,
}

impl LineReassembler {
    /// Create a new reassembler with an empty carry buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of bytes, returning the complete lines it closed.
    pub fn feed(&mut self, bytes: &[u8]) -> StreamResult<Vec<String>> {
        self.buffer.extend_from_slice(bytes);

        if self.buffer.len() > MAX_BUFFER_SIZE {
            return Err(StreamError::BufferOverflow);
        }

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let mut raw: Vec<u8> = self.buffer.drain(..=pos).collect();
            raw.pop();
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            let line = String::from_utf8_lossy(&raw);
            if !line.trim().is_empty() {
                lines.push(line.into_owned());
            }
        }

        Ok(lines)
    }

    /// Flush the carried fragment as one final unterminated line.
    ///
    /// Call when the transport signals its final delivery. Covers single-shot
    /// bodies where the entire payload arrives as one non-terminated blob.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        let line = String::from_utf8_lossy(&rest);
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            None
        } else {
            Some(line.to_string())
        }
    }

    /// Discard any buffered fragment.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Whether a fragment is currently carried.
    pub fn has_fragment(&self) -> bool {
        !self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_complete_line() {
        let mut lines = LineReassembler::new();
        let out = lines.feed(b"{\"a\":1}\n").unwrap();
        assert_eq!(out, vec!["{\"a\":1}"]);
        assert!(!lines.has_fragment());
    }

    #[test]
    fn test_fragment_carried_across_chunks() {
        let mut lines = LineReassembler::new();
        let out = lines.feed(b"{\"a\":1}\n{\"a\":").unwrap();
        assert_eq!(out, vec!["{\"a\":1}"]);
        assert!(lines.has_fragment());

        let out = lines.feed(b"2}\n").unwrap();
        assert_eq!(out, vec!["{\"a\":2}"]);
        assert!(!lines.has_fragment());
    }

    #[test]
    fn test_byte_by_byte_delivery() {
        let payload = "{\"a\":1}\n{\"b\":2}\n";
        let mut lines = LineReassembler::new();
        let mut out = Vec::new();
        for byte in payload.bytes() {
            out.extend(lines.feed(&[byte]).unwrap());
        }
        assert_eq!(out, vec!["{\"a\":1}", "{\"b\":2}"]);
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        // "é" is two bytes; split in the middle of it.
        let payload = "{\"text\":\"caf\u{e9}\"}\n".as_bytes().to_vec();
        let split = payload.len() - 4;
        let mut lines = LineReassembler::new();
        let mut out = lines.feed(&payload[..split]).unwrap();
        out.extend(lines.feed(&payload[split..]).unwrap());
        assert_eq!(out, vec!["{\"text\":\"caf\u{e9}\"}"]);
    }

    #[test]
    fn test_whitespace_lines_filtered() {
        let mut lines = LineReassembler::new();
        let out = lines.feed(b"{\"a\":1}\n\n   \n{\"b\":2}\n").unwrap();
        assert_eq!(out, vec!["{\"a\":1}", "{\"b\":2}"]);
    }

    #[test]
    fn test_crlf_delimiters() {
        let mut lines = LineReassembler::new();
        let out = lines.feed(b"{\"a\":1}\r\n{\"b\":2}\r\n").unwrap();
        assert_eq!(out, vec!["{\"a\":1}", "{\"b\":2}"]);
    }

    #[test]
    fn test_finish_surfaces_trailing_fragment() {
        let mut lines = LineReassembler::new();
        lines.feed(b"{\"a\":1}\n{\"a\":2}").unwrap();
        assert_eq!(lines.finish(), Some("{\"a\":2}".to_string()));
        assert_eq!(lines.finish(), None);
    }

    #[test]
    fn test_finish_empty_fragment() {
        let mut lines = LineReassembler::new();
        lines.feed(b"{\"a\":1}\n").unwrap();
        assert_eq!(lines.finish(), None);
    }

    #[test]
    fn test_clear_discards_fragment() {
        let mut lines = LineReassembler::new();
        lines.feed(b"{\"partial\":").unwrap();
        lines.clear();
        assert_eq!(lines.finish(), None);
    }

    #[test]
    fn test_buffer_overflow() {
        let mut lines = LineReassembler::new();
        let big = vec![b'x'; MAX_BUFFER_SIZE + 1];
        assert!(matches!(
            lines.feed(&big),
            Err(StreamError::BufferOverflow)
        ));
    }
}
