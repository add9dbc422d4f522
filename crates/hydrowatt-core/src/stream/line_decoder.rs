//! Rolling line buffer over arbitrary read boundaries.
//!
//! Network reads split the body wherever they like: mid-line, mid-JSON, even
//! mid-UTF-8 sequence. The decoder keeps raw bytes until a `\n` arrives, so a
//! line is only decoded once it is complete.

/// Splits a byte stream into `\n`-terminated lines.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buffer: Vec<u8>,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one read and drain every line it completes.
    ///
    /// A trailing `\r` is stripped from each line. Bytes after the last
    /// newline stay buffered for the next call.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=pos).collect();
            lines.push(decode_line(&raw[..raw.len() - 1]));
        }
        lines
    }

    /// Whether a partial line is waiting for more bytes.
    pub fn has_pending(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Take whatever partial line remains at end of input.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let raw = std::mem::take(&mut self.buffer);
        Some(decode_line(&raw))
    }
}

fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_lines_are_dispatched() {
        let mut decoder = LineDecoder::new();
        let lines = decoder.push(b"data: a\n\ndata: b\n");
        assert_eq!(lines, vec!["data: a", "", "data: b"]);
        assert!(!decoder.has_pending());
    }

    #[test]
    fn test_partial_line_is_retained() {
        let mut decoder = LineDecoder::new();
        assert!(decoder.push(b"data: {\"choi").is_empty());
        assert!(decoder.has_pending());

        let lines = decoder.push(b"ces\":[]}\ndata: nex");
        assert_eq!(lines, vec!["data: {\"choices\":[]}"]);
        assert_eq!(decoder.finish().as_deref(), Some("data: nex"));
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_crlf_is_stripped() {
        let mut decoder = LineDecoder::new();
        assert_eq!(decoder.push(b"data: x\r\n"), vec!["data: x"]);
    }

    #[test]
    fn test_utf8_split_across_reads() {
        let text = "data: caf\u{e9}\n".as_bytes();
        // Split inside the two-byte encoding of the accented letter.
        let split = text.len() - 2;
        let mut decoder = LineDecoder::new();
        assert!(decoder.push(&text[..split]).is_empty());
        assert_eq!(decoder.push(&text[split..]), vec!["data: caf\u{e9}"]);
    }

    #[test]
    fn test_one_byte_at_a_time() {
        let body = b"data: one\ndata: two\n";
        let mut decoder = LineDecoder::new();
        let mut lines = Vec::new();
        for byte in body.iter() {
            lines.extend(decoder.push(std::slice::from_ref(byte)));
        }
        assert_eq!(lines, vec!["data: one", "data: two"]);
    }
}
