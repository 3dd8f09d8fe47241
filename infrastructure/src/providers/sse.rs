//! Incremental decoder for `text/event-stream` bodies.
//!
//! Network chunks split lines anywhere, including inside multi-byte UTF-8
//! sequences, so bytes are buffered until a full line is available.

/// Accumulates body bytes and yields the payload of each complete `data:` line.
#[derive(Debug, Default)]
pub(crate) struct SseLineDecoder {
    buffer: Vec<u8>,
}

impl SseLineDecoder {
    /// Feed a chunk, returning the `data:` payloads completed by it.
    pub(crate) fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            if let Some(data) = data_payload(&line[..newline]) {
                payloads.push(data);
            }
        }
        payloads
    }

    /// Flush a trailing line that had no terminating newline.
    pub(crate) fn finish(&mut self) -> Option<String> {
        let line = std::mem::take(&mut self.buffer);
        data_payload(&line)
    }
}

/// Extract the value of a `data:` field; comments and other fields yield `None`.
fn data_payload(line: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(line);
    let line = line.strip_suffix('\r').unwrap_or(&line);
    let value = line.strip_prefix("data:")?;
    let value = value.strip_prefix(' ').unwrap_or(value);
    Some(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_lines() {
        let mut decoder = SseLineDecoder::default();
        let payloads = decoder.push(b"data: {\"a\":1}\n\ndata: [DONE]\n\n");
        assert_eq!(payloads, vec!["{\"a\":1}", "[DONE]"]);
    }

    #[test]
    fn test_line_split_across_chunks() {
        let mut decoder = SseLineDecoder::default();
        assert!(decoder.push(b"data: {\"con").is_empty());
        assert!(decoder.push(b"tent\":\"hi\"}").is_empty());
        assert_eq!(decoder.push(b"\n"), vec!["{\"content\":\"hi\"}"]);
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        let line = "data: héllo\n".as_bytes();
        let split = line.iter().position(|&b| b == 0xC3).unwrap() + 1;

        let mut decoder = SseLineDecoder::default();
        assert!(decoder.push(&line[..split]).is_empty());
        assert_eq!(decoder.push(&line[split..]), vec!["héllo"]);
    }

    #[test]
    fn test_crlf_and_non_data_lines() {
        let mut decoder = SseLineDecoder::default();
        let payloads = decoder.push(b": keep-alive\r\nevent: message\r\ndata:tight\r\n\r\n");
        assert_eq!(payloads, vec!["tight"]);
    }

    #[test]
    fn test_finish_flushes_unterminated_line() {
        let mut decoder = SseLineDecoder::default();
        assert!(decoder.push(b"data: [DONE]").is_empty());
        assert_eq!(decoder.finish(), Some("[DONE]".to_string()));
        assert_eq!(decoder.finish(), None);
    }
}
