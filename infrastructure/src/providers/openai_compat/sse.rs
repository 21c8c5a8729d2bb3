//! Server-sent event framing for streamed completions

/// One `data:` payload from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SseData {
    Json(String),
    Done,
}

/// Accumulates raw bytes and yields complete `data:` lines.
///
/// Network chunks may split a line (or a UTF-8 sequence) anywhere, so bytes
/// are only decoded once a full line has arrived.
#[derive(Debug, Default)]
pub(crate) struct SseLineBuffer {
    pending: Vec<u8>,
}

impl SseLineBuffer {
    pub fn push(&mut self, bytes: &[u8]) -> Vec<SseData> {
        self.pending.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\r', '\n']);

            let Some(data) = line.strip_prefix("data:") else {
                continue;
            };
            let data = data.trim_start();
            if data == "[DONE]" {
                events.push(SseData::Done);
            } else if !data.is_empty() {
                events.push(SseData::Json(data.to_string()));
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_lines_across_chunks() {
        let mut buffer = SseLineBuffer::default();
        assert!(buffer.push(b"data: {\"a\"").is_empty());
        let events = buffer.push(b":1}\n\ndata: [DONE]\n");
        assert_eq!(
            events,
            vec![SseData::Json("{\"a\":1}".to_string()), SseData::Done]
        );
    }

    #[test]
    fn ignores_comments_and_other_fields() {
        let mut buffer = SseLineBuffer::default();
        let events = buffer.push(b": keep-alive\r\nevent: message\r\ndata:{}\r\n");
        assert_eq!(events, vec![SseData::Json("{}".to_string())]);
    }

    #[test]
    fn multibyte_text_split_mid_character() {
        let payload = "data: {\"c\":\"会议\"}\n".as_bytes();
        let (head, tail) = payload.split_at(14);
        let mut buffer = SseLineBuffer::default();
        assert!(buffer.push(head).is_empty());
        assert_eq!(
            buffer.push(tail),
            vec![SseData::Json("{\"c\":\"会议\"}".to_string())]
        );
    }
}
