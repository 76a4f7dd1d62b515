//! Incremental `text/event-stream` decoding.
//!
//! Bytes are buffered until a full line is available, so multi-byte UTF-8
//! sequences split across network chunks decode correctly.
//!
//! ```rust
//! use ajudge::SseDecoder;
//!
//! let mut decoder = SseDecoder::new();
//! let events = decoder.push(b"data: Try \n\ndata: sorting").expect("decode");
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].data, "Try ");
//!
//! let tail = decoder.finish().expect("decode").expect("pending event");
//! assert_eq!(tail.data, "sorting");
//! ```

use crate::JudgeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub event: Option<String>,
    pub data: String,
}

impl SseEvent {
    /// Turns the event into a hint fragment. `event: error` carries a server-side failure.
    pub fn into_fragment(self) -> Result<String, JudgeError> {
        match self.event.as_deref() {
            Some("error") => Err(JudgeError::transport(if self.data.is_empty() {
                "hint stream reported an error".to_string()
            } else {
                self.data
            })),
            _ => Ok(self.data),
        }
    }
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    pending: Vec<u8>,
    data_lines: Vec<String>,
    event: Option<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<SseEvent>, JudgeError> {
        self.pending.extend_from_slice(chunk);
        let mut events = Vec::new();

        while let Some(newline_index) = self.pending.iter().position(|byte| *byte == b'\n') {
            let mut line = self.pending.drain(..=newline_index).collect::<Vec<_>>();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }

            let line = String::from_utf8(line)
                .map_err(|err| JudgeError::malformed_response(format!("hint stream: {err}")))?;
            if let Some(event) = self.process_line(&line) {
                events.push(event);
            }
        }

        Ok(events)
    }

    /// Flushes whatever is left once the connection closes. A final event
    /// missing its terminating blank line is still delivered.
    pub fn finish(&mut self) -> Result<Option<SseEvent>, JudgeError> {
        if !self.pending.is_empty() {
            let line = String::from_utf8(std::mem::take(&mut self.pending))
                .map_err(|err| JudgeError::malformed_response(format!("hint stream: {err}")))?;
            let line = line.trim_end_matches('\r').to_string();
            if let Some(event) = self.process_line(&line) {
                return Ok(Some(event));
            }
        }

        Ok(self.dispatch())
    }

    fn process_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            return self.dispatch();
        }

        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "data" => self.data_lines.push(value.to_string()),
            "event" => self.event = Some(value.to_string()),
            _ => {}
        }

        None
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        let event = self.event.take();
        if self.data_lines.is_empty() {
            return None;
        }

        let data = std::mem::take(&mut self.data_lines).join("\n");
        Some(SseEvent { event, data })
    }
}
