//! Incremental `text/event-stream` decoder.
//!
//! Bytes arrive in arbitrary chunks; a frame is dispatched on the blank line
//! that ends it. Both LF and CRLF line endings are accepted.

const MESSAGE_EVENT: &str = "message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// `None` when the frame carried no `event:` field.
    pub event: Option<String>,
    pub data: String,
    pub id: Option<String>,
    pub retry: Option<u64>,
}

impl SseFrame {
    /// Unnamed frames and frames explicitly named `message` carry pipeline
    /// events. Anything else (heartbeats, custom names) is ignored upstream.
    pub fn is_message(&self) -> bool {
        matches!(self.event.as_deref(), None | Some(MESSAGE_EVENT))
    }
}

#[derive(Debug, Default)]
struct Pending {
    event: Option<String>,
    data: Option<String>,
    id: Option<String>,
    retry: Option<u64>,
}

impl Pending {
    fn take_frame(&mut self) -> Option<SseFrame> {
        let pending = std::mem::take(self);
        pending.data.map(|data| SseFrame {
            event: pending.event,
            data,
            id: pending.id,
            retry: pending.retry,
        })
    }
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: Vec<u8>,
    /// Leading bytes of `buf` already searched without finding a newline.
    scanned: usize,
    pending: Pending,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one body chunk and return every frame it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buf.extend_from_slice(chunk);

        let mut frames = Vec::new();
        let mut consumed = 0;
        let mut from = self.scanned;
        while let Some(pos) = self.buf[from..].iter().position(|&b| b == b'\n') {
            let end = from + pos;
            let mut line = &self.buf[consumed..end];
            if let Some(stripped) = line.strip_suffix(b"\r") {
                line = stripped;
            }
            let line = String::from_utf8_lossy(line).into_owned();
            consumed = end + 1;
            from = consumed;

            if line.is_empty() {
                frames.extend(self.pending.take_frame());
            } else {
                self.field(&line);
            }
        }
        self.buf.drain(..consumed);
        self.scanned = self.buf.len();
        frames
    }

    /// Bytes and fields of a frame that never saw its terminating blank line.
    /// They are discarded at end of stream.
    pub fn has_partial(&self) -> bool {
        !self.buf.is_empty() || self.pending.data.is_some()
    }

    fn field(&mut self, line: &str) {
        if line.starts_with(':') {
            return;
        }

        let (name, value) = match line.split_once(':') {
            Some((name, value)) => (name, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match name {
            "data" => match &mut self.pending.data {
                Some(data) => {
                    data.push('\n');
                    data.push_str(value);
                }
                None => self.pending.data = Some(value.to_string()),
            },
            "event" => self.pending.event = Some(value.to_string()),
            "id" => self.pending.id = Some(value.to_string()),
            "retry" => {
                if let Ok(ms) = value.parse() {
                    self.pending.retry = Some(ms);
                }
            }
            _ => {}
        }
    }
}
