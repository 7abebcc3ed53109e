//! Newline framing over a byte stream.
//!
//! Each frame is one encoded [`Message`] followed by a single `\n`. The
//! framer owns the carryover buffer between reads: bytes after a terminator
//! are kept for the next frame, and a terminator may arrive split across any
//! number of reads.

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::protocol::Message;

/// Frame terminator.
pub const TERMINATOR: u8 = b'\n';

/// Maximum unterminated bytes buffered before the stream is rejected (1 MB).
pub const MAX_FRAME_SIZE: usize = 1 << 20;

/// Read chunk size.
const READ_CHUNK: usize = 1024;

/// Carryover buffer that splits a byte stream into frames.
#[derive(Debug, Clone)]
pub struct LineFramer {
    buf: Vec<u8>,
    max_frame_size: usize,
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineFramer {
    pub fn new() -> Self {
        Self::with_limit(MAX_FRAME_SIZE)
    }

    pub fn with_limit(max_frame_size: usize) -> Self {
        Self {
            buf: Vec::new(),
            max_frame_size,
        }
    }

    /// Append freshly read bytes.
    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Split off the next complete frame, without its terminator. An empty
    /// line is returned as an empty frame and fails to decode.
    pub fn next_frame(&mut self) -> Option<Vec<u8>> {
        let pos = self.buf.iter().position(|&b| b == TERMINATOR)?;
        let mut frame: Vec<u8> = self.buf.drain(..=pos).collect();
        frame.pop();
        if frame.last() == Some(&b'\r') {
            frame.pop();
        }
        Some(frame)
    }

    /// Bytes received after the last complete frame.
    pub fn carryover(&self) -> &[u8] {
        &self.buf
    }

    /// Returns `true` when the unterminated tail exceeds the frame limit.
    pub fn over_limit(&self) -> bool {
        self.buf.len() > self.max_frame_size
    }
}

/// Encode `msg` as a complete frame, terminator included.
pub fn encode_frame(msg: &Message) -> anyhow::Result<Vec<u8>> {
    let mut data = msg.encode()?;
    data.push(TERMINATOR);
    Ok(data)
}

/// Read from `reader` until `framer` yields a frame, then decode it.
///
/// Returns `Ok(None)` when the stream ends before a terminator arrives;
/// any unterminated tail stays in the framer.
pub async fn read_message<R>(reader: &mut R, framer: &mut LineFramer) -> anyhow::Result<Option<Message>>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        if let Some(frame) = framer.next_frame() {
            return Message::decode(&frame).map(Some);
        }
        if framer.over_limit() {
            return Err(anyhow::anyhow!(
                "Frame too large: {} bytes without terminator (max: {})",
                framer.carryover().len(),
                framer.max_frame_size
            ));
        }
        let n = reader.read(&mut chunk).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::ConnectionReset {
                anyhow::anyhow!("Connection reset by peer")
            } else {
                anyhow::anyhow!("Read error: {}", e)
            }
        })?;
        if n == 0 {
            if !framer.carryover().is_empty() {
                log::debug!(
                    "peer closed with {} unterminated bytes buffered",
                    framer.carryover().len()
                );
            }
            return Ok(None);
        }
        framer.push(&chunk[..n]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_terminator_is_reassembled() {
        let mut framer = LineFramer::new();
        framer.push(b"{\"a\":");
        assert_eq!(framer.next_frame(), None);
        framer.push(b"1}");
        assert_eq!(framer.next_frame(), None);
        framer.push(b"\n{\"b\"");
        assert_eq!(framer.next_frame(), Some(b"{\"a\":1}".to_vec()));
        assert_eq!(framer.carryover(), b"{\"b\"");
    }

    #[test]
    fn empty_line_is_an_undecodable_frame() {
        let mut framer = LineFramer::new();
        framer.push(b"\nx\n");
        let frame = framer.next_frame().unwrap();
        assert!(frame.is_empty());
        assert!(Message::decode(&frame).is_err());
        assert_eq!(framer.next_frame(), Some(b"x".to_vec()));
        assert_eq!(framer.next_frame(), None);
    }

    #[test]
    fn limit_counts_only_unterminated_bytes() {
        let mut framer = LineFramer::with_limit(4);
        framer.push(b"abc\n");
        assert!(!framer.over_limit());
        framer.push(b"defgh");
        assert!(framer.over_limit());
    }
}
