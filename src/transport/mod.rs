use crate::protocol::Message;

/// A bidirectional message channel to one peer.
///
/// `recv` yields `Ok(None)` once the peer has closed the connection; a
/// read failure or an undecodable frame is an `Err`. Callers treat both as
/// the end of the session.
#[async_trait::async_trait]
pub trait Transport: Send {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;
    async fn recv(&mut self) -> anyhow::Result<Option<Message>>;

    /// Close the outgoing side of the connection.
    async fn close(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub mod framing;
pub mod in_memory;
pub mod tcp;

pub use framing::LineFramer;
pub use tcp::{LineReader, LineTransport, LineWriter, TcpTransport};
