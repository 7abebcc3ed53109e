#![cfg(feature = "std")]

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::protocol::Message;
use crate::transport::Transport;

/// In-process transport: two linked endpoints passing decoded messages.
///
/// Dropping or closing one endpoint makes the other's `recv` return
/// `Ok(None)` once the queued messages are drained.
pub struct InMemoryTransport {
    tx: Option<UnboundedSender<Message>>,
    rx: UnboundedReceiver<Message>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let (tx1, rx1) = unbounded_channel();
        let (tx2, rx2) = unbounded_channel();
        (
            Self {
                tx: Some(tx2),
                rx: rx1,
            },
            Self {
                tx: Some(tx1),
                rx: rx2,
            },
        )
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Transport is shut down"))?;
        tx.send(msg)
            .map_err(|_| anyhow::anyhow!("Connection closed by peer"))
    }

    async fn recv(&mut self) -> anyhow::Result<Option<Message>> {
        Ok(self.rx.recv().await)
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        self.tx = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn closed_peer_drains_then_ends() {
        let (mut a, mut b) = InMemoryTransport::pair();
        a.send(Message::Answer {
            answer: "4".to_string(),
        })
        .await
        .unwrap();
        a.close().await.unwrap();
        assert!(a.send(Message::Answer { answer: "5".to_string() }).await.is_err());

        assert_eq!(
            b.recv().await.unwrap(),
            Some(Message::Answer {
                answer: "4".to_string()
            })
        );
        assert_eq!(b.recv().await.unwrap(), None);
    }
}
