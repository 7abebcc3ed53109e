#![cfg(feature = "std")]

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};

use crate::protocol::Message;
use crate::transport::framing::{encode_frame, read_message, LineFramer};
use crate::transport::Transport;

/// Receiving half of a line-delimited connection.
pub struct LineReader<R> {
    reader: R,
    framer: LineFramer,
}

impl<R: AsyncRead + Unpin + Send> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            framer: LineFramer::new(),
        }
    }

    /// Next message, or `None` once the peer has closed the stream.
    pub async fn recv(&mut self) -> anyhow::Result<Option<Message>> {
        read_message(&mut self.reader, &mut self.framer).await
    }
}

/// Sending half of a line-delimited connection.
pub struct LineWriter<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin + Send> LineWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write one complete frame.
    pub async fn send(&mut self, msg: &Message) -> anyhow::Result<()> {
        let data = encode_frame(msg)?;
        self.writer.write_all(&data).await.map_err(map_write_error)?;
        self.writer.flush().await.map_err(map_write_error)?;
        Ok(())
    }

    pub async fn shutdown(&mut self) -> anyhow::Result<()> {
        self.writer.shutdown().await.map_err(map_write_error)
    }
}

fn map_write_error(e: std::io::Error) -> anyhow::Error {
    if e.kind() == std::io::ErrorKind::BrokenPipe || e.kind() == std::io::ErrorKind::ConnectionReset {
        anyhow::anyhow!("Connection closed by peer")
    } else {
        anyhow::anyhow!("Write error: {}", e)
    }
}

/// Newline-delimited JSON transport over any pair of async byte halves.
pub struct LineTransport<R, W> {
    reader: LineReader<R>,
    writer: LineWriter<W>,
}

impl<R, W> LineTransport<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: LineReader::new(reader),
            writer: LineWriter::new(writer),
        }
    }

    /// Separate the halves so reading and writing can live in different
    /// tasks.
    pub fn into_split(self) -> (LineReader<R>, LineWriter<W>) {
        (self.reader, self.writer)
    }
}

impl<S> LineTransport<ReadHalf<S>, WriteHalf<S>>
where
    S: AsyncRead + AsyncWrite + Send,
{
    /// Wrap a single bidirectional stream.
    pub fn from_stream(stream: S) -> Self {
        let (r, w) = tokio::io::split(stream);
        Self::new(r, w)
    }
}

/// Line transport over a TCP connection.
pub type TcpTransport = LineTransport<OwnedReadHalf, OwnedWriteHalf>;

impl LineTransport<OwnedReadHalf, OwnedWriteHalf> {
    pub fn from_tcp(stream: TcpStream) -> Self {
        let (r, w) = stream.into_split();
        Self::new(r, w)
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        Ok(Self::from_tcp(stream))
    }
}

#[async_trait::async_trait]
impl<R, W> Transport for LineTransport<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        log::debug!("-> {}", msg.kind());
        self.writer.send(&msg).await
    }

    async fn recv(&mut self) -> anyhow::Result<Option<Message>> {
        let msg = self.reader.recv().await?;
        if let Some(m) = &msg {
            log::debug!("<- {}", m.kind());
        }
        Ok(msg)
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        self.writer.shutdown().await
    }
}
