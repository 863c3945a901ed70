use crate::error::TransportError;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

/// Cloneable handle for queueing protocol lines to the server.
///
/// Each line is written whole by the writer task, so lines from different
/// senders never interleave mid-line.
#[derive(Debug, Clone)]
pub struct Outbound {
    tx: mpsc::UnboundedSender<String>,
}

impl Outbound {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue one line, without terminator.
    pub fn send(&self, line: impl Into<String>) -> Result<(), TransportError> {
        let line = line.into();
        debug!(%line, "send");
        self.tx.send(line).map_err(|_| TransportError::Closed)
    }
}

/// Line reader over the server half of the connection.
pub struct ServerLines<R> {
    reader: BufReader<R>,
    buf: Vec<u8>,
}

impl<R: AsyncRead + Unpin> ServerLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            buf: Vec::with_capacity(512),
        }
    }

    /// Next line with its terminator stripped, or `None` at end of stream.
    /// Invalid UTF-8 is replaced rather than rejected.
    pub async fn next_line(&mut self) -> Result<Option<String>, TransportError> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf).await? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&self.buf)
            .trim_end_matches(['\r', '\n'])
            .to_string();
        trace!(%line, "recv");
        Ok(Some(line))
    }
}

/// Drain queued lines into `writer` until every [`Outbound`] is dropped.
pub async fn write_lines<W: AsyncWrite + Unpin>(
    mut writer: W,
    mut rx: mpsc::UnboundedReceiver<String>,
) -> Result<(), TransportError> {
    while let Some(line) = rx.recv().await {
        // A stray line break would split one command into two.
        let line = line.replace(['\r', '\n'], "");
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\r\n").await?;
        writer.flush().await?;
    }
    writer.shutdown().await?;
    Ok(())
}

pub struct Connection {
    pub lines: ServerLines<OwnedReadHalf>,
    pub outbound: Outbound,
    pub writer: JoinHandle<Result<(), TransportError>>,
}

/// Open the TCP connection and start the writer task.
pub async fn connect(host: &str, port: u16) -> Result<Connection, TransportError> {
    info!(host, port, "connecting");
    let stream = TcpStream::connect((host, port)).await?;
    let (read, write) = stream.into_split();
    let (outbound, rx) = Outbound::channel();
    let writer = tokio::spawn(write_lines(write, rx));
    info!(host, port, "connected");
    Ok(Connection {
        lines: ServerLines::new(read),
        outbound,
        writer,
    })
}

/// Queue the registration sequence.
pub fn register(outbound: &Outbound, nick: &str, realname: &str) -> Result<(), TransportError> {
    outbound.send(format!("NICK {nick}"))?;
    outbound.send(format!("USER {nick} 8 * :{realname}"))
}
