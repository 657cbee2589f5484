use crate::client::MessageQueueItem;
use crate::config::{Framing, OverflowPolicy};
use crate::lines;
use crate::state::State;
use memchr::memmem;
use parleyd_tokens::Message;
use std::net::SocketAddr;
use tokio::{io, net, sync, time};

/// Time given to a closing connection to receive its last messages, in milliseconds.
const FLUSH_TIMEOUT: u64 = 5_000;

/// Number of bytes read from a connection at once.
const READ_CHUNK: usize = 1024;

/// Accumulates the bytes received on a connection and splits them into lines.
///
/// Only `\r\n` ends a line.  Lines are decoded as UTF-8, invalid sequences are replaced.
pub struct LineBuffer {
    buf: Vec<u8>,
    capacity: usize,
    overflow: OverflowPolicy,
}

impl LineBuffer {
    pub fn new(framing: Framing) -> Self {
        Self {
            buf: Vec::with_capacity(framing.recv_buffer_size),
            capacity: framing.recv_buffer_size,
            overflow: framing.overflow,
        }
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Removes the next complete line from the buffer, without its `\r\n`.  Blank lines are
    /// skipped.
    pub fn next_line(&mut self) -> Option<String> {
        loop {
            let end = memmem::find(&self.buf, b"\r\n")?;
            let line = String::from_utf8_lossy(&self.buf[..end]).into_owned();
            self.buf.drain(..end + 2);
            if !line.trim().is_empty() {
                return Some(line);
            }
        }
    }

    /// Applies the overflow policy when what remains after `next_line` has returned `None` is
    /// bigger than the receive buffer size.
    ///
    /// Returns the number of discarded bytes, or an error if the connection must be closed.
    pub fn check_overflow(&mut self) -> io::Result<usize> {
        if self.buf.len() <= self.capacity {
            return Ok(0);
        }
        match self.overflow {
            OverflowPolicy::Clear => {
                let discarded = self.buf.len();
                self.buf.clear();
                Ok(discarded)
            }
            OverflowPolicy::Close => {
                Err(io::Error::new(io::ErrorKind::InvalidData, lines::INPUT_TOO_LONG))
            }
        }
    }
}

/// Accepts connections on the given listener and spawns a task for each of them.
pub async fn listen(listener: net::TcpListener, shared: State, framing: Framing) {
    loop {
        match listener.accept().await {
            Ok((conn, peer_addr)) => {
                tokio::spawn(handle(conn, peer_addr, shared.clone(), framing));
            }
            Err(err) => log::warn!("Failed to accept connection: {}", err),
        }
    }
}

/// Returns a future that handles an IRC connection.
async fn handle(conn: net::TcpStream, peer_addr: SocketAddr, shared: State, framing: Framing) {
    let (mut reader, mut writer) = conn.into_split();
    let (msg_queue, mut outgoing_msgs) = sync::mpsc::unbounded_channel();
    let id = shared.peer_joined(peer_addr, msg_queue).await;

    let incoming = read_lines(&mut reader, id, &shared, framing);
    let outgoing = write_lines(&mut writer, id, &mut outgoing_msgs);

    tokio::pin!(incoming, outgoing);
    let res: io::Result<()> = tokio::select! {
        res = &mut incoming => {
            // The client is removed from the state, so its queue is closed once the last
            // messages are sent.
            shared.peer_quit(id, res.err()).await;
            let flush = time::timeout(time::Duration::from_millis(FLUSH_TIMEOUT), &mut outgoing);
            if let Ok(Err(err)) = flush.await {
                log::debug!("{}: Failed to send the last messages: {}", id, err);
            }
            return;
        }
        res = &mut outgoing => res,
    };
    shared.peer_quit(id, res.err()).await;
}

async fn read_lines<R>(reader: &mut R, id: usize, shared: &State,
                       framing: Framing) -> io::Result<()>
    where R: io::AsyncRead + Unpin
{
    use io::AsyncReadExt as _;

    let mut buffer = LineBuffer::new(framing);
    let mut chunk = [0; READ_CHUNK];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, lines::CONNECTION_RESET));
        }
        buffer.push(&chunk[..n]);
        while let Some(line) = buffer.next_line() {
            log::trace!("{} >> {}", id, line);
            handle_line(id, &line, shared).await?;
        }
        let discarded = buffer.check_overflow()?;
        if discarded != 0 {
            log::warn!("{}: {}, discarded {} bytes", id, lines::INPUT_TOO_LONG, discarded);
        }
    }
}

async fn write_lines<W>(writer: &mut W, id: usize,
                        outgoing_msgs: &mut sync::mpsc::UnboundedReceiver<MessageQueueItem>)
                        -> io::Result<()>
    where W: io::AsyncWrite + Unpin
{
    use io::AsyncWriteExt as _;

    while let Some(msg) = outgoing_msgs.recv().await {
        let msg: &str = msg.as_ref();
        log::trace!("{} << {}", id, msg.trim_end());
        writer.write_all(msg.as_bytes()).await?;
    }
    Ok(())
}

async fn handle_line(id: usize, line: &str, shared: &State) -> io::Result<()> {
    if let Some(msg) = Message::parse(line) {
        shared.handle_message(id, msg).await
            .map_err(|()| io::Error::new(io::ErrorKind::Other, lines::QUIT))?;
    }
    Ok(())
}

// mod tests
