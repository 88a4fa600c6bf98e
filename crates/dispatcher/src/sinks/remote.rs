//! RemoteSink - ships lines to a destination named by a URL-like string

use contracts::{ContractError, LineSink, SinkIdentity};
use std::net::SocketAddr;
use tokio::io::AsyncWriteExt;
use tokio::net::{lookup_host, TcpStream, UdpSocket};
use tracing::{debug, instrument};

use super::append::AppendFile;

/// Transport selected from the destination string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteTarget {
    /// `udp://host:port`, one datagram per line
    Udp(String),
    /// `tcp://host:port`, persistent stream
    Tcp(String),
    /// `file://<path>` or a bare path
    Path(String),
}

impl RemoteTarget {
    /// Resolve the transport for a destination
    ///
    /// Unknown schemes fall back to treating the whole string as a path.
    pub fn parse(destination: &str) -> Self {
        if let Some(addr) = destination.strip_prefix("udp://") {
            Self::Udp(addr.to_string())
        } else if let Some(addr) = destination.strip_prefix("tcp://") {
            Self::Tcp(addr.to_string())
        } else if let Some(path) = destination.strip_prefix("file://") {
            Self::Path(path.to_string())
        } else {
            Self::Path(destination.to_string())
        }
    }
}

enum Transport {
    Udp {
        addr: String,
        socket: Option<UdpSocket>,
    },
    Tcp {
        addr: String,
        stream: Option<TcpStream>,
    },
    Path(AppendFile),
}

/// Sink that sends lines to a remote destination
///
/// The connection (or file) is opened lazily on the first `process` call and
/// reused afterwards. A failed network write releases the connection so the
/// next line opens a fresh one; the failed line itself is not resent.
pub struct RemoteSink {
    destination: String,
    name: String,
    transport: Transport,
}

impl RemoteSink {
    /// Create a new RemoteSink
    pub fn new(destination: impl Into<String>) -> Self {
        let destination = destination.into();
        let name = SinkIdentity::Remote(destination.clone()).to_string();
        let transport = match RemoteTarget::parse(&destination) {
            RemoteTarget::Udp(addr) => Transport::Udp { addr, socket: None },
            RemoteTarget::Tcp(addr) => Transport::Tcp { addr, stream: None },
            RemoteTarget::Path(path) => Transport::Path(AppendFile::new(path)),
        };

        Self {
            destination,
            name,
            transport,
        }
    }

    /// Destination string as supplied
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Whether a connection or file handle is currently held
    pub fn is_open(&self) -> bool {
        match &self.transport {
            Transport::Udp { socket, .. } => socket.is_some(),
            Transport::Tcp { stream, .. } => stream.is_some(),
            Transport::Path(target) => target.is_open(),
        }
    }

    async fn send_udp(
        name: &str,
        addr: &str,
        socket: &mut Option<UdpSocket>,
        data: &[u8],
    ) -> Result<(), ContractError> {
        if socket.is_none() {
            *socket = Some(connect_udp(name, addr).await?);
        }
        let Some(udp) = socket.as_ref() else {
            return Err(ContractError::sink_open(name, "socket not connected"));
        };

        match udp.send(data).await {
            Ok(sent) => {
                debug!(sink = name, bytes = sent, "Sent");
                Ok(())
            }
            Err(e) => {
                *socket = None;
                Err(ContractError::sink_write(name, e.to_string()))
            }
        }
    }

    async fn send_tcp(
        name: &str,
        addr: &str,
        stream: &mut Option<TcpStream>,
        data: &[u8],
    ) -> Result<(), ContractError> {
        if stream.is_none() {
            let connected = TcpStream::connect(addr)
                .await
                .map_err(|e| ContractError::sink_open(name, e.to_string()))?;
            debug!(sink = name, target = addr, "RemoteSink connected");
            *stream = Some(connected);
        }
        let Some(tcp) = stream.as_mut() else {
            return Err(ContractError::sink_open(name, "stream not connected"));
        };

        if let Err(e) = tcp.write_all(data).await {
            *stream = None;
            return Err(ContractError::sink_write(name, e.to_string()));
        }
        Ok(())
    }
}

async fn connect_udp(name: &str, addr: &str) -> Result<UdpSocket, ContractError> {
    let target: SocketAddr = lookup_host(addr)
        .await
        .map_err(|e| ContractError::sink_open(name, e.to_string()))?
        .next()
        .ok_or_else(|| ContractError::sink_open(name, format!("no address for '{addr}'")))?;

    let bind_addr = if target.is_ipv4() {
        "0.0.0.0:0"
    } else {
        "[::]:0"
    };
    let socket = UdpSocket::bind(bind_addr)
        .await
        .map_err(|e| ContractError::sink_open(name, e.to_string()))?;
    socket
        .connect(target)
        .await
        .map_err(|e| ContractError::sink_open(name, e.to_string()))?;

    debug!(sink = name, target = %target, "RemoteSink connected");
    Ok(socket)
}

impl LineSink for RemoteSink {
    fn identity(&self) -> SinkIdentity {
        SinkIdentity::Remote(self.destination.clone())
    }

    #[instrument(name = "remote_sink_process", skip(self, line), fields(sink = %self.name))]
    async fn process(&mut self, line: &str) -> Result<(), ContractError> {
        let printed = format!("{line}\n");
        let data = printed.as_bytes();

        match &mut self.transport {
            Transport::Udp { addr, socket } => Self::send_udp(&self.name, addr, socket, data).await,
            Transport::Tcp { addr, stream } => Self::send_tcp(&self.name, addr, stream, data).await,
            Transport::Path(target) => {
                target.acquire(&self.name).await?;
                target.append(&self.name, data).await
            }
        }
    }

    #[instrument(name = "remote_sink_flush", skip(self), fields(sink = %self.name))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        match &mut self.transport {
            // UDP doesn't buffer
            Transport::Udp { .. } => Ok(()),
            Transport::Tcp { stream, .. } => match stream.as_mut() {
                Some(tcp) => tcp
                    .flush()
                    .await
                    .map_err(|e| ContractError::sink_write(&self.name, e.to_string())),
                None => Ok(()),
            },
            Transport::Path(target) => target.flush(&self.name).await,
        }
    }
}
