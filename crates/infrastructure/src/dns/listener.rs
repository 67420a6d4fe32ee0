use crate::dns::lifecycle::SharedState;
use crate::dns::server::DnsServerHandler;
use crate::dns::transport::tcp::{read_with_length_prefix, send_with_length_prefix};
use podhost_dns_domain::DomainError;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// Classic DNS datagram limit (RFC 1035 §2.3.4).
const MAX_UDP_QUERY_SIZE: usize = 512;

const TCP_LISTEN_BACKLOG: i32 = 1024;

/// How long an accepted connection may take to deliver its query.
const TCP_READ_TIMEOUT: Duration = Duration::from_secs(10);

fn socket_domain(addr: SocketAddr) -> Domain {
    if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    }
}

fn bind_error(addr: SocketAddr, e: impl std::fmt::Display) -> DomainError {
    DomainError::Bind {
        addr: addr.to_string(),
        reason: e.to_string(),
    }
}

/// Plain bind without SO_REUSEADDR, so a second live instance on the same
/// port fails here.
pub(crate) fn bind_udp(addr: SocketAddr) -> Result<UdpSocket, DomainError> {
    let build = || -> std::io::Result<UdpSocket> {
        let socket = Socket::new(socket_domain(addr), Type::DGRAM, Some(Protocol::UDP))?;
        socket.bind(&addr.into())?;
        socket.set_nonblocking(true)?;
        UdpSocket::from_std(socket.into())
    };
    build().map_err(|e| bind_error(addr, e))
}

/// SO_REUSEADDR lets a restart rebind while old connections sit in TIME_WAIT.
pub(crate) fn bind_tcp(addr: SocketAddr) -> Result<TcpListener, DomainError> {
    let build = || -> std::io::Result<TcpListener> {
        let socket = Socket::new(socket_domain(addr), Type::STREAM, Some(Protocol::TCP))?;
        socket.set_reuse_address(true)?;
        socket.bind(&addr.into())?;
        socket.listen(TCP_LISTEN_BACKLOG)?;
        socket.set_nonblocking(true)?;
        TcpListener::from_std(socket.into())
    };
    build().map_err(|e| bind_error(addr, e))
}

async fn is_running(state: &SharedState) -> bool {
    state.read().await.running
}

pub(crate) async fn serve_udp(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    state: SharedState,
    shutdown: CancellationToken,
) {
    let mut recv_buf = [0u8; MAX_UDP_QUERY_SIZE];

    while is_running(&state).await {
        let received = tokio::select! {
            _ = shutdown.cancelled() => break,
            received = socket.recv_from(&mut recv_buf) => received,
        };

        let (n, client) = match received {
            Ok(received) => received,
            Err(e) => {
                if !is_running(&state).await {
                    break;
                }
                error!(error = %e, "UDP recv error");
                continue;
            }
        };

        let query = recv_buf[..n].to_vec();
        let handler = handler.clone();
        let socket = Arc::downgrade(&socket);
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            let Some(response) = handler.handle_raw(&query, client).await else {
                return;
            };
            // The socket is gone once stop() has run; the reply is discarded.
            let Some(socket) = socket.upgrade().filter(|_| !shutdown.is_cancelled()) else {
                debug!(client = %client, "Server stopped, discarding UDP response");
                return;
            };
            if let Err(e) = socket.send_to(&response, client).await {
                debug!(client = %client, error = %e, "Failed to send UDP response");
            }
        });
    }

    debug!("UDP serve loop stopped");
}

pub(crate) async fn serve_tcp(
    listener: Arc<TcpListener>,
    handler: Arc<DnsServerHandler>,
    state: SharedState,
    shutdown: CancellationToken,
) {
    while is_running(&state).await {
        let accepted = tokio::select! {
            _ = shutdown.cancelled() => break,
            accepted = listener.accept() => accepted,
        };

        let (stream, client) = match accepted {
            Ok(accepted) => accepted,
            Err(e) => {
                if !is_running(&state).await {
                    break;
                }
                error!(error = %e, "TCP accept error");
                continue;
            }
        };

        let handler = handler.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_tcp_connection(stream, client, &handler).await {
                debug!(client = %client, error = %e, "TCP connection closed with error");
            }
        });
    }

    debug!("TCP serve loop stopped");
}

/// One query per connection: read it, answer it, close.
async fn handle_tcp_connection(
    mut stream: TcpStream,
    client: SocketAddr,
    handler: &DnsServerHandler,
) -> Result<(), DomainError> {
    let query = tokio::time::timeout(TCP_READ_TIMEOUT, read_with_length_prefix(&mut stream))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: client.to_string(),
        })??;

    if let Some(response) = handler.handle_raw(&query, client).await {
        send_with_length_prefix(&mut stream, &response).await?;
    }
    Ok(())
}
