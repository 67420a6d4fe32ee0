use crate::dns::listener;
use crate::dns::server::DnsServerHandler;
use podhost_dns_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Default)]
pub(crate) struct ServerState {
    pub(crate) running: bool,
    udp: Option<Arc<UdpSocket>>,
    tcp: Option<Arc<TcpListener>>,
    shutdown: Option<CancellationToken>,
    serve_loops: Vec<JoinHandle<()>>,
}

pub(crate) type SharedState = Arc<RwLock<ServerState>>;

/// Owns the UDP socket and TCP listener of one resolver instance.
///
/// `Stopped --start()--> Running --stop()--> Stopped`. Construction performs
/// no network I/O.
pub struct DnsServer {
    handler: Arc<DnsServerHandler>,
    listen_addr: SocketAddr,
    state: SharedState,
}

impl DnsServer {
    pub fn new(handler: DnsServerHandler) -> Self {
        let listen_addr = handler.use_case().config().listen_addr();
        Self {
            handler: Arc::new(handler),
            listen_addr,
            state: SharedState::default(),
        }
    }

    /// Binds both transports on the configured port and spawns the serve loops.
    ///
    /// Returns as soon as the loops are running. Fails with
    /// [`DomainError::AlreadyRunning`] without touching the live listeners.
    pub async fn start(&self) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.running {
            return Err(DomainError::AlreadyRunning);
        }

        let udp = Arc::new(listener::bind_udp(self.listen_addr)?);
        let tcp = match listener::bind_tcp(self.listen_addr) {
            Ok(tcp) => Arc::new(tcp),
            Err(e) => {
                drop(udp);
                return Err(e);
            }
        };

        let shutdown = CancellationToken::new();
        let udp_loop = tokio::spawn(listener::serve_udp(
            udp.clone(),
            self.handler.clone(),
            self.state.clone(),
            shutdown.clone(),
        ));
        let tcp_loop = tokio::spawn(listener::serve_tcp(
            tcp.clone(),
            self.handler.clone(),
            self.state.clone(),
            shutdown.clone(),
        ));

        state.running = true;
        state.udp = Some(udp);
        state.tcp = Some(tcp);
        state.shutdown = Some(shutdown);
        state.serve_loops = vec![udp_loop, tcp_loop];

        info!(
            bind_address = %self.listen_addr,
            domain = %self.handler.use_case().config().domain(),
            "DNS server started (UDP + TCP)"
        );
        Ok(())
    }

    /// Closes both transports. A no-op when not running.
    ///
    /// Does not return the instant the flag flips: it waits for the two serve
    /// loops to observe the cancellation and drop their socket handles, so the
    /// port is free once this resolves and an immediate `start()` can rebind.
    /// That wait is bounded by one loop iteration. Query tasks already in
    /// flight are not awaited; they hold no socket and discard their results.
    pub async fn stop(&self) {
        let serve_loops = {
            let mut state = self.state.write().await;
            if !state.running {
                return;
            }
            state.running = false;
            if let Some(shutdown) = state.shutdown.take() {
                shutdown.cancel();
            }
            state.udp = None;
            state.tcp = None;
            std::mem::take(&mut state.serve_loops)
        };

        for serve_loop in serve_loops {
            if let Err(e) = serve_loop.await {
                warn!(error = %e, "DNS serve loop ended abnormally");
            }
        }

        info!(bind_address = %self.listen_addr, "DNS server stopped");
    }

    pub async fn is_running(&self) -> bool {
        self.state.read().await.running
    }

    /// Address the UDP socket is bound to while running.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        let state = self.state.read().await;
        state.udp.as_ref().and_then(|socket| socket.local_addr().ok())
    }
}

impl Drop for DnsServer {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_write() {
            if let Some(shutdown) = state.shutdown.take() {
                shutdown.cancel();
            }
            state.running = false;
        }
    }
}
