//! `CurrencyServer` builder and accept loop.

use std::sync::Arc;
use std::time::Duration;

use moneta_data::Currency;
use moneta_protocol::JsonCodec;
use moneta_transport::TcpTransport;

use crate::MonetaError;
use crate::backoff::Backoff;
use crate::handler::handle_connection;

/// Default idle deadline for the JSON protocol: a client has this long
/// between exchanges to deliver its next complete request.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(45);

/// Which wire encoding a server instance speaks.
///
/// One server speaks exactly one protocol; deployments that need both
/// run the two variants as separate processes on separate ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireProtocol {
    /// Newline-delimited `GET <query>` commands.
    Text,
    /// One JSON value per exchange, with an idle deadline.
    Json,
}

/// Shared server state passed to each connection handler task.
///
/// The currency table is the only state shared across sessions. It is
/// written once, before the listener starts, and read-only thereafter,
/// which is what makes lock-free concurrent reads safe.
pub(crate) struct ServerState {
    pub(crate) table: Vec<Currency>,
    pub(crate) protocol: WireProtocol,
    pub(crate) idle_timeout: Duration,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting a [`CurrencyServer`].
pub struct CurrencyServerBuilder {
    bind_addr: String,
    protocol: WireProtocol,
    idle_timeout: Duration,
}

impl CurrencyServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "0.0.0.0:4040".to_string(),
            protocol: WireProtocol::Text,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    /// Sets the address to bind the listener to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the wire protocol this server speaks.
    pub fn protocol(mut self, protocol: WireProtocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Overrides the JSON idle deadline (default 45 s). The text
    /// protocol has no deadline and ignores this.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Binds the listener and builds the server around the given
    /// currency table.
    pub async fn build(self, table: Vec<Currency>) -> Result<CurrencyServer, MonetaError> {
        let transport = TcpTransport::bind(&self.bind_addr).await?;
        let state = Arc::new(ServerState {
            table,
            protocol: self.protocol,
            idle_timeout: self.idle_timeout,
            codec: JsonCodec,
        });
        Ok(CurrencyServer { transport, state })
    }
}

impl Default for CurrencyServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running currency lookup server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct CurrencyServer {
    transport: TcpTransport,
    state: Arc<ServerState>,
}

impl CurrencyServer {
    /// Creates a new builder.
    pub fn builder() -> CurrencyServerBuilder {
        CurrencyServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the accept loop.
    ///
    /// Each accepted connection is spawned onto its own task; the loop
    /// never waits for a session to finish, and a failing session never
    /// affects the loop or its siblings. Transient accept failures back
    /// off exponentially; exhausting the retry budget is the only way
    /// this returns an error after a successful bind.
    pub async fn run(mut self) -> Result<(), MonetaError> {
        tracing::info!(protocol = ?self.state.protocol, "currency service running");

        let mut backoff = Backoff::new();
        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    backoff.reset();
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "session ended with error");
                        }
                    });
                }
                Err(e) if e.is_transient() => match backoff.failure() {
                    Some(delay) => {
                        tracing::warn!(
                            error = %e,
                            tries = backoff.tries(),
                            ?delay,
                            "transient accept failure, backing off"
                        );
                        tokio::time::sleep(delay).await;
                    }
                    None => {
                        tracing::error!(error = %e, "accept retry budget exhausted");
                        return Err(MonetaError::AcceptRetriesExhausted(Backoff::budget()));
                    }
                },
                Err(e) => {
                    // Not worth a retry counter: log and keep accepting.
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
