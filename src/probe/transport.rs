//! Connection transport used by the prober.
//!
//! The prober only needs to know whether a handshake completes, so the
//! transport surface is a single `connect` call. Production code uses
//! [`TcpTransport`]; tests substitute transports with scripted outcomes.

use std::io;

use async_trait::async_trait;
use tokio::net::TcpStream;

/// Opens connections to candidate endpoints.
///
/// Implementations resolve and dial `host:port` and hand back the live
/// connection. Callers drop the connection as soon as the handshake is
/// confirmed; nothing is ever written to it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// The connection type produced by a successful handshake.
    type Conn: Send;

    /// Dial `host:port` and return the established connection.
    async fn connect(&self, host: &str, port: u16) -> io::Result<Self::Conn>;
}

/// TCP transport backed by the tokio connector.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpTransport;

#[async_trait]
impl Transport for TcpTransport {
    type Conn = TcpStream;

    async fn connect(&self, host: &str, port: u16) -> io::Result<TcpStream> {
        TcpStream::connect((host, port)).await
    }
}
