//! TCP-Listener: bindet den Server-Port und gibt Verbindungen einzeln heraus

use std::io;
use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpSocket, TcpStream};

use crate::error::{ChatError, ChatResult};

/// Backlog fuer wartende Verbindungen. Es wird immer nur eine Verbindung
/// bedient, weitere warten in der Warteschlange des Kernels.
pub const STANDARD_BACKLOG: u32 = 1;

/// Gebundener Server-Endpunkt
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
    adresse: SocketAddr,
}

impl Listener {
    /// Bindet `addr` und markiert den Socket als bereit zur Annahme.
    ///
    /// Schlaegt mit [`ChatError::Bind`] fehl wenn der Port belegt, nicht
    /// erlaubt oder ungueltig ist. Im Fehlerfall wird der Socket verworfen.
    pub fn binden(addr: SocketAddr, backlog: u32) -> ChatResult<Self> {
        let bind_fehler = |source: io::Error| ChatError::Bind { addr, source };

        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        }
        .map_err(bind_fehler)?;

        // Unter Windows erlaubt SO_REUSEADDR das Binden eines belegten Ports
        #[cfg(unix)]
        socket.set_reuseaddr(true).map_err(bind_fehler)?;
        socket.bind(addr).map_err(bind_fehler)?;
        let inner = socket.listen(backlog).map_err(bind_fehler)?;
        let adresse = inner.local_addr().map_err(bind_fehler)?;

        tracing::info!(addr = %adresse, backlog, "Listener gebunden");
        Ok(Self { inner, adresse })
    }

    /// Tatsaechlich gebundene Adresse (relevant bei Port 0)
    pub fn lokale_adresse(&self) -> SocketAddr {
        self.adresse
    }

    /// Wartet auf den naechsten Peer.
    ///
    /// Einziger Wartepunkt zwischen zwei Sitzungen; der Future darf jederzeit
    /// verworfen werden.
    pub async fn annehmen(&self) -> ChatResult<(TcpStream, SocketAddr)> {
        let (stream, peer_addr) = self.inner.accept().await?;
        if let Err(e) = stream.set_nodelay(true) {
            tracing::debug!(peer = %peer_addr, fehler = %e, "TCP_NODELAY nicht gesetzt");
        }
        tracing::info!(peer = %peer_addr, "Verbindung angenommen");
        Ok((stream, peer_addr))
    }
}
