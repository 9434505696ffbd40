//! Annahme-Schleife: Listener und Sitzungen im Wechsel
//!
//! `annehmen()` -> Sitzung bis zum Ende -> wieder `annehmen()`. Es laeuft nie
//! mehr als eine Sitzung gleichzeitig; weitere Peers warten im Backlog.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{ChatError, ChatResult};
use crate::listener::Listener;
use crate::operator::Operator;
use crate::session::Sitzung;

/// Wartezeit nach einem fehlgeschlagenen `accept`
pub const ANNAHME_PAUSE: Duration = Duration::from_millis(100);

/// Konfiguration des Chat-Servers
#[derive(Debug, Clone)]
pub struct ChatServerKonfig {
    pub bind_addr: SocketAddr,
    pub backlog: u32,
}

impl Default for ChatServerKonfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 9999)),
            backlog: crate::listener::STANDARD_BACKLOG,
        }
    }
}

/// Chat-Server mit gebundenem Listener
#[derive(Debug)]
pub struct ChatServer {
    listener: Listener,
}

impl ChatServer {
    /// Bindet den Listener. Ein Fehler hier ist fatal fuer den Prozess.
    pub fn binden(konfig: &ChatServerKonfig) -> ChatResult<Self> {
        let listener = Listener::binden(konfig.bind_addr, konfig.backlog)?;
        Ok(Self { listener })
    }

    pub fn lokale_adresse(&self) -> SocketAddr {
        self.listener.lokale_adresse()
    }

    /// Bedient Verbindungen nacheinander.
    ///
    /// Kehrt zurueck, wenn die Operator-Eingabe geschlossen wurde oder die
    /// Konsole ausfaellt. Fehler einer Verbindung werden geloggt und beenden
    /// nur diese Sitzung.
    pub async fn starten<O: Operator>(&self, operator: &mut O) -> ChatResult<()> {
        tracing::info!(addr = %self.lokale_adresse(), "Chat-Server bereit");

        loop {
            let (stream, peer_addr) = match self.listener.annehmen().await {
                Ok(verbindung) => verbindung,
                Err(e) => {
                    nach_annahmefehler(&e).await;
                    continue;
                }
            };

            match Sitzung::neu(stream, peer_addr).fuehren(operator).await {
                Ok(grund) if grund.beendet_listener() => {
                    tracing::info!("Operator-Eingabe geschlossen, keine weiteren Verbindungen");
                    return Ok(());
                }
                Ok(_) => {}
                // Bereits in der Sitzung geloggt
                Err(e) if e.ist_verbindungslokal() => {}
                Err(e) => return Err(e),
            }

            tracing::info!(addr = %self.lokale_adresse(), "Warte auf naechste Verbindung");
        }
    }
}

/// Loggt einen Annahmefehler und wartet, bevor erneut angenommen wird.
/// Dauerhafte Fehler wie EMFILE sollen die Schleife nicht heisslaufen lassen.
async fn nach_annahmefehler(fehler: &ChatError) {
    tracing::warn!(fehler = %fehler, "Annahme einer Verbindung fehlgeschlagen");
    tokio::time::sleep(ANNAHME_PAUSE).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn annahmefehler_pausiert_vor_dem_naechsten_versuch() {
        let fehler = ChatError::Io(std::io::Error::from_raw_os_error(24));
        let start = tokio::time::Instant::now();

        nach_annahmefehler(&fehler).await;

        assert!(start.elapsed() >= ANNAHME_PAUSE);
    }
}
