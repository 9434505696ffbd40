//! Fehlertypen fuer das Chat-Crate

use std::net::SocketAddr;

use plausch_protocol::ProtokollFehler;
use thiserror::Error;

/// Chat-Fehlertypen
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Port-Bindung auf {addr} fehlgeschlagen: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Protokollfehler: {0}")]
    Protokoll(ProtokollFehler),

    #[error("IO-Fehler: {0}")]
    Io(#[from] std::io::Error),

    /// Die lokale Konsole ist nicht mehr nutzbar. Betrifft jede weitere
    /// Sitzung, nicht nur die aktuelle Verbindung.
    #[error("Konsole nicht verfuegbar: {0}")]
    Konsole(#[source] std::io::Error),

    #[error("Ungueltiger Zugwechsel: {0}")]
    Zustand(String),
}

pub type ChatResult<T> = Result<T, ChatError>;

impl From<ProtokollFehler> for ChatError {
    fn from(e: ProtokollFehler) -> Self {
        match e {
            // Socket-Fehler aus dem Codec sind keine Protokollverletzung
            ProtokollFehler::Io(io) => Self::Io(io),
            andere => Self::Protokoll(andere),
        }
    }
}

impl ChatError {
    /// Gibt true zurueck wenn der Fehler nur die aktuelle Verbindung betrifft
    /// und der Listener weiterlaufen kann
    pub fn ist_verbindungslokal(&self) -> bool {
        !matches!(self, Self::Bind { .. } | Self::Konsole(_))
    }
}
