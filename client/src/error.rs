//! Fehlertypen des Clients

use plausch_protocol::ProtokollFehler;
use thiserror::Error;

/// Fehler die bei der Server-Verbindung auftreten koennen
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Verbindung zu {adresse} fehlgeschlagen: {source}")]
    Verbindung {
        adresse: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Protokollfehler: {0}")]
    Protokoll(ProtokollFehler),

    #[error("IO-Fehler: {0}")]
    Io(#[from] std::io::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<ProtokollFehler> for ClientError {
    fn from(e: ProtokollFehler) -> Self {
        match e {
            ProtokollFehler::Io(io) => Self::Io(io),
            andere => Self::Protokoll(andere),
        }
    }
}
