//! Fehlertypen fuer das Wire-Format

use thiserror::Error;

/// Fehler beim Dekodieren oder Kodieren einer Chat-Zeile
///
/// Alle Varianten sind auf eine einzelne Verbindung beschraenkt: der Aufrufer
/// schliesst die Verbindung und nimmt die naechste an.
#[derive(Debug, Error)]
pub enum ProtokollFehler {
    #[error("Ungueltiges UTF-8 ab Byte {position}")]
    UngueltigesUtf8 { position: usize },

    #[error("Zeile zu lang: {laenge} (Maximum: {max})")]
    ZeileZuLang { laenge: usize, max: usize },

    #[error("Verbindung endete mitten in einer Zeile ({bytes} Bytes ohne Zeilenende)")]
    UnvollstaendigeZeile { bytes: usize },

    #[error("Nachricht enthaelt ein Zeilenende")]
    EingebettetesZeilenende,

    #[error("IO-Fehler: {0}")]
    Io(#[from] std::io::Error),
}
