//! plausch-protocol – Wire-Format des Plausch-Chats
//!
//! Dieses Crate definiert, wie eine Chat-Zeile auf dem Draht aussieht:
//! UTF-8-Text mit genau einem `\n` als Abschluss, begrenzte Laenge,
//! das Beenden-Token `\quit` und das `HOST> `-Praefix.

pub mod error;
pub mod nachricht;
pub mod wire;

pub use error::ProtokollFehler;
pub use nachricht::{
    auf_nutzlast_kuerzen, ist_quit_token, kuerzen, nachricht_formatieren, praefix, Kuerzung,
    HOST_LABEL, MAX_HANDLE_ZEICHEN, MAX_NUTZLAST, MAX_ZEILE_ZEICHEN, QUIT_TOKEN,
    TRENNER,
};
pub use wire::ZeilenCodec;
