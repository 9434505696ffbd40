//! plausch-chat – Listener und Sitzungsschleife
//!
//! Dieses Crate implementiert:
//! - Listener: bindet den Port, gibt Verbindungen einzeln heraus
//! - Sitzung: strikt abwechselnde Empfangs-/Sendezuege ueber eine Verbindung
//! - Operator-Trait + KonsolenOperator fuer die lokale Konsole
//! - ChatServer: Annahme-Schleife, eine Sitzung nach der anderen
//!
//! # Beispiel
//!
//! ```no_run
//! use plausch_chat::{ChatServer, ChatServerKonfig, KonsolenOperator};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), plausch_chat::ChatError> {
//!     let server = ChatServer::binden(&ChatServerKonfig::default())?;
//!     let mut operator = KonsolenOperator::konsole();
//!     server.starten(&mut operator).await
//! }
//! ```

pub mod error;
pub mod listener;
pub mod operator;
pub mod server;
pub mod session;

#[cfg(test)]
mod tests;

// Bequeme Re-Exporte
pub use error::{ChatError, ChatResult};
pub use listener::{Listener, STANDARD_BACKLOG};
pub use operator::{KonsolenOperator, Operator};
pub use server::{ChatServer, ChatServerKonfig};
pub use session::{Beendigung, SessionZustand, Sitzung};
