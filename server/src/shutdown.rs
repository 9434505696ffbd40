//! Prozessweites Beenden per Interrupt
//!
//! Das Signal wird gegen die gesamte Annahme- und Sitzungsschleife
//! ausgewertet. Wartet die Schleife gerade auf `accept`, auf den Peer oder auf
//! den Operator, wird dieser Wartepunkt verworfen. Ein verbundener Peer wird
//! nicht benachrichtigt.

use std::future::Future;

use plausch_chat::{ChatResult, ChatServer, Operator};

/// Warum der Server aufgehoert hat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ende {
    /// Interrupt (Ctrl-C) empfangen
    Signal,
    /// Operator-Eingabe geschlossen
    EingabeGeschlossen,
}

/// Bedient Verbindungen bis `signal` eintritt oder die Operator-Eingabe endet
pub async fn bis_zum_signal<O, F>(
    server: &ChatServer,
    operator: &mut O,
    signal: F,
) -> ChatResult<Ende>
where
    O: Operator,
    F: Future<Output = ()>,
{
    tokio::select! {
        ergebnis = server.starten(operator) => {
            ergebnis?;
            Ok(Ende::EingabeGeschlossen)
        }
        () = signal => {
            tracing::info!("Shutdown-Signal empfangen, Server wird beendet");
            Ok(Ende::Signal)
        }
    }
}

/// Wartet auf Ctrl-C. Schlaegt die Registrierung fehl, wird nie beendet.
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(fehler = %e, "Signal-Handler konnte nicht registriert werden");
        std::future::pending::<()>().await;
    }
}
