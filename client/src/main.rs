//! Plausch Client – Einstiegspunkt

use anyhow::Result;
use clap::Parser;
use plausch_chat::{KonsolenOperator, Operator};
use plausch_client::{handle_erfragen, plaudern, ClientEnde, ClientResult, ServerVerbindung};

/// Plausch Chat-Client
#[derive(Debug, Parser)]
#[command(name = "plausch-client", version, about)]
struct Cli {
    /// Hostname oder Adresse des Servers
    host: String,
    /// Port des Servers
    port: u16,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    plausch_observability::logging_initialisieren("warn", "text");

    let verbindung = ServerVerbindung::verbinden(&cli.host, cli.port).await?;
    let mut operator = KonsolenOperator::konsole();

    tokio::select! {
        ergebnis = gespraech(verbindung, &mut operator) => {
            let ende = ergebnis?;
            tracing::info!(grund = ?ende, "Client beendet");
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("Shutdown-Signal empfangen");
        }
    }

    // Siehe Server: der stdin-Leser wuerde das Runtime-Ende blockieren
    std::process::exit(0);
}

async fn gespraech<O: Operator>(
    verbindung: ServerVerbindung,
    operator: &mut O,
) -> ClientResult<Option<ClientEnde>> {
    let Some(handle) = handle_erfragen(operator).await? else {
        return Ok(None);
    };
    plaudern(verbindung, &handle, operator).await.map(Some)
}
