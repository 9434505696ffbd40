//! Plausch Server – Einstiegspunkt
//!
//! Liest Kommandozeile und Konfiguration, initialisiert das Logging und
//! startet den Server.

use anyhow::Result;
use clap::Parser;
use plausch_server::{cli::Cli, config, konfiguration_aufloesen, Server};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_port = std::env::var(config::ENV_PORT).ok();
    let env_config = std::env::var(config::ENV_CONFIG).ok();
    let config = konfiguration_aufloesen(&cli, env_port.as_deref(), env_config.as_deref())?;

    plausch_observability::logging_initialisieren(&config.logging.level, &config.logging.format);
    config.quelle_melden();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = config.netzwerk.port,
        "Plausch Server wird initialisiert"
    );

    let ende = Server::neu(config).starten().await?;
    tracing::info!(grund = ?ende, "Server beendet");

    // Der stdin-Leser blockiert einen Thread, den die Runtime beim Beenden
    // nicht abbrechen kann
    std::process::exit(0);
}
