//! plausch-server – Bibliotheks-Root
//!
//! Deklariert alle Server-Module und stellt den oeffentlichen Einstiegspunkt
//! fuer Integrationstests bereit.

pub mod cli;
pub mod config;
pub mod shutdown;

use std::path::PathBuf;

use anyhow::Result;
use cli::Cli;
use config::{ConfigError, ServerConfig};
use plausch_chat::{ChatServer, KonsolenOperator};
use shutdown::Ende;

/// Haelt den Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Bindet den Port und bedient Verbindungen bis zum Shutdown-Signal
    ///
    /// Reihenfolge:
    /// 1. Listener binden (Fehler sind fatal)
    /// 2. Verbindungen nacheinander mit dem Konsolen-Operator bedienen
    /// 3. Bei Ctrl-C oder geschlossener Konsole zurueckkehren
    pub async fn starten(self) -> Result<Ende> {
        let chat_konfig = self.config.chat_konfig()?;
        let server = ChatServer::binden(&chat_konfig)?;

        tracing::info!(
            adresse = %server.lokale_adresse(),
            "Server laeuft. Beenden mit Ctrl-C"
        );

        let mut operator = KonsolenOperator::konsole();
        let ende = shutdown::bis_zum_signal(&server, &mut operator, shutdown::ctrl_c()).await?;
        Ok(ende)
    }
}

/// Loest die Konfiguration aus Kommandozeile, Umgebung und Datei auf
pub fn konfiguration_aufloesen(
    cli: &Cli,
    env_port: Option<&str>,
    env_config: Option<&str>,
) -> Result<ServerConfig, ConfigError> {
    let pfad = cli
        .config
        .clone()
        .or_else(|| env_config.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(config::STANDARD_CONFIG_PFAD));

    let mut config = ServerConfig::laden(&pfad)?;
    config.port_ueberschreiben(cli.port.as_deref(), env_port)?;
    config.validieren()?;
    Ok(config)
}
