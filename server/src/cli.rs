//! Kommandozeile des Servers

use std::path::PathBuf;

use clap::Parser;

/// Plausch Chat-Server: bedient eine Verbindung nach der anderen
#[derive(Debug, Clone, Parser)]
#[command(name = "plausch-server", version, about)]
pub struct Cli {
    /// TCP-Port, auf dem gelauscht wird (Standard: 9999)
    ///
    /// Wird als Text angenommen und selbst geprueft, damit ein ungueltiger Wert
    /// als Konfigurationsfehler gemeldet wird.
    pub port: Option<String>,

    /// Pfad zur TOML-Konfiguration (sonst PLAUSCH_CONFIG oder plausch.toml)
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ohne_argumente() {
        let cli = Cli::try_parse_from(["plausch-server"]).unwrap();
        assert!(cli.port.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn port_als_positionsargument() {
        let cli = Cli::try_parse_from(["plausch-server", "31392"]).unwrap();
        assert_eq!(cli.port.as_deref(), Some("31392"));
    }

    #[test]
    fn ungueltiger_port_wird_erst_spaeter_geprueft() {
        let cli = Cli::try_parse_from(["plausch-server", "abc", "--config", "x.toml"]).unwrap();
        assert_eq!(cli.port.as_deref(), Some("abc"));
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn zu_viele_argumente() {
        assert!(Cli::try_parse_from(["plausch-server", "1", "2"]).is_err());
    }
}
