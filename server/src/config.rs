//! Server-Konfiguration
//!
//! Quellen in absteigender Prioritaet: Port als Kommandozeilen-Argument,
//! Umgebungsvariable `PLAUSCH_PORT`, TOML-Datei, Standardwerte. Der Server
//! ist ohne Konfigurationsdatei lauffaehig.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use plausch_chat::ChatServerKonfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard-Port des Chat-Servers
pub const STANDARD_PORT: u16 = 9999;

/// Standard-Pfad der Konfigurationsdatei
pub const STANDARD_CONFIG_PFAD: &str = "plausch.toml";

/// Umgebungsvariable fuer den Port
pub const ENV_PORT: &str = "PLAUSCH_PORT";

/// Umgebungsvariable fuer den Pfad der Konfigurationsdatei
pub const ENV_CONFIG: &str = "PLAUSCH_CONFIG";

/// Fehler beim Laden oder Pruefen der Konfiguration. Immer fatal: der Server
/// beginnt dann nicht zu lauschen.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Ungueltiger Port '{wert}': erwartet wird eine Zahl von 1 bis 65535")]
    UngueltigerPort { wert: String },

    #[error("Ungueltige Bind-Adresse '{0}'")]
    UngueltigeAdresse(String),

    #[error("Backlog muss mindestens 1 sein")]
    UngueltigerBacklog,

    #[error("Ungueltiger Log-Level '{0}'")]
    UngueltigerLogLevel(String),

    #[error("Ungueltiges Log-Format '{0}'")]
    UngueltigesLogFormat(String),

    #[error("Konfigurationsdatei '{}' nicht lesbar: {source}", .pfad.display())]
    Lesen {
        pfad: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Konfigurationsfehler in '{}': {source}", .pfad.display())]
    Parsen {
        pfad: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Netzwerk-Einstellungen
    pub netzwerk: NetzwerkEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
    /// Woher die Werte stammen
    #[serde(skip)]
    pub quelle: KonfigQuelle,
}

/// Herkunft einer geladenen Konfiguration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KonfigQuelle {
    /// Nur eingebaute Standardwerte
    #[default]
    Standardwerte,
    /// Aus dieser Datei gelesen
    Datei(PathBuf),
    /// Datei nicht vorhanden, Standardwerte verwendet
    DateiFehlt(PathBuf),
}

/// Netzwerk-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetzwerkEinstellungen {
    /// Bind-Adresse (Standard: alle Interfaces)
    pub bind_adresse: String,
    /// TCP-Port
    pub port: u16,
    /// Laenge der Warteschlange fuer noch nicht angenommene Verbindungen
    pub backlog: u32,
}

impl Default for NetzwerkEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: STANDARD_PORT,
            backlog: plausch_chat::STANDARD_BACKLOG,
        }
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

/// Parst einen Port-Wert von der Kommandozeile oder aus der Umgebung
pub fn port_parsen(wert: &str) -> Result<u16, ConfigError> {
    wert.parse::<u16>()
        .ok()
        .filter(|port| *port != 0)
        .ok_or_else(|| ConfigError::UngueltigerPort {
            wert: wert.to_string(),
        })
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let mut config: Self =
                    toml::from_str(&inhalt).map_err(|source| ConfigError::Parsen {
                        pfad: pfad.to_path_buf(),
                        source,
                    })?;
                config.quelle = KonfigQuelle::Datei(pfad.to_path_buf());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self {
                quelle: KonfigQuelle::DateiFehlt(pfad.to_path_buf()),
                ..Self::default()
            }),
            Err(source) => Err(ConfigError::Lesen {
                pfad: pfad.to_path_buf(),
                source,
            }),
        }
    }

    /// Meldet die Herkunft der Konfiguration. Erst nach der Initialisierung
    /// des Loggings aufrufen, sonst geht die Meldung verloren.
    pub fn quelle_melden(&self) {
        match &self.quelle {
            KonfigQuelle::Datei(pfad) => {
                tracing::info!(pfad = %pfad.display(), "Konfiguration geladen")
            }
            KonfigQuelle::DateiFehlt(pfad) => tracing::warn!(
                pfad = %pfad.display(),
                "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
            ),
            KonfigQuelle::Standardwerte => tracing::info!("Verwende Standardkonfiguration"),
        }
    }

    /// Ueberschreibt den Port: Kommandozeile vor Umgebung vor Datei
    pub fn port_ueberschreiben(
        &mut self,
        aus_cli: Option<&str>,
        aus_env: Option<&str>,
    ) -> Result<(), ConfigError> {
        if let Some(wert) = aus_cli.or(aus_env) {
            self.netzwerk.port = port_parsen(wert)?;
        }
        Ok(())
    }

    /// Prueft alle Werte, bevor irgendetwas gebunden wird
    pub fn validieren(&self) -> Result<(), ConfigError> {
        if self.netzwerk.port == 0 {
            return Err(ConfigError::UngueltigerPort {
                wert: self.netzwerk.port.to_string(),
            });
        }
        if self.netzwerk.backlog == 0 {
            return Err(ConfigError::UngueltigerBacklog);
        }
        self.bind_addr()?;
        if !plausch_observability::log_level_gueltig(&self.logging.level) {
            return Err(ConfigError::UngueltigerLogLevel(self.logging.level.clone()));
        }
        if !plausch_observability::log_format_gueltig(&self.logging.format) {
            return Err(ConfigError::UngueltigesLogFormat(self.logging.format.clone()));
        }
        Ok(())
    }

    /// Gibt die vollstaendige Bind-Adresse zurueck
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .netzwerk
            .bind_adresse
            .parse()
            .map_err(|_| ConfigError::UngueltigeAdresse(self.netzwerk.bind_adresse.clone()))?;
        Ok(SocketAddr::new(ip, self.netzwerk.port))
    }

    /// Konfiguration fuer den Chat-Server
    pub fn chat_konfig(&self) -> Result<ChatServerKonfig, ConfigError> {
        Ok(ChatServerKonfig {
            bind_addr: self.bind_addr()?,
            backlog: self.netzwerk.backlog,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_ist_valide() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.netzwerk.port, 9999);
        assert_eq!(cfg.netzwerk.backlog, 1);
        assert_eq!(cfg.logging.level, "info");
        cfg.validieren().unwrap();
    }

    #[test]
    fn bind_adresse_alle_interfaces() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.bind_addr().unwrap().to_string(), "0.0.0.0:9999");
    }

    #[test]
    fn config_aus_toml_string() {
        let toml = r#"
            [netzwerk]
            port = 7777

            [logging]
            format = "json"
        "#;
        let cfg: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.netzwerk.port, 7777);
        assert_eq!(cfg.logging.format, "json");
        // Nicht angegebene Felder behalten Standardwerte
        assert_eq!(cfg.netzwerk.bind_adresse, "0.0.0.0");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn port_parsen_gueltig() {
        assert_eq!(port_parsen("9999").unwrap(), 9999);
        assert_eq!(port_parsen("65535").unwrap(), 65535);
        assert_eq!(port_parsen("1").unwrap(), 1);
    }

    #[test]
    fn port_parsen_ungueltig() {
        for wert in ["", "0", "65536", "-1", "abc", " 9999", "99.9"] {
            let err = port_parsen(wert).unwrap_err();
            assert!(
                matches!(err, ConfigError::UngueltigerPort { .. }),
                "{wert:?} muss abgelehnt werden"
            );
        }
    }

    #[test]
    fn cli_hat_vorrang_vor_env() {
        let mut cfg = ServerConfig::default();
        cfg.port_ueberschreiben(Some("1234"), Some("5678")).unwrap();
        assert_eq!(cfg.netzwerk.port, 1234);

        cfg.port_ueberschreiben(None, Some("5678")).unwrap();
        assert_eq!(cfg.netzwerk.port, 5678);

        cfg.port_ueberschreiben(None, None).unwrap();
        assert_eq!(cfg.netzwerk.port, 5678);
    }

    #[test]
    fn ungueltiger_port_aus_env_ist_fehler() {
        let mut cfg = ServerConfig::default();
        assert!(cfg.port_ueberschreiben(None, Some("70000")).is_err());
        assert_eq!(cfg.netzwerk.port, STANDARD_PORT);
    }

    #[test]
    fn validierung_findet_fehler() {
        let mut cfg = ServerConfig::default();
        cfg.netzwerk.bind_adresse = "kein-host".into();
        assert!(matches!(cfg.validieren(), Err(ConfigError::UngueltigeAdresse(_))));

        let mut cfg = ServerConfig::default();
        cfg.netzwerk.backlog = 0;
        assert!(matches!(cfg.validieren(), Err(ConfigError::UngueltigerBacklog)));

        let mut cfg = ServerConfig::default();
        cfg.logging.level = "laut".into();
        assert!(matches!(cfg.validieren(), Err(ConfigError::UngueltigerLogLevel(_))));

        let mut cfg = ServerConfig::default();
        cfg.logging.format = "xml".into();
        assert!(matches!(cfg.validieren(), Err(ConfigError::UngueltigesLogFormat(_))));
    }

    #[test]
    fn fehlende_datei_ergibt_standardwerte() {
        let dir = tempfile::tempdir().unwrap();
        let pfad = dir.path().join("fehlt.toml");
        let cfg = ServerConfig::laden(&pfad).unwrap();
        assert_eq!(cfg.netzwerk.port, STANDARD_PORT);
        assert_eq!(cfg.quelle, KonfigQuelle::DateiFehlt(pfad));
    }

    #[test]
    fn datei_wird_geladen() {
        let dir = tempfile::tempdir().unwrap();
        let pfad = dir.path().join("plausch.toml");
        std::fs::write(&pfad, "[netzwerk]\nport = 31392\nbind_adresse = \"127.0.0.1\"\n").unwrap();

        let cfg = ServerConfig::laden(&pfad).unwrap();
        assert_eq!(cfg.bind_addr().unwrap().to_string(), "127.0.0.1:31392");
        assert_eq!(cfg.quelle, KonfigQuelle::Datei(pfad));
    }

    #[test]
    fn kaputte_datei_ist_parse_fehler() {
        let dir = tempfile::tempdir().unwrap();
        let pfad = dir.path().join("plausch.toml");
        std::fs::write(&pfad, "[netzwerk]\nport = 70000\n").unwrap();

        let err = ServerConfig::laden(&pfad).unwrap_err();
        assert!(matches!(err, ConfigError::Parsen { .. }));
        assert!(err.to_string().contains("plausch.toml"));
    }

    #[test]
    fn verzeichnis_statt_datei_ist_lesefehler() {
        let dir = tempfile::tempdir().unwrap();
        let err = ServerConfig::laden(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Lesen { .. }));
    }
}
