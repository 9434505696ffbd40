//! Client-seitige TCP-Verbindung zum Plausch-Server
//!
//! Nutzt den ZeilenCodec aus plausch-protocol fuer das Wire-Format.

use futures_util::{SinkExt, StreamExt};
use plausch_protocol::ZeilenCodec;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_util::codec::Framed;

use crate::error::{ClientError, ClientResult};

/// Verbindung zum Server, gerahmt mit dem ZeilenCodec
pub struct ServerVerbindung<S = TcpStream> {
    framed: Framed<S, ZeilenCodec>,
}

impl ServerVerbindung<TcpStream> {
    /// Baut eine TCP-Verbindung zum Server auf
    pub async fn verbinden(host: &str, port: u16) -> ClientResult<Self> {
        let adresse = format!("{host}:{port}");
        tracing::info!("Verbinde mit {}", adresse);
        let stream = TcpStream::connect(&adresse)
            .await
            .map_err(|source| ClientError::Verbindung {
                adresse: adresse.clone(),
                source,
            })?;
        tracing::info!("TCP-Verbindung hergestellt zu {}", adresse);
        Ok(Self::neu(stream))
    }
}

impl<S> ServerVerbindung<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn neu(stream: S) -> Self {
        Self {
            framed: Framed::new(stream, ZeilenCodec::new()),
        }
    }

    /// Sendet eine fertig formatierte Zeile
    pub async fn senden(&mut self, zeile: String) -> ClientResult<()> {
        self.framed.send(zeile).await?;
        Ok(())
    }

    /// Wartet auf die naechste Zeile. `None` wenn der Server getrennt hat.
    pub async fn empfangen(&mut self) -> ClientResult<Option<String>> {
        match self.framed.next().await {
            Some(zeile) => Ok(Some(zeile?)),
            None => Ok(None),
        }
    }

    /// Schliesst die Verbindung
    pub async fn schliessen(mut self) {
        if let Err(e) = self.framed.close().await {
            tracing::debug!(fehler = %e, "Schliessen der Verbindung fehlgeschlagen");
        }
    }
}
