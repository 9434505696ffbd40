//! Sitzungsschleife: eine Verbindung, strikt abwechselnde Zuege
//!
//! Ablauf pro Zugpaar:
//! 1. Empfangen: eine Zeile vom Peer lesen. Stream-Ende oder `\quit` beendet
//!    die Sitzung, sonst wird die Zeile unveraendert angezeigt.
//! 2. Senden: den Operator mit `HOST> ` fragen. Zu lange Eingaben werden
//!    gekuerzt, `\quit` schliesst die Verbindung ohne weitere Uebertragung,
//!    alles andere geht als `HOST> <text>\n` an den Peer.
//!
//! Der Peer spricht immer zuerst.

use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use plausch_protocol::{
    auf_nutzlast_kuerzen, ist_quit_token, nachricht_formatieren, praefix, ZeilenCodec,
    HOST_LABEL, MAX_NUTZLAST,
};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;
use uuid::Uuid;

use crate::error::{ChatError, ChatResult};
use crate::operator::Operator;

/// Zustand einer Sitzung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionZustand {
    /// Als naechstes wird eine Zeile vom Peer gelesen
    WartetAufPeer,
    /// Als naechstes wird der Operator gefragt
    WartetAufOperator,
    /// Verbindung geschlossen, keine weiteren Zuege
    Beendet,
}

/// Warum eine Sitzung regulaer endete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Beendigung {
    /// Peer hat den Stream ohne `\quit` geschlossen
    PeerGetrennt,
    /// Peer hat `\quit` gesendet
    DurchPeer,
    /// Operator hat `\quit` eingegeben
    DurchServer,
    /// Operator-Eingabe wurde geschlossen (EOF)
    EingabeGeschlossen,
}

impl Beendigung {
    /// Gibt true zurueck wenn nach dieser Sitzung keine weitere angenommen
    /// wird
    pub fn beendet_listener(&self) -> bool {
        matches!(self, Self::EingabeGeschlossen)
    }

    pub fn durch_peer(&self) -> bool {
        matches!(self, Self::PeerGetrennt | Self::DurchPeer)
    }
}

/// Eine aktive Chat-Sitzung ueber genau eine Verbindung
#[derive(Debug)]
pub struct Sitzung<S> {
    pub id: Uuid,
    pub peer_addr: SocketAddr,
    zustand: SessionZustand,
    verbindung: Framed<S, ZeilenCodec>,
    zuege: u64,
}

impl<S> Sitzung<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn neu(stream: S, peer_addr: SocketAddr) -> Self {
        Self {
            id: Uuid::new_v4(),
            peer_addr,
            zustand: SessionZustand::WartetAufPeer,
            verbindung: Framed::new(stream, ZeilenCodec::new()),
            zuege: 0,
        }
    }

    pub fn zustand(&self) -> SessionZustand {
        self.zustand
    }

    /// Fuehrt die Sitzung bis zum Ende und schliesst danach die Verbindung.
    ///
    /// Fehler betreffen nur diese Verbindung; der Aufrufer nimmt danach die
    /// naechste an.
    pub async fn fuehren<O: Operator>(mut self, operator: &mut O) -> ChatResult<Beendigung> {
        tracing::debug!(sitzung = %self.id, peer = %self.peer_addr, "Sitzung beginnt");

        let ergebnis = self.zuege_abwechseln(operator).await;
        self.schliessen().await;

        match &ergebnis {
            Ok(grund) if grund.durch_peer() => tracing::info!(
                sitzung = %self.id,
                peer = %self.peer_addr,
                zuege = self.zuege,
                grund = ?grund,
                "Sitzung durch Peer beendet"
            ),
            Ok(grund) => tracing::info!(
                sitzung = %self.id,
                peer = %self.peer_addr,
                zuege = self.zuege,
                grund = ?grund,
                "Sitzung durch Server beendet"
            ),
            Err(e) => tracing::warn!(
                sitzung = %self.id,
                peer = %self.peer_addr,
                fehler = %e,
                "Sitzung wegen Fehler abgebrochen"
            ),
        }

        ergebnis
    }

    async fn zuege_abwechseln<O: Operator>(&mut self, operator: &mut O) -> ChatResult<Beendigung> {
        loop {
            // Empfangen
            let zeile = match self.verbindung.next().await {
                None => return Ok(Beendigung::PeerGetrennt),
                Some(Err(e)) => return Err(e.into()),
                Some(Ok(zeile)) => zeile,
            };
            self.zuege += 1;

            if ist_quit_token(&zeile) {
                return Ok(Beendigung::DurchPeer);
            }
            operator
                .nachricht_anzeigen(&zeile)
                .await
                .map_err(ChatError::Konsole)?;
            self.wechseln(SessionZustand::WartetAufPeer, SessionZustand::WartetAufOperator)?;

            // Senden
            let eingabe = operator
                .eingabe_lesen(&praefix(HOST_LABEL))
                .await
                .map_err(ChatError::Konsole)?;
            let Some(eingabe) = eingabe else {
                return Ok(Beendigung::EingabeGeschlossen);
            };
            self.zuege += 1;

            let kuerzung = auf_nutzlast_kuerzen(&eingabe);
            if kuerzung.wurde_gekuerzt() {
                tracing::warn!(
                    sitzung = %self.id,
                    verworfen = kuerzung.verworfen,
                    "Operator-Eingabe gekuerzt"
                );
                operator
                    .warnung_anzeigen(&format!(
                        "Eingabe auf {MAX_NUTZLAST} Zeichen gekuerzt, {} Zeichen verworfen",
                        kuerzung.verworfen
                    ))
                    .await
                    .map_err(ChatError::Konsole)?;
            }

            if ist_quit_token(kuerzung.text) {
                return Ok(Beendigung::DurchServer);
            }

            self.verbindung
                .send(nachricht_formatieren(HOST_LABEL, kuerzung.text))
                .await?;
            self.wechseln(SessionZustand::WartetAufOperator, SessionZustand::WartetAufPeer)?;
        }
    }

    fn wechseln(&mut self, von: SessionZustand, nach: SessionZustand) -> ChatResult<()> {
        if self.zustand != von {
            return Err(ChatError::Zustand(format!(
                "{:?} -> {:?} aus Zustand {:?}",
                von, nach, self.zustand
            )));
        }
        self.zustand = nach;
        Ok(())
    }

    async fn schliessen(&mut self) {
        if self.zustand == SessionZustand::Beendet {
            return;
        }
        self.zustand = SessionZustand::Beendet;
        if let Err(e) = self.verbindung.close().await {
            tracing::debug!(sitzung = %self.id, fehler = %e, "Schliessen der Verbindung fehlgeschlagen");
        }
    }
}
