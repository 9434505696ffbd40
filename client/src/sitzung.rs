//! Gespraechsschleife des Clients
//!
//! Der Client spricht zuerst: Eingabe lesen, als `<handle>> <text>` senden,
//! eine Antwort empfangen und anzeigen. `\quit` schliesst die Verbindung
//! lokal, ohne etwas zu senden.

use plausch_chat::Operator;
use plausch_protocol::{
    auf_nutzlast_kuerzen, ist_quit_token, kuerzen, nachricht_formatieren, praefix,
    MAX_HANDLE_ZEICHEN, MAX_NUTZLAST,
};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::connection::ServerVerbindung;
use crate::error::ClientResult;

/// Warum der Client aufgehoert hat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientEnde {
    /// Benutzer hat `\quit` eingegeben
    Beendet,
    /// Server hat die Verbindung geschlossen
    ServerGetrennt,
    /// Konsole geschlossen (EOF)
    EingabeGeschlossen,
}

/// Fragt nach einem nicht-leeren Handle und kuerzt es auf
/// [`MAX_HANDLE_ZEICHEN`]. `None` wenn die Eingabe geschlossen wurde.
pub async fn handle_erfragen<O: Operator>(operator: &mut O) -> ClientResult<Option<String>> {
    loop {
        let Some(eingabe) = operator.eingabe_lesen("Handle eingeben: ").await? else {
            return Ok(None);
        };
        if eingabe.is_empty() {
            continue;
        }

        let kuerzung = kuerzen(&eingabe, MAX_HANDLE_ZEICHEN);
        if kuerzung.wurde_gekuerzt() {
            operator
                .warnung_anzeigen(&format!(
                    "Handle auf {MAX_HANDLE_ZEICHEN} Zeichen gekuerzt"
                ))
                .await?;
        }
        return Ok(Some(kuerzung.text.to_string()));
    }
}

/// Fuehrt das Gespraech bis `\quit`, Trennung oder Ende der Eingabe
pub async fn plaudern<S, O>(
    mut verbindung: ServerVerbindung<S>,
    handle: &str,
    operator: &mut O,
) -> ClientResult<ClientEnde>
where
    S: AsyncRead + AsyncWrite + Unpin,
    O: Operator,
{
    let prompt = praefix(handle);

    let ende = loop {
        let Some(eingabe) = operator.eingabe_lesen(&prompt).await? else {
            break ClientEnde::EingabeGeschlossen;
        };

        let kuerzung = auf_nutzlast_kuerzen(&eingabe);
        if kuerzung.wurde_gekuerzt() {
            tracing::warn!(verworfen = kuerzung.verworfen, "Eingabe gekuerzt");
            operator
                .warnung_anzeigen(&format!(
                    "Eingabe auf {MAX_NUTZLAST} Zeichen gekuerzt, {} Zeichen verworfen",
                    kuerzung.verworfen
                ))
                .await?;
        }
        if ist_quit_token(kuerzung.text) {
            break ClientEnde::Beendet;
        }

        verbindung
            .senden(nachricht_formatieren(handle, kuerzung.text))
            .await?;

        match verbindung.empfangen().await? {
            Some(antwort) if !ist_quit_token(&antwort) => {
                operator.nachricht_anzeigen(&antwort).await?;
            }
            _ => break ClientEnde::ServerGetrennt,
        }
    };

    verbindung.schliessen().await;
    tracing::info!(grund = ?ende, "Verbindung beendet");
    Ok(ende)
}
