//! Operator-Schnittstelle der Sitzungsschleife
//!
//! Der Operator ist der Mensch an der Server-Konsole. Die Sitzungsschleife
//! spricht ihn nur ueber das `Operator`-Trait an, damit sie ohne echtes
//! Terminal getestet werden kann.

use std::io;

use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Lines, Stdin, Stdout,
};

/// Lokaler Gespraechspartner der Sitzungsschleife
#[allow(async_fn_in_trait)]
pub trait Operator {
    /// Zeigt `prompt` an und liest eine Eingabezeile (ohne Zeilenende).
    ///
    /// `Ok(None)` bedeutet, dass die Eingabe geschlossen wurde (EOF).
    async fn eingabe_lesen(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Zeigt eine empfangene Nachricht unveraendert an
    async fn nachricht_anzeigen(&mut self, text: &str) -> io::Result<()>;

    /// Zeigt eine lokale Warnung an
    async fn warnung_anzeigen(&mut self, text: &str) -> io::Result<()>;
}

/// Operator auf Basis zweier Byte-Streams, standardmaessig stdin/stdout
pub struct KonsolenOperator<R, W> {
    eingabe: Lines<BufReader<R>>,
    ausgabe: W,
}

impl KonsolenOperator<Stdin, Stdout> {
    /// Operator fuer die Prozess-Konsole
    pub fn konsole() -> Self {
        Self::neu(tokio::io::stdin(), tokio::io::stdout())
    }
}

impl<R, W> KonsolenOperator<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn neu(eingabe: R, ausgabe: W) -> Self {
        Self {
            eingabe: BufReader::new(eingabe).lines(),
            ausgabe,
        }
    }

    async fn zeile_schreiben(&mut self, text: &str) -> io::Result<()> {
        self.ausgabe.write_all(text.as_bytes()).await?;
        self.ausgabe.write_all(b"\n").await?;
        self.ausgabe.flush().await
    }
}

impl<R, W> Operator for KonsolenOperator<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn eingabe_lesen(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.ausgabe.write_all(prompt.as_bytes()).await?;
        self.ausgabe.flush().await?;
        self.eingabe.next_line().await
    }

    async fn nachricht_anzeigen(&mut self, text: &str) -> io::Result<()> {
        self.zeile_schreiben(text).await
    }

    async fn warnung_anzeigen(&mut self, text: &str) -> io::Result<()> {
        self.zeile_schreiben(&format!("Warnung: {text}")).await
    }
}
