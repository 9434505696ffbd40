//! Wire-Format fuer TCP-Verbindungen
//!
//! Zeilenbasiertes Protokoll: UTF-8-Text, abgeschlossen durch genau ein `\n`.
//! Es gibt kein Laengenfeld, das Zeilenende ist der einzige Trenner.
//!
//! ## Frame-Format
//!
//! ```text
//! +----...----+------+
//! | UTF-8 Text | 0x0A |
//! +----...----+------+
//! ```
//!
//! Beim Dekodieren wird genau ein Zeilenende entfernt (`\n` oder `\r\n`).
//! Die maximale Zeilenlaenge wird in Zeichen gemessen, der Puffer fuer eine
//! noch unvollstaendige Zeile ist zusaetzlich in Bytes begrenzt.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::ProtokollFehler;
use crate::nachricht::MAX_ZEILE_ZEICHEN;

// ---------------------------------------------------------------------------
// Konstanten
// ---------------------------------------------------------------------------

/// Maximale Bytes pro UTF-8-Zeichen
const MAX_BYTES_PRO_ZEICHEN: usize = 4;

/// Laengstes Zeilenende (`\r\n`)
const MAX_ZEILENENDE_BYTES: usize = 2;

// ---------------------------------------------------------------------------
// ZeilenCodec
// ---------------------------------------------------------------------------

/// tokio-util Codec fuer zeilenbasierte Chat-Verbindungen
///
/// Implementiert `Encoder<String>` und `Decoder` fuer die Verwendung mit
/// `tokio_util::codec::Framed`.
///
/// # Beispiel
///
/// ```rust,no_run
/// use tokio_util::codec::Framed;
/// use plausch_protocol::wire::ZeilenCodec;
///
/// // let stream = TcpStream::connect(...).await?;
/// // let framed = Framed::new(stream, ZeilenCodec::new());
/// ```
#[derive(Debug, Clone)]
pub struct ZeilenCodec {
    /// Maximale Zeilenlaenge in Zeichen (ohne Zeilenende)
    max_zeichen: usize,
    /// Bytes am Pufferanfang, die bereits ohne Treffer nach `\n` durchsucht wurden
    gepruefte_bytes: usize,
}

impl ZeilenCodec {
    /// Erstellt einen neuen `ZeilenCodec` mit Standard-Limit
    pub fn new() -> Self {
        Self::with_max_zeichen(MAX_ZEILE_ZEICHEN)
    }

    /// Erstellt einen `ZeilenCodec` mit eigener maximaler Zeilenlaenge
    pub fn with_max_zeichen(max_zeichen: usize) -> Self {
        Self {
            max_zeichen,
            gepruefte_bytes: 0,
        }
    }

    /// Obergrenze fuer gepufferte Bytes einer Zeile ohne Zeilenende
    pub fn max_puffer_bytes(&self) -> usize {
        self.max_zeichen * MAX_BYTES_PRO_ZEICHEN + MAX_ZEILENENDE_BYTES
    }
}

impl Default for ZeilenCodec {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Decoder-Implementierung
// ---------------------------------------------------------------------------

impl Decoder for ZeilenCodec {
    type Item = String;
    type Error = ProtokollFehler;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let start = self.gepruefte_bytes.min(src.len());
        let treffer = src[start..].iter().position(|b| *b == b'\n');

        let Some(offset) = treffer else {
            if src.len() > self.max_puffer_bytes() {
                return Err(ProtokollFehler::ZeileZuLang {
                    laenge: src.len(),
                    max: self.max_puffer_bytes(),
                });
            }
            // Beim naechsten Aufruf nur die neuen Bytes durchsuchen
            self.gepruefte_bytes = src.len();
            return Ok(None);
        };

        let zeilenende = start + offset;
        self.gepruefte_bytes = 0;

        // Frame inklusive '\n' entnehmen, dann genau ein Zeilenende entfernen
        let mut frame = src.split_to(zeilenende + 1);
        frame.truncate(zeilenende);
        if frame.last() == Some(&b'\r') {
            frame.truncate(zeilenende - 1);
        }

        let zeile = std::str::from_utf8(&frame).map_err(|e| ProtokollFehler::UngueltigesUtf8 {
            position: e.valid_up_to(),
        })?;

        let zeichen = zeile.chars().count();
        if zeichen > self.max_zeichen {
            return Err(ProtokollFehler::ZeileZuLang {
                laenge: zeichen,
                max: self.max_zeichen,
            });
        }

        Ok(Some(zeile.to_owned()))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(zeile) => Ok(Some(zeile)),
            None if src.is_empty() => Ok(None),
            None => {
                let bytes = src.len();
                src.clear();
                self.gepruefte_bytes = 0;
                Err(ProtokollFehler::UnvollstaendigeZeile { bytes })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Encoder-Implementierung
// ---------------------------------------------------------------------------

impl Encoder<String> for ZeilenCodec {
    type Error = ProtokollFehler;

    fn encode(&mut self, item: String, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if item.contains('\n') {
            return Err(ProtokollFehler::EingebettetesZeilenende);
        }

        let zeichen = item.chars().count();
        if zeichen > self.max_zeichen {
            return Err(ProtokollFehler::ZeileZuLang {
                laenge: zeichen,
                max: self.max_zeichen,
            });
        }

        dst.reserve(item.len() + 1);
        dst.put_slice(item.as_bytes());
        dst.put_u8(b'\n');

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nachricht::MAX_NUTZLAST;

    #[test]
    fn dekodiert_eine_zeile_ohne_zeilenende() {
        let mut codec = ZeilenCodec::new();
        let mut buf = BytesMut::from(&b"hello\n"[..]);

        let zeile = codec.decode(&mut buf).unwrap().expect("Zeile erwartet");
        assert_eq!(zeile, "hello");
        assert!(buf.is_empty());
    }

    #[test]
    fn crlf_zaehlt_als_ein_zeilenende() {
        let mut codec = ZeilenCodec::new();
        let mut buf = BytesMut::from(&b"hello\r\n"[..]);
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("hello"));
    }

    #[test]
    fn nur_ein_zeilenende_wird_entfernt() {
        let mut codec = ZeilenCodec::new();
        let mut buf = BytesMut::from(&b"  text \r\r\n"[..]);
        // Leerzeichen bleiben, nur das letzte \r\n gehoert zum Zeilenende
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("  text \r"));
    }

    #[test]
    fn leere_zeile_ist_eine_nachricht() {
        let mut codec = ZeilenCodec::new();
        let mut buf = BytesMut::from(&b"\n"[..]);
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some(""));
    }

    #[test]
    fn unvollstaendige_zeile_wartet_auf_mehr_daten() {
        let mut codec = ZeilenCodec::new();
        let mut buf = BytesMut::from(&b"hel"[..]);
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(b"lo\nnaechste");
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("hello"));
        assert_eq!(&buf[..], b"naechste");
    }

    #[test]
    fn mehrere_zeilen_im_puffer() {
        let mut codec = ZeilenCodec::new();
        let mut buf = BytesMut::from(&b"eins\nzwei\n"[..]);
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("eins"));
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("zwei"));
        assert!(codec.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn ungueltiges_utf8_ist_protokollfehler() {
        let mut codec = ZeilenCodec::new();
        let mut buf = BytesMut::from(&[b'o', b'k', 0xFF, 0xFE, b'\n'][..]);
        let err = codec.decode(&mut buf).unwrap_err();
        assert!(matches!(err, ProtokollFehler::UngueltigesUtf8 { position: 2 }));
    }

    #[test]
    fn zu_lange_zeile_mit_zeilenende_wird_abgelehnt() {
        let mut codec = ZeilenCodec::with_max_zeichen(5);
        let mut buf = BytesMut::from(&b"sechss\n"[..]);
        let err = codec.decode(&mut buf).unwrap_err();
        assert!(matches!(err, ProtokollFehler::ZeileZuLang { laenge: 6, max: 5 }));
    }

    #[test]
    fn zu_langer_puffer_ohne_zeilenende_wird_abgelehnt() {
        let mut codec = ZeilenCodec::with_max_zeichen(2);
        let mut buf = BytesMut::from(&[b'x'; 11][..]);
        assert!(matches!(
            codec.decode(&mut buf),
            Err(ProtokollFehler::ZeileZuLang { .. })
        ));
    }

    #[test]
    fn volle_nutzlast_mit_praefix_passt() {
        let mut codec = ZeilenCodec::new();
        let zeile = format!("HOST> {}\n", "x".repeat(MAX_NUTZLAST));
        let mut buf = BytesMut::from(zeile.as_bytes());
        let dekodiert = codec.decode(&mut buf).unwrap().expect("Zeile erwartet");
        assert_eq!(dekodiert.len(), MAX_NUTZLAST + 6);
    }

    #[test]
    fn eof_mit_leerem_puffer_ist_kein_fehler() {
        let mut codec = ZeilenCodec::new();
        let mut buf = BytesMut::new();
        assert!(codec.decode_eof(&mut buf).unwrap().is_none());
    }

    #[test]
    fn eof_mitten_in_einer_zeile_ist_protokollfehler() {
        let mut codec = ZeilenCodec::new();
        let mut buf = BytesMut::from(&b"abgebroch"[..]);
        let err = codec.decode_eof(&mut buf).unwrap_err();
        assert!(matches!(err, ProtokollFehler::UnvollstaendigeZeile { bytes: 9 }));
    }

    #[test]
    fn encode_haengt_genau_ein_zeilenende_an() {
        let mut codec = ZeilenCodec::new();
        let mut buf = BytesMut::new();
        codec.encode("HOST> hi there".to_string(), &mut buf).unwrap();
        assert_eq!(&buf[..], b"HOST> hi there\n");
    }

    #[test]
    fn encode_lehnt_eingebettetes_zeilenende_ab() {
        let mut codec = ZeilenCodec::new();
        let mut buf = BytesMut::new();
        let err = codec.encode("a\nb".to_string(), &mut buf).unwrap_err();
        assert!(matches!(err, ProtokollFehler::EingebettetesZeilenende));
        assert!(buf.is_empty());
    }

    #[test]
    fn encode_lehnt_zu_lange_zeile_ab() {
        let mut codec = ZeilenCodec::with_max_zeichen(3);
        let mut buf = BytesMut::new();
        assert!(codec.encode("vier".to_string(), &mut buf).is_err());
    }

    #[tokio::test]
    async fn framed_ueber_duplex_stream() {
        use futures_util::{SinkExt, StreamExt};
        use tokio_util::codec::Framed;

        let (a, b) = tokio::io::duplex(1024);
        let mut links = Framed::new(a, ZeilenCodec::new());
        let mut rechts = Framed::new(b, ZeilenCodec::new());

        links.send("grüß dich".to_string()).await.unwrap();
        let empfangen = rechts.next().await.expect("Zeile erwartet").unwrap();
        assert_eq!(empfangen, "grüß dich");

        drop(links);
        assert!(rechts.next().await.is_none());
    }
}
