//! Nachrichten-Konventionen des Chat-Protokolls
//!
//! Grenzen, Beenden-Token und Formatierung einer Chat-Zeile. Die Grenze
//! `MAX_NUTZLAST` gilt fuer den Text, den ein Mensch eingibt. Praefix
//! (`HOST> ` bzw. `<handle>> `) und Zeilenende kommen als Rahmenkosten dazu,
//! siehe [`MAX_ZEILE_ZEICHEN`].

// ---------------------------------------------------------------------------
// Konstanten
// ---------------------------------------------------------------------------

/// Maximale Nutzlast einer Nachricht in Zeichen (ohne Praefix und Zeilenende)
pub const MAX_NUTZLAST: usize = 500;

/// Beenden-Token: Backslash gefolgt von `quit`
pub const QUIT_TOKEN: &str = "\\quit";

/// Label, mit dem der Server seine Nachrichten kennzeichnet
pub const HOST_LABEL: &str = "HOST";

/// Trenner zwischen Label und Nutzlast
pub const TRENNER: &str = "> ";

/// Maximale Laenge eines Client-Handles in Zeichen
pub const MAX_HANDLE_ZEICHEN: usize = 10;

/// Laengste Zeile, die auf dem Draht akzeptiert wird: Nutzlast plus das
/// laengstmoegliche Praefix.
pub const MAX_ZEILE_ZEICHEN: usize = MAX_NUTZLAST + MAX_HANDLE_ZEICHEN + TRENNER.len();

// ---------------------------------------------------------------------------
// Typen
// ---------------------------------------------------------------------------

/// Ergebnis einer Kuerzung auf eine Zeichenanzahl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kuerzung<'a> {
    /// Der (moeglicherweise gekuerzte) Text
    pub text: &'a str,
    /// Anzahl verworfener Zeichen
    pub verworfen: usize,
}

impl Kuerzung<'_> {
    pub fn wurde_gekuerzt(&self) -> bool {
        self.verworfen > 0
    }
}

// ---------------------------------------------------------------------------
// Funktionen
// ---------------------------------------------------------------------------

/// Kuerzt `text` auf hoechstens `max` Zeichen.
///
/// Gezaehlt werden Unicode-Zeichen, nicht Bytes; es wird nie mitten in einem
/// Zeichen geschnitten.
pub fn kuerzen(text: &str, max: usize) -> Kuerzung<'_> {
    match text.char_indices().nth(max) {
        Some((grenze, _)) => Kuerzung {
            text: &text[..grenze],
            verworfen: text[grenze..].chars().count(),
        },
        None => Kuerzung { text, verworfen: 0 },
    }
}

/// Kuerzt `text` auf [`MAX_NUTZLAST`] Zeichen
pub fn auf_nutzlast_kuerzen(text: &str) -> Kuerzung<'_> {
    kuerzen(text, MAX_NUTZLAST)
}

/// Prueft ob eine Zeile das Beenden-Token ist.
///
/// Exakter Vergleich: Gross-/Kleinschreibung zaehlt, Leerzeichen werden nicht
/// abgeschnitten.
pub fn ist_quit_token(zeile: &str) -> bool {
    zeile == QUIT_TOKEN
}

/// Prompt bzw. Praefix fuer ein Label, z.B. `HOST> `
pub fn praefix(label: &str) -> String {
    format!("{label}{TRENNER}")
}

/// Formatiert eine ausgehende Nachricht als `<label>> <nutzlast>`
pub fn nachricht_formatieren(label: &str, nutzlast: &str) -> String {
    let mut zeile = String::with_capacity(label.len() + TRENNER.len() + nutzlast.len());
    zeile.push_str(label);
    zeile.push_str(TRENNER);
    zeile.push_str(nutzlast);
    zeile
}
