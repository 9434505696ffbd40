//! plausch-client – Konsolen-Client fuer den Plausch-Server
//!
//! Verbindet sich mit dem Server, fragt nach einem Handle und spricht dann
//! abwechselnd mit dem Server-Operator, bis eine Seite `\quit` sendet.

pub mod connection;
pub mod error;
pub mod sitzung;

pub use connection::ServerVerbindung;
pub use error::{ClientError, ClientResult};
pub use sitzung::{handle_erfragen, plaudern, ClientEnde};
