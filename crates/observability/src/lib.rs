//! # plausch-observability
//!
//! Structured Logging via tracing-subscriber fuer Server und Client.
//! Logs gehen nach stderr, damit sie die Chat-Konsole auf stdout nicht stoeren.

pub mod logging;

pub use logging::{log_format_gueltig, log_level_gueltig, logging_initialisieren};
