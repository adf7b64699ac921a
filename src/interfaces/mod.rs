//! User-facing surfaces: the interactive console and CSV output.

pub mod console;
pub mod csv;
