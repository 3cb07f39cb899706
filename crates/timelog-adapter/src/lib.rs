/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public time-log parser adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod parser;
pub mod types;

// Re-export commonly used types from http
pub use http::{ClientConfig, DEFAULT_BASE_URL, ParserClient, ParserError, Result};

// Re-export the parser seam
pub use parser::{MockParser, RemoteParser};

// Re-export all types
pub use types::*;
