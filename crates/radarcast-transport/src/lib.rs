//! Transport layer for the radar sensor's two UART links.
//!
//! The sensor exposes a command port (newline-terminated ASCII commands)
//! and a data port (continuous binary byte stream). Everything above this
//! crate sees only the [`ByteSource`] and [`CommandPort`] traits; the
//! physical serial settings live here.

pub mod error;
pub mod serial;
pub mod traits;

pub use error::{Result, TransportError};
pub use serial::SerialLink;
pub use traits::{ByteSource, CommandPort};
