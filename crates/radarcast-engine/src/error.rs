use std::path::PathBuf;

/// Errors surfaced by the assembly engine and its collaborators.
///
/// Decode-level failures (malformed TLVs, partial frames) never reach this
/// enum; the assembler handles them internally by waiting or
/// resynchronizing. These are the conditions a caller must act on.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The transport failed underneath the poll loop.
    #[error(transparent)]
    Transport(#[from] radarcast_transport::TransportError),

    /// An I/O error outside the serial transport (command file, capture file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sensor command file contained no usable commands.
    #[error("command file {path} is missing or has no commands")]
    EmptyCommandFile { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, EngineError>;
