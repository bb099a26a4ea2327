/// Errors that can occur while decoding a frame's TLV area.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Fewer than 8 bytes remained where a TLV header was expected.
    #[error("truncated TLV header at record {index}")]
    TruncatedTlvHeader { index: u32 },

    /// A TLV's declared length reads past the frame boundary.
    #[error("TLV {index} overruns frame ({declared} bytes declared, {remaining} remain)")]
    TlvOverrun {
        index: u32,
        declared: usize,
        remaining: usize,
    },
}

pub type Result<T> = std::result::Result<T, WireError>;
