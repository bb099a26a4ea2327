use crate::error::Result;

/// A non-blocking source of raw bytes.
///
/// The poll loop asks how many bytes are pending, then reads at most that
/// many. A read that times out counts as zero bytes, never as an error.
pub trait ByteSource {
    /// Number of bytes currently buffered by the device driver.
    fn bytes_available(&mut self) -> Result<usize>;

    /// Read up to `buf.len()` of the currently available bytes.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize>;
}

/// A sink for newline-terminated ASCII sensor commands.
pub trait CommandPort {
    /// Write one command, appending the trailing newline, and flush.
    fn send_command(&mut self, command: &str) -> Result<()>;
}
