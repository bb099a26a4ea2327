use bytes::{Buf, BytesMut};

/// Default cap on reservoir growth: 1 MiB.
///
/// At the sensor's frame rate the reservoir should stay a few frames deep;
/// hitting the cap means the consumer stalled and the buffered stream is
/// stale anyway.
pub const DEFAULT_MAX_RESERVOIR: usize = 1024 * 1024;

const INITIAL_CAPACITY: usize = 8 * 1024;

/// Append-only, consumable byte buffer between the transport and the
/// frame assembler.
///
/// Newly received bytes go on the tail; the assembler consumes a prefix
/// once it has been decoded (or condemned). Single-owner, never shared.
#[derive(Debug)]
pub struct Reservoir {
    buf: BytesMut,
    max_bytes: usize,
}

impl Reservoir {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_CAPACITY),
            max_bytes,
        }
    }

    /// Append newly arrived bytes.
    ///
    /// Returns `false` when the cap would be exceeded; the whole reservoir
    /// is cleared so the next sentinel scan starts clean. The caller
    /// reports the overflow, this type stays silent.
    #[must_use]
    pub fn extend(&mut self, bytes: &[u8]) -> bool {
        if self.buf.len() + bytes.len() > self.max_bytes {
            self.buf.clear();
            return false;
        }
        self.buf.extend_from_slice(bytes);
        true
    }

    /// Consume the first `n` bytes. `n` must not exceed [`Self::len`].
    pub fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.buf.len(), "consume beyond reservoir length");
        self.buf.advance(n.min(self.buf.len()));
    }

    /// The unconsumed bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_then_consume() {
        let mut reservoir = Reservoir::new(64);
        assert!(reservoir.extend(&[1, 2, 3, 4, 5]));
        assert_eq!(reservoir.len(), 5);

        reservoir.advance(2);
        assert_eq!(reservoir.as_slice(), &[3, 4, 5]);

        assert!(reservoir.extend(&[6]));
        assert_eq!(reservoir.as_slice(), &[3, 4, 5, 6]);
    }

    #[test]
    fn consume_everything() {
        let mut reservoir = Reservoir::new(64);
        assert!(reservoir.extend(&[9; 10]));
        reservoir.advance(10);
        assert!(reservoir.is_empty());
    }

    #[test]
    fn overflow_clears() {
        let mut reservoir = Reservoir::new(8);
        assert!(reservoir.extend(&[0; 6]));
        assert!(!reservoir.extend(&[0; 6]));
        assert!(reservoir.is_empty());
    }

    #[test]
    fn exact_cap_is_accepted() {
        let mut reservoir = Reservoir::new(8);
        assert!(reservoir.extend(&[0; 8]));
        assert_eq!(reservoir.len(), 8);
    }
}
