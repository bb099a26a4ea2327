use bytes::{BufMut, BytesMut};

/// Sentinel pattern marking the start of every frame.
pub const SENTINEL: [u8; 8] = [0x02, 0x01, 0x04, 0x03, 0x06, 0x05, 0x08, 0x07];

/// Frame header size: sentinel (8) + version (4) + seven u32 fields (28) +
/// reserved (4) = 44 bytes.
pub const HEADER_SIZE: usize = 44;

/// Decoded frame header.
///
/// All fields are read as little-endian u32 at fixed offsets from the
/// sentinel start. No field is range-validated here; `total_frame_bytes`
/// is untrusted until the whole frame has been walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Firmware version word (packed major/minor/patch/build).
    pub version: u32,
    /// Declared length of the whole frame, sentinel included.
    pub total_frame_bytes: u32,
    /// Sensor platform identifier, conventionally shown as hex.
    pub platform: u32,
    /// Monotonic frame counter maintained by the sensor.
    pub frame_number: u32,
    /// Sensor CPU cycle count at frame emission.
    pub cpu_cycles: u32,
    /// Number of detected objects reported for this frame.
    pub num_detected_objects: u32,
    /// Number of TLV records following the header.
    pub num_tlvs: u32,
    /// Sub-frame index for advanced-frame chirp configurations.
    pub subframe_index: u32,
}

/// Scan for the first occurrence of the sentinel.
///
/// Returns `None` when the pattern is absent or fewer than 8 bytes remain.
/// Stateless: every call re-scans the slice it is given.
pub fn find_sentinel(buf: &[u8]) -> Option<usize> {
    if buf.len() < SENTINEL.len() {
        return None;
    }
    buf.windows(SENTINEL.len()).position(|w| w == SENTINEL)
}

impl FrameHeader {
    /// Decode a header from a sentinel-aligned buffer.
    ///
    /// Returns `None` if fewer than [`HEADER_SIZE`] bytes are available.
    /// That is "need more data", not corruption.
    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < HEADER_SIZE {
            return None;
        }
        let field = |off: usize| u32::from_le_bytes(buf[off..off + 4].try_into().unwrap());
        Some(Self {
            version: field(8),
            total_frame_bytes: field(12),
            platform: field(16),
            frame_number: field(20),
            cpu_cycles: field(24),
            num_detected_objects: field(28),
            num_tlvs: field(32),
            subframe_index: field(36),
        })
    }

    /// Length of the TLV area following the header.
    pub fn body_len(&self) -> usize {
        (self.total_frame_bytes as usize).saturating_sub(HEADER_SIZE)
    }
}

/// Encode a header into the wire format.
///
/// Wire layout:
/// ```text
/// ┌──────────────┬──────────┬──────────┬───────────────────┬──────────┐
/// │ Sentinel (8B)│ Version  │ Total    │ Platform, Frame#, │ Reserved │
/// │ 02 01 04 03  │ (4B LE)  │ length   │ Cycles, Objects,  │ (4B)     │
/// │ 06 05 08 07  │          │ (4B LE)  │ TLVs, Subframe    │          │
/// └──────────────┴──────────┴──────────┴───────────────────┴──────────┘
/// ```
pub fn encode_header(header: &FrameHeader, dst: &mut BytesMut) {
    dst.reserve(HEADER_SIZE);
    dst.put_slice(&SENTINEL);
    dst.put_u32_le(header.version);
    dst.put_u32_le(header.total_frame_bytes);
    dst.put_u32_le(header.platform);
    dst.put_u32_le(header.frame_number);
    dst.put_u32_le(header.cpu_cycles);
    dst.put_u32_le(header.num_detected_objects);
    dst.put_u32_le(header.num_tlvs);
    dst.put_u32_le(header.subframe_index);
    dst.put_u32_le(0);
}
