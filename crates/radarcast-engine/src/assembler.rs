use radarcast_wire::{
    decode_targets, find_sentinel, walk_tlvs, FrameHeader, TrackedTarget, HEADER_SIZE, SENTINEL,
    TLV_TRACKED_TARGETS,
};
use tracing::{debug, trace, warn};

use crate::reservoir::Reservoir;

/// One fully recovered frame: its header and the targets from all of its
/// type-10 TLVs, in wire order.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFrame {
    pub header: FrameHeader,
    pub targets: Vec<TrackedTarget>,
}

/// Recovers frames from the accumulated byte stream.
///
/// Per poll: scan for the sentinel, drop noise ahead of it, decode the
/// header, wait until the declared frame length is fully buffered, walk
/// the TLVs, consume the frame, and repeat for any following frame in the
/// same fill. Incomplete data is always left in place; only noise and
/// condemned frames are discarded.
#[derive(Debug)]
pub struct FrameAssembler {
    reservoir: Reservoir,
    frames_decoded: u64,
    resyncs: u64,
}

impl FrameAssembler {
    pub fn new(max_reservoir_bytes: usize) -> Self {
        Self {
            reservoir: Reservoir::new(max_reservoir_bytes),
            frames_decoded: 0,
            resyncs: 0,
        }
    }

    /// Append newly received transport bytes.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        if !self.reservoir.extend(bytes) {
            self.resyncs += 1;
            warn!(
                dropped = bytes.len(),
                cap = self.reservoir.max_bytes(),
                "reservoir overflow, stream state discarded"
            );
        }
    }

    /// Decode every frame currently completable from the reservoir.
    ///
    /// Returns in arrival order. Never fails: malformed frames are logged,
    /// the stream resynchronizes past their sentinel, and decoding
    /// continues.
    pub fn poll(&mut self) -> Vec<DecodedFrame> {
        let mut frames = Vec::new();

        loop {
            let Some(start) = find_sentinel(self.reservoir.as_slice()) else {
                trace!(pending = self.reservoir.len(), "awaiting sentinel");
                break;
            };
            if start > 0 {
                debug!(dropped = start, "discarding bytes before sentinel");
                self.reservoir.advance(start);
            }

            let Some(header) = FrameHeader::decode(self.reservoir.as_slice()) else {
                trace!(pending = self.reservoir.len(), "awaiting full header");
                break;
            };

            let total = header.total_frame_bytes as usize;
            if total < HEADER_SIZE {
                // The declared length cannot even cover the header; the
                // frame is garbage and its length field untrusted.
                self.condemn(header.frame_number, "declared length below header size");
                continue;
            }
            if self.reservoir.len() < total {
                trace!(
                    pending = self.reservoir.len(),
                    needed = total,
                    "awaiting full frame"
                );
                break;
            }

            let outcome = {
                let body = &self.reservoir.as_slice()[HEADER_SIZE..total];
                walk_tlvs(body, header.num_tlvs).map(|tlvs| {
                    let mut targets = Vec::new();
                    for tlv in tlvs {
                        if tlv.kind == TLV_TRACKED_TARGETS {
                            targets.extend(decode_targets(tlv.payload));
                        } else {
                            debug!(
                                kind = tlv.kind,
                                len = tlv.payload.len(),
                                "skipping unrecognized tlv"
                            );
                        }
                    }
                    targets
                })
            };

            match outcome {
                Ok(targets) => {
                    self.reservoir.advance(total);
                    self.frames_decoded += 1;
                    debug!(
                        frame = header.frame_number,
                        platform = format_args!("{:#010x}", header.platform),
                        firmware = format_args!("{:#010x}", header.version),
                        targets = targets.len(),
                        "frame decoded"
                    );
                    frames.push(DecodedFrame { header, targets });
                }
                Err(err) => {
                    self.condemn(header.frame_number, &err.to_string());
                }
            }
        }

        frames
    }

    /// Discard a condemned frame's sentinel and rescan.
    ///
    /// Only the 8 sentinel bytes are dropped: the declared frame length is
    /// untrusted once decoding failed, so everything after the sentinel is
    /// re-examined as potential noise-plus-next-frame.
    fn condemn(&mut self, frame_number: u32, reason: &str) {
        warn!(frame = frame_number, reason, "malformed frame, resynchronizing");
        self.reservoir.advance(SENTINEL.len());
        self.resyncs += 1;
    }

    /// Bytes buffered but not yet consumed.
    pub fn pending_bytes(&self) -> usize {
        self.reservoir.len()
    }

    /// Frames successfully decoded since construction.
    pub fn frames_decoded(&self) -> u64 {
        self.frames_decoded
    }

    /// Resynchronization events (condemned frames and overflows).
    pub fn resyncs(&self) -> u64 {
        self.resyncs
    }
}
