//! Wire format of the mmWave radar data stream.
//!
//! The sensor emits a continuous byte stream over UART. Application frames
//! are delimited by an 8-byte sentinel pattern and carry:
//! - A 44-byte header with the total frame length and TLV count
//! - A sequence of TLV records, each a 4-byte type + 4-byte length + payload
//! - Tracked-target TLVs (type 10) holding fixed 40-byte target records
//!
//! All multi-byte fields are little-endian. This crate is pure: slices in,
//! values out, no I/O and no buffer ownership.

pub mod codec;
pub mod error;
pub mod target;
pub mod tlv;

pub use codec::{encode_header, find_sentinel, FrameHeader, HEADER_SIZE, SENTINEL};
pub use error::{Result, WireError};
pub use target::{decode_targets, encode_target, TrackedTarget, TARGET_RECORD_SIZE};
pub use tlv::{encode_tlv, walk_tlvs, Tlv, TLV_HEADER_SIZE, TLV_TRACKED_TARGETS};
