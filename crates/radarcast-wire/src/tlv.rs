use bytes::{BufMut, BytesMut};
use tracing::trace;

use crate::error::{Result, WireError};

/// TLV record header size: type (4) + length (4).
pub const TLV_HEADER_SIZE: usize = 8;

/// TLV type carrying fixed-width tracked-target records.
pub const TLV_TRACKED_TARGETS: u32 = 10;

/// One TLV record, borrowing its payload from the frame body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tlv<'a> {
    pub kind: u32,
    pub payload: &'a [u8],
}

/// Walk the TLV area of a frame.
///
/// `body` is the frame content after the 44-byte header, already bounded by
/// the header's declared total length. Exactly `num_tlvs` records are read;
/// a record whose declared length extends past `body` condemns the whole
/// frame. Unknown TLV types are returned as-is; skipping them is the
/// caller's dispatch policy, not a wire error.
pub fn walk_tlvs(body: &[u8], num_tlvs: u32) -> Result<Vec<Tlv<'_>>> {
    // The declared count is noise-controlled; never reserve more than the
    // body could physically hold in empty-payload records.
    let plausible = (num_tlvs as usize).min(body.len() / TLV_HEADER_SIZE);
    let mut records = Vec::with_capacity(plausible);
    let mut offset = 0usize;

    for index in 0..num_tlvs {
        let remaining = body.len() - offset;
        if remaining < TLV_HEADER_SIZE {
            return Err(WireError::TruncatedTlvHeader { index });
        }

        let kind = u32::from_le_bytes(body[offset..offset + 4].try_into().unwrap());
        let declared =
            u32::from_le_bytes(body[offset + 4..offset + 8].try_into().unwrap()) as usize;

        let available = remaining - TLV_HEADER_SIZE;
        if declared > available {
            return Err(WireError::TlvOverrun {
                index,
                declared,
                remaining: available,
            });
        }

        let start = offset + TLV_HEADER_SIZE;
        trace!(index, kind, len = declared, "tlv record");
        records.push(Tlv {
            kind,
            payload: &body[start..start + declared],
        });
        offset = start + declared;
    }

    Ok(records)
}

/// Encode one TLV record into the wire format.
pub fn encode_tlv(kind: u32, payload: &[u8], dst: &mut BytesMut) {
    dst.reserve(TLV_HEADER_SIZE + payload.len());
    dst.put_u32_le(kind);
    dst.put_u32_le(payload.len() as u32);
    dst.put_slice(payload);
}
