use bytes::{Buf, BufMut, BytesMut};

/// Size of one tracked-target record on the wire.
pub const TARGET_RECORD_SIZE: usize = 40;

/// One tracked target: id plus position, velocity and acceleration vectors.
///
/// 40 bytes on the wire: `[u32 id][f32 x y z][f32 vx vy vz][f32 ax ay az]`,
/// all little-endian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedTarget {
    pub id: u32,
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    pub acceleration: [f32; 3],
}

/// Decode consecutive target records from a type-10 TLV payload.
///
/// The payload is partitioned into `len / 40` records; trailing bytes
/// shorter than one record are dropped. Infallible: an undersized payload
/// yields an empty vector.
pub fn decode_targets(payload: &[u8]) -> Vec<TrackedTarget> {
    let count = payload.len() / TARGET_RECORD_SIZE;
    let mut targets = Vec::with_capacity(count);
    let mut cursor = payload;

    for _ in 0..count {
        let id = cursor.get_u32_le();
        let mut vec3 = || {
            [
                cursor.get_f32_le(),
                cursor.get_f32_le(),
                cursor.get_f32_le(),
            ]
        };
        let position = vec3();
        let velocity = vec3();
        let acceleration = vec3();
        targets.push(TrackedTarget {
            id,
            position,
            velocity,
            acceleration,
        });
    }

    targets
}

/// Encode one target record into the wire format.
pub fn encode_target(target: &TrackedTarget, dst: &mut BytesMut) {
    dst.reserve(TARGET_RECORD_SIZE);
    dst.put_u32_le(target.id);
    for axis in target.position {
        dst.put_f32_le(axis);
    }
    for axis in target.velocity {
        dst.put_f32_le(axis);
    }
    for axis in target.acceleration {
        dst.put_f32_le(axis);
    }
}
