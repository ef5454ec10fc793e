//! Frame layout, decoding and encoding
//!
//! Frame format:
//! - HEADER (4 bytes): `A5 03 20 01`
//! - TYPE (1 byte): direction / message type
//! - LENGTH (2 bytes, big-endian): payload length (0-32)
//! - PAYLOAD (0-32 bytes): sensor data
//! - CRC (2 bytes, big-endian): CRC-16 of every preceding byte

use crate::crc::crc16;

/// Fixed header that opens every frame
pub const FRAME_HEADER: [u8; 4] = [0xA5, 0x03, 0x20, 0x01];

/// Header + type + length field
pub const PREAMBLE_LEN: usize = 7;

/// Offset of the big-endian payload length field
pub const LENGTH_OFFSET: usize = 5;

/// Trailing checksum size
pub const CRC_LEN: usize = 2;

/// Smallest structurally valid frame (empty payload)
pub const MIN_FRAME_LEN: usize = PREAMBLE_LEN + CRC_LEN;

/// Largest payload the link carries
pub const MAX_PAYLOAD_SIZE: usize = 32;

/// Largest complete frame
pub const MAX_FRAME_SIZE: usize = PREAMBLE_LEN + MAX_PAYLOAD_SIZE + CRC_LEN;

/// Payload length below which a frame carries no distance
pub const MIN_DISTANCE_PAYLOAD: u16 = 14;

/// Frame offset of the little-endian distance (low byte first)
pub const DISTANCE_OFFSET: usize = 13;

/// Distance value reported when nothing is in range
pub const NO_TARGET_MM: u16 = 0xFFFF;

/// Start continuous measurement
pub const START_COMMAND: [u8; 9] = [0xA5, 0x03, 0x20, 0x01, 0x00, 0x00, 0x00, 0x02, 0x6E];

/// Outcome of a structurally valid frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Measurement {
    /// Target distance in millimeters
    Distance(u16),
    /// Sensor reports no target in range
    NoTarget,
    /// Frame checks out but the payload is too short to hold a distance
    InsufficientData {
        /// Declared payload length
        payload_len: u16,
    },
}

impl Measurement {
    /// Distance in meters, `NaN` for no target, `None` if there is no reading
    pub fn meters(&self) -> Option<f32> {
        match *self {
            Measurement::Distance(mm) => Some(mm as f32 / 1000.0),
            Measurement::NoTarget => Some(f32::NAN),
            Measurement::InsufficientData { .. } => None,
        }
    }
}

/// Errors that can occur while decoding a candidate frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Fewer bytes than the minimum frame
    TooShort { len: usize },
    /// CRC mismatch
    ChecksumMismatch { calculated: u16, received: u16 },
}

/// Errors that can occur while encoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Output buffer too small for the frame
    BufferTooSmall,
}

/// Read the big-endian payload length field
///
/// `bytes` must hold at least [`PREAMBLE_LEN`] bytes.
pub(crate) fn payload_len(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[LENGTH_OFFSET], bytes[LENGTH_OFFSET + 1]])
}

/// Validate a complete frame and extract its measurement
///
/// `frame` is exactly one frame: header through CRC.
pub fn decode(frame: &[u8]) -> Result<Measurement, DecodeError> {
    let len = frame.len();
    if len < MIN_FRAME_LEN {
        return Err(DecodeError::TooShort { len });
    }

    let calculated = crc16(&frame[..len - CRC_LEN]);
    let received = u16::from_be_bytes([frame[len - 2], frame[len - 1]]);
    if calculated != received {
        return Err(DecodeError::ChecksumMismatch {
            calculated,
            received,
        });
    }

    let declared = payload_len(frame);
    if declared < MIN_DISTANCE_PAYLOAD || len < DISTANCE_OFFSET + 2 + CRC_LEN {
        return Ok(Measurement::InsufficientData {
            payload_len: declared,
        });
    }

    let distance_mm = u16::from_le_bytes([frame[DISTANCE_OFFSET], frame[DISTANCE_OFFSET + 1]]);
    if distance_mm == NO_TARGET_MM {
        Ok(Measurement::NoTarget)
    } else {
        Ok(Measurement::Distance(distance_mm))
    }
}

/// Encode a frame in the sensor's wire format
///
/// Returns the number of bytes written.
pub fn encode_frame(frame_type: u8, payload: &[u8], out: &mut [u8]) -> Result<usize, EncodeError> {
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(EncodeError::PayloadTooLarge);
    }
    let total = PREAMBLE_LEN + payload.len() + CRC_LEN;
    if out.len() < total {
        return Err(EncodeError::BufferTooSmall);
    }

    out[..4].copy_from_slice(&FRAME_HEADER);
    out[4] = frame_type;
    out[LENGTH_OFFSET..PREAMBLE_LEN].copy_from_slice(&(payload.len() as u16).to_be_bytes());
    out[PREAMBLE_LEN..PREAMBLE_LEN + payload.len()].copy_from_slice(payload);

    let crc = crc16(&out[..total - CRC_LEN]);
    out[total - CRC_LEN..total].copy_from_slice(&crc.to_be_bytes());

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 14-byte measurement payload with `mm` at the distance slot
    fn distance_payload(mm: u16) -> [u8; 14] {
        let mut payload = [0u8; 14];
        let [lo, hi] = mm.to_le_bytes();
        payload[DISTANCE_OFFSET - PREAMBLE_LEN] = lo;
        payload[DISTANCE_OFFSET - PREAMBLE_LEN + 1] = hi;
        payload
    }

    #[test]
    fn test_start_command_is_well_formed() {
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let len = encode_frame(0x00, &[], &mut buf).unwrap();
        // The reserved byte at offset 6 is the low byte of a zero length
        // field, so the start command encodes as an empty frame.
        assert_eq!(&buf[..len], &START_COMMAND);
    }

    #[test]
    fn test_decode_distance() {
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let len = encode_frame(0x01, &distance_payload(1000), &mut buf).unwrap();
        assert_eq!(len, 23);
        assert_eq!(&buf[..7], &[0xA5, 0x03, 0x20, 0x01, 0x01, 0x00, 0x0E]);

        let m = decode(&buf[..len]).unwrap();
        assert_eq!(m, Measurement::Distance(1000));
        assert_eq!(m.meters(), Some(1.0));
    }

    #[test]
    fn test_decode_no_target() {
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let len = encode_frame(0x01, &distance_payload(0xFFFF), &mut buf).unwrap();
        let m = decode(&buf[..len]).unwrap();
        assert_eq!(m, Measurement::NoTarget);
        assert!(m.meters().unwrap().is_nan());
    }

    #[test]
    fn test_decode_max_distance() {
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let len = encode_frame(0x01, &distance_payload(0xFFFE), &mut buf).unwrap();
        assert_eq!(decode(&buf[..len]), Ok(Measurement::Distance(65534)));
    }

    #[test]
    fn test_decode_short_payload() {
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let len = encode_frame(0x01, &[1, 2, 3, 4], &mut buf).unwrap();
        let m = decode(&buf[..len]).unwrap();
        assert_eq!(m, Measurement::InsufficientData { payload_len: 4 });
        assert_eq!(m.meters(), None);
    }

    #[test]
    fn test_decode_checksum_mismatch() {
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let len = encode_frame(0x01, &distance_payload(500), &mut buf).unwrap();
        buf[10] ^= 0x40;
        assert!(matches!(
            decode(&buf[..len]),
            Err(DecodeError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_decode_too_short() {
        assert_eq!(
            decode(&[0xA5, 0x03, 0x20, 0x01, 0x00]),
            Err(DecodeError::TooShort { len: 5 })
        );
    }

    #[test]
    fn test_encode_limits() {
        let mut buf = [0u8; 64];
        assert_eq!(
            encode_frame(0x01, &[0u8; MAX_PAYLOAD_SIZE + 1], &mut buf),
            Err(EncodeError::PayloadTooLarge)
        );
        assert_eq!(
            encode_frame(0x01, &[0u8; 4], &mut buf[..10]),
            Err(EncodeError::BufferTooSmall)
        );
    }
}
