//! CRC-16 checksum used by the DTS6012M link
//!
//! Reflected CRC-16 (the MODBUS variant): seed 0xFFFF, polynomial 0xA001,
//! processed LSB-first.

const SEED: u16 = 0xFFFF;
const POLY: u16 = 0xA001;

/// Compute the CRC-16 of `data`
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = SEED;
    for &byte in data {
        crc ^= byte as u16;
        for _ in 0..8 {
            if crc & 0x0001 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }
    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_value() {
        // Standard check input for CRC-16/MODBUS
        assert_eq!(crc16(b"123456789"), 0x4B37);
    }

    #[test]
    fn test_empty_is_seed() {
        assert_eq!(crc16(&[]), 0xFFFF);
    }

    #[test]
    fn test_start_command_body() {
        // Trailing bytes of the start command are this value, big-endian
        assert_eq!(crc16(&[0xA5, 0x03, 0x20, 0x01, 0x00, 0x00, 0x00]), 0x026E);
    }

    #[test]
    fn test_distance_frame_vector() {
        let mut frame = [0u8; 21];
        frame[..7].copy_from_slice(&[0xA5, 0x03, 0x20, 0x01, 0x01, 0x00, 0x0E]);
        frame[13] = 0xE8;
        frame[14] = 0x03;
        assert_eq!(crc16(&frame), 0x968B);
    }

    #[test]
    fn test_deterministic() {
        let data = [0xA5, 0x03, 0x20, 0x01, 0x01, 0x00, 0x0E, 0x42];
        assert_eq!(crc16(&data), crc16(&data));
        assert_ne!(crc16(&data), crc16(&data[..7]));
    }
}
