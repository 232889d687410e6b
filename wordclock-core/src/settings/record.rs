//! Fixed-layout settings record
//!
//! Little-endian, packed, 106 bytes:
//!
//! | offset | size | field                                 |
//! |--------|------|---------------------------------------|
//! | 0      | 100  | NTP server, NUL-padded                |
//! | 100    | 4    | UTC offset in minutes (`i32`)         |
//! | 104    | 2    | CRC-16 over bytes `0..104` (`u16`)    |

use super::{Settings, MAX_SERVER_LEN};

/// Size of the server field
pub const SERVER_FIELD_LEN: usize = MAX_SERVER_LEN + 1;

/// Bytes covered by the checksum
pub const CHECKED_LEN: usize = SERVER_FIELD_LEN + 4;

/// Total record size
pub const RECORD_LEN: usize = CHECKED_LEN + 2;

const OFFSET_FIELD: usize = SERVER_FIELD_LEN;
const CRC_FIELD: usize = CHECKED_LEN;

/// Record decode errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Stored checksum does not match the data
    Checksum { stored: u16, computed: u16 },
}

/// CRC-16 with polynomial 0x8001, initial value 0, MSB first, no reflection
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = 0u16;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x8001;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

/// Serialize settings and append the checksum
pub fn encode(settings: &Settings) -> [u8; RECORD_LEN] {
    let mut record = [0u8; RECORD_LEN];
    let name = settings.ntp_server.as_bytes();
    record[..name.len()].copy_from_slice(name);
    record[OFFSET_FIELD..CRC_FIELD].copy_from_slice(&settings.utc_offset.to_le_bytes());
    let crc = crc16(&record[..CHECKED_LEN]);
    record[CRC_FIELD..].copy_from_slice(&crc.to_le_bytes());
    record
}

/// Parse a record, rejecting it when the checksum does not match
///
/// The server name ends at the first NUL or after [`MAX_SERVER_LEN`] bytes;
/// bytes that are not valid UTF-8 end it early. The result is not sanitized.
pub fn decode(record: &[u8; RECORD_LEN]) -> Result<Settings, RecordError> {
    let stored = u16::from_le_bytes([record[CRC_FIELD], record[CRC_FIELD + 1]]);
    let computed = crc16(&record[..CHECKED_LEN]);
    if stored != computed {
        return Err(RecordError::Checksum { stored, computed });
    }

    let field = &record[..MAX_SERVER_LEN];
    let end = field.iter().position(|&b| b == 0).unwrap_or(MAX_SERVER_LEN);
    let name = match core::str::from_utf8(&field[..end]) {
        Ok(name) => name,
        Err(e) => core::str::from_utf8(&field[..e.valid_up_to()]).unwrap_or_default(),
    };

    let mut offset = [0u8; 4];
    offset.copy_from_slice(&record[OFFSET_FIELD..CRC_FIELD]);

    Ok(Settings::new(name, i32::from_le_bytes(offset)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_crc16_check_values() {
        assert_eq!(crc16(b""), 0);
        assert_eq!(crc16(&[0x01]), 0x8001);
        assert_eq!(crc16(b"123456789"), 0xA829);
    }

    #[test]
    fn test_default_record_layout() {
        let record = encode(&Settings::default());
        assert_eq!(&record[..12], b"pool.ntp.org");
        assert!(record[12..100].iter().all(|&b| b == 0));
        assert_eq!(&record[100..104], &60i32.to_le_bytes());
        assert_eq!(&record[104..], &0xAE73u16.to_le_bytes());
    }

    #[test]
    fn test_decode_round_trip() {
        let settings = Settings::new("time.example.net", -90);
        assert_eq!(decode(&encode(&settings)), Ok(settings));
    }

    #[test]
    fn test_decode_rejects_bad_checksum() {
        let mut record = encode(&Settings::default());
        record[105] ^= 0x01;
        assert!(matches!(decode(&record), Err(RecordError::Checksum { .. })));
    }

    #[test]
    fn test_erased_flash_is_rejected() {
        assert!(decode(&[0xFF; RECORD_LEN]).is_err());
    }

    #[test]
    fn test_full_length_name_without_nul() {
        let mut record = [b'a'; RECORD_LEN];
        record[MAX_SERVER_LEN] = b'b';
        record[OFFSET_FIELD..CRC_FIELD].copy_from_slice(&0i32.to_le_bytes());
        let crc = crc16(&record[..CHECKED_LEN]);
        record[CRC_FIELD..].copy_from_slice(&crc.to_le_bytes());

        let settings = decode(&record).unwrap();
        assert_eq!(settings.ntp_server.len(), MAX_SERVER_LEN);
        assert!(settings.ntp_server.bytes().all(|b| b == b'a'));
    }

    proptest! {
        #[test]
        fn any_single_byte_corruption_is_detected(
            server in "[a-z0-9.-]{0,99}",
            offset in -720i32..=840,
            index in 0usize..RECORD_LEN,
            flip in 1u8..=255,
        ) {
            let mut record = encode(&Settings::new(&server, offset));
            record[index] ^= flip;
            prop_assert!(decode(&record).is_err());
        }
    }
}
