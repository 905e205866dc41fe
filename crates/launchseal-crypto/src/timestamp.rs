//! Tick timestamps and the injectable clock.
//!
//! A timestamp is a u64 counting 100 ns ticks since 0001-01-01T00:00:00Z,
//! with the top two bits holding a "kind" flag. Signed envelopes always
//! carry kind UTC (`0b01`). These values are protocol constants shared with
//! the verifying peer.

use chrono::{DateTime, Utc};

use crate::error::CryptoError;

/// Ticks between 0001-01-01 and 1970-01-01.
pub const TICKS_AT_UNIX_EPOCH: i64 = 621_355_968_000_000_000;

/// 100 ns ticks per millisecond.
pub const TICKS_PER_MILLISECOND: i64 = 10_000;

const TICKS_PER_SECOND: i64 = 10_000_000;

/// Kind flag marking a UTC timestamp (bit 62).
pub const KIND_UTC: u64 = 0x4000_0000_0000_0000;

/// Last tick of 9999-12-31, the largest representable instant.
pub const MAX_TICKS: i64 = 3_155_378_975_999_999_999;

const TICKS_MASK: u64 = 0x3FFF_FFFF_FFFF_FFFF;
const KIND_SHIFT: u32 = 62;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant. Only for fixtures and tests.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(any(test, feature = "test-util"))]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Encode `instant` as UTC-kind ticks at millisecond precision.
pub fn encode_utc(instant: DateTime<Utc>) -> Result<u64, CryptoError> {
    let ticks = instant
        .timestamp_millis()
        .checked_mul(TICKS_PER_MILLISECOND)
        .and_then(|t| t.checked_add(TICKS_AT_UNIX_EPOCH))
        .filter(|t| (0..=MAX_TICKS).contains(t))
        .ok_or(CryptoError::TimestampOutOfRange)?;
    Ok(ticks as u64 | KIND_UTC)
}

/// Decode a UTC-kind tick value back into an instant.
///
/// Unspecified and local kinds are rejected; only UTC is ever produced by
/// the signer.
pub fn decode(raw: u64) -> Result<DateTime<Utc>, CryptoError> {
    let kind = (raw >> KIND_SHIFT) as u8;
    if raw & !TICKS_MASK != KIND_UTC {
        return Err(CryptoError::InvalidTimestampKind(kind));
    }
    let ticks = (raw & TICKS_MASK) as i64;
    if ticks > MAX_TICKS {
        return Err(CryptoError::TimestampOutOfRange);
    }
    let since_unix = ticks - TICKS_AT_UNIX_EPOCH;
    let secs = since_unix.div_euclid(TICKS_PER_SECOND);
    let nanos = (since_unix.rem_euclid(TICKS_PER_SECOND) * 100) as u32;
    DateTime::from_timestamp(secs, nanos).ok_or(CryptoError::TimestampOutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn unix_epoch_is_offset_constant() {
        let epoch = Utc.timestamp_millis_opt(0).unwrap();
        assert_eq!(encode_utc(epoch).unwrap(), TICKS_AT_UNIX_EPOCH as u64 | KIND_UTC);
    }

    #[test]
    fn known_instant() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let raw = encode_utc(instant).unwrap();
        assert_eq!(raw, 0x48dc_0a5c_9900_c000);
        assert_eq!(raw.to_le_bytes(), [0x00, 0xc0, 0x00, 0x99, 0x5c, 0x0a, 0xdc, 0x48]);
    }

    #[test]
    fn kind_bit_is_set() {
        let raw = encode_utc(Utc::now()).unwrap();
        assert_eq!(raw >> 62, 0b01);
    }

    #[test]
    fn decode_inverts_encode_at_millisecond_precision() {
        let instant = Utc.timestamp_millis_opt(1_718_000_123_456).unwrap();
        assert_eq!(decode(encode_utc(instant).unwrap()).unwrap(), instant);
    }

    #[test]
    fn decode_keeps_sub_millisecond_ticks() {
        let raw = (TICKS_AT_UNIX_EPOCH + 12_345) as u64 | KIND_UTC;
        let instant = decode(raw).unwrap();
        assert_eq!(instant.timestamp(), 0);
        assert_eq!(instant.timestamp_subsec_nanos(), 1_234_500);
    }

    #[test]
    fn year_one_and_year_9999_are_representable() {
        let first = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(encode_utc(first).unwrap(), KIND_UTC);
        let last = Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap();
        assert!(encode_utc(last).is_ok());
    }

    #[test]
    fn year_10000_is_rejected() {
        let beyond = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(encode_utc(beyond), Err(CryptoError::TimestampOutOfRange)));
    }

    #[test]
    fn rejects_non_utc_kinds() {
        let ticks = TICKS_AT_UNIX_EPOCH as u64;
        assert!(matches!(decode(ticks), Err(CryptoError::InvalidTimestampKind(0))));
        assert!(matches!(decode(ticks | (2 << 62)), Err(CryptoError::InvalidTimestampKind(2))));
    }

    #[test]
    fn one_second_apart_is_strictly_increasing() {
        let t0 = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let t1 = t0 + chrono::Duration::seconds(1);
        let a = encode_utc(t0).unwrap() & TICKS_MASK;
        let b = encode_utc(t1).unwrap() & TICKS_MASK;
        assert_eq!(b - a, 10_000_000);
    }
}
