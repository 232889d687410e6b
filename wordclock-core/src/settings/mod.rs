//! Persistent clock settings
//!
//! Two values survive a reset: the NTP server name and the UTC offset in
//! minutes. They are stored as one fixed-layout record guarded by a CRC-16
//! (see [`record`]), owned by a [`SettingsStore`], and edited through the
//! configuration endpoint contract in [`api`].

pub mod api;
pub mod record;
pub mod store;

use core::fmt;

use heapless::String;

pub use api::{render_json, SettingsUpdate};
pub use store::{LoadOutcome, SettingsError, SettingsStore};

/// Longest NTP server name in bytes
pub const MAX_SERVER_LEN: usize = 99;

/// Server used when none is configured
pub const DEFAULT_NTP_SERVER: &str = "pool.ntp.org";

/// Offset used when the stored record is invalid (CET)
pub const DEFAULT_UTC_OFFSET: i32 = 60;

/// Lowest accepted UTC offset (UTC-12:00)
pub const MIN_UTC_OFFSET: i32 = -720;

/// Highest accepted UTC offset (UTC+14:00)
pub const MAX_UTC_OFFSET: i32 = 840;

/// NTP server name and UTC offset
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// NTP server host name
    pub ntp_server: String<MAX_SERVER_LEN>,
    /// Offset from UTC in minutes
    pub utc_offset: i32,
}

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Self {
            ntp_server: String::new(),
            utc_offset: DEFAULT_UTC_OFFSET,
        };
        settings.set_ntp_server(DEFAULT_NTP_SERVER);
        settings
    }
}

impl Settings {
    /// Create settings, truncating the server name to [`MAX_SERVER_LEN`]
    ///
    /// The values are not sanitized.
    pub fn new(ntp_server: &str, utc_offset: i32) -> Self {
        let mut settings = Self {
            ntp_server: String::new(),
            utc_offset,
        };
        settings.set_ntp_server(ntp_server);
        settings
    }

    /// Replace the server name, truncating at a character boundary
    pub fn set_ntp_server(&mut self, name: &str) {
        self.ntp_server.clear();
        for c in name.chars() {
            if self.ntp_server.push(c).is_err() {
                break;
            }
        }
    }

    /// Clamp the offset and fill in an empty server name
    pub fn sanitize(&mut self) {
        self.utc_offset = self.utc_offset.clamp(MIN_UTC_OFFSET, MAX_UTC_OFFSET);
        if self.ntp_server.is_empty() {
            self.set_ntp_server(DEFAULT_NTP_SERVER);
        }
    }

    /// Check if [`sanitize`](Self::sanitize) would change nothing
    pub fn is_sane(&self) -> bool {
        (MIN_UTC_OFFSET..=MAX_UTC_OFFSET).contains(&self.utc_offset) && !self.ntp_server.is_empty()
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.utc_offset < 0 { "-" } else { "" };
        let abs = self.utc_offset.unsigned_abs();
        write!(
            f,
            "server: {}, offset: {}{}:{:02}",
            self.ntp_server,
            sign,
            abs / 60,
            abs % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.ntp_server.as_str(), "pool.ntp.org");
        assert_eq!(settings.utc_offset, 60);
        assert!(settings.is_sane());
    }

    #[test]
    fn test_sanitize_clamps_offset() {
        let mut settings = Settings::new("ntp.example", 2000);
        settings.sanitize();
        assert_eq!(settings.utc_offset, 840);

        let mut settings = Settings::new("ntp.example", -2000);
        settings.sanitize();
        assert_eq!(settings.utc_offset, -720);
        assert_eq!(settings.ntp_server.as_str(), "ntp.example");
    }

    #[test]
    fn test_sanitize_fills_empty_server() {
        let mut settings = Settings::new("", 0);
        assert!(!settings.is_sane());
        settings.sanitize();
        assert_eq!(settings.ntp_server.as_str(), DEFAULT_NTP_SERVER);
        assert_eq!(settings.utc_offset, 0);
    }

    #[test]
    fn test_long_server_truncated() {
        let long = "a".repeat(150);
        let settings = Settings::new(&long, 0);
        assert_eq!(settings.ntp_server.len(), MAX_SERVER_LEN);

        // Never splits a multi-byte character
        let long = "é".repeat(60);
        let settings = Settings::new(&long, 0);
        assert_eq!(settings.ntp_server.len(), 98);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Settings::new("pool.ntp.org", 60).to_string(),
            "server: pool.ntp.org, offset: 1:00"
        );
        assert_eq!(Settings::new("x", -90).to_string(), "server: x, offset: -1:30");
        assert_eq!(Settings::new("x", -30).to_string(), "server: x, offset: -0:30");
        assert_eq!(Settings::new("x", 345).to_string(), "server: x, offset: 5:45");
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(server in "[a-z.]{0,120}", offset in any::<i32>()) {
            let mut once = Settings::new(&server, offset);
            once.sanitize();
            prop_assert!(once.is_sane());
            let mut twice = once.clone();
            twice.sanitize();
            prop_assert_eq!(once, twice);
        }
    }
}
