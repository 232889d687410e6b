//! Configuration endpoint contract
//!
//! The HTTP side of the firmware is an external collaborator. It hands the
//! raw query or form body to [`SettingsUpdate::parse`] and serves
//! [`render_json`] for reads:
//!
//! ```text
//! GET  -> {"ntpServer":"pool.ntp.org","timeOffset":60}
//! POST <- ntpServer=de.pool.ntp.org&timeOffset=120
//! ```

use core::fmt::Write;

use heapless::{String, Vec};

use super::{Settings, MAX_SERVER_LEN};

/// Room for the longest rendering (every server byte escaped as `\u00XX`)
pub const JSON_CAPACITY: usize = 640;

/// Longest form value decoded; anything beyond is dropped
const MAX_VALUE_LEN: usize = 128;

/// Render the settings as the JSON object served to clients
pub fn render_json(settings: &Settings) -> String<JSON_CAPACITY> {
    let mut out = String::new();
    // Capacity covers the worst case, so the writes cannot fail
    let _ = out.push_str("{\"ntpServer\":\"");
    for c in settings.ntp_server.chars() {
        let _ = match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => write!(out, "\\u{:04x}", c as u32).map_err(|_| ()),
            c => out.push(c),
        };
    }
    let _ = write!(out, "\",\"timeOffset\":{}}}", settings.utc_offset);
    out
}

/// Fields of a configuration update
///
/// Missing fields leave the current value untouched, as does a `timeOffset`
/// that is not an integer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingsUpdate {
    /// New server name, trimmed
    pub ntp_server: Option<String<MAX_SERVER_LEN>>,
    /// New UTC offset in minutes
    pub utc_offset: Option<i32>,
}

impl SettingsUpdate {
    /// Parse a URL-encoded query string or form body
    pub fn parse(form: &str) -> Self {
        let mut update = Self::default();

        for pair in form.split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = url_decode(value);
            let value = utf8_prefix(&value).trim();

            match key {
                "ntpServer" => {
                    let mut name = String::new();
                    for c in value.chars() {
                        if name.push(c).is_err() {
                            break;
                        }
                    }
                    update.ntp_server = Some(name);
                }
                "timeOffset" => {
                    if let Ok(offset) = value.parse::<i32>() {
                        update.utc_offset = Some(offset);
                    }
                }
                _ => {}
            }
        }

        update
    }

    /// Check if the update carries no fields
    pub fn is_empty(&self) -> bool {
        self.ntp_server.is_none() && self.utc_offset.is_none()
    }

    /// Write the present fields into `settings` (not sanitized)
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(name) = &self.ntp_server {
            settings.set_ntp_server(name);
        }
        if let Some(offset) = self.utc_offset {
            settings.utc_offset = offset;
        }
    }
}

/// Decode `%XX` escapes and `+`; malformed escapes are kept literally
fn url_decode(value: &str) -> Vec<u8, MAX_VALUE_LEN> {
    let bytes = value.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let byte = match bytes[i] {
            b'+' => b' ',
            b'%' => match (bytes.get(i + 1).and_then(|&c| hex(c)), bytes.get(i + 2).and_then(|&c| hex(c))) {
                (Some(hi), Some(lo)) => {
                    i += 2;
                    (hi << 4) | lo
                }
                _ => b'%',
            },
            b => b,
        };
        if out.push(byte).is_err() {
            break;
        }
        i += 1;
    }

    out
}

fn hex(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Longest valid UTF-8 prefix
fn utf8_prefix(bytes: &[u8]) -> &str {
    match core::str::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_json() {
        assert_eq!(
            render_json(&Settings::default()).as_str(),
            r#"{"ntpServer":"pool.ntp.org","timeOffset":60}"#
        );
        assert_eq!(
            render_json(&Settings::new("a\"b\\c\u{1}", -90)).as_str(),
            r#"{"ntpServer":"a\"b\\c\u0001","timeOffset":-90}"#
        );
    }

    #[test]
    fn test_render_worst_case_fits() {
        let name: std::string::String = core::iter::repeat('\u{1}').take(MAX_SERVER_LEN).collect();
        let json = render_json(&Settings::new(&name, i32::MIN));
        assert!(json.ends_with("\"timeOffset\":-2147483648}"));
    }

    #[test]
    fn test_parse_both_fields() {
        let update = SettingsUpdate::parse("ntpServer=de.pool.ntp.org&timeOffset=120");
        assert_eq!(update.ntp_server.as_deref(), Some("de.pool.ntp.org"));
        assert_eq!(update.utc_offset, Some(120));
    }

    #[test]
    fn test_parse_decodes_and_trims() {
        let update = SettingsUpdate::parse("timeOffset=%20-60+&ntpServer=%20my%2Dntp.lan%09");
        assert_eq!(update.ntp_server.as_deref(), Some("my-ntp.lan"));
        assert_eq!(update.utc_offset, Some(-60));
    }

    #[test]
    fn test_parse_missing_and_invalid_fields() {
        let update = SettingsUpdate::parse("timeOffset=soon&other=1");
        assert!(update.is_empty());

        let mut settings = Settings::new("keep.me", 30);
        update.apply_to(&mut settings);
        assert_eq!(settings, Settings::new("keep.me", 30));
    }

    #[test]
    fn test_parse_malformed_escape_kept() {
        let update = SettingsUpdate::parse("ntpServer=50%25%zz%4");
        assert_eq!(update.ntp_server.as_deref(), Some("50%%zz%4"));
    }

    #[test]
    fn test_empty_server_is_defaulted_by_sanitize() {
        let mut settings = Settings::new("old", 0);
        SettingsUpdate::parse("ntpServer=+++").apply_to(&mut settings);
        assert!(settings.ntp_server.is_empty());
        settings.sanitize();
        assert_eq!(settings.ntp_server.as_str(), "pool.ntp.org");
    }
}
