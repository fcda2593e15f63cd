//! Device credential derivation
//!
//! Portals identify a set-top box by identifiers hashed from its MAC
//! address. Derivation is pure: any string is accepted, nothing is
//! validated, and the same input always yields the same output.
//! Portals compare these identifiers case-sensitively, so all digests
//! are upper-case hex.

use md5::{Digest, Md5};
use serde::Serialize;
use sha2::Sha256;

/// Length of the truncated serial number
pub const SERIAL_SHORT_LEN: usize = 13;

/// Identifiers derived from a hardware address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceCredentials {
    /// MD5 of the address, 32 upper-case hex chars
    pub serial_number: String,
    /// First 13 chars of `serial_number`
    pub serial_number_short: String,
    /// SHA-256 of the address, 64 upper-case hex chars
    pub device_id: String,
}

impl DeviceCredentials {
    /// Derive credentials from a hardware address (UTF-8 bytes, as given)
    pub fn derive(mac: &str) -> Self {
        let serial_number = hex::encode_upper(Md5::digest(mac.as_bytes()));
        let serial_number_short = serial_number[..SERIAL_SHORT_LEN].to_string();
        let device_id = hex::encode_upper(Sha256::digest(mac.as_bytes()));

        Self {
            serial_number,
            serial_number_short,
            device_id,
        }
    }

    /// Secondary device signature: SHA-256 of `"{serial_number_short}+{mac}"`
    pub fn signature(&self, mac: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.serial_number_short.as_bytes());
        hasher.update(b"+");
        hasher.update(mac.as_bytes());
        hex::encode_upper(hasher.finalize())
    }
}

/// Hardware address with the `:` separators stripped
pub fn compact_mac(mac: &str) -> String {
    mac.replace(':', "")
}
