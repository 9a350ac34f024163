//! Faux-serial generation for `onyo new` when content explicitly requests one
//! (`serial_number: faux`) (spec §4.9.1, Open Question: length).
//!
//! Settled on `DEFAULT_FAUX_SERIAL_LENGTH` alphanumeric characters (see
//! `consts`), matching the ~62^N space the original draws from. No crate in
//! the retrieved corpus supplies randomness for a case this small, so the
//! source is the process clock and pid rather than a dependency pulled in
//! solely for a handful of random characters. Collision avoidance against
//! existing asset basenames is `Inventory::add_asset`'s job, not this
//! function's: `generate` just returns one candidate.

use std::hash::Hasher;
use std::time::{SystemTime, UNIX_EPOCH};

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub fn generate(length: usize) -> String {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0);
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    hasher.write_u128(nanos);
    hasher.write_u32(std::process::id());
    let base = ALPHANUMERIC.len() as u64;
    let mut value = hasher.finish();
    let mut out = String::with_capacity(length);
    for i in 0..length {
        out.push(ALPHANUMERIC[(value % base) as usize] as char);
        value /= base;
        if value == 0 {
            hasher.write_usize(i);
            value = hasher.finish();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        assert_eq!(generate(6).len(), 6);
        assert!(generate(6).chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
