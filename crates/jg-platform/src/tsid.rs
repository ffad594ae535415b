//! TSID Generation
//!
//! Time-sorted string IDs in Crockford Base32. 13 characters, uppercase,
//! lexicographically ordered by creation time. Used as `_id` for every
//! persisted entity so documents sort chronologically without a separate
//! sort field and stay copy-pasteable in URLs.

use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Crockford Base32 alphabet (no I, L, O, U). Ascending in ASCII, which
/// keeps encoded IDs sortable.
const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Custom epoch: 2020-01-01T00:00:00Z. Keeps the millis component within
/// 42 bits for well over a century.
const TSID_EPOCH_MILLIS: u64 = 1_577_836_800_000;

const RANDOM_BITS: u32 = 22;

/// Last issued value. IDs are forced strictly increasing across threads so
/// same-millisecond generation stays unique and sortable.
static LAST_TSID: AtomicU64 = AtomicU64::new(0);

pub struct TsidGenerator;

impl TsidGenerator {
    /// Generate a new TSID string.
    pub fn generate() -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
            .saturating_sub(TSID_EPOCH_MILLIS);

        let random: u64 = rand::thread_rng().gen_range(0..(1u64 << RANDOM_BITS));
        let candidate = (millis << RANDOM_BITS) | random;

        let mut prev = LAST_TSID.load(Ordering::Relaxed);
        let value = loop {
            let next = candidate.max(prev + 1);
            match LAST_TSID.compare_exchange(prev, next, Ordering::SeqCst, Ordering::Relaxed) {
                Ok(_) => break next,
                Err(observed) => prev = observed,
            }
        };

        Self::encode(value)
    }

    /// Encode a 64-bit value as 13 Crockford Base32 characters, most
    /// significant bits first.
    fn encode(value: u64) -> String {
        let mut out = String::with_capacity(13);
        for i in 0..13 {
            let shift = 60 - i * 5;
            let index = ((value >> shift) & 0x1F) as usize;
            out.push(ALPHABET[index] as char);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_length_and_alphabet() {
        let id = TsidGenerator::generate();
        assert_eq!(id.len(), 13);
        assert!(id.chars().all(|c| {
            matches!(c, '0'..='9' | 'A'..='H' | 'J'..='K' | 'M'..='N' | 'P'..='T' | 'V'..='Z')
        }));
    }

    #[test]
    fn test_uniqueness() {
        let ids: HashSet<String> = (0..1000).map(|_| TsidGenerator::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_monotonic_within_process() {
        let ids: Vec<String> = (0..100).map(|_| TsidGenerator::generate()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_encode_is_order_preserving() {
        assert!(TsidGenerator::encode(1) < TsidGenerator::encode(2));
        assert!(TsidGenerator::encode(u64::from(u32::MAX)) < TsidGenerator::encode(u64::MAX));
    }
}
