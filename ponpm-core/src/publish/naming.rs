//! Collision-free destination key generation.
//!
//! Keys look like `<prefix><report_type>_<YYYYMMDD-HHMM>_<n>.csv` with `n`
//! drawn from `1..=999999`. A candidate is probed against the destination
//! store and regenerated until it does not exist.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::Result;
use crate::io::BlockingStore;
use crate::report::ReportType;

/// Range of the random key suffix.
pub const SUFFIX_RANGE: RangeInclusive<u32> = 1..=999_999;

/// `strftime` pattern for the key's time component.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M";

/// Source of the time component of generated keys.
pub type Clock = fn() -> DateTime<Utc>;

/// Source of random key suffixes.
///
/// Injected so tests can force collisions deterministically.
pub trait SuffixSource {
    /// Next suffix, expected to fall within [`SUFFIX_RANGE`].
    fn next_suffix(&mut self) -> u32;
}

/// Uniformly random suffixes.
pub struct RandomSuffix<R: Rng = StdRng> {
    rng: R,
}

impl RandomSuffix<StdRng> {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible sequence, for tests.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomSuffix<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomSuffix<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SuffixSource for RandomSuffix<R> {
    fn next_suffix(&mut self) -> u32 {
        self.rng.gen_range(SUFFIX_RANGE)
    }
}

/// Make sure a non-empty prefix ends in `/`.
///
/// An empty prefix stays empty so keys land at the store root.
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with('/') {
        prefix.to_string()
    } else {
        format!("{prefix}/")
    }
}

/// Generates destination keys that are free at call time.
pub struct KeyGenerator<S: SuffixSource = RandomSuffix> {
    suffixes: S,
    clock: Clock,
}

impl KeyGenerator {
    /// Random suffixes and the UTC wall clock.
    pub fn new() -> Self {
        Self::with_suffixes(RandomSuffix::new())
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SuffixSource> KeyGenerator<S> {
    pub fn with_suffixes(suffixes: S) -> Self {
        Self {
            suffixes,
            clock: Utc::now,
        }
    }

    /// Replace the clock used for the time component.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Build one candidate key without probing the store.
    pub fn candidate(&mut self, prefix: &str, report_type: ReportType) -> String {
        format!(
            "{}{}_{}_{}.csv",
            normalize_prefix(prefix),
            report_type,
            (self.clock)().format(TIMESTAMP_FORMAT),
            self.suffixes.next_suffix()
        )
    }

    /// Return a key that does not exist in `store`.
    ///
    /// Regenerates on every collision with no retry limit. Probe failures
    /// other than "not found" are returned.
    pub fn unique_key(
        &mut self,
        store: &BlockingStore,
        prefix: &str,
        report_type: ReportType,
    ) -> Result<String> {
        loop {
            let key = self.candidate(prefix, report_type);
            if !store.exists(&key)? {
                return Ok(key);
            }
            debug!(store = store.name(), key = %key, "Destination key taken, regenerating");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::VecDeque;

    /// Hands out a fixed sequence of suffixes.
    struct Scripted(VecDeque<u32>);

    impl SuffixSource for Scripted {
        fn next_suffix(&mut self) -> u32 {
            self.0.pop_front().expect("ran out of scripted suffixes")
        }
    }

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 59).unwrap()
    }

    fn generator(suffixes: &[u32]) -> KeyGenerator<Scripted> {
        KeyGenerator::with_suffixes(Scripted(suffixes.iter().copied().collect()))
            .with_clock(fixed_clock)
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("sdc_pon_extracted"), "sdc_pon_extracted/");
        assert_eq!(normalize_prefix("sdc_pon_extracted/"), "sdc_pon_extracted/");
        assert_eq!(normalize_prefix(""), "");
    }

    #[test]
    fn test_candidate_format() {
        let mut keys = generator(&[42]);
        assert_eq!(
            keys.candidate("out", ReportType::PonOltUtilHistory),
            "out/ponOltUtilHistory_20240309-0705_42.csv"
        );
    }

    #[test]
    fn test_unique_key_without_collision() {
        let store = BlockingStore::in_memory();
        let mut keys = generator(&[7]);
        let key = keys
            .unique_key(&store, "out/", ReportType::Ng2CpOltUtilHistory)
            .unwrap();
        assert_eq!(key, "out/ng2CpOltUtilHistory_20240309-0705_7.csv");
    }

    #[test]
    fn test_unique_key_regenerates_on_collision() {
        let store = BlockingStore::in_memory();
        store
            .put("out/ponOltUtilHistory_20240309-0705_1.csv", Vec::new())
            .unwrap();
        store
            .put("out/ponOltUtilHistory_20240309-0705_2.csv", Vec::new())
            .unwrap();

        let mut keys = generator(&[1, 2, 1, 3]);
        let key = keys
            .unique_key(&store, "out/", ReportType::PonOltUtilHistory)
            .unwrap();
        assert_eq!(key, "out/ponOltUtilHistory_20240309-0705_3.csv");
        assert!(!store.exists(&key).unwrap());
    }

    #[test]
    fn test_random_suffix_in_range() {
        let mut suffixes = RandomSuffix::seeded(17);
        for _ in 0..1000 {
            assert!(SUFFIX_RANGE.contains(&suffixes.next_suffix()));
        }
    }

    #[test]
    fn test_seeded_suffixes_are_reproducible() {
        let mut a = RandomSuffix::seeded(3);
        let mut b = RandomSuffix::seeded(3);
        let a: Vec<_> = (0..5).map(|_| a.next_suffix()).collect();
        let b: Vec<_> = (0..5).map(|_| b.next_suffix()).collect();
        assert_eq!(a, b);
    }
}
