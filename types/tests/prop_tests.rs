use proptest::prelude::*;

use goodhaul_types::Timestamp;

proptest! {
    /// A deadline of `base + ttl` is never past at or before the deadline
    /// instant, and always past one second after it.
    #[test]
    fn deadline_strictness(
        base in 0u64..1_000_000_000,
        ttl in 0u64..1_000_000,
        early in 0u64..1_000_000,
    ) {
        let deadline = Timestamp::new(base).plus_secs(ttl);
        let at = Timestamp::new(base + ttl);
        let before = Timestamp::new((base + ttl).saturating_sub(early));
        let after = Timestamp::new(base + ttl + 1);

        prop_assert!(!deadline.is_past(at));
        prop_assert!(!deadline.is_past(before));
        prop_assert!(deadline.is_past(after));
    }

    /// Elapsed time never underflows when `now` precedes the timestamp.
    #[test]
    fn elapsed_saturates_at_zero(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let earlier = Timestamp::new(a.min(b));
        let later = Timestamp::new(a.max(b));
        prop_assert_eq!(later.elapsed_since(earlier), 0);
        prop_assert_eq!(earlier.elapsed_since(later), a.max(b) - a.min(b));
    }

    /// Advancing a timestamp saturates instead of wrapping.
    #[test]
    fn plus_secs_never_wraps(base in 0u64..u64::MAX, add in 0u64..u64::MAX) {
        let advanced = Timestamp::new(base).plus_secs(add);
        prop_assert!(advanced.as_secs() >= base);
    }
}
