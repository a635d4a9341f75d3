use proptest::prelude::*;

use grow_types::{Blob, Coins, Money, Timestamp};

proptest! {
    /// Money splits into major and minor parts without loss.
    #[test]
    fn money_major_minor_roundtrip(h in 0u64..1_000_000_000) {
        let m = Money::from_hundredths(h);
        prop_assert_eq!(Money::new(m.major(), m.minor()), m);
    }

    /// Coins checked_add agrees with u64 checked_add.
    #[test]
    fn coins_checked_add(a in any::<u64>(), b in any::<u64>()) {
        let sum = Coins::new(a).checked_add(Coins::new(b));
        prop_assert_eq!(sum.map(|c| c.raw()), a.checked_add(b));
    }

    /// Timestamp ordering follows the underlying millis.
    #[test]
    fn timestamp_ordering(a in any::<u64>(), b in any::<u64>()) {
        let ta = Timestamp::from_millis(a);
        let tb = Timestamp::from_millis(b);
        prop_assert_eq!(ta <= tb, a <= b);
    }

    /// Blob references are stable for identical content.
    #[test]
    fn blob_reference_is_deterministic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let a = Blob::new("application/octet-stream", bytes.clone());
        let b = Blob::new("application/octet-stream", bytes);
        prop_assert_eq!(a.reference(), b.reference());
    }
}
