//! Property-based tests for the accrual calculator.
//!
//! Verifies the calculator's invariants across the whole input space:
//! - earned is bounded by the funded principal
//! - earned is monotonically non-decreasing in time
//! - boundary exactness at start_time and start_time + duration
//! - available/remaining accounting identities
//! - the pause flag never changes accrual (named policy invariant)

use proptest::prelude::*;

use paystream_core::accrual::{available, earned, elapsed, progress_percent, remaining};
use paystream_core::{Address, Stream, StreamId};

const MAX_AMOUNT: u64 = 1_000_000_000_000;
const MAX_DURATION: u64 = 10 * 365 * 24 * 3600;
const MAX_START: u64 = 4_000_000_000;

fn participant(n: u64) -> Address {
    Address::parse(&format!("0x{n:040x}")).unwrap()
}

/// Generate a valid stream together with a pair of probe instants.
fn arb_stream_and_times() -> impl Strategy<Value = (Stream, u64, u64)> {
    (
        1u64..=MAX_AMOUNT,   // total_amount
        0u64..=MAX_START,    // start_time
        1u64..=MAX_DURATION, // duration
        any::<bool>(),       // active
        0.0f64..=1.0,        // withdrawn fraction of earned-at-now1
        0u64..=MAX_DURATION * 2,
        0u64..=MAX_DURATION * 2,
    )
        .prop_map(
            |(total_amount, start_time, duration, active, withdrawn_frac, off1, off2)| {
                let (off1, off2) = if off1 <= off2 { (off1, off2) } else { (off2, off1) };
                let now1 = start_time.saturating_add(off1);
                let now2 = start_time.saturating_add(off2);

                let mut stream = Stream {
                    id: StreamId(1),
                    employer: participant(1),
                    employee: participant(2),
                    total_amount,
                    encrypted_amount: None,
                    start_time,
                    duration,
                    total_withdrawn: 0,
                    active,
                };
                stream.total_withdrawn =
                    (earned(&stream, now1) as f64 * withdrawn_frac).floor() as u64;
                (stream, now1, now2)
            },
        )
}

proptest! {
    #[test]
    fn earned_is_bounded((stream, now1, now2) in arb_stream_and_times()) {
        prop_assert!(earned(&stream, now1) <= stream.total_amount);
        prop_assert!(earned(&stream, now2) <= stream.total_amount);
    }

    #[test]
    fn earned_is_monotonic((stream, now1, now2) in arb_stream_and_times()) {
        prop_assert!(earned(&stream, now1) <= earned(&stream, now2));
    }

    #[test]
    fn boundary_exactness((stream, _now1, _now2) in arb_stream_and_times()) {
        prop_assert_eq!(earned(&stream, stream.start_time), 0);
        prop_assert_eq!(
            earned(&stream, stream.start_time + stream.duration),
            stream.total_amount
        );
    }

    #[test]
    fn available_accounting_identity((stream, now1, _now2) in arb_stream_and_times()) {
        let earned_now = earned(&stream, now1);
        prop_assert_eq!(available(&stream, now1), earned_now - stream.total_withdrawn);
        prop_assert_eq!(remaining(&stream, now1), stream.total_amount - earned_now);
    }

    #[test]
    fn progress_stays_in_percent_range((stream, now1, now2) in arb_stream_and_times()) {
        prop_assert!(progress_percent(&stream, now1) <= 100);
        prop_assert!(progress_percent(&stream, now2) <= 100);
        prop_assert!(progress_percent(&stream, now1) <= progress_percent(&stream, now2));
    }

    #[test]
    fn elapsed_never_exceeds_duration((stream, now1, _now2) in arb_stream_and_times()) {
        prop_assert!(elapsed(&stream, now1) <= stream.duration);
    }

    /// Named policy invariant: pausing blocks withdrawals, never accrual.
    #[test]
    fn accrual_ignores_pause_flag((stream, now1, now2) in arb_stream_and_times()) {
        let mut flipped = stream.clone();
        flipped.active = !flipped.active;
        prop_assert_eq!(earned(&stream, now1), earned(&flipped, now1));
        prop_assert_eq!(earned(&stream, now2), earned(&flipped, now2));
        prop_assert_eq!(available(&stream, now1), available(&flipped, now1));
    }
}
