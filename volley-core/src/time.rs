//! Millisecond clock arithmetic
//!
//! The control clock is a free-running `u32` millisecond counter that wraps
//! after ~49.7 days. All comparisons go through these helpers so rollover
//! never produces a spurious "elapsed" or "not elapsed" result.
//!
//! Intervals are only meaningful up to one full wrap. A timestamp held for
//! longer than ~49.7 days aliases to a short elapsed time; the flywheel
//! spool gate then reads as not spooled for up to `spool_ms`, and the
//! pusher holds until it passes again.

/// Milliseconds elapsed from `since` to `now`, across a single wrap
#[inline]
pub const fn elapsed_ms(now_ms: u32, since_ms: u32) -> u32 {
    now_ms.wrapping_sub(since_ms)
}

/// Check whether at least `window_ms` has passed since `since_ms`
#[inline]
pub const fn has_elapsed(now_ms: u32, since_ms: u32, window_ms: u32) -> bool {
    elapsed_ms(now_ms, since_ms) >= window_ms
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_elapsed_simple() {
        assert_eq!(elapsed_ms(1500, 1000), 500);
        assert!(has_elapsed(1500, 1000, 500));
        assert!(!has_elapsed(1499, 1000, 500));
    }

    #[test]
    fn test_elapsed_across_rollover() {
        let since = u32::MAX - 9;
        assert_eq!(elapsed_ms(10, since), 20);
        assert!(has_elapsed(10, since, 20));
        assert!(!has_elapsed(10, since, 21));
    }

    proptest! {
        #[test]
        fn prop_elapsed_is_offset_invariant(start: u32, delta in 0u32..1_000_000, window in 0u32..1_000_000) {
            let now = start.wrapping_add(delta);
            prop_assert_eq!(elapsed_ms(now, start), delta);
            prop_assert_eq!(has_elapsed(now, start, window), delta >= window);
        }
    }
}
