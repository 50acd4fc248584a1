//! # Accrual Module
//!
//! The pure linear-vesting calculator. Every function here is a
//! deterministic function of `(stream, now)` with no side effects; this is
//! the single source of truth for earned/available/remaining amounts.
//!
//! All division rounds down, which guarantees `earned <= total_amount` and
//! makes `earned` monotonically non-decreasing in `now`. Multiplication is
//! widened through `u128` so `total_amount * elapsed` cannot overflow.
//!
//! Pause policy: `earned` depends only on wall-clock `now`, never on the
//! `active` flag. Pausing a stream blocks withdrawals, not accrual.

use crate::stream::Stream;

/// Seconds of accrual at `now`, clamped to `[0, duration]`.
pub fn elapsed(stream: &Stream, now: u64) -> u64 {
    now.saturating_sub(stream.start_time).min(stream.duration)
}

/// Total amount earned by the employee at `now`.
pub fn earned(stream: &Stream, now: u64) -> u64 {
    let elapsed = elapsed(stream, now);
    (stream.total_amount as u128 * elapsed as u128 / stream.duration as u128) as u64
}

/// Earned but not yet withdrawn.
pub fn available(stream: &Stream, now: u64) -> u64 {
    earned(stream, now).saturating_sub(stream.total_withdrawn)
}

/// Not yet earned.
pub fn remaining(stream: &Stream, now: u64) -> u64 {
    stream.total_amount - earned(stream, now)
}

/// Accrual progress as a whole percentage in `[0, 100]`.
pub fn progress_percent(stream: &Stream, now: u64) -> u64 {
    let elapsed = elapsed(stream, now);
    (100u128 * elapsed as u128 / stream.duration as u128) as u64
}
