//! Bit extensionality and bit bounds, as witness-producing functions.
//!
//! Each law that asserts "there exists a position" returns that position
//! when its hypothesis holds, and `None` exactly when the hypothesis fails:
//!
//! - `ne_zero_implies_bit_true`: `x != 0` gives a set bit.
//! - `ne_implies_bit_diff`: `x != y` gives a position where the bits differ.
//! - `ge_two_pow_implies_high_bit_true`: `x >= 2^n` gives a set bit at or above `n`.
//!
//! Their contrapositives are `eq_of_test_bit_eq` and `lt_pow_two_of_test_bit`,
//! which decide equality and `x < 2^n` from bits alone.

use crate::nat::Nat;
use crate::test_bit::test_bit;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitDiff {
    pub position: u64,
    pub left: bool,
    pub right: bool,
}

/// Lowest set bit of a nonzero `x`.
///
/// Peels off zero low bits by halving; whole zero limbs are skipped in one
/// step.
pub fn ne_zero_implies_bit_true(x: &Nat) -> Option<u64> {
    let mut base = 0u64;
    for w in x.words() {
        if w != 0 {
            return Some(base + w.trailing_zeros() as u64);
        }
        base += 64;
    }
    None
}

/// Lowest position at which `x` and `y` disagree, `None` iff `x == y`.
///
/// If the low bits differ the answer is 0, otherwise it is one more than the
/// answer for `(x / 2, y / 2)`; equal low limbs are skipped 64 bits at a time.
pub fn ne_implies_bit_diff(x: &Nat, y: &Nat) -> Option<BitDiff> {
    let mut xs = x.words();
    let mut ys = y.words();
    let mut base = 0u64;
    loop {
        let (a, b) = match (xs.next(), ys.next()) {
            (None, None) => return None,
            (a, b) => (a.unwrap_or(0), b.unwrap_or(0)),
        };
        let d = a ^ b;
        if d != 0 {
            let position = base + d.trailing_zeros() as u64;
            trace!(position, "bit difference");
            return Some(BitDiff {
                position,
                left: test_bit(x, position),
                right: test_bit(y, position),
            });
        }
        base += 64;
    }
}

/// Equality decided purely from bits: no differing position means equal.
pub fn eq_of_test_bit_eq(x: &Nat, y: &Nat) -> bool {
    ne_implies_bit_diff(x, y).is_none()
}

/// Some set bit at position `>= n`, `None` iff `x < 2^n`.
pub fn ge_two_pow_implies_high_bit_true(x: &Nat, n: u64) -> Option<u64> {
    x.highest_set_bit().filter(|p| *p >= n)
}

/// `x < 2^n` decided from bits: true iff every bit at position `>= n` is clear.
pub fn lt_pow_two_of_test_bit(x: &Nat, n: u64) -> bool {
    ge_two_pow_implies_high_bit_true(x, n).is_none()
}

/// Whether `x` and `y` agree on every position below `n`.
pub fn bits_agree_below(x: &Nat, y: &Nat, n: u64) -> bool {
    match ne_implies_bit_diff(x, y) {
        None => true,
        Some(diff) => diff.position >= n,
    }
}
