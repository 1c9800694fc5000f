//! Bit access.
//!
//! Three definitions of `testBit` are provided and must agree everywhere:
//! direct limb lookup, the halving recursion
//! (`testBit x 0 = x % 2 = 1`, `testBit x (i+1) = testBit (x/2) i`),
//! and the arithmetic form `x / 2^i % 2 = 1`.

use crate::nat::Nat;
use std::convert::TryFrom;

/// Bit `i` of `x`, position 0 being the least significant.
pub fn test_bit(x: &Nat, i: u64) -> bool {
    x.as_biguint().bit(i)
}

pub fn test_bit_halving(x: &Nat, i: u64) -> bool {
    let mut x = x.clone();
    for _ in 0..i {
        if x.is_zero() {
            return false;
        }
        x = x.half();
    }
    x.is_odd()
}

pub fn test_bit_div_mod(x: &Nat, i: u64) -> bool {
    let two = Nat::from(2u32);
    (x / Nat::pow2(i)) % two == Nat::one()
}

impl Nat {
    pub fn test_bit(&self, i: u64) -> bool {
        test_bit(self, i)
    }

    /// The finite bit sequence of `self`, least significant first, up to
    /// `bit_len`. Every later bit is false.
    pub fn bits(&self) -> Bits<'_> {
        Bits { x: self, i: 0, end: self.bit_len() }
    }

    /// Positions of the set bits, ascending.
    pub fn set_bits(&self) -> impl Iterator<Item = u64> + '_ {
        self.bits().enumerate().filter(|(_, b)| *b).map(|(i, _)| i as u64)
    }

    /// Position of the highest set bit, `None` for zero.
    pub fn highest_set_bit(&self) -> Option<u64> {
        self.bit_len().checked_sub(1)
    }
}

pub struct Bits<'a> {
    x: &'a Nat,
    i: u64,
    end: u64,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.i >= self.end {
            return None;
        }
        let b = test_bit(self.x, self.i);
        self.i += 1;
        Some(b)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.end - self.i).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}
