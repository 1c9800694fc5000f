//! The generic pointwise-bit combinator.
//!
//! `bitwise(f, x, y)` is defined by halving recursion:
//!
//! ```text
//! bitwise f x y =
//!   if x = 0 then (if f false true then y else 0)
//!   else if y = 0 then (if f true false then x else 0)
//!   else 2 * bitwise f (x / 2) (y / 2) + f (x % 2 = 1) (y % 2 = 1)
//! ```
//!
//! Note that `f false false` is only consulted while both operands are still
//! nonzero; once one of them runs out, the boundary row of `f` decides
//! whether the rest of the other operand passes through. When
//! `f false false = false` the result satisfies
//! `testBit (bitwise f x y) i = f (testBit x i) (testBit y i)` for every `i`.

use crate::errors::NatError;
use crate::nat::Nat;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

/// A boolean function of two arguments, stored as its four truth-table rows.
///
/// Row `(a, b)` lives at bit `2 * a + b` of `rows`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TruthTable {
    rows: u8,
}

impl TruthTable {
    pub const AND: TruthTable = TruthTable::new(false, false, false, true);
    pub const OR: TruthTable = TruthTable::new(false, true, true, true);
    pub const XOR: TruthTable = TruthTable::new(false, true, true, false);

    /// Rows are given in the order `f(F,F)`, `f(F,T)`, `f(T,F)`, `f(T,T)`.
    pub const fn new(ff: bool, ft: bool, tf: bool, tt: bool) -> Self {
        TruthTable { rows: (ff as u8) | ((ft as u8) << 1) | ((tf as u8) << 2) | ((tt as u8) << 3) }
    }

    /// Tabulate an arbitrary boolean function by evaluating it on all four rows.
    pub fn of<F: Fn(bool, bool) -> bool>(f: F) -> Self {
        TruthTable::new(f(false, false), f(false, true), f(true, false), f(true, true))
    }

    pub const fn from_index(index: u8) -> Self {
        TruthTable { rows: index & 0xf }
    }

    pub const fn index(self) -> u8 {
        self.rows
    }

    /// All sixteen boolean functions of two arguments.
    pub fn all() -> impl Iterator<Item = TruthTable> {
        (0u8..16).map(TruthTable::from_index)
    }

    pub const fn apply(self, a: bool, b: bool) -> bool {
        let row = ((a as u8) << 1) | (b as u8);
        (self.rows >> row) & 1 == 1
    }

    /// `f(false, false) = false`, the precondition of the pointwise law.
    pub const fn preserves_zero(self) -> bool {
        !self.apply(false, false)
    }

    /// Apply the table to 64 bit positions at once.
    pub fn word(self, a: u64, b: u64) -> u64 {
        let mut r = 0;
        if self.apply(false, false) {
            r |= !a & !b;
        }
        if self.apply(false, true) {
            r |= !a & b;
        }
        if self.apply(true, false) {
            r |= a & !b;
        }
        if self.apply(true, true) {
            r |= a & b;
        }
        r
    }

    /// `bitwise(self, x, y)`, one 64-bit limb at a time.
    pub fn combine(self, x: &Nat, y: &Nat) -> Nat {
        let lx = x.bit_len();
        let ly = y.bit_len();
        // The recursion runs for exactly k = min(lx, ly) steps before one
        // operand reaches zero.
        let k = lx.min(ly);

        let rest = if lx <= ly {
            if self.apply(false, true) {
                Nat::from_biguint(y.as_biguint() >> k)
            } else {
                Nat::zero()
            }
        } else if self.apply(true, false) {
            Nat::from_biguint(x.as_biguint() >> k)
        } else {
            Nat::zero()
        };

        let n_words = ((k + 63) / 64) as usize;
        let mut xs = x.words();
        let mut ys = y.words();
        let mut low: Vec<u64> = Vec::with_capacity(n_words);
        for _ in 0..n_words {
            let a = xs.next().unwrap_or(0);
            let b = ys.next().unwrap_or(0);
            low.push(self.word(a, b));
        }
        if k % 64 != 0 {
            if let Some(last) = low.last_mut() {
                *last &= (1u64 << (k % 64)) - 1;
            }
        }

        let low = Nat::from_words(&low).into_biguint();
        let r = Nat::from_biguint(low | (rest.into_biguint() << k));

        #[cfg(feature = "check-combinator")]
        assert_eq!(r, bitwise_halving(self, x, y), "word-level combinator disagrees with halving");

        r
    }
}

/// Serialized as its index; indices above 15 name no table.
impl TryFrom<u8> for TruthTable {
    type Error = NatError;

    fn try_from(index: u8) -> Result<Self, NatError> {
        if index < 16 { Ok(TruthTable { rows: index }) } else { Err(NatError::TruthTable(index)) }
    }
}

impl From<TruthTable> for u8 {
    fn from(f: TruthTable) -> u8 {
        f.rows
    }
}

impl fmt::Debug for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = |b: bool| if b { '1' } else { '0' };
        write!(
            f,
            "TruthTable[{}{}{}{}]",
            c(self.apply(false, false)),
            c(self.apply(false, true)),
            c(self.apply(true, false)),
            c(self.apply(true, true))
        )
    }
}

/// Combine `x` and `y` bit by bit with `f`.
pub fn bitwise<F: Fn(bool, bool) -> bool>(f: F, x: &Nat, y: &Nat) -> Nat {
    TruthTable::of(f).combine(x, y)
}

/// The halving recursion itself, one bit per step.
///
/// Quadratic in the operand length; `TruthTable::combine` is the fast path
/// and must agree with this on every input.
pub fn bitwise_halving(f: TruthTable, x: &Nat, y: &Nat) -> Nat {
    let mut low_bits: Vec<bool> = Vec::new();
    let mut n = x.clone();
    let mut m = y.clone();
    let base = loop {
        if n.is_zero() {
            break if f.apply(false, true) { m } else { Nat::zero() };
        }
        if m.is_zero() {
            break if f.apply(true, false) { n } else { Nat::zero() };
        }
        low_bits.push(f.apply(n.is_odd(), m.is_odd()));
        n = n.half();
        m = m.half();
    };
    low_bits.iter().rev().fold(base, |r, b| r.push_low_bit(*b))
}
