//! `and`, `or`, `xor` as instances of the combinator, unsigned shifts, and
//! the masking helpers built from them.

use crate::bitwise::TruthTable;
use crate::bounds::lt_pow_two_of_test_bit;
use crate::errors::{NatError, NatResult};
use crate::nat::Nat;
use std::ops::{BitAnd, BitOr, BitXor, Shl, Shr};

pub fn and(x: &Nat, y: &Nat) -> Nat {
    TruthTable::AND.combine(x, y)
}

pub fn or(x: &Nat, y: &Nat) -> Nat {
    TruthTable::OR.combine(x, y)
}

pub fn xor(x: &Nat, y: &Nat) -> Nat {
    TruthTable::XOR.combine(x, y)
}

/// `x * 2^i`
pub fn shift_left(x: &Nat, i: u64) -> Nat {
    Nat::from_biguint(x.as_biguint() << i)
}

/// `x / 2^i`; there is no sign bit to extend.
pub fn shift_right(x: &Nat, i: u64) -> Nat {
    Nat::from_biguint(x.as_biguint() >> i)
}

/// `x % 2^n`, computed as `x & (2^n - 1)`.
pub fn mod_two_pow(x: &Nat, n: u64) -> Nat {
    if lt_pow_two_of_test_bit(x, n) {
        // x & (2^n - 1) = x when x < 2^n
        return x.clone();
    }
    and(x, &Nat::mask(n))
}

/// `2^i * hi + lo`, assembled as `(hi <<< i) ||| lo`.
///
/// Addition and bitwise or coincide only while `lo < 2^i`; a wider `lo`
/// is rejected.
pub fn concat_bits(hi: &Nat, i: u64, lo: &Nat) -> NatResult<Nat> {
    if !lt_pow_two_of_test_bit(lo, i) {
        return Err(NatError::LowPartTooWide { low: lo.to_string(), width: i });
    }
    Ok(or(&shift_left(hi, i), lo))
}

/// Split `x` at bit `i` into `(x >>> i, x % 2^i)`; inverse of `concat_bits`.
pub fn split_bits(x: &Nat, i: u64) -> (Nat, Nat) {
    (shift_right(x, i), mod_two_pow(x, i))
}

macro_rules! nat_bitop {
    ($trait:ident, $method:ident, $f:ident) => {
        impl<'a, 'b> $trait<&'b Nat> for &'a Nat {
            type Output = Nat;
            fn $method(self, rhs: &'b Nat) -> Nat {
                $f(self, rhs)
            }
        }
        impl<'b> $trait<&'b Nat> for Nat {
            type Output = Nat;
            fn $method(self, rhs: &'b Nat) -> Nat {
                $f(&self, rhs)
            }
        }
        impl $trait<Nat> for Nat {
            type Output = Nat;
            fn $method(self, rhs: Nat) -> Nat {
                $f(&self, &rhs)
            }
        }
    };
}

nat_bitop!(BitAnd, bitand, and);
nat_bitop!(BitOr, bitor, or);
nat_bitop!(BitXor, bitxor, xor);

macro_rules! nat_shift {
    ($trait:ident, $method:ident, $f:ident) => {
        impl $trait<u64> for &Nat {
            type Output = Nat;
            fn $method(self, i: u64) -> Nat {
                $f(self, i)
            }
        }
        impl $trait<u64> for Nat {
            type Output = Nat;
            fn $method(self, i: u64) -> Nat {
                $f(&self, i)
            }
        }
    };
}

nat_shift!(Shl, shl, shift_left);
nat_shift!(Shr, shr, shift_right);
