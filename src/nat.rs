//! Arbitrary-precision natural numbers.
//!
//! A `Nat` is conceptually an infinite bit sequence that is eventually all
//! zero. It never wraps and never truncates: every value is backed by a
//! `BigUint`. Arithmetic follows the total conventions of the natural
//! numbers used by proof assistants: `x / 0 = 0`, `x % 0 = x`, and `x - y`
//! saturates at zero.

use crate::errors::{parse_err, NatError};
use num_bigint::BigUint;
use num_traits::{CheckedSub, One, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::ops::{Add, Div, Mul, Rem, Sub};
use std::str::FromStr;

#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nat(BigUint);

impl Nat {
    pub fn zero() -> Self {
        Nat(BigUint::zero())
    }

    pub fn one() -> Self {
        Nat(BigUint::one())
    }

    /// `2^n`
    pub fn pow2(n: u64) -> Self {
        Nat(BigUint::one() << n)
    }

    /// `2^n - 1`: the value whose bits are set exactly below position `n`.
    pub fn mask(n: u64) -> Self {
        Nat((BigUint::one() << n) - BigUint::one())
    }

    pub fn from_biguint(b: BigUint) -> Self {
        Nat(b)
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn into_biguint(self) -> BigUint {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    pub fn is_odd(&self) -> bool {
        self.0.bit(0)
    }

    /// `x % 2`
    pub fn low_bit(&self) -> Nat {
        if self.is_odd() { Nat::one() } else { Nat::zero() }
    }

    /// `x / 2`
    pub fn half(&self) -> Nat {
        Nat(&self.0 >> 1u32)
    }

    /// `2 * x + b`, the inverse of splitting `x` into `half` and `low_bit`.
    pub fn push_low_bit(&self, b: bool) -> Nat {
        let mut r = &self.0 << 1u32;
        if b {
            r.set_bit(0, true);
        }
        Nat(r)
    }

    /// Smallest `N` such that every bit at position `N` or above is clear.
    /// Zero for zero.
    pub fn bit_len(&self) -> u64 {
        self.0.bits()
    }

    /// Position of the lowest set bit, `None` for zero.
    pub fn trailing_zeros(&self) -> Option<u64> {
        self.0.trailing_zeros()
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    pub fn to_u128(&self) -> Option<u128> {
        self.0.to_u128()
    }

    /// Truncated subtraction: `x - y` if `y <= x`, otherwise `0`.
    pub fn monus(&self, other: &Nat) -> Nat {
        self.checked_sub(other).unwrap_or_default()
    }

    pub fn checked_sub(&self, other: &Nat) -> Option<Nat> {
        self.0.checked_sub(&other.0).map(Nat)
    }

    pub fn pow(&self, exp: u32) -> Nat {
        Nat(self.0.pow(exp))
    }

    /// Little-endian 64-bit limbs, without trailing zero limbs.
    pub fn words(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter_u64_digits()
    }

    /// Build a value from little-endian 64-bit limbs; trailing zero limbs are
    /// allowed.
    pub fn from_words(words: &[u64]) -> Nat {
        let mut digits: Vec<u32> = Vec::with_capacity(words.len() * 2);
        for w in words {
            digits.push(*w as u32);
            digits.push((*w >> 32) as u32);
        }
        Nat(BigUint::new(digits))
    }
}

impl From<u64> for Nat {
    fn from(v: u64) -> Self {
        Nat(BigUint::from(v))
    }
}

impl From<u32> for Nat {
    fn from(v: u32) -> Self {
        Nat(BigUint::from(v))
    }
}

impl From<u128> for Nat {
    fn from(v: u128) -> Self {
        Nat(BigUint::from(v))
    }
}

impl From<usize> for Nat {
    fn from(v: usize) -> Self {
        Nat(BigUint::from(v))
    }
}

impl From<bool> for Nat {
    fn from(b: bool) -> Self {
        if b { Nat::one() } else { Nat::zero() }
    }
}

impl From<BigUint> for Nat {
    fn from(b: BigUint) -> Self {
        Nat(b)
    }
}

impl From<Nat> for BigUint {
    fn from(n: Nat) -> Self {
        n.0
    }
}

impl TryFrom<&Nat> for u64 {
    type Error = NatError;

    fn try_from(n: &Nat) -> Result<u64, NatError> {
        n.to_u64().ok_or_else(|| NatError::Narrowing { value: n.to_string(), target: "u64" })
    }
}

impl TryFrom<&Nat> for u128 {
    type Error = NatError;

    fn try_from(n: &Nat) -> Result<u128, NatError> {
        n.to_u128().ok_or_else(|| NatError::Narrowing { value: n.to_string(), target: "u128" })
    }
}

impl FromStr for Nat {
    type Err = NatError;

    /// Accepts decimal, or `0x`/`0o`/`0b` prefixed text, with `_` separators.
    fn from_str(s: &str) -> Result<Self, NatError> {
        let trimmed = s.trim();
        let (radix, body) = match trimmed.get(..2) {
            Some("0x") | Some("0X") => (16, &trimmed[2..]),
            Some("0o") | Some("0O") => (8, &trimmed[2..]),
            Some("0b") | Some("0B") => (2, &trimmed[2..]),
            _ => (10, trimmed),
        };
        let digits: String = body.chars().filter(|c| *c != '_').collect();
        if digits.is_empty() {
            return Err(parse_err(s, "no digits"));
        }
        if digits.starts_with('+') || digits.starts_with('-') {
            return Err(parse_err(s, "sign not allowed"));
        }
        BigUint::parse_bytes(digits.as_bytes(), radix)
            .map(Nat)
            .ok_or_else(|| parse_err(s, format!("invalid digit for radix {}", radix)))
    }
}

impl fmt::Display for Nat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Nat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Binary for Nat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for Nat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

fn nat_div(a: &BigUint, b: &BigUint) -> BigUint {
    if b.is_zero() { BigUint::zero() } else { a / b }
}

fn nat_rem(a: &BigUint, b: &BigUint) -> BigUint {
    if b.is_zero() { a.clone() } else { a % b }
}

fn nat_sub(a: &BigUint, b: &BigUint) -> BigUint {
    a.checked_sub(b).unwrap_or_default()
}

// Implements a binary operator for every owned/borrowed combination of `Nat`.
macro_rules! nat_binop {
    ($trait:ident, $method:ident, |$a:ident, $b:ident| $body:expr) => {
        impl<'a, 'b> $trait<&'b Nat> for &'a Nat {
            type Output = Nat;
            fn $method(self, rhs: &'b Nat) -> Nat {
                let $a: &BigUint = &self.0;
                let $b: &BigUint = &rhs.0;
                Nat($body)
            }
        }
        impl<'b> $trait<&'b Nat> for Nat {
            type Output = Nat;
            fn $method(self, rhs: &'b Nat) -> Nat {
                (&self).$method(rhs)
            }
        }
        impl<'a> $trait<Nat> for &'a Nat {
            type Output = Nat;
            fn $method(self, rhs: Nat) -> Nat {
                self.$method(&rhs)
            }
        }
        impl $trait<Nat> for Nat {
            type Output = Nat;
            fn $method(self, rhs: Nat) -> Nat {
                (&self).$method(&rhs)
            }
        }
    };
}

nat_binop!(Add, add, |a, b| a + b);
nat_binop!(Mul, mul, |a, b| a * b);
nat_binop!(Div, div, |a, b| nat_div(a, b));
nat_binop!(Rem, rem, |a, b| nat_rem(a, b));
nat_binop!(Sub, sub, |a, b| nat_sub(a, b));
