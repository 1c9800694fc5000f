//! Bitwise operations on arbitrary-precision natural numbers.
//!
//! Everything is built on one combinator, `bitwise::bitwise`, which combines
//! two naturals bit by bit with a boolean function. `and`, `or` and `xor`
//! are instances of it; `test_bit`, the shifts and the bound/extensionality
//! witnesses in `bounds` complete the theory, and `laws` states the whole of
//! it as executable, randomly checked propositions.

pub mod bitwise;
pub mod bounds;
pub mod config;
pub mod errors;
pub mod interpreter;
pub mod laws;
pub mod messages;
pub mod nat;
pub mod ops;
pub mod test_bit;

#[cfg(test)]
mod tests;

pub use bitwise::{bitwise, TruthTable};
pub use errors::{NatError, NatResult};
pub use nat::Nat;
pub use ops::{and, or, shift_left, shift_right, xor};
pub use test_bit::test_bit;
