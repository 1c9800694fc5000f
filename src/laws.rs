//! The bit laws as executable propositions.
//!
//! Every law is checked on one `Sample` at a time. Laws with hypotheses
//! (`x < 2^n`, `j < i`, `f false false = false`, ...) establish them from the
//! sample by construction, e.g. by reducing `x` modulo `2^n`, so no sample is
//! vacuous. `check_law` drives a law through proptest's runner, which shrinks
//! any counterexample before it is reported.

use crate::bitwise::{bitwise, bitwise_halving, TruthTable};
use crate::bounds::{
    bits_agree_below, eq_of_test_bit_eq, ge_two_pow_implies_high_bit_true, lt_pow_two_of_test_bit,
    ne_implies_bit_diff, ne_zero_implies_bit_true,
};
use crate::config::LawConfig;
use crate::messages::{error, note_bare, warning, Diagnostics, Message};
use crate::nat::Nat;
use crate::ops::{and, concat_bits, mod_two_pow, or, shift_left, shift_right, xor};
use crate::test_bit::{test_bit, test_bit_div_mod, test_bit_halving};
use indexmap::IndexMap;
use proptest::prelude::*;
use proptest::test_runner::{Config, RngAlgorithm, TestError, TestRng, TestRunner};
use std::fmt;
use tracing::debug;
use yansi::Paint;

/// One point of the law's domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    pub f: TruthTable,
    pub x: Nat,
    pub y: Nat,
    pub i: u64,
    pub j: u64,
    pub n: u64,
}

impl Sample {
    pub fn new(x: Nat, y: Nat) -> Self {
        Sample { f: TruthTable::AND, x, y, i: 0, j: 0, n: 0 }
    }

    pub fn with_f(mut self, f: TruthTable) -> Self {
        self.f = f;
        self
    }

    pub fn with_indices(mut self, i: u64, j: u64, n: u64) -> Self {
        self.i = i;
        self.j = j;
        self.n = n;
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Law {
    TestBitBitwise,
    BitwiseWordEqHalving,
    BitwiseLtTwoPow,
    TestBitToDivMod,
    TestBitZero,
    TestBitImpliesGe,
    TestBitLtTwo,
    TestBitTwoPowAddEq,
    TestBitTwoPowAddGt,
    TestBitModTwoPow,
    TestBitTwoPowSubOne,
    TestBitShiftLeft,
    TestBitShiftRight,
    ShiftLeftEqMul,
    ShiftRightEqDiv,
    ShiftLeftShiftRight,
    FiniteSupport,
    EqOfTestBitEq,
    NeImpliesBitDiff,
    NeZeroImpliesBitTrue,
    GeTwoPowImpliesHighBitTrue,
    LtPowTwoOfTestBit,
    AndIsBitwise,
    OrIsBitwise,
    XorIsBitwise,
    ZeroAnd,
    AndZero,
    AndOneIsMod,
    AndLtTwoPow,
    AndTwoPowSubOneEqMod,
    AndTwoPowSubOneOfLtTwoPow,
    ZeroOr,
    OrZero,
    OrLtTwoPow,
    XorLtTwoPow,
    XorSelf,
    MulAddLtIsOr,
}

// Returns from the enclosing check with a formatted reason when `$cond` fails.
macro_rules! law_assert {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err(format!($($arg)+));
        }
    };
}

impl Law {
    pub const ALL: &'static [Law] = &[
        Law::TestBitBitwise,
        Law::BitwiseWordEqHalving,
        Law::BitwiseLtTwoPow,
        Law::TestBitToDivMod,
        Law::TestBitZero,
        Law::TestBitImpliesGe,
        Law::TestBitLtTwo,
        Law::TestBitTwoPowAddEq,
        Law::TestBitTwoPowAddGt,
        Law::TestBitModTwoPow,
        Law::TestBitTwoPowSubOne,
        Law::TestBitShiftLeft,
        Law::TestBitShiftRight,
        Law::ShiftLeftEqMul,
        Law::ShiftRightEqDiv,
        Law::ShiftLeftShiftRight,
        Law::FiniteSupport,
        Law::EqOfTestBitEq,
        Law::NeImpliesBitDiff,
        Law::NeZeroImpliesBitTrue,
        Law::GeTwoPowImpliesHighBitTrue,
        Law::LtPowTwoOfTestBit,
        Law::AndIsBitwise,
        Law::OrIsBitwise,
        Law::XorIsBitwise,
        Law::ZeroAnd,
        Law::AndZero,
        Law::AndOneIsMod,
        Law::AndLtTwoPow,
        Law::AndTwoPowSubOneEqMod,
        Law::AndTwoPowSubOneOfLtTwoPow,
        Law::ZeroOr,
        Law::OrZero,
        Law::OrLtTwoPow,
        Law::XorLtTwoPow,
        Law::XorSelf,
        Law::MulAddLtIsOr,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Law::TestBitBitwise => "testBit_bitwise",
            Law::BitwiseWordEqHalving => "bitwise_word_eq_halving",
            Law::BitwiseLtTwoPow => "bitwise_lt_two_pow",
            Law::TestBitToDivMod => "testBit_to_div_mod",
            Law::TestBitZero => "testBit_zero",
            Law::TestBitImpliesGe => "testBit_implies_ge",
            Law::TestBitLtTwo => "testBit_lt_two",
            Law::TestBitTwoPowAddEq => "testBit_two_pow_add_eq",
            Law::TestBitTwoPowAddGt => "testBit_two_pow_add_gt",
            Law::TestBitModTwoPow => "testBit_mod_two_pow",
            Law::TestBitTwoPowSubOne => "testBit_two_pow_sub_one",
            Law::TestBitShiftLeft => "testBit_shiftLeft",
            Law::TestBitShiftRight => "testBit_shiftRight",
            Law::ShiftLeftEqMul => "shiftLeft_eq_mul",
            Law::ShiftRightEqDiv => "shiftRight_eq_div",
            Law::ShiftLeftShiftRight => "shiftLeft_shiftRight",
            Law::FiniteSupport => "testBit_ge_bit_len",
            Law::EqOfTestBitEq => "eq_of_testBit_eq",
            Law::NeImpliesBitDiff => "ne_implies_bit_diff",
            Law::NeZeroImpliesBitTrue => "ne_zero_implies_bit_true",
            Law::GeTwoPowImpliesHighBitTrue => "ge_two_pow_implies_high_bit_true",
            Law::LtPowTwoOfTestBit => "lt_pow_two_of_testBit",
            Law::AndIsBitwise => "and_is_bitwise",
            Law::OrIsBitwise => "or_is_bitwise",
            Law::XorIsBitwise => "xor_is_bitwise",
            Law::ZeroAnd => "zero_and",
            Law::AndZero => "and_zero",
            Law::AndOneIsMod => "and_one_is_mod",
            Law::AndLtTwoPow => "and_lt_two_pow",
            Law::AndTwoPowSubOneEqMod => "and_two_pow_sub_one_eq_mod",
            Law::AndTwoPowSubOneOfLtTwoPow => "and_two_pow_sub_one_of_lt_two_pow",
            Law::ZeroOr => "zero_or",
            Law::OrZero => "or_zero",
            Law::OrLtTwoPow => "or_lt_two_pow",
            Law::XorLtTwoPow => "xor_lt_two_pow",
            Law::XorSelf => "xor_self",
            Law::MulAddLtIsOr => "mul_add_lt_is_or",
        }
    }

    pub fn from_name(name: &str) -> Option<Law> {
        Law::ALL.iter().copied().find(|l| l.name() == name)
    }

    /// Check this law on one sample; `Err` carries the reason it failed.
    pub fn check(self, s: &Sample) -> Result<(), String> {
        let Sample { f, x, y, i, j, n } = s;
        let (f, i, j, n) = (*f, *i, *j, *n);
        match self {
            Law::TestBitBitwise => {
                // Force the precondition f false false = false
                let f = TruthTable::new(
                    false,
                    f.apply(false, true),
                    f.apply(true, false),
                    f.apply(true, true),
                );
                let r = f.combine(x, y);
                let top = x.bit_len().max(y.bit_len()).max(r.bit_len()) + 2;
                for k in (0..top).chain(std::iter::once(i)) {
                    let expected = f.apply(test_bit(x, k), test_bit(y, k));
                    law_assert!(
                        test_bit(&r, k) == expected,
                        "bit {} of {:?}({}, {}) = {} is not {}",
                        k,
                        f,
                        x,
                        y,
                        r,
                        expected
                    );
                }
            }
            Law::BitwiseWordEqHalving => {
                let fast = f.combine(x, y);
                let slow = bitwise_halving(f, x, y);
                law_assert!(fast == slow, "{:?}: word-level {} but halving {}", f, fast, slow);
            }
            Law::BitwiseLtTwoPow => {
                let (x, y) = (mod_two_pow(x, n), mod_two_pow(y, n));
                let r = f.combine(&x, &y);
                law_assert!(r < Nat::pow2(n), "{:?}({}, {}) = {} is not below 2^{}", f, x, y, r, n);
            }
            Law::TestBitToDivMod => {
                let direct = test_bit(x, i);
                law_assert!(direct == test_bit_div_mod(x, i), "x / 2^i % 2 disagrees at bit {}", i);
                law_assert!(direct == test_bit_halving(x, i), "halving disagrees at bit {}", i);
            }
            Law::TestBitZero => {
                law_assert!(!test_bit(&Nat::zero(), i), "bit {} of 0 is set", i);
            }
            Law::TestBitImpliesGe => {
                let with_bit = or(x, &Nat::pow2(i));
                for v in [x, &with_bit] {
                    if test_bit(v, i) {
                        law_assert!(
                            *v >= Nat::pow2(i),
                            "bit {} of {} is set but {} < 2^{}",
                            i,
                            v,
                            v,
                            i
                        );
                    }
                }
            }
            Law::TestBitLtTwo => {
                let x = mod_two_pow(x, i);
                law_assert!(!test_bit(&x, i), "{} < 2^{} but bit {} is set", x, i, i);
            }
            Law::TestBitTwoPowAddEq => {
                let v = Nat::pow2(i) + x;
                law_assert!(
                    test_bit(&v, i) != test_bit(x, i),
                    "adding 2^{} did not flip bit {}",
                    i,
                    i
                );
            }
            Law::TestBitTwoPowAddGt => {
                if i > 0 {
                    let j = j % i;
                    let v = Nat::pow2(i) + x;
                    law_assert!(
                        test_bit(&v, j) == test_bit(x, j),
                        "adding 2^{} changed bit {} of {}",
                        i,
                        j,
                        x
                    );
                }
            }
            Law::TestBitModTwoPow => {
                let v = mod_two_pow(x, j);
                let expected = i < j && test_bit(x, i);
                law_assert!(
                    test_bit(&v, i) == expected,
                    "bit {} of {} % 2^{} is not {}",
                    i,
                    x,
                    j,
                    expected
                );
                law_assert!(
                    v == x % Nat::pow2(j),
                    "masking {} to {} bits is not x % 2^{}",
                    x,
                    j,
                    j
                );
            }
            Law::TestBitTwoPowSubOne => {
                let m = Nat::pow2(n) - Nat::one();
                law_assert!(m == Nat::mask(n), "2^{} - 1 is not the mask", n);
                law_assert!(test_bit(&m, i) == (i < n), "bit {} of 2^{} - 1 is wrong", i, n);
            }
            Law::TestBitShiftLeft => {
                let v = shift_left(x, i);
                let expected = j >= i && test_bit(x, j - i.min(j));
                law_assert!(
                    test_bit(&v, j) == expected,
                    "bit {} of {} <<< {} is not {}",
                    j,
                    x,
                    i,
                    expected
                );
            }
            Law::TestBitShiftRight => {
                let v = shift_right(x, i);
                law_assert!(
                    test_bit(&v, j) == test_bit(x, i + j),
                    "bit {} of {} >>> {} is not bit {} of x",
                    j,
                    x,
                    i,
                    i + j
                );
            }
            Law::ShiftLeftEqMul => {
                law_assert!(
                    shift_left(x, i) == x * Nat::pow2(i),
                    "{} <<< {} is not x * 2^{}",
                    x,
                    i,
                    i
                );
            }
            Law::ShiftRightEqDiv => {
                law_assert!(
                    shift_right(x, i) == x / Nat::pow2(i),
                    "{} >>> {} is not x / 2^{}",
                    x,
                    i,
                    i
                );
            }
            Law::ShiftLeftShiftRight => {
                law_assert!(
                    shift_right(&shift_left(x, i), i) == *x,
                    "({} <<< {}) >>> {} lost bits",
                    x,
                    i,
                    i
                );
            }
            Law::FiniteSupport => {
                let len = x.bit_len();
                law_assert!(
                    !test_bit(x, len + i),
                    "bit {} of {} set above its length {}",
                    len + i,
                    x,
                    len
                );
                if let Some(top) = len.checked_sub(1) {
                    law_assert!(test_bit(x, top), "top bit {} of {} is clear", top, x);
                }
            }
            Law::EqOfTestBitEq => {
                law_assert!(eq_of_test_bit_eq(x, &x.clone()), "{} differs from itself", x);
                law_assert!(
                    eq_of_test_bit_eq(x, y) == (x == y),
                    "bits of {} and {} misjudge equality",
                    x,
                    y
                );
                // Differs from x only at a bit above its length
                let z = x + shift_left(&Nat::one(), x.bit_len().max(n));
                law_assert!(!eq_of_test_bit_eq(x, &z), "{} and {} reported equal", x, z);
            }
            Law::NeImpliesBitDiff => {
                // Flip bit i to get a guaranteed-different neighbour
                let neighbour = xor(x, &Nat::pow2(i));
                for other in [y, &neighbour] {
                    match ne_implies_bit_diff(x, other) {
                        None => law_assert!(x == other, "{} != {} but no differing bit", x, other),
                        Some(d) => {
                            law_assert!(
                                x != other,
                                "{} == {} but bit {} differs",
                                x,
                                other,
                                d.position
                            );
                            law_assert!(
                                d.left == test_bit(x, d.position)
                                    && d.right == test_bit(other, d.position),
                                "witness bits misreported"
                            );
                            law_assert!(d.left != d.right, "bit {} does not differ", d.position);
                            law_assert!(
                                bits_agree_below(x, other, d.position),
                                "bits below {} are not all equal",
                                d.position
                            );
                        }
                    }
                }
                let d = ne_implies_bit_diff(x, &neighbour).map(|d| d.position);
                law_assert!(d == Some(i), "flipping bit {} reported difference at {:?}", i, d);
            }
            Law::NeZeroImpliesBitTrue => match ne_zero_implies_bit_true(x) {
                None => law_assert!(x.is_zero(), "{} is nonzero but no bit is set", x),
                Some(p) => {
                    law_assert!(test_bit(x, p), "bit {} of {} is not set", p, x);
                    law_assert!(mod_two_pow(x, p).is_zero(), "{} has a set bit below {}", x, p);
                }
            },
            Law::GeTwoPowImpliesHighBitTrue => match ge_two_pow_implies_high_bit_true(x, n) {
                None => law_assert!(*x < Nat::pow2(n), "{} >= 2^{} but no high bit", x, n),
                Some(p) => {
                    law_assert!(*x >= Nat::pow2(n), "{} < 2^{} yet bit {} reported", x, n, p);
                    law_assert!(
                        p >= n && test_bit(x, p),
                        "bit {} of {} is not a set high bit",
                        p,
                        x
                    );
                }
            },
            Law::LtPowTwoOfTestBit => {
                let high_clear = (n..x.bit_len().max(n) + 2).all(|k| !test_bit(x, k));
                let lt = *x < Nat::pow2(n);
                law_assert!(high_clear == lt, "bits of {} at or above {} misjudge x < 2^n", x, n);
                law_assert!(
                    lt_pow_two_of_test_bit(x, n) == lt,
                    "lt_pow_two_of_testBit({}, {}) is wrong",
                    x,
                    n
                );
            }
            Law::AndIsBitwise => {
                let r = and(x, y);
                law_assert!(
                    r == bitwise(|a, b| a && b, x, y),
                    "and({}, {}) is not bitwise (&&)",
                    x,
                    y
                );
                law_assert!(
                    r.as_biguint() == &(x.as_biguint() & y.as_biguint()),
                    "and({}, {}) is wrong",
                    x,
                    y
                );
            }
            Law::OrIsBitwise => {
                let r = or(x, y);
                law_assert!(
                    r == bitwise(|a, b| a || b, x, y),
                    "or({}, {}) is not bitwise (||)",
                    x,
                    y
                );
                law_assert!(
                    r.as_biguint() == &(x.as_biguint() | y.as_biguint()),
                    "or({}, {}) is wrong",
                    x,
                    y
                );
            }
            Law::XorIsBitwise => {
                let r = xor(x, y);
                law_assert!(
                    r == bitwise(|a, b| a != b, x, y),
                    "xor({}, {}) is not bitwise (!=)",
                    x,
                    y
                );
                law_assert!(
                    r.as_biguint() == &(x.as_biguint() ^ y.as_biguint()),
                    "xor({}, {}) is wrong",
                    x,
                    y
                );
            }
            Law::ZeroAnd => law_assert!(and(&Nat::zero(), x).is_zero(), "0 & {} is not 0", x),
            Law::AndZero => law_assert!(and(x, &Nat::zero()).is_zero(), "{} & 0 is not 0", x),
            Law::AndOneIsMod => {
                law_assert!(and(x, &Nat::one()) == x % Nat::from(2u32), "{} & 1 is not x % 2", x);
            }
            Law::AndLtTwoPow => {
                let y = mod_two_pow(y, n);
                law_assert!(and(x, &y) < Nat::pow2(n), "{} & {} is not below 2^{}", x, y, n);
            }
            Law::AndTwoPowSubOneEqMod => {
                law_assert!(
                    and(x, &Nat::mask(n)) == x % Nat::pow2(n),
                    "{} & (2^{} - 1) is not x % 2^n",
                    x,
                    n
                );
            }
            Law::AndTwoPowSubOneOfLtTwoPow => {
                let x = mod_two_pow(x, n);
                law_assert!(and(&x, &Nat::mask(n)) == x, "{} < 2^{} but masking changed it", x, n);
            }
            Law::ZeroOr => law_assert!(or(&Nat::zero(), x) == *x, "0 | {} is not x", x),
            Law::OrZero => law_assert!(or(x, &Nat::zero()) == *x, "{} | 0 is not x", x),
            Law::OrLtTwoPow => {
                let (x, y) = (mod_two_pow(x, n), mod_two_pow(y, n));
                law_assert!(or(&x, &y) < Nat::pow2(n), "{} | {} is not below 2^{}", x, y, n);
            }
            Law::XorLtTwoPow => {
                let (x, y) = (mod_two_pow(x, n), mod_two_pow(y, n));
                law_assert!(xor(&x, &y) < Nat::pow2(n), "{} ^ {} is not below 2^{}", x, y, n);
            }
            Law::XorSelf => law_assert!(xor(x, x).is_zero(), "{} ^ {} is not 0", x, x),
            Law::MulAddLtIsOr => {
                let b = mod_two_pow(y, i);
                let hi = Nat::pow2(i) * x;
                let sum = &hi + &b;
                law_assert!(sum == or(&hi, &b), "2^{} * {} + {} is not the or", i, x, b);
                match concat_bits(x, i, &b) {
                    Ok(c) => law_assert!(c == sum, "concat_bits({}, {}, {}) = {}", x, i, b, c),
                    Err(e) => return Err(format!("concat_bits rejected a narrow low part: {}", e)),
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Law {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Naturals below `2^max_bits`, biased towards 0, small values, powers of two
/// and masks.
pub fn arb_nat(max_bits: u64) -> BoxedStrategy<Nat> {
    let max_bits = max_bits.max(1);
    prop_oneof![
        2 => (0u64..16).prop_map(Nat::from),
        1 => (0..max_bits).prop_map(Nat::pow2),
        1 => (0..=max_bits).prop_map(Nat::mask),
        4 => (1..=max_bits).prop_flat_map(|bits| {
            let words = ((bits + 63) / 64) as usize;
            prop::collection::vec(any::<u64>(), words)
                .prop_map(move |ws| mod_two_pow(&Nat::from_words(&ws), bits))
        }),
    ]
    .boxed()
}

pub fn arb_truth_table() -> BoxedStrategy<TruthTable> {
    (0u8..16).prop_map(TruthTable::from_index).boxed()
}

pub fn arb_sample(config: &LawConfig) -> BoxedStrategy<Sample> {
    let bits = config.max_operand_bits;
    let index = 0..config.max_index.max(1);
    (arb_truth_table(), arb_nat(bits), arb_nat(bits), index.clone(), index.clone(), index)
        .prop_map(|(f, x, y, i, j, n)| Sample { f, x, y, i, j, n })
        .boxed()
}

#[derive(Clone, Debug)]
pub struct Counterexample {
    pub sample: Sample,
    pub reason: String,
}

#[derive(Clone, Debug)]
pub struct LawOutcome {
    pub law: Law,
    pub cases: u32,
    /// `Err` holds a shrunk counterexample, or `None` if the runner aborted
    /// without one. An aborted law counts as an error in the report.
    pub result: Result<(), Option<Counterexample>>,
}

impl LawOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn to_message(&self) -> Option<Message> {
        match &self.result {
            Ok(()) => None,
            // The runner gave up before finding a counterexample
            Err(None) => Some(warning("law check aborted", self.law.name())),
            Err(Some(cex)) => {
                let s = &cex.sample;
                let msg = error(format!("law violated: {}", cex.reason), self.law.name())
                    .label("f", format!("{:?}", s.f))
                    .label("x", &s.x)
                    .label("y", &s.y)
                    .label("i", s.i)
                    .label("j", s.j)
                    .label("n", s.n);
                Some(msg)
            }
        }
    }
}

fn runner(config: &LawConfig) -> TestRunner {
    let proptest_config =
        Config { cases: config.cases, failure_persistence: None, ..Config::default() };
    match config.seed {
        None => TestRunner::new(proptest_config),
        Some(seed) => {
            let mut bytes = [0u8; 32];
            for chunk in bytes.chunks_mut(8) {
                chunk.copy_from_slice(&seed.to_le_bytes());
            }
            let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &bytes);
            TestRunner::new_with_rng(proptest_config, rng)
        }
    }
}

/// Check one law on `config.cases` generated samples.
pub fn check_law(law: Law, config: &LawConfig) -> LawOutcome {
    debug!(law = law.name(), cases = config.cases, "checking law");
    let mut runner = runner(config);
    let strategy = arb_sample(config);
    let result = runner.run(&strategy, |s| law.check(&s).map_err(TestCaseError::fail));
    let result = match result {
        Ok(()) => Ok(()),
        Err(TestError::Fail(reason, sample)) => {
            Err(Some(Counterexample { sample, reason: reason.message().to_string() }))
        }
        Err(TestError::Abort(_)) => Err(None),
    };
    LawOutcome { law, cases: config.cases, result }
}

#[derive(Clone, Debug, Default)]
pub struct LawReport {
    pub outcomes: IndexMap<&'static str, LawOutcome>,
}

impl LawReport {
    pub fn verified(&self) -> usize {
        self.outcomes.values().filter(|o| o.is_ok()).count()
    }

    pub fn errors(&self) -> usize {
        self.outcomes.len() - self.verified()
    }

    pub fn is_ok(&self) -> bool {
        self.errors() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &LawOutcome> {
        self.outcomes.values().filter(|o| !o.is_ok())
    }
}

/// Check every law, reporting violations to `diagnostics`.
pub fn check_all(config: &LawConfig, diagnostics: &dyn Diagnostics) -> LawReport {
    check_laws(Law::ALL, config, diagnostics)
}

pub fn check_laws(laws: &[Law], config: &LawConfig, diagnostics: &dyn Diagnostics) -> LawReport {
    let mut report = LawReport::default();
    for law in laws {
        let outcome = check_law(*law, config);
        if let Some(msg) = outcome.to_message() {
            diagnostics.report(&msg);
        }
        report.outcomes.insert(law.name(), outcome);
    }
    diagnostics.report(&note_bare(format!(
        "law check results:: verified: {} errors: {}",
        report.verified(),
        report.errors()
    )));
    report
}

impl fmt::Display for LawReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in self.failures() {
            if let Some(msg) = outcome.to_message() {
                writeln!(f, "{}", msg)?;
            }
        }
        let errors = if self.errors() == 0 {
            Paint::green(self.errors()).to_string()
        } else {
            Paint::red(self.errors()).bold().to_string()
        };
        write!(f, "law check results:: verified: {} errors: {}", self.verified(), errors)
    }
}
