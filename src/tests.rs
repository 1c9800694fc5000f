use crate::bitwise::{bitwise, bitwise_halving, TruthTable};
use crate::bounds::*;
use crate::config::LawConfig;
use crate::errors::NatError;
use crate::interpreter::*;
use crate::laws::{check_all, Counterexample, Law, LawOutcome, Sample};
use crate::messages::{CollectDiagnostics, Diagnostics, MessageLevel, TracingDiagnostics};
use crate::nat::Nat;
use crate::ops::*;
use crate::test_bit::*;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::sync::Arc;

macro_rules! nat {
    ($e:expr) => {
        Nat::from($e as u128)
    };
}

fn big(s: &str) -> Nat {
    s.parse().expect("test literal")
}

const NAND: TruthTable = TruthTable::new(true, true, true, false);
const NOR: TruthTable = TruthTable::new(true, false, false, false);
const ALWAYS: TruthTable = TruthTable::new(true, true, true, true);

#[test]
fn and_or_xor_concrete() {
    assert_eq!(and(&nat!(0b1100), &nat!(0b1010)), nat!(0b1000));
    assert_eq!(or(&nat!(0b1100), &nat!(0b1010)), nat!(0b1110));
    assert_eq!(xor(&nat!(0b1100), &nat!(0b1010)), nat!(0b0110));
    assert_eq!(and(&nat!(7), &(Nat::pow2(3) - Nat::one())), nat!(7));
}

#[test]
fn operators_match_functions() {
    let x = nat!(0b1100);
    let y = nat!(0b1010);
    assert_eq!(&x & &y, and(&x, &y));
    assert_eq!(x.clone() | &y, or(&x, &y));
    assert_eq!(x.clone() ^ y.clone(), xor(&x, &y));
    assert_eq!(&nat!(5) << 2, nat!(20));
    assert_eq!(nat!(20) >> 2, nat!(5));
}

#[test]
fn test_bit_thirteen() {
    let x = nat!(13);
    assert!(test_bit(&x, 0));
    assert!(!test_bit(&x, 1));
    assert!(test_bit(&x, 2));
    assert!(test_bit(&x, 3));
    assert!(!test_bit(&x, 4));
    assert!(!test_bit(&x, 1000));
    for i in 0..8 {
        assert_eq!(test_bit(&x, i), test_bit_halving(&x, i));
        assert_eq!(test_bit(&x, i), test_bit_div_mod(&x, i));
    }
    assert_eq!(x.bits().collect::<Vec<_>>(), vec![true, false, true, true]);
    assert_eq!(x.set_bits().collect::<Vec<_>>(), vec![0, 2, 3]);
    assert_eq!(x.highest_set_bit(), Some(3));
    assert_eq!(Nat::zero().highest_set_bit(), None);
}

#[test]
fn shifts_concrete() {
    assert_eq!(shift_left(&nat!(5), 2), nat!(20));
    assert_eq!(shift_right(&nat!(20), 2), nat!(5));
    assert_eq!(shift_right(&nat!(5), 3), Nat::zero());
    let x = big("0xdead_beef_0123_4567_89ab_cdef");
    assert_eq!(shift_right(&shift_left(&x, 300), 300), x);
    assert_eq!(shift_left(&x, 300), &x * Nat::pow2(300));
}

#[test]
fn identities() {
    let x = big("123456789012345678901234567890");
    assert!(and(&x, &Nat::zero()).is_zero());
    assert!(and(&Nat::zero(), &x).is_zero());
    assert_eq!(or(&x, &Nat::zero()), x);
    assert_eq!(or(&Nat::zero(), &x), x);
    assert!(xor(&x, &x).is_zero());
    assert_eq!(and(&x, &Nat::one()), x.low_bit());
}

#[test]
fn wide_operands() {
    let x = Nat::pow2(200) + nat!(5);
    let y = Nat::pow2(200) + nat!(3);
    assert_eq!(and(&x, &y), Nat::pow2(200) + nat!(1));
    assert_eq!(or(&x, &y), Nat::pow2(200) + nat!(7));
    assert_eq!(xor(&x, &y), nat!(6));
    assert_eq!(Nat::from_words(&[u64::MAX, 1]), Nat::mask(65));
}

#[test]
fn bitwise_base_cases() {
    // Once one operand is exhausted the boundary row decides what passes through.
    assert_eq!(NAND.combine(&nat!(1), &nat!(1)), nat!(0));
    assert_eq!(NAND.combine(&nat!(2), &nat!(1)), nat!(3));
    assert_eq!(NAND.combine(&nat!(0), &nat!(5)), nat!(5));
    assert_eq!(NAND.combine(&nat!(5), &nat!(0)), nat!(5));
    assert_eq!(NOR.combine(&nat!(4), &nat!(2)), nat!(1));
    assert_eq!(ALWAYS.combine(&nat!(0), &nat!(0)), nat!(0));
    assert_eq!(ALWAYS.combine(&nat!(4), &nat!(1)), nat!(5));
}

#[test]
fn bitwise_word_level_matches_halving() {
    for f in TruthTable::all() {
        for x in 0u32..40 {
            for y in 0u32..40 {
                let (x, y) = (nat!(x), nat!(y));
                assert_eq!(f.combine(&x, &y), bitwise_halving(f, &x, &y), "{:?} {} {}", f, x, y);
            }
        }
        let x = Nat::mask(130);
        let y = Nat::pow2(64) + nat!(9);
        assert_eq!(f.combine(&x, &y), bitwise_halving(f, &x, &y), "{:?}", f);
        assert_eq!(f.combine(&y, &x), bitwise_halving(f, &y, &x), "{:?}", f);
    }
}

#[test]
fn bitwise_closure_and_table_agree() {
    let x = nat!(0b1100);
    let y = nat!(0b1010);
    assert_eq!(bitwise(|a, b| a && b, &x, &y), and(&x, &y));
    assert_eq!(bitwise(|a, b| a || b, &x, &y), or(&x, &y));
    assert_eq!(bitwise(|a, b| a ^ b, &x, &y), xor(&x, &y));
    assert_eq!(TruthTable::of(|a, b| a && !b), TruthTable::new(false, false, true, false));
    assert!(TruthTable::XOR.preserves_zero());
    assert!(!NAND.preserves_zero());
    assert_eq!(format!("{:?}", TruthTable::AND), "TruthTable[0001]");
}

#[test]
fn parse_and_format() {
    assert_eq!(big("0b1101"), nat!(13));
    assert_eq!(big("0x_ff"), nat!(255));
    assert_eq!(big("0o17"), nat!(15));
    assert_eq!(big("1_000"), nat!(1000));
    assert_eq!(big("340282366920938463463374607431768211456"), Nat::pow2(128));
    for bad in ["", "0x", "-1", "+4", "0b102", "12a"] {
        assert!(matches!(bad.parse::<Nat>(), Err(NatError::Parse { .. })), "{:?}", bad);
    }
    assert_eq!(format!("{:b}", nat!(13)), "1101");
    assert_eq!(format!("{:x}", nat!(255)), "ff");
    assert_eq!(Nat::pow2(70).to_string(), "1180591620717411303424");
}

#[test]
fn total_arithmetic() {
    assert_eq!(nat!(7) / Nat::zero(), Nat::zero());
    assert_eq!(nat!(7) % Nat::zero(), nat!(7));
    assert_eq!(nat!(3) - nat!(5), Nat::zero());
    assert_eq!(nat!(3).monus(&nat!(5)), Nat::zero());
    assert_eq!(nat!(3).checked_sub(&nat!(5)), None);
    assert_eq!(nat!(5).checked_sub(&nat!(3)), Some(nat!(2)));
    assert_eq!(nat!(3).pow(4), nat!(81));
    assert!(u64::try_from(&Nat::pow2(64)).is_err());
    assert_eq!(u64::try_from(&Nat::mask(64)).ok(), Some(u64::MAX));
}

#[test]
fn bound_witnesses() {
    assert_eq!(ne_zero_implies_bit_true(&Nat::zero()), None);
    assert_eq!(ne_zero_implies_bit_true(&nat!(12)), Some(2));
    assert_eq!(ne_zero_implies_bit_true(&Nat::pow2(130)), Some(130));

    let d = ne_implies_bit_diff(&nat!(12), &nat!(10));
    assert_eq!(d, Some(BitDiff { position: 1, left: false, right: true }));
    assert_eq!(ne_implies_bit_diff(&Nat::pow2(100), &Nat::pow2(100)), None);
    assert_eq!(ne_implies_bit_diff(&Nat::zero(), &Nat::pow2(100)).map(|d| d.position), Some(100));
    assert!(eq_of_test_bit_eq(&nat!(99), &nat!(99)));
    assert!(!eq_of_test_bit_eq(&nat!(99), &nat!(98)));

    assert_eq!(ge_two_pow_implies_high_bit_true(&nat!(8), 3), Some(3));
    assert_eq!(ge_two_pow_implies_high_bit_true(&nat!(7), 3), None);
    assert!(lt_pow_two_of_test_bit(&nat!(7), 3));
    assert!(!lt_pow_two_of_test_bit(&nat!(8), 3));
    assert!(lt_pow_two_of_test_bit(&Nat::zero(), 0));
    assert!(bits_agree_below(&nat!(0b1011), &nat!(0b0011), 3));
    assert!(!bits_agree_below(&nat!(0b1011), &nat!(0b0011), 4));
}

#[test]
fn masks_and_concat() {
    let x = big("0x1234_5678_9abc_def0_1234");
    assert_eq!(mod_two_pow(&x, 16), nat!(0x1234));
    assert_eq!(mod_two_pow(&x, 1000), x);
    assert_eq!(and(&x, &Nat::mask(16)), &x % Nat::pow2(16));
    assert_eq!(concat_bits(&nat!(5), 4, &nat!(3)).ok(), Some(nat!(83)));
    assert!(matches!(
        concat_bits(&nat!(5), 2, &nat!(4)),
        Err(NatError::LowPartTooWide { width: 2, .. })
    ));
    assert_eq!(split_bits(&nat!(83), 4), (nat!(5), nat!(3)));
}

fn x() -> Exp {
    mk_var("x")
}

fn y() -> Exp {
    mk_var("y")
}

fn eval(e: &Exp) -> Exp {
    eval_expr(&HashMap::new(), e).expect("eval")
}

#[test]
fn interp_identity_rewrites() {
    assert_eq!(eval(&mk_bitwise(BitwiseOp::BitAnd, &x(), &mk_nat(0u32))), mk_nat(0u32));
    assert_eq!(eval(&mk_bitwise(BitwiseOp::BitAnd, &mk_nat(0u32), &x())), mk_nat(0u32));
    assert_eq!(eval(&mk_bitwise(BitwiseOp::BitOr, &mk_nat(0u32), &x())), x());
    assert_eq!(eval(&mk_bitwise(BitwiseOp::BitXor, &x(), &mk_nat(0u32))), x());
    assert_eq!(eval(&mk_bitwise(BitwiseOp::BitXor, &x(), &x())), mk_nat(0u32));
    assert_eq!(eval(&mk_bitwise(BitwiseOp::BitOr, &x(), &x())), x());
    assert_eq!(eval(&mk_bitwise(BitwiseOp::Shl, &x(), &mk_nat(0u32))), x());
    assert_eq!(eval(&mk_bitwise(BitwiseOp::Shr, &mk_nat(0u32), &x())), mk_nat(0u32));
    assert_eq!(
        eval(&mk_bitwise(BitwiseOp::BitAnd, &x(), &mk_nat(255u32))),
        mk_arith(ArithOp::Mod, &x(), &mk_nat(256u32))
    );
    assert_eq!(eval(&mk_arith(ArithOp::Sub, &x(), &x())), mk_nat(0u32));
    assert_eq!(eval(&mk_arith(ArithOp::Mod, &x(), &mk_nat(1u32))), mk_nat(0u32));
}

#[test]
fn interp_test_bit_rewrites() {
    let i = |k: u32| mk_nat(k);
    let shl = mk_bitwise(BitwiseOp::Shl, &x(), &i(3));
    assert_eq!(eval(&mk_test_bit(&shl, &i(1))), mk_bool(false));
    assert_eq!(eval(&mk_test_bit(&shl, &i(5))), mk_test_bit(&x(), &i(2)));
    let shr = mk_bitwise(BitwiseOp::Shr, &x(), &i(3));
    assert_eq!(eval(&mk_test_bit(&shr, &i(5))), mk_test_bit(&x(), &i(8)));
    let m = mk_arith(ArithOp::Mod, &x(), &i(16));
    assert_eq!(eval(&mk_test_bit(&m, &i(7))), mk_bool(false));
    assert_eq!(eval(&mk_test_bit(&m, &i(2))), mk_test_bit(&x(), &i(2)));
    let both = mk_bitwise(BitwiseOp::BitAnd, &x(), &y());
    assert_eq!(
        eval(&mk_test_bit(&both, &i(4))),
        mk_binary(BinaryOp::And, &mk_test_bit(&x(), &i(4)), &mk_test_bit(&y(), &i(4)))
    );
    let masked = mk_bitwise(BitwiseOp::BitAnd, &x(), &i(0b1010));
    assert_eq!(eval(&mk_test_bit(&masked, &i(1))), mk_test_bit(&x(), &i(1)));
    assert_eq!(eval(&mk_test_bit(&masked, &i(2))), mk_bool(false));
    let all_ones = mk_test_bit(&i(255), &mk_var("k"));
    assert_eq!(
        eval(&all_ones),
        mk_binary(BinaryOp::Inequality(InequalityOp::Lt), &mk_var("k"), &i(8))
    );
    assert_eq!(eval(&mk_test_bit(&i(0), &mk_var("k"))), mk_bool(false));
}

#[test]
fn interp_with_env() {
    let mut env: Env = HashMap::new();
    env.insert(Arc::new("x".to_string()), Constant::Nat(nat!(13)));
    let e = mk_test_bit(&x(), &mk_nat(2u32));
    assert_eq!(eval_to_constant(&env, &e).ok(), Some(Constant::Bool(true)));
    let e = mk_arith(ArithOp::Pow, &mk_nat(2u32), &mk_nat(10u32));
    assert_eq!(eval_to_constant(&env, &e).ok(), Some(Constant::Nat(nat!(1024))));
    let e = mk_if(
        &mk_binary(BinaryOp::Inequality(InequalityOp::Lt), &x(), &mk_nat(20u32)),
        &mk_bitwise(BitwiseOp::Shl, &x(), &mk_nat(1u32)),
        &mk_nat(0u32),
    );
    assert_eq!(eval_to_constant(&env, &e).ok(), Some(Constant::Nat(nat!(26))));
}

#[test]
fn interp_errors() {
    let env: Env = HashMap::new();
    let bad = mk_bitwise(BitwiseOp::BitAnd, &mk_bool(true), &mk_nat(1u32));
    assert!(matches!(eval_expr(&env, &bad), Err(NatError::TypeMismatch { expected: "nat", .. })));
    let huge = mk_bitwise(BitwiseOp::Shl, &mk_nat(1u32), &mk_nat(Nat::pow2(70)));
    assert!(matches!(eval_expr(&env, &huge), Err(NatError::AmountTooLarge { .. })));
    let zero = mk_bitwise(BitwiseOp::Shl, &mk_nat(0u32), &mk_nat(Nat::pow2(70)));
    assert_eq!(eval(&zero), mk_nat(0u32));
    let open = mk_arith(ArithOp::Add, &x(), &y());
    match eval_to_constant(&env, &open) {
        Err(NatError::UnboundVar(v)) => assert_eq!(v, "x"),
        r => panic!("unexpected {:?}", r),
    }
    let vars: Vec<String> = free_vars(&open).iter().map(|v| (**v).clone()).collect();
    assert_eq!(vars, vec!["x".to_string(), "y".to_string()]);
}

fn expect_bool<T>(r: Result<T, NatError>) -> bool {
    matches!(r, Err(NatError::TypeMismatch { expected: "bool", .. }))
}

#[test]
fn interp_rewrites_check_operand_types() {
    let mut env: Env = HashMap::new();
    env.insert(Arc::new("x".to_string()), Constant::Nat(nat!(5)));
    let and_x = mk_binary(BinaryOp::And, &mk_bool(true), &x());
    assert!(expect_bool(eval_to_constant(&env, &and_x)));
    assert!(expect_bool(eval_expr(&HashMap::new(), &and_x)));
    let or_x = mk_binary(BinaryOp::Or, &mk_bool(true), &x());
    assert!(expect_bool(eval_expr(&HashMap::new(), &or_x)));

    let b = mk_bool_var("b");
    let and_b = mk_binary(BinaryOp::And, &mk_bool(true), &b);
    assert_eq!(eval(&and_b), b);
    let mut bad_env: Env = HashMap::new();
    bad_env.insert(Arc::new("b".to_string()), Constant::Nat(nat!(5)));
    assert!(expect_bool(eval_to_constant(&bad_env, &and_b)));

    let same = mk_bitwise(BitwiseOp::BitAnd, &b, &b);
    assert!(matches!(eval_expr(&env, &same), Err(NatError::TypeMismatch { expected: "nat", .. })));
    let eq = mk_binary(BinaryOp::Eq, &x(), &b);
    assert!(matches!(eval_expr(&env, &eq), Err(NatError::TypeMismatch { expected: "nat", .. })));
    let branches = mk_if(&b, &x(), &mk_bool(true));
    assert!(matches!(eval_expr(&env, &branches), Err(NatError::TypeMismatch { .. })));
    assert_eq!(eval(&mk_if(&b, &x(), &x())), x());
}

#[test]
fn interp_caps_materialized_results() {
    let env: Env = HashMap::new();
    let too_large = |e: &Exp| matches!(eval_expr(&env, e), Err(NatError::AmountTooLarge { .. }));
    assert!(too_large(&mk_bitwise(BitwiseOp::Shl, &mk_nat(1u32), &mk_nat(Nat::pow2(40)))));
    assert!(too_large(&mk_arith(ArithOp::Pow, &mk_nat(2u32), &mk_nat(4_000_000_000u64))));
    assert!(too_large(&mk_arith(ArithOp::Pow, &mk_nat(3u32), &mk_nat(Nat::pow2(26)))));
    let shl = mk_bitwise(BitwiseOp::Shl, &mk_nat(1u32), &mk_nat(1000u32));
    assert_eq!(eval(&shl), mk_nat(Nat::pow2(1000)));
    let pow = mk_arith(ArithOp::Pow, &mk_nat(3u32), &mk_nat(100u32));
    assert_eq!(eval(&pow), mk_nat(nat!(3).pow(100)));
    let one = mk_arith(ArithOp::Pow, &mk_nat(1u32), &mk_nat(Nat::pow2(80)));
    assert_eq!(eval(&one), mk_nat(1u32));
    // No bit lives that high
    let shr = mk_bitwise(BitwiseOp::Shr, &mk_nat(Nat::pow2(90)), &mk_nat(Nat::pow2(70)));
    assert_eq!(eval(&shr), mk_nat(0u32));
}

#[test]
fn interp_display() {
    let e = mk_test_bit(&mk_bitwise(BitwiseOp::BitAnd, &x(), &mk_nat(3u32)), &mk_nat(1u32));
    assert_eq!(e.to_string(), "testBit((x & 3), 1)");
}

#[test]
fn laws_hold_on_fixed_samples() {
    let operands = [
        (Nat::zero(), Nat::zero()),
        (nat!(13), nat!(10)),
        (Nat::pow2(100) + nat!(7), Nat::mask(64)),
        (Nat::mask(130), Nat::pow2(129)),
    ];
    let indices = [(0, 0, 0), (3, 5, 4), (70, 2, 65), (1, 129, 130)];
    for law in Law::ALL {
        for (x, y) in operands.iter() {
            for (k, (i, j, n)) in indices.iter().enumerate() {
                for f in [TruthTable::AND, NAND, TruthTable::from_index(k as u8 * 5)] {
                    let s = Sample::new(x.clone(), y.clone()).with_f(f).with_indices(*i, *j, *n);
                    assert_eq!(law.check(&s), Ok(()), "{} on {:?}", law, s);
                }
            }
        }
    }
}

#[test]
fn law_names_round_trip() {
    for law in Law::ALL {
        assert_eq!(Law::from_name(law.name()), Some(*law));
    }
    assert_eq!(Law::from_name("testBit_bitwise"), Some(Law::TestBitBitwise));
    assert_eq!(Law::from_name("no_such_law"), None);
}

#[test]
fn check_all_small() {
    let config = LawConfig { cases: 24, max_operand_bits: 130, max_index: 140, seed: Some(11) };
    let diags = CollectDiagnostics::default();
    let report = check_all(&config, &diags);
    assert!(report.is_ok(), "{}", report);
    assert_eq!(report.outcomes.len(), Law::ALL.len());
    let msgs = diags.take();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].1, MessageLevel::Note);
}

#[test]
fn counterexample_message() {
    let outcome = LawOutcome {
        law: Law::XorSelf,
        cases: 1,
        result: Err(Some(Counterexample {
            sample: Sample::new(nat!(12), nat!(10)).with_indices(3, 0, 0),
            reason: "made up".to_string(),
        })),
    };
    let msg = outcome.to_message().expect("failing outcome has a message");
    assert_eq!(msg.level, MessageLevel::Error);
    assert_eq!(msg.law.as_deref(), Some("xor_self"));
    let rendered = msg.to_string();
    assert!(rendered.contains("law violated: made up"));
    assert!(rendered.contains("x: 12"));
    assert!(rendered.contains("i: 3"));
}

#[test]
fn aborted_law_is_a_warning() {
    let outcome = LawOutcome { law: Law::TestBitZero, cases: 4, result: Err(None) };
    assert!(!outcome.is_ok());
    let msg = outcome.to_message().expect("aborted outcome has a message");
    assert_eq!(msg.level, MessageLevel::Warning);
    assert_eq!(msg.law.as_deref(), Some("testBit_zero"));
    assert!(msg.to_string().contains("law check aborted"));
    let diags = CollectDiagnostics::default();
    diags.report(&msg);
    TracingDiagnostics.report(&msg);
    let msgs = diags.take();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].1, MessageLevel::Warning);
    assert!(diags.take().is_empty());
}

#[test]
fn truth_table_serde() {
    let json = serde_json::to_string(&TruthTable::XOR).expect("serialize");
    assert_eq!(json, "6");
    let back: TruthTable = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, TruthTable::XOR);
    for f in TruthTable::all() {
        let back: TruthTable = serde_json::from_str(&f.index().to_string()).expect("in range");
        assert_eq!(back, f);
    }
    assert!(serde_json::from_str::<TruthTable>("16").is_err());
    assert!(serde_json::from_str::<TruthTable>("255").is_err());
    assert!(matches!(TruthTable::try_from(255u8), Err(NatError::TruthTable(255))));
}

#[test]
fn config_from_toml() {
    let c = LawConfig::from_toml_str("cases = 8\nseed = 3\n").expect("valid config");
    assert_eq!(c, LawConfig { cases: 8, seed: Some(3), ..LawConfig::default() });
    assert!(matches!(LawConfig::from_toml_str("casess = 1"), Err(NatError::Config(_))));
    assert_eq!(LawConfig::from_toml_str("").ok(), Some(LawConfig::default()));
}
