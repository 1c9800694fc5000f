//! A symbolic interpreter for bitwise expressions over `Nat`
//!
//! Concrete subterms are folded with the arbitrary-precision operations of
//! this crate. When only some operands are concrete, the bit laws are used
//! as rewrites (`x & 0 = 0`, `0 | x = x`, `testBit (x <<< i) j`, ...), so a
//! partially known expression is left in a simpler but equivalent form.

use crate::errors::{NatError, NatResult};
use crate::nat::Nat;
use crate::ops::{and, or, shift_left, shift_right, xor};
use crate::test_bit::test_bit;
use indexmap::IndexSet;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

pub type Ident = Arc<String>;

/// Bits of a folded shift or power result above which the interpreter
/// reports `AmountTooLarge` instead of allocating.
pub const MAX_RESULT_BITS: u64 = 1 << 26;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Typ {
    Nat,
    Bool,
}

impl Typ {
    fn name(self) -> &'static str {
        match self {
            Typ::Nat => "nat",
            Typ::Bool => "bool",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Constant {
    Nat(Nat),
    Bool(bool),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InequalityOp {
    Le,
    Ge,
    Lt,
    Gt,
}

/// Arithmetic on naturals; `Sub` truncates at 0, `Div`/`Mod` by 0 give `0`/`x`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BitwiseOp {
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    And,
    Or,
    Xor,
    Implies,
    Eq,
    Ne,
    Inequality(InequalityOp),
    Arith(ArithOp),
    Bitwise(BitwiseOp),
    /// `TestBit(x, i)`: bit `i` of `x`
    TestBit,
}

pub type Exp = Arc<ExpX>;
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum ExpX {
    Const(Constant),
    Var(Ident, Typ),
    Unary(UnaryOp, Exp),
    Binary(BinaryOp, Exp, Exp),
    If(Exp, Exp, Exp),
}

pub type Env = HashMap<Ident, Constant>;

pub fn mk_nat<N: Into<Nat>>(n: N) -> Exp {
    Arc::new(ExpX::Const(Constant::Nat(n.into())))
}

pub fn mk_bool(b: bool) -> Exp {
    Arc::new(ExpX::Const(Constant::Bool(b)))
}

/// A variable ranging over naturals.
pub fn mk_var<S: Into<String>>(name: S) -> Exp {
    Arc::new(ExpX::Var(Arc::new(name.into()), Typ::Nat))
}

pub fn mk_bool_var<S: Into<String>>(name: S) -> Exp {
    Arc::new(ExpX::Var(Arc::new(name.into()), Typ::Bool))
}

pub fn mk_unary(op: UnaryOp, e: &Exp) -> Exp {
    Arc::new(ExpX::Unary(op, e.clone()))
}

pub fn mk_binary(op: BinaryOp, e1: &Exp, e2: &Exp) -> Exp {
    Arc::new(ExpX::Binary(op, e1.clone(), e2.clone()))
}

pub fn mk_bitwise(op: BitwiseOp, e1: &Exp, e2: &Exp) -> Exp {
    mk_binary(BinaryOp::Bitwise(op), e1, e2)
}

pub fn mk_arith(op: ArithOp, e1: &Exp, e2: &Exp) -> Exp {
    mk_binary(BinaryOp::Arith(op), e1, e2)
}

pub fn mk_test_bit(x: &Exp, i: &Exp) -> Exp {
    mk_binary(BinaryOp::TestBit, x, i)
}

pub fn mk_if(c: &Exp, t: &Exp, f: &Exp) -> Exp {
    Arc::new(ExpX::If(c.clone(), t.clone(), f.clone()))
}

fn type_mismatch(expected: &'static str, found: &Exp) -> NatError {
    NatError::TypeMismatch { expected, found: found.to_string() }
}

impl Constant {
    pub fn typ(&self) -> Typ {
        match self {
            Constant::Nat(_) => Typ::Nat,
            Constant::Bool(_) => Typ::Bool,
        }
    }
}

/// The type of `e`, read off its root. Operands are checked against it
/// before a rewrite drops or forwards them.
pub fn typ_of(e: &Exp) -> Typ {
    use BinaryOp::*;
    match &**e {
        ExpX::Const(c) => c.typ(),
        ExpX::Var(_, t) => *t,
        ExpX::Unary(UnaryOp::Not, _) => Typ::Bool,
        ExpX::Binary(Arith(_) | Bitwise(_), _, _) => Typ::Nat,
        ExpX::Binary(_, _, _) => Typ::Bool,
        ExpX::If(_, t, _) => typ_of(t),
    }
}

fn nat_of(e: &Exp) -> NatResult<Option<&Nat>> {
    match &**e {
        ExpX::Const(Constant::Nat(n)) => Ok(Some(n)),
        _ if typ_of(e) != Typ::Nat => Err(type_mismatch("nat", e)),
        _ => Ok(None),
    }
}

fn bool_of(e: &Exp) -> NatResult<Option<bool>> {
    match &**e {
        ExpX::Const(Constant::Bool(b)) => Ok(Some(*b)),
        _ if typ_of(e) != Typ::Bool => Err(type_mismatch("bool", e)),
        _ => Ok(None),
    }
}

/// `Some(n)` if `p = 2^n`
fn as_pow2(p: &Nat) -> Option<u64> {
    let t = p.trailing_zeros()?;
    if Some(t) == p.highest_set_bit() { Some(t) } else { None }
}

/// `Some(n)` if `m = 2^n - 1`
fn as_mask(m: &Nat) -> Option<u64> {
    as_pow2(&(m + Nat::one()))
}

fn rewrote(rule: &'static str, e: Exp) -> NatResult<Exp> {
    trace!(rule, result = %e, "rewrite");
    Ok(e)
}

fn eval_not(e: Exp) -> NatResult<Exp> {
    if let Some(b) = bool_of(&e)? {
        return Ok(mk_bool(!b));
    }
    match &*e {
        ExpX::Unary(UnaryOp::Not, inner) => rewrote("not_not", inner.clone()),
        _ => Ok(mk_unary(UnaryOp::Not, &e)),
    }
}

fn eval_bool_op(op: BinaryOp, e1: Exp, e2: Exp) -> NatResult<Exp> {
    use BinaryOp::*;
    let b1 = bool_of(&e1)?;
    let b2 = bool_of(&e2)?;
    let not = |e: &Exp| mk_unary(UnaryOp::Not, e);
    let r = match (op, b1, b2) {
        (And, Some(true), _) => e2,
        (And, Some(false), _) | (And, _, Some(false)) => mk_bool(false),
        (And, _, Some(true)) => e1,
        (Or, Some(true), _) | (Or, _, Some(true)) => mk_bool(true),
        (Or, Some(false), _) => e2,
        (Or, _, Some(false)) => e1,
        (Xor, Some(a), Some(b)) => mk_bool(a != b),
        (Xor, Some(true), _) => not(&e2),
        (Xor, Some(false), _) => e2,
        (Xor, _, Some(true)) => not(&e1),
        (Xor, _, Some(false)) => e1,
        (Implies, Some(a), Some(b)) => mk_bool(!a || b),
        (Implies, Some(true), _) => e2,
        (Implies, Some(false), _) | (Implies, _, Some(true)) => mk_bool(true),
        (Implies, _, Some(false)) => not(&e1),
        _ => mk_binary(op, &e1, &e2),
    };
    Ok(r)
}

fn eval_eq(op: BinaryOp, e1: Exp, e2: Exp) -> NatResult<Exp> {
    let t1 = typ_of(&e1);
    if typ_of(&e2) != t1 {
        return Err(type_mismatch(t1.name(), &e2));
    }
    let eq = match (&*e1, &*e2) {
        (ExpX::Const(c1), ExpX::Const(c2)) => Some(c1 == c2),
        // Expressions are pure, so syntactic equality implies equality of values.
        // The converse does not hold: with free variables, this is not the same as !Eq.
        _ if e1 == e2 => Some(true),
        _ => None,
    };
    match eq {
        Some(b) => Ok(mk_bool(if op == BinaryOp::Eq { b } else { !b })),
        None => Ok(mk_binary(op, &e1, &e2)),
    }
}

fn eval_inequality(op: InequalityOp, e1: Exp, e2: Exp) -> NatResult<Exp> {
    use InequalityOp::*;
    match (nat_of(&e1)?, nat_of(&e2)?) {
        (Some(i1), Some(i2)) => {
            let b = match op {
                Le => i1 <= i2,
                Ge => i1 >= i2,
                Lt => i1 < i2,
                Gt => i1 > i2,
            };
            Ok(mk_bool(b))
        }
        // Nothing is below 0
        (_, Some(i2)) if i2.is_zero() && op == Lt => rewrote("lt_zero", mk_bool(false)),
        (Some(i1), _) if i1.is_zero() && op == Le => rewrote("zero_le", mk_bool(true)),
        _ if e1 == e2 => Ok(mk_bool(matches!(op, Le | Ge))),
        _ => Ok(mk_binary(BinaryOp::Inequality(op), &e1, &e2)),
    }
}

fn nat_pow(base: &Nat, exp: &Nat) -> NatResult<Nat> {
    if exp.is_zero() {
        return Ok(Nat::one());
    }
    if base.is_zero() || base.is_one() {
        return Ok(base.clone());
    }
    // base >= 2, so base^e needs at least e * (bit_len(base) - 1) + 1 bits
    let e = exp
        .to_u64()
        .filter(|e| e.checked_mul(base.bit_len() - 1).map_or(false, |b| b < MAX_RESULT_BITS))
        .and_then(|e| u32::try_from(e).ok());
    match e {
        Some(e) => Ok(base.pow(e)),
        None => Err(NatError::AmountTooLarge { op: "power", amount: exp.to_string() }),
    }
}

fn nat_shl(x: &Nat, amount: &Nat) -> NatResult<Nat> {
    if x.is_zero() {
        return Ok(Nat::zero());
    }
    match amount.to_u64().filter(|s| s.saturating_add(x.bit_len()) <= MAX_RESULT_BITS) {
        Some(s) => Ok(shift_left(x, s)),
        None => Err(NatError::AmountTooLarge { op: "shift", amount: amount.to_string() }),
    }
}

fn eval_arith(op: ArithOp, e1: Exp, e2: Exp) -> NatResult<Exp> {
    use ArithOp::*;
    let n1 = nat_of(&e1)?;
    let n2 = nat_of(&e2)?;
    match (n1, n2) {
        // Ideal case where both sides are concrete
        (Some(i1), Some(i2)) => {
            let r = match op {
                Add => i1 + i2,
                Sub => i1 - i2,
                Mul => i1 * i2,
                Div => i1 / i2,
                Mod => i1 % i2,
                Pow => nat_pow(i1, i2)?,
            };
            Ok(mk_nat(r))
        }
        // Special cases for certain concrete values
        (Some(i1), _) if i1.is_zero() && op == Add => rewrote("zero_add", e2.clone()),
        (Some(i1), _) if i1.is_zero() && matches!(op, Sub | Mul | Div | Mod) => {
            rewrote("zero_absorbs", mk_nat(0u32))
        }
        (Some(i1), _) if i1.is_one() && op == Mul => rewrote("one_mul", e2.clone()),
        (_, Some(i2)) if i2.is_zero() => match op {
            Add | Sub | Mod => rewrote("zero_right_identity", e1.clone()),
            Mul | Div => rewrote("zero_right_absorbs", mk_nat(0u32)),
            Pow => rewrote("pow_zero", mk_nat(1u32)),
        },
        (_, Some(i2)) if i2.is_one() => match op {
            Mul | Div | Pow => rewrote("one_right_identity", e1.clone()),
            Mod => rewrote("mod_one", mk_nat(0u32)),
            Add | Sub => Ok(mk_arith(op, &e1, &e2)),
        },
        _ if e1 == e2 && op == Sub => rewrote("sub_self", mk_nat(0u32)),
        _ => Ok(mk_arith(op, &e1, &e2)),
    }
}

fn eval_bitwise(op: BitwiseOp, e1: Exp, e2: Exp) -> NatResult<Exp> {
    use BitwiseOp::*;
    let n1 = nat_of(&e1)?;
    let n2 = nat_of(&e2)?;
    match (n1, n2) {
        // Ideal case where both sides are concrete
        (Some(i1), Some(i2)) => {
            let r = match op {
                BitAnd => and(i1, i2),
                BitOr => or(i1, i2),
                BitXor => xor(i1, i2),
                // No bit lives above position u64::MAX
                Shr => i2.to_u64().map_or_else(Nat::zero, |s| shift_right(i1, s)),
                Shl => nat_shl(i1, i2)?,
            };
            Ok(mk_nat(r))
        }
        // Special cases for certain concrete values
        (Some(i), _) | (_, Some(i)) if i.is_zero() && op == BitAnd => {
            rewrote("and_zero", mk_nat(0u32))
        }
        (Some(i1), _) if i1.is_zero() && matches!(op, BitOr | BitXor) => {
            rewrote("zero_or", e2.clone())
        }
        (Some(i1), _) if i1.is_zero() && matches!(op, Shl | Shr) => {
            rewrote("zero_shift", mk_nat(0u32))
        }
        (_, Some(i2)) if i2.is_zero() => rewrote("right_zero", e1.clone()),
        (Some(m), None) if op == BitAnd => match as_mask(m) {
            Some(n) => mask_to_mod(n, &e2),
            None => Ok(mk_bitwise(op, &e1, &e2)),
        },
        (None, Some(m)) if op == BitAnd => match as_mask(m) {
            Some(n) => mask_to_mod(n, &e1),
            None => Ok(mk_bitwise(op, &e1, &e2)),
        },
        _ if e1 == e2 => match op {
            BitAnd | BitOr => rewrote("idempotent", e1.clone()),
            BitXor => rewrote("xor_self", mk_nat(0u32)),
            Shl | Shr => Ok(mk_bitwise(op, &e1, &e2)),
        },
        _ => Ok(mk_bitwise(op, &e1, &e2)),
    }
}

/// `x & (2^n - 1)` becomes `x % 2^n`
fn mask_to_mod(n: u64, x: &Exp) -> NatResult<Exp> {
    rewrote("and_two_pow_sub_one", mk_arith(ArithOp::Mod, x, &mk_nat(Nat::pow2(n))))
}

fn eval_test_bit(env: &Env, e1: Exp, e2: Exp) -> NatResult<Exp> {
    let x = nat_of(&e1)?;
    let i = nat_of(&e2)?;
    match (x, i) {
        (Some(x), Some(i)) => Ok(mk_bool(i.to_u64().map_or(false, |i| test_bit(x, i)))),
        (Some(x), None) if x.is_zero() => rewrote("testBit_zero", mk_bool(false)),
        (Some(x), None) => match as_mask(x) {
            Some(n) => rewrote(
                "testBit_two_pow_sub_one",
                mk_binary(BinaryOp::Inequality(InequalityOp::Lt), &e2, &mk_nat(n)),
            ),
            None => Ok(mk_test_bit(&e1, &e2)),
        },
        (None, Some(i)) => match i.to_u64() {
            Some(j) => match test_bit_at(env, &e1, j)? {
                Some(r) => Ok(r),
                None => Ok(mk_test_bit(&e1, &e2)),
            },
            None => Ok(mk_test_bit(&e1, &e2)),
        },
        (None, None) => Ok(mk_test_bit(&e1, &e2)),
    }
}

fn const_u64(e: &Exp) -> Option<u64> {
    match &**e {
        ExpX::Const(Constant::Nat(n)) => n.to_u64(),
        _ => None,
    }
}

/// Push a concrete bit index through a symbolic operand.
fn test_bit_at(env: &Env, x: &Exp, j: u64) -> NatResult<Option<Exp>> {
    use BinaryOp::*;
    use BitwiseOp::*;
    let r = match &**x {
        ExpX::Binary(Bitwise(Shl), inner, amt) => match const_u64(amt) {
            Some(s) if j < s => rewrote("testBit_shiftLeft_low", mk_bool(false))?,
            Some(s) => eval_expr(env, &mk_test_bit(inner, &mk_nat(j - s)))?,
            None => return Ok(None),
        },
        ExpX::Binary(Bitwise(Shr), inner, amt) => {
            match const_u64(amt).and_then(|s| s.checked_add(j)) {
                Some(k) => eval_expr(env, &mk_test_bit(inner, &mk_nat(k)))?,
                None => return Ok(None),
            }
        }
        ExpX::Binary(Arith(ArithOp::Mod), inner, m) => {
            match nat_of(m)?.and_then(as_pow2) {
                Some(p) if j < p => eval_expr(env, &mk_test_bit(inner, &mk_nat(j)))?,
                Some(_) => rewrote("testBit_mod_two_pow_high", mk_bool(false))?,
                None => return Ok(None),
            }
        }
        ExpX::Binary(Bitwise(op @ (BitAnd | BitOr | BitXor)), a, b) => {
            let bool_op = match op {
                BitAnd => And,
                BitOr => Or,
                _ => Xor,
            };
            let idx = mk_nat(j);
            let pointwise = mk_binary(bool_op, &mk_test_bit(a, &idx), &mk_test_bit(b, &idx));
            trace!(rule = "testBit_bitwise", "rewrite");
            eval_expr(env, &pointwise)?
        }
        _ => return Ok(None),
    };
    Ok(Some(r))
}

/// Evaluate `exp` as far as `env` allows.
///
/// Variables bound in `env` are replaced by their values; unbound variables
/// stay symbolic. Every operand is checked against its expected type before
/// a rewrite drops or forwards it, so a type error is never hidden. For every
/// extension of `env` that binds variables at their declared types, the
/// result evaluates to the same constant as `exp` whenever `exp` evaluates
/// to one. Both branches of an `If` with an unknown condition are checked,
/// so this can fail where a closed evaluation would not.
pub fn eval_expr(env: &Env, exp: &Exp) -> NatResult<Exp> {
    use ExpX::*;
    match &**exp {
        Const(_) => Ok(exp.clone()),
        Var(id, typ) => match env.get(id) {
            None => Ok(exp.clone()),
            Some(c) if c.typ() == *typ => Ok(Arc::new(Const(c.clone()))),
            Some(c) => Err(NatError::TypeMismatch { expected: typ.name(), found: c.to_string() }),
        },
        Unary(UnaryOp::Not, e) => {
            let e = eval_expr(env, e)?;
            eval_not(e)
        }
        Binary(op, e1, e2) => {
            let e1 = eval_expr(env, e1)?;
            let e2 = eval_expr(env, e2)?;
            match op {
                BinaryOp::And | BinaryOp::Or | BinaryOp::Xor | BinaryOp::Implies => {
                    eval_bool_op(*op, e1, e2)
                }
                BinaryOp::Eq | BinaryOp::Ne => eval_eq(*op, e1, e2),
                BinaryOp::Inequality(op) => eval_inequality(*op, e1, e2),
                BinaryOp::Arith(op) => eval_arith(*op, e1, e2),
                BinaryOp::Bitwise(op) => eval_bitwise(*op, e1, e2),
                BinaryOp::TestBit => eval_test_bit(env, e1, e2),
            }
        }
        If(c, t, f) => {
            let c = eval_expr(env, c)?;
            match bool_of(&c)? {
                Some(true) => eval_expr(env, t),
                Some(false) => eval_expr(env, f),
                None => {
                    let t = eval_expr(env, t)?;
                    let f = eval_expr(env, f)?;
                    if typ_of(&f) != typ_of(&t) {
                        return Err(type_mismatch(typ_of(&t).name(), &f));
                    }
                    if t == f { Ok(t) } else { Ok(mk_if(&c, &t, &f)) }
                }
            }
        }
    }
}

/// Evaluate `exp` all the way down to a constant.
pub fn eval_to_constant(env: &Env, exp: &Exp) -> NatResult<Constant> {
    let r = eval_expr(env, exp)?;
    match &*r {
        ExpX::Const(c) => Ok(c.clone()),
        _ => match free_vars(&r).into_iter().next() {
            Some(x) => Err(NatError::UnboundVar((*x).clone())),
            None => Err(type_mismatch("constant", &r)),
        },
    }
}

/// Free variables of `exp`, in order of first occurrence.
pub fn free_vars(exp: &Exp) -> IndexSet<Ident> {
    fn walk(exp: &Exp, acc: &mut IndexSet<Ident>) {
        match &**exp {
            ExpX::Const(_) => {}
            ExpX::Var(x, _) => {
                acc.insert(x.clone());
            }
            ExpX::Unary(_, e) => walk(e, acc),
            ExpX::Binary(_, e1, e2) => {
                walk(e1, acc);
                walk(e2, acc);
            }
            ExpX::If(c, t, f) => {
                walk(c, acc);
                walk(t, acc);
                walk(f, acc);
            }
        }
    }
    let mut acc = IndexSet::new();
    walk(exp, &mut acc);
    acc
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Nat(n) => write!(f, "{}", n),
            Constant::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        use BinaryOp::*;
        match self {
            And => "&&",
            Or => "||",
            Xor => "^^",
            Implies => "==>",
            Eq => "==",
            Ne => "!=",
            Inequality(InequalityOp::Le) => "<=",
            Inequality(InequalityOp::Ge) => ">=",
            Inequality(InequalityOp::Lt) => "<",
            Inequality(InequalityOp::Gt) => ">",
            Arith(ArithOp::Add) => "+",
            Arith(ArithOp::Sub) => "-",
            Arith(ArithOp::Mul) => "*",
            Arith(ArithOp::Div) => "/",
            Arith(ArithOp::Mod) => "%",
            Arith(ArithOp::Pow) => "^",
            Bitwise(BitwiseOp::BitAnd) => "&",
            Bitwise(BitwiseOp::BitOr) => "|",
            Bitwise(BitwiseOp::BitXor) => "xor",
            Bitwise(BitwiseOp::Shl) => "<<",
            Bitwise(BitwiseOp::Shr) => ">>",
            TestBit => "testBit",
        }
    }
}

impl fmt::Display for ExpX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpX::Const(c) => write!(f, "{}", c),
            ExpX::Var(x, _) => write!(f, "{}", x),
            ExpX::Unary(UnaryOp::Not, e) => write!(f, "!{}", e),
            ExpX::Binary(BinaryOp::TestBit, x, i) => write!(f, "testBit({}, {})", x, i),
            ExpX::Binary(op, e1, e2) => write!(f, "({} {} {})", e1, op.symbol(), e2),
            ExpX::If(c, t, e) => write!(f, "(if {} then {} else {})", c, t, e),
        }
    }
}
