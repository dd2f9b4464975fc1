//! Vectorisation Engine
//!
//! Broadcasts a scalar operation across a sequence operand. Only the left
//! operand is iterated: `rhs` (and `third`) are passed unchanged to every
//! call, so two sequence operands are NOT zipped pairwise.
//!
//! ```text
//! vectorise(op, [a, b, c], x)  =>  [op(a, x), op(b, x), op(c, x)]
//! ```
//!
//! The result is always a lazy sequence. The operation runs when an item is
//! pulled, and a failing call surfaces as an `Err` at that position.

use num_bigint::BigInt;
use num_traits::One;
use std::rc::Rc;
use terse_core::{
    Callable, Context, NumberIteration, Result, RuntimeError, Sequence, TagMode, Value, type_tag,
    type_tag_pair,
};

type MonadFn = dyn Fn(Value, &Context) -> Result<Value>;
type DyadFn = dyn Fn(Value, Value, &Context) -> Result<Value>;
type TriadFn = dyn Fn(Value, Value, Value, &Context) -> Result<Value>;

/// An operator that can be applied to one, two or three operands
#[derive(Clone)]
pub enum Operation {
    Monad(Rc<MonadFn>),
    Dyad(Rc<DyadFn>),
    Triad(Rc<TriadFn>),
}

impl Operation {
    pub fn monad(f: impl Fn(Value, &Context) -> Result<Value> + 'static) -> Self {
        Operation::Monad(Rc::new(f))
    }

    pub fn dyad(f: impl Fn(Value, Value, &Context) -> Result<Value> + 'static) -> Self {
        Operation::Dyad(Rc::new(f))
    }

    pub fn triad(f: impl Fn(Value, Value, Value, &Context) -> Result<Value> + 'static) -> Self {
        Operation::Triad(Rc::new(f))
    }

    /// Wrap a function value; only arities 1 to 3 are operations
    pub fn from_callable(callable: Callable) -> Result<Self> {
        match callable.arity {
            1 => Ok(Operation::monad(move |a, ctx| callable.call(vec![a], ctx))),
            2 => Ok(Operation::dyad(move |a, b, ctx| callable.call(vec![a, b], ctx))),
            3 => Ok(Operation::triad(move |a, b, c, ctx| {
                callable.call(vec![a, b, c], ctx)
            })),
            n => Err(RuntimeError::InvalidElement(format!(
                "function of arity {} cannot be vectorised, only arities 1 to 3",
                n
            ))),
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Operation::Monad(_) => 1,
            Operation::Dyad(_) => 2,
            Operation::Triad(_) => 3,
        }
    }
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Operation/{}", self.arity())
    }
}

/// Apply `op` to `args` (natural left-to-right order) with the context appended
///
/// Failures from the operation are returned as-is.
pub fn safe_apply(op: &Operation, args: Vec<Value>, ctx: &Context) -> Result<Value> {
    if args.len() != op.arity() {
        return Err(RuntimeError::Arity {
            expected: op.arity(),
            found: args.len(),
        });
    }
    let mut args = args.into_iter();
    let mut next = || {
        args.next().ok_or(RuntimeError::Arity {
            expected: op.arity(),
            found: 0,
        })
    };
    match op {
        Operation::Monad(f) => f(next()?, ctx),
        Operation::Dyad(f) => {
            let lhs = next()?;
            let rhs = next()?;
            f(lhs, rhs, ctx)
        }
        Operation::Triad(f) => {
            let lhs = next()?;
            let rhs = next()?;
            let third = next()?;
            f(lhs, rhs, third, ctx)
        }
    }
}

/// Coerce any value into something iterable
///
/// - Sequence: itself
/// - Text: one length-1 Text per character
/// - Number: its digits, or `1..=n`, per the context's number policy
/// - Function: not iterable
pub fn iterable(value: &Value, ctx: &Context) -> Result<Sequence> {
    match value {
        Value::Sequence(seq) => Ok(seq.clone()),
        Value::Text(s) => Ok(Sequence::from_vec(
            s.chars().map(|c| Value::text(c.to_string())).collect(),
        )),
        Value::Number(n) => match (ctx.number_iteration(), n.as_rational()) {
            (NumberIteration::Range, Some(r)) => {
                Ok(Sequence::range_inclusive(BigInt::one(), r.floor().to_integer()))
            }
            _ => Ok(Sequence::from_vec(digits(&n.to_string()))),
        },
        Value::Function(_) => Err(RuntimeError::NotIterable {
            tag: type_tag(value, TagMode::Coarse),
        }),
    }
}

fn digits(repr: &str) -> Vec<Value> {
    repr.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => Value::from(d as i64),
            None => Value::text(c.to_string()),
        })
        .collect()
}

/// Map `op` over `left`, passing `right` and `third` through unchanged
///
/// The arity is chosen by which optional operands are present and must
/// match the operation's own arity.
pub fn vectorise(
    op: &Operation,
    left: Value,
    right: Option<Value>,
    third: Option<Value>,
    ctx: &Context,
) -> Result<Value> {
    let extra: Vec<Value> = match (right, third) {
        (None, None) => vec![],
        (Some(rhs), None) => vec![rhs],
        (Some(rhs), Some(third)) => vec![rhs, third],
        (None, Some(_)) => {
            return Err(RuntimeError::Arity {
                expected: 3,
                found: 2,
            });
        }
    };
    if extra.len() + 1 != op.arity() {
        return Err(RuntimeError::Arity {
            expected: op.arity(),
            found: extra.len() + 1,
        });
    }

    let items = iterable(&left, ctx)?;
    let op = op.clone();
    let ctx = ctx.clone();
    let extra: Rc<[Value]> = Rc::from(extra);
    Ok(Value::Sequence(Sequence::lazy(move || {
        let op = op.clone();
        let ctx = ctx.clone();
        let extra = Rc::clone(&extra);
        Box::new(items.iter().map(move |item| {
            let mut args = Vec::with_capacity(extra.len() + 1);
            args.push(item?);
            args.extend(extra.iter().cloned());
            safe_apply(&op, args, &ctx)
        }))
    })))
}

pub fn vectorise_monad(op: &Operation, left: Value, ctx: &Context) -> Result<Value> {
    vectorise(op, left, None, None, ctx)
}

pub fn vectorise_dyad(op: &Operation, left: Value, right: Value, ctx: &Context) -> Result<Value> {
    vectorise(op, left, Some(right), None, ctx)
}

pub fn vectorise_triad(
    op: &Operation,
    left: Value,
    right: Value,
    third: Value,
    ctx: &Context,
) -> Result<Value> {
    vectorise(op, left, Some(right), Some(third), ctx)
}

/// Default arm of every binary element table
///
/// A sequence on the left is iterated (left-broadcast). A scalar left with a
/// sequence on the right is broadcast over the right operand instead, keeping
/// the `(lhs, item)` argument order; iterating the scalar would hand the same
/// pair straight back to the element. Anything else has no vectorisation
/// target.
pub fn dyad_fallback(
    element: &str,
    op: fn(Value, Value, &Context) -> Result<Value>,
    lhs: Value,
    rhs: Value,
    ctx: &Context,
) -> Result<Value> {
    match (&lhs, &rhs) {
        (Value::Sequence(_), _) => {
            tracing::trace!(element, "vectorising over left operand");
            vectorise_dyad(&Operation::dyad(op), lhs, rhs, ctx)
        }
        (Value::Number(_) | Value::Text(_), Value::Sequence(_)) => {
            tracing::trace!(element, "broadcasting scalar left operand over right");
            let flipped = Operation::dyad(move |item, scalar, ctx| op(scalar, item, ctx));
            vectorise_dyad(&flipped, rhs, lhs, ctx)
        }
        _ => {
            let (l, r) = type_tag_pair(&lhs, &rhs, TagMode::Coarse);
            Err(RuntimeError::operand_type(element, vec![l, r]))
        }
    }
}
