//! Arithmetic elements: `+`, `-` and `•`
//!
//! Each element is a table keyed by the `(lhs, rhs)` tag pair. Pairs with no
//! direct branch go through [`dyad_fallback`], which vectorises the element
//! over its sequence operand.
//!
//! # Tables
//!
//! ```text
//!             +                -                    •
//! (num, num)  lhs + rhs        lhs - rhs            log of lhs, base rhs
//! (num, txt)  str(lhs) + rhs   "-" * lhs + rhs      each char of rhs, lhs times
//! (txt, num)  lhs + str(rhs)   lhs + "-" * rhs      each char of lhs, rhs times
//! (txt, txt)  lhs + rhs        lhs without rhs      lhs with capitalisation of rhs
//! (seq, seq)  vectorise        vectorise            lhs molded to shape of rhs
//! ```

use crate::list_ops::mold;
use crate::string_ops::{repeat_chars, repeat_str, transfer_capitalisation};
use crate::vectorise::dyad_fallback;
use terse_core::{Context, Number, Result, RuntimeError, Value};

const NUM_NUM: &str = "(number, number)";
const NUM_TEXT: &str = "(number, text)";
const TEXT_NUM: &str = "(text, number)";

/// Element `+`
pub fn add(lhs: Value, rhs: Value, ctx: &Context) -> Result<Value> {
    match (&lhs, &rhs) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.add(b))),
        (Value::Number(a), Value::Text(b)) => Ok(Value::from(format!("{}{}", a, b))),
        (Value::Text(a), Value::Number(b)) => Ok(Value::from(format!("{}{}", a, b))),
        (Value::Text(a), Value::Text(b)) => Ok(Value::from(format!("{}{}", a, b))),
        _ => dyad_fallback("+", add, lhs, rhs, ctx),
    }
}

/// Element `-`
pub fn subtract(lhs: Value, rhs: Value, ctx: &Context) -> Result<Value> {
    match (&lhs, &rhs) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.sub(b))),
        (Value::Number(a), Value::Text(b)) => {
            let dashes = repeated("-", NUM_TEXT, repeat_str("-", count("-", NUM_TEXT, a)?))?;
            Ok(Value::from(format!("{}{}", dashes, b)))
        }
        (Value::Text(a), Value::Number(b)) => {
            let dashes = repeated("-", TEXT_NUM, repeat_str("-", count("-", TEXT_NUM, b)?))?;
            Ok(Value::from(format!("{}{}", a, dashes)))
        }
        (Value::Text(a), Value::Text(b)) => Ok(Value::from(a.replace(&**b, ""))),
        _ => dyad_fallback("-", subtract, lhs, rhs, ctx),
    }
}

/// Element `•`
pub fn log_mold_multi(lhs: Value, rhs: Value, ctx: &Context) -> Result<Value> {
    match (&lhs, &rhs) {
        (Value::Number(a), Value::Number(b)) => a
            .log(b)
            .map(Value::Number)
            .map_err(|message| RuntimeError::computation("•", NUM_NUM, message)),
        (Value::Number(a), Value::Text(b)) => {
            let text = repeat_chars(b, count("•", NUM_TEXT, a)?);
            Ok(Value::from(repeated("•", NUM_TEXT, text)?))
        }
        (Value::Text(a), Value::Number(b)) => {
            let text = repeat_chars(a, count("•", TEXT_NUM, b)?);
            Ok(Value::from(repeated("•", TEXT_NUM, text)?))
        }
        (Value::Text(a), Value::Text(b)) => Ok(Value::from(transfer_capitalisation(b, a))),
        (Value::Sequence(a), Value::Sequence(b)) => mold(a, b),
        _ => dyad_fallback("•", log_mold_multi, lhs, rhs, ctx),
    }
}

/// A number used as a repetition count
fn count(element: &str, branch: &str, n: &Number) -> Result<i64> {
    n.as_count().ok_or_else(|| {
        RuntimeError::computation(
            element,
            branch,
            format!("repetition count must be an integer, got {}", n),
        )
    })
}

fn repeated(
    element: &str,
    branch: &str,
    text: std::result::Result<String, String>,
) -> Result<String> {
    text.map_err(|message| RuntimeError::computation(element, branch, message))
}
