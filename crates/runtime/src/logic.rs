//! Logic elements: `¬ ∧ ⟑ ∨ ⟇`
//!
//! Results are the numbers `1` and `0`. The flipped forms (`⟑`, `⟇`) test
//! the right operand first, so a lazy left operand is not forced when the
//! right one already decides the result.

use terse_core::{Context, Result, Value};

/// Element `¬`
pub fn not(lhs: Value, _ctx: &Context) -> Result<Value> {
    Ok(Value::from(!lhs.is_truthy()?))
}

/// Element `∧`
pub fn and(lhs: Value, rhs: Value, _ctx: &Context) -> Result<Value> {
    Ok(Value::from(lhs.is_truthy()? && rhs.is_truthy()?))
}

/// Element `⟑`
pub fn and_flipped(lhs: Value, rhs: Value, _ctx: &Context) -> Result<Value> {
    Ok(Value::from(rhs.is_truthy()? && lhs.is_truthy()?))
}

/// Element `∨`
pub fn or(lhs: Value, rhs: Value, _ctx: &Context) -> Result<Value> {
    Ok(Value::from(lhs.is_truthy()? || rhs.is_truthy()?))
}

/// Element `⟇`
pub fn or_flipped(lhs: Value, rhs: Value, _ctx: &Context) -> Result<Value> {
    Ok(Value::from(rhs.is_truthy()? || lhs.is_truthy()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use terse_core::{ContextConfig, RuntimeError, Sequence};

    fn ctx() -> Context {
        Context::with_source(ContextConfig::new(), Cursor::new(String::new()))
    }

    /// A sequence whose first item fails, to observe what gets forced
    fn poisoned() -> Value {
        Value::Sequence(Sequence::lazy(|| {
            Box::new(std::iter::once(Err::<Value, _>(RuntimeError::Input(
                "forced".to_string(),
            ))))
        }))
    }

    #[test]
    fn test_not() {
        let ctx = ctx();
        assert_eq!(not(Value::from(0), &ctx).unwrap(), Value::from(1));
        assert_eq!(not(Value::from("x"), &ctx).unwrap(), Value::from(0));
        assert_eq!(not(Value::list(vec![]), &ctx).unwrap(), Value::from(1));
    }

    #[test]
    fn test_and_or_truth_table() {
        let ctx = ctx();
        let (t, f) = (Value::from(1), Value::from(0));
        assert_eq!(and(t.clone(), t.clone(), &ctx).unwrap(), Value::from(1));
        assert_eq!(and(t.clone(), f.clone(), &ctx).unwrap(), Value::from(0));
        assert_eq!(or(f.clone(), t.clone(), &ctx).unwrap(), Value::from(1));
        assert_eq!(or(f.clone(), f.clone(), &ctx).unwrap(), Value::from(0));
        assert_eq!(and_flipped(t.clone(), f.clone(), &ctx).unwrap(), Value::from(0));
        assert_eq!(or_flipped(f, t, &ctx).unwrap(), Value::from(1));
    }

    #[test]
    fn test_flipped_forms_test_right_first() {
        let ctx = ctx();
        assert_eq!(
            and_flipped(poisoned(), Value::from(0), &ctx).unwrap(),
            Value::from(0)
        );
        assert_eq!(
            or_flipped(poisoned(), Value::from(1), &ctx).unwrap(),
            Value::from(1)
        );
        assert!(and(poisoned(), Value::from(0), &ctx).is_err());
    }
}
