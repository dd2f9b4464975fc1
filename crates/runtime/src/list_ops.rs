//! Sequence helpers used by element branches, and the `÷` element

use crate::vectorise::iterable;
use terse_core::{Context, Result, RuntimeError, Sequence, Stack, Value};

/// Element `÷`: replace the top value with each of its items
///
/// Numbers and text are coerced with [`iterable`]. An unbounded sequence
/// does not terminate.
pub fn splat(stack: &mut Stack, ctx: &Context) -> Result<()> {
    let value = stack.pop("÷")?;
    let items = iterable(&value, ctx)?.to_vec()?;
    tracing::trace!(count = items.len(), "splatting onto stack");
    stack.extend(items);
    Ok(())
}

/// Pour the items of `content` into the nested shape of `shape`
///
/// Every non-sequence leaf of `shape` is replaced by the next content item,
/// cycling back to the start when content runs out. Nested sequences in the
/// shape produce nested results.
///
/// ```text
/// mold([1, 2, 3], [0, [0, 0], 0, 0])  =>  [1, [2, 3], 1, 2]
/// ```
///
/// `content` is materialised. An unbounded `shape` does not terminate.
pub fn mold(content: &Sequence, shape: &Sequence) -> Result<Value> {
    let content = content.to_vec()?;
    let mut index = 0;
    mold_into(&content, shape, &mut index)
}

fn mold_into(content: &[Value], shape: &Sequence, index: &mut usize) -> Result<Value> {
    let mut molded = Vec::new();
    for item in shape.iter() {
        match item? {
            Value::Sequence(inner) => molded.push(mold_into(content, &inner, index)?),
            _ => {
                if content.is_empty() {
                    return Err(RuntimeError::computation(
                        "•",
                        "(sequence, sequence)",
                        "cannot mold empty content into a non-empty shape",
                    ));
                }
                molded.push(content[*index % content.len()].clone());
                *index += 1;
            }
        }
    }
    Ok(Value::list(molded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use terse_core::ContextConfig;

    fn ctx() -> Context {
        Context::with_source(ContextConfig::new(), Cursor::new(String::new()))
    }

    fn seq(items: Vec<Value>) -> Sequence {
        Sequence::from_vec(items)
    }

    fn n(v: i64) -> Value {
        Value::from(v)
    }

    #[test]
    fn test_mold_flat() {
        let result = mold(&seq(vec![n(1), n(2)]), &seq(vec![n(0), n(0), n(0)])).unwrap();
        assert_eq!(result, Value::list(vec![n(1), n(2), n(1)]));
    }

    #[test]
    fn test_mold_nested_shape_shares_cursor() {
        let shape = seq(vec![
            n(0),
            Value::list(vec![n(0), n(0)]),
            n(0),
            n(0),
        ]);
        let result = mold(&seq(vec![n(1), n(2), n(3)]), &shape).unwrap();
        assert_eq!(
            result,
            Value::list(vec![
                n(1),
                Value::list(vec![n(2), n(3)]),
                n(1),
                n(2)
            ])
        );
    }

    #[test]
    fn test_mold_empty_shape() {
        let result = mold(&seq(vec![]), &seq(vec![])).unwrap();
        assert_eq!(result, Value::list(vec![]));
    }

    #[test]
    fn test_mold_empty_content_errors() {
        let err = mold(&seq(vec![]), &seq(vec![n(0)])).unwrap_err();
        assert!(matches!(err, RuntimeError::Computation { .. }));
    }

    #[test]
    fn test_splat_pushes_items_in_order() {
        let mut stack = Stack::new();
        stack.push(Value::list(vec![n(1), n(2), n(3)]));
        splat(&mut stack, &ctx()).unwrap();
        assert_eq!(stack.into_vec(), vec![n(1), n(2), n(3)]);
    }

    #[test]
    fn test_splat_text_and_number() {
        let ctx = ctx();
        let mut stack = Stack::new();
        stack.push("ab");
        splat(&mut stack, &ctx).unwrap();
        stack.push(42);
        splat(&mut stack, &ctx).unwrap();
        assert_eq!(
            stack.into_vec(),
            vec![Value::from("a"), Value::from("b"), n(4), n(2)]
        );
    }

    #[test]
    fn test_splat_empty_stack_underflows() {
        let err = splat(&mut Stack::new(), &ctx()).unwrap_err();
        assert!(matches!(err, RuntimeError::StackUnderflow { .. }));
    }
}
