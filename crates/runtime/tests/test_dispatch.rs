//! Dispatch and vectorisation behaviour seen from outside the crate

use num_bigint::BigInt;
use num_rational::BigRational;
use std::io::Cursor;
use terse_core::{Context, ContextConfig, Number, Sequence, Stack, Tag, TagMode, Value, type_tag};
use terse_runtime::{Elements, Operation, add, subtract, vectorise_dyad};

fn ctx() -> Context {
    Context::with_source(ContextConfig::new(), Cursor::new(String::new()))
}

fn scalars() -> Vec<Value> {
    vec![
        Value::from(3),
        Value::Number(Number::parse_literal("-2.5").unwrap()),
        Value::Number(Number::complex(
            BigRational::from_integer(BigInt::from(1)),
            BigRational::from_integer(BigInt::from(2)),
        )),
        Value::from(""),
        Value::from("xy"),
    ]
}

#[test]
fn test_add_is_total_over_scalar_tags() {
    let ctx = ctx();
    for lhs in scalars() {
        for rhs in scalars() {
            let result = add(lhs.clone(), rhs.clone(), &ctx)
                .unwrap_or_else(|e| panic!("add({}, {}) failed: {}", lhs, rhs, e));
            let tag = type_tag(&result, TagMode::Coarse);
            assert!(
                tag == Tag::Number || tag == Tag::Text,
                "add({}, {}) produced {}",
                lhs,
                rhs,
                tag
            );
        }
    }
}

#[test]
fn test_add_with_sequence_operand_yields_sequence() {
    let ctx = ctx();
    let eager = Value::list(vec![Value::from(1), Value::from("a")]);
    let lazy = Value::Sequence(Sequence::range_inclusive(BigInt::from(1), BigInt::from(3)));
    for seq in [eager, lazy] {
        for scalar in scalars() {
            for (lhs, rhs) in [(seq.clone(), scalar.clone()), (scalar.clone(), seq.clone())] {
                let result = add(lhs, rhs, &ctx).unwrap();
                assert_eq!(type_tag(&result, TagMode::Coarse), Tag::Sequence);
                result.as_sequence().unwrap().to_vec().unwrap();
            }
        }
        let result = add(seq.clone(), seq.clone(), &ctx).unwrap();
        assert_eq!(type_tag(&result, TagMode::Coarse), Tag::Sequence);
    }
}

#[test]
fn test_vectorise_three_items() {
    let ctx = ctx();
    let op = Operation::dyad(subtract);
    let left = vec![Value::from(10), Value::from(20), Value::from(30)];
    let result = vectorise_dyad(&op, Value::list(left.clone()), Value::from(4), &ctx).unwrap();
    let seq = result.as_sequence().unwrap();
    assert!(seq.is_lazy());
    let items = seq.to_vec().unwrap();
    assert_eq!(items.len(), 3);
    for (item, operand) in items.iter().zip(left) {
        assert_eq!(*item, subtract(operand, Value::from(4), &ctx).unwrap());
    }
}

#[test]
fn test_add_scenarios() {
    let ctx = ctx();
    assert_eq!(
        add(Value::from(3), Value::from("x"), &ctx).unwrap(),
        Value::from("3x")
    );
    let result = add(
        Value::list(vec![Value::from(1), Value::from(2)]),
        Value::from(5),
        &ctx,
    )
    .unwrap();
    assert_eq!(
        result.as_sequence().unwrap().to_vec().unwrap(),
        vec![Value::from(6), Value::from(7)]
    );
}

#[test]
fn test_stack_program() {
    // 2 `ab` • ÷ : pushes "aabb" then splits it into characters
    let ctx = ctx();
    let elements = Elements::standard();
    let mut stack = Stack::new();
    stack.push(2);
    stack.push("ab");
    elements.invoke("•", &mut stack, &ctx).unwrap();
    elements.invoke("÷", &mut stack, &ctx).unwrap();
    let chars: Vec<String> = stack.into_vec().iter().map(|v| v.to_string()).collect();
    assert_eq!(chars, vec!["a", "a", "b", "b"]);
}
