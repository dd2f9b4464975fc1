//! Operand stack
//!
//! The execution backend owns one `Stack` per run and hands it to elements.
//! Multi-value pops are all-or-nothing: an underflow leaves the stack intact.

use crate::error::{Result, RuntimeError};
use crate::value::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stack {
    values: Vec<Value>,
}

impl Stack {
    pub fn new() -> Self {
        Stack::default()
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
    }

    pub fn extend(&mut self, values: impl IntoIterator<Item = Value>) {
        self.values.extend(values);
    }

    /// Pop the top value
    ///
    /// `element` names the caller in the underflow error.
    pub fn pop(&mut self, element: &str) -> Result<Value> {
        self.values.pop().ok_or_else(|| RuntimeError::StackUnderflow {
            element: element.to_string(),
            needed: 1,
            available: 0,
        })
    }

    /// Pop `n` values, returned in pop order (former top first)
    pub fn pop_n(&mut self, n: usize, element: &str) -> Result<Vec<Value>> {
        if self.values.len() < n {
            return Err(RuntimeError::StackUnderflow {
                element: element.to_string(),
                needed: n,
                available: self.values.len(),
            });
        }
        let split = self.values.len() - n;
        let mut popped = self.values.split_off(split);
        popped.reverse();
        Ok(popped)
    }

    pub fn peek(&self) -> Option<&Value> {
        self.values.last()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values from bottom to top
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_n_returns_top_first() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);
        let popped = stack.pop_n(2, "test").unwrap();
        assert_eq!(popped, vec![Value::from(3), Value::from(2)]);
        assert_eq!(stack.as_slice(), &[Value::from(1)]);
    }

    #[test]
    fn test_underflow_leaves_stack_intact() {
        let mut stack = Stack::new();
        stack.push(1);
        let err = stack.pop_n(2, "+").unwrap_err();
        assert_eq!(
            err,
            RuntimeError::StackUnderflow {
                element: "+".to_string(),
                needed: 2,
                available: 1,
            }
        );
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_pop_empty() {
        let mut stack = Stack::new();
        assert!(stack.pop("÷").is_err());
        assert!(stack.peek().is_none());
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_zero_is_noop() {
        let mut stack = Stack::new();
        assert_eq!(stack.pop_n(0, "×").unwrap(), Vec::<Value>::new());
    }
}
