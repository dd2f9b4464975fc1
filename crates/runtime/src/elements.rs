//! Element registration and the stack contract
//!
//! An element is a one or two character symbol bound to an implementation
//! and a declared arity. Invoking an element with arity `n` pops exactly `n`
//! operands, former top first, and calls the implementation with them in
//! left-to-right order:
//!
//! ```text
//! stack: [.. lhs rhs]      pop order: rhs, lhs      call: op(lhs, rhs, ctx)
//! stack: [.. lhs rhs t]    pop order: t, rhs, lhs   call: op(lhs, rhs, t, ctx)
//! ```
//!
//! Exactly one result is pushed back, except for raw stack implementations
//! which manage the stack themselves.

use crate::arithmetic::{add, log_mold_multi, subtract};
use crate::io::read_top_input;
use crate::list_ops::splat;
use crate::logic::{and, and_flipped, not, or, or_flipped};
use crate::vectorise::{Operation, safe_apply};
use std::collections::HashMap;
use std::fmt;
use terse_core::{Callable, Context, Result, RuntimeError, Stack, Value};

/// Number of operands an element takes from the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Nilad,
    Monad,
    Dyad,
    Triad,
}

impl Arity {
    pub fn count(self) -> usize {
        match self {
            Arity::Nilad => 0,
            Arity::Monad => 1,
            Arity::Dyad => 2,
            Arity::Triad => 3,
        }
    }

    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            0 => Some(Arity::Nilad),
            1 => Some(Arity::Monad),
            2 => Some(Arity::Dyad),
            3 => Some(Arity::Triad),
            _ => None,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Arity::Nilad => "nilad",
            Arity::Monad => "monad",
            Arity::Dyad => "dyad",
            Arity::Triad => "triad",
        };
        write!(f, "{}", name)
    }
}

/// What runs when an element is invoked
#[derive(Clone)]
pub enum Implementation {
    /// Fixed output, no operands
    Constant(fn() -> Value),
    /// Computed output with no operands (input reads)
    Nilad(fn(&Context) -> Result<Value>),
    /// Pops `arity` operands and pushes one result
    Operation(Operation),
    /// Works on the stack directly
    Stack(fn(&mut Stack, &Context) -> Result<()>),
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Implementation::Constant(_) => write!(f, "Constant"),
            Implementation::Nilad(_) => write!(f, "Nilad"),
            Implementation::Operation(op) => write!(f, "{:?}", op),
            Implementation::Stack(_) => write!(f, "Stack"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    symbol: String,
    arity: Arity,
    implementation: Implementation,
}

impl Element {
    /// Register `implementation` under `symbol` with the declared arity
    ///
    /// Fails when the symbol is not one or two non-whitespace characters,
    /// the arity is above 3, or the arity disagrees with the implementation.
    pub fn new(symbol: &str, implementation: Implementation, arity: usize) -> Result<Self> {
        let chars = symbol.chars().count();
        if chars == 0 || chars > 2 || symbol.chars().any(char::is_whitespace) {
            return Err(RuntimeError::InvalidElement(format!(
                "symbol {:?} must be one or two non-whitespace characters",
                symbol
            )));
        }
        let declared = Arity::from_count(arity).ok_or_else(|| {
            RuntimeError::InvalidElement(format!(
                "{}: arity {} is out of range 0..=3",
                symbol, arity
            ))
        })?;
        let consistent = match &implementation {
            Implementation::Constant(_) | Implementation::Nilad(_) => declared == Arity::Nilad,
            Implementation::Operation(op) => op.arity() == arity,
            Implementation::Stack(_) => true,
        };
        if !consistent {
            return Err(RuntimeError::InvalidElement(format!(
                "{}: declared {} does not match {:?}",
                symbol, declared, implementation
            )));
        }
        Ok(Element::builtin(symbol, declared, implementation))
    }

    /// Register a function value as an element of its own arity
    pub fn from_callable(symbol: &str, callable: Callable) -> Result<Self> {
        let arity = callable.arity;
        Element::new(symbol, Implementation::Operation(Operation::from_callable(callable)?), arity)
    }

    fn builtin(symbol: &str, arity: Arity, implementation: Implementation) -> Self {
        Element {
            symbol: symbol.to_string(),
            arity,
            implementation,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn implementation(&self) -> &Implementation {
        &self.implementation
    }

    /// Run the element against `stack`
    ///
    /// An underflow leaves the stack untouched. When the implementation
    /// itself fails, the popped operands are not restored.
    pub fn invoke(&self, stack: &mut Stack, ctx: &Context) -> Result<()> {
        tracing::trace!(symbol = %self.symbol, arity = %self.arity, depth = stack.len(), "invoke");
        match &self.implementation {
            Implementation::Constant(value) => stack.push(value()),
            Implementation::Nilad(read) => stack.push(read(ctx)?),
            Implementation::Operation(op) => {
                let mut operands = stack.pop_n(self.arity.count(), &self.symbol)?;
                operands.reverse();
                stack.push(safe_apply(op, operands, ctx)?);
            }
            Implementation::Stack(run) => run(stack, ctx)?,
        }
        Ok(())
    }
}

/// The symbol table consulted by the execution backend
#[derive(Debug, Clone, Default)]
pub struct Elements {
    table: HashMap<String, Element>,
}

/// Builtin element rows: `symbol => arity, implementation`
macro_rules! element_table {
    ($($symbol:literal => $arity:ident, $implementation:expr;)*) => {
        vec![$(($symbol, Arity::$arity, $implementation)),*]
    };
}

fn standard_table() -> Vec<(&'static str, Arity, Implementation)> {
    use Implementation::{Constant, Nilad, Operation as Op};
    element_table! {
        "¬" => Monad, Op(Operation::monad(not));
        "∧" => Dyad, Op(Operation::dyad(and));
        "⟑" => Dyad, Op(Operation::dyad(and_flipped));
        "∨" => Dyad, Op(Operation::dyad(or));
        "⟇" => Dyad, Op(Operation::dyad(or_flipped));
        "÷" => Monad, Implementation::Stack(splat);
        "×" => Nilad, Constant(|| Value::from("*"));
        "•" => Dyad, Op(Operation::dyad(log_mold_multi));
        "+" => Dyad, Op(Operation::dyad(add));
        "-" => Dyad, Op(Operation::dyad(subtract));
        "?" => Nilad, Nilad(read_top_input);
    }
}

impl Elements {
    pub fn new() -> Self {
        Elements::default()
    }

    /// Every builtin element
    pub fn standard() -> Self {
        let mut elements = Elements::new();
        for (symbol, arity, implementation) in standard_table() {
            elements.register(Element::builtin(symbol, arity, implementation));
        }
        tracing::debug!(count = elements.len(), "registered standard elements");
        elements
    }

    /// Add `element`, returning the one it replaces
    pub fn register(&mut self, element: Element) -> Option<Element> {
        self.table.insert(element.symbol.clone(), element)
    }

    pub fn get(&self, symbol: &str) -> Option<&Element> {
        self.table.get(symbol)
    }

    pub fn invoke(&self, symbol: &str, stack: &mut Stack, ctx: &Context) -> Result<()> {
        match self.get(symbol) {
            Some(element) => element.invoke(stack, ctx),
            None => Err(RuntimeError::InvalidElement(format!(
                "unknown element {:?}",
                symbol
            ))),
        }
    }

    /// Registered symbols, sorted
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.table.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use terse_core::{ContextConfig, Number};

    fn ctx() -> Context {
        Context::with_source(ContextConfig::new(), Cursor::new(String::new()))
    }

    fn stack_of(values: Vec<Value>) -> Stack {
        let mut stack = Stack::new();
        stack.extend(values);
        stack
    }

    #[test]
    fn test_standard_rows_pass_validation() {
        for (symbol, arity, implementation) in standard_table() {
            let element = Element::new(symbol, implementation, arity.count());
            assert!(element.is_ok(), "{} failed validation: {:?}", symbol, element);
        }
        assert_eq!(Elements::standard().len(), 11);
    }

    #[test]
    fn test_rhs_is_former_top() {
        let elements = Elements::standard();
        let mut stack = stack_of(vec![Value::from(10), Value::from(3)]);
        elements.invoke("-", &mut stack, &ctx()).unwrap();
        assert_eq!(stack.into_vec(), vec![Value::from(7)]);
    }

    #[test]
    fn test_triad_argument_order() {
        let op = Operation::triad(|a, b, c, _| Ok(Value::from(format!("{}{}{}", a, b, c))));
        let element = Element::new("t", Implementation::Operation(op), 3).unwrap();
        let mut stack = stack_of(vec![Value::from("a"), Value::from("b"), Value::from("c")]);
        element.invoke(&mut stack, &ctx()).unwrap();
        assert_eq!(stack.into_vec(), vec![Value::from("abc")]);
    }

    #[test]
    fn test_underflow_leaves_stack_intact() {
        let elements = Elements::standard();
        let mut stack = stack_of(vec![Value::from(1)]);
        let err = elements.invoke("+", &mut stack, &ctx()).unwrap_err();
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
    fn test_constant_and_nilad_pop_nothing() {
        let elements = Elements::standard();
        let ctx = Context::with_source(
            ContextConfig::new().with_input(Value::from(5)),
            Cursor::new(String::new()),
        );
        let mut stack = stack_of(vec![Value::from(1)]);
        elements.invoke("×", &mut stack, &ctx).unwrap();
        elements.invoke("?", &mut stack, &ctx).unwrap();
        assert_eq!(
            stack.into_vec(),
            vec![Value::from(1), Value::from("*"), Value::from(5)]
        );
    }

    #[test]
    fn test_unknown_symbol() {
        let err = Elements::standard()
            .invoke("§", &mut Stack::new(), &ctx())
            .unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidElement(_)));
    }

    #[test]
    fn test_new_rejects_bad_registrations() {
        let plus = || Implementation::Operation(Operation::dyad(add));
        assert!(Element::new("", plus(), 2).is_err());
        assert!(Element::new("abc", plus(), 2).is_err());
        assert!(Element::new(" ", plus(), 2).is_err());
        assert!(Element::new("+", plus(), 1).is_err());
        assert!(Element::new("+", plus(), 4).is_err());
        assert!(Element::new("×", Implementation::Constant(|| Value::from(1)), 1).is_err());
        assert!(Element::new("k+", plus(), 2).is_ok());
    }

    #[test]
    fn test_callable_element() {
        let double = Callable::new(Some("double"), 1, |args, _| {
            let n = args[0].as_number().cloned().unwrap_or_else(Number::zero);
            Ok(Value::Number(n.add(&n)))
        });
        let element = Element::from_callable("d", double).unwrap();
        assert_eq!(element.arity(), Arity::Monad);
        let mut stack = stack_of(vec![Value::from(21)]);
        element.invoke(&mut stack, &ctx()).unwrap();
        assert_eq!(stack.peek(), Some(&Value::from(42)));
    }

    #[test]
    fn test_register_replaces_and_symbols_sorted() {
        let mut elements = Elements::new();
        assert!(elements.is_empty());
        let first = Element::new("+", Implementation::Operation(Operation::dyad(add)), 2).unwrap();
        let second =
            Element::new("+", Implementation::Operation(Operation::dyad(subtract)), 2).unwrap();
        assert!(elements.register(first).is_none());
        assert!(elements.register(second).is_some());
        let zero = Element::new("-", Implementation::Constant(|| Value::from(0)), 0).unwrap();
        elements.register(zero);
        assert_eq!(elements.symbols(), vec!["+", "-"]);
    }
}
