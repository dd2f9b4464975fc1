//! Execution Context
//!
//! One `Context` is built per program run and handed by reference to every
//! element call. It is a cheap handle over shared state, so lazy sequences
//! produced by vectorisation can keep it and apply operators when iterated.
//!
//! # Input levels
//!
//! Inputs are organised as a stack of levels. Level 0 holds the program's
//! inputs; calling a user function pushes a level with its arguments. A read
//! takes from the innermost level, or from level 0 while the top-input
//! override is active. An empty level falls back to the external input
//! source, one line per read.
//!
//! # Scoped override
//!
//! The override is only ever set through [`Context::top_input_scope`] or
//! [`Context::with_top_input`]; the prior value is restored when the scope
//! ends, including when the body fails.

use crate::error::Result;
use crate::number::Number;
use crate::value::Value;
use std::cell::RefCell;
use std::fmt;
use std::io::BufRead;
use std::rc::Rc;

/// How a Number is coerced when an element iterates over it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberIteration {
    /// Iterate the characters of its decimal form (`123` -> 1, 2, 3)
    #[default]
    Digits,
    /// Iterate `1..=n`
    Range,
}

/// Per-run configuration used to build a [`Context`]
#[derive(Debug, Clone, Default)]
pub struct ContextConfig {
    /// Number coercion policy for iteration
    pub number_iteration: NumberIteration,

    /// Program inputs (input level 0)
    pub inputs: Vec<Value>,
}

impl ContextConfig {
    pub fn new() -> Self {
        ContextConfig::default()
    }

    pub fn with_number_iteration(mut self, policy: NumberIteration) -> Self {
        self.number_iteration = policy;
        self
    }

    pub fn with_input(mut self, value: impl Into<Value>) -> Self {
        self.inputs.push(value.into());
        self
    }

    pub fn with_inputs(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.inputs.extend(values);
        self
    }
}

struct InputLevel {
    values: Vec<Value>,
    cursor: usize,
}

impl InputLevel {
    fn new(values: Vec<Value>) -> Self {
        InputLevel { values, cursor: 0 }
    }
}

struct State {
    levels: Vec<InputLevel>,
    use_top_input: bool,
    number_iteration: NumberIteration,
    source: Box<dyn BufRead>,
}

#[derive(Clone)]
pub struct Context {
    state: Rc<RefCell<State>>,
}

impl Context {
    /// Context reading fallback input from stdin
    pub fn new(config: ContextConfig) -> Self {
        Context::with_source(config, std::io::BufReader::new(std::io::stdin()))
    }

    /// Context reading fallback input from `source`
    pub fn with_source(config: ContextConfig, source: impl BufRead + 'static) -> Self {
        Context {
            state: Rc::new(RefCell::new(State {
                levels: vec![InputLevel::new(config.inputs)],
                use_top_input: false,
                number_iteration: config.number_iteration,
                source: Box::new(source),
            })),
        }
    }

    pub fn use_top_input(&self) -> bool {
        self.state.borrow().use_top_input
    }

    pub fn number_iteration(&self) -> NumberIteration {
        self.state.borrow().number_iteration
    }

    /// Enable the top-input override until the returned guard is dropped
    pub fn top_input_scope(&self) -> TopInputScope {
        let prior = std::mem::replace(&mut self.state.borrow_mut().use_top_input, true);
        TopInputScope {
            ctx: self.clone(),
            prior,
        }
    }

    /// Run `f` with the top-input override enabled
    pub fn with_top_input<T>(&self, f: impl FnOnce(&Context) -> T) -> T {
        let _scope = self.top_input_scope();
        f(self)
    }

    /// Push an input level (arguments of a user function call)
    pub fn push_inputs(&self, values: Vec<Value>) {
        self.state.borrow_mut().levels.push(InputLevel::new(values));
    }

    /// Pop the innermost input level; the program level is never removed
    pub fn pop_inputs(&self) -> Option<Vec<Value>> {
        let mut state = self.state.borrow_mut();
        if state.levels.len() > 1 {
            state.levels.pop().map(|level| level.values)
        } else {
            None
        }
    }

    /// Read the next input value
    ///
    /// Values of the selected level are handed out cyclically. With no
    /// values at that level, one line is read from the input source: a
    /// numeric line becomes a Number, anything else Text. EOF reads as `0`.
    pub fn get_input(&self) -> Result<Value> {
        let mut state = self.state.borrow_mut();
        let index = if state.use_top_input {
            0
        } else {
            state.levels.len() - 1
        };

        let level = &mut state.levels[index];
        if !level.values.is_empty() {
            let value = level.values[level.cursor % level.values.len()].clone();
            level.cursor += 1;
            tracing::trace!(level = index, "input taken from pending inputs");
            return Ok(value);
        }

        let mut line = String::new();
        let read = state.source.read_line(&mut line)?;
        if read == 0 {
            tracing::debug!("input source exhausted");
            return Ok(Value::from(0));
        }
        let line = line.trim_end_matches(['\n', '\r']);
        tracing::trace!(line, "input read from source");
        Ok(match Number::parse_literal(line) {
            Some(n) => Value::Number(n),
            None => Value::text(line),
        })
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new(ContextConfig::default())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Context")
            .field("levels", &state.levels.len())
            .field("use_top_input", &state.use_top_input)
            .field("number_iteration", &state.number_iteration)
            .finish_non_exhaustive()
    }
}

/// Guard restoring the previous top-input flag on drop
#[must_use = "the override ends as soon as the scope guard is dropped"]
pub struct TopInputScope {
    ctx: Context,
    prior: bool,
}

impl Drop for TopInputScope {
    fn drop(&mut self) {
        self.ctx.state.borrow_mut().use_top_input = self.prior;
    }
}
