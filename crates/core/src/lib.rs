//! Terse Core: the value model shared by the Terse runtime
//!
//! Key design principles:
//! - Value: What the language talks about (Number, Text, Sequence, Function)
//! - Tag: the coarse category dispatch tables are keyed on, never used for arithmetic
//! - Sequence: eager buffer or lazy factory, re-iterable from scratch
//! - Context: per-run ambient state, passed explicitly to every element call
//!
//! # Modules
//!
//! - `error`: The `RuntimeError` type shared by dispatch and elements
//! - `number`: Exact rational / complex numbers
//! - `value`: Value enum, Callable, type tags
//! - `sequence`: Eager and lazy sequences
//! - `context`: Execution Context with scoped input override
//! - `stack`: Operand stack with underflow-checked pops

pub mod context;
pub mod error;
pub mod number;
pub mod sequence;
pub mod stack;
pub mod value;

pub use context::{Context, ContextConfig, NumberIteration, TopInputScope};
pub use error::{Result, RuntimeError};
pub use number::Number;
pub use sequence::{SeqIter, Sequence};
pub use stack::Stack;
pub use value::{Callable, HostKind, Tag, TagMode, Value, type_tag, type_tag_pair, type_tag_triple};
