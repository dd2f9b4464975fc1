//! Sequence: the uniform list value
//!
//! A sequence is either an eager, shared buffer or a lazy sequence backed by
//! a factory. Iterating a lazy sequence calls the factory again, so every
//! iteration starts from scratch and independent iterations never interfere.
//! Nothing is memoised between iterations; a sequence that is expensive to
//! produce can be materialised once with [`Sequence::force`].
//!
//! Items of a lazy sequence are `Result`s: an operator failure surfaces at
//! the position where it happens, and [`Sequence::to_vec`] fails as a whole.

use crate::error::{Result, RuntimeError};
use crate::number::Number;
use crate::value::Value;
use num_bigint::BigInt;
use num_traits::One;
use std::fmt;
use std::rc::Rc;

/// A fresh iteration over a sequence
pub type SeqIter = Box<dyn Iterator<Item = Result<Value>>>;

type Factory = dyn Fn() -> SeqIter;

#[derive(Clone)]
pub struct Sequence {
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    Eager(Rc<[Value]>),
    Lazy(Rc<Factory>),
}

impl Sequence {
    pub fn from_vec(items: Vec<Value>) -> Self {
        Sequence {
            repr: Repr::Eager(Rc::from(items)),
        }
    }

    pub fn empty() -> Self {
        Sequence::from_vec(Vec::new())
    }

    /// Wrap a factory producing a fresh iteration each time it is called
    pub fn lazy(factory: impl Fn() -> SeqIter + 'static) -> Self {
        Sequence {
            repr: Repr::Lazy(Rc::new(factory)),
        }
    }

    /// Lazy integers `start..=end` (empty when `start > end`)
    pub fn range_inclusive(start: BigInt, end: BigInt) -> Self {
        Sequence::lazy(move || {
            let end = end.clone();
            let mut next = start.clone();
            Box::new(std::iter::from_fn(move || {
                if next > end {
                    return None;
                }
                let current = next.clone();
                next += BigInt::one();
                Some(Ok::<_, RuntimeError>(Value::Number(
                    Number::from_integer(current),
                )))
            }))
        })
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self.repr, Repr::Lazy(_))
    }

    /// Start a new iteration
    pub fn iter(&self) -> SeqIter {
        match &self.repr {
            Repr::Eager(items) => {
                let items = Rc::clone(items);
                Box::new((0..items.len()).map(move |i| Ok::<_, RuntimeError>(items[i].clone())))
            }
            Repr::Lazy(factory) => factory(),
        }
    }

    /// Item at `index`, forcing evaluation up to that position
    pub fn get(&self, index: usize) -> Result<Option<Value>> {
        match &self.repr {
            Repr::Eager(items) => Ok(items.get(index).cloned()),
            Repr::Lazy(_) => self.iter().nth(index).transpose(),
        }
    }

    /// At most the first `n` items
    pub fn take(&self, n: usize) -> Result<Vec<Value>> {
        self.iter().take(n).collect()
    }

    /// Materialise every item; does not terminate on unbounded sequences
    pub fn to_vec(&self) -> Result<Vec<Value>> {
        match &self.repr {
            Repr::Eager(items) => Ok(items.to_vec()),
            Repr::Lazy(_) => self.iter().collect(),
        }
    }

    /// An eager copy of this sequence
    pub fn force(&self) -> Result<Sequence> {
        match &self.repr {
            Repr::Eager(_) => Ok(self.clone()),
            Repr::Lazy(_) => Ok(Sequence::from_vec(self.to_vec()?)),
        }
    }

    /// Number of items (forces full evaluation of lazy sequences)
    pub fn len(&self) -> Result<usize> {
        match &self.repr {
            Repr::Eager(items) => Ok(items.len()),
            Repr::Lazy(_) => {
                let mut count = 0;
                for item in self.iter() {
                    item?;
                    count += 1;
                }
                Ok(count)
            }
        }
    }

    pub fn is_empty(&self) -> Result<bool> {
        match &self.repr {
            Repr::Eager(items) => Ok(items.is_empty()),
            Repr::Lazy(_) => match self.iter().next() {
                None => Ok(true),
                Some(item) => item.map(|_| false),
            },
        }
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Eager(a), Repr::Eager(b)) => a == b,
            (Repr::Lazy(a), Repr::Lazy(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Eager(items) => f.debug_list().entries(items.iter()).finish(),
            Repr::Lazy(_) => write!(f, "<lazy-sequence>"),
        }
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Eager(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Repr::Lazy(_) => write!(f, "<lazy-sequence>"),
        }
    }
}
