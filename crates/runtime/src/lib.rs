//! Terse Runtime: element dispatch and vectorisation
//!
//! Key pieces:
//! - Operation: a one, two or three operand operator
//! - vectorise: left-broadcast of an operation over a sequence operand
//! - Element: a symbol bound to an implementation and an arity
//! - Elements: the symbol table an execution backend drives
//!
//! Binary elements match on the `(lhs, rhs)` value pair and send every pair
//! without a direct branch through [`dyad_fallback`].

pub mod arithmetic;
pub mod elements;
pub mod io;
pub mod list_ops;
pub mod logic;
pub mod string_ops;
pub mod vectorise;

pub use elements::{Arity, Element, Elements, Implementation};
pub use vectorise::{
    Operation, dyad_fallback, iterable, safe_apply, vectorise, vectorise_dyad, vectorise_monad,
    vectorise_triad,
};

pub use arithmetic::{add, log_mold_multi, subtract};
pub use io::read_top_input;
pub use list_ops::{mold, splat};
pub use logic::{and, and_flipped, not, or, or_flipped};
