use crate::context::Context;
use crate::error::Result;
use crate::number::Number;
use crate::sequence::Sequence;
use std::fmt;
use std::rc::Rc;

/// Value: What the language talks about
///
/// Text is stored as a shared `Rc<str>` so cloning a value onto the stack or
/// into a lazily captured closure is O(1).
#[derive(Debug, Clone)]
pub enum Value {
    /// Exact rational or complex number
    Number(Number),

    /// Text (a sequence of characters)
    Text(Rc<str>),

    /// Ordered collection of values, eager or lazy
    Sequence(Sequence),

    /// Element or user-defined function
    Function(Callable),
}

impl Value {
    pub fn text(s: impl AsRef<str>) -> Self {
        Value::Text(Rc::from(s.as_ref()))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::Sequence(Sequence::from_vec(items))
    }

    /// Truthiness: zero, empty text and empty sequences are false
    ///
    /// Testing a lazy sequence forces at most its first item.
    pub fn is_truthy(&self) -> Result<bool> {
        Ok(match self {
            Value::Number(n) => !n.is_zero(),
            Value::Text(s) => !s.is_empty(),
            Value::Sequence(seq) => !seq.is_empty()?,
            Value::Function(_) => true,
        })
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::from(b as i64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(Rc::from(s))
    }
}

impl From<Sequence> for Value {
    fn from(seq: Sequence) -> Self {
        Value::Sequence(seq)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

// Sequences compare by content when eager and by identity when lazy,
// so equality never forces an unbounded sequence.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Sequence(seq) => write!(f, "{}", seq),
            Value::Function(c) => write!(f, "{}", c),
        }
    }
}

type CallableBody = dyn Fn(Vec<Value>, &Context) -> Result<Value>;

/// Callable: an arity-tagged function value
///
/// The body receives its arguments in natural left-to-right order.
#[derive(Clone)]
pub struct Callable {
    pub name: Option<Rc<str>>,
    pub arity: usize,
    body: Rc<CallableBody>,
}

impl Callable {
    pub fn new(
        name: Option<&str>,
        arity: usize,
        body: impl Fn(Vec<Value>, &Context) -> Result<Value> + 'static,
    ) -> Self {
        Callable {
            name: name.map(Rc::from),
            arity,
            body: Rc::new(body),
        }
    }

    pub fn call(&self, args: Vec<Value>, ctx: &Context) -> Result<Value> {
        if args.len() != self.arity {
            return Err(crate::error::RuntimeError::Arity {
                expected: self.arity,
                found: args.len(),
            });
        }
        (self.body)(args, ctx)
    }
}

// PartialEq by identity (Rc pointer comparison)
impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "<function {}/{}>", name, self.arity),
            None => write!(f, "<function/{}>", self.arity),
        }
    }
}

/// Coarse runtime category used only to select dispatch behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Number,
    Text,
    Sequence,
    Function,
    /// Finer host-level tag, only produced by [`TagMode::Fine`]
    Host(HostKind),
}

/// Host representations a sequence can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostKind {
    List,
    LazyList,
}

/// Whether eager and lazy sequences should be told apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagMode {
    /// Every sequence is `Tag::Sequence`
    #[default]
    Coarse,
    /// Sequences report their host representation (legacy interop only)
    Fine,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Number => write!(f, "number"),
            Tag::Text => write!(f, "text"),
            Tag::Sequence => write!(f, "sequence"),
            Tag::Function => write!(f, "function"),
            Tag::Host(HostKind::List) => write!(f, "list"),
            Tag::Host(HostKind::LazyList) => write!(f, "lazy list"),
        }
    }
}

/// Map a value to its dispatch tag
///
/// Every numeric representation (integer, rational, complex) is `Number`.
pub fn type_tag(value: &Value, mode: TagMode) -> Tag {
    match value {
        Value::Number(_) => Tag::Number,
        Value::Text(_) => Tag::Text,
        Value::Function(_) => Tag::Function,
        Value::Sequence(seq) => match mode {
            TagMode::Coarse => Tag::Sequence,
            TagMode::Fine if seq.is_lazy() => Tag::Host(HostKind::LazyList),
            TagMode::Fine => Tag::Host(HostKind::List),
        },
    }
}

/// Ordered `(lhs, rhs)` tag pair used as a dispatch key
pub fn type_tag_pair(lhs: &Value, rhs: &Value, mode: TagMode) -> (Tag, Tag) {
    (type_tag(lhs, mode), type_tag(rhs, mode))
}

/// Ordered `(lhs, rhs, third)` tag triple for ternary dispatch
pub fn type_tag_triple(lhs: &Value, rhs: &Value, third: &Value, mode: TagMode) -> (Tag, Tag, Tag) {
    (
        type_tag(lhs, mode),
        type_tag(rhs, mode),
        type_tag(third, mode),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_rational::BigRational;
    use num_traits::{One, Zero};

    #[test]
    fn test_all_numbers_share_a_tag() {
        let int = Value::from(3);
        let ratio = Value::Number(Number::Rational(BigRational::new(1.into(), 3.into())));
        let complex = Value::Number(Number::complex(BigRational::zero(), BigRational::one()));
        for v in [int, ratio, complex] {
            assert_eq!(type_tag(&v, TagMode::Coarse), Tag::Number);
            assert_eq!(type_tag(&v, TagMode::Fine), Tag::Number);
        }
    }

    #[test]
    fn test_coarse_mode_hides_laziness() {
        let eager = Value::list(vec![Value::from(1)]);
        let lazy = Value::Sequence(Sequence::lazy(|| {
            Box::new(std::iter::once(Ok::<_, crate::error::RuntimeError>(
                Value::from(1),
            )))
        }));
        assert_eq!(type_tag(&eager, TagMode::Coarse), Tag::Sequence);
        assert_eq!(type_tag(&lazy, TagMode::Coarse), Tag::Sequence);
        assert_eq!(type_tag(&eager, TagMode::Fine), Tag::Host(HostKind::List));
        assert_eq!(type_tag(&lazy, TagMode::Fine), Tag::Host(HostKind::LazyList));
    }

    #[test]
    fn test_pair_is_ordered() {
        let n = Value::from(1);
        let t = Value::from("a");
        assert_eq!(
            type_tag_pair(&n, &t, TagMode::Coarse),
            (Tag::Number, Tag::Text)
        );
        assert_eq!(
            type_tag_pair(&t, &n, TagMode::Coarse),
            (Tag::Text, Tag::Number)
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::from(0).is_truthy().unwrap());
        assert!(Value::from(-1).is_truthy().unwrap());
        assert!(!Value::from("").is_truthy().unwrap());
        assert!(Value::from("0").is_truthy().unwrap());
        assert!(!Value::list(vec![]).is_truthy().unwrap());
        assert!(Value::list(vec![Value::from(0)]).is_truthy().unwrap());
    }

    #[test]
    fn test_callable_checks_arity() {
        let ctx = Context::default();
        let double = Callable::new(Some("double"), 1, |args, _ctx| {
            let n = args[0].as_number().cloned().unwrap_or_else(Number::zero);
            Ok(Value::Number(n.add(&n)))
        });
        assert_eq!(
            double.call(vec![Value::from(4)], &ctx).unwrap(),
            Value::from(8)
        );
        assert!(double.call(vec![], &ctx).is_err());
        assert_eq!(double.to_string(), "<function double/1>");
    }

    #[test]
    fn test_callable_equality_is_identity() {
        let a = Callable::new(None, 0, |_, _| Ok(Value::from(1)));
        let b = Callable::new(None, 0, |_, _| Ok(Value::from(1)));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
