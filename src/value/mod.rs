//! Value Module
//!
//! Heterogeneous values stored in a cache. Primitive kinds (booleans,
//! numbers, strings) are held by value; reference kinds (tables, functions,
//! userdata) are shared handles compared by identity, and only they can be
//! reclaimed once nobody owns them.

mod key;

use std::any::Any;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::cache::{Table, WeakTable};

pub use key::Key;
pub(crate) use key::KeyId;

type Callable = dyn Fn(&[Value]) -> Value;

// == Value ==
/// A dynamically typed cache key or value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Boolean(bool),
    Number(f64),
    String(Rc<str>),
    Table(Table),
    Function(Function),
    Userdata(Userdata),
}

impl Value {
    /// Returns the kind name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Table(_) => "table",
            Value::Function(_) => "function",
            Value::Userdata(_) => "userdata",
        }
    }

    /// Returns true for kinds that stop existing once their last owner drops them.
    pub fn is_collectable(&self) -> bool {
        matches!(self, Value::Table(_) | Value::Function(_) | Value::Userdata(_))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_userdata(&self) -> Option<&Userdata> {
        match self {
            Value::Userdata(u) => Some(u),
            _ => None,
        }
    }

    /// Heap address of a reference kind, `None` for primitives.
    pub(crate) fn address(&self) -> Option<usize> {
        match self {
            Value::Table(t) => Some(t.address()),
            Value::Function(f) => Some(f.address()),
            Value::Userdata(u) => Some(u.address()),
            _ => None,
        }
    }

    /// Non-owning handle to a reference kind, `None` for primitives.
    pub(crate) fn downgrade(&self) -> Option<WeakRef> {
        match self {
            Value::Table(t) => Some(WeakRef::Table(t.downgrade())),
            Value::Function(f) => Some(WeakRef::Function(Rc::downgrade(&f.0))),
            Value::Userdata(u) => Some(WeakRef::Userdata(Rc::downgrade(&u.0))),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => match (self.address(), other.address()) {
                (Some(a), Some(b)) => a == b && self.type_name() == other.type_name(),
                _ => false,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => fmt_number(*n, f),
            Value::String(s) => f.write_str(s),
            other => write!(
                f,
                "{}: {:#x}",
                other.type_name(),
                other.address().unwrap_or_default()
            ),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            other => fmt::Display::fmt(other, f),
        }
    }
}

/// Integral numbers print without a fractional part.
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("nan")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "inf" } else { "-inf" })
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{}", n)
    }
}

// == Conversions ==
macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i32, i64, u32, u64, usize, f32, f64);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<Table> for Value {
    fn from(t: Table) -> Self {
        Value::Table(t)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<Userdata> for Value {
    fn from(u: Userdata) -> Self {
        Value::Userdata(u)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Nil)
    }
}

impl From<Key> for Value {
    fn from(k: Key) -> Self {
        k.into_value()
    }
}

// == Function ==
/// A shared callable.
#[derive(Clone)]
pub struct Function(Rc<Callable>);

impl Function {
    pub fn new(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// A function that ignores its arguments and returns nil.
    pub fn noop() -> Self {
        Self::new(|_| Value::Nil)
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        self.address() == other.address()
    }

    pub(crate) fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function: {:#x}", self.address())
    }
}

// == Userdata ==
/// A shared opaque host object.
#[derive(Clone)]
pub struct Userdata(Rc<dyn Any>);

impl Userdata {
    pub fn new<T: Any>(value: T) -> Self {
        Self(Rc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    pub fn ptr_eq(&self, other: &Userdata) -> bool {
        self.address() == other.address()
    }

    pub(crate) fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for Userdata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "userdata: {:#x}", self.address())
    }
}

// == Weak Reference ==
/// Non-owning handle to a reference-kind value.
#[derive(Clone)]
pub(crate) enum WeakRef {
    Table(WeakTable),
    Function(Weak<Callable>),
    Userdata(Weak<dyn Any>),
}

impl WeakRef {
    /// Recovers the value if some owner still holds it.
    pub(crate) fn upgrade(&self) -> Option<Value> {
        match self {
            WeakRef::Table(t) => t.upgrade().map(Value::Table),
            WeakRef::Function(f) => f.upgrade().map(|f| Value::Function(Function(f))),
            WeakRef::Userdata(u) => u.upgrade().map(|u| Value::Userdata(Userdata(u))),
        }
    }

    pub(crate) fn is_live(&self) -> bool {
        match self {
            WeakRef::Table(t) => t.is_live(),
            WeakRef::Function(f) => f.strong_count() > 0,
            WeakRef::Userdata(u) => u.strong_count() > 0,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Nil.type_name(), "nil");
        assert_eq!(Value::from(true).type_name(), "boolean");
        assert_eq!(Value::from(1).type_name(), "number");
        assert_eq!(Value::from("x").type_name(), "string");
        assert_eq!(Value::from(Table::new()).type_name(), "table");
        assert_eq!(Value::from(Function::noop()).type_name(), "function");
        assert_eq!(Value::from(Userdata::new(5u8)).type_name(), "userdata");
    }

    #[test]
    fn test_collectable_kinds() {
        assert!(!Value::Nil.is_collectable());
        assert!(!Value::from(false).is_collectable());
        assert!(!Value::from(3.5).is_collectable());
        assert!(!Value::from("text").is_collectable());
        assert!(Value::from(Table::new()).is_collectable());
        assert!(Value::from(Function::noop()).is_collectable());
        assert!(Value::from(Userdata::new("handle")).is_collectable());
    }

    #[test]
    fn test_number_display() {
        assert_eq!(Value::from(1).to_string(), "1");
        assert_eq!(Value::from(-1).to_string(), "-1");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(f64::INFINITY).to_string(), "inf");
        assert_eq!(Value::from(f64::NEG_INFINITY).to_string(), "-inf");
        assert_eq!(Value::from(f64::NAN).to_string(), "nan");
    }

    #[test]
    fn test_reference_display_includes_kind() {
        let t = Value::from(Table::new());
        assert!(t.to_string().starts_with("table: 0x"));
        let f = Value::from(Function::noop());
        assert!(f.to_string().starts_with("function: 0x"));
    }

    #[test]
    fn test_reference_equality_is_identity() {
        let a = Table::new();
        let b = Table::new();
        assert_eq!(Value::from(a.clone()), Value::from(a.clone()));
        assert_ne!(Value::from(a), Value::from(b));

        let f = Function::noop();
        assert_eq!(Value::from(f.clone()), Value::from(f));
        assert_ne!(Value::from(Function::noop()), Value::from(Function::noop()));
    }

    #[test]
    fn test_primitive_equality_is_by_value() {
        assert_eq!(Value::from("a"), Value::from(String::from("a")));
        assert_eq!(Value::from(2), Value::from(2.0));
        assert_ne!(Value::from(1), Value::from("1"));
        assert_eq!(Value::Nil, Value::from(None::<i32>));
    }

    #[test]
    fn test_weak_ref_dies_with_last_owner() {
        let f = Value::from(Function::new(|args| args.first().cloned().unwrap_or_default()));
        let weak = f.downgrade().unwrap();
        assert!(weak.is_live());
        assert!(weak.upgrade().is_some());

        drop(f);
        assert!(!weak.is_live());
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_primitives_have_no_weak_ref() {
        assert!(Value::from(1).downgrade().is_none());
        assert!(Value::from("s").downgrade().is_none());
    }

    #[test]
    fn test_function_call_and_userdata_downcast() {
        let double = Function::new(|args| {
            Value::from(args[0].as_number().unwrap_or_default() * 2.0)
        });
        assert_eq!(double.call(&[Value::from(21)]), Value::from(42));

        let handle = Userdata::new(String::from("socket"));
        assert_eq!(handle.downcast_ref::<String>().unwrap(), "socket");
        assert!(handle.downcast_ref::<u32>().is_none());
    }
}
