//! Host value model.
//!
//! Keyword arguments carry values from a dynamically-typed host. [`Value`]
//! closes that world into a fixed set of variants so that set membership and
//! type checks are plain comparisons, and [`TypeTag`] names each variant for
//! use in type validators.

use std::borrow::Cow;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A dynamically-typed argument value.
///
/// `Display` renders the value the way the host would inspect it, which is
/// also how values appear in error messages.
///
/// # Examples
///
/// ```
/// use keyword_args_core::{TypeTag, Value};
///
/// assert_eq!(Value::from(17).type_tag(), TypeTag::Integer);
/// assert_eq!(Value::symbol("OK").to_string(), ":OK");
/// assert_eq!(Value::from("hello").to_string(), "\"hello\"");
/// assert_eq!(Value::from(vec![1, 2]).to_string(), "[1, 2]");
/// assert_eq!(Value::range(1, 10).to_string(), "1..10");
/// assert_eq!(Value::Null.to_string(), "nil");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    /// The host's null (`nil`).
    #[default]
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Signed integer scalar.
    Integer(i64),
    /// Floating point scalar.
    Float(f64),
    /// Text string.
    Text(String),
    /// Interned name (e.g. `:ok`).
    Symbol(String),
    /// Ordered sequence of values.
    Sequence(Vec<Value>),
    /// Inclusive integer range (e.g. `1..10`).
    Range {
        /// First element.
        start: i64,
        /// Last element (inclusive).
        end: i64,
    },
}

impl Value {
    /// Creates a symbol value.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Creates a text value.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates a sequence from anything convertible into values.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyword_args_core::Value;
    ///
    /// let seq = Value::seq(["OK", "YY"]);
    /// assert_eq!(seq, Value::Sequence(vec![Value::text("OK"), Value::text("YY")]));
    /// ```
    pub fn seq<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Creates an inclusive integer range.
    pub fn range(start: i64, end: i64) -> Self {
        Self::Range { start, end }
    }

    /// Returns the type discriminant of this value.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::Null,
            Value::Bool(_) => TypeTag::Bool,
            Value::Integer(_) => TypeTag::Integer,
            Value::Float(_) => TypeTag::Float,
            Value::Text(_) => TypeTag::Text,
            Value::Symbol(_) => TypeTag::Symbol,
            Value::Sequence(_) => TypeTag::Sequence,
            Value::Range { .. } => TypeTag::Range,
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value can be iterated element by element.
    ///
    /// Both [`Value::Sequence`] and [`Value::Range`] are sequence-typed.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_) | Value::Range { .. })
    }

    /// Compares values the way the host's `==` does.
    ///
    /// Like `==`, except an integer equals a float with the same numeric
    /// value, also inside sequences.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyword_args_core::Value;
    ///
    /// assert!(Value::from(1).host_eq(&Value::from(1.0)));
    /// assert!(Value::seq([1, 2]).host_eq(&Value::seq([1.0, 2.0])));
    /// assert!(!Value::from(1).host_eq(&Value::from(1.5)));
    /// assert!(!Value::from(1).host_eq(&Value::from("1")));
    /// ```
    pub fn host_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(n), Value::Float(x)) | (Value::Float(x), Value::Integer(n)) => {
                integer_eq_float(*n, *x)
            }
            (Value::Sequence(a), Value::Sequence(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.host_eq(y))
            }
            _ => self == other,
        }
    }

    /// Iterates the elements of a sequence-typed value.
    ///
    /// Returns `None` for scalars. Range elements are produced lazily as
    /// [`Value::Integer`].
    ///
    /// # Examples
    ///
    /// ```
    /// use keyword_args_core::Value;
    ///
    /// let items: Vec<Value> = Value::range(1, 3)
    ///     .elements()
    ///     .unwrap()
    ///     .map(|v| v.into_owned())
    ///     .collect();
    /// assert_eq!(items, vec![Value::from(1), Value::from(2), Value::from(3)]);
    ///
    /// assert!(Value::from(3).elements().is_none());
    /// ```
    pub fn elements(&self) -> Option<Elements<'_>> {
        match self {
            Value::Sequence(items) => Some(Elements::Sequence(items.iter())),
            Value::Range { start, end } => Some(Elements::Range(*start..=*end)),
            _ => None,
        }
    }

    /// Returns the integer payload, if any.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text payload, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the symbol name, if any.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }
}

/// Exact comparison; `2^63` is out of range even though `i64::MAX as f64`
/// rounds to it.
fn integer_eq_float(n: i64, x: f64) -> bool {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    x.fract() == 0.0 && (-LIMIT..LIMIT).contains(&x) && x as i64 == n
}

/// Iterator over the elements of a sequence-typed [`Value`].
#[derive(Debug, Clone)]
pub enum Elements<'a> {
    /// Borrowed elements of a [`Value::Sequence`].
    Sequence(std::slice::Iter<'a, Value>),
    /// Integers produced from a [`Value::Range`].
    Range(RangeInclusive<i64>),
}

impl<'a> Iterator for Elements<'a> {
    type Item = Cow<'a, Value>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Elements::Sequence(iter) => iter.next().map(Cow::Borrowed),
            Elements::Range(range) => range.next().map(|n| Cow::Owned(Value::Integer(n))),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::Symbol(s) => write!(f, ":{s}"),
            Value::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Range { start, end } => write!(f, "{start}..{end}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::seq(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

/// Type discriminant of a [`Value`].
///
/// Used by [`Validator::InstanceOf`](crate::Validator::InstanceOf). Matching
/// is exact: a [`TypeTag::Sequence`] validator does not accept a range.
///
/// # Examples
///
/// ```
/// use keyword_args_core::TypeTag;
///
/// assert_eq!("Integer".parse::<TypeTag>().unwrap(), TypeTag::Integer);
/// assert_eq!("String".parse::<TypeTag>().unwrap(), TypeTag::Text);
/// assert!("Widget".parse::<TypeTag>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    /// [`Value::Null`]
    Null,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Integer`]
    Integer,
    /// [`Value::Float`]
    Float,
    /// [`Value::Text`]
    Text,
    /// [`Value::Symbol`]
    Symbol,
    /// [`Value::Sequence`]
    Sequence,
    /// [`Value::Range`]
    Range,
}

impl TypeTag {
    /// Canonical name of the tag.
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Null => "Null",
            TypeTag::Bool => "Bool",
            TypeTag::Integer => "Integer",
            TypeTag::Float => "Float",
            TypeTag::Text => "Text",
            TypeTag::Symbol => "Symbol",
            TypeTag::Sequence => "Sequence",
            TypeTag::Range => "Range",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unrecognized [`TypeTag`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown type tag: {0}")]
pub struct UnknownTypeTag(pub String);

impl FromStr for TypeTag {
    type Err = UnknownTypeTag;

    /// Accepts canonical names plus the common host aliases
    /// (`Nil`, `Boolean`, `String`, `Array`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Null" | "Nil" => Ok(TypeTag::Null),
            "Bool" | "Boolean" => Ok(TypeTag::Bool),
            "Integer" => Ok(TypeTag::Integer),
            "Float" => Ok(TypeTag::Float),
            "Text" | "String" => Ok(TypeTag::Text),
            "Symbol" => Ok(TypeTag::Symbol),
            "Sequence" | "Array" => Ok(TypeTag::Sequence),
            "Range" => Ok(TypeTag::Range),
            other => Err(UnknownTypeTag(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_formatting() {
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(
            Value::seq(vec![Value::text("OK"), Value::from(3)]).to_string(),
            "[\"OK\", 3]"
        );
        assert_eq!(Value::seq(Vec::<Value>::new()).to_string(), "[]");
    }

    #[test]
    fn test_sequence_detection() {
        assert!(Value::seq([1, 2, 3]).is_sequence());
        assert!(Value::range(1, 10).is_sequence());
        assert!(!Value::from("abc").is_sequence());
        assert!(!Value::Null.is_sequence());
    }

    #[test]
    fn test_host_eq_is_exact_at_the_edges() {
        assert!(Value::from(i64::MIN).host_eq(&Value::Float(i64::MIN as f64)));
        assert!(!Value::from(i64::MAX).host_eq(&Value::Float(i64::MAX as f64)));
        assert!(!Value::from(0).host_eq(&Value::Float(f64::NAN)));
        assert!(!Value::Float(f64::NAN).host_eq(&Value::Float(f64::NAN)));
        assert!(Value::symbol("a").host_eq(&Value::symbol("a")));
    }

    #[test]
    fn test_range_elements_are_integers() {
        let items: Vec<Value> = Value::range(-1, 1)
            .elements()
            .unwrap()
            .map(Cow::into_owned)
            .collect();
        assert_eq!(items, vec![Value::from(-1), Value::from(0), Value::from(1)]);
    }

    #[test]
    fn test_empty_range_has_no_elements() {
        assert_eq!(Value::range(5, 1).elements().unwrap().count(), 0);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::text("x"));
    }

    #[test]
    fn test_type_tag_roundtrip_through_name() {
        for tag in [
            TypeTag::Null,
            TypeTag::Bool,
            TypeTag::Integer,
            TypeTag::Float,
            TypeTag::Text,
            TypeTag::Symbol,
            TypeTag::Sequence,
            TypeTag::Range,
        ] {
            assert_eq!(tag.name().parse::<TypeTag>(), Ok(tag));
        }
    }

    #[test]
    fn test_unknown_type_tag() {
        assert_eq!(
            "Widget".parse::<TypeTag>(),
            Err(UnknownTypeTag("Widget".to_string()))
        );
    }
}
