//! Validated, defaulted keyword arguments.

use std::ops::{Index, RangeInclusive};

use serde::Serialize;

use crate::{AccessError, Kwargs, Value};

static NIL: Value = Value::Null;

/// Output of a successful validation.
///
/// Holds the final value of every supplied or defaulted argument, plus any
/// passthrough keys admitted by `OTHERS`. Values are reachable two ways:
///
/// - key lookup ([`get`](Self::get), indexing) works for every stored key;
/// - accessors ([`accessor`](Self::accessor), [`get_as`](Self::get_as)) exist
///   only for declared names and yield `nil` for declared names that were
///   neither supplied nor defaulted.
///
/// Results serialize for rendering but cannot be deserialized; the only way
/// to obtain one is to validate.
///
/// # Examples
///
/// ```
/// use keyword_args_core::{AccessError, Declaration, Kwargs, Value};
///
/// let args = Kwargs::new()
///     .with("a", 17)
///     .with("extra", "whatever")
///     .validate(&Declaration::new().args(["a", "b", "OTHERS"]))
///     .unwrap();
///
/// assert_eq!(args.get_as::<i64>("a"), Ok(17));
/// assert_eq!(args.accessor("b"), Ok(&Value::Null));
/// assert!(!args.contains_key("b"));
///
/// assert_eq!(args["extra"], Value::from("whatever"));
/// assert_eq!(
///     args.accessor("extra"),
///     Err(AccessError::UnknownAccessor("extra".into()))
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    values: Kwargs,
    declared: Vec<String>,
}

impl ValidationResult {
    pub(crate) fn new(values: Kwargs, declared: Vec<String>) -> Self {
        Self { values, declared }
    }

    /// Looks up a stored value by key, including passthrough keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns `true` if a value is stored under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns `true` if `name` was declared and so has an accessor.
    pub fn has_accessor(&self, name: &str) -> bool {
        self.declared.iter().any(|d| d == name)
    }

    /// Reads a declared argument.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::UnknownAccessor`] if `name` was not declared.
    pub fn accessor(&self, name: &str) -> Result<&Value, AccessError> {
        if !self.has_accessor(name) {
            return Err(AccessError::UnknownAccessor(name.to_string()));
        }
        Ok(self.values.get(name).unwrap_or(&NIL))
    }

    /// Reads a declared argument and converts it to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::UnknownAccessor`] if `name` was not declared and
    /// [`AccessError::TypeMismatch`] if the stored value is not a `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyword_args_core::{AccessError, Declaration, Kwargs, TypeTag};
    ///
    /// let args = Kwargs::new()
    ///     .with("name", "hello")
    ///     .validate(&Declaration::new().args(["name", "age"]))
    ///     .unwrap();
    ///
    /// assert_eq!(args.get_as::<String>("name").unwrap(), "hello");
    /// assert_eq!(args.get_as::<Option<i64>>("age"), Ok(None));
    /// assert!(matches!(
    ///     args.get_as::<i64>("name"),
    ///     Err(AccessError::TypeMismatch { found: TypeTag::Text, .. })
    /// ));
    /// ```
    pub fn get_as<T: FromValue>(&self, name: &str) -> Result<T, AccessError> {
        let value = self.accessor(name)?;
        T::from_value(value).ok_or_else(|| AccessError::TypeMismatch {
            name: name.to_string(),
            expected: T::EXPECTED,
            found: value.type_tag(),
        })
    }

    /// Declared names, in declaration order.
    pub fn declared_names(&self) -> impl Iterator<Item = &str> {
        self.declared.iter().map(String::as_str)
    }

    /// Stored entries: defaults first in declaration order, then supplied
    /// keys in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrows the underlying mapping.
    pub fn as_kwargs(&self) -> &Kwargs {
        &self.values
    }

    /// Consumes the result, returning the underlying mapping.
    pub fn into_kwargs(self) -> Kwargs {
        self.values
    }
}

impl Index<&str> for ValidationResult {
    type Output = Value;

    /// Key lookup; absent keys read as `nil`.
    fn index(&self, key: &str) -> &Value {
        self.values.get(key).unwrap_or(&NIL)
    }
}

/// Checked conversion out of a [`Value`] for typed accessors.
pub trait FromValue: Sized {
    /// Description of the accepted type, used in mismatch errors.
    const EXPECTED: &'static str;

    /// Converts `value`, or returns `None` when the type does not match.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any value";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "Integer";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_integer()
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "Float";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "Bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "Text";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_text().map(String::from)
    }
}

impl FromValue for Vec<Value> {
    const EXPECTED: &'static str = "Sequence";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Sequence(items) => Some(items.clone()),
            _ => None,
        }
    }
}

/// Ranges stay lazy; read them with this rather than as `Vec<Value>`.
impl FromValue for RangeInclusive<i64> {
    const EXPECTED: &'static str = "Range";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Range { start, end } => Some(*start..=*end),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return Some(None);
        }
        T::from_value(value).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use crate::TypeTag;

    use super::*;

    fn sample() -> ValidationResult {
        ValidationResult::new(
            Kwargs::new()
                .with("n", 3)
                .with("x", 1.5)
                .with("flag", true)
                .with("items", Value::range(1, 3))
                .with("extra", "passthrough"),
            vec!["n".into(), "x".into(), "flag".into(), "items".into(), "absent".into()],
        )
    }

    #[test]
    fn test_typed_accessors() {
        let result = sample();
        assert_eq!(result.get_as::<i64>("n"), Ok(3));
        assert_eq!(result.get_as::<f64>("x"), Ok(1.5));
        assert_eq!(result.get_as::<bool>("flag"), Ok(true));
        assert_eq!(result.get_as::<RangeInclusive<i64>>("items"), Ok(1..=3));
        assert_eq!(result.get_as::<Value>("absent"), Ok(Value::Null));
    }

    #[test]
    fn test_wide_range_is_not_expanded() {
        let result = ValidationResult::new(
            Kwargs::new().with("items", Value::range(0, i64::MAX)),
            vec!["items".into()],
        );
        assert_eq!(
            result.get_as::<RangeInclusive<i64>>("items"),
            Ok(0..=i64::MAX)
        );
        assert_eq!(
            result.get_as::<Vec<Value>>("items"),
            Err(AccessError::TypeMismatch {
                name: "items".into(),
                expected: "Sequence",
                found: TypeTag::Range,
            })
        );
    }

    #[test]
    fn test_type_mismatch_reports_found_tag() {
        let result = sample();
        assert_eq!(
            result.get_as::<String>("n"),
            Err(AccessError::TypeMismatch {
                name: "n".into(),
                expected: "Text",
                found: TypeTag::Integer,
            })
        );
        assert!(result.get_as::<i64>("absent").is_err());
        assert_eq!(result.get_as::<Option<i64>>("absent"), Ok(None));
    }

    #[test]
    fn test_passthrough_has_no_accessor() {
        let result = sample();
        assert!(!result.has_accessor("extra"));
        assert_eq!(result.get("extra"), Some(&Value::from("passthrough")));
        assert_eq!(
            result.get_as::<String>("extra"),
            Err(AccessError::UnknownAccessor("extra".into()))
        );
    }

    #[test]
    fn test_index_reads_nil_for_missing() {
        let result = sample();
        assert_eq!(result["absent"], Value::Null);
        assert_eq!(result["nowhere"], Value::Null);
        assert_eq!(result["n"], Value::from(3));
    }
}
