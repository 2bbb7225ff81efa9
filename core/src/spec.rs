//! Per-argument specifications and the shorthand forms that expand into them.
//!
//! An [`ArgSpec`] is the fully resolved description of one keyword argument.
//! Callers rarely build one field by field; instead they use the named
//! constructors ([`ArgSpec::required`], [`ArgSpec::one_of`], ...) or declare a
//! [`Shorthand`] and let [`Shorthand::resolve`] expand it.

use serde::{Deserialize, Serialize};

use crate::{TypeTag, Value};

/// Check applied to each (element of a) supplied value.
///
/// # Examples
///
/// ```
/// use keyword_args_core::{TypeTag, Validator, Value};
///
/// assert!(Validator::Any.accepts(&Value::Null));
///
/// let set = Validator::OneOf(vec![Value::symbol("OK"), Value::symbol("GOOD")]);
/// assert!(set.accepts(&Value::symbol("OK")));
/// assert!(!set.accepts(&Value::symbol("BAD")));
///
/// let ty = Validator::InstanceOf(TypeTag::Integer);
/// assert!(ty.accepts(&Value::from(17)));
/// assert!(!ty.accepts(&Value::from("hello")));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Validator {
    /// Every value passes.
    #[default]
    Any,
    /// Value must equal one of the listed values.
    OneOf(Vec<Value>),
    /// Value must have exactly this type.
    InstanceOf(TypeTag),
}

impl Validator {
    /// Returns `true` if `value` satisfies this validator.
    ///
    /// `OneOf` membership uses [`Value::host_eq`], so `1` matches `1.0`.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Validator::Any => true,
            Validator::OneOf(allowed) => allowed.iter().any(|member| member.host_eq(value)),
            Validator::InstanceOf(tag) => value.type_tag() == *tag,
        }
    }

    /// Returns `true` if every integer in `start..=end` satisfies this
    /// validator.
    ///
    /// Runs without walking the range unless it is no wider than a `OneOf`
    /// set, so the cost never depends on the range's width.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyword_args_core::{TypeTag, Validator, Value};
    ///
    /// assert!(Validator::InstanceOf(TypeTag::Integer).accepts_range(0, i64::MAX));
    /// assert!(!Validator::InstanceOf(TypeTag::Text).accepts_range(1, 3));
    /// assert!(Validator::InstanceOf(TypeTag::Text).accepts_range(3, 1));
    ///
    /// let set = Validator::OneOf(vec![Value::from(1), Value::from(2)]);
    /// assert!(set.accepts_range(1, 2));
    /// assert!(!set.accepts_range(0, i64::MAX));
    /// ```
    pub fn accepts_range(&self, start: i64, end: i64) -> bool {
        if start > end {
            return true;
        }
        match self {
            Validator::Any => true,
            Validator::InstanceOf(tag) => *tag == TypeTag::Integer,
            // Each member equals at most one integer.
            Validator::OneOf(allowed) => {
                end.abs_diff(start) < allowed.len() as u64
                    && (start..=end).all(|n| self.accepts(&Value::Integer(n)))
            }
        }
    }
}

/// Resolved specification for a single keyword argument.
///
/// # Examples
///
/// ```
/// use keyword_args_core::{ArgSpec, TypeTag, Validator, Value};
///
/// let spec = ArgSpec::of_type(TypeTag::Integer).allow_nil();
/// assert!(!spec.required);
/// assert!(spec.allow_nil);
/// assert_eq!(spec.validator, Validator::InstanceOf(TypeTag::Integer));
///
/// let tags = ArgSpec::enumerable_of(TypeTag::Text);
/// assert!(tags.enumerable);
/// assert_eq!(tags.default, Some(Value::Sequence(vec![])));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArgSpec {
    /// Fail when the argument is neither supplied nor defaulted.
    pub required: bool,
    /// Value seeded into the result when the caller omits the argument.
    pub default: Option<Value>,
    /// Check applied to the value or to each element.
    pub validator: Validator,
    /// `nil` bypasses the validator.
    pub allow_nil: bool,
    /// The value is a sequence whose elements are validated individually;
    /// scalars are coerced into a one-element sequence.
    pub enumerable: bool,
}

impl ArgSpec {
    /// Optional argument with no default and no validation.
    pub fn optional() -> Self {
        Self::default()
    }

    /// Required argument with no validation.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    /// Enumerable argument accepting any elements, defaulting to `[]`.
    pub fn enumerable() -> Self {
        Self {
            enumerable: true,
            default: Some(Value::Sequence(Vec::new())),
            ..Self::default()
        }
    }

    /// Enumerable argument whose elements must all have type `tag`.
    pub fn enumerable_of(tag: TypeTag) -> Self {
        Self {
            validator: Validator::InstanceOf(tag),
            ..Self::enumerable()
        }
    }

    /// Optional argument restricted to a set of values.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyword_args_core::{ArgSpec, Validator, Value};
    ///
    /// let spec = ArgSpec::one_of([Value::symbol("x"), Value::symbol("y")]);
    /// assert!(spec.validator.accepts(&Value::symbol("x")));
    /// ```
    pub fn one_of<I, T>(allowed: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self {
            validator: Validator::OneOf(allowed.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Optional argument restricted to one type.
    pub fn of_type(tag: TypeTag) -> Self {
        Self {
            validator: Validator::InstanceOf(tag),
            ..Self::default()
        }
    }

    /// Optional argument with a default value.
    pub fn with_default(value: impl Into<Value>) -> Self {
        Self {
            default: Some(value.into()),
            ..Self::default()
        }
    }

    /// Sets the default value.
    pub fn default_to(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Marks as required.
    pub fn require(mut self) -> Self {
        self.required = true;
        self
    }

    /// Lets `nil` bypass the validator.
    pub fn allow_nil(mut self) -> Self {
        self.allow_nil = true;
        self
    }

    /// Returns `true` if `value` passes this spec, honoring `allow_nil`.
    pub fn accepts(&self, value: &Value) -> bool {
        (self.allow_nil && value.is_null()) || self.validator.accepts(value)
    }
}

/// Long-form specification object.
///
/// Each field maps onto the [`ArgSpec`] field of the same meaning. An
/// enumerable spec without an explicit default defaults to `[]`.
///
/// # Examples
///
/// ```
/// use keyword_args_core::{ArgSpec, SpecFields, TypeTag, Validator, Value};
///
/// let spec = ArgSpec::from(SpecFields {
///     valid: Validator::InstanceOf(TypeTag::Text),
///     enumerable: true,
///     ..SpecFields::default()
/// });
/// assert_eq!(spec.default, Some(Value::Sequence(vec![])));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpecFields {
    /// Value set or type; [`Validator::Any`] when absent.
    #[serde(default)]
    pub valid: Validator,
    /// Default value.
    #[serde(default)]
    pub default: Option<Value>,
    /// Required flag.
    #[serde(default)]
    pub required: bool,
    /// Allow `nil` regardless of `valid`.
    #[serde(default)]
    pub allow_nil: bool,
    /// Enumerable flag.
    #[serde(default)]
    pub enumerable: bool,
}

impl From<SpecFields> for ArgSpec {
    fn from(fields: SpecFields) -> Self {
        let default = match fields.default {
            None if fields.enumerable => Some(Value::Sequence(Vec::new())),
            other => other,
        };
        Self {
            required: fields.required,
            default,
            validator: fields.valid,
            allow_nil: fields.allow_nil,
            enumerable: fields.enumerable,
        }
    }
}

/// Compact declared value for one argument name.
///
/// Each variant corresponds to one way a caller may describe an argument;
/// [`resolve`](Shorthand::resolve) expands it into an [`ArgSpec`].
///
/// | Shorthand | Resolved spec |
/// |---|---|
/// | `Optional` | optional, no default, any value |
/// | `Required` | required, no default, any value |
/// | `Enumerable` | enumerable, default `[]` |
/// | `OneOf(set)` | optional, value must be in `set` |
/// | `Type(tag)` | optional, value must have type `tag` |
/// | `Default(x)` | optional, default `x` |
/// | `Fields(f)` | field by field, see [`SpecFields`] |
/// | `Spec(s)` | `s` unchanged |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shorthand {
    /// Bare name or `:optional`.
    Optional,
    /// `:required`.
    Required,
    /// `:enumerable`.
    Enumerable,
    /// List of allowed values.
    OneOf(Vec<Value>),
    /// Type tag.
    Type(TypeTag),
    /// Any other scalar: the default value.
    Default(Value),
    /// Long-form specification object.
    Fields(SpecFields),
    /// Already-resolved specification.
    Spec(ArgSpec),
}

impl Shorthand {
    /// Expands the shorthand into a full specification.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyword_args_core::{ArgSpec, Shorthand, Value};
    ///
    /// assert_eq!(Shorthand::Required.resolve(), ArgSpec::required());
    /// assert_eq!(
    ///     Shorthand::Default(Value::from("adam")).resolve(),
    ///     ArgSpec::with_default("adam"),
    /// );
    /// ```
    pub fn resolve(self) -> ArgSpec {
        match self {
            Shorthand::Optional => ArgSpec::optional(),
            Shorthand::Required => ArgSpec::required(),
            Shorthand::Enumerable => ArgSpec::enumerable(),
            Shorthand::OneOf(allowed) => ArgSpec::one_of(allowed),
            Shorthand::Type(tag) => ArgSpec::of_type(tag),
            Shorthand::Default(value) => ArgSpec::with_default(value),
            Shorthand::Fields(fields) => fields.into(),
            Shorthand::Spec(spec) => spec,
        }
    }
}

impl From<ArgSpec> for Shorthand {
    fn from(spec: ArgSpec) -> Self {
        Shorthand::Spec(spec)
    }
}

impl From<SpecFields> for Shorthand {
    fn from(fields: SpecFields) -> Self {
        Shorthand::Fields(fields)
    }
}

impl From<TypeTag> for Shorthand {
    fn from(tag: TypeTag) -> Self {
        Shorthand::Type(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerable_shorthand() {
        let spec = Shorthand::Enumerable.resolve();
        assert!(spec.enumerable);
        assert!(!spec.required);
        assert_eq!(spec.default, Some(Value::Sequence(vec![])));
        assert_eq!(spec.validator, Validator::Any);
    }

    #[test]
    fn test_one_of_and_type_shorthands_are_optional() {
        let set = Shorthand::OneOf(vec![Value::symbol("OK")]).resolve();
        assert!(!set.required);
        assert_eq!(set.default, None);
        assert_eq!(set.validator, Validator::OneOf(vec![Value::symbol("OK")]));

        let ty = Shorthand::Type(TypeTag::Integer).resolve();
        assert!(!ty.required);
        assert_eq!(ty.validator, Validator::InstanceOf(TypeTag::Integer));
    }

    #[test]
    fn test_fields_keep_explicit_enumerable_default() {
        let spec = Shorthand::Fields(SpecFields {
            enumerable: true,
            default: Some(Value::seq(["x"])),
            ..SpecFields::default()
        })
        .resolve();
        assert_eq!(spec.default, Some(Value::seq(["x"])));
    }

    #[test]
    fn test_fields_map_every_flag() {
        let spec = ArgSpec::from(SpecFields {
            valid: Validator::OneOf(vec![Value::symbol("x"), Value::symbol("y")]),
            default: Some(Value::symbol("x")),
            required: true,
            allow_nil: true,
            enumerable: false,
        });
        assert!(spec.required);
        assert!(spec.allow_nil);
        assert!(!spec.enumerable);
        assert_eq!(spec.default, Some(Value::symbol("x")));
    }

    #[test]
    fn test_allow_nil_bypasses_validator() {
        let strict = ArgSpec::of_type(TypeTag::Integer);
        assert!(!strict.accepts(&Value::Null));
        assert!(strict.clone().allow_nil().accepts(&Value::Null));
        assert!(!strict.allow_nil().accepts(&Value::from("17")));
    }

    #[test]
    fn test_type_check_is_exact() {
        let seq = Validator::InstanceOf(TypeTag::Sequence);
        assert!(seq.accepts(&Value::seq([1])));
        assert!(!seq.accepts(&Value::range(1, 2)));
        assert!(!Validator::InstanceOf(TypeTag::Float).accepts(&Value::from(1)));
    }
}
