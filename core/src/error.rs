//! Validation and accessor errors.

use thiserror::Error;

use crate::{TypeTag, Value};

/// Reasons a set of keyword arguments is rejected.
///
/// All variants describe caller input problems. Unknown and missing
/// arguments are reported together; invalid values stop at the first
/// offending key in input order.
///
/// # Examples
///
/// ```
/// use keyword_args_core::{ValidationError, Value};
///
/// let err = ValidationError::UnknownArgument(vec!["a".into(), "c".into()]);
/// assert_eq!(err.to_string(), "invalid keyword args :a, :c");
///
/// let err = ValidationError::InvalidValue { key: "a".into(), value: Value::symbol("BAD") };
/// assert_eq!(err.to_string(), "invalid value for keyword arg :a => :BAD");
///
/// let err = ValidationError::MissingRequiredArgument(vec!["b".into()]);
/// assert_eq!(err.to_string(), "missing required keyword arg :b");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Input keys that are not declared while undeclared keys are disallowed.
    #[error("invalid keyword arg{} {}", plural(.0), inspect_keys(.0))]
    UnknownArgument(Vec<String>),
    /// A declared argument whose value (or one of its elements) failed
    /// validation.
    #[error("invalid value for keyword arg :{key} => {value}")]
    InvalidValue {
        /// Offending argument name.
        key: String,
        /// Value after scalar unwrapping or enumerable coercion.
        value: Value,
    },
    /// Required arguments with neither an input value nor a default.
    #[error("missing required keyword arg{} {}", plural(.0), inspect_keys(.0))]
    MissingRequiredArgument(Vec<String>),
}

impl ValidationError {
    /// Argument names this error refers to.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            ValidationError::UnknownArgument(keys)
            | ValidationError::MissingRequiredArgument(keys) => {
                keys.iter().map(String::as_str).collect()
            }
            ValidationError::InvalidValue { key, .. } => vec![key.as_str()],
        }
    }
}

/// Errors from reading a [`ValidationResult`](crate::ValidationResult)
/// through its accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The name was not declared, so no accessor exists for it. Passthrough
    /// keys are still reachable by key lookup.
    #[error("no accessor for keyword arg :{0}")]
    UnknownAccessor(String),
    /// The stored value does not have the requested type.
    #[error("keyword arg :{name} holds {found}, expected {expected}")]
    TypeMismatch {
        /// Argument name.
        name: String,
        /// Description of the requested type.
        expected: &'static str,
        /// Type actually stored.
        found: TypeTag,
    },
}

fn plural(keys: &[String]) -> &'static str {
    if keys.len() > 1 { "s" } else { "" }
}

fn inspect_keys(keys: &[String]) -> String {
    keys.iter()
        .map(|k| format!(":{k}"))
        .collect::<Vec<_>>()
        .join(", ")
}
