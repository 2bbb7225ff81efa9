//! Keyword argument validation.
//!
//! [`validate`] checks a caller's [`Kwargs`] against a [`Declaration`] and
//! produces a [`ValidationResult`] with defaults filled in and enumerable
//! arguments coerced. The check runs in three passes:
//!
//! 1. unknown keys, all reported together (skipped when `OTHERS` is declared);
//! 2. each supplied value in input order, stopping at the first invalid one;
//! 3. required arguments still unsatisfied, all reported together.
//!
//! # Examples
//!
//! ```
//! use keyword_args_core::*;
//!
//! let decl = Declaration::new()
//!     .arg_with("a", Shorthand::Default(Value::from("adam")))
//!     .arg_with("b", Shorthand::Default(Value::from("baker")));
//!
//! let args = validate(&Kwargs::new().with("a", "alpha"), &decl).unwrap();
//! assert_eq!(args.accessor("a"), Ok(&Value::from("alpha")));
//! assert_eq!(args.accessor("b"), Ok(&Value::from("baker")));
//!
//! let err = validate(&Kwargs::new().with("c", 1), &decl).unwrap_err();
//! assert_eq!(err, ValidationError::UnknownArgument(vec!["c".into()]));
//! ```

use crate::{ArgSpec, Declaration, Kwargs, Schema, ValidationError, ValidationResult, Value};

/// Validates `input` against `declaration`.
///
/// Neither argument is modified; the result owns copies of every value.
///
/// # Errors
///
/// - [`ValidationError::UnknownArgument`] naming every undeclared input key,
///   unless the declaration admits others.
/// - [`ValidationError::InvalidValue`] for the first supplied value (in input
///   order) that fails its spec.
/// - [`ValidationError::MissingRequiredArgument`] naming every required
///   argument that was neither supplied nor defaulted.
pub fn validate(
    input: &Kwargs,
    declaration: &Declaration,
) -> Result<ValidationResult, ValidationError> {
    declaration.to_schema().validate(input)
}

impl Schema {
    /// Validates `input` against this schema.
    ///
    /// See [`validate`](crate::validate) for the error contract.
    pub fn validate(&self, input: &Kwargs) -> Result<ValidationResult, ValidationError> {
        let mut values = Kwargs::new();
        let mut required: Vec<&str> = Vec::new();
        for (name, spec) in self.iter() {
            if spec.required {
                required.push(name);
            }
            if let Some(default) = &spec.default {
                values.insert(name, default.clone());
            }
        }

        if !self.allows_others() {
            let unknown: Vec<String> = input
                .keys()
                .filter(|key| !self.declares(key))
                .map(String::from)
                .collect();
            if !unknown.is_empty() {
                return Err(ValidationError::UnknownArgument(unknown));
            }
        }

        for (key, value) in input.iter() {
            let Some(spec) = self.spec(key) else {
                values.insert(key, value.clone());
                continue;
            };

            let (value, valid) = normalize(spec, value);
            if !valid {
                return Err(ValidationError::InvalidValue {
                    key: key.to_string(),
                    value,
                });
            }
            values.insert(key, value);
            required.retain(|name| *name != key);
        }

        // A default satisfies the requirement.
        required.retain(|name| !values.contains_key(name));
        if !required.is_empty() {
            return Err(ValidationError::MissingRequiredArgument(
                required.into_iter().map(String::from).collect(),
            ));
        }

        Ok(ValidationResult::new(
            values,
            self.names().map(String::from).collect(),
        ))
    }
}

impl Kwargs {
    /// Validates this mapping against `declaration`.
    ///
    /// Shorthand for [`validate(self, declaration)`](crate::validate).
    ///
    /// # Examples
    ///
    /// ```
    /// use keyword_args_core::{Declaration, Kwargs, Shorthand, ValidationError};
    ///
    /// let decl = Declaration::new()
    ///     .arg_with("a", Shorthand::Required)
    ///     .arg_with("b", Shorthand::Required);
    ///
    /// let err = Kwargs::new().with("a", 17).validate(&decl).unwrap_err();
    /// assert_eq!(err, ValidationError::MissingRequiredArgument(vec!["b".into()]));
    ///
    /// let args = Kwargs::new().with("a", 17).with("b", 32).validate(&decl).unwrap();
    /// assert_eq!(args.get_as::<i64>("b"), Ok(32));
    /// ```
    pub fn validate(&self, declaration: &Declaration) -> Result<ValidationResult, ValidationError> {
        validate(self, declaration)
    }
}

/// Applies enumerable coercion and scalar unwrapping, then checks every
/// element. Returns the value to store and whether it passed.
fn normalize(spec: &ArgSpec, value: &Value) -> (Value, bool) {
    if !spec.enumerable {
        return (value.clone(), spec.accepts(value));
    }
    if !value.is_sequence() {
        return (Value::Sequence(vec![value.clone()]), spec.accepts(value));
    }

    let valid = match value {
        // Ranges never yield nil, so only the validator matters.
        Value::Range { start, end } => spec.validator.accepts_range(*start, *end),
        _ => value
            .elements()
            .is_some_and(|mut elements| elements.all(|element| spec.accepts(&element))),
    };
    (value.clone(), valid)
}
