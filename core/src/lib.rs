//! Declarative keyword argument validation.
//!
//! This crate checks a caller-supplied mapping of keyword arguments against a
//! declaration of the arguments a call accepts, and returns the arguments
//! with defaults filled in:
//!
//! - [`Value`] / [`TypeTag`] — the closed host value model.
//! - [`Kwargs`] — insertion-ordered name → value mapping used for input.
//! - [`ArgSpec`], [`Shorthand`], [`SpecFields`] — per-argument rules
//!   (required, default, allowed values or type, `nil` allowance, enumerable
//!   coercion).
//! - [`Declaration`] / [`Schema`] — the ordered set of accepted arguments,
//!   with [`OTHERS`] admitting undeclared keys.
//! - [`validate`] — the check itself, producing a [`ValidationResult`] or a
//!   [`ValidationError`].
//!
//! Validation is a pure function of its inputs; nothing is cached between
//! calls and every type here is `Send + Sync`.
//!
//! # Example
//!
//! ```
//! use keyword_args_core::*;
//!
//! let decl = Declaration::new()
//!     .arg("label")
//!     .arg_with("count", Shorthand::Required)
//!     .arg_with("mode", Shorthand::OneOf(vec![Value::symbol("fast"), Value::symbol("safe")]))
//!     .arg_with("tags", ArgSpec::enumerable_of(TypeTag::Text))
//!     .arg_with("retries", Shorthand::Default(Value::from(3)));
//!
//! let input = Kwargs::new()
//!     .with("count", 2)
//!     .with("mode", Value::symbol("safe"))
//!     .with("tags", "nightly");
//!
//! let args = validate(&input, &decl).unwrap();
//! assert_eq!(args.get_as::<i64>("count"), Ok(2));
//! assert_eq!(args.get_as::<i64>("retries"), Ok(3));
//! assert_eq!(args["tags"], Value::seq(["nightly"]));
//! assert_eq!(args.accessor("label"), Ok(&Value::Null));
//!
//! let err = validate(&Kwargs::new().with("mode", Value::symbol("slow")), &decl).unwrap_err();
//! assert_eq!(err.to_string(), "invalid value for keyword arg :mode => :slow");
//! ```

mod declaration;
mod error;
mod kwargs;
mod result;
mod spec;
mod validate;
mod value;

pub use declaration::{Declaration, OTHERS, Schema};
pub use error::{AccessError, ValidationError};
pub use kwargs::Kwargs;
pub use result::{FromValue, ValidationResult};
pub use spec::{ArgSpec, Shorthand, SpecFields, Validator};
pub use validate::validate;
pub use value::{Elements, TypeTag, UnknownTypeTag, Value};
