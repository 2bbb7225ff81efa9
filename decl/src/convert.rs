//! Conversion from JSON-shaped data into the core value model.
//!
//! YAML documents are parsed into [`serde_json::Value`] as well, so both file
//! formats share these rules:
//!
//! | JSON | [`Value`] |
//! |---|---|
//! | `null` | `Null` |
//! | `true` / `false` | `Bool` |
//! | integer fitting `i64` | `Integer` |
//! | any other number | `Float` |
//! | `":name"` | `Symbol("name")` |
//! | other string | `Text` |
//! | array | `Sequence` |
//! | object | rejected |

use keyword_args_core::{Kwargs, Shorthand, SpecFields, TypeTag, Validator, Value};
use serde_json::{Map, Value as Json};

use crate::error::{DeclError, Result};

/// Converts a JSON value into a [`Value`].
///
/// # Errors
///
/// Returns [`DeclError::UnsupportedValue`] for objects, which have no
/// counterpart in the value model.
///
/// # Examples
///
/// ```
/// use keyword_args_decl::value_from_json;
/// use keyword_args_core::Value;
/// use serde_json::json;
///
/// assert_eq!(value_from_json(&json!(":OK")).unwrap(), Value::symbol("OK"));
/// assert_eq!(value_from_json(&json!("OK")).unwrap(), Value::from("OK"));
/// assert_eq!(value_from_json(&json!([1, 2.5])).unwrap(), Value::seq([Value::from(1), Value::from(2.5)]));
/// assert!(value_from_json(&json!({"a": 1})).is_err());
/// ```
pub fn value_from_json(json: &Json) -> Result<Value> {
    Ok(match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Json::String(s) => match s.strip_prefix(':') {
            Some(name) if !name.is_empty() => Value::symbol(name),
            _ => Value::text(s.as_str()),
        },
        Json::Array(items) => Value::Sequence(
            items
                .iter()
                .map(value_from_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        Json::Object(_) => {
            return Err(DeclError::UnsupportedValue(format!(
                "objects cannot be argument values: {json}"
            )));
        }
    })
}

/// Converts a JSON object into caller input, keeping key order.
///
/// # Errors
///
/// Returns [`DeclError::UnsupportedValue`] if `json` is not an object or any
/// member cannot be converted.
///
/// # Examples
///
/// ```
/// use keyword_args_decl::kwargs_from_json;
/// use serde_json::json;
///
/// let args = kwargs_from_json(&json!({"b": 1, "a": ":x"})).unwrap();
/// assert_eq!(args.keys().collect::<Vec<_>>(), vec!["b", "a"]);
/// ```
pub fn kwargs_from_json(json: &Json) -> Result<Kwargs> {
    let Json::Object(map) = json else {
        return Err(DeclError::UnsupportedValue(format!(
            "keyword arguments must be an object, found {json}"
        )));
    };
    map.iter()
        .map(|(key, value)| -> Result<(String, Value)> {
            Ok((key.clone(), value_from_json(value)?))
        })
        .collect()
}

/// Interprets the declared value for one argument.
///
/// Returns a plain message on failure; the caller attaches the declaration
/// name.
pub(crate) fn shorthand_from_json(json: &Json) -> std::result::Result<Shorthand, String> {
    match json {
        Json::String(s) if s == ":optional" => Ok(Shorthand::Optional),
        Json::String(s) if s == ":required" => Ok(Shorthand::Required),
        Json::String(s) if s == ":enumerable" => Ok(Shorthand::Enumerable),
        Json::Array(items) => Ok(Shorthand::OneOf(values_from_json(items)?)),
        Json::Object(fields) => spec_fields_from_json(fields).map(Shorthand::Fields),
        other => value_from_json(other)
            .map(Shorthand::Default)
            .map_err(|e| e.to_string()),
    }
}

fn spec_fields_from_json(map: &Map<String, Json>) -> std::result::Result<SpecFields, String> {
    let mut fields = SpecFields::default();
    for (key, value) in map {
        match key.as_str() {
            "valid" => fields.valid = validator_from_json(value)?,
            "default" => {
                fields.default = Some(value_from_json(value).map_err(|e| e.to_string())?);
            }
            "required" => fields.required = flag(key, value)?,
            "allow_nil" => fields.allow_nil = flag(key, value)?,
            "enumerable" => fields.enumerable = flag(key, value)?,
            other => return Err(format!("unknown spec field '{other}'")),
        }
    }
    Ok(fields)
}

fn validator_from_json(json: &Json) -> std::result::Result<Validator, String> {
    match json {
        Json::Null => Ok(Validator::Any),
        Json::Array(items) => Ok(Validator::OneOf(values_from_json(items)?)),
        Json::String(name) => name
            .parse::<TypeTag>()
            .map(Validator::InstanceOf)
            .map_err(|e| e.to_string()),
        other => Err(format!("'valid' must be a list or a type name, found {other}")),
    }
}

fn values_from_json(items: &[Json]) -> std::result::Result<Vec<Value>, String> {
    items
        .iter()
        .map(|item| value_from_json(item).map_err(|e| e.to_string()))
        .collect()
}

fn flag(key: &str, json: &Json) -> std::result::Result<bool, String> {
    json.as_bool()
        .ok_or_else(|| format!("'{key}' must be a boolean, found {json}"))
}

#[cfg(test)]
mod tests {
    use keyword_args_core::ArgSpec;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_keyword_shorthands() {
        assert_eq!(shorthand_from_json(&json!(":optional")), Ok(Shorthand::Optional));
        assert_eq!(shorthand_from_json(&json!(":required")), Ok(Shorthand::Required));
        assert_eq!(shorthand_from_json(&json!(":enumerable")), Ok(Shorthand::Enumerable));
    }

    #[test]
    fn test_list_is_value_set() {
        assert_eq!(
            shorthand_from_json(&json!([":OK", ":GOOD"])),
            Ok(Shorthand::OneOf(vec![Value::symbol("OK"), Value::symbol("GOOD")]))
        );
    }

    #[test]
    fn test_other_scalars_are_defaults() {
        assert_eq!(
            shorthand_from_json(&json!("adam")),
            Ok(Shorthand::Default(Value::from("adam")))
        );
        assert_eq!(
            shorthand_from_json(&json!(":fast")),
            Ok(Shorthand::Default(Value::symbol("fast")))
        );
        assert_eq!(
            shorthand_from_json(&json!(3)),
            Ok(Shorthand::Default(Value::from(3)))
        );
        assert_eq!(
            shorthand_from_json(&Json::Null),
            Ok(Shorthand::Default(Value::Null))
        );
    }

    #[test]
    fn test_long_form_fields() {
        let shorthand =
            shorthand_from_json(&json!({"valid": "Integer", "allow_nil": true})).unwrap();
        assert_eq!(
            shorthand.resolve(),
            ArgSpec::of_type(TypeTag::Integer).allow_nil()
        );

        let shorthand = shorthand_from_json(&json!({
            "valid": [":x", ":y", ":z"],
            "default": ":x",
            "required": true
        }))
        .unwrap();
        let spec = shorthand.resolve();
        assert!(spec.required);
        assert_eq!(spec.default, Some(Value::symbol("x")));

        let spec = shorthand_from_json(&json!({"enumerable": true}))
            .unwrap()
            .resolve();
        assert_eq!(spec, ArgSpec::enumerable());
    }

    #[test]
    fn test_long_form_rejects_bad_fields() {
        assert!(shorthand_from_json(&json!({"vaild": "Integer"})).is_err());
        assert!(shorthand_from_json(&json!({"valid": "Widget"})).is_err());
        assert!(shorthand_from_json(&json!({"valid": 3})).is_err());
        assert!(shorthand_from_json(&json!({"required": "yes"})).is_err());
    }

    #[test]
    fn test_large_numbers_become_floats() {
        assert_eq!(
            value_from_json(&json!(u64::MAX)).unwrap().type_tag(),
            TypeTag::Float
        );
        assert_eq!(value_from_json(&json!(1.5)).unwrap(), Value::from(1.5));
    }

    #[test]
    fn test_bare_colon_is_text() {
        assert_eq!(value_from_json(&json!(":")).unwrap(), Value::from(":"));
    }

    #[test]
    fn test_kwargs_requires_object() {
        assert!(matches!(
            kwargs_from_json(&json!([1, 2])),
            Err(DeclError::UnsupportedValue(_))
        ));
        assert!(matches!(
            kwargs_from_json(&json!({"a": {"nested": true}})),
            Err(DeclError::UnsupportedValue(_))
        ));
    }
}
