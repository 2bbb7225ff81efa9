//! Registry of named declarations.

use std::collections::BTreeMap;
use std::path::Path;

use keyword_args_core::{Declaration, Kwargs, ValidationResult};
use tracing::{debug, info};

use crate::convert::kwargs_from_json;
use crate::document::DeclarationDocument;
use crate::error::{DeclError, Result};

/// Declarations indexed by name, ready to validate input.
///
/// Immutable once built; share it by reference across threads.
///
/// # Examples
///
/// ```
/// use keyword_args_decl::{DeclarationDocument, DeclarationSet};
/// use serde_json::json;
///
/// let doc = DeclarationDocument::from_yaml_str(r#"
/// version: "1.0"
/// declarations:
///   - name: greet
///     args:
///       - name: ":required"
///       - greeting: hello
/// "#).unwrap();
///
/// let set = DeclarationSet::from_document(&doc).unwrap();
/// let args = set.validate_json("greet", &json!({"name": "Ada"})).unwrap();
/// assert_eq!(args.get_as::<String>("greeting").unwrap(), "hello");
///
/// assert!(set.validate_json("greet", &json!({})).is_err());
/// assert!(set.validate_json("wave", &json!({})).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeclarationSet {
    declarations: BTreeMap<String, Declaration>,
}

impl DeclarationSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from a document after checking it with
    /// [`DeclarationDocument::validate`].
    ///
    /// # Errors
    ///
    /// Returns the first structural problem found in the document.
    pub fn from_document(document: &DeclarationDocument) -> Result<Self> {
        document.validate()?;

        let mut set = Self::new();
        for entry in &document.declarations {
            let declaration = entry.to_declaration()?;
            debug!(
                declaration = %entry.name,
                args = declaration.len(),
                allow_others = declaration.allows_others(),
                "registered declaration"
            );
            set.insert(entry.name.trim(), declaration);
        }
        Ok(set)
    }

    /// Loads a YAML or JSON document and builds a set from it.
    ///
    /// # Errors
    ///
    /// Returns I/O and parse errors from [`DeclarationDocument::load`] and
    /// structural errors from [`from_document`](Self::from_document).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let set = Self::from_document(&DeclarationDocument::load(path)?)?;
        info!(
            path = %path.display(),
            declarations = set.len(),
            "loaded keyword argument declarations"
        );
        Ok(set)
    }

    /// Adds or replaces a declaration.
    pub fn insert(&mut self, name: impl Into<String>, declaration: Declaration) {
        self.declarations.insert(name.into(), declaration);
    }

    /// Looks up a declaration by name.
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    /// Returns `true` if a declaration with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.declarations.contains_key(name)
    }

    /// Declaration names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.keys().map(String::as_str)
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Validates `input` against the named declaration.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationNotFound`](DeclError::DeclarationNotFound) for an
    /// unknown name and [`Validation`](DeclError::Validation) when the input
    /// is rejected.
    pub fn validate(&self, name: &str, input: &Kwargs) -> Result<ValidationResult> {
        let declaration = self
            .get(name)
            .ok_or_else(|| DeclError::DeclarationNotFound(name.to_string()))?;
        debug!(declaration = name, keys = input.len(), "validating keyword arguments");
        Ok(keyword_args_core::validate(input, declaration)?)
    }

    /// Converts a JSON object with [`kwargs_from_json`] and validates it
    /// against the named declaration.
    ///
    /// # Errors
    ///
    /// As for [`validate`](Self::validate), plus
    /// [`UnsupportedValue`](DeclError::UnsupportedValue) for input that is not
    /// a flat JSON object.
    pub fn validate_json(&self, name: &str, input: &serde_json::Value) -> Result<ValidationResult> {
        self.validate(name, &kwargs_from_json(input)?)
    }
}
