//! Declaration documents stored as YAML or JSON.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! declarations:
//!   - name: create_user
//!     args:
//!       - nickname
//!       - email: ":required"
//!       - role: [":admin", ":member"]
//!       - age: { valid: Integer, allow_nil: true }
//!       - tags: ":enumerable"
//!       - greeting: hello
//!       - OTHERS
//! ```
//!
//! Inside `args`, a string declares a bare (optional) name and a mapping
//! declares each of its keys, in order, with the mapped value as shorthand.

use std::collections::HashSet;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use keyword_args_core::{Declaration, OTHERS, Shorthand};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use tracing::warn;

use crate::convert::shorthand_from_json;
use crate::error::{DeclError, Result};

/// A versioned collection of named declarations.
///
/// # Examples
///
/// ```
/// use keyword_args_decl::DeclarationDocument;
///
/// let doc = DeclarationDocument::from_yaml_str(r#"
/// version: "1.0"
/// declarations:
///   - name: resize
///     args: [width, height, { mode: [":fit", ":fill"] }]
/// "#).unwrap();
///
/// assert_eq!(doc.declarations.len(), 1);
/// assert!(doc.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclarationDocument {
    /// Document format version (e.g. `"1.0"`).
    pub version: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declarations in document order.
    #[serde(default)]
    pub declarations: Vec<DeclarationEntry>,
}

/// One named declaration as written in a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclarationEntry {
    /// Name the declaration is registered under (usually the call site).
    pub name: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Raw argument entries; see the module docs for the accepted shapes.
    #[serde(default)]
    pub args: Vec<Json>,
}

impl DeclarationDocument {
    /// Creates an empty document.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            description: None,
            declarations: Vec::new(),
        }
    }

    /// Parses a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`YamlError`](DeclError::YamlError) on malformed input.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError`](DeclError::JsonError) on malformed input.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a document, picking the format from the file extension
    /// (`.yml`/`.yaml` → YAML, anything else → JSON).
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](DeclError::IoError) if the file cannot be read, or
    /// a parse error for the chosen format.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        if is_yaml(path) {
            Ok(serde_yaml::from_reader(reader)?)
        } else {
            Ok(serde_json::from_reader(reader)?)
        }
    }

    /// Saves the document, picking the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](DeclError::IoError) if the file cannot be written,
    /// or a serialization error for the chosen format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(std::fs::File::create(path)?);
        if is_yaml(path) {
            serde_yaml::to_writer(writer, self)?;
        } else {
            serde_json::to_writer_pretty(writer, self)?;
        }
        Ok(())
    }

    /// Checks structural invariants: a non-empty version, non-empty unique
    /// declaration names, and argument entries that all convert.
    ///
    /// Stops at the first problem.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDocument`](DeclError::InvalidDocument),
    /// [`DuplicateDeclaration`](DeclError::DuplicateDeclaration) or
    /// [`InvalidArgument`](DeclError::InvalidArgument).
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(DeclError::InvalidDocument(
                "document version cannot be empty".to_string(),
            ));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for entry in &self.declarations {
            let name = entry.name.trim();
            if name.is_empty() {
                return Err(DeclError::InvalidDocument(
                    "declaration name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(name) {
                return Err(DeclError::DuplicateDeclaration(name.to_string()));
            }
            entry.to_declaration()?;
        }
        Ok(())
    }
}

impl DeclarationEntry {
    /// Creates an entry with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            args: Vec::new(),
        }
    }

    /// Appends a raw argument entry.
    pub fn with_arg(mut self, arg: Json) -> Self {
        self.args.push(arg);
        self
    }

    /// Converts the raw entries into a core [`Declaration`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`](DeclError::InvalidArgument) for entries
    /// that are neither a name nor a mapping, for empty names, and for
    /// shorthands that cannot be interpreted.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyword_args_decl::DeclarationEntry;
    /// use serde_json::json;
    ///
    /// let decl = DeclarationEntry::new("greet")
    ///     .with_arg(json!("name"))
    ///     .with_arg(json!({"greeting": "hello", "loud": {"valid": "Bool"}}))
    ///     .with_arg(json!("OTHERS"))
    ///     .to_declaration()
    ///     .unwrap();
    ///
    /// assert_eq!(decl.names().collect::<Vec<_>>(), vec!["name", "greeting", "loud"]);
    /// assert!(decl.allows_others());
    /// ```
    pub fn to_declaration(&self) -> Result<Declaration> {
        let mut declaration = Declaration::new();
        let mut names: HashSet<&str> = HashSet::new();
        let mut others = 0usize;

        for arg in &self.args {
            let pairs: Vec<(&str, Shorthand)> = match arg {
                Json::String(name) => vec![(name.as_str(), Shorthand::Optional)],
                Json::Object(map) => map
                    .iter()
                    .map(|(name, value)| {
                        shorthand_from_json(value)
                            .map(|shorthand| (name.as_str(), shorthand))
                            .map_err(|reason| self.invalid(format!("'{name}': {reason}")))
                    })
                    .collect::<Result<_>>()?,
                other => {
                    return Err(self.invalid(format!(
                        "expected a name or a name-to-spec mapping, found {other}"
                    )));
                }
            };

            for (name, shorthand) in pairs {
                if name.trim().is_empty() {
                    return Err(self.invalid("argument name cannot be empty".to_string()));
                }
                if name == OTHERS {
                    others += 1;
                } else if !names.insert(name) {
                    warn!(
                        declaration = %self.name,
                        argument = name,
                        "argument declared more than once; the later spec wins"
                    );
                }
                declaration.push(name, shorthand);
            }
        }

        if others > 1 {
            warn!(declaration = %self.name, count = others, "OTHERS listed more than once");
        }
        Ok(declaration)
    }

    fn invalid(&self, reason: String) -> DeclError {
        DeclError::InvalidArgument {
            declaration: self.name.clone(),
            reason,
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yml" | "yaml")
    )
}
