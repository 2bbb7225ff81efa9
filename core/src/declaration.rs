//! Argument declarations and their normalized schema form.

use serde::{Deserialize, Serialize};

use crate::{ArgSpec, Shorthand};

/// Sentinel name that admits undeclared keys instead of naming an argument.
pub const OTHERS: &str = "OTHERS";

/// Ordered description of the keyword arguments a call accepts.
///
/// Built fresh at the call site. Declaring [`OTHERS`] (bare or with any
/// shorthand) switches off the unknown-key check; it never becomes an
/// argument itself. Declaring a name twice replaces the earlier shorthand
/// but keeps its position.
///
/// # Examples
///
/// ```
/// use keyword_args_core::{Declaration, Shorthand, TypeTag, Value};
///
/// let decl = Declaration::new()
///     .arg("a")
///     .arg_with("b", Shorthand::Required)
///     .arg_with("c", TypeTag::Integer)
///     .arg_with("d", Shorthand::Default(Value::from("baker")))
///     .arg("OTHERS");
///
/// assert_eq!(decl.names().collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
/// assert!(decl.allows_others());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    entries: Vec<(String, Shorthand)>,
    allow_others: bool,
}

impl Declaration {
    /// Creates an empty declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an optional argument with no default and no validation.
    pub fn arg(self, name: impl Into<String>) -> Self {
        self.arg_with(name, Shorthand::Optional)
    }

    /// Declares several bare names at once.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyword_args_core::Declaration;
    ///
    /// let decl = Declaration::new().args(["a", "b", "OTHERS"]);
    /// assert_eq!(decl.len(), 2);
    /// assert!(decl.allows_others());
    /// ```
    pub fn args<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(self, |decl, name| decl.arg(name))
    }

    /// Declares an argument with an explicit shorthand or spec.
    pub fn arg_with(mut self, name: impl Into<String>, shorthand: impl Into<Shorthand>) -> Self {
        self.push(name, shorthand);
        self
    }

    /// Admits undeclared keys, same as declaring [`OTHERS`].
    pub fn allow_others(mut self) -> Self {
        self.allow_others = true;
        self
    }

    /// Adds or replaces one entry in place.
    pub fn push(&mut self, name: impl Into<String>, shorthand: impl Into<Shorthand>) {
        let name = name.into();
        if name == OTHERS {
            self.allow_others = true;
            return;
        }
        let shorthand = shorthand.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = shorthand,
            None => self.entries.push((name, shorthand)),
        }
    }

    /// Declared names in order, excluding [`OTHERS`].
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Declared entries in order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Shorthand)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Returns `true` if undeclared keys pass through.
    pub fn allows_others(&self) -> bool {
        self.allow_others
    }

    /// Number of declared arguments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no arguments are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves every shorthand into a [`Schema`].
    pub fn to_schema(&self) -> Schema {
        Schema {
            args: self
                .entries
                .iter()
                .map(|(name, shorthand)| (name.clone(), shorthand.clone().resolve()))
                .collect(),
            allow_others: self.allow_others,
        }
    }
}

/// A declaration with every shorthand resolved into an [`ArgSpec`].
///
/// # Examples
///
/// ```
/// use keyword_args_core::{ArgSpec, Declaration, Shorthand};
///
/// let schema = Declaration::new()
///     .arg_with("a", Shorthand::Required)
///     .arg_with("b", Shorthand::Enumerable)
///     .to_schema();
///
/// assert_eq!(schema.spec("a"), Some(&ArgSpec::required()));
/// assert_eq!(schema.required_names(), vec!["a"]);
/// assert!(schema.spec("c").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    args: Vec<(String, ArgSpec)>,
    allow_others: bool,
}

impl Schema {
    /// Looks up the spec for a declared name.
    pub fn spec(&self, name: &str) -> Option<&ArgSpec> {
        self.args.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    /// Returns `true` if `name` is declared.
    pub fn declares(&self, name: &str) -> bool {
        self.spec(name).is_some()
    }

    /// Declared names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(|(n, _)| n.as_str())
    }

    /// Declared names and specs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgSpec)> {
        self.args.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Names flagged required, in declaration order.
    pub fn required_names(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, spec)| spec.required)
            .map(|(name, _)| name)
            .collect()
    }

    /// Returns `true` if undeclared keys pass through.
    pub fn allows_others(&self) -> bool {
        self.allow_others
    }
}

impl From<&Declaration> for Schema {
    fn from(declaration: &Declaration) -> Self {
        declaration.to_schema()
    }
}

#[cfg(test)]
mod tests {
    use crate::{TypeTag, Validator, Value};

    use super::*;

    #[test]
    fn test_others_is_never_an_argument() {
        let decl = Declaration::new()
            .arg("b")
            .arg_with(OTHERS, Shorthand::Required);
        assert!(decl.allows_others());
        assert_eq!(decl.names().collect::<Vec<_>>(), vec!["b"]);

        let schema = decl.to_schema();
        assert!(!schema.declares(OTHERS));
        assert!(schema.required_names().is_empty());
    }

    #[test]
    fn test_redeclaring_replaces_in_place() {
        let decl = Declaration::new()
            .arg("a")
            .arg("b")
            .arg_with("a", Shorthand::Required);
        assert_eq!(decl.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(decl.to_schema().required_names(), vec!["a"]);
    }

    #[test]
    fn test_schema_resolves_every_shorthand() {
        let schema = Declaration::new()
            .arg("plain")
            .arg_with("kind", Shorthand::OneOf(vec![Value::symbol("x")]))
            .arg_with("count", TypeTag::Integer)
            .arg_with("name", Shorthand::Default(Value::from("n/a")))
            .to_schema();

        assert_eq!(schema.spec("plain"), Some(&ArgSpec::optional()));
        assert_eq!(
            schema.spec("kind").map(|s| &s.validator),
            Some(&Validator::OneOf(vec![Value::symbol("x")]))
        );
        assert_eq!(
            schema.spec("count").map(|s| &s.validator),
            Some(&Validator::InstanceOf(TypeTag::Integer))
        );
        assert_eq!(
            schema.spec("name").and_then(|s| s.default.clone()),
            Some(Value::from("n/a"))
        );
        assert_eq!(
            schema.names().collect::<Vec<_>>(),
            vec!["plain", "kind", "count", "name"]
        );
    }

    #[test]
    fn test_allow_others_builder() {
        let decl = Declaration::new().arg("a").allow_others();
        assert!(decl.to_schema().allows_others());
    }
}
