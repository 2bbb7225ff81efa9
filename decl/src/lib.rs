//! Declaration documents for keyword argument validation.
//!
//! Keeps keyword argument declarations in YAML or JSON files instead of code,
//! and validates input against them by name:
//!
//! - [`DeclarationDocument`] — versioned file format holding named
//!   [`DeclarationEntry`] values; loaded and saved with `serde_yaml` /
//!   `serde_json`.
//! - [`DeclarationSet`] — registry built from a document; looks declarations
//!   up by name and runs [`keyword_args_core::validate`].
//! - [`value_from_json`] / [`kwargs_from_json`] — conversion of JSON-shaped
//!   host data into the core value model.
//!
//! # Quick start
//!
//! ```no_run
//! use keyword_args_core::Kwargs;
//! use keyword_args_decl::DeclarationSet;
//!
//! let set = DeclarationSet::load("declarations.yml").unwrap();
//! let args = set.validate("create_user", &Kwargs::new().with("email", "a@b.c")).unwrap();
//! println!("role = {}", args["role"]);
//! ```

mod convert;
mod document;
mod error;
mod set;

pub use convert::{kwargs_from_json, value_from_json};
pub use document::{DeclarationDocument, DeclarationEntry};
pub use error::{DeclError, Result};
pub use set::DeclarationSet;
