//! notice-core — the engine of the fire-safety and accessibility notice
//! assistant.
//!
//! A [`ProjectRecord`] holds the questionnaire answers for one building
//! project. [`generate`] turns it into the plain-text notice submitted to
//! the reviewing authority, resolving option codes through the fixed
//! [`catalog`]s. Everything else here exists to feed that function:
//!
//! - [`selection`] — the set type behind multi-select fields
//! - [`lens`] — the field table and `section.field` update operations
//! - [`persist`] — TOML record files
//! - [`session`] — current record plus last status, for interactive shells

pub mod catalog;
pub mod error;
pub mod generator;
pub mod lens;
pub mod model;
pub mod persist;
pub mod selection;
pub mod session;

pub use catalog::{label_of, Catalog, CatalogId, Choice};
pub use error::RecordError;
pub use generator::{generate, NOT_SPECIFIED};
pub use lens::{FieldKind, FieldPath, FieldSpec, Section, UnresolvedCode, FIELDS};
pub use model::{Accessibility, FireSafety, General, ProjectRecord};
pub use selection::Selection;
pub use session::{Session, Status, StatusKind};
