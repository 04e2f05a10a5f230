//! The trait a bookkeeping entity implements to get a full listing screen.
//!
//! Everything else in this module tree is generic: one implementation of the
//! list page, the form dialog and the mutation endpoints serves every entity.
//! An entity contributes only its collection slug, display names, table
//! columns, form schema and any cross-field validation rules.

use maud::Markup;
use serde_json::{Map, Value};

use crate::{api::Record, error::FieldErrors, filters::FilterKind};

/// A column of the listing table.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// The header label.
    pub label: &'static str,
    /// Whether cell contents are right-aligned numbers.
    pub numeric: bool,
}

impl Column {
    /// A left-aligned text column.
    pub const fn text(label: &'static str) -> Self {
        Self {
            label,
            numeric: false,
        }
    }

    /// A right-aligned numeric column.
    pub const fn numeric(label: &'static str) -> Self {
        Self {
            label,
            numeric: true,
        }
    }
}

/// The input widget and parsing rule for one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A single-line text input.
    Text,
    /// A numeric input; the payload value is a JSON number.
    Number,
    /// A date input in `YYYY-MM-DD` format; the payload value is a string.
    Date,
    /// A fixed set of `(value, label)` choices rendered as a select.
    Select(&'static [(&'static str, &'static str)]),
}

/// One field of an entity's form schema.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// The form field and payload attribute name.
    pub name: &'static str,
    /// The label shown next to the input.
    pub label: &'static str,
    /// The widget and parsing rule.
    pub kind: FieldKind,
    /// Whether an empty submission is rejected.
    pub required: bool,
}

impl Field {
    /// A required field.
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    /// An optional field.
    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }
}

/// One bookkeeping entity type, e.g. transactions or bills.
///
/// Implementors are unit structs; all state lives on the server.
pub trait Resource: Send + Sync + 'static {
    /// The collection slug under the API root and in this app's own routes.
    const SLUG: &'static str;
    /// The plural display name, e.g. "Transactions".
    const TITLE: &'static str;
    /// The singular display name, e.g. "transaction".
    const NOUN: &'static str;

    /// The listing table's columns.
    fn columns() -> &'static [Column];

    /// Render one record into table cells. Must produce one cell per column.
    fn cells(record: &Record) -> Vec<Markup>;

    /// The form schema for the create/edit dialog.
    fn fields() -> &'static [Field];

    /// Which filter controls the listing shows.
    fn filter() -> FilterKind {
        FilterKind::Search
    }

    /// Cross-field validation applied after the schema checks pass.
    fn validate(_payload: &Map<String, Value>) -> Result<(), FieldErrors> {
        Ok(())
    }
}
