//! The pilgrims screen: pre-registrations for upcoming seasons, including
//! deposits taken.

use maud::{Markup, html};

use crate::{
    api::Record,
    filters::FilterKind,
    html::format_currency,
    screen::{Column, Field, FieldKind, Resource},
};

/// A pilgrim pre-registered with the agency.
pub struct Pilgrims;

impl Resource for Pilgrims {
    const SLUG: &'static str = "pilgrims";
    const TITLE: &'static str = "Pilgrims";
    const NOUN: &'static str = "pilgrim";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::text("Name"),
            Column::text("Passport"),
            Column::text("Phone"),
            Column::text("Package"),
            Column::numeric("Deposit"),
        ];

        COLUMNS
    }

    fn cells(record: &Record) -> Vec<Markup> {
        vec![
            html!( (record.text("name")) ),
            html!( (record.text("passport_number")) ),
            html!( (record.text("phone")) ),
            html!( (record.text("package")) ),
            html!( (format_currency(record.number("deposit").unwrap_or_default())) ),
        ]
    }

    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::required("name", "Name", FieldKind::Text),
            Field::required("passport_number", "Passport number", FieldKind::Text),
            Field::optional("phone", "Phone", FieldKind::Text),
            Field::required("package", "Package", FieldKind::Text),
            Field::optional("deposit", "Deposit", FieldKind::Number),
        ];

        FIELDS
    }

    fn filter() -> FilterKind {
        FilterKind::SearchWithDate
    }
}
