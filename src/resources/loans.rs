//! The loans screen: money lent out by the agency, usually to partners or
//! staff, and how much of it is still outstanding.

use maud::{Markup, html};

use crate::{
    api::Record,
    filters::FilterKind,
    html::format_currency,
    screen::{Column, Field, FieldKind, Resource},
};

/// A loan issued by the agency.
pub struct Loans;

impl Resource for Loans {
    const SLUG: &'static str = "loans";
    const TITLE: &'static str = "Loans";
    const NOUN: &'static str = "loan";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::text("Borrower"),
            Column::numeric("Principal"),
            Column::numeric("Outstanding"),
            Column::text("Issued"),
            Column::text("Note"),
        ];

        COLUMNS
    }

    fn cells(record: &Record) -> Vec<Markup> {
        vec![
            html!( (record.text("borrower")) ),
            html!( (format_currency(record.number("principal").unwrap_or_default())) ),
            html!( (format_currency(record.number("outstanding").unwrap_or_default())) ),
            html!( (record.text("issued_date")) ),
            html!( (record.text("note")) ),
        ]
    }

    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::required("borrower", "Borrower", FieldKind::Text),
            Field::required("principal", "Principal", FieldKind::Number),
            Field::required("outstanding", "Outstanding", FieldKind::Number),
            Field::required("issued_date", "Issued date", FieldKind::Date),
            Field::optional("note", "Note", FieldKind::Text),
        ];

        FIELDS
    }

    fn filter() -> FilterKind {
        FilterKind::Search
    }
}
