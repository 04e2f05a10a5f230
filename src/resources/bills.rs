//! The bills screen: amounts the agency owes vendors.

use maud::{Markup, html};
use serde_json::{Map, Value};

use crate::{
    api::Record,
    error::FieldErrors,
    html::{BADGE_STYLE, format_currency},
    screen::{Column, Field, FieldKind, Resource},
};

/// A payable owed to a vendor, tracked until it is marked paid.
pub struct Bills;

impl Resource for Bills {
    const SLUG: &'static str = "bills";
    const TITLE: &'static str = "Bills";
    const NOUN: &'static str = "bill";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::text("Title"),
            Column::text("Vendor"),
            Column::numeric("Amount"),
            Column::text("Due date"),
            Column::text("Status"),
        ];

        COLUMNS
    }

    fn cells(record: &Record) -> Vec<Markup> {
        vec![
            html!( (record.text("title")) ),
            html!( (record.text("vendor")) ),
            html!( (format_currency(record.number("amount").unwrap_or_default())) ),
            html!( (record.text("due_date")) ),
            html!( span class=(BADGE_STYLE) { (record.text("status")) } ),
        ]
    }

    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::required("title", "Title", FieldKind::Text),
            Field::required("vendor", "Vendor", FieldKind::Text),
            Field::required("amount", "Amount", FieldKind::Number),
            Field::required("due_date", "Due date", FieldKind::Date),
            Field::required(
                "status",
                "Status",
                FieldKind::Select(&[("unpaid", "Unpaid"), ("paid", "Paid")]),
            ),
        ];

        FIELDS
    }

    fn validate(payload: &Map<String, Value>) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if let Some(amount) = payload.get("amount").and_then(Value::as_f64)
            && amount <= 0.0
        {
            errors.insert("amount", "Amount must be greater than zero.");
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
