//! The transactions screen: the agency's income and expenses.

use maud::{Markup, html};
use serde_json::{Map, Value};

use crate::{
    api::Record,
    error::FieldErrors,
    filters::FilterKind,
    html::{BADGE_STYLE, format_currency},
    screen::{Column, Field, FieldKind, Resource},
};

/// Money moving in or out of the agency's accounts.
pub struct Transactions;

impl Resource for Transactions {
    const SLUG: &'static str = "transactions";
    const TITLE: &'static str = "Transactions";
    const NOUN: &'static str = "transaction";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::text("Date"),
            Column::text("Description"),
            Column::text("Direction"),
            Column::numeric("Amount"),
            Column::text("Bank account"),
        ];

        COLUMNS
    }

    fn cells(record: &Record) -> Vec<Markup> {
        vec![
            html!( (record.text("date")) ),
            html!( (record.text("description")) ),
            html!( span class=(BADGE_STYLE) { (record.text("direction")) } ),
            html!( (format_currency(record.number("amount").unwrap_or_default())) ),
            html!( (record.text("bank_account")) ),
        ]
    }

    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::required("date", "Date", FieldKind::Date),
            Field::required("description", "Description", FieldKind::Text),
            Field::required(
                "direction",
                "Direction",
                FieldKind::Select(&[("income", "Income"), ("expense", "Expense")]),
            ),
            Field::required("amount", "Amount", FieldKind::Number),
            Field::required("bank_account", "Bank account", FieldKind::Text),
        ];

        FIELDS
    }

    fn filter() -> FilterKind {
        FilterKind::SearchWithDateRange
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
