//! The packages screen: the Hajj and Umrah travel packages on offer.

use maud::{Markup, html};
use serde_json::{Map, Value};

use crate::{
    api::Record,
    error::FieldErrors,
    html::{BADGE_STYLE, format_currency},
    screen::{Column, Field, FieldKind, Resource},
};

/// A sellable travel package for one season.
pub struct Packages;

impl Resource for Packages {
    const SLUG: &'static str = "packages";
    const TITLE: &'static str = "Packages";
    const NOUN: &'static str = "package";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::text("Name"),
            Column::text("Season"),
            Column::numeric("Price"),
            Column::numeric("Seats"),
            Column::text("Departure"),
        ];

        COLUMNS
    }

    fn cells(record: &Record) -> Vec<Markup> {
        vec![
            html!( (record.text("name")) ),
            html!( span class=(BADGE_STYLE) { (record.text("season")) } ),
            html!( (format_currency(record.number("price").unwrap_or_default())) ),
            html!( (record.display("seats")) ),
            html!( (record.text("departure_date")) ),
        ]
    }

    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::required("name", "Name", FieldKind::Text),
            Field::required(
                "season",
                "Season",
                FieldKind::Select(&[("hajj", "Hajj"), ("umrah", "Umrah")]),
            ),
            Field::required("price", "Price", FieldKind::Number),
            Field::required("seats", "Seats", FieldKind::Number),
            Field::required("departure_date", "Departure date", FieldKind::Date),
        ];

        FIELDS
    }

    fn validate(payload: &Map<String, Value>) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        match payload.get("seats").and_then(Value::as_f64) {
            Some(seats) if seats <= 0.0 || seats.fract() != 0.0 => {
                errors.insert("seats", "Seats must be a positive whole number.");
            }
            _ => {}
        }

        if let Some(price) = payload.get("price").and_then(Value::as_f64)
            && price <= 0.0
        {
            errors.insert("price", "Price must be greater than zero.");
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
mod packages_tests {
    use crate::screen::form::validate_form;

    use super::Packages;

    fn form(seats: &str) -> std::collections::HashMap<String, String> {
        [
            ("name", "Gold Hajj"),
            ("season", "hajj"),
            ("price", "8500"),
            ("seats", seats),
            ("departure_date", "2027-05-20"),
        ]
        .iter()
        .map(|&(k, v)| (k.to_owned(), v.to_owned()))
        .collect()
    }

    #[test]
    fn whole_positive_seat_counts_pass() {
        assert!(validate_form::<Packages>(&form("45")).is_ok());
    }

    #[test]
    fn fractional_and_non_positive_seat_counts_are_rejected() {
        for seats in ["0", "-3", "12.5"] {
            let errors = validate_form::<Packages>(&form(seats)).unwrap_err();
            assert!(
                errors.get("seats").unwrap().contains("positive whole number"),
                "seats={seats} should be rejected"
            );
        }
    }
}
