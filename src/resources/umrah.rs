//! The umrah screen: confirmed umrah travellers and their departures.

use maud::{Markup, html};

use crate::{
    api::Record,
    filters::FilterKind,
    screen::{Column, Field, FieldKind, Resource},
};

/// A confirmed umrah traveller.
pub struct Umrah;

impl Resource for Umrah {
    const SLUG: &'static str = "umrah";
    const TITLE: &'static str = "Umrah";
    const NOUN: &'static str = "umrah booking";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::text("Name"),
            Column::text("Passport"),
            Column::text("Package"),
            Column::text("Departure"),
        ];

        COLUMNS
    }

    fn cells(record: &Record) -> Vec<Markup> {
        vec![
            html!( (record.text("name")) ),
            html!( (record.text("passport_number")) ),
            html!( (record.text("package")) ),
            html!( (record.text("departure_date")) ),
        ]
    }

    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::required("name", "Name", FieldKind::Text),
            Field::required("passport_number", "Passport number", FieldKind::Text),
            Field::required("package", "Package", FieldKind::Text),
            Field::required("departure_date", "Departure date", FieldKind::Date),
        ];

        FIELDS
    }

    fn filter() -> FilterKind {
        FilterKind::SearchWithDateRange
    }
}
