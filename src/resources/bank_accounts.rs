//! The bank accounts screen: the agency's accounts and their opening
//! balances.

use maud::{Markup, html};

use crate::{
    api::Record,
    html::format_currency,
    screen::{Column, Field, FieldKind, Resource},
};

/// One of the agency's bank accounts.
pub struct BankAccounts;

impl Resource for BankAccounts {
    const SLUG: &'static str = "bank_accounts";
    const TITLE: &'static str = "Bank accounts";
    const NOUN: &'static str = "bank account";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::text("Name"),
            Column::text("Bank"),
            Column::text("Account number"),
            Column::numeric("Opening balance"),
        ];

        COLUMNS
    }

    fn cells(record: &Record) -> Vec<Markup> {
        vec![
            html!( (record.text("name")) ),
            html!( (record.text("bank")) ),
            html!( (record.text("account_number")) ),
            html!( (format_currency(record.number("opening_balance").unwrap_or_default())) ),
        ]
    }

    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::required("name", "Name", FieldKind::Text),
            Field::required("bank", "Bank", FieldKind::Text),
            Field::required("account_number", "Account number", FieldKind::Text),
            Field::required("opening_balance", "Opening balance", FieldKind::Number),
        ];

        FIELDS
    }
}
