//! The generic listing screen: table, filters, pagination, form dialog and
//! the mutation endpoints behind it.
//!
//! Every entity screen in the app is one instantiation of this module's
//! handlers with a [Resource] implementation; none of them carries its own
//! table or dialog code.

mod create_endpoint;
mod delete_endpoint;
pub mod dialog;
mod edit_dialog;
pub mod form;
mod list_page;
mod new_dialog;
pub mod resource;
mod update_endpoint;

pub use create_endpoint::create_record;
pub use delete_endpoint::delete_record;
pub use dialog::close_dialog_endpoint;
pub use edit_dialog::get_edit_dialog;
pub use list_page::{ListParams, ScreenState, get_list_page};
pub use new_dialog::get_new_dialog;
pub use resource::{Column, Field, FieldKind, Resource};
pub use update_endpoint::update_record;
