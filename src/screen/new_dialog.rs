//! Opens the create dialog for a resource.

use std::collections::HashMap;

use maud::Markup;

use crate::{
    error::FieldErrors,
    screen::{
        dialog::{DialogMode, dialog_view},
        resource::Resource,
    },
};

/// A handler that renders the empty create dialog for resource `R`.
///
/// No API call is involved; the form starts from the schema defaults.
pub async fn get_new_dialog<R: Resource>() -> Markup {
    dialog_view::<R>(DialogMode::Create, &HashMap::new(), &FieldErrors::default())
}

#[cfg(test)]
mod new_dialog_tests {
    use scraper::{Html, Selector};

    use crate::test_utils::caravans::Caravans;

    use super::get_new_dialog;

    #[tokio::test]
    async fn renders_an_empty_create_form() {
        let markup = get_new_dialog::<Caravans>().await;
        let html = Html::parse_fragment(&markup.into_string());

        let form = html
            .select(&Selector::parse("form[hx-post]").unwrap())
            .next()
            .expect("the create dialog should post to the collection");
        assert_eq!(form.value().attr("hx-post"), Some("/api/caravans"));

        let name = html
            .select(&Selector::parse("input[name=name]").unwrap())
            .next()
            .unwrap();
        assert_eq!(name.value().attr("value"), Some(""));
    }
}
