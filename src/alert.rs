//! Success and error notifications.
//!
//! Alerts are rendered as out-of-band htmx fragments that land in the fixed
//! `#alert-container` element of the base layout, so they never block the
//! screen the user is working in.

use maud::{Markup, html};

const SUCCESS_STYLE: &str = "p-4 mb-4 text-sm rounded-lg bg-green-50 text-green-800 \
    dark:bg-gray-800 dark:text-green-400 border border-green-300 dark:border-green-800 shadow";
const ERROR_STYLE: &str = "p-4 mb-4 text-sm rounded-lg bg-red-50 text-red-800 \
    dark:bg-gray-800 dark:text-red-400 border border-red-300 dark:border-red-800 shadow";

/// A transient notification shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A mutation completed.
    Success {
        /// Short headline, e.g. "Transaction created".
        message: String,
        /// Longer explanation, may be empty.
        details: String,
    },
    /// A mutation or fetch failed.
    Error {
        /// Short headline.
        message: String,
        /// Longer explanation, usually the server's own message.
        details: String,
    },
}

impl Alert {
    /// Create a success alert.
    pub fn success(message: &str, details: &str) -> Self {
        Self::Success {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create an error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Render the alert as markup targeting the alert container out-of-band.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match &self {
            Alert::Success { message, details } => (SUCCESS_STYLE, message, details),
            Alert::Error { message, details } => (ERROR_STYLE, message, details),
        };

        html!(
            div hx-swap-oob="innerHTML:#alert-container"
            {
                div class=(style) role="alert"
                {
                    p class="font-medium" { (message) }

                    @if !details.is_empty() {
                        p { (details) }
                    }
                }
            }
        )
    }

    /// Render the alert in place, without the out-of-band wrapper.
    ///
    /// Used where the alert is part of the page being built, e.g. a notice
    /// shown after a redirect.
    pub fn into_inline_html(self) -> Markup {
        let (style, message, details) = match &self {
            Alert::Success { message, details } => (SUCCESS_STYLE, message, details),
            Alert::Error { message, details } => (ERROR_STYLE, message, details),
        };

        html!(
            div class=(style) role="alert"
            {
                p class="font-medium" { (message) }

                @if !details.is_empty() {
                    p { (details) }
                }
            }
        )
    }
}

#[cfg(test)]
mod alert_tests {
    use super::Alert;

    #[test]
    fn oob_alert_targets_the_alert_container() {
        let markup = Alert::success("Saved", "").into_html();

        assert!(
            markup
                .into_string()
                .contains("hx-swap-oob=\"innerHTML:#alert-container\"")
        );
    }

    #[test]
    fn inline_alert_has_no_oob_wrapper() {
        let markup = Alert::error("Failed", "The server said no").into_inline_html();
        let text = markup.into_string();

        assert!(!text.contains("hx-swap-oob"));
        assert!(text.contains("The server said no"));
    }
}
