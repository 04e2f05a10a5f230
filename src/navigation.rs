//! The navigation bar linking the seven bookkeeping screens.

use maud::{Markup, html};

use crate::endpoints;

/// The slugs and titles of the screens the nav bar links to, in display
/// order.
const SCREENS: &[(&str, &str)] = &[
    ("transactions", "Transactions"),
    ("bills", "Bills"),
    ("loans", "Loans"),
    ("packages", "Packages"),
    ("bank_accounts", "Bank accounts"),
    ("pilgrims", "Pilgrims"),
    ("umrah", "Umrah"),
];

/// A link in the navigation bar.
///
/// Changes appearance when `is_current` is set. Only one link should be
/// current at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: String,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-blue-700 rounded-sm lg:bg-transparent
        lg:text-blue-700 lg:p-0 dark:text-white lg:dark:text-blue-500"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
        lg:hover:bg-transparent lg:border-0 lg:hover:text-blue-700 lg:p-0
        dark:text-white lg:dark:hover:text-blue-500 dark:hover:bg-gray-700
        dark:hover:text-white lg:dark:hover:bg-transparent"
        };

        html!( a href=(self.url) class=(style) aria-current=[self.is_current.then_some("page")] { (self.title) } )
    }
}

/// The navigation bar shown on every screen.
pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Build the navigation bar with the screen for `active_slug` marked as
    /// the current one.
    pub fn new(active_slug: &str) -> NavBar<'static> {
        let mut links: Vec<Link<'static>> = SCREENS
            .iter()
            .map(|&(slug, title)| Link {
                url: endpoints::list_view(slug),
                title,
                is_current: slug == active_slug,
            })
            .collect();

        links.push(Link {
            url: endpoints::SIGN_OUT.to_owned(),
            title: "Sign out",
            is_current: false,
        });

        NavBar { links }
    }

    /// Render the bar.
    pub fn into_html(self) -> Markup {
        // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div
                    class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    span
                        class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                    {
                        "Manasik"
                    }

                    div class="w-full lg:block lg:w-auto"
                    {
                        ul
                            class="font-medium flex flex-col p-4 lg:p-0 mt-4
                            border border-gray-100 rounded bg-gray-50
                            lg:flex-row lg:space-x-8 rtl:space-x-reverse lg:mt-0
                            lg:border-0 lg:bg-white dark:bg-gray-800
                            lg:dark:bg-gray-900 dark:border-gray-700"
                        {
                            @for link in self.links {
                                li { (link.into_html()) }
                            }
                        }
                    }
                }
            }
        )
    }
}

/// The navigation bar with the screen for `active_slug` highlighted.
pub fn nav_bar(active_slug: &str) -> Markup {
    NavBar::new(active_slug).into_html()
}
