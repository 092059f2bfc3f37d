use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;

#[component]
pub fn AccessDenied() -> Element {
    rsx! {
        div { class: "page access-denied",
            h2 { "Access denied" }
            p { "You do not have permission to view this page." }
            Link { class: "btn", to: Route::Dashboard {}, "Back to dashboard" }
        }
    }
}
