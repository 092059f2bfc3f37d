use dioxus::prelude::*;

#[component]
pub fn SignInView() -> Element {
    rsx! {
        div { class: "page sign-in",
            h2 { "Sign in" }
            p { "Sign in to see your courses and track your progress." }
            p { class: "hint",
                "Start the app with "
                code { "--user <uuid>" }
                " or set "
                code { "ACADEMY_USER_ID" }
                " to a user with a profile."
            }
        }
    }
}
