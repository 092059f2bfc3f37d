use academy_core::model::UserSession;
use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::{AppContext, CurrentSession};
use crate::views::{
    CourseView, DashboardView, NewCourseView, ProfileView, SignInView, UsersView, ViewError,
    ViewState, view_state_from_resource,
};
use crate::vm::role_label;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/course/:course_id", CourseView)] Course { course_id: u64 },
        #[route("/new-course", NewCourseView)] NewCourse {},
        #[route("/users", UsersView)] Users {},
        #[route("/profile", ProfileView)] Profile {},
    #[end_layout]
    #[route("/sign-in", SignInView)] SignIn {},
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let mut current = use_context_provider(|| CurrentSession::new(None));
    let provider = ctx.session_provider();

    let resource = use_resource(move || {
        let provider = provider.clone();
        async move {
            let session = provider.current_session().await.map_err(|err| {
                tracing::warn!(error = %err, "failed to resolve session");
                ViewError::Unknown
            })?;
            current.set(session);
            Ok::<_, ViewError>(session)
        }
    });

    match view_state_from_resource(&resource) {
        ViewState::Idle | ViewState::Loading => rsx! {
            div { class: "app app--loading", p { "Loading..." } }
        },
        ViewState::Error(err) => rsx! {
            div { class: "app app--error", p { "{err.message()}" } }
        },
        ViewState::Ready(None) => rsx! { SignInView {} },
        ViewState::Ready(Some(_)) => rsx! {
            div { class: "app",
                Sidebar {}
                main { class: "content",
                    Outlet::<Route> {}
                }
            }
        },
    }
}

#[component]
fn Sidebar() -> Element {
    let current = use_context::<CurrentSession>();
    let Some(session) = current.get() else {
        return rsx! {};
    };

    rsx! {
        nav { class: "sidebar",
            h1 { "Academy" }
            ul {
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                if session.can_manage_courses() {
                    li { Link { to: Route::NewCourse {}, "New Course" } }
                }
                if session.can_manage_users() {
                    li { Link { to: Route::Users {}, "Users" } }
                }
                li { Link { to: Route::Profile {}, "Profile" } }
            }
            SessionBadge { session }
        }
    }
}

#[component]
fn SessionBadge(session: UserSession) -> Element {
    let label = role_label(session.role);
    rsx! {
        p { class: "sidebar-role", "Signed in as {label}" }
    }
}
