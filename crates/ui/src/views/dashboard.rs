use academy_core::FilterCriteria;
use dioxus::prelude::*;
use dioxus_router::Link;
use services::Dashboard;

use crate::context::{AppContext, CurrentSession};
use crate::routes::Route;
use crate::views::{SignInView, ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    CourseCardVm, FilterBarVm, category_filter_from_value, level_filter_from_value,
    map_course_cards,
};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let current = use_context::<CurrentSession>();
    let catalog = ctx.catalog();
    let mut criteria = use_signal(FilterCriteria::default);

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            let session = current.get().ok_or(ViewError::Forbidden)?;
            Ok::<Dashboard, ViewError>(catalog.load_dashboard(&session).await)
        }
    });
    let state = view_state_from_resource(&resource);

    let Some(session) = current.get() else {
        return rsx! { SignInView {} };
    };

    rsx! {
        div { class: "page dashboard",
            header { class: "page-header",
                h2 { "Courses" }
                if session.can_manage_courses() {
                    Link { class: "btn btn-primary", to: Route::NewCourse {}, "New course" }
                }
            }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(dashboard) => {
                    let criteria_value = criteria();
                    let visible = dashboard.visible(&criteria_value);
                    let cards = map_course_cards(&visible);
                    let bar = FilterBarVm::new(&criteria_value, dashboard.entries.len(), cards.len());
                    let empty_message = if dashboard.courses_unavailable {
                        Some("Courses are unavailable right now. Please try again later.")
                    } else {
                        bar.empty_message
                    };
                    let show_clear = bar.show_clear && !dashboard.courses_unavailable;
                    rsx! {
                        FilterBar { bar: bar.clone(), criteria }
                        if let Some(message) = empty_message {
                            div { class: "empty-state",
                                p { "{message}" }
                                if show_clear {
                                    button {
                                        class: "btn",
                                        r#type: "button",
                                        onclick: move |_| criteria.with_mut(FilterCriteria::clear),
                                        "Clear filters"
                                    }
                                }
                            }
                        } else {
                            if !dashboard.progress_available {
                                p { class: "notice notice--error", "Progress is unavailable right now." }
                            }
                            ul { class: "course-grid",
                                for card in cards {
                                    CourseCard { key: "{card.id}", card }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FilterBar(bar: FilterBarVm, criteria: Signal<FilterCriteria>) -> Element {
    let mut criteria = criteria;
    rsx! {
        div { class: "filter-bar",
            input {
                class: "filter-search",
                r#type: "search",
                placeholder: "Search courses",
                value: "{bar.search_term}",
                oninput: move |evt| criteria.with_mut(|c| c.search_term = evt.value()),
            }
            select {
                class: "filter-category",
                value: "{bar.category_value}",
                onchange: move |evt| {
                    criteria.with_mut(|c| c.category = category_filter_from_value(&evt.value()));
                },
                for opt in bar.category_options.iter() {
                    option {
                        value: "{opt.value}",
                        selected: opt.value == bar.category_value,
                        "{opt.label}"
                    }
                }
            }
            select {
                class: "filter-level",
                value: "{bar.level_value}",
                onchange: move |evt| {
                    criteria.with_mut(|c| c.level = level_filter_from_value(&evt.value()));
                },
                for opt in bar.level_options.iter() {
                    option {
                        value: "{opt.value}",
                        selected: opt.value == bar.level_value,
                        "{opt.label}"
                    }
                }
            }
            label { class: "filter-featured",
                input {
                    r#type: "checkbox",
                    checked: bar.featured_only,
                    onchange: move |evt| criteria.with_mut(|c| c.featured_only = evt.checked()),
                }
                "Featured only"
            }
            if bar.show_clear {
                div { class: "filter-active",
                    for badge in bar.active_badges.iter() {
                        span { class: "badge", "{badge}" }
                    }
                    button {
                        class: "btn btn-link",
                        r#type: "button",
                        onclick: move |_| criteria.with_mut(FilterCriteria::clear),
                        "Clear"
                    }
                }
            }
        }
    }
}

#[component]
fn CourseCard(card: CourseCardVm) -> Element {
    let class = if card.is_featured {
        "course-card course-card--featured"
    } else {
        "course-card"
    };
    rsx! {
        li { class: "{class}",
            Link { class: "course-link", to: Route::Course { course_id: card.id },
                h3 { "{card.title}" }
            }
            p { class: "course-description", "{card.description}" }
            div { class: "course-badges",
                for badge in card.badges.iter() {
                    span { class: "badge", "{badge}" }
                }
            }
            if let Some(percent) = card.progress_percent {
                div { class: "progress",
                    div { class: "progress-bar", style: "width: {percent}%" }
                    span { class: "progress-label", "{percent}% complete" }
                }
            }
        }
    }
}
