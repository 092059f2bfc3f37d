use academy_core::model::{CourseId, LessonId};
use dioxus::prelude::*;
use dioxus_router::Link;
use services::{CoursePage, ProgressError};

use crate::context::{AppContext, CurrentSession};
use crate::routes::Route;
use crate::views::{NoticeBanner, ViewError, ViewState, flash_notice, view_state_from_resource};
use crate::vm::{CourseDetailVm, LessonItemVm, Notice};

#[derive(Clone, Copy)]
pub(crate) struct CourseState {
    pub current: CurrentSession,
    pub loaded: Resource<Result<CoursePage, ViewError>>,
    pub page: Signal<Option<CoursePage>>,
    pub notice: Signal<Option<Notice>>,
    pub pending: Signal<Option<LessonId>>,
}

pub(crate) fn use_course_state(course_id: CourseId) -> CourseState {
    let ctx = use_context::<AppContext>();
    let current = use_context::<CurrentSession>();
    let progress = ctx.progress();

    let mut page = use_signal(|| None::<CoursePage>);
    let notice = use_signal(|| None::<Notice>);
    let pending = use_signal(|| None::<LessonId>);

    let loaded = use_resource(use_reactive!(|course_id| {
        let progress = progress.clone();
        async move {
            let session = current.get().ok_or(ViewError::Forbidden)?;
            progress
                .load_course(&session, course_id)
                .await
                .map_err(|err| match err {
                    ProgressError::NotFound => ViewError::NotFound,
                    other => {
                        tracing::warn!(error = %other, %course_id, "failed to load course");
                        ViewError::Unknown
                    }
                })
        }
    }));

    use_effect(move || {
        let fresh = loaded
            .value()
            .read()
            .as_ref()
            .and_then(|value| value.as_ref().ok())
            .cloned();
        if let Some(fresh) = fresh {
            page.set(Some(fresh));
        }
    });

    CourseState {
        current,
        loaded,
        page,
        notice,
        pending,
    }
}

/// Marks a lesson completed. The local page changes only once the write succeeded.
pub(crate) fn use_complete_lesson(state: CourseState) -> Callback<LessonId> {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();

    use_callback(move |lesson_id: LessonId| {
        let Some(session) = state.current.get() else {
            return;
        };
        let progress = progress.clone();
        let mut page = state.page;
        let mut pending = state.pending;
        pending.set(Some(lesson_id));
        spawn(async move {
            match progress.mark_complete(&session, lesson_id).await {
                Ok(()) => {
                    page.with_mut(|page| {
                        if let Some(page) = page.as_mut() {
                            page.record_completion(lesson_id);
                        }
                    });
                    flash_notice(state.notice, Notice::success("Lesson marked as completed."));
                }
                Err(err) => {
                    tracing::warn!(error = %err, %lesson_id, "failed to mark lesson complete");
                    flash_notice(
                        state.notice,
                        Notice::error("Couldn't mark the lesson as completed."),
                    );
                }
            }
            pending.set(None);
        });
    })
}

pub(crate) fn render_course(state: CourseState, on_complete: Callback<LessonId>) -> Element {
    let notice = state.notice;
    let detail = state.page.read().as_ref().map(CourseDetailVm::from);
    let pending = *state.pending.read();

    rsx! {
        div { class: "page course-page",
            Link { class: "back-link", to: Route::Dashboard {}, "Back to courses" }
            NoticeBanner { notice }

            match (view_state_from_resource(&state.loaded), detail) {
                (ViewState::Error(err), _) => rsx! {
                    p { "{err.message()}" }
                },
                (_, Some(detail)) => rsx! {
                    CourseDetail { detail, pending, on_complete }
                },
                _ => rsx! {
                    p { "Loading..." }
                },
            }
        }
    }
}

#[component]
pub fn CourseView(course_id: u64) -> Element {
    let state = use_course_state(CourseId::new(course_id));
    let on_complete = use_complete_lesson(state);
    render_course(state, on_complete)
}

#[component]
fn CourseDetail(
    detail: CourseDetailVm,
    pending: Option<LessonId>,
    on_complete: Callback<LessonId>,
) -> Element {
    rsx! {
        header { class: "course-header",
            h2 { "{detail.title}" }
            if detail.is_extra {
                span { class: "badge", "Extra" }
            }
            p { "{detail.description}" }
            if let Some(percent) = detail.progress_percent {
                div { class: "progress",
                    div { class: "progress-bar", style: "width: {percent}%" }
                    span { class: "progress-label", "{percent}% complete" }
                }
            }
            p { class: "course-completed", "{detail.completed_label}" }
        }
        if detail.lessons.is_empty() {
            p { class: "empty-state", "This course has no lessons yet." }
        } else {
            ol { class: "lesson-list",
                for lesson in detail.lessons {
                    LessonRow {
                        key: "{lesson.id}",
                        busy: pending == Some(lesson.id),
                        lesson,
                        on_complete,
                    }
                }
            }
        }
    }
}

#[component]
fn LessonRow(lesson: LessonItemVm, busy: bool, on_complete: Callback<LessonId>) -> Element {
    let lesson_id = lesson.id;
    rsx! {
        li { class: if lesson.completed { "lesson lesson--done" } else { "lesson" },
            span { class: "lesson-position", "{lesson.position}." }
            span { class: "lesson-title", "{lesson.title}" }
            if lesson.completed {
                span { class: "lesson-status", "Completed" }
            } else {
                button {
                    class: "btn",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| on_complete.call(lesson_id),
                    if busy { "Saving..." } else { "Mark as completed" }
                }
            }
        }
    }
}
