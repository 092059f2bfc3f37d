use academy_core::model::{CourseDraft, CourseError, CourseLevel, KNOWN_CATEGORIES};
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::CourseServiceError;

use crate::context::{AppContext, CurrentSession};
use crate::routes::Route;
use crate::views::{AccessDenied, NoticeBanner, SignInView, flash_notice};
use crate::vm::{Notice, category_label, level_label};

#[derive(Clone, Debug, PartialEq, Eq)]
struct CourseForm {
    title: String,
    description: String,
    category: String,
    level: String,
    duration_minutes: String,
    is_published: bool,
    is_featured: bool,
    is_extra: bool,
}

impl Default for CourseForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: String::new(),
            level: String::new(),
            duration_minutes: String::new(),
            is_published: true,
            is_featured: false,
            is_extra: false,
        }
    }
}

impl CourseForm {
    fn to_draft(&self) -> Result<CourseDraft, &'static str> {
        let duration = self.duration_minutes.trim();
        let duration_minutes = if duration.is_empty() {
            None
        } else {
            Some(
                duration
                    .parse::<u32>()
                    .map_err(|_| "Duration must be a whole number of minutes.")?,
            )
        };
        let category = Some(self.category.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        let level = self.level.parse::<CourseLevel>().ok();

        let draft = CourseDraft {
            is_published: self.is_published,
            is_featured: self.is_featured,
            is_extra: self.is_extra,
            category,
            level,
            duration_minutes,
            ..CourseDraft::new(self.title.clone(), self.description.clone())
        };
        draft.check().map_err(validation_message)?;
        Ok(draft)
    }
}

fn validation_message(err: CourseError) -> &'static str {
    match err {
        CourseError::EmptyTitle => "Title is required.",
        CourseError::EmptyCategory => "Category cannot be blank.",
        _ => "Please check the form and try again.",
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SaveState {
    Idle,
    Saving,
}

#[component]
pub fn NewCourseView() -> Element {
    let ctx = use_context::<AppContext>();
    let current = use_context::<CurrentSession>();
    let navigator = use_navigator();
    let courses = ctx.courses();

    let mut form = use_signal(CourseForm::default);
    let mut form_error = use_signal(|| None::<&'static str>);
    let notice = use_signal(|| None::<Notice>);
    let save_state = use_signal(|| SaveState::Idle);

    let on_submit = use_callback(move |()| {
        let Some(session) = current.get() else {
            return;
        };
        let draft = match form.read().to_draft() {
            Ok(draft) => draft,
            Err(message) => {
                form_error.set(Some(message));
                return;
            }
        };
        form_error.set(None);

        let courses = courses.clone();
        let mut save_state = save_state;
        spawn(async move {
            save_state.set(SaveState::Saving);
            match courses.create_course(&session, draft).await {
                Ok(course) => {
                    // This view unmounts on navigation.
                    navigator.push(Route::Course {
                        course_id: course.id().value(),
                    });
                    return;
                }
                Err(CourseServiceError::Validation(err)) => {
                    form_error.set(Some(validation_message(err)));
                }
                Err(CourseServiceError::Forbidden) => {
                    flash_notice(
                        notice,
                        Notice::error("Only admins and producers can create courses."),
                    );
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to create course");
                    flash_notice(
                        notice,
                        Notice::error("Couldn't create the course. Please try again."),
                    );
                }
            }
            save_state.set(SaveState::Idle);
        });
    });

    let Some(session) = current.get() else {
        return rsx! { SignInView {} };
    };
    if !session.can_manage_courses() {
        return rsx! { AccessDenied {} };
    }

    let value = form();
    let saving = save_state() == SaveState::Saving;

    rsx! {
        div { class: "page new-course",
            h2 { "New course" }
            NoticeBanner { notice }

            form {
                class: "course-form",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    on_submit.call(());
                },
                label { r#for: "course-title", "Title" }
                input {
                    id: "course-title",
                    value: "{value.title}",
                    oninput: move |evt| form.with_mut(|f| f.title = evt.value()),
                }
                if let Some(message) = form_error() {
                    p { class: "field-error", "{message}" }
                }

                label { r#for: "course-description", "Description" }
                textarea {
                    id: "course-description",
                    value: "{value.description}",
                    oninput: move |evt| form.with_mut(|f| f.description = evt.value()),
                }

                label { r#for: "course-category", "Category" }
                select {
                    id: "course-category",
                    value: "{value.category}",
                    onchange: move |evt| form.with_mut(|f| f.category = evt.value()),
                    option { value: "", selected: value.category.is_empty(), "No category" }
                    for category in KNOWN_CATEGORIES {
                        option {
                            value: category,
                            selected: value.category == category,
                            "{category_label(category)}"
                        }
                    }
                }

                label { r#for: "course-level", "Level" }
                select {
                    id: "course-level",
                    value: "{value.level}",
                    onchange: move |evt| form.with_mut(|f| f.level = evt.value()),
                    option { value: "", selected: value.level.is_empty(), "No level" }
                    for level in CourseLevel::ALL {
                        option {
                            value: level.as_str(),
                            selected: value.level == level.as_str(),
                            "{level_label(level)}"
                        }
                    }
                }

                label { r#for: "course-duration", "Duration (minutes)" }
                input {
                    id: "course-duration",
                    r#type: "number",
                    min: "0",
                    value: "{value.duration_minutes}",
                    oninput: move |evt| form.with_mut(|f| f.duration_minutes = evt.value()),
                }

                label { class: "checkbox",
                    input {
                        r#type: "checkbox",
                        checked: value.is_published,
                        onchange: move |evt| form.with_mut(|f| f.is_published = evt.checked()),
                    }
                    "Published"
                }
                label { class: "checkbox",
                    input {
                        r#type: "checkbox",
                        checked: value.is_featured,
                        onchange: move |evt| form.with_mut(|f| f.is_featured = evt.checked()),
                    }
                    "Featured"
                }
                label { class: "checkbox",
                    input {
                        r#type: "checkbox",
                        checked: value.is_extra,
                        onchange: move |evt| form.with_mut(|f| f.is_extra = evt.checked()),
                    }
                    "Extra course"
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: saving,
                    if saving { "Creating..." } else { "Create course" }
                }
            }
        }
    }
}
