use academy_core::model::{Profile, ProfileError};
use dioxus::prelude::*;
use services::ProfileServiceError;

use crate::context::{AppContext, CurrentSession};
use crate::views::{
    NoticeBanner, SignInView, ViewError, ViewState, flash_notice, view_state_from_resource,
};
use crate::vm::Notice;

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let current = use_context::<CurrentSession>();
    let profiles = ctx.profiles();
    let profiles_for_resource = profiles.clone();

    let mut name = use_signal(String::new);
    let mut avatar_url = use_signal(String::new);
    let mut field_error = use_signal(|| None::<String>);
    let notice = use_signal(|| None::<Notice>);
    let mut saving = use_signal(|| false);

    let resource = use_resource(move || {
        let profiles = profiles_for_resource.clone();
        async move {
            let session = current.get().ok_or(ViewError::Forbidden)?;
            let profile = profiles.get_profile(&session).await.map_err(|err| {
                tracing::warn!(error = %err, "failed to load profile");
                ViewError::Unknown
            })?;
            profile.ok_or(ViewError::NotFound)
        }
    });
    let state = view_state_from_resource(&resource);

    use_effect(move || {
        let loaded = resource
            .value()
            .read()
            .as_ref()
            .and_then(|value| value.as_ref().ok())
            .cloned();
        if let Some(profile) = loaded {
            fill_form(&profile, name, avatar_url);
        }
    });

    let on_save = use_callback(move |()| {
        let Some(session) = current.get() else {
            return;
        };
        let profiles = profiles.clone();
        let name_value = name();
        let avatar_value = avatar_url();
        spawn(async move {
            saving.set(true);
            match profiles
                .update_profile(&session, &name_value, &avatar_value)
                .await
            {
                Ok(profile) => {
                    field_error.set(None);
                    fill_form(&profile, name, avatar_url);
                    flash_notice(notice, Notice::success("Profile updated."));
                }
                Err(ProfileServiceError::Validation(ProfileError::InvalidAvatarUrl(_))) => {
                    field_error.set(Some("Avatar URL must be a full URL, e.g. https://...".into()));
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to update profile");
                    flash_notice(
                        notice,
                        Notice::error("Couldn't update your profile. Please try again."),
                    );
                }
            }
            saving.set(false);
        });
    });

    if current.get().is_none() {
        return rsx! { SignInView {} };
    }

    rsx! {
        div { class: "page profile",
            h2 { "Profile" }
            NoticeBanner { notice }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(_) => rsx! {
                    form {
                        class: "profile-form",
                        onsubmit: move |evt| {
                            evt.prevent_default();
                            on_save.call(());
                        },
                        label { r#for: "profile-name", "Name" }
                        input {
                            id: "profile-name",
                            value: "{name}",
                            oninput: move |evt| name.set(evt.value()),
                        }
                        label { r#for: "profile-avatar", "Avatar URL" }
                        input {
                            id: "profile-avatar",
                            r#type: "url",
                            value: "{avatar_url}",
                            oninput: move |evt| avatar_url.set(evt.value()),
                        }
                        if let Some(message) = field_error() {
                            p { class: "field-error", "{message}" }
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "submit",
                            disabled: saving(),
                            if saving() { "Saving..." } else { "Save" }
                        }
                    }
                },
            }
        }
    }
}

fn fill_form(profile: &Profile, mut name: Signal<String>, mut avatar_url: Signal<String>) {
    name.set(profile.name.clone().unwrap_or_default());
    avatar_url.set(profile.avatar_url.clone().unwrap_or_default());
}
