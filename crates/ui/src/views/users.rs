use academy_core::model::{Role, UserId};
use dioxus::prelude::*;
use services::UserAdminError;

use crate::context::{AppContext, CurrentSession};
use crate::views::{
    AccessDenied, NoticeBanner, SignInView, ViewError, ViewState, flash_notice,
    view_state_from_resource,
};
use crate::vm::{Notice, UserRowVm, map_user_rows, role_label};

#[derive(Clone, Copy)]
pub(crate) struct UsersState {
    pub current: CurrentSession,
    pub rows: Resource<Result<Vec<UserRowVm>, ViewError>>,
    pub notice: Signal<Option<Notice>>,
}

pub(crate) fn use_users_state() -> UsersState {
    let ctx = use_context::<AppContext>();
    let current = use_context::<CurrentSession>();
    let admin = ctx.user_admin();
    let notice = use_signal(|| None::<Notice>);

    let rows = use_resource(move || {
        let admin = admin.clone();
        async move {
            let session = current.get().ok_or(ViewError::Forbidden)?;
            let users = admin.list_users(&session).await.map_err(|err| match err {
                UserAdminError::Forbidden => ViewError::Forbidden,
                other => {
                    tracing::warn!(error = %other, "failed to list users");
                    ViewError::Unknown
                }
            })?;
            Ok::<_, ViewError>(map_user_rows(&users))
        }
    });

    UsersState {
        current,
        rows,
        notice,
    }
}

/// Role assignment. Changing your own role re-resolves the session so gated
/// links and pages follow the stored role.
pub(crate) fn use_role_change(state: UsersState) -> Callback<(UserId, Role)> {
    let ctx = use_context::<AppContext>();
    let admin = ctx.user_admin();
    let provider = ctx.session_provider();

    use_callback(move |(user_id, role): (UserId, Role)| {
        let Some(session) = state.current.get() else {
            return;
        };
        let admin = admin.clone();
        let provider = provider.clone();
        let mut rows = state.rows;
        spawn(async move {
            match admin.update_user_role(&session, user_id, role).await {
                Ok(()) => {
                    if user_id == session.user_id {
                        state.current.refresh(provider).await;
                    }
                    flash_notice(
                        state.notice,
                        Notice::success(format!("Role updated to {}.", role_label(role))),
                    );
                    rows.restart();
                }
                Err(UserAdminError::Forbidden) => {
                    state.current.refresh(provider).await;
                    flash_notice(
                        state.notice,
                        Notice::error("You no longer have permission to manage users."),
                    );
                }
                Err(err) => {
                    tracing::warn!(error = %err, %user_id, "failed to update role");
                    flash_notice(
                        state.notice,
                        Notice::error("Couldn't update the role. Please try again."),
                    );
                }
            }
        });
    })
}

pub(crate) fn render_users(state: UsersState, on_role_change: Callback<(UserId, Role)>) -> Element {
    let Some(session) = state.current.get() else {
        return rsx! { SignInView {} };
    };
    if !session.can_manage_users() {
        return rsx! { AccessDenied {} };
    }
    let notice = state.notice;

    rsx! {
        div { class: "page users",
            h2 { "Users" }
            NoticeBanner { notice }

            match view_state_from_resource(&state.rows) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(ViewError::Forbidden) => rsx! { AccessDenied {} },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { class: "empty-state", "No users yet." }
                    } else {
                        table { class: "users-table",
                            thead {
                                tr {
                                    th { "Name" }
                                    th { "Member since" }
                                    th { "Role" }
                                }
                            }
                            tbody {
                                for row in rows {
                                    UserRow {
                                        key: "{row.user_id}",
                                        is_self: row.user_id == session.user_id,
                                        row,
                                        on_role_change,
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
pub fn UsersView() -> Element {
    let state = use_users_state();
    let on_role_change = use_role_change(state);
    render_users(state, on_role_change)
}

#[component]
fn UserRow(row: UserRowVm, is_self: bool, on_role_change: Callback<(UserId, Role)>) -> Element {
    let user_id = row.user_id;
    rsx! {
        tr {
            td {
                "{row.display_name}"
                if is_self {
                    span { class: "badge", "You" }
                }
            }
            td { "{row.joined}" }
            td {
                select {
                    class: "role-select",
                    value: row.role.as_str(),
                    onchange: move |evt| {
                        if let Ok(role) = evt.value().parse::<Role>() {
                            on_role_change.call((user_id, role));
                        }
                    },
                    for role in Role::ALL {
                        option {
                            value: role.as_str(),
                            selected: role == row.role,
                            "{role_label(role)}"
                        }
                    }
                }
            }
        }
    }
}
