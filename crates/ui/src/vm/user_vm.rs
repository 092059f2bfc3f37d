use academy_core::model::{Role, UserId};
use services::UserSummary;

use crate::vm::time_fmt::format_date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRowVm {
    pub user_id: UserId,
    pub display_name: String,
    pub role: Role,
    pub role_label: &'static str,
    pub joined: String,
}

impl From<&UserSummary> for UserRowVm {
    fn from(summary: &UserSummary) -> Self {
        let display_name = summary
            .profile
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map_or_else(|| "Unnamed user".to_string(), str::to_string);
        Self {
            user_id: summary.profile.user_id,
            display_name,
            role: summary.role,
            role_label: role_label(summary.role),
            joined: format_date(summary.profile.created_at),
        }
    }
}

#[must_use]
pub fn map_user_rows(users: &[UserSummary]) -> Vec<UserRowVm> {
    users.iter().map(UserRowVm::from).collect()
}

#[must_use]
pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "Admin",
        Role::Producer => "Producer",
        Role::Student => "Student",
    }
}
