use std::collections::HashMap;
use std::sync::Arc;

use academy_core::model::{Profile, Role, UserId, UserSession};
use storage::repository::{ProfileRepository, RoleRepository};

use crate::error::UserAdminError;
use crate::session::stored_role;

/// A profile joined with its role for the user management table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub profile: Profile,
    pub role: Role,
}

/// Admin-only listing and role assignment.
#[derive(Clone)]
pub struct UserAdminService {
    profiles: Arc<dyn ProfileRepository>,
    roles: Arc<dyn RoleRepository>,
}

impl UserAdminService {
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfileRepository>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { profiles, roles }
    }

    /// Every profile with its role, oldest first. Users without a role are students.
    ///
    /// # Errors
    ///
    /// Returns `UserAdminError::Forbidden` unless the session user is an admin.
    /// Returns `UserAdminError::Storage` if repository access fails.
    pub async fn list_users(
        &self,
        session: &UserSession,
    ) -> Result<Vec<UserSummary>, UserAdminError> {
        self.ensure_admin(session).await?;

        let (profiles, roles) = tokio::join!(self.profiles.list_profiles(), self.roles.list_roles());
        let roles: HashMap<UserId, Role> = roles?.into_iter().collect();

        Ok(profiles?
            .into_iter()
            .map(|profile| {
                let role = roles.get(&profile.user_id).copied().unwrap_or_default();
                UserSummary { profile, role }
            })
            .collect())
    }

    /// Assign `role` to `user_id`. Admins may change their own role.
    ///
    /// # Errors
    ///
    /// Returns `UserAdminError::Forbidden` unless the session user is an admin.
    /// Returns `UserAdminError::Storage` if the user has no profile or the write fails.
    pub async fn update_user_role(
        &self,
        session: &UserSession,
        user_id: UserId,
        role: Role,
    ) -> Result<(), UserAdminError> {
        self.ensure_admin(session).await?;
        self.roles.set_role(user_id, role).await?;
        tracing::info!(%user_id, role = role.as_str(), by = %session.user_id, "role updated");
        Ok(())
    }

    // The stored role wins over the one captured in the session.
    async fn ensure_admin(&self, session: &UserSession) -> Result<(), UserAdminError> {
        if session.can_manage_users()
            && stored_role(self.roles.as_ref(), session.user_id)
                .await?
                .can_manage_users()
        {
            Ok(())
        } else {
            tracing::warn!(user_id = %session.user_id, "user management refused");
            Err(UserAdminError::Forbidden)
        }
    }
}
