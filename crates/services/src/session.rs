use std::sync::Arc;

use academy_core::model::{Role, UserId, UserSession};
use async_trait::async_trait;
use storage::repository::{ProfileRepository, RoleRepository, StorageError};

/// Source of the signed-in user. `None` means nobody is signed in.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the role store cannot be read.
    async fn current_session(&self) -> Result<Option<UserSession>, StorageError>;
}

/// Resolves a locally configured user id against the profile and role stores.
#[derive(Clone)]
pub struct StoredSessionProvider {
    user_id: Option<UserId>,
    profiles: Arc<dyn ProfileRepository>,
    roles: Arc<dyn RoleRepository>,
}

impl StoredSessionProvider {
    #[must_use]
    pub fn new(
        user_id: Option<UserId>,
        profiles: Arc<dyn ProfileRepository>,
        roles: Arc<dyn RoleRepository>,
    ) -> Self {
        Self {
            user_id,
            profiles,
            roles,
        }
    }
}

#[async_trait]
impl SessionProvider for StoredSessionProvider {
    async fn current_session(&self) -> Result<Option<UserSession>, StorageError> {
        let Some(user_id) = self.user_id else {
            return Ok(None);
        };
        if self.profiles.get_profile(user_id).await?.is_none() {
            tracing::debug!(%user_id, "no profile for configured user");
            return Ok(None);
        }
        let role = stored_role(self.roles.as_ref(), user_id).await?;
        Ok(Some(UserSession::new(user_id, role)))
    }
}

/// Role currently stored for `user_id`. Users without a role row are students.
pub(crate) async fn stored_role(
    roles: &dyn RoleRepository,
    user_id: UserId,
) -> Result<Role, StorageError> {
    Ok(roles.get_role(user_id).await?.unwrap_or_default())
}

/// Always returns the same session.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSessionProvider {
    session: Option<UserSession>,
}

impl StaticSessionProvider {
    #[must_use]
    pub fn signed_in(session: UserSession) -> Self {
        Self {
            session: Some(session),
        }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self { session: None }
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn current_session(&self) -> Result<Option<UserSession>, StorageError> {
        Ok(self.session)
    }
}
