use std::sync::Arc;

use academy_core::model::{Profile, ProfileUpdate, UserSession};
use storage::repository::ProfileRepository;

use crate::error::ProfileServiceError;

/// Reads and edits the signed-in user's own profile.
#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` if repository access fails.
    pub async fn get_profile(
        &self,
        session: &UserSession,
    ) -> Result<Option<Profile>, ProfileServiceError> {
        Ok(self.profiles.get_profile(session.user_id).await?)
    }

    /// Validate raw form input and apply it to the session user's profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Validation` for a malformed avatar URL.
    /// Returns `ProfileServiceError::Storage` if the profile is missing or the write fails.
    pub async fn update_profile(
        &self,
        session: &UserSession,
        name: &str,
        avatar_url: &str,
    ) -> Result<Profile, ProfileServiceError> {
        let update = ProfileUpdate::new(name, avatar_url)?;
        let profile = self.profiles.update_profile(session.user_id, &update).await?;
        tracing::info!(user_id = %session.user_id, "profile updated");
        Ok(profile)
    }
}
