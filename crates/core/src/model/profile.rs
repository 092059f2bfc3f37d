use chrono::{DateTime, Utc};
use thiserror::Error;
use url::Url;

use crate::model::ids::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("avatar URL is not a valid absolute URL: {0}")]
    InvalidAvatarUrl(String),
}

/// Display data for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_id: UserId,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    #[must_use]
    pub fn new(user_id: UserId, name: Option<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            name,
            avatar_url: None,
            created_at,
        }
    }

    #[must_use]
    pub fn apply(&self, update: &ProfileUpdate) -> Self {
        Self {
            user_id: self.user_id,
            name: update.name.clone(),
            avatar_url: update.avatar_url.clone(),
            created_at: self.created_at,
        }
    }
}

/// Validated edit from the profile form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileUpdate {
    name: Option<String>,
    avatar_url: Option<String>,
}

impl ProfileUpdate {
    /// Normalise raw form input.
    ///
    /// Blank fields become `None`.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::InvalidAvatarUrl` when a non-blank avatar URL
    /// does not parse as an absolute URL.
    pub fn new(name: &str, avatar_url: &str) -> Result<Self, ProfileError> {
        let name = non_blank(name);
        let avatar_url = match non_blank(avatar_url) {
            Some(raw) => {
                Url::parse(&raw).map_err(|_| ProfileError::InvalidAvatarUrl(raw.clone()))?;
                Some(raw)
            }
            None => None,
        };
        Ok(Self { name, avatar_url })
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn blank_fields_clear_values() {
        let update = ProfileUpdate::new("  ", "").unwrap();
        assert_eq!(update.name(), None);
        assert_eq!(update.avatar_url(), None);
    }

    #[test]
    fn avatar_must_be_absolute_url() {
        let err = ProfileUpdate::new("Ana", "not a url").unwrap_err();
        assert_eq!(err, ProfileError::InvalidAvatarUrl("not a url".into()));

        let ok = ProfileUpdate::new(" Ana ", " https://cdn.example.com/a.png ").unwrap();
        assert_eq!(ok.name(), Some("Ana"));
        assert_eq!(ok.avatar_url(), Some("https://cdn.example.com/a.png"));
    }

    #[test]
    fn apply_keeps_identity() {
        let profile = Profile::new(UserId::random(), Some("Old".into()), fixed_now());
        let updated = profile.apply(&ProfileUpdate::new("New", "").unwrap());
        assert_eq!(updated.user_id, profile.user_id);
        assert_eq!(updated.created_at, profile.created_at);
        assert_eq!(updated.name.as_deref(), Some("New"));
    }
}
