//! User profile repository.
//!
//! Profiles are one-to-one with users and scoped to their owner: a caller
//! only ever sees their own profile.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use super::error::{RepoResult, RepositoryError};
use crate::entities::{sea_orm_active_enums::ProfileRole, user_profiles, users};

/// Profile with the owning user's identity fields.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    /// Profile ID.
    pub id: Uuid,
    /// Owning user ID.
    pub user: Uuid,
    /// Owning user's login name.
    pub username: String,
    /// Owning user's email.
    pub email: String,
    /// Owning user's given name.
    pub first_name: String,
    /// Owning user's family name.
    pub last_name: String,
    /// Role within the firm.
    pub role: ProfileRole,
    /// Industries the user follows.
    pub preferred_industries: Value,
    /// Notification switches.
    pub notification_preferences: Value,
    /// Creation time.
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    /// Last update time.
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

impl ProfileView {
    fn new(profile: user_profiles::Model, user: users::Model) -> Self {
        Self {
            id: profile.id,
            user: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: profile.role,
            preferred_industries: profile.preferred_industries,
            notification_preferences: profile.notification_preferences,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// Fields a user may change on their profile.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileInput {
    /// New role.
    pub role: Option<ProfileRole>,
    /// Replacement industry list.
    #[validate(length(max = 50))]
    pub preferred_industries: Option<Vec<String>>,
    /// Replacement notification settings.
    pub notification_preferences: Option<Map<String, Value>>,
}

/// Profile repository.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    db: DatabaseConnection,
}

impl ProfileRepository {
    /// Creates a new profile repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the caller's profile (zero or one entries).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(&self, user_id: Uuid) -> RepoResult<Vec<ProfileView>> {
        let rows = user_profiles::Entity::find()
            .filter(user_profiles::Column::UserId.eq(user_id))
            .find_also_related(users::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(profile, user)| user.map(|u| ProfileView::new(profile, u)))
            .collect())
    }

    /// Finds a profile by ID, visible only to its owner.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the profile does not exist or belongs to someone else.
    pub async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> RepoResult<ProfileView> {
        user_profiles::Entity::find_by_id(id)
            .filter(user_profiles::Column::UserId.eq(user_id))
            .find_also_related(users::Entity)
            .one(&self.db)
            .await?
            .and_then(|(profile, user)| user.map(|u| ProfileView::new(profile, u)))
            .ok_or_else(|| RepositoryError::not_found("Profile", id))
    }

    /// Returns the user's profile, creating a default analyst profile if missing.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReference` if the user does not exist.
    pub async fn get_or_create(&self, user_id: Uuid) -> RepoResult<ProfileView> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::InvalidReference {
                entity: "User",
                id: user_id,
            })?;

        let profile = match self.profile_of(user_id).await? {
            Some(profile) => profile,
            None => match self.insert_profile(user_id, ProfileRole::Analyst).await {
                Ok(profile) => profile,
                // A concurrent request created it between the lookup and the insert.
                Err(RepositoryError::Conflict(_)) => self
                    .profile_of(user_id)
                    .await?
                    .ok_or_else(|| RepositoryError::not_found("Profile", user_id))?,
                Err(err) => return Err(err),
            },
        };

        Ok(ProfileView::new(profile, user))
    }

    /// Creates a profile with the given role.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the user already has a profile.
    pub async fn create(&self, user_id: Uuid, role: ProfileRole) -> RepoResult<user_profiles::Model> {
        self.insert_profile(user_id, role).await
    }

    /// Applies an update to a profile owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the profile is not the caller's.
    pub async fn update_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> RepoResult<ProfileView> {
        let profile = user_profiles::Entity::find_by_id(id)
            .filter(user_profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Profile", id))?;

        self.apply(profile, input).await?;
        self.find_for_user(id, user_id).await
    }

    /// Updates the caller's profile, creating it first if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn update_me(&self, user_id: Uuid, input: UpdateProfileInput) -> RepoResult<ProfileView> {
        let current = self.get_or_create(user_id).await?;
        self.update_for_user(current.id, user_id, input).await
    }

    async fn apply(&self, profile: user_profiles::Model, input: UpdateProfileInput) -> RepoResult<()> {
        let mut active = profile.into_active_model();
        if let Some(role) = input.role {
            active.role = Set(role);
        }
        if let Some(industries) = input.preferred_industries {
            active.preferred_industries = Set(Value::from(industries));
        }
        if let Some(preferences) = input.notification_preferences {
            active.notification_preferences = Set(Value::Object(preferences));
        }
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await?;
        Ok(())
    }

    async fn profile_of(&self, user_id: Uuid) -> Result<Option<user_profiles::Model>, DbErr> {
        user_profiles::Entity::find()
            .filter(user_profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    async fn insert_profile(&self, user_id: Uuid, role: ProfileRole) -> RepoResult<user_profiles::Model> {
        let now = Utc::now().into();
        let profile = user_profiles::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            role: Set(role),
            preferred_industries: Set(Value::Array(Vec::new())),
            notification_preferences: Set(Value::Object(Map::new())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        profile
            .insert(&self.db)
            .await
            .map_err(|e| RepositoryError::from_write(e, || "User already has a profile".to_string()))
    }
}
