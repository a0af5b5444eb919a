use gatehouse_core::{ProfilePatch, User, UserId, UserStore, UserStoreError};

/// Update profile use case - partial update of name and/or email.
///
/// Only supplied fields change; an omitted field keeps its prior value, which
/// is why the patch carries options instead of raw strings.
pub struct UpdateProfileUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateProfileError {
    #[error("User with this email already exists")]
    EmailTaken,
    #[error("User not found")]
    UserNotFound,
    #[error("User store error: {0}")]
    Store(UserStoreError),
}

impl<'a, U> UpdateProfileUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "UpdateProfileUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        user_id: UserId,
        patch: ProfilePatch,
    ) -> Result<User, UpdateProfileError> {
        if patch.is_empty() {
            // Nothing to change; echo the current record.
            return self.user_store.find_by_id(&user_id).await.map_err(|e| match e {
                UserStoreError::UserNotFound => UpdateProfileError::UserNotFound,
                other => UpdateProfileError::Store(other),
            });
        }

        self.user_store
            .update_profile(&user_id, patch)
            .await
            .map_err(|e| match e {
                UserStoreError::EmailTaken => UpdateProfileError::EmailTaken,
                UserStoreError::UserNotFound => UpdateProfileError::UserNotFound,
                other => UpdateProfileError::Store(other),
            })
    }
}
