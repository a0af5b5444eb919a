use chrono::Utc;
use gatehouse_core::{
    CredentialHasher, CredentialHasherError, Notification, Password, ResetToken, User, UserStore,
    UserStoreError,
};

/// Reset password use case - consumes a reset token at most once.
///
/// The token swap is a single store mutation: the new password hash lands and
/// the pending reset clears in the same step, so there is no window where the
/// old token is still valid alongside the new password, and a concurrent
/// second consume of the same token loses cleanly.
pub struct ResetPasswordUseCase<'a, U, H>
where
    U: UserStore,
    H: CredentialHasher,
{
    user_store: &'a U,
    hasher: &'a H,
}

#[derive(Debug)]
pub struct ResetPasswordOutcome {
    pub user: User,
    pub effects: Vec<Notification>,
}

#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    /// No matching token and expired token are deliberately one failure, so
    /// the endpoint cannot be used as a token-guessing oracle.
    #[error("Invalid or expired token")]
    TokenInvalid,
    #[error("{0}")]
    Hasher(#[from] CredentialHasherError),
    #[error("User store error: {0}")]
    Store(UserStoreError),
}

impl<'a, U, H> ResetPasswordUseCase<'a, U, H>
where
    U: UserStore,
    H: CredentialHasher,
{
    pub fn new(user_store: &'a U, hasher: &'a H) -> Self {
        Self { user_store, hasher }
    }

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        presented: ResetToken,
        new_password: Password,
    ) -> Result<ResetPasswordOutcome, ResetPasswordError> {
        let new_digest = self.hasher.hash(new_password).await?;

        let user = match self
            .user_store
            .consume_reset_token(&presented.digest(), new_digest, Utc::now())
            .await
        {
            Ok(user) => user,
            Err(UserStoreError::NoMatchingResetToken) => {
                return Err(ResetPasswordError::TokenInvalid);
            }
            Err(e) => return Err(ResetPasswordError::Store(e)),
        };

        let effects = vec![Notification::password_reset_success(&user)];
        Ok(ResetPasswordOutcome { user, effects })
    }
}
