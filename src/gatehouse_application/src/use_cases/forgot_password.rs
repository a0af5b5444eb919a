use gatehouse_core::{
    Email, EmailClient, EmailClientError, Notification, PendingReset, ResetToken, UserStore,
    UserStoreError,
};

/// Forgot password use case - generates a single-use reset token and mails it.
///
/// This is the one place where email delivery is part of the primary result:
/// a reset link that never reaches the inbox leaves the caller stuck, so a
/// dispatch failure fails the whole operation. The plaintext token lives only
/// in the outgoing notification; storage sees its digest and expiry.
pub struct ForgotPasswordUseCase<'a, U, E>
where
    U: UserStore,
    E: EmailClient,
{
    user_store: &'a U,
    email_client: &'a E,
}

#[derive(Debug, thiserror::Error)]
pub enum ForgotPasswordError {
    #[error("No user found with that email")]
    UserNotFound,
    #[error("{0}")]
    Dispatch(#[from] EmailClientError),
    #[error("User store error: {0}")]
    Store(UserStoreError),
}

impl<'a, U, E> ForgotPasswordUseCase<'a, U, E>
where
    U: UserStore,
    E: EmailClient,
{
    pub fn new(user_store: &'a U, email_client: &'a E) -> Self {
        Self {
            user_store,
            email_client,
        }
    }

    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<(), ForgotPasswordError> {
        let credentials = match self.user_store.find_credentials_by_email(&email).await {
            Ok(credentials) => credentials,
            Err(UserStoreError::UserNotFound) => return Err(ForgotPasswordError::UserNotFound),
            Err(e) => return Err(ForgotPasswordError::Store(e)),
        };

        let token = ResetToken::generate();
        let pending = PendingReset::starting_now(&token);

        self.user_store
            .store_reset_token(
                &credentials.user.id,
                pending.token_digest,
                pending.expires_at,
            )
            .await
            .map_err(ForgotPasswordError::Store)?;

        self.email_client
            .send(&Notification::password_reset(&credentials.user, token))
            .await?;

        Ok(())
    }
}
