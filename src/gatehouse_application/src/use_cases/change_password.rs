use gatehouse_core::{
    CredentialHasher, CredentialHasherError, Password, UserId, UserStore, UserStoreError,
};

/// Change password use case - requires the current password to still verify.
///
/// Session tokens issued before the change stay valid until their natural
/// expiry; tokens are stateless and there is no revocation list.
pub struct ChangePasswordUseCase<'a, U, H>
where
    U: UserStore,
    H: CredentialHasher,
{
    user_store: &'a U,
    hasher: &'a H,
}

#[derive(Debug, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User not found")]
    UserNotFound,
    #[error("{0}")]
    Hasher(CredentialHasherError),
    #[error("User store error: {0}")]
    Store(UserStoreError),
}

impl<'a, U, H> ChangePasswordUseCase<'a, U, H>
where
    U: UserStore,
    H: CredentialHasher,
{
    pub fn new(user_store: &'a U, hasher: &'a H) -> Self {
        Self { user_store, hasher }
    }

    #[tracing::instrument(
        name = "ChangePasswordUseCase::execute",
        skip(self, current_password, new_password)
    )]
    pub async fn execute(
        &self,
        user_id: UserId,
        current_password: Password,
        new_password: Password,
    ) -> Result<(), ChangePasswordError> {
        let credentials = match self.user_store.find_credentials_by_id(&user_id).await {
            Ok(credentials) => credentials,
            Err(UserStoreError::UserNotFound) => return Err(ChangePasswordError::UserNotFound),
            Err(e) => return Err(ChangePasswordError::Store(e)),
        };

        match self
            .hasher
            .verify(credentials.password_digest, current_password)
            .await
        {
            Ok(()) => {}
            Err(CredentialHasherError::VerificationFailed) => {
                return Err(ChangePasswordError::InvalidCredentials);
            }
            Err(e) => return Err(ChangePasswordError::Hasher(e)),
        }

        let new_digest = self
            .hasher
            .hash(new_password)
            .await
            .map_err(ChangePasswordError::Hasher)?;

        self.user_store
            .set_password(&user_id, new_digest)
            .await
            .map_err(ChangePasswordError::Store)
    }
}
