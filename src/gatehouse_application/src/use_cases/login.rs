use gatehouse_core::{
    CredentialHasher, CredentialHasherError, Email, LoginAlertStatus, Notification, Password, User,
    UserStore, UserStoreError,
};

/// Login use case - verifies a credential pair against the stored hash.
pub struct LoginUseCase<'a, U, H>
where
    U: UserStore,
    H: CredentialHasher,
{
    user_store: &'a U,
    hasher: &'a H,
}

#[derive(Debug)]
pub struct LoginOutcome {
    pub user: User,
    pub effects: Vec<Notification>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Covers both "no such user" and "wrong password"; the two are not
    /// distinguishable from outside. A failed-attempt alert may ride along
    /// when the account exists and opted in - the credential check has
    /// already concluded by the time it is built.
    #[error("Invalid credentials")]
    InvalidCredentials { alert: Option<Notification> },
    #[error("{0}")]
    Hasher(CredentialHasherError),
    #[error("User store error: {0}")]
    Store(UserStoreError),
}

impl<'a, U, H> LoginUseCase<'a, U, H>
where
    U: UserStore,
    H: CredentialHasher,
{
    pub fn new(user_store: &'a U, hasher: &'a H) -> Self {
        Self { user_store, hasher }
    }

    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<LoginOutcome, LoginError> {
        let credentials = match self.user_store.find_credentials_by_email(&email).await {
            Ok(credentials) => credentials,
            Err(UserStoreError::UserNotFound) => {
                return Err(LoginError::InvalidCredentials { alert: None });
            }
            Err(e) => return Err(LoginError::Store(e)),
        };

        match self
            .hasher
            .verify(credentials.password_digest.clone(), password)
            .await
        {
            Ok(()) => {}
            Err(CredentialHasherError::VerificationFailed) => {
                return Err(LoginError::InvalidCredentials {
                    alert: Notification::login_alert(&credentials.user, LoginAlertStatus::Failed),
                });
            }
            Err(e) => return Err(LoginError::Hasher(e)),
        }

        let effects =
            Notification::login_alert(&credentials.user, LoginAlertStatus::Successful)
                .into_iter()
                .collect();

        Ok(LoginOutcome {
            user: credentials.user,
            effects,
        })
    }
}
