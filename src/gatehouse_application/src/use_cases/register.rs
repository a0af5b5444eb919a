use gatehouse_core::{
    CredentialHasher, CredentialHasherError, DisplayName, Email, NewUser, Notification, Password,
    User, UserStore, UserStoreError,
};

/// Register use case - creates a user record from validated input.
pub struct RegisterUseCase<'a, U, H>
where
    U: UserStore,
    H: CredentialHasher,
{
    user_store: &'a U,
    hasher: &'a H,
}

/// What a successful registration hands back to the transport layer:
/// the created record plus the post-commit notifications to dispatch.
#[derive(Debug)]
pub struct RegisterOutcome {
    pub user: User,
    pub effects: Vec<Notification>,
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    /// The email is already registered. Carries the optional alert to the
    /// existing account; delivery stays a side effect of the caller.
    #[error("User with this email already exists")]
    EmailTaken { alert: Option<Notification> },
    #[error("{0}")]
    Hasher(#[from] CredentialHasherError),
    #[error("User store error: {0}")]
    Store(UserStoreError),
}

impl<'a, U, H> RegisterUseCase<'a, U, H>
where
    U: UserStore,
    H: CredentialHasher,
{
    pub fn new(user_store: &'a U, hasher: &'a H) -> Self {
        Self { user_store, hasher }
    }

    /// Hash the credential, persist the record and describe the emails to
    /// send. The store's uniqueness constraint is the final arbiter under
    /// concurrent identical registrations; the loser surfaces
    /// [`RegisterError::EmailTaken`], never a generic failure.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        name: DisplayName,
        email: Email,
        password: Password,
    ) -> Result<RegisterOutcome, RegisterError> {
        let digest = self.hasher.hash(password).await?;
        let new_user = NewUser::create(name, email.clone(), digest);

        let user = match self.user_store.insert_user(new_user).await {
            Ok(user) => user,
            Err(UserStoreError::EmailTaken) => {
                return Err(RegisterError::EmailTaken {
                    alert: self.conflict_alert(&email).await,
                });
            }
            Err(e) => return Err(RegisterError::Store(e)),
        };

        let effects = vec![Notification::welcome(&user)];
        Ok(RegisterOutcome { user, effects })
    }

    /// Alert the holder of the existing account, if they opted in. Best
    /// effort: if the record vanished in the meantime there is nobody to warn.
    async fn conflict_alert(&self, email: &Email) -> Option<Notification> {
        let existing = self.user_store.find_credentials_by_email(email).await.ok()?;
        Notification::registration_attempt_alert(&existing.user)
    }
}
