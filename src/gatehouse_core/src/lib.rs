pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    display_name::DisplayName,
    email::Email,
    notification::{LoginAlertStatus, Notification, NotificationBody},
    password::{Password, PasswordDigest},
    reset_token::{PendingReset, ResetToken, ResetTokenDigest, reset_token_ttl},
    user::{
        DomainError, NewUser, NotificationPreferences, ProfilePatch, StoredUser, User,
        UserCredentials, UserId,
    },
};

pub use ports::{
    repositories::{UserStore, UserStoreError},
    services::{CredentialHasher, CredentialHasherError, EmailClient, EmailClientError},
};
