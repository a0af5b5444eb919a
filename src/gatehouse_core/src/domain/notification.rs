use chrono::Utc;

use crate::domain::{email::Email, reset_token::ResetToken, user::User};

/// Outcome of a login attempt, as reported in an alert email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAlertStatus {
    Successful,
    Failed,
}

impl LoginAlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginAlertStatus::Successful => "Successful",
            LoginAlertStatus::Failed => "Failed",
        }
    }
}

/// Template selector plus the variables it needs.
///
/// Rendering (HTML templates, URLs into the frontend) is an adapter concern;
/// the domain only says which message goes out and with what data. The reset
/// token travels here in plaintext because email is the out-of-band channel
/// it was generated for - it is never persisted in this form.
#[derive(Debug, Clone)]
pub enum NotificationBody {
    Welcome {
        name: String,
    },
    LoginAlert {
        name: String,
        status: LoginAlertStatus,
        time: String,
    },
    RegistrationAttemptAlert {
        name: String,
        time: String,
    },
    PasswordReset {
        name: String,
        token: ResetToken,
    },
    PasswordResetSuccess {
        name: String,
    },
}

/// A post-commit effect: one templated email to one recipient.
///
/// Use cases return these instead of talking to a transport, so the core can
/// be tested without one and a delivery failure can never turn a committed
/// state change into a user-visible error.
#[derive(Debug, Clone)]
pub struct Notification {
    pub recipient: Email,
    pub subject: String,
    pub body: NotificationBody,
}

fn alert_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

impl Notification {
    pub fn welcome(user: &User) -> Self {
        Self {
            recipient: user.email.clone(),
            subject: "Welcome to Gatehouse!".to_string(),
            body: NotificationBody::Welcome {
                name: user.name.to_string(),
            },
        }
    }

    /// Login alert, gated on the user's `login_alerts` preference.
    pub fn login_alert(user: &User, status: LoginAlertStatus) -> Option<Self> {
        if !user.preferences.login_alerts {
            return None;
        }
        let subject = match status {
            LoginAlertStatus::Successful => "Successful Login",
            LoginAlertStatus::Failed => "Failed Login Attempt",
        };
        Some(Self {
            recipient: user.email.clone(),
            subject: subject.to_string(),
            body: NotificationBody::LoginAlert {
                name: user.name.to_string(),
                status,
                time: alert_timestamp(),
            },
        })
    }

    /// Sent to the existing account when someone tries to register its email
    /// again. Gated on the `email_notifications` preference.
    pub fn registration_attempt_alert(existing: &User) -> Option<Self> {
        if !existing.preferences.email_notifications {
            return None;
        }
        Some(Self {
            recipient: existing.email.clone(),
            subject: "Failed Registration Attempt".to_string(),
            body: NotificationBody::RegistrationAttemptAlert {
                name: existing.name.to_string(),
                time: alert_timestamp(),
            },
        })
    }

    pub fn password_reset(user: &User, token: ResetToken) -> Self {
        Self {
            recipient: user.email.clone(),
            subject: "Password Reset Request".to_string(),
            body: NotificationBody::PasswordReset {
                name: user.name.to_string(),
                token,
            },
        }
    }

    pub fn password_reset_success(user: &User) -> Self {
        Self {
            recipient: user.email.clone(),
            subject: "Password Reset Successful".to_string(),
            body: NotificationBody::PasswordResetSuccess {
                name: user.name.to_string(),
            },
        }
    }
}
