use askama::Template;
use async_trait::async_trait;
use gatehouse_core::{EmailClient, EmailClientError, Notification, NotificationBody};

use super::EmailTransport;

/// Links into the frontend, rendered into outgoing emails.
#[derive(Debug, Clone)]
pub struct ClientUrls {
    base: String,
}

impl ClientUrls {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    pub fn dashboard(&self) -> String {
        format!("{}/dashboard", self.base)
    }

    pub fn forgot_password(&self) -> String {
        format!("{}/forgot-password", self.base)
    }

    pub fn reset_password(&self, token: &str) -> String {
        format!("{}/reset-password/{token}", self.base)
    }
}

#[derive(Template)]
#[template(path = "welcome.html")]
struct WelcomeTemplate<'a> {
    name: &'a str,
    dashboard_url: &'a str,
}

#[derive(Template)]
#[template(path = "login_alert.html")]
struct LoginAlertTemplate<'a> {
    name: &'a str,
    status: &'a str,
    time: &'a str,
    forgot_password_url: &'a str,
}

#[derive(Template)]
#[template(path = "registration_alert.html")]
struct RegistrationAlertTemplate<'a> {
    name: &'a str,
    time: &'a str,
    forgot_password_url: &'a str,
}

#[derive(Template)]
#[template(path = "reset_password.html")]
struct ResetPasswordTemplate<'a> {
    name: &'a str,
    reset_url: &'a str,
}

#[derive(Template)]
#[template(path = "reset_success.html")]
struct ResetSuccessTemplate<'a> {
    name: &'a str,
}

/// Renders domain notifications into HTML and pushes them through a
/// transport. This is the production implementation of the `EmailClient`
/// port; tests use the recording mock instead.
#[derive(Clone)]
pub struct Mailer<T> {
    transport: T,
    urls: ClientUrls,
}

impl<T> Mailer<T> {
    pub fn new(transport: T, urls: ClientUrls) -> Self {
        Self { transport, urls }
    }

    fn render(&self, body: &NotificationBody) -> Result<String, askama::Error> {
        match body {
            NotificationBody::Welcome { name } => WelcomeTemplate {
                name,
                dashboard_url: &self.urls.dashboard(),
            }
            .render(),
            NotificationBody::LoginAlert { name, status, time } => LoginAlertTemplate {
                name,
                status: status.as_str(),
                time,
                forgot_password_url: &self.urls.forgot_password(),
            }
            .render(),
            NotificationBody::RegistrationAttemptAlert { name, time } => {
                RegistrationAlertTemplate {
                    name,
                    time,
                    forgot_password_url: &self.urls.forgot_password(),
                }
                .render()
            }
            NotificationBody::PasswordReset { name, token } => ResetPasswordTemplate {
                name,
                reset_url: &self.urls.reset_password(token.as_str()),
            }
            .render(),
            NotificationBody::PasswordResetSuccess { name } => {
                ResetSuccessTemplate { name }.render()
            }
        }
    }
}

#[async_trait]
impl<T> EmailClient for Mailer<T>
where
    T: EmailTransport,
{
    async fn send(&self, notification: &Notification) -> Result<(), EmailClientError> {
        let html = self
            .render(&notification.body)
            .map_err(|e| EmailClientError::Dispatch(e.to_string()))?;

        self.transport
            .send_email(&notification.recipient, &notification.subject, &html)
            .await
            .map_err(EmailClientError::Dispatch)
    }
}

/// Fire post-commit notifications without blocking the response.
///
/// Delivery failures are logged and dropped: a committed registration, login
/// or reset never turns into a user-visible error because an email bounced.
pub fn dispatch_in_background<E>(email_client: E, effects: Vec<Notification>)
where
    E: EmailClient + Clone + Send + Sync + 'static,
{
    for notification in effects {
        let client = email_client.clone();
        tokio::spawn(async move {
            if let Err(e) = client.send(&notification).await {
                tracing::warn!(
                    subject = %notification.subject,
                    error = %e,
                    "failed to deliver notification email"
                );
            }
        });
    }
}
