pub mod mailer;
pub mod mock_email_client;
pub mod postmark_email_client;

pub use mailer::{ClientUrls, Mailer, dispatch_in_background};
pub use mock_email_client::MockEmailClient;
pub use postmark_email_client::PostmarkEmailClient;

use async_trait::async_trait;
use gatehouse_core::Email;

/// Low-level outbound transport: one rendered HTML email to one recipient.
/// [`Mailer`] sits on top and turns domain notifications into these calls.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send_email(&self, recipient: &Email, subject: &str, html: &str)
    -> Result<(), String>;
}
