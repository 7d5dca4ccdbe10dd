// ABOUTME: Outbound email delivery for CSMS notifications
// ABOUTME: Mailer trait plus the Resend HTTP API implementation

use async_trait::async_trait;
use thiserror::Error;

pub mod resend;
pub mod templates;

pub use resend::ResendMailer;

/// Default sender identity when `CSMS_MAIL_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "CSMS <onboarding@resend.dev>";

/// Notification delivery errors
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Email API key not configured")]
    NotConfigured,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Email API returned {status}: {body}")]
    Api { status: u16, body: String },
}

pub type NotifyResult<T> = Result<T, NotifyError>;

/// Configuration for the email sender
///
/// Credentials are read once at startup and handed to the mailer at
/// construction; nothing in this package touches the environment afterwards.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// API key for the transactional email provider; `None` leaves the
    /// mailer unconfigured.
    pub api_key: Option<String>,
    /// RFC 5322 "From" value.
    pub from_address: String,
}

impl NotifyConfig {
    /// Load configuration from environment variables
    ///
    /// | Variable         | Required | Default                        |
    /// |------------------|----------|--------------------------------|
    /// | `RESEND_API_KEY` | no       | — (delivery disabled)          |
    /// | `CSMS_MAIL_FROM` | no       | `CSMS <onboarding@resend.dev>` |
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("RESEND_API_KEY").ok(),
            from_address: std::env::var("CSMS_MAIL_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
        }
    }
}

/// Capability to deliver a rendered message to one or more recipients
///
/// Any error return is a non-fatal per-send failure: callers log and count
/// it, and keep going.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Whether the sender holds usable credentials
    fn is_configured(&self) -> bool;

    /// Attempt delivery of one message
    async fn send(&self, recipients: &[String], subject: &str, html_body: &str)
        -> NotifyResult<()>;
}
