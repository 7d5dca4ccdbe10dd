use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{Mailer, NotifyConfig, NotifyError, NotifyResult};

const RESEND_EMAILS_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: Option<String>,
}

/// Mailer backed by the Resend transactional email API
#[derive(Clone)]
pub struct ResendMailer {
    http_client: Client,
    config: NotifyConfig,
}

impl ResendMailer {
    pub fn new(config: NotifyConfig) -> NotifyResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        if config.api_key.is_none() {
            warn!("Resend API key not set; email delivery is disabled");
        }

        Ok(Self {
            http_client,
            config,
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        html_body: &str,
    ) -> NotifyResult<()> {
        let api_key = self.config.api_key.as_ref().ok_or(NotifyError::NotConfigured)?;

        let payload = serde_json::json!({
            "from": self.config.from_address,
            "to": recipients,
            "subject": subject,
            "html": html_body,
        });

        let response = self
            .http_client
            .post(RESEND_EMAILS_URL)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let sent: SendResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        info!(
            "Email sent to {} recipient(s), ID: {}",
            recipients.len(),
            sent.id.as_deref().unwrap_or("unknown")
        );
        Ok(())
    }
}
