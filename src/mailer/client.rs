//! HTTP client for the EmailJS REST API
//!
//! Sends a template-based email with a single POST. The service id, template
//! id and keys are passed in at construction and never inspected.

use super::{Mailer, MailerError};
use crate::config::MailSettings;
use crate::state::TemplateParams;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Path of the send endpoint, relative to the API origin
const SEND_PATH: &str = "/api/v1.0/email/send";

/// Upper bound on a single send
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Request body expected by the send endpoint
#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
}

/// Mailer backed by EmailJS
pub struct EmailJsMailer {
    client: reqwest::Client,
    settings: MailSettings,
}

impl EmailJsMailer {
    pub fn new(settings: MailSettings) -> Result<Self, MailerError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, settings })
    }

    fn send_url(&self) -> String {
        format!("{}{}", self.settings.endpoint.trim_end_matches('/'), SEND_PATH)
    }

    fn request_body<'a>(&'a self, params: &'a TemplateParams) -> SendRequest<'a> {
        SendRequest {
            service_id: &self.settings.service_id,
            template_id: &self.settings.template_id,
            user_id: &self.settings.public_key,
            template_params: params,
            access_token: self.settings.access_token.as_deref(),
        }
    }
}

#[async_trait]
impl Mailer for EmailJsMailer {
    async fn send(&self, params: &TemplateParams) -> Result<(), MailerError> {
        let url = self.send_url();
        tracing::debug!("Sending contact message via {url}");

        let response = self
            .client
            .post(&url)
            .json(&self.request_body(params))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(MailerError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn settings(endpoint: &str, access_token: Option<&str>) -> MailSettings {
        MailSettings {
            service_id: "service_x".to_string(),
            template_id: "template_y".to_string(),
            public_key: "pk".to_string(),
            access_token: access_token.map(str::to_string),
            endpoint: endpoint.to_string(),
        }
    }

    fn params() -> TemplateParams {
        TemplateParams {
            user_name: "Ada".to_string(),
            user_email: "a@b.co".to_string(),
            message: "hi".to_string(),
        }
    }

    #[test]
    fn test_send_url_joins_endpoint() {
        let mailer = EmailJsMailer::new(settings("https://api.emailjs.com", None)).unwrap();
        assert_eq!(mailer.send_url(), "https://api.emailjs.com/api/v1.0/email/send");
    }

    #[test]
    fn test_send_url_tolerates_trailing_slash() {
        let mailer = EmailJsMailer::new(settings("http://localhost:8080/", None)).unwrap();
        assert_eq!(mailer.send_url(), "http://localhost:8080/api/v1.0/email/send");
    }

    #[test]
    fn test_request_body_without_token() {
        let mailer = EmailJsMailer::new(settings("https://api.emailjs.com", None)).unwrap();
        let params = params();
        let body = serde_json::to_value(mailer.request_body(&params)).unwrap();

        assert_eq!(
            body,
            json!({
                "service_id": "service_x",
                "template_id": "template_y",
                "user_id": "pk",
                "template_params": {
                    "user_name": "Ada",
                    "user_email": "a@b.co",
                    "message": "hi",
                },
            })
        );
    }

    #[test]
    fn test_request_body_with_token() {
        let mailer =
            EmailJsMailer::new(settings("https://api.emailjs.com", Some("secret"))).unwrap();
        let params = params();
        let body = serde_json::to_value(mailer.request_body(&params)).unwrap();
        assert_eq!(body["accessToken"], "secret");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Grab a free port, then release it so nothing is listening there
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let endpoint = format!("http://127.0.0.1:{port}");
        let mailer = EmailJsMailer::new(settings(&endpoint, None)).unwrap();
        let result = mailer.send(&params()).await;
        assert!(matches!(result, Err(MailerError::Transport(_))));
    }

    #[test]
    fn test_rejected_error_message() {
        let err = MailerError::Rejected {
            status: 412,
            body: "The Public Key is invalid".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "mail service rejected the message (412): The Public Key is invalid"
        );
    }
}
