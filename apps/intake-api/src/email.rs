//! Lead notification via the hosted email-dispatch provider
//!
//! The provider accepts an HTTPS POST with service/template/auth
//! identifiers and a bag of template parameters, and renders the email on
//! its side. Dispatch runs as a detached task after the submission is
//! already durable, so errors here are logged by the pipeline and never
//! reach the visitor.

use async_trait::async_trait;
use chrono::Utc;
use intake_core::{LeadNotifier, NotifyError, ValidatedSubmission};
use serde::Serialize;
use std::time::Duration;
use tracing::info;

use crate::config::Config;

const EMAIL_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct DispatchPayload<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    from_name: String,
    phone: &'a str,
    email: &'a str,
    service_type: String,
    message: &'a str,
    submitted_at: String,
}

impl<'a> TemplateParams<'a> {
    fn for_submission(submission: &'a ValidatedSubmission, submitted_at: String) -> Self {
        Self {
            from_name: format!("{} {}", submission.first_name, submission.last_name),
            phone: &submission.phone,
            email: submission.email.as_deref().unwrap_or("not provided"),
            service_type: submission.service_type.to_string(),
            message: &submission.message,
            submitted_at,
        }
    }
}

/// Sends new-lead notifications through the configured provider.
pub struct EmailNotifier {
    http: reqwest::Client,
    endpoint: String,
    service_id: Option<String>,
    template_id: Option<String>,
    auth_key: Option<String>,
}

impl EmailNotifier {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(EMAIL_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            endpoint: config.email_endpoint.clone(),
            service_id: config.email_service_id.clone(),
            template_id: config.email_template_id.clone(),
            auth_key: config.email_auth_key.clone(),
        }
    }

    fn credentials(&self) -> Option<(&str, &str, &str)> {
        Some((
            self.service_id.as_deref()?,
            self.template_id.as_deref()?,
            self.auth_key.as_deref()?,
        ))
    }
}

#[async_trait]
impl LeadNotifier for EmailNotifier {
    async fn notify(&self, submission: &ValidatedSubmission) -> Result<(), NotifyError> {
        let (service_id, template_id, auth_key) = self
            .credentials()
            .ok_or_else(|| NotifyError("email dispatch is not configured".to_string()))?;

        let submitted_at = Utc::now().format("%B %d, %Y at %H:%M UTC").to_string();
        let payload = DispatchPayload {
            service_id,
            template_id,
            user_id: auth_key,
            template_params: TemplateParams::for_submission(submission, submitted_at),
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifyError(format!(
                "email provider returned status {}",
                response.status()
            )));
        }

        info!("lead notification dispatched");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::ServiceType;

    fn submission() -> ValidatedSubmission {
        ValidatedSubmission {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: Some("jane@example.com".to_string()),
            phone: "9876543210".to_string(),
            service_type: ServiceType::TitleSearch,
            message: "Please review a sale deed for me.".to_string(),
        }
    }

    #[test]
    fn payload_carries_formatted_submission_fields() {
        let sub = submission();
        let params = TemplateParams::for_submission(&sub, "August 04, 2026 at 10:15 UTC".into());
        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json["from_name"], "Jane Doe");
        assert_eq!(json["service_type"], "title-search");
        assert_eq!(json["submitted_at"], "August 04, 2026 at 10:15 UTC");
    }

    #[test]
    fn missing_email_renders_placeholder() {
        let mut sub = submission();
        sub.email = None;
        let params = TemplateParams::for_submission(&sub, String::new());
        assert_eq!(params.email, "not provided");
    }

    #[tokio::test]
    async fn unconfigured_notifier_reports_an_error() {
        let notifier = EmailNotifier::new(&Config::default());
        let err = notifier.notify(&submission()).await.unwrap_err();
        assert!(err.to_string().contains("not configured"));
    }
}
