//! Environment configuration

/// Default endpoint for the hosted email-dispatch provider.
pub const DEFAULT_EMAIL_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Runtime configuration for the intake API.
///
/// The counter store and email provider are optional: without a counter
/// store every rate check runs on the in-process fallback policy, and
/// without email credentials notifications are skipped (and logged). Both
/// degradations keep the form itself working.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub counter_store_url: Option<String>,
    pub counter_store_token: Option<String>,
    pub email_endpoint: String,
    pub email_service_id: Option<String>,
    pub email_template_id: Option<String>,
    pub email_auth_key: Option<String>,
}

impl Config {
    /// Load from environment variables.
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:intake.db?mode=rwc".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            counter_store_url: std::env::var("COUNTER_STORE_URL").ok(),
            counter_store_token: std::env::var("COUNTER_STORE_TOKEN").ok(),
            email_endpoint: std::env::var("EMAIL_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_EMAIL_ENDPOINT.to_string()),
            email_service_id: std::env::var("EMAIL_SERVICE_ID").ok(),
            email_template_id: std::env::var("EMAIL_TEMPLATE_ID").ok(),
            email_auth_key: std::env::var("EMAIL_AUTH_KEY").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            port: 3001,
            counter_store_url: None,
            counter_store_token: None,
            email_endpoint: DEFAULT_EMAIL_ENDPOINT.to_string(),
            email_service_id: None,
            email_template_id: None,
            email_auth_key: None,
        }
    }
}
