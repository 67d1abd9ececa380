//! Data types for the intake pipeline

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw contact form payload as submitted by the public site.
///
/// Nothing here is trusted. Missing fields deserialize to their defaults so
/// the validator, not the deserializer, decides what a usable submission is.
/// The `website` field is the hidden decoy input; humans never see it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub service_type: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "website")]
    pub honeypot: Option<String>,
}

/// Service a visitor can request help with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    Consultation,
    Documentation,
    Notice,
    Litigation,
    Research,
    TitleSearch,
    DocumentRegistration,
}

impl ServiceType {
    pub const ALL: [ServiceType; 7] = [
        ServiceType::Consultation,
        ServiceType::Documentation,
        ServiceType::Notice,
        ServiceType::Litigation,
        ServiceType::Research,
        ServiceType::TitleSearch,
        ServiceType::DocumentRegistration,
    ];
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceType::Consultation => write!(f, "consultation"),
            ServiceType::Documentation => write!(f, "documentation"),
            ServiceType::Notice => write!(f, "notice"),
            ServiceType::Litigation => write!(f, "litigation"),
            ServiceType::Research => write!(f, "research"),
            ServiceType::TitleSearch => write!(f, "title-search"),
            ServiceType::DocumentRegistration => write!(f, "document-registration"),
        }
    }
}

impl FromStr for ServiceType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "consultation" => Ok(ServiceType::Consultation),
            "documentation" => Ok(ServiceType::Documentation),
            "notice" => Ok(ServiceType::Notice),
            "litigation" => Ok(ServiceType::Litigation),
            "research" => Ok(ServiceType::Research),
            "title-search" => Ok(ServiceType::TitleSearch),
            "document-registration" => Ok(ServiceType::DocumentRegistration),
            _ => Err(()),
        }
    }
}

/// A submission that passed every validation rule.
///
/// Invariant: every field is well-formed per the contact form rules. Names
/// are trimmed letters-and-spaces, the phone is digits-only (10 or 12
/// digits with a valid subscriber part), the email (when present) is
/// lower-cased and format-checked, and the message is within length bounds.
/// Downstream code never re-validates.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub service_type: ServiceType,
    pub message: String,
}

/// The uniform result contract for a submission attempt: exactly one of
/// `{"success": ...}` or `{"error": ...}`, never both, never neither.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SubmissionOutcome {
    Success { success: String },
    Error { error: String },
}

impl SubmissionOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        SubmissionOutcome::Success {
            success: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        SubmissionOutcome::Error {
            error: message.into(),
        }
    }
}
