//! Data models for the intake API

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Request to the admin login endpoint. Fields default to empty so that
/// presence checks happen in the handler, not the deserializer.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Admin profile returned on a successful login. Session issuance is the
/// dashboard's concern; this endpoint only answers whether the caller is
/// an active admin.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub email: String,
    pub display_name: String,
}

/// Admin account row.
#[derive(Debug, Clone, FromRow)]
pub struct DbAdminUser {
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_tolerates_missing_fields() {
        let req: LoginRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.email, "");
        assert_eq!(req.password, "");
    }

    #[test]
    fn admin_profile_uses_camel_case_wire_names() {
        let profile = AdminProfile {
            email: "admin@example.com".to_string(),
            display_name: "Admin".to_string(),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("displayName").is_some());
    }
}
