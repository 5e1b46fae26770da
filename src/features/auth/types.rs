//! Request and response types for the auth API. Wire names are camelCase to
//! match the backend; the password only ever appears in outbound payloads.

use crate::app_lib::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role. A closed set: anything else coming from a form is rejected
/// client-side before a request is made.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Barber,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Barber => "barber",
        }
    }

    /// Capitalized label for display, e.g. the dashboard role badge.
    pub fn label(self) -> &'static str {
        match self {
            Role::Customer => "Customer",
            Role::Barber => "Barber",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "customer" => Ok(Role::Customer),
            "barber" => Ok(Role::Barber),
            other => Err(AppError::Validation(format!(
                "Role must be customer or barber, got \"{other}\""
            ))),
        }
    }
}

/// The signed-in account as the backend reports it. Read-mostly on the
/// client; only the server mutates it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    pub role: Role,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: Role,
}

/// `{token, user}` returned by both login and signup.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MeResponse {
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::{AuthResponse, Role, SignupRequest, User};
    use crate::app_lib::AppError;
    use std::str::FromStr;

    #[test]
    fn role_parses_the_two_known_values() {
        assert_eq!(Role::from_str("customer").unwrap(), Role::Customer);
        assert_eq!(Role::from_str("barber").unwrap(), Role::Barber);
    }

    #[test]
    fn unknown_roles_fail_validation_client_side() {
        let result = Role::from_str("admin");
        assert!(matches!(result, Err(AppError::Validation(_))));

        // Case matters on the wire; don't silently accept variants.
        assert!(Role::from_str("Barber").is_err());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Barber).unwrap(), r#""barber""#);
        let parsed: Role = serde_json::from_str(r#""customer""#).unwrap();
        assert_eq!(parsed, Role::Customer);
    }

    #[test]
    fn user_deserializes_camel_case_with_optional_name() {
        let user: User = serde_json::from_str(
            r#"{"id":"u1","email":"a@x.com","role":"customer","createdAt":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.name, None);
        assert_eq!(user.role, Role::Customer);
        assert_eq!(user.created_at, "2024-05-01T10:00:00Z");
    }

    #[test]
    fn auth_response_carries_token_and_user() {
        let auth: AuthResponse = serde_json::from_str(
            r#"{"token":"tok-1","user":{"id":"u1","name":"Ann","email":"a@x.com","role":"barber","createdAt":"2024-05-01T10:00:00Z"}}"#,
        )
        .unwrap();
        assert_eq!(auth.token, "tok-1");
        assert_eq!(auth.user.name.as_deref(), Some("Ann"));
    }

    #[test]
    fn signup_request_omits_a_missing_name() {
        let request = SignupRequest {
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
            name: None,
            role: Role::Customer,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("name"));
        assert!(json.contains(r#""role":"customer""#));
    }
}
