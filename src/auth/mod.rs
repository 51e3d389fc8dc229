pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password, HashCost};
pub use token::{AccessTokenResponse, Claims, TokenKind, TokenService};

/// Payload for `POST /identity/register`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    /// At least 6 characters with a digit, a lowercase letter, an uppercase
    /// letter and a non-alphanumeric character.
    #[validate(length(min = 6), custom = "validate_password_complexity")]
    pub password: String,
}

/// Payload for `POST /identity/login`.
///
/// Only presence is checked here; a wrong email or password is reported as
/// invalid credentials, not as a validation failure.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Payload for `POST /identity/refresh`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

fn validate_password_complexity(password: &str) -> Result<(), ValidationError> {
    let checks: [(fn(&char) -> bool, &'static str); 4] = [
        (char::is_ascii_digit, "password_requires_digit"),
        (char::is_ascii_lowercase, "password_requires_lower"),
        (char::is_ascii_uppercase, "password_requires_upper"),
        (|c: &char| !c.is_alphanumeric(), "password_requires_non_alphanumeric"),
    ];

    for (check, code) in checks {
        if !password.chars().any(|c| check(&c)) {
            return Err(ValidationError::new(code));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_register_request_validation() {
        assert!(register("test@example.com", "Passw0rd!").validate().is_ok());
        assert!(register("testexample.com", "Passw0rd!").validate().is_err());
        assert!(register("test@example.com", "Pa0!").validate().is_err());
    }

    #[test]
    fn test_password_complexity() {
        assert!(validate_password_complexity("Passw0rd!").is_ok());

        let cases = [
            ("Password!", "password_requires_digit"),
            ("PASSW0RD!", "password_requires_lower"),
            ("passw0rd!", "password_requires_upper"),
            ("Passw0rd1", "password_requires_non_alphanumeric"),
        ];
        for (password, code) in cases {
            let err = validate_password_complexity(password).unwrap_err();
            assert_eq!(err.code, code, "{}", password);
        }
    }

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            email: "test@example.com".into(),
            password: "anything".into(),
        };
        assert!(valid.validate().is_ok());

        let empty = LoginRequest {
            email: "".into(),
            password: "".into(),
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_refresh_request_uses_camel_case() {
        let request: RefreshRequest =
            serde_json::from_str(r#"{"refreshToken": "abc"}"#).unwrap();
        assert_eq!(request.refresh_token, "abc");
    }
}
