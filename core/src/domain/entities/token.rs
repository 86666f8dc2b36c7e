//! Claims carried by signed session tokens.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Email of the signed-in user
    pub email: String,

    /// Whether the phone number was confirmed when the token was issued
    pub phone_number_confirmed: bool,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Creates claims for a session token valid for `expiry_seconds`
    pub fn for_user(user: &User, issuer: &str, expiry_seconds: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(expiry_seconds);

        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            phone_number_confirmed: user.phone_number_confirmed,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Parses the subject back into a user ID
    pub fn user_id(&self) -> Result<uuid::Uuid, uuid::Error> {
        uuid::Uuid::parse_str(&self.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_for_user() {
        let mut user = User::new(
            "Grace".to_string(),
            "grace@example.com".to_string(),
            "hash".to_string(),
            "4155552671".to_string(),
            "1".to_string(),
        );
        user.confirm_phone_number();

        let claims = Claims::for_user(&user, "account-verification", 3600);

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.email, "grace@example.com");
        assert!(claims.phone_number_confirmed);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.is_expired());
    }
}
