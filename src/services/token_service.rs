use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub email: String,
    pub iat: usize, // issued at
    pub exp: usize, // expiration
}

fn get_jwt_secret() -> String {
    std::env::var("JWT_ACCESS_TOKEN").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

/// Issue a signed token for an email payload. Tokens are opaque to the
/// client and live for one hour; there is no refresh or revocation.
pub fn issue_token(email: &str) -> Result<String, String> {
    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::hours(1)).timestamp() as usize;

    let claims = Claims {
        email: email.to_string(),
        iat,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(get_jwt_secret().as_ref()),
    )
    .map_err(|e| format!("Failed to generate token: {}", e))
}

/// Verify signature and expiry against the shared secret.
pub fn verify_token(token: &str) -> Result<Claims, String> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(get_jwt_secret().as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_and_verify_round_trip() {
        let token = issue_token("student@example.com").unwrap();
        let claims = verify_token(&token).unwrap();
        assert_eq!(claims.email, "student@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_garbage_token() {
        assert!(verify_token("not-a-token").is_err());
    }

    #[test]
    fn rejects_tampered_signature() {
        let token = issue_token("student@example.com").unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[2] = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
        let tampered = parts.join(".");
        assert!(verify_token(&tampered).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let iat = (Utc::now() - Duration::hours(2)).timestamp() as usize;
        let exp = (Utc::now() - Duration::hours(1)).timestamp() as usize;
        let claims = Claims {
            email: "student@example.com".to_string(),
            iat,
            exp,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(get_jwt_secret().as_ref()),
        )
        .unwrap();
        assert!(verify_token(&token).is_err());
    }
}
