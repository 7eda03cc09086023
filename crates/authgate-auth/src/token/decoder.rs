//! Token validation.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use authgate_core::config::AuthConfig;
use authgate_core::error::AppError;

use super::claims::Claims;

/// Validates bearer token strings.
#[derive(Clone)]
pub struct TokenDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string, returning its claims.
    ///
    /// Checks, in order: parseability, signature, expiry. The subject
    /// user's continued existence is the caller's responsibility.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::token_expired(),
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::token_signature_invalid()
                    }
                    _ => AppError::token_malformed(format!("Token could not be parsed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::encoder::TokenEncoder;
    use authgate_core::ErrorKind;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            token_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_issue_then_verify_round_trips_user_id() {
        let cfg = config("test-secret");
        let encoder = TokenEncoder::new(&cfg);
        let decoder = TokenDecoder::new(&cfg);

        let user_id = Uuid::new_v4();
        let issued = encoder.issue(user_id).unwrap();
        let claims = decoder.verify(&issued.token).unwrap();

        assert_eq!(claims.user_id(), user_id);
        assert!(!claims.is_expired());
        assert_eq!(claims.expires_at().timestamp(), issued.expires_at.timestamp());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let cfg = config("test-secret");
        let decoder = TokenDecoder::new(&cfg);

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = decoder.verify(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenExpired);
    }

    #[test]
    fn test_wrong_secret_is_a_signature_error() {
        let encoder = TokenEncoder::new(&config("secret-a"));
        let decoder = TokenDecoder::new(&config("secret-b"));

        let issued = encoder.issue(Uuid::new_v4()).unwrap();
        let err = decoder.verify(&issued.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenSignatureInvalid);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let decoder = TokenDecoder::new(&config("test-secret"));
        let err = decoder.verify("not.a.token").unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenMalformed);

        let err = decoder.verify("").unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenMalformed);
    }
}
