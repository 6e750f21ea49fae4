//! JWT token service
//!
//! Generates, validates and decodes the bearer tokens the API runs on.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sponsorhub_shared::models::{Permission, Role};

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        let secret = match load_jwt_secret() {
            Ok(secret) => secret,
            Err(e) => {
                #[cfg(debug_assertions)]
                {
                    tracing::warn!("JWT configuration error: {}, generating temporary key", e);
                    generate_secret()
                }
                #[cfg(not(debug_assertions))]
                {
                    panic!("FATAL: JWT_SECRET configuration failed: {}", e);
                }
            }
        };

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "sponsorhub-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "sponsorhub-clients".to_string()),
        }
    }
}

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id (subject)
    pub sub: String,
    pub email: String,
    /// Role identifier
    pub role: String,
    /// Extra permission grants, comma-separated wire names
    pub permissions: String,
    pub token_type: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    ExpiredToken,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("token generation failed: {0}")]
    GenerationFailed(String),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

/// Generate a printable 64-char signing secret.
pub fn generate_secret() -> String {
    let allowed =
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";
    let rng = SystemRandom::new();
    let mut key = String::with_capacity(64);
    for _ in 0..64 {
        let mut byte = [0u8; 1];
        if rng.fill(&mut byte).is_err() {
            return "SponsorHubDevelopmentFallbackSecret2026!".to_string();
        }
        let idx = (byte[0] as usize) % allowed.len();
        key.push(allowed.as_bytes()[idx] as char);
    }
    key
}

fn load_jwt_secret() -> Result<String, JwtError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) => {
            if secret.len() < 32 {
                return Err(JwtError::ConfigError(
                    "JWT_SECRET must be at least 32 characters long".to_string(),
                ));
            }
            Ok(secret)
        }
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!("JWT_SECRET not set, generating temporary key for development");
                Ok(generate_secret())
            }
            #[cfg(not(debug_assertions))]
            {
                Err(JwtError::ConfigError(
                    "JWT_SECRET environment variable must be set in production".to_string(),
                ))
            }
        }
    }
}

/// JWT token service
#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Generate an access token for an account.
    pub fn generate_token(
        &self,
        user_id: &str,
        email: &str,
        role: Role,
        grants: &[Permission],
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let permissions = grants
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            permissions,
            token_type: "access".to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an Authorization header.
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// Current authenticated account, decoded from JWT claims.
///
/// Created by the auth middleware or extractor; the role is parsed into
/// the closed [`Role`] enum here, so a token carrying an unrecognized
/// role identifier is rejected at the boundary instead of silently
/// becoming a deny-everything account.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub role: Role,
    /// Per-account grants carried alongside the role.
    pub grants: Vec<Permission>,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let role: Role = claims
            .role
            .parse()
            .map_err(|e| JwtError::InvalidToken(format!("{e}")))?;

        let grants = if claims.permissions.is_empty() {
            vec![]
        } else {
            claims
                .permissions
                .split(',')
                .filter_map(|s| s.trim().parse::<Permission>().ok())
                .collect()
        };

        Ok(Self {
            id: claims.sub,
            email: claims.email,
            role,
            grants,
        })
    }
}

impl CurrentUser {
    /// Admin-tier account (`admin` or `super_admin`).
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin | Role::SuperAdmin)
    }

    /// Authorization is the union of the role's table set and the
    /// per-account grants. A blanket grant counts from either source.
    pub fn has_permission(
        &self,
        table: &crate::auth::RoleTable,
        permission: Permission,
    ) -> bool {
        if table.role_has(self.role, permission) {
            return true;
        }
        self.grants.contains(&permission)
            || self.grants.contains(&Permission::FullAccessAllModules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::RoleTable;

    fn test_service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "a-test-secret-that-is-long-enough-0123456789".to_string(),
            expiration_minutes: 60,
            issuer: "sponsorhub-server".to_string(),
            audience: "sponsorhub-clients".to_string(),
        })
    }

    #[test]
    fn token_round_trips() {
        let service = test_service();
        let token = service
            .generate_token(
                "user123",
                "jane@example.com",
                Role::Organizer,
                &[Permission::ManageContent],
            )
            .expect("generate");

        let claims = service.validate_token(&token).expect("validate");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.role, "organizer");
        assert_eq!(claims.permissions, "manage_content");

        let user = CurrentUser::try_from(claims).expect("decode");
        assert_eq!(user.role, Role::Organizer);
        assert_eq!(user.grants, vec![Permission::ManageContent]);
    }

    #[test]
    fn unknown_role_claim_is_rejected() {
        let claims = Claims {
            sub: "u1".into(),
            email: "x@example.com".into(),
            role: "warlord".into(),
            permissions: String::new(),
            token_type: "access".into(),
            exp: 0,
            iat: 0,
            iss: "i".into(),
            aud: "a".into(),
        };
        assert!(CurrentUser::try_from(claims).is_err());
    }

    #[test]
    fn grants_union_with_role_table() {
        let table = RoleTable::platform_default();
        let user = CurrentUser {
            id: "u1".into(),
            email: "s@example.com".into(),
            role: Role::Sponsor,
            grants: vec![Permission::ViewServiceRequests],
        };
        // From the role table
        assert!(user.has_permission(&table, Permission::SubmitEnquiries));
        // From the per-account grant
        assert!(user.has_permission(&table, Permission::ViewServiceRequests));
        // From neither
        assert!(!user.has_permission(&table, Permission::ManageUsers));
    }

    #[test]
    fn blanket_grant_counts_from_account_grants() {
        let table = RoleTable::platform_default();
        let user = CurrentUser {
            id: "u1".into(),
            email: "s@example.com".into(),
            role: Role::Sponsor,
            grants: vec![Permission::FullAccessAllModules],
        };
        assert!(user.has_permission(&table, Permission::ManageSystem));
    }

    #[test]
    fn tampered_token_fails_validation() {
        let service = test_service();
        let token = service
            .generate_token("u1", "x@example.com", Role::Sponsor, &[])
            .unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        assert!(service.validate_token(&tampered).is_err());
    }
}
