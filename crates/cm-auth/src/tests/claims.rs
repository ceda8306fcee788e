use crate::{AuthError, SessionClaims, UserMetadata};

use cm_core::Role;
use uuid::Uuid;

fn valid_claims() -> SessionClaims {
    SessionClaims {
        sub: Uuid::new_v4().to_string(),
        email: Some("ada@campus.edu".to_string()),
        exp: chrono::Utc::now().timestamp() + 3600,
        iat: chrono::Utc::now().timestamp(),
        user_metadata: UserMetadata {
            declared_role: Some("vendor".to_string()),
        },
    }
}

#[test]
fn given_valid_claims_when_validated_then_passes() {
    let claims = valid_claims();

    assert!(claims.validate().is_ok());
}

#[test]
fn given_empty_sub_when_validated_then_returns_invalid_claim() {
    let mut claims = valid_claims();
    claims.sub = String::new();

    let result = claims.validate();

    assert!(matches!(result, Err(AuthError::InvalidClaim { .. })));
}

#[test]
fn given_non_uuid_sub_when_validated_then_returns_invalid_claim() {
    let mut claims = valid_claims();
    claims.sub = "user-123".to_string();

    let result = claims.validate();

    assert!(matches!(result, Err(AuthError::InvalidClaim { .. })));
}

#[test]
fn given_valid_sub_when_identity_id_then_parses() {
    let claims = valid_claims();

    let id = claims.identity_id().unwrap();

    assert_eq!(id.to_string(), claims.sub);
}

#[test]
fn given_known_metadata_role_when_declared_role_then_parses() {
    let claims = valid_claims();

    assert_eq!(claims.declared_role(), Some(Role::Vendor));
}

#[test]
fn given_unknown_metadata_role_when_declared_role_then_none() {
    let mut claims = valid_claims();
    claims.user_metadata.declared_role = Some("superuser".to_string());

    assert_eq!(claims.declared_role(), None);
}

#[test]
fn given_token_json_without_metadata_when_deserialized_then_defaults() {
    let json = format!(
        r#"{{"sub":"{}","exp":1767225600,"iat":1767222000}}"#,
        Uuid::new_v4()
    );

    let claims: SessionClaims = serde_json::from_str(&json).unwrap();

    assert_eq!(claims.email, None);
    assert_eq!(claims.user_metadata, UserMetadata::default());
    assert_eq!(claims.declared_role(), None);
}
