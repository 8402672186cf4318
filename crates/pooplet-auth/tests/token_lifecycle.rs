//! End-to-end checks across policy, hashing, issuance, validation, and RBAC.

use chrono::{Duration, Utc};

use pooplet_auth::jwt::extract_bearer_token;
use pooplet_auth::{
    AuthzError, IssuanceError, JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator,
    RbacEnforcer, SecretStore, ValidationError,
};
use pooplet_entity::user::{User, UserRole};

const SECRET: &str = "integration-secret-0123456789";

fn identity(id: &str, role: Option<UserRole>) -> User {
    User {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        display_name: id.to_string(),
        role,
        password_hash: String::new(),
        created_at: Utc::now(),
    }
}

#[test]
fn test_register_scenario_defaults_to_user() {
    let password = "Abc1234567";
    PasswordValidator::new().validate(password).unwrap();

    let hasher = PasswordHasher::new();
    let mut user = identity("alice", None);
    user.password_hash = hasher.hash_password(password).unwrap();
    assert!(hasher.verify_password(password, &user.password_hash));
    assert!(!hasher.verify_password("Abc1234568", &user.password_hash));

    let store = SecretStore::checked(SECRET).unwrap();
    let issued = JwtEncoder::new(store.clone())
        .issue(&user, Duration::hours(1))
        .unwrap();

    let header = format!("Bearer {}", issued.token);
    let token = extract_bearer_token(Some(header.as_str())).unwrap();
    let claims = JwtDecoder::new(store).validate(token).unwrap();

    assert_eq!(claims.user_id, "alice");
    assert_eq!(claims.email, "alice@example.com");
    assert_eq!(claims.role, UserRole::User);
    assert_eq!(claims.exp, issued.expires_at);
}

#[test]
fn test_token_issued_already_expired_is_rejected() {
    let store = SecretStore::new(SECRET);
    let issued = JwtEncoder::new(store.clone())
        .issue(&identity("bob", Some(UserRole::User)), Duration::seconds(-1))
        .unwrap();

    assert_eq!(
        JwtDecoder::new(store).validate(&issued.token),
        Err(ValidationError::Expired)
    );
}

#[test]
fn test_weak_secret_fails_closed_everywhere() {
    let store = SecretStore::new("too-short");
    let encoder = JwtEncoder::new(store.clone());
    assert!(matches!(
        encoder.issue(&identity("carol", None), Duration::hours(1)),
        Err(IssuanceError::WeakSecret(_))
    ));

    store.rotate(SECRET);
    assert!(encoder.issue(&identity("carol", None), Duration::hours(1)).is_ok());
}

#[test]
fn test_user_token_cannot_reach_admin_routes() {
    let store = SecretStore::new(SECRET);
    let encoder = JwtEncoder::new(store.clone());
    let decoder = JwtDecoder::new(store);
    let rbac = RbacEnforcer::new();

    let user_token = encoder
        .issue(&identity("dave", Some(UserRole::User)), Duration::hours(1))
        .unwrap();
    let admin_token = encoder
        .issue(&identity("erin", Some(UserRole::Admin)), Duration::hours(1))
        .unwrap();

    let user_claims = decoder.validate(&user_token.token).unwrap();
    let admin_claims = decoder.validate(&admin_token.token).unwrap();

    assert_eq!(
        rbac.authorize(&user_claims, UserRole::Admin),
        Err(AuthzError::Forbidden {
            required: UserRole::Admin
        })
    );
    assert!(rbac.authorize(&admin_claims, UserRole::Admin).is_ok());
    assert_eq!(
        rbac.forbid_self_mutation(admin_claims.subject(), "erin"),
        Err(AuthzError::SelfTargetForbidden)
    );
}
