use nido::config::jwt::JwtConfig;
use nido::modules::users::model::UserRole;
use nido::utils::jwt::{create_access_token, verify_token};

fn test_config(expiry: i64) -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        access_token_expiry: expiry,
    }
}

#[test]
fn token_embeds_user_id_and_role() {
    let config = test_config(3600);
    let token = create_access_token(42, UserRole::Teacher, &config).unwrap();

    let claims = verify_token(&token, &config).unwrap();
    assert_eq!(claims.sub, "42");
    assert_eq!(claims.role, "teacher");
    assert!(claims.exp > claims.iat);
}

#[test]
fn expired_token_is_rejected() {
    // Expiry far enough in the past to clear the default leeway.
    let config = test_config(-300);
    let token = create_access_token(1, UserRole::Admin, &config).unwrap();

    assert!(verify_token(&token, &config).is_err());
}

#[test]
fn token_signed_with_different_secret_is_rejected() {
    let config = test_config(3600);
    let token = create_access_token(1, UserRole::Admin, &config).unwrap();

    let other = JwtConfig {
        secret: "a-different-secret".to_string(),
        access_token_expiry: 3600,
    };
    assert!(verify_token(&token, &other).is_err());
}

#[test]
fn tampered_token_is_rejected() {
    let config = test_config(3600);
    let token = create_access_token(1, UserRole::Parent, &config).unwrap();

    let mut tampered = token.clone();
    tampered.pop();
    assert!(verify_token(&tampered, &config).is_err());
    assert!(verify_token("not.a.token", &config).is_err());
}
