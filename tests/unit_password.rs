use nido::utils::password::{hash_password, verify_password};

#[test]
fn hash_is_not_the_plaintext() {
    let hash = hash_password("abcdef").unwrap();
    assert_ne!(hash, "abcdef");
    assert!(hash.starts_with("$2"));
}

#[test]
fn correct_password_verifies() {
    let hash = hash_password("correct horse battery staple").unwrap();
    assert!(verify_password("correct horse battery staple", &hash).unwrap());
}

#[test]
fn wrong_password_does_not_verify() {
    let hash = hash_password("abcdef").unwrap();
    assert!(!verify_password("abcdeg", &hash).unwrap());
    assert!(!verify_password("", &hash).unwrap());
}

#[test]
fn same_password_hashes_to_different_strings() {
    // bcrypt salts, so equal inputs must not produce equal hashes.
    let a = hash_password("abcdef").unwrap();
    let b = hash_password("abcdef").unwrap();
    assert_ne!(a, b);
}
