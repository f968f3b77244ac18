//! Account tests running the real bcrypt and JWT adapters end to end.

use crate::in_memory::helpers::{Backend, backend, register_and_login};
use rstest::rstest;
use taskdeck::{
    ports::UserRepository,
    services::{ErrorKind, LoginRequest, RegisterRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registration_login_and_resolution_round_trip(backend: Backend) {
    let (profile, token) = register_and_login(&backend.auth, "ada@example.com", "ada")
        .await
        .expect("registration and login should succeed");

    assert_eq!(token.token_type, "bearer");
    let resolved = backend
        .auth
        .resolve_current_user(&token.access_token)
        .await
        .expect("token should resolve");
    assert_eq!(resolved, profile);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn passwords_are_stored_as_bcrypt_hashes(backend: Backend) {
    register_and_login(&backend.auth, "ada@example.com", "ada")
        .await
        .expect("registration and login should succeed");

    let stored = backend
        .users
        .find_by_email("ada@example.com")
        .await
        .expect("lookup should succeed")
        .expect("account should exist");

    assert_ne!(stored.password_hash(), "a sound passphrase");
    assert!(stored.password_hash().starts_with("$2"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_wrong_password_is_rejected(backend: Backend) {
    register_and_login(&backend.auth, "ada@example.com", "ada")
        .await
        .expect("registration and login should succeed");

    let err = backend
        .auth
        .login(LoginRequest {
            username: "ada".to_owned(),
            password: "an unsound passphrase".to_owned(),
        })
        .await
        .expect_err("wrong password should be rejected");

    assert_eq!(err.kind(), ErrorKind::Authentication);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reusing_an_email_is_rejected(backend: Backend) {
    register_and_login(&backend.auth, "ada@example.com", "ada")
        .await
        .expect("registration and login should succeed");

    let err = backend
        .auth
        .register(RegisterRequest {
            email: "ada@example.com".to_owned(),
            username: "lovelace".to_owned(),
            full_name: "Ada Lovelace".to_owned(),
            password: "a sound passphrase".to_owned(),
        })
        .await
        .expect_err("duplicate email should be rejected");

    assert_eq!(err.kind(), ErrorKind::Conflict);
}
