//! Unique-constraint mapping tests for the `PostgreSQL` user repository.
//!
//! The schema's `users_email_key` and `users_username_key` constraints must
//! surface as [`StorageError::Duplicate`] with the matching field name, on
//! both the insert and update paths.

use crate::postgres::helpers::{PgContext, pg_context, user, with_contact};
use rstest::rstest;
use taskdeck::ports::{StorageError, UserRepository};

#[rstest]
fn create_rejects_duplicate_email(pg_context: Option<PgContext>) {
    let Some(context) = pg_context else { return };

    context
        .rt
        .block_on(context.repos.users.create(&user("ada@example.com", "ada")))
        .expect("first create should succeed");

    let result = context.rt.block_on(
        context
            .repos
            .users
            .create(&user("ada@example.com", "lovelace")),
    );

    assert!(matches!(
        result,
        Err(StorageError::Duplicate {
            entity: "user",
            field: "email"
        })
    ));

    context.cleanup();
}

#[rstest]
fn create_rejects_duplicate_username(pg_context: Option<PgContext>) {
    let Some(context) = pg_context else { return };

    context
        .rt
        .block_on(context.repos.users.create(&user("ada@example.com", "ada")))
        .expect("first create should succeed");

    let result = context.rt.block_on(
        context
            .repos
            .users
            .create(&user("other@example.com", "ada")),
    );

    assert!(matches!(
        result,
        Err(StorageError::Duplicate {
            entity: "user",
            field: "username"
        })
    ));

    context.cleanup();
}

#[rstest]
fn create_rejects_reused_id(pg_context: Option<PgContext>) {
    let Some(context) = pg_context else { return };

    let ada = user("ada@example.com", "ada");
    context
        .rt
        .block_on(context.repos.users.create(&ada))
        .expect("first create should succeed");

    let same_id = with_contact(&ada, "other@example.com", "other");
    let result = context.rt.block_on(context.repos.users.create(&same_id));

    assert!(matches!(
        result,
        Err(StorageError::Duplicate {
            entity: "user",
            field: "id"
        })
    ));

    context.cleanup();
}

#[rstest]
fn update_rejects_email_taken_by_another_account(pg_context: Option<PgContext>) {
    let Some(context) = pg_context else { return };

    let ada = user("ada@example.com", "ada");
    let bob = user("bob@example.com", "bob");
    context
        .rt
        .block_on(context.repos.users.create(&ada))
        .expect("create ada");
    context
        .rt
        .block_on(context.repos.users.create(&bob))
        .expect("create bob");

    let result = context.rt.block_on(
        context
            .repos
            .users
            .update(&with_contact(&bob, "ada@example.com", "bob")),
    );

    assert!(matches!(
        result,
        Err(StorageError::Duplicate {
            entity: "user",
            field: "email"
        })
    ));

    context.cleanup();
}

#[rstest]
fn update_rejects_username_taken_by_another_account(pg_context: Option<PgContext>) {
    let Some(context) = pg_context else { return };

    let ada = user("ada@example.com", "ada");
    let bob = user("bob@example.com", "bob");
    context
        .rt
        .block_on(context.repos.users.create(&ada))
        .expect("create ada");
    context
        .rt
        .block_on(context.repos.users.create(&bob))
        .expect("create bob");

    let result = context.rt.block_on(
        context
            .repos
            .users
            .update(&with_contact(&bob, "bob@example.com", "ada")),
    );

    assert!(matches!(
        result,
        Err(StorageError::Duplicate {
            entity: "user",
            field: "username"
        })
    ));

    context.cleanup();
}
