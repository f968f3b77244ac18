//! Shared test helpers wiring the full service stack over one shared
//! in-memory store.

use rstest::fixture;
use std::sync::Arc;

use chrono::Duration;
use mockable::DefaultClock;
use taskdeck::{
    adapters::{
        email::LoggingMailer,
        memory::{
            InMemoryTaskListRepository, InMemoryTaskRepository, InMemoryUserRepository,
            MemoryStore,
        },
        security::{BcryptPasswordHasher, JwtTokenIssuer},
    },
    config::SmtpConfig,
    services::{
        AccessToken, AuthService, LoginRequest, RegisterRequest, TaskListService, TaskService,
        UserProfile,
    },
};

/// Authentication service over the in-memory user store.
pub type TestAuthService =
    AuthService<InMemoryUserRepository, BcryptPasswordHasher, JwtTokenIssuer, DefaultClock>;

/// Task list service over the in-memory store.
pub type TestListService =
    TaskListService<InMemoryTaskListRepository, InMemoryTaskRepository, DefaultClock>;

/// Task service over the in-memory store with the log-backed mailer.
pub type TestTaskService = TaskService<
    InMemoryTaskRepository,
    InMemoryTaskListRepository,
    InMemoryUserRepository,
    LoggingMailer,
    DefaultClock,
>;

/// The assembled application services sharing one store.
pub struct Backend {
    /// Authentication service.
    pub auth: TestAuthService,
    /// Task list service.
    pub lists: TestListService,
    /// Task service.
    pub tasks: TestTaskService,
    /// Direct handle on the user store, for account-level checks.
    pub users: Arc<InMemoryUserRepository>,
}

/// Provides the full service stack the way the composition root wires it,
/// with in-memory persistence in place of `PostgreSQL`.
#[fixture]
pub fn backend() -> Backend {
    let store = MemoryStore::new();
    let users = Arc::new(InMemoryUserRepository::new(store.clone()));
    let lists = Arc::new(InMemoryTaskListRepository::new(store.clone()));
    let tasks = Arc::new(InMemoryTaskRepository::new(store));
    let clock = Arc::new(DefaultClock);
    let mailer = Arc::new(LoggingMailer::new(SmtpConfig {
        server: "localhost".to_owned(),
        port: 1025,
        username: "taskdeck".to_owned(),
        password: "taskdeck".to_owned(),
    }));

    let auth = AuthService::new(
        Arc::clone(&users),
        Arc::new(BcryptPasswordHasher::new()),
        Arc::new(JwtTokenIssuer::new(
            "integration-secret",
            Duration::minutes(30),
        )),
        Arc::clone(&clock),
    );
    let list_service = TaskListService::new(
        Arc::clone(&lists),
        Arc::clone(&tasks),
        Arc::clone(&clock),
    );
    let task_service = TaskService::new(tasks, lists, Arc::clone(&users), mailer, clock);

    Backend {
        auth,
        lists: list_service,
        tasks: task_service,
        users,
    }
}

/// Registers an account and logs it in, returning the profile and token.
///
/// # Errors
///
/// Returns an error if registration or login fails.
pub async fn register_and_login(
    auth: &TestAuthService,
    email: &str,
    username: &str,
) -> Result<(UserProfile, AccessToken), eyre::Report> {
    let profile = auth
        .register(RegisterRequest {
            email: email.to_owned(),
            username: username.to_owned(),
            full_name: "Test User".to_owned(),
            password: "a sound passphrase".to_owned(),
        })
        .await?;
    let token = auth
        .login(LoginRequest {
            username: username.to_owned(),
            password: "a sound passphrase".to_owned(),
        })
        .await?;
    Ok((profile, token))
}
