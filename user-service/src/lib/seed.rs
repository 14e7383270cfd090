use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Username;
use crate::user::ports::UserServicePort;

/// Demo accounts as (full name, username, password).
const DEMO_USERS: [(&str, &str, &str); 3] = [
    ("John Smith", "jsmith", "SomePass"),
    ("Jane Doe", "jdoe", "QUjAskXl33$!"),
    ("Timothy H", "timh", "Changeme!"),
];

/// Create the demo accounts through the user service.
///
/// Failures are logged and skipped; the returned count is the number of
/// users actually created.
pub async fn seed_demo_users<US: UserServicePort>(user_service: &US) -> usize {
    let mut created = 0;

    for (full_name, username, password) in DEMO_USERS {
        let username = match Username::new(username.to_string()) {
            Ok(username) => username,
            Err(e) => {
                tracing::warn!(username, error = %e, "Skipping demo user");
                continue;
            }
        };

        let command = CreateUserCommand::new(
            Some(full_name.to_string()),
            username,
            password.to_string(),
        );

        match user_service.create_user(command).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, username = %user.username, "Demo user created");
                created += 1;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to create demo user"),
        }
    }

    created
}
