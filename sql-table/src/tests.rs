//! Fixtures shared by the tests of this crate.


use sql_table_api::prelude::Value;

pub use self::driver::{Event, Failure, MockConnection};
pub use self::order::Order;
pub use self::user::{Session, User, UserByName};

/// Users loaded by the fixtures: `(id, name, email)`.
pub const USERS_FIXTURES: &[(i64, &str, Option<&str>)] = &[
    (1, "Alice", Some("alice@example.com")),
    (2, "Bob", None),
    (3, "Charlie", Some("charlie@example.com")),
    (4, "Dave", None),
];

/// Returns the [`USERS_FIXTURES`] as rows of column values, in the column order read by [`User`].
pub fn user_rows() -> Vec<Vec<Value>> {
    USERS_FIXTURES
        .iter()
        .map(|(id, name, email)| vec![(*id).into(), (*name).into(), (*email).into()])
        .collect()
}

/// Returns the [`USERS_FIXTURES`] as [`User`]s.
pub fn users() -> Vec<User> {
    USERS_FIXTURES
        .iter()
        .map(|(id, name, email)| User {
            id: *id,
            name: name.to_string(),
            email: email.map(str::to_string),
        })
        .collect()
}

/// Installs a subscriber printing the events of the tests; `RUST_LOG` selects them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
