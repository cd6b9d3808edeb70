//! SQLite driver, backed by [`rusqlite`].
//!
//! Rows of a query are fetched eagerly into a [`ResultSet`], since a `rusqlite` cursor borrows
//! its statement and cannot outlive the call which prepared it.

use std::path::PathBuf;
use std::time::Duration;

use rusqlite::types::{ToSql, ToSqlOutput, Value as SqliteValue, ValueRef};
use sql_table_api::prelude::{
    Connection, DriverError, DriverResult, ResultSet, SingleRow, Statement, Transaction, Value,
};
use tracing::debug;

/// Default time to wait for a locked database.
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Options used to open a [`SqliteConnection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteConfig {
    /// Database file; `None` opens a private in-memory database.
    pub path: Option<PathBuf>,
    /// How long a statement waits for a lock held by another connection.
    pub busy_timeout: Duration,
    /// Whether `FOREIGN KEY` constraints are enforced.
    pub foreign_keys: bool,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            foreign_keys: true,
        }
    }
}

/// A [`Connection`] to a SQLite database.
#[derive(Debug)]
pub struct SqliteConnection {
    inner: rusqlite::Connection,
}

impl SqliteConnection {
    /// Opens a connection with the given configuration.
    pub fn open(config: &SqliteConfig) -> DriverResult<Self> {
        let inner = match &config.path {
            Some(path) => rusqlite::Connection::open(path),
            None => rusqlite::Connection::open_in_memory(),
        }
        .map_err(driver_error)?;
        inner
            .busy_timeout(config.busy_timeout)
            .map_err(driver_error)?;
        inner
            .pragma_update(None, "foreign_keys", config.foreign_keys)
            .map_err(driver_error)?;
        debug!(path = ?config.path, "sqlite connection opened");

        Ok(Self { inner })
    }

    /// Opens a private in-memory database with the default configuration.
    pub fn open_in_memory() -> DriverResult<Self> {
        Self::open(&SqliteConfig::default())
    }

    /// Returns the underlying [`rusqlite::Connection`].
    pub fn inner(&self) -> &rusqlite::Connection {
        &self.inner
    }
}

impl Connection for SqliteConnection {
    type Rows<'c> = ResultSet;
    type Transaction<'c> = SqliteTransaction<'c>;

    fn query(&self, sql: &str) -> DriverResult<ResultSet> {
        let mut statement = self.inner.prepare(sql).map_err(driver_error)?;
        let columns = statement.column_count();
        let mut rows = statement.query([]).map_err(driver_error)?;

        let mut buffered = Vec::new();
        while let Some(row) = rows.next().map_err(driver_error)? {
            buffered.push(read_row(row, columns)?);
        }

        Ok(ResultSet::new(buffered))
    }

    fn query_row(&self, sql: &str, args: &[Value]) -> DriverResult<SingleRow> {
        let mut statement = self.inner.prepare(sql).map_err(driver_error)?;
        let columns = statement.column_count();
        let mut rows = statement.query(params(args)).map_err(driver_error)?;

        let single_row = match rows.next().map_err(driver_error)? {
            Some(row) => SingleRow::new(read_row(row, columns)?),
            None => SingleRow::empty(),
        };

        Ok(single_row)
    }

    fn exec(&self, sql: &str, args: &[Value]) -> DriverResult<u64> {
        self.inner
            .execute(sql, params(args))
            .map(|affected| affected as u64)
            .map_err(driver_error)
    }

    fn begin(&self) -> DriverResult<SqliteTransaction<'_>> {
        self.inner
            .unchecked_transaction()
            .map(SqliteTransaction)
            .map_err(driver_error)
    }
}

/// A [`Transaction`] on a [`SqliteConnection`]. It rolls back when dropped.
pub struct SqliteTransaction<'c>(rusqlite::Transaction<'c>);

impl<'c> Transaction for SqliteTransaction<'c> {
    type Statement<'t>
        = SqliteStatement<'t>
    where
        Self: 't;

    fn prepare(&self, sql: &str) -> DriverResult<SqliteStatement<'_>> {
        self.0
            .prepare(sql)
            .map(SqliteStatement)
            .map_err(driver_error)
    }

    fn commit(self) -> DriverResult<()> {
        self.0.commit().map_err(driver_error)
    }

    fn rollback(self) -> DriverResult<()> {
        self.0.rollback().map_err(driver_error)
    }
}

/// A [`Statement`] prepared within a [`SqliteTransaction`].
pub struct SqliteStatement<'t>(rusqlite::Statement<'t>);

impl Statement for SqliteStatement<'_> {
    fn exec(&mut self, args: &[Value]) -> DriverResult<u64> {
        self.0
            .execute(params(args))
            .map(|affected| affected as u64)
            .map_err(driver_error)
    }
}

/// Binds a [`Value`] as a SQLite parameter.
struct SqlArg<'a>(&'a Value);

impl ToSql for SqlArg<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let output = match self.0 {
            Value::Blob(bytes) => ToSqlOutput::Borrowed(ValueRef::Blob(bytes.as_slice())),
            Value::Boolean(v) => ToSqlOutput::Owned(SqliteValue::Integer(i64::from(*v))),
            Value::Decimal(v) => ToSqlOutput::Owned(SqliteValue::Text(v.to_string())),
            Value::Float64(v) => ToSqlOutput::Owned(SqliteValue::Real(*v)),
            Value::Int32(v) => ToSqlOutput::Owned(SqliteValue::Integer(i64::from(*v))),
            Value::Int64(v) => ToSqlOutput::Owned(SqliteValue::Integer(*v)),
            Value::Null => ToSqlOutput::Owned(SqliteValue::Null),
            Value::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            Value::Uint32(v) => ToSqlOutput::Owned(SqliteValue::Integer(i64::from(*v))),
            Value::Uint64(v) => {
                let integer = i64::try_from(*v)
                    .map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))?;
                ToSqlOutput::Owned(SqliteValue::Integer(integer))
            }
            Value::Uuid(v) => ToSqlOutput::Owned(SqliteValue::Text(v.to_string())),
        };

        Ok(output)
    }
}

/// Positional parameters for `args`.
fn params(args: &[Value]) -> rusqlite::ParamsFromIter<impl Iterator<Item = SqlArg<'_>>> {
    rusqlite::params_from_iter(args.iter().map(SqlArg))
}

/// Reads the `columns` values of a row.
fn read_row(row: &rusqlite::Row<'_>, columns: usize) -> DriverResult<Vec<Value>> {
    (0..columns)
        .map(|index| {
            row.get_ref(index)
                .map_err(driver_error)
                .and_then(value_from_sqlite)
        })
        .collect()
}

/// Converts a SQLite value; TEXT which is not valid UTF-8 is an error.
fn value_from_sqlite(value: ValueRef<'_>) -> DriverResult<Value> {
    let value = match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::Int64(v),
        ValueRef::Real(v) => Value::Float64(v),
        ValueRef::Text(v) => std::str::from_utf8(v)
            .map(|text| Value::Text(text.to_string()))
            .map_err(DriverError::backend)?,
        ValueRef::Blob(v) => Value::Blob(v.to_vec()),
    };

    Ok(value)
}

/// Converts a [`rusqlite::Error`], keeping constraint violations apart.
fn driver_error(err: rusqlite::Error) -> DriverError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, message)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            DriverError::Constraint(message.clone().unwrap_or_else(|| failure.to_string()))
        }
        _ => DriverError::backend(err),
    }
}

#[cfg(test)]
mod tests {

    use rust_decimal::Decimal;
    use sql_table_api::prelude::{SqlTable, TableError};
    use sql_table_api::values;

    use super::*;
    use crate::manager::TableManager;
    use crate::tests::{Order, Session, User, init_tracing, users};

    const INSERT_USER: &str = "INSERT INTO users (id, name, email) VALUES (?1, ?2, ?3)";
    const SELECT_USERS: &str = "SELECT id, name, email FROM users ORDER BY id";

    fn setup() -> SqliteConnection {
        init_tracing();
        let connection = SqliteConnection::open_in_memory().expect("failed to open database");
        connection
            .exec(
                "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL, email TEXT)",
                &[],
            )
            .expect("failed to create table");
        connection
    }

    #[test]
    fn test_should_insert_and_query_users() {
        let connection = setup();
        let table: TableManager<'_, _, User> = TableManager::new(&connection);

        table
            .transaction(INSERT_USER, &users())
            .expect("failed to insert users");

        assert_eq!(table.query(SELECT_USERS).expect("failed to query"), users());
        let charlie = table
            .query_row("SELECT id, name, email FROM users WHERE id = ?1", &values![3_i64])
            .expect("failed to query user");
        assert_eq!(charlie, users()[2]);
    }

    #[test]
    fn test_should_report_not_found() {
        let connection = setup();
        let table: TableManager<'_, _, User> = TableManager::new(&connection);

        let err = table
            .query_row("SELECT id, name, email FROM users WHERE id = ?1", &values![1_i64])
            .expect_err("table is empty");

        assert!(err.is_not_found());
    }

    #[test]
    fn test_should_leave_table_untouched_when_batch_fails() {
        let connection = setup();
        let table: TableManager<'_, _, User> = TableManager::new(&connection);
        table
            .transaction(INSERT_USER, &users()[1..2])
            .expect("failed to insert Bob");

        let err = table
            .transaction(INSERT_USER, &users()[..3])
            .expect_err("duplicate id should fail");

        assert!(matches!(
            err.cause(),
            TableError::Statement { index: 1, source } if source.is_constraint()
        ));
        assert!(matches!(err, TableError::RolledBack { .. }));
        assert_eq!(
            table.query(SELECT_USERS).expect("failed to query"),
            users()[1..2].to_vec()
        );
    }

    #[test]
    fn test_should_rollback_when_statement_cannot_be_prepared() {
        let connection = setup();
        let table: TableManager<'_, _, User> = TableManager::new(&connection);

        let err = table
            .transaction("INSERT INTO nowhere VALUES (?1, ?2, ?3)", &users())
            .expect_err("prepare should fail");

        assert!(matches!(err, TableError::RolledBack { .. }));
        assert!(matches!(err.cause(), TableError::Connection(_)));
        // the connection is usable again
        table
            .transaction(INSERT_USER, &users())
            .expect("failed to insert users");
    }

    #[test]
    fn test_should_exec_update() {
        let connection = setup();
        let table: TableManager<'_, _, User> = TableManager::new(&connection);
        table
            .transaction(INSERT_USER, &users())
            .expect("failed to insert users");

        table
            .exec(
                "UPDATE users SET email = ?1 WHERE id = ?2",
                &values!["bob@example.com", 2_i64],
            )
            .expect("failed to update Bob");

        let bob = table
            .query_row("SELECT id, name, email FROM users WHERE id = ?1", &values![2_i64])
            .expect("failed to query Bob");
        assert_eq!(bob.email.as_deref(), Some("bob@example.com"));
    }

    #[test]
    fn test_should_store_rich_values() {
        let connection = setup();
        connection
            .exec(
                "CREATE TABLE orders (id INTEGER PRIMARY KEY, customer TEXT, total TEXT, paid INTEGER)",
                &[],
            )
            .expect("failed to create orders");
        connection
            .exec(
                "CREATE TABLE sessions (token TEXT PRIMARY KEY, user_id INTEGER)",
                &[],
            )
            .expect("failed to create sessions");

        let orders: TableManager<'_, _, Order> = TableManager::new(&connection);
        let order = Order {
            id: 7,
            customer: "ACME".to_string(),
            total: Decimal::new(1999, 2),
            paid: true,
        };
        orders
            .transaction(
                "INSERT INTO orders (id, customer, total, paid) VALUES (?1, ?2, ?3, ?4)",
                std::slice::from_ref(&order),
            )
            .expect("failed to insert order");
        let stored = orders
            .query("SELECT customer, total, id, paid FROM orders")
            .expect("failed to query orders");
        assert_eq!(stored, vec![order]);

        let sessions: TableManager<'_, _, Session> = TableManager::new(&connection);
        let session = Session {
            token: uuid::Uuid::from_u128(0x67e5_5044_10b1_426f_9247_bb68_0e5f_e0c8),
            user_id: 1,
            loaded: false,
        };
        sessions
            .transaction(
                "INSERT INTO sessions (token, user_id) VALUES (?1, ?2)",
                std::slice::from_ref(&session),
            )
            .expect("failed to insert session");
        let stored = sessions
            .query_row(
                "SELECT token, user_id FROM sessions WHERE user_id = ?1",
                &values![1_i64],
            )
            .expect("failed to query session");
        assert_eq!(stored, session);
    }

    #[test]
    fn test_should_fail_binding_unsigned_overflow() {
        let connection = setup();

        let err = connection
            .exec(
                "INSERT INTO users (id, name) VALUES (?1, ?2)",
                &values![u64::MAX, "Overflow"],
            )
            .expect_err("u64::MAX does not fit");

        assert!(!err.is_constraint());
    }

    #[test]
    fn test_should_reject_text_which_is_not_utf8() {
        let connection = setup();
        connection
            .exec("CREATE TABLE raw (v TEXT)", &[])
            .expect("failed to create table");
        connection
            .exec("INSERT INTO raw (v) VALUES (CAST(X'FF61' AS TEXT))", &[])
            .expect("failed to insert raw text");

        assert!(matches!(
            connection.query("SELECT v FROM raw"),
            Err(DriverError::Backend(_))
        ));
        assert!(matches!(
            connection.query_row("SELECT v FROM raw", &[]),
            Err(DriverError::Backend(_))
        ));
    }

    #[test]
    fn test_should_rollback_dropped_transaction() {
        let connection = setup();
        {
            let tx = connection.begin().expect("failed to begin");
            let mut statement = tx.prepare(INSERT_USER).expect("failed to prepare");
            statement
                .exec(&values![1_i64, "Alice", Value::Null])
                .expect("failed to insert Alice");
        }

        let table: TableManager<'_, _, User> = TableManager::new(&connection);
        assert!(table.query(SELECT_USERS).expect("failed to query").is_empty());
    }

    #[test]
    fn test_should_open_with_default_config() {
        let config = SqliteConfig::default();
        assert_eq!(config.path, None);
        assert_eq!(config.busy_timeout, Duration::from_secs(5));
        assert!(config.foreign_keys);

        let connection = SqliteConnection::open(&config).expect("failed to open database");
        let foreign_keys: i64 = connection
            .inner()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .expect("failed to read pragma");
        assert_eq!(foreign_keys, 1);
    }
}
