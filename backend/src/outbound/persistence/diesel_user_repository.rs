//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! A [`DieselUserSession`] owns one pooled connection for its whole
//! lifetime. `insert_all` builds every insert on that connection before
//! awaiting any of them, so `AsyncPgConnection` pipelines the statements
//! instead of waiting for each round-trip. Each statement runs outside any
//! transaction, so one failure never rolls back a sibling.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use tracing::debug;

use crate::domain::ports::{
    InsertOutcomes, UserPersistenceError, UserRepository, UserWriteSession,
};
use crate::domain::{EmailAddress, NewUser, User, UserId, UserName};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, OwnedConnection, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to user persistence errors.
///
/// `email` names the candidate of an insert so unique violations can be
/// reported against it.
fn map_diesel_error(error: DieselError, email: Option<&str>) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match (error, email) {
        (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _), Some(email)) => {
            UserPersistenceError::duplicate_email(email)
        }
        (DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _), _) => {
            UserPersistenceError::connection("database connection error")
        }
        (DieselError::DatabaseError(_, info), _) => UserPersistenceError::query(info.message()),
        (other, _) => UserPersistenceError::query(other.to_string()),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow { id, name, email } = row;
    let name = UserName::new(name)
        .map_err(|err| UserPersistenceError::query(format!("stored user {id}: {err}")))?;
    let email = EmailAddress::new(email)
        .map_err(|err| UserPersistenceError::query(format!("stored user {id}: {err}")))?;
    Ok(User::new(UserId::new(id), name, email))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn open_session(&self) -> Result<Box<dyn UserWriteSession>, UserPersistenceError> {
        let conn = self.pool.get_owned().await.map_err(map_pool_error)?;
        Ok(Box::new(DieselUserSession { conn }))
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        rows.into_iter().map(row_to_user).collect()
    }
}

/// Write session holding one leased connection.
pub struct DieselUserSession {
    conn: OwnedConnection,
}

#[async_trait]
impl UserWriteSession for DieselUserSession {
    async fn insert(&mut self, new_user: &NewUser) -> Result<User, UserPersistenceError> {
        let conn: &mut AsyncPgConnection = &mut self.conn;
        let stored: UserRow = diesel::insert_into(users::table)
            .values(NewUserRow::from(new_user))
            .returning(UserRow::as_returning())
            .get_result(conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(new_user.email().as_ref())))?;
        row_to_user(stored)
    }

    async fn insert_all(&mut self, new_users: Vec<NewUser>) -> InsertOutcomes {
        let conn: &mut AsyncPgConnection = &mut self.conn;
        let pending = FuturesUnordered::new();
        for (index, new_user) in new_users.into_iter().enumerate() {
            let insert = diesel::insert_into(users::table)
                .values(NewUserRow::from(&new_user))
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(&mut *conn);
            pending.push(async move {
                let outcome = insert
                    .await
                    .map_err(|err| map_diesel_error(err, Some(new_user.email().as_ref())))
                    .and_then(row_to_user);
                (index, outcome)
            });
        }
        pending.boxed()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for Diesel error and row mapping.
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct StubInfo(&'static str);

    impl diesel::result::DatabaseErrorInformation for StubInfo {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, message: &'static str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(StubInfo(message)))
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate_email() {
        let error = database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"users_email_key\"",
        );

        assert_eq!(
            map_diesel_error(error, Some("a@x.com")),
            UserPersistenceError::duplicate_email("a@x.com")
        );
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        let error = database_error(DatabaseErrorKind::ClosedConnection, "server closed");

        assert!(matches!(
            map_diesel_error(error, Some("a@x.com")),
            UserPersistenceError::Connection { .. }
        ));
    }

    #[rstest]
    fn other_errors_map_to_query() {
        assert_eq!(
            map_diesel_error(DieselError::NotFound, None),
            UserPersistenceError::query(DieselError::NotFound.to_string())
        );
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        assert_eq!(
            map_pool_error(PoolError::checkout("timed out")),
            UserPersistenceError::connection("timed out")
        );
    }

    #[rstest]
    fn rows_with_empty_fields_are_rejected() {
        let row = UserRow {
            id: 4,
            name: String::new(),
            email: "a@x.com".to_owned(),
        };

        assert!(matches!(
            row_to_user(row),
            Err(UserPersistenceError::Query { .. })
        ));
    }
}
