//! Single-record user use-cases: create one user and list all users.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::error;

use super::ports::{UserCreationCommand, UserRepository, UsersQuery};
use super::{ActionNotifier, Error, NewUser, User, map_persistence_error};

const EMPTY_BODY_ERROR: &str = "Request body is empty";
const NOT_AN_OBJECT_ERROR: &str = "Request body should be an object";
const MISSING_FIELDS_ERROR: &str = "Name and email are required";

/// Service implementing [`UsersQuery`] and [`UserCreationCommand`].
#[derive(Clone)]
pub struct UserAccountsService<R> {
    repository: Arc<R>,
    notifier: ActionNotifier,
}

impl<R> UserAccountsService<R> {
    /// Create a service over `repository`.
    pub fn new(repository: Arc<R>, notifier: ActionNotifier) -> Self {
        Self {
            repository,
            notifier,
        }
    }
}

fn parse_new_user(payload: &Value) -> Result<NewUser, Error> {
    let fields = match payload {
        Value::Null => return Err(Error::invalid_request(EMPTY_BODY_ERROR)),
        Value::Object(fields) if fields.is_empty() => {
            return Err(Error::invalid_request(EMPTY_BODY_ERROR));
        }
        Value::Object(fields) => fields,
        _ => return Err(Error::invalid_request(NOT_AN_OBJECT_ERROR)),
    };
    let field = |key: &str| fields.get(key).and_then(Value::as_str);
    NewUser::try_from_parts(field("name"), field("email"))
        .map_err(|_| Error::invalid_request(MISSING_FIELDS_ERROR))
}

#[async_trait]
impl<R> UsersQuery for UserAccountsService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        let users = self.repository.list_all().await.map_err(|err| {
            error!(error = %err, "failed to list users");
            map_persistence_error(err)
        })?;
        self.notifier.notify("users listed");
        Ok(users)
    }
}

#[async_trait]
impl<R> UserCreationCommand for UserAccountsService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, payload: Value) -> Result<User, Error> {
        let new_user = parse_new_user(&payload)?;
        let mut session = self
            .repository
            .open_session()
            .await
            .map_err(map_persistence_error)?;
        let user = session.insert(&new_user).await.map_err(|err| {
            error!(error = %err, "failed to create user");
            map_persistence_error(err)
        })?;
        self.notifier
            .notify(format!("user created: {}", user.name().as_ref()));
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        FixtureActionLog, FixtureUserRepository, MockUserRepository, UserPersistenceError,
    };
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn notifier() -> ActionNotifier {
        ActionNotifier::new(Arc::new(FixtureActionLog))
    }

    fn make_service<R>(repository: R, notifier: ActionNotifier) -> UserAccountsService<R> {
        UserAccountsService::new(Arc::new(repository), notifier)
    }

    #[rstest]
    #[case(Value::Null, EMPTY_BODY_ERROR)]
    #[case(json!({}), EMPTY_BODY_ERROR)]
    #[case(json!([{"name": "A", "email": "a@x.com"}]), NOT_AN_OBJECT_ERROR)]
    #[case(json!({"name": "A"}), MISSING_FIELDS_ERROR)]
    #[case(json!({"name": "", "email": "a@x.com"}), MISSING_FIELDS_ERROR)]
    #[case(json!({"name": "A", "email": 5}), MISSING_FIELDS_ERROR)]
    #[tokio::test]
    async fn create_rejects_invalid_payloads(
        notifier: ActionNotifier,
        #[case] payload: Value,
        #[case] expected: &str,
    ) {
        let service = make_service(MockUserRepository::new(), notifier);

        let error = service.create_user(payload).await.expect_err("invalid");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn create_then_list_returns_stored_user(notifier: ActionNotifier) {
        let service = make_service(FixtureUserRepository::new(), notifier);

        let created = service
            .create_user(json!({"name": "Ada", "email": "ada@example.com"}))
            .await
            .expect("created");
        let users = service.list_users().await.expect("listed");

        assert_eq!(users, vec![created]);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_maps_to_conflict(notifier: ActionNotifier) {
        let service = make_service(FixtureUserRepository::new(), notifier);
        let payload = json!({"name": "Ada", "email": "ada@example.com"});
        service.create_user(payload.clone()).await.expect("first");

        let error = service.create_user(payload).await.expect_err("duplicate");

        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn list_maps_store_errors(
        notifier: ActionNotifier,
        #[case] failure: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockUserRepository::new();
        repo.expect_list_all()
            .times(1)
            .return_once(move || Err(failure));
        let service = make_service(repo, notifier);

        let error = service.list_users().await.expect_err("store failure");

        assert_eq!(error.code(), expected);
    }
}
