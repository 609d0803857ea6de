//! Read operations over the remote user directory.
//!
//! The service validates caller input before touching the source and keeps
//! no state between calls, so list and detail fetches may run concurrently.

use std::sync::Arc;

use tracing::debug;

use super::ports::{DirectoryError, UserDirectorySource, UserListRequest};
use super::validation::UserCollection;
use super::{User, UserId, UserIdError};

/// Directory reads backed by a [`UserDirectorySource`].
#[derive(Debug)]
pub struct UserDirectoryService<S> {
    source: Arc<S>,
}

impl<S> Clone for UserDirectoryService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S> UserDirectoryService<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

impl<S> UserDirectoryService<S>
where
    S: UserDirectorySource,
{
    /// Fetch validated users in service order, discarding envelope metadata.
    ///
    /// # Errors
    ///
    /// Propagates [`DirectoryError`] from the source.
    pub async fn fetch_users(&self, request: &UserListRequest) -> Result<Vec<User>, DirectoryError> {
        self.fetch_user_collection(request)
            .await
            .map(|collection| collection.users)
    }

    /// Fetch validated users together with `total`/`skip`/`limit`.
    ///
    /// # Errors
    ///
    /// Propagates [`DirectoryError`] from the source.
    pub async fn fetch_user_collection(
        &self,
        request: &UserListRequest,
    ) -> Result<UserCollection, DirectoryError> {
        let collection = self.source.fetch_user_collection(request).await?;
        debug!(
            count = collection.users.len(),
            total = ?collection.total,
            "fetched user collection"
        );
        Ok(collection)
    }

    /// Fetch one user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::InvalidArgument`] without contacting the
    /// source when `id` is not positive; otherwise propagates source errors.
    pub async fn fetch_user_by_id(&self, id: i64) -> Result<User, DirectoryError> {
        let id = UserId::new(id).map_err(invalid_id)?;
        self.source.fetch_user(id).await
    }

    /// Like [`Self::fetch_user_by_id`] for identifiers typed as text.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::InvalidArgument`] for non-numeric or
    /// non-positive input.
    pub async fn fetch_user_by_raw_id(&self, raw: &str) -> Result<User, DirectoryError> {
        let id: UserId = raw.parse().map_err(invalid_id)?;
        self.source.fetch_user(id).await
    }
}

fn invalid_id(error: UserIdError) -> DirectoryError {
    DirectoryError::invalid_argument(error.to_string())
}

#[cfg(test)]
mod tests {
    //! Service behaviour against mocked and fixture sources.

    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::ports::{FixtureUserDirectorySource, MockUserDirectorySource};
    use crate::domain::validation::validate_user;

    fn user(id: u64, first: &str) -> User {
        validate_user(&json!({
            "id": id,
            "firstName": first,
            "lastName": "Tester",
            "age": 41,
            "gender": "male",
            "email": format!("{}@example.com", first.to_lowercase()),
        }))
        .expect("valid user")
    }

    fn service(source: MockUserDirectorySource) -> UserDirectoryService<MockUserDirectorySource> {
        UserDirectoryService::new(Arc::new(source))
    }

    #[tokio::test]
    async fn fetch_users_preserves_length_and_order() {
        let mut source = MockUserDirectorySource::new();
        source
            .expect_fetch_user_collection()
            .withf(|request| request.limit == Some(30))
            .times(1)
            .return_once(|_| {
                Ok(UserCollection {
                    users: vec![user(3, "Cy"), user(1, "Ann"), user(2, "Bo")],
                    total: Some(3),
                    skip: Some(0),
                    limit: Some(30),
                })
            });

        let users = service(source)
            .fetch_users(&UserListRequest::default().with_limit(30))
            .await
            .expect("users fetched");

        let ids: Vec<u64> = users.iter().map(|u| u.id().get()).collect();
        assert_eq!(ids, [3, 1, 2]);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-5)]
    #[tokio::test]
    async fn rejects_non_positive_ids_without_calling_source(#[case] id: i64) {
        let mut source = MockUserDirectorySource::new();
        source.expect_fetch_user().never();

        let error = service(source)
            .fetch_user_by_id(id)
            .await
            .expect_err("invalid id");

        assert!(matches!(error, DirectoryError::InvalidArgument { .. }));
    }

    #[rstest]
    #[case::word("abc")]
    #[case::negative("-1")]
    #[tokio::test]
    async fn rejects_unusable_raw_ids(#[case] raw: &str) {
        let mut source = MockUserDirectorySource::new();
        source.expect_fetch_user().never();

        let error = service(source)
            .fetch_user_by_raw_id(raw)
            .await
            .expect_err("invalid id");

        assert!(matches!(error, DirectoryError::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn fetch_by_id_passes_validated_id_to_source() {
        let mut source = MockUserDirectorySource::new();
        source
            .expect_fetch_user()
            .withf(|id| id.get() == 7)
            .times(1)
            .return_once(|_| Ok(user(7, "Grace")));

        let found = service(source)
            .fetch_user_by_id(7)
            .await
            .expect("user fetched");

        assert_eq!(found.first_name(), "Grace");
    }

    #[tokio::test]
    async fn source_errors_propagate_unchanged() {
        let mut source = MockUserDirectorySource::new();
        source
            .expect_fetch_user_collection()
            .return_once(|_| Err(DirectoryError::http(500_u16)));

        let error = service(source)
            .fetch_users(&UserListRequest::default())
            .await
            .expect_err("server error");

        assert_eq!(error, DirectoryError::Http { status: 500 });
    }

    #[tokio::test]
    async fn list_and_detail_fetches_run_concurrently() {
        let source = FixtureUserDirectorySource::new(vec![user(1, "Ann"), user(2, "Bo")]);
        let service = UserDirectoryService::new(Arc::new(source));
        let request = UserListRequest::default();

        let (list, detail) = tokio::join!(service.fetch_users(&request), service.fetch_user_by_id(2));

        assert_eq!(list.expect("list").len(), 2);
        assert_eq!(detail.expect("detail").first_name(), "Bo");
    }
}
