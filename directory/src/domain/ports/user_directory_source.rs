//! Port for reading users from the remote directory service.
//!
//! Adapters own the transport: they issue exactly one request per call,
//! surface non-success statuses as [`DirectoryError::Http`] and hand the body
//! to the validator. They never retry or cache.

use async_trait::async_trait;

use crate::domain::validation::{UserCollection, ValidationError};
use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised while reading the remote user directory.
    pub enum DirectoryError {
        /// The service answered with a non-success HTTP status.
        Http { status: u16 } => "user service responded with HTTP {status}",
        /// The response body does not match the user schema.
        Validation { error: ValidationError } => "invalid user payload: {error}",
        /// The caller supplied an unusable argument; nothing was sent.
        InvalidArgument { message: String } => "invalid argument: {message}",
        /// The request could not be delivered or the response not read.
        Transport { message: String } => "user service transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } => "user service timed out: {message}",
        /// A success response carried a body that is not JSON.
        Decode { message: String } => "user service response decode failed: {message}",
    }
}

impl From<ValidationError> for DirectoryError {
    fn from(error: ValidationError) -> Self {
        Self::validation(error)
    }
}

/// Query options for the collection endpoint.
///
/// Only explicitly supplied options are sent; `None` leaves the choice to the
/// service. An empty search text counts as not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListRequest {
    pub limit: Option<u32>,
    pub skip: Option<u32>,
    pub query: Option<String>,
}

impl UserListRequest {
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Query string pairs to send, in `limit`, `skip`, `q` order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        if let Some(query) = self.query.as_deref().filter(|query| !query.is_empty()) {
            pairs.push(("q", query.to_owned()));
        }
        pairs
    }
}

/// Read access to the remote user directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectorySource: Send + Sync {
    /// Fetch one page of the collection endpoint.
    async fn fetch_user_collection(
        &self,
        request: &UserListRequest,
    ) -> Result<UserCollection, DirectoryError>;

    /// Fetch one user by identifier.
    async fn fetch_user(&self, id: UserId) -> Result<User, DirectoryError>;
}

/// In-memory source serving a fixed set of users.
///
/// Applies `skip` and `limit` like the remote service and answers unknown ids
/// with HTTP 404. Search text is ignored.
#[derive(Debug, Clone, Default)]
pub struct FixtureUserDirectorySource {
    users: Vec<User>,
}

impl FixtureUserDirectorySource {
    /// Serve `users` in the given order.
    #[must_use]
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserDirectorySource for FixtureUserDirectorySource {
    async fn fetch_user_collection(
        &self,
        request: &UserListRequest,
    ) -> Result<UserCollection, DirectoryError> {
        let skip = request.skip.map_or(0, |skip| skip as usize);
        let limit = request.limit.map_or(usize::MAX, |limit| limit as usize);
        let users: Vec<User> = self.users.iter().skip(skip).take(limit).cloned().collect();
        Ok(UserCollection {
            total: Some(self.users.len() as u64),
            skip: Some(skip as u64),
            limit: Some(users.len() as u64),
            users,
        })
    }

    async fn fetch_user(&self, id: UserId) -> Result<User, DirectoryError> {
        self.users
            .iter()
            .find(|user| user.id() == id)
            .cloned()
            .ok_or(DirectoryError::Http { status: 404 })
    }
}
