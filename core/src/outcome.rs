//! The result envelope returned by every client operation.
//!
//! # Design
//! `Outcome` is a tagged union, so exactly one of payload or error exists. The
//! typed accessors below let callers read payload fields without matching;
//! on a failure they return `None`, zero or `false` rather than panicking.

use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::types::{MonthlyCount, Tree};

/// Success or failure of a single API call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure(ApiError),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(err) => Some(err),
        }
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Outcome::Success(payload) => Some(payload),
            Outcome::Failure(_) => None,
        }
    }

    pub fn into_payload(self) -> Option<T> {
        match self {
            Outcome::Success(payload) => Some(payload),
            Outcome::Failure(_) => None,
        }
    }

    /// Convert into a `Result` for callers that prefer `?`.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            Outcome::Success(payload) => Ok(payload),
            Outcome::Failure(err) => Err(err),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(payload) => Outcome::Success(f(payload)),
            Outcome::Failure(err) => Outcome::Failure(err),
        }
    }
}

impl<T> From<Result<T, ApiError>> for Outcome<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(payload) => Outcome::Success(payload),
            Err(err) => Outcome::Failure(err),
        }
    }
}

impl Outcome<Tree> {
    pub fn uuid(&self) -> Option<&str> {
        self.payload().and_then(|tree| tree.uuid.as_deref())
    }

    pub fn enterprise_id(&self) -> Option<&str> {
        self.payload().map(|tree| tree.enterprise_id.as_str())
    }

    pub fn project_id(&self) -> Option<&str> {
        self.payload().map(|tree| tree.project_id.as_str())
    }

    pub fn user(&self) -> Option<&str> {
        self.payload().map(|tree| tree.user.as_str())
    }

    /// Number of trees in the record, 0 on failure.
    pub fn tree_count(&self) -> u32 {
        self.payload().map_or(0, |tree| tree.tree_count)
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.payload().map(|tree| tree.created)
    }
}

impl Outcome<MonthlyCount> {
    /// Trees planted in the requested month, 0 on failure.
    pub fn total_trees(&self) -> u64 {
        self.payload().map_or(0, |count| count.total_trees)
    }
}

impl Outcome<bool> {
    /// Whether the delete succeeded. `delete_by_id` yields `Success(true)`
    /// for every 2xx answer, so this is false only on failure.
    pub fn deleted(&self) -> bool {
        matches!(self, Outcome::Success(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Tree {
        Tree {
            uuid: Some("abc".to_string()),
            enterprise_id: "123".to_string(),
            project_id: "456".to_string(),
            user: "JUnit".to_string(),
            tree_count: 4,
            created: "2019-05-17T00:36:25.797Z".parse().unwrap(),
        }
    }

    #[test]
    fn success_exposes_payload_fields() {
        let outcome = Outcome::Success(tree());
        assert!(outcome.is_success());
        assert!(outcome.error().is_none());
        assert_eq!(outcome.uuid(), Some("abc"));
        assert_eq!(outcome.enterprise_id(), Some("123"));
        assert_eq!(outcome.project_id(), Some("456"));
        assert_eq!(outcome.user(), Some("JUnit"));
        assert_eq!(outcome.tree_count(), 4);
        assert!(outcome.created().is_some());
    }

    #[test]
    fn failure_accessors_return_empty_values() {
        let outcome: Outcome<Tree> = Outcome::Failure(ApiError::Unauthorized);
        assert!(outcome.is_failure());
        assert_eq!(outcome.error(), Some(&ApiError::Unauthorized));
        assert_eq!(outcome.uuid(), None);
        assert_eq!(outcome.user(), None);
        assert_eq!(outcome.tree_count(), 0);
        assert_eq!(outcome.created(), None);

        let count: Outcome<MonthlyCount> = Outcome::Failure(ApiError::Unauthorized);
        assert_eq!(count.total_trees(), 0);

        let deleted: Outcome<bool> = Outcome::Failure(ApiError::Unauthorized);
        assert!(!deleted.deleted());
    }

    #[test]
    fn deleted_requires_true_payload() {
        assert!(Outcome::Success(true).deleted());
        assert!(!Outcome::Success(false).deleted());
    }

    #[test]
    fn into_payload_drops_the_error() {
        assert_eq!(Outcome::Success(tree()).into_payload(), Some(tree()));
        let failed: Outcome<Tree> = Outcome::Failure(ApiError::Unauthorized);
        assert_eq!(failed.into_payload(), None);
    }

    #[test]
    fn converts_to_and_from_result() {
        let outcome: Outcome<u64> = Ok(7).into();
        assert_eq!(outcome.clone().into_result().unwrap(), 7);
        assert_eq!(outcome.map(|n| n * 2), Outcome::Success(14));

        let failed: Outcome<u64> = Err(ApiError::Unauthorized).into();
        assert_eq!(failed.into_result().unwrap_err(), ApiError::Unauthorized);
    }
}
