//! Response classification.
//!
//! Status codes are inspected before the body: a 404 or 401 is reported as
//! such even when its body is not valid JSON.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::outcome::Outcome;

/// Map a response to an `Outcome`, decoding 2xx bodies as `P`.
///
/// `resource` is the noun used in the not-found message.
pub fn classify<P: DeserializeOwned>(resource: &str, response: &HttpResponse) -> Outcome<P> {
    match check_status(resource, response) {
        Ok(()) => Outcome::from(serde_json::from_str::<P>(&response.body).map_err(ApiError::decode)),
        Err(err) => Outcome::Failure(err),
    }
}

/// Map a delete response to an `Outcome`. Any 2xx status counts as
/// deleted; the body is not inspected.
pub fn classify_deleted(resource: &str, response: &HttpResponse) -> Outcome<bool> {
    match check_status(resource, response) {
        Ok(()) => Outcome::Success(true),
        Err(err) => Outcome::Failure(err),
    }
}

/// Map non-success status codes to the matching `ApiError`.
fn check_status(resource: &str, response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        404 => Err(ApiError::NotFound {
            resource: resource.to_string(),
        }),
        401 => Err(ApiError::Unauthorized),
        _ if !response.is_success() => Err(ApiError::RequestFailed {
            status: response.status,
            body: response.body.clone(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::{MonthlyCount, Tree};

    const TREE_BODY: &str = r#"{"uuid":"abc","enterpriseId":"123","projectId":"123","user":"JUnit","treeCount":1,"created":"2019-05-17T00:36:25.797Z"}"#;

    #[test]
    fn not_found_wins_over_bad_body() {
        let outcome: Outcome<Tree> = classify("tree", &HttpResponse::new(404, "<html>"));
        let err = outcome.error().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "could not find tree");
    }

    #[test]
    fn unauthorized_ignores_body() {
        for body in ["", "not json", TREE_BODY] {
            let outcome: Outcome<Tree> = classify("tree", &HttpResponse::new(401, body));
            assert_eq!(outcome.error(), Some(&ApiError::Unauthorized), "body {body:?}");
        }
    }

    #[test]
    fn other_statuses_are_request_failures() {
        let outcome: Outcome<Tree> = classify("tree", &HttpResponse::new(500, "boom"));
        let err = outcome.error().unwrap();
        assert_eq!(err.kind(), ErrorKind::RequestFailed);
        assert!(err.message().contains("500"));

        let redirect: Outcome<Tree> = classify("tree", &HttpResponse::new(302, ""));
        assert_eq!(redirect.error().unwrap().status(), Some(302));
    }

    #[test]
    fn success_decodes_payload() {
        let outcome: Outcome<Tree> = classify("tree", &HttpResponse::new(200, TREE_BODY));
        assert_eq!(outcome.uuid(), Some("abc"));
        assert_eq!(outcome.tree_count(), 1);

        let count: Outcome<MonthlyCount> =
            classify("enterprise", &HttpResponse::new(200, r#"{"count":200}"#));
        assert_eq!(count.total_trees(), 200);
    }

    #[test]
    fn any_2xx_delete_is_deleted_regardless_of_body() {
        for (status, body) in [(200, "true"), (200, ""), (200, r#"{"message":"deleted"}"#), (204, "")] {
            let outcome = classify_deleted("tree", &HttpResponse::new(status, body));
            assert_eq!(outcome, Outcome::Success(true), "status {status} body {body:?}");
            assert!(outcome.deleted());
        }
    }

    #[test]
    fn delete_keeps_status_errors() {
        let missing = classify_deleted("tree", &HttpResponse::new(404, "true"));
        assert_eq!(missing.error().unwrap().kind(), ErrorKind::NotFound);
        let denied = classify_deleted("tree", &HttpResponse::new(401, ""));
        assert_eq!(denied.error(), Some(&ApiError::Unauthorized));
        let failed = classify_deleted("tree", &HttpResponse::new(500, "true"));
        assert_eq!(failed.error().unwrap().status(), Some(500));
        assert!(!failed.deleted());
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let outcome: Outcome<MonthlyCount> =
            classify("enterprise", &HttpResponse::new(200, r#"{"total":1}"#));
        let err = outcome.error().unwrap();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.message(), "failed to parse response");
        assert!(err.cause().is_some());
    }

    #[test]
    fn classification_is_idempotent() {
        let responses = [
            HttpResponse::new(200, TREE_BODY),
            HttpResponse::new(200, "{"),
            HttpResponse::new(401, ""),
            HttpResponse::new(404, "missing"),
            HttpResponse::new(503, "unavailable"),
        ];
        for response in &responses {
            let first: Outcome<Tree> = classify("tree", response);
            let second: Outcome<Tree> = classify("tree", response);
            assert_eq!(first, second, "status {}", response.status);
        }
    }
}
