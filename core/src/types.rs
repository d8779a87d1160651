//! Request and payload types for the DigitalHumani API.
//!
//! Field names follow Rust conventions; the JSON uses the service's camelCase
//! names (`enterpriseId`, `treeCount`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /tree`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeRequest {
    pub enterprise_id: String,
    pub project_id: String,
    pub user: String,
    pub tree_count: u32,
}

impl TreeRequest {
    pub fn new(
        enterprise_id: impl Into<String>,
        project_id: impl Into<String>,
        user: impl Into<String>,
        tree_count: u32,
    ) -> Self {
        Self {
            enterprise_id: enterprise_id.into(),
            project_id: project_id.into(),
            user: user.into(),
            tree_count,
        }
    }
}

/// Path parameters of `GET /enterprise/{id}/treeCount/{month}`.
///
/// `month` is an opaque, caller-formatted token (for example `2022-02`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnterpriseRequest {
    pub enterprise_id: String,
    pub month: String,
}

impl EnterpriseRequest {
    pub fn new(enterprise_id: impl Into<String>, month: impl Into<String>) -> Self {
        Self {
            enterprise_id: enterprise_id.into(),
            month: month.into(),
        }
    }

    pub(crate) fn path_segments(&self) -> [&str; 3] {
        [self.enterprise_id.as_str(), "treeCount", self.month.as_str()]
    }
}

/// A tree-planting record as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tree {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub enterprise_id: String,
    pub project_id: String,
    pub user: String,
    pub tree_count: u32,
    pub created: DateTime<Utc>,
}

/// Trees planted by an enterprise in one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    #[serde(rename = "count")]
    pub total_trees: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_request_serializes_camel_case() {
        let req = TreeRequest::new("123", "456", "JUnit", 3);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "enterpriseId": "123",
                "projectId": "456",
                "user": "JUnit",
                "treeCount": 3
            })
        );
    }

    #[test]
    fn tree_decodes_service_payload() {
        let tree: Tree = serde_json::from_str(
            r#"{"uuid":"abc","enterpriseId":"123","projectId":"123","user":"JUnit","treeCount":1,"created":"2019-05-17T00:36:25.797Z"}"#,
        )
        .unwrap();
        assert_eq!(tree.uuid.as_deref(), Some("abc"));
        assert_eq!(tree.tree_count, 1);
        assert_eq!(tree.created.to_rfc3339(), "2019-05-17T00:36:25.797+00:00");
    }

    #[test]
    fn tree_uuid_is_optional() {
        let tree: Tree = serde_json::from_str(
            r#"{"enterpriseId":"1","projectId":"2","user":"u","treeCount":2,"created":"2020-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(tree.uuid.is_none());
    }

    #[test]
    fn tree_rejects_missing_timestamp() {
        let result: Result<Tree, _> = serde_json::from_str(
            r#"{"uuid":"abc","enterpriseId":"1","projectId":"2","user":"u","treeCount":2}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn monthly_count_reads_count_field() {
        let count: MonthlyCount = serde_json::from_str(r#"{"count":200}"#).unwrap();
        assert_eq!(count.total_trees, 200);
    }

    #[test]
    fn enterprise_request_segments_keep_month_verbatim() {
        let req = EnterpriseRequest::new("123", "02-2022");
        assert_eq!(req.path_segments(), ["123", "treeCount", "02-2022"]);
    }
}
