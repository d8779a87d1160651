use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tree {
    pub uuid: String,
    pub enterprise_id: String,
    pub project_id: String,
    pub user: String,
    pub tree_count: u32,
    pub created: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantTree {
    pub enterprise_id: String,
    pub project_id: String,
    pub user: String,
    pub tree_count: u32,
}

#[derive(Serialize, Deserialize)]
pub struct TreeCount {
    pub count: u64,
}

/// In-memory service state. Monthly totals are keyed by
/// `(enterprise_id, month)` where plantings record their month as `YYYY-MM`.
#[derive(Default)]
pub struct MockState {
    api_key: String,
    trees: RwLock<HashMap<String, Tree>>,
    counts: RwLock<HashMap<(String, String), u64>>,
}

impl MockState {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Seed the total reported for `enterprise_id` in `month`.
    pub fn with_monthly_count(mut self, enterprise_id: &str, month: &str, count: u64) -> Self {
        self.counts
            .get_mut()
            .insert((enterprise_id.to_string(), month.to_string()), count);
        self
    }
}

pub type Db = Arc<MockState>;

pub fn app(state: MockState) -> Router {
    let db: Db = Arc::new(state);
    Router::new()
        .route("/tree", post(plant_tree))
        .route("/tree/{uuid}", get(get_tree).delete(delete_tree))
        .route("/enterprise/{enterprise_id}/treeCount/{month}", get(tree_count))
        .route_layer(middleware::from_fn_with_state(db.clone(), require_api_key))
        .with_state(db)
}

pub async fn run(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

/// Rejects requests without the configured API key before any body is read.
async fn require_api_key(
    State(db): State<Db>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let key = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    match key {
        Some(key) if key == db.api_key => Ok(next.run(request).await),
        _ => {
            tracing::debug!("rejecting request with missing or wrong API key");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

async fn plant_tree(
    State(db): State<Db>,
    Json(input): Json<PlantTree>,
) -> Result<Json<Tree>, StatusCode> {
    let tree = Tree {
        uuid: Uuid::new_v4().to_string(),
        enterprise_id: input.enterprise_id,
        project_id: input.project_id,
        user: input.user,
        tree_count: input.tree_count,
        created: Utc::now(),
    };
    let month = tree.created.format("%Y-%m").to_string();
    *db.counts
        .write()
        .await
        .entry((tree.enterprise_id.clone(), month))
        .or_insert(0) += u64::from(tree.tree_count);
    db.trees.write().await.insert(tree.uuid.clone(), tree.clone());
    tracing::info!(uuid = %tree.uuid, count = tree.tree_count, "planted");
    Ok(Json(tree))
}

async fn get_tree(
    State(db): State<Db>,
    Path(uuid): Path<String>,
) -> Result<Json<Tree>, StatusCode> {
    let trees = db.trees.read().await;
    trees.get(&uuid).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn delete_tree(
    State(db): State<Db>,
    Path(uuid): Path<String>,
) -> Result<Json<bool>, StatusCode> {
    let mut trees = db.trees.write().await;
    trees.remove(&uuid).map(|_| Json(true)).ok_or(StatusCode::NOT_FOUND)
}

async fn tree_count(
    State(db): State<Db>,
    Path((enterprise_id, month)): Path<(String, String)>,
) -> Result<Json<TreeCount>, StatusCode> {
    let counts = db.counts.read().await;
    counts
        .get(&(enterprise_id, month))
        .map(|&count| Json(TreeCount { count }))
        .ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_serializes_camel_case() {
        let tree = Tree {
            uuid: "abc".to_string(),
            enterprise_id: "123".to_string(),
            project_id: "456".to_string(),
            user: "JUnit".to_string(),
            tree_count: 1,
            created: "2019-05-17T00:36:25.797Z".parse().unwrap(),
        };
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["uuid"], "abc");
        assert_eq!(json["enterpriseId"], "123");
        assert_eq!(json["projectId"], "456");
        assert_eq!(json["treeCount"], 1);
    }

    #[test]
    fn plant_tree_requires_all_fields() {
        let result: Result<PlantTree, _> =
            serde_json::from_str(r#"{"enterpriseId":"1","projectId":"2","user":"u"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn seeded_counts_are_stored() {
        let mut state = MockState::new("k").with_monthly_count("123", "02-2022", 200);
        let counts = state.counts.get_mut();
        assert_eq!(counts.get(&("123".to_string(), "02-2022".to_string())), Some(&200));
    }
}
