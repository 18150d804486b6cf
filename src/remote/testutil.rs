//! In-process fake of the remote document store, backed by axum.
//!
//! Serves the same collection/document routes the real store exposes and
//! keeps its documents in memory so tests can inspect and mutate them.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::RemoteClient;

#[derive(Debug, Default)]
pub(crate) struct FakeState {
    /// Documents of the `sitios_turisticos` collection: `{"docId", "fields"}`
    pub places: Vec<Value>,
    /// Documents of the `reservas` collection
    pub reservations: Vec<Value>,
    /// Answer 500 to all reads
    pub fail_reads: bool,
    /// Answer 500 to all writes
    pub fail_writes: bool,
}

impl FakeState {
    fn collection_mut(&mut self, name: &str) -> &mut Vec<Value> {
        if name == "sitios_turisticos" {
            &mut self.places
        } else {
            &mut self.reservations
        }
    }

    fn collection(&self, name: &str) -> &Vec<Value> {
        if name == "sitios_turisticos" {
            &self.places
        } else {
            &self.reservations
        }
    }
}

pub(crate) fn place_doc(doc_id: &str, fields: Value) -> Value {
    serde_json::json!({ "docId": doc_id, "fields": fields })
}

pub(crate) fn reservation_doc(doc_id: &str, fields: Value) -> Value {
    serde_json::json!({ "docId": doc_id, "fields": fields })
}

pub(crate) struct FakeRemote {
    pub addr: SocketAddr,
    pub state: Arc<Mutex<FakeState>>,
    handle: JoinHandle<()>,
}

impl FakeRemote {
    pub(crate) async fn start(state: FakeState) -> Self {
        let state = Arc::new(Mutex::new(state));

        let app = Router::new()
            .route("/health", get(|| async { "ok" }))
            .route("/v1/{collection}", get(list_documents))
            .route(
                "/v1/{collection}/{doc_id}",
                put(put_document).patch(patch_document),
            )
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub(crate) fn client(&self) -> RemoteClient {
        RemoteClient::new(format!("http://{}", self.addr), "test-key".to_string())
    }
}

impl Drop for FakeRemote {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn list_documents(
    State(state): State<Arc<Mutex<FakeState>>>,
    Path(collection): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Value>>, StatusCode> {
    let state = state.lock().unwrap();
    if state.fail_reads {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let matches = state
        .collection(&collection)
        .iter()
        .filter(|doc| {
            params.iter().all(|(key, value)| match &doc["fields"][key] {
                Value::String(s) => s == value,
                Value::Number(n) => n.to_string() == *value,
                Value::Bool(b) => b.to_string() == *value,
                _ => false,
            })
        })
        .cloned()
        .collect();

    Ok(Json(matches))
}

async fn put_document(
    State(state): State<Arc<Mutex<FakeState>>>,
    Path((collection, doc_id)): Path<(String, String)>,
    Json(fields): Json<Value>,
) -> Result<StatusCode, StatusCode> {
    let mut state = state.lock().unwrap();
    if state.fail_writes {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let docs = state.collection_mut(&collection);
    let document = serde_json::json!({ "docId": doc_id, "fields": fields });
    match docs.iter_mut().find(|doc| doc["docId"] == doc_id.as_str()) {
        Some(existing) => *existing = document,
        None => docs.push(document),
    }

    Ok(StatusCode::OK)
}

async fn patch_document(
    State(state): State<Arc<Mutex<FakeState>>>,
    Path((collection, doc_id)): Path<(String, String)>,
    Json(patch): Json<Value>,
) -> Result<StatusCode, StatusCode> {
    let mut state = state.lock().unwrap();
    if state.fail_writes {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let docs = state.collection_mut(&collection);
    let doc = docs
        .iter_mut()
        .find(|doc| doc["docId"] == doc_id.as_str())
        .ok_or(StatusCode::NOT_FOUND)?;

    if let (Some(fields), Some(patch)) = (doc["fields"].as_object_mut(), patch.as_object()) {
        for (key, value) in patch {
            fields.insert(key.clone(), value.clone());
        }
    }

    Ok(StatusCode::OK)
}
